//! Deterministic avatar URLs.
//!
//! Profile images are never stored: each identity maps to a seeded DiceBear
//! URL, so the same username always produces the same face. The URL is a
//! pure function of the seed and is recomputed at render time rather than
//! persisted in the CSV.

/// Fallback shown when a DiceBear avatar fails to load client-side.
pub const FALLBACK_AVATAR_URL: &str = "https://cdn-icons-png.flaticon.com/512/149/149071.png";

/// DiceBear art style, one per platform that renders avatars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarStyle {
    /// Twitter profile images.
    Notionists,
    /// Instagram profile images.
    Lorelei,
    /// Facebook profile images.
    Avataaars,
}

impl AvatarStyle {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AvatarStyle::Notionists => "notionists-neutral",
            AvatarStyle::Lorelei => "lorelei-neutral",
            AvatarStyle::Avataaars => "avataaars-neutral",
        }
    }
}

/// Build the seeded avatar URL for an identity.
#[must_use]
pub fn avatar_url(style: AvatarStyle, seed: &str) -> String {
    format!(
        "https://api.dicebear.com/9.x/{}/svg?seed={}",
        style.as_str(),
        urlencoding::encode(seed)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avatar_url_is_deterministic() {
        let a = avatar_url(AvatarStyle::Notionists, "alice");
        let b = avatar_url(AvatarStyle::Notionists, "alice");
        assert_eq!(a, b);
        assert_eq!(
            a,
            "https://api.dicebear.com/9.x/notionists-neutral/svg?seed=alice"
        );
    }

    #[test]
    fn test_avatar_url_styles_differ() {
        let twitter = avatar_url(AvatarStyle::Notionists, "bob");
        let insta = avatar_url(AvatarStyle::Lorelei, "bob");
        let facebook = avatar_url(AvatarStyle::Avataaars, "bob");
        assert!(twitter.contains("notionists-neutral"));
        assert!(insta.contains("lorelei-neutral"));
        assert!(facebook.contains("avataaars-neutral"));
    }

    #[test]
    fn test_avatar_url_encodes_seed() {
        let url = avatar_url(AvatarStyle::Avataaars, "Jane Smith & co");
        assert_eq!(
            url,
            "https://api.dicebear.com/9.x/avataaars-neutral/svg?seed=Jane%20Smith%20%26%20co"
        );
    }
}
