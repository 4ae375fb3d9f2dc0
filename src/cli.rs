//! Interactive prompting and input validation.
//!
//! Validation lives in pure functions so it can be tested without a
//! terminal; the `prompt_*` wrappers loop until the user supplies something
//! acceptable, mirroring the unbounded re-prompt behavior of the tool.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::Result;
use dialoguer::{Input, Select};
use regex::Regex;
use thiserror::Error;

use crate::records::Platform;

// Windows-reserved characters double as a path-separator blocklist.
static INVALID_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[\\/:*?"<>|]"#).expect("valid regex"));
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilenameError {
    #[error("Filename cannot be empty.")]
    Empty,
    #[error(r#"Filename contains invalid characters: \ / : * ? " < > |"#)]
    InvalidCharacters,
}

/// Validate a user-supplied output filename (without extension) and
/// normalize internal whitespace runs to underscores.
///
/// # Errors
///
/// Returns an error when the trimmed input is empty or contains any of
/// `\ / : * ? " < > |`.
pub fn normalize_filename(input: &str) -> Result<String, FilenameError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(FilenameError::Empty);
    }
    if INVALID_FILENAME_CHARS.is_match(trimmed) {
        return Err(FilenameError::InvalidCharacters);
    }
    Ok(WHITESPACE_RUN.replace_all(trimmed, "_").into_owned())
}

/// Resolve a CSV path entered by the user: taken as-is when it exists,
/// otherwise tried relative to the output directory.
#[must_use]
pub fn resolve_csv_path(input: &str, output_dir: &Path) -> Option<PathBuf> {
    let direct = PathBuf::from(input);
    if direct.is_file() {
        return Some(direct);
    }
    let fallback = output_dir.join(input);
    if fallback.is_file() {
        return Some(fallback);
    }
    None
}

/// Prompt for the output filename until a valid one is entered.
///
/// # Errors
///
/// Returns an error only when the terminal interaction itself fails.
pub fn prompt_filename() -> Result<String> {
    println!("\nEnter your preferred output filename (without file extensions).");
    loop {
        let input: String = Input::new().with_prompt(">>").interact_text()?;
        match normalize_filename(&input) {
            Ok(name) => return Ok(name),
            Err(e) => println!("{e}"),
        }
    }
}

/// Prompt for the target platform.
///
/// # Errors
///
/// Returns an error only when the terminal interaction itself fails.
pub fn prompt_platform() -> Result<Platform> {
    let labels: Vec<&str> = Platform::ALL.iter().map(|p| p.label()).collect();
    let selection = Select::new()
        .with_prompt("Select the content to generate")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(Platform::ALL[selection])
}

/// Prompt for a missing configuration value (API key, country of origin).
///
/// # Errors
///
/// Returns an error only when the terminal interaction itself fails.
pub fn prompt_value(message: &str) -> Result<String> {
    println!("\n{message}");
    let input: String = Input::new().with_prompt(">>").interact_text()?;
    Ok(input.trim().to_string())
}

/// Prompt for the CSV path in standalone render mode.
///
/// # Errors
///
/// Returns an error only when the terminal interaction itself fails.
pub fn prompt_csv_path() -> Result<String> {
    let input: String = Input::new()
        .with_prompt("Manual input activated. Enter path to CSV file")
        .interact_text()?;
    Ok(input.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_rejects_empty_and_whitespace_only() {
        assert_eq!(normalize_filename(""), Err(FilenameError::Empty));
        assert_eq!(normalize_filename("   "), Err(FilenameError::Empty));
    }

    #[test]
    fn test_normalize_rejects_each_invalid_character() {
        for ch in ['\\', '/', ':', '*', '?', '"', '<', '>', '|'] {
            let input = format!("report{ch}name");
            assert_eq!(
                normalize_filename(&input),
                Err(FilenameError::InvalidCharacters),
                "character {ch:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_normalize_replaces_whitespace_runs() {
        assert_eq!(normalize_filename("My File").unwrap(), "My_File");
        assert_eq!(normalize_filename("  a\t b  ").unwrap(), "a_b");
    }

    #[test]
    fn test_normalize_keeps_plain_names() {
        assert_eq!(normalize_filename("thread-01").unwrap(), "thread-01");
    }

    #[test]
    fn test_resolve_csv_path_prefers_direct_path() {
        let dir = tempfile::tempdir().unwrap();
        let direct = dir.path().join("feed.csv");
        std::fs::write(&direct, "a,b\n").unwrap();

        let resolved = resolve_csv_path(direct.to_str().unwrap(), dir.path()).unwrap();
        assert_eq!(resolved, direct);
    }

    #[test]
    fn test_resolve_csv_path_falls_back_to_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("feed.csv"), "a,b\n").unwrap();

        let resolved = resolve_csv_path("feed.csv", dir.path()).unwrap();
        assert_eq!(resolved, dir.path().join("feed.csv"));
    }

    #[test]
    fn test_resolve_csv_path_missing_everywhere() {
        let dir = tempfile::tempdir().unwrap();
        assert!(resolve_csv_path("nope.csv", dir.path()).is_none());
    }
}
