//! Platform renderers.
//!
//! Each renderer is a pure function from an ordered record set to a complete
//! HTML document string: identical input produces byte-identical output.
//! Field values are interpolated through maud, which escapes them, so
//! model-generated content cannot inject markup.

pub mod facebook;
pub mod instagram;
pub mod reddit;
pub mod twitter;

use thiserror::Error;

use crate::records::RecordSet;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("facebook record set contains no Post entry")]
    MissingPost,
}

/// Render a record set into its platform's HTML document.
///
/// # Errors
///
/// Returns an error if the record set violates a platform invariant
/// (currently only a Facebook set without a Post entry).
pub fn render_record_set(records: &RecordSet) -> Result<String, RenderError> {
    match records {
        RecordSet::Reddit(rows) => Ok(reddit::render(rows)),
        RecordSet::Twitter(rows) => Ok(twitter::render(rows)),
        RecordSet::Instagram(rows) => Ok(instagram::render(rows)),
        RecordSet::Facebook(rows) => facebook::render(rows),
    }
}

/// Format a count with thousands separators: 1234567 -> "1,234,567".
#[must_use]
pub(crate) fn format_count(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if n < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
