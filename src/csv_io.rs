//! CSV export and import of record sets.
//!
//! The CSV is the durable artifact of a run: one row per record, including
//! derived columns, written as UTF-8 with a BOM so spreadsheet tools open it
//! correctly. A human may hand-edit it between generation and rendering, and
//! the standalone render mode reads it back by platform.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::records::{FacebookEntry, InstaPost, Platform, RecordSet, RedditComment, Tweet};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Error)]
pub enum CsvError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Write a record set to `path` as UTF-8-with-BOM CSV.
///
/// # Errors
///
/// Returns an error if serialization or the file write fails.
pub fn write_records(path: &Path, records: &RecordSet) -> Result<(), CsvError> {
    let body = match records {
        RecordSet::Reddit(rows) => serialize_rows(rows)?,
        RecordSet::Twitter(rows) => serialize_rows(rows)?,
        RecordSet::Instagram(rows) => serialize_rows(rows)?,
        RecordSet::Facebook(rows) => serialize_rows(rows)?,
    };

    let mut data = Vec::with_capacity(UTF8_BOM.len() + body.len());
    data.extend_from_slice(UTF8_BOM);
    data.extend_from_slice(&body);
    std::fs::write(path, data).map_err(|source| CsvError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a record set of the given platform's shape back from `path`.
///
/// A leading UTF-8 BOM is stripped before parsing.
///
/// # Errors
///
/// Returns an error if the file cannot be read or a row fails to decode into
/// the platform's record shape (including non-numeric Instagram counts).
pub fn read_records(path: &Path, platform: Platform) -> Result<RecordSet, CsvError> {
    let raw = std::fs::read(path).map_err(|source| CsvError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let body = raw.strip_prefix(UTF8_BOM).unwrap_or(&raw);

    Ok(match platform {
        Platform::Reddit => RecordSet::Reddit(deserialize_rows::<RedditComment>(body)?),
        Platform::Twitter => RecordSet::Twitter(deserialize_rows::<Tweet>(body)?),
        Platform::Instagram => RecordSet::Instagram(deserialize_rows::<InstaPost>(body)?),
        Platform::Facebook => RecordSet::Facebook(deserialize_rows::<FacebookEntry>(body)?),
    })
}

fn serialize_rows<T: Serialize>(rows: &[T]) -> Result<Vec<u8>, CsvError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| CsvError::Io {
            path: PathBuf::new(),
            source: e.into_error(),
        })
}

fn deserialize_rows<T: DeserializeOwned>(body: &[u8]) -> Result<Vec<T>, CsvError> {
    let mut reader = csv::Reader::from_reader(body);
    let rows = reader
        .deserialize()
        .collect::<Result<Vec<T>, csv::Error>>()?;
    Ok(rows)
}
