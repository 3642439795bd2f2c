//! JSON documents holding one entity collection each.
//!
//! A document is a JSON array of records. Writes replace the whole file;
//! there is no atomic rename and no locking, so one process at a time.

use std::fs;
use std::io;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Failure reading or writing a document
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid record: {0}")]
    Invalid(String),
}

/// Read a document. A missing file is an empty collection.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, DocumentError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("No document at {}, starting empty", path.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    Ok(serde_json::from_str(&content)?)
}

/// Overwrite a document with `records`, creating its directory if needed.
pub fn save_document<T: Serialize>(path: &Path, records: &[T]) -> Result<(), DocumentError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let content = serde_json::to_string_pretty(records)?;
    fs::write(path, content)?;

    Ok(())
}
