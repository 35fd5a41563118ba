//! Reading the query and the document.

use crate::path::InputSource;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while gathering command input.
#[derive(Error, Debug)]
pub enum InputError {
    /// Neither `--query` nor `--file` was given.
    #[error("a query is required: pass --query or --file")]
    MissingQuery,
    /// The query file could not be read.
    #[error("failed to read query file at {path}: {source}")]
    QueryFile {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The input document could not be read.
    #[error("failed to read file at {path}: {source}")]
    Document {
        /// Path that failed (`-` for stdin).
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

/// Returns the inline query, or the contents of the query file.
///
/// An inline query takes precedence when both are given.
pub fn read_query(inline: Option<String>, file: Option<&Path>) -> Result<String, InputError> {
    if let Some(query) = inline.filter(|q| !q.is_empty()) {
        tracing::debug!("using inline query");
        return Ok(query);
    }
    let path = file.ok_or(InputError::MissingQuery)?;
    tracing::debug!(path = %path.display(), "reading query file");
    std::fs::read_to_string(path).map_err(|source| InputError::QueryFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads the whole input document.
pub fn read_document(source: &InputSource) -> Result<Vec<u8>, InputError> {
    let bytes = match source {
        InputSource::Stdin => {
            let mut buffer = Vec::new();
            io::stdin()
                .read_to_end(&mut buffer)
                .map_err(|source| InputError::Document {
                    path: PathBuf::from("-"),
                    source,
                })?;
            buffer
        }
        InputSource::File(path) => std::fs::read(path).map_err(|source| InputError::Document {
            path: path.clone(),
            source,
        })?,
    };
    tracing::debug!(?source, bytes = bytes.len(), "read input document");
    Ok(bytes)
}
