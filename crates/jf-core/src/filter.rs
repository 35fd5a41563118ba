//! End-to-end pipeline: decode, infer, project, canonicalize, digest.

use crate::canonicalizer::Canonicalizer;
use crate::digest::{digest, Digest};
use crate::errors::FilterError;
use crate::projection::project;
use crate::schema::infer;
use crate::selection::{parse, SelectionSet};
use crate::value::{decode, Value};

/// A parsed selection query, reusable across documents.
///
/// Holds no per-document state, so one `Filter` can be shared between threads
/// and applied to any number of documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    selection: SelectionSet,
    canonicalizer: Canonicalizer,
}

impl Filter {
    /// Parses `query` into a filter.
    pub fn new(query: &str) -> Result<Self, FilterError> {
        Ok(Self::from_selection(parse(query)?))
    }

    /// Wraps an already-parsed selection.
    pub fn from_selection(selection: SelectionSet) -> Self {
        Self {
            selection,
            canonicalizer: Canonicalizer::new(),
        }
    }

    /// The parsed selection.
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Projects an already-decoded document.
    pub fn project(&self, document: &Value) -> Result<Value, FilterError> {
        let schema = infer(document);
        Ok(project(document, &schema, &self.selection)?)
    }

    /// Canonical bytes of the selected part of an already-decoded document.
    pub fn apply_value(&self, document: &Value) -> Result<Vec<u8>, FilterError> {
        let filtered = self.project(document)?;
        Ok(self.canonicalizer.canonicalize(&filtered))
    }

    /// Canonical bytes of the selected part of a raw JSON document.
    pub fn apply(&self, raw: &[u8]) -> Result<Vec<u8>, FilterError> {
        self.apply_value(&decode(raw)?)
    }

    /// Digest of [`Filter::apply`].
    pub fn digest(&self, raw: &[u8]) -> Result<Digest, FilterError> {
        Ok(digest(&self.apply(raw)?))
    }
}

/// Filters a raw JSON document with `query` and returns the canonical bytes.
pub fn filter_json(query: &str, raw: &[u8]) -> Result<Vec<u8>, FilterError> {
    Filter::new(query)?.apply(raw)
}

/// SHA-256 of [`filter_json`].
pub fn sha256_json(query: &str, raw: &[u8]) -> Result<Digest, FilterError> {
    Filter::new(query)?.digest(raw)
}
