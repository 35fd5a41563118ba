use thiserror::Error;

/// Any failure of the filter pipeline.
///
/// Every variant is terminal: the pipeline either produces a complete result
/// or exactly one of these.
#[derive(Error, Debug)]
pub enum FilterError {
    /// The input document could not be decoded.
    #[error("failed to decode document: {0}")]
    Decode(#[from] crate::value::DecodeError),
    /// The selection query is malformed.
    #[error("invalid query: {0}")]
    Syntax(#[from] crate::selection::SyntaxError),
    /// The selection does not fit the document.
    #[error("{0}")]
    Projection(#[from] crate::projection::ProjectionError),
}
