//! Selection-set filtering of JSON documents into canonical, hashable bytes.
//!
//! A query such as `{metadata{name},apiVersion}` picks fields out of a JSON
//! object. The document's own content determines which fields exist; the
//! selected subset is re-emitted with sorted keys and fixed scalar formatting
//! so that equal selections always produce equal bytes and equal digests.
//!
//! ```rust
//! use jf_core::filter_json;
//!
//! let doc = br#"{"kind": "Pod", "metadata": {"uid": "1", "name": "web"}, "spec": {}}"#;
//! let bytes = filter_json("{metadata{name},kind}", doc)?;
//! assert_eq!(bytes, br#"{"kind":"Pod","metadata":{"name":"web"}}"#);
//! # Ok::<(), jf_core::FilterError>(())
//! ```
//!
#![deny(missing_docs)]

/// Canonical byte encoding of values.
pub mod canonicalizer;
/// Digest primitives.
pub mod digest;
/// Pipeline error type.
pub mod errors;
pub mod filter;
mod path;
pub mod projection;
/// Schema inference from document content.
pub mod schema;
pub mod selection;
pub mod value;

pub use canonicalizer::{encode, Canonicalizer};
pub use digest::{digest, Digest, DigestAlg};
pub use errors::FilterError;
pub use filter::{filter_json, sha256_json, Filter};
pub use projection::{project, ProjectionError};
pub use schema::{infer, ScalarKind, SchemaNode};
pub use selection::{parse, Field, SelectionSet, SyntaxError};
pub use value::{decode, DecodeError, Value};
