//! yamlconv-core — document model and normalizing transcoder.
//!
//! This crate owns everything between "raw bytes" and "JSON bytes":
//!
//! ```text
//! bytes ──► parse_document ──► normalize ──► serialize ──► bytes
//!            (serde_yaml)        (keys → text)  (serde_json)
//! ```
//!
//! The byte loader lives in `yamlconv-loader`; the CLI and output plumbing
//! live in the root `yamlconv` crate.

pub mod config;
pub mod document;
pub mod error;
pub mod normalize;
pub mod serialize;

pub use document::parse_document;
pub use error::ConvertError;
pub use normalize::{coerce_key, normalize, KeyKind};
pub use serialize::{serialize, transcode};

/// Parsed YAML tree. Mapping keys may be any node, including composites.
pub type GenericNode = serde_yaml::Value;

/// Normalized JSON tree. Mapping keys are always strings, kept in insertion order.
pub type CanonicalNode = serde_json::Value;
