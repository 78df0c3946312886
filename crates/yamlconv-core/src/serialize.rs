//! JSON encoding of a [`CanonicalNode`].
//!
//! Object keys are written in insertion order, which is the order the keys
//! appeared in the source document (see `normalize` for collisions).

use crate::config::OutputConfig;
use crate::{normalize, CanonicalNode, ConvertError, GenericNode};

/// Encode `node` as JSON, compact or indented depending on `output.pretty`.
pub fn serialize(node: &CanonicalNode, output: &OutputConfig) -> Result<Vec<u8>, ConvertError> {
    let bytes = if output.pretty {
        serde_json::to_vec_pretty(node)?
    } else {
        serde_json::to_vec(node)?
    };
    Ok(bytes)
}

/// Normalize then serialize in one step.
pub fn transcode(node: &GenericNode, output: &OutputConfig) -> Result<Vec<u8>, ConvertError> {
    let canonical = normalize(node)?;
    serialize(&canonical, output)
}
