//! Normalizer — rewrites a [`GenericNode`] into a [`CanonicalNode`].
//!
//! YAML mappings may use any node as a key; JSON objects only allow strings.
//! The rule table for keys is:
//!
//! | Key kind | Result |
//! |----------|--------|
//! | string   | used as-is |
//! | integer  | base-10 rendering (`-7`, `42`, `18446744073709551615`) |
//! | anything else | [`ConvertError::UnsupportedKeyType`] |
//!
//! Explicit tags are transparent: `!thing 1` behaves exactly like `1`.
//! Sequences keep their length and order, scalars pass through untouched.
//! When two keys coerce to the same string the later value wins, and the
//! entry keeps the position of the first occurrence.

use std::fmt;

use crate::{CanonicalNode, ConvertError, GenericNode};

/// Runtime kind of a YAML node, as reported in key-coercion errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    String,
    Integer,
    Float,
    Boolean,
    Null,
    Sequence,
    Mapping,
}

impl KeyKind {
    /// Classify `node`, looking through any explicit tag.
    pub fn of(node: &GenericNode) -> Self {
        match node {
            GenericNode::String(_) => KeyKind::String,
            GenericNode::Number(n) if n.is_f64() => KeyKind::Float,
            GenericNode::Number(_) => KeyKind::Integer,
            GenericNode::Bool(_) => KeyKind::Boolean,
            GenericNode::Null => KeyKind::Null,
            GenericNode::Sequence(_) => KeyKind::Sequence,
            GenericNode::Mapping(_) => KeyKind::Mapping,
            GenericNode::Tagged(tagged) => KeyKind::of(&tagged.value),
        }
    }
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyKind::String => write!(f, "string"),
            KeyKind::Integer => write!(f, "integer"),
            KeyKind::Float => write!(f, "float"),
            KeyKind::Boolean => write!(f, "boolean"),
            KeyKind::Null => write!(f, "null"),
            KeyKind::Sequence => write!(f, "sequence"),
            KeyKind::Mapping => write!(f, "mapping"),
        }
    }
}

/// Coerce a mapping key into a JSON object key.
pub fn coerce_key(key: &GenericNode) -> Result<String, ConvertError> {
    match key {
        GenericNode::String(s) => Ok(s.clone()),
        GenericNode::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i.to_string())
            } else if let Some(u) = n.as_u64() {
                Ok(u.to_string())
            } else {
                Err(unsupported(key))
            }
        }
        GenericNode::Tagged(tagged) => coerce_key(&tagged.value),
        _ => Err(unsupported(key)),
    }
}

/// Recursively rewrite `node` so that every mapping key is a string.
///
/// Aborts on the first key that cannot be coerced; nothing of the partially
/// built tree is returned in that case.
pub fn normalize(node: &GenericNode) -> Result<CanonicalNode, ConvertError> {
    match node {
        GenericNode::Null => Ok(CanonicalNode::Null),
        GenericNode::Bool(b) => Ok(CanonicalNode::Bool(*b)),
        GenericNode::Number(n) => normalize_number(n),
        GenericNode::String(s) => Ok(CanonicalNode::String(s.clone())),
        GenericNode::Sequence(items) => items
            .iter()
            .map(normalize)
            .collect::<Result<Vec<_>, _>>()
            .map(CanonicalNode::Array),
        GenericNode::Mapping(mapping) => {
            let mut object = serde_json::Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                let key = coerce_key(key)?;
                let value = normalize(value)?;
                object.insert(key, value);
            }
            Ok(CanonicalNode::Object(object))
        }
        GenericNode::Tagged(tagged) => normalize(&tagged.value),
    }
}

fn normalize_number(n: &serde_yaml::Number) -> Result<CanonicalNode, ConvertError> {
    if let Some(i) = n.as_i64() {
        return Ok(CanonicalNode::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Ok(CanonicalNode::from(u));
    }
    // Every YAML number is an i64, a u64 or an f64.
    let f = n.as_f64().unwrap_or(f64::NAN);
    serde_json::Number::from_f64(f)
        .map(CanonicalNode::Number)
        .ok_or(ConvertError::NonFiniteFloat { value: f })
}

fn unsupported(key: &GenericNode) -> ConvertError {
    let kind = KeyKind::of(key);
    tracing::debug!(%kind, "rejecting map key");
    ConvertError::UnsupportedKeyType { kind }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
