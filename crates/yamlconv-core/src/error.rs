//! Error type for the parse / normalize / serialize stages.

use crate::normalize::KeyKind;

/// Failure while turning bytes into a canonical JSON document.
///
/// Every variant is terminal for the document being converted; no partial
/// output is ever produced alongside one of these.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The input is not valid YAML.
    #[error(transparent)]
    Parse(#[from] serde_yaml::Error),

    /// A mapping key could not be turned into a JSON object key.
    #[error("unsupported map key type: expected string or integer, got {kind}")]
    UnsupportedKeyType { kind: KeyKind },

    /// NaN and the infinities have no JSON representation.
    #[error("unsupported value: {value} cannot be represented in JSON")]
    NonFiniteFloat { value: f64 },

    #[error("failed to encode JSON: {0}")]
    Serialize(#[from] serde_json::Error),
}
