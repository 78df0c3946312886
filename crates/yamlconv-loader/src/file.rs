//! Local-file loader.

use bytes::Bytes;

use crate::RetrievalError;

/// Read the whole file at `path`. No timeout applies.
pub async fn read(path: &str) -> Result<Bytes, RetrievalError> {
    tokio::fs::read(path)
        .await
        .map(Bytes::from)
        .map_err(|source| RetrievalError::Read {
            location: path.to_string(),
            source,
        })
}
