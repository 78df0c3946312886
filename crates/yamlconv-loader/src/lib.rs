//! yamlconv-loader — byte loaders for yamlconv.
//!
//! A location is either a URL (`http://…`, `https://…`) or a local path.
//! [`Strategy::for_location`] makes that decision purely from the text of the
//! location; [`load`] then dispatches to [`http::fetch`] or [`file::read`] and
//! returns the whole document buffered in memory.

pub mod error;
pub mod file;
pub mod http;

use bytes::Bytes;
use yamlconv_core::config::LoaderConfig;

pub use error::RetrievalError;

/// How a location is retrieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Single HTTP(S) `GET`, bounded by [`LoaderConfig::http_timeout`].
    Remote,
    /// Whole-file read from the local filesystem.
    Local,
}

const REMOTE_SCHEMES: &[&str] = &["http://", "https://"];

impl Strategy {
    /// Pick the strategy for `location`. Scheme matching is ASCII
    /// case-insensitive; everything that is not a URL is a path.
    pub fn for_location(location: &str) -> Self {
        let is_remote = REMOTE_SCHEMES.iter().any(|scheme| {
            location
                .get(..scheme.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
        });
        if is_remote {
            Strategy::Remote
        } else {
            Strategy::Local
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Remote => write!(f, "remote"),
            Strategy::Local => write!(f, "local"),
        }
    }
}

/// Load the raw bytes behind `location`.
pub async fn load(location: &str, config: &LoaderConfig) -> Result<Bytes, RetrievalError> {
    let strategy = Strategy::for_location(location);
    tracing::debug!(location, %strategy, "loading document");

    let bytes = match strategy {
        Strategy::Remote => http::fetch(location, config.http_timeout()).await?,
        Strategy::Local => file::read(location).await?,
    };

    tracing::debug!(location, len = bytes.len(), "document loaded");
    Ok(bytes)
}
