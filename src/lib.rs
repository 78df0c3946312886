//! yamlconv — load a YAML document from a file or URL and re-encode it as JSON.
//!
//! This crate is the pipeline glue around the two library crates and is what
//! the binary and the integration harnesses import.
//!
//! # Architecture
//!
//! ```text
//! load ──► parse ──► normalize ──► serialize ──► write_output
//!  │         └──────────┴─────────────┘
//!  │               yamlconv-core
//! yamlconv-loader
//! ```
//!
//! Every stage runs once per document, strictly in sequence. The only await
//! point is the remote fetch inside [`load`].

use std::io::Write;
use std::path::{Path, PathBuf};

pub use yamlconv_core::config::{Config, LoaderConfig, OutputConfig, Overrides};
pub use yamlconv_core::{
    coerce_key, normalize, parse_document, serialize, transcode, CanonicalNode, ConvertError,
    GenericNode, KeyKind,
};
pub use yamlconv_loader::{load, RetrievalError, Strategy};

/// Any failure of the load → convert → write pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error("could not write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Load `location` and parse it into a [`GenericNode`].
pub async fn yaml_data(location: &str, config: &Config) -> Result<GenericNode, Error> {
    let bytes = load(location, &config.loader).await?;
    Ok(parse_document(&bytes)?)
}

/// Load `location` and convert it to JSON bytes.
pub async fn yaml_doc(location: &str, config: &Config) -> Result<Vec<u8>, Error> {
    let node = yaml_data(location, config).await?;
    let json = transcode(&node, &config.output)?;
    tracing::debug!(location, len = json.len(), "converted document");
    Ok(json)
}

/// Emit `json` to `dest`, or to stdout followed by a newline when `dest` is `None`.
///
/// Files are written exactly as given. On Unix a new file is created with
/// mode `0600` (still subject to the umask).
pub fn write_output(dest: Option<&Path>, json: &[u8]) -> Result<(), Error> {
    match dest {
        Some(path) => write_file(path, json).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(json)
                .and_then(|()| stdout.write_all(b"\n"))
                .and_then(|()| stdout.flush())
                .map_err(|source| Error::Write {
                    path: PathBuf::from("<stdout>"),
                    source,
                })
        }
    }
}

fn write_file(path: &Path, json: &[u8]) -> std::io::Result<()> {
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(json)?;
    file.flush()
}
