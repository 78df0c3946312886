//! Configuration types for yamlconv.
//!
//! There is no configuration file: [`Config::defaults`] deserializes the
//! embedded defaults, and [`Config::with_overrides`] layers command-line
//! values on top of them through the same `config` builder.

use serde::Deserialize;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[loader]
http_timeout_secs = 30

[output]
pretty = false
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration for a single conversion run.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub loader: LoaderConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// `[loader]` section: how documents are fetched.
#[derive(Debug, Clone, Deserialize)]
pub struct LoaderConfig {
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

fn default_http_timeout_secs() -> u64 { 30 }

impl LoaderConfig {
    /// Upper bound on a whole remote fetch (connect, request and body).
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            http_timeout_secs: default_http_timeout_secs(),
        }
    }
}

/// `[output]` section: how the JSON is laid out.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub pretty: bool,
}

/// Values supplied on the command line. `None` keeps the default.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub http_timeout_secs: Option<u64>,
    pub pretty: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Return the built-in defaults.
    pub fn defaults() -> Self {
        builder()
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// Layer `overrides` on top of the built-in defaults.
    pub fn with_overrides(overrides: &Overrides) -> Result<Self, config::ConfigError> {
        let mut builder = builder();
        if let Some(secs) = overrides.http_timeout_secs {
            builder = builder.set_override("loader.http_timeout_secs", secs)?;
        }
        if let Some(pretty) = overrides.pretty {
            builder = builder.set_override("output.pretty", pretty)?;
        }
        builder.build()?.try_deserialize()
    }
}

fn builder() -> config::ConfigBuilder<config::builder::DefaultState> {
    config::Config::builder()
        .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
