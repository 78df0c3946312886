//! Shared test utilities for yamlconv integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file.

pub mod fake_http;
pub mod generators;

pub use assertions::*;
pub use fixtures::*;
