//! Error types for the Repscore service.
//!
//! This crate provides the error types shared by the scoring pipeline, the
//! provider client and the HTTP surface.
//!
//! # Error Hierarchy
//!
//! Errors follow the `ErrorKind` + wrapper struct pattern:
//! - Message errors (`ValidationError`, `ConfigError`, `JsonError`, `HttpError`)
//!   carry a message plus the source location where they were raised
//! - `ProviderError` wraps a `ProviderErrorKind` with location tracking
//! - `RepscoreError` boxes a `RepscoreErrorKind` that unifies all of the above
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use repscore_error::{RepscoreResult, JsonError};
//!
//! fn parse_scoring() -> RepscoreResult<()> {
//!     Err(JsonError::new("Could not parse JSON from model output."))?
//! }
//!
//! let err = parse_scoring().unwrap_err();
//! assert_eq!(err.message(), "Could not parse JSON from model output.");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod http;
mod json;
mod provider;
mod validation;

pub use config::ConfigError;
pub use error::{RepscoreError, RepscoreErrorKind, RepscoreResult};
pub use http::HttpError;
pub use json::JsonError;
pub use provider::{ProviderError, ProviderErrorKind};
pub use validation::ValidationError;
