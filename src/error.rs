//! Error handling for curly-template
//!
//! This module provides the error type for all curly-template operations.
//! Every error is synchronous and fail-fast: template compilation and binding
//! problems are build-time configuration mistakes, and missing keys are a
//! violation of the data contract by the caller.
//!
//! # Error Types
//!
//! - [`Error::ParseError`] - Malformed template text (unterminated placeholder, empty input)
//! - [`Error::BindingError`] - Invalid inner template registration
//! - [`Error::MissingKeys`] - Data does not satisfy the declared placeholders
//! - [`Error::JsonError`] - JSON parsing and serialization errors at the data boundary
//!
//! # Usage
//!
//! ```rust,ignore
//! use curly_template::{compile, Error};
//!
//! match compile("Hello {{name") {
//!     Ok(_) => println!("Template compiled"),
//!     Err(Error::ParseError(msg)) => println!("Parse error: {}", msg),
//!     Err(err) => println!("Other error: {}", err),
//! }
//! ```
//!
//! # Memory Efficiency
//!
//! Error messages use `Cow<'static, str>` so fixed messages do not allocate,
//! while messages carrying runtime context can still be owned.

use std::borrow::Cow;
use thiserror::Error;

/// Error type for all curly-template operations
#[derive(Error, Debug)]
pub enum Error {
    /// Template text could not be compiled
    ///
    /// Raised for empty template input and for a `{{` that is never closed.
    /// The message names the line and column where the placeholder began.
    #[error("Parse error: {0}")]
    ParseError(Cow<'static, str>),

    /// Invalid inner template registration
    ///
    /// Raised for a blank key, registering a template into itself (directly
    /// or through its own inner templates) and registering the same key twice.
    #[error("Binding error: {0}")]
    BindingError(Cow<'static, str>),

    /// A record is missing keys declared by the template
    ///
    /// `path` locates the record, for example `ROOT[1].F[0]`.
    #[error("Missing keys in data map {path}: [{}]", .keys.join(", "))]
    MissingKeys { path: String, keys: Vec<String> },

    /// JSON parsing and serialization errors
    ///
    /// Automatically converted from `serde_json::Error` when data conversion fails.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl Error {
    /// Create a parse error with a static string
    pub fn parse_static(msg: &'static str) -> Self {
        Error::ParseError(Cow::Borrowed(msg))
    }

    /// Create a parse error with an owned string
    pub fn parse_owned(msg: String) -> Self {
        Error::ParseError(Cow::Owned(msg))
    }

    /// Create a binding error with a static string
    pub fn binding_static(msg: &'static str) -> Self {
        Error::BindingError(Cow::Borrowed(msg))
    }

    /// Create a binding error with an owned string
    pub fn binding_owned(msg: String) -> Self {
        Error::BindingError(Cow::Owned(msg))
    }

    /// Create a missing keys error for the record at `path`
    pub fn missing_keys(path: impl Into<String>, keys: Vec<String>) -> Self {
        Error::MissingKeys {
            path: path.into(),
            keys,
        }
    }
}

/// Result type alias for curly-template operations
pub type Result<T> = std::result::Result<T, Error>;
