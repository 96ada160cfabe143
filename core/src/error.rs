//! Error types for the request builder.
//!
//! # Design
//! Validation errors (`Config`, `InvalidHeader`, `InvalidBody`) are raised by
//! the call that received the bad input, before any state changes, and carry
//! the rejected values for diagnostics. `Serialization` and `Middleware` can
//! only surface from a terminal dispatcher. Transport failures are not
//! represented here: the transport's own output is returned untouched.

use std::fmt;

use serde_json::Value;

use crate::http::Body;
use crate::kind::Kind;

/// Boxed error returned by middlewares.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The middleware slot that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Header,
    Body,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Header => f.write_str("header"),
            Stage::Body => f.write_str("body"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// Invalid factory arguments or configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A header key or value was not a string.
    #[error("invalid header: key and value must be strings, got {key_kind} {key} => {value_kind} {value}")]
    InvalidHeader {
        key: Value,
        value: Value,
        key_kind: Kind,
        value_kind: Kind,
    },

    /// The body was null.
    #[error("invalid body: {body:?}")]
    InvalidBody { body: Body },

    /// The body could not be encoded as JSON.
    #[error("failed to serialize request body: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A middleware returned an error; the transport was not invoked.
    #[error("{stage} middleware failed: {source}")]
    Middleware {
        stage: Stage,
        #[source]
        source: BoxError,
    },
}

pub type Result<T> = std::result::Result<T, RequestError>;
