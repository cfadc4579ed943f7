//! Error types for loading and checking search indexes.
//!
//! Library functions return [`Result`], whose error is [`IndexError`]. The
//! binary wraps these in `anyhow` at the command boundary.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::index::validate::Violation;

/// Errors raised while locating, loading or validating a search index.
#[derive(Error, Debug)]
pub enum IndexError {
    /// I/O errors while reading the index file
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The payload was found but is not a well-formed index
    #[error("Malformed index: {0}")]
    Parse(#[from] serde_json::Error),

    /// No JSON object could be located in the file
    #[error("No index payload found: {0}")]
    MissingPayload(String),

    /// Object type tables must be keyed by small integers
    #[error("Invalid object type key {0:?}")]
    ObjTypeKey(String),

    /// A page filter is not a valid glob
    #[error("Invalid page pattern: {0}")]
    Pattern(#[from] globset::Error),

    /// Nothing that looks like a search index exists under the path
    #[error("No searchindex.js found under {}", .0.display())]
    NotFound(PathBuf),

    /// Structural invariants do not hold
    #[error("Index failed validation with {} violation(s){}", .0.len(), first_violation(.0))]
    Invalid(Vec<Violation>),
}

fn first_violation(violations: &[Violation]) -> String {
    violations
        .first()
        .map(|v| format!(", first: {}", v))
        .unwrap_or_default()
}

impl IndexError {
    pub fn missing_payload<S: Into<String>>(msg: S) -> Self {
        IndexError::MissingPayload(msg.into())
    }
}

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, IndexError>;
