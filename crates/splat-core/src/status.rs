//! Error handling for splat conversion.
//!
//! Every fallible operation in the workspace reports a [`SplatError`]. Parse
//! failures, schema failures and store invariant violations each carry enough
//! detail (attribute names, byte counts) for a caller to act on them directly.

use std::io;

use thiserror::Error;

use crate::attribute_store::QuaternionConvention;

#[derive(Error, Debug)]
pub enum SplatError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed PLY header: {0}")]
    Header(String),

    #[error("PLY header declares no `{0}` element")]
    MissingElement(String),

    #[error("PLY body size mismatch: expected {expected} bytes, found {found}")]
    BodySize { expected: usize, found: usize },

    #[error("Unsupported feature: {0}")]
    UnsupportedFeature(String),

    #[error("Missing attributes: {}", .0.join(", "))]
    MissingAttributes(Vec<String>),

    #[error("Cannot standardize incomplete store, missing: {}", .0.join(", "))]
    Schema(Vec<String>),

    #[error("Quaternion convention mismatch: expected {expected}, found {found}")]
    ConventionMismatch {
        expected: QuaternionConvention,
        found: QuaternionConvention,
    },

    #[error("Column `{name}` has {found} values, expected {expected}")]
    ColumnLength {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("Duplicate column `{0}`")]
    DuplicateColumn(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl SplatError {
    /// Returns true for errors raised while parsing a PLY or compact file.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            SplatError::Header(_)
                | SplatError::MissingElement(_)
                | SplatError::BodySize { .. }
                | SplatError::UnsupportedFeature(_)
        )
    }

    /// Attribute names this error reports as absent, if any.
    pub fn missing_names(&self) -> &[String] {
        match self {
            SplatError::MissingAttributes(names) | SplatError::Schema(names) => names,
            _ => &[],
        }
    }
}

pub type Result<T> = std::result::Result<T, SplatError>;
