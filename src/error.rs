// Copyright @yucwang 2026

//! Error types for construction and (de)serialization of geometry.

use thiserror::Error;

/// Errors reported at call boundaries. Geometric misses are never errors.
#[derive(Error, Debug)]
pub enum GeometryError {
    /// A numeric parameter lies outside its permitted range.
    #[error("{name} = {value} is outside {range}")]
    OutOfRange {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
        /// Human readable permitted range.
        range: &'static str,
    },

    /// An argument violates a precondition.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A reader met a type ID it cannot dispatch.
    #[error("Unsupported ID: {0}")]
    UnsupportedId(i32),

    /// The operation exists in the interface but has no implementation.
    #[error("Unsupported operation: {0}")]
    Unsupported(&'static str),

    /// Reading or writing the binary form failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GeometryError>;
