// File: crates/curve-core/src/error.rs
// Summary: Error taxonomy for chart construction and value mapping.

use thiserror::Error;

/// Errors raised while building or mapping a chart.
///
/// All variants are raised synchronously where they are detected. None of
/// them is transient, so callers should not retry.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChartError {
    /// Missing or malformed series/config data.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A curve needs at least two points.
    #[error("series `{series}` has {len} point(s); at least 2 are required")]
    InsufficientData { series: String, len: usize },

    /// The source range of a mapping has zero width.
    #[error("cannot map from zero-width range [{low}, {high}]")]
    InvalidRange { low: f64, high: f64 },
}

impl ChartError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        ChartError::InvalidInput(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, ChartError>;
