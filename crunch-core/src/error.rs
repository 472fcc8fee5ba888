//! Error types for telemetry validation

use thiserror::Error;

/// Precondition failures detected before running a comparison
///
/// The engine itself prefers sentinel values (a `None` attribution, a
/// midpoint scale) over errors. These variants are reserved for input that
/// would otherwise produce misleading output.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidInputError {
    /// A sample's distance is smaller than the distance of the sample before it
    #[error("Telemetry for {driver} is not sorted by distance: sample {index} ({distance}) comes after {previous}")]
    UnsortedSequence {
        driver: String,
        index: usize,
        previous: f64,
        distance: f64,
    },

    /// A series holds no samples, so there is no reference or scan anchor
    #[error("Telemetry for {driver} has no samples")]
    EmptyReferenceSeries { driver: String },

    /// A sample carries a NaN or infinite distance
    #[error("Telemetry for {driver} has a non-finite distance at sample {index}")]
    NonFiniteDistance { driver: String, index: usize },

    /// Both drivers use the same code, so attributions would be ambiguous
    #[error("Both drivers use the code {0}")]
    DuplicateDriverCode(String),

    /// Distance window ends before it starts
    #[error("Invalid distance window: from {from} is beyond to {to}")]
    InvalidWindow { from: f64, to: f64 },
}

impl InvalidInputError {
    /// Short machine-readable kind, used in API error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            InvalidInputError::UnsortedSequence { .. } => "unsorted-sequence",
            InvalidInputError::EmptyReferenceSeries { .. } => "empty-reference-series",
            InvalidInputError::NonFiniteDistance { .. } => "non-finite-distance",
            InvalidInputError::DuplicateDriverCode(_) => "duplicate-driver-code",
            InvalidInputError::InvalidWindow { .. } => "invalid-window",
        }
    }
}
