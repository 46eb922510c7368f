use thiserror::Error;

/// Errors that can occur when configuring candidate scoring.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlignmentError {
    /// A score weight was not a finite number.
    #[error("Score weight '{name}' must be finite, got {value}")]
    InvalidWeight {
        /// Which weight was rejected.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
}
