use plotaxes_common::error::AxisValueError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlotAxesError {
    #[error("Invalid range: {0}")]
    InvalidRange(#[from] AxisValueError),

    #[error("Value type mismatch: expected {expected} values, got {actual}")]
    ValueTypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid bin size: {0}")]
    InvalidBinSize(f64),

    #[error("Date arithmetic out of range while computing {0}")]
    DateOutOfRange(&'static str),
}
