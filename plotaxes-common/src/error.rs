use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AxisValueError {
    #[error("Invalid range: min ({min}) is greater than max ({max})")]
    InvalidRange { min: String, max: String },

    #[error("Invalid range: bounds must not be NaN")]
    NanBound,

    #[error("Invalid date string: {0}")]
    InvalidDate(String),

    #[error("Unknown time unit: {0}")]
    UnknownTimeUnit(String),
}
