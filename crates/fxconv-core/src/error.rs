use thiserror::Error;

/// Validation and contract errors exposed by `fxconv-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("currency code cannot be empty")]
    EmptyCurrency,
    #[error("currency code length {len} exceeds max {max}")]
    CurrencyTooLong { len: usize, max: usize },
    #[error("currency code contains invalid character '{ch}' at index {index}")]
    CurrencyInvalidChar { ch: char, index: usize },

    #[error("amount must contain only digits and at most one '.': '{value}'")]
    InvalidAmount { value: String },

    #[error("invalid build mode '{value}', expected one of development, production")]
    InvalidBuildMode { value: String },
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("preference store error: {0}")]
    Io(#[from] std::io::Error),
}
