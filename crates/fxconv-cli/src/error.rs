use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] fxconv_core::ValidationError),

    #[error(transparent)]
    Source(#[from] fxconv_core::SourceError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<fxconv_core::CoreError> for CliError {
    fn from(error: fxconv_core::CoreError) -> Self {
        match error {
            fxconv_core::CoreError::Validation(error) => Self::Validation(error),
            fxconv_core::CoreError::Serialization(error) => Self::Serialization(error),
            fxconv_core::CoreError::Io(error) => Self::Io(error),
        }
    }
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Source(_) => 3,
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}
