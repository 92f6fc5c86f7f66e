use owldata_core::{NormalizeError, OwlError};
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] owldata_core::ValidationError),

    #[error("{code}: {0}", code = .0.code())]
    Owl(#[from] OwlError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Owl(error) => match error {
                OwlError::Validation(_) | OwlError::Range(_) => 2,
                OwlError::Normalize(NormalizeError::Columns { .. })
                | OwlError::Normalize(NormalizeError::EmptyProjection) => 2,
                OwlError::Normalize(_) | OwlError::Lookup(_) => 3,
                OwlError::Auth(_) => 6,
                OwlError::Fetch(_) => 7,
            },
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}
