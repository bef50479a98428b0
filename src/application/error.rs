use thiserror::Error;

use crate::config::LoadError;
use crate::infra::error::InfraError;
use crate::infra::storage::StorageError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] LoadError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error("failed to render page: {message}")]
    Render { message: String },
    #[error("failed to read `{path}`: {source}")]
    InputFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
