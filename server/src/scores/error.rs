use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("Invalid data format: {0}")]
    InvalidInput(String),

    #[error("Database operation failed: {0}")]
    Storage(#[from] sqlx::Error),
}

pub type ScoreResult<T> = Result<T, ScoreError>;

impl ScoreError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
