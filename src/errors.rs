use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed input the caller can fix.
    #[error("{0}")]
    Validation(String),

    /// The row addressed by `id` does not exist.
    #[error("{0}")]
    NotFound(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Failed to parse request: {0}")]
    Parse(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status code this error is reported with.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            ApiError::Validation(_) => 400,
            ApiError::NotFound(_) => 404,
            ApiError::MethodNotAllowed => 405,
            ApiError::Parse(_) | ApiError::Database(_) | ApiError::Json(_) => 500,
        }
    }

    /// True for failures reported as 5xx.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        self.status_code() >= 500
    }
}
