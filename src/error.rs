use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("profile {0} not found")]
    ProfileNotFound(Uuid),

    #[error("item {0} not found")]
    ItemNotFound(Uuid),

    #[error("recommendation {0} not found")]
    RecommendationNotFound(Uuid),

    /// BMI cannot be computed (missing weight or height, or height <= 0).
    #[error("invalid body metrics: {0}")]
    InvalidMetrics(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(anyhow::Error),
}

/// Store errors arrive as `anyhow`; driver failures keep their own variant.
impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        match e.downcast::<sqlx::Error>() {
            Ok(db) => AppError::Database(db),
            Err(other) => AppError::Internal(other),
        }
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::ProfileNotFound(_)
            | AppError::ItemNotFound(_)
            | AppError::RecommendationNotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidMetrics(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            "Internal server error".to_string()
        } else {
            tracing::warn!(error = %self, "request rejected");
            self.to_string()
        };
        (status, message).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
