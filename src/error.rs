use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::models::ValidationError;
use crate::repo::RepoError;

/// Request-time failure, converted 1:1 into a status code and a plain-text
/// message.
#[derive(Debug)]
pub enum AppError {
    Validation(ValidationError),
    BadRequest(String),
    Storage {
        action: &'static str,
        source: sqlx::Error,
    },
    Template(askama::Error),
}

impl AppError {
    /// Wraps a repository failure, labelling storage errors with what the
    /// handler was doing.
    pub fn repo(action: &'static str, err: RepoError) -> Self {
        match err {
            RepoError::Validation(e) => AppError::Validation(e),
            RepoError::Storage(source) => AppError::Storage { action, source },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
            AppError::BadRequest(reason) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid request data: {reason}"),
            )
                .into_response(),
            AppError::Storage { action, source } => {
                tracing::error!("{action}: {source}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("{action}: {source}"),
                )
                    .into_response()
            }
            AppError::Template(e) => {
                tracing::error!("Template error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Error rendering view: {e}"),
                )
                    .into_response()
            }
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::Validation(e)
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Template(e)
    }
}

/// Failure before the server accepts traffic. Always fatal.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("{0} environment variable is not set")]
    MissingConfig(&'static str),

    #[error("invalid {key}: {reason}")]
    InvalidConfig { key: &'static str, reason: String },

    #[error("unable to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("unable to ping the database: {0}")]
    Ping(#[source] sqlx::Error),

    #[error("failed to run migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("failed to bind listener: {0}")]
    Bind(#[source] std::io::Error),

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}
