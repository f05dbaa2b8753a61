use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use mongodb::error::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The store could not be reached (server selection, I/O, pool cleared)
    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Persistence details stay in the logs; `AppError` answers with opaque messages.
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            ProductError::Unavailable(msg) => AppError::DatabaseUnavailable(msg),
            ProductError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        match *err.kind {
            ErrorKind::ServerSelection { .. }
            | ErrorKind::Io(_)
            | ErrorKind::ConnectionPoolCleared { .. } => ProductError::Unavailable(err.to_string()),
            _ => ProductError::Database(err.to_string()),
        }
    }
}
