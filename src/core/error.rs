//! Gestione errori - errori di dominio e mappatura verso risposte HTTP

use axum::{Json, extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::error::ErrorKind;
use tracing::error;

/// Errors raised by the persistence contract and the update rules.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// Missing required field or malformed identity combination; raised before any storage access.
    #[error("{0}")]
    Validation(&'static str),

    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// An update touched zero rows although the id existed when it was checked.
    #[error("unable to update {entity} with id = {id}")]
    WriteInconsistency { entity: &'static str, id: i64 },

    #[error(transparent)]
    Storage(#[from] sqlx::Error),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: &'static str,
    details: Option<String>,
}

impl AppError {
    pub fn new(status: StatusCode, message: &'static str) -> Self {
        Self {
            status,
            message,
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    // Common error constructors
    pub fn not_found(message: &'static str) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: &'static str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal_server_error(message: &'static str) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn service_unavailable(message: &'static str) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::not_found("Resource not found"),

            sqlx::Error::ColumnNotFound(column) => {
                Self::bad_request("Unknown column").with_details(column)
            }

            // solo le violazioni di vincolo sono colpa del client
            sqlx::Error::Database(db_err) => match db_err.kind() {
                ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::UniqueViolation
                | ErrorKind::CheckViolation => {
                    Self::bad_request("Database error").with_details(db_err.message().to_string())
                }
                _ => {
                    error!("Unexpected database error: {}", db_err);
                    Self::internal_server_error("Internal server error")
                }
            },

            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                Self::service_unavailable("Database unavailable")
            }

            other => {
                error!("Unexpected database error: {:?}", other);
                Self::internal_server_error("Internal server error")
            }
        }
    }
}

impl From<DataError> for AppError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::Validation(reason) => Self::bad_request(reason),
            DataError::NotFound { .. } => {
                Self::not_found("Entity not found").with_details(err.to_string())
            }
            DataError::WriteInconsistency { .. } => {
                error!("{}", err);
                Self::internal_server_error("Unable to update entity").with_details(err.to_string())
            }
            DataError::Storage(err) => err.into(),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::bad_request("Validation error").with_details(err.to_string())
    }
}

/// Malformed or mistyped JSON body (axum answers 400/415/422 in plain text otherwise).
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request("Invalid request body").with_details(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = Json(ErrorResponse {
            error: self.message,
            details: self.details,
        });
        (self.status, body).into_response()
    }
}
