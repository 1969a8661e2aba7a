use std::fmt::Display;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Kind of catalog entity an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Film,
    User,
    Mpa,
    Genre,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Film => write!(f, "Film"),
            EntityKind::User => write!(f, "User"),
            EntityKind::Mpa => write!(f, "MPA rating"),
            EntityKind::Genre => write!(f, "Genre"),
        }
    }
}

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Validation failed for `{field}`: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("{kind} with id {id} not found")]
    NotFound { kind: EntityKind, id: i64 },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        AppError::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn not_found(kind: EntityKind, id: impl Into<i64>) -> Self {
        AppError::NotFound {
            kind,
            id: id.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Validation { .. } | AppError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Migration(_) | AppError::Internal(_) => {
                tracing::error!(error = %self, "Request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = AppError::not_found(EntityKind::Film, 42);
        assert_eq!(err.to_string(), "Film with id 42 not found");
    }

    #[test]
    fn test_validation_message_names_field() {
        let err = AppError::validation("duration", "must not be negative");
        assert_eq!(
            err.to_string(),
            "Validation failed for `duration`: must not be negative"
        );
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::validation("name", "blank"), StatusCode::BAD_REQUEST),
            (
                AppError::InvalidArgument("self".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::not_found(EntityKind::User, 7),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::Internal("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
