use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;
use tracing::error;

/// Failure taxonomy surfaced to API callers. Every variant maps to a stable
/// machine-readable code plus a human-readable message; storage-layer faults
/// collapse into `Internal` and never leak driver details.
#[derive(Debug, Error)]
pub enum APIError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Internal(String),
}

impl APIError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for APIError {
    fn into_response(self) -> Response {
        let message = match &self {
            Self::Internal(details) => {
                error!("Internal error: {}", details);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (
            self.status(),
            Json(serde_json::json!({
                "status": "error",
                "code": self.code(),
                "message": message,
            })),
        )
            .into_response()
    }
}

impl From<DbErr> for APIError {
    fn from(err: DbErr) -> Self {
        // Unique-index violations are the storage-level arbiter for the
        // one-invite-per-(email, workspace) and one-member-per-(user,
        // workspace) invariants; a losing writer surfaces as Conflict.
        if let Some(SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
            return Self::Conflict("Resource already exists.".to_string());
        }

        match err {
            DbErr::RecordNotFound(message) => Self::NotFound(message),
            other => Self::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            APIError::BadRequest("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            APIError::Unauthorized("x".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(APIError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(APIError::Conflict("x".into()).status(), StatusCode::CONFLICT);
        assert_eq!(
            APIError::Internal("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_record_not_found_maps_to_not_found() {
        let err = APIError::from(DbErr::RecordNotFound("Invite not found".to_string()));
        assert!(matches!(err, APIError::NotFound(_)));
    }

    #[test]
    fn test_generic_db_error_maps_to_internal() {
        let err = APIError::from(DbErr::Custom("connection lost".to_string()));
        assert!(matches!(err, APIError::Internal(_)));
    }
}
