use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::response::ApiResponse;

/// Request-level failure taxonomy. Every workflow error is converted into
/// one of these at the boundary and shaped into the response envelope.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("email exists")]
    Conflict,
    #[error("{0}")]
    NotFound(String),
    #[error("password mismatch with email: {0}")]
    Auth(String),
    #[error("request error")]
    Store(#[from] anyhow::Error),
    #[error("auth failed")]
    Unauthorized,
}

impl ApiError {
    pub fn not_found_id(id: uuid::Uuid) -> Self {
        ApiError::NotFound(format!("data id: {id} not found"))
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        // The unique constraint on email is the backstop for concurrent
        // registrations racing past the lookup.
        if let sqlx::Error::Database(db) = &e {
            if db.is_unique_violation() {
                return ApiError::Conflict;
            }
        }
        ApiError::Store(e.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Outcomes travel in the envelope's status discriminator, not the
        // transport code. Only the session-guard rejection is a real 401,
        // raised before any workflow runs.
        let status = match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            _ => StatusCode::OK,
        };
        let detail = match &self {
            ApiError::Store(e) => Some(e.to_string()),
            _ => None,
        };
        (status, Json(ApiResponse::failed(self.to_string(), detail))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_wire_format() {
        assert_eq!(ApiError::Conflict.to_string(), "email exists");
        assert_eq!(
            ApiError::Auth("a@x.com".into()).to_string(),
            "password mismatch with email: a@x.com"
        );
        assert_eq!(
            ApiError::NotFound("account not found".into()).to_string(),
            "account not found"
        );
        assert_eq!(
            ApiError::Store(anyhow::anyhow!("boom")).to_string(),
            "request error"
        );
    }

    #[test]
    fn not_found_id_carries_the_id() {
        let id = uuid::Uuid::new_v4();
        assert_eq!(
            ApiError::not_found_id(id).to_string(),
            format!("data id: {id} not found")
        );
    }

    #[test]
    fn only_unauthorized_changes_the_transport_code() {
        assert_eq!(
            ApiError::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::Conflict.into_response().status(), StatusCode::OK);
        assert_eq!(
            ApiError::Auth("a@x.com".into()).into_response().status(),
            StatusCode::OK
        );
    }

    #[test]
    fn row_not_found_maps_to_store() {
        let err: ApiError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, ApiError::Store(_)));
    }
}
