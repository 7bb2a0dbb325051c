//! DomainError to HTTP response mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use rollcall_core::DomainError;

/// Wrapper so handlers can `?` on service calls. Every failure surfaces to
/// the caller as a status plus a short `{"message": ...}` body; nothing is
/// retried.
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            DomainError::SessionNotFound => StatusCode::NOT_FOUND,
            DomainError::InvalidOtp | DomainError::OtpExpired => StatusCode::BAD_REQUEST,
            DomainError::AlreadyMarked => StatusCode::CONFLICT,
            DomainError::ValidationError(_) => StatusCode::BAD_REQUEST,
            DomainError::DatabaseError(_) | DomainError::ExportError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "message": self.0.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: DomainError) -> StatusCode {
        ApiError(err).into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_of(DomainError::SessionNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_of(DomainError::InvalidOtp), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(DomainError::OtpExpired), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(DomainError::AlreadyMarked), StatusCode::CONFLICT);
        assert_eq!(
            status_of(DomainError::DatabaseError("boom".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
