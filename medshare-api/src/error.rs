//! API error handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use medshare_core::error::MedshareError;

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    code: String,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(status: StatusCode, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code: code.into(),
        }
    }

    /// Bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, "BAD_REQUEST")
    }

    /// Not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message, "NOT_FOUND")
    }

    /// Storage credentials are missing.
    pub fn not_configured(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message, "NOT_CONFIGURED")
    }

    /// The pinning service or gateway failed.
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message, "UPSTREAM_ERROR")
    }

    /// Internal server error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message, "INTERNAL_ERROR")
    }

    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

/// Error response body.
#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code,
                message: self.message,
            },
        };

        (self.status, Json(body)).into_response()
    }
}

impl From<MedshareError> for ApiError {
    fn from(err: MedshareError) -> Self {
        match &err {
            MedshareError::ConfigError(_) => ApiError::not_configured(err.to_string()),
            MedshareError::InvalidCid(_) | MedshareError::JsonError(_) => {
                ApiError::bad_request(err.to_string())
            }
            MedshareError::ContentNotFound { .. } | MedshareError::PinNotFound(_) => {
                ApiError::not_found(err.to_string())
            }
            MedshareError::UploadFailed(_) | MedshareError::HttpError(_) => {
                tracing::warn!(error = %err, "Upstream storage error");
                ApiError::upstream(err.to_string())
            }
            _ => {
                tracing::error!(error = %err, "Internal error");
                ApiError::internal("An internal error occurred")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(MedshareError::not_configured()).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::from(MedshareError::InvalidCid("x".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(MedshareError::PinNotFound("Qm1".into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(MedshareError::HttpError("down".into())).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::from(MedshareError::InternalError("bug".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
