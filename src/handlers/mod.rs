pub mod isis;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::IsisError;

/// Error response - `{"error": "message"}`
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// API error type
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    pub fn unprocessable(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: msg.into(),
        }
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse::new(self.message))).into_response()
    }
}

impl From<IsisError> for ApiError {
    fn from(err: IsisError) -> Self {
        match err {
            IsisError::MissingField { .. } | IsisError::MalformedSecret { .. } => {
                Self::unprocessable(err.to_string())
            }
            IsisError::UnsupportedPlatform { .. }
            | IsisError::UnsupportedInterfaceType { .. }
            | IsisError::InvalidAddress { .. } => Self::bad_request(err.to_string()),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        if let Some(isis) = err.downcast_ref::<IsisError>() {
            return Self::from(isis.clone());
        }
        Self::internal(err.to_string())
    }
}

/// Healthcheck endpoint - returns 200 OK with status
pub async fn healthcheck() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "isis-synth",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        let missing = ApiError::from(IsisError::missing(vec!["area-id".into()], "instance 1 on pe1"));
        assert_eq!(missing.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let platform = ApiError::from(IsisError::UnsupportedPlatform { platform: "vendor-z".into() });
        assert_eq!(platform.status(), StatusCode::BAD_REQUEST);

        let wrapped = ApiError::from(anyhow::Error::new(IsisError::InvalidAddress { address: "x".into() }));
        assert_eq!(wrapped.status(), StatusCode::BAD_REQUEST);

        let other = ApiError::from(anyhow::anyhow!("boom"));
        assert_eq!(other.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
