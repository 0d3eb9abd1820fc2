//! Response envelope shared by every endpoint except /api/health.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::reports::custom::FieldErrors;

/// The `{success, message, data?, errors?}` envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<serde_json::Value>,
    #[serde(skip)]
    status: StatusCode,
}

impl ApiResponse {
    /// 200 envelope wrapping a serializable payload.
    pub fn ok(message: impl Into<String>, data: impl Serialize) -> Self {
        match serde_json::to_value(data) {
            Ok(value) => Self {
                success: true,
                message: message.into(),
                data: Some(value),
                errors: None,
                status: StatusCode::OK,
            },
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize response payload");
                Self {
                    success: false,
                    message: "Internal server error".to_string(),
                    data: None,
                    errors: None,
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                }
            }
        }
    }

    /// 422 envelope carrying per-field validation messages.
    pub fn validation_error(errors: FieldErrors) -> Self {
        let errors = serde_json::to_value(errors).unwrap_or_default();
        Self {
            success: false,
            message: "Validation error".to_string(),
            data: None,
            errors: Some(errors),
            status: StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    /// 404 envelope for unmatched paths.
    pub fn not_found() -> Self {
        Self {
            success: false,
            message: "Resource not found".to_string(),
            data: None,
            errors: None,
            status: StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}
