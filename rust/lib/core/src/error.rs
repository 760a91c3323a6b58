use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

// ── Error codes ─────────────────────────────────────────────────────
//
// Stable, machine-readable identifiers. Clients match on these —
// never on the human-readable message string.

/// Stable error code constants.
///
/// Clients should match on `code` from `{"code": "PROFILE_NOT_FOUND", "message": "..."}`.
/// Codes never change; messages may be reworded.
pub mod error_code {
    pub const VALIDATION_FAILED: &str = "VALIDATION_FAILED";
    pub const PROFILE_NOT_FOUND: &str = "PROFILE_NOT_FOUND";
    pub const PROVIDER_ERROR: &str = "PROVIDER_ERROR";
    pub const GENERATION_EXHAUSTED: &str = "GENERATION_EXHAUSTED";
    pub const INTERNAL: &str = "INTERNAL";
}

// ── ServiceError ────────────────────────────────────────────────────

/// Unified service error type used across all modules.
///
/// Each variant maps to a stable error code (see [`error_code`]) and an
/// HTTP status code. The JSON response always includes both:
///
/// ```json
/// {"code": "PROFILE_NOT_FOUND", "message": "no profile data found for 'foo'"}
/// ```
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Input data is invalid (missing/empty username etc.). HTTP 400.
    #[error("{0}")]
    Validation(String),

    /// The target account has no discoverable or non-empty public data. HTTP 404.
    #[error("{0}")]
    ProfileNotFound(String),

    /// Transport or upstream failure from an external provider. HTTP 502.
    #[error("{0}")]
    Provider(String),

    /// Every configured generation credential failed. HTTP 502.
    #[error("{0}")]
    GenerationExhausted(String),

    /// Unexpected internal error. HTTP 500.
    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    /// Stable, machine-readable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => error_code::VALIDATION_FAILED,
            ServiceError::ProfileNotFound(_) => error_code::PROFILE_NOT_FOUND,
            ServiceError::Provider(_) => error_code::PROVIDER_ERROR,
            ServiceError::GenerationExhausted(_) => error_code::GENERATION_EXHAUSTED,
            ServiceError::Internal(_) => error_code::INTERNAL,
        }
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::ProfileNotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Provider(_) => StatusCode::BAD_GATEWAY,
            ServiceError::GenerationExhausted(_) => StatusCode::BAD_GATEWAY,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = serde_json::json!({
            "code": self.error_code(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
