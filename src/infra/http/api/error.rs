use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use twine_api_types::{ApiErrorBody, ApiErrorMessage};

use crate::application::error::ErrorReport;
use crate::application::payloads::PayloadError;
use crate::application::repos::RepoError;

pub mod codes {
    pub const LENGTH_MISMATCH: &str = "length_mismatch";
    pub const NOT_FOUND: &str = "not_found";
    pub const STORAGE_UNAVAILABLE: &str = "storage_unavailable";
    pub const INTERNAL: &str = "internal_error";
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: &'static str,
    hint: Option<String>,
}

impl ApiError {
    pub fn new(
        status: StatusCode,
        code: &'static str,
        message: &'static str,
        hint: Option<String>,
    ) -> Self {
        Self {
            status,
            code,
            message,
            hint,
        }
    }

    pub fn length_mismatch(hint: Option<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            codes::LENGTH_MISMATCH,
            "Input lists must have the same length",
            hint,
        )
    }

    pub fn not_found(message: &'static str) -> Self {
        Self::new(StatusCode::NOT_FOUND, codes::NOT_FOUND, message, None)
    }

    pub fn storage_unavailable(hint: Option<String>) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            codes::STORAGE_UNAVAILABLE,
            "Storage temporarily unavailable",
            hint,
        )
    }

    pub fn internal(hint: Option<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            codes::INTERNAL,
            "Unexpected error occurred",
            hint,
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let hint = self.hint.clone();
        let body = ApiErrorBody {
            error: ApiErrorMessage {
                code: self.code.to_string(),
                message: self.message.to_string(),
                hint: self.hint,
            },
        };
        let mut response = (self.status, Json(body)).into_response();
        // Attach a structured report so shared logging middleware can emit rich diagnostics.
        ErrorReport::from_message(
            "infra::http::api",
            self.status,
            format!("{}: {}", self.code, hint.as_deref().unwrap_or(self.message)),
        )
        .attach(&mut response);
        response
    }
}

impl From<PayloadError> for ApiError {
    fn from(error: PayloadError) -> Self {
        match error {
            PayloadError::LengthMismatch { .. } => Self::length_mismatch(Some(error.to_string())),
            PayloadError::NotFound => Self::not_found("payload not found"),
            PayloadError::Repo(RepoError::NotFound) => Self::not_found("payload not found"),
            PayloadError::Repo(err @ (RepoError::Persistence(_) | RepoError::Timeout)) => {
                Self::storage_unavailable(Some(err.to_string()))
            }
            PayloadError::Repo(err @ RepoError::Duplicate { .. }) => {
                Self::internal(Some(err.to_string()))
            }
        }
    }
}
