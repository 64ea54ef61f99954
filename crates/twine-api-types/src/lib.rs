//! Shared request and response types for the twine payload API.
//!
//! Used by the server handlers and by `twine-cli`, so the two sides cannot
//! drift apart on the wire format.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of `POST /api/v1/payloads`.
///
/// The two lists must be the same length; the server rejects a mismatch with
/// a `length_mismatch` error before touching any state.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PayloadCreateRequest {
    pub list_1: Vec<String>,
    pub list_2: Vec<String>,
}

/// Response to a successful payload creation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PayloadCreateResponse {
    pub id: Uuid,
    pub message: String,
}

/// Response to `GET /api/v1/payloads/{id}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PayloadOutput {
    pub output: String,
}

/// JSON error envelope returned by every API failure.
#[derive(Debug, Deserialize, Serialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorMessage,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ApiErrorMessage {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}
