//! Payload handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use twine_api_types::{PayloadCreateRequest, PayloadCreateResponse, PayloadOutput};

use crate::application::error::ErrorReport;
use crate::infra::http::api::error::ApiError;
use crate::infra::http::api::state::ApiState;

pub async fn create_payload(
    State(state): State<ApiState>,
    Json(payload): Json<PayloadCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state
        .payloads
        .create(&payload.list_1, &payload.list_2)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(PayloadCreateResponse {
            id: record.id,
            message: "Payload created successfully".to_string(),
        }),
    ))
}

pub async fn get_payload(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state.payloads.get(&id).await?;

    Ok(Json(PayloadOutput {
        output: record.output,
    }))
}

pub async fn health(State(state): State<ApiState>) -> Response {
    match state.health.health_check().await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            let mut response = StatusCode::SERVICE_UNAVAILABLE.into_response();
            ErrorReport::from_error("infra::http::health", StatusCode::SERVICE_UNAVAILABLE, &err)
                .attach(&mut response);
            response
        }
    }
}
