//! SOF processing handler
//!
//! Accepts one or more documents as multipart file parts and returns
//! one timeline result per document, in input order.

use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use sof_core::TimelineResult;
use sof_pipeline::DocumentInput;
use std::sync::Arc;
use utoipa::ToSchema;

/// Batch processing response
#[derive(Debug, Serialize, ToSchema)]
pub struct ProcessResponse {
    /// One entry per uploaded document, in input order
    pub results: Vec<TimelineResult>,
}

/// Process uploaded SOF documents into event timelines
#[utoipa::path(
    post,
    path = "/api/v1/process",
    tag = "process",
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Per-document timelines", body = ProcessResponse),
        (status = 400, description = "No documents supplied", body = crate::error::ApiError)
    )
)]
pub async fn process_documents(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();

    let mut docs = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("malformed multipart body: {e}")))?
    {
        let Some(filename) = field.file_name().map(str::to_string) else {
            // Non-file form fields are ignored
            continue;
        };

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("failed to read part {filename:?}: {e}")))?;

        docs.push(DocumentInput::new(filename, bytes.to_vec()));
    }

    if docs.is_empty() {
        return Err(AppError::BadRequest(
            "request contained no file parts".to_string(),
        ));
    }

    tracing::info!(documents = docs.len(), "processing SOF batch");
    let results = state.pipeline.process_batch(&docs);

    Ok((StatusCode::OK, Json(ProcessResponse { results })))
}
