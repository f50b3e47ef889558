//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer in `db::services`.

use axum::{
    body::Bytes,
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
};

use super::dto::{
    DefaultResponse, HealthResponse, ListSegmentsQuery, SegmentRequest, SegmentResponse,
};
use super::error::{AppError, INVALID_QUERY};
use super::response::JsonResponse;
use super::state::AppState;
use crate::api::{SegmentDraft, SegmentId};
use crate::db::services as db_services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<JsonResponse<T>, AppError>;

/// Confirmation sent after a successful delete.
pub const SEGMENT_DELETED: &str = "Segment deleted successfully";

/// Parse a path id. Anything that is not an integer names no segment,
/// including ids that do not even decode to UTF-8.
fn parse_segment_id(path: Result<Path<String>, PathRejection>) -> Result<SegmentId, AppError> {
    let Path(raw) = path.map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Rejected segment id");
        AppError::segment_not_found()
    })?;

    raw.parse().map_err(|e| {
        tracing::debug!(id = %raw, error = %e, "Unparsable segment id");
        AppError::segment_not_found()
    })
}

/// Decode a segment body. The content type is not consulted.
fn decode_body(body: &[u8]) -> Result<SegmentDraft, AppError> {
    serde_json::from_slice::<SegmentRequest>(body)
        .map(SegmentDraft::from)
        .map_err(|e| {
            tracing::debug!(error = %e, "Rejected segment payload");
            AppError::invalid_input()
        })
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let repo = state.repository.as_ref();
    let healthy = db_services::health_check(repo).await?;
    let segments = if healthy {
        db_services::count_segments(repo).await?
    } else {
        0
    };

    Ok(JsonResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        repository: if healthy { "connected" } else { "disconnected" }.to_string(),
        segments,
    }))
}

// =============================================================================
// Segment CRUD
// =============================================================================

/// GET /api/v1/segments
///
/// List segments in ascending id order, optionally filtered and paginated.
pub async fn list_segments(
    State(state): State<AppState>,
    query: Result<Query<ListSegmentsQuery>, QueryRejection>,
) -> HandlerResult<Vec<SegmentResponse>> {
    let Query(query) = query.map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Rejected list query");
        AppError::BadRequest(INVALID_QUERY.to_string())
    })?;

    let segments = db_services::list_segments(
        state.repository.as_ref(),
        &query.filter(),
        query.page_request(),
    )
    .await?;

    Ok(JsonResponse::ok(segments.into_iter().map(SegmentResponse::from).collect()))
}

/// POST /api/v1/segments
pub async fn create_segment(
    State(state): State<AppState>,
    body: Bytes,
) -> HandlerResult<SegmentResponse> {
    let draft = decode_body(&body)?;
    let segment = db_services::create_segment(state.repository.as_ref(), draft).await?;
    Ok(JsonResponse::created(segment.into()))
}

/// GET /api/v1/segments/{id}
pub async fn get_segment(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> HandlerResult<SegmentResponse> {
    let id = parse_segment_id(id)?;
    let segment = db_services::get_segment(state.repository.as_ref(), id).await?;
    Ok(JsonResponse::ok(segment.into()))
}

/// PUT /api/v1/segments/{id}
///
/// The body is checked before the id, so a bad body is a 400 even for an
/// unknown segment.
pub async fn update_segment(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> HandlerResult<SegmentResponse> {
    let draft = decode_body(&body)?;
    let id = parse_segment_id(id)?;
    let segment = db_services::update_segment(state.repository.as_ref(), id, draft).await?;
    Ok(JsonResponse::ok(segment.into()))
}

/// DELETE /api/v1/segments/{id}
pub async fn delete_segment(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> HandlerResult<DefaultResponse> {
    let id = parse_segment_id(id)?;
    db_services::delete_segment(state.repository.as_ref(), id).await?;
    Ok(JsonResponse::ok(DefaultResponse::new(SEGMENT_DELETED)))
}
