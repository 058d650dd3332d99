//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::{DateTime, Utc};
use comment_wall_core::{
    probe_connection, start_of_local_day, validate_draft, Comment, DraftCheck, COMMENTS_TABLE,
    COMMENT_MAX_CHARS,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        health_handler,
        submit_comment_handler,
        list_today_handler,
    ),
    components(
        schemas(HealthResponse, SubmitCommentRequest, CommentResponse)
    ),
    tags(
        (name = "Comment Wall API", description = "Connectivity check and today's comments.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

/// The result of the connectivity probe.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// One of `connected`, `backend_error`, `unexpected`.
    pub status: String,
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmitCommentRequest {
    pub content: String,
}

/// A stored comment as returned to API clients.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CommentResponse {
    pub id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Creation time in the server's local timezone, `HH:MM`.
    pub time_label: String,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        let time_label = comment.local_time_label();
        Self {
            id: comment.id,
            content: comment.content,
            created_at: comment.created_at,
            time_label,
        }
    }
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Run the connectivity probe against the comments collection.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Probe result, successful or not", body = HealthResponse)
    )
)]
pub async fn health_handler(State(app_state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let status = probe_connection(app_state.store.as_ref()).await;
    Json(HealthResponse {
        status: status.kind().to_string(),
        text: status.to_string(),
    })
}

/// Submit a new comment.
///
/// Blank and over-long comments are rejected before reaching the database.
#[utoipa::path(
    post,
    path = "/comments",
    request_body = SubmitCommentRequest,
    responses(
        (status = 201, description = "Comment stored"),
        (status = 400, description = "Blank or longer than 500 characters"),
        (status = 502, description = "The database rejected or failed the insert")
    )
)]
pub async fn submit_comment_handler(
    State(app_state): State<Arc<AppState>>,
    Json(req): Json<SubmitCommentRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let comment = match validate_draft(&req.content) {
        DraftCheck::Blank => {
            return Err((
                StatusCode::BAD_REQUEST,
                "Error: Comment must not be blank.".to_string(),
            ))
        }
        DraftCheck::TooLong { .. } => {
            return Err((
                StatusCode::BAD_REQUEST,
                format!("Error: Comment must be {COMMENT_MAX_CHARS} characters or less."),
            ))
        }
        DraftCheck::Ready(comment) => comment,
    };

    app_state
        .store
        .insert_comment(&comment)
        .await
        .map_err(|e| {
            error!("Failed to insert comment: {:?}", e);
            (
                StatusCode::BAD_GATEWAY,
                format!("Error: {e}. (Table: '{COMMENTS_TABLE}', Column: 'content')"),
            )
        })?;

    Ok(StatusCode::CREATED)
}

/// List every comment created since local midnight, newest first.
#[utoipa::path(
    get,
    path = "/comments/today",
    responses(
        (status = 200, description = "Today's comments, newest first", body = [CommentResponse]),
        (status = 502, description = "The database query failed")
    )
)]
pub async fn list_today_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<CommentResponse>>, (StatusCode, String)> {
    let since = start_of_local_day(app_state.clock.as_ref());
    let comments = app_state
        .store
        .list_comments_since(since)
        .await
        .map_err(|e| {
            error!("Failed to fetch today's comments: {:?}", e);
            (
                StatusCode::BAD_GATEWAY,
                format!("Error fetching comments: {e}"),
            )
        })?;

    Ok(Json(comments.into_iter().map(CommentResponse::from).collect()))
}

#[cfg(test)]
#[path = "rest_test.rs"]
mod tests;
