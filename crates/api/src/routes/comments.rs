//! Comment routes.
//!
//! Comments have an independent lifecycle from drivers; deleting a driver
//! leaves its comments in place.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::AppState;
use bluebird_core::comment::{CommentError, CommentService, NewComment};
use bluebird_db::CommentRepository;
use bluebird_shared::AppError;

/// Creates the comment routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/comments", post(create_comment))
        .route("/comments/{id}", get(list_comments).delete(delete_comment))
}

/// Request body for creating a comment.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    /// Driver the comment refers to.
    #[serde(default)]
    pub driver_id: Option<String>,
    /// Comment author.
    #[serde(default)]
    pub author: Option<String>,
    /// Comment text.
    #[serde(default)]
    pub text: Option<String>,
}

fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
}

/// Maps an application error onto the message body and its status code.
fn error_response(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    message(status, &err.to_string())
}

fn comment_service(state: &AppState) -> CommentService<CommentRepository> {
    CommentService::new(Arc::new(CommentRepository::new((*state.db).clone())))
}

/// GET `/comments/{driver_id}`
/// List a driver's comments, newest first.
async fn list_comments(
    State(state): State<AppState>,
    Path(driver_id): Path<Uuid>,
) -> impl IntoResponse {
    match comment_service(&state).list_by_driver(driver_id).await {
        Ok(comments) => (StatusCode::OK, Json(comments)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list comments");
            error_response(&e.into())
        }
    }
}

/// POST `/comments`
/// Add a comment to a driver.
async fn create_comment(
    State(state): State<AppState>,
    Json(payload): Json<CreateCommentRequest>,
) -> impl IntoResponse {
    let Some(driver_id) = payload.driver_id.as_deref().and_then(|s| Uuid::parse_str(s).ok())
    else {
        return message(StatusCode::BAD_REQUEST, "driverId is required");
    };

    let input = NewComment {
        driver_id,
        author: payload.author.unwrap_or_default(),
        text: payload.text.unwrap_or_default(),
    };

    match comment_service(&state).create(input).await {
        Ok(comment) => (StatusCode::CREATED, Json(comment)).into_response(),
        Err(CommentError::Validation(msg)) => message(StatusCode::BAD_REQUEST, &msg),
        Err(e) => {
            error!(error = %e, "Failed to create comment");
            error_response(&e.into())
        }
    }
}

/// DELETE `/comments/{id}`
/// Delete a comment.
async fn delete_comment(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    match comment_service(&state).delete(id).await {
        Ok(()) => message(StatusCode::OK, "Comment deleted"),
        Err(CommentError::NotFound(_)) => message(StatusCode::NOT_FOUND, "Comment not found"),
        Err(e) => {
            error!(error = %e, "Failed to delete comment");
            error_response(&e.into())
        }
    }
}
