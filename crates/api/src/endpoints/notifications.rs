//! Notification endpoints.

use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};
use threddit_common::AppResult;
use threddit_core::NotificationView;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Mark notification as read request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAsReadRequest {
    pub notification_id: String,
}

/// Hide notification request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HideRequest {
    pub notification_id: String,
}

/// Mark-all response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAllAsReadResponse {
    pub marked_count: u64,
}

/// Unread count response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCountResponse {
    pub count: u64,
}

/// List notifications for the authenticated user, newest first. Hidden
/// notifications never appear.
async fn list_notifications(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<NotificationView>>> {
    let notifications = state.notification_service.list(&user.id).await?;
    Ok(ApiResponse::ok(notifications))
}

/// Mark a notification as read.
async fn mark_as_read(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<MarkAsReadRequest>,
) -> AppResult<ApiResponse<()>> {
    state
        .notification_service
        .mark_as_read(&user.id, &req.notification_id)
        .await?;
    Ok(ApiResponse::ok(()))
}

/// Mark all notifications as read.
async fn mark_all_as_read(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<MarkAllAsReadResponse>> {
    let marked_count = state.notification_service.mark_all_as_read(&user.id).await?;
    Ok(ApiResponse::ok(MarkAllAsReadResponse { marked_count }))
}

/// Hide a notification. Hidden notifications are excluded from every
/// subsequent read, including the unread count.
async fn hide_notification(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<HideRequest>,
) -> AppResult<ApiResponse<()>> {
    state
        .notification_service
        .hide(&user.id, &req.notification_id)
        .await?;
    Ok(ApiResponse::ok(()))
}

/// Count unread, non-hidden notifications.
async fn unread_count(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<UnreadCountResponse>> {
    let count = state.notification_service.count_unread(&user.id).await?;
    Ok(ApiResponse::ok(UnreadCountResponse { count }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(list_notifications))
        .route("/mark-as-read", post(mark_as_read))
        .route("/mark-all-as-read", post(mark_all_as_read))
        .route("/hide", post(hide_notification))
        .route("/unread-count", post(unread_count))
}
