//! Account endpoints: settings, history, deletion.

use axum::{Json, Router, extract::State, routing::post};
use serde::Deserialize;
use threddit_common::AppResult;
use threddit_core::SettingsCategory;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Settings read request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSettingsRequest {
    pub category: SettingsCategory,
}

/// Settings update request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    pub category: SettingsCategory,
    pub settings: serde_json::Value,
}

/// Account deletion request. Both confirmations are re-checked server-side.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAccountRequest {
    pub username: String,
    pub password: String,
}

/// Read one settings category.
async fn get_settings(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<GetSettingsRequest>,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let settings = state.user_service.get_settings(&user.id, req.category).await?;
    Ok(ApiResponse::ok(settings))
}

/// Replace one settings category and return the stored form.
async fn update_settings(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<UpdateSettingsRequest>,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let settings = state
        .user_service
        .update_settings(&user.id, req.category, req.settings)
        .await?;
    Ok(ApiResponse::ok(settings))
}

/// Clear the recently-viewed post history.
async fn clear_history(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<()>> {
    state.account_service.clear_history(&user.id).await?;
    Ok(ApiResponse::ok(()))
}

/// Delete the account after username and password re-confirmation.
async fn delete_account(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<DeleteAccountRequest>,
) -> AppResult<ApiResponse<()>> {
    state
        .account_service
        .delete_account(&user.id, &req.username, &req.password)
        .await?;
    Ok(ApiResponse::ok(()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/settings/get", post(get_settings))
        .route("/settings/update", post(update_settings))
        .route("/clear-history", post(clear_history))
        .route("/delete", post(delete_account))
}
