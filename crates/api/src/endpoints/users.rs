//! User relationship endpoints.

use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};
use threddit_common::AppResult;
use threddit_db::entities::following::Model as FollowingModel;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Follow user request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUserRequest {
    pub user_id: String,
}

/// Unfollow user request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnfollowUserRequest {
    pub user_id: String,
}

/// Block toggle request, target resolved by username.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockUserRequest {
    pub username: String,
}

/// Report user request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportUserRequest {
    pub username: String,
    pub reason: String,
}

/// List relationship request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRelationsRequest {
    /// User whose relationships to list; defaults to the caller.
    pub user_id: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: u64,
    pub until_id: Option<String>,
}

const fn default_limit() -> u64 {
    30
}

/// Outcome of a toggle or idempotent relationship operation.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeResponse {
    pub outcome: &'static str,
}

/// Follow relationship response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowRelationResponse {
    pub id: String,
    pub follower_id: String,
    pub followee_id: String,
    pub created_at: String,
}

impl From<FollowingModel> for FollowRelationResponse {
    fn from(f: FollowingModel) -> Self {
        Self {
            id: f.id,
            follower_id: f.follower_id,
            followee_id: f.followee_id,
            created_at: f.created_at.to_rfc3339(),
        }
    }
}

/// Report response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub id: String,
    pub created_at: String,
}

/// Follow a user. Idempotent.
async fn follow_user(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<FollowUserRequest>,
) -> AppResult<ApiResponse<OutcomeResponse>> {
    let outcome = state.following_service.follow(&user.id, &req.user_id).await?;
    Ok(ApiResponse::ok(OutcomeResponse {
        outcome: outcome.as_str(),
    }))
}

/// Unfollow a user. Idempotent.
async fn unfollow_user(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<UnfollowUserRequest>,
) -> AppResult<ApiResponse<OutcomeResponse>> {
    let outcome = state
        .following_service
        .unfollow(&user.id, &req.user_id)
        .await?;
    Ok(ApiResponse::ok(OutcomeResponse {
        outcome: outcome.as_str(),
    }))
}

/// Toggle the block state against a user.
async fn block_user(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<BlockUserRequest>,
) -> AppResult<ApiResponse<OutcomeResponse>> {
    let outcome = state
        .blocking_service
        .toggle_block(&user.id, &req.username)
        .await?;
    Ok(ApiResponse::ok(OutcomeResponse {
        outcome: outcome.as_str(),
    }))
}

/// File an abuse report against a user.
async fn report_user(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ReportUserRequest>,
) -> AppResult<ApiResponse<ReportResponse>> {
    let report = state
        .account_service
        .report_user(&user.id, &req.username, &req.reason)
        .await?;
    Ok(ApiResponse::ok(ReportResponse {
        id: report.id,
        created_at: report.created_at.to_rfc3339(),
    }))
}

/// List followers of a user.
async fn list_followers(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ListRelationsRequest>,
) -> AppResult<ApiResponse<Vec<FollowRelationResponse>>> {
    let user_id = req.user_id.as_deref().unwrap_or(&user.id);
    let limit = req.limit.min(100);
    let followers = state
        .following_service
        .get_followers(user_id, limit, req.until_id.as_deref())
        .await?;
    Ok(ApiResponse::ok(
        followers.into_iter().map(Into::into).collect(),
    ))
}

/// List users a user is following.
async fn list_following(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ListRelationsRequest>,
) -> AppResult<ApiResponse<Vec<FollowRelationResponse>>> {
    let user_id = req.user_id.as_deref().unwrap_or(&user.id);
    let limit = req.limit.min(100);
    let following = state
        .following_service
        .get_following(user_id, limit, req.until_id.as_deref())
        .await?;
    Ok(ApiResponse::ok(
        following.into_iter().map(Into::into).collect(),
    ))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/follow", post(follow_user))
        .route("/unfollow", post(unfollow_user))
        .route("/block", post(block_user))
        .route("/report", post(report_user))
        .route("/followers", post(list_followers))
        .route("/following", post(list_following))
}
