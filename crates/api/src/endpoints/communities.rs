//! Community membership endpoints.

use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};
use threddit_common::AppResult;
use threddit_db::entities::community_member::Model as MemberModel;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Community request, resolved by name.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityRequest {
    pub community_name: String,
}

/// Membership response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipResponse {
    pub id: String,
    pub community_id: String,
    pub is_favorite: bool,
    pub created_at: String,
}

impl From<MemberModel> for MembershipResponse {
    fn from(m: MemberModel) -> Self {
        Self {
            id: m.id,
            community_id: m.community_id,
            is_favorite: m.is_favorite,
            created_at: m.created_at.to_rfc3339(),
        }
    }
}

/// Toggle outcome response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeResponse {
    pub outcome: &'static str,
}

/// Join a community.
async fn join_community(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CommunityRequest>,
) -> AppResult<ApiResponse<MembershipResponse>> {
    let member = state
        .community_service
        .join(&user.id, &req.community_name)
        .await?;
    Ok(ApiResponse::ok(member.into()))
}

/// Leave a community.
async fn leave_community(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CommunityRequest>,
) -> AppResult<ApiResponse<()>> {
    state
        .community_service
        .leave(&user.id, &req.community_name)
        .await?;
    Ok(ApiResponse::ok(()))
}

/// Toggle the mute state for a community.
async fn mute_community(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CommunityRequest>,
) -> AppResult<ApiResponse<OutcomeResponse>> {
    let outcome = state
        .muting_service
        .toggle_mute(&user.id, &req.community_name)
        .await?;
    Ok(ApiResponse::ok(OutcomeResponse {
        outcome: outcome.as_str(),
    }))
}

/// Toggle the favorite flag on a membership.
async fn favorite_community(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CommunityRequest>,
) -> AppResult<ApiResponse<OutcomeResponse>> {
    let outcome = state
        .community_service
        .toggle_favorite(&user.id, &req.community_name)
        .await?;
    Ok(ApiResponse::ok(OutcomeResponse {
        outcome: outcome.as_str(),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/join", post(join_community))
        .route("/leave", post(leave_community))
        .route("/mute", post(mute_community))
        .route("/favorite", post(favorite_community))
}
