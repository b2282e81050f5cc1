//! API middleware.

#![allow(missing_docs)]

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use threddit_core::{
    AccountService, BlockingService, CommunityService, FollowingService, MutingService,
    NotificationService, UserService,
};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub following_service: FollowingService,
    pub blocking_service: BlockingService,
    pub muting_service: MutingService,
    pub notification_service: NotificationService,
    pub community_service: CommunityService,
    pub account_service: AccountService,
}

/// Authentication middleware.
///
/// Resolves a `Bearer` token into a user model and stashes it in the request
/// extensions for the `AuthUser` extractor. Invalid or absent tokens simply
/// leave the extension unset; endpoints that require auth reject then.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
        && let Ok(user) = state.user_service.authenticate_by_token(token).await
    {
        req.extensions_mut().insert(user);
    }

    next.run(req).await
}
