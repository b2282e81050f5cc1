//! User service: token auth and settings access.

use crate::services::settings::{self, SettingsCategory};
use sea_orm::Set;
use threddit_common::{AppError, AppResult};
use threddit_db::{
    entities::{user, user_profile},
    repositories::{UserProfileRepository, UserRepository},
};

/// User service for business logic.
#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    profile_repo: UserProfileRepository,
}

impl UserService {
    /// Create a new user service.
    #[must_use]
    pub const fn new(user_repo: UserRepository, profile_repo: UserProfileRepository) -> Self {
        Self {
            user_repo,
            profile_repo,
        }
    }

    /// Resolve a user from an opaque bearer token. Deleted accounts never
    /// authenticate.
    pub async fn authenticate_by_token(&self, token: &str) -> AppResult<user::Model> {
        let user = self
            .user_repo
            .find_by_token(token)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if user.is_deleted {
            return Err(AppError::Unauthorized);
        }

        Ok(user)
    }

    /// Get a user, erroring when absent.
    pub async fn get_by_id(&self, user_id: &str) -> AppResult<user::Model> {
        self.user_repo.get_by_id(user_id).await
    }

    /// Read one settings category, normalized through its typed struct.
    pub async fn get_settings(
        &self,
        user_id: &str,
        category: SettingsCategory,
    ) -> AppResult<serde_json::Value> {
        let profile = self.profile_repo.get_by_user_id(user_id).await?;
        settings::normalize(category, stored_column(&profile, category).clone())
    }

    /// Replace one settings category. The payload round-trips through the
    /// typed struct: unknown fields are dropped, missing ones take defaults.
    pub async fn update_settings(
        &self,
        user_id: &str,
        category: SettingsCategory,
        value: serde_json::Value,
    ) -> AppResult<serde_json::Value> {
        let normalized = settings::normalize(category, value)?;

        let profile = self.profile_repo.get_by_user_id(user_id).await?;
        let mut active: user_profile::ActiveModel = profile.into();
        match category {
            SettingsCategory::Profile => active.profile_settings = Set(normalized.clone()),
            SettingsCategory::Feed => active.feed_settings = Set(normalized.clone()),
            SettingsCategory::Notifications => {
                active.notification_settings = Set(normalized.clone());
            }
            SettingsCategory::Chat => active.chat_settings = Set(normalized.clone()),
            SettingsCategory::Email => active.email_settings = Set(normalized.clone()),
            SettingsCategory::Safety => active.safety_settings = Set(normalized.clone()),
        }
        active.updated_at = Set(Some(chrono::Utc::now().into()));
        self.profile_repo.update(active).await?;

        Ok(normalized)
    }
}

const fn stored_column(
    profile: &user_profile::Model,
    category: SettingsCategory,
) -> &serde_json::Value {
    match category {
        SettingsCategory::Profile => &profile.profile_settings,
        SettingsCategory::Feed => &profile.feed_settings,
        SettingsCategory::Notifications => &profile.notification_settings,
        SettingsCategory::Chat => &profile.chat_settings,
        SettingsCategory::Email => &profile.email_settings,
        SettingsCategory::Safety => &profile.safety_settings,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::json;
    use std::sync::Arc;

    fn create_test_user(id: &str, username: &str, is_deleted: bool) -> user::Model {
        user::Model {
            id: id.to_string(),
            username: username.to_string(),
            username_lower: username.to_lowercase(),
            email: None,
            display_name: None,
            profile_picture: None,
            token: Some("token1".to_string()),
            followers_count: 0,
            following_count: 0,
            is_deleted,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn create_test_profile(user_id: &str) -> user_profile::Model {
        user_profile::Model {
            user_id: user_id.to_string(),
            password: None,
            profile_settings: json!({}),
            feed_settings: json!({}),
            notification_settings: json!({ "comments": false }),
            chat_settings: json!({}),
            email_settings: json!({}),
            safety_settings: json!({}),
            history_post_ids: json!([]),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_authenticate_unknown_token() {
        let user_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .into_connection(),
        );
        let profile_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = UserService::new(
            UserRepository::new(user_db),
            UserProfileRepository::new(profile_db),
        );
        let result = service.authenticate_by_token("nope").await;

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_authenticate_deleted_account() {
        let user_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_user("user1", "alice", true)]])
                .into_connection(),
        );
        let profile_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = UserService::new(
            UserRepository::new(user_db),
            UserProfileRepository::new(profile_db),
        );
        let result = service.authenticate_by_token("token1").await;

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_authenticate_resolves_user() {
        let user_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_user("user1", "alice", false)]])
                .into_connection(),
        );
        let profile_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = UserService::new(
            UserRepository::new(user_db),
            UserProfileRepository::new(profile_db),
        );
        let user = service.authenticate_by_token("token1").await.unwrap();

        assert_eq!(user.id, "user1");
    }

    #[tokio::test]
    async fn test_get_settings_fills_defaults() {
        let user_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let profile_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_profile("user1")]])
                .into_connection(),
        );

        let service = UserService::new(
            UserRepository::new(user_db),
            UserProfileRepository::new(profile_db),
        );
        let value = service
            .get_settings("user1", SettingsCategory::Notifications)
            .await
            .unwrap();

        assert_eq!(value["comments"], json!(false));
        assert_eq!(value["replies"], json!(true));
    }
}
