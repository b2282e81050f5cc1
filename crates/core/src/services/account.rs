//! Account service: deletion, history, abuse reports.

use argon2::{Argon2, PasswordVerifier, password_hash::PasswordHash};
use sea_orm::Set;
use serde_json::json;
use threddit_common::{AppError, AppResult, IdGenerator};
use threddit_db::{
    entities::{user, user_report},
    repositories::{
        BlockingRepository, FollowingRepository, UserProfileRepository, UserReportRepository,
        UserRepository,
    },
};

/// Account service for business logic.
#[derive(Clone)]
pub struct AccountService {
    user_repo: UserRepository,
    profile_repo: UserProfileRepository,
    following_repo: FollowingRepository,
    blocking_repo: BlockingRepository,
    report_repo: UserReportRepository,
    id_gen: IdGenerator,
}

impl AccountService {
    /// Create a new account service.
    #[must_use]
    pub const fn new(
        user_repo: UserRepository,
        profile_repo: UserProfileRepository,
        following_repo: FollowingRepository,
        blocking_repo: BlockingRepository,
        report_repo: UserReportRepository,
    ) -> Self {
        Self {
            user_repo,
            profile_repo,
            following_repo,
            blocking_repo,
            report_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Delete the acting user's account after username + password
    /// re-confirmation.
    ///
    /// Purges the user from everyone else's relationships in batch
    /// statements, then tombstones the user row itself. The sequence is not
    /// transactional; the initiator's row is mutated last so a partial
    /// failure leaves the account alive and the purge retryable.
    pub async fn delete_account(
        &self,
        user_id: &str,
        username: &str,
        password: &str,
    ) -> AppResult<()> {
        let user = self.user_repo.get_by_id(user_id).await?;

        if user.username != username {
            return Err(AppError::BadRequest(
                "Username confirmation does not match".to_string(),
            ));
        }

        let profile = self.profile_repo.get_by_user_id(user_id).await?;
        let Some(ref hash) = profile.password else {
            return Err(AppError::Unauthorized);
        };
        if !verify_password(password, hash)? {
            return Err(AppError::Unauthorized);
        }

        // Relationship purge. Counterpart counters first, then the rows.
        let followings = self.following_repo.find_involving(user_id).await?;
        let mut followees_lost_follower: Vec<String> = Vec::new();
        let mut followers_lost_following: Vec<String> = Vec::new();
        for f in &followings {
            if f.follower_id == user_id {
                followees_lost_follower.push(f.followee_id.clone());
            } else {
                followers_lost_following.push(f.follower_id.clone());
            }
        }
        self.user_repo
            .decrement_followers_count_many(&followees_lost_follower)
            .await?;
        self.user_repo
            .decrement_following_count_many(&followers_lost_following)
            .await?;
        let removed_follows = self.following_repo.delete_involving(user_id).await?;
        let removed_blocks = self.blocking_repo.delete_involving(user_id).await?;

        tracing::info!(
            user_id = %user_id,
            removed_follows,
            removed_blocks,
            "Purged relationships for deleted account"
        );

        // Tombstone the initiator last.
        let mut active: user::ActiveModel = user.into();
        active.is_deleted = Set(true);
        active.profile_picture = Set(None);
        active.token = Set(None);
        active.followers_count = Set(0);
        active.following_count = Set(0);
        active.updated_at = Set(Some(chrono::Utc::now().into()));
        self.user_repo.update(active).await?;

        Ok(())
    }

    /// Reset the recently-viewed post history to the empty list.
    pub async fn clear_history(&self, user_id: &str) -> AppResult<()> {
        let profile = self.profile_repo.get_by_user_id(user_id).await?;

        let mut active: threddit_db::entities::user_profile::ActiveModel = profile.into();
        active.history_post_ids = Set(json!([]));
        active.updated_at = Set(Some(chrono::Utc::now().into()));
        self.profile_repo.update(active).await?;

        Ok(())
    }

    /// File an abuse report against a user resolved by username.
    pub async fn report_user(
        &self,
        reporter_id: &str,
        target_username: &str,
        reason: &str,
    ) -> AppResult<user_report::Model> {
        if reason.trim().is_empty() {
            return Err(AppError::Validation("Report reason is required".to_string()));
        }

        let target = self
            .user_repo
            .find_by_username(target_username)
            .await?
            .ok_or_else(|| AppError::UserNotFound(target_username.to_string()))?;

        if target.id == reporter_id {
            return Err(AppError::BadRequest("Cannot report yourself".to_string()));
        }

        let model = user_report::ActiveModel {
            id: Set(self.id_gen.generate()),
            reporter_id: Set(reporter_id.to_string()),
            target_id: Set(target.id.clone()),
            reason: Set(reason.to_string()),
            created_at: Set(chrono::Utc::now().into()),
        };
        self.report_repo.create(model).await
    }
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use argon2::password_hash::{PasswordHasher, SaltString, rand_core::OsRng};
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;
    use threddit_db::entities::user_profile;

    fn hash_password(password: &str) -> String {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .unwrap()
            .to_string()
    }

    fn create_test_user(id: &str, username: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            username: username.to_string(),
            username_lower: username.to_lowercase(),
            email: None,
            display_name: None,
            profile_picture: Some("https://img.test/alice.png".to_string()),
            token: Some("token1".to_string()),
            followers_count: 1,
            following_count: 1,
            is_deleted: false,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn create_test_profile(user_id: &str, password: Option<String>) -> user_profile::Model {
        user_profile::Model {
            user_id: user_id.to_string(),
            password,
            profile_settings: serde_json::json!({}),
            feed_settings: serde_json::json!({}),
            notification_settings: serde_json::json!({}),
            chat_settings: serde_json::json!({}),
            email_settings: serde_json::json!({}),
            safety_settings: serde_json::json!({}),
            history_post_ids: serde_json::json!(["p1", "p2"]),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn service(
        user_db: Arc<sea_orm::DatabaseConnection>,
        profile_db: Arc<sea_orm::DatabaseConnection>,
        following_db: Arc<sea_orm::DatabaseConnection>,
        blocking_db: Arc<sea_orm::DatabaseConnection>,
        report_db: Arc<sea_orm::DatabaseConnection>,
    ) -> AccountService {
        AccountService::new(
            UserRepository::new(user_db),
            UserProfileRepository::new(profile_db),
            FollowingRepository::new(following_db),
            BlockingRepository::new(blocking_db),
            UserReportRepository::new(report_db),
        )
    }

    #[test]
    fn test_verify_password_round_trip() {
        let hash = hash_password("hunter2");
        assert!(verify_password("hunter2", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[tokio::test]
    async fn test_delete_account_wrong_username() {
        let user_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_user("user1", "alice")]])
                .into_connection(),
        );
        let db = || Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = service(user_db, db(), db(), db(), db());
        let result = service.delete_account("user1", "bob", "hunter2").await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_delete_account_wrong_password() {
        let user_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_user("user1", "alice")]])
                .into_connection(),
        );
        let profile_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_profile(
                    "user1",
                    Some(hash_password("hunter2")),
                )]])
                .into_connection(),
        );
        let db = || Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = service(user_db, profile_db, db(), db(), db());
        let result = service.delete_account("user1", "alice", "wrong").await;

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_delete_account_purges_and_tombstones() {
        let user = create_test_user("user1", "alice");
        let tombstone = user::Model {
            is_deleted: true,
            profile_picture: None,
            token: None,
            ..user.clone()
        };
        let follow_out = threddit_db::entities::following::Model {
            id: "f1".to_string(),
            follower_id: "user1".to_string(),
            followee_id: "user2".to_string(),
            created_at: Utc::now().into(),
        };
        let follow_in = threddit_db::entities::following::Model {
            id: "f2".to_string(),
            follower_id: "user3".to_string(),
            followee_id: "user1".to_string(),
            created_at: Utc::now().into(),
        };

        let exec_ok = || MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        };
        let user_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![user]])
                // tombstone update returning
                .append_query_results([vec![tombstone]])
                // two batched counter decrements, then the update
                .append_exec_results([exec_ok(), exec_ok(), exec_ok()])
                .into_connection(),
        );
        let profile_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_profile(
                    "user1",
                    Some(hash_password("hunter2")),
                )]])
                .into_connection(),
        );
        let following_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[follow_out, follow_in]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 2,
                }])
                .into_connection(),
        );
        let blocking_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                }])
                .into_connection(),
        );
        let report_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = service(user_db, profile_db, following_db, blocking_db, report_db);
        let result = service.delete_account("user1", "alice", "hunter2").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_report_yourself_returns_error() {
        let user_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_user("user1", "alice")]])
                .into_connection(),
        );
        let db = || Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = service(user_db, db(), db(), db(), db());
        let result = service.report_user("user1", "alice", "spam").await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_report_requires_reason() {
        let db = || Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = service(db(), db(), db(), db(), db());
        let result = service.report_user("user1", "bob", "   ").await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
