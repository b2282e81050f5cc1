//! Following service.

use crate::services::eligibility::NotificationContext;
use crate::services::email::EmailService;
use crate::services::notification::NotificationService;
use crate::services::settings::{self, EmailSettings};
use sea_orm::Set;
use threddit_common::{AppError, AppResult, IdGenerator};
use threddit_db::{
    entities::{following, notification::NotificationType},
    repositories::{BlockingRepository, FollowingRepository, UserProfileRepository, UserRepository},
};

/// Result of a follow operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowOutcome {
    /// A new follow relationship was created.
    Followed,
    /// The relationship already existed; nothing changed.
    AlreadyFollowing,
}

impl FollowOutcome {
    /// Stable string form for API responses.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Followed => "followed",
            Self::AlreadyFollowing => "already_following",
        }
    }
}

/// Result of an unfollow operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnfollowOutcome {
    /// The relationship was removed.
    Unfollowed,
    /// There was no relationship to remove; nothing changed.
    NotFollowing,
}

impl UnfollowOutcome {
    /// Stable string form for API responses.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unfollowed => "unfollowed",
            Self::NotFollowing => "not_following",
        }
    }
}

/// Following service for business logic.
#[derive(Clone)]
pub struct FollowingService {
    following_repo: FollowingRepository,
    blocking_repo: BlockingRepository,
    user_repo: UserRepository,
    profile_repo: UserProfileRepository,
    notifications: Option<NotificationService>,
    email: Option<EmailService>,
    id_gen: IdGenerator,
}

impl FollowingService {
    /// Create a new following service.
    #[must_use]
    pub const fn new(
        following_repo: FollowingRepository,
        blocking_repo: BlockingRepository,
        user_repo: UserRepository,
        profile_repo: UserProfileRepository,
    ) -> Self {
        Self {
            following_repo,
            blocking_repo,
            user_repo,
            profile_repo,
            notifications: None,
            email: None,
            id_gen: IdGenerator::new(),
        }
    }

    /// Set the notification service for new-follower pushes.
    pub fn set_notifications(&mut self, notifications: NotificationService) {
        self.notifications = Some(notifications);
    }

    /// Set the email service for new-follower emails.
    pub fn set_email(&mut self, email: EmailService) {
        self.email = Some(email);
    }

    /// Follow a user.
    ///
    /// Idempotent: following someone already followed is a no-op. Blocked
    /// pairs (either direction) cannot follow. On a new follow, the
    /// new-follower notification and email are fired best-effort.
    pub async fn follow(&self, follower_id: &str, followee_id: &str) -> AppResult<FollowOutcome> {
        // Can't follow yourself
        if follower_id == followee_id {
            return Err(AppError::BadRequest("Cannot follow yourself".to_string()));
        }

        if self
            .blocking_repo
            .is_blocked_between(follower_id, followee_id)
            .await?
        {
            return Err(AppError::Forbidden(
                "Cannot follow a blocked user".to_string(),
            ));
        }

        if self
            .following_repo
            .is_following(follower_id, followee_id)
            .await?
        {
            return Ok(FollowOutcome::AlreadyFollowing);
        }

        let follower = self.user_repo.get_by_id(follower_id).await?;
        let followee = self.user_repo.get_by_id(followee_id).await?;

        let model = following::ActiveModel {
            id: Set(self.id_gen.generate()),
            follower_id: Set(follower.id.clone()),
            followee_id: Set(followee.id.clone()),
            created_at: Set(chrono::Utc::now().into()),
        };
        self.following_repo.create(model).await?;

        // Update counts
        self.user_repo
            .increment_following_count(&follower.id)
            .await?;
        self.user_repo
            .increment_followers_count(&followee.id)
            .await?;

        // Best-effort side effects; a failure never fails the follow itself
        if let Some(ref notifications) = self.notifications
            && let Err(e) = notifications
                .push(
                    &followee,
                    &follower.username,
                    &NotificationContext::default(),
                    NotificationType::NewFollowers,
                )
                .await
        {
            tracing::warn!(error = %e, followee_id = %followee.id, "Failed to push new-follower notification");
        }

        if let Err(e) = self.send_follow_email(&followee, &follower.username).await {
            tracing::warn!(error = %e, followee_id = %followee.id, "Failed to send new-follower email");
        }

        Ok(FollowOutcome::Followed)
    }

    /// Unfollow a user.
    ///
    /// Idempotent: removing an absent relationship is a no-op.
    pub async fn unfollow(
        &self,
        follower_id: &str,
        followee_id: &str,
    ) -> AppResult<UnfollowOutcome> {
        if !self
            .following_repo
            .is_following(follower_id, followee_id)
            .await?
        {
            return Ok(UnfollowOutcome::NotFollowing);
        }

        self.following_repo
            .delete_by_pair(follower_id, followee_id)
            .await?;

        // Update counts
        self.user_repo
            .decrement_following_count(follower_id)
            .await?;
        self.user_repo
            .decrement_followers_count(followee_id)
            .await?;

        Ok(UnfollowOutcome::Unfollowed)
    }

    /// Check if a user is following another.
    pub async fn is_following(&self, follower_id: &str, followee_id: &str) -> AppResult<bool> {
        self.following_repo
            .is_following(follower_id, followee_id)
            .await
    }

    /// Get followers of a user.
    pub async fn get_followers(
        &self,
        user_id: &str,
        limit: u64,
        until_id: Option<&str>,
    ) -> AppResult<Vec<following::Model>> {
        self.following_repo
            .find_followers(user_id, limit, until_id)
            .await
    }

    /// Get users that a user is following.
    pub async fn get_following(
        &self,
        user_id: &str,
        limit: u64,
        until_id: Option<&str>,
    ) -> AppResult<Vec<following::Model>> {
        self.following_repo
            .find_following(user_id, limit, until_id)
            .await
    }

    /// Send the new-follower email when the recipient opted in.
    async fn send_follow_email(
        &self,
        followee: &threddit_db::entities::user::Model,
        follower_username: &str,
    ) -> AppResult<()> {
        let Some(ref email) = self.email else {
            return Ok(());
        };
        let Some(ref address) = followee.email else {
            return Ok(());
        };

        let profile = self.profile_repo.get_by_user_id(&followee.id).await?;
        let email_settings: EmailSettings = settings::parse(&profile.email_settings)?;
        if !email_settings.follower_emails_enabled() {
            return Ok(());
        }

        email
            .send_follow_email(address, &followee.username, follower_username)
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;
    use threddit_db::entities::user;

    fn create_test_user(id: &str, username: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            username: username.to_string(),
            username_lower: username.to_lowercase(),
            email: None,
            display_name: None,
            profile_picture: None,
            token: Some("test_token".to_string()),
            followers_count: 0,
            following_count: 0,
            is_deleted: false,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn create_test_following(id: &str, follower_id: &str, followee_id: &str) -> following::Model {
        following::Model {
            id: id.to_string(),
            follower_id: follower_id.to_string(),
            followee_id: followee_id.to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn service(
        following_db: Arc<sea_orm::DatabaseConnection>,
        blocking_db: Arc<sea_orm::DatabaseConnection>,
        user_db: Arc<sea_orm::DatabaseConnection>,
    ) -> FollowingService {
        let profile_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        FollowingService::new(
            FollowingRepository::new(following_db),
            BlockingRepository::new(blocking_db),
            UserRepository::new(user_db),
            UserProfileRepository::new(profile_db),
        )
    }

    #[tokio::test]
    async fn test_follow_yourself_returns_error() {
        let db = || Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = service(db(), db(), db());

        let result = service.follow("user1", "user1").await;

        match result {
            Err(AppError::BadRequest(msg)) => assert!(msg.contains("yourself")),
            _ => panic!("Expected BadRequest error"),
        }
    }

    #[tokio::test]
    async fn test_follow_already_following_is_noop() {
        let following = create_test_following("f1", "user1", "user2");

        let following_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[following]])
                .into_connection(),
        );
        let blocking_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<threddit_db::entities::blocking::Model>::new()])
                .into_connection(),
        );
        let user_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = service(following_db, blocking_db, user_db);
        let outcome = service.follow("user1", "user2").await.unwrap();

        assert_eq!(outcome, FollowOutcome::AlreadyFollowing);
    }

    #[tokio::test]
    async fn test_follow_blocked_pair_is_forbidden() {
        let block = threddit_db::entities::blocking::Model {
            id: "b1".to_string(),
            blocker_id: "user2".to_string(),
            blockee_id: "user1".to_string(),
            created_at: Utc::now().into(),
        };

        let following_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let blocking_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[block]])
                .into_connection(),
        );
        let user_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = service(following_db, blocking_db, user_db);
        let result = service.follow("user1", "user2").await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_follow_creates_row_and_updates_counts() {
        let following = create_test_following("f1", "user1", "user2");

        let following_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                // is_following: none
                .append_query_results([Vec::<following::Model>::new()])
                // insert returning
                .append_query_results([[following]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );
        let blocking_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<threddit_db::entities::blocking::Model>::new()])
                .into_connection(),
        );
        let user_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([
                    vec![create_test_user("user1", "alice")],
                    vec![create_test_user("user2", "bob")],
                ])
                .append_exec_results([
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                ])
                .into_connection(),
        );

        let service = service(following_db, blocking_db, user_db);
        let outcome = service.follow("user1", "user2").await.unwrap();

        assert_eq!(outcome, FollowOutcome::Followed);
    }

    #[tokio::test]
    async fn test_unfollow_absent_is_noop() {
        let following_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<following::Model>::new()])
                .into_connection(),
        );
        let db = || Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = service(following_db, db(), db());
        let outcome = service.unfollow("user1", "user2").await.unwrap();

        assert_eq!(outcome, UnfollowOutcome::NotFollowing);
    }

    #[tokio::test]
    async fn test_unfollow_removes_and_updates_counts() {
        let following = create_test_following("f1", "user1", "user2");

        let following_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                // is_following, then delete_by_pair's find
                .append_query_results([vec![following.clone()], vec![following]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );
        let blocking_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let user_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                ])
                .into_connection(),
        );

        let service = service(following_db, blocking_db, user_db);
        let outcome = service.unfollow("user1", "user2").await.unwrap();

        assert_eq!(outcome, UnfollowOutcome::Unfollowed);
    }
}
