//! Blocking service.

use crate::services::following::FollowingService;
use sea_orm::Set;
use threddit_common::{AppError, AppResult, IdGenerator};
use threddit_db::{
    entities::blocking,
    repositories::{BlockingRepository, UserRepository},
};

/// Result of a block toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockOutcome {
    /// The target is now blocked.
    Blocked,
    /// The target is no longer blocked.
    Unblocked,
}

impl BlockOutcome {
    /// Stable wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blocked => "blocked",
            Self::Unblocked => "unblocked",
        }
    }
}

/// Blocking service for business logic.
#[derive(Clone)]
pub struct BlockingService {
    blocking_repo: BlockingRepository,
    user_repo: UserRepository,
    following: FollowingService,
    id_gen: IdGenerator,
}

impl BlockingService {
    /// Create a new blocking service.
    #[must_use]
    pub const fn new(
        blocking_repo: BlockingRepository,
        user_repo: UserRepository,
        following: FollowingService,
    ) -> Self {
        Self {
            blocking_repo,
            user_repo,
            following,
            id_gen: IdGenerator::new(),
        }
    }

    /// Toggle the block state against a user resolved by username.
    ///
    /// Blocking cascade-unfollows in both directions, which keeps the
    /// follower counters consistent. Toggling twice restores the original
    /// state.
    pub async fn toggle_block(
        &self,
        blocker_id: &str,
        blockee_username: &str,
    ) -> AppResult<BlockOutcome> {
        let blockee = self
            .user_repo
            .find_by_username(blockee_username)
            .await?
            .ok_or_else(|| AppError::UserNotFound(blockee_username.to_string()))?;

        // Cannot block yourself
        if blocker_id == blockee.id {
            return Err(AppError::BadRequest("Cannot block yourself".to_string()));
        }

        if self
            .blocking_repo
            .is_blocking(blocker_id, &blockee.id)
            .await?
        {
            self.blocking_repo
                .delete_by_pair(blocker_id, &blockee.id)
                .await?;
            return Ok(BlockOutcome::Unblocked);
        }

        // Blocking severs any follow relationship in either direction
        self.following.unfollow(blocker_id, &blockee.id).await?;
        self.following.unfollow(&blockee.id, blocker_id).await?;

        let model = blocking::ActiveModel {
            id: Set(self.id_gen.generate()),
            blocker_id: Set(blocker_id.to_string()),
            blockee_id: Set(blockee.id.clone()),
            created_at: Set(chrono::Utc::now().into()),
        };
        self.blocking_repo.create(model).await?;

        Ok(BlockOutcome::Blocked)
    }

    /// Check if a user is blocking another user.
    pub async fn is_blocking(&self, blocker_id: &str, blockee_id: &str) -> AppResult<bool> {
        self.blocking_repo.is_blocking(blocker_id, blockee_id).await
    }

    /// Check if either user is blocking the other.
    pub async fn is_blocked_between(&self, user_a: &str, user_b: &str) -> AppResult<bool> {
        self.blocking_repo.is_blocked_between(user_a, user_b).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;
    use threddit_db::entities::{following, user};
    use threddit_db::repositories::{FollowingRepository, UserProfileRepository};

    fn create_test_user(id: &str, username: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            username: username.to_string(),
            username_lower: username.to_lowercase(),
            email: None,
            display_name: None,
            profile_picture: None,
            token: None,
            followers_count: 0,
            following_count: 0,
            is_deleted: false,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn create_test_blocking(id: &str, blocker_id: &str, blockee_id: &str) -> blocking::Model {
        blocking::Model {
            id: id.to_string(),
            blocker_id: blocker_id.to_string(),
            blockee_id: blockee_id.to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn following_service(following_db: Arc<sea_orm::DatabaseConnection>) -> FollowingService {
        let db = || Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        FollowingService::new(
            FollowingRepository::new(following_db),
            BlockingRepository::new(db()),
            UserRepository::new(db()),
            UserProfileRepository::new(db()),
        )
    }

    #[tokio::test]
    async fn test_toggle_block_unknown_username() {
        let user_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .into_connection(),
        );
        let db = || Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = BlockingService::new(
            BlockingRepository::new(db()),
            UserRepository::new(user_db),
            following_service(db()),
        );
        let result = service.toggle_block("user1", "ghost").await;

        assert!(matches!(result, Err(AppError::UserNotFound(_))));
    }

    #[tokio::test]
    async fn test_toggle_block_yourself_returns_error() {
        let user_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_user("user1", "alice")]])
                .into_connection(),
        );
        let db = || Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = BlockingService::new(
            BlockingRepository::new(db()),
            UserRepository::new(user_db),
            following_service(db()),
        );
        let result = service.toggle_block("user1", "alice").await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_toggle_block_removes_existing_block() {
        let block = create_test_blocking("b1", "user1", "user2");

        let user_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_user("user2", "bob")]])
                .into_connection(),
        );
        let blocking_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                // is_blocking, then delete_by_pair's find
                .append_query_results([vec![block.clone()], vec![block]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );
        let db = || Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = BlockingService::new(
            BlockingRepository::new(blocking_db),
            UserRepository::new(user_db),
            following_service(db()),
        );
        let outcome = service.toggle_block("user1", "bob").await.unwrap();

        assert_eq!(outcome, BlockOutcome::Unblocked);
    }

    #[tokio::test]
    async fn test_toggle_block_creates_block_and_severs_follows() {
        let block = create_test_blocking("b1", "user1", "user2");

        let user_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_user("user2", "bob")]])
                .into_connection(),
        );
        let blocking_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                // is_blocking: no row yet
                .append_query_results([Vec::<blocking::Model>::new()])
                // insert returning
                .append_query_results([[block]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );
        // Neither direction currently follows, so the cascade is a no-op.
        let following_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([
                    Vec::<following::Model>::new(),
                    Vec::<following::Model>::new(),
                ])
                .into_connection(),
        );

        let service = BlockingService::new(
            BlockingRepository::new(blocking_db),
            UserRepository::new(user_db),
            following_service(following_db),
        );
        let outcome = service.toggle_block("user1", "bob").await.unwrap();

        assert_eq!(outcome, BlockOutcome::Blocked);
    }
}
