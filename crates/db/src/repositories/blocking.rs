//! Blocking repository.

use std::sync::Arc;

use crate::entities::{blocking, Blocking};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter,
};
use threddit_common::{AppError, AppResult};

/// Blocking repository for database operations.
#[derive(Clone)]
pub struct BlockingRepository {
    db: Arc<DatabaseConnection>,
}

impl BlockingRepository {
    /// Create a new blocking repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a block by blocker and blockee.
    pub async fn find_by_pair(
        &self,
        blocker_id: &str,
        blockee_id: &str,
    ) -> AppResult<Option<blocking::Model>> {
        Blocking::find()
            .filter(blocking::Column::BlockerId.eq(blocker_id))
            .filter(blocking::Column::BlockeeId.eq(blockee_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Check if a user is blocking another user.
    pub async fn is_blocking(&self, blocker_id: &str, blockee_id: &str) -> AppResult<bool> {
        Ok(self.find_by_pair(blocker_id, blockee_id).await?.is_some())
    }

    /// Check if either user is blocking the other.
    pub async fn is_blocked_between(&self, user_a: &str, user_b: &str) -> AppResult<bool> {
        let count = Blocking::find()
            .filter(
                Condition::any()
                    .add(
                        Condition::all()
                            .add(blocking::Column::BlockerId.eq(user_a))
                            .add(blocking::Column::BlockeeId.eq(user_b)),
                    )
                    .add(
                        Condition::all()
                            .add(blocking::Column::BlockerId.eq(user_b))
                            .add(blocking::Column::BlockeeId.eq(user_a)),
                    ),
            )
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(!count.is_empty())
    }

    /// Create a new block.
    pub async fn create(&self, model: blocking::ActiveModel) -> AppResult<blocking::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a block by pair.
    pub async fn delete_by_pair(&self, blocker_id: &str, blockee_id: &str) -> AppResult<()> {
        let block = self.find_by_pair(blocker_id, blockee_id).await?;
        if let Some(b) = block {
            b.delete(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }
        Ok(())
    }

    /// Delete every block a user participates in, either side.
    pub async fn delete_involving(&self, user_id: &str) -> AppResult<u64> {
        let result = Blocking::delete_many()
            .filter(
                Condition::any()
                    .add(blocking::Column::BlockerId.eq(user_id))
                    .add(blocking::Column::BlockeeId.eq(user_id)),
            )
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_block(id: &str, blocker_id: &str, blockee_id: &str) -> blocking::Model {
        blocking::Model {
            id: id.to_string(),
            blocker_id: blocker_id.to_string(),
            blockee_id: blockee_id.to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_is_blocking_true() {
        let block = create_test_block("b1", "user1", "user2");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[block]])
                .into_connection(),
        );

        let repo = BlockingRepository::new(db);
        let result = repo.is_blocking("user1", "user2").await.unwrap();

        assert!(result);
    }

    #[tokio::test]
    async fn test_is_blocked_between_either_direction() {
        let block = create_test_block("b1", "user2", "user1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[block]])
                .into_connection(),
        );

        let repo = BlockingRepository::new(db);
        let result = repo.is_blocked_between("user1", "user2").await.unwrap();

        assert!(result);
    }
}
