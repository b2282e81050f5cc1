//! Community mute repository.

use std::sync::Arc;

use crate::entities::{community_mute, CommunityMute};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
};
use threddit_common::{AppError, AppResult};

/// Community mute repository for database operations.
#[derive(Clone)]
pub struct CommunityMuteRepository {
    db: Arc<DatabaseConnection>,
}

impl CommunityMuteRepository {
    /// Create a new community mute repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a mute by user and community.
    pub async fn find_by_pair(
        &self,
        user_id: &str,
        community_id: &str,
    ) -> AppResult<Option<community_mute::Model>> {
        CommunityMute::find()
            .filter(community_mute::Column::UserId.eq(user_id))
            .filter(community_mute::Column::CommunityId.eq(community_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Check if a user has muted a community.
    pub async fn is_muted(&self, user_id: &str, community_id: &str) -> AppResult<bool> {
        Ok(self.find_by_pair(user_id, community_id).await?.is_some())
    }

    /// Get the ids of every community a user has muted.
    pub async fn find_community_ids(&self, user_id: &str) -> AppResult<Vec<String>> {
        let mutes = CommunityMute::find()
            .filter(community_mute::Column::UserId.eq(user_id))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(mutes.into_iter().map(|m| m.community_id).collect())
    }

    /// Create a new mute.
    pub async fn create(
        &self,
        model: community_mute::ActiveModel,
    ) -> AppResult<community_mute::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a mute by user and community.
    pub async fn delete_by_pair(&self, user_id: &str, community_id: &str) -> AppResult<()> {
        let mute = self.find_by_pair(user_id, community_id).await?;
        if let Some(m) = mute {
            m.delete(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_mute(id: &str, user_id: &str, community_id: &str) -> community_mute::Model {
        community_mute::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            community_id: community_id.to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_community_ids() {
        let m1 = create_test_mute("m1", "user1", "c1");
        let m2 = create_test_mute("m2", "user1", "c2");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[m1, m2]])
                .into_connection(),
        );

        let repo = CommunityMuteRepository::new(db);
        let ids = repo.find_community_ids("user1").await.unwrap();

        assert_eq!(ids, vec!["c1".to_string(), "c2".to_string()]);
    }

    #[tokio::test]
    async fn test_is_muted_false() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<community_mute::Model>::new()])
                .into_connection(),
        );

        let repo = CommunityMuteRepository::new(db);
        let result = repo.is_muted("user1", "c1").await.unwrap();

        assert!(!result);
    }
}
