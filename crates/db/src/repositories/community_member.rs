//! Community membership repository.

use std::sync::Arc;

use crate::entities::{community_member, CommunityMember};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
};
use threddit_common::{AppError, AppResult};

/// Community membership repository for database operations.
#[derive(Clone)]
pub struct CommunityMemberRepository {
    db: Arc<DatabaseConnection>,
}

impl CommunityMemberRepository {
    /// Create a new community membership repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a membership by community and user.
    pub async fn find_by_pair(
        &self,
        community_id: &str,
        user_id: &str,
    ) -> AppResult<Option<community_member::Model>> {
        CommunityMember::find()
            .filter(community_member::Column::CommunityId.eq(community_id))
            .filter(community_member::Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new membership.
    pub async fn create(
        &self,
        model: community_member::ActiveModel,
    ) -> AppResult<community_member::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a membership (flag changes).
    pub async fn update(
        &self,
        model: community_member::ActiveModel,
    ) -> AppResult<community_member::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a membership by community and user.
    pub async fn delete_by_pair(&self, community_id: &str, user_id: &str) -> AppResult<()> {
        let member = self.find_by_pair(community_id, user_id).await?;
        if let Some(m) = member {
            m.delete(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }
        Ok(())
    }
}
