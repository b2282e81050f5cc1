//! Community repository.

use std::sync::Arc;

use crate::entities::{community, Community};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
};
use threddit_common::{AppError, AppResult};

/// Community repository for database operations.
#[derive(Clone)]
pub struct CommunityRepository {
    db: Arc<DatabaseConnection>,
}

impl CommunityRepository {
    /// Create a new community repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a community by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<community::Model>> {
        Community::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a community by name (case-insensitive).
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<community::Model>> {
        Community::find()
            .filter(community::Column::NameLower.eq(name.to_lowercase()))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a community by name, returning an error if not found.
    pub async fn get_by_name(&self, name: &str) -> AppResult<community::Model> {
        self.find_by_name(name)
            .await?
            .ok_or_else(|| AppError::CommunityNotFound(name.to_string()))
    }

    /// Find communities by exact names (batched).
    pub async fn find_by_names(&self, names: &[String]) -> AppResult<Vec<community::Model>> {
        if names.is_empty() {
            return Ok(vec![]);
        }

        Community::find()
            .filter(community::Column::Name.is_in(names.to_vec()))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new community.
    pub async fn create(&self, model: community::ActiveModel) -> AppResult<community::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Increment the members count.
    pub async fn increment_members_count(&self, id: &str) -> AppResult<()> {
        self.adjust_members_count(id, 1).await
    }

    /// Decrement the members count.
    pub async fn decrement_members_count(&self, id: &str) -> AppResult<()> {
        self.adjust_members_count(id, -1).await
    }

    // Single-statement increment, same rationale as the user counters.
    async fn adjust_members_count(&self, id: &str, delta: i32) -> AppResult<()> {
        Community::update_many()
            .col_expr(
                community::Column::MembersCount,
                Expr::col(community::Column::MembersCount).add(delta),
            )
            .filter(community::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_community(id: &str, name: &str) -> community::Model {
        community::Model {
            id: id.to_string(),
            name: name.to_string(),
            name_lower: name.to_lowercase(),
            description: None,
            profile_picture: None,
            members_count: 0,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_get_by_name_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<community::Model>::new()])
                .into_connection(),
        );

        let repo = CommunityRepository::new(db);
        let result = repo.get_by_name("ghost").await;

        assert!(matches!(result, Err(AppError::CommunityNotFound(_))));
    }

    #[tokio::test]
    async fn test_find_by_name_case_insensitive() {
        let community = create_test_community("c1", "Rustaceans");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[community]])
                .into_connection(),
        );

        let repo = CommunityRepository::new(db);
        let result = repo.find_by_name("RUSTACEANS").await.unwrap();

        assert!(result.is_some());
    }
}
