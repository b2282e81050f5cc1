//! User repository.

use std::sync::Arc;

use crate::entities::{user, User};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
};
use threddit_common::{AppError, AppResult};

/// User repository for database operations.
#[derive(Clone)]
pub struct UserRepository {
    db: Arc<DatabaseConnection>,
}

impl UserRepository {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<user::Model>> {
        User::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a user by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<user::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::UserNotFound(id.to_string()))
    }

    /// Find a user by username (case-insensitive).
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<user::Model>> {
        User::find()
            .filter(user::Column::UsernameLower.eq(username.to_lowercase()))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find users by usernames (case-sensitive exact match, batched).
    pub async fn find_by_usernames(&self, usernames: &[String]) -> AppResult<Vec<user::Model>> {
        if usernames.is_empty() {
            return Ok(vec![]);
        }

        User::find()
            .filter(user::Column::Username.is_in(usernames.to_vec()))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a user by token.
    pub async fn find_by_token(&self, token: &str) -> AppResult<Option<user::Model>> {
        User::find()
            .filter(user::Column::Token.eq(token))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new user.
    pub async fn create(&self, model: user::ActiveModel) -> AppResult<user::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a user.
    pub async fn update(&self, model: user::ActiveModel) -> AppResult<user::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Increment the followers count.
    pub async fn increment_followers_count(&self, id: &str) -> AppResult<()> {
        self.adjust_count(id, user::Column::FollowersCount, 1).await
    }

    /// Decrement the followers count.
    pub async fn decrement_followers_count(&self, id: &str) -> AppResult<()> {
        self.adjust_count(id, user::Column::FollowersCount, -1).await
    }

    /// Increment the following count.
    pub async fn increment_following_count(&self, id: &str) -> AppResult<()> {
        self.adjust_count(id, user::Column::FollowingCount, 1).await
    }

    /// Decrement the following count.
    pub async fn decrement_following_count(&self, id: &str) -> AppResult<()> {
        self.adjust_count(id, user::Column::FollowingCount, -1).await
    }

    /// Decrement the followers count for each of the given users.
    pub async fn decrement_followers_count_many(&self, ids: &[String]) -> AppResult<()> {
        self.adjust_count_many(ids, user::Column::FollowersCount).await
    }

    /// Decrement the following count for each of the given users.
    pub async fn decrement_following_count_many(&self, ids: &[String]) -> AppResult<()> {
        self.adjust_count_many(ids, user::Column::FollowingCount).await
    }

    // Single-statement increment; avoids read-modify-write on the counter.
    async fn adjust_count(&self, id: &str, column: user::Column, delta: i32) -> AppResult<()> {
        User::update_many()
            .col_expr(column, Expr::col(column).add(delta))
            .filter(user::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    async fn adjust_count_many(&self, ids: &[String], column: user::Column) -> AppResult<()> {
        if ids.is_empty() {
            return Ok(());
        }

        User::update_many()
            .col_expr(column, Expr::col(column).sub(1))
            .filter(user::Column::Id.is_in(ids.to_vec()))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
