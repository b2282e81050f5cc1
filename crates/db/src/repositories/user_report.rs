use std::sync::Arc;

use crate::entities::user_report;
use sea_orm::{ActiveModelTrait, DatabaseConnection};
use threddit_common::{AppError, AppResult};

/// User report repository for database operations.
#[derive(Clone)]
pub struct UserReportRepository {
    db: Arc<DatabaseConnection>,
}

impl UserReportRepository {
    /// Create a new user report repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Create a new report.
    pub async fn create(&self, model: user_report::ActiveModel) -> AppResult<user_report::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
