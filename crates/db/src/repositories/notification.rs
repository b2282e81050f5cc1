//! Notification repository.
//!
//! Every read here filters `is_hidden = false` explicitly. The source system
//! relied on a persistence-layer pre-find hook for this; keeping the filter in
//! the query methods makes the soft-delete contract visible and testable.

use std::sync::Arc;

use crate::entities::{notification, Notification};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use threddit_common::{AppError, AppResult};

/// Notification repository for database operations.
#[derive(Clone)]
pub struct NotificationRepository {
    db: Arc<DatabaseConnection>,
}

impl NotificationRepository {
    /// Create a new notification repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Create a new notification.
    pub async fn create(&self, model: notification::ActiveModel) -> AppResult<notification::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a non-hidden notification owned by the recipient.
    pub async fn find_visible(
        &self,
        recipient_id: &str,
        id: &str,
    ) -> AppResult<Option<notification::Model>> {
        Notification::find_by_id(id)
            .filter(notification::Column::RecipientId.eq(recipient_id))
            .filter(notification::Column::IsHidden.eq(false))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get all non-hidden notifications for a user, newest first.
    pub async fn find_by_recipient(
        &self,
        recipient_id: &str,
    ) -> AppResult<Vec<notification::Model>> {
        Notification::find()
            .filter(notification::Column::RecipientId.eq(recipient_id))
            .filter(notification::Column::IsHidden.eq(false))
            .order_by_desc(notification::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Mark a notification as read.
    pub async fn mark_as_read(&self, model: notification::Model) -> AppResult<()> {
        let mut active: notification::ActiveModel = model.into();
        active.is_read = Set(true);
        active
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Mark all non-hidden notifications as read for a user.
    pub async fn mark_all_as_read(&self, recipient_id: &str) -> AppResult<u64> {
        let result = Notification::update_many()
            .filter(notification::Column::RecipientId.eq(recipient_id))
            .filter(notification::Column::IsHidden.eq(false))
            .filter(notification::Column::IsRead.eq(false))
            .col_expr(notification::Column::IsRead, Expr::value(true))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected)
    }

    /// Hide a notification (soft delete; there is no unhide).
    pub async fn hide(&self, model: notification::Model) -> AppResult<()> {
        let mut active: notification::ActiveModel = model.into();
        active.is_hidden = Set(true);
        active
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Count unread, non-hidden notifications for a user.
    pub async fn count_unread(&self, recipient_id: &str) -> AppResult<u64> {
        Notification::find()
            .filter(notification::Column::RecipientId.eq(recipient_id))
            .filter(notification::Column::IsRead.eq(false))
            .filter(notification::Column::IsHidden.eq(false))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::notification::NotificationType;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_notification(id: &str, recipient_id: &str) -> notification::Model {
        notification::Model {
            id: id.to_string(),
            recipient_id: recipient_id.to_string(),
            sender_username: "bob".to_string(),
            post_id: None,
            comment_id: None,
            community_name: None,
            notification_type: NotificationType::NewFollowers,
            is_read: false,
            is_hidden: false,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_visible_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<notification::Model>::new()])
                .into_connection(),
        );

        let repo = NotificationRepository::new(db);
        let result = repo.find_visible("user1", "n1").await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_count_unread() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(3))
                }]])
                .into_connection(),
        );

        let repo = NotificationRepository::new(db);
        let count = repo.count_unread("user1").await.unwrap();

        assert_eq!(count, 3);
    }

    #[tokio::test]
    async fn test_find_by_recipient() {
        let n1 = create_test_notification("n2", "user1");
        let n2 = create_test_notification("n1", "user1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[n1, n2]])
                .into_connection(),
        );

        let repo = NotificationRepository::new(db);
        let result = repo.find_by_recipient("user1").await.unwrap();

        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn test_find_by_recipient_excludes_hidden_and_orders_newest_first() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<notification::Model>::new()])
                .into_connection(),
        );

        let repo = NotificationRepository::new(Arc::clone(&db));
        repo.find_by_recipient("user1").await.unwrap();
        drop(repo);

        // Inspect the generated SQL: the soft-delete filter and the
        // newest-first ordering must be part of the query itself.
        let db = Arc::try_unwrap(db).unwrap();
        let log = db.into_transaction_log();
        // Identifier quotes come out backslash-escaped in the debug form
        let query = format!("{:?}", log[0]);
        assert!(query.contains(r#"\"notification\".\"is_hidden\" = $2"#));
        assert!(query.contains("Bool(Some(false))"));
        assert!(query.contains(r#"ORDER BY \"notification\".\"created_at\" DESC"#));
    }
}
