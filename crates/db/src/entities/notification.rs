//! Notification entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Notification types.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum NotificationType {
    #[sea_orm(string_value = "upvotes_posts")]
    UpvotesPosts,
    #[sea_orm(string_value = "upvotes_comments")]
    UpvotesComments,
    #[sea_orm(string_value = "comments")]
    Comments,
    #[sea_orm(string_value = "replies")]
    Replies,
    #[sea_orm(string_value = "new_followers")]
    NewFollowers,
    #[sea_orm(string_value = "invitations")]
    Invitations,
    #[sea_orm(string_value = "private_messages")]
    PrivateMessages,
    #[sea_orm(string_value = "mentions")]
    Mentions,
    #[sea_orm(string_value = "chat_messages")]
    ChatMessages,
    #[sea_orm(string_value = "chat_requests")]
    ChatRequests,
}

impl NotificationType {
    /// Wire name, matching the stored string value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UpvotesPosts => "upvotes_posts",
            Self::UpvotesComments => "upvotes_comments",
            Self::Comments => "comments",
            Self::Replies => "replies",
            Self::NewFollowers => "new_followers",
            Self::Invitations => "invitations",
            Self::PrivateMessages => "private_messages",
            Self::Mentions => "mentions",
            Self::ChatMessages => "chat_messages",
            Self::ChatRequests => "chat_requests",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notification")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// The user receiving the notification; every query is scoped by this
    pub recipient_id: String,

    /// Username of the user whose action triggered the notification
    pub sender_username: String,

    /// Related post ID (for post-scoped notifications)
    #[sea_orm(nullable)]
    pub post_id: Option<String>,

    /// Related comment ID (for comment-scoped notifications)
    #[sea_orm(nullable)]
    pub comment_id: Option<String>,

    /// Set only when the triggering content belongs to a community
    #[sea_orm(nullable)]
    pub community_name: Option<String>,

    /// Notification type
    pub notification_type: NotificationType,

    /// Has this notification been read?
    #[sea_orm(default_value = false)]
    pub is_read: bool,

    /// Soft delete; hidden notifications are excluded from every read path
    #[sea_orm(default_value = false)]
    pub is_hidden: bool,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::RecipientId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Recipient,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Recipient.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
