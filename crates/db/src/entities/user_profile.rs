//! User profile entity (stores the password hash and per-category settings).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_profile")]
pub struct Model {
    /// Same as user.id (1:1 relationship)
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,

    /// Password hash (Argon2)
    #[sea_orm(nullable)]
    pub password: Option<String>,

    /// Profile settings (display name visibility, about text, etc.)
    #[sea_orm(column_type = "JsonBinary")]
    pub profile_settings: Json,

    /// Feed settings (adult content, autoplay, sort defaults)
    #[sea_orm(column_type = "JsonBinary")]
    pub feed_settings: Json,

    /// Per-type notification toggles; absent fields default to enabled
    #[sea_orm(column_type = "JsonBinary")]
    pub notification_settings: Json,

    /// Chat settings
    #[sea_orm(column_type = "JsonBinary")]
    pub chat_settings: Json,

    /// Email settings (which events produce an email)
    #[sea_orm(column_type = "JsonBinary")]
    pub email_settings: Json,

    /// Safety and privacy settings
    #[sea_orm(column_type = "JsonBinary")]
    pub safety_settings: Json,

    /// Recently viewed post ids; cleared by the clear-history operation
    #[sea_orm(column_type = "JsonBinary")]
    pub history_post_ids: Json,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
