//! Community membership entity.
//!
//! One row per (community, user) pair. Carries the per-member flags the
//! source kept inline in the user document: favorite marker, moderator role,
//! ban state and the per-community update opt-out.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "community_member")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub community_id: String,

    pub user_id: String,

    #[sea_orm(default_value = false)]
    pub is_favorite: bool,

    #[sea_orm(default_value = false)]
    pub is_moderator: bool,

    /// Banned members keep their row but cannot rejoin after leaving
    #[sea_orm(default_value = false)]
    pub is_banned: bool,

    /// Suppress community update posts in the member's feed
    #[sea_orm(default_value = false)]
    pub disable_updates: bool,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::community::Entity",
        from = "Column::CommunityId",
        to = "super::community::Column::Id",
        on_delete = "Cascade"
    )]
    Community,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::community::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Community.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
