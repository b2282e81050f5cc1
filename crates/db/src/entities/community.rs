//! Community entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "community")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(unique)]
    pub name: String,

    pub name_lower: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    /// Community avatar URL
    #[sea_orm(nullable)]
    pub profile_picture: Option<String>,

    /// Members count (denormalized; kept in lockstep with member rows)
    #[sea_orm(default_value = 0)]
    pub members_count: i32,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::community_member::Entity")]
    Members,
}

impl Related<super::community_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Members.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
