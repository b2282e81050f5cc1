//! Create user profile table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserProfile::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserProfile::UserId)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserProfile::Password).string_len(256))
                    .col(
                        ColumnDef::new(UserProfile::ProfileSettings)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserProfile::FeedSettings)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserProfile::NotificationSettings)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserProfile::ChatSettings)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserProfile::EmailSettings)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserProfile::SafetySettings)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserProfile::HistoryPostIds)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserProfile::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(UserProfile::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_profile_user")
                            .from(UserProfile::Table, UserProfile::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserProfile::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum UserProfile {
    Table,
    UserId,
    Password,
    ProfileSettings,
    FeedSettings,
    NotificationSettings,
    ChatSettings,
    EmailSettings,
    SafetySettings,
    HistoryPostIds,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
