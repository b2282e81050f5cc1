//! Create user report table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserReport::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserReport::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UserReport::ReporterId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserReport::TargetId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(UserReport::Reason).text().not_null())
                    .col(
                        ColumnDef::new(UserReport::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_report_reporter")
                            .from(UserReport::Table, UserReport::ReporterId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_report_target")
                            .from(UserReport::Table, UserReport::TargetId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: target_id (for reviewing reports against a user)
        manager
            .create_index(
                Index::create()
                    .name("idx_user_report_target_id")
                    .table(UserReport::Table)
                    .col(UserReport::TargetId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserReport::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum UserReport {
    Table,
    Id,
    ReporterId,
    TargetId,
    Reason,
    CreatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
