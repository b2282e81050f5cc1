//! Create community table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Community::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Community::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Community::Name)
                            .string_len(128)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Community::NameLower)
                            .string_len(128)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Community::Description).text())
                    .col(ColumnDef::new(Community::ProfilePicture).string_len(1024))
                    .col(
                        ColumnDef::new(Community::MembersCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Community::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Community::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // Unique index: name_lower (case-insensitive community lookup)
        manager
            .create_index(
                Index::create()
                    .name("idx_community_name_lower")
                    .table(Community::Table)
                    .col(Community::NameLower)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Community::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Community {
    Table,
    Id,
    Name,
    NameLower,
    Description,
    ProfilePicture,
    MembersCount,
    CreatedAt,
    UpdatedAt,
}
