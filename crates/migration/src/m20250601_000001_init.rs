//! Initial schema migration.
//!
//! - `users`: people allowed to use the calendar
//! - `pending_users`: access requests waiting for approval
//! - `months`: duty calendar documents, one row per month
//!
//! The tables are independent: there are no foreign keys between them.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Users {
    Table,
    TelegramId,
    Name,
    Role,
    Active,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum PendingUsers {
    Table,
    TelegramId,
    Name,
    Username,
    RequestedAt,
}

#[derive(Iden)]
enum Months {
    Table,
    Id,
    Duties,
    TechDuties,
    GeneralSchedule,
    Colors,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::TelegramId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(
                        ColumnDef::new(Users::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PendingUsers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PendingUsers::TelegramId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PendingUsers::Name).string().not_null())
                    .col(
                        ColumnDef::new(PendingUsers::Username)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(PendingUsers::RequestedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Months::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Months::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Months::Duties).json().not_null())
                    .col(ColumnDef::new(Months::TechDuties).json().not_null())
                    .col(ColumnDef::new(Months::GeneralSchedule).json().not_null())
                    .col(ColumnDef::new(Months::Colors).json().not_null())
                    .col(
                        ColumnDef::new(Months::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Months::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Months::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PendingUsers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
