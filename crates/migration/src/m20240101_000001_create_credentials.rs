//! Create `credentials` table.
//!
//! Named references to key files used to reach monitored servers.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Credentials::Table)
                    .if_not_exists()
                    .col(pk_auto(Credentials::Id))
                    .col(string(Credentials::Name).not_null())
                    .col(string(Credentials::Path).not_null())
                    // RFC 3339 text, stamped by the service layer
                    .col(string(Credentials::CreatedAt).not_null())
                    .col(string(Credentials::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Credentials::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Credentials { Table, Id, Name, Path, CreatedAt, UpdatedAt }
