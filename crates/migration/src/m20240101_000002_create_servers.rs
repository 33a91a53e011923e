//! Create `servers` table.
//!
//! Monitored hosts with their log location. `credential_id` is checked by the
//! service layer; there is no foreign key so deleting a credential never
//! cascades to servers.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Servers::Table)
                    .if_not_exists()
                    .col(pk_auto(Servers::Id))
                    .col(string(Servers::Name).not_null())
                    .col(string(Servers::Host).not_null())
                    .col(string(Servers::LogLocationPath).not_null())
                    .col(string_len(Servers::LogLocationFormat, 16).not_null())
                    .col(integer(Servers::CredentialId).not_null())
                    .col(string(Servers::CreatedAt).not_null())
                    .col(string(Servers::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Servers::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Servers {
    Table,
    Id,
    Name,
    Host,
    LogLocationPath,
    LogLocationFormat,
    CredentialId,
    CreatedAt,
    UpdatedAt,
}
