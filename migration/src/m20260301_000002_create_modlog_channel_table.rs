use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ModlogChannel::Table)
                    .if_not_exists()
                    .col(string(ModlogChannel::GuildId).primary_key())
                    .col(string(ModlogChannel::ChannelId))
                    .col(timestamp(ModlogChannel::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ModlogChannel::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ModlogChannel {
    Table,
    GuildId,
    ChannelId,
    UpdatedAt,
}
