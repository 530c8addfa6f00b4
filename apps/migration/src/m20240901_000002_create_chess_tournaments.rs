use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ChessTournaments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ChessTournaments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ChessTournaments::Name).string().not_null())
                    .col(ColumnDef::new(ChessTournaments::Description).text().not_null())
                    .col(ColumnDef::new(ChessTournaments::MaxPlayers).integer().not_null())
                    .col(ColumnDef::new(ChessTournaments::System).string().not_null())
                    .col(
                        ColumnDef::new(ChessTournaments::TimePerPlayer)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ChessTournaments::StartDate).string().not_null())
                    .col(ColumnDef::new(ChessTournaments::StartTime).string().not_null())
                    .col(ColumnDef::new(ChessTournaments::Location).string().not_null())
                    .col(
                        ColumnDef::new(ChessTournaments::Prizes)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(ChessTournaments::Cost).double().not_null())
                    .col(
                        ColumnDef::new(ChessTournaments::Status)
                            .string_len(16)
                            .not_null()
                            .default("upcoming"),
                    )
                    .col(
                        ColumnDef::new(ChessTournaments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ChessTournaments::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_chess_tournaments_start_date")
                    .table(ChessTournaments::Table)
                    .col(ChessTournaments::StartDate)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ChessTournaments::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ChessTournaments {
    Table,
    Id,
    Name,
    Description,
    MaxPlayers,
    System,
    TimePerPlayer,
    StartDate,
    StartTime,
    Location,
    Prizes,
    Cost,
    Status,
    CreatedAt,
    UpdatedAt,
}
