//! Tournament entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use gambit_core::domain::TournamentStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "chess_tournaments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub max_players: i32,
    pub system: String,
    pub time_per_player: i32,
    pub start_date: String,
    pub start_time: String,
    pub location: String,
    #[sea_orm(column_type = "Text")]
    pub prizes: String,
    pub cost: f64,
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Tournament.
impl From<Model> for gambit_core::domain::Tournament {
    fn from(model: Model) -> Self {
        let status = model.status.parse().unwrap_or_else(|_| {
            tracing::warn!(
                tournament_id = %model.id,
                status = %model.status,
                "Unknown tournament status, treating as upcoming"
            );
            TournamentStatus::Upcoming
        });

        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            max_players: model.max_players,
            system: model.system,
            time_per_player: model.time_per_player,
            start_date: model.start_date,
            start_time: model.start_time,
            location: model.location,
            prizes: model.prizes,
            cost: model.cost,
            status,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Conversion from Domain Tournament to SeaORM ActiveModel.
impl From<gambit_core::domain::Tournament> for ActiveModel {
    fn from(t: gambit_core::domain::Tournament) -> Self {
        Self {
            id: Set(t.id),
            name: Set(t.name),
            description: Set(t.description),
            max_players: Set(t.max_players),
            system: Set(t.system),
            time_per_player: Set(t.time_per_player),
            start_date: Set(t.start_date),
            start_time: Set(t.start_time),
            location: Set(t.location),
            prizes: Set(t.prizes),
            cost: Set(t.cost),
            status: Set(t.status.as_str().to_string()),
            created_at: Set(t.created_at.into()),
            updated_at: Set(t.updated_at.into()),
        }
    }
}
