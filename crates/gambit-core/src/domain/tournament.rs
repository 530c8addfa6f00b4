use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Lifecycle of a tournament.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TournamentStatus {
    #[default]
    Upcoming,
    Active,
    Completed,
    Cancelled,
}

impl TournamentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TournamentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upcoming" => Ok(Self::Upcoming),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(DomainError::Validation(format!(
                "Estado de torneo inválido: {other}"
            ))),
        }
    }
}

/// Tournament entity - a club chess event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub max_players: i32,
    /// Pairing system, e.g. `Suizo`.
    pub system: String,
    /// Clock time per player, in minutes.
    pub time_per_player: i32,
    pub start_date: String,
    pub start_time: String,
    pub location: String,
    pub prizes: String,
    pub cost: f64,
    pub status: TournamentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The editable fields of a tournament, minus its status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TournamentDraft {
    pub name: String,
    pub description: String,
    pub max_players: i32,
    pub system: String,
    pub time_per_player: i32,
    pub start_date: String,
    pub start_time: String,
    pub location: String,
    pub prizes: String,
    pub cost: f64,
}

impl TournamentDraft {
    pub fn validate(&self) -> Result<(), DomainError> {
        let required = [
            ("name", &self.name),
            ("description", &self.description),
            ("system", &self.system),
            ("start_date", &self.start_date),
            ("start_time", &self.start_time),
            ("location", &self.location),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(DomainError::missing_field(field));
            }
        }
        if self.max_players <= 0 {
            return Err(DomainError::Validation(
                "max_players debe ser mayor que cero".to_string(),
            ));
        }
        if self.time_per_player <= 0 {
            return Err(DomainError::Validation(
                "time_per_player debe ser mayor que cero".to_string(),
            ));
        }
        if !self.cost.is_finite() || self.cost < 0.0 {
            return Err(DomainError::Validation(
                "cost no puede ser negativo".to_string(),
            ));
        }
        Ok(())
    }
}

impl Tournament {
    /// Create a new tournament. New tournaments always start as upcoming.
    pub fn new(draft: TournamentDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: draft.name,
            description: draft.description,
            max_players: draft.max_players,
            system: draft.system,
            time_per_player: draft.time_per_player,
            start_date: draft.start_date,
            start_time: draft.start_time,
            location: draft.location,
            prizes: draft.prizes,
            cost: draft.cost,
            status: TournamentStatus::Upcoming,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace every editable field, including the status.
    pub fn apply(&mut self, draft: TournamentDraft, status: TournamentStatus) {
        self.name = draft.name;
        self.description = draft.description;
        self.max_players = draft.max_players;
        self.system = draft.system;
        self.time_per_player = draft.time_per_player;
        self.start_date = draft.start_date;
        self.start_time = draft.start_time;
        self.location = draft.location;
        self.prizes = draft.prizes;
        self.cost = draft.cost;
        self.status = status;
        self.updated_at = Utc::now();
    }
}
