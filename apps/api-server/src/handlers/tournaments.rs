//! Tournament handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use gambit_core::DomainError;
use gambit_core::domain::{Tournament, TournamentDraft, TournamentStatus};
use gambit_core::ports::{BaseRepository, TournamentRepository};
use gambit_shared::dto::{DeleteResponse, TournamentRequest, TournamentResponse};

use super::posts::parse_id;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn tournament_response(t: Tournament) -> TournamentResponse {
    TournamentResponse {
        id: t.id.to_string(),
        name: t.name,
        description: t.description,
        max_players: t.max_players,
        system: t.system,
        time_per_player: t.time_per_player,
        start_date: t.start_date,
        start_time: t.start_time,
        location: t.location,
        prizes: t.prizes,
        cost: t.cost,
        status: t.status.to_string(),
        created_at: t.created_at.to_rfc3339(),
        updated_at: t.updated_at.to_rfc3339(),
    }
}

fn text(value: Option<String>, field: &str) -> Result<String, DomainError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| DomainError::missing_field(field))
}

fn number(value: Option<f64>, field: &str) -> Result<f64, DomainError> {
    value.ok_or_else(|| DomainError::missing_field(field))
}

/// Whole-number fields drop any fractional part.
fn whole(value: f64, field: &str) -> Result<i32, DomainError> {
    let truncated = value.trunc();
    if !truncated.is_finite() || truncated.abs() > f64::from(i32::MAX) {
        return Err(DomainError::Validation(format!("{field} fuera de rango")));
    }
    Ok(truncated as i32)
}

/// Required fields are reported in form order.
fn draft_from(req: TournamentRequest) -> Result<TournamentDraft, DomainError> {
    let name = text(req.name, "name")?;
    let description = text(req.description, "description")?;
    let max_players = number(req.max_players, "max_players")?;
    let system = text(req.system, "system")?;
    let time_per_player = number(req.time_per_player, "time_per_player")?;
    let start_date = text(req.start_date, "start_date")?;
    let start_time = text(req.start_time, "start_time")?;
    let location = text(req.location, "location")?;
    let cost = number(req.cost, "cost")?;

    let draft = TournamentDraft {
        name,
        description,
        max_players: whole(max_players, "max_players")?,
        system,
        time_per_player: whole(time_per_player, "time_per_player")?,
        start_date,
        start_time,
        location,
        prizes: req.prizes.unwrap_or_default(),
        cost,
    };
    draft.validate()?;
    Ok(draft)
}

async fn load(state: &AppState, id: Uuid) -> AppResult<Tournament> {
    state
        .tournaments
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Tournament not found".to_string()))
}

/// GET /api/tournaments
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let tournaments = state.tournaments.list_by_start_date().await?;
    let body: Vec<TournamentResponse> =
        tournaments.into_iter().map(tournament_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /api/tournaments
///
/// The request's `status` is ignored: new tournaments are always upcoming.
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<TournamentRequest>,
) -> AppResult<HttpResponse> {
    let draft = draft_from(body.into_inner())?;
    let tournament = state.tournaments.insert(Tournament::new(draft)).await?;

    tracing::info!(tournament_id = %tournament.id, name = %tournament.name, "Tournament created");

    Ok(HttpResponse::Created().json(tournament_response(tournament)))
}

/// GET /api/tournaments/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    let tournament = load(&state, id).await?;
    Ok(HttpResponse::Ok().json(tournament_response(tournament)))
}

/// PUT /api/tournaments/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<TournamentRequest>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    let req = body.into_inner();
    let status: TournamentStatus = match req.status.as_deref() {
        Some(s) if !s.trim().is_empty() => s.trim().parse()?,
        _ => TournamentStatus::default(),
    };
    let draft = draft_from(req)?;

    let mut tournament = load(&state, id).await?;
    tournament.apply(draft, status);
    let tournament = state.tournaments.update(tournament).await?;

    tracing::info!(tournament_id = %tournament.id, status = %tournament.status, "Tournament updated");

    Ok(HttpResponse::Ok().json(tournament_response(tournament)))
}

/// DELETE /api/tournaments/{id}
pub async fn delete(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    state.tournaments.delete(id).await.map_err(|e| match AppError::from(e) {
        AppError::NotFound(_) => AppError::NotFound("Tournament not found".to_string()),
        other => other,
    })?;

    tracing::info!(tournament_id = %id, "Tournament deleted");

    Ok(HttpResponse::Ok().json(DeleteResponse { success: true }))
}
