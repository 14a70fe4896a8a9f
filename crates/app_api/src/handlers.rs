use kpi_app::Result;
use kpi_core::GameSummary;

use crate::{AppContext, CreateGameRequest, KpiListResponse, RecordEventRequest, StatusResponse};

pub fn create_game(ctx: &AppContext, req: CreateGameRequest) -> Result<crate::CreateGameResponse> {
    let (game, kpis) = ctx.app_state.services.games.create_game(
        req.home_team,
        req.away_team,
        req.kickoff_iso,
    )?;
    Ok(crate::CreateGameResponse {
        game_id: game.game_id,
        kpis,
    })
}

pub fn kpi_definitions(ctx: &AppContext, game_id: &str) -> Result<KpiListResponse> {
    let kpis = ctx.app_state.services.games.kpi_definitions(game_id)?;
    Ok(KpiListResponse { kpis })
}

pub fn record_event(
    ctx: &AppContext,
    game_id: &str,
    req: RecordEventRequest,
) -> Result<StatusResponse> {
    ctx.app_state
        .services
        .events
        .record_event(game_id, req.kpi_id, req.delta, req.toggle_value)?;
    Ok(crate::ok())
}

pub fn game_summary(ctx: &AppContext, game_id: &str) -> Result<GameSummary> {
    ctx.app_state.services.summary.game_summary(game_id)
}
