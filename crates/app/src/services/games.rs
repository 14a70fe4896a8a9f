use tracing::info;
use uuid::Uuid;

use crate::error::Result;
use crate::services::{SharedConfig, open_db, require_game};
use crate::util::time::now_rfc3339_millis;
use kpi_core::{GAME_STATUS_CREATED, Game, KpiDefinition, default_kpis};

#[derive(Clone)]
pub struct GamesService {
    config: SharedConfig,
}

impl GamesService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    /// Create a game and seed its default KPI catalog in one go.
    pub fn create_game(
        &self,
        home_team: Option<String>,
        away_team: Option<String>,
        kickoff_iso: Option<String>,
    ) -> Result<(Game, Vec<KpiDefinition>)> {
        let mut db = open_db(&self.config)?;
        let game = Game {
            game_id: Uuid::new_v4().to_string(),
            home_team: home_team.unwrap_or_default(),
            away_team: away_team.unwrap_or_default(),
            kickoff_iso,
            status: GAME_STATUS_CREATED.to_string(),
            created_at: now_rfc3339_millis(),
        };
        db.insert_game(&game)?;
        let definitions = default_kpis(&game.game_id);
        db.insert_definitions(&definitions)?;
        info!(game_id = %game.game_id, kpis = definitions.len(), "created game");
        Ok((game, definitions))
    }

    pub fn kpi_definitions(&self, game_id: &str) -> Result<Vec<KpiDefinition>> {
        let db = open_db(&self.config)?;
        require_game(&db, game_id)?;
        Ok(db.list_definitions(game_id)?)
    }
}
