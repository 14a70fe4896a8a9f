use crate::error::Result;
use crate::services::{SharedConfig, open_db, require_game};
use kpi_core::{GameSummary, aggregate, build_summary};

#[derive(Clone)]
pub struct SummaryService {
    config: SharedConfig,
}

impl SummaryService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    /// Recompute the per-KPI summary from the full event history.
    ///
    /// No running aggregate is kept anywhere; every call re-reads the
    /// definitions and event log, so concurrent writes show up in the next
    /// summary without coordination.
    pub fn game_summary(&self, game_id: &str) -> Result<GameSummary> {
        let db = open_db(&self.config)?;
        require_game(&db, game_id)?;
        let definitions = db.list_definitions(game_id)?;
        let events = db.list_events(game_id)?;
        let values = aggregate(&definitions, &events);
        Ok(build_summary(game_id, &definitions, &values))
    }
}
