use tracing::{info, warn};

use crate::error::Result;
use crate::services::{SharedConfig, open_db};
use crate::util::time::now_rfc3339_millis;
use kpi_core::{KpiEvent, validate_event};

#[derive(Clone)]
pub struct EventsService {
    config: SharedConfig,
}

impl EventsService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    /// Validate and persist one KPI event.
    ///
    /// There is intentionally no check that the game exists or that the
    /// kpiId names a definition of matching kind; aggregation ignores
    /// events it cannot attribute.
    pub fn record_event(
        &self,
        game_id: &str,
        kpi_id: Option<String>,
        delta: Option<i64>,
        toggle_value: Option<bool>,
    ) -> Result<KpiEvent> {
        if let Err(err) = validate_event(kpi_id.as_deref(), delta, toggle_value) {
            warn!(game_id, %err, "rejected kpi event");
            return Err(err.into());
        }
        let event = KpiEvent {
            game_id: game_id.to_string(),
            kpi_id: kpi_id.unwrap_or_default(),
            timestamp: now_rfc3339_millis(),
            delta,
            toggle_value,
        };
        let mut db = open_db(&self.config)?;
        db.insert_event(&event)?;
        info!(game_id, kpi_id = %event.kpi_id, "recorded kpi event");
        Ok(event)
    }
}
