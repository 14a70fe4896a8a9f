mod events;
mod games;
mod summary;

use std::sync::Arc;

use crate::app::AppConfig;
use crate::error::{AppError, Result};
use kpi_core::Game;
use kpi_db::Db;

pub use events::EventsService;
pub use games::GamesService;
pub use summary::SummaryService;

type SharedConfig = Arc<AppConfig>;

/// Service registry for app-level operations.
#[derive(Clone)]
pub struct AppServices {
    pub games: GamesService,
    pub events: EventsService,
    pub summary: SummaryService,
}

impl AppServices {
    pub fn new(config: &AppConfig) -> Self {
        let shared = Arc::new(config.clone());
        Self {
            games: GamesService::new(shared.clone()),
            events: EventsService::new(shared.clone()),
            summary: SummaryService::new(shared),
        }
    }
}

fn open_db(config: &SharedConfig) -> Result<Db> {
    Ok(Db::open(&config.db_path)?)
}

fn require_game(db: &Db, game_id: &str) -> Result<Game> {
    db.get_game(game_id)?.ok_or_else(missing_game)
}

fn missing_game() -> AppError {
    AppError::NotFound("game not found".to_string())
}
