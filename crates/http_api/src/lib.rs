mod errors;
mod handlers;
mod state;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use state::HttpState;

pub fn router(state: HttpState) -> Router<()> {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/games", post(handlers::create_game))
        .route("/games/:game_id/kpis", get(handlers::kpi_definitions))
        .route("/games/:game_id/events", post(handlers::record_event))
        .route("/games/:game_id/summary", get(handlers::game_summary))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
