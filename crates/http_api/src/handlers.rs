use axum::{
    body::Bytes,
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;

use app_api::{CreateGameRequest, RecordEventRequest};

use crate::{errors::HttpError, state::HttpState};

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

pub async fn create_game(
    State(state): State<HttpState>,
    body: Bytes,
) -> Result<impl IntoResponse, HttpError> {
    // An absent body means "create with defaults", matching the scoreboard
    // client which posts an empty request.
    let req = if body.is_empty() {
        CreateGameRequest::default()
    } else {
        parse_body(&body)?
    };
    let response = app_api::create_game(&state.context, req)?;
    Ok(Json(response))
}

pub async fn kpi_definitions(
    State(state): State<HttpState>,
    Path(game_id): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::kpi_definitions(&state.context, &game_id)?;
    Ok(Json(response))
}

pub async fn record_event(
    State(state): State<HttpState>,
    Path(game_id): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, HttpError> {
    if body.is_empty() {
        return Err(HttpError::new(
            StatusCode::BAD_REQUEST,
            "Request body is required",
            Some("invalid_input".to_string()),
        ));
    }
    let req: RecordEventRequest = parse_body(&body)?;
    let response = app_api::record_event(&state.context, &game_id, req)?;
    Ok(Json(response))
}

pub async fn game_summary(
    State(state): State<HttpState>,
    Path(game_id): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::game_summary(&state.context, &game_id)?;
    Ok(Json(response))
}

fn parse_body<T: serde::de::DeserializeOwned>(body: &Bytes) -> Result<T, HttpError> {
    serde_json::from_slice(body).map_err(|err| {
        HttpError::new(
            StatusCode::BAD_REQUEST,
            format!("invalid JSON body: {}", err),
            Some("invalid_input".to_string()),
        )
    })
}
