use serde::Serialize;

use kpi_core::KpiDefinition;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameResponse {
    pub game_id: String,
    pub kpis: Vec<KpiDefinition>,
}

#[derive(Serialize)]
pub struct KpiListResponse {
    pub kpis: Vec<KpiDefinition>,
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

pub fn ok() -> StatusResponse {
    StatusResponse { status: "OK" }
}
