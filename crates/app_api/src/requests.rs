use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameRequest {
    pub home_team: Option<String>,
    pub away_team: Option<String>,
    pub kickoff_iso: Option<String>,
}

/// Raw event payload as submitted by the scorer. All fields optional so the
/// validator owns every rejection, not the deserializer.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RecordEventRequest {
    pub kpi_id: Option<String>,
    pub delta: Option<i64>,
    pub toggle_value: Option<bool>,
}
