use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KpiKind {
    Counter,
    Toggle,
}

impl KpiKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            KpiKind::Counter => "COUNTER",
            KpiKind::Toggle => "TOGGLE",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "COUNTER" => Some(KpiKind::Counter),
            "TOGGLE" => Some(KpiKind::Toggle),
            _ => None,
        }
    }
}

/// One trackable metric for one game. Seeded in a batch at game creation,
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiDefinition {
    pub game_id: String,
    pub kpi_id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: KpiKind,
}

/// One immutable fact: at `timestamp`, KPI `kpi_id` for `game_id` changed.
///
/// A well-formed event carries exactly one of `delta` / `toggle_value`, but
/// the store does not enforce that, so aggregation has to tolerate rows
/// carrying either, both, or neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiEvent {
    pub game_id: String,
    pub kpi_id: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toggle_value: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub game_id: String,
    pub home_team: String,
    pub away_team: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kickoff_iso: Option<String>,
    pub status: String,
    pub created_at: String,
}

pub const GAME_STATUS_CREATED: &str = "CREATED";

/// Aggregated view of one KPI: a running total for counters, the
/// last-written flag for toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregatedValue {
    Count(i64),
    Flag(bool),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSummary {
    pub kpi_id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<bool>,
}

impl KpiSummary {
    pub fn counter(kpi_id: impl Into<String>, label: impl Into<String>, total: i64) -> Self {
        Self {
            kpi_id: kpi_id.into(),
            label: label.into(),
            total: Some(total),
            value: None,
        }
    }

    pub fn toggle(kpi_id: impl Into<String>, label: impl Into<String>, value: bool) -> Self {
        Self {
            kpi_id: kpi_id.into(),
            label: label.into(),
            total: None,
            value: Some(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub game_id: String,
    pub kpis: Vec<KpiSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("kpiId is required")]
    MissingKpiId,
    #[error("delta must be 1 or -1 for counter events")]
    DeltaOutOfRange,
    #[error("provide either delta or toggleValue, not both")]
    BothValues,
    #[error("provide either delta or toggleValue")]
    MissingValue,
}

const DEFAULT_CATALOG: &[(&str, &str, KpiKind)] = &[
    ("shots_on_target", "Shots on Target", KpiKind::Counter),
    ("shots_off_target", "Shots off Target", KpiKind::Counter),
    ("goals", "Goals", KpiKind::Counter),
    ("tackles_won", "Tackles Won", KpiKind::Counter),
    ("passes_completed", "Passes Completed", KpiKind::Counter),
    ("key_passes", "Key Passes", KpiKind::Counter),
    ("interceptions", "Interceptions", KpiKind::Counter),
    ("fouls_committed", "Fouls Committed", KpiKind::Counter),
    ("yellow_card", "Yellow Card", KpiKind::Toggle),
    ("red_card", "Red Card", KpiKind::Toggle),
    ("clean_sheet", "Clean Sheet (So Far)", KpiKind::Toggle),
    ("momentum", "Momentum (Winning)", KpiKind::Toggle),
];

/// The fixed catalog every new game starts with.
pub fn default_kpis(game_id: &str) -> Vec<KpiDefinition> {
    DEFAULT_CATALOG
        .iter()
        .map(|(kpi_id, label, kind)| KpiDefinition {
            game_id: game_id.to_string(),
            kpi_id: (*kpi_id).to_string(),
            label: (*label).to_string(),
            kind: *kind,
        })
        .collect()
}

/// Validate a raw incoming event payload before it is persisted.
///
/// Rules apply in order, first failure wins. No catalog lookup happens
/// here; a kpiId that names no definition (or the wrong kind) is accepted
/// and later ignored by [`aggregate`].
pub fn validate_event(
    kpi_id: Option<&str>,
    delta: Option<i64>,
    toggle_value: Option<bool>,
) -> Result<(), ValidationError> {
    if kpi_id.is_none_or(str::is_empty) {
        return Err(ValidationError::MissingKpiId);
    }
    if let Some(delta) = delta
        && delta != 1
        && delta != -1
    {
        return Err(ValidationError::DeltaOutOfRange);
    }
    match (delta, toggle_value) {
        (Some(_), Some(_)) => Err(ValidationError::BothValues),
        (None, None) => Err(ValidationError::MissingValue),
        _ => Ok(()),
    }
}

/// Fold the full event history into one value per catalog KPI.
///
/// Counters sum their deltas; toggles keep the value of the latest event.
/// Events are sorted by timestamp before folding (stable, so storage order
/// breaks ties) to make toggle results deterministic regardless of how the
/// caller fetched them. Events whose kpiId is unknown, or whose payload
/// does not match the definition's kind, are skipped without error.
pub fn aggregate(
    definitions: &[KpiDefinition],
    events: &[KpiEvent],
) -> HashMap<String, AggregatedValue> {
    let mut kinds: HashMap<&str, KpiKind> = HashMap::new();
    let mut values: HashMap<String, AggregatedValue> = HashMap::new();
    for def in definitions {
        // Duplicate kpiIds should not occur given seeding, but last wins.
        kinds.insert(def.kpi_id.as_str(), def.kind);
        let zero = match def.kind {
            KpiKind::Counter => AggregatedValue::Count(0),
            KpiKind::Toggle => AggregatedValue::Flag(false),
        };
        values.insert(def.kpi_id.clone(), zero);
    }

    let mut ordered: Vec<&KpiEvent> = events.iter().collect();
    ordered.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

    for event in ordered {
        let Some(kind) = kinds.get(event.kpi_id.as_str()) else {
            continue;
        };
        match (kind, event.delta, event.toggle_value) {
            (KpiKind::Counter, Some(delta), _) => {
                if let Some(AggregatedValue::Count(total)) = values.get_mut(&event.kpi_id) {
                    *total += delta;
                }
            }
            (KpiKind::Toggle, _, Some(flag)) => {
                values.insert(event.kpi_id.clone(), AggregatedValue::Flag(flag));
            }
            _ => {}
        }
    }
    values
}

/// Combine definitions with aggregated values into the response shape.
///
/// Emits exactly one entry per definition, in definition order, defaulting
/// to 0 / false for KPIs with no aggregated value.
pub fn build_summary(
    game_id: &str,
    definitions: &[KpiDefinition],
    values: &HashMap<String, AggregatedValue>,
) -> GameSummary {
    let kpis = definitions
        .iter()
        .map(|def| match def.kind {
            KpiKind::Counter => {
                let total = match values.get(&def.kpi_id) {
                    Some(AggregatedValue::Count(total)) => *total,
                    _ => 0,
                };
                KpiSummary::counter(def.kpi_id.as_str(), def.label.as_str(), total)
            }
            KpiKind::Toggle => {
                let value = match values.get(&def.kpi_id) {
                    Some(AggregatedValue::Flag(value)) => *value,
                    _ => false,
                };
                KpiSummary::toggle(def.kpi_id.as_str(), def.label.as_str(), value)
            }
        })
        .collect();
    GameSummary {
        game_id: game_id.to_string(),
        kpis,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter_def(kpi_id: &str) -> KpiDefinition {
        KpiDefinition {
            game_id: "g1".to_string(),
            kpi_id: kpi_id.to_string(),
            label: kpi_id.to_string(),
            kind: KpiKind::Counter,
        }
    }

    fn toggle_def(kpi_id: &str) -> KpiDefinition {
        KpiDefinition {
            game_id: "g1".to_string(),
            kpi_id: kpi_id.to_string(),
            label: kpi_id.to_string(),
            kind: KpiKind::Toggle,
        }
    }

    fn delta_event(kpi_id: &str, ts: &str, delta: i64) -> KpiEvent {
        KpiEvent {
            game_id: "g1".to_string(),
            kpi_id: kpi_id.to_string(),
            timestamp: ts.to_string(),
            delta: Some(delta),
            toggle_value: None,
        }
    }

    fn toggle_event(kpi_id: &str, ts: &str, value: bool) -> KpiEvent {
        KpiEvent {
            game_id: "g1".to_string(),
            kpi_id: kpi_id.to_string(),
            timestamp: ts.to_string(),
            delta: None,
            toggle_value: Some(value),
        }
    }

    #[test]
    fn validate_accepts_unit_deltas() {
        assert_eq!(validate_event(Some("goals"), Some(1), None), Ok(()));
        assert_eq!(validate_event(Some("goals"), Some(-1), None), Ok(()));
        assert_eq!(validate_event(Some("red_card"), None, Some(true)), Ok(()));
    }

    #[test]
    fn validate_rejects_missing_kpi_id() {
        assert_eq!(
            validate_event(None, Some(1), None),
            Err(ValidationError::MissingKpiId)
        );
        assert_eq!(
            validate_event(Some(""), Some(1), None),
            Err(ValidationError::MissingKpiId)
        );
    }

    #[test]
    fn validate_rejects_out_of_range_delta() {
        for delta in [0, 2, -2, 100] {
            assert_eq!(
                validate_event(Some("goals"), Some(delta), None),
                Err(ValidationError::DeltaOutOfRange)
            );
        }
    }

    #[test]
    fn validate_requires_exactly_one_value() {
        assert_eq!(
            validate_event(Some("goals"), Some(1), Some(true)),
            Err(ValidationError::BothValues)
        );
        assert_eq!(
            validate_event(Some("goals"), None, None),
            Err(ValidationError::MissingValue)
        );
    }

    #[test]
    fn validate_checks_delta_range_before_exclusivity() {
        // Rule order matters: a bad delta wins over the both-present error.
        assert_eq!(
            validate_event(Some("goals"), Some(2), Some(true)),
            Err(ValidationError::DeltaOutOfRange)
        );
    }

    #[test]
    fn aggregate_sums_counter_deltas() {
        let defs = vec![counter_def("goals")];
        let events = vec![
            delta_event("goals", "2026-05-01T19:00:00.000Z", 1),
            delta_event("goals", "2026-05-01T19:05:00.000Z", 1),
            delta_event("goals", "2026-05-01T19:10:00.000Z", -1),
        ];
        let values = aggregate(&defs, &events);
        assert_eq!(values.get("goals"), Some(&AggregatedValue::Count(1)));
    }

    #[test]
    fn aggregate_is_commutative_for_counters() {
        let defs = vec![counter_def("goals"), counter_def("tackles_won")];
        let events = vec![
            delta_event("goals", "2026-05-01T19:00:00.000Z", 1),
            delta_event("tackles_won", "2026-05-01T19:01:00.000Z", 1),
            delta_event("goals", "2026-05-01T19:02:00.000Z", -1),
            delta_event("goals", "2026-05-01T19:03:00.000Z", 1),
        ];
        let expected = aggregate(&defs, &events);
        let mut reversed = events.clone();
        reversed.reverse();
        assert_eq!(aggregate(&defs, &reversed), expected);
    }

    #[test]
    fn aggregate_toggle_is_last_write_wins_by_timestamp() {
        let defs = vec![toggle_def("red_card")];
        let events = vec![
            toggle_event("red_card", "2026-05-01T19:00:00.000Z", true),
            toggle_event("red_card", "2026-05-01T19:05:00.000Z", false),
        ];
        let values = aggregate(&defs, &events);
        assert_eq!(values.get("red_card"), Some(&AggregatedValue::Flag(false)));

        // Same rows handed over in reverse order still resolve by timestamp.
        let reversed: Vec<KpiEvent> = events.iter().rev().cloned().collect();
        let values = aggregate(&defs, &reversed);
        assert_eq!(values.get("red_card"), Some(&AggregatedValue::Flag(false)));
    }

    #[test]
    fn aggregate_skips_unknown_kpi_ids() {
        let defs = vec![counter_def("goals")];
        let events = vec![
            delta_event("goals", "2026-05-01T19:00:00.000Z", 1),
            delta_event("own_goals", "2026-05-01T19:01:00.000Z", 1),
        ];
        let values = aggregate(&defs, &events);
        assert_eq!(values.len(), 1);
        assert_eq!(values.get("goals"), Some(&AggregatedValue::Count(1)));
    }

    #[test]
    fn aggregate_skips_kind_mismatches() {
        let defs = vec![counter_def("goals"), toggle_def("red_card")];
        let events = vec![
            toggle_event("goals", "2026-05-01T19:00:00.000Z", true),
            delta_event("red_card", "2026-05-01T19:01:00.000Z", 1),
        ];
        let values = aggregate(&defs, &events);
        assert_eq!(values.get("goals"), Some(&AggregatedValue::Count(0)));
        assert_eq!(values.get("red_card"), Some(&AggregatedValue::Flag(false)));
    }

    #[test]
    fn aggregate_double_counts_duplicate_events() {
        // Resubmitted identical events are deliberately not deduplicated.
        let defs = vec![counter_def("goals")];
        let event = delta_event("goals", "2026-05-01T19:00:00.000Z", 1);
        let values = aggregate(&defs, &[event.clone(), event]);
        assert_eq!(values.get("goals"), Some(&AggregatedValue::Count(2)));
    }

    #[test]
    fn summary_emits_one_entry_per_definition_with_defaults() {
        let defs = default_kpis("g1");
        let summary = build_summary("g1", &defs, &HashMap::new());
        assert_eq!(summary.game_id, "g1");
        assert_eq!(summary.kpis.len(), defs.len());
        for (entry, def) in summary.kpis.iter().zip(&defs) {
            assert_eq!(entry.kpi_id, def.kpi_id);
            assert_eq!(entry.label, def.label);
            match def.kind {
                KpiKind::Counter => {
                    assert_eq!(entry.total, Some(0));
                    assert_eq!(entry.value, None);
                }
                KpiKind::Toggle => {
                    assert_eq!(entry.total, None);
                    assert_eq!(entry.value, Some(false));
                }
            }
        }
    }

    #[test]
    fn summary_example_scenario() {
        let defs = vec![KpiDefinition {
            game_id: "g1".to_string(),
            kpi_id: "goals".to_string(),
            label: "Goals".to_string(),
            kind: KpiKind::Counter,
        }];
        let events = vec![
            delta_event("goals", "2026-05-01T19:00:00.000Z", 1),
            delta_event("goals", "2026-05-01T19:05:00.000Z", 1),
            delta_event("goals", "2026-05-01T19:10:00.000Z", -1),
        ];
        let summary = build_summary("g1", &defs, &aggregate(&defs, &events));
        assert_eq!(summary.kpis, vec![KpiSummary::counter("goals", "Goals", 1)]);
    }

    #[test]
    fn default_catalog_has_twelve_entries() {
        let defs = default_kpis("g1");
        assert_eq!(defs.len(), 12);
        assert_eq!(
            defs.iter().filter(|d| d.kind == KpiKind::Counter).count(),
            8
        );
        assert!(defs.iter().all(|d| d.game_id == "g1"));
    }

    #[test]
    fn kpi_summary_serializes_only_its_kind_field() {
        let counter = serde_json::to_value(KpiSummary::counter("goals", "Goals", 2)).unwrap();
        assert_eq!(counter["total"], 2);
        assert!(counter.get("value").is_none());

        let toggle = serde_json::to_value(KpiSummary::toggle("red_card", "Red Card", true)).unwrap();
        assert_eq!(toggle["value"], true);
        assert!(toggle.get("total").is_none());
    }
}
