use chrono::{SecondsFormat, Utc};

/// Current instant as an RFC 3339 UTC string with millisecond precision.
///
/// Event timestamps compare lexicographically in this format, which is what
/// both the event-store ordering and the aggregator's defensive sort rely on.
pub fn now_rfc3339_millis() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
