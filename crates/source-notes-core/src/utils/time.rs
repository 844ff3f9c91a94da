use chrono::{SecondsFormat, Utc};

/// Current time as ISO-8601 with milliseconds, e.g. `2024-01-01T00:00:00.000Z`
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
