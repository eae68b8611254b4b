//! Small shared helpers.

use chrono::{SecondsFormat, Utc};

/// Current UTC time as an ISO-8601 string.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
