//! Last-modified rendering for listings.
//!
//! Every instant is shown twice: as an RFC 3339 UTC string with millisecond
//! precision and as a human-readable string in Manila time (UTC+8, no DST).

use chrono::{DateTime, SecondsFormat, Utc};
use chrono_tz::{Asia::Manila, Tz};

/// Timezone used for every display string.
pub const DISPLAY_TZ: Tz = Manila;

/// e.g. `January 15, 2024 • 06:00:00 PM +08`. Month names come from chrono,
/// not from the process locale.
pub const DISPLAY_FORMAT: &str = "%B %-d, %Y • %I:%M:%S %p %:::z";

/// Both renderings of a single instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedTimestamp {
    pub display: String,
    pub raw: String,
}

pub fn format_timestamp(instant: DateTime<Utc>) -> FormattedTimestamp {
    FormattedTimestamp {
        display: instant
            .with_timezone(&DISPLAY_TZ)
            .format(DISPLAY_FORMAT)
            .to_string(),
        raw: instant.to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}
