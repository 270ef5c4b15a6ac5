/*!
 * Fixed-width `HH:MM:SS.mmm` clock values.
 *
 * Only the shape is checked here. Field ranges are not: `00:00:61.000` decodes
 * to 61 000 ms.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::VttError;

static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{2}):([0-9]{2}):([0-9]{2})\.([0-9]{3})$").unwrap()
});

const MS_PER_HOUR: u64 = 3_600_000;
const MS_PER_MINUTE: u64 = 60_000;
const MS_PER_SECOND: u64 = 1_000;

/// Decode an `HH:MM:SS.mmm` timestamp to milliseconds
pub fn parse_timestamp(value: &str) -> Result<u64, VttError> {
    let malformed = || VttError::MalformedTimestamp {
        value: value.to_string(),
    };

    let caps = TIMESTAMP_REGEX.captures(value).ok_or_else(malformed)?;
    let field = |idx: usize| -> Result<u64, VttError> {
        caps.get(idx)
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .ok_or_else(malformed)
    };

    Ok(field(1)? * MS_PER_HOUR + field(2)? * MS_PER_MINUTE + field(3)? * MS_PER_SECOND + field(4)?)
}

/// Encode milliseconds as `HH:MM:SS.mmm`
///
/// Hours widen past two digits rather than wrap, so values beyond 99 hours
/// no longer round-trip through [`parse_timestamp`].
pub fn format_timestamp(ms: u64) -> String {
    let hours = ms / MS_PER_HOUR;
    let minutes = (ms % MS_PER_HOUR) / MS_PER_MINUTE;
    let seconds = (ms % MS_PER_MINUTE) / MS_PER_SECOND;
    let millis = ms % MS_PER_SECOND;

    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
}

/// Format a playback position as `MM:SS`, flooring to whole seconds
pub fn format_clock(ms: u64) -> String {
    let seconds = ms / MS_PER_SECOND;
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
