//! Fixed-width human-readable rendering of identifiers.
//!
//! A well-formed human string is 21 ASCII characters: a 14-character
//! `YYYYMMDDHHMMSS` timestamp in a display zone, a 5-digit zero-padded
//! sequence, and a 2-digit zero-padded node. Parsing slices at those fixed
//! offsets and reads each segment independently; a malformed segment
//! contributes `0` for its field without disturbing the others.
//!
//! Sequence values above 99999 and node ids above 99 widen their columns, so
//! the resulting string exceeds 21 characters and no longer round-trips.
//! This is a known limitation of the format, preserved rather than patched.

use crate::{Error, Result};
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};

/// Format string for the 14-character timestamp column.
const TIME_FORMAT: &str = "%Y%m%d%H%M%S";

/// Total width of a well-formed human-readable identifier.
pub const HUMAN_WIDTH: usize = 21;

/// The default display zone, a fixed UTC+8 offset.
pub fn default_zone() -> FixedOffset {
    FixedOffset::east_opt(8 * 3600).expect("UTC+8 is a valid fixed offset")
}

pub(crate) fn format(second: u64, sequence: u64, node: u64, zone: Option<FixedOffset>) -> String {
    let zone = zone.unwrap_or_else(default_zone);
    // Seconds beyond chrono's calendar range render as the Unix epoch
    // instead of failing; such values cannot come from a clock.
    let utc = DateTime::from_timestamp(second as i64, 0).unwrap_or(DateTime::UNIX_EPOCH);
    format!(
        "{}{:05}{:02}",
        utc.with_timezone(&zone).format(TIME_FORMAT),
        sequence,
        node
    )
}

/// Best-effort parse of the three fixed-offset segments.
pub(crate) fn parse(s: &str, zone: Option<FixedOffset>) -> (u64, u64, u64) {
    let zone = zone.unwrap_or_else(default_zone);
    let second = s
        .get(..14)
        .and_then(|ts| parse_timestamp(ts, zone))
        .unwrap_or(0);
    let sequence = parse_digits(s.get(14..19));
    let node = parse_digits(s.get(19..21));
    (second, sequence, node)
}

/// Strict counterpart of [`parse`]: exact width, digit-only segments.
pub(crate) fn try_parse(s: &str, zone: Option<FixedOffset>) -> Result<(u64, u64, u64)> {
    if s.len() != HUMAN_WIDTH {
        return Err(Error::HumanWidth {
            expected: HUMAN_WIDTH,
            got: s.len(),
        });
    }
    let zone = zone.unwrap_or_else(default_zone);
    let malformed = |segment| Error::MalformedHuman {
        input: s.to_string(),
        segment,
    };
    let second = s
        .get(..14)
        .and_then(|ts| parse_timestamp(ts, zone))
        .ok_or_else(|| malformed("timestamp"))?;
    let sequence = s
        .get(14..19)
        .and_then(parse_digits_strict)
        .ok_or_else(|| malformed("sequence"))?;
    let node = s
        .get(19..21)
        .and_then(parse_digits_strict)
        .ok_or_else(|| malformed("node"))?;
    Ok((second, sequence, node))
}

fn parse_timestamp(ts: &str, zone: FixedOffset) -> Option<u64> {
    let naive = NaiveDateTime::parse_from_str(ts, TIME_FORMAT).ok()?;
    let instant = zone.from_local_datetime(&naive).single()?;
    // Instants before 1970 read as zero rather than wrapping.
    u64::try_from(instant.timestamp()).ok()
}

fn parse_digits(segment: Option<&str>) -> u64 {
    segment.and_then(|s| s.parse().ok()).unwrap_or(0)
}

fn parse_digits_strict(segment: &str) -> Option<u64> {
    if segment.bytes().all(|b| b.is_ascii_digit()) {
        segment.parse().ok()
    } else {
        None
    }
}
