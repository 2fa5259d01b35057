//! String grammars for the time, date, and timestamp converters, and
//! timezone resolution for timestamps.
//!
//! Parsing is format-table driven: each accepted shape is tried in order
//! and the first full match wins (chrono rejects trailing input, so the
//! table order cannot mis-parse a longer form as a shorter one).

use chrono::{
    DateTime, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone,
};
use chrono_tz::Tz;

/// Timestamp strings carrying their own UTC offset; `%:z` also accepts `Z`.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

/// Naive timestamp strings: date, optional time, optional fraction.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];

/// Parses an extended timestamp string into its wall-clock reading and, if
/// the string carried one, an explicit UTC offset. Numeric fields may be
/// unpadded; a date-only string reads as midnight.
pub(crate) fn parse_timestamp(s: &str) -> Option<(NaiveDateTime, Option<FixedOffset>)> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some((dt.naive_local(), Some(*dt.offset())));
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, format) {
            return Some((dt.naive_local(), Some(*dt.offset())));
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(wall) = NaiveDateTime::parse_from_str(s, format) {
            return Some((wall, None));
        }
    }
    parse_date(s).map(|d| (d.and_time(NaiveTime::MIN), None))
}

/// Parses `HH:MM[:SS[.fraction]]`. Date-time strings do not match.
pub(crate) fn parse_time_of_day(s: &str) -> Option<NaiveTime> {
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(s, format).ok())
}

/// Parses a date-only string `Y-M-D`; month and day may be unpadded.
pub(crate) fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// An instant pinned to the epoch plus the zone offset it should be
/// encoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ResolvedTimestamp {
    pub epoch_secs: i64,
    pub subsec_nanos: u32,
    pub offset_secs: i32,
}

/// Resolves a parsed wall clock against the column's timezone policy.
///
/// An explicit offset always fixes the instant; naive wall clocks resolve
/// in `default_tz`. With `trim_tz` the zone is discarded instead: naive
/// wall clocks are taken as UTC, explicit offsets are normalized to the
/// UTC instant, and the reported offset is zero.
///
/// Returns `None` only when the wall clock does not exist in `default_tz`
/// (a DST gap); ambiguous readings take the earlier interpretation.
pub(crate) fn resolve_wall_clock(
    wall: NaiveDateTime,
    explicit: Option<FixedOffset>,
    default_tz: Tz,
    trim_tz: bool,
) -> Option<ResolvedTimestamp> {
    match explicit {
        Some(offset) => {
            let dt = offset.from_local_datetime(&wall).single()?;
            Some(ResolvedTimestamp {
                epoch_secs: dt.timestamp(),
                subsec_nanos: dt.timestamp_subsec_nanos(),
                offset_secs: if trim_tz { 0 } else { offset.local_minus_utc() },
            })
        }
        None if trim_tz => {
            let dt = wall.and_utc();
            Some(ResolvedTimestamp {
                epoch_secs: dt.timestamp(),
                subsec_nanos: dt.timestamp_subsec_nanos(),
                offset_secs: 0,
            })
        }
        None => {
            let dt = match default_tz.from_local_datetime(&wall) {
                LocalResult::Single(dt) => dt,
                LocalResult::Ambiguous(earlier, _) => earlier,
                LocalResult::None => return None,
            };
            Some(ResolvedTimestamp {
                epoch_secs: dt.timestamp(),
                subsec_nanos: dt.timestamp_subsec_nanos(),
                offset_secs: dt.offset().fix().local_minus_utc(),
            })
        }
    }
}

/// Resolves integer input (epoch seconds) the same way: the instant is
/// already fixed, and the encoded offset is `default_tz`'s offset at that
/// instant, or zero under `trim_tz`.
pub(crate) fn resolve_epoch_seconds(
    epoch_secs: i64,
    default_tz: Tz,
    trim_tz: bool,
) -> Option<ResolvedTimestamp> {
    let offset_secs = if trim_tz {
        0
    } else {
        let dt = DateTime::from_timestamp(epoch_secs, 0)?.with_timezone(&default_tz);
        dt.offset().fix().local_minus_utc()
    };
    Some(ResolvedTimestamp {
        epoch_secs,
        subsec_nanos: 0,
        offset_secs,
    })
}
