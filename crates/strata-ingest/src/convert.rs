//! The per-kind value converters.
//!
//! One [`Converter`] is built per column from a [`ColumnSpec`] and then
//! shared read-only across every conversion call for that column. The kind
//! set is closed: dispatch is a single exhaustive match, and each kind owns
//! exactly the configuration it needs.

use crate::datetime::{
    parse_date, parse_time_of_day, parse_timestamp, resolve_epoch_seconds, resolve_wall_clock,
    ResolvedTimestamp,
};
use crate::error::ConvertError;
use crate::sink::TypedSink;
use crate::stats::StatsBuffer;
use crate::values::Datum;
use chrono::{Datelike, Timelike};
use chrono_tz::Tz;
use strata_int128::{parse_decimal, Int128, ParseDecimalError, POW10};

const SECONDS_PER_DAY: i64 = 86_400;

/// Supported calendar span: resulting years must stay within ±9999.
const MIN_YEAR: i32 = -9999;
const MAX_YEAR: i32 = 9999;

/// Column kind selector used when constructing a [`Converter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Time of day, stored as integer units of 10^-scale seconds.
    Time,
    /// Fixed-point number, stored unscaled at the configured scale.
    Number,
    /// 64-bit float, passed through.
    Real,
    Boolean,
    /// Binary or text, stored as bytes; `utf8` demands valid UTF-8.
    Binary,
    /// Timestamp without timezone: zone information is discarded.
    TimestampNtz,
    /// Timestamp with timezone: the zone offset is encoded with the value.
    TimestampTz,
    /// Timestamp in the local (default) zone: naive inputs resolve there,
    /// no offset is encoded.
    TimestampLtz,
    /// Days since 1970-01-01.
    Date,
}

/// Per-column configuration handed to [`Converter::new`].
///
/// `scale` must be in `0..=9` for the time and timestamp kinds (units of
/// 10^-scale seconds); violating that is a construction-time precondition,
/// not a per-row error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub kind: ColumnKind,
    pub nullable: bool,
    pub scale: i32,
    pub precision: u32,
    pub max_length: usize,
    pub utf8: bool,
    pub default_tz: Tz,
}

impl ColumnSpec {
    pub fn new(kind: ColumnKind) -> ColumnSpec {
        ColumnSpec {
            kind,
            nullable: true,
            scale: 0,
            precision: 38,
            // The destination format caps variable-length values at 16 MiB.
            max_length: 16 * 1024 * 1024,
            utf8: false,
            default_tz: Tz::UTC,
        }
    }
}

/// A configured, immutable per-column converter.
///
/// `validate_and_convert` either writes exactly one typed value into the
/// sink and updates the statistics, or returns an error having written
/// nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum Converter {
    Time(TimeConverter),
    Number(NumberConverter),
    Real(RealConverter),
    Boolean(BooleanConverter),
    Binary(BinaryConverter),
    Timestamp(TimestampConverter),
    Date(DateConverter),
}

impl Converter {
    pub fn new(spec: &ColumnSpec) -> Converter {
        let nullable = spec.nullable;
        match spec.kind {
            ColumnKind::Time => {
                debug_assert!((0..=9).contains(&spec.scale));
                Converter::Time(TimeConverter {
                    nullable,
                    scale: spec.scale,
                })
            }
            ColumnKind::Number => Converter::Number(NumberConverter {
                nullable,
                scale: spec.scale,
                precision: spec.precision,
            }),
            ColumnKind::Real => Converter::Real(RealConverter { nullable }),
            ColumnKind::Boolean => Converter::Boolean(BooleanConverter { nullable }),
            ColumnKind::Binary => Converter::Binary(BinaryConverter {
                nullable,
                max_length: spec.max_length,
                utf8: spec.utf8,
            }),
            ColumnKind::TimestampNtz
            | ColumnKind::TimestampTz
            | ColumnKind::TimestampLtz => {
                debug_assert!((0..=9).contains(&spec.scale));
                Converter::Timestamp(TimestampConverter {
                    nullable,
                    scale: spec.scale,
                    precision: spec.precision,
                    include_tz: spec.kind == ColumnKind::TimestampTz,
                    trim_tz: spec.kind == ColumnKind::TimestampNtz,
                    default_tz: spec.default_tz,
                })
            }
            ColumnKind::Date => Converter::Date(DateConverter { nullable }),
        }
    }

    pub fn validate_and_convert(
        &self,
        stats: &mut StatsBuffer,
        input: &Datum,
        sink: &mut dyn TypedSink,
    ) -> Result<(), ConvertError> {
        match self {
            Converter::Time(c) => c.validate_and_convert(stats, input, sink),
            Converter::Number(c) => c.validate_and_convert(stats, input, sink),
            Converter::Real(c) => c.validate_and_convert(stats, input, sink),
            Converter::Boolean(c) => c.validate_and_convert(stats, input, sink),
            Converter::Binary(c) => c.validate_and_convert(stats, input, sink),
            Converter::Timestamp(c) => c.validate_and_convert(stats, input, sink),
            Converter::Date(c) => c.validate_and_convert(stats, input, sink),
        }
    }
}

fn convert_null(
    nullable: bool,
    stats: &mut StatsBuffer,
    sink: &mut dyn TypedSink,
) -> Result<(), ConvertError> {
    if !nullable {
        return Err(ConvertError::MissingValue);
    }
    sink.write_null();
    stats.record_null();
    Ok(())
}

fn malformed(expected: &'static str, input: &Datum) -> ConvertError {
    ConvertError::Malformed {
        expected,
        actual: input.describe(),
    }
}

/// Seconds plus sub-second nanoseconds, scaled to integer units of
/// 10^-scale seconds with truncation toward zero. `scale` must be in 0..=9.
fn scale_seconds(seconds: i64, subsec_nanos: u32, scale: i32) -> Int128 {
    let nanos = Int128::from_i64(seconds) * POW10[9] + Int128::from_u64(subsec_nanos as u64);
    nanos / POW10[(9 - scale) as usize]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeConverter {
    pub nullable: bool,
    pub scale: i32,
}

impl TimeConverter {
    pub fn validate_and_convert(
        &self,
        stats: &mut StatsBuffer,
        input: &Datum,
        sink: &mut dyn TypedSink,
    ) -> Result<(), ConvertError> {
        let units = match input {
            Datum::Null => return convert_null(self.nullable, stats, sink),
            Datum::Str(s) => {
                // Trailing whitespace is tolerated; anything that is not a
                // plain time of day (e.g. a full datetime) is not.
                let time = parse_time_of_day(s.trim_end())
                    .ok_or_else(|| malformed("a time of day", input))?;
                scale_seconds(
                    time.num_seconds_from_midnight() as i64,
                    time.nanosecond(),
                    self.scale,
                )
            }
            Datum::Int(v) => self.seconds_of_day(v.rem_euclid(SECONDS_PER_DAY)),
            Datum::Uint(v) => self.seconds_of_day((v % SECONDS_PER_DAY as u64) as i64),
            _ => return Err(malformed("a time of day", input)),
        };
        sink.write_int128(units);
        stats.record_int(units);
        Ok(())
    }

    /// Integer input is epoch seconds; only the time-of-day component is
    /// kept.
    fn seconds_of_day(&self, seconds: i64) -> Int128 {
        Int128::from_i64(seconds) * POW10[self.scale as usize]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberConverter {
    pub nullable: bool,
    pub scale: i32,
    pub precision: u32,
}

impl NumberConverter {
    pub fn validate_and_convert(
        &self,
        stats: &mut StatsBuffer,
        input: &Datum,
        sink: &mut dyn TypedSink,
    ) -> Result<(), ConvertError> {
        let overflow = |value: String| ConvertError::Overflow {
            value,
            precision: self.precision,
            scale: self.scale,
        };
        let unscaled = match input {
            Datum::Null => return convert_null(self.nullable, stats, sink),
            Datum::Int(v) => Int128::from_i64(*v)
                .rescale(0, self.scale)
                .map_err(|_| overflow(v.to_string()))?,
            Datum::Uint(v) => Int128::from_u64(*v)
                .rescale(0, self.scale)
                .map_err(|_| overflow(v.to_string()))?,
            Datum::Decimal(s) | Datum::Str(s) => match parse_decimal(s.trim(), self.scale) {
                Ok(v) => v,
                Err(ParseDecimalError::Malformed { .. }) => {
                    return Err(malformed("a number", input))
                }
                Err(ParseDecimalError::OutOfRange { .. }) => {
                    return Err(overflow(s.trim().to_owned()))
                }
            },
            Datum::Float(f) => {
                if !f.is_finite() {
                    return Err(malformed("a number", input));
                }
                let scaled = (f * 10f64.powi(self.scale)).trunc();
                if scaled.abs() >= 2f64.powi(127) {
                    return Err(overflow(f.to_string()));
                }
                Int128::from_i128(scaled as i128)
            }
            _ => return Err(malformed("a number", input)),
        };
        if !unscaled.fits_in_precision(self.precision) {
            return Err(overflow(input.describe()));
        }
        sink.write_int128(unscaled);
        stats.record_int(unscaled);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RealConverter {
    pub nullable: bool,
}

impl RealConverter {
    pub fn validate_and_convert(
        &self,
        stats: &mut StatsBuffer,
        input: &Datum,
        sink: &mut dyn TypedSink,
    ) -> Result<(), ConvertError> {
        let value = match input {
            Datum::Null => return convert_null(self.nullable, stats, sink),
            Datum::Float(f) => *f,
            Datum::Int(v) => *v as f64,
            Datum::Uint(v) => *v as f64,
            Datum::Decimal(s) | Datum::Str(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| malformed("a floating point number", input))?,
            _ => return Err(malformed("a floating point number", input)),
        };
        sink.write_float64(value);
        stats.record_real(value);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanConverter {
    pub nullable: bool,
}

impl BooleanConverter {
    pub fn validate_and_convert(
        &self,
        stats: &mut StatsBuffer,
        input: &Datum,
        sink: &mut dyn TypedSink,
    ) -> Result<(), ConvertError> {
        let value = match input {
            Datum::Null => return convert_null(self.nullable, stats, sink),
            Datum::Bool(b) => *b,
            Datum::Str(s) => match s.trim() {
                "true" => true,
                "false" => false,
                _ => return Err(malformed("a boolean", input)),
            },
            _ => return Err(malformed("a boolean", input)),
        };
        sink.write_bool(value);
        stats.record_bool(value);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryConverter {
    pub nullable: bool,
    pub max_length: usize,
    pub utf8: bool,
}

impl BinaryConverter {
    pub fn validate_and_convert(
        &self,
        stats: &mut StatsBuffer,
        input: &Datum,
        sink: &mut dyn TypedSink,
    ) -> Result<(), ConvertError> {
        let bytes: &[u8] = match input {
            Datum::Null => return convert_null(self.nullable, stats, sink),
            Datum::Bytes(b) => {
                if self.utf8 && std::str::from_utf8(b).is_err() {
                    return Err(ConvertError::InvalidUtf8);
                }
                b
            }
            // Strings are UTF-8 by construction, so they satisfy either mode.
            Datum::Str(s) => s.as_bytes(),
            _ => return Err(malformed("bytes or a string", input)),
        };
        if bytes.len() > self.max_length {
            return Err(ConvertError::TooLong {
                length: bytes.len(),
                max_length: self.max_length,
            });
        }
        sink.write_bytes(bytes);
        stats.record_bytes(bytes);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampConverter {
    pub nullable: bool,
    pub scale: i32,
    pub precision: u32,
    /// Encode the zone offset into the value.
    pub include_tz: bool,
    /// Discard zone information: naive wall clocks read as UTC, explicit
    /// offsets normalize to the UTC instant.
    pub trim_tz: bool,
    pub default_tz: Tz,
}

impl TimestampConverter {
    pub fn validate_and_convert(
        &self,
        stats: &mut StatsBuffer,
        input: &Datum,
        sink: &mut dyn TypedSink,
    ) -> Result<(), ConvertError> {
        let resolved = match input {
            Datum::Null => return convert_null(self.nullable, stats, sink),
            Datum::Str(s) => {
                let (wall, offset) = parse_timestamp(s.trim())
                    .ok_or_else(|| malformed("a timestamp", input))?;
                resolve_wall_clock(wall, offset, self.default_tz, self.trim_tz)
                    .ok_or_else(|| malformed("a timestamp", input))?
            }
            Datum::Int(v) => resolve_epoch_seconds(*v, self.default_tz, self.trim_tz)
                .ok_or_else(|| malformed("a timestamp", input))?,
            Datum::Uint(v) => {
                let secs = i64::try_from(*v).map_err(|_| ConvertError::Overflow {
                    value: v.to_string(),
                    precision: self.precision,
                    scale: self.scale,
                })?;
                resolve_epoch_seconds(secs, self.default_tz, self.trim_tz)
                    .ok_or_else(|| malformed("a timestamp", input))?
            }
            _ => return Err(malformed("a timestamp", input)),
        };
        let encoded = self.encode(resolved);
        if !encoded.fits_in_precision(self.precision) {
            return Err(ConvertError::Overflow {
                value: input.describe(),
                precision: self.precision,
                scale: self.scale,
            });
        }
        sink.write_int128(encoded);
        stats.record_int(encoded);
        Ok(())
    }

    /// Scales the instant to 10^-scale second units; with `include_tz` the
    /// zone offset rides in the low 14 bits as minutes biased by +1440.
    fn encode(&self, t: ResolvedTimestamp) -> Int128 {
        let scaled = scale_seconds(t.epoch_secs, t.subsec_nanos, self.scale);
        if self.include_tz {
            (scaled << 14) + Int128::from_i64((t.offset_secs / 60 + 1440) as i64)
        } else {
            scaled
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateConverter {
    pub nullable: bool,
}

impl DateConverter {
    pub fn validate_and_convert(
        &self,
        stats: &mut StatsBuffer,
        input: &Datum,
        sink: &mut dyn TypedSink,
    ) -> Result<(), ConvertError> {
        let date = match input {
            Datum::Null => return convert_null(self.nullable, stats, sink),
            Datum::Str(s) => {
                parse_date(s.trim()).ok_or_else(|| malformed("a date", input))?
            }
            Datum::Int(v) => epoch_seconds_to_date(*v)
                .ok_or_else(|| ConvertError::DateOutOfRange { value: v.to_string() })?,
            Datum::Uint(v) => i64::try_from(*v)
                .ok()
                .and_then(epoch_seconds_to_date)
                .ok_or_else(|| ConvertError::DateOutOfRange { value: v.to_string() })?,
            _ => return Err(malformed("a date", input)),
        };
        if date.year() < MIN_YEAR || date.year() > MAX_YEAR {
            return Err(ConvertError::DateOutOfRange {
                value: date.to_string(),
            });
        }
        // 1970-01-01 is day 719_163 of the common era.
        let days = Int128::from_i64(i64::from(date.num_days_from_ce()) - 719_163);
        sink.write_int128(days);
        stats.record_int(days);
        Ok(())
    }
}

/// Epoch seconds floor to a calendar day, so pre-epoch instants land on the
/// correct (earlier) day.
fn epoch_seconds_to_date(epoch_secs: i64) -> Option<chrono::NaiveDate> {
    Some(chrono::DateTime::from_timestamp(epoch_secs, 0)?.date_naive())
}
