//! Validating conversion of loosely-typed record values into fixed-width
//! typed column values, with per-chunk statistics.
//!
//! The flow for one column chunk:
//! - build a [`Converter`] once from a [`ColumnSpec`] (immutable, shareable
//!   across threads),
//! - per row, feed a [`Datum`] through
//!   [`Converter::validate_and_convert`], which writes the typed value into
//!   a caller-supplied [`TypedSink`] and updates a [`StatsBuffer`],
//! - hand the sink contents and the statistics snapshot to the column-chunk
//!   writer (out of scope here).
//!
//! Each concurrent caller must drive its own `StatsBuffer` and sink; the
//! converters themselves hold no mutable state.

#![forbid(unsafe_code)]

mod convert;
mod datetime;
mod error;
mod sink;
mod stats;
mod values;

pub use crate::convert::{
    BinaryConverter, BooleanConverter, ColumnKind, ColumnSpec, Converter, DateConverter,
    NumberConverter, RealConverter, TimeConverter, TimestampConverter,
};
pub use crate::error::ConvertError;
pub use crate::sink::{narrowest_integer_type, PhysicalType, SinkError, TypedSink};
pub use crate::stats::StatsBuffer;
pub use crate::values::Datum;
