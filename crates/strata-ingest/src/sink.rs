use strata_int128::Int128;
use thiserror::Error;

/// Physical column layouts a sink can flush into. These mirror the
/// fixed-width layouts of the external column-chunk format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhysicalType {
    Boolean,
    Int32,
    Int64,
    Double,
    ByteArray,
    /// Big-endian two's-complement, 16 bytes.
    FixedLenByteArray16,
}

/// The narrowest integer layout for values of the given two's-complement
/// byte width (as reported by [`Int128::byte_width`]).
pub fn narrowest_integer_type(byte_width: usize) -> PhysicalType {
    match byte_width {
        1..=4 => PhysicalType::Int32,
        5..=8 => PhysicalType::Int64,
        _ => PhysicalType::FixedLenByteArray16,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SinkError {
    /// The values accumulated in the sink cannot be laid out as the
    /// requested physical type.
    #[error("buffered values cannot flush as {requested:?}")]
    TypeMismatch { requested: PhysicalType },
}

/// Destination for converted column values; the seam between conversion
/// and the external column-chunk writer.
///
/// A sink instance spans one column chunk: `prepare` primes it for a batch
/// of known size, the `write_*` methods append exactly one value per
/// converted row, and `flush` finalizes the chunk into a physical layout.
pub trait TypedSink {
    /// Primes the sink for a batch of `capacity` rows.
    fn prepare(&mut self, capacity: usize);
    fn write_null(&mut self);
    fn write_int128(&mut self, v: Int128);
    fn write_bool(&mut self, v: bool);
    fn write_float64(&mut self, v: f64);
    fn write_bytes(&mut self, v: &[u8]);
    /// Finalizes the chunk as `physical`; fails if the buffered values do
    /// not fit that layout.
    fn flush(&mut self, physical: PhysicalType) -> Result<(), SinkError>;
}
