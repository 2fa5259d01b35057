use thiserror::Error;

/// Why a value could not be converted for its column.
///
/// Variants fall into two families: *malformed input* (the value does not
/// match the column's grammar or variant set; see
/// [`ConvertError::is_malformed`]) and *out of range* (the value is valid
/// but violates a configured bound; see [`ConvertError::is_out_of_range`]).
/// Whether a failed row skips or aborts the batch is the caller's policy;
/// nothing is written to the sink on error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// Null or absent input for a non-nullable column.
    #[error("no value provided for a column that is not nullable")]
    MissingValue,
    /// The input variant or its textual form does not fit the column kind.
    #[error("cannot convert {actual} into {expected}")]
    Malformed {
        expected: &'static str,
        actual: String,
    },
    /// A byte sequence destined for a UTF-8 column is not valid UTF-8.
    #[error("bytes are not valid UTF-8")]
    InvalidUtf8,
    /// The converted value needs more decimal digits than the column allows.
    #[error("value {value} does not fit in precision {precision} at scale {scale}")]
    Overflow {
        value: String,
        precision: u32,
        scale: i32,
    },
    /// A binary/string value exceeds the column's maximum byte length.
    #[error("value of {length} bytes exceeds the maximum length {max_length}")]
    TooLong { length: usize, max_length: usize },
    /// A date outside the supported calendar span of years -9999 to 9999.
    #[error("date {value} is outside the supported year range -9999..=9999")]
    DateOutOfRange { value: String },
}

impl ConvertError {
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            ConvertError::MissingValue
                | ConvertError::Malformed { .. }
                | ConvertError::InvalidUtf8
        )
    }

    pub fn is_out_of_range(&self) -> bool {
        !self.is_malformed()
    }
}
