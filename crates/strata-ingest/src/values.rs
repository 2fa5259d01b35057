use crate::error::ConvertError;

/// A single loosely-typed record field, restricted to exactly the variants
/// the converters accept. Anything else is rejected at this boundary,
/// before conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum Datum {
    /// Absent or explicit null.
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    /// A decimal string token, e.g. `"123.4321"` or `"1.2e-36"`. Used for
    /// numbers that cannot be represented exactly as `Int`/`Uint`/`Float`.
    Decimal(String),
    Bytes(Vec<u8>),
    Str(String),
}

impl Datum {
    /// Short rendering for error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            Datum::Null => "null".to_owned(),
            Datum::Bool(v) => format!("boolean {v}"),
            Datum::Int(v) => format!("integer {v}"),
            Datum::Uint(v) => format!("integer {v}"),
            Datum::Float(v) => format!("float {v}"),
            Datum::Decimal(v) => format!("number {v}"),
            Datum::Bytes(v) => format!("{} bytes", v.len()),
            Datum::Str(v) => format!("string {v:?}"),
        }
    }
}

impl TryFrom<&serde_json::Value> for Datum {
    type Error = ConvertError;

    /// Maps a decoded JSON value onto the converter input set. Numbers that
    /// fit a 64-bit integer become `Int`/`Uint`; anything wider or
    /// fractional is carried as a `Decimal` token so no digits are lost
    /// (`serde_json`'s `arbitrary_precision` keeps the original text).
    /// Arrays and objects have no typed-column counterpart and are
    /// malformed here.
    fn try_from(value: &serde_json::Value) -> Result<Datum, ConvertError> {
        match value {
            serde_json::Value::Null => Ok(Datum::Null),
            serde_json::Value::Bool(b) => Ok(Datum::Bool(*b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Datum::Int(i))
                } else if let Some(u) = n.as_u64() {
                    Ok(Datum::Uint(u))
                } else {
                    Ok(Datum::Decimal(n.to_string()))
                }
            }
            serde_json::Value::String(s) => Ok(Datum::Str(s.clone())),
            serde_json::Value::Array(_) => Err(ConvertError::Malformed {
                expected: "a scalar value",
                actual: "a JSON array".to_owned(),
            }),
            serde_json::Value::Object(_) => Err(ConvertError::Malformed {
                expected: "a scalar value",
                actual: "a JSON object".to_owned(),
            }),
        }
    }
}
