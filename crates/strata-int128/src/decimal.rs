//! Decimal string codec for [`Int128`].
//!
//! Two grammars live here:
//! - the plain integer grammar used by `Display`/`FromStr`: optional sign
//!   then ASCII digits, bounds-checked against the 128-bit range;
//! - the decimal token grammar used by [`parse_decimal`]: optional fraction
//!   and exponent (e.g. `123.4321`, `1.2e-36`), resolved against an
//!   external scale with truncation toward zero.

use crate::{Int128, POW10};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

impl fmt::Display for Int128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_i128(), f)
    }
}

impl FromStr for Int128 {
    type Err = ParseIntError;

    /// Parses an optionally signed run of ASCII digits. Values outside
    /// [-2^127, 2^127 - 1] and any non-digit character are rejected, so
    /// `parse` round-trips exactly with `Display`.
    fn from_str(s: &str) -> Result<Int128, ParseIntError> {
        i128::from_str(s).map(Int128::from_i128)
    }
}

/// Failure to interpret a decimal string token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseDecimalError {
    /// The token does not match `[+|-] digits [. digits] [(e|E) [+|-] digits]`.
    #[error("malformed decimal value {input:?}")]
    Malformed { input: String },
    /// The scaled value is not representable in 128 bits.
    #[error("decimal value {input:?} at scale {scale} overflows 128 bits")]
    OutOfRange { input: String, scale: i32 },
}

/// Parses a decimal token and returns the unscaled integer
/// `value * 10^scale`, truncated toward zero.
///
/// The token may carry a fractional part and exponent notation; digits that
/// fall below the requested scale are discarded (`"123.4321"` at scale 2 is
/// `12343`). Precision checking is left to the caller: a successfully
/// parsed value is only guaranteed to fit in 128 bits.
pub fn parse_decimal(s: &str, scale: i32) -> Result<Int128, ParseDecimalError> {
    let malformed = || ParseDecimalError::Malformed { input: s.to_owned() };
    let out_of_range = || ParseDecimalError::OutOfRange {
        input: s.to_owned(),
        scale,
    };

    let mut rest = s.as_bytes();
    let mut negative = false;
    if let [sign @ (b'+' | b'-'), tail @ ..] = rest {
        negative = *sign == b'-';
        rest = tail;
    }

    let take_digits = |bytes: &mut &[u8]| -> Vec<u8> {
        let end = bytes.iter().position(|b| !b.is_ascii_digit()).unwrap_or(bytes.len());
        let (digits, tail) = bytes.split_at(end);
        *bytes = tail;
        digits.to_vec()
    };

    let int_digits = take_digits(&mut rest);
    let mut frac_digits = Vec::new();
    if let [b'.', tail @ ..] = rest {
        rest = tail;
        frac_digits = take_digits(&mut rest);
    }
    if int_digits.is_empty() && frac_digits.is_empty() {
        return Err(malformed());
    }

    let mut exponent: i32 = 0;
    if let [b'e' | b'E', tail @ ..] = rest {
        rest = tail;
        let mut exp_negative = false;
        if let [sign @ (b'+' | b'-'), tail @ ..] = rest {
            exp_negative = *sign == b'-';
            rest = tail;
        }
        let exp_digits = take_digits(&mut rest);
        if exp_digits.is_empty() {
            return Err(malformed());
        }
        for d in &exp_digits {
            exponent = exponent
                .saturating_mul(10)
                .saturating_add((d - b'0') as i32);
        }
        if exp_negative {
            exponent = -exponent;
        }
    }
    if !rest.is_empty() {
        return Err(malformed());
    }

    // All significant digits, most significant first; the decimal point sits
    // `frac_digits.len()` places from the right before the exponent/scale
    // shift is applied.
    let mut digits = int_digits;
    let frac_len = frac_digits.len() as i32;
    digits.append(&mut frac_digits);

    let shift = exponent.saturating_sub(frac_len).saturating_add(scale);
    if shift < 0 {
        // Truncation toward zero: drop magnitude digits below the scale.
        let keep = digits.len().saturating_sub((-shift) as usize);
        digits.truncate(keep);
    }

    // Accumulate on the negative side so that MIN (|MIN| = 2^127) does not
    // overflow before the sign is applied.
    let mut acc: i128 = 0;
    for d in &digits {
        acc = acc
            .checked_mul(10)
            .and_then(|v| v.checked_sub((d - b'0') as i128))
            .ok_or_else(out_of_range)?;
    }

    if shift > 0 && acc != 0 {
        let factor = POW10
            .get(shift as usize)
            .copied()
            .ok_or_else(out_of_range)?;
        acc = acc
            .checked_mul(factor.to_i128())
            .ok_or_else(out_of_range)?;
    }

    if negative {
        Ok(Int128::from_i128(acc))
    } else {
        acc.checked_neg()
            .map(Int128::from_i128)
            .ok_or_else(out_of_range)
    }
}
