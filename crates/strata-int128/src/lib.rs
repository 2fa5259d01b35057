//! Fixed-width 128-bit signed integers for columnar value encoding.
//!
//! The destination format stores numbers as big-endian two's-complement of
//! up to 16 bytes, so this crate exposes:
//! - [`Int128`]: a thin wrapper over native `i128` with *wrapping*
//!   arithmetic (the physical format is fixed-width; overflow detection is a
//!   precision concern, not an arithmetic one),
//! - a decimal string codec (see [`parse_decimal`]),
//! - power-of-ten rescaling and precision-fit checks (see [`POW10`],
//!   [`Int128::rescale`], [`Int128::fits_in_precision`]).

#![forbid(unsafe_code)]

mod decimal;
mod scale;

pub use crate::decimal::{parse_decimal, ParseDecimalError};
pub use crate::scale::{RescaleError, POW10};

use std::ops::{Add, Div, Mul, Neg, Shl, Sub};

/// A 128-bit two's-complement signed integer.
///
/// Arithmetic via the `Add`/`Sub`/`Mul`/`Neg` operators wraps modulo 2^128
/// and never fails; in particular `-Int128::MIN == Int128::MIN`. Range and
/// precision violations are surfaced by [`Int128::rescale`] and
/// [`Int128::fits_in_precision`], not by the arithmetic itself.
///
/// Every bit pattern is a valid value; the range is
/// [-2^127, 2^127 - 1].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Int128(i128);

impl Int128 {
    pub const MIN: Int128 = Int128(i128::MIN);
    pub const MAX: Int128 = Int128(i128::MAX);
    pub const ZERO: Int128 = Int128(0);
    pub const ONE: Int128 = Int128(1);

    pub const fn from_i64(v: i64) -> Int128 {
        Int128(v as i128)
    }

    pub const fn from_u64(v: u64) -> Int128 {
        Int128(v as i128)
    }

    pub const fn from_i128(v: i128) -> Int128 {
        Int128(v)
    }

    /// Builds a value from its two 64-bit words: a signed high word and an
    /// unsigned low word.
    pub const fn from_words(hi: i64, lo: u64) -> Int128 {
        Int128(((hi as i128) << 64) | lo as i128)
    }

    /// Reads a big-endian two's-complement 16-byte value.
    pub const fn from_be_bytes(bytes: [u8; 16]) -> Int128 {
        Int128(i128::from_be_bytes(bytes))
    }

    /// The big-endian two's-complement representation, as stored in the
    /// physical column format.
    pub const fn to_be_bytes(self) -> [u8; 16] {
        self.0.to_be_bytes()
    }

    /// The signed high 64-bit word.
    pub const fn high(self) -> i64 {
        (self.0 >> 64) as i64
    }

    /// The unsigned low 64-bit word.
    pub const fn low(self) -> u64 {
        self.0 as u64
    }

    pub const fn to_i128(self) -> i128 {
        self.0
    }

    /// The low 64 bits as a signed integer, truncating the high word.
    pub const fn to_i64(self) -> i64 {
        self.0 as i64
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// The smallest two's-complement width in {1, 2, 4, 8, 16} bytes that
    /// can hold this value.
    pub const fn byte_width(self) -> usize {
        let v = self.0;
        if v >= i8::MIN as i128 && v <= i8::MAX as i128 {
            1
        } else if v >= i16::MIN as i128 && v <= i16::MAX as i128 {
            2
        } else if v >= i32::MIN as i128 && v <= i32::MAX as i128 {
            4
        } else if v >= i64::MIN as i128 && v <= i64::MAX as i128 {
            8
        } else {
            16
        }
    }

    /// Whether |self| < 10^precision, i.e. the value has at most `precision`
    /// decimal digits. Precisions of 39 and above always fit: 10^39 exceeds
    /// the 128-bit range.
    ///
    /// The check is comparison-based on purpose — taking |MIN| would wrap.
    pub fn fits_in_precision(self, precision: u32) -> bool {
        let Some(limit) = POW10.get(precision as usize) else {
            return true;
        };
        self < *limit && self > -*limit
    }
}

impl From<i64> for Int128 {
    fn from(v: i64) -> Int128 {
        Int128::from_i64(v)
    }
}

impl From<u64> for Int128 {
    fn from(v: u64) -> Int128 {
        Int128::from_u64(v)
    }
}

impl From<i128> for Int128 {
    fn from(v: i128) -> Int128 {
        Int128(v)
    }
}

impl Add for Int128 {
    type Output = Int128;

    fn add(self, rhs: Int128) -> Int128 {
        Int128(self.0.wrapping_add(rhs.0))
    }
}

impl Sub for Int128 {
    type Output = Int128;

    fn sub(self, rhs: Int128) -> Int128 {
        Int128(self.0.wrapping_sub(rhs.0))
    }
}

impl Mul for Int128 {
    type Output = Int128;

    /// Truncated product: the low 128 bits of the full 256-bit result, with
    /// standard two's-complement sign semantics.
    fn mul(self, rhs: Int128) -> Int128 {
        Int128(self.0.wrapping_mul(rhs.0))
    }
}

impl Neg for Int128 {
    type Output = Int128;

    fn neg(self) -> Int128 {
        Int128(self.0.wrapping_neg())
    }
}

impl Div for Int128 {
    type Output = Int128;

    /// Truncating division toward zero.
    ///
    /// A zero divisor is a violated caller precondition and panics; callers
    /// guard before dividing.
    fn div(self, rhs: Int128) -> Int128 {
        Int128(self.0 / rhs.0)
    }
}

impl Shl<u32> for Int128 {
    type Output = Int128;

    /// Left shift; shifting by 128 or more bits yields zero.
    fn shl(self, n: u32) -> Int128 {
        if n >= 128 {
            Int128::ZERO
        } else {
            Int128(self.0 << n)
        }
    }
}
