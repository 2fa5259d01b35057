//! Power-of-ten rescaling between decimal scales.

use crate::Int128;
use thiserror::Error;

/// 10^0 ..= 10^38; 10^38 is the largest power of ten representable in a
/// 128-bit signed integer.
pub const POW10: [Int128; 39] = {
    let mut table = [Int128::ZERO; 39];
    let mut v: i128 = 1;
    let mut i = 0;
    while i < table.len() {
        table[i] = Int128::from_i128(v);
        if i + 1 < table.len() {
            v *= 10;
        }
        i += 1;
    }
    table
};

/// The rescaled value is not representable in 128 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("rescaling {value} from scale {from_scale} to scale {to_scale} overflows 128 bits")]
pub struct RescaleError {
    pub value: Int128,
    pub from_scale: i32,
    pub to_scale: i32,
}

impl Int128 {
    /// Moves a fixed-point value from one decimal scale to another.
    ///
    /// Widening the scale multiplies by a power of ten and fails if the
    /// result exceeds 128 bits; narrowing divides, truncating toward zero,
    /// and never fails. Rescaling to the same scale is the identity.
    pub fn rescale(self, from_scale: i32, to_scale: i32) -> Result<Int128, RescaleError> {
        let overflow = RescaleError {
            value: self,
            from_scale,
            to_scale,
        };
        let diff = to_scale - from_scale;
        if diff == 0 || self == Int128::ZERO {
            return Ok(self);
        }
        if diff > 0 {
            let factor = POW10.get(diff as usize).ok_or(overflow)?;
            self.to_i128()
                .checked_mul(factor.to_i128())
                .map(Int128::from_i128)
                .ok_or(overflow)
        } else {
            // A narrowing shift past every digit truncates to zero.
            match POW10.get((-diff) as usize) {
                Some(divisor) => Ok(self / *divisor),
                None => Ok(Int128::ZERO),
            }
        }
    }
}
