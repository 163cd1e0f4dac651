use std::fmt;

use crate::{Error, Result};

const SIGN_MASK: u32 = 0x8000_0000;
const SCALE_SHIFT: u32 = 16;
pub const MAX_SCALE: u32 = 28;
pub const MAX_MANTISSA: u128 = (1 << 96) - 1;

/// 128-bit fixed-point decimal: a 96-bit unsigned mantissa, a sign and a
/// power-of-ten scale in `0..=28`. The value is `(-1)^sign * mantissa / 10^scale`.
///
/// Field order matches the wire representation: `flags, hi, lo, mid`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Decimal {
    flags: u32,
    hi: u32,
    lo: u32,
    mid: u32,
}

impl Decimal {
    pub const ZERO: Decimal = Decimal {
        flags: 0,
        hi: 0,
        lo: 0,
        mid: 0,
    };

    pub fn new(mantissa: i128, scale: u32) -> Result<Self> {
        let magnitude = mantissa.unsigned_abs();
        if magnitude > MAX_MANTISSA {
            return Err(Error::DecimalOutOfRange { mantissa, scale });
        }
        Self::from_parts(
            magnitude as u32,
            (magnitude >> 32) as u32,
            (magnitude >> 64) as u32,
            mantissa < 0,
            scale,
        )
    }

    /// Builds a decimal from the three 32-bit mantissa limbs. A zero
    /// mantissa is never negative.
    pub fn from_parts(lo: u32, mid: u32, hi: u32, negative: bool, scale: u32) -> Result<Self> {
        if scale > MAX_SCALE {
            let mantissa = ((hi as i128) << 64) | ((mid as i128) << 32) | lo as i128;
            return Err(Error::DecimalOutOfRange {
                mantissa: if negative { -mantissa } else { mantissa },
                scale,
            });
        }
        let is_zero = lo == 0 && mid == 0 && hi == 0;
        let sign = if negative && !is_zero { SIGN_MASK } else { 0 };
        Ok(Self {
            flags: sign | (scale << SCALE_SHIFT),
            hi,
            lo,
            mid,
        })
    }

    pub fn scale(&self) -> u32 {
        (self.flags >> SCALE_SHIFT) & 0xFF
    }

    pub fn is_negative(&self) -> bool {
        self.flags & SIGN_MASK != 0
    }

    pub fn mantissa(&self) -> i128 {
        let magnitude =
            ((self.hi as i128) << 64) | ((self.mid as i128) << 32) | self.lo as i128;
        if self.is_negative() {
            -magnitude
        } else {
            magnitude
        }
    }

    /// The 16-byte representation written to the stream.
    pub fn to_bytes(&self) -> [u8; 16] {
        let mut bytes = [0u8; 16];
        for (dst, field) in bytes
            .chunks_exact_mut(4)
            .zip([self.flags, self.hi, self.lo, self.mid])
        {
            dst.copy_from_slice(&field.to_be_bytes());
        }
        bytes
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.mantissa().unsigned_abs().to_string();
        let scale = self.scale() as usize;
        let sign = if self.is_negative() { "-" } else { "" };

        if scale == 0 {
            return write!(f, "{sign}{digits}");
        }

        let digits = format!("{digits:0>width$}", width = scale + 1);
        let (int, frac) = digits.split_at(digits.len() - scale);
        write!(f, "{sign}{int}.{frac}")
    }
}
