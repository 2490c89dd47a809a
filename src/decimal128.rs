//! IEEE 754-2008 128-bit decimal values.
//!
//! Values are stored in the binary integer decimal (BID) encoding, as 16 little-endian bytes,
//! the same layout the binary document model uses on the wire. Only what text generation
//! needs is provided: classification and the canonical string form. No arithmetic.
//!
//! ## String form
//!
//! Finite values render from their coefficient and exponent, never through a binary float:
//!
//! - plain notation when the exponent is `<= 0` and the adjusted exponent is `>= -6`
//!   (`"1.50"`, `"0.000123"`, `"-0"`)
//! - scientific notation otherwise (`"1E+3"`, `"1.23E-7"`)
//!
//! ```rust
//! use canonical_extjson::Decimal128;
//!
//! let d = Decimal128::from_parts(false, 150, -2).unwrap();
//! assert_eq!(d.to_string(), "1.50");
//!
//! let d = Decimal128::from_parts(true, 123, -9).unwrap();
//! assert_eq!(d.to_string(), "-1.23E-7");
//! ```

use std::fmt;

use crate::{Error, Result};

const EXPONENT_BIAS: i32 = 6176;
const MIN_EXPONENT: i32 = -6176;
const MAX_EXPONENT: i32 = 6111;
const MAX_COEFFICIENT: u128 = 9_999_999_999_999_999_999_999_999_999_999;

const SIGN_BIT: u64 = 1 << 63;
const COMBINATION_INFINITY: u64 = 0b11110;
const COMBINATION_NAN: u64 = 0b11111;
const EXPONENT_MASK: u64 = 0x3FFF;
const HIGH_COEFFICIENT_MASK: u64 = (1 << 49) - 1;

/// A 128-bit decimal floating-point value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Decimal128 {
    bytes: [u8; 16],
}

impl Decimal128 {
    pub const NAN: Decimal128 = Decimal128::from_halves(0x7C00_0000_0000_0000, 0);
    pub const INFINITY: Decimal128 = Decimal128::from_halves(0x7800_0000_0000_0000, 0);
    pub const NEG_INFINITY: Decimal128 = Decimal128::from_halves(0xF800_0000_0000_0000, 0);

    /// Wraps the 16-byte little-endian BID representation.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Decimal128 { bytes }
    }

    #[must_use]
    pub const fn bytes(&self) -> [u8; 16] {
        self.bytes
    }

    const fn from_halves(high: u64, low: u64) -> Self {
        let lo = low.to_le_bytes();
        let hi = high.to_le_bytes();
        let mut bytes = [0u8; 16];
        let mut i = 0;
        while i < 8 {
            bytes[i] = lo[i];
            bytes[i + 8] = hi[i];
            i += 1;
        }
        Decimal128 { bytes }
    }

    /// Builds a finite value equal to `(-1)^negative * coefficient * 10^exponent`.
    ///
    /// # Errors
    ///
    /// Returns an error if the coefficient has more than 34 digits or the exponent is
    /// outside `-6176..=6111`.
    pub fn from_parts(negative: bool, coefficient: u128, exponent: i32) -> Result<Self> {
        if coefficient > MAX_COEFFICIENT {
            return Err(Error::custom(format!(
                "decimal coefficient {coefficient} exceeds 34 digits"
            )));
        }
        if !(MIN_EXPONENT..=MAX_EXPONENT).contains(&exponent) {
            return Err(Error::custom(format!(
                "decimal exponent {exponent} out of range"
            )));
        }
        let biased = (exponent + EXPONENT_BIAS) as u64;
        let mut high = (biased << 49) | (coefficient >> 64) as u64;
        if negative {
            high |= SIGN_BIT;
        }
        Ok(Self::from_halves(high, coefficient as u64))
    }

    fn high(&self) -> u64 {
        let mut half = [0u8; 8];
        half.copy_from_slice(&self.bytes[8..]);
        u64::from_le_bytes(half)
    }

    fn low(&self) -> u64 {
        let mut half = [0u8; 8];
        half.copy_from_slice(&self.bytes[..8]);
        u64::from_le_bytes(half)
    }

    fn combination(&self) -> u64 {
        (self.high() >> 58) & 0x1F
    }

    #[must_use]
    pub fn is_nan(&self) -> bool {
        self.combination() == COMBINATION_NAN
    }

    #[must_use]
    pub fn is_infinite(&self) -> bool {
        self.combination() == COMBINATION_INFINITY
    }

    /// Returns `true` when the sign bit is set, including `-0` and `-Infinity`.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.high() & SIGN_BIT != 0
    }

    /// Unbiased exponent and coefficient of a finite value.
    ///
    /// Non-canonical encodings (coefficient above 34 digits, or the large-coefficient form)
    /// read as a zero coefficient.
    fn finite_parts(&self) -> (i32, u128) {
        let high = self.high();
        if (high >> 61) & 0b11 == 0b11 {
            let biased = ((high >> 47) & EXPONENT_MASK) as i32;
            return (biased - EXPONENT_BIAS, 0);
        }
        let biased = ((high >> 49) & EXPONENT_MASK) as i32;
        let coefficient = (u128::from(high & HIGH_COEFFICIENT_MASK) << 64) | u128::from(self.low());
        let coefficient = if coefficient > MAX_COEFFICIENT {
            0
        } else {
            coefficient
        };
        (biased - EXPONENT_BIAS, coefficient)
    }
}

impl From<i64> for Decimal128 {
    fn from(value: i64) -> Self {
        let biased = EXPONENT_BIAS as u64;
        let mut high = biased << 49;
        if value < 0 {
            high |= SIGN_BIT;
        }
        Self::from_halves(high, value.unsigned_abs())
    }
}

impl From<i32> for Decimal128 {
    fn from(value: i32) -> Self {
        Self::from(i64::from(value))
    }
}

impl fmt::Display for Decimal128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nan() {
            return f.write_str("NaN");
        }
        if self.is_infinite() {
            return f.write_str(if self.is_negative() {
                "-Infinity"
            } else {
                "Infinity"
            });
        }

        let (exponent, coefficient) = self.finite_parts();
        let digits = coefficient.to_string();
        let len = digits.len() as i32;
        let adjusted = exponent + len - 1;

        if self.is_negative() {
            f.write_str("-")?;
        }

        if exponent <= 0 && adjusted >= -6 {
            if exponent == 0 {
                return f.write_str(&digits);
            }
            let point = len + exponent;
            if point > 0 {
                let (int_part, frac_part) = digits.split_at(point as usize);
                write!(f, "{int_part}.{frac_part}")
            } else {
                f.write_str("0.")?;
                for _ in 0..-point {
                    f.write_str("0")?;
                }
                f.write_str(&digits)
            }
        } else {
            let (lead, rest) = digits.split_at(1);
            f.write_str(lead)?;
            if !rest.is_empty() {
                write!(f, ".{rest}")?;
            }
            write!(f, "E{}{adjusted}", if adjusted >= 0 { "+" } else { "" })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(negative: bool, coefficient: u128, exponent: i32) -> String {
        Decimal128::from_parts(negative, coefficient, exponent)
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_special_values() {
        assert!(Decimal128::NAN.is_nan());
        assert!(!Decimal128::NAN.is_infinite());
        assert!(Decimal128::INFINITY.is_infinite());
        assert!(!Decimal128::INFINITY.is_negative());
        assert!(Decimal128::NEG_INFINITY.is_negative());
        assert_eq!(Decimal128::NAN.to_string(), "NaN");
        assert_eq!(Decimal128::INFINITY.to_string(), "Infinity");
        assert_eq!(Decimal128::NEG_INFINITY.to_string(), "-Infinity");
    }

    #[test]
    fn test_plain_notation() {
        assert_eq!(dec(false, 0, 0), "0");
        assert_eq!(dec(true, 0, 0), "-0");
        assert_eq!(dec(false, 1, 0), "1");
        assert_eq!(dec(false, 150, -2), "1.50");
        assert_eq!(dec(false, 123, -6), "0.000123");
        assert_eq!(dec(false, 1, -6), "0.000001");
        assert_eq!(dec(false, 0, -2), "0.00");
    }

    #[test]
    fn test_scientific_notation() {
        assert_eq!(dec(false, 1, 3), "1E+3");
        assert_eq!(dec(false, 1, -7), "1E-7");
        assert_eq!(dec(false, 123, -9), "1.23E-7");
        assert_eq!(dec(false, 0, 6111), "0E+6111");
        assert_eq!(dec(true, 12345, 1), "-1.2345E+5");
    }

    #[test]
    fn test_max_coefficient() {
        assert_eq!(
            dec(false, MAX_COEFFICIENT, 0),
            "9999999999999999999999999999999999"
        );
        assert!(Decimal128::from_parts(false, MAX_COEFFICIENT + 1, 0).is_err());
        assert!(Decimal128::from_parts(false, 1, 6112).is_err());
    }

    #[test]
    fn test_from_integers() {
        assert_eq!(Decimal128::from(-42i64).to_string(), "-42");
        assert_eq!(Decimal128::from(i64::MIN).to_string(), "-9223372036854775808");
        assert_eq!(Decimal128::from(7i32).to_string(), "7");
    }

    #[test]
    fn test_bytes_layout_is_little_endian() {
        // 1 with exponent 0: 0x3040000000000000 0000000000000001
        let one = Decimal128::from(1i64);
        let bytes = one.bytes();
        assert_eq!(bytes[0], 0x01);
        assert_eq!(bytes[15], 0x30);
        assert_eq!(bytes[14], 0x40);
        assert_eq!(Decimal128::from_bytes(bytes), one);
    }

    #[test]
    fn test_non_canonical_coefficient_reads_as_zero() {
        let d = Decimal128::from_halves(0x3041_ED09_BEAD_87C0, 0x378D_8E64_0000_0000);
        assert_eq!(d.to_string(), "0");
        let large_form = Decimal128::from_halves(0x6C10_0000_0000_0000, 0);
        assert_eq!(large_form.to_string(), "0");
    }
}
