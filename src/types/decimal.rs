//! # Exact Decimal Values
//!
//! [`Decimal`] stores an exact decimal number as 128-bit unscaled digits
//! plus a scale: the represented value is `digits / 10^scale`. A scale of
//! zero is a plain integer.
//!
//! Conversions out of a decimal truncate toward zero ([`Decimal::trunc_i64`])
//! or round through binary floating point ([`Decimal::to_f64`]); neither
//! reports overflow, matching the rest of the numeric tower.

use eyre::{ensure, eyre, Report};
use std::fmt;
use std::str::FromStr;

/// Maximum scale accepted from a parsed literal. 10^38 is the last power of
/// ten representable in an i128, so the unscaled digits cap here anyway.
const MAX_SCALE: i16 = 38;

/// Exact decimal: unscaled 128-bit digits and a base-10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Decimal {
    digits: i128,
    scale: i16,
}

impl Decimal {
    pub fn new(digits: i128, scale: i16) -> Self {
        Self { digits, scale }
    }

    pub fn from_i64(value: i64) -> Self {
        Self {
            digits: value as i128,
            scale: 0,
        }
    }

    /// Returns the unscaled digits.
    pub fn digits(self) -> i128 {
        self.digits
    }

    /// Returns the scale (number of decimal places).
    pub fn scale(self) -> i16 {
        self.scale
    }

    /// Truncates toward zero to a 64-bit integer. The integer part is
    /// narrowed with `as`, so values beyond the i64 range wrap.
    pub fn trunc_i64(self) -> i64 {
        if self.scale <= 0 {
            self.digits as i64
        } else {
            match 10i128.checked_pow(self.scale as u32) {
                Some(divisor) => (self.digits / divisor) as i64,
                // 10^39 overflows i128, so |digits| < 10^scale and the
                // value is entirely fractional.
                None => 0,
            }
        }
    }

    /// Nearest binary floating point value.
    pub fn to_f64(self) -> f64 {
        self.digits as f64 / 10f64.powi(self.scale as i32)
    }
}

impl FromStr for Decimal {
    type Err = Report;

    fn from_str(s: &str) -> Result<Self, Report> {
        let t = s.trim();
        let (negative, t) = match t.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, t.strip_prefix('+').unwrap_or(t)),
        };
        let (int_part, frac_part) = match t.split_once('.') {
            Some((i, f)) => (i, f),
            None => (t, ""),
        };
        ensure!(
            !int_part.is_empty() || !frac_part.is_empty(),
            "empty decimal literal {:?}",
            s
        );
        ensure!(
            int_part.chars().all(|c| c.is_ascii_digit())
                && frac_part.chars().all(|c| c.is_ascii_digit()),
            "invalid decimal literal {:?}",
            s
        );
        ensure!(
            frac_part.len() <= MAX_SCALE as usize,
            "decimal literal {:?} exceeds maximum scale {}",
            s,
            MAX_SCALE
        );

        let mut digits: i128 = 0;
        for c in int_part.chars().chain(frac_part.chars()) {
            digits = digits
                .checked_mul(10)
                .and_then(|d| d.checked_add((c as u8 - b'0') as i128))
                .ok_or_else(|| eyre!("decimal literal {:?} overflows 128-bit precision", s))?;
        }
        if negative {
            digits = -digits;
        }
        Ok(Decimal {
            digits,
            scale: frac_part.len() as i16,
        })
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scale <= 0 {
            write!(f, "{}", self.digits)
        } else {
            let sign = if self.digits < 0 { "-" } else { "" };
            let width = self.scale as usize;
            match 10i128.checked_pow(self.scale as u32) {
                Some(divisor) => {
                    let int_part = (self.digits / divisor).abs();
                    let frac_part = (self.digits % divisor).abs();
                    write!(f, "{}{}.{:0>width$}", sign, int_part, frac_part)
                }
                // Scale exceeds the digit capacity of an i128: every
                // digit sits to the right of the point.
                None => write!(f, "{}0.{:0>width$}", sign, self.digits.unsigned_abs()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_integer() {
        let d: Decimal = "42".parse().unwrap();
        assert_eq!(d.digits(), 42);
        assert_eq!(d.scale(), 0);
    }

    #[test]
    fn parses_fraction_and_sign() {
        let d: Decimal = "-12.345".parse().unwrap();
        assert_eq!(d.digits(), -12345);
        assert_eq!(d.scale(), 3);

        let d: Decimal = "+0.05".parse().unwrap();
        assert_eq!(d.digits(), 5);
        assert_eq!(d.scale(), 2);
    }

    #[test]
    fn rejects_garbage_literals() {
        assert!("".parse::<Decimal>().is_err());
        assert!(".".parse::<Decimal>().is_err());
        assert!("12a.3".parse::<Decimal>().is_err());
        assert!("1e5".parse::<Decimal>().is_err());
    }

    #[test]
    fn rejects_overflowing_literal() {
        let too_long = "9".repeat(40);
        let err = too_long.parse::<Decimal>().unwrap_err();
        assert!(err.to_string().contains("128-bit"));
    }

    #[test]
    fn display_keeps_sign_below_one() {
        assert_eq!(Decimal::new(-5, 2).to_string(), "-0.05");
        assert_eq!(Decimal::new(12345, 3).to_string(), "12.345");
        assert_eq!(Decimal::new(7, 0).to_string(), "7");
    }

    #[test]
    fn display_round_trips_through_parse() {
        for s in ["0.001", "-98765.4321", "100", "-1"] {
            let d: Decimal = s.parse().unwrap();
            assert_eq!(d.to_string(), s);
        }
    }

    #[test]
    fn truncation_is_toward_zero() {
        assert_eq!(Decimal::new(1999, 3).trunc_i64(), 1);
        assert_eq!(Decimal::new(-1999, 3).trunc_i64(), -1);
        assert_eq!(Decimal::from_i64(-7).trunc_i64(), -7);
    }

    #[test]
    fn scale_beyond_i128_digits_is_pure_fraction() {
        assert_eq!(Decimal::new(1, 40).trunc_i64(), 0);
        assert_eq!(Decimal::new(i128::MAX, 39).trunc_i64(), 0);
        assert_eq!(Decimal::new(-1, 100).trunc_i64(), 0);

        let expected = format!("0.{}5", "0".repeat(39));
        assert_eq!(Decimal::new(5, 40).to_string(), expected);
        assert_eq!(Decimal::new(-5, 40).to_string(), format!("-{expected}"));
    }

    #[test]
    fn to_f64_divides_by_scale() {
        assert_eq!(Decimal::new(12345, 2).to_f64(), 123.45);
        assert_eq!(Decimal::new(-5, 1).to_f64(), -0.5);
    }
}
