//! # Fixed-Point Decimal
//!
//! Exact 8-place decimal arithmetic for fees, revenue shares, treasury,
//! difficulty and paysplit values.
//!
//! Values are stored as a signed count of 10^-8 units. Parsed values are
//! bounded by [`Decimal8::MAX_SUPPLY`] in magnitude. Addition and
//! subtraction are exact within that range; the operators saturate at the
//! `i128` bounds and `checked_*` / [`Decimal8::checked_sum`] report
//! overflow instead. Multiplication and integer division round half
//! away from zero at the eighth fractional digit, so `a * b` and `a / n`
//! agree byte-for-byte with their canonical 8-place string rendering.
//!
//! The canonical string form always carries exactly eight fractional digits
//! (`110.00000000`). It is the form used on the wire and inside signature
//! sources, so two nodes that compute the same value produce the same bytes.

use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;
use thiserror::Error;

/// Number of fractional digits carried by every [`Decimal8`].
pub const DECIMAL_PLACES: usize = 8;

/// Raw units per whole unit (10^8).
pub const SCALE: i128 = 100_000_000;

/// Largest magnitude, in whole units, accepted when parsing (10^18).
pub const MAX_WHOLE_UNITS: i128 = 1_000_000_000_000_000_000;

/// Errors produced while parsing or dividing decimals.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecimalError {
    /// Input string was empty.
    #[error("Empty decimal string")]
    Empty,

    /// Input string is not a plain decimal number.
    #[error("Invalid decimal: {0:?}")]
    Invalid(String),

    /// Input carries more than eight fractional digits.
    #[error("Too many fractional digits in {0:?} (max 8)")]
    TooPrecise(String),

    /// Value does not fit the fixed-point range.
    #[error("Decimal overflow")]
    Overflow,

    /// Value is larger in magnitude than [`Decimal8::MAX_SUPPLY`].
    #[error("Decimal out of range: {0:?}")]
    OutOfRange(String),

    /// Division by a zero divisor.
    #[error("Division by zero")]
    DivisionByZero,
}

/// Signed fixed-point decimal with eight fractional digits.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, SerializeDisplay, DeserializeFromStr,
)]
pub struct Decimal8(i128);

impl Decimal8 {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// One whole unit.
    pub const ONE: Self = Self(SCALE);

    /// Ceiling on the magnitude of any amount read from outside.
    pub const MAX_SUPPLY: Self = Self(MAX_WHOLE_UNITS * SCALE);

    /// Builds a value from raw 10^-8 units.
    pub const fn from_raw(raw: i128) -> Self {
        Self(raw)
    }

    /// Returns the raw 10^-8 unit count.
    pub const fn raw(self) -> i128 {
        self.0
    }

    /// Builds a value from a whole number.
    pub const fn from_int(value: i64) -> Self {
        Self(value as i128 * SCALE)
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// Sums `values`, or `None` if any partial sum overflows.
    pub fn checked_sum(values: impl IntoIterator<Item = Self>) -> Option<Self> {
        values
            .into_iter()
            .try_fold(Self::ZERO, |acc, value| acc.checked_add(value))
    }

    /// Whether the magnitude is at most [`Decimal8::MAX_SUPPLY`].
    pub fn is_within_supply(self) -> bool {
        self.0.unsigned_abs() <= Self::MAX_SUPPLY.0.unsigned_abs()
    }

    /// Multiplies two decimals, rounding the product to eight places.
    pub fn checked_mul(self, rhs: Self) -> Option<Self> {
        let product = self.0.checked_mul(rhs.0)?;
        Some(Self(div_round_half_away(product, SCALE)))
    }

    /// Divides by a positive integer, rounding the quotient to eight places.
    pub fn checked_div_int(self, divisor: u64) -> Result<Self, DecimalError> {
        if divisor == 0 {
            return Err(DecimalError::DivisionByZero);
        }
        Ok(Self(div_round_half_away(self.0, i128::from(divisor))))
    }

    /// Largest integer not greater than the value.
    pub fn floor_int(self) -> i128 {
        self.0.div_euclid(SCALE)
    }

    /// Fractional part, always in `[0, 1)`.
    pub fn fract(self) -> Self {
        Self(self.0.rem_euclid(SCALE))
    }

    /// Clamps negative values to zero.
    pub fn max_zero(self) -> Self {
        self.max(Self::ZERO)
    }
}

/// Integer division rounding half away from zero.
fn div_round_half_away(numerator: i128, denominator: i128) -> i128 {
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    if remainder.unsigned_abs() * 2 >= denominator.unsigned_abs() {
        quotient + numerator.signum() * denominator.signum()
    } else {
        quotient
    }
}

impl FromStr for Decimal8 {
    type Err = DecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DecimalError::Empty);
        }

        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        let (int_part, frac_part) = body.split_once('.').unwrap_or((body, ""));

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (int_part.is_empty() && frac_part.is_empty()) || !all_digits(int_part) || !all_digits(frac_part) {
            return Err(DecimalError::Invalid(s.to_string()));
        }
        if frac_part.len() > DECIMAL_PLACES {
            return Err(DecimalError::TooPrecise(s.to_string()));
        }

        let int_value: i128 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| DecimalError::Overflow)?
        };
        let frac_value = frac_part
            .bytes()
            .fold(0i128, |acc, b| acc * 10 + i128::from(b - b'0'))
            * 10i128.pow((DECIMAL_PLACES - frac_part.len()) as u32);

        let raw = int_value
            .checked_mul(SCALE)
            .and_then(|v| v.checked_add(frac_value))
            .ok_or(DecimalError::Overflow)?;
        if raw > Self::MAX_SUPPLY.0 {
            return Err(DecimalError::OutOfRange(s.to_string()));
        }

        Ok(Self(if negative { -raw } else { raw }))
    }
}

impl fmt::Display for Decimal8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let scale = SCALE as u128;
        write!(f, "{}{}.{:08}", sign, abs / scale, abs % scale)
    }
}

impl Add for Decimal8 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Decimal8 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Decimal8 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Decimal8 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Decimal8 {
    type Output = Self;
    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl Sum for Decimal8 {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Decimal8> for Decimal8 {
    fn sum<I: Iterator<Item = &'a Decimal8>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
