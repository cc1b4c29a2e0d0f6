//! Two-decimal fixed-point values for rendered indicators.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Beyond this many hundredths an `f64` no longer fits an `i64`.
const MAX_HUNDREDTHS: f64 = 9.0e18;

/// A decimal rounded to two places, stored as an exact count of hundredths.
///
/// Displays and serializes as a fixed two-decimal string (`"12.30"`, `"-0.05"`),
/// so a computed zero (`"0.00"`) is never confused with an absent value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed2(i64);

impl Fixed2 {
    pub const ZERO: Fixed2 = Fixed2(0);

    pub fn from_hundredths(hundredths: i64) -> Self {
        Self(hundredths)
    }

    /// Rounds half away from zero. Returns `None` for NaN, infinities and
    /// magnitudes that cannot be represented.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let scaled = (value * 100.0).round();
        if scaled.abs() >= MAX_HUNDREDTHS {
            return None;
        }
        Some(Self(scaled as i64))
    }

    pub fn hundredths(self) -> i64 {
        self.0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for Fixed2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, magnitude / 100, magnitude % 100)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFixed2Error(String);

impl fmt::Display for ParseFixed2Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid two-decimal value: {}", self.0)
    }
}

impl std::error::Error for ParseFixed2Error {}

impl FromStr for Fixed2 {
    type Err = ParseFixed2Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseFixed2Error(s.to_string());
        let trimmed = s.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
        if whole.is_empty()
            || fraction.len() > 2
            || !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let whole: i64 = whole.parse().map_err(|_| invalid())?;
        let fraction: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };
        let magnitude = whole
            .checked_mul(100)
            .and_then(|w| w.checked_add(fraction))
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -magnitude } else { magnitude }))
    }
}

impl Serialize for Fixed2 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Fixed2 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}
