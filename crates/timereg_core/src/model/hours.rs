//! Decimal hour durations.
//!
//! # Responsibility
//! - Parse caller-supplied decimal text (`"8"`, `"7.5"`, `".25"`) into hours.
//! - Keep every digit the caller wrote; no binary floating point.
//!
//! # Invariants
//! - The wrapped decimal is normalized: no trailing zeros, no negative zero.
//!   `"8.0"` and `"8"` are the same value and render as `8`.
//! - Sign and magnitude are not validated here.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

static DECIMAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<sign>[+-]?)(?P<int>\d*)(?:\.(?P<frac>\d*))?(?:[eE](?P<exp>[+-]?\d{1,3}))?$")
        .expect("valid decimal regex")
});

// rust_decimal holds at most 28 fractional digits.
const MAX_EXPONENT: i32 = 28;

/// Error returned when hour text cannot be turned into [`Hours`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoursParseError {
    /// Input was empty after trimming.
    Empty,
    /// Input is not a decimal number.
    NotDecimal(String),
    /// Input has more digits or magnitude than a 96-bit decimal holds.
    OutOfRange(String),
}

impl Display for HoursParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "duration must not be empty"),
            Self::NotDecimal(value) => {
                write!(f, "duration `{value}` is not a decimal number of hours")
            }
            Self::OutOfRange(value) => write!(
                f,
                "duration `{value}` cannot be stored without losing digits"
            ),
        }
    }
}

impl Error for HoursParseError {}

/// Duration in decimal hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "Decimal", into = "Decimal")]
pub struct Hours(Decimal);

impl Hours {
    pub fn new(value: Decimal) -> Self {
        Self(value.normalize())
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    /// Absolute difference, `None` when it overflows.
    pub fn abs_diff(self, other: Hours) -> Option<Decimal> {
        self.0.checked_sub(other.0).map(|diff| diff.abs())
    }

    pub fn is_negative(self) -> bool {
        self.0.is_sign_negative()
    }
}

impl FromStr for Hours {
    type Err = HoursParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(HoursParseError::Empty);
        }
        let not_decimal = || HoursParseError::NotDecimal(trimmed.to_string());
        let out_of_range = || HoursParseError::OutOfRange(trimmed.to_string());

        let caps = DECIMAL_RE.captures(trimmed).ok_or_else(not_decimal)?;
        let group = |name: &str| caps.name(name).map_or("", |m| m.as_str());
        let (int, frac) = (group("int"), group("frac"));
        if int.is_empty() && frac.is_empty() {
            return Err(not_decimal());
        }

        let sign = if group("sign") == "-" { "-" } else { "" };
        let int = if int.is_empty() { "0" } else { int };
        let mantissa = if frac.is_empty() {
            format!("{sign}{int}")
        } else {
            format!("{sign}{int}.{frac}")
        };

        let parsed = match caps.name("exp") {
            None => Decimal::from_str_exact(&mantissa),
            Some(exp) => {
                let exp: i32 = exp.as_str().parse().map_err(|_| not_decimal())?;
                if exp.abs() > MAX_EXPONENT {
                    return Err(out_of_range());
                }
                Decimal::from_scientific(&format!("{mantissa}e{exp}"))
            }
        };
        parsed.map(Self::new).map_err(|_| out_of_range())
    }
}

impl From<Decimal> for Hours {
    fn from(value: Decimal) -> Self {
        Self::new(value)
    }
}

impl From<Hours> for Decimal {
    fn from(value: Hours) -> Self {
        value.0
    }
}

impl Display for Hours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
