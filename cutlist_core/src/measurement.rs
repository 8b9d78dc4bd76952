//! # Measurements
//!
//! Inch measurements that carry both the decimal value used for arithmetic
//! and the shop-floor text a woodworker reads off a tape measure.
//!
//! ## Fraction Rendering
//!
//! Values are rounded to the nearest 1, 1/2, 1/4, 1/8 or 1/16 of an inch.
//! Denominators are scanned coarse to fine and a finer one only wins when it
//! is strictly closer, so exact halves stay `1/2` and never become `8/16`.
//!
//! ## Example
//!
//! ```rust
//! use cutlist_core::measurement::{nearest_fraction, Measurement};
//!
//! assert_eq!(nearest_fraction(2.375), "2 3/8");
//!
//! let width = Measurement::new(12.4375);
//! let opening = &width - 4.5;
//! assert_eq!(opening.text(), "7 15/16");
//! assert_eq!(opening.to_string(), "7 15/16\"");
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Denominators considered when rounding, in scan order.
pub const ALLOWED_DENOMINATORS: [u32; 5] = [1, 2, 4, 8, 16];

// ============================================================================
// Fraction Rounding
// ============================================================================

/// A non-negative value rounded onto the sixteenth-inch grid.
///
/// The numerator is an integral `f64` so any finite length keeps its full
/// magnitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fraction {
    pub numerator: f64,
    pub denominator: u32,
}

impl Fraction {
    /// Find the closest fraction to `decimal` among [`ALLOWED_DENOMINATORS`].
    ///
    /// Ties go to the denominator scanned first.
    pub fn nearest(decimal: f64) -> Self {
        let mut best = Fraction {
            numerator: 0.0,
            denominator: 1,
        };
        let mut min_difference = f64::INFINITY;

        for denominator in ALLOWED_DENOMINATORS {
            let d = f64::from(denominator);
            let numerator = (decimal * d).round();
            let difference = (numerator / d - decimal).abs();

            if difference < min_difference {
                best = Fraction { numerator, denominator };
                min_difference = difference;
            }
        }

        best
    }

    /// Whole-inch part (floor of numerator / denominator)
    pub fn whole(&self) -> f64 {
        (self.numerator / f64::from(self.denominator)).floor()
    }

    /// Numerator left over after removing whole inches
    pub fn remainder(&self) -> f64 {
        self.numerator - self.whole() * f64::from(self.denominator)
    }

    pub fn is_zero(&self) -> bool {
        self.numerator == 0.0
    }

    pub fn value(&self) -> f64 {
        self.numerator / f64::from(self.denominator)
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.whole();
        let remainder = self.remainder();

        if remainder == 0.0 {
            write!(f, "{}", whole)
        } else if whole == 0.0 {
            write!(f, "{}/{}", remainder, self.denominator)
        } else {
            write!(f, "{} {}/{}", whole, remainder, self.denominator)
        }
    }
}

/// Render a decimal inch value as the nearest shop fraction.
///
/// Negative values render as a minus sign in front of the rendering of their
/// magnitude. Anything that rounds to zero renders as `"0"`.
///
/// ```rust
/// use cutlist_core::measurement::nearest_fraction;
///
/// assert_eq!(nearest_fraction(0.5), "1/2");
/// assert_eq!(nearest_fraction(3.0), "3");
/// assert_eq!(nearest_fraction(-1.5), "-1 1/2");
/// ```
pub fn nearest_fraction(decimal: f64) -> String {
    if !decimal.is_finite() {
        return decimal.to_string();
    }

    let fraction = Fraction::nearest(decimal.abs());
    if decimal < 0.0 && !fraction.is_zero() {
        format!("-{}", fraction)
    } else {
        fraction.to_string()
    }
}

/// Parse shop measurement text back into decimal inches.
///
/// Accepts `3`, `2.25`, `3/8`, `2 3/8`, a leading `-`, and an optional
/// trailing inch mark.
///
/// ```rust
/// use cutlist_core::measurement::parse_fraction;
///
/// assert_eq!(parse_fraction("2 3/8\"").unwrap(), 2.375);
/// assert_eq!(parse_fraction("-3/4").unwrap(), -0.75);
/// assert!(parse_fraction("1/0").is_err());
/// ```
pub fn parse_fraction(text: &str) -> CalcResult<f64> {
    let trimmed = text.trim();
    let trimmed = trimmed.strip_suffix('"').unwrap_or(trimmed).trim_end();
    if trimmed.is_empty() {
        return Err(CalcError::parse_error(text, "Measurement is empty"));
    }

    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, trimmed),
    };

    let mut parts = body.split_whitespace();
    let first = parts
        .next()
        .ok_or_else(|| CalcError::parse_error(text, "Measurement is empty"))?;
    let second = parts.next();
    if parts.next().is_some() {
        return Err(CalcError::parse_error(
            text,
            "Expected a whole number, a fraction, or a whole number followed by a fraction",
        ));
    }

    let magnitude = match second {
        None if first.contains('/') => parse_ratio(text, first)?,
        None => parse_unsigned(text, first)?,
        Some(fraction) => {
            if first.contains('/') || !fraction.contains('/') {
                return Err(CalcError::parse_error(
                    text,
                    "Mixed numbers are written whole part first, e.g. 2 3/8",
                ));
            }
            parse_unsigned(text, first)? + parse_ratio(text, fraction)?
        }
    };

    Ok(if negative { -magnitude } else { magnitude })
}

fn parse_unsigned(input: &str, token: &str) -> CalcResult<f64> {
    if token.starts_with(['+', '-']) {
        return Err(CalcError::parse_error(input, "Sign is only allowed at the start"));
    }
    let value: f64 = token
        .parse()
        .map_err(|_| CalcError::parse_error(input, format!("'{}' is not a number", token)))?;
    if !value.is_finite() {
        return Err(CalcError::parse_error(input, "Measurement must be finite"));
    }
    Ok(value)
}

fn parse_ratio(input: &str, token: &str) -> CalcResult<f64> {
    let (numerator, denominator) = token
        .split_once('/')
        .ok_or_else(|| CalcError::parse_error(input, "Fraction is missing '/'"))?;
    let numerator = parse_unsigned(input, numerator)?;
    let denominator = parse_unsigned(input, denominator)?;
    if denominator == 0.0 {
        return Err(CalcError::parse_error(input, "Denominator cannot be zero"));
    }
    Ok(numerator / denominator)
}

// ============================================================================
// Measurement
// ============================================================================

/// A length in inches together with its nearest-fraction text.
///
/// Comparisons use the decimal value only. Every arithmetic result is a new
/// measurement with freshly rounded text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "MeasurementRepr")]
pub struct Measurement {
    decimal: f64,
    text: String,
}

/// Accepted JSON shapes: `2.25` or `{ "decimal": 2.25, "text": "..." }`.
/// Incoming text is ignored and recomputed.
#[derive(Deserialize)]
#[serde(untagged)]
enum MeasurementRepr {
    Number(f64),
    Full {
        decimal: f64,
        #[allow(dead_code)]
        #[serde(default)]
        text: Option<String>,
    },
}

impl From<MeasurementRepr> for Measurement {
    fn from(repr: MeasurementRepr) -> Self {
        match repr {
            MeasurementRepr::Number(decimal) | MeasurementRepr::Full { decimal, .. } => Measurement::new(decimal),
        }
    }
}

impl Measurement {
    pub fn new(decimal: f64) -> Self {
        Measurement {
            decimal,
            text: nearest_fraction(decimal),
        }
    }

    /// Parse shop text such as `2 1/4"` into a measurement.
    pub fn parse(text: &str) -> CalcResult<Self> {
        parse_fraction(text).map(Measurement::new)
    }

    /// Raw value in inches
    pub fn decimal(&self) -> f64 {
        self.decimal
    }

    /// Nearest-fraction text without the inch mark
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_negative(&self) -> bool {
        self.decimal < 0.0
    }
}

impl Default for Measurement {
    fn default() -> Self {
        Measurement::new(0.0)
    }
}

impl From<f64> for Measurement {
    fn from(decimal: f64) -> Self {
        Measurement::new(decimal)
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\"", self.text)
    }
}

impl PartialEq for Measurement {
    fn eq(&self, other: &Self) -> bool {
        self.decimal == other.decimal
    }
}

impl PartialOrd for Measurement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.decimal.partial_cmp(&other.decimal)
    }
}

// ============================================================================
// Arithmetic Implementations (macros to reduce boilerplate)
// ============================================================================

macro_rules! impl_measurement_ops {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait for Measurement {
            type Output = Measurement;
            fn $method(self, rhs: Measurement) -> Self::Output {
                Measurement::new(self.decimal $op rhs.decimal)
            }
        }

        impl $trait<&Measurement> for &Measurement {
            type Output = Measurement;
            fn $method(self, rhs: &Measurement) -> Self::Output {
                Measurement::new(self.decimal $op rhs.decimal)
            }
        }
    };
}

macro_rules! impl_scalar_ops {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait<f64> for Measurement {
            type Output = Measurement;
            fn $method(self, rhs: f64) -> Self::Output {
                Measurement::new(self.decimal $op rhs)
            }
        }

        impl $trait<f64> for &Measurement {
            type Output = Measurement;
            fn $method(self, rhs: f64) -> Self::Output {
                Measurement::new(self.decimal $op rhs)
            }
        }
    };
}

impl_measurement_ops!(Add, add, +);
impl_measurement_ops!(Sub, sub, -);
impl_scalar_ops!(Add, add, +);
impl_scalar_ops!(Sub, sub, -);
impl_scalar_ops!(Mul, mul, *);
impl_scalar_ops!(Div, div, /);
