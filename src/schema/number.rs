//! Exact comparison of plain numeric text
//!
//! Data numbers are unsigned `digits` or `digits.digits` of any length. They
//! are never converted to a fixed-precision type; comparisons against the
//! `Decimal` bounds of a schema are done digit by digit.

use std::cmp::Ordering;

use rust_decimal::Decimal;

/// An unsigned number in normalized digit form.
///
/// `whole` has no leading zeros and `fraction` no trailing zeros, so zero is
/// two empty strings and `2`, `2.0` and `02.00` are equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlainNumber {
    whole: String,
    fraction: String,
}

impl PlainNumber {
    fn new(whole: &str, fraction: &str) -> Self {
        Self {
            whole: whole.trim_start_matches('0').to_string(),
            fraction: fraction.trim_end_matches('0').to_string(),
        }
    }

    /// Parses `digits` or `digits.digits`, ASCII only
    pub(crate) fn parse(text: &str) -> Option<Self> {
        match text.split_once('.') {
            Some((whole, fraction)) if is_digits(whole) && is_digits(fraction) => {
                Some(Self::new(whole, fraction))
            }
            None if is_digits(text) => Some(Self::new(text, "")),
            _ => None,
        }
    }

    /// Splits a decimal into its sign and magnitude
    fn from_decimal(value: &Decimal) -> (bool, Self) {
        let digits = value.mantissa().unsigned_abs().to_string();
        let scale = value.scale() as usize;
        let padded = if digits.len() <= scale {
            format!("{}{}", "0".repeat(scale + 1 - digits.len()), digits)
        } else {
            digits
        };
        let split = padded.len() - scale;
        (
            value.is_sign_negative(),
            Self::new(&padded[..split], &padded[split..]),
        )
    }

    fn is_zero(&self) -> bool {
        self.whole.is_empty() && self.fraction.is_empty()
    }

    /// Compares against a schema bound without losing precision
    pub(crate) fn cmp_decimal(&self, bound: &Decimal) -> Ordering {
        let (negative, magnitude) = Self::from_decimal(bound);
        if negative && !magnitude.is_zero() {
            return Ordering::Greater;
        }
        self.cmp(&magnitude)
    }
}

impl Ord for PlainNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        self.whole
            .len()
            .cmp(&other.whole.len())
            .then_with(|| self.whole.cmp(&other.whole))
            .then_with(|| self.fraction.cmp(&other.fraction))
    }
}

impl PartialOrd for PlainNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
