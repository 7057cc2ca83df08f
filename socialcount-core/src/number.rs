//! Count text normalization.
//!
//! Platforms render counts as `1,234`, `2.5K`, `3M`, `1B`, or `2.2K+`.
//! [`parse_count`] turns any of these into an integer:
//!
//! 1. Trim, then drop commas and whitespace (including non-breaking spaces).
//! 2. Drop one trailing `+` (an "at least" marker).
//! 3. A trailing `K`, `M`, or `B` (any case) multiplies by 1e3, 1e6, 1e9.
//! 4. Fractional results are truncated, or rounded up under
//!    [`RoundingPolicy::Ceiling`].
//!
//! Arithmetic is exact: `2.251K` is 2251, never 2250.999....

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, ParseErrorKind};

/// How fractional results are turned into whole counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoundingPolicy {
    /// Drop any fractional remainder.
    #[default]
    Truncate,
    /// Round any fractional remainder up. Used when the platform displays
    /// an approximate lower bound.
    Ceiling,
}

/// Fraction digits that can still contribute to a whole count.
const MAX_FRACTION_DIGITS: usize = 9;

/// Parses count text with the default truncating policy.
pub fn parse(text: &str) -> Result<u64, ParseError> {
    parse_count(text, RoundingPolicy::Truncate)
}

/// Parses count text, rounding any fractional remainder up.
pub fn parse_ceiling(text: &str) -> Result<u64, ParseError> {
    parse_count(text, RoundingPolicy::Ceiling)
}

/// Parses count text under the given rounding policy.
pub fn parse_count(text: &str, policy: RoundingPolicy) -> Result<u64, ParseError> {
    let fail = |kind| ParseError::new(text, kind);

    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    let cleaned = cleaned.strip_suffix('+').unwrap_or(&cleaned);

    let (number, multiplier) = split_suffix(cleaned);

    if number.is_empty() {
        return Err(fail(ParseErrorKind::Empty));
    }
    if number.starts_with('-') {
        return Err(fail(ParseErrorKind::Negative));
    }

    let (int_part, frac_part) = match number.split_once('.') {
        Some((i, f)) => (i, f),
        None => (number, ""),
    };

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) || !all_digits(frac_part) || (int_part.is_empty() && frac_part.is_empty())
    {
        return Err(fail(ParseErrorKind::InvalidNumber));
    }

    // Digits past the ninth decimal cannot reach the integer part, even
    // under a `B` multiplier; they only matter for rounding up.
    let frac_part = frac_part.trim_end_matches('0');
    let (frac_part, frac_rest) = frac_part.split_at(frac_part.len().min(MAX_FRACTION_DIGITS));
    let has_rest = !frac_rest.is_empty();

    // value = (int_part.frac_part) * multiplier = digits * multiplier / 10^frac_len
    let digits = int_part
        .bytes()
        .chain(frac_part.bytes())
        .try_fold(0u128, |acc, b| {
            acc.checked_mul(10)?.checked_add(u128::from(b - b'0'))
        })
        .ok_or_else(|| fail(ParseErrorKind::Overflow))?;

    let scale = frac_part.bytes().fold(1u128, |scale, _| scale * 10);

    let scaled = digits
        .checked_mul(multiplier)
        .ok_or_else(|| fail(ParseErrorKind::Overflow))?;

    let mut whole = scaled / scale;
    if policy == RoundingPolicy::Ceiling && (scaled % scale != 0 || has_rest) {
        whole += 1;
    }

    u64::try_from(whole).map_err(|_| fail(ParseErrorKind::Overflow))
}

/// Splits a trailing magnitude suffix off, returning the multiplier.
fn split_suffix(s: &str) -> (&str, u128) {
    let multiplier = match s.chars().last() {
        Some('k' | 'K') => 1_000,
        Some('m' | 'M') => 1_000_000,
        Some('b' | 'B') => 1_000_000_000,
        _ => return (s, 1),
    };
    (&s[..s.len() - 1], multiplier)
}

// ============================================================================
// Tests
// ============================================================================
