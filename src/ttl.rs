//! TTL Parsing
//!
//! Parses human-readable durations such as `300ms`, `5m` or `1h30m` for the
//! HTTP and shell front ends. A duration is a sequence of decimal numbers,
//! each with an optional fraction and a mandatory unit (`ns`, `us`/`µs`,
//! `ms`, `s`, `m`, `h`). A bare `0` is accepted without a unit.

use std::time::Duration;

use thiserror::Error;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SECOND: u128 = 1_000_000_000;

/// Fraction digits beyond this cannot change a nanosecond result.
const MAX_FRACTION_DIGITS: usize = 18;

// == TTL Error ==
/// Reasons a TTL string is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TtlError {
    #[error("duration is empty")]
    Empty,

    #[error("duration `{0}` is negative")]
    Negative(String),

    #[error("duration `{0}` is malformed")]
    Malformed(String),

    #[error("duration `{0}` is missing a unit")]
    MissingUnit(String),

    #[error("unknown unit `{unit}` in duration `{input}`")]
    UnknownUnit { unit: String, input: String },

    #[error("duration `{0}` is out of range")]
    OutOfRange(String),
}

// == Parse ==
/// Parses a human-readable, non-negative duration.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use mini_cache::ttl::parse_ttl;
///
/// assert_eq!(parse_ttl("5m").unwrap(), Duration::from_secs(300));
/// assert_eq!(parse_ttl("1.5s").unwrap(), Duration::from_millis(1500));
/// ```
pub fn parse_ttl(input: &str) -> Result<Duration, TtlError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TtlError::Empty);
    }
    if trimmed.starts_with('-') {
        return Err(TtlError::Negative(trimmed.to_string()));
    }

    let mut rest = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(TtlError::Malformed(trimmed.to_string()));
    }

    let out_of_range = || TtlError::OutOfRange(trimmed.to_string());
    let mut total: u128 = 0;

    while !rest.is_empty() {
        let (whole, after_whole) = split_digits(rest);
        let (fraction, after_number) = match after_whole.strip_prefix('.') {
            Some(after_dot) => split_digits(after_dot),
            None => ("", after_whole),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(TtlError::Malformed(trimmed.to_string()));
        }

        let unit_len = after_number
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(after_number.len());
        let (unit, after_unit) = after_number.split_at(unit_len);
        if unit.is_empty() {
            return Err(TtlError::MissingUnit(trimmed.to_string()));
        }
        let scale = unit_nanos(unit).ok_or_else(|| TtlError::UnknownUnit {
            unit: unit.to_string(),
            input: trimmed.to_string(),
        })?;

        let whole_value: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| out_of_range())?
        };
        let nanos = whole_value
            .checked_mul(scale)
            .and_then(|nanos| nanos.checked_add(fraction_nanos(fraction, scale)))
            .ok_or_else(out_of_range)?;

        total = total.checked_add(nanos).ok_or_else(out_of_range)?;
        rest = after_unit;
    }

    let nanos = u64::try_from(total).map_err(|_| out_of_range())?;
    Ok(Duration::from_nanos(nanos))
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

fn unit_nanos(unit: &str) -> Option<u128> {
    let nanos = match unit {
        "ns" => 1,
        "us" | "µs" | "μs" => NANOS_PER_MICRO,
        "ms" => NANOS_PER_MILLI,
        "s" => NANOS_PER_SECOND,
        "m" => 60 * NANOS_PER_SECOND,
        "h" => 60 * 60 * NANOS_PER_SECOND,
        _ => return None,
    };
    Some(nanos)
}

fn fraction_nanos(fraction: &str, scale: u128) -> u128 {
    let digits = &fraction[..fraction.len().min(MAX_FRACTION_DIGITS)];
    if digits.is_empty() {
        return 0;
    }
    // At most 18 ASCII digits, always fits
    let numerator: u128 = digits.parse().unwrap_or(0);
    numerator * scale / 10u128.pow(digits.len() as u32)
}
