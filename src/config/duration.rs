//! Duration parsing for settings like `timeout` and `cache_ttl`.
//!
//! Accepted forms, tried in order:
//! 1. a bare integer, meaning seconds (`90`, `0`)
//! 2. unit groups (`10s`, `90m`, `1h30m`, `1.5h`, `250ms`)
//! 3. whole days with a `d` suffix (`30d`, `0d`)
//!
//! Negative values parse; callers decide whether they are allowed. Every
//! form shares one range: the total must fit in a signed 64-bit count of
//! nanoseconds (about 292 years either way).

use chrono::TimeDelta;
use std::fmt::Write;

const NANOS_PER_SECOND: i128 = 1_000_000_000;
const SECONDS_PER_DAY: i64 = 86_400;

/// Fraction digits beyond this cannot change a nanosecond count.
const MAX_FRACTION_DIGITS: usize = 18;

/// Error returned by [`parse_duration`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "invalid duration {input:?}: expected seconds (\"90\"), a duration like \"1h30m\", or days like \"30d\""
)]
pub struct ParseDurationError {
    pub input: String,
}

/// Parse a duration string into a signed [`TimeDelta`].
///
/// # Examples
///
/// ```
/// use chrono::TimeDelta;
/// use hearth::config::parse_duration;
///
/// assert_eq!(parse_duration("30d").unwrap(), TimeDelta::hours(720));
/// assert_eq!(parse_duration("1h30m").unwrap(), TimeDelta::minutes(90));
/// assert_eq!(parse_duration("45").unwrap(), TimeDelta::seconds(45));
/// assert!(parse_duration("30x").is_err());
/// ```
pub fn parse_duration(input: &str) -> Result<TimeDelta, ParseDurationError> {
    let error = || ParseDurationError {
        input: input.to_string(),
    };

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(error());
    }

    if let Ok(seconds) = trimmed.parse::<i64>() {
        return TimeDelta::try_seconds(seconds)
            .and_then(within_range)
            .ok_or_else(error);
    }

    if let Some(delta) = parse_unit_groups(trimmed) {
        return Ok(delta);
    }

    let days = trimmed
        .strip_suffix('d')
        .and_then(|days| days.parse::<i64>().ok())
        .ok_or_else(error)?;
    TimeDelta::try_days(days)
        .and_then(within_range)
        .ok_or_else(error)
}

/// `delta` if it fits in a signed 64-bit count of nanoseconds.
pub(crate) fn within_range(delta: TimeDelta) -> Option<TimeDelta> {
    delta.num_nanoseconds().map(|_| delta)
}

/// Render a duration in a form [`parse_duration`] reads back to the same value.
///
/// Whole days render as `30d`; everything else as unit groups like `1h30m`.
pub fn format_duration(delta: TimeDelta) -> String {
    if delta.is_zero() {
        return "0s".to_string();
    }

    let mut out = String::new();
    if delta < TimeDelta::zero() {
        out.push('-');
    }
    let delta = delta.abs();

    if delta.subsec_nanos() == 0 && delta.num_seconds() % SECONDS_PER_DAY == 0 {
        let _ = write!(out, "{}d", delta.num_days());
        return out;
    }

    let hours = delta.num_hours();
    let minutes = delta.num_minutes() % 60;
    let seconds = delta.num_seconds() % 60;
    let nanos = delta.subsec_nanos();

    if hours > 0 {
        let _ = write!(out, "{}h", hours);
    }
    if minutes > 0 {
        let _ = write!(out, "{}m", minutes);
    }
    if seconds > 0 {
        let _ = write!(out, "{}s", seconds);
    }
    if nanos > 0 {
        let _ = if nanos % 1_000_000 == 0 {
            write!(out, "{}ms", nanos / 1_000_000)
        } else if nanos % 1_000 == 0 {
            write!(out, "{}us", nanos / 1_000)
        } else {
            write!(out, "{}ns", nanos)
        };
    }
    out
}

/// Parse signed unit groups such as `1h30m` or `-1.5s`.
///
/// Each group needs a unit. The total must fit in a signed 64-bit count of
/// nanoseconds.
fn parse_unit_groups(input: &str) -> Option<TimeDelta> {
    let (negative, mut rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };
    if rest.is_empty() {
        return None;
    }

    let mut total: i128 = 0;
    while !rest.is_empty() {
        let (whole, after) = split_digits(rest);
        let (fraction, after) = match after.strip_prefix('.') {
            Some(tail) => split_digits(tail),
            None => ("", after),
        };
        if whole.is_empty() && fraction.is_empty() {
            return None;
        }

        let unit_end = after
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(after.len());
        let (unit, tail) = after.split_at(unit_end);

        total = total.checked_add(group_nanos(whole, fraction, unit_nanos(unit)?)?)?;
        if total > i128::from(i64::MAX) {
            return None;
        }
        rest = tail;
    }

    let nanos = if negative { -total } else { total };
    Some(TimeDelta::nanoseconds(i64::try_from(nanos).ok()?))
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

fn unit_nanos(unit: &str) -> Option<i128> {
    let nanos = match unit {
        "ns" => 1,
        "us" | "µs" | "μs" => 1_000,
        "ms" => 1_000_000,
        "s" => NANOS_PER_SECOND,
        "m" => 60 * NANOS_PER_SECOND,
        "h" => 3_600 * NANOS_PER_SECOND,
        _ => return None,
    };
    Some(nanos)
}

/// `whole.fraction` units in nanoseconds; sub-nanosecond remainders truncate.
fn group_nanos(whole: &str, fraction: &str, unit: i128) -> Option<i128> {
    let mut nanos = if whole.is_empty() {
        0
    } else {
        whole.parse::<i128>().ok()?.checked_mul(unit)?
    };

    let digits = &fraction[..fraction.len().min(MAX_FRACTION_DIGITS)];
    if !digits.is_empty() {
        let numerator = digits.parse::<i128>().ok()?;
        let denominator = 10i128.pow(digits.len() as u32);
        nanos = nanos.checked_add(numerator * unit / denominator)?;
    }

    Some(nanos)
}
