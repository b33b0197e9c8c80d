//! Byte-size parsing for human-friendly values like `50 MiB` or `1.5 GB`.
//!
//! Decimal units (`KB`, `MB`, `GB`, `TB`) are powers of 1000 and binary units
//! (`KiB`, `MiB`, `GiB`, `TiB`) are powers of 1024. Suffixes are
//! case-insensitive and a bare number means bytes.

/// Largest byte count accepted (the positive range of a signed 64-bit integer).
pub const MAX_BYTE_SIZE: u64 = i64::MAX as u64;

/// Unit suffixes accepted by [`parse_byte_size`].
pub const UNIT_VOCABULARY: &str = "B, KB, KiB, MB, MiB, GB, GiB, TB, TiB";

/// Fraction digits beyond this are truncated before rounding.
const MAX_FRACTION_DIGITS: usize = 24;

const UNITS: [(&str, u64); 9] = [
    ("b", 1),
    ("kb", 1_000),
    ("kib", 1 << 10),
    ("mb", 1_000_000),
    ("mib", 1 << 20),
    ("gb", 1_000_000_000),
    ("gib", 1 << 30),
    ("tb", 1_000_000_000_000),
    ("tib", 1 << 40),
];

const BINARY_UNITS: [(&str, u64); 4] = [
    ("TiB", 1 << 40),
    ("GiB", 1 << 30),
    ("MiB", 1 << 20),
    ("KiB", 1 << 10),
];

/// Error returned by [`parse_byte_size`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseSizeError {
    /// The input is not a number followed by an optional unit.
    #[error("invalid size {input:?}: expected a number with an optional unit ({})", UNIT_VOCABULARY)]
    Invalid { input: String },

    /// The number parsed but the unit suffix is not recognized.
    #[error("invalid size {input:?}: unknown unit {unit:?} (expected one of {})", UNIT_VOCABULARY)]
    UnknownUnit { input: String, unit: String },

    /// The value does not fit in a signed 64-bit byte count.
    #[error("size {input:?} is too large (maximum is {} bytes)", MAX_BYTE_SIZE)]
    Overflow { input: String },
}

/// Parse a human-readable size string into an exact byte count.
///
/// Fractional quantities are computed exactly and rounded to the nearest
/// byte, so `"1.5 GiB"` is `1_610_612_736`.
///
/// # Examples
///
/// ```
/// use hearth::config::parse_byte_size;
///
/// assert_eq!(parse_byte_size("50 MiB").unwrap(), 52_428_800);
/// assert_eq!(parse_byte_size("2kb").unwrap(), 2_000);
/// assert_eq!(parse_byte_size("1024").unwrap(), 1024);
/// assert!(parse_byte_size("50 XiB").is_err());
/// ```
pub fn parse_byte_size(input: &str) -> Result<u64, ParseSizeError> {
    let invalid = || ParseSizeError::Invalid {
        input: input.to_string(),
    };

    let trimmed = input.trim();
    let number_end = trimmed
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(trimmed.len());
    let (number, rest) = trimmed.split_at(number_end);
    let (whole, fraction) = split_decimal(number).ok_or_else(invalid)?;

    let unit = rest.trim_start();
    let multiplier = if unit.is_empty() {
        1
    } else if !unit.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(invalid());
    } else {
        lookup_unit(unit).ok_or_else(|| ParseSizeError::UnknownUnit {
            input: input.to_string(),
            unit: unit.to_string(),
        })?
    };

    match scale(whole, fraction, multiplier) {
        Some(bytes) if bytes <= u128::from(MAX_BYTE_SIZE) => Ok(bytes as u64),
        _ => Err(ParseSizeError::Overflow {
            input: input.to_string(),
        }),
    }
}

/// Render a byte count with the largest binary unit that divides it exactly.
///
/// The output always parses back to the same value with [`parse_byte_size`].
pub fn format_bytes(bytes: u64) -> String {
    for (unit, size) in BINARY_UNITS {
        if bytes >= size && bytes % size == 0 {
            return format!("{} {}", bytes / size, unit);
        }
    }
    format!("{} B", bytes)
}

/// Split `12.5` into `("12", "5")`. Both halves must be all digits and the
/// whole part must be non-empty; a trailing `.` is rejected.
fn split_decimal(number: &str) -> Option<(&str, &str)> {
    let (whole, fraction) = match number.split_once('.') {
        Some((whole, fraction)) => {
            if fraction.is_empty() {
                return None;
            }
            (whole, fraction)
        }
        None => (number, ""),
    };

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if whole.is_empty() || !all_digits(whole) || !all_digits(fraction) {
        return None;
    }
    Some((whole, fraction))
}

fn lookup_unit(unit: &str) -> Option<u64> {
    let unit = unit.to_ascii_lowercase();
    UNITS
        .iter()
        .find(|(name, _)| *name == unit)
        .map(|(_, multiplier)| *multiplier)
}

/// Exact `whole.fraction * multiplier`, rounded half away from zero.
/// Returns `None` when the intermediate value does not fit in 128 bits.
fn scale(whole: &str, fraction: &str, multiplier: u64) -> Option<u128> {
    let multiplier = u128::from(multiplier);
    let mut total = whole.parse::<u128>().ok()?.checked_mul(multiplier)?;

    let digits = &fraction[..fraction.len().min(MAX_FRACTION_DIGITS)];
    if !digits.is_empty() {
        let numerator = digits.parse::<u128>().ok()?;
        let denominator = 10u128.pow(digits.len() as u32);
        let scaled = numerator.checked_mul(multiplier)?;
        total = total.checked_add((scaled + denominator / 2) / denominator)?;
    }

    Some(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_binary_units() {
        assert_eq!(parse_byte_size("50 MiB").unwrap(), 52_428_800);
        assert_eq!(parse_byte_size("1.5 GiB").unwrap(), 1_610_612_736);
        assert_eq!(parse_byte_size("1KiB").unwrap(), 1024);
        assert_eq!(parse_byte_size("2 TiB").unwrap(), 2 * (1 << 40));
    }

    #[test]
    fn test_parse_decimal_units() {
        assert_eq!(parse_byte_size("1KB").unwrap(), 1_000);
        assert_eq!(parse_byte_size("2.5 MB").unwrap(), 2_500_000);
        assert_eq!(parse_byte_size("3 GB").unwrap(), 3_000_000_000);
        assert_eq!(parse_byte_size("1 TB").unwrap(), 1_000_000_000_000);
    }

    #[test]
    fn test_parse_bare_number_is_bytes() {
        assert_eq!(parse_byte_size("1024").unwrap(), 1024);
        assert_eq!(parse_byte_size("0").unwrap(), 0);
        assert_eq!(parse_byte_size("512 B").unwrap(), 512);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(parse_byte_size("10 mib").unwrap(), 10 * (1 << 20));
        assert_eq!(parse_byte_size("10 MIB").unwrap(), 10 * (1 << 20));
        assert_eq!(parse_byte_size("10 kb").unwrap(), 10_000);
        assert_eq!(parse_byte_size("10 b").unwrap(), 10);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(parse_byte_size("  50 MiB  ").unwrap(), 52_428_800);
        assert_eq!(parse_byte_size("\t7\n").unwrap(), 7);
    }

    #[test]
    fn test_parse_rounds_to_nearest_byte() {
        // 0.5 KiB = 512, 0.001 KiB = 1.024 -> 1, 0.0005 KiB = 0.512 -> 1
        assert_eq!(parse_byte_size("0.5 KiB").unwrap(), 512);
        assert_eq!(parse_byte_size("0.001 KiB").unwrap(), 1);
        assert_eq!(parse_byte_size("0.0005 KiB").unwrap(), 1);
        assert_eq!(parse_byte_size("0.0004 KiB").unwrap(), 0);
        assert_eq!(parse_byte_size("1.5").unwrap(), 2);
    }

    #[test]
    fn test_parse_invalid() {
        for input in ["", "   ", "MiB", "-5 MiB", "1.", ".5 MiB", "1.2.3", "50 Mi B!", "ten"] {
            assert!(
                matches!(parse_byte_size(input), Err(ParseSizeError::Invalid { .. })),
                "expected Invalid for {:?}",
                input
            );
        }
    }

    #[test]
    fn test_parse_unknown_unit() {
        match parse_byte_size("50 XiB") {
            Err(ParseSizeError::UnknownUnit { input, unit }) => {
                assert_eq!(input, "50 XiB");
                assert_eq!(unit, "XiB");
            }
            other => panic!("expected UnknownUnit, got {:?}", other),
        }
        assert!(matches!(
            parse_byte_size("5 PB"),
            Err(ParseSizeError::UnknownUnit { .. })
        ));
    }

    #[test]
    fn test_error_message_names_input_and_units() {
        let err = parse_byte_size("50 XiB").unwrap_err().to_string();
        assert!(err.contains("50 XiB"));
        assert!(err.contains(UNIT_VOCABULARY));

        let err = parse_byte_size("").unwrap_err().to_string();
        assert!(err.contains(UNIT_VOCABULARY));
    }

    #[test]
    fn test_parse_overflow() {
        assert_eq!(
            parse_byte_size("9223372036854775807").unwrap(),
            i64::MAX as u64
        );
        assert!(matches!(
            parse_byte_size("9223372036854775808"),
            Err(ParseSizeError::Overflow { .. })
        ));
        assert!(matches!(
            parse_byte_size("9000000 TiB"),
            Err(ParseSizeError::Overflow { .. })
        ));
        assert!(matches!(
            parse_byte_size("99999999999999999999999999999999999999999999 B"),
            Err(ParseSizeError::Overflow { .. })
        ));
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1000), "1000 B");
        assert_eq!(format_bytes(1024), "1 KiB");
        assert_eq!(format_bytes(52_428_800), "50 MiB");
        assert_eq!(format_bytes(1_610_612_736), "1536 MiB");
        assert_eq!(format_bytes(3 << 30), "3 GiB");
    }

    #[test]
    fn test_format_parse_round_trip_on_unit_boundaries() {
        for unit in [1u64 << 10, 1 << 20, 1 << 30] {
            for multiple in [1u64, 2, 3, 7, 512, 1023, 1024, 4096] {
                let n = unit * multiple;
                assert_eq!(parse_byte_size(&format_bytes(n)).unwrap(), n, "n = {}", n);
            }
        }
    }
}
