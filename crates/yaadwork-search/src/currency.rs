//! JMD amount formatting, parsing, and salary-range validation.
//!
//! Salaries are quoted in whole Jamaican dollars; there are no minor units
//! anywhere in the filter pipeline.

use thiserror::Error;

const CURRENCY_PREFIX: &str = "J$";

/// Soft domain bounds for salary filters, enforced as validation errors
/// rather than hard clamps.
pub const MIN_SALARY_FLOOR: i64 = 10_000;
pub const MAX_SALARY_CEILING: i64 = 10_000_000;

/// Format an amount with thousands grouping and zero decimal places,
/// optionally prefixed with the currency symbol.
#[must_use]
pub fn format_amount(amount: i64, with_symbol: bool) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if amount < 0 { "-" } else { "" };
    if with_symbol {
        format!("{sign}{CURRENCY_PREFIX}{grouped}")
    } else {
        format!("{sign}{grouped}")
    }
}

/// Parse a typed amount, stripping the currency prefix and grouping.
///
/// Empty or non-numeric input means "no value entered yet" and parses to 0;
/// it is not an error.
#[must_use]
pub fn parse_amount(text: &str) -> i64 {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// Salary-range validation failures. One surfaces at a time (the UI shows a
/// single message), so the checking order below is the display priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SalaryRangeError {
    #[error("minimum salary cannot be negative")]
    NegativeMin,

    #[error("maximum salary cannot be negative")]
    NegativeMax,

    #[error("minimum salary cannot exceed the maximum")]
    MinAboveMax,

    #[error("minimum salary must be at least J$10,000")]
    BelowFloor,

    #[error("maximum salary cannot exceed J$10,000,000")]
    AboveCeiling,
}

/// Validate a min/max pair. First failing rule wins.
///
/// # Errors
///
/// Returns the first [`SalaryRangeError`] in priority order.
pub fn validate_range(min: i64, max: i64) -> Result<(), SalaryRangeError> {
    if min < 0 {
        return Err(SalaryRangeError::NegativeMin);
    }
    if max < 0 {
        return Err(SalaryRangeError::NegativeMax);
    }
    if min > max {
        return Err(SalaryRangeError::MinAboveMax);
    }
    if min < MIN_SALARY_FLOOR {
        return Err(SalaryRangeError::BelowFloor);
    }
    if max > MAX_SALARY_CEILING {
        return Err(SalaryRangeError::AboveCeiling);
    }
    Ok(())
}

/// A one-click salary window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalaryPreset {
    pub label: &'static str,
    pub min: i64,
    pub max: i64,
}

/// Quick-select catalogue, ordered by ascending `min`.
const PRESETS: &[SalaryPreset] = &[
    SalaryPreset {
        label: "All salaries",
        min: 10_000,
        max: 10_000_000,
    },
    SalaryPreset {
        label: "Entry level",
        min: 30_000,
        max: 80_000,
    },
    SalaryPreset {
        label: "Mid level",
        min: 80_000,
        max: 150_000,
    },
    SalaryPreset {
        label: "Senior",
        min: 150_000,
        max: 400_000,
    },
    SalaryPreset {
        label: "Executive",
        min: 400_000,
        max: 2_000_000,
    },
];

#[must_use]
pub fn presets() -> &'static [SalaryPreset] {
    PRESETS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_groups_thousands() {
        assert_eq!(format_amount(0, false), "0");
        assert_eq!(format_amount(999, false), "999");
        assert_eq!(format_amount(30_000, false), "30,000");
        assert_eq!(format_amount(1_234_567, false), "1,234,567");
    }

    #[test]
    fn format_with_symbol_prefixes_currency() {
        assert_eq!(format_amount(30_000, true), "J$30,000");
        assert_eq!(format_amount(10_000_000, true), "J$10,000,000");
    }

    #[test]
    fn parse_strips_prefix_and_grouping() {
        assert_eq!(parse_amount("J$30,000"), 30_000);
        assert_eq!(parse_amount("1,234,567"), 1_234_567);
        assert_eq!(parse_amount(" 45000 "), 45_000);
    }

    #[test]
    fn parse_treats_empty_and_junk_as_no_value() {
        assert_eq!(parse_amount(""), 0);
        assert_eq!(parse_amount("J$"), 0);
        assert_eq!(parse_amount("abc"), 0);
    }

    #[test]
    fn format_parse_round_trip() {
        for n in [0, 1, 999, 1_000, 10_000, 123_456, 9_999_999, 10_000_000] {
            assert_eq!(parse_amount(&format_amount(n, false)), n, "round trip {n}");
        }
    }

    #[test]
    fn validate_boundaries() {
        assert!(validate_range(10_000, 10_000).is_ok());
        assert_eq!(
            validate_range(9_999, 10_000),
            Err(SalaryRangeError::BelowFloor)
        );
        assert_eq!(
            validate_range(100_000, 99_999),
            Err(SalaryRangeError::MinAboveMax)
        );
        assert_eq!(
            validate_range(0, 10_000_001),
            Err(SalaryRangeError::BelowFloor)
        );
        assert_eq!(
            validate_range(10_000, 10_000_001),
            Err(SalaryRangeError::AboveCeiling)
        );
    }

    #[test]
    fn validate_first_failing_rule_wins() {
        // Negative min takes priority over every other violation
        assert_eq!(
            validate_range(-5, -10),
            Err(SalaryRangeError::NegativeMin)
        );
        assert_eq!(
            validate_range(20_000, -10),
            Err(SalaryRangeError::NegativeMax)
        );
    }

    #[test]
    fn validation_messages_are_distinct() {
        let errors = [
            SalaryRangeError::NegativeMin,
            SalaryRangeError::NegativeMax,
            SalaryRangeError::MinAboveMax,
            SalaryRangeError::BelowFloor,
            SalaryRangeError::AboveCeiling,
        ];
        for (i, a) in errors.iter().enumerate() {
            for b in &errors[i + 1..] {
                assert_ne!(a.to_string(), b.to_string());
            }
        }
    }

    #[test]
    fn presets_are_sorted_by_ascending_min() {
        let mins: Vec<i64> = presets().iter().map(|p| p.min).collect();
        let mut sorted = mins.clone();
        sorted.sort_unstable();
        assert_eq!(mins, sorted);
    }

    #[test]
    fn presets_are_all_valid_ranges() {
        for preset in presets() {
            assert!(
                validate_range(preset.min, preset.max).is_ok(),
                "preset {} is invalid",
                preset.label
            );
        }
    }
}
