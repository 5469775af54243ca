//! Single-unit interval strings (`"5m"`, `"1.5h"`, `"200ms"`) and interval rounding.
//!
//! Unlike the calendar functions in the parent module these use fixed lengths: a month
//! is 30 days and a year is 365 days.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{FrameError, FrameResult};

static INTERVAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]+(?:\.[0-9]+)?)(ms|[Mwdhmsy])").expect("interval regex is valid")
});

/// Parsed single-unit interval.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalInfo {
    /// Seconds per unit.
    pub sec: f64,
    /// Unit symbol (`y M w d h m s ms`).
    pub unit: String,
    /// Whole count (fractional input is truncated).
    pub count: i64,
}

fn seconds_per_unit(unit: &str) -> Option<f64> {
    Some(match unit {
        "y" => 31_536_000.0,
        "M" => 2_592_000.0,
        "w" => 604_800.0,
        "d" => 86_400.0,
        "h" => 3_600.0,
        "m" => 60.0,
        "s" => 1.0,
        "ms" => 0.001,
        _ => return None,
    })
}

/// Parse the first `<number><unit>` occurrence in `text`.
pub fn describe_interval(text: &str) -> FrameResult<IntervalInfo> {
    let invalid = || FrameError::InvalidOptions {
        id: text.to_string(),
        message: r#"invalid interval string, expecting a number followed by one of "Mwdhmsy""#
            .to_string(),
    };
    let caps = INTERVAL.captures(text).ok_or_else(invalid)?;
    let unit = caps[2].to_string();
    let sec = seconds_per_unit(&unit).ok_or_else(invalid)?;
    let whole = caps[1].split('.').next().unwrap_or("0");
    let count = whole.parse::<i64>().map_err(|_| invalid())?;
    Ok(IntervalInfo { sec, unit, count })
}

/// Interval length in milliseconds.
pub fn interval_to_ms(text: &str) -> FrameResult<i64> {
    let info = describe_interval(text)?;
    Ok((info.sec * 1000.0 * info.count as f64).round() as i64)
}

/// Snap a raw interval (milliseconds) to a nearby "nice" interval.
pub fn round_interval(interval_ms: f64) -> i64 {
    const STEPS: &[(f64, i64)] = &[
        (15.0, 10),
        (35.0, 20),
        (75.0, 50),
        (150.0, 100),
        (350.0, 200),
        (750.0, 500),
        (1_500.0, 1_000),
        (3_500.0, 2_000),
        (7_500.0, 5_000),
        (12_500.0, 10_000),
        (17_500.0, 15_000),
        (25_000.0, 20_000),
        (45_000.0, 30_000),
        (90_000.0, 60_000),
        (210_000.0, 120_000),
        (450_000.0, 300_000),
        (750_000.0, 600_000),
        (1_050_000.0, 900_000),
        (1_500_000.0, 1_200_000),
        (2_700_000.0, 1_800_000),
        (5_400_000.0, 3_600_000),
        (9_000_000.0, 7_200_000),
        (16_200_000.0, 10_800_000),
        (32_400_000.0, 21_600_000),
        (86_400_000.0, 43_200_000),
        (604_800_000.0, 86_400_000),
        (1_814_400_000.0, 604_800_000),
        (3_628_800_000.0, 2_592_000_000),
    ];
    STEPS
        .iter()
        .find(|(limit, _)| interval_ms < *limit)
        .map_or(31_536_000_000, |(_, nice)| *nice)
}

/// Largest whole unit in `seconds`, e.g. `"2h"` or `"500ms"`.
pub fn seconds_to_hms(seconds: f64) -> String {
    let years = (seconds / 31_536_000.0).floor();
    if years != 0.0 {
        return format!("{years}y");
    }
    let rem = seconds % 31_536_000.0;
    let days = (rem / 86_400.0).floor();
    if days != 0.0 {
        return format!("{days}d");
    }
    let rem = rem % 86_400.0;
    let hours = (rem / 3_600.0).floor();
    if hours != 0.0 {
        return format!("{hours}h");
    }
    let rem = rem % 3_600.0;
    let minutes = (rem / 60.0).floor();
    if minutes != 0.0 {
        return format!("{minutes}m");
    }
    let secs = (rem % 60.0).floor();
    if secs != 0.0 {
        return format!("{secs}s");
    }
    let millis = (seconds * 1000.0).floor();
    if millis != 0.0 {
        return format!("{millis}ms");
    }
    "less than a millisecond".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_to_ms_uses_fixed_lengths() {
        assert_eq!(interval_to_ms("5m").unwrap(), 300_000);
        assert_eq!(interval_to_ms("1M").unwrap(), 2_592_000_000);
        assert_eq!(interval_to_ms("250ms").unwrap(), 250);
        assert_eq!(interval_to_ms("1.5h").unwrap(), 3_600_000);
    }

    #[test]
    fn describe_interval_rejects_unknown_units() {
        let err = describe_interval("10x").unwrap_err();
        assert!(err.to_string().contains("invalid interval string"));
    }

    #[test]
    fn round_interval_snaps_to_nice_steps() {
        assert_eq!(round_interval(12.0), 10);
        assert_eq!(round_interval(40_000.0), 30_000);
        assert_eq!(round_interval(1e12), 31_536_000_000);
    }

    #[test]
    fn seconds_to_hms_picks_the_largest_unit() {
        assert_eq!(seconds_to_hms(7_200.0), "2h");
        assert_eq!(seconds_to_hms(90.0), "1m");
        assert_eq!(seconds_to_hms(0.5), "500ms");
        assert_eq!(seconds_to_hms(0.0), "less than a millisecond");
    }
}
