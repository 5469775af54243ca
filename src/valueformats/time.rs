//! Time, duration, clock and date formatters.

use chrono::{DateTime, Utc};

use super::DecimalCount;
use super::builders::{to_fixed, to_fixed_scaled};

const MS_PER_SECOND: f64 = 1_000.0;
const MS_PER_MINUTE: f64 = 60_000.0;
const MS_PER_HOUR: f64 = 3_600_000.0;
const MS_PER_DAY: f64 = 86_400_000.0;
const MS_PER_YEAR: f64 = 31_536_000_000.0;

fn with_unit(size: f64, decimals: DecimalCount, unit: &str) -> String {
    format!("{} {unit}", to_fixed(Some(size), decimals))
}

/// Milliseconds, promoted to `s`, `min`, `hour`, `day` or `year` as the magnitude grows.
pub fn to_milliseconds(size: Option<f64>, decimals: DecimalCount, scaled: DecimalCount) -> String {
    let Some(size) = size else {
        return String::new();
    };
    let abs = size.abs();
    if abs < 1_000.0 {
        with_unit(size, decimals, "ms")
    } else if abs < 60_000.0 {
        to_fixed_scaled(size / MS_PER_SECOND, decimals, scaled, 3, " s")
    } else if abs < 3_600_000.0 {
        to_fixed_scaled(size / MS_PER_MINUTE, decimals, scaled, 5, " min")
    } else if abs < 86_400_000.0 {
        to_fixed_scaled(size / MS_PER_HOUR, decimals, scaled, 7, " hour")
    } else if abs < 31_536_000_000.0 {
        to_fixed_scaled(size / MS_PER_DAY, decimals, scaled, 8, " day")
    } else {
        to_fixed_scaled(size / MS_PER_YEAR, decimals, scaled, 10, " year")
    }
}

/// Seconds, demoted to `ms`/`µs`/`ns` below one and promoted up to `year` above.
pub fn to_seconds(size: Option<f64>, decimals: DecimalCount, scaled: DecimalCount) -> String {
    let Some(size) = size else {
        return String::new();
    };
    let abs = size.abs();
    let sub_scaled = scaled.map(|s| s.saturating_sub(decimals.unwrap_or(0)));
    if abs < 0.000_001 {
        to_fixed_scaled(size * 1e9, decimals, sub_scaled, -9, " ns")
    } else if abs < 0.001 {
        to_fixed_scaled(size * 1e6, decimals, sub_scaled, -6, " µs")
    } else if abs < 1.0 {
        to_fixed_scaled(size * 1e3, decimals, sub_scaled, -3, " ms")
    } else if abs < 60.0 {
        with_unit(size, decimals, "s")
    } else if abs < 3_600.0 {
        to_fixed_scaled(size / 60.0, decimals, scaled, 1, " min")
    } else if abs < 86_400.0 {
        to_fixed_scaled(size / 3_600.0, decimals, scaled, 4, " hour")
    } else if abs < 604_800.0 {
        to_fixed_scaled(size / 86_400.0, decimals, scaled, 5, " day")
    } else if abs < 31_536_000.0 {
        to_fixed_scaled(size / 604_800.0, decimals, scaled, 6, " week")
    } else {
        to_fixed_scaled(size / 3.155_69e7, decimals, scaled, 7, " year")
    }
}

/// Microseconds, promoted to `ms` and `s`.
pub fn to_microseconds(size: Option<f64>, decimals: DecimalCount, scaled: DecimalCount) -> String {
    let Some(size) = size else {
        return String::new();
    };
    let abs = size.abs();
    if abs < 1_000.0 {
        with_unit(size, decimals, "µs")
    } else if abs < 1_000_000.0 {
        to_fixed_scaled(size / 1_000.0, decimals, scaled, 3, " ms")
    } else {
        to_fixed_scaled(size / 1_000_000.0, decimals, scaled, 6, " s")
    }
}

/// Nanoseconds, promoted up to `min`.
pub fn to_nanoseconds(size: Option<f64>, decimals: DecimalCount, scaled: DecimalCount) -> String {
    let Some(size) = size else {
        return String::new();
    };
    let abs = size.abs();
    if abs < 1_000.0 {
        with_unit(size, decimals, "ns")
    } else if abs < 1_000_000.0 {
        to_fixed_scaled(size / 1_000.0, decimals, scaled, 3, " µs")
    } else if abs < 1_000_000_000.0 {
        to_fixed_scaled(size / 1_000_000.0, decimals, scaled, 6, " ms")
    } else if abs < 60_000_000_000.0 {
        to_fixed_scaled(size / 1_000_000_000.0, decimals, scaled, 9, " s")
    } else {
        to_fixed_scaled(size / 60_000_000_000.0, decimals, scaled, 12, " min")
    }
}

/// Minutes, promoted to `hour`, `day`, `week` and `year`.
pub fn to_minutes(size: Option<f64>, decimals: DecimalCount, scaled: DecimalCount) -> String {
    let Some(size) = size else {
        return String::new();
    };
    let abs = size.abs();
    if abs < 60.0 {
        with_unit(size, decimals, "min")
    } else if abs < 1_440.0 {
        to_fixed_scaled(size / 60.0, decimals, scaled, 2, " hour")
    } else if abs < 10_080.0 {
        to_fixed_scaled(size / 1_440.0, decimals, scaled, 3, " day")
    } else if abs < 604_800.0 {
        to_fixed_scaled(size / 10_080.0, decimals, scaled, 4, " week")
    } else {
        to_fixed_scaled(size / 5.259_48e5, decimals, scaled, 5, " year")
    }
}

/// Hours, promoted to `day`, `week` and `year`.
pub fn to_hours(size: Option<f64>, decimals: DecimalCount, scaled: DecimalCount) -> String {
    let Some(size) = size else {
        return String::new();
    };
    let abs = size.abs();
    if abs < 24.0 {
        with_unit(size, decimals, "hour")
    } else if abs < 168.0 {
        to_fixed_scaled(size / 24.0, decimals, scaled, 2, " day")
    } else if abs < 8_760.0 {
        to_fixed_scaled(size / 168.0, decimals, scaled, 3, " week")
    } else {
        to_fixed_scaled(size / 8_760.0, decimals, scaled, 4, " year")
    }
}

/// Days, promoted to `week` and `year`.
pub fn to_days(size: Option<f64>, decimals: DecimalCount, scaled: DecimalCount) -> String {
    let Some(size) = size else {
        return String::new();
    };
    let abs = size.abs();
    if abs < 7.0 {
        with_unit(size, decimals, "day")
    } else if abs < 365.0 {
        to_fixed_scaled(size / 7.0, decimals, scaled, 2, " week")
    } else {
        to_fixed_scaled(size / 365.0, decimals, scaled, 3, " year")
    }
}

/// Unit a raw value handed to [`to_duration`] is measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeScale {
    Millisecond,
    Second,
}

impl TimeScale {
    fn millis(self) -> f64 {
        match self {
            TimeScale::Millisecond => 1.0,
            TimeScale::Second => 1_000.0,
        }
    }

    fn name(self) -> &'static str {
        match self {
            TimeScale::Millisecond => "millisecond",
            TimeScale::Second => "second",
        }
    }
}

const DURATION_UNITS: [(&str, f64); 8] = [
    ("year", 31_536_000_000.0),
    ("month", 2_592_000_000.0),
    ("week", 604_800_000.0),
    ("day", 86_400_000.0),
    ("hour", 3_600_000.0),
    ("minute", 60_000.0),
    ("second", 1_000.0),
    ("millisecond", 1.0),
];

/// Human readable duration such as `"1 hour, 2 minutes"`.
///
/// `decimals` is the number of extra units printed after the largest non-zero one
/// (missing means none). Negative values are rendered as `"… ago"`.
pub fn to_duration(size: Option<f64>, decimals: DecimalCount, scale: TimeScale) -> String {
    let Some(size) = size else {
        return String::new();
    };
    if size == 0.0 {
        return format!("0 {}s", scale.name());
    }
    if size < 0.0 {
        return format!("{} ago", to_duration(Some(-size), decimals, scale));
    }

    let mut remaining = size * scale.millis();
    let mut budget = decimals.unwrap_or(0);
    let mut started = false;
    let mut parts = Vec::new();

    for (name, interval) in DURATION_UNITS {
        if budget < 0 {
            break;
        }
        let value = remaining / interval;
        if value >= 1.0 || started {
            started = true;
            let whole = value.floor();
            let plural = if whole == 1.0 { "" } else { "s" };
            parts.push(format!("{whole} {name}{plural}"));
            remaining %= interval;
            budget -= 1;
        }
    }

    parts.join(", ")
}

/// Millisecond clock such as `"01h:02m:03s:004ms"`, truncated by `decimals`.
pub fn to_clock(size: Option<f64>, decimals: DecimalCount) -> String {
    let Some(size) = size else {
        return String::new();
    };
    let ms = size.max(0.0).floor() as u64;
    let millis = ms % 1_000;
    let seconds = (ms / 1_000) % 60;
    let minutes = (ms / 60_000) % 60;

    if size < 1_000.0 {
        return format!("{millis:03}ms");
    }
    if size < 60_000.0 {
        return match decimals {
            Some(0) => format!("{seconds:02}s"),
            _ => format!("{seconds:02}s:{millis:03}ms"),
        };
    }
    if size < 3_600_000.0 {
        return match decimals {
            Some(0) => format!("{minutes:02}m"),
            Some(1) => format!("{minutes:02}m:{seconds:02}s"),
            _ => format!("{minutes:02}m:{seconds:02}s:{millis:03}ms"),
        };
    }

    let hours = ms / 3_600_000;
    let hours = format!("{:02}h", hours % 100);
    match decimals {
        Some(0) => hours,
        Some(1) => format!("{hours}:{minutes:02}m"),
        Some(2) => format!("{hours}:{minutes:02}m:{seconds:02}s"),
        _ => format!("{hours}:{minutes:02}m:{seconds:02}s:{millis:03}ms"),
    }
}

/// Seconds as `HH:MM:SS`.
pub fn to_hh_mm_ss(size: Option<f64>, _decimals: DecimalCount, _scaled: DecimalCount) -> String {
    let Some(size) = size else {
        return String::new();
    };
    let total = size.max(0.0).floor() as u64;
    let hours = total / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Hundredths of a second (SNMP timeticks).
pub fn to_timeticks(size: Option<f64>, decimals: DecimalCount, scaled: DecimalCount) -> String {
    to_seconds(size.map(|s| s / 100.0), decimals, scaled)
}

fn epoch(size: f64) -> Option<DateTime<Utc>> {
    if !size.is_finite() {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis(size as i64)
}

/// `YYYY-MM-DD HH:mm:ss`, or only the time when the instant is today (UTC).
pub fn date_time_as_iso(size: Option<f64>, _decimals: DecimalCount, _scaled: DecimalCount) -> String {
    date_time_as_iso_at(size, Utc::now())
}

pub(crate) fn date_time_as_iso_at(size: Option<f64>, now: DateTime<Utc>) -> String {
    let Some(time) = size.and_then(epoch) else {
        return String::new();
    };
    if time.date_naive() == now.date_naive() {
        time.format("%H:%M:%S").to_string()
    } else {
        time.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// `MM/DD/YYYY h:mm:ss a`, or only the time when the instant is today (UTC).
pub fn date_time_as_us(size: Option<f64>, _decimals: DecimalCount, _scaled: DecimalCount) -> String {
    date_time_as_us_at(size, Utc::now())
}

pub(crate) fn date_time_as_us_at(size: Option<f64>, now: DateTime<Utc>) -> String {
    let Some(time) = size.and_then(epoch) else {
        return String::new();
    };
    if time.date_naive() == now.date_naive() {
        time.format("%-I:%M:%S %P").to_string()
    } else {
        time.format("%m/%d/%Y %-I:%M:%S %P").to_string()
    }
}

/// Relative description such as `"5 minutes ago"` or `"in a day"`.
pub fn date_time_from_now(size: Option<f64>, _decimals: DecimalCount, _scaled: DecimalCount) -> String {
    match size {
        None => String::new(),
        Some(v) => from_now_at(v, Utc::now().timestamp_millis() as f64),
    }
}

pub(crate) fn from_now_at(epoch_ms: f64, now_ms: f64) -> String {
    if !epoch_ms.is_finite() {
        return String::new();
    }
    let delta = now_ms - epoch_ms;
    let seconds = delta.abs() / 1_000.0;
    let minutes = (seconds / 60.0).round();
    let hours = (seconds / 3_600.0).round();
    let days = (seconds / 86_400.0).round();

    let phrase = if seconds < 45.0 {
        "a few seconds".to_string()
    } else if seconds < 90.0 {
        "a minute".to_string()
    } else if minutes < 45.0 {
        format!("{minutes} minutes")
    } else if minutes < 90.0 {
        "an hour".to_string()
    } else if hours < 22.0 {
        format!("{hours} hours")
    } else if hours < 36.0 {
        "a day".to_string()
    } else if days < 26.0 {
        format!("{days} days")
    } else if days < 45.0 {
        "a month".to_string()
    } else if days < 320.0 {
        format!("{} months", (days / 30.4).round())
    } else if days < 548.0 {
        "a year".to_string()
    } else {
        format!("{} years", (days / 365.0).round())
    };

    if delta >= 0.0 {
        format!("{phrase} ago")
    } else {
        format!("in {phrase}")
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn milliseconds_promote_to_larger_units() {
        assert_eq!(to_milliseconds(Some(500.0), Some(0), None), "500 ms");
        assert_eq!(to_milliseconds(Some(1_500.0), Some(1), None), "1.5 s");
        assert_eq!(to_milliseconds(Some(90_000.0), Some(1), None), "1.5 min");
        assert_eq!(to_milliseconds(Some(7_200_000.0), Some(0), None), "2 hour");
    }

    #[test]
    fn seconds_demote_below_one() {
        assert_eq!(to_seconds(Some(0.0024), Some(1), None), "2.4 ms");
        assert_eq!(to_seconds(Some(0.000_002), Some(0), None), "2 µs");
        assert_eq!(to_seconds(Some(30.0), Some(0), None), "30 s");
        assert_eq!(to_seconds(Some(7_200.0), Some(0), None), "2 hour");
    }

    #[test]
    fn small_units_promote() {
        assert_eq!(to_microseconds(Some(1_500.0), Some(1), None), "1.5 ms");
        assert_eq!(to_nanoseconds(Some(2_000_000_000.0), Some(0), None), "2 s");
        assert_eq!(to_minutes(Some(90.0), Some(1), None), "1.5 hour");
        assert_eq!(to_hours(Some(48.0), Some(0), None), "2 day");
        assert_eq!(to_days(Some(14.0), Some(0), None), "2 week");
    }

    #[test]
    fn durations_list_units() {
        assert_eq!(to_duration(Some(3_720_000.0), Some(1), TimeScale::Millisecond), "1 hour, 2 minutes");
        assert_eq!(to_duration(Some(3_600.0), None, TimeScale::Second), "1 hour");
        assert_eq!(to_duration(Some(0.0), Some(2), TimeScale::Second), "0 seconds");
        assert_eq!(to_duration(Some(-60.0), Some(0), TimeScale::Second), "1 minute ago");
    }

    #[test]
    fn clock_formats() {
        assert_eq!(to_clock(Some(12.0), None), "012ms");
        assert_eq!(to_clock(Some(61_001.0), Some(1)), "01m:01s");
        assert_eq!(to_clock(Some(3_723_004.0), None), "01h:02m:03s:004ms");
        assert_eq!(to_clock(Some(3_723_004.0), Some(0)), "01h");
    }

    #[test]
    fn hh_mm_ss_and_timeticks() {
        assert_eq!(to_hh_mm_ss(Some(3_725.0), None, None), "01:02:05");
        assert_eq!(to_timeticks(Some(6_000.0), Some(0), None), "1 min");
    }

    #[test]
    fn dates_render_in_utc() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let earlier = Utc.with_ymd_and_hms(2024, 2, 1, 13, 4, 5).unwrap();
        let today = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let ms = |t: DateTime<Utc>| Some(t.timestamp_millis() as f64);

        assert_eq!(date_time_as_iso_at(ms(earlier), now), "2024-02-01 13:04:05");
        assert_eq!(date_time_as_iso_at(ms(today), now), "09:30:00");
        assert_eq!(date_time_as_us_at(ms(earlier), now), "02/01/2024 1:04:05 pm");
    }

    #[test]
    fn from_now_phrases() {
        let now = 1_000_000_000_000.0;
        assert_eq!(from_now_at(now - 10_000.0, now), "a few seconds ago");
        assert_eq!(from_now_at(now - 5.0 * 60_000.0, now), "5 minutes ago");
        assert_eq!(from_now_at(now + 86_400_000.0, now), "in a day");
        assert_eq!(from_now_at(now - 3.0 * 365.0 * 86_400_000.0, now), "3 years ago");
    }

    #[test]
    fn sub_second_precision_hint_saturates() {
        assert_eq!(to_seconds(Some(0.5), Some(1), Some(i32::MIN)), "500 ms");
    }
}
