//! Human-readable durations such as `"3M 5d 20m"`.
//!
//! Two families of functions live here and deliberately disagree on malformed input:
//!
//! - [`parse_duration`] is lenient: tokens it cannot read are dropped and whatever it can
//!   read is returned.
//! - [`is_valid_duration`], [`is_valid_go_duration`] and [`is_valid_grafana_duration`] are
//!   strict: a single unreadable token rejects the whole string.
//!
//! Calendar-aware arithmetic ([`add_duration_to_date`], [`interval_to_duration`]) uses
//! `chrono` in UTC, so a month is a calendar month rather than a fixed number of seconds.

mod interval;

use std::fmt::Write as _;
use std::sync::LazyLock;

use chrono::{DateTime, Datelike, Days, Months, TimeDelta, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

pub use interval::{describe_interval, interval_to_ms, round_interval, seconds_to_hms, IntervalInfo};

static DURATION_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)(.+)").expect("duration token regex is valid"));

static DECIMAL_DURATION_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]*[.]?[0-9]+)(.+)").expect("decimal duration token regex is valid")
});

const GO_UNITS: &[&str] = &["h", "m", "s", "ms", "us", "µs", "ns"];
const GRAFANA_UNITS: &[&str] = &["y", "M", "w", "d", "h", "m", "s", "ms"];

/// Calendar units understood by [`parse_duration`], largest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DurationUnit {
    Years,
    Months,
    Weeks,
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl DurationUnit {
    /// All units in descending order.
    pub const ALL: [DurationUnit; 7] = [
        DurationUnit::Years,
        DurationUnit::Months,
        DurationUnit::Weeks,
        DurationUnit::Days,
        DurationUnit::Hours,
        DurationUnit::Minutes,
        DurationUnit::Seconds,
    ];

    /// Accepted abbreviations. The first entry is used when formatting.
    ///
    /// Matching is case-sensitive: `M` is months, `m` is minutes.
    pub fn abbreviations(self) -> &'static [&'static str] {
        match self {
            DurationUnit::Years => &["y", "Y", "years"],
            DurationUnit::Months => &["M", "months"],
            DurationUnit::Weeks => &["w", "W", "weeks"],
            DurationUnit::Days => &["d", "D", "days"],
            DurationUnit::Hours => &["h", "H", "hours"],
            DurationUnit::Minutes => &["m", "minutes"],
            DurationUnit::Seconds => &["s", "S", "seconds"],
        }
    }

    /// Resolve an abbreviation to its unit.
    pub fn from_abbreviation(abbr: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|unit| unit.abbreviations().contains(&abbr))
    }

    fn short(self) -> &'static str {
        self.abbreviations()[0]
    }
}

/// Sparse calendar duration. Absent units are `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Duration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub months: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weeks: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seconds: Option<i64>,
}

impl Duration {
    /// Magnitude for `unit`, if set.
    pub fn get(&self, unit: DurationUnit) -> Option<i64> {
        match unit {
            DurationUnit::Years => self.years,
            DurationUnit::Months => self.months,
            DurationUnit::Weeks => self.weeks,
            DurationUnit::Days => self.days,
            DurationUnit::Hours => self.hours,
            DurationUnit::Minutes => self.minutes,
            DurationUnit::Seconds => self.seconds,
        }
    }

    /// Set the magnitude for `unit`.
    pub fn set(&mut self, unit: DurationUnit, value: i64) {
        let slot = match unit {
            DurationUnit::Years => &mut self.years,
            DurationUnit::Months => &mut self.months,
            DurationUnit::Weeks => &mut self.weeks,
            DurationUnit::Days => &mut self.days,
            DurationUnit::Hours => &mut self.hours,
            DurationUnit::Minutes => &mut self.minutes,
            DurationUnit::Seconds => &mut self.seconds,
        };
        *slot = Some(value);
    }

    /// Builder-style [`Duration::set`].
    pub fn with(mut self, unit: DurationUnit, value: i64) -> Self {
        self.set(unit, value);
        self
    }

    /// Returns `true` when every unit is absent or zero.
    pub fn is_zero(&self) -> bool {
        DurationUnit::ALL
            .into_iter()
            .all(|unit| self.get(unit).unwrap_or(0) == 0)
    }
}

/// A pair of instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }
}

/// Parse a space separated list of `<integer><unit>` tokens.
///
/// Tokens that do not match, or whose unit is unknown, are dropped. A later token for the
/// same unit overwrites an earlier one.
///
/// ```
/// use frame_pipeline::duration::parse_duration;
///
/// let d = parse_duration("3M 6v 5b 4m");
/// assert_eq!(d.months, Some(3));
/// assert_eq!(d.minutes, Some(4));
/// assert_eq!(d.days, None);
/// ```
pub fn parse_duration(text: &str) -> Duration {
    text.split(' ').fold(Duration::default(), |mut acc, token| {
        let Some(caps) = DURATION_TOKEN.captures(token) else {
            return acc;
        };
        let Some(unit) = DurationUnit::from_abbreviation(&caps[2]) else {
            return acc;
        };
        match caps[1].parse::<i64>() {
            Ok(length) => acc.set(unit, length),
            Err(_) => tracing::trace!(token, "dropping duration token with oversized length"),
        }
        acc
    })
}

/// Render a duration as abbreviated tokens in descending unit order (`"1M 8d 1h"`).
///
/// Absent and zero units are skipped. This is the inverse of [`parse_duration`] for the
/// units it emits.
pub fn format_duration(duration: &Duration) -> String {
    let mut out = String::new();
    for unit in DurationUnit::ALL {
        push_token(&mut out, unit, duration.get(unit));
    }
    out
}

fn push_token(out: &mut String, unit: DurationUnit, value: Option<i64>) {
    let Some(value) = value.filter(|v| *v != 0) else {
        return;
    };
    if !out.is_empty() {
        out.push(' ');
    }
    let _ = write!(out, "{value}{}", unit.short());
}

/// Calendar decomposition of an interval into years, months, days, hours, minutes and
/// seconds. Weeks are never produced; they fold into days.
///
/// Returns a zero duration when `start` is after `end`.
pub fn interval_to_duration(interval: &Interval) -> Duration {
    let Interval { start, end } = *interval;
    if start > end {
        return Duration::default();
    }

    let total_months = whole_months_between(start, end);
    let cursor = start
        .checked_add_months(Months::new(total_months))
        .unwrap_or(start);
    let rest = end - cursor;

    let days = rest.num_days();
    let secs = rest.num_seconds() - days * 86_400;

    Duration {
        years: Some(i64::from(total_months / 12)),
        months: Some(i64::from(total_months % 12)),
        weeks: None,
        days: Some(days),
        hours: Some(secs / 3_600),
        minutes: Some((secs % 3_600) / 60),
        seconds: Some(secs % 60),
    }
}

fn whole_months_between(start: DateTime<Utc>, end: DateTime<Utc>) -> u32 {
    let estimate = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    let mut n = u32::try_from(estimate.max(0)).unwrap_or(0);
    while n > 0 {
        match start.checked_add_months(Months::new(n)) {
            Some(shifted) if shifted <= end => break,
            _ => n -= 1,
        }
    }
    n
}

/// Abbreviated, space separated rendering of the time between `interval.start` and
/// `interval.end`, e.g. `"1M 8d 1h 1m 1s"`.
///
/// Returns `""` when `start` is after `end` (a client clock running behind the server).
/// With `include_seconds == false`, seconds are dropped unless nothing else was emitted.
pub fn interval_to_abbreviated_duration_string(interval: &Interval, include_seconds: bool) -> String {
    if interval.start > interval.end {
        return String::new();
    }
    let duration = interval_to_duration(interval);
    let mut out = String::new();
    for unit in DurationUnit::ALL {
        if unit == DurationUnit::Seconds && !include_seconds && !out.is_empty() {
            continue;
        }
        push_token(&mut out, unit, duration.get(unit));
    }
    out
}

/// Add a calendar duration to an instant.
///
/// Years and months shift the calendar month (clamping the day to the month's length),
/// weeks and days shift calendar days, and hours/minutes/seconds shift wall time. On
/// overflow the original date is returned.
pub fn add_duration_to_date(date: DateTime<Utc>, duration: &Duration) -> DateTime<Utc> {
    shift(date, duration).unwrap_or_else(|| {
        tracing::debug!(%date, ?duration, "duration arithmetic overflowed; date left unchanged");
        date
    })
}

fn shift(date: DateTime<Utc>, d: &Duration) -> Option<DateTime<Utc>> {
    let months = d
        .years
        .unwrap_or(0)
        .checked_mul(12)?
        .checked_add(d.months.unwrap_or(0))?;
    let days = d
        .weeks
        .unwrap_or(0)
        .checked_mul(7)?
        .checked_add(d.days.unwrap_or(0))?;
    let seconds = d
        .hours
        .unwrap_or(0)
        .checked_mul(3_600)?
        .checked_add(d.minutes.unwrap_or(0).checked_mul(60)?)?
        .checked_add(d.seconds.unwrap_or(0))?;

    let mut out = date;
    let month_step = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    out = if months >= 0 {
        out.checked_add_months(month_step)?
    } else {
        out.checked_sub_months(month_step)?
    };
    let day_step = Days::new(days.unsigned_abs());
    out = if days >= 0 {
        out.checked_add_days(day_step)?
    } else {
        out.checked_sub_days(day_step)?
    };
    out.checked_add_signed(TimeDelta::try_seconds(seconds)?)
}

/// Milliseconds spanned by `duration` when added to the current time.
///
/// Calendar units resolve relative to now: `1M` is 28 to 31 days depending on the month.
pub fn duration_to_milliseconds(duration: &Duration) -> i64 {
    duration_to_milliseconds_at(duration, Utc::now())
}

/// [`duration_to_milliseconds`] anchored at an explicit instant.
pub fn duration_to_milliseconds_at(duration: &Duration, now: DateTime<Utc>) -> i64 {
    (add_duration_to_date(now, duration) - now).num_milliseconds()
}

/// Strict check that every token is `<integer><unit>` with a unit from
/// [`DurationUnit::abbreviations`].
pub fn is_valid_duration(text: &str) -> bool {
    text.trim().split(' ').all(|token| {
        DURATION_TOKEN
            .captures(token)
            .is_some_and(|caps| DurationUnit::from_abbreviation(&caps[2]).is_some())
    })
}

/// Strict check against Go `time.ParseDuration` units (`h m s ms us µs ns`).
pub fn is_valid_go_duration(text: &str) -> bool {
    validate_duration_by_units(text, GO_UNITS)
}

/// Strict check against Grafana interval units (`y M w d h m s ms`).
pub fn is_valid_grafana_duration(text: &str) -> bool {
    validate_duration_by_units(text, GRAFANA_UNITS)
}

fn validate_duration_by_units(text: &str, units: &[&str]) -> bool {
    text.trim().split(' ').all(|token| {
        DECIMAL_DURATION_TOKEN
            .captures(token)
            .is_some_and(|caps| units.contains(&&caps[2]))
    })
}
