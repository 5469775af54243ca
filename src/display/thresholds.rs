//! Color thresholds.

use serde::{Deserialize, Serialize};

/// How step values are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdsMode {
    /// Steps are raw values.
    #[default]
    Absolute,
    /// Steps are percentages of the field's `min..max` range.
    Percentage,
}

/// One step. The base step has no value and applies below every other step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    #[serde(default)]
    pub value: Option<f64>,
    pub color: String,
}

impl Threshold {
    pub fn new(value: Option<f64>, color: impl Into<String>) -> Self {
        Self {
            value,
            color: color.into(),
        }
    }

    fn lower_bound(&self) -> f64 {
        self.value.unwrap_or(f64::NEG_INFINITY)
    }
}

/// Ordered threshold steps plus their interpretation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdsConfig {
    pub mode: ThresholdsMode,
    pub steps: Vec<Threshold>,
}

impl ThresholdsConfig {
    pub fn new(mode: ThresholdsMode, steps: Vec<Threshold>) -> Self {
        Self { mode, steps }
    }

    /// Highest step whose value is at or below `value`.
    ///
    /// Percentage mode rescales `value` into `0..100` using `min`/`max`; without both bounds
    /// (or with an empty range) the raw value is compared instead.
    pub fn active_step(&self, value: f64, min: Option<f64>, max: Option<f64>) -> Option<&Threshold> {
        let value = match (self.mode, min, max) {
            (ThresholdsMode::Percentage, Some(min), Some(max)) if max > min => {
                (value - min) / (max - min) * 100.0
            }
            _ => value,
        };

        if self.is_sorted() {
            return highest_at_or_below(self.steps.iter(), value);
        }
        let mut steps: Vec<&Threshold> = self.steps.iter().collect();
        steps.sort_by(|a, b| a.lower_bound().total_cmp(&b.lower_bound()));
        highest_at_or_below(steps.into_iter(), value)
    }

    /// Order steps by value, base step first. Steps with equal values keep their order.
    pub fn sort_steps(&mut self) {
        self.steps.sort_by(|a, b| a.lower_bound().total_cmp(&b.lower_bound()));
    }

    fn is_sorted(&self) -> bool {
        self.steps
            .windows(2)
            .all(|w| w[0].lower_bound().total_cmp(&w[1].lower_bound()).is_le())
    }
}

fn highest_at_or_below<'a>(mut steps: impl Iterator<Item = &'a Threshold>, value: f64) -> Option<&'a Threshold> {
    let mut active = steps.next()?;
    for step in steps {
        if value < step.lower_bound() {
            break;
        }
        active = step;
    }
    Some(active)
}
