//! Turning raw values into display text, numbers and colors.
//!
//! A [`DisplayProcessor`] is built once per field configuration and then applied to every
//! value of the field. For each value it:
//!
//! 1. checks the value mappings (first match wins; a mapped text is never unit-formatted),
//! 2. formats numeric values with the configured unit and decimals,
//! 3. picks a color from the thresholds unless a mapping already set one,
//! 4. substitutes the `no_value` text when the result is empty.
//!
//! Without any configuration values are only coerced: the text is the value's plain
//! rendering and the number its numeric coercion.

mod decimals;
mod mappings;
mod thresholds;

use serde::Serialize;

use crate::types::{Field, FieldConfig, Value};
use crate::valueformats::{ValueFormatRegistry, ValueFormatter};

pub use decimals::{DecimalInfo, get_decimals_for_value};
pub use mappings::{
    JsRegex, SpecialValueMatch, ValueMapper, ValueMapping, ValueMappingResult,
    get_value_mapping_result,
};
pub use thresholds::{Threshold, ThresholdsConfig, ThresholdsMode};

/// Display form of a single value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayValue {
    pub text: String,
    /// Numeric coercion of the raw value; `NaN` when there is none.
    pub numeric: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl DisplayValue {
    fn plain(value: &Value) -> Self {
        Self {
            text: value.to_text(),
            numeric: value.to_number(),
            color: None,
        }
    }
}

struct Configured {
    config: FieldConfig,
    formatter: ValueFormatter,
    mapper: ValueMapper,
}

/// Maps raw values of one field to [`DisplayValue`]s.
pub struct DisplayProcessor {
    configured: Option<Configured>,
}

impl std::fmt::Debug for DisplayProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisplayProcessor")
            .field("config", &self.configured.as_ref().map(|c| &c.config))
            .finish()
    }
}

impl DisplayProcessor {
    /// Processor that only coerces values.
    pub fn plain() -> Self {
        Self { configured: None }
    }

    /// Processor for `config`, resolving units against the shared registry.
    pub fn new(config: &FieldConfig) -> Self {
        Self::with_registry(config, ValueFormatRegistry::global())
    }

    /// Processor for `config`, resolving units against `registry`.
    pub fn with_registry(config: &FieldConfig, registry: &ValueFormatRegistry) -> Self {
        let unit = config.unit.as_deref().unwrap_or("none");
        let mut config = config.clone();
        if let Some(thresholds) = config.thresholds.as_mut() {
            thresholds.sort_steps();
        }
        Self {
            configured: Some(Configured {
                formatter: registry.get(unit),
                mapper: ValueMapper::new(&config.mappings),
                config,
            }),
        }
    }

    /// Processor for a field's own config; an empty config yields [`DisplayProcessor::plain`].
    pub fn for_field(field: &Field) -> Self {
        get_display_processor(Some(&field.config))
    }

    pub fn display(&self, value: &Value) -> DisplayValue {
        let Some(c) = &self.configured else {
            return DisplayValue::plain(value);
        };

        let mut text = value.to_text();
        let numeric = value.to_number();
        let mut color = None;
        let mut should_format = true;

        if let Some(mapped) = c.mapper.map(value) {
            if let Some(mapped_text) = mapped.text {
                text = mapped_text;
                should_format = false;
            }
            color = mapped.color;
        }

        if !numeric.is_nan() && !matches!(value, Value::Bool(_)) {
            if should_format {
                let info = get_decimals_for_value(numeric, c.config.decimals);
                text = (c.formatter)(Some(numeric), info.decimals, info.scaled_decimals);
            }
            if color.is_none() {
                color = c
                    .config
                    .thresholds
                    .as_ref()
                    .and_then(|t| t.active_step(numeric, c.config.min, c.config.max))
                    .map(|step| step.color.clone());
            }
        }

        if text.is_empty() {
            text = c.config.no_value.clone().unwrap_or_default();
        }

        DisplayValue {
            text,
            numeric,
            color,
        }
    }

    /// Display every value of `field`, in row order.
    pub fn display_field(&self, field: &Field) -> Vec<DisplayValue> {
        field.values.iter().map(|v| self.display(v)).collect()
    }
}

/// Processor for an optional config: `None` or an empty config only coerces values.
pub fn get_display_processor(config: Option<&FieldConfig>) -> DisplayProcessor {
    match config {
        Some(config) if !config.is_empty() => DisplayProcessor::new(config),
        _ => DisplayProcessor::plain(),
    }
}
