//! Unit-aware value formatting.
//!
//! Every unit id maps to a [`ValueFormatter`]: a pure function from
//! `(value, decimals, scaled_decimals)` to display text. The built-in catalog is grouped into
//! categories for unit pickers ([`get_unit_formats`]) and indexed by id for lookups
//! ([`get_value_format`]).
//!
//! The process-wide registry is built once, on first use, and is read-only afterwards. Code
//! that wants to avoid global state can construct its own [`ValueFormatRegistry`].
//!
//! ```
//! use frame_pipeline::valueformats::get_value_format;
//!
//! let bytes = get_value_format("bytes");
//! assert_eq!(bytes(Some(100_030_303.0), Some(2), None), "95.40 MiB");
//! ```

pub mod builders;
pub mod categories;
pub mod time;

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use serde::{Deserialize, Serialize};

use crate::error::{FrameError, FrameResult};

pub use builders::{
    binary_si_prefix, currency, decimal_si_prefix, scaled_units, simple_count_unit, to_fixed,
    to_fixed_scaled, to_fixed_unit,
};

/// Requested number of fraction digits; `None` lets the formatter decide.
pub type DecimalCount = Option<i32>;

/// `(value, decimals, scaled_decimals) -> text`. A `None` value formats as `""`.
pub type ValueFormatter = Arc<dyn Fn(Option<f64>, DecimalCount, DecimalCount) -> String + Send + Sync>;

/// Wrap a function or closure as a shareable [`ValueFormatter`].
pub fn formatter<F>(f: F) -> ValueFormatter
where
    F: Fn(Option<f64>, DecimalCount, DecimalCount) -> String + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A named unit in the catalog.
#[derive(Clone)]
pub struct ValueFormat {
    pub name: String,
    pub id: String,
    pub formatter: ValueFormatter,
}

impl fmt::Debug for ValueFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueFormat")
            .field("name", &self.name)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// Ordered group of units (`"data (IEC)"`, `"currency"`, …).
#[derive(Debug, Clone)]
pub struct ValueFormatCategory {
    pub name: String,
    pub formats: Vec<ValueFormat>,
}

/// Menu entry: display text plus the unit id it selects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitMenuItem {
    pub text: String,
    pub value: String,
}

/// Menu group for unit pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitMenuCategory {
    pub text: String,
    pub submenu: Vec<UnitMenuItem>,
}

/// Catalog of unit formatters, grouped by category and indexed by id.
pub struct ValueFormatRegistry {
    categories: Vec<ValueFormatCategory>,
    index: HashMap<String, ValueFormatter>,
}

impl fmt::Debug for ValueFormatRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueFormatRegistry")
            .field("categories", &self.categories.len())
            .field("units", &self.index.len())
            .finish()
    }
}

impl Default for ValueFormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static REGISTRY: LazyLock<ValueFormatRegistry> = LazyLock::new(|| {
    let registry = ValueFormatRegistry::new();
    tracing::debug!(units = registry.index.len(), "value format registry built");
    registry
});

impl ValueFormatRegistry {
    /// Build the built-in catalog.
    pub fn new() -> Self {
        Self::from_categories(categories::builtin_categories())
    }

    /// Build a registry from an explicit catalog. Later duplicates of an id win.
    pub fn from_categories(categories: Vec<ValueFormatCategory>) -> Self {
        let index = categories
            .iter()
            .flat_map(|c| c.formats.iter())
            .map(|f| (f.id.clone(), Arc::clone(&f.formatter)))
            .collect();
        Self { categories, index }
    }

    /// The shared, lazily built registry.
    pub fn global() -> &'static ValueFormatRegistry {
        &REGISTRY
    }

    pub fn categories(&self) -> &[ValueFormatCategory] {
        &self.categories
    }

    pub fn index(&self) -> &HashMap<String, ValueFormatter> {
        &self.index
    }

    /// Strict lookup: catalog ids and the custom prefixes only.
    pub fn try_get(&self, id: &str) -> FrameResult<ValueFormatter> {
        if let Some(f) = self.index.get(id) {
            return Ok(Arc::clone(f));
        }
        custom_format(id).ok_or_else(|| FrameError::UnknownId(id.to_string()))
    }

    /// Lenient lookup. An empty id means `none`; an unknown id becomes a fixed unit suffix.
    pub fn get(&self, id: &str) -> ValueFormatter {
        if id.is_empty() {
            return self.get("none");
        }
        match self.try_get(id) {
            Ok(f) => f,
            Err(_) => {
                tracing::trace!(unit = id, "unknown unit, using it as a suffix");
                to_fixed_unit(id)
            }
        }
    }

    /// Menu projection of the catalog.
    pub fn unit_menu(&self) -> Vec<UnitMenuCategory> {
        self.categories
            .iter()
            .map(|c| UnitMenuCategory {
                text: c.name.clone(),
                submenu: c
                    .formats
                    .iter()
                    .map(|f| UnitMenuItem {
                        text: f.name.clone(),
                        value: f.id.clone(),
                    })
                    .collect(),
            })
            .collect()
    }
}

/// Formatters built from `kind:argument` ids such as `suffix:/min` or `currency:CHF`.
fn custom_format(id: &str) -> Option<ValueFormatter> {
    let (kind, arg) = id.split_once(':')?;
    let f = match kind {
        "prefix" => builders::to_fixed_prefix(arg),
        "suffix" => builders::to_fixed_suffix(arg),
        "si" => decimal_si_prefix(arg, 0),
        "count" => simple_count_unit(arg),
        "currency" => currency(arg),
        _ => return None,
    };
    Some(f)
}

/// Formatter for `id` from the shared registry (lenient, see [`ValueFormatRegistry::get`]).
pub fn get_value_format(id: &str) -> ValueFormatter {
    REGISTRY.get(id)
}

/// Strict variant of [`get_value_format`].
pub fn try_get_value_format(id: &str) -> FrameResult<ValueFormatter> {
    REGISTRY.try_get(id)
}

/// Id → formatter index of the shared registry.
pub fn get_value_formatter_index() -> &'static HashMap<String, ValueFormatter> {
    REGISTRY.index()
}

/// Unit picker menu of the shared registry.
pub fn get_unit_formats() -> Vec<UnitMenuCategory> {
    REGISTRY.unit_menu()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_scale_with_binary_prefixes() {
        let f = get_value_format("bytes");
        assert_eq!(f(Some(100_030_303.0), Some(2), None), "95.40 MiB");
    }

    #[test]
    fn short_uses_scaled_decimals_per_step() {
        let f = get_value_format("short");
        assert_eq!(f(Some(1000.0), None, Some(0)), "1.000 K");
        assert_eq!(f(Some(1_000_000.0), None, Some(-3)), "1.000 Mil");
        assert_eq!(f(Some(1e30), Some(0), None), "NA");
    }

    #[test]
    fn unknown_ids_fall_back_to_a_suffix() {
        let f = get_value_format("widgets");
        assert_eq!(f(Some(3.0), Some(1), None), "3.0 widgets");
        assert!(matches!(try_get_value_format("widgets"), Err(FrameError::UnknownId(_))));
    }

    #[test]
    fn empty_id_means_none() {
        assert_eq!(get_value_format("")(Some(1.5), Some(2), None), "1.50");
    }

    #[test]
    fn custom_prefixed_ids() {
        assert_eq!(get_value_format("suffix:/min")(Some(2.0), Some(0), None), "2/min");
        assert_eq!(get_value_format("prefix:~")(Some(2.0), Some(0), None), "~2");
        assert_eq!(get_value_format("currency:CHF")(Some(1500.0), Some(1), None), "CHF1.5K");
        assert_eq!(get_value_format("count:jobs")(Some(12.0), Some(0), None), "12 jobs");
        assert_eq!(get_value_format("si:F")(Some(0.5), Some(1), None), "0.5 F");
        assert!(try_get_value_format("count:jobs").is_ok());
    }

    #[test]
    fn unit_menu_mirrors_categories() {
        let menu = get_unit_formats();
        let first = &menu[0];
        assert_eq!(first.text, "none");
        assert_eq!(
            first.submenu[0],
            UnitMenuItem {
                text: "none".into(),
                value: "none".into()
            }
        );
        let items: usize = menu.iter().map(|c| c.submenu.len()).sum();
        assert_eq!(items, get_value_formatter_index().len());
    }

    #[test]
    fn formatting_is_repeatable() {
        let f = get_value_format("decbytes");
        let a = f(Some(123_456.0), Some(2), None);
        let b = f(Some(123_456.0), Some(2), None);
        assert_eq!(a, b);
        assert_eq!(a, "123.46 kB");
    }
}
