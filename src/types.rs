//! Core columnar data model.
//!
//! A [`DataFrame`] is an ordered list of named, typed [`Field`] columns of equal length.
//! Frames are produced by ingestion or by a prior transform and are treated as immutable:
//! transforms build new frames instead of mutating their input.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::display::{ThresholdsConfig, ValueMapping};
use crate::error::{FrameError, FrameResult};

/// Logical type of a [`Field`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Epoch milliseconds.
    Time,
    /// Numeric measurements.
    Number,
    /// UTF-8 text.
    String,
    /// Booleans.
    Boolean,
    /// Anything else (lists, objects, mixed columns).
    #[default]
    Other,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FieldType::Time => "time",
            FieldType::Number => "number",
            FieldType::String => "string",
            FieldType::Boolean => "boolean",
            FieldType::Other => "other",
        };
        f.write_str(s)
    }
}

/// A single raw cell value.
///
/// Serializes to plain JSON (`null`, numbers, strings, arrays, objects).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing value.
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float (may be NaN or infinite).
    Float64(f64),
    /// UTF-8 string.
    Utf8(String),
    /// Ordered list of values.
    List(Vec<Value>),
    /// Key/value object.
    Object(BTreeMap<String, Value>),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of integer and float values. Other variants return `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int64(v) => Some(*v as f64),
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }

    /// Text rendering used for display and for grouping keys.
    ///
    /// Nulls render as `""`, floats use the shortest round-trip representation (`"1"`,
    /// `"0.5"`, `"NaN"`, `"1e+21"`), lists join their items with `,` and objects render as
    /// `"[object Object]"`.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int64(v) => v.to_string(),
            Value::Float64(v) => number_to_string(*v),
            Value::Utf8(s) => s.clone(),
            Value::List(items) => items
                .iter()
                .map(Value::to_text)
                .collect::<Vec<_>>()
                .join(","),
            Value::Object(_) => "[object Object]".to_string(),
        }
    }

    /// Numeric coercion used by the display layer.
    ///
    /// Nulls, lists, objects and empty strings are `NaN`; booleans are `1`/`0`; strings are
    /// parsed as decimal, hexadecimal (`0x`), or `Infinity` literals.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Null | Value::List(_) | Value::Object(_) => f64::NAN,
            Value::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Int64(v) => *v as f64,
            Value::Float64(v) => *v,
            Value::Utf8(s) if s.is_empty() => f64::NAN,
            Value::Utf8(s) => parse_number(s),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Utf8(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Utf8(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Shortest round-trip rendering of a float, switching to exponent notation outside
/// `[1e-6, 1e21)` the way dashboards have always printed numbers.
pub fn number_to_string(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if v == 0.0 {
        return "0".to_string();
    }
    let abs = v.abs();
    if (1e-6..1e21).contains(&abs) {
        return format!("{v}");
    }
    exponent_with_sign(&format!("{v:e}"))
}

/// Rewrites Rust exponent output (`1.5e-7`, `1e21`) into signed form (`1.5e-7`, `1e+21`).
pub(crate) fn exponent_with_sign(s: &str) -> String {
    match s.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => s.to_string(),
    }
}

fn parse_number(s: &str) -> f64 {
    let t = s.trim();
    if t.is_empty() {
        return 0.0;
    }
    match t {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if let Some(hex) = t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
        return i64::from_str_radix(hex, 16)
            .map(|v| v as f64)
            .unwrap_or(f64::NAN);
    }
    // Reject Rust-only spellings such as "inf" and "nan".
    if t.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return f64::NAN;
    }
    t.parse::<f64>().unwrap_or(f64::NAN)
}

/// Display configuration attached to a [`Field`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldConfig {
    /// Overrides the field name in displays and name-based matching.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Unit id understood by the value format registry (e.g. `bytes`, `percent`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Fixed number of decimals. `None` selects decimals from the value magnitude.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimals: Option<i32>,
    /// Lower bound of the expected range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Upper bound of the expected range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Value-to-text overrides, checked in order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mappings: Vec<ValueMapping>,
    /// Color thresholds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<ThresholdsConfig>,
    /// Text shown when a value renders empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_value: Option<String>,
}

impl FieldConfig {
    /// Returns `true` when no option is set.
    pub fn is_empty(&self) -> bool {
        *self == FieldConfig::default()
    }
}

/// A named, typed column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Column name.
    pub name: String,
    /// Logical type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Values, index-aligned with frame rows.
    pub values: Vec<Value>,
    /// Display configuration.
    #[serde(default)]
    pub config: FieldConfig,
}

impl Field {
    /// Create a field with empty config.
    pub fn new(name: impl Into<String>, field_type: FieldType, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            field_type,
            values,
            config: FieldConfig::default(),
        }
    }

    /// Builder-style config setter.
    pub fn with_config(mut self, config: FieldConfig) -> Self {
        self.config = config;
        self
    }

    /// `config.display_name` when set, otherwise the field name.
    pub fn display_name(&self) -> &str {
        self.config.display_name.as_deref().unwrap_or(&self.name)
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the column holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// New field holding only the rows at `indices`, in that order.
    ///
    /// Name and type are kept; the config is an independent copy.
    pub fn take(&self, indices: &[usize]) -> Field {
        let values = indices
            .iter()
            .map(|&i| self.values.get(i).cloned().unwrap_or_default())
            .collect();
        Field {
            name: self.name.clone(),
            field_type: self.field_type,
            values,
            config: self.config.clone(),
        }
    }
}

/// An ordered set of equal-length fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataFrame {
    /// Frame name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Identifier of the query that produced the frame.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_id: Option<String>,
    /// Columns.
    pub fields: Vec<Field>,
    /// Row count; every field holds exactly this many values.
    pub length: usize,
}

impl DataFrame {
    /// Create a frame from fields. The length is taken from the first field.
    ///
    /// # Panics
    ///
    /// Panics if the fields differ in length. Use [`DataFrame::try_new`] for untrusted input.
    pub fn new(fields: Vec<Field>) -> Self {
        match Self::try_new(fields) {
            Ok(frame) => frame,
            Err(err) => panic!("{err}"),
        }
    }

    /// Create a frame from fields, rejecting ragged columns.
    pub fn try_new(fields: Vec<Field>) -> FrameResult<Self> {
        let length = fields.first().map_or(0, Field::len);
        if let Some(ragged) = fields.iter().find(|f| f.len() != length) {
            return Err(FrameError::SchemaMismatch {
                message: format!(
                    "field '{}' has {} values, expected {length}",
                    ragged.name,
                    ragged.len()
                ),
            });
        }
        Ok(Self {
            name: None,
            ref_id: None,
            fields,
            length,
        })
    }

    /// Builder-style name setter.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder-style refId setter.
    pub fn with_ref_id(mut self, ref_id: impl Into<String>) -> Self {
        self.ref_id = Some(ref_id.into());
        self
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.length
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Index of the first field whose display name equals `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.display_name() == name)
    }

    /// First field whose display name equals `name`.
    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.index_of(name).map(|i| &self.fields[i])
    }

    /// New frame holding the rows at `indices` (in that order) across all fields.
    ///
    /// Name and refId are preserved.
    pub fn take_rows(&self, indices: &[usize]) -> Self {
        Self {
            name: self.name.clone(),
            ref_id: self.ref_id.clone(),
            fields: self.fields.iter().map(|f| f.take(indices)).collect(),
            length: indices.len(),
        }
    }

    /// Create a new frame containing only rows for which `predicate` returns `true`.
    ///
    /// The predicate receives the row index.
    pub fn filter_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(usize) -> bool,
    {
        let indices: Vec<usize> = (0..self.length).filter(|&i| predicate(i)).collect();
        self.take_rows(&indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_to_string_matches_dashboard_rendering() {
        assert_eq!(number_to_string(1.0), "1");
        assert_eq!(number_to_string(0.5), "0.5");
        assert_eq!(number_to_string(-12.25), "-12.25");
        assert_eq!(number_to_string(1e21), "1e+21");
        assert_eq!(number_to_string(1.5e-7), "1.5e-7");
        assert_eq!(number_to_string(f64::NAN), "NaN");
        assert_eq!(number_to_string(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn to_number_coerces_like_the_display_layer() {
        assert!(Value::Null.to_number().is_nan());
        assert!(Value::Utf8(String::new()).to_number().is_nan());
        assert!(Value::List(vec![Value::Int64(1)]).to_number().is_nan());
        assert_eq!(Value::Bool(true).to_number(), 1.0);
        assert_eq!(Value::Utf8(" 12.5 ".into()).to_number(), 12.5);
        assert_eq!(Value::Utf8("0x1A".into()).to_number(), 26.0);
        assert!(Value::Utf8("inf".into()).to_number().is_nan());
        assert!(Value::Utf8("abc".into()).to_number().is_nan());
    }

    #[test]
    fn to_text_joins_lists_and_blanks_nulls() {
        let v = Value::List(vec![Value::Int64(1), Value::Null, Value::Utf8("x".into())]);
        assert_eq!(v.to_text(), "1,,x");
        assert_eq!(Value::Object(BTreeMap::new()).to_text(), "[object Object]");
        assert_eq!(Value::Null.to_text(), "");
    }

    #[test]
    fn filter_rows_keeps_name_and_ref_id() {
        let frame = DataFrame::new(vec![Field::new(
            "v",
            FieldType::Number,
            vec![1.0.into(), 2.0.into(), 3.0.into()],
        )])
        .with_name("A")
        .with_ref_id("q");

        let out = frame.filter_rows(|i| i != 1);
        assert_eq!(out.length, 2);
        assert_eq!(out.name.as_deref(), Some("A"));
        assert_eq!(out.ref_id.as_deref(), Some("q"));
        assert_eq!(out.fields[0].values, vec![Value::Float64(1.0), Value::Float64(3.0)]);
        assert_eq!(frame.length, 3);
    }

    #[test]
    fn display_name_drives_lookup() {
        let mut field = Field::new("raw", FieldType::Number, vec![]);
        field.config.display_name = Some("Pretty".into());
        let frame = DataFrame::new(vec![field]);
        assert_eq!(frame.index_of("Pretty"), Some(0));
        assert_eq!(frame.index_of("raw"), None);
    }

    #[test]
    fn frame_json_shape_uses_camel_case() {
        let frame = DataFrame::new(vec![Field::new("a", FieldType::String, vec!["x".into()])])
            .with_ref_id("A");
        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json["refId"], "A");
        assert_eq!(json["fields"][0]["type"], "string");
        assert_eq!(json["length"], 1);
    }

    #[test]
    fn ragged_fields_are_rejected() {
        let fields = vec![
            Field::new("a", FieldType::Number, vec![1.0.into(), 2.0.into()]),
            Field::new("b", FieldType::Number, vec![1.0.into()]),
        ];
        let err = DataFrame::try_new(fields).unwrap_err();
        assert!(matches!(err, FrameError::SchemaMismatch { .. }));
        assert!(err.to_string().contains("field 'b' has 1 values, expected 2"));

        let empty = DataFrame::try_new(Vec::new()).unwrap();
        assert_eq!(empty.length, 0);
    }

    #[test]
    #[should_panic(expected = "schema mismatch")]
    fn new_panics_on_ragged_fields() {
        DataFrame::new(vec![
            Field::new("a", FieldType::String, vec!["x".into(), "y".into()]),
            Field::new("b", FieldType::String, vec![]),
        ]);
    }
}
