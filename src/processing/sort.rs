//! Row ordering for [`crate::types::DataFrame`].

use std::cmp::Ordering;

use crate::types::{DataFrame, Value};

/// Order two cells: numbers numerically, text lexically, numbers before text and nulls last.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    fn rank(v: &Value) -> u8 {
        match v {
            Value::Int64(_) | Value::Float64(_) | Value::Bool(_) => 0,
            Value::Utf8(_) | Value::List(_) | Value::Object(_) => 1,
            Value::Null => 2,
        }
    }

    match (rank(a), rank(b)) {
        (0, 0) => a.to_number().total_cmp(&b.to_number()),
        (1, 1) => a.to_text().cmp(&b.to_text()),
        (ra, rb) => ra.cmp(&rb),
    }
}

/// Stable sort of all rows by `column`. Nulls stay last in both directions.
///
/// Returns `None` if the frame has no such column.
pub fn sort_by(frame: &DataFrame, column: &str, descending: bool) -> Option<DataFrame> {
    let field = frame.field_by_name(column)?;
    let mut indices: Vec<usize> = (0..frame.length).collect();
    indices.sort_by(|&i, &j| {
        let (a, b) = (&field.values[i], &field.values[j]);
        match (a.is_null(), b.is_null()) {
            (false, false) if descending => compare_values(b, a),
            _ => compare_values(a, b),
        }
    });
    Some(frame.take_rows(&indices))
}
