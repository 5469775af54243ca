//! Column reducers for [`crate::types::Field`] values.

use serde::{Deserialize, Serialize};

use crate::types::{DataFrame, Field, Value};

/// Built-in reductions over a single column.
///
/// Nulls and non-numeric values are ignored by every reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReducerId {
    /// Number of numeric values.
    Count,
    Sum,
    Min,
    Max,
    /// Arithmetic mean, always a float.
    Mean,
    /// First numeric value.
    First,
    /// Last numeric value.
    Last,
    /// `max - min`.
    Range,
}

impl ReducerId {
    pub const ALL: [ReducerId; 8] = [
        ReducerId::Count,
        ReducerId::Sum,
        ReducerId::Min,
        ReducerId::Max,
        ReducerId::Mean,
        ReducerId::First,
        ReducerId::Last,
        ReducerId::Range,
    ];

    /// Id used in transformer options and as the output column name.
    pub fn id(self) -> &'static str {
        match self {
            ReducerId::Count => "count",
            ReducerId::Sum => "sum",
            ReducerId::Min => "min",
            ReducerId::Max => "max",
            ReducerId::Mean => "mean",
            ReducerId::First => "first",
            ReducerId::Last => "last",
            ReducerId::Range => "range",
        }
    }

    /// Human readable label.
    pub fn label(self) -> &'static str {
        match self {
            ReducerId::Count => "Count",
            ReducerId::Sum => "Total",
            ReducerId::Min => "Min",
            ReducerId::Max => "Max",
            ReducerId::Mean => "Mean",
            ReducerId::First => "First",
            ReducerId::Last => "Last",
            ReducerId::Range => "Range",
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    fn as_f64(self) -> f64 {
        match self {
            Num::Int(v) => v as f64,
            Num::Float(v) => v,
        }
    }

    fn into_value(self) -> Value {
        match self {
            Num::Int(v) => Value::Int64(v),
            Num::Float(v) => Value::Float64(v),
        }
    }
}

fn numbers(values: &[Value]) -> Vec<Num> {
    values
        .iter()
        .filter_map(|v| match v {
            Value::Int64(i) => Some(Num::Int(*i)),
            Value::Float64(f) if !f.is_nan() => Some(Num::Float(*f)),
            _ => None,
        })
        .collect()
}

fn fold(nums: &[Num], int_op: fn(i64, i64) -> Option<i64>, float_op: fn(f64, f64) -> f64) -> Value {
    let mut iter = nums.iter().copied();
    let Some(mut acc) = iter.next() else {
        return Value::Null;
    };
    for n in iter {
        acc = match (acc, n) {
            (Num::Int(a), Num::Int(b)) => match int_op(a, b) {
                Some(v) => Num::Int(v),
                None => Num::Float(float_op(a as f64, b as f64)),
            },
            (a, b) => Num::Float(float_op(a.as_f64(), b.as_f64())),
        };
    }
    acc.into_value()
}

/// Reduce a slice of values. Integer columns stay integers for `sum`, `min`, `max`, `first`,
/// `last` and `range`; an empty input yields [`Value::Null`] (or `0` for `count`).
pub fn reduce_values(values: &[Value], op: ReducerId) -> Value {
    let nums = numbers(values);
    match op {
        ReducerId::Count => Value::Int64(nums.len() as i64),
        ReducerId::Sum => fold(&nums, i64::checked_add, |a, b| a + b),
        ReducerId::Min => fold(&nums, |a, b| Some(a.min(b)), f64::min),
        ReducerId::Max => fold(&nums, |a, b| Some(a.max(b)), f64::max),
        ReducerId::Mean => {
            if nums.is_empty() {
                Value::Null
            } else {
                let total: f64 = nums.iter().map(|n| n.as_f64()).sum();
                Value::Float64(total / nums.len() as f64)
            }
        }
        ReducerId::First => nums.first().map_or(Value::Null, |n| n.into_value()),
        ReducerId::Last => nums.last().map_or(Value::Null, |n| n.into_value()),
        ReducerId::Range => {
            let min = reduce_values(values, ReducerId::Min);
            let max = reduce_values(values, ReducerId::Max);
            match (min, max) {
                (Value::Int64(lo), Value::Int64(hi)) => match hi.checked_sub(lo) {
                    Some(v) => Value::Int64(v),
                    None => Value::Float64(hi as f64 - lo as f64),
                },
                (lo, hi) => match (lo.as_f64(), hi.as_f64()) {
                    (Some(lo), Some(hi)) => Value::Float64(hi - lo),
                    _ => Value::Null,
                },
            }
        }
    }
}

/// Apply several reducers to one field, in the given order.
pub fn reduce_field(field: &Field, ops: &[ReducerId]) -> Vec<(ReducerId, Value)> {
    ops.iter()
        .map(|&op| (op, reduce_values(&field.values, op)))
        .collect()
}

/// Reduce the column named `column` (by display name).
///
/// Returns `None` if the frame has no such column.
pub fn reduce(frame: &DataFrame, column: &str, op: ReducerId) -> Option<Value> {
    frame
        .field_by_name(column)
        .map(|field| reduce_values(&field.values, op))
}

#[cfg(test)]
mod tests {
    use super::{ReducerId, reduce, reduce_values};
    use crate::types::{DataFrame, Field, FieldType, Value};

    fn numeric_frame_with_nulls() -> DataFrame {
        DataFrame::new(vec![
            Field::new(
                "id",
                FieldType::Number,
                vec![Value::Int64(1), Value::Int64(2), Value::Int64(3)],
            ),
            Field::new(
                "score",
                FieldType::Number,
                vec![Value::Float64(10.0), Value::Null, Value::Float64(5.5)],
            ),
        ])
    }

    #[test]
    fn count_ignores_nulls() {
        let frame = numeric_frame_with_nulls();
        assert_eq!(reduce(&frame, "score", ReducerId::Count), Some(Value::Int64(2)));
        assert_eq!(reduce(&frame, "id", ReducerId::Count), Some(Value::Int64(3)));
    }

    #[test]
    fn sum_ignores_nulls_and_preserves_type() {
        let frame = numeric_frame_with_nulls();
        assert_eq!(reduce(&frame, "score", ReducerId::Sum), Some(Value::Float64(15.5)));
        assert_eq!(reduce(&frame, "id", ReducerId::Sum), Some(Value::Int64(6)));
    }

    #[test]
    fn min_max_range_mean() {
        let frame = numeric_frame_with_nulls();
        assert_eq!(reduce(&frame, "score", ReducerId::Min), Some(Value::Float64(5.5)));
        assert_eq!(reduce(&frame, "score", ReducerId::Max), Some(Value::Float64(10.0)));
        assert_eq!(reduce(&frame, "score", ReducerId::Range), Some(Value::Float64(4.5)));
        assert_eq!(reduce(&frame, "id", ReducerId::Range), Some(Value::Int64(2)));
        assert_eq!(reduce(&frame, "id", ReducerId::Mean), Some(Value::Float64(2.0)));
    }

    #[test]
    fn first_and_last_skip_nulls() {
        let values = vec![Value::Null, Value::Int64(4), Value::Int64(9), Value::Null];
        assert_eq!(reduce_values(&values, ReducerId::First), Value::Int64(4));
        assert_eq!(reduce_values(&values, ReducerId::Last), Value::Int64(9));
    }

    #[test]
    fn mixed_integer_and_float_values_widen() {
        let values = vec![Value::Int64(1), Value::Float64(0.5)];
        assert_eq!(reduce_values(&values, ReducerId::Sum), Value::Float64(1.5));
    }

    #[test]
    fn missing_column_is_none() {
        let frame = numeric_frame_with_nulls();
        assert_eq!(reduce(&frame, "missing", ReducerId::Count), None);
    }

    #[test]
    fn all_null_column_reduces_to_null() {
        let values = vec![Value::Null, Value::Null];
        assert_eq!(reduce_values(&values, ReducerId::Sum), Value::Null);
        assert_eq!(reduce_values(&values, ReducerId::Min), Value::Null);
        assert_eq!(reduce_values(&values, ReducerId::Mean), Value::Null);
        assert_eq!(reduce_values(&values, ReducerId::Count), Value::Int64(0));
    }
}
