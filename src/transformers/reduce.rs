use serde::{Deserialize, Serialize};

use super::{DataTransformer, TransformContext, decode_options};
use crate::processing::{ReducerId, reduce_field};
use crate::types::{DataFrame, Field, FieldType, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReduceOptions {
    pub reducers: Vec<ReducerId>,
    pub include_time_field: bool,
}

/// Collapse every numeric field of every frame into one row of reductions.
///
/// The result is a single frame with a `Field` column holding the source display names and
/// one number column per reducer, labelled by [`ReducerId::label`]. Time fields are skipped
/// unless `include_time_field` is set.
pub fn reduce_frames(options: &ReduceOptions, frames: Vec<DataFrame>) -> Vec<DataFrame> {
    if options.reducers.is_empty() || frames.is_empty() {
        return frames;
    }

    let mut names = Vec::new();
    let mut columns: Vec<Vec<Value>> = vec![Vec::new(); options.reducers.len()];
    for field in frames.iter().flat_map(|f| f.fields.iter()) {
        let wanted = match field.field_type {
            FieldType::Number => true,
            FieldType::Time => options.include_time_field,
            _ => false,
        };
        if !wanted {
            continue;
        }
        names.push(Value::from(field.display_name()));
        for (column, (_, value)) in columns.iter_mut().zip(reduce_field(field, &options.reducers)) {
            column.push(value);
        }
    }

    let mut fields = vec![Field::new("Field", FieldType::String, names)];
    fields.extend(
        options
            .reducers
            .iter()
            .zip(columns)
            .map(|(op, values)| Field::new(op.label(), FieldType::Number, values)),
    );

    let mut out = DataFrame::new(fields);
    out.ref_id = frames[0].ref_id.clone();
    vec![out]
}

pub struct ReduceTransformer;

impl DataTransformer for ReduceTransformer {
    fn id(&self) -> &'static str {
        "reduce"
    }

    fn name(&self) -> &'static str {
        "Reduce"
    }

    fn description(&self) -> &'static str {
        "Reduce all rows or data points to a single value using a function like max, min, mean or last."
    }

    fn transform(
        &self,
        options: &serde_json::Value,
        _ctx: &TransformContext,
        frames: Vec<DataFrame>,
    ) -> Vec<DataFrame> {
        match decode_options::<ReduceOptions>(self.id(), options) {
            Some(opts) => reduce_frames(&opts, frames),
            None => frames,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn frames() -> Vec<DataFrame> {
        vec![
            DataFrame::new(vec![
                Field::new("time", FieldType::Time, vec![Value::Int64(1000), Value::Int64(2000)]),
                Field::new("cpu", FieldType::Number, vec![Value::Int64(2), Value::Int64(6)]),
                Field::new("host", FieldType::String, vec!["a".into(), "a".into()]),
            ])
            .with_ref_id("A"),
            DataFrame::new(vec![Field::new(
                "mem",
                FieldType::Number,
                vec![Value::Float64(0.5), Value::Null],
            )]),
        ]
    }

    #[test]
    fn one_row_per_numeric_field() {
        let out = ReduceTransformer.transform(
            &json!({ "reducers": ["max", "mean", "sum"] }),
            &TransformContext::default(),
            frames(),
        );
        assert_eq!(out.len(), 1);
        let frame = &out[0];
        assert_eq!(frame.ref_id.as_deref(), Some("A"));
        assert_eq!(frame.field_names().collect::<Vec<_>>(), vec!["Field", "Max", "Mean", "Total"]);
        assert_eq!(frame.fields[0].values, vec![Value::from("cpu"), Value::from("mem")]);
        assert_eq!(frame.fields[1].values, vec![Value::Int64(6), Value::Float64(0.5)]);
        assert_eq!(frame.fields[2].values, vec![Value::Float64(4.0), Value::Float64(0.5)]);
        assert_eq!(frame.length, 2);
    }

    #[test]
    fn time_fields_on_request() {
        let opts = ReduceOptions {
            reducers: vec![ReducerId::First],
            include_time_field: true,
        };
        let out = reduce_frames(&opts, frames());
        assert_eq!(out[0].fields[0].values[0], Value::from("time"));
        assert_eq!(out[0].fields[1].values[0], Value::Int64(1000));
    }

    #[test]
    fn no_reducers_pass_through() {
        assert_eq!(reduce_frames(&ReduceOptions::default(), frames()), frames());
    }
}
