use frame_pipeline::transformers::{
    DataTransformerConfig, SplitByOptions, TransformContext, TransformerRegistry, split_by, transform_data_frame,
};
use frame_pipeline::types::{DataFrame, Field, FieldConfig, FieldType, Value};
use serde_json::json;

fn grouped() -> DataFrame {
    let groups = ["one", "two", "two", "three", "three", "three"];
    DataFrame::new(vec![
        Field::new("group", FieldType::String, groups.iter().map(|&g| g.into()).collect()),
        Field::new("values", FieldType::Number, (1..=6).map(|i| Value::Float64(i as f64)).collect()).with_config(
            FieldConfig {
                unit: Some("short".into()),
                decimals: Some(2),
                ..FieldConfig::default()
            },
        ),
    ])
    .with_ref_id("A")
}

fn run(options: serde_json::Value, frames: Vec<DataFrame>) -> Vec<DataFrame> {
    transform_data_frame(
        &TransformContext::default(),
        &[DataTransformerConfig::new("splitBy", options)],
        frames,
    )
}

#[test]
fn splits_into_groups_in_first_seen_order() {
    let out = run(json!({ "field": "group" }), vec![grouped()]);

    assert_eq!(out.len(), 3);
    let names: Vec<Option<&str>> = out.iter().map(|f| f.name.as_deref()).collect();
    assert_eq!(names, vec![Some("one"), Some("two"), Some("three")]);
    let lengths: Vec<usize> = out.iter().map(|f| f.length).collect();
    assert_eq!(lengths, vec![1, 2, 3]);

    for frame in &out {
        assert_eq!(frame.ref_id.as_deref(), Some("A"));
        assert_eq!(frame.field_names().collect::<Vec<_>>(), vec!["values"]);
        assert_eq!(frame.fields[0].len(), frame.length);
        assert_eq!(frame.fields[0].field_type, FieldType::Number);
    }
    assert_eq!(out[1].fields[0].values, vec![Value::Float64(2.0), Value::Float64(3.0)]);
}

#[test]
fn output_configs_are_independent() {
    let mut out = run(json!({ "field": "group" }), vec![grouped()]);
    out[0].fields[0].config.decimals = Some(5);
    out[0].fields[0].config.unit = None;

    for frame in &out[1..] {
        assert_eq!(frame.fields[0].config.decimals, Some(2));
        assert_eq!(frame.fields[0].config.unit.as_deref(), Some("short"));
    }
}

#[test]
fn several_input_frames_are_returned_unchanged() {
    let input = vec![grouped(), grouped().with_name("other")];
    assert_eq!(run(json!({ "field": "group" }), input.clone()), input);
}

#[test]
fn unknown_field_returns_the_input() {
    let input = vec![grouped()];
    assert_eq!(run(json!({ "field": "nope" }), input.clone()), input);
}

#[test]
fn grouping_uses_the_display_name() {
    let mut frame = grouped();
    frame.fields[0].config.display_name = Some("Bucket".into());
    let out = split_by(
        &SplitByOptions {
            field: "Bucket".into(),
        },
        vec![frame],
    );
    assert_eq!(out.len(), 3);
}

#[test]
fn null_values_form_their_own_group() {
    let frame = DataFrame::new(vec![
        Field::new("k", FieldType::String, vec!["a".into(), Value::Null, "a".into()]),
        Field::new("v", FieldType::Number, vec![Value::Int64(1), Value::Int64(2), Value::Int64(3)]),
    ]);
    let out = run(json!({ "field": "k" }), vec![frame]);
    let names: Vec<Option<&str>> = out.iter().map(|f| f.name.as_deref()).collect();
    assert_eq!(names, vec![Some("a"), Some("null")]);
}

#[test]
fn registry_describes_split_by() {
    let transformer = TransformerRegistry::standard().try_get("splitBy").unwrap();
    assert_eq!(transformer.name(), "Split by");
    assert!(!transformer.description().is_empty());
}
