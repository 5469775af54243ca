use frame_pipeline::execution::{ExecutionEngine, ExecutionOptions, PipelineJob};
use frame_pipeline::transformers::{DataTransformerConfig, TransformContext, transform_data_frame, transform_stream};
use frame_pipeline::types::{DataFrame, Field, FieldType, Value};
use futures::executor::block_on;
use futures::{StreamExt, stream};
use serde_json::json;

fn cpu(ref_id: &str) -> DataFrame {
    DataFrame::new(vec![
        Field::new("time", FieldType::Time, (1..=5).map(|i| Value::Int64(i * 1000)).collect()),
        Field::new(
            "host",
            FieldType::String,
            ["web", "db", "web", "db", "web"].iter().map(|&h| h.into()).collect(),
        ),
        Field::new("cpu", FieldType::Number, [5, 9, 1, 7, 3].into_iter().map(Value::Int64).collect()),
    ])
    .with_ref_id(ref_id)
}

fn dashboard_pipeline() -> Vec<DataTransformerConfig> {
    serde_json::from_value(json!([
        { "id": "filterByRefId", "options": { "include": "$query" } },
        { "id": "organize", "options": { "excludeByName": { "host": true }, "renameByName": { "cpu": "CPU" } } },
        { "id": "sortBy", "options": { "sort": [{ "field": "CPU", "desc": true }] } },
        { "id": "limit", "options": { "limitField": 3 } }
    ]))
    .unwrap()
}

#[test]
fn json_configured_pipeline_runs_in_order() {
    let ctx = TransformContext::default().with_variable("query", "A");
    let out = transform_data_frame(&ctx, &dashboard_pipeline(), vec![cpu("A"), cpu("B")]);

    assert_eq!(out.len(), 1);
    let frame = &out[0];
    assert_eq!(frame.ref_id.as_deref(), Some("A"));
    assert_eq!(frame.length, 3);
    assert_eq!(frame.field_names().collect::<Vec<_>>(), vec!["time", "cpu"]);
    assert_eq!(frame.fields[1].display_name(), "CPU");
    assert_eq!(
        frame.fields[0].values,
        vec![Value::Int64(2000), Value::Int64(4000), Value::Int64(1000)]
    );
}

#[test]
fn reduce_closes_the_pipeline() {
    let mut configs = dashboard_pipeline();
    configs.push(DataTransformerConfig::new("reduce", json!({ "reducers": ["sum", "max"] })));
    let ctx = TransformContext::default().with_variable("query", "A");
    let out = transform_data_frame(&ctx, &configs, vec![cpu("A"), cpu("B")]);

    assert_eq!(out.len(), 1);
    let names: Vec<&str> = out[0].field_names().collect();
    assert_eq!(names, vec!["Field", "Total", "Max"]);
    assert_eq!(out[0].fields[0].values, vec![Value::from("CPU")]);
    assert_eq!(out[0].fields[1].values, vec![Value::Int64(21)]);
    assert_eq!(out[0].fields[2].values, vec![Value::Int64(9)]);
}

#[test]
fn disabled_and_unknown_steps_are_skipped() {
    let mut limit = DataTransformerConfig::new("limit", json!({ "limitField": 1 }));
    limit.disabled = true;
    let configs = vec![limit, DataTransformerConfig::new("doesNotExist", json!({}))];

    let input = vec![cpu("A")];
    assert_eq!(transform_data_frame(&TransformContext::default(), &configs, input.clone()), input);
}

#[test]
fn stream_applies_the_pipeline_to_every_batch() {
    let configs = vec![DataTransformerConfig::new("limit", json!({ "limitField": 2 }))];
    let batches = stream::iter(vec![vec![cpu("A")], vec![cpu("B"), cpu("C")]]);

    let out: Vec<Vec<DataFrame>> = block_on(transform_stream(batches, configs, TransformContext::default()).collect());

    assert_eq!(out.len(), 2);
    assert_eq!(out[1].len(), 2);
    assert!(out.iter().flatten().all(|f| f.length == 2));
}

#[test]
fn engine_runs_jobs_in_parallel_and_keeps_order() {
    let engine = ExecutionEngine::new(ExecutionOptions {
        num_threads: Some(2),
        max_in_flight_chunks: 2,
        ..ExecutionOptions::default()
    })
    .unwrap();

    let jobs: Vec<PipelineJob> = (0..6)
        .map(|i| {
            PipelineJob::new(
                vec![DataTransformerConfig::new("limit", json!({ "limitField": i }))],
                vec![cpu("A")],
            )
        })
        .collect();
    let out = engine.transform_batch(&TransformContext::default(), jobs);

    let lengths: Vec<usize> = out.iter().map(|frames| frames[0].length).collect();
    assert_eq!(lengths, vec![0, 1, 2, 3, 4, 5]);

    let snapshot = engine.metrics().snapshot();
    assert_eq!(snapshot.chunks_finished, 6);
    assert_eq!(snapshot.rows_in, 30);
    assert_eq!(snapshot.rows_out, 15);
}
