use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use frame_pipeline::display::DisplayProcessor;
use frame_pipeline::duration::parse_duration;
use frame_pipeline::execution::{ExecutionEngine, ExecutionOptions};
use frame_pipeline::transformers::{DataTransformerConfig, TransformContext, transform_data_frame};
use frame_pipeline::types::{DataFrame, Field, FieldConfig, FieldType, Value};
use serde_json::json;

fn hosts_frame(rows: usize, groups: usize) -> DataFrame {
    DataFrame::new(vec![
        Field::new(
            "host",
            FieldType::String,
            (0..rows).map(|i| Value::Utf8(format!("host-{}", i % groups))).collect(),
        ),
        Field::new("rss", FieldType::Number, (0..rows).map(|i| Value::Int64((i as i64) << 12)).collect())
            .with_config(FieldConfig {
                unit: Some("bytes".into()),
                decimals: Some(1),
                ..FieldConfig::default()
            }),
    ])
}

fn bench_split_by(c: &mut Criterion) {
    let configs = vec![DataTransformerConfig::new("splitBy", json!({ "field": "host" }))];
    let ctx = TransformContext::default();
    let mut group = c.benchmark_group("split_by");
    for groups in [4, 64] {
        let frame = hosts_frame(50_000, groups);
        group.bench_with_input(BenchmarkId::from_parameter(groups), &frame, |b, frame| {
            b.iter(|| transform_data_frame(&ctx, &configs, black_box(vec![frame.clone()])))
        });
    }
    group.finish();
}

fn bench_display(c: &mut Criterion) {
    let frame = hosts_frame(100_000, 8);
    let field = &frame.fields[1];
    let processor = DisplayProcessor::for_field(field);

    c.bench_function("display_sequential", |b| b.iter(|| processor.display_field(black_box(field))));

    let engine = ExecutionEngine::new(ExecutionOptions::default()).expect("execution engine");
    c.bench_function("display_parallel", |b| {
        b.iter(|| engine.display_values_parallel(black_box(field), &processor))
    });
}

fn bench_parse_duration(c: &mut Criterion) {
    c.bench_function("parse_duration", |b| b.iter(|| parse_duration(black_box("1y 2M 3w 4d 5h 6m 7s"))));
}

criterion_group!(benches, bench_split_by, bench_display, bench_parse_duration);
criterion_main!(benches);
