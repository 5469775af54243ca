use frame_pipeline::display::{
    DisplayProcessor, SpecialValueMatch, Threshold, ThresholdsConfig, ThresholdsMode, ValueMapping, ValueMappingResult,
    get_display_processor,
};
use frame_pipeline::types::{FieldConfig, Value};
use frame_pipeline::valueformats::builders::to_hex0x;
use frame_pipeline::valueformats::{ValueFormatRegistry, get_unit_formats, get_value_format};

#[test]
fn registry_formats_bytes_and_short() {
    let bytes = get_value_format("bytes");
    assert_eq!(bytes(Some(100_030_303.0), Some(2), None), "95.40 MiB");
    assert_eq!(bytes(None, Some(2), None), "");

    let short = get_value_format("short");
    assert_eq!(short(Some(1000.0), None, Some(0)), "1.000 K");
    assert_eq!(short(Some(1_000_000.0), None, Some(-3)), "1.000 Mil");
}

#[test]
fn formatting_is_pure() {
    let f = get_value_format("ms");
    let first = f(Some(90_000.0), Some(1), None);
    for _ in 0..10 {
        assert_eq!(f(Some(90_000.0), Some(1), None), first);
    }
}

#[test]
fn hex_sign_precedes_prefix() {
    assert_eq!(to_hex0x(Some(-26.0), None, None), "-0x1A");
    assert_eq!(to_hex0x(Some(26.0), None, None), "0x1A");
}

#[test]
fn unit_menu_lists_every_indexed_unit() {
    let menu = get_unit_formats();
    let total: usize = menu.iter().map(|c| c.submenu.len()).sum();
    assert_eq!(total, ValueFormatRegistry::global().index().len());
    assert!(menu.iter().any(|c| c.text == "data (IEC)"));
}

#[test]
fn display_coerces_special_values() {
    let p = DisplayProcessor::plain();

    let null = p.display(&Value::Null);
    assert_eq!(null.text, "");
    assert!(null.numeric.is_nan());

    let nan = p.display(&Value::Float64(f64::NAN));
    assert_eq!(nan.text, "NaN");
    assert!(nan.numeric.is_nan());

    let text = p.display(&Value::from("12.5"));
    assert_eq!(text.text, "12.5");
    assert_eq!(text.numeric, 12.5);

    let list = p.display(&Value::List(vec![Value::Int64(1), Value::Int64(2)]));
    assert_eq!(list.text, "1,2");
    assert!(list.numeric.is_nan());

    let single = p.display(&Value::List(vec![Value::Int64(7)]));
    assert!(single.numeric.is_nan());

    let obj = p.display(&Value::Object(Default::default()));
    assert_eq!(obj.text, "[object Object]");

    let t = p.display(&Value::Bool(true));
    assert_eq!((t.text.as_str(), t.numeric), ("true", 1.0));
}

#[test]
fn mappings_win_over_units_and_thresholds_color() {
    let config: FieldConfig = serde_json::from_value(serde_json::json!({
        "unit": "percent",
        "decimals": 0,
        "mappings": [
            { "type": "value", "options": { "0": { "text": "idle" } } },
            { "type": "range", "options": { "from": 90, "to": 100, "result": { "text": "hot", "color": "red" } } },
            { "type": "special", "options": { "match": "null", "result": { "text": "n/a" } } }
        ],
        "thresholds": {
            "mode": "absolute",
            "steps": [
                { "value": null, "color": "green" },
                { "value": 50, "color": "orange" }
            ]
        }
    }))
    .unwrap();
    let p = get_display_processor(Some(&config));

    assert_eq!(p.display(&Value::Int64(0)).text, "idle");
    let hot = p.display(&Value::Int64(95));
    assert_eq!((hot.text.as_str(), hot.color.as_deref()), ("hot", Some("red")));
    let warm = p.display(&Value::Int64(60));
    assert_eq!((warm.text.as_str(), warm.color.as_deref()), ("60%", Some("orange")));
    assert_eq!(p.display(&Value::Int64(10)).color.as_deref(), Some("green"));
    assert_eq!(p.display(&Value::Null).text, "n/a");
}

#[test]
fn built_mappings_and_percentage_thresholds() {
    let config = FieldConfig {
        min: Some(0.0),
        max: Some(200.0),
        mappings: vec![ValueMapping::Special {
            matcher: SpecialValueMatch::NaN,
            result: ValueMappingResult::text("broken"),
        }],
        thresholds: Some(ThresholdsConfig {
            mode: ThresholdsMode::Percentage,
            steps: vec![Threshold::new(None, "blue"), Threshold::new(Some(75.0), "red")],
        }),
        ..FieldConfig::default()
    };
    let p = DisplayProcessor::new(&config);
    assert_eq!(p.display(&Value::Int64(160)).color.as_deref(), Some("red"));
    assert_eq!(p.display(&Value::Int64(100)).color.as_deref(), Some("blue"));
    assert_eq!(p.display(&Value::Float64(f64::NAN)).text, "broken");
}

#[test]
fn auto_decimals_follow_magnitude() {
    let config = FieldConfig {
        unit: Some("none".into()),
        ..FieldConfig::default()
    };
    let p = DisplayProcessor::new(&config);
    assert_eq!(p.display(&Value::Float64(0.123456)).text, "0.12");
    assert_eq!(p.display(&Value::Int64(42)).text, "42");
}

#[test]
fn oversized_decimals_stay_bounded() {
    let config: FieldConfig = serde_json::from_value(serde_json::json!({
        "unit": "short",
        "decimals": 20_000_000
    }))
    .unwrap();
    let shown = DisplayProcessor::new(&config).display(&Value::Int64(42));
    assert!(shown.text.starts_with("42"), "{}", shown.text);
    assert!(shown.text.len() <= 40, "{} chars", shown.text.len());

    let short = get_value_format("short");
    assert_eq!(short(Some(1500.0), None, Some(i32::MAX)).len(), "1.".len() + 20 + " K".len());
}
