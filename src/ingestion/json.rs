//! DataFrame JSON: the schema/data wire shape used by dashboard backends.
//!
//! ```json
//! {
//!   "schema": {
//!     "name": "cpu", "refId": "A",
//!     "fields": [{ "name": "time", "type": "time" }, { "name": "value", "type": "number", "config": { "unit": "percent" } }]
//!   },
//!   "data": { "values": [[1000, 2000], [0.5, 0.7]] }
//! }
//! ```
//!
//! Values are stored column-major: `data.values[i]` holds every row of `schema.fields[i]`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FrameError, FrameResult};
use crate::types::{DataFrame, Field, FieldConfig, FieldType, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameJson {
    pub schema: FrameSchemaJson,
    #[serde(default)]
    pub data: FrameDataJson,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameSchemaJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_id: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldSchemaJson>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchemaJson {
    pub name: String,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "FieldConfig::is_empty")]
    pub config: FieldConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameDataJson {
    #[serde(default)]
    pub values: Vec<Vec<Value>>,
}

impl FrameJson {
    /// Validate column counts and lengths and build the frame.
    pub fn into_frame(self) -> FrameResult<DataFrame> {
        let FrameJson { schema, data } = self;
        let field_count = schema.fields.len();

        let mut columns = data.values;
        if columns.is_empty() {
            columns = vec![Vec::new(); field_count];
        }
        if columns.len() != field_count {
            return Err(FrameError::SchemaMismatch {
                message: format!(
                    "schema has {field_count} fields but data has {} value columns",
                    columns.len()
                ),
            });
        }

        let length = columns.first().map_or(0, Vec::len);
        if let Some((i, col)) = columns.iter().enumerate().find(|(_, c)| c.len() != length) {
            return Err(FrameError::SchemaMismatch {
                message: format!(
                    "field '{}' has {} values, expected {length}",
                    schema.fields[i].name,
                    col.len()
                ),
            });
        }

        let fields = schema
            .fields
            .into_iter()
            .zip(columns)
            .map(|(f, values)| Field::new(f.name, f.field_type, values).with_config(f.config))
            .collect();

        Ok(DataFrame {
            name: schema.name,
            ref_id: schema.ref_id,
            fields,
            length,
        })
    }
}

impl From<&DataFrame> for FrameJson {
    fn from(frame: &DataFrame) -> Self {
        Self {
            schema: FrameSchemaJson {
                name: frame.name.clone(),
                ref_id: frame.ref_id.clone(),
                fields: frame
                    .fields
                    .iter()
                    .map(|f| FieldSchemaJson {
                        name: f.name.clone(),
                        field_type: f.field_type,
                        config: f.config.clone(),
                    })
                    .collect(),
            },
            data: FrameDataJson {
                values: frame.fields.iter().map(|f| f.values.clone()).collect(),
            },
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<FrameJson>),
    One(FrameJson),
}

/// Decode one frame.
pub fn decode_frame(input: &str) -> FrameResult<DataFrame> {
    serde_json::from_str::<FrameJson>(input)?.into_frame()
}

/// Decode either a single frame object or an array of frames.
pub fn decode_frames(input: &str) -> FrameResult<Vec<DataFrame>> {
    match serde_json::from_str::<OneOrMany>(input)? {
        OneOrMany::One(frame) => Ok(vec![frame.into_frame()?]),
        OneOrMany::Many(frames) => frames.into_iter().map(FrameJson::into_frame).collect(),
    }
}

/// Encode a frame as DataFrame JSON.
pub fn encode_frame(frame: &DataFrame) -> FrameResult<String> {
    Ok(serde_json::to_string(&FrameJson::from(frame))?)
}

/// Encode frames as a JSON array.
pub fn encode_frames(frames: &[DataFrame]) -> FrameResult<String> {
    let out: Vec<FrameJson> = frames.iter().map(FrameJson::from).collect();
    Ok(serde_json::to_string(&out)?)
}

/// Read one frame or an array of frames from a file.
pub fn read_json_from_path(path: impl AsRef<Path>) -> FrameResult<Vec<DataFrame>> {
    let text = fs::read_to_string(path)?;
    decode_frames(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CPU: &str = r#"{
        "schema": {
            "name": "cpu",
            "refId": "A",
            "fields": [
                { "name": "time", "type": "time" },
                { "name": "value", "type": "number", "config": { "unit": "percent", "decimals": 1 } }
            ]
        },
        "data": { "values": [[1000, 2000], [0.5, null]] }
    }"#;

    #[test]
    fn decodes_schema_and_columns() {
        let frame = decode_frame(CPU).unwrap();
        assert_eq!(frame.name.as_deref(), Some("cpu"));
        assert_eq!(frame.ref_id.as_deref(), Some("A"));
        assert_eq!(frame.length, 2);
        assert_eq!(frame.fields[0].field_type, FieldType::Time);
        assert_eq!(frame.fields[0].values, vec![Value::Int64(1000), Value::Int64(2000)]);
        assert_eq!(frame.fields[1].values, vec![Value::Float64(0.5), Value::Null]);
        assert_eq!(frame.fields[1].config.unit.as_deref(), Some("percent"));
        assert_eq!(frame.fields[1].config.decimals, Some(1));
    }

    #[test]
    fn encode_then_decode_keeps_frame() {
        let frame = decode_frame(CPU).unwrap();
        let text = encode_frame(&frame).unwrap();
        assert_eq!(decode_frame(&text).unwrap(), frame);
        assert!(!text.contains("\"config\":{}"));
    }

    #[test]
    fn missing_data_means_no_rows() {
        let frame = decode_frame(r#"{"schema": {"fields": [{"name": "a", "type": "string"}]}}"#).unwrap();
        assert_eq!(frame.length, 0);
        assert_eq!(frame.fields[0].values.len(), 0);
    }

    #[test]
    fn column_count_mismatch() {
        let err = decode_frame(r#"{"schema": {"fields": [{"name": "a"}]}, "data": {"values": [[1], [2]]}}"#)
            .unwrap_err();
        assert!(matches!(err, FrameError::SchemaMismatch { .. }));
    }

    #[test]
    fn ragged_columns() {
        let err = decode_frame(
            r#"{"schema": {"fields": [{"name": "a"}, {"name": "b"}]}, "data": {"values": [[1, 2], [3]]}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("field 'b' has 1 values"));
    }

    #[test]
    fn arrays_of_frames() {
        let frames = decode_frames(&format!("[{CPU}, {CPU}]")).unwrap();
        assert_eq!(frames.len(), 2);
        assert!(matches!(decode_frames("{"), Err(FrameError::Json(_))));
    }
}
