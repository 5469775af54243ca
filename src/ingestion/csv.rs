//! CSV ingestion with column type inference.

use std::io::Read;
use std::path::Path;

use crate::error::FrameResult;
use crate::types::{DataFrame, Field, FieldType, Value};

/// Options for CSV ingestion.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvOptions {
    pub delimiter: u8,
    /// Numeric columns with one of these names (case-insensitive) become [`FieldType::Time`].
    pub time_columns: Vec<String>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            time_columns: vec!["time".to_string(), "ts".to_string()],
        }
    }
}

/// Read a CSV file into one frame named after the file stem.
pub fn read_csv_from_path(path: impl AsRef<Path>, options: &CsvOptions) -> FrameResult<DataFrame> {
    let path = path.as_ref();
    let rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(options.delimiter)
        .from_path(path)?;
    let mut frame = read_csv(rdr, options)?;
    frame.name = path.file_stem().and_then(|s| s.to_str()).map(str::to_string);
    Ok(frame)
}

/// Read CSV text from any reader.
///
/// The header row names the fields. Empty cells become nulls and every column gets the
/// narrowest type that fits all of its other cells: integer, float, boolean, then string.
pub fn read_csv_from_reader<R: Read>(reader: R, options: &CsvOptions) -> FrameResult<DataFrame> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(options.delimiter)
        .from_reader(reader);
    read_csv(rdr, options)
}

fn read_csv<R: Read>(mut rdr: csv::Reader<R>, options: &CsvOptions) -> FrameResult<DataFrame> {
    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

    let mut columns: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for record in rdr.records() {
        let record = record?;
        for (column, cell) in columns.iter_mut().zip(record.iter()) {
            column.push(cell.trim().to_string());
        }
    }

    let fields = headers
        .into_iter()
        .zip(columns)
        .map(|(name, cells)| {
            let is_time = options.time_columns.iter().any(|t| t.eq_ignore_ascii_case(&name));
            infer_field(name, &cells, is_time)
        })
        .collect();
    DataFrame::try_new(fields)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Inferred {
    Int,
    Float,
    Bool,
    Text,
}

fn classify(cell: &str) -> Inferred {
    if cell.parse::<i64>().is_ok() {
        Inferred::Int
    } else if parse_float(cell).is_some() {
        Inferred::Float
    } else if parse_bool(cell).is_some() {
        Inferred::Bool
    } else {
        Inferred::Text
    }
}

fn parse_float(cell: &str) -> Option<f64> {
    // Rust accepts "inf" and "nan"; CSV numbers do not.
    if cell.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return None;
    }
    cell.parse().ok()
}

fn parse_bool(cell: &str) -> Option<bool> {
    match cell.to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn infer_field(name: String, cells: &[String], is_time: bool) -> Field {
    let kinds: Vec<Inferred> = cells.iter().filter(|c| !c.is_empty()).map(|c| classify(c)).collect();
    let kind = match kinds.iter().max() {
        None => Inferred::Text,
        // Integers widen to floats; any other mix is text.
        Some(&Inferred::Float) if kinds.iter().all(|k| *k <= Inferred::Float) => Inferred::Float,
        Some(&max) if kinds.iter().all(|k| *k == max) => max,
        Some(_) => Inferred::Text,
    };

    let values = cells
        .iter()
        .map(|cell| {
            if cell.is_empty() {
                return Value::Null;
            }
            match kind {
                Inferred::Int => cell.parse().map_or(Value::Null, Value::Int64),
                Inferred::Float => parse_float(cell).map_or(Value::Null, Value::Float64),
                Inferred::Bool => parse_bool(cell).map_or(Value::Null, Value::Bool),
                Inferred::Text => Value::Utf8(cell.clone()),
            }
        })
        .collect();

    let field_type = match kind {
        Inferred::Int | Inferred::Float if is_time => FieldType::Time,
        Inferred::Int | Inferred::Float => FieldType::Number,
        Inferred::Bool => FieldType::Boolean,
        Inferred::Text => FieldType::String,
    };
    Field::new(name, field_type, values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(text: &str) -> DataFrame {
        read_csv_from_reader(text.as_bytes(), &CsvOptions::default()).unwrap()
    }

    #[test]
    fn infers_column_types() {
        let frame = read("time,host,cpu,up,count\n1000,a,0.5,true,1\n2000,b,2,FALSE,2\n");
        let types: Vec<FieldType> = frame.fields.iter().map(|f| f.field_type).collect();
        assert_eq!(
            types,
            vec![
                FieldType::Time,
                FieldType::String,
                FieldType::Number,
                FieldType::Boolean,
                FieldType::Number
            ]
        );
        assert_eq!(frame.fields[2].values, vec![Value::Float64(0.5), Value::Float64(2.0)]);
        assert_eq!(frame.fields[4].values, vec![Value::Int64(1), Value::Int64(2)]);
        assert_eq!(frame.length, 2);
    }

    #[test]
    fn empty_cells_are_null_and_do_not_affect_type() {
        let frame = read("a,b\n1,\n,x\n3,y\n");
        assert_eq!(frame.fields[0].field_type, FieldType::Number);
        assert_eq!(frame.fields[0].values, vec![Value::Int64(1), Value::Null, Value::Int64(3)]);
        assert_eq!(frame.fields[1].values[0], Value::Null);
    }

    #[test]
    fn mixed_columns_fall_back_to_text() {
        let frame = read("v\n1\ntrue\n");
        assert_eq!(frame.fields[0].field_type, FieldType::String);
        assert_eq!(frame.fields[0].values, vec![Value::from("1"), Value::from("true")]);

        let frame = read("v\ninf\n");
        assert_eq!(frame.fields[0].field_type, FieldType::String);
    }

    #[test]
    fn header_only_gives_empty_frame() {
        let frame = read("a,b\n");
        assert_eq!(frame.length, 0);
        assert_eq!(frame.field_names().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn ragged_rows_are_an_error() {
        let err = read_csv_from_reader("a,b\n1\n".as_bytes(), &CsvOptions::default()).unwrap_err();
        assert!(matches!(err, crate::FrameError::Csv(_)));
    }
}
