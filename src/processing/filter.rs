//! Row selection for [`crate::types::DataFrame`].

use crate::types::{DataFrame, Value};

/// Returns a new frame containing only rows for which `predicate` returns `true`.
///
/// The predicate receives the row index. This is a convenience wrapper around
/// [`DataFrame::filter_rows`].
pub fn filter<F>(frame: &DataFrame, predicate: F) -> DataFrame
where
    F: FnMut(usize) -> bool,
{
    frame.filter_rows(predicate)
}

/// Keep rows whose value in `column` satisfies `predicate`.
///
/// Returns `None` if the frame has no such column.
pub fn filter_by_value<F>(frame: &DataFrame, column: &str, mut predicate: F) -> Option<DataFrame>
where
    F: FnMut(&Value) -> bool,
{
    let field = frame.field_by_name(column)?;
    Some(frame.filter_rows(|i| field.values.get(i).is_some_and(&mut predicate)))
}

/// First `limit` rows of the frame.
pub fn head(frame: &DataFrame, limit: usize) -> DataFrame {
    if limit >= frame.length {
        return frame.clone();
    }
    let indices: Vec<usize> = (0..limit).collect();
    frame.take_rows(&indices)
}
