use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{DataTransformer, TransformContext, decode_options};
use crate::types::{DataFrame, Field};

/// Per-field exclusion, ordering and renaming, keyed by field display name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrganizeOptions {
    pub exclude_by_name: HashMap<String, bool>,
    pub index_by_name: HashMap<String, i32>,
    pub rename_by_name: HashMap<String, String>,
}

impl OrganizeOptions {
    fn is_noop(&self) -> bool {
        !self.exclude_by_name.values().any(|&v| v)
            && self.index_by_name.is_empty()
            && self.rename_by_name.values().all(String::is_empty)
    }
}

fn organize_frame(options: &OrganizeOptions, frame: &DataFrame) -> DataFrame {
    let mut fields: Vec<(Option<i32>, &Field)> = frame
        .fields
        .iter()
        .filter(|f| !options.exclude_by_name.get(f.display_name()).copied().unwrap_or(false))
        .map(|f| (options.index_by_name.get(f.display_name()).copied(), f))
        .collect();

    // Indexed fields first by index; unindexed keep their relative order.
    fields.sort_by_key(|(idx, _)| match idx {
        Some(i) => (0, *i),
        None => (1, 0),
    });

    let fields = fields
        .into_iter()
        .map(|(_, f)| {
            let mut field = f.clone();
            if let Some(rename) = options.rename_by_name.get(f.display_name()).filter(|r| !r.is_empty()) {
                field.config.display_name = Some(rename.clone());
            }
            field
        })
        .collect();

    DataFrame {
        name: frame.name.clone(),
        ref_id: frame.ref_id.clone(),
        fields,
        length: frame.length,
    }
}

/// Exclude, reorder and rename fields of every frame. Renames set `config.displayName`, so the
/// raw field name is kept.
pub fn organize_fields(options: &OrganizeOptions, frames: Vec<DataFrame>) -> Vec<DataFrame> {
    if options.is_noop() {
        return frames;
    }
    frames.iter().map(|frame| organize_frame(options, frame)).collect()
}

pub struct OrganizeTransformer;

impl DataTransformer for OrganizeTransformer {
    fn id(&self) -> &'static str {
        "organize"
    }

    fn name(&self) -> &'static str {
        "Organize fields"
    }

    fn description(&self) -> &'static str {
        "Order, filter and rename fields."
    }

    fn transform(
        &self,
        options: &serde_json::Value,
        _ctx: &TransformContext,
        frames: Vec<DataFrame>,
    ) -> Vec<DataFrame> {
        match decode_options::<OrganizeOptions>(self.id(), options) {
            Some(opts) => organize_fields(&opts, frames),
            None => frames,
        }
    }
}
