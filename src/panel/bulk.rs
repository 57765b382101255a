//! Bulk model parsing: one submitted config, many comma-separated names.

use std::collections::HashSet;

use crate::settings::LocalModelConfig;

/// Source of fresh local model identifiers.
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

/// Random UUID v4 identifiers.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&mut self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Deterministic `<prefix>-<n>` identifiers.
#[derive(Debug, Clone)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: u64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

/// Split a name field on commas, trimming pieces and dropping empty or
/// repeated ones.
pub fn split_model_names(raw: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

/// Expand one submitted config into the configs it describes.
///
/// A single name returns `source` untouched. Several names return one copy per
/// name, each with a fresh id that differs from `source.id` and from every
/// other copy. A name field with nothing but commas and whitespace yields an
/// empty list.
pub fn expand_bulk_models(
    source: LocalModelConfig,
    ids: &mut dyn IdGenerator,
) -> Vec<LocalModelConfig> {
    let names = split_model_names(&source.name);

    match names.len() {
        0 => Vec::new(),
        1 if !source.name.contains(',') => vec![source],
        1 => {
            let mut single = source;
            single.name = names.into_iter().next().unwrap_or_default();
            vec![single]
        }
        _ => {
            let mut taken: HashSet<String> = HashSet::from([source.id.clone()]);
            names
                .into_iter()
                .map(|name| {
                    let mut id = ids.next_id();
                    while !taken.insert(id.clone()) {
                        id = ids.next_id();
                    }
                    LocalModelConfig {
                        id,
                        name,
                        ..source.clone()
                    }
                })
                .collect()
        }
    }
}
