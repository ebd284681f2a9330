//! Per-run memoization of label color lookups

use std::collections::HashMap;

use tracing::debug;

use inspekt_types::Result;

use crate::instrument::instrumented;
use crate::repository::LabelColorSource;

/// Storage behind [`ColorCache`]: a real in-memory map, or a pass-through
/// that never remembers anything
#[derive(Debug, Clone)]
pub enum LabelStore {
    Memory(HashMap<String, String>),
    PassThrough,
}

impl LabelStore {
    pub fn new(enabled: bool) -> Self {
        if enabled {
            LabelStore::Memory(HashMap::new())
        } else {
            LabelStore::PassThrough
        }
    }

    fn get(&self, label_id: &str) -> Option<&String> {
        match self {
            LabelStore::Memory(map) => map.get(label_id),
            LabelStore::PassThrough => None,
        }
    }

    fn put(&mut self, label_id: String, color: String) {
        if let LabelStore::Memory(map) = self {
            map.insert(label_id, color);
        }
    }

    pub fn len(&self) -> usize {
        match self {
            LabelStore::Memory(map) => map.len(),
            LabelStore::PassThrough => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Resolves label ids to color codes, asking the remote source at most once
/// per label when backed by a memory store.
///
/// Not synchronized; one cache belongs to one pipeline run.
pub struct ColorCache<S> {
    source: S,
    store: LabelStore,
}

impl<S: LabelColorSource> ColorCache<S> {
    pub fn new(source: S, store: LabelStore) -> Self {
        Self { source, store }
    }

    /// Color code for a label; empty results are cached as well
    pub fn get_color(&mut self, label_id: &str) -> Result<String> {
        if let Some(color) = self.store.get(label_id) {
            debug!("label {} color from cache: {:?}", label_id, color);
            return Ok(color.clone());
        }

        let source = &self.source;
        let color = instrumented("get_color", label_id, || source.color_code(label_id))?;
        self.store.put(label_id.to_string(), color.clone());
        Ok(color)
    }

    /// Number of labels held in the store
    pub fn cached_labels(&self) -> usize {
        self.store.len()
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
