//! Bridge between local property files, the `config` crate and a [`ConfigStore`].
//!
//! Local property files are written into the store before the remote merge, so
//! local values keep priority. They are parsed directly rather than through
//! `config::Config`, which lowercases keys and would let a remote
//! `maxPoolSize` slip in beside a local `maxpoolsize`. After the merge,
//! [`StoreSource`] feeds the store back into a `ConfigBuilder` as the lowest
//! layer.

use crate::error::BootstrapError;
use crate::model::PropertyValue;
use crate::store::{ConfigStore, MemoryStore};
use config::{ConfigError, Map, Source, Value, ValueKind};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Flatten a parsed document into dotted keys (`[app] name = "x"` → `app.name`).
/// Lists stay whole; only tables are flattened. Key case is kept as written.
pub fn flatten_document(document: serde_json::Value) -> BTreeMap<String, PropertyValue> {
    let mut out = BTreeMap::new();
    if let PropertyValue::Map(root) = PropertyValue::from(document) {
        for (key, value) in root {
            flatten_into(&mut out, key, value);
        }
    }
    out
}

fn flatten_into(out: &mut BTreeMap<String, PropertyValue>, prefix: String, value: PropertyValue) {
    match value {
        PropertyValue::Map(map) if !map.is_empty() => {
            for (key, child) in map {
                flatten_into(out, format!("{}.{}", prefix, key), child);
            }
        }
        other => {
            out.insert(prefix, other);
        }
    }
}

/// Read one local property file (`.toml` or `.json`) into dotted keys.
pub fn read_local_file(path: &Path) -> Result<BTreeMap<String, PropertyValue>, BootstrapError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        BootstrapError::Settings(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let document: serde_json::Value = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&text).map_err(|e| {
            BootstrapError::Settings(format!("Failed to parse {}: {}", path.display(), e))
        })?,
        Some("toml") | None => toml::from_str(&text).map_err(|e| {
            BootstrapError::Settings(format!("Failed to parse {}: {}", path.display(), e))
        })?,
        Some(other) => {
            return Err(BootstrapError::Settings(format!(
                "Unsupported local file format '{}': {}",
                other,
                path.display()
            )))
        }
    };

    Ok(flatten_document(document))
}

/// Write every key from `paths` into `store` ahead of a remote merge. Later
/// files override earlier ones. Returns how many keys were newly written.
pub fn seed_from_files(paths: &[PathBuf], store: &dyn ConfigStore) -> Result<usize, BootstrapError> {
    let mut entries = BTreeMap::new();
    for path in paths {
        entries.extend(read_local_file(path)?);
    }
    Ok(seed_entries(entries, store))
}

/// Write `entries` into `store` without replacing present keys.
pub fn seed_entries(entries: BTreeMap<String, PropertyValue>, store: &dyn ConfigStore) -> usize {
    let written = store
        .set_all_if_absent(entries.into_iter().collect())
        .into_iter()
        .filter(|(_, written)| *written)
        .count();
    debug!(written, "Seeded config store from local properties");
    written
}

/// A `config::Source` over a snapshot of store contents.
#[derive(Debug, Clone)]
pub struct StoreSource {
    origin: String,
    entries: BTreeMap<String, PropertyValue>,
}

impl StoreSource {
    pub fn new(origin: impl Into<String>, entries: BTreeMap<String, PropertyValue>) -> Self {
        Self {
            origin: origin.into(),
            entries,
        }
    }

    pub fn from_store(origin: impl Into<String>, store: &MemoryStore) -> Self {
        Self::new(origin, store.snapshot())
    }
}

impl Source for StoreSource {
    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new(self.clone())
    }

    fn collect(&self) -> Result<Map<String, Value>, ConfigError> {
        Ok(self
            .entries
            .iter()
            .map(|(key, value)| (key.clone(), to_config_value(&self.origin, value.clone())))
            .collect())
    }
}

fn to_config_value(origin: &String, value: PropertyValue) -> Value {
    Value::new(Some(origin), to_value_kind(origin, value))
}

fn to_value_kind(origin: &String, value: PropertyValue) -> ValueKind {
    match value {
        PropertyValue::Null => ValueKind::Nil,
        PropertyValue::Bool(b) => ValueKind::Boolean(b),
        PropertyValue::Integer(i) => ValueKind::I64(i),
        PropertyValue::Float(f) => ValueKind::Float(f),
        PropertyValue::String(s) => ValueKind::String(s),
        PropertyValue::List(items) => ValueKind::Array(
            items
                .into_iter()
                .map(|item| to_config_value(origin, item))
                .collect(),
        ),
        PropertyValue::Map(map) => ValueKind::Table(
            map.into_iter()
                .map(|(k, v)| (k, to_config_value(origin, v)))
                .collect(),
        ),
    }
}
