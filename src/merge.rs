//! Precedence-preserving merge of config server property sources into a store.
//!
//! Config server orders property sources highest precedence first. Groups are
//! walked from the end of the list so that each later-visited group replaces the
//! value of an earlier one; the resolved set is then written with
//! `set_if_absent`, so anything already in the store stays as it is.

use crate::model::{ConfigResponse, PropertySourceGroup, PropertyValue};
use crate::store::ConfigStore;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info, trace};

/// What a merge pass did to the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    /// Keys written by this pass.
    pub applied: Vec<String>,
    /// Keys left alone because the store already had them.
    pub skipped: Vec<String>,
}

impl MergeReport {
    pub fn is_noop(&self) -> bool {
        self.applied.is_empty()
    }
}

/// Collapse groups into one key set; the group nearest index 0 wins each key.
pub fn resolve_groups(groups: &[PropertySourceGroup]) -> BTreeMap<String, PropertyValue> {
    let mut resolved = BTreeMap::new();
    for group in groups.iter().rev() {
        for (key, value) in &group.source {
            if let Some(previous) = resolved.insert(key.clone(), value.clone()) {
                trace!(key = %key, source = %group.name, shadowed = %previous, "Property overridden by higher-precedence source");
            }
        }
    }
    resolved
}

/// Merge a decoded response into `store`.
pub fn merge_response(response: &ConfigResponse, store: &dyn ConfigStore) -> MergeReport {
    let resolved = resolve_groups(&response.property_sources);
    let results = store.set_all_if_absent(resolved.into_iter().collect());

    let mut report = MergeReport::default();
    for (key, written) in results {
        if written {
            debug!(key = %key, "Retrieved property from config server");
            report.applied.push(key);
        } else {
            trace!(key = %key, "Property already set, keeping existing value");
            report.skipped.push(key);
        }
    }

    info!(
        application = %response.name,
        profiles = ?response.profiles,
        sources = response.property_sources.len(),
        applied = report.applied.len(),
        skipped = report.skipped.len(),
        "Merged config server properties"
    );
    report
}
