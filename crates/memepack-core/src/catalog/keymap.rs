use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use super::types::Item;

/// Inverted index: keyword -> ids of the items carrying it.
///
/// Keys and id sets are ordered, so serialization is sorted and [`merge`]
/// is associative and commutative.
///
/// [`merge`]: KeywordIndex::merge
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordIndex {
    entries: BTreeMap<String, BTreeSet<String>>,
}

impl KeywordIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, keyword: impl Into<String>, id: impl Into<String>) {
        self.entries
            .entry(keyword.into())
            .or_default()
            .insert(id.into());
    }

    /// Index every keyword of an item under its id
    pub fn add_item(&mut self, item: &Item) {
        for keyword in &item.keywords {
            self.insert(keyword.clone(), item.id.clone());
        }
    }

    /// Set union on matching keywords
    pub fn merge(&mut self, other: KeywordIndex) {
        for (keyword, ids) in other.entries {
            self.entries.entry(keyword).or_default().extend(ids);
        }
    }

    /// Replace ids according to `renames`, all at once
    pub fn rename_ids(&mut self, renames: &HashMap<String, String>) {
        if renames.is_empty() {
            return;
        }
        for ids in self.entries.values_mut() {
            *ids = ids
                .iter()
                .map(|id| renames.get(id).unwrap_or(id).clone())
                .collect();
        }
    }

    pub fn get(&self, keyword: &str) -> Option<&BTreeSet<String>> {
        self.entries.get(keyword)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
