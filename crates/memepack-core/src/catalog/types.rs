use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::display_name;

/// One physical asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// `<pack>/<slug>`, unique within the catalog
    pub id: String,
    /// Pack key the item was classified into
    pub pack: String,
    /// Label of the source root
    pub repo: String,
    pub filename: String,
    /// Root-relative path with `/` separators
    pub rel_path: String,
    /// Lower-cased extension including the dot
    pub ext: String,
    pub size: u64,
    /// Hex SHA-256 of the content
    pub digest: String,
    pub keywords: Vec<String>,
}

/// Items sharing a pack key within one repo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pack {
    pub key: String,
    pub name: String,
    pub repo: String,
    pub count: usize,
    pub items: Vec<Item>,
}

impl Pack {
    /// Build a pack; `items` must already be in relative-path order
    pub fn new(key: impl Into<String>, repo: impl Into<String>, items: Vec<Item>) -> Self {
        let key = key.into();
        Pack {
            name: display_name(&key),
            key,
            repo: repo.into(),
            count: items.len(),
            items,
        }
    }
}

/// The full catalog written to `infos.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub generated_at: DateTime<Utc>,
    pub total_packs: usize,
    pub total_items: usize,
    pub packs: Vec<Pack>,
}

impl Catalog {
    /// Wrap already-ordered packs and compute the totals
    pub fn new(generated_at: DateTime<Utc>, packs: Vec<Pack>) -> Self {
        Catalog {
            generated_at,
            total_packs: packs.len(),
            total_items: packs.iter().map(|p| p.count).sum(),
            packs,
        }
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.packs.iter().flat_map(|p| p.items.iter())
    }
}
