//! Fold per-root scans into one catalog and one keyword index

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::keymap::KeywordIndex;
use super::types::{Catalog, Pack};
use crate::id::IdAllocator;
use crate::scan::RepoScan;

/// Merged output of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    pub catalog: Catalog,
    pub keywords: KeywordIndex,
}

/// Merge scans: packs ordered by `(repo, key)`, ids made globally unique,
/// keyword indexes unioned.
///
/// Scans with distinct repo labels merge to the same result in any order.
pub fn merge(scans: Vec<RepoScan>, generated_at: DateTime<Utc>) -> Corpus {
    let mut locals: Vec<KeywordIndex> = Vec::with_capacity(scans.len());
    let mut tagged: Vec<(usize, Pack)> = Vec::new();
    for (idx, scan) in scans.into_iter().enumerate() {
        locals.push(scan.keywords);
        tagged.extend(scan.packs.into_iter().map(|pack| (idx, pack)));
    }

    tagged.sort_by(|(_, a), (_, b)| (&a.repo, &a.key).cmp(&(&b.repo, &b.key)));

    let mut ids = IdAllocator::new();
    let mut renames: Vec<HashMap<String, String>> = vec![HashMap::new(); locals.len()];
    for (idx, pack) in tagged.iter_mut() {
        for item in pack.items.iter_mut() {
            let id = ids.allocate(&item.id, &item.digest);
            if id != item.id {
                tracing::debug!(from = %item.id, to = %id, repo = %item.repo, "id_collision");
                renames[*idx].insert(std::mem::replace(&mut item.id, id.clone()), id);
            }
        }
    }

    let mut keywords = KeywordIndex::new();
    for (mut local, renames) in locals.into_iter().zip(&renames) {
        local.rename_ids(renames);
        keywords.merge(local);
    }

    let packs = tagged.into_iter().map(|(_, pack)| pack).collect();
    Corpus {
        catalog: Catalog::new(generated_at, packs),
        keywords,
    }
}
