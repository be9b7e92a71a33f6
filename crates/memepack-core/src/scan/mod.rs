//! Per-root aggregation
//!
//! A [`Scanner`] walks one source root, groups asset files into packs,
//! builds item records, copies bytes into the asset store and returns a
//! self-contained [`RepoScan`]. Scans never share state; the merge stage
//! folds them together.

pub mod manifest;
pub mod walk;

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::catalog::{Item, KeywordIndex, Pack};
use crate::classify::Classifier;
use crate::config::AggregateConfig;
use crate::digest::digest_file;
use crate::error::{MemepackError, Result};
use crate::id::{base_item_id, IdAllocator};
use crate::store::{AssetStore, Placement};
use crate::text::{item_keywords, push_unique};
use crate::trace_time;

/// Asset copy counts for one scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    pub copied: usize,
    pub existing: usize,
}

impl CopyStats {
    fn record(&mut self, placement: Placement) {
        match placement {
            Placement::Copied => self.copied += 1,
            Placement::Existing => self.existing += 1,
        }
    }

    pub fn add(&mut self, other: CopyStats) {
        self.copied += other.copied;
        self.existing += other.existing;
    }
}

/// Result of aggregating one source root
#[derive(Debug, Clone)]
pub struct RepoScan {
    /// Canonical root path
    pub root: PathBuf,
    /// Repo label shared by every pack and item of this scan
    pub label: String,
    /// Packs ordered by key
    pub packs: Vec<Pack>,
    /// Keyword index over this scan's items only
    pub keywords: KeywordIndex,
    pub stats: CopyStats,
}

impl RepoScan {
    pub fn item_count(&self) -> usize {
        self.packs.iter().map(|p| p.count).sum()
    }
}

#[derive(Debug, Default)]
struct PackFiles {
    /// Root-relative pack directories (empty for root-level singletons)
    dirs: BTreeSet<PathBuf>,
    files: Vec<(PathBuf, PathBuf)>,
}

pub struct Scanner {
    config: AggregateConfig,
    classifier: Classifier,
    extensions: BTreeSet<String>,
    skip_dirs: BTreeSet<String>,
    store: AssetStore,
}

impl Scanner {
    pub fn new(config: &AggregateConfig, store: AssetStore) -> Self {
        Scanner {
            extensions: config.allowed_extensions(),
            skip_dirs: config.skip_dirs(),
            config: config.clone(),
            classifier: Classifier::default(),
            store,
        }
    }

    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Label for a root directory, after alias lookup
    pub fn repo_label(&self, root: &Path) -> String {
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.to_string_lossy().into_owned());
        self.config.repo_label(&name)
    }

    /// Aggregate one existing source root
    pub fn scan(&self, root: &Path) -> Result<RepoScan> {
        let start = Instant::now();
        let root = fs::canonicalize(root).map_err(|e| MemepackError::io_at("resolve", root, e))?;
        let label = self.repo_label(&root);
        tracing::info!(root = %root.display(), repo = %label, "scanning");

        let files = walk::find_files(&root, &self.skip_dirs, &self.extensions);
        trace_time!(start, "walk", files = files.len());

        let mut groups: BTreeMap<String, PackFiles> = BTreeMap::new();
        for path in files {
            let rel = match path.strip_prefix(&root) {
                Ok(rel) => rel.to_path_buf(),
                Err(_) => continue,
            };
            let class = self.classifier.classify(&rel);
            let group = groups.entry(class.key).or_default();
            if class.pack_depth > 0 {
                group
                    .dirs
                    .insert(rel.components().take(class.pack_depth).collect());
            }
            group.files.push((rel, path));
        }

        let mut ids = IdAllocator::new();
        let mut keywords = KeywordIndex::new();
        let mut stats = CopyStats::default();
        let mut packs = Vec::with_capacity(groups.len());

        for (key, mut group) in groups {
            group.files.sort();
            let extra: Vec<String> = group
                .dirs
                .iter()
                .flat_map(|dir| manifest::manifest_keywords(&root.join(dir)))
                .collect();

            let mut items = Vec::with_capacity(group.files.len());
            for (rel, src) in &group.files {
                let (item, placement) = self.build_item(&key, &label, rel, src, &extra, &mut ids)?;
                stats.record(placement);
                keywords.add_item(&item);
                items.push(item);
            }

            tracing::debug!(repo = %label, pack = %key, items = items.len(), "pack");
            packs.push(Pack::new(key, label.clone(), items));
        }

        trace_time!(start, "scan", packs = packs.len());
        Ok(RepoScan {
            root,
            label,
            packs,
            keywords,
            stats,
        })
    }

    fn build_item(
        &self,
        pack_key: &str,
        label: &str,
        rel: &Path,
        src: &Path,
        extra_keywords: &[String],
        ids: &mut IdAllocator,
    ) -> Result<(Item, Placement)> {
        let filename = rel
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem = rel
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ext = walk::file_extension(rel).unwrap_or_default();

        let size = fs::metadata(src)
            .map_err(|e| MemepackError::io_at("stat", src, e))?
            .len();
        let digest = digest_file(src)?;
        let id = ids.allocate(&base_item_id(pack_key, &stem, &digest), &digest);

        let mut keywords = item_keywords(&stem, pack_key);
        push_unique(&mut keywords, extra_keywords.iter().cloned());

        let placement = self.store.place(pack_key, &filename, src)?;

        let rel_path = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        Ok((
            Item {
                id,
                pack: pack_key.to_string(),
                repo: label.to_string(),
                filename,
                rel_path,
                ext,
                size,
                digest,
                keywords,
            },
            placement,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, TempDir};

    fn write(root: &Path, rel: &str, bytes: &[u8]) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, bytes).unwrap();
    }

    fn scanner(out: &TempDir) -> Scanner {
        Scanner::new(
            &AggregateConfig::default(),
            AssetStore::new(out.path().join("assets")),
        )
    }

    fn pack<'a>(scan: &'a RepoScan, key: &str) -> &'a Pack {
        scan.packs.iter().find(|p| p.key == key).unwrap()
    }

    #[test]
    fn test_scan_groups_packs_by_layout() {
        let src = tempdir().unwrap();
        let out = tempdir().unwrap();
        let root = src.path().join("meme_emoji");
        write(&root, "emoji/sad-cat/images/a.png", b"a");
        write(&root, "emoji/sad-cat/images/b.png", b"b");
        write(&root, "randompack/x.gif", b"x");
        write(&root, "onefile.png", b"1");

        let scan = scanner(&out).scan(&root).unwrap();
        assert_eq!(scan.label, "emoji");
        let keys: Vec<&str> = scan.packs.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["onefile", "randompack", "sad-cat"]);
        assert_eq!(pack(&scan, "sad-cat").count, 2);
        assert_eq!(scan.item_count(), 4);
        for p in &scan.packs {
            assert_eq!(p.count, p.items.len());
            assert_eq!(p.repo, "emoji");
        }
    }

    #[test]
    fn test_scan_item_fields() {
        let src = tempdir().unwrap();
        let out = tempdir().unwrap();
        write(src.path(), "cool-pack/My_Cool-Meme.v2.PNG", b"hello");

        let scan = scanner(&out).scan(src.path()).unwrap();
        let item = &pack(&scan, "cool-pack").items[0];
        assert_eq!(item.id, "cool-pack/my-cool-meme-v2");
        assert_eq!(item.pack, "cool-pack");
        assert_eq!(item.filename, "My_Cool-Meme.v2.PNG");
        assert_eq!(item.rel_path, "cool-pack/My_Cool-Meme.v2.PNG");
        assert_eq!(item.ext, ".png");
        assert_eq!(item.size, 5);
        assert_eq!(
            item.digest,
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
        assert_eq!(item.keywords, vec!["my", "cool", "meme", "v2", "pack"]);
        assert_eq!(pack(&scan, "cool-pack").name, "Cool Pack");
    }

    #[test]
    fn test_scan_items_sorted_by_path() {
        let src = tempdir().unwrap();
        let out = tempdir().unwrap();
        write(src.path(), "p/z.png", b"z");
        write(src.path(), "p/a-b/c.png", b"c");
        write(src.path(), "p/a/b.png", b"b");
        write(src.path(), "p/m.png", b"m");

        let scan = scanner(&out).scan(src.path()).unwrap();
        let paths: Vec<&str> = pack(&scan, "p")
            .items
            .iter()
            .map(|i| i.rel_path.as_str())
            .collect();
        assert_eq!(paths, vec!["p/a/b.png", "p/a-b/c.png", "p/m.png", "p/z.png"]);
    }

    #[test]
    fn test_scan_copies_into_asset_store() {
        let src = tempdir().unwrap();
        let out = tempdir().unwrap();
        write(src.path(), "memes/doge/img/wow.jpg", b"wow");

        let s = scanner(&out);
        let first = s.scan(src.path()).unwrap();
        assert_eq!(first.stats, CopyStats { copied: 1, existing: 0 });
        assert_eq!(
            fs::read(out.path().join("assets/doge/wow.jpg")).unwrap(),
            b"wow"
        );

        let second = s.scan(src.path()).unwrap();
        assert_eq!(second.stats, CopyStats { copied: 0, existing: 1 });
        assert_eq!(first.packs, second.packs);
    }

    #[test]
    fn test_scan_disambiguates_slug_collisions() {
        let src = tempdir().unwrap();
        let out = tempdir().unwrap();
        write(src.path(), "p/Grumpy Cat.png", b"one");
        write(src.path(), "p/grumpy_cat.png", b"two");

        let scan = scanner(&out).scan(src.path()).unwrap();
        let items = &pack(&scan, "p").items;
        assert_eq!(items[0].id, "p/grumpy-cat");
        assert!(items[1].id.starts_with("p/grumpy-cat-"));
        assert_eq!(items[1].id, format!("p/grumpy-cat-{}", &items[1].digest[..8]));

        let ids = scan.keywords.get("grumpy").unwrap();
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn test_scan_skips_disallowed_extensions() {
        let src = tempdir().unwrap();
        let out = tempdir().unwrap();
        write(src.path(), "emoji/blob/notes.txt", b"t");
        write(src.path(), "emoji/blob/data.json", b"{}");
        write(src.path(), "emoji/blob/img/ok.webp", b"w");

        let scan = scanner(&out).scan(src.path()).unwrap();
        assert_eq!(scan.item_count(), 1);
        assert_eq!(pack(&scan, "blob").items[0].filename, "ok.webp");
    }

    #[test]
    fn test_scan_applies_manifest_keywords() {
        let src = tempdir().unwrap();
        let out = tempdir().unwrap();
        write(src.path(), "memes/petpet/images/0.gif", b"0");
        write(src.path(), "memes/petpet/images/1.gif", b"1");
        write(
            src.path(),
            "memes/petpet/info.json",
            r#"{"keywords": ["摸", "Pat"]}"#.as_bytes(),
        );

        let scan = scanner(&out).scan(src.path()).unwrap();
        for item in &pack(&scan, "petpet").items {
            assert!(item.keywords.contains(&"摸".to_string()));
            assert!(item.keywords.contains(&"pat".to_string()));
        }
        assert_eq!(scan.keywords.get("pat").unwrap().len(), 2);
    }

    #[test]
    fn test_scan_with_custom_layout_rule() {
        use crate::classify::{KeySource, LayoutRule};

        fn stickers(segments: &[String]) -> bool {
            segments[0] == "stickers"
        }

        let src = tempdir().unwrap();
        let out = tempdir().unwrap();
        write(src.path(), "stickers/blob/set1/wave.png", b"wave");
        write(src.path(), "randompack/x.png", b"x");

        let classifier = Classifier::default().with_rule_at(
            0,
            LayoutRule {
                name: "stickers",
                min_segments: 3,
                matches: stickers,
                key: KeySource::Segment(1),
            },
        );
        let scan = scanner(&out)
            .with_classifier(classifier)
            .scan(src.path())
            .unwrap();

        let keys: Vec<&str> = scan.packs.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["blob", "randompack"]);
        assert_eq!(pack(&scan, "blob").items[0].id, "blob/wave");
        assert!(out.path().join("assets/blob/wave.png").is_file());
    }

    #[test]
    fn test_scan_dot_named_root_file_stays_in_store() {
        let src = tempdir().unwrap();
        let out = tempdir().unwrap();
        write(src.path(), "...png", b"dots");

        let scan = scanner(&out).scan(src.path()).unwrap();
        assert_eq!(scan.packs[0].key, "png");
        assert!(out.path().join("assets/png/...png").is_file());
        assert!(!out.path().join("...png").exists());
    }

    #[test]
    fn test_scan_missing_root_is_error() {
        let src = tempdir().unwrap();
        let out = tempdir().unwrap();
        let err = scanner(&out).scan(&src.path().join("absent")).unwrap_err();
        assert!(matches!(err, MemepackError::IoAt { .. }));
    }

    #[test]
    fn test_repo_label_uses_aliases() {
        let out = tempdir().unwrap();
        let mut config = AggregateConfig::default();
        config
            .repo_aliases
            .insert("stickers-v2".to_string(), "stickers".to_string());
        let s = Scanner::new(&config, AssetStore::new(out.path()));

        assert_eq!(s.repo_label(Path::new("/x/meme-generator")), "main");
        assert_eq!(s.repo_label(Path::new("/x/stickers-v2")), "stickers");
        assert_eq!(s.repo_label(Path::new("/x/other")), "other");
    }
}
