//! Path-based pack classification
//!
//! A [`Classifier`] holds an ordered list of [`LayoutRule`]s. The first rule
//! whose segment minimum and predicate both hold decides the pack key.
//! Default precedence:
//! 1. `emoji/<pack>/...` or `memes/<pack>/...` (3+ segments)
//! 2. `meme_generator/memes/<pack>/...` (4+ segments)
//! 3. `<pack>/...` (2+ segments)
//! 4. root-level file: its own stem
//!
//! A stem of `.` or `..` (from names like `...png`) would escape the asset
//! store, so such files key on the slug of their full file name instead.

use std::path::{Component, Path};

use crate::id::slugify;

/// Pack key for root-level files whose name yields no usable key
pub const FALLBACK_PACK_KEY: &str = "misc";

/// Outcome of classifying one relative path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Raw pack key, case and separators untouched
    pub key: String,
    /// Number of leading segments forming the pack directory (0 for root files)
    pub pack_depth: usize,
}

/// Where a rule takes the pack key from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    /// The path segment at this index
    Segment(usize),
    /// The file stem
    Stem,
}

/// One layout heuristic: a predicate over path segments plus a key source
#[derive(Debug, Clone)]
pub struct LayoutRule {
    pub name: &'static str,
    pub min_segments: usize,
    pub matches: fn(&[String]) -> bool,
    pub key: KeySource,
}

impl LayoutRule {
    fn apply(&self, segments: &[String], stem: &str) -> Option<Classification> {
        if segments.len() < self.min_segments || !(self.matches)(segments) {
            return None;
        }
        match self.key {
            KeySource::Segment(i) => segments.get(i).map(|key| Classification {
                key: key.clone(),
                pack_depth: i + 1,
            }),
            KeySource::Stem => Some(stem_classification(segments, stem)),
        }
    }
}

fn stem_classification(segments: &[String], stem: &str) -> Classification {
    let key = if matches!(stem, "" | "." | "..") {
        let slug = segments.last().map(|name| slugify(name)).unwrap_or_default();
        if slug.is_empty() {
            FALLBACK_PACK_KEY.to_string()
        } else {
            slug
        }
    } else {
        stem.to_string()
    };
    Classification { key, pack_depth: 0 }
}

fn category_dir(segments: &[String]) -> bool {
    matches!(segments[0].as_str(), "emoji" | "memes")
}

fn nested_memes_dir(segments: &[String]) -> bool {
    segments[0] == "meme_generator" && segments[1] == "memes"
}

fn always(_: &[String]) -> bool {
    true
}

/// The built-in rule ladder
pub fn default_rules() -> Vec<LayoutRule> {
    vec![
        LayoutRule {
            name: "category",
            min_segments: 3,
            matches: category_dir,
            key: KeySource::Segment(1),
        },
        LayoutRule {
            name: "nested-memes",
            min_segments: 4,
            matches: nested_memes_dir,
            key: KeySource::Segment(2),
        },
        LayoutRule {
            name: "top-dir",
            min_segments: 2,
            matches: always,
            key: KeySource::Segment(0),
        },
        LayoutRule {
            name: "root-file",
            min_segments: 1,
            matches: always,
            key: KeySource::Stem,
        },
    ]
}

/// Ordered layout rules; the first match wins
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<LayoutRule>,
}

impl Default for Classifier {
    fn default() -> Self {
        Classifier {
            rules: default_rules(),
        }
    }
}

impl Classifier {
    /// Insert a rule at `position` (clamped), shifting lower-precedence rules down
    pub fn with_rule_at(mut self, position: usize, rule: LayoutRule) -> Self {
        let position = position.min(self.rules.len());
        self.rules.insert(position, rule);
        self
    }

    pub fn rules(&self) -> &[LayoutRule] {
        &self.rules
    }

    /// Classify a root-relative path
    pub fn classify(&self, rel_path: &Path) -> Classification {
        let segments: Vec<String> = rel_path
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        let stem = rel_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        for rule in &self.rules {
            if let Some(class) = rule.apply(&segments, &stem) {
                tracing::trace!(
                    rule = rule.name,
                    path = %rel_path.display(),
                    key = %class.key,
                    "classified"
                );
                return class;
            }
        }
        stem_classification(&segments, &stem)
    }

    /// Classify and return only the pack key
    pub fn pack_key(&self, rel_path: &Path) -> String {
        self.classify(rel_path).key
    }
}
