//! Item ids, slugs and pack display names
//!
//! Id format: `<pack key>/<slug(stem)>`. When two items would share an id the
//! later one gets `-<first 8 hex of digest>`, then a numeric suffix if needed.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

/// Hex digits of the digest appended to a colliding id
pub const COLLISION_SUFFIX_LEN: usize = 8;

/// Hex digits of the digest used when a stem slugs to nothing
pub const EMPTY_SLUG_DIGEST_LEN: usize = 12;

static NON_ALNUM: OnceLock<Regex> = OnceLock::new();

/// Generate a slug: lowercase, every run outside `[a-z0-9]` becomes a single
/// hyphen, no leading or trailing hyphen.
///
/// Non-ASCII characters are dropped rather than transliterated, so a purely
/// CJK stem slugs to the empty string.
pub fn slugify(text: &str) -> String {
    let re = NON_ALNUM.get_or_init(|| Regex::new(r"[^a-z0-9]+").unwrap());
    let lowered = text.trim().to_lowercase();
    re.replace_all(&lowered, "-").trim_matches('-').to_string()
}

/// Id before collision handling
pub fn base_item_id(pack_key: &str, stem: &str, digest: &str) -> String {
    let slug = slugify(stem);
    if slug.is_empty() {
        format!("{}/{}", pack_key, digest_prefix(digest, EMPTY_SLUG_DIGEST_LEN))
    } else {
        format!("{}/{}", pack_key, slug)
    }
}

fn digest_prefix(digest: &str, len: usize) -> &str {
    digest.get(..len).unwrap_or(digest)
}

/// Human-readable pack name: `-` and `_` become spaces, then title case
pub fn display_name(pack_key: &str) -> String {
    let spaced = pack_key.replace(['-', '_'], " ");
    let mut out = String::with_capacity(spaced.len());
    let mut prev_alpha = false;
    for c in spaced.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Hands out ids that are unique among everything it has seen
#[derive(Debug, Default)]
pub struct IdAllocator {
    taken: HashSet<String>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `base`, or a digest/counter-suffixed variant if it is taken
    pub fn allocate(&mut self, base: &str, digest: &str) -> String {
        if self.taken.insert(base.to_string()) {
            return base.to_string();
        }

        let suffixed = format!("{}-{}", base, digest_prefix(digest, COLLISION_SUFFIX_LEN));
        if self.taken.insert(suffixed.clone()) {
            return suffixed;
        }

        let mut n = 2;
        loop {
            let candidate = format!("{}-{}", suffixed, n);
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.taken.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIGEST: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Weird!! Name??"), "weird-name");
        assert_eq!(slugify("--edge--"), "edge");
    }

    #[test]
    fn test_slug_charset() {
        let slug = slugify("  ##Mixed__CASE..and   stuff!!  ");
        assert!(slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        assert!(!slug.starts_with('-'));
        assert!(!slug.ends_with('-'));
        assert!(!slug.contains("--"));
    }

    #[test]
    fn test_slugify_drops_non_ascii() {
        assert_eq!(slugify("摸摸头"), "");
        assert_eq!(slugify("Äpfel"), "pfel");
        assert_eq!(slugify("petpet_摸头"), "petpet");
        assert_eq!(slugify("猫 cat 2"), "cat-2");
    }

    #[test]
    fn test_cjk_stems_fall_back_to_distinct_digests() {
        let head = "aaaaaaaaaaaabbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";
        let throw = "ccccccccccccdddddddddddddddddddddddddddddddddddddddddddddddddddd";
        let a = base_item_id("p", "头", head);
        let b = base_item_id("p", "投", throw);
        assert_eq!(a, "p/aaaaaaaaaaaa");
        assert_eq!(b, "p/cccccccccccc");

        let mut ids = IdAllocator::new();
        assert_eq!(ids.allocate(&a, head), a);
        assert_eq!(ids.allocate(&b, throw), b);
    }

    #[test]
    fn test_base_item_id() {
        assert_eq!(base_item_id("sad-cat", "Crying Cat", DIGEST), "sad-cat/crying-cat");
    }

    #[test]
    fn test_base_item_id_empty_slug_uses_digest() {
        assert_eq!(base_item_id("pack", "!!!", DIGEST), "pack/0123456789ab");
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("sad-cat"), "Sad Cat");
        assert_eq!(display_name("my_cool-pack"), "My Cool Pack");
        assert_eq!(display_name("LOUD"), "Loud");
        assert_eq!(display_name("pack2go"), "Pack2Go");
        assert_eq!(display_name("表情_pack"), "表情 Pack");
    }

    #[test]
    fn test_allocator_first_claim_keeps_base() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.allocate("p/a", DIGEST), "p/a");
        assert!(ids.contains("p/a"));
    }

    #[test]
    fn test_allocator_collision_gets_digest_suffix() {
        let mut ids = IdAllocator::new();
        ids.allocate("p/a", DIGEST);
        assert_eq!(ids.allocate("p/a", "ffffeeee00"), "p/a-ffffeeee");
    }

    #[test]
    fn test_allocator_same_content_collision_gets_counter() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.allocate("p/a", DIGEST), "p/a");
        assert_eq!(ids.allocate("p/a", DIGEST), "p/a-01234567");
        assert_eq!(ids.allocate("p/a", DIGEST), "p/a-01234567-2");
        assert_eq!(ids.allocate("p/a", DIGEST), "p/a-01234567-3");
    }
}
