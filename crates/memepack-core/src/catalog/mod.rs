//! Catalog and keyword index structures, plus the cross-root merge

pub mod keymap;
pub mod merge;
pub mod types;

pub use keymap::KeywordIndex;
pub use merge::{merge, Corpus};
pub use types::{Catalog, Item, Pack};
