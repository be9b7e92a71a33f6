//! Memepack Core Library
//!
//! Aggregation pipeline for memepack: pack classification, content digests,
//! keyword extraction, per-root scans and the cross-root merge.

pub mod catalog;
pub mod classify;
pub mod config;
pub mod digest;
pub mod error;
pub mod id;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod scan;
pub mod store;
pub mod text;
