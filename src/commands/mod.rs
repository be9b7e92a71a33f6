//! CLI commands for memepack

pub mod aggregate;
pub mod dispatch;
