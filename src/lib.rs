//! Cyber Academy
//!
//! A cybersecurity training simulator: learning modules solved in a simulated
//! terminal, Capture The Flag competitions and King of the Hill battles.
//! Everything is local. Flags are accepted on any non-empty input and the
//! "servers" are canned responses.
//!
//! # Architecture
//!
//! - `data` - Progress, badges, CTF and KotH records plus leaderboard ranking
//! - `engine` - The three trackers, mock-data seeding, the KotH heartbeat and
//!   the terminal simulation
//! - `store` - Versioned JSON snapshots over a key-value backend
//! - `config` - YAML configuration
//! - `tui` - Terminal user interface with ratatui

pub mod config;
pub mod data;
pub mod engine;
pub mod store;
pub mod tui;

pub use config::Config;
pub use data::*;
pub use engine::Academy;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for the academy
pub type Result<T> = anyhow::Result<T>;

/// Custom error types
#[derive(thiserror::Error, Debug)]
pub enum AcademyError {
    #[error("Saved state corrupted: {0}")]
    CorruptedState(String),

    #[error("Saved state {key} has version {found}, expected {expected}")]
    VersionMismatch { key: String, found: u32, expected: u32 },

    #[error("Storage failure: {0}")]
    Storage(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown difficulty: {0}")]
    UnknownDifficulty(String),

    #[error("Module not found: {0}")]
    ModuleNotFound(String),
}
