//! Codeshelf Store - SQLite persistence for snippets
//!
//! Provides:
//! - Connection setup (PRAGMAs, busy timeout)
//! - Embedded migrations recorded with SHA-256 checksums
//! - `SqliteStore`, the SQLite implementation of the core store seam

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;

// Re-export key types
pub use errors::Result;
pub use repo::{SqliteSession, SqliteStore};
