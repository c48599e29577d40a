//! Bookmark domain model.
//!
//! # Responsibility
//! - Define the value types exchanged between callers and commands.
//! - Keep the domain shape independent from SQLite row layout.
//!
//! # Invariants
//! - Every stored bookmark is identified by a stable `BookmarkId`.
//! - Deletion is a hard delete; no tombstones are kept.

pub mod bookmark;
