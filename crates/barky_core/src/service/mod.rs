//! Bookmark commands.
//!
//! # Responsibility
//! - Expose one stateless command per use-case with a single `execute`.
//! - Keep callers decoupled from storage details.

pub mod commands;
