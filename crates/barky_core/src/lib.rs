//! Bookmark storage core for Barky.
//!
//! Callers build a [`DomainBookmark`] and hand it, together with a
//! [`BookmarkRepository`], to one of the commands in [`service::commands`].

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::bookmark::{BookmarkFields, BookmarkId, BookmarkValidationError, DomainBookmark};
pub use repo::bookmark_repo::{BookmarkRepository, RepoError, RepoResult, SqliteBookmarkRepository};
pub use service::commands::{
    AddBookmarkCommand, DeleteBookmarkCommand, EditBookmarkCommand, GetBookmarkCommand,
    ListBookmarksCommand,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
