//! Bookmark domain model.
//!
//! # Responsibility
//! - Define the storage-independent bookmark record passed to and returned
//!   from commands.
//! - Enforce the basic required-field rules before persistence.
//!
//! # Invariants
//! - `id` is stable for the lifetime of a stored row and never reused while
//!   that row exists.
//! - `title` and `url` are non-blank for every persisted bookmark.
//! - `date_added` is set once at creation time.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Public bookmark identifier.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type BookmarkId = i64;

/// Validation errors for basic bookmark field rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookmarkValidationError {
    /// `title` is empty or whitespace-only.
    EmptyTitle,
    /// `url` is empty or whitespace-only.
    EmptyUrl,
}

impl Display for BookmarkValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "bookmark title must not be empty"),
            Self::EmptyUrl => write!(f, "bookmark url must not be empty"),
        }
    }
}

impl Error for BookmarkValidationError {}

/// Mutable bookmark fields written by an edit.
///
/// Edits never touch `id` or `date_added`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkFields {
    pub title: String,
    pub url: String,
    pub notes: String,
}

impl BookmarkFields {
    /// Checks the same required-field rules as `DomainBookmark::validate`.
    pub fn validate(&self) -> Result<(), BookmarkValidationError> {
        check_required(&self.title, &self.url)
    }
}

/// Storage-independent bookmark record.
///
/// Built transiently by callers for each command and discarded afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainBookmark {
    /// `None` lets storage assign the next free id on insert.
    pub id: Option<BookmarkId>,
    /// Short human-readable label.
    pub title: String,
    /// Target address. Stored as given.
    pub url: String,
    /// Free-text annotation, may be empty.
    #[serde(default)]
    pub notes: String,
    /// Calendar date the bookmark was created, serialized as `YYYY-MM-DD`.
    pub date_added: NaiveDate,
}

impl DomainBookmark {
    /// Creates a bookmark without id, stamped with today's local date.
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            url: url.into(),
            notes: notes.into(),
            date_added: Local::now().date_naive(),
        }
    }

    /// Creates a bookmark with a caller-provided id.
    ///
    /// Used by import paths and fixtures where identity already exists.
    pub fn with_id(
        id: BookmarkId,
        title: impl Into<String>,
        url: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id),
            ..Self::new(title, url, notes)
        }
    }

    /// Replaces the creation date, mainly for imports and tests.
    pub fn with_date_added(mut self, date_added: NaiveDate) -> Self {
        self.date_added = date_added;
        self
    }

    /// Checks the required-field rules.
    ///
    /// # Errors
    /// - `EmptyTitle` when `title` is blank.
    /// - `EmptyUrl` when `url` is blank.
    pub fn validate(&self) -> Result<(), BookmarkValidationError> {
        check_required(&self.title, &self.url)
    }

    /// Returns the fields an edit is allowed to change.
    pub fn fields(&self) -> BookmarkFields {
        BookmarkFields {
            title: self.title.clone(),
            url: self.url.clone(),
            notes: self.notes.clone(),
        }
    }
}

fn check_required(title: &str, url: &str) -> Result<(), BookmarkValidationError> {
    if title.trim().is_empty() {
        return Err(BookmarkValidationError::EmptyTitle);
    }
    if url.trim().is_empty() {
        return Err(BookmarkValidationError::EmptyUrl);
    }
    Ok(())
}
