//! Bookmark commands.
//!
//! # Responsibility
//! - Translate one domain request into exactly one repository call.
//! - Return domain-shaped results without reshaping repository errors.
//!
//! # Invariants
//! - Commands hold no state; the repository is passed to every `execute`.
//! - Errors from the repository are propagated unchanged.
//! - Log lines carry ids and counts only, never titles, urls or notes.

use crate::model::bookmark::{BookmarkId, DomainBookmark};
use crate::repo::bookmark_repo::{BookmarkRepository, RepoError, RepoResult};
use log::{debug, info, warn};

/// Inserts a new bookmark row.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddBookmarkCommand;

impl AddBookmarkCommand {
    /// Stores `bookmark` and returns its effective id.
    ///
    /// # Contract
    /// - A caller-supplied `id` is kept; `None` gets the next free id.
    /// - Re-adding an existing id fails with `ConstraintViolation`; there is
    ///   no upsert.
    /// - Blank title or url fails with `Validation` before storage is touched.
    pub fn execute<R>(&self, repo: &R, bookmark: &DomainBookmark) -> RepoResult<BookmarkId>
    where
        R: BookmarkRepository + ?Sized,
    {
        bookmark.validate()?;
        let result = repo.insert(bookmark);
        match &result {
            Ok(id) => info!("event=bookmark_add module=command status=ok id={id}"),
            Err(err) => warn!("event=bookmark_add module=command status=error error={err}"),
        }
        result
    }
}

/// Lists every stored bookmark.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListBookmarksCommand;

impl ListBookmarksCommand {
    /// Returns all bookmarks, first-added first.
    pub fn execute<R>(&self, repo: &R) -> RepoResult<Vec<DomainBookmark>>
    where
        R: BookmarkRepository + ?Sized,
    {
        let bookmarks = repo.query_all()?;
        debug!(
            "event=bookmark_list module=command status=ok count={}",
            bookmarks.len()
        );
        Ok(bookmarks)
    }
}

/// Fetches one bookmark by id.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetBookmarkCommand;

impl GetBookmarkCommand {
    /// Returns `None` when no row has `id`.
    pub fn execute<R>(&self, repo: &R, id: BookmarkId) -> RepoResult<Option<DomainBookmark>>
    where
        R: BookmarkRepository + ?Sized,
    {
        repo.query_by_id(id)
    }
}

/// Removes the bookmark matching the given record's id.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeleteBookmarkCommand;

impl DeleteBookmarkCommand {
    /// Deletes the row identified by `bookmark.id`.
    ///
    /// # Errors
    /// - `MissingId` when `bookmark.id` is `None`.
    /// - `NotFound` when no row has that id.
    pub fn execute<R>(&self, repo: &R, bookmark: &DomainBookmark) -> RepoResult<()>
    where
        R: BookmarkRepository + ?Sized,
    {
        let id = bookmark.id.ok_or(RepoError::MissingId)?;
        let result = repo.delete(id);
        match &result {
            Ok(()) => info!("event=bookmark_delete module=command status=ok id={id}"),
            Err(err) => {
                warn!("event=bookmark_delete module=command status=error id={id} error={err}")
            }
        }
        result
    }
}

/// Rewrites title, url and notes of an existing bookmark.
#[derive(Debug, Clone, Copy, Default)]
pub struct EditBookmarkCommand;

impl EditBookmarkCommand {
    /// Updates the row identified by `bookmark.id` in place.
    ///
    /// `bookmark.date_added` is ignored; the stored creation date is kept.
    ///
    /// # Errors
    /// - `MissingId` when `bookmark.id` is `None`.
    /// - `Validation` when title or url is blank.
    /// - `NotFound` when no row has that id.
    pub fn execute<R>(&self, repo: &R, bookmark: &DomainBookmark) -> RepoResult<()>
    where
        R: BookmarkRepository + ?Sized,
    {
        let id = bookmark.id.ok_or(RepoError::MissingId)?;
        bookmark.validate()?;
        let result = repo.update(id, &bookmark.fields());
        match &result {
            Ok(()) => info!("event=bookmark_edit module=command status=ok id={id}"),
            Err(err) => {
                warn!("event=bookmark_edit module=command status=error id={id} error={err}")
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::{AddBookmarkCommand, DeleteBookmarkCommand, EditBookmarkCommand};
    use crate::model::bookmark::{
        BookmarkFields, BookmarkId, BookmarkValidationError, DomainBookmark,
    };
    use crate::repo::bookmark_repo::{BookmarkRepository, RepoError, RepoResult};
    use std::cell::RefCell;

    /// Records which repository calls a command made.
    #[derive(Default)]
    struct RecordingRepo {
        calls: RefCell<Vec<String>>,
    }

    impl BookmarkRepository for RecordingRepo {
        fn insert(&self, bookmark: &DomainBookmark) -> RepoResult<BookmarkId> {
            self.calls.borrow_mut().push("insert".to_string());
            Ok(bookmark.id.unwrap_or(1))
        }

        fn query_all(&self) -> RepoResult<Vec<DomainBookmark>> {
            self.calls.borrow_mut().push("query_all".to_string());
            Ok(Vec::new())
        }

        fn query_by_id(&self, id: BookmarkId) -> RepoResult<Option<DomainBookmark>> {
            self.calls.borrow_mut().push(format!("query_by_id:{id}"));
            Ok(None)
        }

        fn update(&self, id: BookmarkId, fields: &BookmarkFields) -> RepoResult<()> {
            self.calls
                .borrow_mut()
                .push(format!("update:{id}:{}", fields.title));
            Ok(())
        }

        fn delete(&self, id: BookmarkId) -> RepoResult<()> {
            self.calls.borrow_mut().push(format!("delete:{id}"));
            Err(RepoError::NotFound(id))
        }

        fn count(&self) -> RepoResult<u64> {
            Ok(0)
        }
    }

    #[test]
    fn edit_forwards_id_and_fields_once() {
        let repo = RecordingRepo::default();
        let bookmark = DomainBookmark::with_id(7, "renamed", "https://example.org", "");

        EditBookmarkCommand.execute(&repo, &bookmark).unwrap();

        assert_eq!(*repo.calls.borrow(), vec!["update:7:renamed".to_string()]);
    }

    #[test]
    fn delete_without_id_never_reaches_repository() {
        let repo = RecordingRepo::default();
        let bookmark = DomainBookmark::new("no id", "https://example.org", "");

        let err = DeleteBookmarkCommand.execute(&repo, &bookmark).unwrap_err();

        assert!(matches!(err, RepoError::MissingId));
        assert!(repo.calls.borrow().is_empty());
    }

    #[test]
    fn delete_propagates_repository_error_unchanged() {
        let repo = RecordingRepo::default();
        let bookmark = DomainBookmark::with_id(3, "gone", "https://example.org", "");

        let err = DeleteBookmarkCommand.execute(&repo, &bookmark).unwrap_err();

        assert!(matches!(err, RepoError::NotFound(3)));
    }

    #[test]
    fn blank_fields_never_reach_repository() {
        let repo = RecordingRepo::default();
        let blank_title = DomainBookmark::with_id(1, "  ", "https://example.org", "");
        let blank_url = DomainBookmark::with_id(1, "title", "", "");

        let add_err = AddBookmarkCommand.execute(&repo, &blank_title).unwrap_err();
        let edit_err = EditBookmarkCommand.execute(&repo, &blank_url).unwrap_err();

        assert!(matches!(
            add_err,
            RepoError::Validation(BookmarkValidationError::EmptyTitle)
        ));
        assert!(matches!(
            edit_err,
            RepoError::Validation(BookmarkValidationError::EmptyUrl)
        ));
        assert!(repo.calls.borrow().is_empty());
    }

    #[test]
    fn add_returns_repository_id() {
        let repo = RecordingRepo::default();
        let bookmark = DomainBookmark::with_id(42, "answer", "https://example.org", "");

        let id = AddBookmarkCommand.execute(&repo, &bookmark).unwrap();

        assert_eq!(id, 42);
        assert_eq!(*repo.calls.borrow(), vec!["insert".to_string()]);
    }
}
