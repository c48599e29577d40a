//! Bookmark repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the five storage operations commands rely on, keyed by `id`.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths validate required fields before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - `query_all` returns rows in insertion order.
//! - Auto-assigned ids are at least 1 and above every stored id.

use crate::db::migrations::{current_version, latest_version};
use crate::db::DbError;
use crate::model::bookmark::{
    BookmarkFields, BookmarkId, BookmarkValidationError, DomainBookmark,
};
use chrono::NaiveDate;
use rusqlite::{params, Connection, ErrorCode, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const BOOKMARK_SELECT_SQL: &str = "SELECT
    id,
    title,
    url,
    notes,
    date_added
FROM bookmarks";

const DATE_ADDED_FORMAT: &str = "%Y-%m-%d";

const REQUIRED_TABLE: &str = "bookmarks";
const REQUIRED_COLUMNS: &[&str] = &["seq", "id", "title", "url", "notes", "date_added"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for bookmark persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(BookmarkValidationError),
    Db(DbError),
    NotFound(BookmarkId),
    /// Edit or delete was given a bookmark without an id.
    MissingId,
    /// Storage rejected the write, e.g. a duplicate id.
    ConstraintViolation(String),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "bookmark not found: {id}"),
            Self::MissingId => write!(f, "bookmark id is required for this operation"),
            Self::ConstraintViolation(message) => {
                write!(f, "bookmark write rejected by storage: {message}")
            }
            Self::InvalidData(message) => {
                write!(f, "invalid persisted bookmark data: {message}")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} is behind required {expected_version}; open it with db::open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BookmarkValidationError> for RepoError {
    fn from(value: BookmarkValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::SqliteFailure(err, message)
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Self::ConstraintViolation(message.unwrap_or_else(|| err.to_string()))
            }
            other => Self::Db(DbError::Sqlite(other)),
        }
    }
}

/// Storage contract used by the bookmark commands.
pub trait BookmarkRepository {
    /// Inserts one row and returns the effective id.
    ///
    /// A caller-supplied `id` is stored verbatim; `None` is replaced by the
    /// next id above every stored id (at least 1).
    fn insert(&self, bookmark: &DomainBookmark) -> RepoResult<BookmarkId>;
    /// Returns every row in insertion order.
    fn query_all(&self) -> RepoResult<Vec<DomainBookmark>>;
    fn query_by_id(&self, id: BookmarkId) -> RepoResult<Option<DomainBookmark>>;
    /// Rewrites the mutable fields of the row matching `id`.
    fn update(&self, id: BookmarkId, fields: &BookmarkFields) -> RepoResult<()>;
    fn delete(&self, id: BookmarkId) -> RepoResult<()>;
    fn count(&self) -> RepoResult<u64>;
}

/// SQLite-backed bookmark repository.
pub struct SqliteBookmarkRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookmarkRepository<'conn> {
    /// Wraps a connection after checking its schema is usable.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the schema
    ///   does not match what this repository queries.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_version(conn)?;
        if actual_version < expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        ensure_schema(conn)?;
        Ok(Self { conn })
    }

    /// Returns `max(MAX(id), 0) + 1`.
    ///
    /// # Errors
    /// - `ConstraintViolation` when `i64::MAX` is already taken.
    fn next_free_id(&self) -> RepoResult<BookmarkId> {
        let max_id: Option<BookmarkId> =
            self.conn
                .query_row("SELECT MAX(id) FROM bookmarks;", [], |row| row.get(0))?;

        max_id
            .unwrap_or(0)
            .max(0)
            .checked_add(1)
            .ok_or_else(|| {
                RepoError::ConstraintViolation(format!(
                    "no bookmark id left above {}",
                    BookmarkId::MAX
                ))
            })
    }
}

impl BookmarkRepository for SqliteBookmarkRepository<'_> {
    fn insert(&self, bookmark: &DomainBookmark) -> RepoResult<BookmarkId> {
        bookmark.validate()?;

        let id = match bookmark.id {
            Some(id) => id,
            None => self.next_free_id()?,
        };

        self.conn.execute(
            "INSERT INTO bookmarks (
                id,
                title,
                url,
                notes,
                date_added
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                id,
                bookmark.title.as_str(),
                bookmark.url.as_str(),
                bookmark.notes.as_str(),
                bookmark.date_added,
            ],
        )?;

        Ok(id)
    }

    fn query_all(&self) -> RepoResult<Vec<DomainBookmark>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOKMARK_SELECT_SQL} ORDER BY seq ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut bookmarks = Vec::new();

        while let Some(row) = rows.next()? {
            bookmarks.push(parse_bookmark_row(row)?);
        }

        Ok(bookmarks)
    }

    fn query_by_id(&self, id: BookmarkId) -> RepoResult<Option<DomainBookmark>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOKMARK_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_bookmark_row(row)?));
        }

        Ok(None)
    }

    fn update(&self, id: BookmarkId, fields: &BookmarkFields) -> RepoResult<()> {
        fields.validate()?;

        let changed = self.conn.execute(
            "UPDATE bookmarks
             SET
                title = ?1,
                url = ?2,
                notes = ?3
             WHERE id = ?4;",
            params![
                fields.title.as_str(),
                fields.url.as_str(),
                fields.notes.as_str(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete(&self, id: BookmarkId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM bookmarks WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn count(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM bookmarks;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative bookmark count `{count}`")))
    }
}

fn ensure_schema(conn: &Connection) -> RepoResult<()> {
    let table_exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [REQUIRED_TABLE],
        |row| row.get(0),
    )?;
    if table_exists == 0 {
        return Err(RepoError::MissingRequiredTable(REQUIRED_TABLE));
    }

    let mut stmt = conn.prepare(&format!("PRAGMA table_info({REQUIRED_TABLE});"))?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>("name"))?
        .collect::<Result<Vec<_>, _>>()?;

    for &column in REQUIRED_COLUMNS {
        if !columns.iter().any(|name| name == column) {
            return Err(RepoError::MissingRequiredColumn {
                table: REQUIRED_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn parse_bookmark_row(row: &Row<'_>) -> RepoResult<DomainBookmark> {
    let date_text: String = row.get("date_added")?;
    let date_added = NaiveDate::parse_from_str(&date_text, DATE_ADDED_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid date `{date_text}` in bookmarks.date_added"
        ))
    })?;

    let id: BookmarkId = row.get("id")?;
    let bookmark = DomainBookmark {
        id: Some(id),
        title: row.get("title")?,
        url: row.get("url")?,
        notes: row.get("notes")?,
        date_added,
    };
    bookmark
        .validate()
        .map_err(|err| RepoError::InvalidData(format!("bookmark {id}: {err}")))?;
    Ok(bookmark)
}
