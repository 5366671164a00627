//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts per entity.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Natural-key lookups compare normalized `*_key` columns only.
//! - List results follow storage (insertion) order.
//! - Repositories never raise "not found" for lookups; they return `None`
//!   and leave the semantic error to the service layer.

use crate::db::DbError;
use chrono::NaiveDate;
use rusqlite::{Connection, ErrorCode};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod activity_repo;
pub mod person_repo;
pub mod project_repo;
pub mod reported_time_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Unique constraint rejected the write.
    Conflict(String),
    /// Foreign key points at a row that does not exist.
    DanglingReference(String),
    /// Persisted row cannot be mapped back into the model.
    InvalidData(String),
    /// Connection is not migrated to the expected schema.
    MissingRequiredTable(&'static str),
    /// Date outside the years the date column can order correctly.
    DateOutOfRange(NaiveDate),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Conflict(message) => write!(f, "conflict: {message}"),
            Self::DanglingReference(message) => write!(f, "dangling reference: {message}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::DateOutOfRange(date) => {
                write!(f, "date {date} is outside the storable years 0000-9999")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Maps constraint failures of a write to semantic errors.
///
/// `subject` describes the row being written, e.g. ``project `Acme` ``.
pub(crate) fn map_write_error(err: rusqlite::Error, subject: &str) -> RepoError {
    if let rusqlite::Error::SqliteFailure(inner, _) = &err {
        if inner.code == ErrorCode::ConstraintViolation {
            match inner.extended_code {
                rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE => {
                    return RepoError::Conflict(format!("{subject} already exists"));
                }
                rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY => {
                    return RepoError::DanglingReference(format!(
                        "{subject} references a missing row"
                    ));
                }
                _ => {}
            }
        }
    }
    err.into()
}

pub(crate) fn parse_uuid(value: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}

/// Fails fast when `conn` was not opened through [`crate::db::open_db`].
pub(crate) fn ensure_tables(conn: &Connection, tables: &[&'static str]) -> RepoResult<()> {
    for &table in tables {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }
    Ok(())
}
