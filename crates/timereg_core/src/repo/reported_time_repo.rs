//! Reported time repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist time entries and remove them by composite match.
//! - Filter entries by person, project and inclusive date range.
//!
//! # Invariants
//! - Composite delete removes at most one row: the first match in
//!   insertion order.
//! - Date filters are inclusive on both ends.
//! - Dates are stored as `YYYY-MM-DD` text, so only years 0-9999 are
//!   accepted; inside that span text order equals calendar order.
//! - Durations are stored as normalized decimal text, never as REAL.

use crate::model::activity::ActivityId;
use crate::model::hours::Hours;
use crate::model::person::PersonId;
use crate::model::project::ProjectId;
use crate::model::reported_time::{ReportedTime, ReportedTimeId};
use crate::period::DateRange;
use crate::repo::{ensure_tables, map_write_error, parse_uuid, RepoError, RepoResult};
use chrono::{Datelike, NaiveDate};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::{params, params_from_iter, Connection, ToSql};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

const STORABLE_YEARS: RangeInclusive<i32> = 0..=9999;

/// How a requested duration is compared to stored durations on delete.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DurationMatch {
    /// Stored value must equal the requested value.
    #[default]
    Exact,
    /// Stored value may differ by at most `hours`.
    Tolerance { hours: Hours },
}

impl DurationMatch {
    /// Returns whether `stored` satisfies a delete request for `requested`.
    pub fn matches(self, stored: Hours, requested: Hours) -> bool {
        match self {
            Self::Exact => stored == requested,
            Self::Tolerance { hours } => stored
                .abs_diff(requested)
                .is_some_and(|diff| diff <= hours.as_decimal()),
        }
    }
}

/// Composite key identifying entries to delete.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportedTimeMatch {
    pub activity_id: ActivityId,
    pub person_id: PersonId,
    pub date: NaiveDate,
    pub duration: Hours,
    pub duration_match: DurationMatch,
}

/// Filter options for listing entries. Unset fields do not filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportedTimeQuery {
    pub person_id: Option<PersonId>,
    /// Keeps entries whose activity belongs to this project.
    pub project_id: Option<ProjectId>,
    pub range: Option<DateRange>,
}

/// Repository interface for reported time entries.
pub trait ReportedTimeRepository {
    fn create_reported_time(&self, entry: &ReportedTime) -> RepoResult<ReportedTimeId>;
    /// Deletes the first entry matching `key`; returns whether a row was removed.
    fn delete_first_matching(&self, key: &ReportedTimeMatch) -> RepoResult<bool>;
    fn list_reported_times(&self, query: &ReportedTimeQuery) -> RepoResult<Vec<ReportedTime>>;
}

/// SQLite-backed reported time repository.
pub struct SqliteReportedTimeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReportedTimeRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_tables(conn, &["activities", "persons", "reported_times"])?;
        Ok(Self { conn })
    }
}

impl ReportedTimeRepository for SqliteReportedTimeRepository<'_> {
    fn create_reported_time(&self, entry: &ReportedTime) -> RepoResult<ReportedTimeId> {
        if !STORABLE_YEARS.contains(&entry.date.year()) {
            return Err(RepoError::DateOutOfRange(entry.date));
        }
        self.conn
            .execute(
                "INSERT INTO reported_times (id, activity_id, person_id, date, duration)
                 VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    entry.id.to_string(),
                    entry.activity_id.to_string(),
                    entry.person_id.to_string(),
                    entry.date,
                    entry.duration,
                ],
            )
            .map_err(|err| map_write_error(err, "reported time"))?;
        Ok(entry.id)
    }

    fn delete_first_matching(&self, key: &ReportedTimeMatch) -> RepoResult<bool> {
        let tx = self.conn.unchecked_transaction()?;
        let matched_rowid = {
            let mut stmt = tx.prepare(
                "SELECT rowid, duration
                 FROM reported_times
                 WHERE activity_id = ?1
                   AND person_id = ?2
                   AND date = ?3
                 ORDER BY rowid ASC;",
            )?;
            let mut rows = stmt.query(params![
                key.activity_id.to_string(),
                key.person_id.to_string(),
                key.date,
            ])?;
            let mut matched = None;
            while let Some(row) = rows.next()? {
                let stored: Hours = row.get(1)?;
                if key.duration_match.matches(stored, key.duration) {
                    matched = Some(row.get::<_, i64>(0)?);
                    break;
                }
            }
            matched
        };

        let Some(rowid) = matched_rowid else {
            return Ok(false);
        };
        tx.execute("DELETE FROM reported_times WHERE rowid = ?1;", [rowid])?;
        tx.commit()?;
        Ok(true)
    }

    fn list_reported_times(&self, query: &ReportedTimeQuery) -> RepoResult<Vec<ReportedTime>> {
        let mut sql = String::from(
            "SELECT
                rt.id AS id,
                rt.activity_id AS activity_id,
                rt.person_id AS person_id,
                rt.date AS date,
                rt.duration AS duration
             FROM reported_times rt
             INNER JOIN activities a ON a.id = rt.activity_id
             WHERE 1 = 1",
        );
        let mut bind_values: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(person_id) = query.person_id {
            sql.push_str(" AND rt.person_id = ?");
            bind_values.push(Box::new(person_id.to_string()));
        }

        if let Some(project_id) = query.project_id {
            sql.push_str(" AND a.project_id = ?");
            bind_values.push(Box::new(project_id.to_string()));
        }

        if let Some(range) = query.range {
            let Some(range) = storable_part(range) else {
                return Ok(Vec::new());
            };
            sql.push_str(" AND rt.date >= ? AND rt.date <= ?");
            bind_values.push(Box::new(range.start));
            bind_values.push(Box::new(range.end));
        }

        sql.push_str(" ORDER BY rt.rowid ASC;");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values.iter()))?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            let id: String = row.get("id")?;
            let activity_id: String = row.get("activity_id")?;
            let person_id: String = row.get("person_id")?;

            entries.push(ReportedTime {
                id: parse_uuid(&id, "reported_times.id")?,
                activity_id: parse_uuid(&activity_id, "reported_times.activity_id")?,
                person_id: parse_uuid(&person_id, "reported_times.person_id")?,
                date: row.get("date")?,
                duration: row.get("duration")?,
            });
        }

        Ok(entries)
    }
}

impl ToSql for Hours {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_string()))
    }
}

impl FromSql for Hours {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|err| FromSqlError::Other(Box::new(err)))
    }
}

/// Narrows `range` to the years that can be stored; `None` when nothing is left.
fn storable_part(range: DateRange) -> Option<DateRange> {
    let first = NaiveDate::from_ymd_opt(*STORABLE_YEARS.start(), 1, 1)?;
    let last = NaiveDate::from_ymd_opt(*STORABLE_YEARS.end(), 12, 31)?;
    range.intersection(&DateRange::new(first, last))
}
