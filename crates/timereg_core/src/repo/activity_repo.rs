//! Activity repository contract and SQLite implementation.
//!
//! # Invariants
//! - Every activity row references an existing project (`foreign_keys=ON`).
//! - Name lookups are always scoped to one project.

use crate::model::activity::{Activity, ActivityId};
use crate::model::natural_key;
use crate::model::project::ProjectId;
use crate::repo::{ensure_tables, map_write_error, parse_uuid, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const ACTIVITY_SELECT_SQL: &str = "SELECT id, project_id, name, description FROM activities";

/// Repository interface for activity records.
pub trait ActivityRepository {
    fn create_activity(&self, activity: &Activity) -> RepoResult<ActivityId>;
    /// Finds an activity by case-insensitive name inside one project.
    fn find_activity_in_project(
        &self,
        project_id: ProjectId,
        name: &str,
    ) -> RepoResult<Option<Activity>>;
    fn list_activities(&self) -> RepoResult<Vec<Activity>>;
    fn list_activities_for_project(&self, project_id: ProjectId) -> RepoResult<Vec<Activity>>;
}

/// SQLite-backed activity repository.
pub struct SqliteActivityRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteActivityRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_tables(conn, &["projects", "activities"])?;
        Ok(Self { conn })
    }

    fn query_activities(
        &self,
        filter_sql: &str,
        bind: impl rusqlite::Params,
    ) -> RepoResult<Vec<Activity>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ACTIVITY_SELECT_SQL} {filter_sql} ORDER BY rowid ASC;"))?;
        let rows = stmt.query_map(bind, read_activity_columns)?;
        let mut activities = Vec::new();
        for row in rows {
            activities.push(into_activity(row?)?);
        }
        Ok(activities)
    }
}

impl ActivityRepository for SqliteActivityRepository<'_> {
    fn create_activity(&self, activity: &Activity) -> RepoResult<ActivityId> {
        self.conn
            .execute(
                "INSERT INTO activities (id, project_id, name, name_key, description)
                 VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    activity.id.to_string(),
                    activity.project_id.to_string(),
                    activity.name.as_str(),
                    natural_key(&activity.name),
                    activity.description.as_deref(),
                ],
            )
            .map_err(|err| map_write_error(err, &format!("activity `{}`", activity.name)))?;
        Ok(activity.id)
    }

    fn find_activity_in_project(
        &self,
        project_id: ProjectId,
        name: &str,
    ) -> RepoResult<Option<Activity>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ACTIVITY_SELECT_SQL}
             WHERE project_id = ?1
               AND name_key = ?2
             ORDER BY rowid ASC
             LIMIT 1;"
        ))?;
        stmt.query_row(
            params![project_id.to_string(), natural_key(name)],
            read_activity_columns,
        )
        .optional()?
        .map(into_activity)
        .transpose()
    }

    fn list_activities(&self) -> RepoResult<Vec<Activity>> {
        self.query_activities("", [])
    }

    fn list_activities_for_project(&self, project_id: ProjectId) -> RepoResult<Vec<Activity>> {
        self.query_activities("WHERE project_id = ?1", [project_id.to_string()])
    }
}

type ActivityColumns = (String, String, String, Option<String>);

fn read_activity_columns(row: &Row<'_>) -> rusqlite::Result<ActivityColumns> {
    Ok((
        row.get("id")?,
        row.get("project_id")?,
        row.get("name")?,
        row.get("description")?,
    ))
}

fn into_activity((id, project_id, name, description): ActivityColumns) -> RepoResult<Activity> {
    Ok(Activity {
        id: parse_uuid(&id, "activities.id")?,
        project_id: parse_uuid(&project_id, "activities.project_id")?,
        name,
        description,
    })
}
