//! Project repository contract and SQLite implementation.
//!
//! # Invariants
//! - `projects.name` is unique as stored; a duplicate insert is a
//!   [`RepoError::Conflict`](crate::repo::RepoError::Conflict).
//! - Lookups match `name_key`, so names differing only by case collide on
//!   lookup; the first inserted one wins.

use crate::model::natural_key;
use crate::model::project::{Project, ProjectId};
use crate::repo::{ensure_tables, map_write_error, parse_uuid, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const PROJECT_SELECT_SQL: &str = "SELECT id, name, description FROM projects";

/// Repository interface for project records.
pub trait ProjectRepository {
    fn create_project(&self, project: &Project) -> RepoResult<ProjectId>;
    /// Finds a project by case-insensitive name.
    fn find_project_by_name(&self, name: &str) -> RepoResult<Option<Project>>;
    fn list_projects(&self) -> RepoResult<Vec<Project>>;
}

/// SQLite-backed project repository.
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_tables(conn, &["projects"])?;
        Ok(Self { conn })
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn create_project(&self, project: &Project) -> RepoResult<ProjectId> {
        self.conn
            .execute(
                "INSERT INTO projects (id, name, name_key, description)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    project.id.to_string(),
                    project.name.as_str(),
                    natural_key(&project.name),
                    project.description.as_deref(),
                ],
            )
            .map_err(|err| map_write_error(err, &format!("project `{}`", project.name)))?;
        Ok(project.id)
    }

    fn find_project_by_name(&self, name: &str) -> RepoResult<Option<Project>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PROJECT_SELECT_SQL}
             WHERE name_key = ?1
             ORDER BY rowid ASC
             LIMIT 1;"
        ))?;
        stmt.query_row([natural_key(name)], read_project_columns)
            .optional()?
            .map(into_project)
            .transpose()
    }

    fn list_projects(&self) -> RepoResult<Vec<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let rows = stmt.query_map([], read_project_columns)?;
        let mut projects = Vec::new();
        for row in rows {
            projects.push(into_project(row?)?);
        }
        Ok(projects)
    }
}

type ProjectColumns = (String, String, Option<String>);

fn read_project_columns(row: &Row<'_>) -> rusqlite::Result<ProjectColumns> {
    Ok((row.get("id")?, row.get("name")?, row.get("description")?))
}

fn into_project((id, name, description): ProjectColumns) -> RepoResult<Project> {
    Ok(Project {
        id: parse_uuid(&id, "projects.id")?,
        name,
        description,
    })
}
