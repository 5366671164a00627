//! Natural-key identity resolution.
//!
//! # Responsibility
//! - Turn person, project and activity names into stored records.
//!
//! # Invariants
//! - Matching is case-insensitive; stored casing is returned unchanged.
//! - Activities resolve only inside the named project, even when another
//!   project owns an activity with the same name.
//! - Read-only.

use crate::model::activity::Activity;
use crate::model::person::Person;
use crate::model::project::Project;
use crate::repo::activity_repo::{ActivityRepository, SqliteActivityRepository};
use crate::repo::person_repo::{PersonRepository, SqlitePersonRepository};
use crate::repo::project_repo::{ProjectRepository, SqliteProjectRepository};
use crate::repo::RepoResult;
use crate::service::{NotFound, ServiceResult};
use rusqlite::Connection;

/// Identity resolver backed by SQLite repositories.
pub type SqliteIdentityResolver<'conn> = IdentityResolver<
    SqlitePersonRepository<'conn>,
    SqliteProjectRepository<'conn>,
    SqliteActivityRepository<'conn>,
>;

/// Resolves natural keys to records.
pub struct IdentityResolver<P, J, A> {
    persons: P,
    projects: J,
    activities: A,
}

impl<'conn> SqliteIdentityResolver<'conn> {
    /// Builds a resolver over one migrated connection.
    pub fn sqlite(conn: &'conn Connection) -> RepoResult<Self> {
        Ok(Self::new(
            SqlitePersonRepository::try_new(conn)?,
            SqliteProjectRepository::try_new(conn)?,
            SqliteActivityRepository::try_new(conn)?,
        ))
    }
}

impl<P, J, A> IdentityResolver<P, J, A>
where
    P: PersonRepository,
    J: ProjectRepository,
    A: ActivityRepository,
{
    pub fn new(persons: P, projects: J, activities: A) -> Self {
        Self {
            persons,
            projects,
            activities,
        }
    }

    /// Finds a person by first and last name, ignoring case.
    ///
    /// When several persons share the name, the first stored one wins.
    pub fn find_person(&self, first_name: &str, last_name: &str) -> ServiceResult<Person> {
        self.persons
            .find_person_by_name(first_name, last_name)?
            .ok_or_else(|| {
                NotFound::Person {
                    first_name: first_name.to_string(),
                    last_name: last_name.to_string(),
                }
                .into()
            })
    }

    /// Finds a project by name, ignoring case.
    pub fn find_project(&self, name: &str) -> ServiceResult<Project> {
        self.projects.find_project_by_name(name)?.ok_or_else(|| {
            NotFound::Project {
                name: name.to_string(),
            }
            .into()
        })
    }

    /// Resolves `project_name` first, then `name` inside that project.
    ///
    /// # Errors
    /// - `NotFound::Project` when the project does not exist.
    /// - `NotFound::Activity` when the project has no such activity.
    pub fn find_activity(&self, name: &str, project_name: &str) -> ServiceResult<Activity> {
        let project = self.find_project(project_name)?;
        self.find_activity_in(&project, name)
    }

    pub(crate) fn find_activity_in(&self, project: &Project, name: &str) -> ServiceResult<Activity> {
        self.activities
            .find_activity_in_project(project.id, name)?
            .ok_or_else(|| {
                NotFound::Activity {
                    name: name.to_string(),
                    project_name: project.name.clone(),
                }
                .into()
            })
    }

    pub(crate) fn persons(&self) -> &P {
        &self.persons
    }

    pub(crate) fn projects(&self) -> &J {
        &self.projects
    }

    pub(crate) fn activities(&self) -> &A {
        &self.activities
    }
}
