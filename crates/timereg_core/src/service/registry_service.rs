//! Entity registry use-case service.
//!
//! # Responsibility
//! - Create persons, projects and activities.
//! - List them, optionally scoped to one project.
//!
//! # Invariants
//! - `create_person` never checks for an existing namesake.
//! - Lists follow storage order and are empty, never an error, when
//!   nothing matches.

use crate::model::activity::Activity;
use crate::model::person::Person;
use crate::model::project::Project;
use crate::repo::activity_repo::{ActivityRepository, SqliteActivityRepository};
use crate::repo::person_repo::{PersonRepository, SqlitePersonRepository};
use crate::repo::project_repo::{ProjectRepository, SqliteProjectRepository};
use crate::repo::RepoResult;
use crate::service::identity::{IdentityResolver, SqliteIdentityResolver};
use crate::service::ServiceResult;
use log::info;
use rusqlite::Connection;

/// Registry backed by SQLite repositories.
pub type SqliteRegistryService<'conn> = RegistryService<
    SqlitePersonRepository<'conn>,
    SqliteProjectRepository<'conn>,
    SqliteActivityRepository<'conn>,
>;

/// Registry facade over person/project/activity repositories.
pub struct RegistryService<P, J, A> {
    identity: IdentityResolver<P, J, A>,
}

impl<'conn> SqliteRegistryService<'conn> {
    /// Builds a registry over one migrated connection.
    pub fn sqlite(conn: &'conn Connection) -> RepoResult<Self> {
        Ok(Self::new(SqliteIdentityResolver::sqlite(conn)?))
    }
}

impl<P, J, A> RegistryService<P, J, A>
where
    P: PersonRepository,
    J: ProjectRepository,
    A: ActivityRepository,
{
    pub fn new(identity: IdentityResolver<P, J, A>) -> Self {
        Self { identity }
    }

    /// Returns the resolver this registry looks names up with.
    pub fn identity(&self) -> &IdentityResolver<P, J, A> {
        &self.identity
    }

    /// Adds a person. Duplicate names are allowed to accumulate.
    pub fn create_person(
        &self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> ServiceResult<Person> {
        let person = Person::new(first_name, last_name);
        self.identity.persons().create_person(&person)?;
        info!(
            "event=person_create module=registry status=ok person_id={}",
            person.id
        );
        Ok(person)
    }

    /// Adds a project.
    ///
    /// # Errors
    /// - `RepoError::Conflict` when a project with the exact same name exists.
    pub fn create_project(
        &self,
        name: impl Into<String>,
        description: Option<String>,
    ) -> ServiceResult<Project> {
        let project = Project::new(name, description);
        self.identity.projects().create_project(&project)?;
        info!(
            "event=project_create module=registry status=ok project_id={}",
            project.id
        );
        Ok(project)
    }

    /// Adds an activity under the project named `project_name`.
    ///
    /// # Errors
    /// - `NotFound::Project` when the project does not exist.
    /// - `RepoError::Conflict` when an activity with the same name exists.
    pub fn create_activity(
        &self,
        project_name: &str,
        name: impl Into<String>,
        description: Option<String>,
    ) -> ServiceResult<Activity> {
        let project = self.identity.find_project(project_name)?;
        let activity = Activity::new(project.id, name, description);
        self.identity.activities().create_activity(&activity)?;
        info!(
            "event=activity_create module=registry status=ok activity_id={} project_id={}",
            activity.id, project.id
        );
        Ok(activity)
    }

    pub fn list_persons(&self) -> ServiceResult<Vec<Person>> {
        Ok(self.identity.persons().list_persons()?)
    }

    pub fn list_projects(&self) -> ServiceResult<Vec<Project>> {
        Ok(self.identity.projects().list_projects()?)
    }

    pub fn list_activities(&self) -> ServiceResult<Vec<Activity>> {
        Ok(self.identity.activities().list_activities()?)
    }

    /// Lists activities of one project, resolving it by name first.
    pub fn list_activities_for_project(&self, project_name: &str) -> ServiceResult<Vec<Activity>> {
        let project = self.identity.find_project(project_name)?;
        Ok(self
            .identity
            .activities()
            .list_activities_for_project(project.id)?)
    }
}
