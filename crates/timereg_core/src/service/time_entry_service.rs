//! Time entry use-case service.
//!
//! # Responsibility
//! - Create and delete reported time addressed by names, not IDs.
//! - Query entries by person, project, explicit range or period token.
//!
//! # Invariants
//! - Create/delete resolve Person, then Project, then Activity; the first
//!   failing lookup is the error returned.
//! - Person+project queries resolve Project before Person.
//! - Nothing is written unless every lookup succeeded.

use crate::model::hours::Hours;
use crate::model::reported_time::ReportedTime;
use crate::period::{resolve_period, today, DateRange};
use crate::repo::activity_repo::{ActivityRepository, SqliteActivityRepository};
use crate::repo::person_repo::{PersonRepository, SqlitePersonRepository};
use crate::repo::project_repo::{ProjectRepository, SqliteProjectRepository};
use crate::repo::reported_time_repo::{
    DurationMatch, ReportedTimeMatch, ReportedTimeQuery, ReportedTimeRepository,
    SqliteReportedTimeRepository,
};
use crate::repo::RepoResult;
use crate::service::identity::{IdentityResolver, SqliteIdentityResolver};
use crate::service::{ServiceError, ServiceResult};
use chrono::NaiveDate;
use log::{info, warn};
use rusqlite::Connection;

/// Time entry service backed by SQLite repositories.
pub type SqliteTimeEntryService<'conn> = TimeEntryService<
    SqliteReportedTimeRepository<'conn>,
    SqlitePersonRepository<'conn>,
    SqliteProjectRepository<'conn>,
    SqliteActivityRepository<'conn>,
>;

/// Name-addressed time entry, as supplied by callers.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeEntryRequest {
    pub project_name: String,
    pub activity_name: String,
    pub first_name: String,
    pub last_name: String,
    pub date: NaiveDate,
    pub duration: Hours,
}

/// Time entry service facade.
pub struct TimeEntryService<T, P, J, A> {
    entries: T,
    identity: IdentityResolver<P, J, A>,
    duration_match: DurationMatch,
}

impl<'conn> SqliteTimeEntryService<'conn> {
    /// Builds a service over one migrated connection, deleting by exact duration.
    pub fn sqlite(conn: &'conn Connection) -> RepoResult<Self> {
        Ok(Self::new(
            SqliteReportedTimeRepository::try_new(conn)?,
            SqliteIdentityResolver::sqlite(conn)?,
        ))
    }
}

impl<T, P, J, A> TimeEntryService<T, P, J, A>
where
    T: ReportedTimeRepository,
    P: PersonRepository,
    J: ProjectRepository,
    A: ActivityRepository,
{
    /// Creates a service that deletes by exact duration.
    pub fn new(entries: T, identity: IdentityResolver<P, J, A>) -> Self {
        Self {
            entries,
            identity,
            duration_match: DurationMatch::Exact,
        }
    }

    /// Replaces the duration comparison used by [`Self::delete_reported_time`].
    pub fn with_duration_match(mut self, duration_match: DurationMatch) -> Self {
        self.duration_match = duration_match;
        self
    }

    /// Records time for a person on a project activity.
    ///
    /// Duration sign and size are stored as given; identical entries are
    /// not merged.
    pub fn create_reported_time(&self, request: &TimeEntryRequest) -> ServiceResult<ReportedTime> {
        let result = self.resolve_keys(request).and_then(|key| {
            let entry = ReportedTime::new(key.activity_id, key.person_id, key.date, key.duration);
            self.entries.create_reported_time(&entry)?;
            Ok(entry)
        });

        match &result {
            Ok(entry) => info!(
                "event=time_entry_create module=time_entry status=ok entry_id={} date={}",
                entry.id, entry.date
            ),
            Err(err) => log_failure("time_entry_create", err),
        }
        result
    }

    /// Removes the first entry matching the request.
    ///
    /// Returns `Ok(false)` when all names resolve but no entry matches.
    /// Lookup failures are errors, not `false`.
    pub fn delete_reported_time(&self, request: &TimeEntryRequest) -> ServiceResult<bool> {
        let result = self
            .resolve_keys(request)
            .and_then(|key| Ok(self.entries.delete_first_matching(&key)?));

        match &result {
            Ok(deleted) => info!(
                "event=time_entry_delete module=time_entry status=ok deleted={} date={}",
                deleted, request.date
            ),
            Err(err) => log_failure("time_entry_delete", err),
        }
        result
    }

    /// Lists a person's entries dated within `[start_date, end_date]`.
    pub fn list_by_person_and_timespan(
        &self,
        first_name: &str,
        last_name: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> ServiceResult<Vec<ReportedTime>> {
        let person = self.identity.find_person(first_name, last_name)?;
        self.list(ReportedTimeQuery {
            person_id: Some(person.id),
            range: Some(DateRange::new(start_date, end_date)),
            ..ReportedTimeQuery::default()
        })
    }

    /// Lists a person's entries within a period token resolved against today.
    pub fn list_by_person_and_period(
        &self,
        first_name: &str,
        last_name: &str,
        period: &str,
    ) -> ServiceResult<Vec<ReportedTime>> {
        self.list_by_person_and_period_at(first_name, last_name, period, today())
    }

    /// Same as [`Self::list_by_person_and_period`] with an explicit reference date.
    pub fn list_by_person_and_period_at(
        &self,
        first_name: &str,
        last_name: &str,
        period: &str,
        reference: NaiveDate,
    ) -> ServiceResult<Vec<ReportedTime>> {
        let person = self.identity.find_person(first_name, last_name)?;
        let range = resolve_period(period, reference)?;
        self.list(ReportedTimeQuery {
            person_id: Some(person.id),
            range: Some(range),
            ..ReportedTimeQuery::default()
        })
    }

    /// Lists a person's entries on activities of one project.
    pub fn list_by_person_and_project(
        &self,
        first_name: &str,
        last_name: &str,
        project_name: &str,
    ) -> ServiceResult<Vec<ReportedTime>> {
        let project = self.identity.find_project(project_name)?;
        let person = self.identity.find_person(first_name, last_name)?;
        self.list(ReportedTimeQuery {
            person_id: Some(person.id),
            project_id: Some(project.id),
            range: None,
        })
    }

    /// Lists all entries on a project's activities within `[start_date, end_date]`.
    pub fn list_by_project_and_timespan(
        &self,
        project_name: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> ServiceResult<Vec<ReportedTime>> {
        let project = self.identity.find_project(project_name)?;
        self.list(ReportedTimeQuery {
            project_id: Some(project.id),
            range: Some(DateRange::new(start_date, end_date)),
            ..ReportedTimeQuery::default()
        })
    }

    fn list(&self, query: ReportedTimeQuery) -> ServiceResult<Vec<ReportedTime>> {
        Ok(self.entries.list_reported_times(&query)?)
    }

    fn resolve_keys(&self, request: &TimeEntryRequest) -> ServiceResult<ReportedTimeMatch> {
        let person = self
            .identity
            .find_person(&request.first_name, &request.last_name)?;
        let project = self.identity.find_project(&request.project_name)?;
        let activity = self
            .identity
            .find_activity_in(&project, &request.activity_name)?;

        Ok(ReportedTimeMatch {
            activity_id: activity.id,
            person_id: person.id,
            date: request.date,
            duration: request.duration,
            duration_match: self.duration_match,
        })
    }
}

// Error text can carry person names, so only the code is logged.
fn log_failure(event: &str, err: &ServiceError) {
    warn!(
        "event={} module=time_entry status=error error_code={}",
        event,
        err.error_code()
    );
}
