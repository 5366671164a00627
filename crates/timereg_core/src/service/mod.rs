//! Core use-case services.
//!
//! # Responsibility
//! - Resolve human-readable names into records (`identity`).
//! - Create and list persons, projects and activities (`registry_service`).
//! - Create, delete and query reported time (`time_entry_service`).
//!
//! # Invariants
//! - Every failure surfaces before any mutation happens.
//! - Errors propagate unchanged; services never retry or recover.

use crate::period::PeriodError;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod identity;
pub mod registry_service;
pub mod time_entry_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Natural-key lookup that matched no record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFound {
    Person {
        first_name: String,
        last_name: String,
    },
    Project {
        name: String,
    },
    /// No activity of that name under the resolved project.
    Activity {
        name: String,
        project_name: String,
    },
}

impl Display for NotFound {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Person {
                first_name,
                last_name,
            } => write!(
                f,
                "Person with first name {first_name} and last name {last_name} not found"
            ),
            Self::Project { name } => write!(f, "Project {name} not found"),
            Self::Activity { name, project_name } => {
                write!(f, "Activity {name} not found in project {project_name}")
            }
        }
    }
}

/// Error returned by service operations.
#[derive(Debug)]
pub enum ServiceError {
    NotFound(NotFound),
    InvalidPeriod(PeriodError),
    Repo(RepoError),
}

impl ServiceError {
    /// Stable machine-readable code used in logs and tool responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(NotFound::Person { .. }) => "person_not_found",
            Self::NotFound(NotFound::Project { .. }) => "project_not_found",
            Self::NotFound(NotFound::Activity { .. }) => "activity_not_found",
            Self::InvalidPeriod(_) => "invalid_period",
            Self::Repo(RepoError::Conflict(_)) => "conflict",
            Self::Repo(RepoError::DateOutOfRange(_)) => "date_out_of_range",
            Self::Repo(_) => "storage_error",
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(err) => write!(f, "{err}"),
            Self::InvalidPeriod(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::InvalidPeriod(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<NotFound> for ServiceError {
    fn from(value: NotFound) -> Self {
        Self::NotFound(value)
    }
}

impl From<PeriodError> for ServiceError {
    fn from(value: PeriodError) -> Self {
        Self::InvalidPeriod(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}
