//! Core domain logic for time registration.
//!
//! Resolves person, project and activity names to records, records and
//! queries reported time, and turns period tokens into date ranges.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod period;
pub mod repo;
pub mod service;
pub mod tools;

pub use config::{ConfigError, DatabaseConfig, EngineConfig, LoggingConfig};
pub use logging::{
    default_log_level, init_logging, init_logging_from_config, logging_status, LoggingError,
};
pub use model::activity::{Activity, ActivityId};
pub use model::hours::{Hours, HoursParseError};
pub use model::person::{Person, PersonId};
pub use model::project::{Project, ProjectId};
pub use model::reported_time::{ReportedTime, ReportedTimeId};
pub use period::{resolve_period, DateRange, PeriodError, PeriodToken};
pub use repo::reported_time_repo::DurationMatch;
pub use repo::{RepoError, RepoResult};
pub use service::identity::{IdentityResolver, SqliteIdentityResolver};
pub use service::registry_service::{RegistryService, SqliteRegistryService};
pub use service::time_entry_service::{
    SqliteTimeEntryService, TimeEntryRequest, TimeEntryService,
};
pub use service::{NotFound, ServiceError, ServiceResult};
pub use tools::{invoke, ToolError, ToolResponse};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
