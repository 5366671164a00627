//! Tool name to service call routing.

use crate::config::EngineConfig;
use crate::service::identity::SqliteIdentityResolver;
use crate::service::registry_service::SqliteRegistryService;
use crate::service::time_entry_service::{SqliteTimeEntryService, TimeEntryRequest};
use crate::tools::args::ToolArgs;
use crate::tools::ToolError;
use rusqlite::Connection;
use serde::Serialize;
use serde_json::Value;

/// Runs tool `name` against `conn` and returns its JSON result.
///
/// # Errors
/// - `UnknownTool` when `name` is not in the catalog.
/// - `MissingArgument`/`InvalidArgument` when arguments do not decode.
/// - `Service` for lookup, period and storage failures.
pub fn call_tool(
    conn: &Connection,
    config: &EngineConfig,
    name: &str,
    args: &Value,
) -> Result<Value, ToolError> {
    let args = ToolArgs::new(args)?;

    match name {
        "list_all_persons" => to_json(registry(conn)?.list_persons()?),
        "create_person" => to_json(
            registry(conn)?.create_person(args.text("first_name")?, args.text("last_name")?)?,
        ),
        "find_person_by_name" => to_json(
            SqliteIdentityResolver::sqlite(conn)?
                .find_person(args.text("first_name")?, args.text("last_name")?)?,
        ),
        "list_all_projects" => to_json(registry(conn)?.list_projects()?),
        "find_project_by_name" => to_json(
            SqliteIdentityResolver::sqlite(conn)?.find_project(args.text("project_name")?)?,
        ),
        "create_project" => to_json(registry(conn)?.create_project(
            args.text("project_name")?,
            args.optional_text("description")?.map(str::to_string),
        )?),
        "list_all_activities" => to_json(registry(conn)?.list_activities()?),
        "get_activity_by_name" => to_json(
            SqliteIdentityResolver::sqlite(conn)?
                .find_activity(args.text("activity_name")?, args.text("project_name")?)?,
        ),
        "list_activities_for_project" => {
            to_json(registry(conn)?.list_activities_for_project(args.text("project_name")?)?)
        }
        "create_activity" => to_json(registry(conn)?.create_activity(
            args.text("project_name")?,
            args.text("activity_name")?,
            args.optional_text("description")?.map(str::to_string),
        )?),
        "create_reported_time" => {
            let request = time_entry_request(&args)?;
            to_json(time_entries(conn, config)?.create_reported_time(&request)?)
        }
        "delete_reported_time" => {
            let request = time_entry_request(&args)?;
            to_json(time_entries(conn, config)?.delete_reported_time(&request)?)
        }
        "list_reported_times_for_person_and_timespan" => {
            to_json(time_entries(conn, config)?.list_by_person_and_timespan(
                args.text("first_name")?,
                args.text("last_name")?,
                args.date("start_date")?,
                args.date("end_date")?,
            )?)
        }
        "list_reported_times_for_person_and_period" => {
            to_json(time_entries(conn, config)?.list_by_person_and_period(
                args.text("first_name")?,
                args.text("last_name")?,
                args.text("period")?,
            )?)
        }
        "list_reported_times_for_person_and_project" => {
            to_json(time_entries(conn, config)?.list_by_person_and_project(
                args.text("first_name")?,
                args.text("last_name")?,
                args.text("project_name")?,
            )?)
        }
        "list_reported_times_for_project_and_timespan" => {
            to_json(time_entries(conn, config)?.list_by_project_and_timespan(
                args.text("project_name")?,
                args.date("start_date")?,
                args.date("end_date")?,
            )?)
        }
        other => Err(ToolError::UnknownTool(other.to_string())),
    }
}

fn registry(conn: &Connection) -> Result<SqliteRegistryService<'_>, ToolError> {
    Ok(SqliteRegistryService::sqlite(conn)?)
}

fn time_entries<'conn>(
    conn: &'conn Connection,
    config: &EngineConfig,
) -> Result<SqliteTimeEntryService<'conn>, ToolError> {
    Ok(SqliteTimeEntryService::sqlite(conn)?.with_duration_match(config.duration_match))
}

fn time_entry_request(args: &ToolArgs<'_>) -> Result<TimeEntryRequest, ToolError> {
    Ok(TimeEntryRequest {
        project_name: args.text("project_name")?.to_string(),
        activity_name: args.text("activity_name")?.to_string(),
        first_name: args.text("first_name")?.to_string(),
        last_name: args.text("last_name")?.to_string(),
        date: args.date("date")?,
        duration: args.hours("duration")?,
    })
}

fn to_json(value: impl Serialize) -> Result<Value, ToolError> {
    Ok(serde_json::to_value(value)?)
}
