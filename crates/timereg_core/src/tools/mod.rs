//! Tool-call surface for external orchestrators.
//!
//! # Responsibility
//! - Publish one named, described tool per core operation.
//! - Decode loosely typed JSON arguments into typed service calls.
//! - Wrap outcomes in a response envelope that never panics.
//!
//! # Invariants
//! - Dates are ISO-8601 `YYYY-MM-DD` strings.
//! - Durations are decimal strings or JSON numbers.
//! - Tool descriptions are guidance only; behavior lives in the services.

mod args;
mod catalog;
mod dispatch;

use crate::config::EngineConfig;
use crate::repo::RepoError;
use crate::service::ServiceError;
use log::{info, warn};
use rusqlite::Connection;
use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub use catalog::{find_tool, tool_definitions, ParameterKind, ToolDefinition, ToolParameter};
pub use dispatch::call_tool;

/// Failure of a tool invocation.
#[derive(Debug)]
pub enum ToolError {
    UnknownTool(String),
    MissingArgument(&'static str),
    InvalidArgument {
        name: &'static str,
        reason: String,
    },
    Service(ServiceError),
    Serialize(serde_json::Error),
}

impl ToolError {
    /// Stable machine-readable code.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownTool(_) => "unknown_tool",
            Self::MissingArgument(_) => "missing_argument",
            Self::InvalidArgument { .. } => "invalid_argument",
            Self::Service(err) => err.error_code(),
            Self::Serialize(_) => "serialize_failed",
        }
    }
}

impl Display for ToolError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownTool(name) => write!(f, "unknown tool `{name}`"),
            Self::MissingArgument(name) => write!(f, "missing required argument `{name}`"),
            Self::InvalidArgument { name, reason } => {
                write!(f, "invalid argument `{name}`: {reason}")
            }
            Self::Service(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize result: {err}"),
        }
    }
}

impl Error for ToolError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Service(err) => Some(err),
            Self::Serialize(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ServiceError> for ToolError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<RepoError> for ToolError {
    fn from(value: RepoError) -> Self {
        Self::Service(ServiceError::Repo(value))
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Response envelope returned to tool callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolResponse {
    pub ok: bool,
    /// Operation result; `null` for failures.
    pub result: Value,
    pub error_code: Option<&'static str>,
    /// Human-readable outcome, the error text on failure.
    pub message: String,
}

/// Invokes `name` with `args` and wraps the outcome.
///
/// # Contract
/// - Never panics.
/// - Emits one `tool_call` log event with status and duration.
pub fn invoke(conn: &Connection, config: &EngineConfig, name: &str, args: &Value) -> ToolResponse {
    let started_at = Instant::now();
    match call_tool(conn, config, name, args) {
        Ok(result) => {
            info!(
                "event=tool_call module=tools status=ok tool={} duration_ms={}",
                name,
                started_at.elapsed().as_millis()
            );
            ToolResponse {
                ok: true,
                result,
                error_code: None,
                message: format!("{name} succeeded."),
            }
        }
        Err(err) => {
            warn!(
                "event=tool_call module=tools status=error tool={} duration_ms={} error_code={}",
                name,
                started_at.elapsed().as_millis(),
                err.error_code()
            );
            ToolResponse {
                ok: false,
                result: Value::Null,
                error_code: Some(err.error_code()),
                message: err.to_string(),
            }
        }
    }
}
