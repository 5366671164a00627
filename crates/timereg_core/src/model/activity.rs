//! Activity records.
//!
//! # Invariants
//! - An activity always belongs to exactly one project.
//! - Activity names are unique across all projects as stored.

use crate::model::project::ProjectId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type ActivityId = Uuid;

/// Kind of work time can be reported against, scoped to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    /// Owning project. Required.
    pub project_id: ProjectId,
    pub name: String,
    pub description: Option<String>,
}

impl Activity {
    /// Creates a new activity under `project_id` with a generated stable ID.
    pub fn new(
        project_id: ProjectId,
        name: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_id,
            name: name.into(),
            description,
        }
    }
}
