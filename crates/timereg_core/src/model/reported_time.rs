//! Reported time entries.
//!
//! # Invariants
//! - `activity_id` and `person_id` pointed at existing rows when the entry
//!   was created; they are non-owning references.
//! - `duration` is not range-checked; negative corrections are allowed.

use crate::model::activity::ActivityId;
use crate::model::hours::Hours;
use crate::model::person::PersonId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type ReportedTimeId = Uuid;

/// One logged work session: a person, an activity, a day and hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportedTime {
    pub id: ReportedTimeId,
    pub activity_id: ActivityId,
    pub person_id: PersonId,
    /// Calendar day the work happened on, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub duration: Hours,
}

impl ReportedTime {
    /// Creates a new entry with a generated stable ID.
    pub fn new(
        activity_id: ActivityId,
        person_id: PersonId,
        date: NaiveDate,
        duration: Hours,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            activity_id,
            person_id,
            date,
            duration,
        }
    }
}
