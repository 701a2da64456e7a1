//! Port for schedule storage.
//!
//! The [`ScheduleRepository`] trait is the only way the domain reaches stored
//! schedules. Reads hand back a [`ScheduleSnapshot`]: the schedule, its
//! candidates, availability records, and comments observed together, so the
//! aggregation never sees a torn read across the four collections.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{AvailabilityRecord, Candidate, CandidateName, Comment, Schedule, ScheduleId};

/// Errors raised by schedule repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleRepositoryError {
    /// Repository connection could not be established.
    #[error("schedule repository connection failed: {message}")]
    Connection {
        /// Adapter-supplied description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("schedule repository query failed: {message}")]
    Query {
        /// Adapter-supplied description.
        message: String,
    },
    /// A schedule with the same identifier already exists.
    #[error("schedule {schedule_id} already exists")]
    Duplicate {
        /// Conflicting identifier.
        schedule_id: ScheduleId,
    },
}

impl ScheduleRepositoryError {
    /// Convenience constructor for [`ScheduleRepositoryError::Connection`].
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Convenience constructor for [`ScheduleRepositoryError::Query`].
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Everything stored for one schedule, read as one consistent unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSnapshot {
    /// The schedule itself.
    pub schedule: Schedule,
    /// Candidate time slots.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Recorded availability, annotated with participant display names.
    #[serde(default)]
    pub availabilities: Vec<AvailabilityRecord>,
    /// Latest comment per participant.
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Port for schedule storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// Fetch a consistent snapshot of one schedule.
    ///
    /// Returns `None` when the schedule does not exist. Implementations must
    /// read all four collections from the same point in time (one read
    /// transaction, one lock acquisition, or equivalent).
    async fn find_snapshot(
        &self,
        schedule_id: &ScheduleId,
    ) -> Result<Option<ScheduleSnapshot>, ScheduleRepositoryError>;

    /// Store a new schedule with its candidates.
    ///
    /// Candidate ids are assigned by the repository in the order the names
    /// are supplied; the stored candidates are returned in that order.
    async fn create_schedule(
        &self,
        schedule: &Schedule,
        candidates: &[CandidateName],
    ) -> Result<Vec<Candidate>, ScheduleRepositoryError>;
}
