//! Driving port for creating schedules.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Candidate, Error, ParticipantKey, Schedule};

/// Raw schedule creation input as submitted by a participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleRequest {
    /// Participant creating the schedule.
    pub creator: ParticipantKey,
    /// Title as typed; normalised before storage.
    pub title: String,
    /// Free-text memo.
    #[serde(default)]
    pub memo: String,
    /// Candidate names, one per line.
    #[serde(default)]
    pub candidates: String,
}

/// Result of a successful creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleResponse {
    /// The stored schedule.
    pub schedule: Schedule,
    /// Stored candidates in input order.
    pub candidates: Vec<Candidate>,
}

/// Domain use-case port for creating schedules.
#[async_trait]
pub trait ScheduleCommand: Send + Sync {
    /// Normalise, validate, and store a new schedule with its candidates.
    async fn create_schedule(
        &self,
        request: CreateScheduleRequest,
    ) -> Result<CreateScheduleResponse, Error>;
}
