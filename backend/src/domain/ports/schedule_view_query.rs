//! Driving port for reading a schedule's aggregated attendance.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{AttendanceView, Candidate, Error, Participant, Schedule, ScheduleId};

/// Request to view one schedule on behalf of a participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleViewRequest {
    /// Schedule to aggregate.
    pub schedule_id: ScheduleId,
    /// Participant on whose behalf the view is built.
    pub viewer: Participant,
}

/// Schedule details plus the aggregated attendance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleView {
    /// The schedule.
    pub schedule: Schedule,
    /// Candidates sorted by id ascending.
    pub candidates: Vec<Candidate>,
    /// Participants, dense status matrix, and comments.
    pub attendance: AttendanceView,
}

/// Domain use-case port for viewing schedules.
#[async_trait]
pub trait ScheduleViewQuery: Send + Sync {
    /// Build the attendance view for `request.viewer`.
    ///
    /// Fails with [`crate::domain::ErrorCode::NotFound`] when the schedule
    /// does not exist.
    async fn view_schedule(&self, request: ScheduleViewRequest) -> Result<ScheduleView, Error>;
}
