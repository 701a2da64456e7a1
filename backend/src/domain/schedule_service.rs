//! Schedule domain services.
//!
//! These services implement the schedule driving ports: building the
//! attendance view from a stored snapshot, and creating new schedules.

use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{
    CreateScheduleRequest, CreateScheduleResponse, ScheduleCommand, ScheduleRepository,
    ScheduleRepositoryError, ScheduleSnapshot, ScheduleView, ScheduleViewQuery,
    ScheduleViewRequest,
};
use crate::domain::{
    AvailabilityRecord, Error, Schedule, ScheduleDraft, ScheduleId, ScheduleValidationError,
    build_attendance_view,
};

fn map_repository_error(error: ScheduleRepositoryError) -> Error {
    match error {
        ScheduleRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("schedule repository unavailable: {message}"))
        }
        ScheduleRepositoryError::Query { message } => {
            Error::internal(format!("schedule repository error: {message}"))
        }
        ScheduleRepositoryError::Duplicate { schedule_id } => {
            Error::internal(format!("schedule id collision: {schedule_id}"))
        }
    }
}

fn by_display_name_then_candidate(a: &AvailabilityRecord, b: &AvailabilityRecord) -> Ordering {
    a.participant
        .display_name()
        .cmp(b.participant.display_name())
        .then_with(|| a.participant.key().cmp(b.participant.key()))
        .then_with(|| a.candidate_id.cmp(&b.candidate_id))
}

/// Drop rows that belong to another schedule, logging how many were dropped.
fn retain_for_schedule<T>(
    rows: &mut Vec<T>,
    schedule_id: ScheduleId,
    owner: impl Fn(&T) -> ScheduleId,
    kind: &'static str,
) {
    let before = rows.len();
    rows.retain(|row| owner(row) == schedule_id);
    let dropped = before - rows.len();
    if dropped > 0 {
        warn!(%schedule_id, kind, dropped, "snapshot contained rows for another schedule");
    }
}

/// Schedule service implementing the view query driving port.
#[derive(Clone)]
pub struct ScheduleViewService<R> {
    schedule_repo: Arc<R>,
}

impl<R> ScheduleViewService<R> {
    /// Create a new query service with the schedule repository.
    pub const fn new(schedule_repo: Arc<R>) -> Self {
        Self { schedule_repo }
    }
}

#[async_trait]
impl<R> ScheduleViewQuery for ScheduleViewService<R>
where
    R: ScheduleRepository,
{
    async fn view_schedule(&self, request: ScheduleViewRequest) -> Result<ScheduleView, Error> {
        let ScheduleViewRequest {
            schedule_id,
            viewer,
        } = request;
        let ScheduleSnapshot {
            schedule,
            mut candidates,
            mut availabilities,
            mut comments,
        } = self
            .schedule_repo
            .find_snapshot(&schedule_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("schedule {schedule_id} not found")))?;

        retain_for_schedule(&mut candidates, schedule.id, |c| c.schedule_id, "candidate");
        retain_for_schedule(
            &mut availabilities,
            schedule.id,
            |a| a.schedule_id,
            "availability",
        );
        retain_for_schedule(&mut comments, schedule.id, |c| c.schedule_id, "comment");

        candidates.sort_by_key(|candidate| candidate.id);
        availabilities.sort_by(by_display_name_then_candidate);

        let attendance = build_attendance_view(&candidates, &availabilities, &comments, &viewer);

        Ok(ScheduleView {
            schedule,
            candidates,
            attendance,
        })
    }
}

/// Schedule service implementing the creation command driving port.
#[derive(Clone)]
pub struct ScheduleCommandService<R> {
    schedule_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ScheduleCommandService<R> {
    /// Create a new command service.
    ///
    /// # Examples
    /// ```
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// # use schedule_backend::domain::ScheduleCommandService;
    /// # use schedule_backend::outbound::InMemoryScheduleRepository;
    /// let service = ScheduleCommandService::new(
    ///     Arc::new(InMemoryScheduleRepository::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(schedule_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            schedule_repo,
            clock,
        }
    }

    fn invalid_draft(error: &ScheduleValidationError) -> Error {
        let field = match error {
            ScheduleValidationError::InvalidScheduleId => "scheduleId",
            ScheduleValidationError::TitleTooLong { .. } => "title",
            ScheduleValidationError::EmptyCandidateName
            | ScheduleValidationError::CandidateNameTooLong { .. } => "candidates",
        };
        Error::invalid_request(format!("invalid schedule: {error}"))
            .with_details(json!({ "field": field }))
    }
}

#[async_trait]
impl<R> ScheduleCommand for ScheduleCommandService<R>
where
    R: ScheduleRepository,
{
    async fn create_schedule(
        &self,
        request: CreateScheduleRequest,
    ) -> Result<CreateScheduleResponse, Error> {
        let draft = ScheduleDraft::new(
            request.creator,
            &request.title,
            request.memo,
            &request.candidates,
        )
        .map_err(|err| Self::invalid_draft(&err))?;
        let (created_by, title, memo, names) = draft.into_parts();

        let schedule = Schedule {
            id: ScheduleId::random(),
            title,
            memo,
            created_by,
            updated_at: self.clock.utc(),
        };
        let candidates = self
            .schedule_repo
            .create_schedule(&schedule, &names)
            .await
            .map_err(map_repository_error)?;

        info!(
            schedule_id = %schedule.id,
            candidates = candidates.len(),
            "schedule created"
        );
        Ok(CreateScheduleResponse {
            schedule,
            candidates,
        })
    }
}

#[cfg(test)]
#[path = "schedule_service_tests.rs"]
mod tests;
