//! Domain primitives, aggregation logic, and services.
//!
//! Purpose: Define strongly typed schedule entities and the pure attendance
//! aggregation that turns stored availability rows into a dense
//! participant × candidate matrix. Keep types immutable and document
//! invariants and serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`): service error payload.
//! - Participant / ParticipantKey: composite `(id, provider)` identity.
//! - Schedule / Candidate / Comment: stored schedule data.
//! - AvailabilityStatus / AvailabilityRecord: one participant's answer.
//! - build_attendance_view: the aggregation entry point.
//! - ScheduleViewService / ScheduleCommandService: driving port services.

pub mod attendance;
pub mod availability;
pub mod error;
pub mod participant;
pub mod ports;
pub mod schedule;
pub mod schedule_draft;
mod schedule_service;

pub use self::attendance::{
    AttendanceCell, AttendanceMatrix, AttendanceRow, AttendanceView, CandidateTally,
    CommentLookup, ParticipantEntry, build_attendance_view,
};
pub use self::availability::{AvailabilityRecord, AvailabilityStatus, ParseAvailabilityStatusError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::participant::{
    DISPLAY_NAME_MAX, DisplayName, PROVIDER_MAX, Participant, ParticipantId, ParticipantKey,
    ParticipantValidationError, Provider,
};
pub use self::schedule::{
    Candidate, CandidateId, CandidateName, Comment, DEFAULT_SCHEDULE_TITLE, NAME_MAX, Schedule,
    ScheduleId, ScheduleTitle, ScheduleValidationError, parse_candidate_names,
};
pub use self::schedule_draft::ScheduleDraft;
pub use self::schedule_service::{ScheduleCommandService, ScheduleViewService};

/// Convenient service result alias.
///
/// # Examples
/// ```
/// use schedule_backend::domain::{Error, ServiceResult};
///
/// fn lookup() -> ServiceResult<u32> {
///     Err(Error::not_found("schedule missing"))
/// }
/// # assert!(lookup().is_err());
/// ```
pub type ServiceResult<T> = Result<T, Error>;
