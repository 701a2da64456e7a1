//! Domain ports and supporting types for the hexagonal boundary.

mod schedule_command;
mod schedule_repository;
mod schedule_view_query;

pub use schedule_command::{CreateScheduleRequest, CreateScheduleResponse, ScheduleCommand};
#[cfg(test)]
pub use schedule_repository::MockScheduleRepository;
pub use schedule_repository::{ScheduleRepository, ScheduleRepositoryError, ScheduleSnapshot};
pub use schedule_view_query::{ScheduleView, ScheduleViewQuery, ScheduleViewRequest};
