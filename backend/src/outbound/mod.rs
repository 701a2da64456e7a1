//! Outbound adapters implementing domain ports.
//!
//! Adapters are thin translators between domain types and whatever holds
//! the data. They contain no business logic.
//!
//! - **in_memory**: process-local [`ScheduleRepository`](crate::domain::ports::ScheduleRepository)

mod in_memory;

pub use in_memory::InMemoryScheduleRepository;
