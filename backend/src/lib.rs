//! Schedule attendance backend.
//!
//! Aggregates per-participant availability for a schedule's candidate slots
//! into a dense attendance matrix, flags the viewing participant, and
//! exposes comments keyed by the composite participant identity.

pub mod config;
pub mod domain;
pub mod outbound;
pub mod telemetry;
