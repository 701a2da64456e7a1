//! In-memory schedule repository.
//!
//! Holds schedule snapshots in a process-local map guarded by one lock, so
//! every read observes the schedule, candidates, availability, and comments
//! as a single consistent unit. Used by the `attendance-view` tool and by
//! tests; nothing is written to disk.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{ScheduleRepository, ScheduleRepositoryError, ScheduleSnapshot};
use crate::domain::{Candidate, CandidateId, CandidateName, Schedule, ScheduleId};

fn poisoned() -> ScheduleRepositoryError {
    ScheduleRepositoryError::connection("in-memory schedule store lock poisoned")
}

/// Schedule repository backed by a process-local map.
#[derive(Debug)]
pub struct InMemoryScheduleRepository {
    snapshots: RwLock<HashMap<ScheduleId, ScheduleSnapshot>>,
    next_candidate_id: AtomicU64,
}

impl Default for InMemoryScheduleRepository {
    fn default() -> Self {
        Self {
            snapshots: RwLock::new(HashMap::new()),
            next_candidate_id: AtomicU64::new(1),
        }
    }
}

impl InMemoryScheduleRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store or replace a complete snapshot.
    ///
    /// Candidate ids generated afterwards stay above every id in `snapshot`.
    pub fn insert_snapshot(
        &self,
        snapshot: ScheduleSnapshot,
    ) -> Result<(), ScheduleRepositoryError> {
        if let Some(highest) = snapshot.candidates.iter().map(|c| c.id.get()).max() {
            self.next_candidate_id
                .fetch_max(highest.saturating_add(1), Ordering::SeqCst);
        }
        let mut snapshots = self.snapshots.write().map_err(|_| poisoned())?;
        snapshots.insert(snapshot.schedule.id, snapshot);
        Ok(())
    }
}

#[async_trait]
impl ScheduleRepository for InMemoryScheduleRepository {
    async fn find_snapshot(
        &self,
        schedule_id: &ScheduleId,
    ) -> Result<Option<ScheduleSnapshot>, ScheduleRepositoryError> {
        let snapshots = self.snapshots.read().map_err(|_| poisoned())?;
        Ok(snapshots.get(schedule_id).cloned())
    }

    async fn create_schedule(
        &self,
        schedule: &Schedule,
        candidates: &[CandidateName],
    ) -> Result<Vec<Candidate>, ScheduleRepositoryError> {
        let mut snapshots = self.snapshots.write().map_err(|_| poisoned())?;
        if snapshots.contains_key(&schedule.id) {
            return Err(ScheduleRepositoryError::Duplicate {
                schedule_id: schedule.id,
            });
        }

        let stored: Vec<Candidate> = candidates
            .iter()
            .map(|name| Candidate {
                id: CandidateId::new(self.next_candidate_id.fetch_add(1, Ordering::SeqCst)),
                schedule_id: schedule.id,
                name: name.clone(),
            })
            .collect();
        debug!(schedule_id = %schedule.id, candidates = stored.len(), "schedule stored");

        snapshots.insert(
            schedule.id,
            ScheduleSnapshot {
                schedule: schedule.clone(),
                candidates: stored.clone(),
                availabilities: Vec::new(),
                comments: Vec::new(),
            },
        );
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ParticipantKey, ScheduleTitle};
    use chrono::Utc;
    use rstest::{fixture, rstest};

    #[fixture]
    fn schedule() -> Schedule {
        Schedule {
            id: ScheduleId::random(),
            title: ScheduleTitle::from_input("Lunch"),
            memo: String::new(),
            created_by: ParticipantKey::try_from_parts(1, "github").expect("valid key"),
            updated_at: Utc::now(),
        }
    }

    fn names(labels: &[&str]) -> Vec<CandidateName> {
        labels
            .iter()
            .map(|label| CandidateName::new(label).expect("valid name"))
            .collect()
    }

    #[rstest]
    #[tokio::test]
    async fn missing_schedules_are_none(schedule: Schedule) {
        let repo = InMemoryScheduleRepository::new();
        let found = repo.find_snapshot(&schedule.id).await.expect("lookup");
        assert!(found.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn created_candidates_get_ascending_ids(schedule: Schedule) {
        let repo = InMemoryScheduleRepository::new();
        let stored = repo
            .create_schedule(&schedule, &names(&["b", "a"]))
            .await
            .expect("create");

        let ids: Vec<u64> = stored.iter().map(|c| c.id.get()).collect();
        assert_eq!(ids, vec![1, 2]);

        let snapshot = repo
            .find_snapshot(&schedule.id)
            .await
            .expect("lookup")
            .expect("stored snapshot");
        assert_eq!(snapshot.candidates, stored);
        assert!(snapshot.availabilities.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_ids_are_rejected(schedule: Schedule) {
        let repo = InMemoryScheduleRepository::new();
        repo.create_schedule(&schedule, &[]).await.expect("first create");

        let error = repo
            .create_schedule(&schedule, &[])
            .await
            .expect_err("duplicate");
        assert_eq!(
            error,
            ScheduleRepositoryError::Duplicate {
                schedule_id: schedule.id
            }
        );
    }

    #[rstest]
    #[tokio::test]
    async fn inserted_snapshots_push_the_id_counter(schedule: Schedule) {
        let repo = InMemoryScheduleRepository::new();
        let seeded = ScheduleSnapshot {
            schedule: schedule.clone(),
            candidates: vec![Candidate {
                id: CandidateId::new(41),
                schedule_id: schedule.id,
                name: CandidateName::new("seeded").expect("valid name"),
            }],
            availabilities: Vec::new(),
            comments: Vec::new(),
        };
        repo.insert_snapshot(seeded).expect("insert");

        let schedule_id = schedule.id;
        let mut other = schedule;
        other.id = ScheduleId::random();
        let stored = repo
            .create_schedule(&other, &names(&["next"]))
            .await
            .expect("create");

        assert_eq!(stored.first().map(|c| c.id.get()), Some(42));
        assert!(
            repo.find_snapshot(&schedule_id)
                .await
                .expect("lookup")
                .is_some(),
            "seeded snapshot stays stored"
        );
    }
}
