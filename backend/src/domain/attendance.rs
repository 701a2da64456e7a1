//! Attendance matrix aggregation.
//!
//! [`build_attendance_view`] turns the sparse availability records of one
//! schedule into a dense participant × candidate matrix, flags the viewer,
//! and indexes comments by participant. It is a pure function of its inputs:
//! no I/O, no shared state, and no failure modes. Records that reference
//! unknown candidates are tolerated and simply never surface in the matrix.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;
use serde::ser::{SerializeSeq, Serializer};
use tracing::debug;

use super::{AvailabilityRecord, AvailabilityStatus, Candidate, CandidateId, Comment};
use super::{Participant, ParticipantKey};

/// A participant as presented in the aggregated view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantEntry {
    /// Identity and display name.
    #[serde(flatten)]
    pub participant: Participant,
    /// Whether this entry is the participant the view was built for.
    pub is_viewer: bool,
}

/// One resolved matrix cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceCell {
    /// Candidate the cell belongs to.
    pub candidate_id: CandidateId,
    /// Recorded status, or the default when nothing was recorded.
    pub status: AvailabilityStatus,
}

/// All cells for one participant, in candidate order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRow {
    participant: ParticipantKey,
    cells: Vec<AttendanceCell>,
}

impl AttendanceRow {
    /// Participant owning this row.
    pub const fn participant(&self) -> &ParticipantKey {
        &self.participant
    }

    /// Cells in candidate order.
    pub fn cells(&self) -> &[AttendanceCell] {
        &self.cells
    }

    /// Status for `candidate_id`, or `None` when the candidate is not part
    /// of the schedule.
    pub fn status(&self, candidate_id: CandidateId) -> Option<AvailabilityStatus> {
        self.cells
            .iter()
            .find(|cell| cell.candidate_id == candidate_id)
            .map(|cell| cell.status)
    }
}

/// Dense participant × candidate status matrix.
///
/// ## Invariants
/// - One row per participant entry, in participant order.
/// - Every row holds exactly one cell per candidate, in candidate order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct AttendanceMatrix {
    rows: Vec<AttendanceRow>,
}

impl AttendanceMatrix {
    /// Rows in participant order.
    pub fn rows(&self) -> &[AttendanceRow] {
        &self.rows
    }

    /// Row for `participant`, if they are part of the view.
    pub fn row(&self, participant: &ParticipantKey) -> Option<&AttendanceRow> {
        self.rows.iter().find(|row| &row.participant == participant)
    }

    /// Status for one cell. `None` only when the participant or candidate
    /// lies outside the matrix; every in-range cell resolves to a status.
    pub fn status(
        &self,
        participant: &ParticipantKey,
        candidate_id: CandidateId,
    ) -> Option<AvailabilityStatus> {
        self.row(participant)?.status(candidate_id)
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(|row| row.cells.len()).sum()
    }
}

/// Comment text keyed by participant.
///
/// A participant without a comment has no entry at all, which keeps "no
/// comment" distinguishable from an empty comment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommentLookup {
    by_participant: BTreeMap<ParticipantKey, String>,
}

impl CommentLookup {
    fn from_comments(comments: &[Comment]) -> Self {
        let by_participant = comments
            .iter()
            .map(|comment| (comment.participant.clone(), comment.text.clone()))
            .collect();
        Self { by_participant }
    }

    /// Comment text for `participant`.
    pub fn get(&self, participant: &ParticipantKey) -> Option<&str> {
        self.by_participant.get(participant).map(String::as_str)
    }

    /// Number of participants with a comment.
    pub fn len(&self) -> usize {
        self.by_participant.len()
    }

    /// Whether no participant left a comment.
    pub fn is_empty(&self) -> bool {
        self.by_participant.is_empty()
    }

    /// Iterate comments in participant key order.
    pub fn iter(&self) -> impl Iterator<Item = (&ParticipantKey, &str)> {
        self.by_participant
            .iter()
            .map(|(key, text)| (key, text.as_str()))
    }
}

#[derive(Serialize)]
struct CommentEntry<'a> {
    participant: &'a ParticipantKey,
    text: &'a str,
}

impl Serialize for CommentLookup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for (participant, text) in self.iter() {
            seq.serialize_element(&CommentEntry { participant, text })?;
        }
        seq.end()
    }
}

/// Per-candidate status counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateTally {
    /// Candidate being counted.
    pub candidate_id: CandidateId,
    /// Participants attending.
    pub attending: usize,
    /// Participants undecided.
    pub undecided: usize,
    /// Participants absent or without an answer.
    pub absent: usize,
}

/// Aggregated attendance for one schedule as seen by one viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceView {
    participants: Vec<ParticipantEntry>,
    matrix: AttendanceMatrix,
    comments: CommentLookup,
}

impl AttendanceView {
    /// Participants in view order, each flagged as viewer or not.
    pub fn participants(&self) -> &[ParticipantEntry] {
        &self.participants
    }

    /// Dense status matrix.
    pub const fn matrix(&self) -> &AttendanceMatrix {
        &self.matrix
    }

    /// Comments keyed by participant.
    pub const fn comments(&self) -> &CommentLookup {
        &self.comments
    }

    /// The entry flagged as viewer.
    pub fn viewer(&self) -> Option<&ParticipantEntry> {
        self.participants.iter().find(|entry| entry.is_viewer)
    }

    /// Reorder participants by display name, breaking ties on the composite
    /// key. The sort is stable and matrix rows follow the new order.
    pub fn sort_participants_by_display_name(&mut self) {
        self.participants.sort_by(|a, b| {
            a.participant
                .display_name()
                .cmp(b.participant.display_name())
                .then_with(|| a.participant.key().cmp(b.participant.key()))
        });
        let order: HashMap<&ParticipantKey, usize> = self
            .participants
            .iter()
            .enumerate()
            .map(|(position, entry)| (entry.participant.key(), position))
            .collect();
        self.matrix
            .rows
            .sort_by_key(|row| order.get(&row.participant).copied().unwrap_or(usize::MAX));
    }

    /// Count statuses per candidate, in candidate order.
    pub fn tally(&self) -> Vec<CandidateTally> {
        let Some(first) = self.matrix.rows.first() else {
            return Vec::new();
        };
        first
            .cells
            .iter()
            .map(|cell| {
                let mut tally = CandidateTally {
                    candidate_id: cell.candidate_id,
                    attending: 0,
                    undecided: 0,
                    absent: 0,
                };
                for status in self
                    .matrix
                    .rows
                    .iter()
                    .filter_map(|row| row.status(cell.candidate_id))
                {
                    match status {
                        AvailabilityStatus::Attending => tally.attending += 1,
                        AvailabilityStatus::Undecided => tally.undecided += 1,
                        AvailabilityStatus::Absent => tally.absent += 1,
                    }
                }
                tally
            })
            .collect()
    }
}

/// Build the attendance view for one schedule.
///
/// - `candidates` must already be sorted by id; the matrix visits them in the
///   order given.
/// - Participants are the viewer followed by everyone appearing in
///   `availabilities`, deduplicated by composite key in order of first
///   appearance. A later record for the same participant refreshes the
///   display name without moving the entry.
/// - Duplicate records for one (participant, candidate) pair resolve to the
///   last one supplied.
/// - Cells without a record hold [`AvailabilityStatus::default`].
/// - Comments are indexed as given; their authors are not added to the
///   participant list.
///
/// # Examples
/// ```
/// use schedule_backend::domain::{AvailabilityStatus, Participant, build_attendance_view};
///
/// let viewer = Participant::try_from_parts(1, "github", "Ada").unwrap();
/// let view = build_attendance_view(&[], &[], &[], &viewer);
///
/// assert_eq!(view.participants().len(), 1);
/// assert!(view.participants()[0].is_viewer);
/// assert_eq!(view.matrix().cell_count(), 0);
/// ```
pub fn build_attendance_view(
    candidates: &[Candidate],
    availabilities: &[AvailabilityRecord],
    comments: &[Comment],
    viewer: &Participant,
) -> AttendanceView {
    let recorded = index_availabilities(availabilities);
    let participants = derive_participants(availabilities, viewer);
    let matrix = materialise_matrix(&participants, candidates, &recorded);
    let comments = CommentLookup::from_comments(comments);

    let known: HashSet<CandidateId> = candidates.iter().map(|candidate| candidate.id).collect();
    let ignored = availabilities
        .iter()
        .filter(|record| !known.contains(&record.candidate_id))
        .count();
    debug!(
        participants = participants.len(),
        candidates = candidates.len(),
        records = availabilities.len(),
        ignored_records = ignored,
        comments = comments.len(),
        "attendance view built"
    );

    AttendanceView {
        participants,
        matrix,
        comments,
    }
}

type RecordedStatuses<'a> = HashMap<&'a ParticipantKey, HashMap<CandidateId, AvailabilityStatus>>;

fn index_availabilities(availabilities: &[AvailabilityRecord]) -> RecordedStatuses<'_> {
    let mut recorded: RecordedStatuses<'_> = HashMap::new();
    for record in availabilities {
        recorded
            .entry(record.participant.key())
            .or_default()
            .insert(record.candidate_id, record.status);
    }
    recorded
}

fn derive_participants(
    availabilities: &[AvailabilityRecord],
    viewer: &Participant,
) -> Vec<ParticipantEntry> {
    let mut entries = vec![ParticipantEntry {
        participant: viewer.clone(),
        is_viewer: true,
    }];
    let mut positions: HashMap<ParticipantKey, usize> = HashMap::new();
    positions.insert(viewer.key().clone(), 0);

    for record in availabilities {
        let entry = ParticipantEntry {
            participant: record.participant.clone(),
            is_viewer: record.participant.key() == viewer.key(),
        };
        let existing = positions
            .get(record.participant.key())
            .and_then(|position| entries.get_mut(*position));
        match existing {
            Some(slot) => *slot = entry,
            None => {
                positions.insert(record.participant.key().clone(), entries.len());
                entries.push(entry);
            }
        }
    }
    entries
}

fn materialise_matrix(
    participants: &[ParticipantEntry],
    candidates: &[Candidate],
    recorded: &RecordedStatuses<'_>,
) -> AttendanceMatrix {
    let rows = participants
        .iter()
        .map(|entry| {
            let key = entry.participant.key();
            let answers = recorded.get(key);
            let cells = candidates
                .iter()
                .map(|candidate| AttendanceCell {
                    candidate_id: candidate.id,
                    status: answers
                        .and_then(|statuses| statuses.get(&candidate.id))
                        .copied()
                        .unwrap_or_default(),
                })
                .collect();
            AttendanceRow {
                participant: key.clone(),
                cells,
            }
        })
        .collect();
    AttendanceMatrix { rows }
}

#[cfg(test)]
#[path = "attendance_tests.rs"]
mod tests;
