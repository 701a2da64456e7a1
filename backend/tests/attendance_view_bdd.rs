//! Behavioural tests for attendance view aggregation.
//!
//! These scenarios exercise the participant list, viewer flagging, matrix
//! density, and comment lookup through the public aggregation entry point.
#![expect(
    clippy::expect_used,
    reason = "behavioural steps fail fast on missing scenario state"
)]

use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use schedule_backend::domain::{
    AttendanceView, AvailabilityRecord, AvailabilityStatus, Candidate, CandidateId,
    CandidateName, Comment, Participant, ParticipantKey, ScheduleId, build_attendance_view,
};
use uuid::Uuid;

const SCHEDULE: Uuid = Uuid::from_u128(0x0a0b_0c0d_0e0f_1011_1213_1415_1617_1819);

// -----------------------------------------------------------------------------
// Test World
// -----------------------------------------------------------------------------

#[derive(Default, ScenarioState)]
struct AttendanceWorld {
    candidates: Slot<Vec<Candidate>>,
    viewer: Slot<Participant>,
    availabilities: Slot<Vec<AvailabilityRecord>>,
    comments: Slot<Vec<Comment>>,
    view: Slot<AttendanceView>,
}

impl AttendanceWorld {
    fn schedule_id() -> ScheduleId {
        ScheduleId::from_uuid(SCHEDULE)
    }

    fn record_answer(&self, participant: Participant, candidate: u64, status: AvailabilityStatus) {
        let mut rows = self.availabilities.get().unwrap_or_default();
        rows.push(AvailabilityRecord {
            schedule_id: Self::schedule_id(),
            participant,
            candidate_id: CandidateId::new(candidate),
            status,
        });
        self.availabilities.set(rows);
    }

    fn record_comment(&self, participant: ParticipantKey, text: &str) {
        let mut rows = self.comments.get().unwrap_or_default();
        rows.push(Comment {
            schedule_id: Self::schedule_id(),
            participant,
            text: text.to_owned(),
        });
        self.comments.set(rows);
    }

    fn build(&self) {
        let viewer = self.viewer.get().expect("viewer should be set");
        let view = build_attendance_view(
            &self.candidates.get().unwrap_or_default(),
            &self.availabilities.get().unwrap_or_default(),
            &self.comments.get().unwrap_or_default(),
            &viewer,
        );
        self.view.set(view);
    }

    fn view(&self) -> AttendanceView {
        self.view.get().expect("view should be built")
    }
}

fn key(id: u64, provider: &str) -> ParticipantKey {
    ParticipantKey::try_from_parts(id, provider).expect("valid participant key")
}

#[fixture]
fn world() -> AttendanceWorld {
    AttendanceWorld::default()
}

// -----------------------------------------------------------------------------
// Given Steps
// -----------------------------------------------------------------------------

#[given("candidates {first} and {second}")]
fn candidates(world: &AttendanceWorld, first: u64, second: u64) {
    let candidates = [first, second]
        .into_iter()
        .map(|id| Candidate {
            id: CandidateId::new(id),
            schedule_id: AttendanceWorld::schedule_id(),
            name: CandidateName::new(format!("slot {id}")).expect("valid candidate name"),
        })
        .collect();
    world.candidates.set(candidates);
}

#[given("the viewer is participant {id} from {provider} named {name}")]
fn the_viewer_is(world: &AttendanceWorld, id: u64, provider: String, name: String) {
    let viewer = Participant::try_from_parts(id, provider, name).expect("valid viewer");
    world.viewer.set(viewer);
}

#[given("participant {id} from {provider} named {name} answered {status} for candidate {candidate}")]
fn participant_answered(
    world: &AttendanceWorld,
    id: u64,
    provider: String,
    name: String,
    status: String,
    candidate: u64,
) {
    let participant = Participant::try_from_parts(id, provider, name).expect("valid participant");
    let parsed = status.parse().expect("known status");
    world.record_answer(participant, candidate, parsed);
}

#[given("participant {id} from {provider} commented {text}")]
fn participant_commented(world: &AttendanceWorld, id: u64, provider: String, text: String) {
    world.record_comment(key(id, &provider), &text);
}

// -----------------------------------------------------------------------------
// When Steps
// -----------------------------------------------------------------------------

#[when("the attendance view is built")]
fn the_attendance_view_is_built(world: &AttendanceWorld) {
    world.build();
}

// -----------------------------------------------------------------------------
// Then Steps
// -----------------------------------------------------------------------------

fn assert_participant_count(world: &AttendanceWorld, expected: usize) {
    let view = world.view();
    assert_eq!(view.participants().len(), expected);
    assert_eq!(view.matrix().rows().len(), expected);
}

#[then("{count} participant is listed")]
fn one_participant_is_listed(world: &AttendanceWorld, count: usize) {
    assert_participant_count(world, count);
}

#[then("{count} participants are listed")]
fn participants_are_listed(world: &AttendanceWorld, count: usize) {
    assert_participant_count(world, count);
}

fn viewer_flag(world: &AttendanceWorld, id: u64, provider: &str) -> bool {
    let wanted = key(id, provider);
    world
        .view()
        .participants()
        .iter()
        .find(|entry| entry.participant.key() == &wanted)
        .map(|entry| entry.is_viewer)
        .expect("participant should be listed")
}

#[then("participant {id} from {provider} is the viewer")]
fn participant_is_the_viewer(world: &AttendanceWorld, id: u64, provider: String) {
    assert!(viewer_flag(world, id, &provider));
    let view = world.view();
    let first = view.participants().first().expect("viewer listed first");
    assert_eq!(first.participant.key(), &key(id, &provider));
}

#[then("participant {id} from {provider} is not the viewer")]
fn participant_is_not_the_viewer(world: &AttendanceWorld, id: u64, provider: String) {
    assert!(!viewer_flag(world, id, &provider));
}

#[then("participant {id} from {provider} is {status} for candidate {candidate}")]
fn participant_status_for_candidate(
    world: &AttendanceWorld,
    id: u64,
    provider: String,
    status: String,
    candidate: u64,
) {
    let expected: AvailabilityStatus = status.parse().expect("known status");
    let actual = world
        .view()
        .matrix()
        .status(&key(id, &provider), CandidateId::new(candidate));
    assert_eq!(actual, Some(expected));
}

#[then("participant {id} from {provider} has comment {text}")]
fn participant_has_comment(world: &AttendanceWorld, id: u64, provider: String, text: String) {
    let view = world.view();
    assert_eq!(view.comments().get(&key(id, &provider)), Some(text.as_str()));
}

#[then("participant {id} from {provider} has no comment")]
fn participant_has_no_comment(world: &AttendanceWorld, id: u64, provider: String) {
    assert!(world.view().comments().get(&key(id, &provider)).is_none());
}

// -----------------------------------------------------------------------------
// Scenario Bindings
// -----------------------------------------------------------------------------

#[scenario(
    path = "tests/features/attendance_view.feature",
    name = "Viewer without answers sees absent cells"
)]
fn viewer_without_answers_sees_absent_cells(world: AttendanceWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/attendance_view.feature",
    name = "Same numeric id under two providers stays distinct"
)]
fn same_numeric_id_under_two_providers_stays_distinct(world: AttendanceWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/attendance_view.feature",
    name = "The last answer for a slot wins"
)]
fn the_last_answer_for_a_slot_wins(world: AttendanceWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/attendance_view.feature",
    name = "The viewer's own answers are flagged"
)]
fn the_viewers_own_answers_are_flagged(world: AttendanceWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/attendance_view.feature",
    name = "Comments are looked up by composite key"
)]
fn comments_are_looked_up_by_composite_key(world: AttendanceWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/attendance_view.feature",
    name = "Answers for unknown candidates are ignored"
)]
fn answers_for_unknown_candidates_are_ignored(world: AttendanceWorld) {
    let _ = world;
}
