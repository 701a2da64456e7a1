//! Normalisation of schedule creation input.

use super::{
    CandidateName, ParticipantKey, ScheduleTitle, ScheduleValidationError, parse_candidate_names,
};

/// A validated, not yet stored, schedule.
///
/// # Examples
/// ```
/// use schedule_backend::domain::{ParticipantKey, ScheduleDraft};
///
/// let creator = ParticipantKey::try_from_parts(1, "github").unwrap();
/// let draft = ScheduleDraft::new(creator, "", "bring snacks", "Mon\nTue\n").unwrap();
///
/// assert_eq!(draft.title().as_ref(), "(untitled)");
/// assert_eq!(draft.candidates().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleDraft {
    creator: ParticipantKey,
    title: ScheduleTitle,
    memo: String,
    candidates: Vec<CandidateName>,
}

impl ScheduleDraft {
    /// Normalise raw creation input.
    ///
    /// The title is truncated or defaulted by [`ScheduleTitle::from_input`];
    /// candidates are parsed one per line by [`parse_candidate_names`]. A
    /// draft without candidates is legal.
    pub fn new(
        creator: ParticipantKey,
        raw_title: &str,
        memo: impl Into<String>,
        raw_candidates: &str,
    ) -> Result<Self, ScheduleValidationError> {
        Ok(Self {
            creator,
            title: ScheduleTitle::from_input(raw_title),
            memo: memo.into(),
            candidates: parse_candidate_names(raw_candidates)?,
        })
    }

    /// Participant creating the schedule.
    pub const fn creator(&self) -> &ParticipantKey {
        &self.creator
    }

    /// Normalised title.
    pub const fn title(&self) -> &ScheduleTitle {
        &self.title
    }

    /// Free-text memo, stored verbatim.
    pub fn memo(&self) -> &str {
        &self.memo
    }

    /// Candidate names in input order.
    pub fn candidates(&self) -> &[CandidateName] {
        &self.candidates
    }

    /// Consume the draft into its parts.
    pub fn into_parts(self) -> (ParticipantKey, ScheduleTitle, String, Vec<CandidateName>) {
        (self.creator, self.title, self.memo, self.candidates)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{DEFAULT_SCHEDULE_TITLE, NAME_MAX};
    use rstest::{fixture, rstest};

    #[fixture]
    fn creator() -> ParticipantKey {
        ParticipantKey::try_from_parts(1, "github").expect("valid key")
    }

    #[rstest]
    fn keeps_memo_verbatim(creator: ParticipantKey) {
        let draft = ScheduleDraft::new(creator, "Lunch", "  line one\nline two ", "")
            .expect("valid draft");
        assert_eq!(draft.memo(), "  line one\nline two ");
        assert!(draft.candidates().is_empty());
    }

    #[rstest]
    fn defaults_blank_titles(creator: ParticipantKey) {
        let draft = ScheduleDraft::new(creator, " ", "", "Mon").expect("valid draft");
        assert_eq!(draft.title().as_ref(), DEFAULT_SCHEDULE_TITLE);
    }

    #[rstest]
    fn rejects_overlong_candidates(creator: ParticipantKey) {
        let raw = "y".repeat(NAME_MAX + 1);
        let result = ScheduleDraft::new(creator, "Lunch", "", &raw);
        assert!(matches!(
            result,
            Err(ScheduleValidationError::CandidateNameTooLong { line: 1, .. })
        ));
    }

    #[rstest]
    fn into_parts_preserves_candidate_order(creator: ParticipantKey) {
        let draft =
            ScheduleDraft::new(creator.clone(), "Lunch", "", "b\na\nc").expect("valid draft");
        let (owner, title, _, candidates) = draft.into_parts();
        let labels: Vec<&str> = candidates.iter().map(AsRef::as_ref).collect();

        assert_eq!(owner, creator);
        assert_eq!(title.as_ref(), "Lunch");
        assert_eq!(labels, ["b", "a", "c"]);
    }
}
