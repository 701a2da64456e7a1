//! Schedules, their candidate time slots, and participant comments.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ParticipantKey;

/// Maximum length, in characters, of schedule titles and candidate names.
pub const NAME_MAX: usize = 255;

/// Title substituted when a schedule is created without one.
pub const DEFAULT_SCHEDULE_TITLE: &str = "(untitled)";

/// Validation errors returned by schedule and candidate constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleValidationError {
    /// The schedule identifier was not a UUID.
    InvalidScheduleId,
    /// The schedule title exceeded the maximum length.
    TitleTooLong {
        /// Maximum accepted length in characters.
        max: usize,
    },
    /// A candidate name was empty once trimmed.
    EmptyCandidateName,
    /// A candidate name exceeded the maximum length.
    CandidateNameTooLong {
        /// One-based line number of the offending candidate.
        line: usize,
        /// Maximum accepted length in characters.
        max: usize,
    },
}

impl fmt::Display for ScheduleValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidScheduleId => write!(f, "schedule id must be a valid UUID"),
            Self::TitleTooLong { max } => {
                write!(f, "schedule title must be at most {max} characters")
            }
            Self::EmptyCandidateName => write!(f, "candidate name must not be empty"),
            Self::CandidateNameTooLong { line, max } => write!(
                f,
                "candidate on line {line} must be at most {max} characters",
            ),
        }
    }
}

impl std::error::Error for ScheduleValidationError {}

/// Globally unique schedule identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleId(Uuid);

impl ScheduleId {
    /// Generate a new random [`ScheduleId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::str::FromStr for ScheduleId {
    type Err = ScheduleValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| ScheduleValidationError::InvalidScheduleId)
    }
}

impl fmt::Display for ScheduleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Schedule title, at most [`NAME_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ScheduleTitle(String);

impl ScheduleTitle {
    /// Validate a stored title without altering it.
    pub fn new(title: impl Into<String>) -> Result<Self, ScheduleValidationError> {
        let title = title.into();
        if title.chars().count() > NAME_MAX {
            return Err(ScheduleValidationError::TitleTooLong { max: NAME_MAX });
        }
        Ok(Self(title))
    }

    /// Normalise raw user input into a title.
    ///
    /// Input longer than [`NAME_MAX`] characters is truncated first. If what
    /// remains is empty or whitespace only, the title becomes
    /// [`DEFAULT_SCHEDULE_TITLE`]; whitespace-only titles count as blank and
    /// are not kept verbatim. Non-blank input keeps its surrounding whitespace.
    ///
    /// # Examples
    /// ```
    /// use schedule_backend::domain::{DEFAULT_SCHEDULE_TITLE, ScheduleTitle};
    ///
    /// assert_eq!(ScheduleTitle::from_input("  ").as_ref(), DEFAULT_SCHEDULE_TITLE);
    /// assert_eq!(ScheduleTitle::from_input("Team lunch").as_ref(), "Team lunch");
    /// ```
    pub fn from_input(raw: &str) -> Self {
        let truncated: String = raw.chars().take(NAME_MAX).collect();
        if truncated.trim().is_empty() {
            Self(DEFAULT_SCHEDULE_TITLE.to_owned())
        } else {
            Self(truncated)
        }
    }
}

impl AsRef<str> for ScheduleTitle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<ScheduleTitle> for String {
    fn from(value: ScheduleTitle) -> Self {
        value.0
    }
}

impl TryFrom<String> for ScheduleTitle {
    type Error = ScheduleValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// One event whose attendance is being coordinated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    /// Schedule identifier.
    pub id: ScheduleId,
    /// Title shown to participants.
    pub title: ScheduleTitle,
    /// Free-text memo.
    #[serde(default)]
    pub memo: String,
    /// Participant who created the schedule.
    pub created_by: ParticipantKey,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Storage-assigned candidate identifier; ascending ids follow creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(u64);

impl CandidateId {
    /// Wrap a raw identifier.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Access the raw identifier.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Candidate label, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CandidateName(String);

impl CandidateName {
    /// Validate and construct a candidate name, trimming surrounding whitespace.
    pub fn new(name: impl AsRef<str>) -> Result<Self, ScheduleValidationError> {
        Self::on_line(name.as_ref(), 1)
    }

    fn on_line(name: &str, line: usize) -> Result<Self, ScheduleValidationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ScheduleValidationError::EmptyCandidateName);
        }
        if trimmed.chars().count() > NAME_MAX {
            return Err(ScheduleValidationError::CandidateNameTooLong {
                line,
                max: NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for CandidateName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<CandidateName> for String {
    fn from(value: CandidateName) -> Self {
        value.0
    }
}

impl TryFrom<String> for CandidateName {
    type Error = ScheduleValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Parse newline-separated candidate input.
///
/// Each line is trimmed and blank lines are skipped; the remaining names keep
/// their input order.
///
/// # Examples
/// ```
/// use schedule_backend::domain::parse_candidate_names;
///
/// let names = parse_candidate_names("Mon 10:00\n\n  Tue 14:00  \n").unwrap();
/// let labels: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
/// assert_eq!(labels, ["Mon 10:00", "Tue 14:00"]);
/// ```
pub fn parse_candidate_names(text: &str) -> Result<Vec<CandidateName>, ScheduleValidationError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| CandidateName::on_line(line, index + 1))
        .collect()
}

/// One proposed time slot belonging to a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Candidate identifier.
    pub id: CandidateId,
    /// Owning schedule.
    pub schedule_id: ScheduleId,
    /// Label shown to participants.
    pub name: CandidateName,
}

/// Free-text comment left by a participant; at most one per schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Owning schedule.
    pub schedule_id: ScheduleId,
    /// Author of the comment.
    pub participant: ParticipantKey,
    /// Comment text; may be empty.
    #[serde(default)]
    pub text: String,
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod tests;
