//! Availability statuses and the sparse records participants leave behind.

use serde::{Deserialize, Serialize};

use super::{CandidateId, Participant, ScheduleId};

/// A participant's answer for one candidate.
///
/// Each variant carries a stable numeric code used by storage. `Absent`
/// doubles as the default for candidates a participant never answered.
///
/// # Examples
///
/// ```
/// # use schedule_backend::domain::AvailabilityStatus;
/// assert_eq!(AvailabilityStatus::default(), AvailabilityStatus::Absent);
/// assert_eq!(AvailabilityStatus::Attending.code(), 2);
/// assert_eq!(AvailabilityStatus::try_from(1), Ok(AvailabilityStatus::Undecided));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityStatus {
    /// Not attending, or no answer recorded.
    #[default]
    Absent,
    /// Not sure yet.
    Undecided,
    /// Attending.
    Attending,
}

impl AvailabilityStatus {
    /// Every status in code order.
    pub const ALL: [Self; 3] = [Self::Absent, Self::Undecided, Self::Attending];

    /// Returns the storage code.
    pub const fn code(self) -> u8 {
        match self {
            Self::Absent => 0,
            Self::Undecided => 1,
            Self::Attending => 2,
        }
    }

    /// Returns the string representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Undecided => "undecided",
            Self::Attending => "attending",
        }
    }
}

impl std::fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when decoding an unknown availability status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAvailabilityStatusError {
    /// The unrecognised input value.
    pub input: String,
}

impl std::fmt::Display for ParseAvailabilityStatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown availability status: {}", self.input)
    }
}

impl std::error::Error for ParseAvailabilityStatusError {}

impl std::str::FromStr for AvailabilityStatus {
    type Err = ParseAvailabilityStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "absent" => Ok(Self::Absent),
            "undecided" => Ok(Self::Undecided),
            "attending" => Ok(Self::Attending),
            _ => Err(ParseAvailabilityStatusError {
                input: s.to_owned(),
            }),
        }
    }
}

impl TryFrom<u8> for AvailabilityStatus {
    type Error = ParseAvailabilityStatusError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|status| status.code() == code)
            .ok_or_else(|| ParseAvailabilityStatusError {
                input: code.to_string(),
            })
    }
}

/// An explicitly recorded availability.
///
/// Storage annotates each record with the owning participant's display name,
/// so the aggregation never needs a separate profile lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRecord {
    /// Owning schedule.
    pub schedule_id: ScheduleId,
    /// Participant who recorded the status.
    ///
    /// Read leniently: see [`Participant::from_stored`].
    #[serde(deserialize_with = "super::participant::deserialize_stored")]
    pub participant: Participant,
    /// Candidate the status applies to.
    pub candidate_id: CandidateId,
    /// Recorded status.
    pub status: AvailabilityStatus,
}
