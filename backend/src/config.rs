//! `attendance-view` configuration loaded via OrthoConfig.
//!
//! Values are layered from CLI flags, `ARRANGER_*` environment variables and
//! an optional configuration file. Raw values stay as loaded; the accessors
//! validate them into domain types.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{Participant, ParticipantValidationError, ScheduleId};
use crate::telemetry::{LogFormat, ParseLogFormatError};

/// Order in which participants are listed in the rendered view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParticipantOrder {
    /// Viewer first, then in order of first appearance.
    #[default]
    Appearance,
    /// Sorted by display name, ties broken by participant key.
    DisplayName,
}

impl fmt::Display for ParticipantOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Appearance => "appearance",
            Self::DisplayName => "display_name",
        })
    }
}

impl FromStr for ParticipantOrder {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "appearance" => Ok(Self::Appearance),
            "display_name" => Ok(Self::DisplayName),
            _ => Err(SettingsError::InvalidParticipantOrder {
                input: s.to_owned(),
            }),
        }
    }
}

/// Errors raised while validating loaded settings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    /// A required setting was not supplied by any layer.
    #[error("missing required setting `{name}`")]
    Missing {
        /// Setting name without prefix.
        name: &'static str,
    },
    /// The schedule id was not a UUID.
    #[error("schedule_id `{input}` is not a valid UUID")]
    InvalidScheduleId {
        /// Rejected input.
        input: String,
    },
    /// The viewer identity failed validation.
    #[error("invalid viewer: {0}")]
    InvalidViewer(#[from] ParticipantValidationError),
    /// The participant order was not recognised.
    #[error("unknown participant_order `{input}`; expected `appearance` or `display_name`")]
    InvalidParticipantOrder {
        /// Rejected input.
        input: String,
    },
    /// The log format was not recognised.
    #[error(transparent)]
    InvalidLogFormat(#[from] ParseLogFormatError),
}

/// Settings controlling a single attendance view rendering.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ARRANGER")]
pub struct AttendanceViewSettings {
    /// JSON snapshot file holding one schedule and its rows.
    pub snapshot_path: Option<PathBuf>,
    /// Schedule to render. Defaults to the schedule in the snapshot.
    pub schedule_id: Option<String>,
    /// Numeric id of the viewing participant.
    pub viewer_id: Option<u64>,
    /// Identity provider tag of the viewing participant.
    pub viewer_provider: Option<String>,
    /// Display name of the viewing participant.
    pub viewer_name: Option<String>,
    /// `appearance` or `display_name`.
    pub participant_order: Option<String>,
    /// `json` or `pretty`.
    pub log_format: Option<String>,
    /// Append per-candidate status counts to the rendered view.
    #[ortho_config(default = false)]
    pub include_tally: bool,
}

impl AttendanceViewSettings {
    /// Return the snapshot path, which must be configured.
    pub fn snapshot_path(&self) -> Result<&Path, SettingsError> {
        self.snapshot_path
            .as_deref()
            .ok_or(SettingsError::Missing {
                name: "snapshot_path",
            })
    }

    /// Return the requested schedule id, if any.
    pub fn schedule_id(&self) -> Result<Option<ScheduleId>, SettingsError> {
        self.schedule_id
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(|raw| {
                raw.parse::<ScheduleId>()
                    .map_err(|_| SettingsError::InvalidScheduleId {
                        input: raw.to_owned(),
                    })
            })
            .transpose()
    }

    /// Build the viewing participant.
    ///
    /// The display name falls back to `provider:id` when not configured.
    pub fn viewer(&self) -> Result<Participant, SettingsError> {
        let id = self.viewer_id.ok_or(SettingsError::Missing { name: "viewer_id" })?;
        let provider = self
            .viewer_provider
            .as_deref()
            .ok_or(SettingsError::Missing {
                name: "viewer_provider",
            })?;
        let name = self
            .viewer_name
            .clone()
            .unwrap_or_else(|| format!("{provider}:{id}"));
        Ok(Participant::try_from_parts(id, provider, name)?)
    }

    /// Return the participant order, falling back to appearance order.
    pub fn participant_order(&self) -> Result<ParticipantOrder, SettingsError> {
        self.participant_order
            .as_deref()
            .map_or(Ok(ParticipantOrder::default()), str::parse)
    }

    /// Return the log format, falling back to JSON.
    pub fn log_format(&self) -> Result<LogFormat, SettingsError> {
        match self.log_format.as_deref() {
            Some(raw) => Ok(raw.parse::<LogFormat>()?),
            None => Ok(LogFormat::default()),
        }
    }
}
