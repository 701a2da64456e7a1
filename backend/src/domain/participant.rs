//! Participant identity model.
//!
//! A participant is identified by the pair of the numeric id issued by an
//! identity provider and that provider's tag. The same numeric id under two
//! providers names two different people, so the pair is the only key used
//! for equality, hashing, and ordering anywhere in the aggregation.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Validation errors returned by participant constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParticipantValidationError {
    /// The provider tag was empty.
    EmptyProvider,
    /// The provider tag contained whitespace or unsupported characters.
    InvalidProvider,
    /// The provider tag exceeded the maximum length.
    ProviderTooLong {
        /// Maximum accepted length in characters.
        max: usize,
    },
    /// The display name was empty once trimmed.
    EmptyDisplayName,
    /// The display name exceeded the maximum length.
    DisplayNameTooLong {
        /// Maximum accepted length in characters.
        max: usize,
    },
}

impl fmt::Display for ParticipantValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyProvider => write!(f, "provider must not be empty"),
            Self::InvalidProvider => write!(
                f,
                "provider may only contain letters, numbers, underscores, dots, or hyphens",
            ),
            Self::ProviderTooLong { max } => {
                write!(f, "provider must be at most {max} characters")
            }
            Self::EmptyDisplayName => write!(f, "display name must not be empty"),
            Self::DisplayNameTooLong { max } => {
                write!(f, "display name must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for ParticipantValidationError {}

/// Numeric participant identifier as issued by an identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(u64);

impl ParticipantId {
    /// Wrap a raw provider-issued identifier.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Access the raw identifier.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ParticipantId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maximum allowed length for a provider tag.
pub const PROVIDER_MAX: usize = 64;

static PROVIDER_RE: OnceLock<Regex> = OnceLock::new();

fn provider_regex() -> &'static Regex {
    PROVIDER_RE.get_or_init(|| {
        let pattern = "^[A-Za-z0-9_.-]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("provider regex failed to compile: {error}"))
    })
}

/// Identity provider tag, for example `github`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Provider(String);

impl Provider {
    /// Validate and construct a [`Provider`].
    pub fn new(provider: impl Into<String>) -> Result<Self, ParticipantValidationError> {
        Self::from_owned(provider.into())
    }

    fn from_owned(provider: String) -> Result<Self, ParticipantValidationError> {
        if provider.is_empty() {
            return Err(ParticipantValidationError::EmptyProvider);
        }
        if provider.chars().count() > PROVIDER_MAX {
            return Err(ParticipantValidationError::ProviderTooLong { max: PROVIDER_MAX });
        }
        if !provider_regex().is_match(&provider) {
            return Err(ParticipantValidationError::InvalidProvider);
        }
        Ok(Self(provider))
    }
}

impl AsRef<str> for Provider {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Provider> for String {
    fn from(value: Provider) -> Self {
        value.0
    }
}

impl TryFrom<String> for Provider {
    type Error = ParticipantValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Composite participant key: numeric id plus provider.
///
/// Equality, hashing, and ordering cover both fields. Ordering compares the
/// numeric id first and the provider second, which gives ordered containers
/// and display-name tie-breaks a total, reproducible order.
///
/// # Examples
/// ```
/// use schedule_backend::domain::{ParticipantId, ParticipantKey, Provider};
///
/// let github = ParticipantKey::new(ParticipantId::new(7), Provider::new("github").unwrap());
/// let gitlab = ParticipantKey::new(ParticipantId::new(7), Provider::new("gitlab").unwrap());
/// assert_ne!(github, gitlab);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantKey {
    id: ParticipantId,
    provider: Provider,
}

impl ParticipantKey {
    /// Build a key from validated components.
    pub const fn new(id: ParticipantId, provider: Provider) -> Self {
        Self { id, provider }
    }

    /// Fallible constructor from raw parts.
    pub fn try_from_parts(
        id: u64,
        provider: impl Into<String>,
    ) -> Result<Self, ParticipantValidationError> {
        Ok(Self::new(ParticipantId::new(id), Provider::new(provider)?))
    }

    /// Numeric identifier.
    pub const fn id(&self) -> ParticipantId {
        self.id
    }

    /// Provider tag.
    pub const fn provider(&self) -> &Provider {
        &self.provider
    }
}

impl fmt::Display for ParticipantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.provider, self.id)
    }
}

/// Maximum allowed length for a display name.
pub const DISPLAY_NAME_MAX: usize = 255;

/// Human readable display name for a participant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a [`DisplayName`].
    pub fn new(display_name: impl Into<String>) -> Result<Self, ParticipantValidationError> {
        Self::from_owned(display_name.into())
    }

    fn from_owned(display_name: String) -> Result<Self, ParticipantValidationError> {
        if display_name.trim().is_empty() {
            return Err(ParticipantValidationError::EmptyDisplayName);
        }
        if display_name.chars().count() > DISPLAY_NAME_MAX {
            return Err(ParticipantValidationError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX,
            });
        }
        Ok(Self(display_name))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = ParticipantValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// A person who may record availability or comments on a schedule.
///
/// ## Invariants
/// - `provider` is a non-empty tag of letters, digits, `_`, `.`, or `-`.
/// - `display_name` is non-empty once trimmed of whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ParticipantDto", into = "ParticipantDto")]
pub struct Participant {
    key: ParticipantKey,
    display_name: DisplayName,
}

impl Participant {
    /// Build a participant from validated components.
    pub const fn new(key: ParticipantKey, display_name: DisplayName) -> Self {
        Self { key, display_name }
    }

    /// Fallible constructor from raw parts.
    ///
    /// Prefer [`Participant::new`] when components are already validated.
    pub fn try_from_parts(
        id: u64,
        provider: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Result<Self, ParticipantValidationError> {
        let key = ParticipantKey::try_from_parts(id, provider)?;
        let display_name = DisplayName::new(display_name)?;
        Ok(Self::new(key, display_name))
    }

    /// Lenient constructor for participants read back from storage.
    ///
    /// The key is validated as usual. A blank stored name becomes the key's
    /// `provider:id` form and an overlong one is truncated to
    /// [`DISPLAY_NAME_MAX`] characters.
    ///
    /// # Examples
    /// ```
    /// use schedule_backend::domain::Participant;
    ///
    /// let stored = Participant::from_stored(7, "github", "  ").unwrap();
    /// assert_eq!(stored.display_name().as_ref(), "github:7");
    /// ```
    pub fn from_stored(
        id: u64,
        provider: impl Into<String>,
        display_name: &str,
    ) -> Result<Self, ParticipantValidationError> {
        let key = ParticipantKey::try_from_parts(id, provider)?;
        let name = if display_name.trim().is_empty() {
            key.to_string()
        } else {
            display_name.chars().take(DISPLAY_NAME_MAX).collect()
        };
        Ok(Self::new(key, DisplayName::new(name)?))
    }

    /// Composite identity.
    pub const fn key(&self) -> &ParticipantKey {
        &self.key
    }

    /// Name shown to other participants.
    pub const fn display_name(&self) -> &DisplayName {
        &self.display_name
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParticipantDto {
    id: u64,
    provider: String,
    #[serde(alias = "display_name", alias = "username")]
    display_name: String,
}

impl From<Participant> for ParticipantDto {
    fn from(value: Participant) -> Self {
        let Participant { key, display_name } = value;
        Self {
            id: key.id.get(),
            provider: key.provider.into(),
            display_name: display_name.into(),
        }
    }
}

impl TryFrom<ParticipantDto> for Participant {
    type Error = ParticipantValidationError;

    fn try_from(value: ParticipantDto) -> Result<Self, Self::Error> {
        Self::try_from_parts(value.id, value.provider, value.display_name)
    }
}

/// Deserialise a stored participant through [`Participant::from_stored`].
///
/// Used by records read from storage snapshots.
pub(crate) fn deserialize_stored<'de, D>(deserializer: D) -> Result<Participant, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let dto = ParticipantDto::deserialize(deserializer)?;
    Participant::from_stored(dto.id, dto.provider, &dto.display_name)
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
#[path = "participant_tests.rs"]
mod tests;
