use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse lifecycle state of a hackathon, owned by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum HackathonStatus {
    Draft,
    Upcoming,
    RegistrationOpen,
    InProgress,
    SubmissionOpen,
    Completed,
    Cancelled,
}

impl HackathonStatus {
    /// Returns true if the hackathon will not change state again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// All possible status values.
    pub const ALL: &'static [HackathonStatus] = &[
        Self::Draft,
        Self::Upcoming,
        Self::RegistrationOpen,
        Self::InProgress,
        Self::SubmissionOpen,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Returns the string representation (PascalCase).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Upcoming => "Upcoming",
            Self::RegistrationOpen => "RegistrationOpen",
            Self::InProgress => "InProgress",
            Self::SubmissionOpen => "SubmissionOpen",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Lenient counterpart of [`FromStr`]: case-insensitive, ignoring `_`,
    /// `-` and whitespace (`REGISTRATION_OPEN` ≡ `RegistrationOpen`).
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        let folded: String = raw
            .chars()
            .filter(|c| !matches!(c, '_' | '-') && !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();

        match folded.as_str() {
            "draft" => Some(Self::Draft),
            "upcoming" => Some(Self::Upcoming),
            "registrationopen" => Some(Self::RegistrationOpen),
            "inprogress" => Some(Self::InProgress),
            "submissionopen" => Some(Self::SubmissionOpen),
            "completed" => Some(Self::Completed),
            "cancelled" | "canceled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for HackathonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing an invalid status string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseHackathonStatusError {
    invalid: String,
}

impl fmt::Display for ParseHackathonStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid hackathon status '{}'. Valid values: {}",
            self.invalid,
            HackathonStatus::ALL
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for ParseHackathonStatusError {}

impl FromStr for HackathonStatus {
    type Err = ParseHackathonStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Draft" => Ok(Self::Draft),
            "Upcoming" => Ok(Self::Upcoming),
            "RegistrationOpen" => Ok(Self::RegistrationOpen),
            "InProgress" => Ok(Self::InProgress),
            "SubmissionOpen" => Ok(Self::SubmissionOpen),
            "Completed" => Ok(Self::Completed),
            "Cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseHackathonStatusError {
                invalid: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_roundtrip() {
        for status in HackathonStatus::ALL {
            let json = serde_json::to_string(status).unwrap();
            let parsed: HackathonStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(*status, parsed);
        }
    }

    #[test]
    fn parse_lenient_handles_wire_spellings() {
        assert_eq!(
            HackathonStatus::parse_lenient("REGISTRATION_OPEN"),
            Some(HackathonStatus::RegistrationOpen)
        );
        assert_eq!(
            HackathonStatus::parse_lenient("submission-open"),
            Some(HackathonStatus::SubmissionOpen)
        );
        assert_eq!(
            HackathonStatus::parse_lenient("canceled"),
            Some(HackathonStatus::Cancelled)
        );
        assert_eq!(HackathonStatus::parse_lenient("archived"), None);
    }

    #[test]
    fn terminal_states() {
        assert!(HackathonStatus::Completed.is_terminal());
        assert!(HackathonStatus::Cancelled.is_terminal());
        assert!(!HackathonStatus::SubmissionOpen.is_terminal());
    }
}
