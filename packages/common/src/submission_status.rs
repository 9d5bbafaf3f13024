use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status of a project submission during the review lifecycle.
///
/// Backends have historically written this field in several spellings
/// (`AI_REVIEWED`, `ai-reviewed`, `UnderAIReview`, ...). All call sites must
/// go through [`SubmissionStatus::parse_lenient`] instead of comparing raw
/// strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum SubmissionStatus {
    /// Being edited; not yet handed over for review.
    Draft,
    /// Handed over; waiting for the review pipeline to pick it up.
    Submitted,
    /// Automated first-pass review is running.
    UnderAiReview,
    /// Passed the automated pass, queued for human review.
    PassedToOfflineReview,
    /// Human judges are reviewing.
    UnderOfflineReview,
    /// Passed review.
    Approved,
    /// Failed review.
    Rejected,
    /// Won the hackathon.
    Winner,
}

impl SubmissionStatus {
    /// Returns true if review has finished one way or the other.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected | Self::Winner)
    }

    /// Returns true if the submission is somewhere in the review pipeline.
    pub fn is_in_review(&self) -> bool {
        matches!(
            self,
            Self::Submitted
                | Self::UnderAiReview
                | Self::PassedToOfflineReview
                | Self::UnderOfflineReview
        )
    }

    /// All possible status values.
    pub const ALL: &'static [SubmissionStatus] = &[
        Self::Draft,
        Self::Submitted,
        Self::UnderAiReview,
        Self::PassedToOfflineReview,
        Self::UnderOfflineReview,
        Self::Approved,
        Self::Rejected,
        Self::Winner,
    ];

    /// Returns the string representation (PascalCase).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Submitted => "Submitted",
            Self::UnderAiReview => "UnderAiReview",
            Self::PassedToOfflineReview => "PassedToOfflineReview",
            Self::UnderOfflineReview => "UnderOfflineReview",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Winner => "Winner",
        }
    }

    /// Parses a status string case-insensitively, ignoring `_`, `-` and
    /// whitespace, so `AI_REVIEWED`, `ai-reviewed` and `UnderAIReview` all
    /// map to the same variant. Returns `None` for unrecognized values;
    /// callers are expected to log those as a data-quality signal.
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        let folded: String = raw
            .chars()
            .filter(|c| !matches!(c, '_' | '-') && !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();

        match folded.as_str() {
            "draft" => Some(Self::Draft),
            "submitted" => Some(Self::Submitted),
            "underaireview" | "aireview" | "aireviewed" => Some(Self::UnderAiReview),
            "passedtoofflinereview" => Some(Self::PassedToOfflineReview),
            "underofflinereview" | "offlinereview" => Some(Self::UnderOfflineReview),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "winner" => Some(Self::Winner),
            _ => None,
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for SubmissionStatus {
    fn default() -> Self {
        Self::Draft
    }
}

/// Error when parsing an invalid status string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStatusError {
    invalid: String,
}

impl fmt::Display for ParseStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid status '{}'. Valid values: {}",
            self.invalid,
            SubmissionStatus::ALL
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for ParseStatusError {}

impl FromStr for SubmissionStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Draft" => Ok(Self::Draft),
            "Submitted" => Ok(Self::Submitted),
            "UnderAiReview" => Ok(Self::UnderAiReview),
            "PassedToOfflineReview" => Ok(Self::PassedToOfflineReview),
            "UnderOfflineReview" => Ok(Self::UnderOfflineReview),
            "Approved" => Ok(Self::Approved),
            "Rejected" => Ok(Self::Rejected),
            "Winner" => Ok(Self::Winner),
            _ => Err(ParseStatusError {
                invalid: s.to_string(),
            }),
        }
    }
}
