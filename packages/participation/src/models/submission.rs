use chrono::{DateTime, Utc};
use common::SubmissionStatus;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// A project submission as served by the backend.
///
/// Two fields deserve suspicion: `files` is untyped because at least four
/// historical encodings are in circulation (see [`crate::files`]), and
/// `status` is kept as the raw wire string because older records use ad hoc
/// spellings. Use [`SubmissionRecord::parsed_status`] instead of reading
/// `status` directly.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub id: String,
    pub hackathon_id: String,
    pub submitter_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub repository_url: Option<String>,
    /// Raw file metadata: a string, an array of strings, or an array of
    /// objects, depending on which backend version wrote the record.
    #[serde(default)]
    pub files: serde_json::Value,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_draft: Option<bool>,
    #[serde(default)]
    pub is_final: Option<bool>,
}

impl SubmissionRecord {
    /// Parses the raw status leniently. `None` means the field is absent or
    /// unrecognized; callers fall back to the boolean flags and log the
    /// unrecognized value.
    pub fn parsed_status(&self) -> Option<SubmissionStatus> {
        self.status
            .as_deref()
            .and_then(SubmissionStatus::parse_lenient)
    }

    /// Whether the submission has been handed over for review.
    ///
    /// A present `status` is authoritative, even when unrecognized (an
    /// unrecognized status is treated as a draft); the flags
    /// (`submitted_at`, `is_final`) are consulted only when `status` is
    /// absent entirely.
    pub fn is_submitted(&self) -> bool {
        match self.status.as_deref() {
            Some(raw) => SubmissionStatus::parse_lenient(raw)
                .is_some_and(|status| status != SubmissionStatus::Draft),
            None => self.submitted_at.is_some() || self.is_final.unwrap_or(false),
        }
    }
}

/// Request body for creating or updating a submission.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub hackathon_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub repository_url: Option<String>,
    /// When true the submission is handed over for review instead of being
    /// saved as a draft.
    #[serde(default)]
    pub finalize: bool,
}

/// Validate a submission payload before it leaves the client.
pub fn validate_submission_payload(payload: &SubmissionPayload) -> Result<(), ApiError> {
    let title = payload.title.trim();
    if title.is_empty() || title.chars().count() > 256 {
        return Err(ApiError::Validation("Title must be 1-256 characters".into()));
    }

    if payload.description.len() > 1_000_000 {
        return Err(ApiError::Validation(
            "Description must be at most 1MB".into(),
        ));
    }

    if let Some(ref url) = payload.repository_url
        && !(url.starts_with("http://") || url.starts_with("https://"))
    {
        return Err(ApiError::Validation(
            "Repository URL must be http(s)".into(),
        ));
    }

    Ok(())
}
