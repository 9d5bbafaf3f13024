use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One raw entry from the per-hackathon participants endpoint.
///
/// The endpoint merges registration-sourced and team-sourced rows, so the
/// same user can appear more than once under different shapes. Team-sourced
/// rows carry a `team` reference; registration-sourced rows do not.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RawParticipantEntry {
    pub user_id: String,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub team: Option<TeamRef>,
    #[serde(default)]
    pub registered_at: Option<DateTime<Utc>>,
}

/// Team reference on a team-sourced participant entry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TeamRef {
    pub id: String,
    pub name: String,
}

/// Deduplicated participant. One logical identity per (user, hackathon),
/// regardless of how many raw entries named the user.
#[derive(Clone, Debug, Serialize)]
pub struct ParticipantRecord {
    pub user_id: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub registered_at: Option<DateTime<Utc>>,
    pub has_submission: bool,
    pub submission_id: Option<String>,
}

impl ParticipantRecord {
    pub fn display_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {}", self.first_name, last),
            None => self.first_name.clone(),
        }
    }
}

/// A team assembled from team-sourced participant entries.
#[derive(Clone, Debug, Serialize)]
pub struct TeamGroup {
    pub id: String,
    pub name: String,
    /// Taken from the entry that first named the team; otherwise the
    /// earliest member timestamp.
    pub registered_at: Option<DateTime<Utc>>,
    pub members: Vec<ParticipantRecord>,
}

impl TeamGroup {
    pub fn has_member(&self, user_id: &str) -> bool {
        self.members.iter().any(|m| m.user_id == user_id)
    }
}
