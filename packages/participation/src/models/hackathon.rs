use chrono::{DateTime, Utc};
use common::HackathonStatus;
use serde::{Deserialize, Serialize};

/// Summary of a hackathon as served by the backend. Read-only to this crate;
/// the backend is the source of truth.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HackathonSummary {
    pub id: String,
    pub title: String,
    pub status: HackathonStatus,
    pub start_date: DateTime<Utc>,
    pub submission_deadline: DateTime<Utc>,
    pub min_team_size: u32,
    pub max_team_size: u32,
    /// Embedded team roster. Only some endpoints populate this.
    #[serde(default)]
    pub teams: Vec<TeamRoster>,
}

impl HackathonSummary {
    /// Returns true while submissions can be created or edited.
    pub fn submission_window_open(&self, now: DateTime<Utc>) -> bool {
        self.start_date <= now && now <= self.submission_deadline
    }

    /// Returns true once the deadline is behind us.
    pub fn submission_window_passed(&self, now: DateTime<Utc>) -> bool {
        now > self.submission_deadline
    }
}

/// A team as embedded in a hackathon record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TeamRoster {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub members: Vec<TeamMemberRef>,
}

impl TeamRoster {
    pub fn has_member(&self, user_id: &str) -> bool {
        self.members.iter().any(|m| m.user_id == user_id)
    }
}

/// Reference to a user inside an embedded team roster.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TeamMemberRef {
    pub user_id: String,
}
