//! Built-in sample data source for demo mode.
//!
//! When the backend is unreachable (trade-show laptops, local development),
//! the portal runs against this source instead. It sits behind the same
//! [`PortalApi`] seam as the real client, so aggregation logic never
//! special-cases it, and its mutations enforce the same gate rules so the
//! register/submit flows stay honest.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use common::HackathonStatus;
use serde_json::json;

use crate::api::PortalApi;
use crate::error::ApiError;
use crate::models::{
    HackathonSummary, RawParticipantEntry, SubmissionPayload, SubmissionRecord, TeamMemberRef,
    TeamRef, TeamRoster, validate_submission_payload,
};

/// User id the demo binary aggregates for.
pub const DEMO_USER_ID: &str = "u-demo";

const OPEN_HACKATHON_ID: &str = "h-gearshift";
const PAST_HACKATHON_ID: &str = "h-nightowl";

/// Sample participants: (user_id, first_name, last_name, team).
const DEMO_PARTICIPANTS: &[(&str, &str, Option<&str>, Option<(&str, &str)>)] = &[
    ("u-ada", "Ada", Some("Lovelace"), Some(("t-relay", "Relay Racers"))),
    ("u-grace", "Grace", Some("Hopper"), Some(("t-relay", "Relay Racers"))),
    ("u-linus", "Linus", None, Some(("t-kernel", "Kernel Panic"))),
    ("u-margaret", "Margaret", Some("Hamilton"), None),
    ("u-demo", "Demo", Some("User"), None),
];

struct DemoState {
    registrations: HashSet<String>,
    submissions: Vec<SubmissionRecord>,
    next_submission_id: u32,
}

/// Demo-mode implementation of [`PortalApi`].
pub struct DemoApi {
    state: Mutex<DemoState>,
}

impl Default for DemoApi {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoApi {
    pub fn new() -> Self {
        let mut registrations = HashSet::new();
        registrations.insert(PAST_HACKATHON_ID.to_string());
        registrations.insert(OPEN_HACKATHON_ID.to_string());

        Self {
            state: Mutex::new(DemoState {
                registrations,
                submissions: sample_submissions(),
                next_submission_id: 1,
            }),
        }
    }

    fn hackathons(&self) -> Vec<HackathonSummary> {
        let now = Utc::now();
        vec![
            HackathonSummary {
                id: OPEN_HACKATHON_ID.into(),
                title: "Gearshift Hack Week".into(),
                status: HackathonStatus::SubmissionOpen,
                start_date: now - Duration::days(2),
                submission_deadline: now + Duration::days(5),
                min_team_size: 1,
                max_team_size: 4,
                teams: vec![TeamRoster {
                    id: "t-relay".into(),
                    name: "Relay Racers".into(),
                    members: vec![
                        TeamMemberRef {
                            user_id: "u-ada".into(),
                        },
                        TeamMemberRef {
                            user_id: "u-grace".into(),
                        },
                    ],
                }],
            },
            HackathonSummary {
                id: PAST_HACKATHON_ID.into(),
                title: "Night Owl Sprint".into(),
                status: HackathonStatus::Completed,
                start_date: now - Duration::days(40),
                submission_deadline: now - Duration::days(30),
                min_team_size: 1,
                max_team_size: 5,
                teams: Vec::new(),
            },
        ]
    }

    fn find_hackathon(&self, id: &str) -> Result<HackathonSummary, ApiError> {
        self.hackathons()
            .into_iter()
            .find(|h| h.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("Hackathon '{id}' not found")))
    }
}

fn sample_submissions() -> Vec<SubmissionRecord> {
    let now = Utc::now();
    vec![
        SubmissionRecord {
            id: "demo-s-winner".into(),
            hackathon_id: PAST_HACKATHON_ID.into(),
            submitter_id: DEMO_USER_ID.into(),
            title: "Sleepless Scheduler".into(),
            description: "Calendar that negotiates meeting times for you.".into(),
            tech_stack: vec!["rust".into(), "svelte".into()],
            repository_url: Some("https://github.com/example/sleepless".into()),
            // Deliberately the legacy JSON-string encoding so demo mode
            // exercises the decoder.
            files: json!(
                r#"{"name":"pitch.pdf","url":"https://demo.example.com/files/pitch.pdf","size":52240}"#
            ),
            status: Some("WINNER".into()),
            submitted_at: Some(now - Duration::days(31)),
            is_draft: Some(false),
            is_final: Some(true),
        },
        SubmissionRecord {
            id: "demo-s-team".into(),
            hackathon_id: OPEN_HACKATHON_ID.into(),
            submitter_id: "u-ada".into(),
            title: "Baton Pass".into(),
            description: "Hand-off tracker for relay deployments.".into(),
            tech_stack: vec!["go".into()],
            repository_url: None,
            files: json!(["https://demo.example.com/files/baton.zip"]),
            status: Some("Submitted".into()),
            submitted_at: Some(now - Duration::days(1)),
            is_draft: Some(false),
            is_final: None,
        },
    ]
}

fn sample_participants(hackathon_id: &str) -> Vec<RawParticipantEntry> {
    let now = Utc::now();
    DEMO_PARTICIPANTS
        .iter()
        .map(|(user_id, first, last, team)| RawParticipantEntry {
            user_id: (*user_id).to_string(),
            first_name: (*first).to_string(),
            last_name: last.map(str::to_string),
            email: Some(format!("{user_id}@demo.example.com")),
            team: team.map(|(id, name)| TeamRef {
                id: id.to_string(),
                name: name.to_string(),
            }),
            registered_at: Some(now - Duration::days(3)),
        })
        // The past event only had individual entrants in the sample set.
        .filter(|entry| hackathon_id != PAST_HACKATHON_ID || entry.team.is_none())
        .collect()
}

#[async_trait]
impl PortalApi for DemoApi {
    async fn list_hackathons(&self) -> Result<Vec<HackathonSummary>, ApiError> {
        Ok(self.hackathons())
    }

    async fn list_my_registrations(&self) -> Result<Vec<HackathonSummary>, ApiError> {
        let registered: HashSet<String> = self
            .state
            .lock()
            .expect("demo state poisoned")
            .registrations
            .clone();
        Ok(self
            .hackathons()
            .into_iter()
            .filter(|h| registered.contains(&h.id))
            .collect())
    }

    async fn list_my_submissions(
        &self,
        user_id: &str,
    ) -> Result<Vec<SubmissionRecord>, ApiError> {
        let state = self.state.lock().expect("demo state poisoned");
        Ok(state
            .submissions
            .iter()
            .filter(|s| s.submitter_id == user_id)
            .cloned()
            .collect())
    }

    async fn get_submission(&self, id: &str) -> Result<SubmissionRecord, ApiError> {
        let state = self.state.lock().expect("demo state poisoned");
        state
            .submissions
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("Submission '{id}' not found")))
    }

    async fn list_hackathon_participants(
        &self,
        hackathon_id: &str,
    ) -> Result<Vec<RawParticipantEntry>, ApiError> {
        self.find_hackathon(hackathon_id)?;
        Ok(sample_participants(hackathon_id))
    }

    async fn register_for_hackathon(&self, hackathon_id: &str) -> Result<(), ApiError> {
        let hackathon = self.find_hackathon(hackathon_id)?;
        let now = Utc::now();
        if hackathon.status.is_terminal() || hackathon.submission_window_passed(now) {
            return Err(ApiError::RegistrationClosed);
        }

        let mut state = self.state.lock().expect("demo state poisoned");
        if !state.registrations.insert(hackathon_id.to_string()) {
            return Err(ApiError::AlreadyRegistered);
        }
        Ok(())
    }

    async fn create_submission(
        &self,
        payload: &SubmissionPayload,
    ) -> Result<SubmissionRecord, ApiError> {
        validate_submission_payload(payload)?;
        let hackathon = self.find_hackathon(&payload.hackathon_id)?;
        let now = Utc::now();

        let mut state = self.state.lock().expect("demo state poisoned");
        if !state.registrations.contains(&payload.hackathon_id) {
            return Err(ApiError::NotRegistered);
        }
        if now > hackathon.submission_deadline {
            return Err(ApiError::DeadlinePassed);
        }

        let id = format!("demo-s{}", state.next_submission_id);
        state.next_submission_id += 1;

        let record = SubmissionRecord {
            id,
            hackathon_id: payload.hackathon_id.clone(),
            submitter_id: DEMO_USER_ID.into(),
            title: payload.title.clone(),
            description: payload.description.clone(),
            tech_stack: payload.tech_stack.clone(),
            repository_url: payload.repository_url.clone(),
            files: serde_json::Value::Null,
            status: Some(if payload.finalize { "Submitted" } else { "Draft" }.into()),
            submitted_at: payload.finalize.then_some(now),
            is_draft: Some(!payload.finalize),
            is_final: Some(payload.finalize),
        };
        state.submissions.push(record.clone());
        Ok(record)
    }

    async fn update_submission(
        &self,
        id: &str,
        payload: &SubmissionPayload,
    ) -> Result<SubmissionRecord, ApiError> {
        validate_submission_payload(payload)?;
        let hackathon = self.find_hackathon(&payload.hackathon_id)?;
        let now = Utc::now();
        if now > hackathon.submission_deadline {
            return Err(ApiError::DeadlinePassed);
        }

        let mut state = self.state.lock().expect("demo state poisoned");
        let record = state
            .submissions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("Submission '{id}' not found")))?;

        record.title = payload.title.clone();
        record.description = payload.description.clone();
        record.tech_stack = payload.tech_stack.clone();
        record.repository_url = payload.repository_url.clone();
        if payload.finalize && !record.is_submitted() {
            record.status = Some("Submitted".into());
            record.submitted_at = Some(now);
            record.is_draft = Some(false);
            record.is_final = Some(true);
        }
        Ok(record.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn registering_twice_fails() {
        let api = DemoApi::new();
        // The demo user starts registered for both sample hackathons.
        assert!(matches!(
            api.register_for_hackathon(OPEN_HACKATHON_ID).await,
            Err(ApiError::AlreadyRegistered)
        ));
    }

    #[tokio::test]
    async fn registration_for_finished_hackathon_is_closed() {
        let api = DemoApi::new();
        {
            let mut state = api.state.lock().unwrap();
            state.registrations.clear();
        }
        assert!(matches!(
            api.register_for_hackathon(PAST_HACKATHON_ID).await,
            Err(ApiError::RegistrationClosed)
        ));
    }

    #[tokio::test]
    async fn draft_then_finalize_flow() {
        let api = DemoApi::new();
        let payload = SubmissionPayload {
            hackathon_id: OPEN_HACKATHON_ID.into(),
            title: "Test Project".into(),
            ..Default::default()
        };

        let draft = api.create_submission(&payload).await.unwrap();
        assert!(!draft.is_submitted());

        let mut finalize = payload.clone();
        finalize.finalize = true;
        let submitted = api.update_submission(&draft.id, &finalize).await.unwrap();
        assert!(submitted.is_submitted());
        assert!(submitted.submitted_at.is_some());
    }

    #[tokio::test]
    async fn create_after_deadline_is_refused() {
        let api = DemoApi::new();
        let payload = SubmissionPayload {
            hackathon_id: PAST_HACKATHON_ID.into(),
            title: "Too Late".into(),
            ..Default::default()
        };
        assert!(matches!(
            api.create_submission(&payload).await,
            Err(ApiError::DeadlinePassed)
        ));
    }
}
