//! Collaborator seams. The core never performs network I/O itself; the host
//! application supplies a [`PortalApi`] (its REST client, or the demo-mode
//! source from [`crate::demo`]) and a [`PendingActionStore`] for the
//! resume-after-login marker.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::models::{
    HackathonSummary, RawParticipantEntry, SubmissionPayload, SubmissionRecord,
};

/// Backend operations consumed by the aggregation core.
#[async_trait]
pub trait PortalApi: Send + Sync {
    async fn list_hackathons(&self) -> Result<Vec<HackathonSummary>, ApiError>;

    /// Hackathons the current user explicitly registered for.
    async fn list_my_registrations(&self) -> Result<Vec<HackathonSummary>, ApiError>;

    async fn list_my_submissions(
        &self,
        user_id: &str,
    ) -> Result<Vec<SubmissionRecord>, ApiError>;

    async fn get_submission(&self, id: &str) -> Result<SubmissionRecord, ApiError>;

    async fn list_hackathon_participants(
        &self,
        hackathon_id: &str,
    ) -> Result<Vec<RawParticipantEntry>, ApiError>;

    /// Fails with `AlreadyRegistered` or `RegistrationClosed`.
    async fn register_for_hackathon(&self, hackathon_id: &str) -> Result<(), ApiError>;

    /// Fails with `DeadlinePassed`, `NotRegistered` or `Validation`.
    async fn create_submission(
        &self,
        payload: &SubmissionPayload,
    ) -> Result<SubmissionRecord, ApiError>;

    /// Fails with `DeadlinePassed`, `NotRegistered` or `Validation`.
    async fn update_submission(
        &self,
        id: &str,
        payload: &SubmissionPayload,
    ) -> Result<SubmissionRecord, ApiError>;
}

/// Key under which a pending registration is parked across a login redirect.
pub const PENDING_REGISTRATION_KEY: &str = "portal.pending_registration";

/// Transient key-value store for resuming a flow after login. No expiry is
/// defined; correctness of the core never depends on it.
pub trait PendingActionStore: Send + Sync {
    fn set(&self, key: &str, value: &str);
    fn get(&self, key: &str) -> Option<String>;
    fn clear(&self, key: &str);
}

/// In-memory store, good enough for tests and the demo binary. The real
/// portal backs this with browser-local persistence.
#[derive(Default)]
pub struct InMemoryPendingStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryPendingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PendingActionStore for InMemoryPendingStore {
    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .expect("pending store poisoned")
            .insert(key.to_string(), value.to_string());
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .expect("pending store poisoned")
            .get(key)
            .cloned()
    }

    fn clear(&self, key: &str) {
        self.entries
            .lock()
            .expect("pending store poisoned")
            .remove(key);
    }
}
