//! Impure orchestration: sequences collaborator calls and feeds their
//! results through the pure reconciliation functions.
//!
//! All reconciliation stays synchronous and side-effect-free; this module
//! owns the fetch fan-out, per-source failure isolation, and the
//! last-aggregation-wins rule for overlapping refreshes.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use common::{SubmissionPhase, TimelineStep};
use futures::future::join_all;
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::api::PortalApi;
use crate::error::ApiError;
use crate::files::{self, FileDescriptor};
use crate::gate::{self, GateDecision};
use crate::membership::{self, MembershipSignals};
use crate::models::{
    HackathonSummary, SubmissionPayload, SubmissionRecord, validate_submission_payload,
};
use crate::reconcile::{self, Roster};
use crate::timeline;

/// Which backing source a recorded failure came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SourceKind {
    Hackathons,
    Registrations,
    Submissions,
    Participants,
}

/// One isolated fetch failure, reported once and not retried.
#[derive(Clone, Debug, Serialize)]
pub struct SourceFailure {
    pub source: SourceKind,
    /// Set for per-hackathon participant fetches.
    pub hackathon_id: Option<String>,
    pub message: String,
}

/// Derived view of one submission: the record plus its lifecycle phase,
/// timeline and decoded files. Recomputed on every pass, never persisted.
#[derive(Clone, Debug, Serialize)]
pub struct SubmissionView {
    pub record: SubmissionRecord,
    pub phase: SubmissionPhase,
    pub timeline: Vec<TimelineStep>,
    pub files: Vec<FileDescriptor>,
}

impl SubmissionView {
    pub fn from_record(record: SubmissionRecord) -> Self {
        let classification = timeline::classify(&record);
        let files = files::decode_files(&record.files);
        Self {
            record,
            phase: classification.phase,
            timeline: classification.timeline,
            files,
        }
    }
}

/// Everything the dashboard needs for one hackathon.
#[derive(Clone, Debug, Serialize)]
pub struct HackathonParticipation {
    pub hackathon: HackathonSummary,
    pub signals: MembershipSignals,
    pub roster: Roster,
    /// The current user's own submission for this hackathon, if any.
    pub submission: Option<SubmissionView>,
    pub gate: GateDecision,
}

impl HackathonParticipation {
    pub fn is_joined(&self) -> bool {
        self.signals.any()
    }
}

/// One consistent aggregation of the user's participation state.
#[derive(Clone, Debug, Serialize)]
pub struct AggregateView {
    pub user_id: String,
    pub generated_at: DateTime<Utc>,
    pub hackathons: Vec<HackathonParticipation>,
    /// Per-source fetch failures survived during this pass.
    pub failures: Vec<SourceFailure>,
}

/// Sequences collaborator calls into [`AggregateView`]s.
///
/// Holds a pass generation so a slow earlier refresh can never overwrite a
/// newer one: when a pass finishes after a later pass has started, its
/// result is discarded (`Ok(None)`).
pub struct ParticipationLoader<A: PortalApi> {
    api: A,
    generation: AtomicU64,
}

impl<A: PortalApi> ParticipationLoader<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            generation: AtomicU64::new(0),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Run one aggregation pass for `user_id`.
    ///
    /// Per-source failures are isolated: a failed source contributes an
    /// empty collection and one recorded [`SourceFailure`]; the dedicated
    /// participants source is never substituted with guessed data. Only
    /// `AuthExpired` aborts the pass as an error.
    #[instrument(skip(self))]
    pub async fn load(&self, user_id: &str) -> Result<Option<AggregateView>, ApiError> {
        let pass = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let mut failures = Vec::new();

        let (hackathons, registrations, submissions) = tokio::join!(
            self.api.list_hackathons(),
            self.api.list_my_registrations(),
            self.api.list_my_submissions(user_id),
        );
        let hackathons = recover(hackathons, SourceKind::Hackathons, None, &mut failures)?;
        let registrations =
            recover(registrations, SourceKind::Registrations, None, &mut failures)?;
        let submissions = recover(submissions, SourceKind::Submissions, None, &mut failures)?;

        let signals = membership::joined_hackathons(user_id, &hackathons, &registrations, &submissions);

        // Participant fetches run concurrently and may complete in any
        // order; reconciliation is order-independent so the interleaving
        // cannot change the result.
        let participant_results = join_all(
            hackathons
                .iter()
                .map(|h| self.api.list_hackathon_participants(&h.id)),
        )
        .await;

        let mut view_hackathons = Vec::with_capacity(hackathons.len());
        for (hackathon, participants) in hackathons.into_iter().zip(participant_results) {
            let entries = recover(
                participants,
                SourceKind::Participants,
                Some(hackathon.id.clone()),
                &mut failures,
            )?;

            let hackathon_signals = signals.get(&hackathon.id).copied().unwrap_or_default();
            let roster = reconcile::reconcile(&hackathon.id, &entries, &submissions);
            let submission =
                reconcile::best_submission(user_id, &hackathon.id, &submissions).cloned();
            let decision = gate::evaluate(
                Utc::now(),
                &hackathon,
                hackathon_signals.any(),
                submission.as_ref(),
            );

            view_hackathons.push(HackathonParticipation {
                hackathon,
                signals: hackathon_signals,
                roster,
                submission: submission.map(SubmissionView::from_record),
                gate: decision,
            });
        }

        // Last aggregation wins: a newer pass started while this one was in
        // flight, so this result is stale and must not overwrite it.
        if self.generation.load(Ordering::SeqCst) != pass {
            info!(pass, "Discarding stale aggregation pass");
            return Ok(None);
        }

        Ok(Some(AggregateView {
            user_id: user_id.to_string(),
            generated_at: Utc::now(),
            hackathons: view_hackathons,
            failures,
        }))
    }

    /// Register for a hackathon. Gate violations come back verbatim from
    /// the backend (`AlreadyRegistered`, `RegistrationClosed`).
    #[instrument(skip(self))]
    pub async fn register(&self, hackathon_id: &str) -> Result<(), ApiError> {
        self.api.register_for_hackathon(hackathon_id).await
    }

    /// Create a submission, re-checking registration and the deadline at
    /// call time. The rendered gate state may be stale by the time the user
    /// presses the button; this check is the one that counts.
    #[instrument(skip(self, payload), fields(hackathon_id = %hackathon.id))]
    pub async fn submit_project(
        &self,
        hackathon: &HackathonSummary,
        is_registered: bool,
        payload: &SubmissionPayload,
    ) -> Result<SubmissionRecord, ApiError> {
        validate_submission_payload(payload)?;
        gate::check_mutation(Utc::now(), hackathon, is_registered)?;
        self.api.create_submission(payload).await
    }

    /// Update a submission, with the same call-time re-check as
    /// [`Self::submit_project`].
    #[instrument(skip(self, payload), fields(hackathon_id = %hackathon.id))]
    pub async fn update_project(
        &self,
        hackathon: &HackathonSummary,
        is_registered: bool,
        submission_id: &str,
        payload: &SubmissionPayload,
    ) -> Result<SubmissionRecord, ApiError> {
        validate_submission_payload(payload)?;
        gate::check_mutation(Utc::now(), hackathon, is_registered)?;
        self.api.update_submission(submission_id, payload).await
    }
}

/// Recover a per-source failure into an empty collection, recording it once.
/// `AuthExpired` is the only failure that propagates.
fn recover<T>(
    result: Result<Vec<T>, ApiError>,
    source: SourceKind,
    hackathon_id: Option<String>,
    failures: &mut Vec<SourceFailure>,
) -> Result<Vec<T>, ApiError> {
    match result {
        Ok(values) => Ok(values),
        Err(ApiError::AuthExpired) => Err(ApiError::AuthExpired),
        Err(e) => {
            warn!(?source, hackathon_id = ?hackathon_id, error = %e, "Source fetch failed, continuing with empty result");
            failures.push(SourceFailure {
                source,
                hackathon_id,
                message: e.to_string(),
            });
            Ok(Vec::new())
        }
    }
}
