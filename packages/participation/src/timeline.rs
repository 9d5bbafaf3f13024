//! Maps a submission record onto its lifecycle phase and the three-step
//! timeline shown on dashboards.

use common::{SubmissionPhase, SubmissionStatus, TimelineStep};
use serde::Serialize;
use tracing::warn;

use crate::models::SubmissionRecord;

const STEP_DRAFT: &str = "Draft";
const STEP_SUBMITTED: &str = "Submitted";
const STEP_OFFLINE_REVIEW: &str = "Offline Review";
const STEP_FINAL_RESULT: &str = "Final Result";
const STEP_WINNER: &str = "Winner!";

const NOTE_DRAFTING: &str = "Draft in progress";
const NOTE_REVIEWING: &str = "Review in progress";

/// Derived lifecycle view of a submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub phase: SubmissionPhase,
    pub timeline: Vec<TimelineStep>,
}

/// Classify a submission into a phase and ordered timeline.
///
/// `status` is authoritative when it parses. An unrecognized status is
/// deliberately lenient: it is logged as a data-quality signal and
/// classified as a draft rather than failing the whole aggregation pass.
/// The boolean flags are consulted only when `status` is absent entirely.
pub fn classify(record: &SubmissionRecord) -> Classification {
    let status = match record.status.as_deref() {
        Some(raw) => match SubmissionStatus::parse_lenient(raw) {
            Some(status) => status,
            None => {
                warn!(
                    submission_id = %record.id,
                    status = %raw,
                    "Unrecognized submission status, classifying as draft"
                );
                SubmissionStatus::Draft
            }
        },
        None => status_from_flags(record),
    };

    classify_status(status)
}

/// Fallback for records written before the status field existed.
fn status_from_flags(record: &SubmissionRecord) -> SubmissionStatus {
    if record.submitted_at.is_some() || record.is_final.unwrap_or(false) {
        SubmissionStatus::Submitted
    } else {
        SubmissionStatus::Draft
    }
}

fn classify_status(status: SubmissionStatus) -> Classification {
    match status {
        SubmissionStatus::Draft => Classification {
            phase: SubmissionPhase::Draft,
            timeline: vec![
                TimelineStep::current(STEP_DRAFT, NOTE_DRAFTING),
                TimelineStep::pending(STEP_OFFLINE_REVIEW),
                TimelineStep::pending(STEP_FINAL_RESULT),
            ],
        },
        SubmissionStatus::Submitted
        | SubmissionStatus::UnderAiReview
        | SubmissionStatus::PassedToOfflineReview
        | SubmissionStatus::UnderOfflineReview => Classification {
            phase: SubmissionPhase::InReview,
            timeline: vec![
                TimelineStep::completed(STEP_SUBMITTED),
                TimelineStep::current(STEP_OFFLINE_REVIEW, NOTE_REVIEWING),
                TimelineStep::pending(STEP_FINAL_RESULT),
            ],
        },
        SubmissionStatus::Approved => Classification {
            phase: SubmissionPhase::Approved,
            timeline: all_completed(STEP_FINAL_RESULT),
        },
        SubmissionStatus::Rejected => Classification {
            phase: SubmissionPhase::Rejected,
            timeline: all_completed(STEP_FINAL_RESULT),
        },
        SubmissionStatus::Winner => Classification {
            phase: SubmissionPhase::Winner,
            timeline: all_completed(STEP_WINNER),
        },
    }
}

fn all_completed(final_label: &'static str) -> Vec<TimelineStep> {
    vec![
        TimelineStep::completed(STEP_SUBMITTED),
        TimelineStep::completed(STEP_OFFLINE_REVIEW),
        TimelineStep::completed(final_label),
    ]
}
