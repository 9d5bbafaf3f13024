//! Decides whether submission actions are allowed and what call-to-action
//! the UI should show.
//!
//! Rendering-time decisions ([`evaluate`]) and call-time checks
//! ([`check_mutation`]) are deliberately separate: the UI state can go stale
//! while a form sits open, so every mutating call re-checks the deadline at
//! the moment it runs.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::ApiError;
use crate::models::{HackathonSummary, SubmissionRecord};

/// Call-to-action the presentation layer should render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum GateAction {
    Register,
    SubmissionOpensSoon,
    SubmitProject,
    ContinueProject,
    ViewSubmission,
    ViewDraft,
}

/// Why the gate decided the way it did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum GateReason {
    NotRegistered,
    BeforeWindow,
    WindowOpen,
    AlreadySubmitted,
    DraftInWindow,
    WindowClosed,
}

/// Gate verdict for one (user, hackathon) pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct GateDecision {
    pub action: GateAction,
    pub disabled: bool,
    pub reason: GateReason,
}

/// Evaluate the call-to-action for a hackathon card.
///
/// Viewing is never blocked by time; only creating and editing are, and
/// those are re-checked by [`check_mutation`] when the call actually runs.
pub fn evaluate(
    now: DateTime<Utc>,
    hackathon: &HackathonSummary,
    is_registered: bool,
    submission: Option<&SubmissionRecord>,
) -> GateDecision {
    if !is_registered {
        return GateDecision {
            action: GateAction::Register,
            disabled: false,
            reason: GateReason::NotRegistered,
        };
    }

    if now < hackathon.start_date {
        return GateDecision {
            action: GateAction::SubmissionOpensSoon,
            disabled: true,
            reason: GateReason::BeforeWindow,
        };
    }

    match submission {
        None => {
            if hackathon.submission_window_open(now) {
                GateDecision {
                    action: GateAction::SubmitProject,
                    disabled: false,
                    reason: GateReason::WindowOpen,
                }
            } else {
                // Window passed with nothing submitted: nothing to view,
                // nothing to start.
                GateDecision {
                    action: GateAction::SubmitProject,
                    disabled: true,
                    reason: GateReason::WindowClosed,
                }
            }
        }
        Some(submission) if submission.is_submitted() => GateDecision {
            action: GateAction::ViewSubmission,
            disabled: false,
            reason: GateReason::AlreadySubmitted,
        },
        Some(_) => {
            if hackathon.submission_window_open(now) {
                GateDecision {
                    action: GateAction::ContinueProject,
                    disabled: false,
                    reason: GateReason::DraftInWindow,
                }
            } else {
                GateDecision {
                    action: GateAction::ViewDraft,
                    disabled: false,
                    reason: GateReason::WindowClosed,
                }
            }
        }
    }
}

/// Authorize a mutating submission call at the moment it is made.
///
/// Independent of any previously rendered [`GateDecision`]; the deadline is
/// checked against `now`, not against whatever the UI believed when it drew
/// the button.
pub fn check_mutation(
    now: DateTime<Utc>,
    hackathon: &HackathonSummary,
    is_registered: bool,
) -> Result<(), ApiError> {
    if !is_registered {
        return Err(ApiError::NotRegistered);
    }
    if now > hackathon.submission_deadline {
        return Err(ApiError::DeadlinePassed);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use common::HackathonStatus;

    fn hackathon() -> HackathonSummary {
        HackathonSummary {
            id: "h1".into(),
            title: "Test".into(),
            status: HackathonStatus::SubmissionOpen,
            start_date: Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap(),
            submission_deadline: Utc.with_ymd_and_hms(2025, 1, 20, 0, 0, 0).unwrap(),
            min_team_size: 1,
            max_team_size: 4,
            teams: Vec::new(),
        }
    }

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, day, 0, 0, 0).unwrap()
    }

    fn draft() -> SubmissionRecord {
        SubmissionRecord {
            id: "s1".into(),
            hackathon_id: "h1".into(),
            submitter_id: "u1".into(),
            title: "Demo".into(),
            description: String::new(),
            tech_stack: Vec::new(),
            repository_url: None,
            files: serde_json::Value::Null,
            status: Some("Draft".into()),
            submitted_at: None,
            is_draft: Some(true),
            is_final: None,
        }
    }

    fn submitted() -> SubmissionRecord {
        let mut s = draft();
        s.status = Some("Submitted".into());
        s.submitted_at = Some(at(15));
        s
    }

    #[test]
    fn unregistered_user_is_offered_registration() {
        let d = evaluate(at(15), &hackathon(), false, None);
        assert_eq!(d.action, GateAction::Register);
        assert!(!d.disabled);
    }

    #[test]
    fn before_start_the_button_is_disabled() {
        // Spec scenario: start 2025-01-10, deadline 2025-01-20, now 01-05.
        let d = evaluate(at(5), &hackathon(), true, None);
        assert_eq!(d.action, GateAction::SubmissionOpensSoon);
        assert!(d.disabled);
    }

    #[test]
    fn open_window_without_submission_offers_submit() {
        let d = evaluate(at(15), &hackathon(), true, None);
        assert_eq!(d.action, GateAction::SubmitProject);
        assert!(!d.disabled);
    }

    #[test]
    fn closed_window_without_submission_disables_submit() {
        let d = evaluate(at(25), &hackathon(), true, None);
        assert_eq!(d.action, GateAction::SubmitProject);
        assert!(d.disabled);
        assert_eq!(d.reason, GateReason::WindowClosed);
    }

    #[test]
    fn submitted_project_is_viewable_even_after_deadline() {
        let s = submitted();
        let d = evaluate(at(25), &hackathon(), true, Some(&s));
        assert_eq!(d.action, GateAction::ViewSubmission);
        assert!(!d.disabled);
    }

    #[test]
    fn draft_in_open_window_continues() {
        let s = draft();
        let d = evaluate(at(15), &hackathon(), true, Some(&s));
        assert_eq!(d.action, GateAction::ContinueProject);
        assert!(!d.disabled);
    }

    #[test]
    fn draft_after_deadline_is_view_only() {
        // Spec scenario: now 2025-01-25, draft with submitted_at unset.
        let s = draft();
        let d = evaluate(at(25), &hackathon(), true, Some(&s));
        assert_eq!(d.action, GateAction::ViewDraft);
        assert!(!d.disabled);

        // ...but the mutating call itself is refused.
        assert!(matches!(
            check_mutation(at(25), &hackathon(), true),
            Err(ApiError::DeadlinePassed)
        ));
    }

    #[test]
    fn mutation_checks_registration_first() {
        assert!(matches!(
            check_mutation(at(15), &hackathon(), false),
            Err(ApiError::NotRegistered)
        ));
        assert!(check_mutation(at(15), &hackathon(), true).is_ok());
        // Deadline itself is inclusive.
        assert!(check_mutation(at(20), &hackathon(), true).is_ok());
    }
}
