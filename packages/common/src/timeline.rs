use serde::Serialize;

/// Coarse lifecycle phase of a submission, derived from its status.
/// Drives the visible three-step timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SubmissionPhase {
    Draft,
    InReview,
    Approved,
    Rejected,
    Winner,
}

impl SubmissionPhase {
    /// Human-readable phase label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::InReview => "Under Review",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Winner => "Winner 🏆",
        }
    }
}

/// State of one step in a submission timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepState {
    Completed,
    Current,
    Pending,
}

/// One named step in the three-step submission timeline.
///
/// Only `current` steps carry an "in progress" note; the constructors
/// enforce this so completed steps can never pick one up.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TimelineStep {
    pub label: &'static str,
    pub state: StepState,
    pub note: Option<&'static str>,
}

impl TimelineStep {
    pub fn completed(label: &'static str) -> Self {
        Self {
            label,
            state: StepState::Completed,
            note: None,
        }
    }

    pub fn current(label: &'static str, note: &'static str) -> Self {
        Self {
            label,
            state: StepState::Current,
            note: Some(note),
        }
    }

    pub fn pending(label: &'static str) -> Self {
        Self {
            label,
            state: StepState::Pending,
            note: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_steps_never_carry_a_note() {
        assert_eq!(TimelineStep::completed("Submitted").note, None);
        assert_eq!(TimelineStep::pending("Final Result").note, None);
        assert_eq!(
            TimelineStep::current("Offline Review", "Review in progress").note,
            Some("Review in progress")
        );
    }

    #[test]
    fn winner_phase_label() {
        assert_eq!(SubmissionPhase::Winner.label(), "Winner 🏆");
    }
}
