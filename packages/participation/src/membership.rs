//! Answers "which hackathons has this user joined" from three independently
//! eventually-consistent sources.
//!
//! A registration record, an authored submission, and a spot on an embedded
//! team roster can each exist before the others have propagated. Membership
//! is therefore a commutative set union: a hackathon is joined iff at least
//! one signal asserts it, and no signal outranks another.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{HackathonSummary, SubmissionRecord};

/// Which of the three membership signals fired for one hackathon.
///
/// The gate needs the individual bits to tell "registered but no team yet"
/// apart from "team member but not individually registered".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MembershipSignals {
    /// The hackathon appears in the user's registration list.
    pub registration: bool,
    /// The user authored a submission for the hackathon.
    pub submission: bool,
    /// The user appears on a team roster embedded in the hackathon record.
    pub team_roster: bool,
}

impl MembershipSignals {
    pub fn any(&self) -> bool {
        self.registration || self.submission || self.team_roster
    }
}

/// Union of the three membership signals, keyed by hackathon id.
///
/// A key is present iff at least one signal fired, so `contains_key` is
/// exactly the "joined" predicate.
pub fn joined_hackathons(
    user_id: &str,
    all_hackathons: &[HackathonSummary],
    my_registrations: &[HackathonSummary],
    my_submissions: &[SubmissionRecord],
) -> BTreeMap<String, MembershipSignals> {
    let mut joined: BTreeMap<String, MembershipSignals> = BTreeMap::new();

    for registration in my_registrations {
        joined.entry(registration.id.clone()).or_default().registration = true;
    }

    for submission in my_submissions {
        joined
            .entry(submission.hackathon_id.clone())
            .or_default()
            .submission = true;
    }

    for hackathon in all_hackathons {
        if hackathon.teams.iter().any(|team| team.has_member(user_id)) {
            joined.entry(hackathon.id.clone()).or_default().team_roster = true;
        }
    }

    joined
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TeamMemberRef, TeamRoster};
    use chrono::{TimeZone, Utc};
    use common::HackathonStatus;

    fn hackathon(id: &str, team_members: &[&str]) -> HackathonSummary {
        let teams = if team_members.is_empty() {
            Vec::new()
        } else {
            vec![TeamRoster {
                id: format!("{id}-t1"),
                name: "Team".into(),
                members: team_members
                    .iter()
                    .map(|m| TeamMemberRef {
                        user_id: (*m).to_string(),
                    })
                    .collect(),
            }]
        };
        HackathonSummary {
            id: id.into(),
            title: id.to_uppercase(),
            status: HackathonStatus::SubmissionOpen,
            start_date: Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap(),
            submission_deadline: Utc.with_ymd_and_hms(2025, 1, 20, 0, 0, 0).unwrap(),
            min_team_size: 1,
            max_team_size: 4,
            teams,
        }
    }

    fn submission(id: &str, user: &str, hackathon: &str) -> SubmissionRecord {
        SubmissionRecord {
            id: id.into(),
            hackathon_id: hackathon.into(),
            submitter_id: user.into(),
            title: id.into(),
            description: String::new(),
            tech_stack: Vec::new(),
            repository_url: None,
            files: serde_json::Value::Null,
            status: None,
            submitted_at: None,
            is_draft: None,
            is_final: None,
        }
    }

    #[test]
    fn union_of_all_three_signals() {
        let all = vec![
            hackathon("h1", &[]),
            hackathon("h2", &[]),
            hackathon("h3", &["u1"]),
            hackathon("h4", &["someone-else"]),
        ];
        let registrations = vec![hackathon("h1", &[])];
        let submissions = vec![submission("s1", "u1", "h2")];

        let joined = joined_hackathons("u1", &all, &registrations, &submissions);

        assert_eq!(
            joined.keys().collect::<Vec<_>>(),
            vec!["h1", "h2", "h3"]
        );
        assert!(joined["h1"].registration && !joined["h1"].submission);
        assert!(joined["h2"].submission && !joined["h2"].registration);
        assert!(joined["h3"].team_roster);
        assert!(!joined.contains_key("h4"));
    }

    #[test]
    fn signals_accumulate_for_the_same_hackathon() {
        // Submission landed before the registration record propagated, then
        // both are visible; no signal overwrites another.
        let all = vec![hackathon("h1", &["u1"])];
        let registrations = vec![hackathon("h1", &[])];
        let submissions = vec![submission("s1", "u1", "h1")];

        let joined = joined_hackathons("u1", &all, &registrations, &submissions);
        let signals = joined["h1"];
        assert!(signals.registration && signals.submission && signals.team_roster);
        assert!(signals.any());
    }

    #[test]
    fn no_signals_means_not_joined() {
        let all = vec![hackathon("h1", &[])];
        let joined = joined_hackathons("u1", &all, &[], &[]);
        assert!(joined.is_empty());
    }

    #[test]
    fn union_is_commutative_over_source_contents() {
        let all = vec![hackathon("h1", &["u1"]), hackathon("h2", &[])];
        let mut registrations = vec![hackathon("h2", &[]), hackathon("h1", &[])];
        let mut submissions = vec![
            submission("s1", "u1", "h1"),
            submission("s2", "u1", "h2"),
        ];

        let forward = joined_hackathons("u1", &all, &registrations, &submissions);
        registrations.reverse();
        submissions.reverse();
        let backward = joined_hackathons("u1", &all, &registrations, &submissions);
        assert_eq!(forward, backward);
    }
}
