//! Merges the per-hackathon participant list into a deduplicated roster.
//!
//! The participants endpoint concatenates registration-sourced and
//! team-sourced rows fetched at different times, so the same user can show
//! up several times under different shapes. The merge here is a set
//! operation: re-running it over the same rows in any order yields the same
//! teams and individuals.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::models::{ParticipantRecord, RawParticipantEntry, SubmissionRecord, TeamGroup};

/// Reconciled view of one hackathon's participants.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Roster {
    pub teams: Vec<TeamGroup>,
    pub individuals: Vec<ParticipantRecord>,
}

impl Roster {
    /// Total number of distinct participants.
    pub fn participant_count(&self) -> usize {
        self.teams.iter().map(|t| t.members.len()).sum::<usize>() + self.individuals.len()
    }
}

/// Reconcile raw participant entries for one hackathon, enriching each
/// participant with their submission (when the parallel submissions
/// collection carries one for this hackathon).
pub fn reconcile(
    hackathon_id: &str,
    entries: &[RawParticipantEntry],
    submissions: &[SubmissionRecord],
) -> Roster {
    let mut teams: Vec<TeamGroup> = Vec::new();
    let mut team_index: HashMap<String, usize> = HashMap::new();
    let mut individual_entries: Vec<&RawParticipantEntry> = Vec::new();

    for entry in entries {
        match &entry.team {
            Some(team_ref) => {
                let idx = *team_index.entry(team_ref.id.clone()).or_insert_with(|| {
                    teams.push(TeamGroup {
                        id: team_ref.id.clone(),
                        name: team_ref.name.clone(),
                        // Value on the grouping entry; recomputed below only
                        // if it stays absent.
                        registered_at: entry.registered_at,
                        members: Vec::new(),
                    });
                    teams.len() - 1
                });

                let team = &mut teams[idx];
                // A member appears at most once per team; arrival order of
                // first sightings is preserved.
                if !team.has_member(&entry.user_id) {
                    team.members
                        .push(participant_from(entry, hackathon_id, submissions));
                }
            }
            None => individual_entries.push(entry),
        }
    }

    for team in &mut teams {
        if team.registered_at.is_none() {
            team.registered_at = team.members.iter().filter_map(|m| m.registered_at).min();
        }
    }

    // One logical identity per (user, hackathon): a user already carried by
    // a team is not repeated as an individual.
    let team_member_ids: HashSet<&str> = teams
        .iter()
        .flat_map(|t| t.members.iter().map(|m| m.user_id.as_str()))
        .collect();

    let mut seen: HashSet<&str> = HashSet::new();
    let mut individuals = Vec::new();
    for entry in individual_entries {
        if team_member_ids.contains(entry.user_id.as_str()) {
            continue;
        }
        if seen.insert(entry.user_id.as_str()) {
            individuals.push(participant_from(entry, hackathon_id, submissions));
        }
    }

    Roster { teams, individuals }
}

/// Pick the one submission that counts for a user in a hackathon: the most
/// recently submitted wins, ties broken by record id ascending so the choice
/// is deterministic.
pub fn best_submission<'a>(
    user_id: &str,
    hackathon_id: &str,
    submissions: &'a [SubmissionRecord],
) -> Option<&'a SubmissionRecord> {
    submissions
        .iter()
        .filter(|s| s.submitter_id == user_id && s.hackathon_id == hackathon_id)
        .fold(None, |best: Option<&SubmissionRecord>, candidate| {
            match best {
                None => Some(candidate),
                Some(current) => {
                    let wins = candidate.submitted_at > current.submitted_at
                        || (candidate.submitted_at == current.submitted_at
                            && candidate.id < current.id);
                    if wins { Some(candidate) } else { Some(current) }
                }
            }
        })
}

fn participant_from(
    entry: &RawParticipantEntry,
    hackathon_id: &str,
    submissions: &[SubmissionRecord],
) -> ParticipantRecord {
    let submission = best_submission(&entry.user_id, hackathon_id, submissions);
    ParticipantRecord {
        user_id: entry.user_id.clone(),
        first_name: entry.first_name.clone(),
        last_name: entry.last_name.clone(),
        email: entry.email.clone(),
        registered_at: entry.registered_at,
        has_submission: submission.is_some(),
        submission_id: submission.map(|s| s.id.clone()),
    }
}
