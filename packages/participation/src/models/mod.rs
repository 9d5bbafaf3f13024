pub mod hackathon;
pub mod participant;
pub mod submission;

pub use hackathon::{HackathonSummary, TeamMemberRef, TeamRoster};
pub use participant::{ParticipantRecord, RawParticipantEntry, TeamGroup, TeamRef};
pub use submission::{SubmissionPayload, SubmissionRecord, validate_submission_payload};
