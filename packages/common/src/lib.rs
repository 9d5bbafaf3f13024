pub mod hackathon_status;
pub mod submission_status;
pub mod timeline;

pub use hackathon_status::HackathonStatus;
pub use submission_status::SubmissionStatus;
pub use timeline::{StepState, SubmissionPhase, TimelineStep};
