use thiserror::Error;

/// Reason a raw file entry was rejected by the decoder.
///
/// Rejections are always non-fatal: the entry is dropped from the output
/// list and logged, never substituted with a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileRejection {
    #[error("Malformed file JSON: {0}")]
    ParseError(String),

    #[error("Unrecognized file string format: {0}")]
    UnknownStringFormat(String),

    #[error("File entry has neither 'downloadUrl' nor 'url'")]
    MissingUrl,

    #[error("Unsupported URL scheme in '{0}' (only http/https are served)")]
    InvalidUrlScheme(String),
}

/// Failure surfaced by a collaborator call or by a gate check on a
/// mutating action.
///
/// `AuthExpired` is the only kind that forces a non-local reaction (session
/// teardown); everything else is either recovered per-source or surfaced
/// verbatim to the caller.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Already registered for this hackathon")]
    AlreadyRegistered,

    #[error("Registration is closed")]
    RegistrationClosed,

    #[error("Submission deadline has passed")]
    DeadlinePassed,

    #[error("Not registered for this hackathon")]
    NotRegistered,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Session expired")]
    AuthExpired,
}

impl ApiError {
    /// Machine-readable error code for the presentation layer.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Fetch(_) => "FETCH_FAILURE",
            Self::AlreadyRegistered => "ALREADY_REGISTERED",
            Self::RegistrationClosed => "REGISTRATION_CLOSED",
            Self::DeadlinePassed => "DEADLINE_PASSED",
            Self::NotRegistered => "NOT_REGISTERED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::AuthExpired => "AUTH_EXPIRED",
        }
    }

    /// Returns true if this failure must tear down the session rather than
    /// be handled where it occurred.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::AuthExpired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(ApiError::DeadlinePassed.code(), "DEADLINE_PASSED");
        assert_eq!(ApiError::NotRegistered.code(), "NOT_REGISTERED");
        assert_eq!(ApiError::AuthExpired.code(), "AUTH_EXPIRED");
        assert!(ApiError::AuthExpired.is_auth_expired());
        assert!(!ApiError::Fetch("timeout".into()).is_auth_expired());
    }
}
