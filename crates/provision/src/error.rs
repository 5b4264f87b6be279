//! Error kinds that end a provisioning run.
//!
//! Every kind is fatal and none is retried. The first two stop the run
//! before any step executes; [`ProvisionError::StepFailed`] stops it at the
//! failing step.

use std::fmt;

/// Coarse category of a run failure, used for exit codes and advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Host is not the supported OS/version.
    UnsupportedPlatform,
    /// Apply mode without root.
    InsufficientPrivilege,
    /// A pipeline step failed.
    StepFailed,
}

impl ErrorKind {
    /// Get a user-friendly description of this error kind.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::UnsupportedPlatform => "Unsupported platform",
            Self::InsufficientPrivilege => "Insufficient privilege",
            Self::StepFailed => "Provisioning step failed",
        }
    }

    /// Get actionable advice for resolving this error kind.
    #[must_use]
    pub fn advice(&self) -> &'static str {
        match self {
            Self::UnsupportedPlatform => {
                "Run on the supported distribution, or adjust [platform] in the config file"
            }
            Self::InsufficientPrivilege => "Re-run with sudo, e.g. `sudo httpd-setup --apply`",
            Self::StepFailed => "Fix the reported error and re-run; completed steps will be skipped",
        }
    }

    /// Process exit status for this kind. Always non-zero.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::StepFailed => 1,
            Self::UnsupportedPlatform => 2,
            Self::InsufficientPrivilege => 3,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Errors that abort a provisioning run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProvisionError {
    /// The host failed the platform check.
    #[error("unsupported platform: {reason}")]
    UnsupportedPlatform {
        /// What was detected and what was expected.
        reason: String,
    },

    /// Apply mode was requested by a non-root user.
    #[error("insufficient privilege: apply mode requires root (effective uid {euid})")]
    InsufficientPrivilege {
        /// Effective uid of the process.
        euid: u32,
    },

    /// A step's action failed.
    #[error("step '{step}' failed: {detail}")]
    StepFailed {
        /// Name of the failing step.
        step: String,
        /// Underlying OS error detail.
        detail: String,
    },
}

impl ProvisionError {
    /// Get the kind of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedPlatform { .. } => ErrorKind::UnsupportedPlatform,
            Self::InsufficientPrivilege { .. } => ErrorKind::InsufficientPrivilege,
            Self::StepFailed { .. } => ErrorKind::StepFailed,
        }
    }

    /// Whether the error happened before any step ran.
    #[must_use]
    pub fn is_preflight(&self) -> bool {
        !matches!(self, Self::StepFailed { .. })
    }

    #[must_use]
    pub fn exit_code(&self) -> i32 {
        self.kind().exit_code()
    }
}
