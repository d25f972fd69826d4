//! Error taxonomy for the shell controller.
//!
//! None of these are fatal: every component recovers locally and reports the
//! failure to the user through the operation log.

use super::targets::TargetId;

/// Errors surfaced by the shell's state components
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellError {
    /// Selection of a target id that is not registered
    NotFound(TargetId),
    /// Trigger pressed while no target is selected
    NoActiveTarget,
    /// Trigger pressed while an operation is still in flight
    AlreadyRunning,
    /// The external pipeline reported a failure
    OperationFailed(String),
    /// Two configured targets share the same id
    DuplicateTarget(TargetId),
    /// Configuration could not be read or parsed
    Config(String),
}

impl std::fmt::Display for ShellError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShellError::NotFound(id) => write!(f, "unknown target '{}'", id),
            ShellError::NoActiveTarget => write!(f, "no target selected"),
            ShellError::AlreadyRunning => write!(f, "an operation is already running"),
            ShellError::OperationFailed(reason) => write!(f, "{}", reason),
            ShellError::DuplicateTarget(id) => write!(f, "duplicate target id '{}'", id),
            ShellError::Config(msg) => write!(f, "configuration error: {}", msg),
        }
    }
}

impl std::error::Error for ShellError {}
