use thiserror::Error;

/// Failures of the system as a whole, as opposed to a single request.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Invalid configuration for {key}: {reason}")]
    Config { key: &'static str, reason: String },
    #[error("Actor task failed: {0}")]
    TaskFailed(String),
}
