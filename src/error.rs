use std::fmt;

/// Errors produced while reading deadline values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeadlineError {
    /// A non-empty deadline or edit value that does not name a valid instant.
    InvalidDeadline { input: String, reason: String },
}

impl DeadlineError {
    pub(crate) fn invalid(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidDeadline {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for DeadlineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDeadline { input, reason } => {
                write!(f, "invalid deadline '{input}': {reason}")
            }
        }
    }
}

impl std::error::Error for DeadlineError {}

pub type Result<T> = std::result::Result<T, DeadlineError>;
