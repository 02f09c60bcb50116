//! Rule engine errors

use thiserror::Error;

/// Error raised by the rule engine for malformed input
///
/// Anything reaching the engine should already have been validated by the
/// caller, so this signals a programming error rather than bad user input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl RulesError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        RulesError::InvalidArgument(message.into())
    }
}

pub type RulesResult<T> = Result<T, RulesError>;
