//! Formatting error types.
//!
//! These are raised by the formatting engines themselves and reach the
//! harness unmodified.

/// Errors that can occur while formatting a message.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// A `{` has no closing `}`
    #[error("Unmatched brace at offset {offset}")]
    UnmatchedBrace { offset: usize },

    /// Placeholder content is not a non-negative argument index
    #[error("Invalid argument index '{0}'")]
    InvalidIndex(String),

    /// A `%s` marker found no argument left to consume
    #[error("Missing argument for conversion {position}")]
    MissingArgument { position: usize },

    /// A `%` conversion other than `%s`, `%%` or `%n`
    #[error("Unknown conversion '%{0}'")]
    UnknownConversion(String),

    /// A named parameter was rendered without a bound value
    #[error("No value bound for parameter '{0}'")]
    UnboundName(String),

    /// The destination of a formatted message refused the output
    #[error("Could not write formatted message")]
    Write,
}

impl From<std::fmt::Error> for FormatError {
    fn from(_: std::fmt::Error) -> Self {
        FormatError::Write
    }
}

/// Requested strategy name is not one of the known strategies.
#[derive(Debug, thiserror::Error)]
#[error("Unknown strategy: {name}")]
pub struct UnknownStrategy {
    pub name: String,
}
