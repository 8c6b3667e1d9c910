//! Prompter error types.

use thiserror::Error;

use crate::questions::QuestionName;

/// An answer was rejected by a question's validation rule.
///
/// Interactive engines show the message and ask again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    /// Message shown to the user.
    pub message: String,
}

impl ValidationError {
    /// Creates a validation error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Failures that abort a prompting session.
#[derive(Error, Debug)]
pub enum PrompterError {
    /// An answer failed validation and the engine cannot ask again.
    #[error("Invalid answer for `{question}`: {source}")]
    Validation {
        /// Question that rejected the answer.
        question: QuestionName,
        /// Rejection reason.
        #[source]
        source: ValidationError,
    },

    /// A visible question without a default received no answer.
    #[error("No answer provided for `{0}`")]
    MissingAnswer(QuestionName),

    /// A selection question received a value that is not one of its choices.
    #[error("`{value}` is not a valid choice for `{question}`")]
    UnknownChoice {
        /// Selection question.
        question: QuestionName,
        /// Offending value.
        value: String,
    },

    /// A custom question kind was used before being registered.
    #[error("Prompt kind `{0}` is not registered")]
    UnregisteredKind(String),
}
