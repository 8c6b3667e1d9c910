//! Answers collected by a prompt engine.

use serde::{Deserialize, Serialize};

use crate::questions::QuestionName;

/// The selected commit type as recorded in the answers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeAnswer {
    /// Symbol followed by a space, or the textual code.
    pub emoji: String,
    /// Type name.
    pub name: String,
}

impl TypeAnswer {
    /// Creates a type answer.
    pub fn new(emoji: &str, name: &str) -> Self {
        Self {
            emoji: emoji.to_string(),
            name: name.to_string(),
        }
    }
}

/// Everything the user answered during one prompting session.
///
/// Starts empty and is filled one question at a time; questions that were
/// not shown keep their default value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnswerRecord {
    /// Selected commit type.
    pub r#type: TypeAnswer,
    /// Scope, possibly empty.
    pub scope: String,
    /// Short description.
    pub subject: String,
    /// Longer description.
    pub body: String,
    /// Whether the change breaks compatibility.
    pub is_breaking: bool,
    /// Description of the breaking change.
    pub breaking_body: String,
    /// Free text listing closed issues.
    pub issues: String,
}

/// A single answer value as produced by a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// Yes/no confirmation.
    Bool(bool),
    /// Free text or a selected scope value.
    Text(String),
    /// A selected commit type.
    Type(TypeAnswer),
}

impl AnswerRecord {
    /// Stores `value` under `question`.
    ///
    /// Values of the wrong shape are coerced: text for the type question is
    /// taken as a type name, booleans for text questions become empty.
    pub fn set(&mut self, question: QuestionName, value: AnswerValue) {
        match question {
            QuestionName::Type => {
                self.r#type = match value {
                    AnswerValue::Type(answer) => answer,
                    AnswerValue::Text(name) => TypeAnswer {
                        emoji: String::new(),
                        name,
                    },
                    AnswerValue::Bool(_) => TypeAnswer::default(),
                }
            }
            QuestionName::IsBreaking => {
                self.is_breaking = match value {
                    AnswerValue::Bool(flag) => flag,
                    AnswerValue::Text(text) => {
                        matches!(text.trim().to_lowercase().as_str(), "y" | "yes" | "true")
                    }
                    AnswerValue::Type(_) => false,
                }
            }
            _ => {
                let text = match value {
                    AnswerValue::Text(text) => text,
                    AnswerValue::Type(answer) => answer.name,
                    AnswerValue::Bool(_) => String::new(),
                };
                match question {
                    QuestionName::Scope => self.scope = text,
                    QuestionName::Subject => self.subject = text,
                    QuestionName::Body => self.body = text,
                    QuestionName::BreakingBody => self.breaking_body = text,
                    QuestionName::Issues => self.issues = text,
                    QuestionName::Type | QuestionName::IsBreaking => {}
                }
            }
        }
    }
}
