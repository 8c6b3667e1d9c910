//! Non-interactive prompt engine fed from a recorded answer script.
//!
//! A script is a JSON object keyed by question name:
//!
//! ```json
//! {"type": "feat", "scope": "core", "subject": "Add parser", "isBreaking": false}
//! ```
//!
//! Questions are processed the way an interactive engine would handle them:
//! hidden questions are skipped, answers are filtered and then validated
//! against the answers given so far. A missing answer falls back to what
//! pressing Enter would produce. Since nothing can be asked again, the
//! first rejected answer ends the session.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;

use anyhow::{Context, Result};
use tracing::debug;

use super::PromptEngine;
use crate::answers::{AnswerRecord, AnswerValue};
use crate::error::PrompterError;
use crate::questions::{Question, QuestionKind, QuestionName};

/// Engine that answers from a fixed script.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPromptEngine {
    script: HashMap<QuestionName, AnswerValue>,
    registered: HashSet<QuestionKind>,
    asked: Vec<QuestionName>,
}

impl ScriptedPromptEngine {
    /// Creates an engine answering from `script`.
    pub fn new(script: HashMap<QuestionName, AnswerValue>) -> Self {
        Self {
            script,
            ..Self::default()
        }
    }

    /// Parses a JSON answer script.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let script = serde_json::from_str(text).context("Failed to parse answer script")?;
        Ok(Self::new(script))
    }

    /// Reads a JSON answer script from disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read answer script: {}", path.display()))?;
        Self::from_json_str(&text)
            .with_context(|| format!("Invalid answer script: {}", path.display()))
    }

    /// Adds or replaces one scripted answer.
    pub fn with_answer(mut self, question: QuestionName, value: AnswerValue) -> Self {
        self.script.insert(question, value);
        self
    }

    /// Questions that were shown, in order.
    pub fn asked(&self) -> &[QuestionName] {
        &self.asked
    }

    /// Whether a custom kind has been registered.
    pub fn is_registered(&self, kind: QuestionKind) -> bool {
        self.registered.contains(&kind)
    }

    fn run(&mut self, questions: &[Question]) -> Result<AnswerRecord, PrompterError> {
        let mut answers = AnswerRecord::default();
        self.asked.clear();

        for question in questions {
            if question.kind.is_custom() && !self.registered.contains(&question.kind) {
                return Err(PrompterError::UnregisteredKind(
                    question.kind.as_str().to_string(),
                ));
            }
            if !question.is_visible(&answers) {
                debug!("Skipping hidden question `{}`", question.name);
                continue;
            }

            let raw = match self.script.get(&question.name) {
                Some(value) => value.clone(),
                None => enter_value(question)?,
            };
            let value = accept_answer(question, raw, &answers)?;

            answers.set(question.name, value);
            self.asked.push(question.name);
        }

        Ok(answers)
    }
}

impl PromptEngine for ScriptedPromptEngine {
    fn register_prompt(&mut self, kind: QuestionKind) {
        self.registered.insert(kind);
    }

    fn prompt<'a>(
        &'a mut self,
        questions: &'a [Question],
    ) -> Pin<Box<dyn Future<Output = Result<AnswerRecord>> + Send + 'a>> {
        Box::pin(async move { self.run(questions).map_err(anyhow::Error::from) })
    }
}

/// Value an interactive engine records when the user just presses Enter.
fn enter_value(question: &Question) -> Result<AnswerValue, PrompterError> {
    if let Some(default) = &question.default {
        return Ok(default.clone());
    }
    match question.kind {
        QuestionKind::Input => Ok(AnswerValue::Text(String::new())),
        QuestionKind::List => question
            .choices
            .first()
            .map(|choice| AnswerValue::Text(choice.value.clone()))
            .ok_or(PrompterError::MissingAnswer(question.name)),
        QuestionKind::Confirm => Ok(AnswerValue::Bool(false)),
        QuestionKind::Autocomplete | QuestionKind::MaxLengthInput => {
            Err(PrompterError::MissingAnswer(question.name))
        }
    }
}

/// Maps a raw scripted value onto what the question would record.
fn accept_answer(
    question: &Question,
    raw: AnswerValue,
    answers: &AnswerRecord,
) -> Result<AnswerValue, PrompterError> {
    match question.kind {
        QuestionKind::Autocomplete => pick_type(question, raw),
        QuestionKind::List => pick_choice(question, raw),
        QuestionKind::Input | QuestionKind::MaxLengthInput => {
            let text = match raw {
                AnswerValue::Text(text) => text,
                AnswerValue::Bool(flag) => flag.to_string(),
                AnswerValue::Type(answer) => answer.name,
            };
            let filtered = question.filter(&text);
            question
                .validate(&filtered, answers)
                .map_err(|source| PrompterError::Validation {
                    question: question.name,
                    source,
                })?;
            Ok(AnswerValue::Text(filtered))
        }
        QuestionKind::Confirm => Ok(raw),
    }
}

/// Resolves a type selection. Text is treated as a search query and the
/// best hit is taken; a full type answer must name a known type.
fn pick_type(question: &Question, raw: AnswerValue) -> Result<AnswerValue, PrompterError> {
    let unknown = |value: String| PrompterError::UnknownChoice {
        question: question.name,
        value,
    };

    match raw {
        AnswerValue::Text(query) => question
            .source(&query)
            .first()
            .map(|choice| AnswerValue::Type(choice.value.clone()))
            .ok_or_else(|| unknown(query)),
        AnswerValue::Type(answer) => question
            .source("")
            .into_iter()
            .find(|choice| choice.value.name == answer.name)
            .map(|choice| AnswerValue::Type(choice.value.clone()))
            .ok_or_else(|| unknown(answer.name)),
        AnswerValue::Bool(flag) => Err(unknown(flag.to_string())),
    }
}

/// Resolves a closed-list selection by value or by display name.
fn pick_choice(question: &Question, raw: AnswerValue) -> Result<AnswerValue, PrompterError> {
    let wanted = match raw {
        AnswerValue::Text(text) => text,
        AnswerValue::Bool(flag) => flag.to_string(),
        AnswerValue::Type(answer) => answer.name,
    };

    question
        .choices
        .iter()
        .find(|choice| choice.value == wanted || choice.name == wanted)
        .map(|choice| AnswerValue::Text(choice.value.clone()))
        .ok_or(PrompterError::UnknownChoice {
            question: question.name,
            value: wanted,
        })
}
