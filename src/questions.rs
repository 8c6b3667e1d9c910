//! Question flow.
//!
//! [`build_questions`] turns a [`Config`] into the ordered list of prompts.
//! Every rule a question carries (visibility, filter, validation, live
//! transform) is a pure method over the answers collected so far, so the
//! flow can be exercised without a terminal.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::answers::{AnswerRecord, AnswerValue};
use crate::choices::{Choice, TypeIndex};
use crate::config::{BreakingVisibility, Config, ScopeChoice, SkipQuestion};
use crate::error::ValidationError;
use crate::utils::{paint, Color};

/// Label of the "no scope" entry that heads a closed scope list.
pub const NO_SCOPE_LABEL: &str = "[none]";

const TYPE_MESSAGE: &str = "Select the type of change you're committing:";
const SCOPE_MESSAGE: &str = "Specify a scope:";
const SUBJECT_MESSAGE: &str = "Write a short description:";
const BODY_MESSAGE: &str = "Provide a longer description:";
const IS_BREAKING_MESSAGE: &str = "Are there any breaking changes?";
const BREAKING_MESSAGE: &str =
    "A BREAKING CHANGE commit requires a body. Please enter a longer description of the commit itself:\n";
const ISSUES_MESSAGE: &str = "List any issue closed (#1, #2, ...):";

/// Identifier of a question; also the answer field it fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestionName {
    /// Commit type.
    Type,
    /// Scope.
    Scope,
    /// Subject.
    Subject,
    /// Body.
    Body,
    /// Breaking-change confirmation.
    IsBreaking,
    /// Breaking-change description.
    BreakingBody,
    /// Closed issues.
    Issues,
}

impl QuestionName {
    /// Answer field name.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionName::Type => "type",
            QuestionName::Scope => "scope",
            QuestionName::Subject => "subject",
            QuestionName::Body => "body",
            QuestionName::IsBreaking => "isBreaking",
            QuestionName::BreakingBody => "breakingBody",
            QuestionName::Issues => "issues",
        }
    }
}

impl fmt::Display for QuestionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a question is presented by the prompt engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionKind {
    /// Searchable single-select (custom kind).
    Autocomplete,
    /// Closed single-select list.
    List,
    /// Free text.
    Input,
    /// Free text with a live length counter (custom kind).
    MaxLengthInput,
    /// Yes/no.
    Confirm,
}

impl QuestionKind {
    /// Name the kind is registered under.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::Autocomplete => "autocomplete",
            QuestionKind::List => "list",
            QuestionKind::Input => "input",
            QuestionKind::MaxLengthInput => "maxlength-input",
            QuestionKind::Confirm => "confirm",
        }
    }

    /// Whether the engine has to be taught this kind before prompting.
    pub fn is_custom(&self) -> bool {
        matches!(self, QuestionKind::Autocomplete | QuestionKind::MaxLengthInput)
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subject normalization and budget settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubjectRules {
    /// Header budget, type and scope decoration included.
    pub max_length: usize,
    /// Keep the first character as typed.
    pub disable_lower_case: bool,
}

#[derive(Debug, Clone)]
enum Rules {
    Always,
    Skippable { skipped: bool },
    Subject(SubjectRules),
    BreakingBody {
        skipped: bool,
        visibility: BreakingVisibility,
    },
}

/// A single prompt in the flow.
#[derive(Debug, Clone)]
pub struct Question {
    /// Answer field this question fills.
    pub name: QuestionName,
    /// Presentation kind.
    pub kind: QuestionKind,
    /// Prompt text.
    pub message: String,
    /// Options of a [`QuestionKind::List`] question.
    pub choices: Vec<ScopeChoice>,
    /// Value used when the user just confirms.
    pub default: Option<AnswerValue>,
    /// Budget shown by a [`QuestionKind::MaxLengthInput`] question.
    pub max_length: Option<usize>,
    rules: Rules,
    type_index: Option<TypeIndex>,
}

impl Question {
    fn new(name: QuestionName, kind: QuestionKind, message: String, rules: Rules) -> Self {
        Self {
            name,
            kind,
            message,
            choices: Vec::new(),
            default: None,
            max_length: None,
            rules,
            type_index: None,
        }
    }

    /// Whether the question is asked given the answers so far.
    pub fn is_visible(&self, answers: &AnswerRecord) -> bool {
        match &self.rules {
            Rules::Always | Rules::Subject(_) => true,
            Rules::Skippable { skipped } => !skipped,
            Rules::BreakingBody {
                skipped,
                visibility,
            } => match visibility {
                BreakingVisibility::Inherited => {
                    (answers.is_breaking && answers.body.is_empty()) || !skipped
                }
                BreakingVisibility::Strict => answers.is_breaking && !skipped,
            },
        }
    }

    /// Normalizes raw input before it is validated and stored.
    pub fn filter(&self, input: &str) -> String {
        match &self.rules {
            Rules::Subject(rules) => filter_subject(input, rules.disable_lower_case),
            _ => input.to_string(),
        }
    }

    /// Checks an answer against the answers collected so far.
    pub fn validate(&self, input: &str, answers: &AnswerRecord) -> Result<(), ValidationError> {
        match &self.rules {
            Rules::Subject(rules) => {
                let subject = filter_subject(input, rules.disable_lower_case);
                if subject.is_empty() {
                    return Err(ValidationError::new("subject is required"));
                }
                let budget = max_summary_length(rules.max_length, &answers.r#type.name, &answers.scope);
                let length = subject.chars().count();
                if length > budget {
                    return Err(ValidationError::new(format!(
                        "length must be ≤ {budget}, current length {length}"
                    )));
                }
                Ok(())
            }
            Rules::BreakingBody { .. } => {
                if answers.is_breaking && input.trim().is_empty() {
                    return Err(ValidationError::new("Body is required for BREAKING CHANGE"));
                }
                Ok(())
            }
            Rules::Always | Rules::Skippable { .. } => Ok(()),
        }
    }

    /// Decorates input while it is being typed. Display only.
    pub fn transform(&self, input: &str, answers: &AnswerRecord) -> String {
        match &self.rules {
            Rules::Subject(rules) => {
                let length = filter_subject(input, rules.disable_lower_case).chars().count();
                let budget = max_summary_length(rules.max_length, &answers.r#type.name, &answers.scope);
                let color = if length <= budget {
                    Color::Green
                } else {
                    Color::Red
                };
                paint(&format!("({length}) {input}"), color)
            }
            _ => input.to_string(),
        }
    }

    /// Candidates for a searchable question, filtered by `query`.
    pub fn source(&self, query: &str) -> Vec<&Choice> {
        self.type_index
            .as_ref()
            .map(|index| index.search(query))
            .unwrap_or_default()
    }
}

/// Trims the subject, lowercases its first character unless disabled and
/// drops trailing periods. Applying it twice changes nothing.
pub fn filter_subject(subject: &str, disable_lower_case: bool) -> String {
    let trimmed = subject.trim();

    let mut out = String::with_capacity(trimmed.len());
    let mut chars = trimmed.chars();
    if let Some(first) = chars.next() {
        if disable_lower_case {
            out.push(first);
        } else {
            out.extend(first.to_lowercase());
        }
        out.push_str(chars.as_str());
    }

    out.trim_end_matches(|c: char| c == '.' || c.is_whitespace())
        .to_string()
}

/// Characters left for the subject once the header decoration is paid for.
///
/// The decoration is the type name and a two-character separator, plus the
/// scope and its parentheses when a scope is set. The scope is measured
/// trimmed, the same way the header renders it.
pub fn max_summary_length(subject_max_length: usize, type_name: &str, scope: &str) -> usize {
    let scope = scope.trim();
    let scope_overhead = if scope.is_empty() {
        0
    } else {
        scope.chars().count() + 2
    };
    subject_max_length.saturating_sub(type_name.chars().count() + 2 + scope_overhead)
}

/// Builds the ordered question flow for a configuration.
pub fn build_questions(config: &Config) -> Vec<Question> {
    let messages = &config.questions;
    let message = |custom: &Option<String>, fallback: &str| {
        custom.clone().unwrap_or_else(|| fallback.to_string())
    };

    let mut type_question = Question::new(
        QuestionName::Type,
        QuestionKind::Autocomplete,
        message(&messages.r#type, TYPE_MESSAGE),
        Rules::Always,
    );
    type_question.type_index = Some(TypeIndex::from_config(config));

    let mut scope = Question::new(
        QuestionName::Scope,
        if config.scopes.is_some() {
            QuestionKind::List
        } else {
            QuestionKind::Input
        },
        message(&messages.scope, SCOPE_MESSAGE),
        Rules::Skippable {
            skipped: config.is_skipped(SkipQuestion::Scope),
        },
    );
    if let Some(scopes) = &config.scopes {
        scope.choices = std::iter::once(ScopeChoice::new(NO_SCOPE_LABEL, ""))
            .chain(scopes.iter().cloned())
            .collect();
    }

    let mut subject = Question::new(
        QuestionName::Subject,
        QuestionKind::MaxLengthInput,
        message(&messages.subject, SUBJECT_MESSAGE),
        Rules::Subject(SubjectRules {
            max_length: config.subject_max_length,
            disable_lower_case: config.disable_subject_lower_case,
        }),
    );
    subject.max_length = Some(config.subject_max_length);

    let body = Question::new(
        QuestionName::Body,
        QuestionKind::Input,
        message(&messages.body, BODY_MESSAGE),
        Rules::Skippable {
            skipped: config.is_skipped(SkipQuestion::Body),
        },
    );

    let mut is_breaking = Question::new(
        QuestionName::IsBreaking,
        QuestionKind::Confirm,
        IS_BREAKING_MESSAGE.to_string(),
        Rules::Always,
    );
    is_breaking.default = Some(AnswerValue::Bool(false));

    let breaking_body = Question::new(
        QuestionName::BreakingBody,
        QuestionKind::Input,
        message(&messages.breaking, BREAKING_MESSAGE),
        Rules::BreakingBody {
            skipped: config.is_skipped(SkipQuestion::Breaking),
            visibility: config.breaking_visibility,
        },
    );

    let issues = Question::new(
        QuestionName::Issues,
        QuestionKind::Input,
        message(&messages.issues, ISSUES_MESSAGE),
        Rules::Skippable {
            skipped: config.is_skipped(SkipQuestion::Issues),
        },
    );

    vec![
        type_question,
        scope,
        subject,
        body,
        is_breaking,
        breaking_body,
        issues,
    ]
}
