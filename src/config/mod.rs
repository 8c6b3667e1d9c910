//! Prompter configuration and layered resolution.
//!
//! A resolved [`Config`] is built in a fixed order: built-in defaults, then
//! the fields of at most one discovered [`ConfigLayer`], then the header
//! template, which is always derived from the effective `conventional` flag
//! and can never be set from a file.

pub mod discovery;

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::catalog::TypeCatalog;

pub use discovery::{find_up, ConfigResolver};

/// Key under the `config` object of a manifest or rc file.
pub const NAMESPACE: &str = "@paalan/cz-emoji";

/// Unscoped key accepted when [`NAMESPACE`] is absent.
pub const NAMESPACE_ALIAS: &str = "cz-emoji";

/// Header template used when `conventional` is enabled.
pub const CONVENTIONAL_FORMAT: &str = "{emoji} {type}{scope}: {subject}";

/// Header template used when `conventional` is disabled.
pub const DEFAULT_FORMAT: &str = "{emoji} {scope} {subject}";

/// Default subject budget, header overhead included.
pub const DEFAULT_SUBJECT_MAX_LENGTH: usize = 75;

/// Questions that can be suppressed through `skipQuestions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkipQuestion {
    /// The scope question.
    Scope,
    /// The long description question.
    Body,
    /// The breaking-change description question.
    Breaking,
    /// The closed-issues question.
    Issues,
    /// Anything else found in a config file; never matches a question.
    #[serde(other)]
    Unknown,
}

/// A predefined scope offered when scopes are a closed list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeChoice {
    /// Label shown in the list.
    pub name: String,
    /// Value recorded in the answer.
    pub value: String,
}

impl ScopeChoice {
    /// Creates a scope choice.
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

/// Per-question prompt text overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionMessages {
    /// Type selector message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    /// Scope message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Subject message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Body message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Breaking-change body message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breaking: Option<String>,
    /// Closed issues message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issues: Option<String>,
}

/// When the breaking-change body question is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakingVisibility {
    /// `(isBreaking && body is empty) || breaking is not skipped`.
    #[default]
    Inherited,
    /// `isBreaking && breaking is not skipped`.
    Strict,
}

/// Fully resolved prompter configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Commit types offered by the type selector.
    pub types: TypeCatalog,
    /// Render the literal symbol instead of the textual code.
    pub emoji_symbol: bool,
    /// Questions to suppress.
    pub skip_questions: Vec<SkipQuestion>,
    /// Header budget the subject has to fit into.
    pub subject_max_length: usize,
    /// Keep the first character of the subject as typed.
    pub disable_subject_lower_case: bool,
    /// Use the conventional header template.
    pub conventional: bool,
    /// Closed list of scopes, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scopes: Option<Vec<ScopeChoice>>,
    /// Prompt text overrides.
    pub questions: QuestionMessages,
    /// Breaking-change body visibility policy.
    pub breaking_visibility: BreakingVisibility,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            types: TypeCatalog::builtin(),
            emoji_symbol: true,
            skip_questions: Vec::new(),
            subject_max_length: DEFAULT_SUBJECT_MAX_LENGTH,
            disable_subject_lower_case: false,
            conventional: true,
            scopes: None,
            questions: QuestionMessages::default(),
            breaking_visibility: BreakingVisibility::default(),
        }
    }
}

impl Config {
    /// Resolves the configuration for a working directory.
    ///
    /// Never fails: unreadable or malformed files fall through to the next
    /// lookup and ultimately to the built-in defaults.
    pub fn resolve(cwd: &Path) -> Self {
        ConfigResolver::new(cwd).resolve().config
    }

    /// Applies a loaded layer over `self`, field by field.
    pub fn merged_with(mut self, layer: ConfigLayer) -> Self {
        if let Some(types) = layer.types {
            self.types = types;
        }
        if let Some(emoji_symbol) = layer.emoji_symbol {
            self.emoji_symbol = emoji_symbol;
        }
        if let Some(skip_questions) = layer.skip_questions {
            self.skip_questions = skip_questions;
        }
        match layer.subject_max_length {
            Some(0) => tracing::warn!("Ignoring subjectMaxLength of 0"),
            Some(max) => self.subject_max_length = max,
            None => {}
        }
        if let Some(disable) = layer.disable_subject_lower_case {
            self.disable_subject_lower_case = disable;
        }
        if let Some(conventional) = layer.conventional {
            self.conventional = conventional;
        }
        if layer.scopes.is_some() {
            self.scopes = layer.scopes;
        }
        if let Some(questions) = layer.questions {
            self.questions = questions;
        }
        if let Some(visibility) = layer.breaking_visibility {
            self.breaking_visibility = visibility;
        }
        self
    }

    /// Header template derived from [`Config::conventional`].
    pub fn format(&self) -> &'static str {
        if self.conventional {
            CONVENTIONAL_FORMAT
        } else {
            DEFAULT_FORMAT
        }
    }

    /// Whether a question was suppressed through `skipQuestions`.
    pub fn is_skipped(&self, question: SkipQuestion) -> bool {
        self.skip_questions.contains(&question)
    }
}

/// A partial configuration as found in a manifest or rc file.
///
/// Unknown keys, including a stray `format`, are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigLayer {
    /// Replacement type catalog.
    #[serde(default)]
    pub types: Option<TypeCatalog>,
    /// Symbol vs code display.
    #[serde(default)]
    pub emoji_symbol: Option<bool>,
    /// Suppressed questions.
    #[serde(default)]
    pub skip_questions: Option<Vec<SkipQuestion>>,
    /// Subject budget.
    #[serde(default)]
    pub subject_max_length: Option<usize>,
    /// Disable first-character lowercasing.
    #[serde(default)]
    pub disable_subject_lower_case: Option<bool>,
    /// Template family.
    #[serde(default)]
    pub conventional: Option<bool>,
    /// Closed scope list.
    #[serde(default)]
    pub scopes: Option<Vec<ScopeChoice>>,
    /// Prompt text overrides.
    #[serde(default)]
    pub questions: Option<QuestionMessages>,
    /// Breaking-change body visibility policy.
    #[serde(default)]
    pub breaking_visibility: Option<BreakingVisibility>,
}

impl ConfigLayer {
    /// Extracts the namespaced layer from a manifest or rc document.
    ///
    /// The section lives under `config["@paalan/cz-emoji"]`, with
    /// `config["cz-emoji"]` as a fallback. Returns `Ok(None)` when the
    /// document parses but carries neither object.
    pub fn from_json_str(text: &str) -> Result<Option<Self>> {
        let document: serde_json::Value =
            serde_json::from_str(text).context("Failed to parse config document as JSON")?;

        let Some(config) = document.get("config") else {
            return Ok(None);
        };
        let Some((key, section)) = [NAMESPACE, NAMESPACE_ALIAS]
            .into_iter()
            .find_map(|key| config.get(key).filter(|s| !s.is_null()).map(|s| (key, s)))
        else {
            return Ok(None);
        };

        let layer = serde_json::from_value(section.clone())
            .with_context(|| format!("Invalid `config.{key}` section"))?;
        Ok(Some(layer))
    }
}

/// Where the applied configuration layer came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// A `package.json` found by upward search.
    Manifest(PathBuf),
    /// A `.czrc` found by upward search or in the working directory.
    RcFile(PathBuf),
    /// Nothing usable was found.
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Manifest(path) => write!(f, "manifest {}", path.display()),
            ConfigSource::RcFile(path) => write!(f, "rc file {}", path.display()),
            ConfigSource::Defaults => write!(f, "built-in defaults"),
        }
    }
}

/// A configuration together with its source.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The merged configuration.
    pub config: Config,
    /// Which lookup supplied the user layer.
    pub source: ConfigSource,
}
