//! Prompter entry point.
//!
//! A host commit tool hands over a [`PromptEngine`] and an `accept`
//! callback. The prompter teaches the engine the custom question kinds,
//! asks the configured questions and passes the rendered message on.

pub mod scripted;

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use anyhow::{Context, Result};
use tracing::debug;

use crate::answers::AnswerRecord;
use crate::config::{Config, ConfigResolver};
use crate::message::MessageFormatter;
use crate::questions::{build_questions, Question, QuestionKind};

pub use scripted::ScriptedPromptEngine;

/// Question kinds every engine has to support on top of the standard ones.
pub const CUSTOM_KINDS: [QuestionKind; 2] =
    [QuestionKind::Autocomplete, QuestionKind::MaxLengthInput];

/// Capability that turns a list of questions into an answer record.
pub trait PromptEngine: Send {
    /// Enables a custom question kind before any question is asked.
    ///
    /// Only the kind is passed, never an implementation. The kind fully names
    /// the behaviour the engine has to provide, and the engine binds its own
    /// widget for it. [`QuestionKind::Autocomplete`] is a searchable list
    /// backed by [`Question::source`]. [`QuestionKind::MaxLengthInput`] is a
    /// free-text input whose live decoration comes from
    /// [`Question::transform`]. An engine that does not support a registered
    /// kind should reject it when it is asked, not here.
    fn register_prompt(&mut self, kind: QuestionKind);

    /// Asks `questions` in order and returns the collected answers.
    ///
    /// Resolves once, after the last question; a failure means no answers.
    fn prompt<'a>(
        &'a mut self,
        questions: &'a [Question],
    ) -> Pin<Box<dyn Future<Output = Result<AnswerRecord>> + Send + 'a>>;
}

/// Runs one prompting session for a working directory.
pub struct Prompter {
    cwd: PathBuf,
    config: Option<Config>,
    formatter: MessageFormatter,
}

impl Prompter {
    /// Creates a prompter that resolves its configuration from `cwd` and
    /// sizes the message to the current terminal.
    pub fn new(cwd: &Path) -> Self {
        Self {
            cwd: cwd.to_path_buf(),
            config: None,
            formatter: MessageFormatter::for_terminal(),
        }
    }

    /// Creates a prompter for the process working directory.
    pub fn from_current_dir() -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        Ok(Self::new(&cwd))
    }

    /// Uses `config` as-is instead of resolving one from disk.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Replaces the message formatter.
    pub fn with_formatter(mut self, formatter: MessageFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Configuration the session runs with.
    pub fn config(&self) -> Config {
        match &self.config {
            Some(config) => config.clone(),
            None => ConfigResolver::new(&self.cwd).resolve().config,
        }
    }

    /// Registers the custom kinds, asks the questions, formats the answers
    /// and hands the message to `accept`.
    ///
    /// `accept` is not called when the engine fails.
    pub async fn prompter<E, F>(&self, engine: &mut E, accept: F) -> Result<()>
    where
        E: PromptEngine + ?Sized,
        F: FnOnce(String),
    {
        for kind in CUSTOM_KINDS {
            engine.register_prompt(kind);
        }

        let config = self.config();
        let questions = build_questions(&config);
        debug!(
            "Prompting {} questions over {} commit types",
            questions.len(),
            config.types.len()
        );

        let answers = engine
            .prompt(&questions)
            .await
            .context("Failed to collect commit answers")?;
        debug!("Selected commit type: {:?}", answers.r#type.name);

        accept(self.formatter.format(&answers, &config));
        Ok(())
    }
}

/// Runs a session for the process working directory.
pub async fn prompter<E, F>(engine: &mut E, accept: F) -> Result<()>
where
    E: PromptEngine + ?Sized,
    F: FnOnce(String),
{
    Prompter::from_current_dir()?.prompter(engine, accept).await
}
