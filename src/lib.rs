//! # cz-emoji
//!
//! Interactive emoji commit message prompter.
//!
//! The crate turns a resolved [`Config`] into an ordered list of
//! [`Question`]s, lets a [`PromptEngine`] collect the answers and renders
//! them into a commit message such as `✨ feat(core): add new parser`.
//!
//! ## Quick Start
//!
//! ```rust
//! use cz_emoji::{AnswerRecord, Config, MessageFormatter, TypeAnswer};
//!
//! let answers = AnswerRecord {
//!     r#type: TypeAnswer::new("✨ ", "feat"),
//!     scope: "core".into(),
//!     subject: "Add new parser.".into(),
//!     ..Default::default()
//! };
//! let message = MessageFormatter::default().format(&answers, &Config::default());
//! assert_eq!(message, "✨ feat(core): add new parser");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod answers;
pub mod catalog;
pub mod choices;
pub mod cli;
pub mod config;
pub mod error;
pub mod message;
pub mod prompt;
pub mod questions;
pub mod utils;

pub use crate::answers::{AnswerRecord, AnswerValue, TypeAnswer};
pub use crate::catalog::{TypeCatalog, TypeDefinition};
pub use crate::choices::{build_choices, Choice, TypeIndex};
pub use crate::cli::Cli;
pub use crate::config::{Config, ConfigResolver, ConfigSource, ResolvedConfig};
pub use crate::error::{PrompterError, ValidationError};
pub use crate::message::{format_commit_message, parse_header, Columns, MessageFormatter};
pub use crate::prompt::{prompter, PromptEngine, Prompter, ScriptedPromptEngine};
pub use crate::questions::{build_questions, Question, QuestionKind, QuestionName};

/// The current version of cz-emoji.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
