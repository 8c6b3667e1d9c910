//! Type selector choices and their search index.

pub mod fuzzy;

use serde::Serialize;

use crate::answers::TypeAnswer;
use crate::config::Config;

pub use fuzzy::{FuzzyIndex, FuzzyMatch, FuzzyOptions};

/// One entry of the type selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    /// Aligned `name  symbol  description` line.
    pub display_name: String,
    /// Value recorded when the entry is picked.
    pub value: TypeAnswer,
    /// Textual emoji code, searchable alongside the name.
    pub code: String,
}

/// Builds the selector entries from the configured catalog.
pub fn build_choices(config: &Config) -> Vec<Choice> {
    let width = config.types.max_name_len();

    config
        .types
        .iter()
        .map(|t| Choice {
            display_name: format!("{:<width$}  {}  {}", t.name, t.emoji, t.description),
            value: TypeAnswer {
                emoji: if config.emoji_symbol {
                    format!("{} ", t.emoji)
                } else {
                    t.code.clone()
                },
                name: t.name.clone(),
            },
            code: t.code.clone(),
        })
        .collect()
}

/// Choices plus a fuzzy index over their `name` and `code`.
#[derive(Debug, Clone)]
pub struct TypeIndex {
    choices: Vec<Choice>,
    fuzzy: FuzzyIndex,
}

impl TypeIndex {
    /// Indexes `choices` with the default search options.
    pub fn new(choices: Vec<Choice>) -> Self {
        Self::with_options(choices, FuzzyOptions::default())
    }

    /// Indexes `choices` with custom search options.
    pub fn with_options(choices: Vec<Choice>, options: FuzzyOptions) -> Self {
        let records = choices
            .iter()
            .map(|c| vec![c.value.name.clone(), c.code.clone()])
            .collect();
        Self {
            fuzzy: FuzzyIndex::new(records, options),
            choices,
        }
    }

    /// Builds the choices for `config` and indexes them.
    pub fn from_config(config: &Config) -> Self {
        Self::new(build_choices(config))
    }

    /// All choices in catalog order.
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    /// Filters the choices for a typed query.
    ///
    /// An empty query returns every choice in catalog order; otherwise only
    /// matches are returned, most relevant first.
    pub fn search(&self, query: &str) -> Vec<&Choice> {
        if query.is_empty() {
            return self.choices.iter().collect();
        }
        self.fuzzy
            .search(query)
            .into_iter()
            .filter_map(|m| self.choices.get(m.index))
            .collect()
    }
}
