//! Commit type catalog.

use serde::{Deserialize, Serialize};

/// A single commit type the user can pick from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDefinition {
    /// Type name as it appears in conventional headers (`feat`, `fix`, ...).
    pub name: String,
    /// Literal emoji symbol.
    pub emoji: String,
    /// Textual emoji code (`:sparkles:`).
    pub code: String,
    /// One-line human description shown in the selector.
    pub description: String,
}

impl TypeDefinition {
    /// Creates a type definition from string slices.
    pub fn new(name: &str, emoji: &str, code: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            emoji: emoji.to_string(),
            code: code.to_string(),
            description: description.to_string(),
        }
    }
}

/// Ordered collection of commit types. Names are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeCatalog {
    types: Vec<TypeDefinition>,
}

// (name, emoji, code, description)
const BUILTIN_TYPES: &[(&str, &str, &str, &str)] = &[
    ("feat", "✨", ":sparkles:", "Introduce new features."),
    ("fix", "🐛", ":bug:", "Fix a bug."),
    ("docs", "📝", ":memo:", "Add or update documentation."),
    ("style", "💄", ":lipstick:", "Add or update the UI and style files."),
    ("refactor", "♻️", ":recycle:", "Refactor code."),
    ("perf", "⚡️", ":zap:", "Improve performance."),
    ("test", "✅", ":white_check_mark:", "Add, update, or pass tests."),
    ("build", "📦️", ":package:", "Add or update compiled files or packages."),
    ("ci", "👷", ":construction_worker:", "Add or update CI build system."),
    ("chore", "🔧", ":wrench:", "Add or update configuration files."),
    ("revert", "⏪️", ":rewind:", "Revert changes."),
    ("hotfix", "🚑️", ":ambulance:", "Critical hotfix."),
    ("security", "🔒️", ":lock:", "Fix security or privacy issues."),
    ("deps", "⬆️", ":arrow_up:", "Upgrade dependencies."),
    ("i18n", "🌐", ":globe_with_meridians:", "Internationalization and localization."),
    ("wip", "🚧", ":construction:", "Work in progress."),
    ("release", "🔖", ":bookmark:", "Release / Version tags."),
    ("init", "🎉", ":tada:", "Begin a project."),
];

impl TypeCatalog {
    /// Wraps an ordered list of type definitions.
    pub fn new(types: Vec<TypeDefinition>) -> Self {
        Self { types }
    }

    /// Returns the catalog shipped with the crate.
    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_TYPES
                .iter()
                .map(|(name, emoji, code, description)| {
                    TypeDefinition::new(name, emoji, code, description)
                })
                .collect(),
        )
    }

    /// Iterates the types in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, TypeDefinition> {
        self.types.iter()
    }

    /// Number of types in the catalog.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` when the catalog holds no types.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Looks a type up by its name.
    pub fn find_by_name(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.iter().find(|t| t.name == name)
    }

    /// Looks a type up by either its literal symbol or its textual code.
    ///
    /// Answers carry the symbol with a trailing space, so the probe is trimmed.
    pub fn find_by_emoji(&self, emoji: &str) -> Option<&TypeDefinition> {
        let probe = emoji.trim();
        if probe.is_empty() {
            return None;
        }
        self.types
            .iter()
            .find(|t| t.emoji == probe || t.code == probe)
    }

    /// Length of the longest type name, in characters.
    pub fn max_name_len(&self) -> usize {
        self.types
            .iter()
            .map(|t| t.name.chars().count())
            .max()
            .unwrap_or(0)
    }
}

impl Default for TypeCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'a> IntoIterator for &'a TypeCatalog {
    type Item = &'a TypeDefinition;
    type IntoIter = std::slice::Iter<'a, TypeDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
