//! Commit message rendering.
//!
//! The message is made of up to four paragraphs separated by blank lines:
//! the templated header, the body, the `BREAKING CHANGE:` note and the
//! `Closes #n` footer. Empty paragraphs are left out.

pub mod layout;
pub mod parse;

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::answers::AnswerRecord;
use crate::config::Config;
use crate::questions::filter_subject;

pub use layout::{Columns, DisplayWidthLayout, TextLayout, ELLIPSIS};
pub use parse::{parse_header, ParsedHeader};

/// Prefix of the breaking-change paragraph.
pub const BREAKING_PREFIX: &str = "BREAKING CHANGE: ";

#[allow(clippy::unwrap_used)] // Compile-time constant regex pattern
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(emoji|type|scope|subject)\}").unwrap());

#[allow(clippy::unwrap_used)] // Compile-time constant regex pattern
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

#[allow(clippy::unwrap_used)] // Compile-time constant regex pattern
static ISSUE_REFERENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#\d+").unwrap());

/// Renders answers into the final commit message.
pub struct MessageFormatter {
    layout: Box<dyn TextLayout>,
    columns: Columns,
}

impl MessageFormatter {
    /// Creates a formatter with the default layout and a fixed budget.
    pub fn new(columns: Columns) -> Self {
        Self::with_layout(Box::new(DisplayWidthLayout), columns)
    }

    /// Creates a formatter sized to the current terminal.
    pub fn for_terminal() -> Self {
        Self::new(Columns::from_terminal())
    }

    /// Creates a formatter with a custom layout strategy.
    pub fn with_layout(layout: Box<dyn TextLayout>, columns: Columns) -> Self {
        Self { layout, columns }
    }

    /// Column budget in use.
    pub fn columns(&self) -> Columns {
        self.columns
    }

    /// Renders the full message.
    pub fn format(&self, answers: &AnswerRecord, config: &Config) -> String {
        let header = self.fit_line(&render_header(answers, config));

        let body = if answers.body.trim().is_empty() {
            String::new()
        } else {
            self.fit_paragraph(&answers.body)
        };

        let breaking_body = answers.breaking_body.trim();
        let breaking = if breaking_body.is_empty() {
            String::new()
        } else {
            self.fit_paragraph(&format!("{BREAKING_PREFIX}{breaking_body}"))
        };

        let footer = format_issues(&answers.issues);

        [header, body, breaking, footer]
            .into_iter()
            .filter(|section| !section.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
            .trim()
            .to_string()
    }

    fn fit_line(&self, line: &str) -> String {
        match self.columns {
            Columns::Unlimited => line.to_string(),
            Columns::Fixed(columns) => self.layout.truncate(line, columns),
        }
    }

    fn fit_paragraph(&self, text: &str) -> String {
        match self.columns {
            Columns::Unlimited => text.to_string(),
            Columns::Fixed(columns) => self.layout.wrap(text, columns),
        }
    }
}

impl Default for MessageFormatter {
    fn default() -> Self {
        Self::new(Columns::Unlimited)
    }
}

/// Renders a message sized to the current terminal.
pub fn format_commit_message(answers: &AnswerRecord, config: &Config) -> String {
    MessageFormatter::for_terminal().format(answers, config)
}

/// Fills the header template and collapses whitespace runs.
///
/// An absent scope leaves neighbouring separators next to each other, hence
/// the collapse. The result is not width limited.
pub fn render_header(answers: &AnswerRecord, config: &Config) -> String {
    let type_name = resolve_type_name(answers, config);
    let scope = answers.scope.trim();
    let scope = if scope.is_empty() {
        String::new()
    } else {
        format!("({scope})")
    };
    let subject = filter_subject(&answers.subject, config.disable_subject_lower_case);

    let filled = PLACEHOLDER.replace_all(config.format(), |caps: &Captures<'_>| {
        match &caps[1] {
            "emoji" => answers.r#type.emoji.clone(),
            "type" => type_name.clone(),
            "scope" => scope.clone(),
            _ => subject.clone(),
        }
    });

    WHITESPACE_RUN.replace_all(&filled, " ").trim().to_string()
}

/// Canonical name of the selected type, or an empty string if the catalog
/// does not know it.
fn resolve_type_name(answers: &AnswerRecord, config: &Config) -> String {
    config
        .types
        .find_by_name(&answers.r#type.name)
        .or_else(|| config.types.find_by_emoji(&answers.r#type.emoji))
        .map(|t| t.name.clone())
        .unwrap_or_default()
}

/// Builds the `Closes #n, closes #m` footer from free text.
///
/// Text without any `#<digits>` reference produces no footer.
pub fn format_issues(issues: &str) -> String {
    let references: Vec<&str> = ISSUE_REFERENCE
        .find_iter(issues)
        .map(|m| m.as_str())
        .collect();

    if references.is_empty() {
        return String::new();
    }
    format!("Closes {}", references.join(", closes "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::TypeAnswer;
    use crate::catalog::{TypeCatalog, TypeDefinition};

    fn feat_answers(scope: &str, subject: &str) -> AnswerRecord {
        AnswerRecord {
            r#type: TypeAnswer::new("✨ ", "feat"),
            scope: scope.to_string(),
            subject: subject.to_string(),
            ..Default::default()
        }
    }

    fn plain_config() -> Config {
        Config {
            conventional: false,
            ..Config::default()
        }
    }

    #[test]
    fn issues_footer() {
        assert_eq!(format_issues(""), "");
        assert_eq!(format_issues("fixes #3 and #10"), "Closes #3, closes #10");
        assert_eq!(format_issues("#7"), "Closes #7");
        assert_eq!(format_issues("nothing to see"), "");
    }

    #[test]
    fn header_collapses_whitespace_when_scope_missing() {
        let header = render_header(&feat_answers("", "add x"), &plain_config());
        assert_eq!(header, "✨ add x");
    }

    #[test]
    fn conventional_header_includes_type_and_scope() {
        let header = render_header(&feat_answers(" core ", "Add new parser."), &Config::default());
        assert_eq!(header, "✨ feat(core): add new parser");
    }

    #[test]
    fn non_conventional_header_keeps_scope_without_type() {
        let header = render_header(&feat_answers("cli", "add flag"), &plain_config());
        assert_eq!(header, "✨ (cli) add flag");
    }

    #[test]
    fn unknown_type_substitutes_empty_string() {
        let answers = AnswerRecord {
            r#type: TypeAnswer::new("🦀 ", "crab"),
            subject: "rewrite".into(),
            ..Default::default()
        };
        assert_eq!(render_header(&answers, &Config::default()), "🦀 : rewrite");
    }

    #[test]
    fn type_resolves_through_emoji_code() {
        let config = Config {
            emoji_symbol: false,
            ..Config::default()
        };
        let answers = AnswerRecord {
            r#type: TypeAnswer::new(":bug:", ""),
            subject: "handle nulls".into(),
            ..Default::default()
        };
        assert_eq!(render_header(&answers, &config), ":bug: fix: handle nulls");
    }

    #[test]
    fn user_text_is_not_reinterpreted_as_placeholder() {
        let answers = feat_answers("", "document {type} usage");
        assert_eq!(
            render_header(&answers, &Config::default()),
            "✨ feat: document {type} usage"
        );
    }

    #[test]
    fn custom_catalog_is_used_for_type_lookup() {
        let config = Config {
            types: TypeCatalog::new(vec![TypeDefinition::new(
                "feature",
                "🌟",
                ":star2:",
                "A new feature.",
            )]),
            ..Config::default()
        };
        let answers = AnswerRecord {
            r#type: TypeAnswer::new("🌟 ", "feature"),
            subject: "stars".into(),
            ..Default::default()
        };
        assert_eq!(render_header(&answers, &config), "🌟 feature: stars");
    }

    #[test]
    fn end_to_end_minimal_message() {
        let message =
            MessageFormatter::default().format(&feat_answers("core", "Add new parser."), &Config::default());
        assert_eq!(message, "✨ feat(core): add new parser");
    }

    #[test]
    fn full_message_has_blank_line_between_sections() {
        let answers = AnswerRecord {
            body: "Parses the new grammar.".into(),
            is_breaking: true,
            breaking_body: "  the old parser is gone  ".into(),
            issues: "#12, #13".into(),
            ..feat_answers("core", "Add new parser.")
        };
        let message = MessageFormatter::default().format(&answers, &Config::default());
        insta::assert_snapshot!(message, @r"
        ✨ feat(core): add new parser

        Parses the new grammar.

        BREAKING CHANGE: the old parser is gone

        Closes #12, closes #13
        ");
    }

    #[test]
    fn whitespace_only_sections_are_dropped() {
        let answers = AnswerRecord {
            body: "   ".into(),
            breaking_body: " \n ".into(),
            ..feat_answers("", "add x")
        };
        let message = MessageFormatter::default().format(&answers, &Config::default());
        assert_eq!(message, "✨ feat: add x");
    }

    #[test]
    fn fixed_columns_truncate_header_and_wrap_paragraphs() {
        let answers = AnswerRecord {
            body: "one two three four five six".into(),
            breaking_body: "drops the legacy flag".into(),
            ..feat_answers("parser", "Support incremental reparsing")
        };
        let message = MessageFormatter::new(Columns::Fixed(20)).format(&answers, &Config::default());
        insta::assert_snapshot!(message, @r"
        ✨ feat(parser): su…

        one two three four
        five six

        BREAKING CHANGE:
        drops the legacy
        flag
        ");
    }

    struct UpperLayout;

    impl TextLayout for UpperLayout {
        fn truncate(&self, text: &str, _columns: usize) -> String {
            text.to_uppercase()
        }

        fn wrap(&self, text: &str, _columns: usize) -> String {
            format!("[{text}]")
        }
    }

    #[test]
    fn layout_strategy_is_injected() {
        let formatter = MessageFormatter::with_layout(Box::new(UpperLayout), Columns::Fixed(10));
        let answers = AnswerRecord {
            body: "body".into(),
            ..feat_answers("", "add x")
        };
        assert_eq!(
            formatter.format(&answers, &Config::default()),
            "✨ FEAT: ADD X\n\n[body]"
        );
    }

    #[test]
    fn unlimited_columns_leave_layout_untouched() {
        let formatter = MessageFormatter::with_layout(Box::new(UpperLayout), Columns::Unlimited);
        assert_eq!(
            formatter.format(&feat_answers("", "add x"), &Config::default()),
            "✨ feat: add x"
        );
    }
}
