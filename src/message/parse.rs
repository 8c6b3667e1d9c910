//! Parsing of rendered emoji headers.
//!
//! Recognizes conventional headers such as `✨ feat(core): add parser (#12)`
//! or `:bug: fix: handle nulls`. Non-conventional headers have no type
//! separator and do not parse.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

#[allow(clippy::unwrap_used)] // Compile-time constant regex pattern
static HEADER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?::\w+:|[^\s\w]\S*)\s(?P<type>\w*-?\w*)(?:\((?P<scope>.*)\))?!?:\s(?P<subject>[^#]*\S)(?:\s\(?(?P<ticket>#\d*)\)?)?$",
    )
    .unwrap()
});

/// Parts of a conventional emoji header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedHeader {
    /// Commit type; may be empty when the header was rendered for an
    /// unknown type.
    #[serde(rename = "type")]
    pub r#type: String,
    /// Scope without its parentheses.
    pub scope: Option<String>,
    /// Subject line.
    pub subject: String,
    /// Trailing ticket reference such as `#12`.
    pub ticket: Option<String>,
}

/// Splits a header line into its parts, or `None` if it does not fit the
/// `<emoji> <type>[(<scope>)][!]: <subject>[ (#ticket)]` shape.
pub fn parse_header(line: &str) -> Option<ParsedHeader> {
    let caps = HEADER_PATTERN.captures(line.trim_end())?;

    Some(ParsedHeader {
        r#type: caps["type"].to_string(),
        scope: caps.name("scope").map(|m| m.as_str().to_string()),
        subject: caps["subject"].to_string(),
        ticket: caps.name("ticket").map(|m| m.as_str().to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::{AnswerRecord, TypeAnswer};
    use crate::config::Config;
    use crate::message::render_header;

    #[test]
    fn parses_symbol_header_with_scope() {
        let parsed = parse_header("✨ feat(core): add new parser").unwrap();
        assert_eq!(parsed.r#type, "feat");
        assert_eq!(parsed.scope.as_deref(), Some("core"));
        assert_eq!(parsed.subject, "add new parser");
        assert_eq!(parsed.ticket, None);
    }

    #[test]
    fn parses_code_header_with_ticket() {
        let parsed = parse_header(":bug: fix!: handle nulls (#42)").unwrap();
        assert_eq!(parsed.r#type, "fix");
        assert_eq!(parsed.scope, None);
        assert_eq!(parsed.subject, "handle nulls");
        assert_eq!(parsed.ticket.as_deref(), Some("#42"));
    }

    #[test]
    fn bare_ticket_is_recognized() {
        let parsed = parse_header("🐛 fix: crash on start #7").unwrap();
        assert_eq!(parsed.subject, "crash on start");
        assert_eq!(parsed.ticket.as_deref(), Some("#7"));
    }

    #[test]
    fn emoji_with_variation_selector() {
        let parsed = parse_header("♻️ refactor(cli): split commands").unwrap();
        assert_eq!(parsed.r#type, "refactor");
        assert_eq!(parsed.scope.as_deref(), Some("cli"));
    }

    #[test]
    fn rejects_headers_without_emoji_or_type() {
        assert_eq!(parse_header("feat: no emoji"), None);
        assert_eq!(parse_header("✨ add x"), None);
        assert_eq!(parse_header(""), None);
    }

    #[test]
    fn serializes_type_key() {
        let parsed = parse_header("✨ feat: add x").unwrap();
        let json = serde_json::to_value(&parsed).unwrap();
        assert_eq!(json["type"], "feat");
        assert!(json["scope"].is_null());
    }

    #[test]
    fn round_trips_rendered_headers() {
        let config = Config::default();
        for definition in &config.types {
            for scope in ["", "core"] {
                let answers = AnswerRecord {
                    r#type: TypeAnswer::new(&format!("{} ", definition.emoji), &definition.name),
                    scope: scope.to_string(),
                    subject: "Add the thing.".to_string(),
                    ..Default::default()
                };
                let header = render_header(&answers, &config);
                let parsed = parse_header(&header)
                    .unwrap_or_else(|| panic!("header did not parse: {header}"));
                assert_eq!(parsed.r#type, definition.name);
                assert_eq!(parsed.scope.as_deref(), (!scope.is_empty()).then_some(scope));
                assert_eq!(parsed.subject, "add the thing");
            }
        }
    }

    #[test]
    fn round_trips_code_headers() {
        let config = Config {
            emoji_symbol: false,
            ..Config::default()
        };
        let answers = AnswerRecord {
            r#type: TypeAnswer::new(":white_check_mark:", "test"),
            subject: "cover parser".into(),
            ..Default::default()
        };
        let parsed = parse_header(&render_header(&answers, &config)).unwrap();
        assert_eq!(parsed.r#type, "test");
        assert_eq!(parsed.subject, "cover parser");
    }
}
