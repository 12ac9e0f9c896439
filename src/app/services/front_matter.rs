//! On-disk document format: optional YAML preamble + Markdown body.
//!
//! ```text
//! ---
//! header_left: Report
//! footer_center: '{page} / {pages}'
//! exclude_first_page: true
//! ---
//!
//! # Body
//! ```
//!
//! Default print settings are never written, so files without custom
//! settings stay plain Markdown.

use serde_yaml::{Mapping, Value};

use crate::app::domain::print_settings::{PRINT_SETTING_KEYS, PrintSettings};
use crate::app::infrastructure::error::{AppError, Result};
use crate::app::services::text_ops::strip_line_ending;

pub const DELIMITER: &str = "---";

/// Body and settings recovered from a document file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDocument {
    pub body: String,
    pub settings: PrintSettings,
}

/// Serialize a document. The preamble is omitted for default settings.
pub fn serialize(body: &str, settings: &PrintSettings) -> Result<String> {
    if settings.is_default() {
        return Ok(body.to_string());
    }
    let yaml = serde_yaml::to_string(settings)?;
    let mut out = String::with_capacity(yaml.len() + body.len() + 10);
    out.push_str(DELIMITER);
    out.push('\n');
    out.push_str(&yaml);
    if !yaml.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(DELIMITER);
    out.push_str("\n\n");
    out.push_str(body);
    Ok(out)
}

/// Parse a document file.
///
/// Text without a recognizable preamble is returned whole as the body with
/// default settings. A preamble that cannot be read is kept in the body
/// rather than dropped.
pub fn parse(text: &str) -> ParsedDocument {
    match split_preamble(text) {
        Some((yaml, body)) => match settings_from_yaml(yaml) {
            Ok(Some(settings)) => ParsedDocument {
                body: body.to_string(),
                settings,
            },
            Ok(None) => plain(text),
            Err(e) => {
                tracing::warn!("Ignoring unreadable front matter: {}", e);
                plain(text)
            }
        },
        None => plain(text),
    }
}

fn plain(text: &str) -> ParsedDocument {
    ParsedDocument {
        body: text.to_string(),
        settings: PrintSettings::default(),
    }
}

/// Locate `---` ... `---` at the very start of `text`.
///
/// Returns the YAML between the delimiters and the body after the closing
/// delimiter line, with one separating blank line removed.
fn split_preamble(text: &str) -> Option<(&str, &str)> {
    let first_end = text.find('\n')?;
    if strip_line_ending(&text[..=first_end]) != DELIMITER {
        return None;
    }
    let yaml_start = first_end + 1;

    let mut pos = yaml_start;
    while pos <= text.len() {
        let line_end = text[pos..].find('\n').map(|i| pos + i + 1).unwrap_or(text.len());
        let line = strip_line_ending(&text[pos..line_end]);
        if line == DELIMITER {
            let yaml = &text[yaml_start..pos];
            let rest = &text[line_end..];
            let body = rest
                .strip_prefix("\r\n")
                .or_else(|| rest.strip_prefix('\n'))
                .unwrap_or(rest);
            return Some((yaml, body));
        }
        if line_end == text.len() {
            break;
        }
        pos = line_end;
    }
    None
}

/// `Ok(None)` when the YAML is not a mapping holding any print-setting key.
fn settings_from_yaml(yaml: &str) -> Result<Option<PrintSettings>> {
    if yaml.trim().is_empty() {
        return Ok(None);
    }
    let value: Value = serde_yaml::from_str(yaml)?;
    let Value::Mapping(mapping) = value else {
        return Ok(None);
    };
    if !has_print_keys(&mapping) {
        return Ok(None);
    }
    let settings: PrintSettings = serde_yaml::from_value(Value::Mapping(mapping))
        .map_err(|e| AppError::FrontMatter(e.to_string()))?;
    Ok(Some(settings))
}

fn has_print_keys(mapping: &Mapping) -> bool {
    PRINT_SETTING_KEYS.iter().any(|key| mapping.contains_key(*key))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom() -> PrintSettings {
        PrintSettings {
            header_left: "분기 보고서".to_string(),
            header_center: String::new(),
            header_right: "\\{page\\} stays".to_string(),
            footer_left: "Confidential: yes".to_string(),
            footer_center: "{page} / {pages}".to_string(),
            footer_right: "# not a comment".to_string(),
            exclude_first_page: true,
        }
    }

    #[test]
    fn test_default_settings_emit_no_preamble() {
        let body = "# Title\n\nText\n";
        let out = serialize(body, &PrintSettings::default()).unwrap();
        assert_eq!(out, body);
        assert_eq!(parse(&out), ParsedDocument { body: body.into(), settings: PrintSettings::default() });
    }

    #[test]
    fn test_round_trip_custom_settings() {
        let body = "# Title\n\n---\n\nSecond page\n";
        let settings = custom();
        let text = serialize(body, &settings).unwrap();
        assert!(text.starts_with("---\n"));
        let parsed = parse(&text);
        assert_eq!(parsed.body, body);
        assert_eq!(parsed.settings, settings);
    }

    #[test]
    fn test_round_trip_single_field() {
        let settings = PrintSettings { exclude_first_page: true, ..Default::default() };
        let text = serialize("x", &settings).unwrap();
        assert!(text.contains("exclude_first_page: true"));
        assert_eq!(parse(&text).settings, settings);
        assert_eq!(parse(&text).body, "x");
    }

    #[test]
    fn test_round_trip_body_with_leading_blank_lines() {
        let settings = PrintSettings { footer_center: "{page}".into(), ..Default::default() };
        for body in ["", "\n", "\n\nindented", "---\nnot front matter"] {
            let parsed = parse(&serialize(body, &settings).unwrap());
            assert_eq!(parsed.body, body);
            assert_eq!(parsed.settings, settings);
        }
    }

    #[test]
    fn test_partial_preamble() {
        let text = "---\nfooter_right: \"p. {page}\"\n---\n\nBody";
        let parsed = parse(text);
        assert_eq!(parsed.settings.footer_right, "p. {page}");
        assert_eq!(parsed.settings.header_left, "");
        assert!(!parsed.settings.exclude_first_page);
        assert_eq!(parsed.body, "Body");
    }

    #[test]
    fn test_preamble_without_blank_line_and_crlf() {
        let text = "---\r\nheader_left: A\r\n---\r\nBody\r\n";
        let parsed = parse(text);
        assert_eq!(parsed.settings.header_left, "A");
        assert_eq!(parsed.body, "Body\r\n");
    }

    #[test]
    fn test_no_preamble_is_plain_markdown() {
        let text = "Hello\n---\nWorld";
        assert_eq!(parse(text).body, text);
        assert!(parse(text).settings.is_default());
    }

    #[test]
    fn test_leading_rule_without_closing_is_body() {
        let text = "---\n\nSecond page only\n";
        assert_eq!(parse(text).body, text);
    }

    #[test]
    fn test_foreign_front_matter_is_kept_in_body() {
        let text = "---\ntitle: Other tool\n---\n\nBody";
        let parsed = parse(text);
        assert_eq!(parsed.body, text);
        assert!(parsed.settings.is_default());
    }

    #[test]
    fn test_malformed_preamble_is_kept_in_body() {
        let text = "---\nheader_left: [unclosed\n---\nBody";
        let parsed = parse(text);
        assert_eq!(parsed.body, text);
        assert!(parsed.settings.is_default());

        let wrong_type = "---\nexclude_first_page: {a: 1}\n---\nBody";
        assert_eq!(parse(wrong_type).body, wrong_type);
    }

    #[test]
    fn test_empty_values_in_preamble_parse_to_default() {
        let text = "---\nheader_left: ''\n---\n\nBody";
        let parsed = parse(text);
        assert!(parsed.settings.is_default());
        assert_eq!(parsed.body, "Body");
    }
}
