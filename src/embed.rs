//! Data embedding and error line translation.
//!
//! The engine's tdd side-channel cannot faithfully round-trip arbitrary
//! nested JSON values, so caller data is instead bound to template
//! variables by a generated preamble: one directive parsing the data as
//! a JSON literal, then one directive per top-level key assigning it to
//! a variable of the same name. The preamble is prepended to the
//! template source, which shifts every line the engine sees; the
//! translation half of this module shifts reported line numbers back.

use regex::Regex;
use serde_json::Value;

use crate::config::TagSyntax;
use crate::error::{Error, Result};

/// Scratch variable the JSON literal is parsed into.
const DATA_VAR: &str = "__data__";

/// Generated text block prepended to a template source.
///
/// `line_count` must equal the number of lines the text occupies once
/// prepended; line translation silently produces wrong results
/// otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preamble {
    pub text: String,
    pub line_count: usize,
}

/// Escapes text for embedding in a single-quoted FreeMarker string.
fn escape_literal(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Builds the assign-directive preamble for a non-empty data mapping.
///
/// # Errors
/// * `Error::DataEmbeddingError` if `data` does not serialize to a JSON
///   object.
pub fn build_preamble(data: &Value, tag_syntax: TagSyntax) -> Result<Preamble> {
    let object = data.as_object().ok_or_else(|| {
        Error::DataEmbeddingError("data must be a mapping of variable names".to_string())
    })?;

    let json = serde_json::to_string(data)
        .map_err(|e| Error::DataEmbeddingError(e.to_string()))?;

    let mut text = String::new();
    text.push_str(&tag_syntax.directive(&format!(
        "#assign {} = '{}'?eval_json",
        DATA_VAR,
        escape_literal(&json)
    )));
    text.push('\n');

    for key in object.keys() {
        text.push_str(&tag_syntax.directive(&format!(
            "#assign {} = {}['{}']",
            key,
            DATA_VAR,
            escape_literal(key)
        )));
        text.push('\n');
    }

    Ok(Preamble { line_count: 1 + object.len(), text })
}

/// Rewrites `line <digits>,` references in engine output, subtracting
/// `offset` so reported positions match the caller's original source.
/// Everything else in the text passes through unchanged.
pub fn shift_line_numbers(text: &str, offset: usize) -> String {
    let pattern = Regex::new(r"line (\d+),").unwrap();
    pattern
        .replace_all(text, |caps: &regex::Captures| {
            let line: i64 = caps[1].parse().unwrap_or(0);
            format!("line {},", line - offset as i64)
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_preamble_line_count_matches_text() {
        let data = json!({"name": "World", "count": 2});
        let preamble = build_preamble(&data, TagSyntax::AngleBracket).unwrap();

        assert_eq!(preamble.line_count, 3);
        assert_eq!(preamble.text.matches('\n').count(), preamble.line_count);
    }

    #[test]
    fn test_preamble_assigns_each_top_level_key() {
        let data = json!({"name": "World"});
        let preamble = build_preamble(&data, TagSyntax::AngleBracket).unwrap();

        assert!(preamble.text.contains("<#assign __data__ = "));
        assert!(preamble.text.contains("<#assign name = __data__['name']>"));
    }

    #[test]
    fn test_preamble_square_bracket_syntax() {
        let data = json!({"a": 1});
        let preamble = build_preamble(&data, TagSyntax::SquareBracket).unwrap();

        assert!(preamble.text.starts_with("[#assign"));
        assert!(preamble.text.contains("[#assign a = __data__['a']]"));
    }

    #[test]
    fn test_preamble_escapes_quotes_in_json() {
        let data = json!({"msg": "it's"});
        let preamble = build_preamble(&data, TagSyntax::AngleBracket).unwrap();

        assert!(preamble.text.contains("\\'"));
    }

    #[test]
    fn test_preamble_rejects_non_mapping_data() {
        let err = build_preamble(&json!([1, 2]), TagSyntax::AngleBracket).unwrap_err();
        assert!(matches!(err, Error::DataEmbeddingError(_)));
    }

    #[test]
    fn test_shift_rewrites_every_line_reference() {
        let log = "Error on line 8, column 2.\nCaused by line 12, column 1.";
        assert_eq!(
            shift_line_numbers(log, 5),
            "Error on line 3, column 2.\nCaused by line 7, column 1."
        );
    }

    #[test]
    fn test_shift_leaves_unrelated_text_alone() {
        let log = "deadline 10 seconds, outline 3";
        assert_eq!(shift_line_numbers(log, 5), log);
    }
}
