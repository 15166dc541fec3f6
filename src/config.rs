//! Engine configuration directives and their plain-text serialization.
//! FMPP consumes a UTF-8 config file with one `key: value` directive per
//! line; values are passed through without quoting or escaping.

use indexmap::IndexMap;

/// Ordered directive map handed to the engine via its config file.
///
/// Insertion order is preserved so the serialized text is deterministic.
pub type EngineConfig = IndexMap<String, String>;

/// Tag syntax accepted by the engine for template directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagSyntax {
    #[default]
    AngleBracket,
    SquareBracket,
    AutoDetect,
}

impl TagSyntax {
    /// The directive value the engine expects for this syntax.
    pub fn as_str(&self) -> &'static str {
        match self {
            TagSyntax::AngleBracket => "angleBracket",
            TagSyntax::SquareBracket => "squareBracket",
            TagSyntax::AutoDetect => "autoDetect",
        }
    }

    /// Wraps a directive body in this syntax's delimiters.
    pub fn directive(&self, body: &str) -> String {
        match self {
            // autoDetect templates accept the angle bracket form
            TagSyntax::AngleBracket | TagSyntax::AutoDetect => format!("<{}>", body),
            TagSyntax::SquareBracket => format!("[{}]", body),
        }
    }
}

/// Renders the config map into the engine's directive format.
///
/// One `key: value` line per entry, insertion order preserved. Callers
/// are responsible for supplying values without embedded newlines.
pub fn serialize_config(config: &EngineConfig) -> String {
    let mut out = String::new();
    for (key, value) in config {
        out.push_str(key);
        out.push_str(": ");
        out.push_str(value);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_preserves_insertion_order() {
        let mut config = EngineConfig::new();
        config.insert("sourceRoot".to_string(), "/tmp".to_string());
        config.insert("tagSyntax".to_string(), "angleBracket".to_string());
        config.insert("data".to_string(), "tdd(/tmp/abc)".to_string());

        assert_eq!(
            serialize_config(&config),
            "sourceRoot: /tmp\ntagSyntax: angleBracket\ndata: tdd(/tmp/abc)\n"
        );
    }

    #[test]
    fn test_serialize_empty_config() {
        assert_eq!(serialize_config(&EngineConfig::new()), "");
    }
}
