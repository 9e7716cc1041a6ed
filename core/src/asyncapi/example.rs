//! # Examples
//!
//! Example values prepared for display in an editable text area.

use serde::Serialize;
use serde_json::Value;

/// An example value with its pretty-printed text and line count.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    /// The example as found in the document.
    pub value: Value,
    /// Two-space indented JSON rendering of `value`.
    pub text: String,
    /// Number of lines in `text`.
    pub line_count: usize,
}

impl Example {
    /// Wraps `value`, rendering it once.
    pub fn new(value: Value) -> Self {
        // Value keys are always strings, so pretty printing cannot fail.
        let text = serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
        let line_count = line_count_of(&text);
        Self {
            value,
            text,
            line_count,
        }
    }
}

/// Counts `\n`-separated lines; empty text still counts as one line.
pub fn line_count_of(text: &str) -> usize {
    text.split('\n').count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_example_is_one_line() {
        let example = Example::new(json!("hello"));
        assert_eq!(example.text, "\"hello\"");
        assert_eq!(example.line_count, 1);
    }

    #[test]
    fn test_object_example_line_count() {
        let example = Example::new(json!({"id": 1, "name": "x"}));
        assert_eq!(example.text, "{\n  \"id\": 1,\n  \"name\": \"x\"\n}");
        assert_eq!(example.line_count, 4);
    }

    #[test]
    fn test_line_count_of_edited_text() {
        assert_eq!(line_count_of(""), 1);
        assert_eq!(line_count_of("a\nb\n"), 3);
    }
}
