//! Result shapes returned by a generator and their normalization.

use serde::Deserialize;

/// A generated message exposing its text as `content`.
///
/// Hugging Face text-generation responses name the field `generated_text`;
/// both spellings decode here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneratedMessage {
    #[serde(alias = "generated_text")]
    pub content: String,
}

impl GeneratedMessage {
    pub fn new(content: impl Into<String>) -> Self {
        Self { content: content.into() }
    }
}

/// Raw value produced by a generator before normalization.
///
/// Decoding tries the variants in declaration order, so any JSON value lands
/// in exactly one of them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawCompletion {
    /// A plain string.
    Text(String),
    /// A single object with a `content` field.
    Message(GeneratedMessage),
    /// An ordered sequence of messages; the last one is the answer.
    Messages(Vec<GeneratedMessage>),
    /// Anything else.
    Other(serde_json::Value),
}

impl RawCompletion {
    /// Collapses the raw value into the text returned to the caller.
    ///
    /// Never fails: an empty sequence and unknown shapes fall back to the JSON
    /// rendering of the raw value.
    pub fn normalize(self) -> String {
        match self {
            RawCompletion::Text(text) => text,
            RawCompletion::Message(message) => message.content,
            RawCompletion::Messages(mut messages) => match messages.pop() {
                Some(last) => last.content,
                None => "[]".to_string(),
            },
            RawCompletion::Other(value) => value.to_string(),
        }
    }
}

impl From<String> for RawCompletion {
    fn from(text: String) -> Self {
        RawCompletion::Text(text)
    }
}

impl From<&str> for RawCompletion {
    fn from(text: &str) -> Self {
        RawCompletion::Text(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> RawCompletion {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_plain_string() {
        let raw = decode(json!("A BST is a hierarchical structure..."));
        assert!(matches!(raw, RawCompletion::Text(_)));
        assert_eq!(raw.normalize(), "A BST is a hierarchical structure...");
    }

    #[test]
    fn test_object_with_content() {
        let raw = decode(json!({"content": "hello", "role": "assistant"}));
        assert_eq!(raw, RawCompletion::Message(GeneratedMessage::new("hello")));
        assert_eq!(raw.normalize(), "hello");
    }

    #[test]
    fn test_sequence_takes_last() {
        let raw = decode(json!([{"content": "first"}, {"content": "second"}]));
        assert!(matches!(raw, RawCompletion::Messages(ref m) if m.len() == 2));
        assert_eq!(raw.normalize(), "second");
    }

    #[test]
    fn test_generated_text_alias() {
        let raw = decode(json!([{"generated_text": "Stay hard."}]));
        assert_eq!(raw.normalize(), "Stay hard.");
    }

    #[test]
    fn test_empty_sequence_falls_back() {
        let raw = decode(json!([]));
        assert_eq!(raw, RawCompletion::Messages(vec![]));
        assert_eq!(raw.normalize(), "[]");
    }

    #[test]
    fn test_unknown_shape_falls_back_to_json() {
        let raw = decode(json!({"choices": 3}));
        assert!(matches!(raw, RawCompletion::Other(_)));
        assert_eq!(raw.normalize(), r#"{"choices":3}"#);

        let raw = decode(json!([{"token": 1}]));
        assert!(matches!(raw, RawCompletion::Other(_)));
        assert_eq!(raw.normalize(), r#"[{"token":1}]"#);
    }

    #[test]
    fn test_null_content_is_other() {
        let raw = decode(json!({"content": null}));
        assert!(matches!(raw, RawCompletion::Other(_)));
        assert_eq!(raw.normalize(), r#"{"content":null}"#);
    }
}
