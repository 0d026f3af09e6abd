use std::fmt;
use std::str::FromStr;

use crate::{ChatMessage, TutorError};

/// How the persona and the question are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptStrategy {
    /// A system message with the persona and a user message with the question.
    #[default]
    Messages,
    /// The question substituted into a single prompt string.
    Template,
}

impl FromStr for PromptStrategy {
    type Err = TutorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "messages" | "chat" => Ok(Self::Messages),
            "template" | "text" => Ok(Self::Template),
            other => Err(TutorError::Config(format!("unknown prompt strategy: {}", other))),
        }
    }
}

impl fmt::Display for PromptStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Messages => f.write_str("messages"),
            Self::Template => f.write_str("template"),
        }
    }
}

/// A composed outbound prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    Messages(Vec<ChatMessage>),
    Template(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("messages".parse::<PromptStrategy>().unwrap(), PromptStrategy::Messages);
        assert_eq!(" Template ".parse::<PromptStrategy>().unwrap(), PromptStrategy::Template);
        assert!("stream".parse::<PromptStrategy>().is_err());
    }

    #[test]
    fn test_strategy_display_parses_back() {
        for strategy in [PromptStrategy::Messages, PromptStrategy::Template] {
            assert_eq!(strategy.to_string().parse::<PromptStrategy>().unwrap(), strategy);
        }
    }
}
