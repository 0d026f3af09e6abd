//! The tutor persona and the single-string prompt template.

use crate::prompt::{Prompt, PromptStrategy};
use crate::{ChatMessage, TutorError};

/// Placeholder replaced by the user's question in a template.
pub const QUESTION_PLACEHOLDER: &str = "{question}";

/// Placeholder replaced by the persona text in a template.
const PERSONA_PLACEHOLDER: &str = "{persona}";

/// Built-in coaching persona.
pub const DEFAULT_PERSONA: &str = r#"Respond using the following structure, without any introductory text. Use exactly these headings and this order:

## Wake-Up Call
Hit them with the hard truth about the concept they're asking about. Why is it crucial? Why do most people fail to master it?

## Concept Breakdown
Break down the concept in clear, no-nonsense terms. Use analogies that relate to physical training or mental toughness if applicable.

## Code Example
Provide a concise, hard-hitting code example. Use triple backticks and specify the language:

```language
# Your code here
```
Example: For python the code block would be like
```python
# Your code here
```

## "Stay Hard" Challenge
Give them a specific, challenging task related to the concept. Make it tough but achievable with hard work.

## Goggins-Style Motivation
Close with a short, intense motivational message. Use Goggins-style phrases and tough love to push them to excel.

Remember:
- Use direct, forceful language throughout
- Don't coddle the student - push them to be uncomfortable
- Emphasize the need for consistent practice and hard work
- Use short, punchy sentences for impact
- Occasionally reference Goggins' experiences or quotes if relevant
- Ensure each section is clearly separated and formatted
- Adapt to different programming languages based on the context of the question
- Do not output any PREAMBLE text
"#;

/// Built-in single-string template.
pub const DEFAULT_TEMPLATE: &str = "{persona}\nStudent question: {question}\n\nAnswer:\n";

/// Persona text plus the template used by [`PromptStrategy::Template`].
///
/// Built once at startup and shared read-only by every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonaTemplate {
    system: String,
    template: String,
}

impl PersonaTemplate {
    /// Creates a persona from its system text and a template.
    ///
    /// The template must contain `{question}`; `{persona}` is optional.
    pub fn new(system: impl Into<String>, template: impl Into<String>) -> Result<Self, TutorError> {
        let template = template.into();
        if !template.contains(QUESTION_PLACEHOLDER) {
            return Err(TutorError::Config(format!(
                "prompt template must contain the {} placeholder",
                QUESTION_PLACEHOLDER
            )));
        }
        Ok(Self { system: system.into(), template })
    }

    /// Creates a persona from custom system text and the default template.
    pub fn with_system(system: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }

    /// Builds the outbound prompt for `question`.
    ///
    /// The question is inserted verbatim, including the empty string.
    pub fn compose(&self, strategy: PromptStrategy, question: &str) -> Prompt {
        match strategy {
            PromptStrategy::Messages => Prompt::Messages(vec![
                ChatMessage::system(self.system.clone()),
                ChatMessage::user(question),
            ]),
            PromptStrategy::Template => Prompt::Template(self.render(question)),
        }
    }

    /// Fills both placeholders in one left-to-right pass over the template.
    ///
    /// Inserted text is never scanned again, so placeholders inside the
    /// persona or the question stay literal.
    fn render(&self, question: &str) -> String {
        let capacity = self.template.len() + self.system.len() + question.len();
        let mut out = String::with_capacity(capacity);
        let mut rest = self.template.as_str();

        loop {
            let persona_at = rest.find(PERSONA_PLACEHOLDER);
            let question_at = rest.find(QUESTION_PLACEHOLDER);
            let (at, placeholder, value) = match (persona_at, question_at) {
                (Some(p), Some(q)) if p < q => (p, PERSONA_PLACEHOLDER, self.system.as_str()),
                (_, Some(q)) => (q, QUESTION_PLACEHOLDER, question),
                (Some(p), None) => (p, PERSONA_PLACEHOLDER, self.system.as_str()),
                (None, None) => break,
            };
            out.push_str(&rest[..at]);
            out.push_str(value);
            rest = &rest[at + placeholder.len()..];
        }

        out.push_str(rest);
        out
    }
}

impl Default for PersonaTemplate {
    fn default() -> Self {
        Self::with_system(DEFAULT_PERSONA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MessageRole;

    #[test]
    fn test_compose_message_pair() {
        let persona = PersonaTemplate::with_system("Be tough.");
        let prompt = persona.compose(PromptStrategy::Messages, "What is a BST?");
        let Prompt::Messages(messages) = prompt else {
            panic!("expected message pair");
        };
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, MessageRole::System);
        assert_eq!(messages[0].content, "Be tough.");
        assert_eq!(messages[1].role, MessageRole::User);
        assert_eq!(messages[1].content, "What is a BST?");
    }

    #[test]
    fn test_compose_template() {
        let persona = PersonaTemplate::new("Be tough.", "{persona}\nQ: {question}\nA:").unwrap();
        let prompt = persona.compose(PromptStrategy::Template, "What is a heap?");
        assert_eq!(prompt, Prompt::Template("Be tough.\nQ: What is a heap?\nA:".into()));
    }

    #[test]
    fn test_empty_question_keeps_persona() {
        let persona = PersonaTemplate::default();
        let Prompt::Messages(messages) = persona.compose(PromptStrategy::Messages, "") else {
            panic!("expected message pair");
        };
        assert_eq!(messages[0].content, DEFAULT_PERSONA);
        assert_eq!(messages[1].content, "");

        let Prompt::Template(text) = persona.compose(PromptStrategy::Template, "") else {
            panic!("expected template");
        };
        assert!(text.starts_with(DEFAULT_PERSONA));
        assert!(!text.contains(QUESTION_PLACEHOLDER));
    }

    #[test]
    fn test_question_text_is_not_rescanned() {
        let persona = PersonaTemplate::new("P", "{persona}|{question}").unwrap();
        let prompt = persona.compose(PromptStrategy::Template, "{persona}");
        assert_eq!(prompt, Prompt::Template("P|{persona}".into()));
    }

    #[test]
    fn test_persona_text_is_not_rescanned() {
        let system = "Explain {question} with grit.";
        let persona = PersonaTemplate::new(system, "{persona}\nQ: {question}").unwrap();

        let prompt = persona.compose(PromptStrategy::Template, "heaps");
        assert_eq!(
            prompt,
            Prompt::Template("Explain {question} with grit.\nQ: heaps".into())
        );

        let Prompt::Messages(messages) = persona.compose(PromptStrategy::Messages, "heaps") else {
            panic!("expected message pair");
        };
        assert_eq!(messages[0].content, system);
    }

    #[test]
    fn test_question_before_persona() {
        let persona = PersonaTemplate::new("P", "{question}/{persona}/{question}").unwrap();
        let prompt = persona.compose(PromptStrategy::Template, "q");
        assert_eq!(prompt, Prompt::Template("q/P/q".into()));
    }

    #[test]
    fn test_template_requires_question_placeholder() {
        let err = PersonaTemplate::new("P", "{persona} only").unwrap_err();
        assert!(matches!(err, TutorError::Config(_)));
    }
}
