//! Quiz questions as supplied by the question bank.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Language used when a requested translation is missing.
pub const FALLBACK_LANGUAGE: &str = "en";

/// Identifier of a question within its bank.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QuestionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Text variants keyed by language code (`"en"`, `"hi"`, ...).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText(BTreeMap<String, String>);

impl LocalizedText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text carrying a single English variant.
    pub fn english(text: impl Into<String>) -> Self {
        Self::new().with(FALLBACK_LANGUAGE, text)
    }

    pub fn with(mut self, lang: impl Into<String>, text: impl Into<String>) -> Self {
        self.0.insert(lang.into(), text.into());
        self
    }

    /// The variant for `lang`, else English, else any variant.
    pub fn get(&self, lang: &str) -> Option<&str> {
        self.0
            .get(lang)
            .or_else(|| self.0.get(FALLBACK_LANGUAGE))
            .or_else(|| self.0.values().next())
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One selectable answer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub text: LocalizedText,
    /// Set on the correct option(s). Visible to whoever holds the question.
    #[serde(default)]
    pub is_correct: bool,
}

impl AnswerOption {
    pub fn new(text: LocalizedText, is_correct: bool) -> Self {
        Self { text, is_correct }
    }
}

/// An immutable quiz question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub prompt: LocalizedText,
    pub options: Vec<AnswerOption>,
}

impl Question {
    pub fn new(id: impl Into<QuestionId>, prompt: LocalizedText, options: Vec<AnswerOption>) -> Self {
        Self {
            id: id.into(),
            prompt,
            options,
        }
    }

    pub fn prompt_for(&self, lang: &str) -> Option<&str> {
        self.prompt.get(lang)
    }

    /// Whether the option at `index` is flagged correct. Out-of-range is `false`.
    pub fn is_correct(&self, index: usize) -> bool {
        self.options.get(index).is_some_and(|o| o.is_correct)
    }

    /// A copy with every correctness flag cleared, for display surfaces that
    /// should not learn the answers.
    pub fn redacted(&self) -> Self {
        Self {
            id: self.id.clone(),
            prompt: self.prompt.clone(),
            options: self
                .options
                .iter()
                .map(|o| AnswerOption::new(o.text.clone(), false))
                .collect(),
        }
    }
}

impl From<String> for QuestionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Question {
        Question::new(
            "q1",
            LocalizedText::english("What is the nominal voltage of a 48V pack?").with("hi", "..."),
            vec![
                AnswerOption::new(LocalizedText::english("36V"), false),
                AnswerOption::new(LocalizedText::english("48V"), true),
            ],
        )
    }

    #[test]
    fn prompt_falls_back_to_english() {
        let q = sample();
        assert_eq!(q.prompt_for("hi"), Some("..."));
        assert_eq!(
            q.prompt_for("ta"),
            Some("What is the nominal voltage of a 48V pack?")
        );
    }

    #[test]
    fn prompt_falls_back_to_any_variant_without_english() {
        let text = LocalizedText::new().with("hi", "namaste");
        assert_eq!(text.get("ta"), Some("namaste"));
        assert_eq!(LocalizedText::new().get("en"), None);
    }

    #[test]
    fn correctness_lookup_is_bounds_safe() {
        let q = sample();
        assert!(!q.is_correct(0));
        assert!(q.is_correct(1));
        assert!(!q.is_correct(7));
    }

    #[test]
    fn redacted_hides_answers() {
        let q = sample().redacted();
        assert!(q.options.iter().all(|o| !o.is_correct));
        assert_eq!(q.options.len(), 2);
    }

    #[test]
    fn question_json_shape() {
        let json = r#"{
            "id": "q9",
            "prompt": {"en": "Pick one"},
            "options": [{"text": {"en": "a"}, "is_correct": true}, {"text": {"en": "b"}}]
        }"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.id.as_str(), "q9");
        assert!(q.is_correct(0));
        assert!(!q.is_correct(1));
    }
}
