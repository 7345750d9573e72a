use super::engine::TextRule;
use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// TextNormalizer - lowercases and collapses every whitespace run to one space.
/// Leading/trailing whitespace is collapsed, not trimmed.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextNormalizer;

impl TextNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        WHITESPACE_REGEX.replace_all(&lowered, " ").into_owned()
    }
}

impl TextRule for TextNormalizer {
    fn apply(&self, text: String) -> String {
        self.normalize(&text)
    }

    fn name(&self) -> &str {
        "TextNormalization"
    }
}
