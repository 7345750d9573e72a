use crate::config::RankingConfig;
use crate::types::ResumeSignals;
use anyhow::Result;

use super::extraction::FieldExtractor;
use super::normalization::TextNormalizer;
use super::redaction::SensitiveInfoRedactor;

/// A text-to-text pass run before field extraction
pub trait TextRule {
    fn apply(&self, text: String) -> String;
    fn name(&self) -> &str;
}

/// RuleEngine - runs normalize -> redact -> extract for one resume text.
///
/// Built once from the config and shared read-only across every resume in a
/// batch; per-resume work touches no shared mutable state.
pub struct RuleEngine {
    normalizer: TextNormalizer,
    redactor: SensitiveInfoRedactor,
    extractor: FieldExtractor,
}

impl RuleEngine {
    pub fn new(config: &RankingConfig) -> Result<Self> {
        Ok(Self {
            normalizer: TextNormalizer::new(),
            redactor: SensitiveInfoRedactor::new(&config.redaction)?,
            extractor: FieldExtractor::new(&config.extraction)?,
        })
    }

    fn text_rules(&self) -> [&dyn TextRule; 2] {
        [&self.normalizer, &self.redactor]
    }

    /// Normalized and redacted text, exactly what the extractor sees
    pub fn prepare_text(&self, raw: &str) -> String {
        let mut text = raw.to_string();
        for rule in self.text_rules() {
            let before = text.len();
            text = rule.apply(text);
            tracing::trace!(rule = rule.name(), before, after = text.len(), "text rule applied");
        }
        text
    }

    pub fn analyze(&self, raw: &str) -> ResumeSignals {
        let text = self.prepare_text(raw);
        self.extractor.extract(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrailingMode;

    #[test]
    fn test_analyze_normalizes_before_matching() {
        let engine = RuleEngine::new(&RankingConfig::default()).unwrap();
        let signals = engine.analyze("PYTHON\n\nDeveloper,   3 YEARS\tat ACME.  GitHub.com/jane");
        assert_eq!(signals.skills, vec!["python"]);
        assert_eq!(signals.experience_years, 3);
        assert!(signals.has_online_presence);
    }

    #[test]
    fn test_greedy_dob_hides_later_fields() {
        let engine = RuleEngine::new(&RankingConfig::default()).unwrap();
        let signals = engine.analyze("DOB: 01/02/1999\nSkills: Python, SQL\nInternship at Acme");
        assert_eq!(signals, ResumeSignals::default());
    }

    #[test]
    fn test_scoped_dob_keeps_later_fields() {
        let mut config = RankingConfig::default();
        config.redaction.trailing_mode = TrailingMode::Scoped;
        let engine = RuleEngine::new(&config).unwrap();

        let text = engine.prepare_text("DOB: 01/02/1999\nSkills: Python, SQL");
        assert_eq!(text, " skills: python, sql");

        let signals = engine.analyze("DOB: 01/02/1999\nSkills: Python, SQL\nInternship at Acme");
        assert_eq!(signals.skills, vec!["python", "sql"]);
        assert!(signals.has_internship);
    }

    #[test]
    fn test_invalid_redaction_pattern_is_a_setup_error() {
        let mut config = RankingConfig::default();
        config.redaction.rules[0].pattern = "(unclosed".to_string();
        assert!(RuleEngine::new(&config).is_err());
    }
}
