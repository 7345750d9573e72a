use super::engine::TextRule;
use crate::config::{RedactionConfig, RedactionExtent, TrailingMode};
use anyhow::{Context, Result};
use regex::Regex;

// Deletion tails appended to a `trailing` marker
const GREEDY_TAIL: &str = r"(?s:.*)";
const SCOPED_TAIL: &str = r"[\s:\-]*(?:\d{1,4}[\-/.]\d{1,2}[\-/.]\d{1,4}|\d{1,2}(?:st|nd|rd|th)?\s+[a-z]+,?\s+\d{4})?";

struct RedactionRule {
    name: String,
    regex: Regex,
}

/// SensitiveInfoRedactor - deletes gender, age, date of birth, photo and
/// protected-attribute mentions from normalized text.
///
/// Matches are removed outright (no placeholder), so neighbouring spaces are
/// left side by side. In `greedy` trailing mode the date-of-birth rule
/// deletes everything after its marker, including legitimate content.
pub struct SensitiveInfoRedactor {
    enabled: bool,
    rules: Vec<RedactionRule>,
}

impl SensitiveInfoRedactor {
    pub fn new(config: &RedactionConfig) -> Result<Self> {
        let mut rules = Vec::new();
        for rule in config.rules.iter().filter(|r| r.enabled) {
            let pattern = match rule.extent {
                RedactionExtent::Match => rule.pattern.clone(),
                RedactionExtent::Trailing => {
                    let tail = match config.trailing_mode {
                        TrailingMode::Greedy => GREEDY_TAIL,
                        TrailingMode::Scoped => SCOPED_TAIL,
                    };
                    format!("(?:{}){}", rule.pattern, tail)
                }
            };
            let regex = Regex::new(&pattern)
                .with_context(|| format!("Invalid redaction pattern for rule '{}'", rule.name))?;
            rules.push(RedactionRule {
                name: rule.name.clone(),
                regex,
            });
        }

        Ok(Self {
            enabled: config.enabled,
            rules,
        })
    }

    pub fn redact(&self, text: &str) -> String {
        if !self.enabled {
            return text.to_string();
        }

        let mut text = text.to_string();
        for rule in &self.rules {
            let hits = rule.regex.find_iter(&text).count();
            if hits == 0 {
                continue;
            }
            tracing::trace!(rule = %rule.name, hits, "redacting");
            text = rule.regex.replace_all(&text, "").into_owned();
        }
        text
    }

    /// Names of the active rules, in application order
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name.as_str()).collect()
    }
}

impl TextRule for SensitiveInfoRedactor {
    fn apply(&self, text: String) -> String {
        self.redact(&text)
    }

    fn name(&self) -> &str {
        "SensitiveInfoRedaction"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn redactor(mode: TrailingMode) -> SensitiveInfoRedactor {
        let config = RedactionConfig {
            trailing_mode: mode,
            ..Default::default()
        };
        SensitiveInfoRedactor::new(&config).unwrap()
    }

    #[test]
    fn test_greedy_dob_deletes_rest_of_text() {
        let redacted =
            redactor(TrailingMode::Greedy).redact("he scored 85% in his dob 1999-01-01 history");
        // "his" survives (word boundary), everything from "dob" on is gone
        assert_eq!(redacted, " scored 85% in his ");
    }

    #[test]
    fn test_scoped_dob_keeps_trailing_content() {
        let redacted =
            redactor(TrailingMode::Scoped).redact("he scored 85% in his dob 1999-01-01 history");
        assert_eq!(redacted, " scored 85% in his  history");
    }

    #[test]
    fn test_scoped_dob_with_month_word() {
        let redacted =
            redactor(TrailingMode::Scoped).redact("date of birth: 4 march 1998 python developer");
        assert_eq!(redacted, " python developer");
    }

    #[test]
    fn test_gender_age_photo_and_protected_terms() {
        let redacted = redactor(TrailingMode::Greedy)
            .redact("female, age 24, photo attached, religion x, married, sheet metal");
        assert_eq!(redacted, ", ,  attached,  x, , sheet metal");
    }

    #[test]
    fn test_partial_words_untouched() {
        let text = "theme therapy hermes package";
        assert_eq!(redactor(TrailingMode::Greedy).redact(text), text);
    }

    #[test]
    fn test_disabled_redaction_is_identity() {
        let config = RedactionConfig {
            enabled: false,
            ..Default::default()
        };
        let redactor = SensitiveInfoRedactor::new(&config).unwrap();
        assert_eq!(redactor.redact("she, dob 1999"), "she, dob 1999");
    }

    #[test]
    fn test_disabled_rule_is_skipped() {
        let mut config = RedactionConfig::default();
        for rule in &mut config.rules {
            if rule.name == "photo" {
                rule.enabled = false;
            }
        }
        let redactor = SensitiveInfoRedactor::new(&config).unwrap();
        assert!(!redactor.rule_names().contains(&"photo"));
        assert_eq!(redactor.redact("photo"), "photo");
    }
}
