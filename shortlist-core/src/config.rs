use crate::types::Category;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;

// Default value functions for serde
fn default_true() -> bool {
    true
}

fn default_top_n() -> usize {
    25
}

fn default_max_score() -> f64 {
    100.0
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Catalogs and term lists used by the field extractor
    #[serde(default)]
    pub extraction: ExtractionConfig,
    /// Sensitive-information redaction rules, applied before extraction
    #[serde(default)]
    pub redaction: RedactionConfig,
    /// Category weights, per-unit multipliers and caps
    #[serde(default)]
    pub scoring: ScoringConfig,
    /// How many ranked rows the presenter shows
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            extraction: ExtractionConfig::default(),
            redaction: RedactionConfig::default(),
            scoring: ScoringConfig::default(),
            top_n: default_top_n(),
        }
    }
}

// ===== EXTRACTION =====

fn default_skills() -> Vec<String> {
    strings(&[
        "python",
        "java",
        "sql",
        "machine learning",
        "deep learning",
        "html",
        "css",
        "javascript",
        "react",
        "node",
        "c++",
        "pandas",
        "numpy",
    ])
}

fn default_languages() -> Vec<String> {
    strings(&["english", "hindi", "spanish", "french", "german"])
}

fn default_internship_terms() -> Vec<String> {
    strings(&["intern", "internship"])
}

fn default_project_terms() -> Vec<String> {
    strings(&["project"])
}

fn default_achievement_terms() -> Vec<String> {
    strings(&["award", "achievement", "winner"])
}

fn default_extracurricular_terms() -> Vec<String> {
    strings(&["volunteer", "club", "sports", "leader"])
}

fn default_degree_patterns() -> Vec<String> {
    vec![
        r"b\.?tech".to_string(),
        r"m\.?tech".to_string(),
        r"mba".to_string(),
        r"phd".to_string(),
    ]
}

fn default_school_marks_markers() -> Vec<String> {
    strings(&["12th"])
}

fn default_online_presence_domains() -> Vec<String> {
    strings(&["linkedin.com", "github.com"])
}

fn default_max_plain_cgpa() -> f64 {
    10.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Skill names, matched as whole words/phrases against lowercased text
    #[serde(default = "default_skills")]
    pub skills: Vec<String>,
    /// Spoken languages, matched as plain substrings
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
    /// Whole words that flag an internship
    #[serde(default = "default_internship_terms")]
    pub internship_terms: Vec<String>,
    /// Whole words counted as project mentions
    #[serde(default = "default_project_terms")]
    pub project_terms: Vec<String>,
    /// Whole words counted as achievements (every occurrence counts)
    #[serde(default = "default_achievement_terms")]
    pub achievement_terms: Vec<String>,
    /// Whole words counted as extracurricular activity
    #[serde(default = "default_extracurricular_terms")]
    pub extracurricular_terms: Vec<String>,
    /// Regex patterns (unanchored) that flag a degree
    #[serde(default = "default_degree_patterns")]
    pub degree_patterns: Vec<String>,
    /// Literal substrings that flag school marks
    #[serde(default = "default_school_marks_markers")]
    pub school_marks_markers: Vec<String>,
    /// Literal substrings that flag an online profile
    #[serde(default = "default_online_presence_domains")]
    pub online_presence_domains: Vec<String>,
    /// Upper bound for a bare "cgpa <n>" / "gpa <n>" value to be accepted
    #[serde(default = "default_max_plain_cgpa")]
    pub max_plain_cgpa: f64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            skills: default_skills(),
            languages: default_languages(),
            internship_terms: default_internship_terms(),
            project_terms: default_project_terms(),
            achievement_terms: default_achievement_terms(),
            extracurricular_terms: default_extracurricular_terms(),
            degree_patterns: default_degree_patterns(),
            school_marks_markers: default_school_marks_markers(),
            online_presence_domains: default_online_presence_domains(),
            max_plain_cgpa: default_max_plain_cgpa(),
        }
    }
}

// ===== REDACTION =====

/// How far a `trailing` redaction rule deletes past its marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailingMode {
    /// Marker and the whole rest of the text
    #[default]
    Greedy,
    /// Marker, an optional separator and one date-shaped token
    Scoped,
}

/// What a redaction rule deletes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedactionExtent {
    /// Only the matched text
    #[default]
    Match,
    /// The pattern is a marker; deletion extends per `TrailingMode`
    Trailing,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactionRuleConfig {
    /// Name of the rule (for logs and stage dumps)
    pub name: String,
    /// Regex applied to normalized (lowercased) text
    pub pattern: String,
    #[serde(default)]
    pub extent: RedactionExtent,
    /// Whether this rule is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl RedactionRuleConfig {
    fn new(name: &str, pattern: &str, extent: RedactionExtent) -> Self {
        Self {
            name: name.to_string(),
            pattern: pattern.to_string(),
            extent,
            enabled: true,
        }
    }
}

fn default_redaction_rules() -> Vec<RedactionRuleConfig> {
    vec![
        RedactionRuleConfig::new(
            "gender",
            r"\b(male|female|he|she|him|her)\b",
            RedactionExtent::Match,
        ),
        RedactionRuleConfig::new("age", r"\b(age\s*\d+)\b", RedactionExtent::Match),
        RedactionRuleConfig::new(
            "date_of_birth",
            r"\b(dob|date of birth)\b",
            RedactionExtent::Trailing,
        ),
        RedactionRuleConfig::new("photo", r"\b(photo|photograph)\b", RedactionExtent::Match),
        RedactionRuleConfig::new(
            "protected_attributes",
            r"\b(religion|caste|married)\b",
            RedactionExtent::Match,
        ),
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactionConfig {
    /// Whether redaction runs at all
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Deletion reach of `trailing` rules (date of birth by default)
    #[serde(default)]
    pub trailing_mode: TrailingMode,
    /// Rules applied in order
    #[serde(default = "default_redaction_rules")]
    pub rules: Vec<RedactionRuleConfig>,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            trailing_mode: TrailingMode::default(),
            rules: default_redaction_rules(),
        }
    }
}

// ===== SCORING =====

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryWeights {
    pub internship: f64,
    pub skills: f64,
    pub projects: f64,
    pub cgpa: f64,
    pub achievements: f64,
    pub experience: f64,
    pub extracurricular: f64,
    pub language: f64,
    pub online_presence: f64,
    pub degree: f64,
    pub school_marks: f64,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            internship: 20.0,
            skills: 20.0,
            projects: 15.0,
            cgpa: 10.0,
            achievements: 10.0,
            experience: 5.0,
            extracurricular: 5.0,
            language: 3.0,
            online_presence: 3.0,
            degree: 3.0,
            school_marks: 2.0,
        }
    }
}

impl CategoryWeights {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Internship => self.internship,
            Category::Skills => self.skills,
            Category::Projects => self.projects,
            Category::Cgpa => self.cgpa,
            Category::Achievements => self.achievements,
            Category::Experience => self.experience,
            Category::Extracurricular => self.extracurricular,
            Category::Language => self.language,
            Category::OnlinePresence => self.online_presence,
            Category::Degree => self.degree,
            Category::SchoolMarks => self.school_marks,
        }
    }

    pub fn total(&self) -> f64 {
        Category::ALL.iter().map(|c| self.get(*c)).sum()
    }
}

/// Points per counted unit for the count-based categories
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitMultipliers {
    pub skills: f64,
    pub projects: f64,
    pub achievements: f64,
    pub experience: f64,
    pub extracurricular: f64,
    pub language: f64,
}

impl Default for UnitMultipliers {
    fn default() -> Self {
        Self {
            skills: 2.0,
            projects: 3.0,
            achievements: 2.0,
            experience: 2.0,
            extracurricular: 1.0,
            language: 1.0,
        }
    }
}

/// Optional per-category caps for the count-based categories.
/// A cap only ever tightens: the effective cap is `min(cap, weight)`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryCaps {
    #[serde(default)]
    pub skills: Option<f64>,
    #[serde(default)]
    pub projects: Option<f64>,
    #[serde(default)]
    pub achievements: Option<f64>,
    #[serde(default)]
    pub experience: Option<f64>,
    #[serde(default)]
    pub extracurricular: Option<f64>,
    #[serde(default)]
    pub language: Option<f64>,
}

impl CategoryCaps {
    fn all(&self) -> [Option<f64>; 6] {
        [
            self.skills,
            self.projects,
            self.achievements,
            self.experience,
            self.extracurricular,
            self.language,
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub weights: CategoryWeights,
    #[serde(default)]
    pub multipliers: UnitMultipliers,
    #[serde(default)]
    pub caps: CategoryCaps,
    /// Scale of the final score (summed contributions are rescaled onto 0..max_score)
    #[serde(default = "default_max_score")]
    pub max_score: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: CategoryWeights::default(),
            multipliers: UnitMultipliers::default(),
            caps: CategoryCaps::default(),
            max_score: default_max_score(),
        }
    }
}

impl RankingConfig {
    /// Load config from file path (functional approach)
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {path}"))?;
        let config: RankingConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {path}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config with fallback to default
    pub fn load_with_fallback(path: Option<&str>) -> Self {
        match path {
            Some(p) => Self::load_from_file(p).unwrap_or_else(|e| {
                tracing::warn!("⚠️  Failed to load config from {p}, using defaults: {e:#}");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    /// Reject configurations that would break the score bounds
    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            bail!("top_n must be at least 1");
        }

        let scoring = &self.scoring;
        if !(scoring.max_score > 0.0) {
            bail!("scoring.max_score must be positive, got {}", scoring.max_score);
        }

        for category in Category::ALL {
            let weight = scoring.weights.get(category);
            if !(weight >= 0.0) {
                bail!("weight for {category} must be non-negative, got {weight}");
            }
        }
        if scoring.weights.total() <= 0.0 {
            bail!("at least one category weight must be positive");
        }

        let m = &scoring.multipliers;
        for value in [
            m.skills,
            m.projects,
            m.achievements,
            m.experience,
            m.extracurricular,
            m.language,
        ] {
            if !(value >= 0.0) {
                bail!("per-unit multipliers must be non-negative, got {value}");
            }
        }

        for cap in scoring.caps.all().into_iter().flatten() {
            if !(cap >= 0.0) {
                bail!("category caps must be non-negative, got {cap}");
            }
        }

        if !(self.extraction.max_plain_cgpa >= 0.0) {
            bail!("extraction.max_plain_cgpa must be non-negative");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_96() {
        let config = RankingConfig::default();
        assert_eq!(config.scoring.weights.total(), 96.0);
        assert_eq!(config.top_n, 25);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_falls_back_to_defaults() {
        let yaml = r#"
top_n: 10
scoring:
  weights:
    internship: 10
redaction:
  trailing_mode: scoped
"#;
        let config: RankingConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.top_n, 10);
        assert_eq!(config.scoring.weights.internship, 10.0);
        assert_eq!(config.scoring.weights.skills, 20.0);
        assert_eq!(config.scoring.multipliers.projects, 3.0);
        assert_eq!(config.redaction.trailing_mode, TrailingMode::Scoped);
        assert_eq!(config.redaction.rules.len(), 5);
        assert_eq!(config.extraction.skills.len(), 13);
    }

    #[test]
    fn test_validate_rejects_negative_weight() {
        let mut config = RankingConfig::default();
        config.scoring.weights.degree = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_top_n_and_zero_weights() {
        let mut config = RankingConfig::default();
        config.top_n = 0;
        assert!(config.validate().is_err());

        let mut config = RankingConfig::default();
        for category in Category::ALL {
            match category {
                Category::Internship => config.scoring.weights.internship = 0.0,
                Category::Skills => config.scoring.weights.skills = 0.0,
                Category::Projects => config.scoring.weights.projects = 0.0,
                Category::Cgpa => config.scoring.weights.cgpa = 0.0,
                Category::Achievements => config.scoring.weights.achievements = 0.0,
                Category::Experience => config.scoring.weights.experience = 0.0,
                Category::Extracurricular => config.scoring.weights.extracurricular = 0.0,
                Category::Language => config.scoring.weights.language = 0.0,
                Category::OnlinePresence => config.scoring.weights.online_presence = 0.0,
                Category::Degree => config.scoring.weights.degree = 0.0,
                Category::SchoolMarks => config.scoring.weights.school_marks = 0.0,
            }
        }
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_with_fallback_on_missing_file() {
        let config = RankingConfig::load_with_fallback(Some("/nonexistent/shortlist.yaml"));
        assert_eq!(config.top_n, 25);
    }
}
