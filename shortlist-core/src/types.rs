use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The schema version stamped on every ranking report.
/// Bump this when the output shape changes.
pub const SCHEMA_VERSION: &str = "0.1.0";

// ===== EXTRACTION TYPES =====
// Produced by the rule engine for one resume text. Immutable once built.

/// Structured signals pulled out of one normalized, redacted resume text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeSignals {
    /// Matched entries from the skill catalog, in catalog order
    pub skills: Vec<String>,
    /// First "<n> years" / "<n> yrs" mention, 0 when absent
    pub experience_years: u32,
    pub has_internship: bool,
    pub project_count: u32,
    pub achievement_count: u32,
    pub has_degree: bool,
    pub has_school_marks: bool,
    pub extracurricular_count: u32,
    /// Distinct catalog languages mentioned anywhere in the text
    pub language_count: u32,
    pub has_online_presence: bool,
    /// CGPA on the 0-10 working scale, before batch normalization
    pub raw_cgpa: Option<f64>,
}

/// One resume that produced text. Identity is the source file name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub resume: String,
    #[serde(flatten)]
    pub signals: ResumeSignals,
}

/// A candidate that was dropped before extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedDocument {
    pub resume: String,
    pub reason: String,
}

// ===== SCORING TYPES =====

/// Weight categories, declared in weight-table order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Internship,
    Skills,
    Projects,
    Cgpa,
    Achievements,
    Experience,
    Extracurricular,
    Language,
    OnlinePresence,
    Degree,
    SchoolMarks,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Internship,
        Category::Skills,
        Category::Projects,
        Category::Cgpa,
        Category::Achievements,
        Category::Experience,
        Category::Extracurricular,
        Category::Language,
        Category::OnlinePresence,
        Category::Degree,
        Category::SchoolMarks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Internship => "internship",
            Category::Skills => "skills",
            Category::Projects => "projects",
            Category::Cgpa => "cgpa",
            Category::Achievements => "achievements",
            Category::Experience => "experience",
            Category::Extracurricular => "extracurricular",
            Category::Language => "language",
            Category::OnlinePresence => "online_presence",
            Category::Degree => "degree",
            Category::SchoolMarks => "school_marks",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-category contributions in weight units (before rescaling to max score)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreBreakdown(pub BTreeMap<Category, f64>);

impl ScoreBreakdown {
    pub fn insert(&mut self, category: Category, contribution: f64) {
        self.0.insert(category, contribution);
    }

    pub fn get(&self, category: Category) -> f64 {
        self.0.get(&category).copied().unwrap_or(0.0)
    }

    /// Sum of all contributions, in weight units
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Category, &f64)> {
        self.0.iter()
    }
}

/// Min/max over every raw CGPA present in a batch.
/// Only exists when at least one resume carried a CGPA.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CgpaStats {
    pub min: f64,
    pub max: f64,
    pub samples: usize,
}

/// A record after scoring, still in input order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResume {
    pub resume: String,
    pub score: f64,
    pub normalized_cgpa: f64,
    pub breakdown: ScoreBreakdown,
}

/// Final ranked row handed to the presenter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub resume: String,
    pub score: f64,
    pub rank: usize,
    pub normalized_cgpa: f64,
    pub breakdown: ScoreBreakdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakdown_total_and_missing_category() {
        let mut breakdown = ScoreBreakdown::default();
        breakdown.insert(Category::Skills, 6.0);
        breakdown.insert(Category::Cgpa, 2.5);

        assert_eq!(breakdown.total(), 8.5);
        assert_eq!(breakdown.get(Category::Degree), 0.0);
    }

    #[test]
    fn test_category_serializes_snake_case() {
        let json = serde_json::to_string(&Category::OnlinePresence).unwrap();
        assert_eq!(json, "\"online_presence\"");
        assert_eq!(Category::SchoolMarks.to_string(), "school_marks");
    }

    #[test]
    fn test_record_flattens_signals() {
        let record = ResumeRecord {
            resume: "a.pdf".to_string(),
            signals: ResumeSignals {
                experience_years: 3,
                ..Default::default()
            },
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["resume"], "a.pdf");
        assert_eq!(value["experience_years"], 3);
        assert!(value["raw_cgpa"].is_null());
    }
}
