use super::cgpa::CgpaExtractor;
use crate::config::ExtractionConfig;
use crate::types::ResumeSignals;
use anyhow::{Context, Result};
use regex::Regex;
use std::sync::LazyLock;

static EXPERIENCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)\+?\s*(?:years|yrs)\b").unwrap());

/// Pattern for one catalog term that only matches it as a whole word/phrase.
///
/// Word-character edges use `\b`. Non-word edges (the `++` of `c++`) require
/// a non-word neighbour or the text boundary instead, since `\b` after a
/// symbol would demand a following letter.
pub fn whole_term_pattern(term: &str) -> String {
    let escaped = regex::escape(term);
    let is_word = |c: char| c.is_alphanumeric() || c == '_';

    let lead = match term.chars().next() {
        Some(c) if is_word(c) => r"\b",
        _ => r"(?:^|\W)",
    };
    let trail = match term.chars().last() {
        Some(c) if is_word(c) => r"\b",
        _ => r"(?:$|\W)",
    };
    format!("{lead}{escaped}{trail}")
}

/// Alternation of several patterns; an empty list never matches
#[derive(Debug, Clone)]
struct TermMatcher {
    regex: Option<Regex>,
}

impl TermMatcher {
    fn whole_terms(terms: &[String]) -> Result<Self> {
        let patterns: Vec<String> = terms
            .iter()
            .filter(|t| !t.is_empty())
            .map(|t| whole_term_pattern(t))
            .collect();
        Self::from_patterns(&patterns)
    }

    fn from_patterns(patterns: &[String]) -> Result<Self> {
        if patterns.is_empty() {
            return Ok(Self { regex: None });
        }
        let joined = patterns
            .iter()
            .map(|p| format!("(?:{p})"))
            .collect::<Vec<_>>()
            .join("|");
        let regex = Regex::new(&joined).with_context(|| format!("Invalid pattern: {joined}"))?;
        Ok(Self { regex: Some(regex) })
    }

    fn is_match(&self, text: &str) -> bool {
        self.regex.as_ref().is_some_and(|r| r.is_match(text))
    }

    fn count(&self, text: &str) -> u32 {
        self.regex
            .as_ref()
            .map(|r| r.find_iter(text).count() as u32)
            .unwrap_or(0)
    }
}

/// FieldExtractor - turns normalized, redacted text into `ResumeSignals`.
///
/// Every rule is independent; a rule that finds nothing yields its
/// zero/false/absent default. Nothing here can fail once constructed.
pub struct FieldExtractor {
    skills: Vec<(String, Regex)>,
    languages: Vec<String>,
    internship: TermMatcher,
    projects: TermMatcher,
    achievements: TermMatcher,
    degree: TermMatcher,
    school_marks_markers: Vec<String>,
    extracurricular: TermMatcher,
    online_presence_domains: Vec<String>,
    cgpa: CgpaExtractor,
}

impl FieldExtractor {
    pub fn new(config: &ExtractionConfig) -> Result<Self> {
        let mut skills = Vec::with_capacity(config.skills.len());
        for skill in config.skills.iter().filter(|s| !s.is_empty()) {
            let regex = Regex::new(&whole_term_pattern(skill))
                .with_context(|| format!("Invalid skill entry: {skill}"))?;
            skills.push((skill.clone(), regex));
        }

        Ok(Self {
            skills,
            languages: config.languages.clone(),
            internship: TermMatcher::whole_terms(&config.internship_terms)?,
            projects: TermMatcher::whole_terms(&config.project_terms)?,
            achievements: TermMatcher::whole_terms(&config.achievement_terms)?,
            degree: TermMatcher::from_patterns(&config.degree_patterns)?,
            school_marks_markers: config.school_marks_markers.clone(),
            extracurricular: TermMatcher::whole_terms(&config.extracurricular_terms)?,
            online_presence_domains: config.online_presence_domains.clone(),
            cgpa: CgpaExtractor::new(config.max_plain_cgpa),
        })
    }

    pub fn extract(&self, text: &str) -> ResumeSignals {
        ResumeSignals {
            skills: self.extract_skills(text),
            experience_years: Self::extract_experience(text),
            has_internship: self.internship.is_match(text),
            project_count: self.projects.count(text),
            achievement_count: self.achievements.count(text),
            has_degree: self.degree.is_match(text),
            has_school_marks: contains_any(text, &self.school_marks_markers),
            extracurricular_count: self.extracurricular.count(text),
            language_count: self.count_languages(text),
            has_online_presence: contains_any(text, &self.online_presence_domains),
            raw_cgpa: self.cgpa.extract(text),
        }
    }

    fn extract_skills(&self, text: &str) -> Vec<String> {
        self.skills
            .iter()
            .filter(|(_, regex)| regex.is_match(text))
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// First "<n> years" / "<n>+ yrs" mention; 0 when absent, saturating on overflow
    fn extract_experience(text: &str) -> u32 {
        EXPERIENCE_REGEX
            .captures(text)
            .and_then(|caps| caps.get(1))
            // the capture is all digits, so a parse failure is an overflow
            .map(|m| m.as_str().parse::<u32>().unwrap_or(u32::MAX))
            .unwrap_or(0)
    }

    fn count_languages(&self, text: &str) -> u32 {
        self.languages
            .iter()
            .filter(|lang| !lang.is_empty() && text.contains(lang.as_str()))
            .count() as u32
    }
}

fn contains_any(text: &str, needles: &[String]) -> bool {
    needles
        .iter()
        .any(|needle| !needle.is_empty() && text.contains(needle.as_str()))
}
