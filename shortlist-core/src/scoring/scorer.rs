use crate::config::ScoringConfig;
use crate::types::{Category, ResumeSignals, ScoreBreakdown};

/// Scorer - weighted composite of the extracted signals.
///
/// Flags earn their full weight, counts earn `count * multiplier` up to the
/// category cap, CGPA earns `normalized * weight`. The summed contributions
/// are rescaled from the weight total onto `0..max_score` and rounded to two
/// decimals.
#[derive(Debug, Clone)]
pub struct Scorer {
    config: ScoringConfig,
}

impl Scorer {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    pub fn score(&self, signals: &ResumeSignals, normalized_cgpa: f64) -> (f64, ScoreBreakdown) {
        let breakdown = self.breakdown(signals, normalized_cgpa);

        let weight_total = self.config.weights.total();
        if weight_total <= 0.0 {
            return (0.0, breakdown);
        }

        let scaled = breakdown.total() / weight_total * self.config.max_score;
        let score = round_to_cents(scaled).clamp(0.0, self.config.max_score);
        (score, breakdown)
    }

    pub fn breakdown(&self, signals: &ResumeSignals, normalized_cgpa: f64) -> ScoreBreakdown {
        let mut breakdown = ScoreBreakdown::default();
        for category in Category::ALL {
            let contribution = match category {
                Category::Internship => self.flag(category, signals.has_internship),
                Category::Degree => self.flag(category, signals.has_degree),
                Category::OnlinePresence => self.flag(category, signals.has_online_presence),
                Category::SchoolMarks => self.flag(category, signals.has_school_marks),
                Category::Skills => self.counted(category, signals.skills.len() as u32),
                Category::Projects => self.counted(category, signals.project_count),
                Category::Achievements => self.counted(category, signals.achievement_count),
                Category::Experience => self.counted(category, signals.experience_years),
                Category::Extracurricular => {
                    self.counted(category, signals.extracurricular_count)
                }
                Category::Language => self.counted(category, signals.language_count),
                Category::Cgpa => normalized_cgpa.clamp(0.0, 1.0) * self.weight(category),
            };
            breakdown.insert(category, contribution);
        }
        breakdown
    }

    fn weight(&self, category: Category) -> f64 {
        self.config.weights.get(category)
    }

    fn flag(&self, category: Category, present: bool) -> f64 {
        if present {
            self.weight(category)
        } else {
            0.0
        }
    }

    fn counted(&self, category: Category, count: u32) -> f64 {
        (count as f64 * self.multiplier(category)).min(self.cap(category))
    }

    fn multiplier(&self, category: Category) -> f64 {
        let m = &self.config.multipliers;
        match category {
            Category::Skills => m.skills,
            Category::Projects => m.projects,
            Category::Achievements => m.achievements,
            Category::Experience => m.experience,
            Category::Extracurricular => m.extracurricular,
            Category::Language => m.language,
            _ => 0.0,
        }
    }

    /// Effective cap: the configured cap, never above the category weight
    fn cap(&self, category: Category) -> f64 {
        let caps = &self.config.caps;
        let configured = match category {
            Category::Skills => caps.skills,
            Category::Projects => caps.projects,
            Category::Achievements => caps.achievements,
            Category::Experience => caps.experience,
            Category::Extracurricular => caps.extracurricular,
            Category::Language => caps.language,
            _ => None,
        };
        let weight = self.weight(category);
        configured.map_or(weight, |cap| cap.min(weight))
    }
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> Scorer {
        Scorer::new(&ScoringConfig::default())
    }

    fn with_skills(n: usize) -> ResumeSignals {
        ResumeSignals {
            skills: (0..n).map(|i| format!("skill{i}")).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_signals_score_zero() {
        let (score, breakdown) = scorer().score(&ResumeSignals::default(), 0.0);
        assert_eq!(score, 0.0);
        assert_eq!(breakdown.total(), 0.0);
        assert_eq!(breakdown.iter().count(), 11);
    }

    #[test]
    fn test_skill_contribution_caps_at_weight() {
        let ten = scorer().breakdown(&with_skills(10), 0.0);
        let twenty = scorer().breakdown(&with_skills(20), 0.0);
        assert_eq!(ten.get(Category::Skills), 20.0);
        assert_eq!(twenty.get(Category::Skills), 20.0);
        assert_eq!(scorer().breakdown(&with_skills(3), 0.0).get(Category::Skills), 6.0);
    }

    #[test]
    fn test_half_cent_rounds_to_even() {
        let degree_only = ResumeSignals {
            has_degree: true,
            ..Default::default()
        };
        let five_projects = ResumeSignals {
            project_count: 5,
            ..Default::default()
        };
        // 3 of 96 is 3.125, 15 of 96 is 15.625
        assert_eq!(scorer().score(&degree_only, 0.0).0, 3.12);
        assert_eq!(scorer().score(&five_projects, 0.0).0, 15.62);
    }

    #[test]
    fn test_cgpa_only_top_score() {
        let (score, breakdown) = scorer().score(&ResumeSignals::default(), 1.0);
        assert_eq!(breakdown.get(Category::Cgpa), 10.0);
        assert_eq!(score, 10.42);
    }

    #[test]
    fn test_maximal_resume_scores_100() {
        let signals = ResumeSignals {
            skills: (0..13).map(|i| format!("s{i}")).collect(),
            experience_years: 40,
            has_internship: true,
            project_count: 9,
            achievement_count: 9,
            has_degree: true,
            has_school_marks: true,
            extracurricular_count: 9,
            language_count: 5,
            has_online_presence: true,
            raw_cgpa: Some(10.0),
        };
        let (score, breakdown) = scorer().score(&signals, 1.0);
        assert_eq!(breakdown.total(), 96.0);
        assert_eq!(score, 100.0);
    }

    #[test]
    fn test_mixed_example_breakdown() {
        // b.tech, 2 years, intern, 2 projects, github, min CGPA of batch
        let signals = ResumeSignals {
            experience_years: 2,
            has_internship: true,
            project_count: 2,
            has_degree: true,
            has_online_presence: true,
            raw_cgpa: Some(8.5),
            ..Default::default()
        };
        let (score, breakdown) = scorer().score(&signals, 0.0);
        assert_eq!(breakdown.get(Category::Internship), 20.0);
        assert_eq!(breakdown.get(Category::Projects), 6.0);
        assert_eq!(breakdown.get(Category::Experience), 4.0);
        assert_eq!(breakdown.get(Category::Degree), 3.0);
        assert_eq!(breakdown.get(Category::OnlinePresence), 3.0);
        // 36 / 96 * 100
        assert_eq!(score, 37.5);
    }

    #[test]
    fn test_configured_cap_only_tightens() {
        let mut config = ScoringConfig::default();
        config.caps.projects = Some(6.0);
        config.caps.language = Some(50.0);
        let scorer = Scorer::new(&config);

        let signals = ResumeSignals {
            project_count: 5,
            language_count: 5,
            ..Default::default()
        };
        let breakdown = scorer.breakdown(&signals, 0.0);
        assert_eq!(breakdown.get(Category::Projects), 6.0);
        assert_eq!(breakdown.get(Category::Language), 3.0);
    }

    #[test]
    fn test_out_of_range_cgpa_is_clamped() {
        let (score, _) = scorer().score(&ResumeSignals::default(), 3.0);
        assert_eq!(score, 10.42);
    }
}
