//! Raw CGPA extraction as a short-circuit priority chain.
//!
//! Each rule either yields `Matched(value)` on the 0-10 working scale or
//! `NoMatch`; the first match wins. Order:
//!
//! 1. `<n>/10`  -> n
//! 2. `<n>/4`   -> n / 4 * 10
//! 3. `<n>%`    -> n / 10 (rough percentage approximation, kept as-is)
//! 4. `cgpa|gpa ... <n>` -> n, only when n <= ceiling
//!
//! A rule that finds its pattern but rejects the value (rule 4 over the
//! ceiling) is still a `NoMatch`; the chain does not search further.

use regex::Regex;
use std::sync::LazyLock;

static OUT_OF_TEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+\.?[0-9]*)\s*/\s*10").unwrap());

static OUT_OF_FOUR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+\.?[0-9]*)\s*/\s*4").unwrap());

static PERCENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+\.?[0-9]*)\s*%").unwrap());

static LABELLED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(cgpa|gpa)[^0-9]*([0-9]+\.?[0-9]*)").unwrap());

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CgpaMatch {
    Matched(f64),
    NoMatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CgpaRule {
    OutOfTen,
    OutOfFour,
    Percentage,
    Labelled,
}

impl CgpaRule {
    pub const PRIORITY: [CgpaRule; 4] = [
        CgpaRule::OutOfTen,
        CgpaRule::OutOfFour,
        CgpaRule::Percentage,
        CgpaRule::Labelled,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CgpaRule::OutOfTen => "out_of_10",
            CgpaRule::OutOfFour => "out_of_4",
            CgpaRule::Percentage => "percentage",
            CgpaRule::Labelled => "labelled",
        }
    }

    fn evaluate(&self, text: &str, max_plain: f64) -> CgpaMatch {
        let (regex, group) = match self {
            CgpaRule::OutOfTen => (&*OUT_OF_TEN_REGEX, 1),
            CgpaRule::OutOfFour => (&*OUT_OF_FOUR_REGEX, 1),
            CgpaRule::Percentage => (&*PERCENT_REGEX, 1),
            CgpaRule::Labelled => (&*LABELLED_REGEX, 2),
        };

        let value = regex
            .captures(text)
            .and_then(|caps| caps.get(group))
            .and_then(|m| m.as_str().parse::<f64>().ok());

        let scaled = match (self, value) {
            (_, None) => None,
            (CgpaRule::OutOfTen, Some(v)) => Some(v),
            (CgpaRule::OutOfFour, Some(v)) => Some(v / 4.0 * 10.0),
            (CgpaRule::Percentage, Some(v)) => Some(v / 10.0),
            (CgpaRule::Labelled, Some(v)) if v <= max_plain => Some(v),
            (CgpaRule::Labelled, Some(_)) => None,
        };

        // digit runs past f64 range parse to infinity
        match scaled {
            Some(v) if v.is_finite() => CgpaMatch::Matched(v),
            _ => CgpaMatch::NoMatch,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CgpaExtractor {
    max_plain: f64,
}

impl CgpaExtractor {
    pub fn new(max_plain: f64) -> Self {
        Self { max_plain }
    }

    /// Run the chain; returns the winning rule alongside the value
    pub fn extract_with_rule(&self, text: &str) -> Option<(CgpaRule, f64)> {
        CgpaRule::PRIORITY
            .iter()
            .find_map(|rule| match rule.evaluate(text, self.max_plain) {
                CgpaMatch::Matched(value) => Some((*rule, value)),
                CgpaMatch::NoMatch => None,
            })
    }

    pub fn extract(&self, text: &str) -> Option<f64> {
        self.extract_with_rule(text).map(|(_, value)| value)
    }
}

impl Default for CgpaExtractor {
    fn default() -> Self {
        Self::new(10.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_ten_wins_over_everything() {
        let extractor = CgpaExtractor::default();
        let found = extractor.extract_with_rule("cgpa 8.5/10, 92% in 12th, gpa 3.6/4");
        assert_eq!(found, Some((CgpaRule::OutOfTen, 8.5)));
    }

    #[test]
    fn test_out_of_four_is_rescaled() {
        let extractor = CgpaExtractor::default();
        assert_eq!(extractor.extract("gpa 3.2 / 4 from state university"), Some(8.0));
    }

    #[test]
    fn test_percentage_divided_by_ten() {
        let extractor = CgpaExtractor::default();
        assert_eq!(extractor.extract("scored 85% in finals"), Some(8.5));
    }

    #[test]
    fn test_labelled_value_accepted_under_ceiling() {
        let extractor = CgpaExtractor::default();
        assert_eq!(
            extractor.extract_with_rule("cgpa: 9.1 overall"),
            Some((CgpaRule::Labelled, 9.1))
        );
    }

    #[test]
    fn test_labelled_value_over_ceiling_is_absent() {
        let extractor = CgpaExtractor::default();
        assert_eq!(extractor.extract("gpa rank 42 in class"), None);
    }

    #[test]
    fn test_no_academic_token() {
        let extractor = CgpaExtractor::default();
        assert_eq!(extractor.extract("python developer with 3 years experience"), None);
        assert_eq!(extractor.extract(""), None);
    }

    #[test]
    fn test_trailing_dot_number_parses() {
        let extractor = CgpaExtractor::default();
        assert_eq!(extractor.extract("cgpa 9./10"), Some(9.0));
    }

    #[test]
    fn test_overflowing_value_is_absent() {
        let extractor = CgpaExtractor::default();
        let text = format!("cgpa {}/10", "9".repeat(400));
        assert_eq!(extractor.extract(&text), None);
    }
}
