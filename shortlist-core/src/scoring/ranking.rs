use crate::types::{RankedResult, ScoredResume};

/// Sort by score descending and assign ranks 1..N.
///
/// The sort is stable: equal scores keep their input order, so the
/// first-seen resume takes the better rank. Ranks are consecutive positions
/// with no gaps, even across ties.
pub fn rank(mut scored: Vec<ScoredResume>) -> Vec<RankedResult> {
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
        .into_iter()
        .enumerate()
        .map(|(index, s)| RankedResult {
            resume: s.resume,
            score: s.score,
            rank: index + 1,
            normalized_cgpa: s.normalized_cgpa,
            breakdown: s.breakdown,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ScoreBreakdown;

    fn scored(resume: &str, score: f64) -> ScoredResume {
        ScoredResume {
            resume: resume.to_string(),
            score,
            normalized_cgpa: 0.0,
            breakdown: ScoreBreakdown::default(),
        }
    }

    #[test]
    fn test_descending_with_consecutive_ranks() {
        let ranked = rank(vec![
            scored("a.pdf", 12.5),
            scored("b.pdf", 80.0),
            scored("c.pdf", 40.25),
        ]);
        let order: Vec<_> = ranked.iter().map(|r| (r.resume.as_str(), r.rank)).collect();
        assert_eq!(order, vec![("b.pdf", 1), ("c.pdf", 2), ("a.pdf", 3)]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ranked = rank(vec![
            scored("first.pdf", 50.0),
            scored("top.pdf", 90.0),
            scored("second.pdf", 50.0),
        ]);
        assert_eq!(ranked[1].resume, "first.pdf");
        assert_eq!(ranked[1].rank, 2);
        assert_eq!(ranked[2].resume, "second.pdf");
        assert_eq!(ranked[2].rank, 3);
    }

    #[test]
    fn test_empty_batch() {
        assert!(rank(Vec::new()).is_empty());
    }
}
