//! Terminal rendering of a ranking: a fixed-width table and a horizontal
//! bar chart, both over the same top-N rows.

use shortlist_core::RankedResult;
use std::fmt::Write;

const EMPTY_MESSAGE: &str = "📭 No resumes ranked";
const DEFAULT_BAR_WIDTH: usize = 40;

pub struct RankingPresenter {
    max_score: f64,
    bar_width: usize,
}

impl RankingPresenter {
    pub fn new(max_score: f64) -> Self {
        Self {
            max_score,
            bar_width: DEFAULT_BAR_WIDTH,
        }
    }

    pub fn with_bar_width(mut self, bar_width: usize) -> Self {
        self.bar_width = bar_width;
        self
    }

    /// `Rank | Resume | Score`, one line per row in the given order
    pub fn render_table(&self, rows: &[RankedResult]) -> String {
        if rows.is_empty() {
            return format!("{EMPTY_MESSAGE}\n");
        }

        let name_width = name_column_width(rows);
        let mut out = String::new();
        let _ = writeln!(out, "{:>4}  {:<name_width$}  {:>7}", "Rank", "Resume", "Score");
        let _ = writeln!(out, "{}", "-".repeat(4 + 2 + name_width + 2 + 7));
        for row in rows {
            let _ = writeln!(
                out,
                "{:>4}  {:<name_width$}  {:>7.2}",
                row.rank, row.resume, row.score
            );
        }
        out
    }

    /// Bars scaled to `max_score`, highest score on top
    pub fn render_chart(&self, rows: &[RankedResult]) -> String {
        if rows.is_empty() {
            return format!("{EMPTY_MESSAGE}\n");
        }

        let name_width = name_column_width(rows);
        let mut out = String::new();
        for row in rows {
            let bar = "█".repeat(self.bar_length(row.score));
            let _ = writeln!(
                out,
                "{:<name_width$} │{bar} {:.2}",
                row.resume, row.score
            );
        }
        out
    }

    fn bar_length(&self, score: f64) -> usize {
        if self.max_score <= 0.0 {
            return 0;
        }
        let fraction = (score / self.max_score).clamp(0.0, 1.0);
        (fraction * self.bar_width as f64).round() as usize
    }
}

fn name_column_width(rows: &[RankedResult]) -> usize {
    rows.iter()
        .map(|r| r.resume.chars().count())
        .max()
        .unwrap_or(0)
        .max("Resume".len())
}
