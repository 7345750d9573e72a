use crate::types::{CgpaStats, ResumeRecord};

impl CgpaStats {
    /// Min/max over the present values; `None` when nothing is present
    pub fn from_values<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        values.into_iter().fold(None, |stats, value| {
            Some(match stats {
                None => CgpaStats {
                    min: value,
                    max: value,
                    samples: 1,
                },
                Some(s) => CgpaStats {
                    min: s.min.min(value),
                    max: s.max.max(value),
                    samples: s.samples + 1,
                },
            })
        })
    }

    pub fn from_records(records: &[ResumeRecord]) -> Option<Self> {
        Self::from_values(records.iter().filter_map(|r| r.signals.raw_cgpa))
    }

    /// Zero or one sample, or every sample equal
    pub fn is_degenerate(&self) -> bool {
        self.max == self.min
    }
}

/// CgpaNormalizer - batch min-max rescaling of raw CGPA onto [0, 1].
///
/// Absent CGPA and degenerate batches both normalize to 0.
#[derive(Debug, Clone, Copy)]
pub struct CgpaNormalizer {
    stats: Option<CgpaStats>,
}

impl CgpaNormalizer {
    pub fn new(stats: Option<CgpaStats>) -> Self {
        Self { stats }
    }

    pub fn from_records(records: &[ResumeRecord]) -> Self {
        Self::new(CgpaStats::from_records(records))
    }

    pub fn stats(&self) -> Option<CgpaStats> {
        self.stats
    }

    pub fn normalize(&self, raw: Option<f64>) -> f64 {
        match (raw, self.stats) {
            (Some(value), Some(stats)) if !stats.is_degenerate() => {
                ((value - stats.min) / (stats.max - stats.min)).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }
}
