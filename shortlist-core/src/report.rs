use crate::processor::PipelineStages;
use crate::types::*;
use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Everything one ranking run produced, in ranked order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingReport {
    pub schema_version: String,
    pub generated_at: DateTime<Utc>,
    /// SHA-256 of the serialized config that produced these scores
    pub config_hash: String,
    /// Input folder, or a label for in-memory batches
    pub source: String,
    pub cgpa_stats: Option<CgpaStats>,
    pub results: Vec<RankedResult>,
    pub skipped: Vec<SkippedDocument>,
}

/// One row of the `compact` output format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompactEntry {
    pub resume: String,
    pub score: f64,
    pub rank: usize,
}

impl RankingReport {
    pub fn from_stages(source: &str, config_hash: String, stages: PipelineStages) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            config_hash,
            source: source.to_string(),
            cgpa_stats: stages.cgpa_stats,
            results: stages.ranked,
            skipped: stages.skipped,
        }
    }

    /// First `n` ranked results (fewer when the batch is smaller)
    pub fn top(&self, n: usize) -> &[RankedResult] {
        &self.results[..n.min(self.results.len())]
    }

    pub fn compact(&self, n: usize) -> Vec<CompactEntry> {
        self.top(n)
            .iter()
            .map(|r| CompactEntry {
                resume: r.resume.clone(),
                score: r.score,
                rank: r.rank,
            })
            .collect()
    }

    /// Render as JSON: `compact` is the top-N rows, anything else the full report
    pub fn to_json(&self, format: &str, top_n: usize) -> Result<String> {
        let json = match format {
            "compact" => serde_json::to_string_pretty(&self.compact(top_n))?,
            _ => serde_json::to_string_pretty(self)?,
        };
        Ok(json)
    }

    pub fn save_with_format(&self, path: &str, format: &str, top_n: usize) -> Result<()> {
        let json = self.to_json(format, top_n)?;
        std::fs::write(path, json).with_context(|| format!("Failed to write report to {path}"))?;
        Ok(())
    }
}

/// Fingerprint of a config, so a report can be matched to the settings behind it
pub fn calculate_config_hash<T: Serialize>(config: &T) -> Result<String> {
    let config_json = serde_json::to_string(config)
        .map_err(|e| anyhow!("Failed to serialize config for hashing: {}", e))?;

    let mut hasher = Sha256::new();
    hasher.update(config_json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}
