use crate::config::RankingConfig;
use crate::readers::{DocumentReader, FormatDispatcher, ReadError};
use crate::report::{calculate_config_hash, RankingReport};
use crate::rules::RuleEngine;
use crate::scoring::{rank, CgpaNormalizer, Scorer};
use crate::types::*;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Captured intermediate outputs from each pipeline stage
/// Used for testing and diagnostics; lets you inspect/compare each boundary
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct PipelineStages {
    pub records: Vec<ResumeRecord>,
    pub skipped: Vec<SkippedDocument>,
    pub cgpa_stats: Option<CgpaStats>,
    pub scored: Vec<ScoredResume>,
    pub ranked: Vec<RankedResult>,
}

/// Simple profiler that collects timings for pipeline steps
pub struct StepProfiler {
    enabled: bool,
    timings: Vec<(String, Duration)>,
}

impl StepProfiler {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            timings: Vec::new(),
        }
    }

    pub fn time_step<F, R>(&mut self, step_name: &str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        if !self.enabled {
            return f();
        }

        let start = Instant::now();
        let result = f();
        let elapsed = start.elapsed();

        self.timings.push((step_name.to_string(), elapsed));
        tracing::info!("⏱️  {}: {}ms", step_name, elapsed.as_millis());

        result
    }

    pub fn timings(&self) -> &[(String, Duration)] {
        &self.timings
    }

    pub fn print_summary(&self) {
        if !self.enabled || self.timings.is_empty() {
            return;
        }

        println!("\n📊 Performance Summary:");
        let total: Duration = self.timings.iter().map(|(_, d)| *d).sum();

        for (step, duration) in &self.timings {
            let percentage = if total.is_zero() {
                0.0
            } else {
                (duration.as_secs_f64() / total.as_secs_f64()) * 100.0
            };
            println!(
                "   {:.<35} {}ms ({:.1}%)",
                step,
                duration.as_millis(),
                percentage
            );
        }
        println!("   {:.<35} {}ms", "Total", total.as_millis());
    }
}

/// A document that produced text, or the reason it was dropped
type LoadedDocuments = (Vec<(String, String)>, Vec<SkippedDocument>);

/// RankingPipeline - folder of resumes in, ranked report out.
///
/// Stages: read documents -> normalize/redact/extract per resume -> batch
/// CGPA statistics -> score -> rank. A document that cannot be read is
/// skipped and recorded; only an unusable input folder is an error.
pub struct RankingPipeline {
    reader: Box<dyn DocumentReader>,
    engine: RuleEngine,
    scorer: Scorer,
    config: RankingConfig,
}

impl RankingPipeline {
    /// Pipeline with the default PDF/DOCX/plain-text readers
    pub fn new(config: RankingConfig) -> Result<Self> {
        Self::new_with_reader(Box::new(FormatDispatcher::new()), config)
    }

    /// Create RankingPipeline with a custom document reader
    pub fn new_with_reader(reader: Box<dyn DocumentReader>, config: RankingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            reader,
            engine: RuleEngine::new(&config)?,
            scorer: Scorer::new(&config.scoring),
            config,
        })
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// Rank every resume directly inside `dir`
    pub fn rank_directory(&self, dir: &Path) -> Result<RankingReport> {
        self.rank_directory_with_profiling(dir, false)
    }

    pub fn rank_directory_with_profiling(
        &self,
        dir: &Path,
        enable_profiling: bool,
    ) -> Result<RankingReport> {
        let start_time = Instant::now();
        let mut profiler = StepProfiler::new(enable_profiling);

        let candidates = profiler.time_step("1. Directory Listing", || collect_candidates(dir))?;
        tracing::info!("📂 Found {} candidate files in {}", candidates.len(), dir.display());

        let (documents, skipped) =
            profiler.time_step("2. Document Reading", || self.load_documents(&candidates));
        let stages = self.run_stages(documents, skipped, &mut profiler);

        profiler.print_summary();
        tracing::info!(
            "⏱️  Total ranking time: {:.3}s",
            start_time.elapsed().as_secs_f64()
        );
        self.build_report(&dir.display().to_string(), stages)
    }

    /// Rank in-memory `(name, text)` pairs; input order is the tie-break order
    pub fn rank_texts(&self, documents: Vec<(String, String)>) -> Result<RankingReport> {
        let stages = self.capture_text_stages(documents);
        self.build_report("<memory>", stages)
    }

    /// Process a folder and capture all intermediate stage outputs
    /// Used for pipeline diagnostics and testing stage boundaries
    pub fn capture_stages(&self, dir: &Path) -> Result<PipelineStages> {
        let candidates = collect_candidates(dir)?;
        let (documents, skipped) = self.load_documents(&candidates);
        Ok(self.run_stages(documents, skipped, &mut StepProfiler::new(false)))
    }

    pub fn capture_text_stages(&self, documents: Vec<(String, String)>) -> PipelineStages {
        let mut kept = Vec::with_capacity(documents.len());
        let mut skipped = Vec::new();
        for (name, text) in documents {
            if text.is_empty() {
                skipped.push(skip(&name, &ReadError::Empty));
            } else {
                kept.push((name, text));
            }
        }
        self.run_stages(kept, skipped, &mut StepProfiler::new(false))
    }

    fn build_report(&self, source: &str, stages: PipelineStages) -> Result<RankingReport> {
        let config_hash = calculate_config_hash(&self.config)?;
        Ok(RankingReport::from_stages(source, config_hash, stages))
    }

    /// Read every candidate; failures become skip records, never errors
    fn load_documents(&self, candidates: &[PathBuf]) -> LoadedDocuments {
        let mut documents = Vec::with_capacity(candidates.len());
        let mut skipped = Vec::new();

        for path in candidates {
            let name = resume_name(path);
            let text = self.reader.read_file(path).and_then(|text| {
                if text.is_empty() {
                    Err(ReadError::Empty)
                } else {
                    Ok(text)
                }
            });
            match text {
                Ok(text) => documents.push((name, text)),
                Err(e) => skipped.push(skip(&name, &e)),
            }
        }

        (documents, skipped)
    }

    fn run_stages(
        &self,
        documents: Vec<(String, String)>,
        skipped: Vec<SkippedDocument>,
        profiler: &mut StepProfiler,
    ) -> PipelineStages {
        // Stage 1: Text -> ResumeRecord (normalize, redact, extract)
        let records: Vec<ResumeRecord> = profiler.time_step("3. Field Extraction", || {
            documents
                .into_iter()
                .map(|(resume, text)| {
                    let signals = self.engine.analyze(&text);
                    tracing::debug!(
                        resume = %resume,
                        skills = signals.skills.len(),
                        experience_years = signals.experience_years,
                        raw_cgpa = ?signals.raw_cgpa,
                        "extracted signals"
                    );
                    ResumeRecord { resume, signals }
                })
                .collect()
        });

        // Stage 2: batch CGPA statistics (needs every record)
        let normalizer =
            profiler.time_step("4. CGPA Statistics", || CgpaNormalizer::from_records(&records));
        let cgpa_stats = normalizer.stats();

        // Stage 3: score each record
        let scored: Vec<ScoredResume> = profiler.time_step("5. Scoring", || {
            records
                .iter()
                .map(|record| {
                    let normalized_cgpa = normalizer.normalize(record.signals.raw_cgpa);
                    let (score, breakdown) = self.scorer.score(&record.signals, normalized_cgpa);
                    ScoredResume {
                        resume: record.resume.clone(),
                        score,
                        normalized_cgpa,
                        breakdown,
                    }
                })
                .collect()
        });

        // Stage 4: order and assign ranks
        let ranked = profiler.time_step("6. Ranking", || rank(scored.clone()));

        tracing::info!(
            "📋 Ranked {} resumes, skipped {}",
            ranked.len(),
            skipped.len()
        );

        PipelineStages {
            records,
            skipped,
            cgpa_stats,
            scored,
            ranked,
        }
    }
}

fn skip(name: &str, error: &ReadError) -> SkippedDocument {
    tracing::warn!("⚠️  Skipping {name}: {error}");
    SkippedDocument {
        resume: name.to_string(),
        reason: error.to_string(),
    }
}

fn resume_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Regular files directly inside `dir`, sorted by file name
fn collect_candidates(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read resume folder {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry =
            entry.with_context(|| format!("Failed to list resume folder {}", dir.display()))?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
