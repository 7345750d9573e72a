// Shortlist Core Library
//
// Resume ranking with pluggable document readers.
// Main interface for turning a folder of resumes into a ranked report.

pub mod types;
pub mod readers;
pub mod processor;
pub mod config;
pub mod rules;
pub mod scoring;
pub mod report;

// Re-export main types and functions for easy use
pub use types::*;
pub use readers::{DocumentReader, DocxReader, FormatDispatcher, PlainTextReader, ReadError};
pub use processor::{PipelineStages, RankingPipeline, StepProfiler};
pub use config::RankingConfig;
pub use report::{CompactEntry, RankingReport};
pub use rules::{FieldExtractor, RuleEngine, SensitiveInfoRedactor, TextNormalizer};
pub use scoring::{CgpaNormalizer, Scorer};

// Re-export the PDF reader for direct use
#[cfg(feature = "pdf-backend")]
pub use readers::PdfReader;
