// Main rules module - delegates to semantic sub-modules
// This file coordinates the rule system but actual implementations are in:
// - engine.rs: RuleEngine and the TextRule pass trait
// - normalization.rs: lowercasing and whitespace collapsing
// - redaction.rs: sensitive-information deletion
// - extraction.rs: catalog and pattern based field extraction
// - cgpa.rs: raw CGPA priority chain

pub mod cgpa;
pub mod engine;
pub mod extraction;
pub mod normalization;
pub mod redaction;

pub use cgpa::{CgpaExtractor, CgpaMatch, CgpaRule};
pub use engine::{RuleEngine, TextRule};
pub use extraction::FieldExtractor;
pub use normalization::TextNormalizer;
pub use redaction::SensitiveInfoRedactor;
