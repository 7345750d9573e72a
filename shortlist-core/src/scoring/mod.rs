// Batch scoring:
// - normalization: CGPA min-max over the batch
// - scorer: weighted, capped composite score per resume
// - ranking: stable descending order with positional ranks

pub mod normalization;
pub mod ranking;
pub mod scorer;

pub use normalization::CgpaNormalizer;
pub use ranking::rank;
pub use scorer::Scorer;
