// All ranking functionality is in shortlist-core
// This CLI acts as a thin wrapper around the core library

// CLI-specific modules
pub mod presenter;

// Re-export core types for convenience
pub use shortlist_core::*;

// Re-export CLI utilities
pub use presenter::RankingPresenter;
