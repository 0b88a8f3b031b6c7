//! N-gram statistics: occurrence counts and neighbor histograms.
//!
//! - Context histograms for the left and right neighbors (`ContextHistogram`)
//! - The corpus-wide frequency table (`NGramTable`)

/// Neighbor symbols and per-side histograms.
pub mod context;

/// Single-pass (optionally partitioned) substring counting.
pub mod ngram_table;

pub use context::{ContextHistogram, Neighbor};
pub use ngram_table::{NGramStats, NGramTable};
