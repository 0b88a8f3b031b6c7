//! Dictionary-free new-word discovery.
//!
//! This crate finds candidate words in unsegmented text (typically Chinese)
//! from statistics alone:
//! - Substring frequency with left/right neighbor histograms
//! - Internal cohesion (weakest-split PMI)
//! - Contextual freedom (branching entropy, neighbor diversity)
//! - Threshold filters, each producing a new table
//! - Greedy resegmentation of the corpus with the surviving pairs
//!
//! The [`discovery::Discoverer`] runs the whole pipeline; every stage is
//! also exposed on its own.

/// Blacklist of candidates never to report.
pub mod blacklist;

/// Run configuration (`DiscoveryConfig`) and per-length PMI thresholds.
pub mod config;

/// Corpus reading and sentence normalization.
pub mod corpus;

/// High-level pipeline driver.
pub mod discovery;

/// Error type shared by every stage.
pub mod error;

/// Frequency, blacklist, cohesion, entropy and nav filters.
pub mod filter;

/// Tab-separated and JSON reports.
pub mod report;

/// Cohesion and freedom scores.
pub mod score;

/// Greedy word segmentation from cohesive pairs.
pub mod segment;

/// N-gram counting.
pub mod stats;

/// Stage records and the generic candidate table.
pub mod table;

/// I/O utilities (file loading, path helpers).
///
/// Not exposed
pub(crate) mod io;

pub use error::{DiscoveryError, Result};
