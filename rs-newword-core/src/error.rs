use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Pipeline stage reported alongside data-integrity and numeric errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
	Cohesion,
	Nav,
	Entropy,
	Filter,
}

impl fmt::Display for Stage {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Stage::Cohesion => "cohesion",
			Stage::Nav => "nav",
			Stage::Entropy => "entropy",
			Stage::Filter => "filter",
		};
		f.write_str(name)
	}
}

/// Side of a candidate a context histogram describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
	Left,
	Right,
}

impl fmt::Display for Side {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Side::Left => "left",
			Side::Right => "right",
		})
	}
}

/// Errors raised while reading a corpus, building statistics or filtering candidates.
///
/// Nothing here is retried: the discovery run is a deterministic batch job,
/// so every error aborts the run and is handed back to the caller.
#[derive(Error, Debug)]
pub enum DiscoveryError {
	#[error("illegal corpus format: {0}")]
	UnsupportedFormat(PathBuf),

	#[error("column `{column}` not found in {path}")]
	MissingColumn { path: PathBuf, column: String },

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("CSV error: {0}")]
	Csv(#[from] csv::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("invalid TOML configuration: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("invalid configuration: {0}")]
	InvalidConfig(String),

	#[error("n-gram order mismatch: {expected} vs {found}")]
	OrderMismatch { expected: usize, found: usize },

	#[error("[{stage}] `{missing}` (part of `{candidate}`) is absent from the statistics table")]
	MissingSubstring {
		stage: Stage,
		candidate: String,
		missing: String,
	},

	#[error("[{stage}] `{candidate}` has an empty {side} context histogram")]
	EmptyHistogram {
		stage: Stage,
		candidate: String,
		side: Side,
	},

	#[error("[{stage}] `{candidate}` has a zero occurrence count")]
	ZeroCount { stage: Stage, candidate: String },

	#[error("[{stage}] `{candidate}` has no {score} score")]
	MissingScore {
		stage: Stage,
		candidate: String,
		score: &'static str,
	},

	#[error("no PMI threshold configured for candidates of length {0}")]
	MissingThreshold(usize),
}

/// Result type for discovery operations
pub type Result<T> = std::result::Result<T, DiscoveryError>;
