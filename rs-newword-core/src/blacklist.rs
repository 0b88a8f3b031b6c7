use std::collections::HashSet;
use std::path::Path;

use log::{info, warn};

use crate::error::Result;
use crate::io::read_file;

/// Literal candidates that must never be reported.
///
/// Matching is exact: no case folding and no trimming beyond the line
/// terminator, so `" 北京"` and `"北京"` are different entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blacklist {
	entries: HashSet<String>,
}

impl Blacklist {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a blacklist from lines, ignoring empty ones.
	pub fn from_lines<I, S>(lines: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let entries = lines.into_iter().map(Into::into).filter(|line: &String| !line.is_empty()).collect();
		Self { entries }
	}

	/// Loads a plain-text blacklist, one entry per line.
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
		let blacklist = Self::from_lines(read_file(&path)?);
		if blacklist.is_empty() {
			warn!("blacklist {} is empty", path.as_ref().display());
		} else {
			info!("loaded {} blacklisted entries from {}", blacklist.len(), path.as_ref().display());
		}
		Ok(blacklist)
	}

	pub fn contains(&self, candidate: &str) -> bool {
		self.entries.contains(candidate)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
