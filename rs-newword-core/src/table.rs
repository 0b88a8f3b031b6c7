use std::collections::HashMap;
use std::collections::hash_map;

use serde::Serialize;

use crate::error::Result;
use crate::stats::{ContextHistogram, NGramStats};

/// Read access shared by every per-candidate record, whatever stage produced it.
pub trait Candidate: Clone {
	/// Total occurrences of the candidate in the corpus.
	fn count(&self) -> u64;

	/// Cohesion score, `None` for single characters or before scoring.
	fn pmi(&self) -> Option<f64> {
		None
	}

	/// Neighbor-diversity score, `None` before scoring.
	fn nav(&self) -> Option<f64> {
		None
	}
}

/// Candidate record after cohesion (and optionally nav) scoring.
///
/// Still carries the raw context histograms, so neighbor-based scores can be
/// derived from it.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ScoredStats {
	#[serde(rename = "cnt")]
	count: u64,
	left: ContextHistogram,
	right: ContextHistogram,
	#[serde(skip_serializing_if = "Option::is_none")]
	pmi: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	nav: Option<f64>,
}

impl ScoredStats {
	pub(crate) fn new(stats: &NGramStats, pmi: Option<f64>) -> Self {
		Self {
			count: stats.count(),
			left: stats.left().clone(),
			right: stats.right().clone(),
			pmi,
			nav: None,
		}
	}

	pub(crate) fn with_nav(&self, nav: f64) -> Self {
		Self { nav: Some(nav), ..self.clone() }
	}

	pub fn left(&self) -> &ContextHistogram {
		&self.left
	}

	pub fn right(&self) -> &ContextHistogram {
		&self.right
	}
}

impl Candidate for ScoredStats {
	fn count(&self) -> u64 {
		self.count
	}

	fn pmi(&self) -> Option<f64> {
		self.pmi
	}

	fn nav(&self) -> Option<f64> {
		self.nav
	}
}

/// Candidate record after branching entropy has replaced the histograms.
///
/// There is no way back to [`ScoredStats`]: the per-neighbor counts are gone.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct FreedomStats {
	#[serde(rename = "cnt")]
	count: u64,
	#[serde(skip_serializing_if = "Option::is_none")]
	pmi: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	nav: Option<f64>,
	left_entropy: f64,
	right_entropy: f64,
}

impl FreedomStats {
	pub(crate) fn new(stats: &ScoredStats, left_entropy: f64, right_entropy: f64) -> Self {
		Self {
			count: stats.count,
			pmi: stats.pmi,
			nav: stats.nav,
			left_entropy,
			right_entropy,
		}
	}

	pub fn left_entropy(&self) -> f64 {
		self.left_entropy
	}

	pub fn right_entropy(&self) -> f64 {
		self.right_entropy
	}
}

impl Candidate for FreedomStats {
	fn count(&self) -> u64 {
		self.count
	}

	fn pmi(&self) -> Option<f64> {
		self.pmi
	}

	fn nav(&self) -> Option<f64> {
		self.nav
	}
}

/// Mapping from candidate string to the record of one pipeline stage.
///
/// Every stage borrows a table and returns a new one; a table is never
/// shrunk or rescored in place, so earlier tables stay available for
/// re-running later stages with other thresholds.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(transparent)]
pub struct CandidateTable<R> {
	entries: HashMap<String, R>,
}

impl<R> CandidateTable<R> {
	pub fn new() -> Self {
		Self { entries: HashMap::new() }
	}

	pub fn get(&self, candidate: &str) -> Option<&R> {
		self.entries.get(candidate)
	}

	pub fn contains(&self, candidate: &str) -> bool {
		self.entries.contains_key(candidate)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn iter(&self) -> hash_map::Iter<'_, String, R> {
		self.entries.iter()
	}

	pub fn keys(&self) -> hash_map::Keys<'_, String, R> {
		self.entries.keys()
	}

	pub(crate) fn insert(&mut self, candidate: String, record: R) {
		self.entries.insert(candidate, record);
	}
}

impl<R: Clone> CandidateTable<R> {
	/// Returns a new table holding clones of the entries accepted by `keep`.
	pub fn select<F>(&self, mut keep: F) -> Self
	where
		F: FnMut(&str, &R) -> bool,
	{
		self.entries
			.iter()
			.filter(|(candidate, record)| keep(candidate, record))
			.map(|(candidate, record)| (candidate.clone(), record.clone()))
			.collect()
	}

	/// Like [`CandidateTable::select`], for predicates that can fail.
	pub fn try_select<F>(&self, mut keep: F) -> Result<Self>
	where
		F: FnMut(&str, &R) -> Result<bool>,
	{
		let mut selected = Self::new();
		for (candidate, record) in &self.entries {
			if keep(candidate, record)? {
				selected.insert(candidate.clone(), record.clone());
			}
		}
		Ok(selected)
	}
}

impl<R> Default for CandidateTable<R> {
	fn default() -> Self {
		Self::new()
	}
}

impl<R> FromIterator<(String, R)> for CandidateTable<R> {
	fn from_iter<I: IntoIterator<Item = (String, R)>>(iter: I) -> Self {
		Self { entries: iter.into_iter().collect() }
	}
}

impl<'a, R> IntoIterator for &'a CandidateTable<R> {
	type Item = (&'a String, &'a R);
	type IntoIter = hash_map::Iter<'a, String, R>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.iter()
	}
}
