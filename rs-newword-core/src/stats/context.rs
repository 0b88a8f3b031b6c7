use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

/// Symbol observed immediately before or after a candidate.
///
/// `Start` and `End` stand in for "no neighbor" when the candidate touches a
/// sentence boundary. They render as `<S>` and `<E>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Neighbor {
	Start,
	Char(char),
	End,
}

impl fmt::Display for Neighbor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Neighbor::Start => f.write_str("<S>"),
			Neighbor::End => f.write_str("<E>"),
			Neighbor::Char(c) => write!(f, "{c}"),
		}
	}
}

impl Serialize for Neighbor {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

/// Histogram of the neighbors seen on one side of a candidate.
///
/// Conceptually, this is the fan-out of a node in a character graph:
/// every occurrence of the candidate contributes exactly one observation.
///
/// ## Responsibilities:
/// - Accumulate neighbor observations while counting
/// - Expose total and distinct counts for the freedom scores
/// - Merge with another histogram (partitioned counting)
///
/// ## Invariants
/// - Each stored count is strictly positive
/// - Neighbors are kept in `Neighbor` order
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct ContextHistogram {
	/// Example: { '<S>' => 42, '京' => 3 }
	counts: BTreeMap<Neighbor, u64>,
}

impl ContextHistogram {
	/// Creates a new empty histogram.
	pub fn new() -> Self {
		Self { counts: BTreeMap::new() }
	}

	/// Records one occurrence of `neighbor`.
	pub fn observe(&mut self, neighbor: Neighbor) {
		*self.counts.entry(neighbor).or_insert(0) += 1;
	}

	/// Returns how many times `neighbor` was observed (0 if never).
	pub fn get(&self, neighbor: &Neighbor) -> u64 {
		self.counts.get(neighbor).copied().unwrap_or(0)
	}

	/// Sum of all observations.
	pub fn total(&self) -> u64 {
		self.counts.values().sum()
	}

	/// Number of distinct neighbor symbols.
	pub fn distinct(&self) -> usize {
		self.counts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}

	/// Iterates over `(neighbor, count)` pairs, `<S>` first, then characters, then `<E>`.
	pub fn iter(&self) -> impl Iterator<Item = (&Neighbor, u64)> {
		self.counts.iter().map(|(neighbor, count)| (neighbor, *count))
	}

	/// Merges another histogram into this one by summing counts.
	pub fn merge(&mut self, other: &Self) {
		for (neighbor, count) in &other.counts {
			*self.counts.entry(*neighbor).or_insert(0) += *count;
		}
	}
}

impl FromIterator<(Neighbor, u64)> for ContextHistogram {
	fn from_iter<I: IntoIterator<Item = (Neighbor, u64)>>(iter: I) -> Self {
		let mut histogram = Self::new();
		for (neighbor, count) in iter {
			if count > 0 {
				*histogram.counts.entry(neighbor).or_insert(0) += count;
			}
		}
		histogram
	}
}
