use std::collections::HashMap;
use std::collections::hash_map;
use std::sync::mpsc;
use std::thread;

use log::debug;

use super::context::{ContextHistogram, Neighbor};
use crate::error::{DiscoveryError, Result};

/// Raw statistics of one candidate: how often it occurs and what surrounds it.
///
/// # Invariants
/// - `count == left.total() == right.total()`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NGramStats {
	count: u64,
	left: ContextHistogram,
	right: ContextHistogram,
}

impl NGramStats {
	/// Total occurrences of the candidate.
	pub fn count(&self) -> u64 {
		self.count
	}

	/// Histogram of the characters immediately before the candidate.
	pub fn left(&self) -> &ContextHistogram {
		&self.left
	}

	/// Histogram of the characters immediately after the candidate.
	pub fn right(&self) -> &ContextHistogram {
		&self.right
	}

	fn observe(&mut self, left: Neighbor, right: Neighbor) {
		self.count += 1;
		self.left.observe(left);
		self.right.observe(right);
	}

	fn merge(&mut self, other: &Self) {
		self.count += other.count;
		self.left.merge(&other.left);
		self.right.merge(&other.right);
	}
}

/// Frequency table of every substring of length `1..=max_order` in a corpus.
///
/// The `NGramTable` is filled by a single pass over the sentences and is
/// read-only afterwards: scoring and filtering stages borrow it and build
/// their own tables.
///
/// # Responsibilities
/// - Count each substring occurrence together with its left and right neighbor
/// - Track `total_cnt`, the number of (position, order) observations
/// - Merge with another table of the same order (partitioned counting)
///
/// # Invariants
/// - `max_order` is always >= 1
/// - Every substring of an observed candidate is itself present
#[derive(Clone, Debug, PartialEq)]
pub struct NGramTable {
	/// Longest candidate recorded
	max_order: usize,

	/// Number of (start, order) observations across the corpus
	total_cnt: u64,

	/// Mapping from candidate to its statistics
	entries: HashMap<String, NGramStats>,
}

impl NGramTable {
	/// Creates an empty table recording candidates up to `max_order` characters.
	///
	/// # Errors
	/// Returns an error if `max_order` is 0.
	pub fn new(max_order: usize) -> Result<Self> {
		if max_order == 0 {
			return Err(DiscoveryError::InvalidConfig("max_order must be >= 1".to_owned()));
		}
		Ok(Self { max_order, total_cnt: 0, entries: HashMap::new() })
	}

	/// Builds a table from `sentences` on the calling thread.
	pub fn from_sentences<S: AsRef<str>>(sentences: &[S], max_order: usize) -> Result<Self> {
		let mut table = Self::new(max_order)?;
		for sentence in sentences {
			table.add_sentence(sentence.as_ref());
		}
		Ok(table)
	}

	/// Splits `sentences` into chunks, counts each chunk on its own thread and
	/// merges the partial tables.
	///
	/// # Behavior
	/// - Chunk count is based on CPU cores * factor.
	/// - Partial tables are collected over an MPSC channel.
	/// - The result is identical to [`NGramTable::from_sentences`]: merging
	///   only sums counts, so the partitioning does not matter.
	pub fn from_sentences_parallel<S: AsRef<str> + Sync>(sentences: &[S], max_order: usize) -> Result<Self> {
		let mut final_table = Self::new(max_order)?;
		if sentences.is_empty() {
			return Ok(final_table);
		}

		let cpus = num_cpus::get();
		let factor = 8;
		let chunks = cpus * factor;
		let chunk_size = sentences.len().div_ceil(chunks);

		let (tx, rx) = mpsc::channel();
		thread::scope(|scope| {
			for chunk in sentences.chunks(chunk_size) {
				let tx = tx.clone();
				scope.spawn(move || {
					let mut partial = NGramTable { max_order, total_cnt: 0, entries: HashMap::new() };
					for sentence in chunk {
						partial.add_sentence(sentence.as_ref());
					}
					// The receiver outlives the scope, so sending cannot fail.
					let _ = tx.send(partial);
				});
			}
		});
		drop(tx);

		for partial in rx.iter() {
			debug!("merging partial table with {} candidates", partial.len());
			final_table.merge(&partial)?;
		}
		Ok(final_table)
	}

	/// Adds a sentence to the table.
	///
	/// For every start index `i` and order `n` with `i + n <= len`, records
	/// one occurrence of `sentence[i..i + n]` with its left neighbor (or
	/// `<S>`) and right neighbor (or `<E>`).
	///
	/// # Notes
	/// - UTF-8 safe: works on characters, not bytes.
	/// - Empty sentences are a no-op; sentences shorter than `max_order` only
	///   contribute the orders that fit.
	pub fn add_sentence(&mut self, sentence: &str) {
		let chars: Vec<char> = sentence.chars().collect();
		let len = chars.len();

		for i in 0..len {
			let left = if i == 0 { Neighbor::Start } else { Neighbor::Char(chars[i - 1]) };
			for n in 1..=self.max_order {
				let end = i + n;
				if end > len {
					break;
				}
				let right = if end == len { Neighbor::End } else { Neighbor::Char(chars[end]) };
				let token: String = chars[i..end].iter().collect();

				self.total_cnt += 1;
				self.entries.entry(token).or_default().observe(left, right);
			}
		}
	}

	/// Merges another table into this one.
	///
	/// # Errors
	/// Returns an error if the table orders do not match.
	pub fn merge(&mut self, other: &Self) -> Result<()> {
		if self.max_order != other.max_order {
			return Err(DiscoveryError::OrderMismatch { expected: self.max_order, found: other.max_order });
		}

		for (token, stats) in &other.entries {
			if let Some(existing) = self.entries.get_mut(token) {
				existing.merge(stats);
			} else {
				self.entries.insert(token.clone(), stats.clone());
			}
		}
		self.total_cnt += other.total_cnt;

		Ok(())
	}

	pub fn get(&self, candidate: &str) -> Option<&NGramStats> {
		self.entries.get(candidate)
	}

	pub fn max_order(&self) -> usize {
		self.max_order
	}

	/// Grand total of observations, used to normalize PMI.
	pub fn total_cnt(&self) -> u64 {
		self.total_cnt
	}

	/// Number of distinct candidates.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn iter(&self) -> hash_map::Iter<'_, String, NGramStats> {
		self.entries.iter()
	}
}

impl<'a> IntoIterator for &'a NGramTable {
	type Item = (&'a String, &'a NGramStats);
	type IntoIter = hash_map::Iter<'a, String, NGramStats>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.iter()
	}
}
