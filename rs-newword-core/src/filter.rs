//! Threshold filters over candidate tables.
//!
//! Each filter borrows a table and returns a new, smaller one. Kept records
//! are cloned unchanged, so filtering twice with the same threshold is a
//! no-op and a stricter threshold always keeps a subset.

use log::info;

use crate::blacklist::Blacklist;
use crate::config::{MinPmi, UnigramPolicy};
use crate::error::{DiscoveryError, Result, Stage};
use crate::table::{Candidate, CandidateTable, FreedomStats};

/// Keeps candidates occurring at least `min_freq` times.
pub fn by_frequency<R: Candidate>(table: &CandidateTable<R>, min_freq: u64) -> CandidateTable<R> {
	let filtered = table.select(|_, record| record.count() >= min_freq);
	info!("frequency filter (>= {min_freq}): {} -> {}", table.len(), filtered.len());
	filtered
}

/// Drops candidates listed in `blacklist`.
pub fn by_blacklist<R: Candidate>(table: &CandidateTable<R>, blacklist: &Blacklist) -> CandidateTable<R> {
	let filtered = table.select(|candidate, _| !blacklist.contains(candidate));
	info!("blacklist filter: {} -> {}", table.len(), filtered.len());
	filtered
}

/// Keeps candidates whose PMI exceeds the threshold configured for their length.
///
/// Single characters have no PMI and are handled by `unigrams`.
///
/// # Errors
/// - `MissingThreshold` if `min_pmi` has no entry for a candidate length
/// - `MissingScore` if a candidate of two or more characters was never scored
pub fn by_cohesion<R: Candidate>(
	table: &CandidateTable<R>,
	min_pmi: &MinPmi,
	unigrams: UnigramPolicy,
) -> Result<CandidateTable<R>> {
	let filtered = table.try_select(|candidate, record| {
		let len = candidate.chars().count();
		if len < 2 {
			return Ok(unigrams == UnigramPolicy::Exempt);
		}

		let threshold = min_pmi.threshold(len).ok_or(DiscoveryError::MissingThreshold(len))?;
		let pmi = record.pmi().ok_or_else(|| DiscoveryError::MissingScore {
			stage: Stage::Filter,
			candidate: candidate.to_owned(),
			score: "pmi",
		})?;
		Ok(pmi > threshold)
	})?;

	info!("cohesion filter ({unigrams:?} unigrams): {} -> {}", table.len(), filtered.len());
	Ok(filtered)
}

/// Keeps candidates free on both sides: left AND right entropy above `min_entropy`.
pub fn by_entropy(table: &CandidateTable<FreedomStats>, min_entropy: f64) -> CandidateTable<FreedomStats> {
	let filtered = table.select(|_, record| {
		record.left_entropy() > min_entropy && record.right_entropy() > min_entropy
	});
	info!("entropy filter (> {min_entropy}): {} -> {}", table.len(), filtered.len());
	filtered
}

/// Keeps candidates whose neighbor diversity exceeds `min_nav`.
///
/// # Errors
/// `MissingScore` if a candidate has no `nav` score.
pub fn by_nav<R: Candidate>(table: &CandidateTable<R>, min_nav: f64) -> Result<CandidateTable<R>> {
	let filtered = table.try_select(|candidate, record| {
		let nav = record.nav().ok_or_else(|| DiscoveryError::MissingScore {
			stage: Stage::Filter,
			candidate: candidate.to_owned(),
			score: "nav",
		})?;
		Ok(nav > min_nav)
	})?;

	info!("nav filter (> {min_nav}): {} -> {}", table.len(), filtered.len());
	Ok(filtered)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::score::{attach_entropy, attach_nav, attach_pmi};
	use crate::stats::NGramTable;
	use crate::table::ScoredStats;

	fn scored(sentences: &[&str], max_order: usize) -> CandidateTable<ScoredStats> {
		let table = NGramTable::from_sentences(sentences, max_order).unwrap();
		attach_pmi(&table).unwrap()
	}

	fn corpus() -> Vec<&'static str> {
		let mut sentences = vec!["北京天安门"; 20];
		sentences.extend(["我爱北京", "北京大学", "天安门广场", "去北京"]);
		sentences
	}

	#[test]
	fn test_frequency_filter() {
		let table = scored(&corpus(), 4);
		let filtered = by_frequency(&table, 21);

		assert!(filtered.contains("北京"));
		assert!(filtered.contains("天安门"));
		assert!(!filtered.contains("北京天"));
		assert!(filtered.iter().all(|(_, r)| r.count() >= 21));
		// the input is untouched
		assert!(table.contains("北京天"));
	}

	#[test]
	fn test_blacklist_filter() {
		let table = scored(&corpus(), 2);
		let blacklist = Blacklist::from_lines(["北京", "天安"]);
		let filtered = by_blacklist(&table, &blacklist);

		assert!(!filtered.contains("北京"));
		assert!(!filtered.contains("天安"));
		assert!(filtered.contains("安门"));
		assert_eq!(filtered.len(), table.len() - 2);
	}

	#[test]
	fn test_cohesion_unigram_policy() {
		let table = scored(&corpus(), 2);
		let min_pmi = MinPmi::uniform(0.0, 2);

		let excluded = by_cohesion(&table, &min_pmi, UnigramPolicy::Exclude).unwrap();
		assert!(excluded.keys().all(|k| k.chars().count() == 2));

		let exempt = by_cohesion(&table, &min_pmi, UnigramPolicy::Exempt).unwrap();
		assert!(exempt.contains("北"));
		assert!(exempt.contains("北京"));
	}

	#[test]
	fn test_cohesion_missing_threshold() {
		let table = scored(&corpus(), 3);
		let err = by_cohesion(&table, &MinPmi::uniform(0.0, 2), UnigramPolicy::Exclude).unwrap_err();
		assert!(matches!(err, DiscoveryError::MissingThreshold(3)));
	}

	#[test]
	fn test_cohesion_is_monotonic() {
		let table = scored(&corpus(), 4);
		let loose = by_cohesion(&table, &MinPmi::uniform(2.0, 4), UnigramPolicy::Exclude).unwrap();
		let strict = by_cohesion(&table, &MinPmi::uniform(4.0, 4), UnigramPolicy::Exclude).unwrap();

		assert!(strict.len() <= loose.len());
		assert!(strict.keys().all(|k| loose.contains(k)));
	}

	#[test]
	fn test_filters_are_idempotent() {
		let table = scored(&corpus(), 4);
		let once = by_frequency(&table, 5);
		let twice = by_frequency(&once, 5);
		assert_eq!(once, twice);

		let min_pmi = MinPmi::uniform(3.0, 4);
		let once = by_cohesion(&table, &min_pmi, UnigramPolicy::Exempt).unwrap();
		let twice = by_cohesion(&once, &min_pmi, UnigramPolicy::Exempt).unwrap();
		assert_eq!(once, twice);
	}

	#[test]
	fn test_entropy_requires_both_sides() {
		// "ab" is free on the left, fixed on the right
		let table = scored(&["xab", "yab", "zab", "ab"], 2);
		let freedom = attach_entropy(&table).unwrap();
		let ab = freedom.get("ab").unwrap();
		assert!(ab.left_entropy() > 1.0);
		assert_eq!(ab.right_entropy(), 0.0);

		let filtered = by_entropy(&freedom, 1.0);
		assert!(!filtered.contains("ab"));
	}

	#[test]
	fn test_nav_filter() {
		let table = scored(&["xaby", "zabw", "ab"], 2);
		let with_nav = attach_nav(&table).unwrap();

		// "ab": 3 distinct on each side, count 3 -> nav 3
		let filtered = by_nav(&with_nav, 2.5).unwrap();
		assert!(filtered.contains("ab"));
		let filtered = by_nav(&with_nav, 3.0).unwrap();
		assert!(!filtered.contains("ab"));
	}

	#[test]
	fn test_nav_filter_requires_score() {
		let table = scored(&["ab"], 2);
		let err = by_nav(&table, 1.0).unwrap_err();
		assert!(matches!(err, DiscoveryError::MissingScore { score: "nav", .. }));
	}
}
