use log::info;

use crate::error::{DiscoveryError, Result, Side, Stage};
use crate::stats::ContextHistogram;
use crate::table::{Candidate, CandidateTable, FreedomStats, ScoredStats};

/// Shannon entropy, in bits, of the neighbor distribution of `histogram`.
///
/// Returns `None` for an empty histogram, whose distribution is undefined.
pub fn branching_entropy(histogram: &ContextHistogram) -> Option<f64> {
	let total = histogram.total();
	if total == 0 {
		return None;
	}

	let total = total as f64;
	let entropy = histogram
		.iter()
		.filter(|(_, count)| *count > 0)
		.map(|(_, count)| {
			let p = count as f64 / total;
			-p * p.log2()
		})
		.sum::<f64>();

	// A single-symbol histogram sums to -0.0
	Some(entropy.max(0.0))
}

/// Neighbor diversity: `min(|left|, |right|)² / count`.
///
/// `|left|` and `|right|` are the numbers of distinct neighbor symbols.
pub fn neighbor_diversity(left: &ContextHistogram, right: &ContextHistogram, count: u64) -> Option<f64> {
	if count == 0 {
		return None;
	}
	let diversity = left.distinct().min(right.distinct()) as f64;
	Some(diversity * diversity / count as f64)
}

/// Returns a copy of `table` with the `nav` score set on every candidate.
///
/// Must run before [`attach_entropy`], which drops the histograms.
pub fn attach_nav(table: &CandidateTable<ScoredStats>) -> Result<CandidateTable<ScoredStats>> {
	let mut scored = CandidateTable::new();
	for (token, stats) in table {
		let nav = neighbor_diversity(stats.left(), stats.right(), stats.count())
			.ok_or_else(|| DiscoveryError::ZeroCount { stage: Stage::Nav, candidate: token.clone() })?;
		scored.insert(token.clone(), stats.with_nav(nav));
	}

	info!("computed nav for {} candidates", scored.len());
	Ok(scored)
}

/// Replaces both context histograms of every candidate by their branching entropy.
///
/// # Errors
/// An empty histogram cannot come out of counting; meeting one is reported
/// as `EmptyHistogram` instead of producing a made-up score.
pub fn attach_entropy(table: &CandidateTable<ScoredStats>) -> Result<CandidateTable<FreedomStats>> {
	let mut scored = CandidateTable::new();
	for (token, stats) in table {
		let left = side_entropy(token, stats.left(), Side::Left)?;
		let right = side_entropy(token, stats.right(), Side::Right)?;
		scored.insert(token.clone(), FreedomStats::new(stats, left, right));
	}

	info!("computed branching entropy for {} candidates", scored.len());
	Ok(scored)
}

fn side_entropy(candidate: &str, histogram: &ContextHistogram, side: Side) -> Result<f64> {
	branching_entropy(histogram).ok_or_else(|| DiscoveryError::EmptyHistogram {
		stage: Stage::Entropy,
		candidate: candidate.to_owned(),
		side,
	})
}
