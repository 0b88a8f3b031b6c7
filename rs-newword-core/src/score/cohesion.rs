use log::info;

use crate::error::{DiscoveryError, Result, Stage};
use crate::stats::NGramTable;
use crate::table::{CandidateTable, ScoredStats};

/// Scores every candidate of the table with its weakest-split PMI.
///
/// Single characters get no score. The input table is only read; the
/// returned table carries the counts and histograms along with the score.
///
/// # Errors
/// Fails on the first candidate whose parts cannot be found in `table`.
pub fn attach_pmi(table: &NGramTable) -> Result<CandidateTable<ScoredStats>> {
	let total_cnt = table.total_cnt();
	let mut scored = CandidateTable::new();

	for (token, stats) in table {
		let pmi = split_pmi(token, stats.count(), total_cnt, |part| table.get(part).map(|s| s.count()))?;
		scored.insert(token.clone(), ScoredStats::new(stats, pmi));
	}

	info!("scored {} candidates (total_cnt = {})", scored.len(), total_cnt);
	Ok(scored)
}

/// PMI of `candidate` given its own `count`, the corpus `total_cnt` and a
/// `lookup` returning the count of any substring.
///
/// For each split `candidate = head + tail`:
/// `ratio = total_cnt * count / (count(head) * count(tail))`.
/// The result is `log2` of the smallest ratio, so a candidate is only as
/// cohesive as its loosest boundary.
///
/// Returns `Ok(None)` for candidates shorter than two characters.
///
/// # Errors
/// - `MissingSubstring` if `lookup` does not know a part
/// - `ZeroCount` if a part (or the candidate) has a zero count
pub fn split_pmi<F>(candidate: &str, count: u64, total_cnt: u64, lookup: F) -> Result<Option<f64>>
where
	F: Fn(&str) -> Option<u64>,
{
	let chars: Vec<char> = candidate.chars().collect();
	if chars.len() < 2 {
		return Ok(None);
	}
	if count == 0 || total_cnt == 0 {
		return Err(DiscoveryError::ZeroCount { stage: Stage::Cohesion, candidate: candidate.to_owned() });
	}

	let joint = total_cnt as f64 * count as f64;
	let mut weakest = f64::INFINITY;
	for i in 1..chars.len() {
		let head: String = chars[..i].iter().collect();
		let tail: String = chars[i..].iter().collect();

		let head_count = part_count(candidate, &head, &lookup)?;
		let tail_count = part_count(candidate, &tail, &lookup)?;

		let ratio = joint / (head_count as f64 * tail_count as f64);
		weakest = weakest.min(ratio);
	}

	Ok(Some(weakest.log2()))
}

fn part_count<F>(candidate: &str, part: &str, lookup: &F) -> Result<u64>
where
	F: Fn(&str) -> Option<u64>,
{
	match lookup(part) {
		None => Err(DiscoveryError::MissingSubstring {
			stage: Stage::Cohesion,
			candidate: candidate.to_owned(),
			missing: part.to_owned(),
		}),
		Some(0) => Err(DiscoveryError::ZeroCount { stage: Stage::Cohesion, candidate: part.to_owned() }),
		Some(count) => Ok(count),
	}
}
