use std::collections::{BTreeMap, HashSet};

use log::info;

use crate::table::CandidateTable;

/// Order-2 candidates of a table: the pairs the resegmenter keeps together.
pub fn bigram_set<R>(table: &CandidateTable<R>) -> HashSet<String> {
	table.keys().filter(|candidate| candidate.chars().count() == 2).cloned().collect()
}

/// Greedily cuts sentences into words using a set of cohesive character pairs.
///
/// Walks each sentence keeping a growing buffer: while the pair formed by
/// the previous and the next character is in `bigrams` the buffer grows,
/// otherwise the buffer is emitted as a word and restarted. The buffer left
/// at the end of a sentence is emitted too.
///
/// Returns the words emitted at least `min_freq` times, with their counts.
pub fn find_words<S: AsRef<str>>(bigrams: &HashSet<String>, sentences: &[S], min_freq: u64) -> BTreeMap<String, u64> {
	let mut words: BTreeMap<String, u64> = BTreeMap::new();
	let mut pair = String::new();

	for sentence in sentences {
		let mut chars = sentence.as_ref().chars();
		let Some(first) = chars.next() else {
			continue;
		};

		let mut word = String::from(first);
		let mut previous = first;
		for c in chars {
			pair.clear();
			pair.push(previous);
			pair.push(c);

			if !bigrams.contains(&pair) {
				*words.entry(std::mem::take(&mut word)).or_insert(0) += 1;
			}
			word.push(c);
			previous = c;
		}
		*words.entry(word).or_insert(0) += 1;
	}

	words.retain(|_, count| *count >= min_freq);
	info!("resegmentation found {} words", words.len());
	words
}
