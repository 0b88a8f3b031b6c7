use std::collections::BTreeMap;

use log::info;

use crate::blacklist::Blacklist;
use crate::config::{DiscoveryConfig, FreedomFilter};
use crate::error::Result;
use crate::filter;
use crate::score::{attach_entropy, attach_nav, attach_pmi};
use crate::segment;
use crate::stats::NGramTable;
use crate::table::{CandidateTable, FreedomStats, ScoredStats};

/// Tables produced by one discovery run, from raw counts to final candidates.
#[derive(Debug, Clone)]
pub struct Discovery {
	/// Raw statistics of every substring up to `max_order`
	pub statistics: NGramTable,

	/// Candidates that passed the cohesion, frequency and blacklist filters,
	/// with their PMI, nav and raw histograms
	pub cohesive: CandidateTable<ScoredStats>,

	/// Candidates that also passed the freedom filters
	pub words: CandidateTable<FreedomStats>,
}

/// High-level driver running the filter pipeline with one configuration.
///
/// # Responsibilities
/// - Count n-grams over a set of sentences
/// - Score and filter candidates in the configured order
/// - Resegment sentences with the surviving cohesive pairs
///
/// The stage order is: PMI over the full table, cohesion filter, frequency
/// filter, blacklist filter, nav, branching entropy, then the freedom filters
/// selected by [`FreedomFilter`].
#[derive(Debug, Clone)]
pub struct Discoverer {
	config: DiscoveryConfig,
	blacklist: Blacklist,
}

impl Discoverer {
	/// Creates a driver, loading the blacklist named by the configuration.
	///
	/// # Errors
	/// Returns an error if the configuration is invalid or the blacklist cannot be read.
	pub fn new(config: DiscoveryConfig) -> Result<Self> {
		config.validate()?;
		let blacklist = match &config.blacklist {
			Some(path) => Blacklist::load(path)?,
			None => Blacklist::new(),
		};
		Ok(Self { config, blacklist })
	}

	/// Replaces the blacklist (the configured file, if any, is ignored).
	pub fn with_blacklist(mut self, blacklist: Blacklist) -> Self {
		self.blacklist = blacklist;
		self
	}

	/// Effective configuration, after validation.
	pub fn config(&self) -> &DiscoveryConfig {
		&self.config
	}

	/// Counts `sentences` and runs every stage.
	pub fn run<S: AsRef<str> + Sync>(&self, sentences: &[S]) -> Result<Discovery> {
		let statistics = self.count(sentences)?;
		let (cohesive, words) = self.filter(&statistics)?;
		Ok(Discovery { statistics, cohesive, words })
	}

	/// Counting stage only.
	pub fn count<S: AsRef<str> + Sync>(&self, sentences: &[S]) -> Result<NGramTable> {
		let statistics = if self.config.parallel {
			NGramTable::from_sentences_parallel(sentences, self.config.max_order)?
		} else {
			NGramTable::from_sentences(sentences, self.config.max_order)?
		};
		info!(
			"counted {} candidates from {} sentences (total_cnt = {})",
			statistics.len(),
			sentences.len(),
			statistics.total_cnt()
		);
		Ok(statistics)
	}

	/// Scoring and filtering stages over an existing table.
	///
	/// `statistics` is only read, so the same table can be filtered again
	/// with another configuration.
	pub fn filter(
		&self,
		statistics: &NGramTable,
	) -> Result<(CandidateTable<ScoredStats>, CandidateTable<FreedomStats>)> {
		let config = &self.config;

		let scored = attach_pmi(statistics)?;
		let cohesive = filter::by_cohesion(&scored, &config.min_pmi, config.unigram_policy)?;
		let frequent = filter::by_frequency(&cohesive, config.min_freq);
		let allowed = if self.blacklist.is_empty() {
			frequent
		} else {
			filter::by_blacklist(&frequent, &self.blacklist)
		};

		let with_nav = attach_nav(&allowed)?;
		let freedom = attach_entropy(&with_nav)?;
		let words = match config.freedom_filter {
			FreedomFilter::Off => freedom,
			FreedomFilter::Nav => filter::by_nav(&freedom, config.min_nav)?,
			FreedomFilter::Entropy => filter::by_entropy(&freedom, config.min_entropy),
			FreedomFilter::Both => {
				let diverse = filter::by_nav(&freedom, config.min_nav)?;
				filter::by_entropy(&diverse, config.min_entropy)
			}
		};

		info!("found {} new words", words.len());
		Ok((with_nav, words))
	}

	/// Cuts `sentences` into words, keeping together the order-2 candidates of `cohesive`.
	pub fn resegment<S: AsRef<str>>(
		&self,
		cohesive: &CandidateTable<ScoredStats>,
		sentences: &[S],
		min_freq: u64,
	) -> BTreeMap<String, u64> {
		segment::find_words(&segment::bigram_set(cohesive), sentences, min_freq)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::MinPmi;

	fn permissive() -> DiscoveryConfig {
		DiscoveryConfig {
			max_order: 3,
			min_freq: 2,
			min_pmi: MinPmi::uniform(0.0, 3),
			freedom_filter: FreedomFilter::Off,
			..DiscoveryConfig::default()
		}
	}

	#[test]
	fn test_invalid_config_rejected() {
		let config = DiscoveryConfig { max_order: 6, ..DiscoveryConfig::default() };
		assert!(Discoverer::new(config).is_err());
	}

	#[test]
	fn test_config_is_kept_after_setup() {
		let discoverer = Discoverer::new(permissive()).unwrap();
		assert_eq!(discoverer.config(), &permissive());
		assert_eq!(discoverer.config().min_pmi.threshold(3), Some(0.0));
	}

	#[test]
	fn test_refilter_same_statistics() {
		let sentences = vec!["北京天安门"; 30];
		let loose = Discoverer::new(permissive()).unwrap();
		let statistics = loose.count(&sentences).unwrap();

		let (_, loose_words) = loose.filter(&statistics).unwrap();
		let strict = Discoverer::new(DiscoveryConfig { min_freq: 31, ..permissive() }).unwrap();
		let (_, strict_words) = strict.filter(&statistics).unwrap();

		assert!(!loose_words.is_empty());
		assert!(strict_words.is_empty());
		assert_eq!(statistics.get("北京").map(|s| s.count()), Some(30));
	}

	#[test]
	fn test_blacklist_applies() {
		let sentences = vec!["北京天安门"; 30];
		let discoverer = Discoverer::new(permissive()).unwrap().with_blacklist(Blacklist::from_lines(["北京"]));
		let discovery = discoverer.run(&sentences).unwrap();

		assert!(!discovery.cohesive.contains("北京"));
		assert!(discovery.cohesive.contains("天安门"));
	}

	#[test]
	fn test_parallel_run_matches() {
		let sentences: Vec<String> = (0..200).map(|i| format!("北京天安门{}", i % 7)).collect();
		let sequential = Discoverer::new(permissive()).unwrap().run(&sentences).unwrap();
		let parallel = Discoverer::new(DiscoveryConfig { parallel: true, ..permissive() })
			.unwrap()
			.run(&sentences)
			.unwrap();

		assert_eq!(sequential.statistics, parallel.statistics);
		assert_eq!(sequential.words, parallel.words);
	}

	#[test]
	fn test_resegment_with_cohesive_pairs() {
		let mut sentences = vec!["北京天安门"; 30];
		sentences.extend(["门北", "门北"]);
		let discoverer = Discoverer::new(permissive()).unwrap();
		let discovery = discoverer.run(&sentences).unwrap();

		let words = discoverer.resegment(&discovery.cohesive, &sentences, 10);
		assert_eq!(words.get("北京天安门"), Some(&30));
		assert!(!words.contains_key("门北"));
	}
}
