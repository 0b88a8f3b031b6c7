//! Configuration of a discovery run.
//!
//! Every threshold is an explicit field of [`DiscoveryConfig`]; nothing is read
//! from module-level constants, so one process can run the pipeline against
//! several corpora with different settings.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DiscoveryError, Result};

/// Default longest candidate, in characters.
pub const DEFAULT_MAX_ORDER: usize = 4;

/// Minimum PMI threshold per candidate length (in characters).
///
/// Serialized as a table with string keys, e.g. `{ "2" = 4.9, "3" = 4.9 }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct MinPmi {
	thresholds: BTreeMap<usize, f64>,
}

impl MinPmi {
	/// Same `threshold` for every length in `2..=max_order`.
	pub fn uniform(threshold: f64, max_order: usize) -> Self {
		Self { thresholds: (2..=max_order).map(|len| (len, threshold)).collect() }
	}

	/// Threshold for candidates of `len` characters, if configured.
	pub fn threshold(&self, len: usize) -> Option<f64> {
		self.thresholds.get(&len).copied()
	}

	pub fn set(&mut self, len: usize, threshold: f64) {
		self.thresholds.insert(len, threshold);
	}

	/// Fills the lengths missing up to `max_order` with the threshold of the
	/// longest configured length.
	pub fn extend_to(&mut self, max_order: usize) {
		let Some((_, &last)) = self.thresholds.iter().next_back() else {
			return;
		};
		for len in 2..=max_order {
			self.thresholds.entry(len).or_insert(last);
		}
	}

	pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
		self.thresholds.iter().map(|(len, threshold)| (*len, *threshold))
	}
}

impl Default for MinPmi {
	/// `log2(30)` for every length up to [`DEFAULT_MAX_ORDER`].
	fn default() -> Self {
		Self::uniform(30f64.log2(), DEFAULT_MAX_ORDER)
	}
}

impl TryFrom<BTreeMap<String, f64>> for MinPmi {
	type Error = String;

	fn try_from(raw: BTreeMap<String, f64>) -> std::result::Result<Self, Self::Error> {
		let mut thresholds = BTreeMap::new();
		for (key, threshold) in raw {
			let len = key
				.trim()
				.parse::<usize>()
				.map_err(|_| format!("min_pmi key must be a candidate length, got `{key}`"))?;
			thresholds.insert(len, threshold);
		}
		Ok(Self { thresholds })
	}
}

impl From<MinPmi> for BTreeMap<String, f64> {
	fn from(min_pmi: MinPmi) -> Self {
		min_pmi.thresholds.into_iter().map(|(len, threshold)| (len.to_string(), threshold)).collect()
	}
}

/// What the cohesion filter does with single characters, which have no PMI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnigramPolicy {
	/// Drop single characters (they cannot pass a cohesion test).
	#[default]
	Exclude,
	/// Keep single characters without testing them.
	Exempt,
}

/// Which freedom filters run after the freedom scores are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FreedomFilter {
	/// Both branching entropies must exceed `min_entropy`.
	Entropy,
	/// `nav` must exceed `min_nav`.
	Nav,
	/// Nav filter, then entropy filter.
	#[default]
	Both,
	/// Scores are computed and reported, nothing is filtered.
	Off,
}

/// Parameters of a discovery run.
///
/// # Example
/// ```
/// use rs_newword_core::config::DiscoveryConfig;
///
/// let config = DiscoveryConfig::default();
/// assert_eq!(config.max_order, 4);
/// assert_eq!(config.min_freq, 10);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
	/// Longest candidate counted, in characters
	///
	/// Default: 4
	pub max_order: usize,

	/// Minimum occurrence count of a kept candidate
	///
	/// Default: 10
	pub min_freq: u64,

	/// PMI a candidate must exceed, per length
	///
	/// Default: log2(30) ≈ 4.91 for lengths 2 to 4
	pub min_pmi: MinPmi,

	/// Treatment of single characters by the cohesion filter
	///
	/// Default: exclude
	pub unigram_policy: UnigramPolicy,

	/// Entropy, in bits, both sides of a kept candidate must exceed
	///
	/// Default: 3.0
	pub min_entropy: f64,

	/// Neighbor diversity a kept candidate must exceed
	///
	/// Default: 15.0
	pub min_nav: f64,

	/// Freedom filters to apply
	///
	/// Default: both
	pub freedom_filter: FreedomFilter,

	/// Plain-text blacklist, one candidate per line
	pub blacklist: Option<PathBuf>,

	/// Count n-grams on several threads
	pub parallel: bool,
}

impl Default for DiscoveryConfig {
	fn default() -> Self {
		Self {
			max_order: DEFAULT_MAX_ORDER,
			min_freq: 10,
			min_pmi: MinPmi::default(),
			unigram_policy: UnigramPolicy::Exclude,
			min_entropy: 3.0,
			min_nav: 15.0,
			freedom_filter: FreedomFilter::Both,
			blacklist: None,
			parallel: false,
		}
	}
}

impl DiscoveryConfig {
	/// Parses a TOML document. Missing fields take their default value.
	pub fn from_toml_str(source: &str) -> Result<Self> {
		let config: Self = toml::from_str(source)?;
		config.validate()?;
		Ok(config)
	}

	/// Reads and parses a TOML configuration file.
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
		let source = fs::read_to_string(path)?;
		Self::from_toml_str(&source)
	}

	/// Validate configuration
	pub fn validate(&self) -> Result<()> {
		if self.max_order == 0 {
			return Err(DiscoveryError::InvalidConfig("max_order must be >= 1".to_owned()));
		}

		for len in 2..=self.max_order {
			if self.min_pmi.threshold(len).is_none() {
				return Err(DiscoveryError::MissingThreshold(len));
			}
		}

		if let Some((len, threshold)) = self.min_pmi.iter().find(|(_, threshold)| !threshold.is_finite()) {
			return Err(DiscoveryError::InvalidConfig(format!(
				"min_pmi for length {len} must be finite, got {threshold}"
			)));
		}

		if !self.min_entropy.is_finite() || self.min_entropy < 0.0 {
			return Err(DiscoveryError::InvalidConfig(format!(
				"min_entropy must be a non-negative number, got {}",
				self.min_entropy
			)));
		}

		if !self.min_nav.is_finite() || self.min_nav < 0.0 {
			return Err(DiscoveryError::InvalidConfig(format!(
				"min_nav must be a non-negative number, got {}",
				self.min_nav
			)));
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_is_valid() {
		let config = DiscoveryConfig::default();
		assert!(config.validate().is_ok());
		assert_eq!(config.min_nav, 15.0);
		assert_eq!(config.min_entropy, 3.0);
		assert_eq!(config.unigram_policy, UnigramPolicy::Exclude);
		assert!((config.min_pmi.threshold(3).unwrap() - 30f64.log2()).abs() < 1e-12);
		assert_eq!(config.min_pmi.threshold(1), None);
	}

	#[test]
	fn test_partial_toml() {
		let config = DiscoveryConfig::from_toml_str(
			r#"
			max_order = 3
			min_freq = 5
			unigram_policy = "exempt"
			freedom_filter = "nav"

			[min_pmi]
			2 = 1.5
			3 = 2.5
			"#,
		)
		.unwrap();

		assert_eq!(config.max_order, 3);
		assert_eq!(config.min_freq, 5);
		assert_eq!(config.unigram_policy, UnigramPolicy::Exempt);
		assert_eq!(config.freedom_filter, FreedomFilter::Nav);
		assert_eq!(config.min_pmi.threshold(2), Some(1.5));
		assert_eq!(config.min_pmi.threshold(3), Some(2.5));
		assert_eq!(config.min_nav, 15.0);
	}

	#[test]
	fn test_missing_threshold_rejected() {
		let config = DiscoveryConfig { max_order: 5, ..DiscoveryConfig::default() };
		assert!(matches!(config.validate(), Err(DiscoveryError::MissingThreshold(5))));
	}

	#[test]
	fn test_bad_min_pmi_key() {
		let err = DiscoveryConfig::from_toml_str("[min_pmi]\nfoo = 1.0\n").unwrap_err();
		assert!(matches!(err, DiscoveryError::Toml(_)));
	}

	#[test]
	fn test_negative_entropy_rejected() {
		let config = DiscoveryConfig { min_entropy: -1.0, ..DiscoveryConfig::default() };
		assert!(matches!(config.validate(), Err(DiscoveryError::InvalidConfig(_))));
	}

	#[test]
	fn test_extend_to() {
		let mut min_pmi = MinPmi::uniform(2.0, 2);
		min_pmi.set(3, 3.0);
		min_pmi.extend_to(5);

		assert_eq!(min_pmi.threshold(4), Some(3.0));
		assert_eq!(min_pmi.threshold(5), Some(3.0));
		assert_eq!(min_pmi.threshold(2), Some(2.0));
	}
}
