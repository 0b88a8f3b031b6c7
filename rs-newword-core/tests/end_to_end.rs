// End-to-end discovery runs on small synthetic corpora.

use std::io::Write;

use rs_newword_core::config::{DiscoveryConfig, FreedomFilter, MinPmi};
use rs_newword_core::corpus::read_corpus;
use rs_newword_core::discovery::Discoverer;
use rs_newword_core::report::{ReportFormat, render};
use rs_newword_core::table::Candidate;

fn config(min_pmi: f64, freedom_filter: FreedomFilter) -> DiscoveryConfig {
	DiscoveryConfig {
		min_pmi: MinPmi::uniform(min_pmi, 4),
		freedom_filter,
		..DiscoveryConfig::default()
	}
}

/// Every `a + 天安门 + b` for 12 left and 12 right characters, twice.
fn free_context_corpus() -> Vec<String> {
	let lefts: Vec<char> = "东西南北春夏秋冬红黄蓝白".chars().collect();
	let rights: Vec<char> = "一二三四五六七八九十百千".chars().collect();

	let mut sentences = Vec::new();
	for _ in 0..2 {
		for a in &lefts {
			for b in &rights {
				sentences.push(format!("{a}天安门{b}"));
			}
		}
	}
	sentences
}

#[test]
fn test_repeated_sentence_survives_frequency_and_cohesion() {
	let mut sentences = vec!["北京天安门".to_owned(); 200];
	sentences.extend(["门北".to_owned(), "门北".to_owned(), "门北".to_owned()]);

	let discoverer = Discoverer::new(config(1.0, FreedomFilter::Off)).unwrap();
	let discovery = discoverer.run(&sentences).unwrap();

	// 200 * (5 + 4 + 3 + 2) + 3 * (2 + 1)
	assert_eq!(discovery.statistics.total_cnt(), 2809);
	assert_eq!(discovery.statistics.get("门北").unwrap().count(), 3);

	assert!(discovery.cohesive.contains("北京"));
	assert!(discovery.cohesive.contains("天安门"));
	assert!(!discovery.cohesive.contains("门北"));
	assert!(!discovery.cohesive.contains("北"));
	assert!(discovery.cohesive.iter().all(|(_, record)| record.count() >= 10));

	let pmi = discovery.cohesive.get("北京").unwrap().pmi().unwrap();
	let expected = (2809.0 * 200.0 / (203.0 * 200.0) as f64).log2();
	assert!((pmi - expected).abs() < 1e-12);
}

#[test]
fn test_entropy_keeps_only_free_candidates() {
	let sentences = free_context_corpus();
	let discoverer = Discoverer::new(config(2.0, FreedomFilter::Entropy)).unwrap();
	let discovery = discoverer.run(&sentences).unwrap();

	let words: Vec<&String> = discovery.words.keys().collect();
	assert_eq!(words, vec!["天安门"]);

	let record = discovery.words.get("天安门").unwrap();
	assert_eq!(record.count(), 288);
	assert!((record.left_entropy() - 12f64.log2()).abs() < 1e-12);
	assert!((record.right_entropy() - 12f64.log2()).abs() < 1e-12);
	// 12^2 / 288
	assert!((record.nav().unwrap() - 0.5).abs() < 1e-12);
}

#[test]
fn test_nav_filter_with_default_threshold() {
	let sentences = free_context_corpus();
	let discoverer = Discoverer::new(config(2.0, FreedomFilter::Both)).unwrap();
	let discovery = discoverer.run(&sentences).unwrap();

	// nav of 0.5 is far below the default 15
	assert!(discovery.words.is_empty());
	assert!(discovery.cohesive.contains("天安门"));
}

#[test]
fn test_default_config_from_file() {
	let dir = tempfile::tempdir().unwrap();
	let corpus_path = dir.path().join("corpus.txt");
	let mut corpus = std::fs::File::create(&corpus_path).unwrap();
	for sentence in free_context_corpus() {
		writeln!(corpus, "{sentence}。").unwrap();
	}

	let blacklist_path = dir.path().join("black_list.txt");
	std::fs::write(&blacklist_path, "天安门\n").unwrap();

	let config_path = dir.path().join("newword.toml");
	std::fs::write(
		&config_path,
		format!(
			"freedom_filter = \"entropy\"\nblacklist = {:?}\n\n[min_pmi]\n2 = 2.0\n3 = 2.0\n4 = 2.0\n",
			blacklist_path.display().to_string()
		),
	)
	.unwrap();

	let config = DiscoveryConfig::from_file(&config_path).unwrap();
	let sentences = read_corpus(&corpus_path, "text").unwrap();
	assert_eq!(sentences.len(), 288);

	let discovery = Discoverer::new(config).unwrap().run(&sentences).unwrap();
	assert!(discovery.words.is_empty());
	assert!(!discovery.cohesive.contains("天安门"));
}

#[test]
fn test_report_of_final_candidates() {
	let sentences = free_context_corpus();
	let discovery = Discoverer::new(config(2.0, FreedomFilter::Entropy))
		.unwrap()
		.run(&sentences)
		.unwrap();

	let tsv = render(&discovery.words, ReportFormat::Tsv).unwrap();
	assert!(tsv.starts_with("天安门\t{\"cnt\":288,"));
	assert!(tsv.contains("\"left_entropy\":"));
	assert_eq!(tsv.lines().count(), 1);
}

#[test]
fn test_resegmentation() {
	let mut sentences = vec!["北京天安门".to_owned(); 200];
	sentences.extend(["门北".to_owned(), "门北".to_owned(), "门北".to_owned()]);

	let discoverer = Discoverer::new(config(1.0, FreedomFilter::Off)).unwrap();
	let discovery = discoverer.run(&sentences).unwrap();
	let words = discoverer.resegment(&discovery.cohesive, &sentences, 10);

	assert_eq!(words.len(), 1);
	assert_eq!(words.get("北京天安门"), Some(&200));
}
