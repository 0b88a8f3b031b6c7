mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, debug};

use cli::Cli;
use rs_newword_core::config::{DiscoveryConfig, MinPmi};
use rs_newword_core::corpus::read_corpus;
use rs_newword_core::discovery::Discoverer;
use rs_newword_core::report::{default_output_path, write_report, write_words, ReportFormat};

/// Initialize logging: info by default, `-v` for debug, `-vv` for trace.
/// `RUST_LOG` still takes precedence.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Merge the configuration file (if any) with command-line overrides.
fn build_config(cli: &Cli) -> Result<DiscoveryConfig> {
    let mut config = match &cli.config {
        Some(path) => DiscoveryConfig::from_file(path)
            .with_context(|| format!("failed to load configuration {}", path.display()))?,
        None => DiscoveryConfig::default(),
    };

    if let Some(max_order) = cli.max_order {
        config.max_order = max_order;
        // Longer candidates reuse the threshold of the longest configured length
        config.min_pmi.extend_to(max_order);
    }
    if let Some(min_pmi) = cli.min_pmi {
        config.min_pmi = MinPmi::uniform(min_pmi, config.max_order);
    }
    if let Some(min_freq) = cli.min_freq {
        config.min_freq = min_freq;
    }
    if let Some(min_entropy) = cli.min_entropy {
        config.min_entropy = min_entropy;
    }
    if let Some(min_nav) = cli.min_nav {
        config.min_nav = min_nav;
    }
    if let Some(freedom) = cli.freedom {
        config.freedom_filter = freedom.into();
    }
    if let Some(unigrams) = cli.unigrams {
        config.unigram_policy = unigrams.into();
    }
    if cli.blacklist.is_some() {
        config.blacklist = cli.blacklist.clone();
    }
    config.parallel |= cli.parallel;

    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = build_config(&cli)?;
    let discoverer = Discoverer::new(config).context("failed to set up the pipeline")?;
    debug!("configuration: {:?}", discoverer.config());

    // Read and clean the corpus
    let sentences = read_corpus(&cli.corpus, &cli.column)
        .with_context(|| format!("failed to read corpus {}", cli.corpus.display()))?;

    // Count, score and filter
    let discovery = discoverer.run(&sentences).context("discovery failed")?;

    // Report the surviving candidates
    let format: ReportFormat = cli.format.into();
    let output = match &cli.output {
        Some(path) => path.clone(),
        None => default_output_path(&cli.corpus, format)?,
    };
    write_report(&discovery.words, &output, format)
        .with_context(|| format!("failed to write {}", output.display()))?;

    // Optionally cut the corpus into words with the cohesive pairs
    if let Some(words_path) = &cli.words {
        let words = discoverer.resegment(&discovery.cohesive, &sentences, cli.words_min_freq);
        write_words(&words, words_path, format)
            .with_context(|| format!("failed to write {}", words_path.display()))?;
    }

    println!("find {} new tokens", discovery.words.len());
    Ok(())
}
