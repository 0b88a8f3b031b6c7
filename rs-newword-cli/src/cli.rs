//! CLI argument parsing for rs-newword

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use rs_newword_core::config::{FreedomFilter, UnigramPolicy};
use rs_newword_core::corpus::DEFAULT_TEXT_COLUMN;
use rs_newword_core::report::ReportFormat;

/// Output format for reports
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// `candidate<TAB>record` lines (default)
    Tsv,
    /// JSON object keyed by candidate
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Tsv => ReportFormat::Tsv,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

/// Freedom filters to apply
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FreedomArg {
    Entropy,
    Nav,
    Both,
    Off,
}

impl From<FreedomArg> for FreedomFilter {
    fn from(arg: FreedomArg) -> Self {
        match arg {
            FreedomArg::Entropy => FreedomFilter::Entropy,
            FreedomArg::Nav => FreedomFilter::Nav,
            FreedomArg::Both => FreedomFilter::Both,
            FreedomArg::Off => FreedomFilter::Off,
        }
    }
}

/// What the cohesion filter does with single characters
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum UnigramArg {
    Exclude,
    Exempt,
}

impl From<UnigramArg> for UnigramPolicy {
    fn from(arg: UnigramArg) -> Self {
        match arg {
            UnigramArg::Exclude => UnigramPolicy::Exclude,
            UnigramArg::Exempt => UnigramPolicy::Exempt,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "rs-newword")]
#[command(version)]
#[command(about = "Dictionary-free new-word discovery for unsegmented text", long_about = None)]
pub struct Cli {
    /// Corpus file (.txt: one record per line, .csv: see --column)
    pub corpus: PathBuf,

    /// CSV column holding the text
    #[arg(long = "column", value_name = "NAME", default_value = DEFAULT_TEXT_COLUMN)]
    pub column: String,

    /// TOML configuration file; command-line options override it
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Longest candidate, in characters
    #[arg(short = 'n', long = "max-order", value_name = "N")]
    pub max_order: Option<usize>,

    /// Minimum occurrence count
    #[arg(long = "min-freq", value_name = "COUNT")]
    pub min_freq: Option<u64>,

    /// PMI threshold applied to every candidate length
    #[arg(long = "min-pmi", value_name = "BITS", allow_negative_numbers = true)]
    pub min_pmi: Option<f64>,

    /// Minimum left and right branching entropy, in bits
    #[arg(long = "min-entropy", value_name = "BITS")]
    pub min_entropy: Option<f64>,

    /// Minimum neighbor diversity
    #[arg(long = "min-nav", value_name = "NAV")]
    pub min_nav: Option<f64>,

    /// Freedom filters to apply
    #[arg(long = "freedom", value_enum)]
    pub freedom: Option<FreedomArg>,

    /// Single-character candidates in the cohesion filter
    #[arg(long = "unigrams", value_enum)]
    pub unigrams: Option<UnigramArg>,

    /// Blacklist file, one candidate per line
    #[arg(short = 'b', long = "blacklist", value_name = "FILE")]
    pub blacklist: Option<PathBuf>,

    /// Count n-grams on all CPU cores
    #[arg(short = 'p', long = "parallel")]
    pub parallel: bool,

    /// Report format
    #[arg(long = "format", value_enum, default_value = "tsv")]
    pub format: OutputFormat,

    /// Report path (default: next to the corpus, with the format extension)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Also resegment the corpus and write a words report
    #[arg(long = "words", value_name = "FILE")]
    pub words: Option<PathBuf>,

    /// Minimum count of a resegmented word
    #[arg(long = "words-min-freq", value_name = "COUNT", default_value = "10")]
    pub words_min_freq: u64,

    /// Verbose logging (-v: debug, -vv: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}
