//! Corpus ingestion: raw records in, cleaned sentences out.
//!
//! A sentence is a maximal run of the segment alphabet (CJK ideographs plus a
//! few ASCII symbols that commonly appear inside terms) with whitespace,
//! punctuation, ASCII letters and digits stripped out.

use std::path::Path;
use std::sync::LazyLock;

use log::{info, warn};
use regex::Regex;

use crate::error::{DiscoveryError, Result};
use crate::io::{get_extension, read_file};

/// Default CSV column holding the text.
pub const DEFAULT_TEXT_COLUMN: &str = "text";

static SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"[\x{4E00}-\x{9FD5}a-zA-Z0-9+#&._/\x{03BC}\x{3001}()\x{FF08}\x{FF09}~'\x{2019}\-]+")
		.expect("segment pattern is valid")
});

static STOP: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r#"[\s+.!/_,$%^*(+"')]+|[+—()?【】“”！，。？、~@#￥%…&*（）0-9a-zA-Z]+"#)
		.expect("stop pattern is valid")
});

/// Splits one raw record into cleaned sentences.
///
/// # Example
/// ```
/// use rs_newword_core::corpus::normalize;
///
/// assert_eq!(normalize("北京，天安门 2024年"), vec!["北京", "天安门", "年"]);
/// ```
pub fn normalize(text: &str) -> Vec<String> {
	SEGMENT
		.find_iter(text.trim())
		.map(|segment| STOP.replace_all(segment.as_str(), "").into_owned())
		.filter(|sentence| !sentence.is_empty())
		.collect()
}

/// Supported corpus file formats, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorpusFormat {
	/// One record per line.
	Text,
	/// Comma-separated table with a header row; records come from one column.
	Csv,
}

impl CorpusFormat {
	/// # Errors
	/// `UnsupportedFormat` for anything but `.txt` and `.csv`.
	pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
		match get_extension(&path).as_deref() {
			Some("txt") => Ok(CorpusFormat::Text),
			Some("csv") => Ok(CorpusFormat::Csv),
			_ => Err(DiscoveryError::UnsupportedFormat(path.as_ref().to_path_buf())),
		}
	}
}

/// Reads the raw records of a corpus file.
///
/// For CSV files, `text_column` names the column holding the text.
pub fn read_records<P: AsRef<Path>>(path: P, text_column: &str) -> Result<Vec<String>> {
	let path = path.as_ref();
	match CorpusFormat::from_path(path)? {
		CorpusFormat::Text => Ok(read_file(path)?),
		CorpusFormat::Csv => read_csv_column(path, text_column),
	}
}

fn read_csv_column(path: &Path, text_column: &str) -> Result<Vec<String>> {
	let mut reader = csv::Reader::from_path(path)?;
	let index = reader
		.headers()?
		.iter()
		.position(|header| header == text_column)
		.ok_or_else(|| DiscoveryError::MissingColumn {
			path: path.to_path_buf(),
			column: text_column.to_owned(),
		})?;

	let mut records = Vec::new();
	for record in reader.records() {
		let record = record?;
		records.push(record.get(index).unwrap_or_default().to_owned());
	}
	Ok(records)
}

/// Reads a corpus file and normalizes every record into sentences.
pub fn read_corpus<P: AsRef<Path>>(path: P, text_column: &str) -> Result<Vec<String>> {
	let records = read_records(&path, text_column)?;
	let sentences: Vec<String> = records.iter().flat_map(|record| normalize(record)).collect();

	if sentences.is_empty() {
		warn!("no sentences found in {}", path.as_ref().display());
	} else {
		info!("read {} sentences from {} records", sentences.len(), records.len());
	}
	Ok(sentences)
}
