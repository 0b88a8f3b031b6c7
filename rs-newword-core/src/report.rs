use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::info;
use serde::Serialize;

use crate::error::Result;
use crate::io::{build_output_path, write_file};
use crate::table::{Candidate, CandidateTable};

/// Output format of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
	/// One `candidate<TAB>record` line per candidate, most frequent first
	#[default]
	Tsv,
	/// Pretty-printed JSON object keyed by candidate
	Json,
}

impl ReportFormat {
	pub fn extension(&self) -> &'static str {
		match self {
			ReportFormat::Tsv => "tsv",
			ReportFormat::Json => "json",
		}
	}
}

/// Report path next to the corpus: `data/corpus.txt` → `data/corpus.json`.
pub fn default_output_path<P: AsRef<Path>>(corpus_path: P, format: ReportFormat) -> Result<PathBuf> {
	Ok(build_output_path(corpus_path, format.extension())?)
}

/// Renders a candidate table.
///
/// Only the fields a record actually carries are written, so the same
/// function reports raw counts, scored candidates or entropy-filtered ones.
pub fn render<R>(table: &CandidateTable<R>, format: ReportFormat) -> Result<String>
where
	R: Candidate + Serialize,
{
	match format {
		ReportFormat::Tsv => {
			let mut rows: Vec<(&String, &R)> = table.iter().collect();
			rows.sort_by_key(|(candidate, record)| (Reverse(record.count()), *candidate));

			let mut out = String::new();
			for (candidate, record) in rows {
				out.push_str(candidate);
				out.push('\t');
				out.push_str(&serde_json::to_string(record)?);
				out.push('\n');
			}
			Ok(out)
		}
		ReportFormat::Json => {
			let sorted: BTreeMap<&String, &R> = table.iter().collect();
			Ok(serde_json::to_string_pretty(&sorted)?)
		}
	}
}

/// Renders words found by the resegmenter.
pub fn render_words(words: &BTreeMap<String, u64>, format: ReportFormat) -> Result<String> {
	match format {
		ReportFormat::Tsv => {
			let mut rows: Vec<(&String, &u64)> = words.iter().collect();
			rows.sort_by_key(|(word, count)| (Reverse(**count), *word));
			Ok(rows.into_iter().map(|(word, count)| format!("{word}\t{count}\n")).collect())
		}
		ReportFormat::Json => Ok(serde_json::to_string_pretty(words)?),
	}
}

/// Writes a candidate table report to `path`.
pub fn write_report<R, P>(table: &CandidateTable<R>, path: P, format: ReportFormat) -> Result<()>
where
	R: Candidate + Serialize,
	P: AsRef<Path>,
{
	write_file(&path, &render(table, format)?)?;
	info!("wrote {} candidates to {}", table.len(), path.as_ref().display());
	Ok(())
}

/// Writes a resegmented-words report to `path`.
pub fn write_words<P: AsRef<Path>>(words: &BTreeMap<String, u64>, path: P, format: ReportFormat) -> Result<()> {
	write_file(&path, &render_words(words, format)?)?;
	info!("wrote {} words to {}", words.len(), path.as_ref().display());
	Ok(())
}
