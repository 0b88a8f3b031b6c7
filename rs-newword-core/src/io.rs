use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents.lines().map(str::to_owned).collect())
}

/// Writes `contents` to `path`, creating the parent directory if needed.
pub(crate) fn write_file<P: AsRef<Path>>(path: P, contents: &str) -> io::Result<()> {
	let path = path.as_ref();
	if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
		fs::create_dir_all(parent)?;
	}
	fs::write(path, contents)
}

/// Builds an output path based on an input path and a new extension.
///
/// Example:
/// `data/corpus.txt` + `"json"` → `data/corpus.json`
pub(crate) fn build_output_path<P: AsRef<Path>>(
	input_path: P,
	output_extension: &str,
) -> io::Result<PathBuf> {
	let input_path = input_path.as_ref();

	let parent = input_path.parent().unwrap_or_else(|| Path::new("."));
	let file_stem = input_path
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Input path has no filename"))?;

	let mut output = PathBuf::from(parent);
	output.push(file_stem);
	output.set_extension(output_extension);

	Ok(output)
}

/// Lower-cased extension of a path, if any.
///
/// Examples:
/// - `"./data/corpus.TXT"` → `Some("txt")`
/// - `"corpus"` → `None`
pub(crate) fn get_extension<P: AsRef<Path>>(path: P) -> Option<String> {
	path.as_ref()
		.extension()
		.map(|ext| ext.to_string_lossy().to_lowercase())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_build_output_path() {
		let path = build_output_path("data/corpus_finance.txt", "json").unwrap();
		assert_eq!(path, PathBuf::from("data/corpus_finance.json"));
	}

	#[test]
	fn test_build_output_path_without_name() {
		assert!(build_output_path("..", "json").is_err());
	}

	#[test]
	fn test_get_extension() {
		assert_eq!(get_extension("a/b.CSV").as_deref(), Some("csv"));
		assert_eq!(get_extension("corpus"), None);
	}

	#[test]
	fn test_write_then_read() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("nested").join("out.txt");

		write_file(&path, "北京\n天安门\n").unwrap();

		assert_eq!(read_file(&path).unwrap(), vec!["北京".to_owned(), "天安门".to_owned()]);
	}
}
