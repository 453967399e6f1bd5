use std::fs::File;
use std::io;
use std::io::Read;
use std::path::Path;

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
pub fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents.lines().map(str::to_owned).collect())
}

/// Reads a text file and returns its whitespace-separated word tokens.
///
/// Any run of whitespace acts as a separator, so the result never
/// contains empty tokens.
pub fn read_tokens<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents.split_whitespace().map(str::to_owned).collect())
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	#[test]
	fn read_tokens_splits_on_any_whitespace() {
		let path = std::env::temp_dir().join("rs-wordgen-io-tokens.txt");
		let mut file = File::create(&path).unwrap();
		write!(file, "the quick\tbrown\n fox ").unwrap();

		let tokens = read_tokens(&path).unwrap();
		assert_eq!(tokens, vec!["the", "quick", "brown", "fox"]);

		std::fs::remove_file(&path).unwrap();
	}
}
