use super::tally::SuccessorTally;
use serde::{Deserialize, Serialize};

/// Next-word generator over a fixed reference corpus.
///
/// The generator owns an ordered sequence of word tokens and grows a seed
/// phrase by repeatedly appending a successor of the current last word.
/// Successor statistics are rebuilt from scratch on every step by scanning
/// the corpus pairwise; nothing is cached between steps or calls.
///
/// # Responsibilities
/// - Tokenize the seed phrase and validate it
/// - Tally the corpus successors of the current last word on each step
/// - Append the most frequent successor, or a sampled one
/// - Stop early when no successor exists
///
/// # Invariants
/// - The corpus is immutable for the lifetime of the generator
/// - The result holds exactly `seed tokens + successful steps` tokens,
///   which is never more than `seed tokens + max_steps`
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NextWordGenerator {
	/// The reference word sequence successors are counted from.
	corpus: Vec<String>,
}

impl NextWordGenerator {
	/// Creates a generator over the given corpus tokens.
	///
	/// The corpus may be empty; generation then returns seeds unchanged.
	pub fn new(corpus: Vec<String>) -> Self {
		Self { corpus }
	}

	/// Creates a generator by whitespace-tokenizing a text.
	pub fn from_text(text: &str) -> Self {
		Self::new(text.split_whitespace().map(str::to_owned).collect())
	}

	/// Returns the corpus tokens.
	pub fn corpus(&self) -> &[String] {
		&self.corpus
	}

	/// Tallies every corpus token immediately following an occurrence
	/// of `word`, duplicates preserved.
	///
	/// Positions recorded in the tally are corpus indices, so ties in the
	/// most-frequent selection resolve to the earliest corpus occurrence.
	///
	/// A corpus with fewer than 2 tokens yields an empty tally, as does a
	/// word whose only occurrence is the final corpus element.
	pub fn successors(&self, word: &str) -> SuccessorTally {
		let mut tally = SuccessorTally::new();
		for i in 1..self.corpus.len() {
			if self.corpus[i - 1] == word {
				tally.observe(&self.corpus[i], i);
			}
		}
		tally
	}

	/// Grows `seed` by appending the most frequent successor of the current
	/// last word, up to `max_steps` times.
	///
	/// # Parameters
	/// - `seed`: The starting phrase, whitespace-tokenized. Must contain at
	///   least one non-whitespace character.
	/// - `max_steps`: Bound on how many words may be appended. A step count
	///   below zero is unrepresentable by construction.
	///
	/// # Returns
	/// - `Ok(String)` with the grown sequence, tokens rejoined with single
	///   spaces.
	/// - `Err(String)` if the seed is empty or whitespace-only.
	///
	/// # Behavior
	/// - Ties between equally frequent successors go to the word observed
	///   earliest in the corpus.
	/// - A step finding no successor ends the generation early; the
	///   sequence built so far is returned. A seed absent from the corpus
	///   therefore comes back unchanged, which is not an error.
	/// - `max_steps == 0` returns the seed unchanged.
	pub fn generate(&self, seed: &str, max_steps: usize) -> Result<String, String> {
		self.internal_generate(seed, max_steps, false)
	}

	/// Grows `seed` like [`generate`](Self::generate), but picks each
	/// successor by weighted random sampling instead of taking the most
	/// frequent one.
	///
	/// Selection probability is proportional to the successor occurrence
	/// count. Validation and termination rules are identical to
	/// [`generate`](Self::generate).
	pub fn generate_sampled(&self, seed: &str, max_steps: usize) -> Result<String, String> {
		self.internal_generate(seed, max_steps, true)
	}

	/// Shared generation loop behind both selection policies.
	fn internal_generate(&self, seed: &str, max_steps: usize, sampled: bool) -> Result<String, String> {
		if seed.trim().is_empty() {
			return Err("Seed must not be empty".to_owned());
		}

		let mut tokens: Vec<String> = seed.split_whitespace().map(str::to_owned).collect();

		for _ in 0..max_steps {
			// Should not panic, the seed holds at least one token
			let last = tokens.last().unwrap().clone();

			let tally = self.successors(&last);
			let next = if sampled { tally.sample() } else { tally.most_frequent() };
			match next {
				Some(word) => tokens.push(word.to_owned()),
				// No successor observed, stop here
				None => break,
			}
		}

		Ok(tokens.join(" "))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	// Word list from the demonstration corpus
	const CORPUS: &str = "the quick brown fox jumps over lazy dog \
		the lazy fox the quick brown dog sleeps \
		the cat sits on the mat the dog barks";

	fn generator() -> NextWordGenerator {
		NextWordGenerator::from_text(CORPUS)
	}

	#[test]
	fn grows_seed_with_most_frequent_successors() {
		// fox -> jumps (tie with "the", jumps seen first)
		// jumps -> over -> lazy
		// lazy -> dog (tie with "fox", dog seen first)
		// dog -> the (three-way tie, the seen first)
		// the -> quick (strict maximum, two occurrences)
		// quick -> brown -> fox (tie with "dog", fox seen first)
		let result = generator().generate("the quick brown fox", 8).unwrap();
		assert_eq!(result, "the quick brown fox jumps over lazy dog the quick brown fox");
	}

	#[test]
	fn follows_single_occurrence_successors() {
		let result = generator().generate("the cat", 5).unwrap();
		assert_eq!(result, "the cat sits on the quick brown");
	}

	#[test]
	fn unknown_seed_comes_back_unchanged() {
		for steps in [0, 1, 5] {
			let result = generator().generate("nonexistent", steps).unwrap();
			assert_eq!(result, "nonexistent");
		}
	}

	#[test]
	fn zero_steps_returns_the_seed() {
		let result = generator().generate("the quick brown fox", 0).unwrap();
		assert_eq!(result, "the quick brown fox");
	}

	#[test]
	fn final_corpus_token_has_no_successor() {
		// "barks" only occurs as the last corpus element
		let result = generator().generate("barks", 5).unwrap();
		assert_eq!(result, "barks");
	}

	#[test]
	fn short_corpus_yields_no_successors() {
		let single = NextWordGenerator::from_text("alone");
		assert_eq!(single.generate("alone", 5).unwrap(), "alone");

		let empty = NextWordGenerator::new(Vec::new());
		assert_eq!(empty.generate("anything", 5).unwrap(), "anything");
	}

	#[test]
	fn empty_seed_is_rejected() {
		assert!(generator().generate("", 5).is_err());
		assert!(generator().generate("   \t", 5).is_err());
	}

	#[test]
	fn result_length_stays_within_the_step_bound() {
		let generator = generator();
		for steps in 0..12 {
			let result = generator.generate("the", steps).unwrap();
			assert!(result.split_whitespace().count() <= 1 + steps);
		}
	}

	#[test]
	fn repeated_calls_are_deterministic() {
		let generator = generator();
		let first = generator.generate("the quick brown fox", 8).unwrap();
		let second = generator.generate("the quick brown fox", 8).unwrap();
		assert_eq!(first, second);
	}

	#[test]
	fn seed_whitespace_is_normalized() {
		let result = generator().generate("the   cat", 1).unwrap();
		assert_eq!(result, "the cat sits");
	}

	#[test]
	fn sampled_generation_follows_observed_successors() {
		// "sits" has exactly one successor, so sampling cannot diverge
		let result = generator().generate_sampled("sits", 1).unwrap();
		assert_eq!(result, "sits on");
	}

	#[test]
	fn sampled_generation_respects_the_step_bound() {
		let result = generator().generate_sampled("the", 4).unwrap();
		assert!(result.split_whitespace().count() <= 5);
		assert!(result.starts_with("the"));
	}

	#[test]
	fn successors_preserve_duplicates() {
		let tally = generator().successors("the");
		assert_eq!(tally.count("quick"), 2);
		assert_eq!(tally.count("lazy"), 1);
		assert_eq!(tally.total(), 6);
	}
}
