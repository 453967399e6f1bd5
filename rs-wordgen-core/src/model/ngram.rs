use super::tally::SuccessorTally;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Represents an n-gram model for sequences of words.
///
/// The `NGramModel` stores successor tallies for contexts of `n-1` words
/// and predicts the next word from exact occurrence counts.
///
/// # Responsibilities
/// - Ingest token streams and accumulate successor counts per context
/// - Predict the most frequent next word given a context
///
/// # Invariants
/// - `n` is always >= 1
/// - Each tally in `states` corresponds to a unique context of `n-1`
///   words joined with single spaces; order 1 uses the empty context
/// - All recorded occurrence counts are >= 1
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NGramModel {
	/// The order of the model (number of words in the n-gram)
	n: usize, // must be >= 1

	/// Mapping from a context (n-1 words) to its successor tally
	states: HashMap<String, SuccessorTally>,
}

impl NGramModel {
	/// Creates a new n-gram model of order `n`.
	///
	/// # Errors
	/// Returns an error if `n < 1`.
	pub fn new(n: usize) -> Result<Self, String> {
		if n < 1 {
			return Err("n must be >= 1".to_owned());
		}
		Ok(Self { n, states: HashMap::new() })
	}

	/// Returns the order of the model.
	pub fn order(&self) -> usize {
		self.n
	}

	/// Returns the number of distinct contexts.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	/// Returns `true` if no n-gram was ingested yet.
	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	/// Ingests a token stream and updates the observed successor counts.
	///
	/// # Parameters
	/// - `tokens`: The word tokens to ingest, in order.
	/// - `offset`: Global position of the first token. Successors are
	///   recorded with their global position so that earliest-observation
	///   tie-breaking stays stable across multiple ingestions.
	///
	/// # Notes
	/// - Streams shorter than `n` contribute nothing.
	/// - Words are matched exactly; no case folding is applied.
	pub fn add_tokens(&mut self, tokens: &[String], offset: usize) {
		if tokens.len() < self.n {
			// Stream too short, no n-grams to count
			return;
		}

		// For each n-gram in the stream
		for i in 0..=tokens.len() - self.n {
			// The context is empty for order 1
			let context = tokens[i..i + self.n - 1].join(" ");
			let successor = &tokens[i + self.n - 1];

			self.states
				.entry(context)
				.or_default()
				.observe(successor, offset + i + self.n - 1);
		}
	}

	/// Returns the successor tally recorded for `context`.
	///
	/// Returns `None` if the context was never observed.
	pub fn tally(&self, context: &str) -> Option<&SuccessorTally> {
		self.states.get(context)
	}

	/// Predicts the most frequent next word for `context`.
	///
	/// Ties go to the successor observed earliest. Returns `None` if the
	/// context is unknown.
	pub fn predict(&self, context: &str) -> Option<&str> {
		self.states.get(context)?.most_frequent()
	}
}
