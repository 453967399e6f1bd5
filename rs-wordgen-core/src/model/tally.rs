use std::collections::HashMap;

use rand::Rng;

use serde::{Deserialize, Serialize};


/// A single recorded successor: how often it was observed and where first.
#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
struct Observation {
	/// Number of times this successor was observed.
	count: usize,
	/// Global position of the earliest observation.
	first_seen: usize,
}

/// Tally of the successors observed after one word or context.
///
/// Conceptually, this is a node in a word-level Markov chain where
/// outgoing edges are weighted by their number of observations.
///
/// ## Responsibilities:
/// - Accumulate successor occurrences during a corpus scan or training
/// - Select the most frequent successor deterministically
/// - Pick a successor using weighted random sampling
///
/// ## Invariants
/// - Each occurrence count is strictly positive
/// - `first_seen` positions are unique across successors, which makes
///   the most-frequent selection fully deterministic
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct SuccessorTally {
	/// Observed successors indexed by word.
	/// Example: { "jumps" => (2, 4), "the" => (1, 11) }
	successors: HashMap<String, Observation>,
}

impl SuccessorTally {
	/// Creates a new empty tally.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records one occurrence of `word` observed at `position`.
	///
	/// - If the word was already observed, its count is increased and the
	///   earliest position is kept.
	/// - Otherwise, a new entry is created with an initial count of 1.
	pub fn observe(&mut self, word: &str, position: usize) {
		self.successors
			.entry(word.to_owned())
			.and_modify(|observation| {
				observation.count += 1;
				observation.first_seen = observation.first_seen.min(position);
			})
			.or_insert(Observation { count: 1, first_seen: position });
	}

	/// Returns the number of distinct successors.
	pub fn len(&self) -> usize {
		self.successors.len()
	}

	/// Returns `true` if no successor was observed.
	pub fn is_empty(&self) -> bool {
		self.successors.is_empty()
	}

	/// Returns the total number of observations, duplicates included.
	pub fn total(&self) -> usize {
		self.successors.values().map(|observation| observation.count).sum()
	}

	/// Returns how many times `word` was observed.
	pub fn count(&self, word: &str) -> usize {
		self.successors.get(word).map_or(0, |observation| observation.count)
	}

	/// Returns the observed probability of `word`.
	///
	/// The probability is the occurrence count divided by the total number
	/// of observations. Returns 0.0 for unknown words or an empty tally.
	pub fn probability(&self, word: &str) -> f64 {
		let total = self.total();
		if total == 0 {
			return 0.0;
		}
		self.count(word) as f64 / total as f64
	}

	/// Returns the successor with the strictly maximum occurrence count.
	///
	/// Ties are broken by the earliest observed position, so the result
	/// does not depend on the map iteration order.
	///
	/// Returns `None` if the tally is empty.
	pub fn most_frequent(&self) -> Option<&str> {
		self.successors
			.iter()
			.max_by(|a, b| {
				a.1.count
					.cmp(&b.1.count)
					.then(b.1.first_seen.cmp(&a.1.first_seen))
			})
			.map(|(word, _)| word.as_str())
	}

	/// Picks a successor using weighted random sampling.
	///
	/// The probability of selecting a word is proportional to its
	/// occurrence count.
	///
	/// This method performs:
	/// - an O(n) scan over the successors
	/// - a cumulative subtraction to select a bucket
	///
	/// Returns `None` if the tally is empty.
	pub fn sample(&self) -> Option<&str> {
		if self.successors.is_empty() {
			return None;
		}

		// Compute the total number of occurrences
		let total = self.total();
		if total == 0 {
			// Should not happen due to invariants, but kept for safety
			return None;
		}

		// Randomly select a word
		let mut r = rand::rng().random_range(0..total);

		let mut fallback: Option<&str> = None;
		for (word, observation) in &self.successors {
			if r < observation.count {
				return Some(word.as_str());
			}
			r -= observation.count;
			fallback = Some(word.as_str());
		}

		// Fallback: should not happen, but kept for safety.
		fallback
	}

	/// Returns the distinct successors ordered by earliest observation.
	pub fn words_by_first_seen(&self) -> Vec<&str> {
		let mut entries: Vec<_> = self.successors.iter().collect();
		entries.sort_by_key(|(_, observation)| observation.first_seen);
		entries.into_iter().map(|(word, _)| word.as_str()).collect()
	}
}
