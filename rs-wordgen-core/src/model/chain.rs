use std::collections::HashMap;

use rand::prelude::IteratorRandom;

use serde::{Deserialize, Serialize};

use super::ngram::NGramModel;
use super::tally::SuccessorTally;

/// The top-level word model containing one counted n-gram model per order.
///
/// This struct manages:
/// - `ngrams`: a map from order to its corresponding `NGramModel`,
///   covering every order from 1 to `max_order`.
/// - `token_count`: a running token counter so that successor positions
///   stay globally ordered across multiple `add_text` calls.
///
/// Probabilities are interpolated across orders using per-order weights;
/// every number involved comes from exact occurrence counting.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct MarkovChain {
	max_order: usize,
	ngrams: HashMap<usize, NGramModel>,
	token_count: usize,
}

impl MarkovChain {
	/// Creates an empty chain holding orders 1 to `max_order`.
	///
	/// # Errors
	/// Returns an error if `max_order < 1`.
	pub fn new(max_order: usize) -> Result<Self, String> {
		if max_order < 1 {
			return Err("max_order must be >= 1".to_owned());
		}

		let mut ngrams = HashMap::new();
		for n in 1..=max_order {
			// Cannot fail, n starts at 1
			ngrams.insert(n, NGramModel::new(n)?);
		}

		Ok(Self { max_order, ngrams, token_count: 0 })
	}

	/// Creates a chain and trains it on `text` in one call.
	///
	/// # Errors
	/// Returns an error if `max_order < 1`.
	pub fn from_text(text: &str, max_order: usize) -> Result<Self, String> {
		let mut chain = Self::new(max_order)?;
		chain.add_text(text);
		Ok(chain)
	}

	/// Returns the highest order held by the chain.
	pub fn max_order(&self) -> usize {
		self.max_order
	}

	/// Returns the total number of tokens ingested so far.
	pub fn token_count(&self) -> usize {
		self.token_count
	}

	/// Returns `true` if no token was ingested yet.
	pub fn is_empty(&self) -> bool {
		self.token_count == 0
	}

	/// Trains every order on the whitespace-tokenized `text`.
	///
	/// # Behavior
	/// - Splits `text` on any whitespace run.
	/// - Feeds the token stream to each order with the current global
	///   offset, then advances the offset.
	/// - Calling this repeatedly keeps earliest-observation ordering
	///   stable: tokens from earlier calls always rank first.
	pub fn add_text(&mut self, text: &str) {
		let tokens: Vec<String> = text.split_whitespace().map(str::to_owned).collect();
		if tokens.is_empty() {
			return;
		}

		for model in self.ngrams.values_mut() {
			model.add_tokens(&tokens, self.token_count);
		}
		self.token_count += tokens.len();
	}

	/// Returns the distinct words of the chain in first-seen order.
	///
	/// The order-1 model records every ingested token under the empty
	/// context, so its tally doubles as the vocabulary.
	pub fn vocabulary(&self) -> Vec<&str> {
		self.ngrams
			.get(&1)
			.and_then(|model| model.tally(""))
			.map(|tally| tally.words_by_first_seen())
			.unwrap_or_default()
	}

	/// Returns the interpolated probability of `word` following `context`.
	///
	/// # Parameters
	/// - `context`: The words generated so far; each order `k` only looks
	///   at the last `k - 1` of them.
	/// - `word`: The candidate next word.
	/// - `weights`: `(order, weight)` pairs; entries with a non-positive
	///   weight and orders longer than the available context are skipped.
	///
	/// # Returns
	/// The weighted sum of the per-order probabilities. Unknown contexts
	/// and words contribute 0.0.
	pub fn probability(&self, context: &[String], word: &str, weights: &[(usize, f32)]) -> f64 {
		let mut probability = 0.0;

		for (order, weight) in weights {
			if *weight <= 0.0 {
				continue;
			}

			// Order 0 never exists in the chain
			let Some(needed) = order.checked_sub(1) else {
				continue;
			};
			if context.len() < needed {
				continue;
			}

			let key = context[context.len() - needed..].join(" ");
			if let Some(tally) = self.ngrams.get(order).and_then(|model| model.tally(&key)) {
				probability += f64::from(*weight) * tally.probability(word);
			}
		}

		probability
	}

	/// Returns the successor tally for `context` at the given order.
	///
	/// Returns `None` for unknown orders or contexts.
	pub fn tally(&self, order: usize, context: &str) -> Option<&SuccessorTally> {
		self.ngrams.get(&order)?.tally(context)
	}

	/// Returns a random word from the vocabulary.
	///
	/// Useful for starting a generation sequence.
	/// Returns `None` if the chain is empty.
	pub fn random_seed(&self) -> Option<String> {
		self.vocabulary()
			.into_iter()
			.choose(&mut rand::rng())
			.map(str::to_owned)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn context(words: &[&str]) -> Vec<String> {
		words.iter().map(|word| (*word).to_owned()).collect()
	}

	#[test]
	fn zero_max_order_is_rejected() {
		assert!(MarkovChain::new(0).is_err());
	}

	#[test]
	fn vocabulary_is_in_first_seen_order() {
		let chain = MarkovChain::from_text("b a b c a", 2).unwrap();
		assert_eq!(chain.vocabulary(), vec!["b", "a", "c"]);
		assert_eq!(chain.token_count(), 5);
	}

	#[test]
	fn empty_chain_has_no_vocabulary() {
		let chain = MarkovChain::new(3).unwrap();
		assert!(chain.is_empty());
		assert!(chain.vocabulary().is_empty());
		assert_eq!(chain.random_seed(), None);
	}

	#[test]
	fn bigram_probability_counts_successors() {
		let chain = MarkovChain::from_text("a b a c", 2).unwrap();
		let weights = [(2, 1.0)];

		let p = chain.probability(&context(&["a"]), "b", &weights);
		assert!((p - 0.5).abs() < 1e-9);
	}

	#[test]
	fn probabilities_interpolate_across_orders() {
		let chain = MarkovChain::from_text("a b a c", 2).unwrap();
		let weights = [(1, 0.5), (2, 0.5)];

		// Unigram: b occurs 1/4; bigram after "a": 1/2
		let p = chain.probability(&context(&["a"]), "b", &weights);
		assert!((p - 0.375).abs() < 1e-9);
	}

	#[test]
	fn long_orders_skip_short_contexts() {
		let chain = MarkovChain::from_text("a b c a b d", 3).unwrap();
		let weights = [(3, 1.0)];

		// One context word is not enough for a trigram
		assert_eq!(chain.probability(&context(&["b"]), "c", &weights), 0.0);

		let p = chain.probability(&context(&["a", "b"]), "c", &weights);
		assert!((p - 0.5).abs() < 1e-9);
	}

	#[test]
	fn later_ingestions_rank_after_earlier_ones() {
		let mut chain = MarkovChain::new(1).unwrap();
		chain.add_text("x");
		chain.add_text("a x");
		assert_eq!(chain.vocabulary(), vec!["x", "a"]);
		assert_eq!(chain.token_count(), 3);
	}

	#[test]
	fn random_seed_is_a_vocabulary_word() {
		let chain = MarkovChain::from_text("a b c", 2).unwrap();
		for _ in 0..10 {
			let seed = chain.random_seed().unwrap();
			assert!(chain.vocabulary().contains(&seed.as_str()));
		}
	}
}
