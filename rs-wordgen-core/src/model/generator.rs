use crate::model::chain::MarkovChain;
use crate::model::generation_input::{GenerationInput, StartSeed};
use std::collections::HashMap;

/// A partial generation hypothesis: its tokens and cumulative score.
#[derive(Clone, Debug)]
struct Beam {
	tokens: Vec<String>,
	score: f64,
}

/// A scored candidate extension for one beam.
struct Candidate {
	word: String,
	log_prob: f64,
}

/// High-level beam-search generator over a trained `MarkovChain`.
///
/// # Responsibilities
/// - Build `GenerationInput`s matching the chain orders
/// - Resolve the starting phrase (custom or random)
/// - Grow sequences with interpolated probabilities, temperature scaling,
///   top-k / top-p filtering and repetition/diversity penalties
#[derive(Debug)]
pub struct Generator {
	chain: MarkovChain,
}

impl Generator {
	/// Creates a generator over a trained chain.
	pub fn new(chain: MarkovChain) -> Self {
		Self { chain }
	}

	/// Returns the underlying chain.
	pub fn chain(&self) -> &MarkovChain {
		&self.chain
	}

	/// Creates a new `GenerationInput` with default intensity for all
	/// orders held by the chain.
	///
	/// Weights are automatically normalized.
	pub fn make_input(&self) -> GenerationInput {
		let mut order_intensity: HashMap<usize, f32> = HashMap::new();
		for order in 1..=self.chain.max_order() {
			order_intensity.insert(order, 0.0);
		}
		GenerationInput::new(order_intensity)
	}

	/// Generates a sequence using beam search.
	///
	/// # Parameters
	/// - `input`: Controls the seed, the step bound, the beam width, the
	///   interpolation weights and the candidate filters.
	///
	/// # Returns
	/// - `Ok(String)` with the best sequence found, tokens joined with
	///   single spaces.
	/// - `Err(String)` if the seed is invalid, the beam width is zero or
	///   the chain holds no vocabulary.
	///
	/// # Behavior
	/// - Each step extends every live beam with its surviving candidates
	///   and keeps the `beam_width` best hypotheses.
	/// - Candidates are ranked by `ln(p) / temperature` minus the
	///   repetition and diversity penalties; exact score ties keep the
	///   first-seen vocabulary order, so generation is deterministic for
	///   a custom seed.
	/// - When no beam can be extended, the best sequence built so far is
	///   returned; running out of successors is normal termination, not
	///   an error.
	pub fn generate(&self, input: &GenerationInput) -> Result<String, String> {
		if input.beam_width < 1 {
			return Err("Beam width must be at least 1".to_owned());
		}

		let vocabulary = self.chain.vocabulary();
		if vocabulary.is_empty() {
			return Err("No trained n-grams available for generation".to_owned());
		}

		let seed = self.resolve_seed(input)?;
		let seed_tokens: Vec<String> = seed.split_whitespace().map(str::to_owned).collect();

		let weights: Vec<(usize, f32)> = input.order_weights().collect();
		let target_len = seed_tokens.len() + input.max_words;

		let mut beams = vec![Beam { tokens: seed_tokens, score: 0.0 }];

		// All live beams share the same length, one word is appended per step
		while beams[0].tokens.len() < target_len {
			// Words the current beams end with, for the diversity penalty
			let endings: Vec<&str> = beams
				.iter()
				.filter_map(|beam| beam.tokens.last())
				.map(String::as_str)
				.collect();

			let mut extended: Vec<Beam> = Vec::new();
			for beam in &beams {
				let candidates = self.score_candidates(beam, &endings, &vocabulary, &weights, input);
				let candidates = Self::filter_candidates(candidates, input);

				for candidate in candidates {
					let mut tokens = beam.tokens.clone();
					tokens.push(candidate.word);

					let mut score = beam.score + candidate.log_prob;
					if input.length_normalization {
						score /= tokens.len() as f64;
					}

					extended.push(Beam { tokens, score });
				}
			}

			if extended.is_empty() {
				// No successor anywhere, keep what was built
				break;
			}

			// Stable sort: equal scores keep candidate insertion order
			extended.sort_by(|a, b| b.score.total_cmp(&a.score));
			extended.truncate(input.beam_width);
			beams = extended;
		}

		Ok(beams.swap_remove(0).tokens.join(" "))
	}

	/// Resolves the starting phrase from the input strategy.
	///
	/// # Errors
	/// - `Custom` seeds must not be empty or whitespace-only.
	/// - `Random` fails when the chain holds no vocabulary.
	fn resolve_seed(&self, input: &GenerationInput) -> Result<String, String> {
		match &input.start_seed {
			StartSeed::Custom(seed) => {
				if seed.trim().is_empty() {
					Err("Seed must not be empty".to_owned())
				} else {
					Ok(seed.clone())
				}
			}
			StartSeed::Random => self
				.chain
				.random_seed()
				.ok_or_else(|| "No seed available for generation".to_owned()),
		}
	}

	/// Scores every vocabulary word as an extension of `beam`.
	///
	/// Words with no interpolated probability are dropped. The result is
	/// sorted by score, best first; the sort is stable so exact ties keep
	/// the first-seen vocabulary order.
	fn score_candidates(
		&self,
		beam: &Beam,
		endings: &[&str],
		vocabulary: &[&str],
		weights: &[(usize, f32)],
		input: &GenerationInput,
	) -> Vec<Candidate> {
		let temperature = f64::from(input.temperature());

		let mut candidates = Vec::new();
		for &word in vocabulary {
			let probability = self.chain.probability(&beam.tokens, word, weights);
			if probability <= 0.0 {
				continue;
			}

			let mut log_prob = probability.ln() / temperature;

			// Discourage words the beam already contains
			let repetitions = beam.tokens.iter().filter(|token| token.as_str() == word).count();
			log_prob -= f64::from(input.repetition_penalty) * repetitions as f64;

			// Discourage words other beams already end with
			let shared_endings = endings.iter().filter(|&ending| **ending == *word).count();
			log_prob -= f64::from(input.diversity_penalty) * shared_endings as f64;

			candidates.push(Candidate { word: word.to_owned(), log_prob });
		}

		candidates.sort_by(|a, b| b.log_prob.total_cmp(&a.log_prob));
		candidates
	}

	/// Applies the top-k and top-p filters to a sorted candidate list.
	///
	/// Top-k truncates to the `k` best candidates (0 keeps all). Top-p
	/// renormalizes the remaining probabilities and keeps the smallest
	/// prefix whose cumulative mass reaches the bound.
	fn filter_candidates(mut candidates: Vec<Candidate>, input: &GenerationInput) -> Vec<Candidate> {
		if let Some(top_k) = input.top_k {
			if top_k > 0 && candidates.len() > top_k {
				candidates.truncate(top_k);
			}
		}

		if let Some(top_p) = input.top_p() {
			let bound = f64::from(top_p);
			if bound < 1.0 && !candidates.is_empty() {
				let masses: Vec<f64> = candidates.iter().map(|candidate| candidate.log_prob.exp()).collect();
				let total: f64 = masses.iter().sum();
				if total > 0.0 {
					let mut cumulative = 0.0;
					let mut keep = 0;
					for mass in &masses {
						cumulative += mass / total;
						keep += 1;
						if cumulative >= bound {
							break;
						}
					}
					candidates.truncate(keep);
				}
			}
		}

		candidates
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const CORPUS: &str = "the dog barks the dog sleeps the cat sleeps";

	fn bigram_input(generator: &Generator, seed: &str, max_words: usize) -> GenerationInput {
		let mut input = generator.make_input();
		input.max_words = max_words;
		input.start_seed = StartSeed::Custom(seed.to_owned());
		input.set_order_weight(2, 1.0).unwrap();
		input
	}

	fn generator() -> Generator {
		Generator::new(MarkovChain::from_text(CORPUS, 3).unwrap())
	}

	#[test]
	fn greedy_beam_follows_bigram_counts() {
		let generator = generator();
		// the -> dog (2/3 against 1/3 for cat)
		// dog -> barks (tie with sleeps, barks seen first)
		let input = bigram_input(&generator, "the", 2);
		assert_eq!(generator.generate(&input).unwrap(), "the dog barks");
	}

	#[test]
	fn trigram_weights_use_two_context_words() {
		let generator = generator();
		let mut input = generator.make_input();
		input.max_words = 1;
		input.start_seed = StartSeed::Custom("the dog".to_owned());
		input.set_order_weight(3, 1.0).unwrap();

		// "the dog" -> barks and sleeps tie, barks was seen first
		assert_eq!(generator.generate(&input).unwrap(), "the dog barks");
	}

	#[test]
	fn zero_max_words_returns_the_seed() {
		let generator = generator();
		let input = bigram_input(&generator, "the dog", 0);
		assert_eq!(generator.generate(&input).unwrap(), "the dog");
	}

	#[test]
	fn unknown_seed_stops_without_extension() {
		let generator = generator();
		let input = bigram_input(&generator, "zzz", 4);
		assert_eq!(generator.generate(&input).unwrap(), "zzz");
	}

	#[test]
	fn repetition_penalty_diverts_from_loops() {
		let generator = Generator::new(MarkovChain::from_text("a a a b", 2).unwrap());
		let mut input = bigram_input(&generator, "a", 1);

		// Unpenalized, "a" wins with 2/3
		assert_eq!(generator.generate(&input).unwrap(), "a a");

		// The seed already contains "a", so a strong penalty flips the pick
		input.repetition_penalty = 10.0;
		assert_eq!(generator.generate(&input).unwrap(), "a b");
	}

	#[test]
	fn top_k_keeps_only_the_best_candidates() {
		let generator = Generator::new(MarkovChain::from_text("a b a b a c", 2).unwrap());
		let mut input = bigram_input(&generator, "a", 1);
		input.beam_width = 2;
		input.top_k = Some(1);
		assert_eq!(generator.generate(&input).unwrap(), "a b");
	}

	#[test]
	fn top_p_truncates_the_candidate_tail() {
		let generator = Generator::new(MarkovChain::from_text("a b a b a c", 2).unwrap());
		let mut input = bigram_input(&generator, "a", 1);
		input.beam_width = 2;
		// b holds 2/3 of the mass, enough to satisfy the bound alone
		input.set_top_p(Some(0.5)).unwrap();
		assert_eq!(generator.generate(&input).unwrap(), "a b");
	}

	#[test]
	fn beam_width_zero_is_rejected() {
		let generator = generator();
		let mut input = bigram_input(&generator, "the", 1);
		input.beam_width = 0;
		assert!(generator.generate(&input).is_err());
	}

	#[test]
	fn empty_custom_seed_is_rejected() {
		let generator = generator();
		let input = bigram_input(&generator, "  ", 1);
		assert!(generator.generate(&input).is_err());
	}

	#[test]
	fn untrained_chain_is_rejected() {
		let generator = Generator::new(MarkovChain::new(2).unwrap());
		let mut input = generator.make_input();
		input.start_seed = StartSeed::Custom("the".to_owned());
		assert!(generator.generate(&input).is_err());
	}

	#[test]
	fn random_seed_draws_from_the_vocabulary() {
		let generator = generator();
		let mut input = generator.make_input();
		input.max_words = 0;
		input.start_seed = StartSeed::Random;

		for _ in 0..10 {
			let word = generator.generate(&input).unwrap();
			assert!(generator.chain().vocabulary().contains(&word.as_str()));
		}
	}

	#[test]
	fn generation_is_deterministic_for_custom_seeds() {
		let generator = generator();
		let mut input = generator.make_input();
		input.max_words = 5;
		input.beam_width = 3;
		input.start_seed = StartSeed::Custom("the".to_owned());
		input.set_order_weight(1, 0.2).unwrap();
		input.set_order_weight(2, 0.3).unwrap();
		input.set_order_weight(3, 0.5).unwrap();
		input.repetition_penalty = 0.1;
		input.diversity_penalty = 0.5;
		input.length_normalization = true;

		let first = generator.generate(&input).unwrap();
		let second = generator.generate(&input).unwrap();
		assert_eq!(first, second);
		assert!(first.split_whitespace().count() <= 6);
	}
}
