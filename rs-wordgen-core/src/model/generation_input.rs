use std::collections::HashMap;

/// Strategy used to select the starting phrase when generating a sequence.
///
/// # Variants
/// - `Custom(String)`: use the provided phrase as the initial sequence.
/// - `Random`: start from a random vocabulary word.
#[derive(Clone, Debug, PartialEq)]
pub enum StartSeed {
	Custom(String),
	Random,
}

/// Input parameters for beam-search generation over a `MarkovChain`.
///
/// `GenerationInput` contains both **configuration parameters** (beam
/// width, temperature, filters, penalties, start seed) and **order
/// selection weights** (intensity and normalized probabilities).
///
/// # Responsibilities
/// - Track generation parameters (`max_words`, `beam_width`, `top_k`,
///   `top_p`, penalties, `start_seed`)
/// - Track per-order intensity (user-adjustable) and compute normalized
///   interpolation weights
/// - Ensure weights always sum to 1.0 (if there are any orders)
///
/// # Invariants
/// - `order_intensity` keys are fixed and correspond to the chain orders
/// - `order_probability` is always normalized, or uniform if all
///   intensities are zero
/// - `temperature` is strictly positive; `top_p` lies in (0.0, 1.0]
pub struct GenerationInput {
	/// Bound on how many words may be appended to the seed.
	pub max_words: usize,

	/// Number of beams kept alive after each step (must be >= 1).
	pub beam_width: usize,

	/// Starting phrase selection strategy.
	pub start_seed: StartSeed,

	/// Temperature applied to log-probabilities (1.0 = neutral).
	temperature: f32,

	/// Optional bound on the number of candidates kept per step.
	/// A value of 0 keeps all candidates.
	pub top_k: Option<usize>,

	/// Optional nucleus bound on cumulative candidate probability.
	top_p: Option<f32>,

	/// Score penalty per prior occurrence of a candidate in its beam.
	pub repetition_penalty: f32,

	/// Score penalty per beam already ending with a candidate.
	pub diversity_penalty: f32,

	/// Whether to divide the running score by the sequence length.
	pub length_normalization: bool,

	/// User-adjustable order intensities (not normalized).
	order_intensity: HashMap<usize, f32>,

	/// Normalized interpolation weights derived from `order_intensity`.
	order_probability: HashMap<usize, f32>,
}

impl GenerationInput {
	/// Creates a new `GenerationInput` from a set of order intensities.
	///
	/// Normalizes the weights internally. Other parameters start at the
	/// neutral defaults: beam width 1, temperature 1.0, no filters, no
	/// penalties, no length normalization, random start seed.
	///
	/// # Visibility
	/// - `pub(crate)` to prevent construction outside the crate; use
	///   `Generator::make_input` instead.
	pub(crate) fn new(order_intensity: HashMap<usize, f32>) -> Self {
		let mut generation_input = Self {
			max_words: 0,
			beam_width: 1,
			start_seed: StartSeed::Random,
			temperature: 1.0,
			top_k: None,
			top_p: None,
			repetition_penalty: 0.0,
			diversity_penalty: 0.0,
			length_normalization: false,
			order_intensity,
			order_probability: HashMap::new(),
		};

		generation_input.normalize();
		generation_input
	}

	/// Normalizes `order_intensity` into `order_probability`.
	///
	/// - If total intensity > 0, weights are proportional to intensities.
	/// - If all intensities are 0, distributes uniform weights across
	///   orders.
	fn normalize(&mut self) {
		let sum: f32 = self.order_intensity.values().sum();

		self.order_probability.clear();

		if sum > 0.0 {
			for (order, intensity) in &self.order_intensity {
				self.order_probability.insert(*order, intensity / sum);
			}
		} else {
			let count = self.order_intensity.len();
			if count > 0 {
				let uniform = 1.0 / count as f32;
				for order in self.order_intensity.keys() {
					self.order_probability.insert(*order, uniform);
				}
			}
		}
	}

	/// Returns the current temperature.
	pub fn temperature(&self) -> f32 {
		self.temperature
	}

	/// Sets the temperature (must be strictly positive and finite).
	///
	/// # Errors
	/// Returns an error if the value is outside the valid range.
	pub fn set_temperature(&mut self, temperature: f32) -> Result<(), String> {
		if !temperature.is_finite() || temperature <= 0.0 {
			return Err("Temperature must be strictly positive".to_owned());
		}
		self.temperature = temperature;
		Ok(())
	}

	/// Returns the current nucleus bound, if any.
	pub fn top_p(&self) -> Option<f32> {
		self.top_p
	}

	/// Sets or clears the nucleus bound.
	///
	/// # Errors
	/// Returns an error if the value is outside (0.0, 1.0].
	pub fn set_top_p(&mut self, top_p: Option<f32>) -> Result<(), String> {
		if let Some(value) = top_p {
			if !(value > 0.0 && value <= 1.0) {
				return Err("top_p must be between 0.0 (exclusive) and 1.0".to_owned());
			}
		}
		self.top_p = top_p;
		Ok(())
	}

	/// Returns an iterator over normalized interpolation weights.
	///
	/// Each item is a tuple `(order, weight)`.
	pub fn order_weights(&self) -> impl Iterator<Item = (usize, f32)> {
		self.order_probability.iter().map(|(order, weight)| (*order, *weight))
	}

	/// Sets the intensity of a specific order.
	///
	/// Automatically normalizes weights after adjustment.
	///
	/// # Parameters
	/// - `order`: Order to adjust.
	/// - `intensity`: New intensity value.
	///
	/// # Errors
	/// Returns an error if the chain does not hold the order.
	pub fn set_order_weight(&mut self, order: usize, intensity: f32) -> Result<(), String> {
		if !self.order_intensity.contains_key(&order) {
			return Err(format!("Order {} not found", order));
		}
		if let Some(value) = self.order_intensity.get_mut(&order) {
			*value = intensity;
		}
		self.normalize();
		Ok(())
	}
}
