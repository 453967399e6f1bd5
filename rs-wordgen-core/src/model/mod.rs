//! Top-level module for the word generation system.
//!
//! This module provides two generation paths over a word corpus:
//! - A next-word generator scanning the corpus directly (`NextWordGenerator`)
//! - Multi-order counted models (`NGramModel`, `MarkovChain`) driven by a
//!   beam-search generator (`Generator`)

/// Next-word generator driven by per-step successor counting.
///
/// Scans the reference corpus on every step and appends the most frequent
/// (or a sampled) successor of the current last word.
pub mod next_word;

/// High-level beam-search interface over a trained `MarkovChain`.
///
/// Exposes input construction, seed resolution and sequence generation
/// with interpolation, filtering and penalty controls.
pub mod generator;

/// Multi-order word model composed of multiple `NGramModel`s.
///
/// Supports incremental training from text, interpolated word
/// probabilities and random seed selection.
pub mod chain;

/// Fixed-order word n-gram model (`n >= 1`).
///
/// Handles token ingestion, successor counting and most-frequent
/// prediction for a given context.
pub mod ngram;

/// Successor tally for a single word or context.
///
/// Tracks occurrence counts with earliest positions and supports
/// most-frequent selection and weighted random sampling.
pub mod tally;

/// Generation configuration structure.
///
/// Stores beam-search parameters such as beam width, temperature,
/// filtering thresholds, penalties and normalized interpolation weights.
/// Built through `Generator::make_input`.
pub mod generation_input;
