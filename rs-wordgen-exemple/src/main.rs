use std::env;

use rs_wordgen_core::io;
use rs_wordgen_core::model::chain::MarkovChain;
use rs_wordgen_core::model::generation_input::StartSeed;
use rs_wordgen_core::model::generator::Generator;
use rs_wordgen_core::model::next_word::NextWordGenerator;
use rs_wordgen_core::value::Value;
use rs_wordgen_core::vocab::Vocabulary;

/// Word list used when no corpus file is given on the command line.
const DEFAULT_CORPUS: &str = "the quick brown fox jumps over lazy dog \
    the lazy fox the quick brown dog sleeps \
    the cat sits on the mat the dog barks";

/// Training text for the multi-order chain demonstration.
const TRAINING_TEXT: &str = "The dog likes eating food. The dog likes eating fish. \
    The cat likes eating food. The cat likes eating fish. \
    The dog is friendly and playful. The cat is graceful and curious. \
    The fish is swimming in clear water. The fish is colorful and lively. \
    The food is delicious and nutritious. The food is served with care. \
    The fish like to swim together in a school. The fish like to explore their surroundings.";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Command line: [seed phrase] [max appended words] [corpus file]
    let args: Vec<String> = env::args().collect();
    let seed = args.get(1).cloned().unwrap_or_else(|| "the quick brown fox".to_owned());
    let max_words: usize = match args.get(2) {
        Some(raw) => raw.parse()?,
        None => 8,
    };
    let corpus: Vec<String> = match args.get(3) {
        Some(path) => {
            log::info!("Loading corpus from {}", path);
            io::read_tokens(path)?
        }
        None => DEFAULT_CORPUS.split_whitespace().map(str::to_owned).collect(),
    };
    log::info!("Corpus holds {} tokens", corpus.len());

    // Grow the seed by appending the most frequent successor of the
    // current last word, one word per step
    let generator = NextWordGenerator::new(corpus);
    println!("Most frequent successors: {}", generator.generate(&seed, max_words)?);

    // Same loop, but each successor is drawn by weighted random sampling
    println!("Weighted sampling: {}", generator.generate_sampled(&seed, max_words)?);

    // A seed that never occurs in the corpus comes back unchanged
    println!("Unknown seed: {}", generator.generate("nonexistent", max_words)?);

    // An empty seed is rejected up front
    match generator.generate("   ", max_words) {
        Ok(_) => println!("Should not happen"),
        Err(_) => println!("An empty seed is invalid"),
    }

    // Train unigram, bigram and trigram counts in one pass
    let chain = MarkovChain::from_text(TRAINING_TEXT, 3)?;
    log::info!("Chain trained on {} tokens", chain.token_count());

    // Create a generation input with default intensity for every order
    let app = Generator::new(chain);
    let mut input = app.make_input();

    // Maximum number of words appended to the seed
    input.max_words = max_words;

    // Number of hypotheses kept alive after each step
    input.beam_width = 3;

    // Keep only the 5 best candidates, then the smallest set holding
    // 90% of the probability mass
    input.top_k = Some(5);
    input.set_top_p(Some(0.9))?;

    // Temperatures below 1.0 sharpen the distribution
    input.set_temperature(0.8)?;

    // Discourage repeated words and identical beam endings
    input.repetition_penalty = 0.1;
    input.diversity_penalty = 0.5;
    input.length_normalization = true;

    // Start from a fixed phrase; 'Random' would draw a vocabulary word
    input.start_seed = StartSeed::Custom("The dog".to_owned());

    // Set the intensity for each order (not normalized; weights are
    // computed internally and sum to 1.0)
    input.set_order_weight(3, 0.5)?;
    input.set_order_weight(2, 0.3)?;
    input.set_order_weight(1, 0.2)?;

    // Attempting to weight an order the chain does not hold
    match input.set_order_weight(7, 1.0) {
        Ok(_) => println!("Should not happen"),
        Err(_) => println!("This order (7) does not exist"),
    }

    // Test invalid parameter values
    match input.set_temperature(0.0) {
        Ok(_) => println!("Should not happen"),
        Err(_) => println!("Temperature 0.0 is invalid, must be strictly positive"),
    }
    match input.set_top_p(Some(1.5)) {
        Ok(_) => println!("Should not happen"),
        Err(_) => println!("top_p 1.5 is invalid, must be between 0.0 and 1.0"),
    }

    // The weight of each order is computed from its intensity
    for (order, weight) in input.order_weights() {
        println!("order {}: {}", order, weight);
    }

    println!("Beam search: {}", app.generate(&input)?);

    // Start from a random vocabulary word instead
    input.start_seed = StartSeed::Random;
    println!("Beam search from a random seed: {}", app.generate(&input)?);

    // Character vocabulary of the training text
    let vocabulary = Vocabulary::from_text(TRAINING_TEXT);
    println!("The training text holds {} distinct characters", vocabulary.len());
    let ids = vocabulary.encode("dog")?;
    println!("'dog' encodes to {:?} and decodes back to '{}'", ids, vocabulary.decode(&ids)?);

    // Scalar values with overloaded arithmetic
    let a = Value::new(5.0);
    let b = Value::new(6.0);
    println!("{} * {} = {}", a, b, a * b);

    Ok(())
}
