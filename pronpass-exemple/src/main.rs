use rand::SeedableRng;
use rand::rngs::StdRng;

use pronpass_core::model::build_input::{BuildInput, SeedMode};
use pronpass_core::model::generator::PasswordGenerator;
use pronpass_core::model::indexed_model::IndexedModel;
use pronpass_core::model::probability_model::ProbabilityModel;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load all corpora from the "data" directory (.csv files)
    // Loads automatically from .bin if existing
    let app: PasswordGenerator = PasswordGenerator::new("./data")?;
    println!("Loaded corpora: {}", app.get_corpus_names().join(", "));

    // Tune the build parameters
    let mut input = BuildInput::default();

    // Total password length, seed character included
    input.length = 12;

    // Number of retries if a random seed runs into a dead end
    input.nb_try = 100;

    // Seed can be set to
    // 'Random' picks a starting letter the corpus has seen in first position
    // 'Custom' uses a fixed starting character
    input.seed = SeedMode::Random;

    // Widen the commonness window (sample among the top 3 instead of top 2)
    input.set_sample_limit(3)?;

    // Test an invalid window value
    match input.set_sample_limit(0) {
        Ok(_) => println!("Should not happen"),
        Err(_) => println!("Sample limit 0 is invalid, must be at least 1"),
    }

    // Strict and lenient lookups differ on unknown letters:
    // ranked_successors reports the miss, possible_next_letters
    // would just return an empty list
    match app.ranked_successors('t') {
        Ok(successors) => println!("After 't': {}", successors.iter().collect::<String>()),
        Err(_) => println!("'t' is not in the corpus"),
    }
    match app.ranked_successors('!') {
        Ok(_) => println!("Should not happen"),
        Err(_) => println!("'!' was never observed, the strict lookup says so"),
    }

    // A model loaded directly answers the same queries, and a seeded
    // RNG makes every draw reproducible
    let model = IndexedModel::load("./data/english.csv")?;
    let mut rng = StdRng::seed_from_u64(42);
    let sampled = model.common_next_letter_with(&mut rng, 't', 2)?;
    println!("Sampled after 't' (seeded): {}", sampled);

    // Both builder forms: iterative from a single letter, recursive
    // from a starting fragment
    println!("Iterative build: {}", model.build_password_from('t', 10)?);
    println!("Recursive build: {}", model.recursive_build_password_from("th", 8)?);

    // Test a zero-length build
    match model.build_password_from('t', 0) {
        Ok(_) => println!("Should not happen"),
        Err(_) => println!("Length 0 is invalid, must be at least 1"),
    }

    // Test a recursive build from an empty fragment
    match model.recursive_build_password_from("", 5) {
        Ok(_) => println!("Should not happen"),
        Err(_) => println!("The starting fragment cannot be empty"),
    }

    // Generate 10 passwords using the input settings
    for i in 0..10 {
        println!("Generated password {}: {}", i + 1, app.generate(&input)?);
    }

    Ok(())
}
