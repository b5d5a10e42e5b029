//! End-to-end tests over the public API.
//!
//! Each test writes a small corpus directory, loads it through
//! `PasswordGenerator` or the model strategies directly, and checks the
//! behavior a consumer of the crate relies on: rankings, password
//! shape, caching, and multi-corpus merging.

use rand::SeedableRng;
use rand::rngs::StdRng;

use pronpass_core::error::PronpassError;
use pronpass_core::model::build_input::{BuildInput, SeedMode};
use pronpass_core::model::generator::PasswordGenerator;
use pronpass_core::model::indexed_model::IndexedModel;
use pronpass_core::model::linear_model::LinearScanModel;
use pronpass_core::model::probability_model::ProbabilityModel;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn corpus_dir(files: &[(&str, &str)]) -> tempfile::TempDir {
	let dir = tempfile::tempdir().expect("temp corpus dir");
	for (name, body) in files {
		std::fs::write(dir.path().join(name), body).expect("corpus file");
	}
	dir
}

// Every letter has exactly one successor, so builds are deterministic.
const TRIANGLE: &str = "letter pair,count\nth,10\nhe,9\net,4\n";

// Every letter of {a, b, c} has successors, so builds never stall.
const CLOSED: &str = "letter pair,count\n\
	ab,9\nac,4\nba,7\nbc,2\nca,5\ncb,3\n";

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn directory_to_password_pipeline() {
	let dir = corpus_dir(&[("english.csv", TRIANGLE)]);
	let generator = PasswordGenerator::new(dir.path()).unwrap();

	let mut input = BuildInput::default();
	input.length = 9;
	input.seed = SeedMode::Custom('t');

	// Single-successor chains leave nothing to chance.
	assert_eq!(generator.generate(&input).unwrap(), "thethethe");
}

#[test]
fn every_adjacent_pair_of_a_password_is_an_observed_pair() {
	let dir = corpus_dir(&[("closed.csv", CLOSED)]);
	let generator = PasswordGenerator::new(dir.path()).unwrap();

	let mut input = BuildInput::default();
	input.length = 24;
	input.set_sample_limit(3).unwrap();

	let mut rng = StdRng::seed_from_u64(17);
	let password = generator.generate_with(&mut rng, &input).unwrap();
	assert_eq!(password.chars().count(), 24);

	let letters: Vec<char> = password.chars().collect();
	for pair in letters.windows(2) {
		let successors = generator.ranked_successors(pair[0]).unwrap();
		assert!(
			successors.contains(&pair[1]),
			"pair {}{} was never observed",
			pair[0],
			pair[1]
		);
	}
}

#[test]
fn both_strategies_rank_a_corpus_file_identically() {
	let dir = corpus_dir(&[(
		"tied.csv",
		"letter pair,count\nth,3\nte,3\nth,4\nta,7\nhe,1\n",
	)]);
	let path = dir.path().join("tied.csv");

	let linear = LinearScanModel::load(&path).unwrap();
	let indexed = IndexedModel::load(&path).unwrap();

	// 'a' and 'h' both total 7; the tie resolves alphabetically.
	assert_eq!(linear.possible_next_letters('t'), vec!['a', 'h', 'e']);
	assert_eq!(indexed.possible_next_letters('t'), vec!['a', 'h', 'e']);

	assert_eq!(linear.possible_next_letters('h'), indexed.possible_next_letters('h'));
	assert!(linear.possible_next_letters('z').is_empty());
	assert!(indexed.possible_next_letters('z').is_empty());
}

#[test]
fn second_generator_load_goes_through_the_cache() {
	let dir = corpus_dir(&[("english.csv", CLOSED)]);

	let first = PasswordGenerator::new(dir.path()).unwrap();
	assert!(dir.path().join("english.bin").exists());

	let second = PasswordGenerator::new(dir.path()).unwrap();
	assert_eq!(second.get_corpus_names(), first.get_corpus_names());
	for letter in ['a', 'b', 'c'] {
		assert_eq!(
			second.ranked_successors(letter).unwrap(),
			first.ranked_successors(letter).unwrap()
		);
	}
}

#[test]
fn corpora_merge_across_files() {
	let dir = corpus_dir(&[
		("english.csv", "letter pair,count\nth,1\nti,2\n"),
		("extra.csv", "letter pair,count\nth,5\n"),
	]);
	let generator = PasswordGenerator::new(dir.path()).unwrap();

	assert_eq!(generator.get_corpus_names(), &vec!["english".to_owned(), "extra".to_owned()]);
	// th totals 6 across the two files and overtakes ti.
	assert_eq!(generator.ranked_successors('t').unwrap(), &['h', 'i']);
}

#[test]
fn unknown_letters_surface_as_key_not_found() {
	let dir = corpus_dir(&[("english.csv", TRIANGLE)]);
	let generator = PasswordGenerator::new(dir.path()).unwrap();

	match generator.ranked_successors('z') {
		Err(PronpassError::KeyNotFound { letter }) => assert_eq!(letter, 'z'),
		other => panic!("expected KeyNotFound, got {other:?}"),
	}
}
