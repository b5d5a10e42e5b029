use std::path::Path;

use rand::Rng;

use crate::corpus;
use crate::error::{PronpassError, PronpassResult};
use crate::io;
use crate::model::build_input::{BuildInput, SeedMode};
use crate::model::indexed_model::IndexedModel;
use crate::model::probability_model::ProbabilityModel;

/// High-level generator managing a merged corpus model.
///
/// # Responsibilities
/// - Load every corpus file of a directory into one [`IndexedModel`]
/// - Resolve the seed strategy of a [`BuildInput`] to a starting letter
/// - Build passwords with a retry budget for stalled attempts
#[derive(Debug)]
pub struct PasswordGenerator {
	model: IndexedModel,
}

impl PasswordGenerator {
	/// Returns a default, empty `PasswordGenerator`.
	///
	/// Useful for callers that load corpora on demand instead of
	/// scanning a directory up front.
	pub fn default() -> Self {
		Self { model: IndexedModel::default() }
	}

	/// Creates a generator by loading all corpus files from a directory.
	///
	/// # Parameters
	/// - `filepath`: Path to a directory containing corpus CSV files.
	///   Both `"folder"` and `"folder/"` are accepted.
	///
	/// # Behavior
	/// - Lists all files with the corpus extension in the directory.
	/// - Loads each corpus into the shared model, cached ones from
	///   their binary.
	/// - The corpus name is derived from the file name (without
	///   extension).
	///
	/// # Errors
	/// - Returns [`PronpassError::NotADirectory`] if the path does not
	///   exist or is not a directory.
	/// - Returns an error if a corpus fails to load.
	///
	/// # Notes
	/// - Only files directly contained in the directory are loaded
	///   (subdirectories are ignored).
	pub fn new<P: AsRef<Path>>(filepath: P) -> PronpassResult<Self> {
		let mut generator = Self::default();

		let folder = match filepath.as_ref().to_str() {
			Some(s) => io::normalize_folder(s),
			None => {
				return Err(PronpassError::NotADirectory {
					path: filepath.as_ref().to_string_lossy().into_owned(),
				});
			}
		};

		if !folder.is_dir() {
			return Err(PronpassError::NotADirectory { path: folder.display().to_string() });
		}

		for file in corpus::list_corpus_files(&folder)? {
			let full_path = folder.join(&file);
			generator.load_corpus(&full_path)?;
		}

		Ok(generator)
	}

	/// Returns the list of loaded corpus names.
	///
	/// Provides a read-only reference to internal names.
	pub fn get_corpus_names(&self) -> &Vec<String> {
		self.model.get_corpus_names()
	}

	/// The merged model every build reads from.
	pub fn model(&self) -> &IndexedModel {
		&self.model
	}

	/// Loads one corpus file and merges it into the shared model.
	///
	/// # Errors
	/// Returns [`PronpassError::CorpusAlreadyLoaded`] if a corpus with
	/// the same name is already in, or any load error.
	pub fn load_corpus<P: AsRef<Path>>(&mut self, filepath: P) -> PronpassResult<()> {
		let key = io::file_stem_name(&filepath)?;
		if self.model.get_corpus_names().contains(&key) {
			return Err(PronpassError::CorpusAlreadyLoaded { name: key });
		}

		let corpus_model = IndexedModel::load(&filepath)?;
		self.model.merge(&corpus_model)?;
		Ok(())
	}

	/// The ranked successors of `letter` in the merged model.
	///
	/// # Errors
	/// Returns [`PronpassError::KeyNotFound`] for a letter absent from
	/// every loaded corpus.
	pub fn ranked_successors(&self, letter: char) -> PronpassResult<&[char]> {
		self.model.ranked_successors(letter)
	}

	/// Builds one password with the process RNG.
	///
	/// See [`generate_with`](Self::generate_with).
	pub fn generate(&self, input: &BuildInput) -> PronpassResult<String> {
		self.generate_with(&mut rand::rng(), input)
	}

	/// Builds one password.
	///
	/// # Parameters
	/// - `rng`: Random source for seed selection and window draws.
	/// - `input`: Length, seed strategy, retry budget and window.
	///
	/// # Behavior
	/// - Resolves the seed strategy to a starting letter.
	/// - Builds iteratively from that letter.
	/// - On a stalled build, retries from a fresh seed up to
	///   `input.nb_try` times; a custom seed stalls the same way every
	///   time, so retries mostly help the random strategy.
	///
	/// # Errors
	/// - Returns [`PronpassError::EmptyModel`] if no corpus is loaded.
	/// - Returns the last [`PronpassError::NoSuccessorAvailable`] once
	///   the retry budget is spent.
	pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R, input: &BuildInput) -> PronpassResult<String> {
		if self.model.is_empty() {
			return Err(PronpassError::EmptyModel);
		}

		let mut nb_try = input.nb_try;
		loop {
			let seed_letter = match input.seed {
				SeedMode::Custom(letter) => letter,
				SeedMode::Random => self.model.get_random_seed_letter_with(rng)?,
			};

			match self
				.model
				.build_password_from_with(rng, seed_letter, input.length, input.sample_limit())
			{
				Ok(password) => return Ok(password),
				Err(PronpassError::NoSuccessorAvailable { stuck, partial }) => {
					if nb_try == 0 {
						return Err(PronpassError::NoSuccessorAvailable { stuck, partial });
					}
					log::warn!("build stalled on '{stuck}' after \"{partial}\", {nb_try} tries left");
					nb_try -= 1;
				}
				Err(e) => return Err(e),
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;

	fn corpus_dir(files: &[(&str, &str)]) -> tempfile::TempDir {
		let dir = tempfile::tempdir().unwrap();
		for (name, body) in files {
			std::fs::write(dir.path().join(name), body).unwrap();
		}
		dir
	}

	#[test]
	fn new_rejects_non_directories() {
		let dir = corpus_dir(&[("english.csv", "letter pair,count\nab,1\n")]);
		let file_path = dir.path().join("english.csv");

		match PasswordGenerator::new(&file_path) {
			Err(PronpassError::NotADirectory { .. }) => (),
			other => panic!("expected NotADirectory, got {other:?}"),
		}
	}

	#[test]
	fn new_loads_every_corpus_of_the_directory() {
		let dir = corpus_dir(&[
			("english.csv", "letter pair,count\nth,10\nhe,9\n"),
			("extra.csv", "letter pair,count\nth,5\n"),
			("notes.txt", "not a corpus\n"),
		]);

		let generator = PasswordGenerator::new(dir.path()).unwrap();
		// Directory listing is sorted, so names come back in file order.
		assert_eq!(generator.get_corpus_names(), &vec!["english".to_owned(), "extra".to_owned()]);
		// Counts from both files are merged.
		assert_eq!(generator.ranked_successors('t').unwrap(), &['h']);
		assert_eq!(generator.model().successor_count('t', 'h'), 15);
	}

	#[test]
	fn loading_the_same_corpus_twice_is_an_error() {
		let dir = corpus_dir(&[("english.csv", "letter pair,count\nab,1\n")]);
		let mut generator = PasswordGenerator::new(dir.path()).unwrap();

		match generator.load_corpus(dir.path().join("english.csv")) {
			Err(PronpassError::CorpusAlreadyLoaded { name }) => assert_eq!(name, "english"),
			other => panic!("expected CorpusAlreadyLoaded, got {other:?}"),
		}
	}

	#[test]
	fn generate_needs_at_least_one_corpus() {
		let dir = corpus_dir(&[]);
		let generator = PasswordGenerator::new(dir.path()).unwrap();

		match generator.generate(&BuildInput::default()) {
			Err(PronpassError::EmptyModel) => (),
			other => panic!("expected EmptyModel, got {other:?}"),
		}
	}

	#[test]
	fn custom_seed_drives_the_build() {
		let dir = corpus_dir(&[("cycle.csv", "letter pair,count\nab,1\nba,1\n")]);
		let generator = PasswordGenerator::new(dir.path()).unwrap();

		let mut input = BuildInput::default();
		input.length = 6;
		input.seed = SeedMode::Custom('a');

		assert_eq!(generator.generate(&input).unwrap(), "ababab");
	}

	#[test]
	fn retry_budget_does_not_rescue_a_dead_end_seed() {
		let dir = corpus_dir(&[("dead.csv", "letter pair,count\nab,1\n")]);
		let generator = PasswordGenerator::new(dir.path()).unwrap();

		let mut input = BuildInput::default();
		input.length = 3;
		input.nb_try = 5;
		input.seed = SeedMode::Custom('a');

		match generator.generate(&input) {
			Err(PronpassError::NoSuccessorAvailable { stuck, partial }) => {
				assert_eq!(stuck, 'b');
				assert_eq!(partial, "ab");
			}
			other => panic!("expected NoSuccessorAvailable, got {other:?}"),
		}
	}

	#[test]
	fn retry_budget_rescues_the_random_strategy() {
		// Seeds 'a' and 'b' cycle forever, seed 'x' stalls after one
		// step. With a generous budget a random start settles on a
		// viable seed.
		let dir = corpus_dir(&[("mixed.csv", "letter pair,count\nab,1\nba,1\nxq,1\n")]);
		let generator = PasswordGenerator::new(dir.path()).unwrap();

		let mut input = BuildInput::default();
		input.length = 3;
		input.nb_try = 50;

		let mut rng = StdRng::seed_from_u64(3);
		let password = generator.generate_with(&mut rng, &input).unwrap();
		assert_eq!(password.chars().count(), 3);
	}
}
