use std::cmp::max;
use std::collections::HashMap;
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use rand::Rng;
use rand::prelude::IteratorRandom;
use serde::{Deserialize, Serialize};

use crate::corpus::parse_rows;
use crate::error::{PronpassError, PronpassResult};
use crate::io::{build_cache_path, file_stem_name, read_lines};
use crate::model::observation::Observation;
use crate::model::probability_model::ProbabilityModel;
use crate::model::successors::SuccessorSet;

/// Probability model with aggregated tables and precomputed rankings.
///
/// This struct manages:
/// - `tables`: a map from first letter to its aggregated `SuccessorSet`.
/// - `ranked`: the ranking of each successor set, most frequent first,
///   recomputed whenever the tables change.
/// - `corpus_names`: names of the corpus files loaded from disk.
///
/// Ingestion pays the aggregation and sorting cost once; every query is
/// then a map lookup. Models built from a corpus file are serialized
/// next to it so later loads skip parsing entirely.
#[derive(Serialize, Deserialize, Debug)]
pub struct IndexedModel {
	tables: HashMap<char, SuccessorSet>,
	ranked: HashMap<char, Vec<char>>,
	corpus_names: Vec<String>,
}

impl IndexedModel {
	/// Returns a default, empty `IndexedModel`.
	///
	/// Useful for creating a blank model that can then be merged into.
	pub fn default() -> Self {
		Self { tables: HashMap::new(), ranked: HashMap::new(), corpus_names: Vec::new() }
	}

	/// Loads an `IndexedModel` from a cache file if one exists,
	/// otherwise builds the model by reading the raw corpus file and
	/// performing multithreaded merging.
	///
	/// - `filepath` is the input corpus CSV file.
	/// - Checks if a binary cache exists next to it for fast loading.
	/// - Uses `postcard` for compact serialization/deserialization.
	/// - Calls `read_corpus_file` if the cache does not exist.
	///
	/// # Errors
	/// Corpus read or parse errors, cache serialization errors, or I/O
	/// errors from either path.
	pub fn load<P: AsRef<Path>>(filepath: P) -> PronpassResult<Self> {
		let cache_path = build_cache_path(&filepath)?;
		let mut model;
		if cache_path.exists() {
			let bytes = std::fs::read(&cache_path)?;
			model = postcard::from_bytes(&bytes)?;
			log::debug!("loaded model from cache '{}'", cache_path.display());
		} else {
			model = Self::read_corpus_file(&filepath, cache_path)?;
		}
		model.corpus_names.push(file_stem_name(&filepath)?);
		Ok(model)
	}

	/// Returns the list of loaded corpus names.
	///
	/// The returned vector contains corpus identifiers as strings,
	/// corresponding to corpus file names (without path or extension).
	///
	/// # Notes
	/// - The returned reference is immutable; callers cannot modify the
	///   internal state.
	/// - The order of the names is preserved as stored internally.
	pub fn get_corpus_names(&self) -> &Vec<String> {
		&self.corpus_names
	}

	/// Reads a corpus file, splits its rows into chunks, builds partial
	/// models in parallel, merges them into a final `IndexedModel`, and
	/// serializes it.
	///
	/// # Parameters
	/// - `filename`: Input corpus CSV file.
	/// - `cache_path`: Output path for the serialized binary model.
	///
	/// # Returns
	/// - `Ok(IndexedModel)`: The merged and serialized model.
	/// - `Err(...)`: If file I/O, parsing or merging fails.
	///
	/// # Behavior
	/// - Drops the header line, then splits the rows into chunks (based
	///   on CPU cores * factor).
	/// - Spawns threads to parse and aggregate each chunk.
	/// - Merges all partial models sequentially.
	/// - Serializes the final model to `cache_path` for future fast
	///   loading.
	///
	/// # Notes
	/// - Uses MPSC channels to collect partial results from threads.
	/// - Each chunk keeps its physical first line number so parse errors
	///   point at the right row of the file.
	fn read_corpus_file<PF, PB>(filename: PF, cache_path: PB) -> PronpassResult<IndexedModel>
	where
		PF: AsRef<Path>,
		PB: AsRef<Path>,
	{
		let lines = read_lines(&filename)?;
		let rows: &[String] = match lines.split_first() {
			Some((_header, rows)) => rows,
			None => &[],
		};

		let cpus = num_cpus::get();
		let factor = 8;
		let chunks = cpus * factor;
		let chunk_size = max(1, (rows.len() + chunks - 1) / chunks);

		let (tx, rx) = mpsc::channel();
		for (index, chunk) in rows.chunks(chunk_size).enumerate() {
			let tx = tx.clone();
			let chunk: Vec<String> = chunk.to_vec();
			// Data rows start on line 2, after the header.
			let first_line = 2 + index * chunk_size;

			thread::spawn(move || {
				let partial_model = parse_rows(&chunk, first_line).map(IndexedModel::from_observations);
				tx.send(partial_model).expect("Failed to send from thread");
			});
		}
		drop(tx);

		// Every worker is drained before any error is raised, so no
		// send can hit a closed channel.
		let partial_models: Vec<PronpassResult<IndexedModel>> = rx.iter().collect();

		let mut final_model = IndexedModel::default();
		for partial_model in partial_models {
			final_model.merge(&partial_model?)?;
		}

		let bytes = postcard::to_stdvec(&final_model)?;
		std::fs::write(&cache_path, bytes)?;
		log::debug!("cached model at '{}'", cache_path.as_ref().display());

		Ok(final_model)
	}

	/// Merges another `IndexedModel` into this one.
	///
	/// # Parameters
	/// - `other`: Reference to another `IndexedModel` to merge.
	///
	/// # Behavior
	/// - Merges each successor set: existing sets are summed in place;
	///   missing ones are cloned.
	/// - Appends the corpus names of `other`.
	/// - Recomputes the rankings, which the merge invalidates.
	pub fn merge(&mut self, other: &Self) -> PronpassResult<()> {
		for (letter, successors) in &other.tables {
			if let Some(existing) = self.tables.get_mut(letter) {
				existing.merge(successors)?;
			} else {
				self.tables.insert(*letter, successors.clone());
			}
		}

		self.corpus_names.extend(other.corpus_names.clone());
		self.rank_subsets();

		Ok(())
	}

	/// The ranked successors of `letter`, strict form.
	///
	/// Unlike [`possible_next_letters`](ProbabilityModel::possible_next_letters)
	/// this reports an unknown letter as an error instead of an empty
	/// list, so callers that asked about a specific letter can surface
	/// the miss.
	///
	/// # Errors
	/// Returns [`PronpassError::KeyNotFound`] for a letter absent from
	/// the tables.
	pub fn ranked_successors(&self, letter: char) -> PronpassResult<&[char]> {
		self.ranked
			.get(&letter)
			.map(Vec::as_slice)
			.ok_or(PronpassError::KeyNotFound { letter })
	}

	/// Aggregated count of the pair `first` then `second`, 0 if the
	/// pair was never observed.
	pub fn successor_count(&self, first: char, second: char) -> u64 {
		self.tables
			.get(&first)
			.and_then(|successors| successors.count(second))
			.unwrap_or(0)
	}

	/// Picks a starting letter uniformly among the observed first
	/// letters, using the process RNG.
	pub fn get_random_seed_letter(&self) -> PronpassResult<char> {
		self.get_random_seed_letter_with(&mut rand::rng())
	}

	/// Picks a starting letter uniformly among the observed first
	/// letters.
	///
	/// # Errors
	/// Returns [`PronpassError::EmptyModel`] if nothing has been
	/// ingested.
	pub fn get_random_seed_letter_with<R: Rng + ?Sized>(&self, rng: &mut R) -> PronpassResult<char> {
		// Keys are sorted first so a seeded RNG always lands on the
		// same letter.
		let mut letters: Vec<char> = self.tables.keys().copied().collect();
		letters.sort_unstable();
		letters.into_iter().choose(rng).ok_or(PronpassError::EmptyModel)
	}

	/// True when no observation has been ingested.
	pub fn is_empty(&self) -> bool {
		self.tables.is_empty()
	}

	fn add_observation(&mut self, observation: Observation) {
		self.tables
			.entry(observation.first_letter())
			.or_insert_with(|| SuccessorSet::new(observation.first_letter()))
			.add(observation.second_letter(), observation.count());
	}

	fn rank_subsets(&mut self) {
		self.ranked = self
			.tables
			.iter()
			.map(|(letter, successors)| (*letter, successors.ranked()))
			.collect();
	}
}

impl ProbabilityModel for IndexedModel {
	fn from_observations<I>(observations: I) -> Self
	where
		I: IntoIterator<Item = Observation>,
	{
		let mut model = Self::default();
		for observation in observations {
			model.add_observation(observation);
		}
		model.rank_subsets();
		model
	}

	fn possible_next_letters(&self, letter: char) -> Vec<char> {
		self.ranked.get(&letter).cloned().unwrap_or_default()
	}
}
