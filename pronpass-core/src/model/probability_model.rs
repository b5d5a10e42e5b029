use rand::Rng;

use crate::error::{PronpassError, PronpassResult};
use crate::model::observation::Observation;

/// Number of top-ranked successors the sampler draws from by default.
pub const DEFAULT_SAMPLE_LIMIT: usize = 2;

/// Password length used when callers do not pick one.
pub const DEFAULT_PASSWORD_LENGTH: usize = 10;

/// Shared contract of the two probability-model strategies.
///
/// A probability model aggregates letter-pair observations and answers,
/// for any letter, "which letters tend to come next?". The two
/// implementations ([`LinearScanModel`](crate::model::linear_model::LinearScanModel)
/// and [`IndexedModel`](crate::model::indexed_model::IndexedModel)) differ
/// only in storage and query cost; sampling and password building are
/// provided here so the contract cannot drift between them.
///
/// # Responsibilities
/// - Rank the successors of a letter, most frequent first
/// - Sample the next letter uniformly within a commonness window
/// - Grow a password one character at a time, iteratively or recursively
///
/// # Invariants
/// - Rankings are ordered by aggregated count descending, ties by
///   ascending letter
/// - A letter with no recorded successors ranks as an empty list on
///   every implementation; queries never fail on unknown letters
/// - Both builders extend from the last character of the password
pub trait ProbabilityModel {
	/// Builds a model from already-parsed observation records.
	///
	/// Aggregation is order-independent: permuting the observations
	/// yields identical rankings.
	fn from_observations<I>(observations: I) -> Self
	where
		I: IntoIterator<Item = Observation>,
		Self: Sized;

	/// Returns all observed successors of `letter`, most likely first.
	///
	/// Returns an empty `Vec` for a letter never seen in first position.
	fn possible_next_letters(&self, letter: char) -> Vec<char>;

	/// The most probable next letter.
	///
	/// # Errors
	/// Returns [`PronpassError::EmptyResult`] if `letter` has no
	/// recorded successors.
	fn most_common_next_letter(&self, letter: char) -> PronpassResult<char> {
		self.possible_next_letters(letter)
			.first()
			.copied()
			.ok_or(PronpassError::EmptyResult { letter })
	}

	/// Randomly selects a common next letter, using the process RNG.
	///
	/// See [`common_next_letter_with`](Self::common_next_letter_with).
	fn common_next_letter(&self, letter: char, sample_limit: usize) -> PronpassResult<char> {
		self.common_next_letter_with(&mut rand::rng(), letter, sample_limit)
	}

	/// Randomly selects a letter within the commonness window.
	///
	/// Takes the top `sample_limit` ranked successors of `letter` (fewer
	/// if fewer exist) and draws one uniformly. The counts decide the
	/// ranking and the truncation, not the draw itself.
	///
	/// This is the system's only source of randomness; passing a seeded
	/// RNG makes generation fully deterministic.
	///
	/// # Errors
	/// - [`PronpassError::InvalidSampleLimit`] if `sample_limit` is 0.
	/// - [`PronpassError::EmptyResult`] if `letter` has no successors.
	fn common_next_letter_with<R: Rng + ?Sized>(
		&self,
		rng: &mut R,
		letter: char,
		sample_limit: usize,
	) -> PronpassResult<char> {
		if sample_limit == 0 {
			return Err(PronpassError::InvalidSampleLimit { limit: sample_limit });
		}

		let ranked = self.possible_next_letters(letter);
		if ranked.is_empty() {
			return Err(PronpassError::EmptyResult { letter });
		}

		let window = &ranked[..sample_limit.min(ranked.len())];
		Ok(window[rng.random_range(0..window.len())])
	}

	/// Builds a password of exactly `password_length` characters, with
	/// the default commonness window and the process RNG.
	fn build_password_from(&self, seed_letter: char, password_length: usize) -> PronpassResult<String> {
		self.build_password_from_with(&mut rand::rng(), seed_letter, password_length, DEFAULT_SAMPLE_LIMIT)
	}

	/// Builds a password iteratively: seed first, then one sampled
	/// character per step, each extending from the last character.
	///
	/// # Parameters
	/// - `rng`: Random source for the window draws.
	/// - `seed_letter`: First character of the result.
	/// - `password_length`: Total length of the result, must be >= 1.
	/// - `sample_limit`: Commonness window size, must be >= 1.
	///
	/// # Errors
	/// - [`PronpassError::InvalidLength`] if `password_length` is 0.
	/// - [`PronpassError::NoSuccessorAvailable`] if a step finds no
	///   successor; carries the stuck character and the partial password
	///   so callers can judge corpus quality or retry with another seed.
	fn build_password_from_with<R: Rng + ?Sized>(
		&self,
		rng: &mut R,
		seed_letter: char,
		password_length: usize,
		sample_limit: usize,
	) -> PronpassResult<String> {
		if password_length == 0 {
			return Err(PronpassError::InvalidLength { length: password_length });
		}

		let mut password = String::with_capacity(password_length);
		password.push(seed_letter);

		// Always extend from the last character appended.
		let mut current = seed_letter;
		for _ in 1..password_length {
			let next = match self.common_next_letter_with(rng, current, sample_limit) {
				Ok(next) => next,
				Err(PronpassError::EmptyResult { letter }) => {
					return Err(PronpassError::NoSuccessorAvailable {
						stuck: letter,
						partial: password,
					});
				}
				Err(e) => return Err(e),
			};
			password.push(next);
			current = next;
		}

		Ok(password)
	}

	/// Recursive form of the builder, with the default window and the
	/// process RNG.
	fn recursive_build_password_from(&self, password: &str, password_length: usize) -> PronpassResult<String> {
		self.recursive_build_password_from_with(&mut rand::rng(), password, password_length, DEFAULT_SAMPLE_LIMIT)
	}

	/// Builds a password recursively.
	///
	/// Terminal state: `password_length == 1` returns `password` as-is.
	/// Otherwise recurses with the password extended by one sampled
	/// successor of its last character and `password_length - 1`.
	///
	/// For a one-character starting password this selects exactly the
	/// same letters as the iterative form given the same RNG stream; for
	/// a longer one the result has
	/// `password.chars().count() + password_length - 1` characters.
	///
	/// # Errors
	/// - [`PronpassError::InvalidLength`] if `password_length` is 0.
	/// - [`PronpassError::EmptySeed`] if `password` has no characters.
	/// - [`PronpassError::NoSuccessorAvailable`] on a stalled extension.
	fn recursive_build_password_from_with<R: Rng + ?Sized>(
		&self,
		rng: &mut R,
		password: &str,
		password_length: usize,
		sample_limit: usize,
	) -> PronpassResult<String> {
		if password_length == 0 {
			return Err(PronpassError::InvalidLength { length: password_length });
		}

		let last = password.chars().last().ok_or(PronpassError::EmptySeed)?;
		if password_length == 1 {
			return Ok(password.to_owned());
		}

		match self.common_next_letter_with(rng, last, sample_limit) {
			Ok(next) => {
				let mut extended = String::with_capacity(password.len() + next.len_utf8());
				extended.push_str(password);
				extended.push(next);
				self.recursive_build_password_from_with(rng, &extended, password_length - 1, sample_limit)
			}
			Err(PronpassError::EmptyResult { letter }) => Err(PronpassError::NoSuccessorAvailable {
				stuck: letter,
				partial: password.to_owned(),
			}),
			Err(e) => Err(e),
		}
	}
}
