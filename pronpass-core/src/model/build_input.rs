use crate::error::{PronpassError, PronpassResult};
use crate::model::probability_model::{DEFAULT_PASSWORD_LENGTH, DEFAULT_SAMPLE_LIMIT};

/// Strategy used to select the starting letter when building a password.
///
/// # Variants
/// - `Random`: pick a starting letter uniformly among the letters the
///   model has seen in first position.
/// - `Custom(char)`: use the provided character as the first character.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SeedMode {
	Random,
	Custom(char),
}

/// Input parameters for building passwords from a generator.
///
/// `BuildInput` groups the tunable parts of a build: target length,
/// retry budget, seed strategy and the commonness window. Contrary to
/// the free fields, `sample_limit` goes through a setter so a window of
/// zero can never reach the sampler.
///
/// # Invariants
/// - `sample_limit` is always >= 1
pub struct BuildInput {
	/// Total password length, including the seed character.
	pub length: usize,

	/// Number of extra attempts when a build stalls (0 = fail fast).
	pub nb_try: usize,

	/// Starting letter strategy.
	pub seed: SeedMode,

	/// Commonness window passed to the sampler.
	sample_limit: usize,
}

impl BuildInput {
	/// Returns a `BuildInput` with the stock settings: default length,
	/// no retries, random seed, default commonness window.
	pub fn default() -> Self {
		Self {
			length: DEFAULT_PASSWORD_LENGTH,
			nb_try: 0,
			seed: SeedMode::Random,
			sample_limit: DEFAULT_SAMPLE_LIMIT,
		}
	}

	/// Returns the current commonness window.
	pub fn sample_limit(&self) -> usize {
		self.sample_limit
	}

	/// Sets the commonness window (>= 1).
	///
	/// # Errors
	/// Returns [`PronpassError::InvalidSampleLimit`] if `sample_limit`
	/// is 0.
	pub fn set_sample_limit(&mut self, sample_limit: usize) -> PronpassResult<()> {
		if sample_limit == 0 {
			return Err(PronpassError::InvalidSampleLimit { limit: sample_limit });
		}
		self.sample_limit = sample_limit;
		Ok(())
	}
}
