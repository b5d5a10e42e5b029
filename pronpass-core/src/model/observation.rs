use crate::error::{PronpassError, PronpassResult};

/// A single training record: one observed letter adjacency and its count.
///
/// Multiple observations may carry the same `(first, second)` pair; models
/// sum their counts during aggregation, they never overwrite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Observation {
	first: char,
	second: char,
	count: u64,
}

impl Observation {
	/// Creates an observation from already-decomposed letters.
	pub fn new(first: char, second: char, count: u64) -> Self {
		Self { first, second, count }
	}

	/// Decomposes a two-character pair string into an observation.
	///
	/// Corpus rows expose pairs as strings (`"th"`); the model layer, not
	/// the ingestion layer, splits them into first and second letter.
	///
	/// # Errors
	/// Returns [`PronpassError::MalformedPair`] unless `pair` is exactly
	/// two characters.
	pub fn from_pair(pair: &str, count: u64) -> PronpassResult<Self> {
		let mut letters = pair.chars();
		match (letters.next(), letters.next(), letters.next()) {
			(Some(first), Some(second), None) => Ok(Self::new(first, second, count)),
			_ => Err(PronpassError::MalformedPair { pair: pair.to_owned() }),
		}
	}

	/// The letter this adjacency starts from.
	pub fn first_letter(&self) -> char {
		self.first
	}

	/// The letter observed to follow [`first_letter`](Self::first_letter).
	pub fn second_letter(&self) -> char {
		self.second
	}

	/// How many times this adjacency was observed. May be zero.
	pub fn count(&self) -> u64 {
		self.count
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn from_pair_decomposes_two_characters() {
		let obs = Observation::from_pair("th", 10).unwrap();
		assert_eq!(obs.first_letter(), 't');
		assert_eq!(obs.second_letter(), 'h');
		assert_eq!(obs.count(), 10);
	}

	#[test]
	fn from_pair_rejects_wrong_lengths() {
		for pair in ["", "t", "the"] {
			match Observation::from_pair(pair, 1) {
				Err(PronpassError::MalformedPair { pair: p }) => assert_eq!(p, pair),
				other => panic!("expected MalformedPair for {pair:?}, got {other:?}"),
			}
		}
	}

	#[test]
	fn from_pair_handles_multibyte_letters() {
		let obs = Observation::from_pair("éz", 3).unwrap();
		assert_eq!(obs.first_letter(), 'é');
		assert_eq!(obs.second_letter(), 'z');
	}

	#[test]
	fn zero_count_is_a_valid_observation() {
		assert_eq!(Observation::from_pair("ab", 0).unwrap().count(), 0);
	}
}
