use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{PronpassError, PronpassResult};

/// Aggregated successor counts for one first letter.
///
/// A `SuccessorSet` corresponds to a fixed first letter (`letter`) and
/// stores the summed counts of every letter observed after it.
///
/// Conceptually, this is a node in a first-order Markov chain where
/// outgoing edges are weighted by their observed frequency.
///
/// ## Responsibilities:
/// - Accumulate adjacency counts during aggregation
/// - Extract the ranked successor list used by queries
/// - Merge with another set having the same letter (ex. parallel ingestion support)
///
/// ## Invariants
/// - All counts belong to the same `letter`
/// - Counts for one successor are summed across observations, never replaced
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SuccessorSet {
	/// The letter every recorded adjacency starts from.
	letter: char,
	/// Summed observation counts indexed by successor letter.
	/// Example: { 'h' => 3556, 'e' => 120 }
	counts: HashMap<char, u64>,
}

impl SuccessorSet {
	/// Creates a new empty set for the given first letter.
	pub fn new(letter: char) -> Self {
		Self {
			letter,
			counts: HashMap::new(),
		}
	}

	/// Records `count` further observations of `successor` after this
	/// set's letter.
	///
	/// - If the successor already exists, its count is increased.
	/// - Otherwise, a new entry is created.
	pub fn add(&mut self, successor: char, count: u64) {
		*self.counts.entry(successor).or_insert(0) += count;
	}

	/// Summed count recorded for `successor`, if any.
	pub fn count(&self, successor: char) -> Option<u64> {
		self.counts.get(&successor).copied()
	}

	/// Extracts the successor letters ranked most-likely first.
	///
	/// Ordered by summed count descending; ties break by ascending
	/// letter so the ranking never depends on hash iteration order.
	pub fn ranked(&self) -> Vec<char> {
		let mut entries: Vec<(char, u64)> = self.counts.iter().map(|(l, c)| (*l, *c)).collect();
		entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
		entries.into_iter().map(|(letter, _)| letter).collect()
	}

	/// Merges another set into this one.
	///
	/// Both sets must aggregate for the same first letter. Successor
	/// counts are summed.
	///
	/// This method is intended for parallel ingestion, where partial
	/// models built per chunk are combined into a single one.
	///
	/// # Errors
	/// Returns [`PronpassError::LetterMismatch`] if the letters differ.
	pub fn merge(&mut self, other: &Self) -> PronpassResult<()> {
		if self.letter != other.letter {
			return Err(PronpassError::LetterMismatch {
				expected: self.letter,
				found: other.letter,
			});
		}

		for (successor, count) in &other.counts {
			*self.counts.entry(*successor).or_insert(0) += *count;
		}

		Ok(())
	}
}
