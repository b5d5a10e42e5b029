use std::collections::HashMap;
use std::path::Path;

use crate::corpus;
use crate::error::PronpassResult;
use crate::model::observation::Observation;
use crate::model::probability_model::ProbabilityModel;

/// Probability model backed by the raw observation list.
///
/// Observations are stored exactly as ingested, duplicates included, and
/// every query walks the whole list. Memory-light and trivially correct,
/// at O(n) per query; the natural choice for small corpora or one-shot
/// lookups. For repeated generation over a large corpus prefer
/// [`IndexedModel`](crate::model::indexed_model::IndexedModel), which
/// ranks the same data once up front.
///
/// # Behavior
/// Duplicate pairs are aggregated at query time, so splitting a count
/// across several rows never changes a ranking.
#[derive(Clone, Debug, Default)]
pub struct LinearScanModel {
	observations: Vec<Observation>,
}

impl LinearScanModel {
	/// Reads one corpus file into a fresh model.
	///
	/// Ingestion is sequential and nothing is cached; reloading re-reads
	/// the file.
	///
	/// # Errors
	/// Any corpus read or parse error, see [`corpus::read_observations`].
	pub fn load<P: AsRef<Path>>(path: P) -> PronpassResult<Self> {
		Ok(Self {
			observations: corpus::read_observations(path)?,
		})
	}

	/// Appends one observation to the list.
	pub fn add_observation(&mut self, observation: Observation) {
		self.observations.push(observation);
	}

	/// The stored observations, in ingestion order.
	pub fn observations(&self) -> &[Observation] {
		&self.observations
	}

	/// Number of stored observations (not distinct pairs).
	pub fn len(&self) -> usize {
		self.observations.len()
	}

	/// True when no observation has been ingested.
	pub fn is_empty(&self) -> bool {
		self.observations.is_empty()
	}
}

impl ProbabilityModel for LinearScanModel {
	fn from_observations<I>(observations: I) -> Self
	where
		I: IntoIterator<Item = Observation>,
	{
		Self {
			observations: observations.into_iter().collect(),
		}
	}

	fn possible_next_letters(&self, letter: char) -> Vec<char> {
		let mut totals: HashMap<char, u64> = HashMap::new();
		for observation in &self.observations {
			if observation.first_letter() == letter {
				*totals.entry(observation.second_letter()).or_insert(0) += observation.count();
			}
		}

		let mut ranked: Vec<(char, u64)> = totals.into_iter().collect();
		ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
		ranked.into_iter().map(|(successor, _)| successor).collect()
	}
}
