use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use pronpass_core::model::indexed_model::IndexedModel;
use pronpass_core::model::linear_model::LinearScanModel;
use pronpass_core::model::observation::Observation;
use pronpass_core::model::probability_model::ProbabilityModel;

fn observations(rows: &[(u8, u8, u64)]) -> Vec<Observation> {
	rows.iter()
		.map(|&(first, second, count)| Observation::new(first as char, second as char, count))
		.collect()
}

// All nine pairs over {a, b, c}, so every letter always has successors.
fn closed_observations(counts: [u64; 9]) -> Vec<Observation> {
	let letters = ['a', 'b', 'c'];
	let mut rows = Vec::new();
	let mut index = 0;
	for first in letters {
		for second in letters {
			rows.push(Observation::new(first, second, counts[index]));
			index += 1;
		}
	}
	rows
}

proptest! {
	#[test]
	fn strategies_always_agree(rows in prop::collection::vec((b'a'..=b'f', b'a'..=b'f', 1u64..50), 1..40)) {
		let linear = LinearScanModel::from_observations(observations(&rows));
		let indexed = IndexedModel::from_observations(observations(&rows));
		// 'g' is never generated, so the unknown-letter case rides along.
		for letter in 'a'..='g' {
			prop_assert_eq!(linear.possible_next_letters(letter), indexed.possible_next_letters(letter));
		}
	}

	#[test]
	fn ingestion_order_never_changes_rankings(rows in prop::collection::vec((b'a'..=b'f', b'a'..=b'f', 1u64..50), 1..40)) {
		let forward = IndexedModel::from_observations(observations(&rows));

		let mut reversed_rows = rows.clone();
		reversed_rows.reverse();
		let reversed = IndexedModel::from_observations(observations(&reversed_rows));

		for letter in 'a'..='f' {
			prop_assert_eq!(forward.possible_next_letters(letter), reversed.possible_next_letters(letter));
		}
	}

	#[test]
	fn rankings_sort_by_count_then_letter(rows in prop::collection::vec((b'a'..=b'f', b'a'..=b'f', 1u64..50), 1..40)) {
		let model = IndexedModel::from_observations(observations(&rows));
		for first in 'a'..='f' {
			let ranked = model.possible_next_letters(first);
			for pair in ranked.windows(2) {
				let left = model.successor_count(first, pair[0]);
				let right = model.successor_count(first, pair[1]);
				prop_assert!(
					left > right || (left == right && pair[0] < pair[1]),
					"{first}: {} before {} with counts {left} and {right}",
					pair[0], pair[1]
				);
			}
		}
	}

	#[test]
	fn sampled_letter_stays_inside_the_window(
		rows in prop::collection::vec((b'a'..=b'f', b'a'..=b'f', 1u64..50), 1..40),
		window in 1usize..5,
		seed in any::<u64>(),
	) {
		let model = IndexedModel::from_observations(observations(&rows));
		let first = rows[0].0 as char;
		let ranked = model.possible_next_letters(first);

		let mut rng = StdRng::seed_from_u64(seed);
		let letter = model.common_next_letter_with(&mut rng, first, window).unwrap();

		let bound = window.min(ranked.len());
		prop_assert!(ranked[..bound].contains(&letter));
	}

	#[test]
	fn builds_have_exact_length_and_observed_pairs(
		counts in prop::array::uniform9(1u64..100),
		length in 2usize..30,
		window in 1usize..4,
		seed in any::<u64>(),
	) {
		let model = IndexedModel::from_observations(closed_observations(counts));

		let mut rng = StdRng::seed_from_u64(seed);
		let password = model.build_password_from_with(&mut rng, 'a', length, window).unwrap();

		prop_assert_eq!(password.chars().count(), length);
		let letters: Vec<char> = password.chars().collect();
		for pair in letters.windows(2) {
			prop_assert!(model.successor_count(pair[0], pair[1]) > 0);
		}
	}
}
