//! Corpus file ingestion.
//!
//! A corpus is a CSV file of observed letter-pair frequencies: a header
//! row (always present, always skipped) followed by `pair,count` rows,
//! e.g. `th,3556`. Rows are hand-split on the first comma; both fields
//! are trimmed. This module turns corpus files into [`Observation`]
//! records and leaves aggregation to the models.

use std::path::Path;

use crate::error::{PronpassError, PronpassResult};
use crate::io;
use crate::model::observation::Observation;

/// Extension of corpus files on disk.
pub const CORPUS_EXTENSION: &str = "csv";

/// Reads a corpus file into observation records.
///
/// # Behavior
/// - The first line is the header and is never parsed as data.
/// - Blank rows are skipped.
/// - An empty or header-only file yields zero observations, not an error.
///
/// # Errors
/// - [`PronpassError::Io`] if the file cannot be read.
/// - Row-level errors ([`PronpassError::MalformedRow`],
///   [`PronpassError::InvalidCount`], [`PronpassError::MalformedPair`])
///   carry 1-based physical line numbers, header included.
pub fn read_observations<P: AsRef<Path>>(path: P) -> PronpassResult<Vec<Observation>> {
	let lines = io::read_lines(&path)?;
	let rows = match lines.split_first() {
		Some((_header, rows)) => rows,
		None => return Ok(Vec::new()),
	};

	// Data starts on physical line 2, right after the header.
	let observations = parse_rows(rows, 2)?;
	log::debug!(
		"read {} observations from {}",
		observations.len(),
		path.as_ref().display()
	);
	Ok(observations)
}

/// Parses a slice of data rows, numbering them from `first_line`.
///
/// Used by the sequential reader above and by the chunked parallel build,
/// which hands each worker a slice and its physical line offset.
pub(crate) fn parse_rows(rows: &[String], first_line: usize) -> PronpassResult<Vec<Observation>> {
	let mut observations = Vec::with_capacity(rows.len());
	for (index, row) in rows.iter().enumerate() {
		if row.trim().is_empty() {
			continue;
		}
		observations.push(parse_row(row, first_line + index)?);
	}
	Ok(observations)
}

/// Parses one `pair,count` row.
pub(crate) fn parse_row(row: &str, line: usize) -> PronpassResult<Observation> {
	let (pair, count) = row.split_once(',').ok_or_else(|| PronpassError::MalformedRow {
		line,
		row: row.to_owned(),
	})?;

	let count: u64 = count.trim().parse().map_err(|_| PronpassError::InvalidCount {
		line,
		value: count.trim().to_owned(),
	})?;

	Observation::from_pair(pair.trim(), count)
}

/// Lists the corpus files (`*.csv`) in a directory.
///
/// Returns sorted file names only (no paths).
pub fn list_corpus_files<P: AsRef<Path>>(dir: P) -> PronpassResult<Vec<String>> {
	Ok(io::list_files(dir, CORPUS_EXTENSION)?)
}
