use std::io;

/// Errors surfaced by the model, the password builders and corpus ingestion.
///
/// Query-level and build-level failures are distinct on purpose:
/// `EmptyResult` is "this letter has nothing after it", while
/// `NoSuccessorAvailable` additionally carries the password built so far,
/// so a caller can see where a build stalled and how far it got.
#[derive(Debug, thiserror::Error)]
pub enum PronpassError {
	/// Strict index lookup for a letter the model never saw in first position.
	#[error("no successors recorded for letter '{letter}'")]
	KeyNotFound { letter: char },

	/// The ranked successor list for this letter is empty.
	#[error("successor list for letter '{letter}' is empty")]
	EmptyResult { letter: char },

	/// A build stalled: the current character has no recorded successor.
	#[error("no successor available for '{stuck}' after building \"{partial}\"")]
	NoSuccessorAvailable { stuck: char, partial: String },

	#[error("password length must be at least 1, got {length}")]
	InvalidLength { length: usize },

	#[error("seed password must contain at least one character")]
	EmptySeed,

	#[error("sample limit must be at least 1, got {limit}")]
	InvalidSampleLimit { limit: usize },

	/// Random seed selection on a model with no observations.
	#[error("model contains no observations")]
	EmptyModel,

	/// Two successor tables for different letters cannot be merged.
	#[error("cannot merge successor tables for '{expected}' and '{found}'")]
	LetterMismatch { expected: char, found: char },

	#[error("corpus \"{name}\" is already loaded")]
	CorpusAlreadyLoaded { name: String },

	/// A letter pair must decompose into exactly two characters.
	#[error("letter pair must be exactly two characters, got \"{pair}\"")]
	MalformedPair { pair: String },

	#[error("line {line}: expected \"<pair>,<count>\", got \"{row}\"")]
	MalformedRow { line: usize, row: String },

	#[error("line {line}: count \"{value}\" is not a non-negative integer")]
	InvalidCount { line: usize, value: String },

	#[error("expected a directory of corpus files, got {path}")]
	NotADirectory { path: String },

	#[error("corpus I/O failed: {0}")]
	Io(#[from] io::Error),

	#[error("model cache is unreadable: {0}")]
	Cache(#[from] postcard::Error),
}

/// Crate-wide result alias.
pub type PronpassResult<T> = Result<T, PronpassError>;
