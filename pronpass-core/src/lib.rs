//! Letter-adjacency password generation library.
//!
//! This crate provides a pronounceable password generation system including:
//! - Corpus ingestion from letter-pair CSV files
//! - Two probability model strategies behind one contract
//! - Probabilistic password building with seed and retry control
//! - Internal utilities for I/O and path handling
//!
//! Passwords come out pronounceable because every adjacent character
//! pair is one that occurs in the ingested language corpus.

/// Core probability models and generation logic.
///
/// This module exposes the model strategies and the high-level
/// generator interface.
pub mod model;

/// Corpus CSV reading and parsing.
pub mod corpus;

/// The error taxonomy shared by the whole crate.
pub mod error;

/// I/O utilities (file loading, path helpers).
///
/// Not exposed
pub(crate) mod io;
