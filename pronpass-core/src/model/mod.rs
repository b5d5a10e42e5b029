//! Top-level module for the password generation system.
//!
//! This module provides a letter-adjacency password generator, including:
//! - A single parsed corpus record (`Observation`)
//! - Two probability model strategies (`LinearScanModel`, `IndexedModel`)
//! - The contract they share (`ProbabilityModel`)
//! - Build configuration (`BuildInput`)
//! - A high-level generation interface (`PasswordGenerator`)

/// High-level interface for building passwords from a corpus directory.
///
/// Exposes corpus loading, seed strategy resolution, and password
/// building with a configurable retry budget.
pub mod generator;

/// Aggregated probability model with precomputed rankings.
///
/// Supports loading from disk with a binary cache, parallel
/// construction, and merging.
pub mod indexed_model;

/// Probability model backed by the raw observation list.
///
/// Keeps every ingested row and aggregates at query time.
pub mod linear_model;

/// The contract shared by the two model strategies.
///
/// Carries ranking queries, window sampling, and both password
/// builders so the strategies only differ in storage.
pub mod probability_model;

/// One letter-pair occurrence record, as parsed from a corpus row.
pub mod observation;

/// Internal aggregated successor table of a single letter.
///
/// Tracks summed pair counts and produces rankings.
/// This module is not exposed publicly.
mod successors;

/// Build configuration structure.
///
/// Stores generation parameters such as target length, retry budget,
/// seed strategy and the sampling window.
pub mod build_input;
