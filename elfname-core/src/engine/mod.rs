//! Name production.
//!
//! The assembler builds one name at a time from pruned and biased pools,
//! the selector draws from the curated corpus, and the generator
//! oversamples both before handing the pool to the quality gate.

/// Weighted and uniform picks over slices.
pub mod weighted;

/// Trace events and rejection counters.
pub mod trace;

/// Lexicon pruning and the relaxation ladder.
pub mod constraints;

/// Per-seed batch memory.
pub mod session;

/// Single-name assembly with its fallback ladder.
pub mod assembler;

/// Scored draws from the curated corpus.
pub mod selector;

/// Batch diversity gate.
pub mod quality;

/// Request-level orchestration.
pub mod generator;
