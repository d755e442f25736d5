//! Static naming data.
//!
//! Everything in this module is immutable and built either at compile time
//! (rule, family and bias tables) or once on first use (the curated corpus).

/// Per-dimension lexicon rules (chunk/ending allow-lists, avoid-lists,
/// required structures).
pub mod rules;

/// Race-level raw syllable pools used for pruning and by the legacy
/// assembler.
pub mod pools;

/// Phoneme families for given names and surnames.
pub mod families;

/// Bias layers derived from dimension values, and their composition.
pub mod bias;

/// Frozen curated corpus of stem × ending entries.
pub mod corpus;
