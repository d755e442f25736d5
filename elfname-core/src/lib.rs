//! Procedural elven name generation.
//!
//! This crate provides a multi-dimensional name engine including:
//! - A phonotactic validator for invented English-like words
//! - Static lexicon tables (dimension rules, phoneme families, bias layers)
//! - A frozen curated corpus of stem × ending entries
//! - A weighted syllable assembler with a graduated fallback ladder
//! - A batch quality gate controlling near-duplicates and prefix families
//!
//! Generation never fails: conflicting dimension selections degrade through
//! relaxation steps that are recorded in an optional `GenerationTrace`.

/// Naming dimensions (nation, cultural origin, era, gender, context, form,
/// style, length) and their kebab-case vocabulary.
pub mod dimensions;

/// Engine configuration (retry budgets, share caps, banned tokens, gate
/// thresholds).
pub mod config;

/// Error types for parsing, configuration and phonotactic verdicts.
pub mod error;

/// Pronounceability rules for candidate words.
pub mod phonotactics;

/// Static naming data: rules, phoneme families, bias layers and the
/// curated corpus.
pub mod lexicon;

/// Sampling, assembly, batch state, quality gate and the high-level
/// generator.
pub mod engine;

/// Distributional diagnostics over the corpus and simulated batches.
pub mod report;

/// Seeded and platform randomness sources.
pub mod random;

pub use config::{EngineConfig, QualityConfig};
pub use dimensions::Dimensions;
pub use engine::generator::{GenerationOutput, GenerationRequest, NameGenerator, Strategy};
pub use engine::session::GenerationSession;
pub use engine::trace::GenerationTrace;
