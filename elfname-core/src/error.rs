//! Error types.
//!
//! Generation itself never fails; these errors cover the edges of the
//! engine: parsing caller input, validating configuration, and explaining
//! why a word is not pronounceable.

use thiserror::Error;

/// A dimension value that is not part of the accepted vocabulary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {dimension} '{value}'")]
pub struct ParseDimensionError {
	pub dimension: &'static str,
	pub value: String,
}

impl ParseDimensionError {
	pub fn new(dimension: &'static str, value: impl Into<String>) -> Self {
		Self {
			dimension,
			value: value.into(),
		}
	}
}

/// An `EngineConfig` that violates one of its invariants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
	/// A probability or share outside `[0, 1]`.
	#[error("{field} must be between 0.0 and 1.0, got {value}")]
	OutOfRange { field: &'static str, value: f64 },

	/// A retry budget, capacity or length that must be positive.
	#[error("{field} must be greater than zero")]
	Zero { field: &'static str },

	/// The soft family share starts above the hard cap.
	#[error("soft_share ({soft}) must not exceed hard_share ({hard})")]
	ShareOrder { soft: f64, hard: f64 },

	/// The soft rejection ramp runs backwards.
	#[error("soft_reject_min ({min}) must not exceed soft_reject_max ({max})")]
	RampOrder { min: f64, max: f64 },

	/// A blank entry in a token or prefix list; it would match every word.
	#[error("{field} must not contain an empty entry")]
	EmptyEntry { field: &'static str },

	/// Distance bands are missing or not sorted by length.
	#[error("distance bands must be non-empty and sorted by max_len")]
	DistanceBands,
}

/// Reason a word fails the phonotactic validator.
///
/// `Display` yields a short reason code, stable enough for traces and
/// the HTTP validate endpoint.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PhonotacticError {
	#[error("empty")]
	Empty,

	#[error("invalid-character")]
	InvalidCharacter(char),

	#[error("only-y")]
	OnlyY,

	#[error("no-vowel")]
	NoVowel,

	#[error("illegal-consonant-triple")]
	ConsonantTriple(String),

	#[error("invalid-q")]
	InvalidQ,

	#[error("invalid-initial-j")]
	InitialJ,

	#[error("invalid-internal-h")]
	InternalH,

	#[error("blacklisted-pattern")]
	Blacklisted(&'static str),

	#[error("no-common-bigram")]
	NoCommonBigram,
}
