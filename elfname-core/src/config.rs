use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Words reserved for surnames; a given name containing one is rejected.
pub const DEFAULT_BANNED_GIVEN_TOKENS: &[&str] = &[
	"moon", "leaf", "wind", "watcher", "star", "thorn", "shade", "song", "river", "brook", "north", "south",
	"east", "west", "dawn", "grove", "fall",
];

/// Common name openings tracked by the diversity gate.
pub const DEFAULT_FAMILY_PREFIXES: &[&str] = &[
	"ae", "ael", "aer", "el", "eli", "elin", "ar", "ara", "th", "tha", "thal", "sy", "syl", "fa", "fae", "li",
	"lia", "il", "ith", "ca", "cel", "ga", "gal", "lo", "lor", "ma", "mal", "ze", "zel", "vi", "vir",
];

/// Engine tunables.
///
/// Every field has a default; a partial TOML table only overrides what it
/// names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
	/// Tokens a given name may not contain (surname vocabulary).
	pub banned_given_tokens: Vec<String>,
	/// Attempts per given name before the simplified assembler takes over.
	pub given_attempts: usize,
	/// Attempts per surname before the last candidate is accepted as-is.
	pub surname_attempts: usize,
	/// Probability of rejecting a candidate that carries a soft bigram.
	pub soft_bigram_rejection: f64,
	/// Largest share of a batch one suffix signature may hold.
	pub suffix_share_cap: f64,
	/// Number of batch states a session keeps before evicting the oldest.
	pub session_capacity: usize,
	/// Candidates generated per requested name before the quality gate.
	pub oversample: usize,
	/// Generation waves before the generator settles for a short result.
	pub max_waves: usize,
	pub quality: QualityConfig,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			banned_given_tokens: DEFAULT_BANNED_GIVEN_TOKENS.iter().map(|s| s.to_string()).collect(),
			given_attempts: 30,
			surname_attempts: 24,
			soft_bigram_rejection: 0.65,
			suffix_share_cap: 0.35,
			session_capacity: 8,
			oversample: 3,
			max_waves: 4,
			quality: QualityConfig::default(),
		}
	}
}

/// Near-duplicate threshold for names up to `max_len` letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceBand {
	pub max_len: usize,
	pub distance: usize,
}

/// Quality gate tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
	/// Length of the normalized prefix that must be unique in a batch.
	pub prefix_len: usize,
	/// Length of the prefix grouping names for near-duplicate checks.
	pub family_len: usize,
	/// Sorted by `max_len`; names longer than every band use the last one.
	pub distance_bands: Vec<DistanceBand>,
	/// How many times the distance bands may be loosened.
	pub max_relaxation: usize,
	pub family_prefixes: Vec<String>,
	/// Hard cap of one prefix family, as a share of the target count.
	pub hard_share: f64,
	/// Share from which new family members are probabilistically rejected.
	pub soft_share: f64,
	pub soft_reject_min: f64,
	pub soft_reject_max: f64,
}

impl Default for QualityConfig {
	fn default() -> Self {
		Self {
			prefix_len: 4,
			family_len: 2,
			distance_bands: vec![
				DistanceBand { max_len: 4, distance: 0 },
				DistanceBand { max_len: 6, distance: 1 },
				DistanceBand { max_len: 8, distance: 2 },
				DistanceBand { max_len: 64, distance: 3 },
			],
			max_relaxation: 3,
			family_prefixes: DEFAULT_FAMILY_PREFIXES.iter().map(|s| s.to_string()).collect(),
			hard_share: 0.12,
			soft_share: 0.09,
			soft_reject_min: 0.35,
			soft_reject_max: 0.85,
		}
	}
}

impl QualityConfig {
	/// Near-duplicate distance for a name of `len` letters.
	pub fn distance_for(&self, len: usize) -> usize {
		self.distance_bands
			.iter()
			.find(|band| len <= band.max_len)
			.or(self.distance_bands.last())
			.map(|band| band.distance)
			.unwrap_or(0)
	}
}

fn check_unit(field: &'static str, value: f64) -> Result<(), ConfigError> {
	if !(0.0..=1.0).contains(&value) {
		return Err(ConfigError::OutOfRange { field, value });
	}
	Ok(())
}

fn check_positive(field: &'static str, value: usize) -> Result<(), ConfigError> {
	if value == 0 {
		return Err(ConfigError::Zero { field });
	}
	Ok(())
}

fn check_entries(field: &'static str, entries: &[String]) -> Result<(), ConfigError> {
	if entries.iter().any(|e| e.trim().is_empty()) {
		return Err(ConfigError::EmptyEntry { field });
	}
	Ok(())
}

impl EngineConfig {
	/// Checks every invariant of the configuration.
	///
	/// # Errors
	/// Returns the first violated invariant.
	pub fn validate(&self) -> Result<(), ConfigError> {
		check_positive("given_attempts", self.given_attempts)?;
		check_positive("surname_attempts", self.surname_attempts)?;
		check_positive("session_capacity", self.session_capacity)?;
		check_positive("oversample", self.oversample)?;
		check_positive("max_waves", self.max_waves)?;
		check_unit("soft_bigram_rejection", self.soft_bigram_rejection)?;
		check_unit("suffix_share_cap", self.suffix_share_cap)?;
		check_entries("banned_given_tokens", &self.banned_given_tokens)?;

		let q = &self.quality;
		check_positive("quality.prefix_len", q.prefix_len)?;
		check_positive("quality.family_len", q.family_len)?;
		check_entries("quality.family_prefixes", &q.family_prefixes)?;
		check_unit("quality.hard_share", q.hard_share)?;
		check_unit("quality.soft_share", q.soft_share)?;
		check_unit("quality.soft_reject_min", q.soft_reject_min)?;
		check_unit("quality.soft_reject_max", q.soft_reject_max)?;
		if q.soft_share > q.hard_share {
			return Err(ConfigError::ShareOrder { soft: q.soft_share, hard: q.hard_share });
		}
		if q.soft_reject_min > q.soft_reject_max {
			return Err(ConfigError::RampOrder { min: q.soft_reject_min, max: q.soft_reject_max });
		}
		if q.distance_bands.is_empty() || q.distance_bands.windows(2).any(|w| w[0].max_len >= w[1].max_len) {
			return Err(ConfigError::DistanceBands);
		}
		Ok(())
	}
}
