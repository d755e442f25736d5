//! Batch diversity control.
//!
//! The gate walks the candidates in order and keeps a name only when
//! - its normalized prefix of `prefix_len` letters is new to the batch,
//! - no kept name of the same `family_len` opening lies within the
//!   length-scaled edit distance,
//! - its prefix family stays under the hard share, and survives the soft
//!   rejection ramp once the family enters the soft zone.
//!
//! The soft roll hashes the normalized name, so a given candidate list is
//! always filtered the same way. Near-duplicate rejections are the only
//! ones that can be lifted: when a round keeps nothing new the distance
//! bands are lowered by one and the remaining candidates are scanned
//! again. Without a length filter the gate makes a single pass.

use std::collections::{HashMap, HashSet};

use strsim::levenshtein;

use crate::config::QualityConfig;
use crate::dimensions::{LengthTier, given_part, letter_count};
use crate::phonotactics::normalize;
use crate::random::unit_hash;

enum Verdict {
	Accept,
	/// Near duplicate; may pass after relaxation.
	Retry,
	Drop,
}

/// Result of one gate run.
#[derive(Debug, Clone, PartialEq)]
pub struct GateOutcome<T> {
	pub kept: Vec<T>,
	/// Number of times the distance bands were lowered.
	pub relaxation: usize,
}

struct GateState<'a> {
	config: &'a QualityConfig,
	hard_cap: usize,
	soft_start: usize,
	prefixes: HashSet<String>,
	kept: Vec<String>,
	families: HashMap<String, usize>,
}

impl<'a> GateState<'a> {
	fn new(config: &'a QualityConfig, target: usize) -> Self {
		Self {
			config,
			hard_cap: ((config.hard_share * target as f64).floor() as usize).max(1),
			soft_start: ((config.soft_share * target as f64).floor() as usize).max(1),
			prefixes: HashSet::new(),
			kept: Vec::new(),
			families: HashMap::new(),
		}
	}

	fn soft_rejection(&self, count: usize) -> f64 {
		let q = self.config;
		let span = self.hard_cap.saturating_sub(self.soft_start + 1).max(1);
		let progress = (count.saturating_sub(self.soft_start) as f64 / span as f64).min(1.0);
		q.soft_reject_min + (q.soft_reject_max - q.soft_reject_min) * progress
	}

	fn admit(&self, norm: &str, relaxation: usize) -> Verdict {
		if self.prefixes.contains(&prefix(norm, self.config.prefix_len)) {
			return Verdict::Drop;
		}

		if let Some(family) = prefix_family(norm, &self.config.family_prefixes) {
			let count = self.families.get(family).copied().unwrap_or(0);
			if count >= self.hard_cap {
				return Verdict::Drop;
			}
			if count >= self.soft_start && unit_hash(norm) < self.soft_rejection(count) {
				return Verdict::Drop;
			}
		}

		let opening = prefix(norm, self.config.family_len);
		let threshold = self.config.distance_for(letter_count(norm)).saturating_sub(relaxation);
		let near = self.kept.iter().any(|other| other.starts_with(&opening) && levenshtein(norm, other) <= threshold);
		if near {
			return Verdict::Retry;
		}

		Verdict::Accept
	}

	fn record(&mut self, norm: String) {
		self.prefixes.insert(prefix(&norm, self.config.prefix_len));
		if let Some(family) = prefix_family(&norm, &self.config.family_prefixes) {
			*self.families.entry(family.to_owned()).or_insert(0) += 1;
		}
		self.kept.push(norm);
	}
}

/// First `len` characters of `word`.
pub fn prefix(word: &str, len: usize) -> String {
	word.chars().take(len).collect()
}

/// Longest configured family prefix `norm` starts with.
pub fn prefix_family<'p>(norm: &str, prefixes: &'p [String]) -> Option<&'p str> {
	prefixes
		.iter()
		.filter(|p| norm.starts_with(p.as_str()))
		.max_by_key(|p| p.len())
		.map(String::as_str)
}

/// Normalized given name the gate measures.
pub fn gate_key(name: &str) -> String {
	normalize(given_part(name))
}

pub struct QualityGate<'a> {
	config: &'a QualityConfig,
}

impl<'a> QualityGate<'a> {
	pub fn new(config: &'a QualityConfig) -> Self {
		Self { config }
	}

	/// Filters `candidates` down to at most `target` diverse names.
	///
	/// # Parameters
	/// - `length`: when set, candidates outside the tier are dropped and the
	///   relaxation loop is enabled.
	/// - `key`: extracts the name string from a candidate.
	pub fn apply<T, F>(&self, candidates: Vec<T>, target: usize, length: Option<LengthTier>, key: F) -> GateOutcome<T>
	where
		F: Fn(&T) -> &str,
	{
		let mut pending: Vec<(String, T)> = candidates
			.into_iter()
			.filter(|c| length.is_none_or(|tier| LengthTier::bucket_of_name(key(c)) == tier))
			.map(|c| (gate_key(key(&c)), c))
			.collect();

		let mut state = GateState::new(self.config, target);
		let mut kept = Vec::with_capacity(target.min(pending.len()));
		let mut relaxation = 0;

		loop {
			let mut added = 0;
			let mut retry = Vec::new();
			for (norm, item) in pending {
				if kept.len() >= target {
					break;
				}
				match state.admit(&norm, relaxation) {
					Verdict::Accept => {
						state.record(norm);
						kept.push(item);
						added += 1;
					}
					Verdict::Retry => retry.push((norm, item)),
					Verdict::Drop => (),
				}
			}
			pending = retry;

			if kept.len() >= target || length.is_none() || pending.is_empty() {
				break;
			}
			if added == 0 {
				if relaxation >= self.config.max_relaxation {
					break;
				}
				relaxation += 1;
				log::debug!("quality gate relaxing distance bands to level {relaxation}");
			}
		}

		GateOutcome { kept, relaxation }
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::DistanceBand;

	fn names(outcome: &GateOutcome<&str>) -> Vec<String> {
		outcome.kept.iter().map(|s| s.to_string()).collect()
	}

	#[test]
	fn test_prefix_collisions_are_dropped() {
		let config = QualityConfig::default();
		let gate = QualityGate::new(&config);
		let outcome = gate.apply(vec!["Aelith", "Aelira", "Sarielle"], 10, None, |s| *s);
		assert_eq!(names(&outcome), vec!["Aelith", "Sarielle"]);
	}

	#[test]
	fn test_near_duplicates_need_relaxation() {
		let config = QualityConfig::default();
		let gate = QualityGate::new(&config);

		let single = gate.apply(vec!["Thalion", "Thelion"], 2, None, |s| *s);
		assert_eq!(names(&single), vec!["Thalion"]);

		let relaxed = gate.apply(vec!["Thalion", "Thelion"], 2, Some(LengthTier::Medium), |s| *s);
		assert_eq!(names(&relaxed), vec!["Thalion", "Thelion"]);
		assert_eq!(relaxed.relaxation, 2);
	}

	#[test]
	fn test_length_filter() {
		let config = QualityConfig::default();
		let gate = QualityGate::new(&config);
		let outcome = gate.apply(vec!["Aith", "Elandor", "Thalorien", "Sarielle"], 10, Some(LengthTier::Medium), |s| *s);
		assert_eq!(names(&outcome), vec!["Elandor", "Sarielle"]);
	}

	#[test]
	fn test_family_share_is_capped() {
		let mut config = QualityConfig::default();
		config.distance_bands = vec![DistanceBand { max_len: 64, distance: 0 }];
		let gate = QualityGate::new(&config);
		let candidates: Vec<String> = "bcdfghjkmnprstvwz".chars().map(|c| format!("Ael{c}ora")).collect();
		let outcome = gate.apply(candidates, 50, None, |s| s.as_str());
		let kept = outcome.kept.len();
		assert!((4..=6).contains(&kept), "kept {kept}");
	}

	#[test]
	fn test_gate_is_deterministic() {
		let config = QualityConfig::default();
		let gate = QualityGate::new(&config);
		let candidates = vec!["Aelith", "Aerin", "Aeva", "Elandor", "Elaith", "Thalia", "Thaliel", "Sarielle"];
		let a = gate.apply(candidates.clone(), 5, None, |s| *s);
		let b = gate.apply(candidates, 5, None, |s| *s);
		assert_eq!(a, b);
		assert!(a.kept.len() <= 5);
	}

	#[test]
	fn test_prefix_family_prefers_longest_match() {
		let prefixes: Vec<String> = ["ae", "ael", "el"].iter().map(|s| s.to_string()).collect();
		assert_eq!(prefix_family("aelith", &prefixes), Some("ael"));
		assert_eq!(prefix_family("aeva", &prefixes), Some("ae"));
		assert_eq!(prefix_family("thalia", &prefixes), None);
	}

	#[test]
	fn test_gate_key_measures_the_given_name() {
		assert_eq!(gate_key("Ael-ith Starfall"), "aelith");
	}
}
