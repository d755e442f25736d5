use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;

use lru::LruCache;

use crate::random::seed_family;

/// Minimum batch size before the suffix share cap applies.
const SUFFIX_CAP_MIN_BATCH: usize = 4;

/// Suffix signature of a given name: its last two letters, lowercase.
pub fn suffix_signature(given: &str) -> String {
	let letters: Vec<char> = given.chars().filter(|c| c.is_alphabetic()).flat_map(|c| c.to_lowercase()).collect();
	let start = letters.len().saturating_sub(2);
	letters[start..].iter().collect()
}

/// Names produced so far under one seed family.
///
/// ## Invariants
/// - Given and full names are stored lowercase, so lookups ignore case.
/// - `total` counts registrations, including duplicates forced by the safe
///   fallback, so suffix shares are measured against every emitted name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchState {
	given_names: HashSet<String>,
	full_names: HashSet<String>,
	suffix_counts: HashMap<String, usize>,
	total: usize,
}

impl BatchState {
	/// Number of names registered so far.
	pub fn len(&self) -> usize {
		self.total
	}

	pub fn is_empty(&self) -> bool {
		self.total == 0
	}

	/// True when `given` was already emitted, ignoring case.
	pub fn contains_given(&self, given: &str) -> bool {
		self.given_names.contains(&given.to_lowercase())
	}

	/// True when the full name (given plus surname) was already emitted,
	/// ignoring case.
	pub fn contains_full(&self, full: &str) -> bool {
		self.full_names.contains(&full.to_lowercase())
	}

	/// True when one more name with `given`'s signature would push that
	/// signature above `cap` of the batch.
	///
	/// # Parameters
	/// - `given`: the candidate given name.
	/// - `cap`: maximum share of the batch, in `[0, 1]`.
	///
	/// # Notes
	/// - Batches smaller than four names are never capped.
	pub fn exceeds_suffix_share(&self, given: &str, cap: f64) -> bool {
		if self.total < SUFFIX_CAP_MIN_BATCH {
			return false;
		}
		let count = self.suffix_counts.get(&suffix_signature(given)).copied().unwrap_or(0);
		(count + 1) as f64 / (self.total + 1) as f64 > cap
	}

	/// Records an accepted name.
	///
	/// # Parameters
	/// - `given`: the given name alone, used for the duplicate and suffix
	///   checks.
	/// - `full`: the name as returned to the caller.
	pub fn register(&mut self, given: &str, full: &str) {
		self.given_names.insert(given.to_lowercase());
		self.full_names.insert(full.to_lowercase());
		*self.suffix_counts.entry(suffix_signature(given)).or_insert(0) += 1;
		self.total += 1;
	}
}

/// Caller-owned cache of batch states keyed by seed family.
///
/// Least recently used states are evicted once `capacity` is reached, which
/// can let a duplicate through in a very long session.
#[derive(Debug)]
pub struct GenerationSession {
	batches: LruCache<String, BatchState>,
}

impl GenerationSession {
	/// Creates an empty session holding at most `capacity` seed families.
	/// A zero capacity is raised to one.
	pub fn new(capacity: usize) -> Self {
		let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
		Self {
			batches: LruCache::new(capacity),
		}
	}

	/// Batch state of the seed family `seed` belongs to, created on first
	/// use.
	pub fn batch(&mut self, seed: Option<&str>) -> &mut BatchState {
		self.batch_for_key(seed_family(seed))
	}

	/// Batch state stored under an explicit family key.
	///
	/// # Behavior
	/// - Creates an empty state when `key` is new.
	/// - Marks the state as most recently used.
	/// - When the session is full and `key` is new, evicts the least
	///   recently used state and logs its key at debug level.
	pub fn batch_for_key(&mut self, key: String) -> &mut BatchState {
		if !self.batches.contains(&key) && self.batches.len() == self.batches.cap().get() {
			if let Some((evicted, _)) = self.batches.peek_lru() {
				log::debug!("session full, evicting batch '{evicted}'");
			}
		}
		self.batches.get_or_insert_mut(key, BatchState::default)
	}

	/// True when a batch state exists for the family `key`.
	pub fn contains(&self, key: &str) -> bool {
		self.batches.contains(key)
	}

	/// Number of seed families held.
	pub fn len(&self) -> usize {
		self.batches.len()
	}

	pub fn is_empty(&self) -> bool {
		self.batches.is_empty()
	}

	/// Drops every batch state.
	pub fn clear(&mut self) {
		self.batches.clear();
	}
}

impl Default for GenerationSession {
	fn default() -> Self {
		Self::new(8)
	}
}
