use serde::{Deserialize, Serialize};

/// Race-level syllable chunks. Every rule's chunk allow-list is a subset.
pub const BASE_CHUNKS: &[&str] = &[
	"ael", "aer", "ara", "cel", "ela", "eli", "fae", "gal", "ila", "ith", "lia", "lor", "syl", "tha", "thal", "vel",
	"wyn", "zel", "xan", "vir", "mal", "ril", "nae", "sae", "ori", "ean", "aul", "quel", "fen", "lin", "ser",
];

/// Race-level name endings.
pub const BASE_ENDINGS: &[&str] = &[
	"a", "ia", "ra", "ea", "elle", "ie", "ae", "la", "na", "wen", "iel", "or", "ion", "as", "ar", "dor", "ian",
	"eth", "ril", "on", "is", "ith", "ath", "ael", "oth", "yn", "wyn",
];

/// Raw flat syllable pools supplied to the assembler.
///
/// They are the base that dimension rules prune, and the only input of the
/// legacy assembler used when no dimension is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPools {
	pub chunks: Vec<String>,
	pub endings: Vec<String>,
}

impl RawPools {
	pub fn new(chunks: Vec<String>, endings: Vec<String>) -> Self {
		Self { chunks, endings }
	}

	/// The elven race-level pools.
	pub fn elven() -> Self {
		Self {
			chunks: BASE_CHUNKS.iter().map(|s| s.to_string()).collect(),
			endings: BASE_ENDINGS.iter().map(|s| s.to_string()).collect(),
		}
	}
}

impl Default for RawPools {
	fn default() -> Self {
		Self::elven()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashSet;

	#[test]
	fn test_base_pools_have_no_duplicates() {
		let chunks: HashSet<_> = BASE_CHUNKS.iter().collect();
		let endings: HashSet<_> = BASE_ENDINGS.iter().collect();
		assert_eq!(chunks.len(), BASE_CHUNKS.len());
		assert_eq!(endings.len(), BASE_ENDINGS.len());
	}

	#[test]
	fn test_base_pools_are_lowercase_ascii() {
		for piece in BASE_CHUNKS.iter().chain(BASE_ENDINGS) {
			assert!(piece.chars().all(|c| c.is_ascii_lowercase()), "{piece}");
		}
	}

	#[test]
	fn test_default_is_elven() {
		let pools = RawPools::default();
		assert_eq!(pools.chunks.len(), BASE_CHUNKS.len());
		assert!(pools.endings.iter().any(|e| e == "wen"));
	}
}
