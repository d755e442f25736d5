//! Phoneme families.
//!
//! A given-name family is one stylistic "accent": onset, nucleus, coda and
//! suffix inventories plus hints. The empty coda is always available to the
//! assembler and is not listed here. Surname families assemble
//! `prefix + root + (suffix | compound | nothing)`.

/// Template for assembling given names syllable by syllable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GivenNameFamily {
	pub name: &'static str,
	pub weight: f64,
	pub onsets: &'static [&'static str],
	pub nuclei: &'static [&'static str],
	pub codas: &'static [&'static str],
	pub suffixes: &'static [&'static str],
	/// Tokens containing one of these get a small sampling boost.
	pub preferred_bigrams: &'static [&'static str],
	/// Fragments a name from this family may not contain.
	pub banned_fragments: &'static [&'static str],
}

/// Template for assembling surnames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurnameFamily {
	pub name: &'static str,
	pub weight: f64,
	pub prefixes: &'static [&'static str],
	pub roots: &'static [&'static str],
	pub suffixes: &'static [&'static str],
	pub compounds: &'static [&'static str],
}

pub static GIVEN_FAMILIES: &[GivenNameFamily] = &[
	GivenNameFamily {
		name: "high",
		weight: 1.0,
		onsets: &["", "l", "th", "s", "r", "v", "f", "c", "n", "m", "sh"],
		nuclei: &["a", "e", "i", "o", "ae", "ea", "ai", "ie", "ia"],
		codas: &["l", "n", "r", "th", "ll", "nd", "rn", "s"],
		suffixes: &["iel", "ion", "wen", "dor", "ith", "ia", "ea", "a", "ael", "as"],
		preferred_bigrams: &["ae", "th", "ll", "ie"],
		banned_fragments: &["k"],
	},
	GivenNameFamily {
		name: "wood",
		weight: 1.0,
		onsets: &["", "f", "l", "r", "s", "th", "sh", "w", "b", "d", "t"],
		nuclei: &["a", "e", "i", "o", "u", "ea", "ai", "au", "ie"],
		codas: &["n", "r", "l", "rn", "rl", "ll", "ss", "st", "s"],
		suffixes: &["a", "ia", "wyn", "ra", "la", "is", "en", "wen", "ae", "ar"],
		preferred_bigrams: &["ea", "ai", "rn", "ll"],
		banned_fragments: &[],
	},
	GivenNameFamily {
		name: "drow",
		weight: 0.6,
		onsets: &["", "z", "x", "v", "m", "r", "d", "n", "ph", "qu"],
		nuclei: &["a", "i", "e", "o", "ai", "ie", "ou", "au"],
		codas: &["z", "x", "l", "r", "n", "th", "ss", "st"],
		suffixes: &["ra", "ith", "ara", "yss", "ae", "iel", "ix", "on", "ril"],
		preferred_bigrams: &["ss", "th", "ou", "qu"],
		banned_fragments: &["uu", "xx", "zz"],
	},
	GivenNameFamily {
		name: "ancient",
		weight: 0.5,
		onsets: &["", "c", "g", "th", "m", "v", "r", "l", "ph", "h"],
		nuclei: &["a", "e", "o", "au", "ea", "ai", "ou", "ae"],
		codas: &["l", "n", "r", "th", "nd", "rn", "rl", "s"],
		suffixes: &["oth", "ael", "ion", "eth", "or", "ath", "ea", "dor"],
		preferred_bigrams: &["au", "nd", "th", "ea"],
		banned_fragments: &["y"],
	},
	GivenNameFamily {
		name: "lyric",
		weight: 0.8,
		onsets: &["", "l", "n", "s", "v", "m", "r", "f", "sh"],
		nuclei: &["a", "e", "i", "ie", "ea", "ai", "ia"],
		codas: &["l", "n", "s"],
		suffixes: &["a", "ia", "elle", "ea", "ra", "la", "na", "ie", "wen"],
		preferred_bigrams: &["ie", "ea", "ll", "ai"],
		banned_fragments: &["x", "z", "k"],
	},
	GivenNameFamily {
		name: "humanish",
		weight: 0.3,
		onsets: &["", "b", "d", "g", "h", "j", "k", "m", "p", "t", "w", "st"],
		nuclei: &["a", "e", "i", "o", "u", "ea", "ou"],
		codas: &["n", "r", "t", "d", "m", "ll", "nd", "st", "ss"],
		suffixes: &["an", "en", "er", "a", "in", "on", "ey"],
		preferred_bigrams: &["ou", "st", "nd"],
		banned_fragments: &["ae"],
	},
];

pub static SURNAME_FAMILIES: &[SurnameFamily] = &[
	SurnameFamily {
		name: "sylvan",
		weight: 1.0,
		prefixes: &["star", "rain", "sea", "fair", "moon", "dew", "willow", "silver"],
		roots: &["leaf", "fall", "song", "vale", "wood", "reed", "wind", "mere", "dell"],
		suffixes: &["er", "en", "ith", "a"],
		compounds: &["wood", "dell", "mere", "song"],
	},
	SurnameFamily {
		name: "highborn",
		weight: 1.0,
		prefixes: &["gal", "cel", "ar", "il", "tel", "ith"],
		roots: &["andor", "ithil", "aurel", "orien", "arnel", "eath", "ellis"],
		suffixes: &["is", "en", "as", "ion"],
		compounds: &["dal", "wen", "ras"],
	},
	SurnameFamily {
		name: "shadow",
		weight: 0.5,
		prefixes: &["xil", "zau", "mal", "ril", "vel", "ny"],
		roots: &["aun", "ieth", "outh", "ath", "aith", "essin", "aster"],
		suffixes: &["ra", "ar", "ix", "an"],
		compounds: &["der", "vel"],
	},
	SurnameFamily {
		name: "common",
		weight: 0.4,
		prefixes: &["mill", "hill", "wood", "stone", "fair", "green", "ash"],
		roots: &["ward", "well", "wood", "field", "more", "ton", "by"],
		suffixes: &["s", "er"],
		compounds: &["hall", "ford", "gate"],
	},
];

/// Looks up a given-name family by name.
#[cfg(test)]
pub(crate) fn given_family(name: &str) -> Option<&'static GivenNameFamily> {
	GIVEN_FAMILIES.iter().find(|f| f.name == name)
}

/// Looks up a surname family by name.
#[cfg(test)]
pub(crate) fn surname_family(name: &str) -> Option<&'static SurnameFamily> {
	SURNAME_FAMILIES.iter().find(|f| f.name == name)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_given_families_are_complete() {
		for family in GIVEN_FAMILIES {
			assert!(family.weight > 0.0, "{}", family.name);
			assert!(!family.onsets.is_empty(), "{}", family.name);
			assert!(!family.nuclei.is_empty(), "{}", family.name);
			assert!(!family.codas.is_empty(), "{}", family.name);
			assert!(!family.suffixes.is_empty(), "{}", family.name);
			assert!(!family.codas.contains(&""), "{}: empty coda is implicit", family.name);
		}
	}

	#[test]
	fn test_every_nucleus_carries_a_vowel() {
		for family in GIVEN_FAMILIES {
			for nucleus in family.nuclei {
				assert!(nucleus.chars().any(|c| "aeiou".contains(c)), "{}: {nucleus}", family.name);
			}
		}
	}

	#[test]
	fn test_surname_families_are_complete() {
		for family in SURNAME_FAMILIES {
			assert!(family.weight > 0.0);
			assert!(!family.prefixes.is_empty() && !family.roots.is_empty(), "{}", family.name);
		}
	}

	#[test]
	fn test_lookup_by_name() {
		assert_eq!(given_family("lyric").map(|f| f.name), Some("lyric"));
		assert_eq!(surname_family("shadow").map(|f| f.name), Some("shadow"));
		assert!(given_family("dwarf").is_none());
	}
}
