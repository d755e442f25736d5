//! Phonotactic acceptability for invented English-like words.
//!
//! `check` applies the rules in a fixed order and reports the first one that
//! fails. The validator is pure: the same input always yields the same
//! verdict.
//!
//! An "internal h" is any `h` that is neither the first nor the last letter
//! and does not close a digraph (`ch`, `sh`, `th`, `ph`, `wh`).
//!
//! Soft bigrams (`ii`, `aa`, `uu`, doubled `y`, trailing `yl`) never fail a
//! word; `soft_bigrams` only flags them so a caller can down-weight the
//! candidate.

use crate::error::PhonotacticError;

const TRUE_VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u'];

/// Three-consonant runs that are allowed.
const ALLOWED_TRIPLES: &[&str] = &["str", "spr", "spl", "chr", "shr", "thr"];

/// Bigrams and patterns that reject a word outright.
const BLACKLIST: &[&str] = &["yy", "thth", "hth", "wv", "vv", "jq", "qj", "qh", "qx", "ql"];

/// At least one of these must appear in words of five letters or more.
const COMMON_BIGRAMS: &[&str] = &[
	"th", "sh", "ch", "ph", "wh", "qu", "st", "nd", "rn", "rl", "ll", "ss", "ie", "ea", "ai", "oi", "ou", "au",
];

const SOFT_BIGRAMS: &[&str] = &["ii", "aa", "uu", "yy"];

/// Letters that form a digraph with a following `h` (ch, sh, th, ph, wh).
const DIGRAPH_HEADS: &[char] = &['c', 's', 't', 'p', 'w'];

/// Minimum letter count from which a common bigram is required.
const COMMON_BIGRAM_MIN_LEN: usize = 5;

/// Lowercases and strips everything except letters and apostrophes.
pub fn normalize(word: &str) -> String {
	word.chars()
		.filter(|c| c.is_alphabetic() || *c == '\'')
		.flat_map(|c| c.to_lowercase())
		.collect()
}

fn is_true_vowel(c: char) -> bool {
	TRUE_VOWELS.contains(&c)
}

fn is_consonant(c: char) -> bool {
	c.is_ascii_lowercase() && !is_true_vowel(c) && c != 'y'
}

/// Decides whether `word` is pronounceable.
///
/// Returns the first failing rule as a `PhonotacticError`.
pub fn check(word: &str) -> Result<(), PhonotacticError> {
	let word = normalize(word);
	let chars: Vec<char> = word.chars().collect();

	if chars.is_empty() {
		return Err(PhonotacticError::Empty);
	}
	if let Some(c) = chars.iter().find(|c| !(c.is_ascii_lowercase() || **c == '\'')) {
		return Err(PhonotacticError::InvalidCharacter(*c));
	}

	let has_vowel = chars.iter().any(|c| is_true_vowel(*c));
	if !has_vowel && chars.contains(&'y') {
		return Err(PhonotacticError::OnlyY);
	}
	if !has_vowel {
		return Err(PhonotacticError::NoVowel);
	}

	for window in chars.windows(3) {
		if window.iter().all(|c| is_consonant(*c)) {
			let triple: String = window.iter().collect();
			if !ALLOWED_TRIPLES.contains(&triple.as_str()) {
				return Err(PhonotacticError::ConsonantTriple(triple));
			}
		}
	}

	for (i, c) in chars.iter().enumerate() {
		if *c == 'q' && chars.get(i + 1) != Some(&'u') {
			return Err(PhonotacticError::InvalidQ);
		}
	}

	if chars[0] == 'j' {
		match chars.get(1) {
			Some(next) if is_true_vowel(*next) || *next == 'y' => (),
			_ => return Err(PhonotacticError::InitialJ),
		}
	}

	let last = chars.len() - 1;
	for i in 1..last {
		if chars[i] == 'h' && !DIGRAPH_HEADS.contains(&chars[i - 1]) {
			let next = chars[i + 1];
			if !(is_true_vowel(next) || next == 'y') {
				return Err(PhonotacticError::InternalH);
			}
		}
	}

	if let Some(pattern) = BLACKLIST.iter().find(|p| word.contains(**p)) {
		return Err(PhonotacticError::Blacklisted(*pattern));
	}
	if word.ends_with("yl") {
		return Err(PhonotacticError::Blacklisted("yl$"));
	}

	let letters = chars.iter().filter(|c| c.is_ascii_lowercase()).count();
	if letters >= COMMON_BIGRAM_MIN_LEN && !COMMON_BIGRAMS.iter().any(|b| word.contains(b)) {
		return Err(PhonotacticError::NoCommonBigram);
	}

	Ok(())
}

/// Convenience wrapper around `check`.
pub fn is_pronounceable(word: &str) -> bool {
	check(word).is_ok()
}

/// Soft patterns present in `word`. Empty when the word is clean.
pub fn soft_bigrams(word: &str) -> Vec<&'static str> {
	let word = normalize(word);
	let mut found: Vec<&'static str> = SOFT_BIGRAMS.iter().copied().filter(|b| word.contains(b)).collect();
	if word.ends_with("yl") {
		found.push("yl$");
	}
	found
}

/// True when `word` carries at least one soft pattern.
pub fn has_soft_bigram(word: &str) -> bool {
	!soft_bigrams(word).is_empty()
}
