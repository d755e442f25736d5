use serde::Serialize;

use crate::dimensions::{Context, CulturalOrigin, DimensionValue, Era, Form, Gender, Nation, Style};

/// A name shape a rule may require: syllable count and whether a suffix
/// closes the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Structure {
	pub syllables: usize,
	pub has_ending: bool,
}

const fn shape(syllables: usize, has_ending: bool) -> Structure {
	Structure { syllables, has_ending }
}

/// Rule attached to one dimension value.
///
/// `chunks` and `endings` are allow-lists intersected with the base pools;
/// `None` leaves the pool untouched.
///
/// # Invariants
/// - `require_chunk` implies a non-empty `chunks` list; otherwise the rule
///   fails closed during pruning and triggers relaxation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LexiconRule {
	pub chunks: Option<&'static [&'static str]>,
	pub endings: Option<&'static [&'static str]>,
	pub avoid_chunks: &'static [&'static str],
	pub avoid_prefixes: &'static [&'static str],
	pub avoid_endings: &'static [&'static str],
	pub required_structures: Option<&'static [Structure]>,
	pub require_chunk: bool,
	pub require_ending: bool,
}

impl LexiconRule {
	pub const EMPTY: LexiconRule = LexiconRule {
		chunks: None,
		endings: None,
		avoid_chunks: &[],
		avoid_prefixes: &[],
		avoid_endings: &[],
		required_structures: None,
		require_chunk: false,
		require_ending: false,
	};
}

const HIGHCOURT: LexiconRule = LexiconRule {
	chunks: Some(&["ael", "aer", "cel", "ela", "eli", "gal", "ith", "lor", "tha", "thal", "ori", "sae", "quel", "ser"]),
	avoid_chunks: &["xan", "zel"],
	..LexiconRule::EMPTY
};

const GREENWILD: LexiconRule = LexiconRule {
	chunks: Some(&["ara", "ela", "fae", "ila", "lia", "syl", "tha", "thal", "wyn", "fen", "lin", "nae", "ean", "aul"]),
	..LexiconRule::EMPTY
};

const SHADOWDEEP: LexiconRule = LexiconRule {
	chunks: Some(&["zel", "xan", "vir", "mal", "ril", "vel", "ori", "quel"]),
	avoid_endings: &["wen", "elle"],
	..LexiconRule::EMPTY
};

const MOONHARBOR: LexiconRule = LexiconRule {
	avoid_prefixes: &["x", "z"],
	..LexiconRule::EMPTY
};

const HIGH_ELF: LexiconRule = LexiconRule {
	chunks: Some(&["ael", "aer", "cel", "ela", "eli", "gal", "ith", "lor", "ori", "sae", "thal", "ser", "quel"]),
	..LexiconRule::EMPTY
};

const ANCIENT_HIGHBORN: LexiconRule = LexiconRule {
	chunks: Some(&["ael", "cel", "gal", "lor", "ith", "thal", "ori", "quel"]),
	endings: Some(&["ion", "iel", "eth", "ath", "ael", "oth", "or", "dor", "ar", "ae", "ea", "ia", "a"]),
	require_chunk: true,
	..LexiconRule::EMPTY
};

const WOOD_ELF: LexiconRule = LexiconRule {
	chunks: Some(&["ara", "ela", "fae", "ila", "lia", "syl", "tha", "wyn", "fen", "lin", "nae", "aul", "ean"]),
	avoid_endings: &["oth"],
	..LexiconRule::EMPTY
};

const DROW: LexiconRule = LexiconRule {
	chunks: Some(&["zel", "xan", "vir", "mal", "ril", "vel"]),
	avoid_prefixes: &["fae"],
	..LexiconRule::EMPTY
};

const ANCIENT: LexiconRule = LexiconRule {
	avoid_endings: &["yn", "wyn", "ie"],
	required_structures: Some(&[shape(3, true), shape(2, true)]),
	..LexiconRule::EMPTY
};

const REVIVAL: LexiconRule = LexiconRule {
	avoid_chunks: &["quel"],
	..LexiconRule::EMPTY
};

const FEMININE: LexiconRule = LexiconRule {
	endings: Some(&["a", "ia", "ra", "ea", "elle", "ie", "ae", "la", "na", "wen"]),
	..LexiconRule::EMPTY
};

const MASCULINE: LexiconRule = LexiconRule {
	endings: Some(&["or", "ion", "as", "ar", "dor", "ian", "eth", "ril", "on", "is", "ath", "oth"]),
	..LexiconRule::EMPTY
};

const NEUTRAL: LexiconRule = LexiconRule {
	avoid_endings: &["elle", "dor"],
	..LexiconRule::EMPTY
};

const NOBLE: LexiconRule = LexiconRule {
	require_ending: true,
	..LexiconRule::EMPTY
};

const RITUAL: LexiconRule = LexiconRule {
	required_structures: Some(&[shape(3, true), shape(4, true)]),
	..LexiconRule::EMPTY
};

const RECORDS: LexiconRule = LexiconRule {
	required_structures: Some(&[shape(2, false), shape(3, false)]),
	..LexiconRule::EMPTY
};

const FORMAL: LexiconRule = LexiconRule {
	require_ending: true,
	..LexiconRule::EMPTY
};

const OUTSIDER: LexiconRule = LexiconRule {
	chunks: Some(&["ara", "ela", "lin", "fen", "ser", "mal", "lia", "tha", "nae"]),
	..LexiconRule::EMPTY
};

const ELEGANT: LexiconRule = LexiconRule {
	avoid_chunks: &["xan", "zel"],
	..LexiconRule::EMPTY
};

const NATURE: LexiconRule = LexiconRule {
	chunks: Some(&["fae", "syl", "lia", "fen", "wyn", "ara", "ela", "ean", "lin", "aul", "nae", "tha"]),
	..LexiconRule::EMPTY
};

const SIMPLE: LexiconRule = LexiconRule {
	required_structures: Some(&[shape(2, false)]),
	..LexiconRule::EMPTY
};

/// Rule for one dimension value. Length tiers carry no lexicon rule; they
/// act through the length policy instead.
pub fn rule_for(value: &DimensionValue) -> Option<&'static LexiconRule> {
	let rule = match value {
		DimensionValue::Nation(nation) => match nation {
			Nation::Highcourt => &HIGHCOURT,
			Nation::Greenwild => &GREENWILD,
			Nation::Shadowdeep => &SHADOWDEEP,
			Nation::Moonharbor => &MOONHARBOR,
		},
		DimensionValue::Origin(origin) => match origin {
			CulturalOrigin::HighElf => &HIGH_ELF,
			CulturalOrigin::AncientHighborn => &ANCIENT_HIGHBORN,
			CulturalOrigin::WoodElf => &WOOD_ELF,
			CulturalOrigin::Drow => &DROW,
		},
		DimensionValue::Era(era) => match era {
			Era::Ancient => &ANCIENT,
			Era::Revival => &REVIVAL,
		},
		DimensionValue::Gender(gender) => match gender {
			Gender::Feminine => &FEMININE,
			Gender::Masculine => &MASCULINE,
			Gender::Neutral => &NEUTRAL,
		},
		DimensionValue::Context(context) => match context {
			Context::Common => &LexiconRule::EMPTY,
			Context::Noble => &NOBLE,
			Context::Ritual => &RITUAL,
			Context::Records => &RECORDS,
		},
		DimensionValue::Form(form) => match form {
			Form::Everyday => &LexiconRule::EMPTY,
			Form::Formal => &FORMAL,
			Form::Outsider => &OUTSIDER,
		},
		DimensionValue::Style(style) => match style {
			Style::Elegant => &ELEGANT,
			Style::Nature => &NATURE,
			Style::Simple => &SIMPLE,
		},
		DimensionValue::Length(_) => return None,
	};
	Some(rule)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::dimensions::LengthTier;
	use crate::lexicon::pools::{BASE_CHUNKS, BASE_ENDINGS};

	fn every_value() -> Vec<DimensionValue> {
		let mut values = Vec::new();
		values.extend(Nation::ALL.iter().copied().map(DimensionValue::Nation));
		values.extend(CulturalOrigin::ALL.iter().copied().map(DimensionValue::Origin));
		values.extend(Era::ALL.iter().copied().map(DimensionValue::Era));
		values.extend(Gender::ALL.iter().copied().map(DimensionValue::Gender));
		values.extend(Context::ALL.iter().copied().map(DimensionValue::Context));
		values.extend(Form::ALL.iter().copied().map(DimensionValue::Form));
		values.extend(Style::ALL.iter().copied().map(DimensionValue::Style));
		values
	}

	#[test]
	fn test_every_non_length_value_has_a_rule() {
		for value in every_value() {
			assert!(rule_for(&value).is_some(), "{value}");
		}
		assert!(rule_for(&DimensionValue::Length(LengthTier::Short)).is_none());
	}

	#[test]
	fn test_require_chunk_rules_list_chunks() {
		for value in every_value() {
			let rule = rule_for(&value).unwrap();
			if rule.require_chunk {
				assert!(rule.chunks.is_some_and(|c| !c.is_empty()), "{value}");
			}
		}
	}

	#[test]
	fn test_required_structures_are_plausible() {
		for value in every_value() {
			for structure in rule_for(&value).unwrap().required_structures.unwrap_or(&[]) {
				assert!((1..=4).contains(&structure.syllables), "{value}");
			}
		}
	}

	#[test]
	fn test_allow_lists_are_subsets_of_base_pools() {
		for value in every_value() {
			let rule = rule_for(&value).unwrap();
			for chunk in rule.chunks.unwrap_or(&[]) {
				assert!(BASE_CHUNKS.contains(chunk), "{value}: {chunk}");
			}
			for ending in rule.endings.unwrap_or(&[]) {
				assert!(BASE_ENDINGS.contains(ending), "{value}: {ending}");
			}
		}
	}

	#[test]
	fn test_drow_and_greenwild_share_no_chunk() {
		let drow = DROW.chunks.unwrap();
		let green = GREENWILD.chunks.unwrap();
		assert!(drow.iter().all(|c| !green.contains(c)));
	}
}
