use std::collections::HashMap;

use serde::Serialize;

use crate::dimensions::{
	Context, CulturalOrigin, DimensionValue, Dimensions, Era, Form, Gender, LengthTier, Nation, Style,
};
use crate::lexicon::families::{GivenNameFamily, SurnameFamily};

/// Lowest selection weight a family can be pushed down to.
pub const FAMILY_WEIGHT_FLOOR: f64 = 0.05;

const BASE_SUFFIX_CHANCE: f64 = 0.18;
const MIN_SUFFIX_CHANCE: f64 = 0.08;
const MAX_SUFFIX_CHANCE: f64 = 0.45;

/// Syllable-count and character-length bounds of a given name, both
/// inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LengthPolicy {
	pub syllables: (usize, usize),
	pub chars: (usize, usize),
}

impl LengthPolicy {
	/// Policy used when no length tier is selected.
	pub const BASE: LengthPolicy = LengthPolicy {
		syllables: (2, 3),
		chars: (4, 10),
	};

	pub fn for_tier(tier: Option<LengthTier>) -> Self {
		match tier {
			Some(tier) => Self {
				syllables: tier.syllables(),
				chars: tier.char_bounds(),
			},
			None => Self::BASE,
		}
	}

	/// True when `len` letters fit the character bounds.
	pub fn accepts_len(&self, len: usize) -> bool {
		(self.chars.0..=self.chars.1).contains(&len)
	}
}

fn intersect(a: (usize, usize), b: (usize, usize)) -> Option<(usize, usize)> {
	let lo = a.0.max(b.0);
	let hi = a.1.min(b.1);
	(lo <= hi).then_some((lo, hi))
}

/// Weight adjustments contributed by one dimension value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiasLayer {
	pub family_multipliers: &'static [(&'static str, f64)],
	/// Added to the weight of every boosted token.
	pub boost: f64,
	pub onset_boosts: &'static [&'static str],
	pub nucleus_boosts: &'static [&'static str],
	pub coda_boosts: &'static [&'static str],
	pub suffix_boosts: &'static [&'static str],
	pub suffix_chance: f64,
	pub chars: Option<(usize, usize)>,
	pub syllables: Option<(usize, usize)>,
	pub banned_fragments: &'static [&'static str],
	pub surname_allow: &'static [&'static str],
	pub surname_weights: &'static [(&'static str, f64)],
}

impl BiasLayer {
	pub const NEUTRAL: BiasLayer = BiasLayer {
		family_multipliers: &[],
		boost: 0.35,
		onset_boosts: &[],
		nucleus_boosts: &[],
		coda_boosts: &[],
		suffix_boosts: &[],
		suffix_chance: 0.0,
		chars: None,
		syllables: None,
		banned_fragments: &[],
		surname_allow: &[],
		surname_weights: &[],
	};
}

const HIGHCOURT: BiasLayer = BiasLayer {
	family_multipliers: &[("high", 1.6), ("humanish", 0.5)],
	onset_boosts: &["th", "l", "c"],
	..BiasLayer::NEUTRAL
};

const GREENWILD: BiasLayer = BiasLayer {
	family_multipliers: &[("wood", 1.6), ("ancient", 0.7)],
	onset_boosts: &["f", "w", "r"],
	surname_weights: &[("sylvan", 1.5)],
	..BiasLayer::NEUTRAL
};

const SHADOWDEEP: BiasLayer = BiasLayer {
	family_multipliers: &[("drow", 2.0), ("lyric", 0.6)],
	boost: 0.45,
	onset_boosts: &["z", "x", "v", "qu"],
	surname_allow: &["shadow"],
	..BiasLayer::NEUTRAL
};

const MOONHARBOR: BiasLayer = BiasLayer {
	family_multipliers: &[("lyric", 1.5), ("high", 1.2), ("drow", 0.4)],
	nucleus_boosts: &["ea", "ie"],
	..BiasLayer::NEUTRAL
};

const HIGH_ELF: BiasLayer = BiasLayer {
	family_multipliers: &[("high", 2.2), ("drow", 0.2)],
	nucleus_boosts: &["ae", "ai"],
	chars: Some((5, 11)),
	surname_allow: &["highborn", "sylvan"],
	..BiasLayer::NEUTRAL
};

const ANCIENT_HIGHBORN: BiasLayer = BiasLayer {
	family_multipliers: &[("ancient", 2.5), ("high", 1.5), ("humanish", 0.3)],
	coda_boosts: &["th", "nd", "rn"],
	chars: Some((6, 12)),
	syllables: Some((2, 4)),
	surname_allow: &["highborn"],
	..BiasLayer::NEUTRAL
};

const WOOD_ELF: BiasLayer = BiasLayer {
	family_multipliers: &[("wood", 2.4), ("drow", 0.2), ("high", 0.8)],
	onset_boosts: &["f", "s", "w"],
	chars: Some((4, 9)),
	surname_allow: &["sylvan", "common"],
	..BiasLayer::NEUTRAL
};

const DROW: BiasLayer = BiasLayer {
	family_multipliers: &[("drow", 3.0), ("wood", 0.3), ("lyric", 0.5)],
	boost: 0.45,
	onset_boosts: &["z", "x", "v"],
	coda_boosts: &["z", "x", "ss"],
	chars: Some((4, 9)),
	surname_allow: &["shadow"],
	..BiasLayer::NEUTRAL
};

const ANCIENT: BiasLayer = BiasLayer {
	family_multipliers: &[("ancient", 1.8), ("humanish", 0.5)],
	nucleus_boosts: &["au", "ou"],
	suffix_chance: 0.05,
	..BiasLayer::NEUTRAL
};

const REVIVAL: BiasLayer = BiasLayer {
	family_multipliers: &[("lyric", 1.2)],
	boost: 0.3,
	nucleus_boosts: &["ie", "ia"],
	chars: Some((6, 11)),
	..BiasLayer::NEUTRAL
};

const FEMININE: BiasLayer = BiasLayer {
	family_multipliers: &[("lyric", 1.8)],
	nucleus_boosts: &["ia", "ie", "ea", "a"],
	coda_boosts: &[""],
	suffix_boosts: &["a", "ia", "elle", "ea", "ra"],
	suffix_chance: 0.27,
	chars: Some((5, 10)),
	..BiasLayer::NEUTRAL
};

const MASCULINE: BiasLayer = BiasLayer {
	family_multipliers: &[("high", 1.2), ("ancient", 1.3), ("lyric", 0.4)],
	coda_boosts: &["n", "r", "th", "nd", "rn", "s"],
	suffix_boosts: &["dor", "ion", "as", "ar"],
	suffix_chance: -0.10,
	..BiasLayer::NEUTRAL
};

const NEUTRAL_GENDER: BiasLayer = BiasLayer {
	suffix_chance: 0.05,
	..BiasLayer::NEUTRAL
};

const NOBLE: BiasLayer = BiasLayer {
	family_multipliers: &[("high", 1.3), ("humanish", 0.4)],
	suffix_chance: 0.08,
	banned_fragments: &["uk", "ug"],
	surname_weights: &[("highborn", 1.4), ("common", 0.5)],
	..BiasLayer::NEUTRAL
};

const RITUAL: BiasLayer = BiasLayer {
	family_multipliers: &[("ancient", 1.8)],
	syllables: Some((3, 4)),
	..BiasLayer::NEUTRAL
};

const RECORDS: BiasLayer = BiasLayer {
	suffix_chance: -0.1,
	..BiasLayer::NEUTRAL
};

const FORMAL: BiasLayer = BiasLayer {
	suffix_chance: 0.1,
	surname_weights: &[("highborn", 1.5)],
	..BiasLayer::NEUTRAL
};

const EVERYDAY: BiasLayer = BiasLayer {
	suffix_chance: -0.05,
	..BiasLayer::NEUTRAL
};

const OUTSIDER: BiasLayer = BiasLayer {
	family_multipliers: &[("humanish", 3.0)],
	surname_weights: &[("common", 3.0)],
	..BiasLayer::NEUTRAL
};

const ELEGANT: BiasLayer = BiasLayer {
	nucleus_boosts: &["ae", "ie", "ea"],
	banned_fragments: &["oo", "uk", "gr", "bd"],
	..BiasLayer::NEUTRAL
};

const NATURE: BiasLayer = BiasLayer {
	family_multipliers: &[("wood", 1.5)],
	surname_weights: &[("sylvan", 2.0)],
	..BiasLayer::NEUTRAL
};

const SIMPLE: BiasLayer = BiasLayer {
	chars: Some((4, 8)),
	syllables: Some((1, 2)),
	suffix_chance: -0.08,
	..BiasLayer::NEUTRAL
};

/// Bias layer of one dimension value. Length tiers only shape the base
/// policy and contribute no layer.
pub fn layer_for(value: &DimensionValue) -> Option<&'static BiasLayer> {
	let layer = match value {
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
			Gender::Neutral => &NEUTRAL_GENDER,
		},
		DimensionValue::Context(context) => match context {
			Context::Common => &BiasLayer::NEUTRAL,
			Context::Noble => &NOBLE,
			Context::Ritual => &RITUAL,
			Context::Records => &RECORDS,
		},
		DimensionValue::Form(form) => match form {
			Form::Everyday => &EVERYDAY,
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
	Some(layer)
}

/// Additive token boosts for one phoneme slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TokenBoosts(HashMap<&'static str, f64>);

impl TokenBoosts {
	fn add(&mut self, tokens: &[&'static str], boost: f64) {
		for token in tokens {
			*self.0.entry(*token).or_insert(0.0) += boost;
		}
	}

	/// Sampling weight of `token`: 1 plus every applicable boost.
	pub fn weight(&self, token: &str) -> f64 {
		1.0 + self.0.get(token).copied().unwrap_or(0.0)
	}
}

/// Every active bias layer folded into one set of sampling parameters.
///
/// Family multipliers and surname weights compose multiplicatively, token
/// boosts and suffix chance additively. Length bounds are intersected; when
/// the intersection is empty the base policy is kept and
/// `policy_reverted` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBias {
	pub family_multipliers: HashMap<&'static str, f64>,
	pub onsets: TokenBoosts,
	pub nuclei: TokenBoosts,
	pub codas: TokenBoosts,
	pub suffixes: TokenBoosts,
	pub suffix_chance: f64,
	pub policy: LengthPolicy,
	pub policy_reverted: bool,
	pub banned_fragments: Vec<&'static str>,
	pub surname_allow: Option<Vec<&'static str>>,
	pub surname_weights: HashMap<&'static str, f64>,
}

impl ResolvedBias {
	pub fn resolve(dims: &Dimensions) -> Self {
		let base = LengthPolicy::for_tier(dims.length);
		let mut bias = ResolvedBias {
			family_multipliers: HashMap::new(),
			onsets: TokenBoosts::default(),
			nuclei: TokenBoosts::default(),
			codas: TokenBoosts::default(),
			suffixes: TokenBoosts::default(),
			suffix_chance: BASE_SUFFIX_CHANCE,
			policy: base,
			policy_reverted: false,
			banned_fragments: Vec::new(),
			surname_allow: None,
			surname_weights: HashMap::new(),
		};

		let mut chars = Some(base.chars);
		let mut syllables = Some(base.syllables);

		for layer in dims.active().iter().filter_map(layer_for) {
			for (family, multiplier) in layer.family_multipliers {
				*bias.family_multipliers.entry(*family).or_insert(1.0) *= multiplier;
			}
			bias.onsets.add(layer.onset_boosts, layer.boost);
			bias.nuclei.add(layer.nucleus_boosts, layer.boost);
			bias.codas.add(layer.coda_boosts, layer.boost);
			bias.suffixes.add(layer.suffix_boosts, layer.boost);
			bias.suffix_chance += layer.suffix_chance;

			if let Some(bounds) = layer.chars {
				chars = chars.and_then(|c| intersect(c, bounds));
			}
			if let Some(bounds) = layer.syllables {
				syllables = syllables.and_then(|s| intersect(s, bounds));
			}

			for fragment in layer.banned_fragments {
				if !bias.banned_fragments.contains(fragment) {
					bias.banned_fragments.push(*fragment);
				}
			}

			if !layer.surname_allow.is_empty() {
				bias.surname_allow = Some(match bias.surname_allow.take() {
					None => layer.surname_allow.to_vec(),
					Some(allowed) => allowed.into_iter().filter(|f| layer.surname_allow.contains(f)).collect(),
				});
			}
			for (family, weight) in layer.surname_weights {
				*bias.surname_weights.entry(*family).or_insert(1.0) *= weight;
			}
		}

		bias.suffix_chance = bias.suffix_chance.clamp(MIN_SUFFIX_CHANCE, MAX_SUFFIX_CHANCE);

		match (chars, syllables) {
			(Some(chars), Some(syllables)) => bias.policy = LengthPolicy { syllables, chars },
			_ => {
				log::debug!("length policy contradiction for {dims:?}, keeping {base:?}");
				bias.policy_reverted = true;
			}
		}

		// An empty allow intersection would starve surnames entirely.
		if bias.surname_allow.as_ref().is_some_and(|allowed| allowed.is_empty()) {
			bias.surname_allow = None;
		}

		bias
	}

	/// Selection weight of a given-name family, floored so no family
	/// disappears.
	pub fn family_weight(&self, family: &GivenNameFamily) -> f64 {
		let multiplier = self.family_multipliers.get(family.name).copied().unwrap_or(1.0);
		(family.weight * multiplier).max(FAMILY_WEIGHT_FLOOR)
	}

	/// Selection weight of a surname family; zero when an allow-list
	/// excludes it.
	pub fn surname_weight(&self, family: &SurnameFamily) -> f64 {
		if let Some(allowed) = &self.surname_allow {
			if !allowed.contains(&family.name) {
				return 0.0;
			}
		}
		family.weight * self.surname_weights.get(family.name).copied().unwrap_or(1.0)
	}

	/// True when `word` contains a banned fragment.
	pub fn is_banned(&self, word: &str) -> bool {
		self.banned_fragments.iter().any(|fragment| word.contains(fragment))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::lexicon::families::{given_family, surname_family};

	#[test]
	fn test_no_dimension_keeps_base_parameters() {
		let bias = ResolvedBias::resolve(&Dimensions::default());
		assert_eq!(bias.policy, LengthPolicy::BASE);
		assert_eq!(bias.suffix_chance, BASE_SUFFIX_CHANCE);
		assert!(bias.surname_allow.is_none());
		assert!(!bias.policy_reverted);
	}

	#[test]
	fn test_wood_revival_feminine_policy() {
		let dims = Dimensions {
			cultural_origin: Some(CulturalOrigin::WoodElf),
			era: Some(Era::Revival),
			gender: Some(Gender::Feminine),
			..Default::default()
		};
		let bias = ResolvedBias::resolve(&dims);
		assert_eq!(bias.policy.chars, (6, 9));
		assert_eq!(bias.policy.syllables, (2, 3));
	}

	#[test]
	fn test_family_multipliers_compose_and_floor() {
		let dims = Dimensions {
			cultural_origin: Some(CulturalOrigin::WoodElf),
			style: Some(Style::Nature),
			..Default::default()
		};
		let bias = ResolvedBias::resolve(&dims);
		let wood = given_family("wood").unwrap();
		assert!((bias.family_weight(wood) - 2.4 * 1.5).abs() < 1e-9);

		let dims = Dimensions {
			cultural_origin: Some(CulturalOrigin::HighElf),
			nation: Some(Nation::Highcourt),
			form: Some(Form::Everyday),
			..Default::default()
		};
		let bias = ResolvedBias::resolve(&dims);
		let drow = given_family("drow").unwrap();
		assert!((bias.family_weight(drow) - 0.12).abs() < 1e-9);

		let dims = Dimensions {
			cultural_origin: Some(CulturalOrigin::AncientHighborn),
			era: Some(Era::Ancient),
			..Default::default()
		};
		let humanish = given_family("humanish").unwrap();
		assert_eq!(ResolvedBias::resolve(&dims).family_weight(humanish), FAMILY_WEIGHT_FLOOR);
	}

	#[test]
	fn test_suffix_chance_is_clamped() {
		let dims = Dimensions {
			gender: Some(Gender::Feminine),
			form: Some(Form::Formal),
			context: Some(Context::Noble),
			..Default::default()
		};
		assert_eq!(ResolvedBias::resolve(&dims).suffix_chance, MAX_SUFFIX_CHANCE);

		let dims = Dimensions {
			gender: Some(Gender::Masculine),
			context: Some(Context::Records),
			style: Some(Style::Simple),
			..Default::default()
		};
		assert_eq!(ResolvedBias::resolve(&dims).suffix_chance, MIN_SUFFIX_CHANCE);
	}

	#[test]
	fn test_contradicting_policy_reverts_to_base() {
		let dims = Dimensions {
			length: Some(LengthTier::Long),
			style: Some(Style::Simple),
			..Default::default()
		};
		let bias = ResolvedBias::resolve(&dims);
		assert!(bias.policy_reverted);
		assert_eq!(bias.policy, LengthPolicy::for_tier(Some(LengthTier::Long)));
	}

	#[test]
	fn test_token_boosts_are_additive() {
		let dims = Dimensions {
			era: Some(Era::Revival),
			gender: Some(Gender::Feminine),
			..Default::default()
		};
		let bias = ResolvedBias::resolve(&dims);
		assert!((bias.nuclei.weight("ie") - 1.65).abs() < 1e-9);
		assert!((bias.nuclei.weight("ea") - 1.35).abs() < 1e-9);
		assert_eq!(bias.nuclei.weight("ou"), 1.0);
	}

	#[test]
	fn test_surname_allow_intersection() {
		let dims = Dimensions {
			nation: Some(Nation::Shadowdeep),
			cultural_origin: Some(CulturalOrigin::Drow),
			..Default::default()
		};
		let bias = ResolvedBias::resolve(&dims);
		assert_eq!(bias.surname_weight(surname_family("sylvan").unwrap()), 0.0);
		assert!(bias.surname_weight(surname_family("shadow").unwrap()) > 0.0);

		// disjoint allow-lists are ignored
		let dims = Dimensions {
			nation: Some(Nation::Shadowdeep),
			cultural_origin: Some(CulturalOrigin::WoodElf),
			..Default::default()
		};
		assert!(ResolvedBias::resolve(&dims).surname_allow.is_none());
	}

	#[test]
	fn test_banned_fragments_union() {
		let dims = Dimensions {
			context: Some(Context::Noble),
			style: Some(Style::Elegant),
			..Default::default()
		};
		let bias = ResolvedBias::resolve(&dims);
		assert!(bias.is_banned("thuk"));
		assert!(bias.is_banned("noor"));
		assert!(!bias.is_banned("aelith"));
		assert_eq!(bias.banned_fragments.iter().filter(|f| **f == "uk").count(), 1);
	}
}
