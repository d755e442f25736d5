use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseDimensionError;

/// Declares a dimension enum with its kebab-case vocabulary.
///
/// Generates `ALL`, `as_str`, `Display` and `FromStr` so callers can round
/// trip values through query strings and config files.
macro_rules! dimension_enum {
	(
		$(#[$meta:meta])*
		$name:ident, $label:literal {
			$($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
		}
	) => {
		$(#[$meta])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
		#[serde(rename_all = "kebab-case")]
		pub enum $name {
			$($(#[$vmeta])* $variant),+
		}

		impl $name {
			/// Every accepted value, in declaration order.
			pub const ALL: &'static [$name] = &[$($name::$variant),+];

			/// Dimension label used in errors and reports.
			pub const LABEL: &'static str = $label;

			/// The kebab-case spelling of this value.
			pub fn as_str(&self) -> &'static str {
				match self {
					$($name::$variant => $text),+
				}
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.write_str(self.as_str())
			}
		}

		impl FromStr for $name {
			type Err = ParseDimensionError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
				match normalized.as_str() {
					$($text => Ok($name::$variant),)+
					_ => Err(ParseDimensionError::new($label, s)),
				}
			}
		}
	};
}

dimension_enum! {
	/// Political realm the name belongs to.
	Nation, "nation" {
		Highcourt => "highcourt",
		Greenwild => "greenwild",
		Shadowdeep => "shadowdeep",
		Moonharbor => "moonharbor",
	}
}

dimension_enum! {
	/// Cultural origin of the bearer.
	CulturalOrigin, "origin" {
		HighElf => "high-elf",
		AncientHighborn => "ancient-highborn",
		WoodElf => "wood-elf",
		Drow => "drow",
	}
}

dimension_enum! {
	Era, "era" {
		Ancient => "ancient",
		Revival => "revival",
	}
}

dimension_enum! {
	Gender, "gender" {
		Masculine => "masculine",
		Feminine => "feminine",
		Neutral => "neutral",
	}
}

dimension_enum! {
	/// Social setting the name is used in.
	Context, "context" {
		Common => "common",
		Noble => "noble",
		Ritual => "ritual",
		Records => "records",
	}
}

dimension_enum! {
	Form, "form" {
		Everyday => "everyday",
		Formal => "formal",
		Outsider => "outsider",
	}
}

dimension_enum! {
	Style, "style" {
		Elegant => "elegant",
		Nature => "nature",
		Simple => "simple",
	}
}

dimension_enum! {
	/// Given-name length tier.
	LengthTier, "length" {
		Short => "short",
		Medium => "medium",
		Long => "long",
	}
}

dimension_enum! {
	/// Coarse lineage used to tag curated corpus entries.
	Lineage, "lineage" {
		High => "high",
		Wood => "wood",
		Drow => "drow",
	}
}

impl CulturalOrigin {
	/// Lineage tag matching this origin in the curated corpus.
	pub fn lineage(&self) -> Lineage {
		match self {
			CulturalOrigin::HighElf | CulturalOrigin::AncientHighborn => Lineage::High,
			CulturalOrigin::WoodElf => Lineage::Wood,
			CulturalOrigin::Drow => Lineage::Drow,
		}
	}
}

impl Nation {
	/// Lineages that can plausibly carry a name from this realm.
	pub fn lineages(&self) -> &'static [Lineage] {
		match self {
			Nation::Highcourt => &[Lineage::High],
			Nation::Greenwild => &[Lineage::Wood],
			Nation::Shadowdeep => &[Lineage::Drow],
			Nation::Moonharbor => &[Lineage::High, Lineage::Wood],
		}
	}
}

impl LengthTier {
	/// Inclusive character bounds for a given name in this tier.
	pub fn char_bounds(&self) -> (usize, usize) {
		match self {
			LengthTier::Short => (4, 6),
			LengthTier::Medium => (7, 8),
			LengthTier::Long => (9, 12),
		}
	}

	/// Inclusive syllable-count range used when assembling this tier.
	pub fn syllables(&self) -> (usize, usize) {
		match self {
			LengthTier::Short => (1, 2),
			LengthTier::Medium => (2, 3),
			LengthTier::Long => (3, 4),
		}
	}

	/// Tier a name of `len` letters falls into: ≤6 short, 7–8 medium, ≥9 long.
	pub fn bucket_of(len: usize) -> LengthTier {
		match len {
			0..=6 => LengthTier::Short,
			7..=8 => LengthTier::Medium,
			_ => LengthTier::Long,
		}
	}

	/// Tier of a (possibly multi-word) name, measured on its first word.
	pub fn bucket_of_name(name: &str) -> LengthTier {
		Self::bucket_of(letter_count(given_part(name)))
	}
}

/// Number of letters in `name`, ignoring spaces, hyphens and apostrophes.
pub fn letter_count(name: &str) -> usize {
	name.chars().filter(|c| c.is_alphabetic()).count()
}

/// First word of a full name.
pub fn given_part(name: &str) -> &str {
	name.split_whitespace().next().unwrap_or("")
}

/// Identifies one naming dimension independent of its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DimensionKind {
	Nation,
	Origin,
	Era,
	Gender,
	Context,
	Form,
	Style,
	Length,
}

/// A selected value of one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "dimension", content = "value", rename_all = "kebab-case")]
pub enum DimensionValue {
	Nation(Nation),
	Origin(CulturalOrigin),
	Era(Era),
	Gender(Gender),
	Context(Context),
	Form(Form),
	Style(Style),
	Length(LengthTier),
}

impl DimensionValue {
	pub fn kind(&self) -> DimensionKind {
		match self {
			DimensionValue::Nation(_) => DimensionKind::Nation,
			DimensionValue::Origin(_) => DimensionKind::Origin,
			DimensionValue::Era(_) => DimensionKind::Era,
			DimensionValue::Gender(_) => DimensionKind::Gender,
			DimensionValue::Context(_) => DimensionKind::Context,
			DimensionValue::Form(_) => DimensionKind::Form,
			DimensionValue::Style(_) => DimensionKind::Style,
			DimensionValue::Length(_) => DimensionKind::Length,
		}
	}
}

impl fmt::Display for DimensionValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			DimensionValue::Nation(v) => write!(f, "nation={v}"),
			DimensionValue::Origin(v) => write!(f, "origin={v}"),
			DimensionValue::Era(v) => write!(f, "era={v}"),
			DimensionValue::Gender(v) => write!(f, "gender={v}"),
			DimensionValue::Context(v) => write!(f, "context={v}"),
			DimensionValue::Form(v) => write!(f, "form={v}"),
			DimensionValue::Style(v) => write!(f, "style={v}"),
			DimensionValue::Length(v) => write!(f, "length={v}"),
		}
	}
}

/// The caller's dimension bundle. Every dimension is optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Dimensions {
	pub nation: Option<Nation>,
	#[serde(alias = "origin")]
	pub cultural_origin: Option<CulturalOrigin>,
	pub era: Option<Era>,
	pub gender: Option<Gender>,
	pub context: Option<Context>,
	pub form: Option<Form>,
	pub style: Option<Style>,
	pub length: Option<LengthTier>,
}

impl Dimensions {
	/// True when no dimension is selected.
	pub fn is_empty(&self) -> bool {
		self.active().is_empty()
	}

	/// Selected values in fixed dimension order.
	pub fn active(&self) -> Vec<DimensionValue> {
		let mut values = Vec::with_capacity(8);
		values.extend(self.nation.map(DimensionValue::Nation));
		values.extend(self.cultural_origin.map(DimensionValue::Origin));
		values.extend(self.era.map(DimensionValue::Era));
		values.extend(self.gender.map(DimensionValue::Gender));
		values.extend(self.context.map(DimensionValue::Context));
		values.extend(self.form.map(DimensionValue::Form));
		values.extend(self.style.map(DimensionValue::Style));
		values.extend(self.length.map(DimensionValue::Length));
		values
	}

	/// Returns a copy with the given dimensions cleared.
	pub fn without(&self, kinds: &[DimensionKind]) -> Self {
		let mut out = *self;
		for kind in kinds {
			match kind {
				DimensionKind::Nation => out.nation = None,
				DimensionKind::Origin => out.cultural_origin = None,
				DimensionKind::Era => out.era = None,
				DimensionKind::Gender => out.gender = None,
				DimensionKind::Context => out.context = None,
				DimensionKind::Form => out.form = None,
				DimensionKind::Style => out.style = None,
				DimensionKind::Length => out.length = None,
			}
		}
		out
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_kebab_case_origins() {
		assert_eq!("wood-elf".parse::<CulturalOrigin>(), Ok(CulturalOrigin::WoodElf));
		assert_eq!("High_Elf".parse::<CulturalOrigin>(), Ok(CulturalOrigin::HighElf));
		assert_eq!(" ancient highborn ".parse::<CulturalOrigin>(), Ok(CulturalOrigin::AncientHighborn));
	}

	#[test]
	fn test_parse_unknown_value_reports_dimension() {
		let err = "dwarf".parse::<CulturalOrigin>().unwrap_err();
		assert_eq!(err.dimension, "origin");
		assert_eq!(err.to_string(), "unknown origin 'dwarf'");
	}

	#[test]
	fn test_display_round_trips() {
		for tier in LengthTier::ALL {
			assert_eq!(tier.to_string().parse::<LengthTier>().unwrap(), *tier);
		}
		for style in Style::ALL {
			assert_eq!(style.as_str().parse::<Style>().unwrap(), *style);
		}
	}

	#[test]
	fn test_length_buckets_at_boundaries() {
		assert_eq!(LengthTier::bucket_of(4), LengthTier::Short);
		assert_eq!(LengthTier::bucket_of(5), LengthTier::Short);
		assert_eq!(LengthTier::bucket_of(6), LengthTier::Short);
		assert_eq!(LengthTier::bucket_of(7), LengthTier::Medium);
		assert_eq!(LengthTier::bucket_of(8), LengthTier::Medium);
		assert_eq!(LengthTier::bucket_of(9), LengthTier::Long);
		assert_eq!(LengthTier::bucket_of(11), LengthTier::Long);
	}

	#[test]
	fn test_char_bounds_agree_with_buckets() {
		for tier in LengthTier::ALL {
			let (min, max) = tier.char_bounds();
			for len in min..=max {
				assert_eq!(LengthTier::bucket_of(len), *tier, "len {len}");
			}
		}
	}

	#[test]
	fn test_bucket_of_name_ignores_surname_and_hyphens() {
		assert_eq!(LengthTier::bucket_of_name("Aelith Starfall"), LengthTier::Short);
		assert_eq!(letter_count("Ael-ith"), 6);
	}

	#[test]
	fn test_active_keeps_dimension_order() {
		let dims = Dimensions {
			style: Some(Style::Nature),
			nation: Some(Nation::Greenwild),
			gender: Some(Gender::Feminine),
			..Default::default()
		};
		let kinds: Vec<_> = dims.active().iter().map(|v| v.kind()).collect();
		assert_eq!(kinds, vec![DimensionKind::Nation, DimensionKind::Gender, DimensionKind::Style]);
	}

	#[test]
	fn test_without_clears_only_listed() {
		let dims = Dimensions {
			era: Some(Era::Ancient),
			gender: Some(Gender::Masculine),
			length: Some(LengthTier::Long),
			..Default::default()
		};
		let relaxed = dims.without(&[DimensionKind::Gender, DimensionKind::Era]);
		assert_eq!(relaxed.era, None);
		assert_eq!(relaxed.gender, None);
		assert_eq!(relaxed.length, Some(LengthTier::Long));
		assert!(Dimensions::default().is_empty());
	}

	#[test]
	fn test_nation_lineages() {
		assert!(Nation::Moonharbor.lineages().contains(&Lineage::Wood));
		assert!(!Nation::Shadowdeep.lineages().contains(&Lineage::High));
		assert_eq!(CulturalOrigin::AncientHighborn.lineage(), Lineage::High);
	}
}
