//! Rule resolution and constraint relaxation.
//!
//! Every selected dimension value maps to a [`LexiconRule`]. Pruning folds
//! the active rules over the raw pools; when the result is unusable the
//! dimensions are relaxed one [`RelaxationStep`] at a time until pruning
//! succeeds. The length tier is never relaxed.

use serde::Serialize;

use crate::dimensions::{DimensionKind, DimensionValue, Dimensions};
use crate::lexicon::pools::RawPools;
use crate::lexicon::rules::{Structure, rule_for};

/// One step of the relaxation ladder, applied in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelaxationStep {
	DropStyleContextForm,
	DropGenderEra,
	DropNationOrigin,
	Unconstrained,
}

impl RelaxationStep {
	pub const LADDER: &'static [RelaxationStep] = &[
		RelaxationStep::DropStyleContextForm,
		RelaxationStep::DropGenderEra,
		RelaxationStep::DropNationOrigin,
		RelaxationStep::Unconstrained,
	];

	/// Dimensions cleared by this step.
	pub fn dropped(&self) -> &'static [DimensionKind] {
		match self {
			RelaxationStep::DropStyleContextForm => &[DimensionKind::Style, DimensionKind::Context, DimensionKind::Form],
			RelaxationStep::DropGenderEra => &[DimensionKind::Gender, DimensionKind::Era],
			RelaxationStep::DropNationOrigin => &[DimensionKind::Nation, DimensionKind::Origin],
			RelaxationStep::Unconstrained => &[
				DimensionKind::Nation,
				DimensionKind::Origin,
				DimensionKind::Era,
				DimensionKind::Gender,
				DimensionKind::Context,
				DimensionKind::Form,
				DimensionKind::Style,
			],
		}
	}

	/// `dims` with this step's dimensions cleared. The length tier is kept.
	pub fn apply(&self, dims: &Dimensions) -> Dimensions {
		dims.without(self.dropped())
	}
}

/// Why a rule set cannot be satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conflict {
	/// A rule narrowed the chunks to nothing, or one requires a chunk and
	/// none is left.
	NoChunks,
	/// A rule narrowed the endings to nothing.
	NoEndings,
	/// The required structures have an empty intersection.
	NoStructure,
}

/// Pools and flags left after folding every active rule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrunedPools {
	pub chunks: Vec<String>,
	pub endings: Vec<String>,
	/// True when some rule narrowed the endings. Assembled names then have
	/// to end with one of `endings`.
	pub endings_restricted: bool,
	/// Fragments no name may contain, whatever produced it.
	pub avoid_chunks: Vec<&'static str>,
	/// Openings no name may start with.
	pub avoid_prefixes: Vec<&'static str>,
	/// Closings no name may end with.
	pub avoid_endings: Vec<&'static str>,
	/// Intersection of every rule's allowed structures; `None` when no rule
	/// restricts structure.
	pub required_structures: Option<Vec<Structure>>,
	/// Some rule wants a pruned chunk in every name.
	pub require_chunk: bool,
	/// Some rule wants a pruned ending on every name.
	pub require_ending: bool,
}

impl PrunedPools {
	/// True when `word` (lowercase) hits an avoid-list.
	pub fn avoids(&self, word: &str) -> bool {
		self.avoid_prefixes.iter().any(|p| word.starts_with(p))
			|| self.avoid_endings.iter().any(|e| word.ends_with(e))
			|| self.avoid_chunks.iter().any(|c| word.contains(c))
	}
}

/// Folds the rules of `dims` over `base`.
///
/// This method performs:
/// - Allow-list intersection of chunks and endings
/// - Removal of avoided chunks and endings, kept as avoid-lists for screening
/// - Union of the `require_*` flags and intersection of required structures
///
/// # Parameters
/// - `base`: the unpruned race pools.
/// - `dims`: selected dimensions; values without a rule are ignored.
///
/// # Errors
/// Returns the first [`Conflict`] the rules produce.
pub fn prune(base: &RawPools, dims: &Dimensions) -> Result<PrunedPools, Conflict> {
	let mut pools = PrunedPools {
		chunks: base.chunks.clone(),
		endings: base.endings.clone(),
		..Default::default()
	};
	let mut chunks_touched = false;
	let mut structures: Option<Vec<Structure>> = None;

	for rule in dims.active().iter().filter_map(rule_for) {
		if let Some(allowed) = rule.chunks {
			pools.chunks.retain(|c| allowed.contains(&c.as_str()));
			chunks_touched = true;
		}
		if let Some(allowed) = rule.endings {
			pools.endings.retain(|e| allowed.contains(&e.as_str()));
			pools.endings_restricted = true;
		}
		if !rule.avoid_chunks.is_empty() {
			pools.chunks.retain(|c| !rule.avoid_chunks.contains(&c.as_str()));
			pools.avoid_chunks.extend_from_slice(rule.avoid_chunks);
			chunks_touched = true;
		}
		if !rule.avoid_endings.is_empty() {
			pools.endings.retain(|e| !rule.avoid_endings.contains(&e.as_str()));
			pools.avoid_endings.extend_from_slice(rule.avoid_endings);
			pools.endings_restricted = true;
		}
		pools.avoid_prefixes.extend_from_slice(rule.avoid_prefixes);
		pools.require_chunk |= rule.require_chunk;
		pools.require_ending |= rule.require_ending;

		if let Some(required) = rule.required_structures {
			structures = Some(match structures {
				None => required.to_vec(),
				Some(current) => current.into_iter().filter(|s| required.contains(s)).collect(),
			});
		}
	}

	if chunks_touched && pools.chunks.is_empty() {
		return Err(Conflict::NoChunks);
	}
	if pools.require_chunk && pools.chunks.is_empty() {
		return Err(Conflict::NoChunks);
	}
	if pools.endings_restricted && pools.endings.is_empty() {
		return Err(Conflict::NoEndings);
	}
	if let Some(mut structures) = structures {
		if pools.require_ending {
			structures.retain(|s| s.has_ending);
		}
		if structures.is_empty() {
			return Err(Conflict::NoStructure);
		}
		pools.required_structures = Some(structures);
	}

	Ok(pools)
}

/// Outcome of rule resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
	/// Dimensions that survived relaxation.
	pub dims: Dimensions,
	pub pools: PrunedPools,
	/// Ladder steps taken, in order. Empty when nothing conflicted.
	pub steps: Vec<RelaxationStep>,
}

impl Resolution {
	/// Rules that shaped the pools.
	pub fn applied(&self) -> Vec<DimensionValue> {
		self.dims.active().into_iter().filter(|v| rule_for(v).is_some()).collect()
	}
}

/// Prunes `base` under `dims`, walking the relaxation ladder on conflict.
///
/// # Notes
/// - Each step is logged at debug level with the conflict that forced it.
/// - If even the unconstrained dimensions conflict, the raw pools are used
///   unpruned, so resolution never fails.
pub fn resolve(base: &RawPools, dims: &Dimensions) -> Resolution {
	let mut current = *dims;
	let mut steps = Vec::new();

	let mut outcome = prune(base, &current);
	for step in RelaxationStep::LADDER {
		let conflict = match &outcome {
			Ok(_) => break,
			Err(conflict) => *conflict,
		};
		log::debug!("{conflict:?} under {current:?}, relaxing with {step:?}");
		current = step.apply(&current);
		steps.push(*step);
		outcome = prune(base, &current);
	}

	let pools = outcome.unwrap_or_else(|conflict| {
		log::debug!("raw pools unusable ({conflict:?}), using them unpruned");
		PrunedPools {
			chunks: base.chunks.clone(),
			endings: base.endings.clone(),
			..Default::default()
		}
	});

	Resolution { dims: current, pools, steps }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::dimensions::{Context, CulturalOrigin, Era, Gender, LengthTier, Nation, Style};

	#[test]
	fn test_no_dimension_keeps_raw_pools() {
		let raw = RawPools::elven();
		let pools = prune(&raw, &Dimensions::default()).unwrap();
		assert_eq!(pools.chunks, raw.chunks);
		assert_eq!(pools.endings, raw.endings);
		assert!(!pools.endings_restricted);
	}

	#[test]
	fn test_allow_lists_intersect() {
		let dims = Dimensions {
			cultural_origin: Some(CulturalOrigin::HighElf),
			nation: Some(Nation::Highcourt),
			era: Some(Era::Revival),
			..Default::default()
		};
		let pools = prune(&RawPools::elven(), &dims).unwrap();
		assert!(pools.chunks.iter().any(|c| c == "thal"));
		assert!(!pools.chunks.iter().any(|c| c == "quel"));
		assert!(!pools.chunks.iter().any(|c| c == "tha"));
	}

	#[test]
	fn test_nation_origin_conflict_relaxes_in_order() {
		let dims = Dimensions {
			nation: Some(Nation::Greenwild),
			cultural_origin: Some(CulturalOrigin::Drow),
			gender: Some(Gender::Feminine),
			style: Some(Style::Nature),
			length: Some(LengthTier::Medium),
			..Default::default()
		};
		assert_eq!(prune(&RawPools::elven(), &dims), Err(Conflict::NoChunks));

		let resolution = resolve(&RawPools::elven(), &dims);
		assert_eq!(
			resolution.steps,
			vec![
				RelaxationStep::DropStyleContextForm,
				RelaxationStep::DropGenderEra,
				RelaxationStep::DropNationOrigin,
			]
		);
		assert_eq!(resolution.dims.length, Some(LengthTier::Medium));
		assert!(resolution.dims.nation.is_none());
		assert_eq!(resolution.pools.chunks, RawPools::elven().chunks);
	}

	#[test]
	fn test_structure_conflict_drops_context() {
		let dims = Dimensions {
			era: Some(Era::Ancient),
			context: Some(Context::Records),
			..Default::default()
		};
		assert_eq!(prune(&RawPools::elven(), &dims), Err(Conflict::NoStructure));
		let resolution = resolve(&RawPools::elven(), &dims);
		assert_eq!(resolution.steps, vec![RelaxationStep::DropStyleContextForm]);
		assert_eq!(resolution.dims.era, Some(Era::Ancient));
		assert!(resolution.pools.required_structures.is_some());
	}

	#[test]
	fn test_require_chunk_fails_closed_on_empty_pool() {
		let raw = RawPools::new(vec!["zz".to_owned()], vec!["a".to_owned()]);
		let dims = Dimensions {
			cultural_origin: Some(CulturalOrigin::AncientHighborn),
			..Default::default()
		};
		assert_eq!(prune(&raw, &dims), Err(Conflict::NoChunks));
		let resolution = resolve(&raw, &dims);
		assert_eq!(resolution.steps.last(), Some(&RelaxationStep::DropNationOrigin));
		assert!(!resolution.pools.require_chunk);
	}

	#[test]
	fn test_unconstrained_keeps_only_length() {
		let dims = Dimensions {
			nation: Some(Nation::Moonharbor),
			era: Some(Era::Ancient),
			length: Some(LengthTier::Short),
			..Default::default()
		};
		let relaxed = RelaxationStep::Unconstrained.apply(&dims);
		assert_eq!(relaxed.active(), vec![DimensionValue::Length(LengthTier::Short)]);
	}

	#[test]
	fn test_avoid_lists() {
		let dims = Dimensions {
			cultural_origin: Some(CulturalOrigin::Drow),
			gender: Some(Gender::Neutral),
			..Default::default()
		};
		let pools = prune(&RawPools::elven(), &dims).unwrap();
		assert!(pools.avoids("faeril"));
		assert!(pools.avoids("zandor"));
		assert!(!pools.avoids("zelith"));
		assert!(pools.endings_restricted);
	}
}
