use std::collections::HashSet;

use rand::Rng;

use crate::dimensions::{Dimensions, Gender, LengthTier};
use crate::engine::weighted;
use crate::lexicon::corpus::NameEntry;

/// Match score of `entry` under `dims`; zero when a hard filter fails.
///
/// Score is the entry weight times one plus the number of requested
/// dimensions the entry matches exactly.
///
/// # Notes
/// Hard filters are nation and cultural origin (through lineage), gender
/// (a neutral entry never contradicts) and the length tier.
pub fn score(entry: &NameEntry, dims: &Dimensions) -> f64 {
	if let Some(nation) = dims.nation {
		if !nation.lineages().contains(&entry.origin) {
			return 0.0;
		}
	}
	if let Some(origin) = dims.cultural_origin {
		if origin.lineage() != entry.origin {
			return 0.0;
		}
	}
	if let Some(gender) = dims.gender {
		if entry.gender != gender && entry.gender != Gender::Neutral {
			return 0.0;
		}
	}
	if let Some(tier) = dims.length {
		if LengthTier::bucket_of_name(&entry.name) != tier {
			return 0.0;
		}
	}

	// Hard-filtered dimensions that got this far match by construction.
	let matches = [
		dims.nation.is_some(),
		dims.cultural_origin.is_some(),
		dims.length.is_some(),
		dims.era == Some(entry.era),
		dims.gender == Some(entry.gender),
		dims.context == Some(entry.context),
		dims.form == Some(entry.form),
		dims.style == Some(entry.style),
	]
	.iter()
	.filter(|m| **m)
	.count();

	entry.weight * (1 + matches) as f64
}

/// Draws up to `count` distinct entries by weighted score.
///
/// Repeats are rejected; the draw stops after `max(10, count * 10)`
/// attempts, so a short result is possible and valid.
pub fn select<'a, R: Rng + ?Sized>(
	rng: &mut R,
	corpus: &'a [NameEntry],
	dims: &Dimensions,
	count: usize,
) -> Vec<&'a NameEntry> {
	let scored: Vec<(&NameEntry, f64)> = corpus
		.iter()
		.map(|entry| (entry, score(entry, dims)))
		.filter(|(_, s)| *s > 0.0)
		.collect();

	let budget = count.saturating_mul(10).max(10);
	let mut seen: HashSet<usize> = HashSet::new();
	let mut picked = Vec::with_capacity(count.min(scored.len()));

	for _ in 0..budget {
		if picked.len() >= count || picked.len() == scored.len() {
			break;
		}
		let Some(i) = weighted::choose_index(rng, &scored, |(_, s)| *s) else {
			break;
		};
		if seen.insert(i) {
			picked.push(scored[i].0);
		}
	}

	picked
}
