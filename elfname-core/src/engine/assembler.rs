//! Syllable-by-syllable name assembly.
//!
//! A [`Plan`] is computed once per request from the caller's dimensions;
//! the [`Assembler`] then produces one accepted name per call. Every
//! rejection point is bounded, and exhausted budgets step down a ladder:
//! weighted assembly, then a simplified assembler with flat weights, then a
//! fixed list of safe names. The assembler therefore always returns a name.

use rand::Rng;

use crate::config::EngineConfig;
use crate::dimensions::{Dimensions, letter_count};
use crate::engine::constraints::{PrunedPools, Resolution, resolve};
use crate::engine::session::BatchState;
use crate::engine::trace::{GenerationTrace, RejectReason, TraceEvent};
use crate::engine::weighted;
use crate::lexicon::bias::{LengthPolicy, ResolvedBias, TokenBoosts};
use crate::lexicon::corpus::title_case;
use crate::lexicon::families::{GIVEN_FAMILIES, GivenNameFamily, SURNAME_FAMILIES, SurnameFamily};
use crate::lexicon::pools::RawPools;
use crate::phonotactics;

/// Probability that a pruned chunk leads the name when no rule requires it.
const LEAD_CHUNK_CHANCE: f64 = 0.35;

/// Extra weight for a token carrying one of its family's preferred bigrams.
const PREFERRED_BIGRAM_BOOST: f64 = 0.25;

const SURNAME_LEN: (usize, usize) = (5, 12);

/// Surname tail shares: suffix, compound, nothing.
const SURNAME_SUFFIX_SHARE: f64 = 0.55;
const SURNAME_COMPOUND_SHARE: f64 = 0.25;

/// Legacy length tiers as (weight, chunk count).
const LEGACY_TIERS: &[(f64, usize)] = &[(0.25, 1), (0.50, 2), (0.25, 3)];

/// Last resort given names, sorted by length. All pronounceable.
pub const SAFE_NAMES: &[&str] = &[
	"Aith",
	"Aelith",
	"Elaith",
	"Thalia",
	"Elandor",
	"Thaliel",
	"Sarielle",
	"Thalandor",
	"Thalorien",
	"Aelithandor",
];

/// What the assembler works from for one request.
///
/// Building a plan resolves rules, relaxes conflicts and composes biases,
/// so it is done once per request and shared by every name in the batch.
#[derive(Debug, Clone, PartialEq)]
pub enum Plan {
	/// No dimension selected: flat picks from the raw pools.
	Legacy,
	/// At least one dimension selected, or weighting forced.
	Weighted {
		resolution: Resolution,
		bias: ResolvedBias,
	},
}

impl Plan {
	/// Computes the plan for `dims`.
	///
	/// # Parameters
	/// - `raw`: race-level pools the rules prune.
	/// - `dims`: the caller's dimensions.
	/// - `force_weighting`: use the weighted assembler even when `dims` is
	///   empty.
	///
	/// # Behavior
	/// - Empty `dims` without forcing gives [`Plan::Legacy`].
	/// - Otherwise rules are resolved with relaxation, then the biases of the
	///   surviving dimensions are composed.
	pub fn new(raw: &RawPools, dims: &Dimensions, force_weighting: bool) -> Self {
		if dims.is_empty() && !force_weighting {
			return Plan::Legacy;
		}
		let resolution = resolve(raw, dims);
		let bias = ResolvedBias::resolve(&resolution.dims);
		Plan::Weighted { resolution, bias }
	}

	/// Length policy given names are held to, if any.
	pub fn policy(&self) -> Option<LengthPolicy> {
		match self {
			Plan::Legacy => None,
			Plan::Weighted { bias, .. } => Some(bias.policy),
		}
	}

	/// Writes the request-level decisions into `trace`.
	///
	/// Relaxation steps come first, then the applied rules, then a policy
	/// reversion if one happened. The length policy is stored as well.
	pub fn record(&self, trace: &mut GenerationTrace) {
		match self {
			Plan::Legacy => trace.push(TraceEvent::Legacy),
			Plan::Weighted { resolution, bias } => {
				for step in &resolution.steps {
					trace.push(TraceEvent::Relaxed { step: *step });
				}
				for value in resolution.applied() {
					trace.push(TraceEvent::RuleApplied { value });
				}
				if bias.policy_reverted {
					trace.push(TraceEvent::PolicyReverted);
				}
				trace.policy = Some(bias.policy);
			}
		}
	}
}

struct Surname {
	text: String,
	family: Option<&'static str>,
	fallback: bool,
}

/// Produces given names, and surnames on request, under a [`Plan`].
///
/// The assembler holds no state of its own; duplicates are tracked in the
/// [`BatchState`] passed to each call.
pub struct Assembler<'a> {
	config: &'a EngineConfig,
	raw: &'a RawPools,
	plan: &'a Plan,
}

impl<'a> Assembler<'a> {
	/// Borrows the budgets from `config` and the pools from `raw`.
	pub fn new(config: &'a EngineConfig, raw: &'a RawPools, plan: &'a Plan) -> Self {
		Self { config, raw, plan }
	}

	/// Produces one name, registers it in `batch` and returns it.
	///
	/// # Parameters
	/// - `rng`: seeded or platform randomness.
	/// - `batch`: names already emitted under the request's seed family.
	/// - `include_surname`: append a surname.
	/// - `trace`: receives events and rejection counts.
	///
	/// # Notes
	/// - Never fails. Spent budgets step down to the simplified assembler,
	///   then to [`SAFE_NAMES`]; each step is traced.
	/// - A surname that exhausts its own budget keeps the last candidate and
	///   records [`TraceEvent::SurnameFallback`].
	pub fn name<R: Rng + ?Sized>(
		&self,
		rng: &mut R,
		batch: &mut BatchState,
		include_surname: bool,
		trace: &mut GenerationTrace,
	) -> String {
		match self.plan {
			Plan::Legacy => self.legacy(rng, batch, include_surname, trace),
			Plan::Weighted { resolution, bias } => {
				self.weighted(rng, &resolution.pools, bias, batch, include_surname, trace)
			}
		}
	}

	/// Attaches a surname to an externally chosen given name, retrying the
	/// surname until the full name is new to the batch.
	///
	/// Returns `None` when the given name is already taken or no fresh full
	/// name was found.
	pub fn complete<R: Rng + ?Sized>(
		&self,
		rng: &mut R,
		given: &str,
		batch: &mut BatchState,
		include_surname: bool,
		trace: &mut GenerationTrace,
	) -> Option<String> {
		if batch.contains_given(given) {
			trace.reject(RejectReason::DuplicateGiven);
			return None;
		}
		let tries = if include_surname { self.config.surname_attempts } else { 1 };
		for _ in 0..tries {
			let full = self.with_surname(rng, given, include_surname, trace);
			if batch.contains_full(&full) {
				trace.reject(RejectReason::DuplicateFull);
				continue;
			}
			batch.register(given, &full);
			return Some(full);
		}
		None
	}

	fn weighted<R: Rng + ?Sized>(
		&self,
		rng: &mut R,
		pools: &PrunedPools,
		bias: &ResolvedBias,
		batch: &mut BatchState,
		include_surname: bool,
		trace: &mut GenerationTrace,
	) -> String {
		for _ in 0..self.config.given_attempts {
			trace.attempts += 1;
			let family = pick_family(rng, bias);
			let (given, syllables) = given_candidate(rng, family, pools, bias, false);
			if let Err(reason) = self.screen(rng, &given, family, pools, bias, batch) {
				trace.reject(reason);
				continue;
			}

			let display = title_case(&given);
			let full = self.with_surname(rng, &display, include_surname, trace);
			if batch.contains_full(&full) {
				trace.reject(RejectReason::DuplicateFull);
				continue;
			}

			trace.push(TraceEvent::FamilyChosen { family: family.name });
			trace.syllables = Some(syllables);
			batch.register(&display, &full);
			return full;
		}

		self.simplified(rng, pools, bias, batch, include_surname, trace)
	}

	/// Flat-weight assembler that only keeps the length, phonotactic and
	/// full-name checks.
	fn simplified<R: Rng + ?Sized>(
		&self,
		rng: &mut R,
		pools: &PrunedPools,
		bias: &ResolvedBias,
		batch: &mut BatchState,
		include_surname: bool,
		trace: &mut GenerationTrace,
	) -> String {
		trace.push(TraceEvent::SimplifiedFallback);
		log::debug!("given-name budget spent, switching to the simplified assembler");

		for _ in 0..self.config.given_attempts {
			trace.attempts += 1;
			let family = pick_family(rng, bias);
			let (given, syllables) = given_candidate(rng, family, pools, bias, true);
			if !bias.policy.accepts_len(letter_count(&given)) {
				trace.reject(RejectReason::Length);
				continue;
			}
			if !phonotactics::is_pronounceable(&given) {
				trace.reject(RejectReason::Phonotactics);
				continue;
			}

			let display = title_case(&given);
			let full = self.with_surname(rng, &display, include_surname, trace);
			if batch.contains_full(&full) {
				trace.reject(RejectReason::DuplicateFull);
				continue;
			}

			trace.push(TraceEvent::FamilyChosen { family: family.name });
			trace.syllables = Some(syllables);
			batch.register(&display, &full);
			return full;
		}

		self.safe(rng, Some(bias.policy), batch, include_surname, trace)
	}

	fn safe<R: Rng + ?Sized>(
		&self,
		rng: &mut R,
		policy: Option<LengthPolicy>,
		batch: &mut BatchState,
		include_surname: bool,
		trace: &mut GenerationTrace,
	) -> String {
		trace.push(TraceEvent::SafeFallback);
		log::warn!("falling back to a safe name");

		let fitting: Vec<&str> = SAFE_NAMES
			.iter()
			.copied()
			.filter(|name| policy.is_none_or(|p| p.accepts_len(letter_count(name))))
			.collect();
		let pool = if fitting.is_empty() { SAFE_NAMES } else { fitting.as_slice() };

		let mut last = None;
		for given in pool {
			let full = self.with_surname(rng, given, include_surname, trace);
			if !batch.contains_full(&full) {
				batch.register(given, &full);
				return full;
			}
			last = Some((*given, full));
		}

		// Every safe name is taken; a duplicate beats no name at all.
		let (given, full) = last.unwrap_or((SAFE_NAMES[0], SAFE_NAMES[0].to_owned()));
		batch.register(given, &full);
		full
	}

	fn legacy<R: Rng + ?Sized>(
		&self,
		rng: &mut R,
		batch: &mut BatchState,
		include_surname: bool,
		trace: &mut GenerationTrace,
	) -> String {
		if self.raw.chunks.is_empty() {
			return self.safe(rng, None, batch, include_surname, trace);
		}

		for _ in 0..self.config.given_attempts {
			trace.attempts += 1;
			let count = weighted::choose(rng, LEGACY_TIERS, |(weight, _)| *weight).map_or(2, |(_, n)| *n);
			let given = title_case(&self.raw_chunks(rng, count));
			if !phonotactics::is_pronounceable(&given) {
				trace.reject(RejectReason::Phonotactics);
				continue;
			}
			if batch.contains_given(&given) {
				trace.reject(RejectReason::DuplicateGiven);
				continue;
			}
			let full = self.with_surname(rng, &given, include_surname, trace);
			if batch.contains_full(&full) {
				trace.reject(RejectReason::DuplicateFull);
				continue;
			}
			trace.syllables = Some(count);
			batch.register(&given, &full);
			return full;
		}

		self.safe(rng, None, batch, include_surname, trace)
	}

	fn raw_chunks<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> String {
		(0..count)
			.filter_map(|_| weighted::uniform(rng, &self.raw.chunks))
			.map(String::as_str)
			.collect()
	}

	fn with_surname<R: Rng + ?Sized>(
		&self,
		rng: &mut R,
		given: &str,
		include_surname: bool,
		trace: &mut GenerationTrace,
	) -> String {
		if !include_surname {
			return given.to_owned();
		}
		let surname = match self.plan {
			Plan::Legacy => self.legacy_surname(rng, trace),
			Plan::Weighted { bias, .. } => self.surname(rng, bias, trace),
		};
		if let Some(family) = surname.family {
			trace.push(TraceEvent::SurnameFamilyChosen { family });
		}
		if surname.fallback {
			trace.push(TraceEvent::SurnameFallback);
		}
		format!("{given} {}", surname.text)
	}

	fn surname<R: Rng + ?Sized>(&self, rng: &mut R, bias: &ResolvedBias, trace: &mut GenerationTrace) -> Surname {
		let family = weighted::choose(rng, SURNAME_FAMILIES, |f| bias.surname_weight(f)).unwrap_or(&SURNAME_FAMILIES[0]);

		let mut last = String::new();
		for _ in 0..self.config.surname_attempts {
			let candidate = surname_candidate(rng, family);
			let len = letter_count(&candidate);
			if (SURNAME_LEN.0..=SURNAME_LEN.1).contains(&len) && phonotactics::is_pronounceable(&candidate) {
				return Surname {
					text: candidate,
					family: Some(family.name),
					fallback: false,
				};
			}
			trace.reject(RejectReason::Surname);
			last = candidate;
		}

		log::warn!("surname budget spent, keeping '{last}'");
		Surname {
			text: last,
			family: Some(family.name),
			fallback: true,
		}
	}

	fn legacy_surname<R: Rng + ?Sized>(&self, rng: &mut R, trace: &mut GenerationTrace) -> Surname {
		let mut last = String::new();
		for _ in 0..self.config.surname_attempts {
			let candidate = title_case(&self.raw_chunks(rng, 2));
			if phonotactics::is_pronounceable(&candidate) {
				return Surname {
					text: candidate,
					family: None,
					fallback: false,
				};
			}
			trace.reject(RejectReason::Surname);
			last = candidate;
		}

		log::warn!("legacy surname budget spent, keeping '{last}'");
		Surname {
			text: last,
			family: None,
			fallback: true,
		}
	}

	fn screen<R: Rng + ?Sized>(
		&self,
		rng: &mut R,
		given: &str,
		family: &GivenNameFamily,
		pools: &PrunedPools,
		bias: &ResolvedBias,
		batch: &BatchState,
	) -> Result<(), RejectReason> {
		if !bias.policy.accepts_len(letter_count(given)) {
			return Err(RejectReason::Length);
		}
		if self.config.banned_given_tokens.iter().any(|token| given.contains(&token.to_lowercase())) {
			return Err(RejectReason::BannedToken);
		}
		if bias.is_banned(given) || family.banned_fragments.iter().any(|f| given.contains(f)) {
			return Err(RejectReason::BannedFragment);
		}
		if pools.avoids(given) {
			return Err(RejectReason::AvoidList);
		}
		if !phonotactics::is_pronounceable(given) {
			return Err(RejectReason::Phonotactics);
		}
		if phonotactics::has_soft_bigram(given) && weighted::chance(rng, self.config.soft_bigram_rejection) {
			return Err(RejectReason::SoftBigram);
		}
		if batch.exceeds_suffix_share(given, self.config.suffix_share_cap) {
			return Err(RejectReason::SuffixShare);
		}
		if batch.contains_given(given) {
			return Err(RejectReason::DuplicateGiven);
		}
		Ok(())
	}
}

fn pick_family<R: Rng + ?Sized>(rng: &mut R, bias: &ResolvedBias) -> &'static GivenNameFamily {
	weighted::choose(rng, GIVEN_FAMILIES, |f| bias.family_weight(f)).unwrap_or(&GIVEN_FAMILIES[0])
}

/// Picks one phoneme token. `flat` ignores every boost.
fn pick_token<R: Rng + ?Sized>(
	rng: &mut R,
	tokens: &[&'static str],
	boosts: &TokenBoosts,
	family: &GivenNameFamily,
	flat: bool,
) -> &'static str {
	let picked = if flat {
		weighted::uniform(rng, tokens)
	} else {
		weighted::choose(rng, tokens, |token| {
			let preferred = family.preferred_bigrams.iter().any(|b| token.contains(b));
			boosts.weight(token) + if preferred { PREFERRED_BIGRAM_BOOST } else { 0.0 }
		})
	};
	picked.copied().unwrap_or("")
}

/// Appends `piece`, dropping its first letter when it repeats the vowel
/// that ends `word`.
fn append_elided(word: &mut String, piece: &str) {
	let repeated = match (word.chars().last(), piece.chars().next()) {
		(Some(last), Some(first)) => last == first && "aeiou".contains(first),
		_ => false,
	};
	word.push_str(if repeated { &piece[1..] } else { piece });
}

/// Suffix candidates for `family` under the pruned endings.
fn suffix_candidates<'p>(family: &GivenNameFamily, pools: &'p PrunedPools) -> Vec<&'p str> {
	if !pools.endings_restricted {
		return family.suffixes.to_vec();
	}
	let kept: Vec<&str> = family
		.suffixes
		.iter()
		.copied()
		.filter(|s| pools.endings.iter().any(|e| e == s))
		.collect();
	if kept.is_empty() {
		pools.endings.iter().map(String::as_str).collect()
	} else {
		kept
	}
}

/// Builds one lowercase given-name candidate and its syllable count.
fn given_candidate<R: Rng + ?Sized>(
	rng: &mut R,
	family: &GivenNameFamily,
	pools: &PrunedPools,
	bias: &ResolvedBias,
	flat: bool,
) -> (String, usize) {
	let (lo, hi) = bias.policy.syllables;
	let (syllables, with_suffix) = match pools.required_structures.as_deref().and_then(|s| weighted::uniform(rng, s)) {
		Some(structure) => (structure.syllables.clamp(lo, hi), structure.has_ending),
		None => (
			rng.random_range(lo..=hi),
			pools.require_ending || weighted::chance(rng, bias.suffix_chance),
		),
	};

	let mut word = String::new();
	let lead = !pools.chunks.is_empty() && (pools.require_chunk || weighted::chance(rng, LEAD_CHUNK_CHANCE));
	if lead {
		if let Some(chunk) = weighted::uniform(rng, &pools.chunks) {
			word.push_str(chunk);
		}
	}

	let codas: Vec<&'static str> = family.codas.iter().copied().chain(std::iter::once("")).collect();
	for i in usize::from(lead)..syllables {
		let last = i + 1 == syllables;
		append_elided(&mut word, pick_token(rng, family.onsets, &bias.onsets, family, flat));
		append_elided(&mut word, pick_token(rng, family.nuclei, &bias.nuclei, family, flat));
		// The suffix stands in for the final coda.
		if !(last && with_suffix) {
			word.push_str(pick_token(rng, &codas, &bias.codas, family, flat));
		}
	}

	if with_suffix {
		let candidates = suffix_candidates(family, pools);
		let suffix = if flat {
			weighted::uniform(rng, &candidates)
		} else {
			weighted::choose(rng, &candidates, |s| bias.suffixes.weight(s))
		};
		if let Some(suffix) = suffix {
			append_elided(&mut word, suffix);
		}
	}

	(word, syllables)
}

fn surname_candidate<R: Rng + ?Sized>(rng: &mut R, family: &SurnameFamily) -> String {
	let mut word = String::new();
	if let Some(prefix) = weighted::uniform(rng, family.prefixes) {
		word.push_str(prefix);
	}
	if let Some(root) = weighted::uniform(rng, family.roots) {
		append_elided(&mut word, root);
	}

	let roll: f64 = rng.random();
	let tail = if roll < SURNAME_SUFFIX_SHARE {
		weighted::uniform(rng, family.suffixes)
	} else if roll < SURNAME_SUFFIX_SHARE + SURNAME_COMPOUND_SHARE {
		weighted::uniform(rng, family.compounds)
	} else {
		None
	};
	if let Some(tail) = tail {
		append_elided(&mut word, tail);
	}

	title_case(&word)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::dimensions::{CulturalOrigin, Era, Gender, LengthTier};
	use crate::random::Mulberry32;

	fn weighted_plan(dims: Dimensions) -> Plan {
		Plan::new(&RawPools::elven(), &dims, true)
	}

	#[test]
	fn test_plan_selection() {
		let raw = RawPools::elven();
		assert_eq!(Plan::new(&raw, &Dimensions::default(), false), Plan::Legacy);
		assert!(matches!(Plan::new(&raw, &Dimensions::default(), true), Plan::Weighted { .. }));
	}

	#[test]
	fn test_safe_names_are_pronounceable_and_sorted() {
		for name in SAFE_NAMES {
			assert!(phonotactics::is_pronounceable(name), "{name}");
		}
		assert!(SAFE_NAMES.windows(2).all(|w| w[0].len() <= w[1].len()));
	}

	#[test]
	fn test_append_elided() {
		let mut word = "lia".to_owned();
		append_elided(&mut word, "ara");
		assert_eq!(word, "liara");
		append_elided(&mut word, "wen");
		assert_eq!(word, "liarawen");
	}

	#[test]
	fn test_weighted_names_respect_policy() {
		let config = EngineConfig::default();
		let raw = RawPools::elven();
		let plan = weighted_plan(Dimensions {
			length: Some(LengthTier::Medium),
			..Default::default()
		});
		let assembler = Assembler::new(&config, &raw, &plan);
		let mut rng = Mulberry32::new(11);
		let mut batch = BatchState::default();
		for _ in 0..40 {
			let mut trace = GenerationTrace::default();
			let name = assembler.name(&mut rng, &mut batch, false, &mut trace);
			assert!((7..=8).contains(&letter_count(&name)), "{name}");
			assert!(phonotactics::is_pronounceable(&name), "{name}");
		}
	}

	#[test]
	fn test_surnames_are_attached_and_recorded() {
		let config = EngineConfig::default();
		let raw = RawPools::elven();
		let plan = weighted_plan(Dimensions {
			cultural_origin: Some(CulturalOrigin::Drow),
			..Default::default()
		});
		let assembler = Assembler::new(&config, &raw, &plan);
		let mut rng = Mulberry32::new(5);
		let mut batch = BatchState::default();
		let mut trace = GenerationTrace::default();
		let name = assembler.name(&mut rng, &mut batch, true, &mut trace);
		assert_eq!(name.split(' ').count(), 2, "{name}");
		assert!(trace.has(&TraceEvent::SurnameFamilyChosen { family: "shadow" }));
	}

	#[test]
	fn test_full_batch_never_blocks() {
		let mut config = EngineConfig::default();
		config.given_attempts = 2;
		let raw = RawPools::elven();
		let plan = weighted_plan(Dimensions {
			gender: Some(Gender::Feminine),
			era: Some(Era::Ancient),
			..Default::default()
		});
		let assembler = Assembler::new(&config, &raw, &plan);
		let mut rng = Mulberry32::new(1);
		let mut batch = BatchState::default();
		for _ in 0..60 {
			let mut trace = GenerationTrace::default();
			let name = assembler.name(&mut rng, &mut batch, false, &mut trace);
			assert!(phonotactics::is_pronounceable(&name), "{name}");
		}
		assert_eq!(batch.len(), 60);
	}

	#[test]
	fn test_safe_fallback_is_traced() {
		let config = EngineConfig::default();
		let raw = RawPools::new(Vec::new(), Vec::new());
		let plan = Plan::Legacy;
		let assembler = Assembler::new(&config, &raw, &plan);
		let mut rng = Mulberry32::new(2);
		let mut batch = BatchState::default();
		let mut trace = GenerationTrace::default();
		let name = assembler.name(&mut rng, &mut batch, false, &mut trace);
		assert_eq!(name, SAFE_NAMES[0]);
		assert!(trace.has(&TraceEvent::SafeFallback));
		let second = assembler.name(&mut rng, &mut batch, false, &mut GenerationTrace::default());
		assert_eq!(second, SAFE_NAMES[1]);
	}

	#[test]
	fn test_legacy_names_are_pronounceable() {
		let config = EngineConfig::default();
		let raw = RawPools::elven();
		let plan = Plan::Legacy;
		let assembler = Assembler::new(&config, &raw, &plan);
		let mut rng = Mulberry32::new(8);
		let mut batch = BatchState::default();
		for _ in 0..30 {
			let mut trace = GenerationTrace::default();
			let name = assembler.name(&mut rng, &mut batch, true, &mut trace);
			let given = name.split(' ').next().unwrap_or_default();
			assert!(phonotactics::is_pronounceable(given), "{name}");
			assert_eq!(name.split(' ').count(), 2, "{name}");
		}
	}

	#[test]
	fn test_complete_rejects_taken_given_name() {
		let config = EngineConfig::default();
		let raw = RawPools::elven();
		let plan = weighted_plan(Dimensions::default());
		let assembler = Assembler::new(&config, &raw, &plan);
		let mut rng = Mulberry32::new(4);
		let mut batch = BatchState::default();
		let mut trace = GenerationTrace::default();
		assert_eq!(assembler.complete(&mut rng, "Aelith", &mut batch, false, &mut trace), Some("Aelith".to_owned()));
		assert_eq!(assembler.complete(&mut rng, "Aelith", &mut batch, false, &mut trace), None);
		assert_eq!(trace.rejected(RejectReason::DuplicateGiven), 1);
	}
}
