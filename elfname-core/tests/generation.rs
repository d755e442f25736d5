//! End-to-end properties of the name generator.
//!
//! Every test runs seeded requests against fresh sessions, so results are
//! reproducible across runs and machines.

use std::collections::HashSet;

use elfname_core::dimensions::{CulturalOrigin, Era, Gender, LengthTier, Nation, Style, given_part, letter_count};
use elfname_core::engine::constraints::RelaxationStep;
use elfname_core::engine::trace::TraceEvent;
use elfname_core::phonotactics::is_pronounceable;
use elfname_core::{Dimensions, EngineConfig, GenerationRequest, NameGenerator, Strategy};

fn generator() -> NameGenerator {
	NameGenerator::new(EngineConfig::default()).unwrap()
}

fn run(generator: &NameGenerator, request: &GenerationRequest) -> Vec<String> {
	generator.generate(request, &mut generator.session()).names
}

/// Share of words, given names and surnames alike, the validator accepts.
fn pronounceable_rate(names: &[String]) -> f64 {
	let words: Vec<&str> = names.iter().flat_map(|name| name.split_whitespace()).collect();
	let ok = words.iter().filter(|word| is_pronounceable(word)).count();
	ok as f64 / words.len() as f64
}

#[test]
fn test_pronounceability_rate() {
	let generator = generator();

	let weighted = run(&generator, &GenerationRequest::new(100).force_weighting(true).surname(true).seed("pron-1"));
	assert!(!weighted.is_empty());
	assert!(pronounceable_rate(&weighted) >= 0.95);

	let legacy = run(&generator, &GenerationRequest::new(100).surname(true).seed("pron-2"));
	assert!(!legacy.is_empty());
	assert!(pronounceable_rate(&legacy) >= 0.95);
}

#[test]
fn test_length_tiers_hold() {
	let generator = generator();
	for tier in LengthTier::ALL {
		let (min, max) = tier.char_bounds();
		let request = GenerationRequest::new(20)
			.dimensions(Dimensions {
				length: Some(*tier),
				..Default::default()
			})
			.seed(format!("len{tier}-1"));
		let names = run(&generator, &request);
		assert!(!names.is_empty(), "{tier}");
		for name in &names {
			let len = letter_count(given_part(name));
			assert!((min..=max).contains(&len), "{tier}: {name}");
		}
	}
}

#[test]
fn test_seeded_requests_are_reproducible() {
	let generator = generator();
	let dims = Dimensions {
		nation: Some(Nation::Greenwild),
		style: Some(Style::Nature),
		..Default::default()
	};
	for strategy in Strategy::ALL {
		let request = GenerationRequest::new(12).dimensions(dims).surname(true).strategy(*strategy).seed("det-1");
		assert_eq!(run(&generator, &request), run(&generator, &request), "{strategy}");
	}
}

#[test]
fn test_gender_bias_direction() {
	let generator = generator();
	let vowel_final = |names: &[String]| {
		let count = names
			.iter()
			.filter(|name| given_part(name).chars().last().is_some_and(|c| "aeiou".contains(c)))
			.count();
		count as f64 / names.len() as f64
	};

	for seed in ["bias-1", "bias-2", "bias-3"] {
		let mut shares = [0.0; 2];
		for (i, gender) in [Gender::Feminine, Gender::Masculine].into_iter().enumerate() {
			let request = GenerationRequest::new(24)
				.dimensions(Dimensions {
					gender: Some(gender),
					..Default::default()
				})
				.seed(seed);
			let names = run(&generator, &request);
			assert!(!names.is_empty());
			shares[i] = vowel_final(&names);
		}
		assert!(shares[0] - shares[1] > 0.02, "{seed}: feminine {} masculine {}", shares[0], shares[1]);
	}
}

#[test]
fn test_surname_toggle() {
	let generator = generator();
	let dims = Dimensions {
		cultural_origin: Some(CulturalOrigin::HighElf),
		..Default::default()
	};

	let with = run(&generator, &GenerationRequest::new(10).dimensions(dims).surname(true).seed("sur-1"));
	assert!(!with.is_empty());
	assert!(with.iter().all(|name| name.split_whitespace().count() == 2));

	let without = run(&generator, &GenerationRequest::new(10).dimensions(dims).seed("sur-1"));
	assert!(!without.is_empty());
	assert!(without.iter().all(|name| name.split_whitespace().count() == 1));
}

#[test]
fn test_traces_record_relaxation_for_conflicts() {
	let generator = generator();
	let request = GenerationRequest::new(4)
		.dimensions(Dimensions {
			nation: Some(Nation::Highcourt),
			cultural_origin: Some(CulturalOrigin::Drow),
			era: Some(Era::Ancient),
			..Default::default()
		})
		.seed("conflict-1")
		.trace(true);
	let output = generator.generate(&request, &mut generator.session());
	let traces = output.traces.unwrap();
	assert_eq!(traces.len(), output.names.len());
	assert!(!output.names.is_empty());
	for trace in &traces {
		assert!(trace.policy.is_some());
		assert!(!trace.has(&TraceEvent::Legacy));
		assert!(trace.has(&TraceEvent::Relaxed {
			step: RelaxationStep::DropNationOrigin
		}));
		assert!(trace.degraded());
	}
}

/// With every vowel banned no weighted attempt survives screening, so each
/// name comes from the simplified assembler, which must still hold the
/// validator and the length policy.
#[test]
fn test_simplified_fallback_keeps_quality() {
	let mut config = EngineConfig::default();
	config.banned_given_tokens = ["a", "e", "i", "o", "u"].iter().map(|t| t.to_string()).collect();
	let generator = NameGenerator::new(config).unwrap();
	let request = GenerationRequest::new(20)
		.dimensions(Dimensions {
			cultural_origin: Some(CulturalOrigin::WoodElf),
			..Default::default()
		})
		.seed("simple-1")
		.trace(true);
	let output = generator.generate(&request, &mut generator.session());
	let traces = output.traces.unwrap();
	assert!(!output.names.is_empty());

	for (name, trace) in output.names.iter().zip(&traces) {
		assert!(trace.has(&TraceEvent::SimplifiedFallback), "{name}");
		let given = given_part(name);
		assert!(is_pronounceable(given), "{name}");
		let policy = trace.policy.unwrap();
		assert!(policy.accepts_len(letter_count(given)), "{name} outside {:?}", policy.chars);
	}
}

#[test]
fn test_surname_fallback_keeps_two_words() {
	let mut config = EngineConfig::default();
	config.surname_attempts = 1;
	let generator = NameGenerator::new(config).unwrap();
	let request = GenerationRequest::new(20)
		.dimensions(Dimensions {
			cultural_origin: Some(CulturalOrigin::WoodElf),
			..Default::default()
		})
		.surname(true)
		.seed("surfall-1")
		.trace(true);
	let output = generator.generate(&request, &mut generator.session());
	let traces = output.traces.unwrap();
	assert!(!output.names.is_empty());
	assert!(traces.iter().any(|trace| trace.has(&TraceEvent::SurnameFallback)));
	for name in &output.names {
		assert_eq!(name.split_whitespace().count(), 2, "{name}");
	}
}

/// Wood elf, revival era, feminine, with surname, seeded "test-1".
#[test]
fn test_wood_elf_scenario() {
	let generator = generator();
	let request = GenerationRequest::new(10)
		.dimensions(Dimensions {
			cultural_origin: Some(CulturalOrigin::WoodElf),
			era: Some(Era::Revival),
			gender: Some(Gender::Feminine),
			..Default::default()
		})
		.surname(true)
		.seed("test-1");

	let first = run(&generator, &request);
	let second = run(&generator, &request);
	assert_eq!(first, second);
	assert_eq!(first.len(), 10);

	let mut seen = HashSet::new();
	for name in &first {
		let words: Vec<&str> = name.split_whitespace().collect();
		assert_eq!(words.len(), 2, "{name}");
		assert!((6..=9).contains(&letter_count(words[0])), "{name}");
		assert!(words.iter().all(|w| is_pronounceable(w)), "{name}");
		assert!(seen.insert(name.to_lowercase()), "duplicate {name}");
	}
}

#[test]
fn test_seed_family_shares_batch_memory() {
	let generator = generator();
	let dims = Dimensions {
		cultural_origin: Some(CulturalOrigin::WoodElf),
		gender: Some(Gender::Feminine),
		..Default::default()
	};
	let mut session = generator.session();

	let first = generator.generate(&GenerationRequest::new(10).dimensions(dims).seed("family-1"), &mut session);
	let second = generator.generate(&GenerationRequest::new(10).dimensions(dims).seed("family-2"), &mut session);

	let first: HashSet<String> = first.names.iter().map(|n| n.to_lowercase()).collect();
	assert!(second.names.iter().all(|n| !first.contains(&n.to_lowercase())));
	assert_eq!(session.len(), 1);
}
