//! Distributional diagnostics.
//!
//! Two reports are available: a static breakdown of the curated corpus, and
//! a simulation that measures prefix-family concentration over many seeded
//! batches of the full generator.

use std::collections::{BTreeMap, HashMap};
use std::sync::mpsc;
use std::thread;

use serde::Serialize;

use crate::dimensions::{Dimensions, LengthTier};
use crate::engine::generator::{GenerationRequest, NameGenerator};
use crate::engine::quality::{gate_key, prefix_family};
use crate::lexicon::corpus::{NameEntry, corpus};

/// Default number of bigrams kept in a corpus report.
pub const DEFAULT_TOP_BIGRAMS: usize = 20;

/// Entry counts of a name table per dimension value, plus its most common
/// letter bigrams.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusReport {
	pub entries: usize,
	pub by_origin: BTreeMap<String, usize>,
	pub by_gender: BTreeMap<String, usize>,
	pub by_era: BTreeMap<String, usize>,
	pub by_context: BTreeMap<String, usize>,
	pub by_form: BTreeMap<String, usize>,
	pub by_style: BTreeMap<String, usize>,
	pub by_length: BTreeMap<String, usize>,
	/// Most frequent bigrams, highest count first, ties alphabetical.
	pub top_bigrams: Vec<(String, usize)>,
}

impl CorpusReport {
	/// Builds the report over `entries`.
	///
	/// # Parameters
	/// - `top_n`: how many bigrams to keep.
	pub fn build(entries: &[NameEntry], top_n: usize) -> Self {
		let mut report = CorpusReport {
			entries: entries.len(),
			..Default::default()
		};
		let mut bigrams: HashMap<String, usize> = HashMap::new();

		for entry in entries {
			bump(&mut report.by_origin, entry.origin.as_str());
			bump(&mut report.by_gender, entry.gender.as_str());
			bump(&mut report.by_era, entry.era.as_str());
			bump(&mut report.by_context, entry.context.as_str());
			bump(&mut report.by_form, entry.form.as_str());
			bump(&mut report.by_style, entry.style.as_str());
			bump(&mut report.by_length, LengthTier::bucket_of_name(&entry.name).as_str());

			let letters: Vec<char> = entry.name.chars().filter(|c| c.is_alphabetic()).flat_map(char::to_lowercase).collect();
			for pair in letters.windows(2) {
				*bigrams.entry(pair.iter().collect()).or_insert(0) += 1;
			}
		}

		let mut sorted: Vec<(String, usize)> = bigrams.into_iter().collect();
		sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
		sorted.truncate(top_n);
		report.top_bigrams = sorted;
		report
	}

	/// Report over the built-in curated corpus.
	pub fn of_corpus() -> Self {
		Self::build(corpus(), DEFAULT_TOP_BIGRAMS)
	}
}

fn bump(map: &mut BTreeMap<String, usize>, key: &str) {
	*map.entry(key.to_owned()).or_insert(0) += 1;
}

/// Largest prefix-family share observed over simulated batches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyShareReport {
	pub batches: usize,
	pub count: usize,
	pub p50: f64,
	pub p90: f64,
	pub max: f64,
	/// Most names one family held in any single batch.
	pub largest_family: usize,
}

/// Runs `batches` seeded batches of `count` names and measures how much of
/// each batch its largest prefix family takes.
///
/// This method performs:
/// - Splitting batch indices across `num_cpus` worker threads
/// - One fresh session and seed family per batch
/// - Collecting per-batch results over an MPSC channel
///
/// # Notes
/// - Results are ordered by batch index before aggregation, so the report
///   does not depend on thread scheduling.
/// - A batch the gate returned empty counts as a zero share.
pub fn simulate_family_shares(generator: &NameGenerator, dims: Dimensions, batches: usize, count: usize) -> FamilyShareReport {
	if batches == 0 {
		return FamilyShareReport {
			count,
			..Default::default()
		};
	}

	let workers = num_cpus::get().clamp(1, batches);
	let (tx, rx) = mpsc::channel();

	thread::scope(|scope| {
		for worker in 0..workers {
			let tx = tx.clone();
			scope.spawn(move || {
				for index in (worker..batches).step_by(workers) {
					let request = GenerationRequest::new(count).dimensions(dims).seed(format!("share{index}-0"));
					let output = generator.generate(&request, &mut generator.session());
					let largest = largest_family(generator, &output.names);
					// The receiver outlives the scope.
					let _ = tx.send((index, largest, output.names.len()));
				}
			});
		}
	});
	drop(tx);

	let mut results: Vec<(usize, usize, usize)> = rx.iter().collect();
	results.sort_unstable();

	let largest = results.iter().map(|(_, size, _)| *size).max().unwrap_or(0);
	let mut shares: Vec<f64> = results
		.iter()
		.map(|(_, size, len)| if *len == 0 { 0.0 } else { *size as f64 / *len as f64 })
		.collect();
	shares.sort_by(f64::total_cmp);

	FamilyShareReport {
		batches,
		count,
		p50: percentile(&shares, 0.5),
		p90: percentile(&shares, 0.9),
		max: shares.last().copied().unwrap_or(0.0),
		largest_family: largest,
	}
}

fn largest_family(generator: &NameGenerator, names: &[String]) -> usize {
	let prefixes = &generator.config().quality.family_prefixes;
	let mut counts: HashMap<&str, usize> = HashMap::new();
	for name in names {
		if let Some(family) = prefix_family(&gate_key(name), prefixes) {
			*counts.entry(family).or_insert(0) += 1;
		}
	}
	counts.into_values().max().unwrap_or(0)
}

/// Nearest-rank percentile of an ascending slice.
fn percentile(sorted: &[f64], p: f64) -> f64 {
	if sorted.is_empty() {
		return 0.0;
	}
	let rank = (p * sorted.len() as f64).ceil() as usize;
	sorted[rank.clamp(1, sorted.len()) - 1]
}
