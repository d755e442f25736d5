use std::collections::HashSet;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::dimensions::{Context, Era, Form, Gender, Lineage, Style};
use crate::phonotactics;

/// Letter pairs a curated name may never contain.
pub const FORBIDDEN_BIGRAMS: &[&str] = &["qw", "jh", "vk", "yy", "ii"];

/// One row of the curated corpus.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NameEntry {
	pub name: String,
	pub gender: Gender,
	pub origin: Lineage,
	pub era: Era,
	pub context: Context,
	pub form: Form,
	pub style: Style,
	/// Relative sampling weight, always positive.
	pub weight: f64,
}

struct Stem {
	text: &'static str,
	lineage: Lineage,
	era: Era,
	style: Style,
	weight: f64,
}

struct Ending {
	text: &'static str,
	gender: Gender,
	context: Context,
	form: Form,
	weight: f64,
}

const fn stem(text: &'static str, lineage: Lineage, era: Era, style: Style, weight: f64) -> Stem {
	Stem { text, lineage, era, style, weight }
}

const fn ending(text: &'static str, gender: Gender, context: Context, form: Form, weight: f64) -> Ending {
	Ending { text, gender, context, form, weight }
}

use Context::{Common, Noble, Records, Ritual};
use Era::{Ancient, Revival};
use Form::{Everyday, Formal, Outsider};
use Gender::{Feminine as F, Masculine as M, Neutral as N};
use Style::{Elegant, Nature, Simple};

const STEMS: &[Stem] = &[
	stem("Ael", Lineage::High, Ancient, Elegant, 1.2),
	stem("Thal", Lineage::High, Ancient, Elegant, 1.0),
	stem("Celeb", Lineage::High, Ancient, Elegant, 0.7),
	stem("Ith", Lineage::High, Ancient, Simple, 0.7),
	stem("Lor", Lineage::High, Revival, Simple, 1.0),
	stem("Aer", Lineage::High, Revival, Elegant, 1.0),
	stem("Quel", Lineage::High, Ancient, Elegant, 0.6),
	stem("Ser", Lineage::High, Revival, Simple, 0.9),
	stem("Elar", Lineage::High, Revival, Elegant, 0.9),
	stem("Sael", Lineage::High, Revival, Elegant, 0.8),
	stem("Caeth", Lineage::High, Ancient, Simple, 0.6),
	stem("Ilth", Lineage::High, Ancient, Elegant, 0.5),
	stem("Galath", Lineage::High, Ancient, Elegant, 0.8),
	stem("Elessan", Lineage::High, Revival, Elegant, 0.6),
	stem("Syl", Lineage::Wood, Revival, Nature, 1.2),
	stem("Fae", Lineage::Wood, Revival, Nature, 1.0),
	stem("Fen", Lineage::Wood, Revival, Simple, 0.9),
	stem("Wyn", Lineage::Wood, Ancient, Nature, 0.8),
	stem("Ara", Lineage::Wood, Revival, Nature, 1.0),
	stem("Thran", Lineage::Wood, Ancient, Nature, 0.7),
	stem("Lin", Lineage::Wood, Revival, Simple, 0.9),
	stem("Naer", Lineage::Wood, Ancient, Nature, 0.8),
	stem("Aul", Lineage::Wood, Ancient, Simple, 0.7),
	stem("Ean", Lineage::Wood, Revival, Elegant, 0.7),
	stem("Rhys", Lineage::Wood, Revival, Simple, 0.6),
	stem("Bryth", Lineage::Wood, Ancient, Nature, 0.6),
	stem("Faelin", Lineage::Wood, Revival, Nature, 0.8),
	stem("Sylvar", Lineage::Wood, Ancient, Nature, 0.7),
	stem("Zel", Lineage::Drow, Revival, Simple, 1.0),
	stem("Xan", Lineage::Drow, Ancient, Simple, 0.8),
	stem("Vir", Lineage::Drow, Revival, Elegant, 0.9),
	stem("Mal", Lineage::Drow, Ancient, Simple, 0.9),
	stem("Ril", Lineage::Drow, Revival, Elegant, 0.8),
	stem("Vel", Lineage::Drow, Revival, Elegant, 1.0),
	stem("Ilph", Lineage::Drow, Ancient, Elegant, 0.6),
	stem("Quen", Lineage::Drow, Ancient, Elegant, 0.6),
	stem("Dris", Lineage::Drow, Revival, Simple, 0.7),
	stem("Nath", Lineage::Drow, Ancient, Nature, 0.6),
	stem("Shar", Lineage::Drow, Revival, Nature, 0.7),
	stem("Phaer", Lineage::Drow, Ancient, Elegant, 0.7),
	stem("Zauvir", Lineage::Drow, Ancient, Elegant, 0.5),
	stem("Maluth", Lineage::Drow, Ancient, Simple, 0.5),
];

const ENDINGS: &[Ending] = &[
	ending("ith", F, Common, Everyday, 1.0),
	ending("a", F, Common, Everyday, 1.2),
	ending("ia", F, Noble, Formal, 1.0),
	ending("elle", F, Noble, Formal, 0.8),
	ending("wen", F, Ritual, Formal, 0.7),
	ending("ra", F, Common, Everyday, 0.9),
	ending("ae", F, Ritual, Formal, 0.7),
	ending("yss", F, Common, Outsider, 0.5),
	ending("ara", F, Common, Everyday, 0.8),
	ending("ea", F, Noble, Everyday, 0.8),
	ending("ithil", F, Ritual, Formal, 0.5),
	ending("aelis", F, Noble, Formal, 0.5),
	ending("anthe", F, Records, Everyday, 0.4),
	ending("ion", M, Noble, Formal, 1.0),
	ending("or", M, Common, Everyday, 1.1),
	ending("dor", M, Ritual, Formal, 0.8),
	ending("as", M, Common, Outsider, 0.8),
	ending("ath", M, Records, Everyday, 0.7),
	ending("orn", M, Records, Everyday, 0.7),
	ending("ael", M, Ritual, Formal, 0.7),
	ending("oth", M, Records, Formal, 0.6),
	ending("orien", M, Noble, Formal, 0.6),
	ending("andor", M, Ritual, Formal, 0.5),
	ending("iel", N, Ritual, Formal, 0.9),
	ending("aen", N, Records, Everyday, 0.6),
	ending("is", N, Common, Outsider, 0.6),
	ending("eth", N, Common, Everyday, 0.8),
	ending("ien", N, Noble, Formal, 0.7),
	ending("lin", N, Common, Outsider, 0.6),
	ending("ariel", N, Ritual, Formal, 0.5),
];

/// Joins a stem and an ending, eliding a vowel repeated across the seam,
/// and title-cases the result.
fn join(stem: &str, ending: &str) -> String {
	let ending = match (stem.chars().last(), ending.chars().next()) {
		(Some(last), Some(first)) if last.eq_ignore_ascii_case(&first) && "aeiou".contains(first) => &ending[1..],
		_ => ending,
	};
	title_case(&format!("{stem}{ending}"))
}

/// Uppercases the first letter and lowercases the rest.
pub fn title_case(word: &str) -> String {
	let mut chars = word.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
		None => String::new(),
	}
}

fn has_tripled_char(word: &str) -> bool {
	let chars: Vec<char> = word.to_lowercase().chars().collect();
	chars.windows(3).any(|w| w[0] == w[1] && w[1] == w[2])
}

/// Structural checks every curated name satisfies.
pub fn is_valid_entry_name(name: &str) -> bool {
	let lower = name.to_lowercase();
	!FORBIDDEN_BIGRAMS.iter().any(|b| lower.contains(b))
		&& !has_tripled_char(name)
		&& name.chars().any(|c| c.is_uppercase())
}

fn build() -> Vec<NameEntry> {
	let mut used: HashSet<String> = HashSet::new();
	let mut entries = Vec::with_capacity(STEMS.len() * ENDINGS.len());

	for stem in STEMS {
		for ending in ENDINGS {
			let name = join(stem.text, ending.text);
			if !is_valid_entry_name(&name) || !phonotactics::is_pronounceable(&name) {
				continue;
			}
			if !used.insert(name.clone()) {
				continue;
			}
			entries.push(NameEntry {
				name,
				gender: ending.gender,
				origin: stem.lineage,
				era: stem.era,
				context: ending.context,
				form: ending.form,
				style: stem.style,
				weight: stem.weight * ending.weight,
			});
		}
	}

	log::debug!("curated corpus built with {} entries", entries.len());
	entries
}

static CORPUS: Lazy<Vec<NameEntry>> = Lazy::new(build);

/// The frozen curated corpus, built on first access.
pub fn corpus() -> &'static [NameEntry] {
	&CORPUS
}
