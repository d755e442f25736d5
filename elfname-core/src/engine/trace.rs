use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::dimensions::DimensionValue;
use crate::engine::constraints::RelaxationStep;
use crate::lexicon::bias::LengthPolicy;

/// Why a candidate was thrown away.
///
/// Serialized in kebab-case, the same text `Display` prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RejectReason {
	Length,
	BannedToken,
	BannedFragment,
	AvoidList,
	Phonotactics,
	SoftBigram,
	SuffixShare,
	DuplicateGiven,
	DuplicateFull,
	Surname,
}

impl fmt::Display for RejectReason {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let text = match self {
			RejectReason::Length => "length",
			RejectReason::BannedToken => "banned-token",
			RejectReason::BannedFragment => "banned-fragment",
			RejectReason::AvoidList => "avoid-list",
			RejectReason::Phonotactics => "phonotactics",
			RejectReason::SoftBigram => "soft-bigram",
			RejectReason::SuffixShare => "suffix-share",
			RejectReason::DuplicateGiven => "duplicate-given",
			RejectReason::DuplicateFull => "duplicate-full",
			RejectReason::Surname => "surname",
		};
		f.write_str(text)
	}
}

/// One notable thing that happened while producing a name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum TraceEvent {
	/// A dimension rule survived relaxation and shaped the pools.
	RuleApplied { value: DimensionValue },
	/// The constraint ladder took `step` to resolve a conflict.
	Relaxed { step: RelaxationStep },
	/// The length policies of the selected dimensions did not intersect;
	/// the base policy was used instead.
	PolicyReverted,
	/// Phoneme family of the given name.
	FamilyChosen { family: &'static str },
	SurnameFamilyChosen { family: &'static str },
	/// No dimension selected; flat picks from the raw pools.
	Legacy,
	/// The given name came from the curated corpus.
	CuratedPick,
	/// The weighted budget ran out; flat family weights were used.
	SimplifiedFallback,
	/// Both assemblers ran out; a fixed safe name was used.
	SafeFallback,
	/// The surname budget ran out; the last candidate was kept.
	SurnameFallback,
}

/// Diagnostic record of one generated name.
///
/// ## Fields
/// - `events`: notable decisions in the order they were taken.
/// - `rejections`: rejected candidates per reason.
/// - `policy`: length policy the given name was held to; `None` for the
///   legacy assembler.
/// - `syllables`: syllable count of an assembled given name.
/// - `attempts`: candidates built before one was accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationTrace {
	pub events: Vec<TraceEvent>,
	pub rejections: BTreeMap<RejectReason, usize>,
	pub policy: Option<LengthPolicy>,
	pub syllables: Option<usize>,
	pub attempts: usize,
}

impl GenerationTrace {
	/// Appends `event`.
	pub fn push(&mut self, event: TraceEvent) {
		self.events.push(event);
	}

	/// Counts one rejection for `reason` and logs it at trace level.
	pub fn reject(&mut self, reason: RejectReason) {
		log::trace!("candidate rejected: {reason}");
		*self.rejections.entry(reason).or_insert(0) += 1;
	}

	/// Number of candidates rejected for `reason`.
	pub fn rejected(&self, reason: RejectReason) -> usize {
		self.rejections.get(&reason).copied().unwrap_or(0)
	}

	/// True when `event` was recorded.
	pub fn has(&self, event: &TraceEvent) -> bool {
		self.events.contains(event)
	}

	/// True when any step of the fall-back ladder was taken.
	pub fn degraded(&self) -> bool {
		self.events.iter().any(|e| {
			matches!(
				e,
				TraceEvent::Relaxed { .. }
					| TraceEvent::PolicyReverted
					| TraceEvent::SimplifiedFallback
					| TraceEvent::SafeFallback
					| TraceEvent::SurnameFallback
			)
		})
	}
}
