use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::dimensions::Dimensions;
use crate::engine::assembler::{Assembler, Plan};
use crate::engine::quality::QualityGate;
use crate::engine::selector;
use crate::engine::session::GenerationSession;
use crate::engine::trace::{GenerationTrace, TraceEvent};
use crate::engine::weighted;
use crate::error::{ConfigError, ParseDimensionError};
use crate::lexicon::corpus::corpus;
use crate::lexicon::pools::RawPools;
use crate::random::NameRng;

/// Share of blended candidates drawn from the curated corpus.
const BLEND_CORPUS_SHARE: f64 = 0.35;

/// Where candidate given names come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
	/// Syllable assembly from phoneme families.
	#[default]
	Phonemic,
	/// Scored draws from the curated corpus only.
	Curated,
	/// Mix of both, mostly phonemic.
	Blended,
}

impl Strategy {
	pub const ALL: &'static [Strategy] = &[Strategy::Phonemic, Strategy::Curated, Strategy::Blended];

	pub fn as_str(&self) -> &'static str {
		match self {
			Strategy::Phonemic => "phonemic",
			Strategy::Curated => "curated",
			Strategy::Blended => "blended",
		}
	}
}

impl fmt::Display for Strategy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Strategy {
	type Err = ParseDimensionError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"phonemic" => Ok(Strategy::Phonemic),
			"curated" => Ok(Strategy::Curated),
			"blended" => Ok(Strategy::Blended),
			_ => Err(ParseDimensionError::new("strategy", s)),
		}
	}
}

/// One batch request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationRequest {
	pub count: usize,
	pub dimensions: Dimensions,
	pub include_surname: bool,
	/// Seeded requests are reproducible; the seed family keys the batch
	/// state in the session.
	pub seed: Option<String>,
	pub strategy: Strategy,
	/// Use the weighted assembler even when no dimension is selected.
	pub force_weighting: bool,
	pub with_trace: bool,
}

impl Default for GenerationRequest {
	fn default() -> Self {
		Self {
			count: 10,
			dimensions: Dimensions::default(),
			include_surname: false,
			seed: None,
			strategy: Strategy::default(),
			force_weighting: false,
			with_trace: false,
		}
	}
}

impl GenerationRequest {
	pub fn new(count: usize) -> Self {
		Self { count, ..Default::default() }
	}

	pub fn dimensions(mut self, dimensions: Dimensions) -> Self {
		self.dimensions = dimensions;
		self
	}

	pub fn surname(mut self, include: bool) -> Self {
		self.include_surname = include;
		self
	}

	pub fn seed(mut self, seed: impl Into<String>) -> Self {
		self.seed = Some(seed.into());
		self
	}

	pub fn strategy(mut self, strategy: Strategy) -> Self {
		self.strategy = strategy;
		self
	}

	pub fn force_weighting(mut self, force: bool) -> Self {
		self.force_weighting = force;
		self
	}

	pub fn trace(mut self, with_trace: bool) -> Self {
		self.with_trace = with_trace;
		self
	}
}

/// Names of one batch, and their traces when requested.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenerationOutput {
	pub names: Vec<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub traces: Option<Vec<GenerationTrace>>,
}

/// High-level entry point tying the assembler, the curated selector and
/// the quality gate together.
///
/// ## Responsibilities:
/// - Oversample candidates in bounded waves
/// - Route each candidate through the requested strategy
/// - Hand the pool to the quality gate and keep its verdict
///
/// The generator itself is immutable; all per-batch memory lives in the
/// caller's `GenerationSession`.
#[derive(Debug, Clone)]
pub struct NameGenerator {
	config: EngineConfig,
	pools: RawPools,
}

impl NameGenerator {
	/// Creates a generator over the elven raw pools.
	///
	/// # Errors
	/// Returns the first invariant `config` violates.
	pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
		Self::with_pools(config, RawPools::elven())
	}

	/// Creates a generator over custom raw pools.
	///
	/// # Errors
	/// Returns the first invariant `config` violates.
	pub fn with_pools(config: EngineConfig, pools: RawPools) -> Result<Self, ConfigError> {
		config.validate()?;
		Ok(Self { config, pools })
	}

	pub fn config(&self) -> &EngineConfig {
		&self.config
	}

	/// An empty session sized from the configuration.
	pub fn session(&self) -> GenerationSession {
		GenerationSession::new(self.config.session_capacity)
	}

	/// Generates up to `request.count` names.
	///
	/// Never fails. The result is shorter than requested only when the
	/// quality gate could not find enough diverse names within
	/// `max_waves`, or the curated corpus ran dry.
	pub fn generate(&self, request: &GenerationRequest, session: &mut GenerationSession) -> GenerationOutput {
		let count = request.count;
		if count == 0 {
			return GenerationOutput {
				names: Vec::new(),
				traces: request.with_trace.then(Vec::new),
			};
		}

		let seed = request.seed.as_deref();
		let dims = &request.dimensions;
		let mut rng = NameRng::for_seed(seed);
		let plan = Plan::new(&self.pools, dims, request.force_weighting);
		let assembler = Assembler::new(&self.config, &self.pools, &plan);
		let gate = QualityGate::new(&self.config.quality);
		let batch = session.batch(seed);

		let per_wave = count.saturating_mul(self.config.oversample);
		let mut curated = match request.strategy {
			Strategy::Phonemic => Vec::new(),
			Strategy::Curated | Strategy::Blended => {
				selector::select(&mut rng, corpus(), dims, per_wave.saturating_mul(self.config.max_waves))
			}
		}
		.into_iter();

		let mut candidates: Vec<(String, GenerationTrace)> = Vec::new();
		let mut kept = Vec::new();

		for wave in 0..self.config.max_waves {
			for _ in 0..per_wave {
				let mut trace = GenerationTrace::default();
				plan.record(&mut trace);

				let from_corpus = match request.strategy {
					Strategy::Phonemic => false,
					Strategy::Curated => true,
					Strategy::Blended => weighted::chance(&mut rng, BLEND_CORPUS_SHARE) && !curated.as_slice().is_empty(),
				};

				let name = if from_corpus {
					let Some(entry) = curated.next() else {
						break;
					};
					trace.push(TraceEvent::CuratedPick);
					match assembler.complete(&mut rng, &entry.name, batch, request.include_surname, &mut trace) {
						Some(name) => name,
						None => continue,
					}
				} else {
					assembler.name(&mut rng, batch, request.include_surname, &mut trace)
				};
				candidates.push((name, trace));
			}

			let outcome = gate.apply(candidates.clone(), count, dims.length, |(name, _)| name.as_str());
			kept = outcome.kept;
			if kept.len() >= count {
				break;
			}
			log::debug!("wave {wave} kept {} of {count}", kept.len());
		}

		if kept.len() < count {
			log::warn!("quality gate kept {} of {count} requested names", kept.len());
		}

		let (names, traces): (Vec<String>, Vec<GenerationTrace>) = kept.into_iter().unzip();
		GenerationOutput {
			names,
			traces: request.with_trace.then_some(traces),
		}
	}

	/// Draws up to `count` distinct names from the curated corpus alone.
	pub fn select_curated(&self, dims: &Dimensions, count: usize, seed: Option<&str>) -> Vec<String> {
		let mut rng = NameRng::for_seed(seed);
		selector::select(&mut rng, corpus(), dims, count)
			.into_iter()
			.map(|entry| entry.name.clone())
			.collect()
	}
}
