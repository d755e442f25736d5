mod config;

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, delete, get, web};
use serde::{Deserialize, Serialize};

use elfname_core::dimensions::{Context, CulturalOrigin, Era, Form, Gender, LengthTier, Nation, Style};
use elfname_core::error::ParseDimensionError;
use elfname_core::phonotactics;
use elfname_core::report::CorpusReport;
use elfname_core::{Dimensions, GenerationRequest, GenerationSession, NameGenerator, Strategy};

use crate::config::ServerConfig;

/// Query parameters of `/v1/generate`. Dimension values use the kebab-case
/// vocabulary listed by `/v1/dimensions`.
#[derive(Deserialize)]
struct GenerateParams {
	count: Option<usize>,
	nation: Option<String>,
	origin: Option<String>,
	era: Option<String>,
	gender: Option<String>,
	context: Option<String>,
	form: Option<String>,
	style: Option<String>,
	length: Option<String>,
	surname: Option<bool>,
	seed: Option<String>,
	strategy: Option<String>,
	trace: Option<bool>,
}

#[derive(Deserialize)]
struct ValidateParams {
	word: Option<String>,
}

#[derive(Serialize)]
struct Verdict {
	ok: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	reason: Option<String>,
}

struct SharedData {
	generator: NameGenerator,
	session: GenerationSession,
	max_count: usize,
}

fn parse<T>(value: &Option<String>) -> Result<Option<T>, ParseDimensionError>
where
	T: FromStr<Err = ParseDimensionError>,
{
	value.as_deref().filter(|s| !s.trim().is_empty()).map(str::parse).transpose()
}

impl GenerateParams {
	fn dimensions(&self) -> Result<Dimensions, ParseDimensionError> {
		Ok(Dimensions {
			nation: parse::<Nation>(&self.nation)?,
			cultural_origin: parse::<CulturalOrigin>(&self.origin)?,
			era: parse::<Era>(&self.era)?,
			gender: parse::<Gender>(&self.gender)?,
			context: parse::<Context>(&self.context)?,
			form: parse::<Form>(&self.form)?,
			style: parse::<Style>(&self.style)?,
			length: parse::<LengthTier>(&self.length)?,
		})
	}

	/// Builds the engine request, capping `count` at `max_count`.
	fn request(&self, max_count: usize) -> Result<GenerationRequest, ParseDimensionError> {
		let mut request = GenerationRequest::new(self.count.unwrap_or(10).min(max_count))
			.dimensions(self.dimensions()?)
			.surname(self.surname.unwrap_or(false))
			.strategy(parse::<Strategy>(&self.strategy)?.unwrap_or_default())
			.trace(self.trace.unwrap_or(false));
		if let Some(seed) = self.seed.as_deref().filter(|s| !s.is_empty()) {
			request = request.seed(seed);
		}
		Ok(request)
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates a batch of names and returns `{ names, traces? }` as JSON.
/// Seeded calls sharing a seed family draw from the same batch memory until
/// the session is cleared.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Session lock failed"),
	};

	let request = match query.request(shared_data.max_count) {
		Ok(r) => r,
		Err(e) => return HttpResponse::BadRequest().body(e.to_string()),
	};

	let SharedData { generator, session, .. } = &mut *shared_data;
	let output = generator.generate(&request, session);
	log::info!("generated {} of {} names", output.names.len(), request.count);
	HttpResponse::Ok().json(output)
}

#[get("/v1/dimensions")]
async fn get_dimensions() -> impl Responder {
	fn values<T: ToString>(all: &[T]) -> Vec<String> {
		all.iter().map(ToString::to_string).collect()
	}

	let mut dimensions: BTreeMap<&str, Vec<String>> = BTreeMap::new();
	dimensions.insert("nation", values(Nation::ALL));
	dimensions.insert("origin", values(CulturalOrigin::ALL));
	dimensions.insert("era", values(Era::ALL));
	dimensions.insert("gender", values(Gender::ALL));
	dimensions.insert("context", values(Context::ALL));
	dimensions.insert("form", values(Form::ALL));
	dimensions.insert("style", values(Style::ALL));
	dimensions.insert("length", values(LengthTier::ALL));
	dimensions.insert("strategy", values(Strategy::ALL));
	HttpResponse::Ok().json(dimensions)
}

#[get("/v1/report")]
async fn get_report() -> impl Responder {
	HttpResponse::Ok().json(CorpusReport::of_corpus())
}

#[get("/v1/validate")]
async fn get_validated(query: web::Query<ValidateParams>) -> impl Responder {
	let word = match &query.word {
		Some(w) if !w.trim().is_empty() => w.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty word"),
	};

	let verdict = match phonotactics::check(word) {
		Ok(()) => Verdict { ok: true, reason: None },
		Err(e) => Verdict {
			ok: false,
			reason: Some(e.to_string()),
		},
	};
	HttpResponse::Ok().json(verdict)
}

#[delete("/v1/session")]
async fn delete_session(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Session lock failed"),
	};
	shared_data.session.clear();
	HttpResponse::Ok().body("Session cleared")
}

/// Main entry point for the server.
///
/// Reads the TOML configuration named by the first argument (default
/// `elfname.toml`), builds the generator, and serves the `/v1` endpoints.
///
/// # Notes
/// - A missing or invalid configuration file falls back to the defaults.
/// - An engine configuration that fails validation aborts startup.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	let path = std::env::args().nth(1).unwrap_or_else(|| "elfname.toml".to_owned());
	let (config, load_error) = match ServerConfig::load(&path) {
		Ok(c) => (c, None),
		Err(e) => (ServerConfig::default(), Some(e)),
	};

	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_level.as_str())).init();
	if let Some(e) = load_error {
		log::warn!("{e}, using default configuration");
	}

	let generator = match NameGenerator::new(config.engine.clone()) {
		Ok(g) => g,
		Err(e) => {
			log::error!("invalid engine configuration: {e}");
			return Err(std::io::Error::other(e.to_string()));
		}
	};
	let shared_data = SharedData {
		session: generator.session(),
		generator,
		max_count: config.max_count,
	};
	let shared_data = web::Data::new(Mutex::new(shared_data));

	log::info!("listening on {}:{}", config.host, config.port);
	HttpServer::new(move || {
		let cors = Cors::default()
			.allow_any_origin()
			.allowed_methods(vec!["GET", "DELETE"])
			.allow_any_header();

		App::new()
			.wrap(cors)
			.app_data(shared_data.clone())
			.service(get_generated)
			.service(get_dimensions)
			.service(get_report)
			.service(get_validated)
			.service(delete_session)
	})
		.bind((config.host.as_str(), config.port))?
		.run()
		.await
}

#[cfg(test)]
mod tests {
	use super::*;

	fn params(query: &str) -> GenerateParams {
		web::Query::<GenerateParams>::from_query(query).unwrap().into_inner()
	}

	#[test]
	fn test_request_from_query() {
		let request = params("count=5&origin=wood-elf&gender=feminine&surname=true&seed=test-1&strategy=blended")
			.request(100)
			.unwrap();
		assert_eq!(request.count, 5);
		assert_eq!(request.dimensions.cultural_origin, Some(CulturalOrigin::WoodElf));
		assert_eq!(request.dimensions.gender, Some(Gender::Feminine));
		assert!(request.include_surname);
		assert_eq!(request.seed.as_deref(), Some("test-1"));
		assert_eq!(request.strategy, Strategy::Blended);
	}

	#[test]
	fn test_count_is_capped() {
		assert_eq!(params("count=5000").request(100).unwrap().count, 100);
		assert_eq!(params("").request(100).unwrap().count, 10);
	}

	#[test]
	fn test_unknown_value_is_rejected() {
		let err = params("era=modern").request(100).unwrap_err();
		assert_eq!(err.dimension, "era");
		assert_eq!(err.value, "modern");
	}
}
