use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, middleware, put, web};

use pronpass_core::corpus;
use pronpass_core::error::PronpassError;
use pronpass_core::model::build_input::{BuildInput, SeedMode};
use pronpass_core::model::generator::PasswordGenerator;
use serde::Deserialize;

const CORPUS_FOLDER: &str = "./data";

/// Struct representing query parameters for the `/v1/password` endpoint
#[derive(Deserialize)]
struct PasswordParams {
	length: Option<usize>,
	nb_try: Option<usize>,
	sample_limit: Option<usize>,
	seed: Option<String>, // -> "random", "custom:<letter>" or absent
}

#[derive(Deserialize)]
struct NextLettersParams {
	letter: char,
}

#[derive(Deserialize)]
struct CorpusQuery {
	names: Option<String>,
}

struct SharedData {
	generator: PasswordGenerator,
}

impl PasswordParams {
	/// Turns the query into a `BuildInput`, validating the seed strategy.
	fn build_input(&self) -> Result<BuildInput, String> {
		let mut input = BuildInput::default();

		if let Some(length) = self.length {
			input.length = length;
		}
		if let Some(nb_try) = self.nb_try {
			input.nb_try = nb_try;
		}
		if let Some(sample_limit) = self.sample_limit {
			input.set_sample_limit(sample_limit).map_err(|e| e.to_string())?;
		}

		input.seed = match &self.seed {
			None => SeedMode::Random,
			Some(s) if s.to_lowercase() == "random" => SeedMode::Random,
			Some(s) if s.to_lowercase().starts_with("custom:") => {
				let value = &s["custom:".len()..];
				let mut letters = value.chars();
				match (letters.next(), letters.next()) {
					(Some(letter), None) => SeedMode::Custom(letter),
					_ => return Err("Custom seed must be a single character".into()),
				}
			}
			Some(_) => return Err("Seed must be 'random' or 'custom:<letter>'".into()),
		};

		Ok(input)
	}
}

/// Maps a core error to the HTTP status a client can act on.
fn error_response(error: PronpassError) -> HttpResponse {
	match &error {
		PronpassError::KeyNotFound { .. } => HttpResponse::NotFound().body(error.to_string()),
		PronpassError::InvalidLength { .. }
		| PronpassError::InvalidSampleLimit { .. }
		| PronpassError::CorpusAlreadyLoaded { .. } => HttpResponse::BadRequest().body(error.to_string()),
		PronpassError::NoSuccessorAvailable { .. } => HttpResponse::Conflict().body(error.to_string()),
		PronpassError::EmptyModel => HttpResponse::ServiceUnavailable().body(error.to_string()),
		_ => HttpResponse::InternalServerError().body(error.to_string()),
	}
}

/// HTTP GET endpoint `/v1/password`
///
/// Builds one password from the loaded corpora based on query parameters.
/// Returns the password as the response body.
#[get("/v1/password")]
async fn get_password(data: web::Data<Mutex<SharedData>>, query: web::Query<PasswordParams>) -> impl Responder {
	let input = match query.build_input() {
		Ok(input) => input,
		Err(e) => return HttpResponse::BadRequest().body(e),
	};

	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Generator lock failed"),
	};

	match shared_data.generator.generate(&input) {
		Ok(password) => HttpResponse::Ok().body(password),
		Err(e) => error_response(e),
	}
}

/// HTTP GET endpoint `/v1/next_letters`
///
/// Returns the ranked successors of a letter as a string, most likely
/// first. Unknown letters are a 404.
#[get("/v1/next_letters")]
async fn get_next_letters(data: web::Data<Mutex<SharedData>>, query: web::Query<NextLettersParams>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Generator lock failed"),
	};

	match shared_data.generator.ranked_successors(query.letter) {
		Ok(successors) => HttpResponse::Ok().body(successors.iter().collect::<String>()),
		Err(e) => error_response(e),
	}
}

#[get("/v1/corpora")]
async fn get_corpora() -> impl Responder {
	match corpus::list_corpus_files(CORPUS_FOLDER) {
		Ok(files) => HttpResponse::Ok().body(files.join("\n").replace(".csv", "")),
		Err(_) => HttpResponse::InternalServerError().body("Failed to list corpora"),
	}
}

#[get("/v1/loaded_corpora")]
async fn get_loaded_corpora(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Generator lock failed"),
	};
	HttpResponse::Ok().body(shared_data.generator.get_corpus_names().join("\n"))
}

#[put("/v1/load_corpora")]
async fn put_corpora(data: web::Data<Mutex<SharedData>>, query: web::Query<CorpusQuery>) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Generator lock failed"),
	};

	let query_names = match &query.names {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty corpus name"),
	};

	let corpus_names: Vec<&str> = query_names
		.split(',')
		.map(|s| s.trim())
		.filter(|s| !s.is_empty())
		.collect();

	shared_data.generator = PasswordGenerator::default();
	for name in corpus_names {
		let corpus_path = format!("{}/{}.{}", CORPUS_FOLDER, name, corpus::CORPUS_EXTENSION);
		match shared_data.generator.load_corpus(corpus_path) {
			Ok(_) => (),
			Err(e) => return error_response(e),
		}
	}

	HttpResponse::Ok().body("Corpora loaded successfully")
}

/// Main entry point for the server.
///
/// Starts with an empty generator, wraps it in a `Mutex` for thread
/// safety, and starts an Actix-web HTTP server; corpora are loaded on
/// demand through `PUT /v1/load_corpora`.
///
/// # Notes
/// - The server binds to 127.0.0.1:5000.
/// - Currently, the corpus folder is hardcoded and should be made configurable.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();

	let shared_data = SharedData {
		generator: PasswordGenerator::default(),
	};
	let shared_generator = web::Data::new(Mutex::new(shared_data));

	HttpServer::new(move || {
		App::new()
			.app_data(shared_generator.clone())
			.wrap(Cors::permissive())
			.wrap(middleware::Logger::default())
			.service(get_password)
			.service(get_next_letters)
			.service(get_corpora)
			.service(put_corpora)
			.service(get_loaded_corpora)
	})
		.bind(("127.0.0.1", 5000))?
		.run()
		.await
}
