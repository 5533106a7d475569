//! actix-web surface for the dispatcher.

use actix_web::{
    error::InternalError, get, http::StatusCode, post, web, App, HttpResponse, HttpServer,
    ResponseError,
};
use serde_json::{json, Value};

use crate::{
    config::Config,
    dispatcher::GenerationDispatcher,
    error::AdcraftError,
    logger,
    models::{ErrorResponse, GenerateResponse},
};

/// Prior images travel inline as data URIs, so bodies can be large.
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

impl ResponseError for AdcraftError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(AdcraftError::status_code(self))
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(ResponseError::status_code(self)).json(ErrorResponse::new(self.to_string()))
    }
}

/// The body is taken as raw JSON so the caller check runs before the
/// request is decoded.
#[post("/generate")]
async fn generate(
    dispatcher: web::Data<GenerationDispatcher>,
    body: web::Json<Value>,
) -> Result<HttpResponse, AdcraftError> {
    match dispatcher.dispatch_json(body.into_inner()).await {
        Ok(output) => Ok(HttpResponse::Ok().json(GenerateResponse { output })),
        Err(e) => {
            log::error!("❌ /generate failed ({}): {}", e.status_code(), e);
            Err(e)
        }
    }
}

#[get("/health")]
async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

/// Bodies that fail to decode get the same `{ "error": ... }` envelope.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(MAX_BODY_BYTES)
        .error_handler(|err, _req| {
            let message = err.to_string();
            log::warn!("⚠️  Rejected /generate body: {}", message);
            let response = HttpResponse::InternalServerError().json(ErrorResponse::new(message));
            InternalError::from_response(err, response).into()
        })
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).service(generate).service(health);
}

pub async fn run(config: Config, dispatcher: GenerationDispatcher) -> std::io::Result<()> {
    let (host, port) = config.server.bind_address();
    logger::log_startup_info(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"), &host, port);
    logger::log_config_info(&config);

    let dispatcher = web::Data::new(dispatcher);
    HttpServer::new(move || App::new().app_data(dispatcher.clone()).configure(routes))
        .bind((host, port))?
        .run()
        .await
}
