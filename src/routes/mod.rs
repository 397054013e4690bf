// Route exports
pub mod menus;
pub mod preferences;
pub mod suggestions;

use actix_web::{error, web, HttpRequest, HttpResponse, Responder};
use crate::config::LandingSettings;
use crate::models::{ErrorResponse, HealthResponse};
use crate::services::{MenuCatalog, SessionManager};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionManager,
    pub catalog: Arc<MenuCatalog>,
    pub landing: LandingSettings,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
        .app_data(web::PathConfig::default().error_handler(handle_path_error))
        .service(
            web::scope("/api/v1")
                .route("/health", web::get().to(health_check))
                .configure(preferences::configure)
                .configure(suggestions::configure)
                .configure(menus::configure),
        );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    tracing::trace!("Health check with {} open sessions", state.sessions.store().len());

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

fn bad_request(error: &str, message: String) -> actix_web::Error {
    let body = ErrorResponse {
        error: error.to_string(),
        message,
        status_code: 400,
        recovery: None,
    };
    error::InternalError::from_response(body.message.clone(), HttpResponse::BadRequest().json(body)).into()
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    bad_request("invalid_json", format!("Invalid JSON: {}", err))
}

/// Handle path parameter errors
pub fn handle_path_error(err: error::PathError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Path error on {}: {}", req.path(), err);
    bad_request("invalid_path", format!("Invalid path: {}", err))
}
