use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use ramen_swipe::config::Settings;
use ramen_swipe::core::{ImageNormalizer, RecommendationClient};
use ramen_swipe::routes::{self, AppState};
use ramen_swipe::services::{MenuApiClient, MenuCatalog, SessionManager, SessionStore};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    // Initialize logging; RUST_LOG overrides the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Ramen Swipe service...");

    let images = ImageNormalizer::new(settings.images.base_url.clone());

    let api = Arc::new(
        MenuApiClient::new(settings.api.base_url.clone(), settings.api.timeout(), images).unwrap_or_else(|e| {
            error!("Failed to create menu API client: {}", e);
            panic!("HTTP client error: {}", e);
        }),
    );

    info!("Menu API client initialized ({}, timeout {:?})", settings.api.base_url, settings.api.timeout());

    if settings.deck.fallback.is_empty() {
        info!("No fallback deck configured");
    } else {
        info!("Fallback deck configured with {} menus", settings.deck.fallback.len());
    }

    let catalog = Arc::new(MenuCatalog::new(api.clone(), settings.deck.fallback.clone()));
    let recommender = RecommendationClient::new(api);

    let store = SessionStore::new(settings.session.max_sessions, settings.session.ttl());

    info!(
        "Session store initialized (max: {}, TTL: {}s)",
        settings.session.max_sessions, settings.session.ttl_secs
    );

    let sessions = SessionManager::new(
        store,
        catalog.clone(),
        recommender,
        settings.deck.transition(),
        settings.landing.suggestions_path.clone(),
    );

    let app_state = AppState {
        sessions,
        catalog,
        landing: settings.landing.clone(),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
