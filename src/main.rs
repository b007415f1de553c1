use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use center_finder::config::{LoggingSettings, Settings};
use center_finder::core::CenterFinder;
use center_finder::routes::{self, handle_json_payload_error, handle_query_payload_error, AppState};
use center_finder::services::{load_centers, parse_delimiter, GeocodeCache, Geocoder, NominatimClient};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// LOG_LEVEL and LOG_FORMAT override the configured values
fn init_logging(logging: &LoggingSettings) {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

fn config_error(e: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration before logging so the configured level applies
    let settings = Settings::load().map_err(config_error)?;

    init_logging(&settings.logging);

    info!("Starting Center Finder...");
    info!("Configuration loaded successfully");

    // The dataset must load before any search can run
    let delimiter = parse_delimiter(&settings.dataset.delimiter).map_err(config_error)?;
    let records = load_centers(&settings.dataset.path, delimiter).map_err(|e| {
        error!("Failed to load dataset: {}", e);
        config_error(e)
    })?;
    let finder = CenterFinder::new(records);

    info!("Dataset loaded: {} centers", finder.len());

    let client = NominatimClient::new(
        settings.geocoder.base_url.clone(),
        settings.geocoder.user_agent.clone(),
        Duration::from_secs(settings.geocoder.timeout_secs),
    )
    .map_err(|e| {
        error!("Failed to create geocoder client: {}", e);
        config_error(e)
    })?;
    let cache = GeocodeCache::new(settings.geocoder.cache_capacity, settings.geocoder.cache_ttl_secs);
    let geocoder = Arc::new(Geocoder::new(client, cache));

    info!("Geocoder initialized ({})", settings.geocoder.base_url);

    // Build application state
    let app_state = AppState {
        finder,
        geocoder,
        default_radius_km: settings.search.default_radius_km,
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
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
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
