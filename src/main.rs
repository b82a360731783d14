//! Waypost server: places-sharing backend.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use waypost_core::config::AppConfig;
use waypost_core::error::AppError;
use waypost_core::traits::Geocoder;

#[tokio::main]
async fn main() {
    let env = std::env::var("WAYPOST_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Waypost v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = waypost_database::DatabasePool::connect(&config.database).await?;
    let db_pool = db.pool().clone();
    waypost_database::migration::run_migrations(&db_pool).await?;

    // ── Step 2: Image store ──────────────────────────────────────
    let images = Arc::new(waypost_storage::ImageStore::new(&config.storage.image_root).await?);
    tracing::info!(root = %images.root().display(), "Image store ready");

    // ── Step 3: Auth system ──────────────────────────────────────
    let password_hasher = Arc::new(waypost_auth::password::PasswordHasher::new(&config.auth)?);
    let jwt_encoder = Arc::new(waypost_auth::jwt::JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(waypost_auth::jwt::JwtDecoder::new(&config.auth));

    // ── Step 4: Geocoder ─────────────────────────────────────────
    let geocoder: Arc<dyn Geocoder> =
        Arc::new(waypost_geocode::GoogleGeocoder::new(&config.geocode)?);

    // ── Step 5: Repositories ─────────────────────────────────────
    let user_repo = Arc::new(waypost_database::repositories::UserRepository::new(
        db_pool.clone(),
    ));
    let place_repo = Arc::new(waypost_database::repositories::PlaceRepository::new(
        db_pool.clone(),
    ));

    // ── Step 6: Services ─────────────────────────────────────────
    let user_service = Arc::new(waypost_service::UserService::new(
        Arc::clone(&user_repo),
        Arc::clone(&password_hasher),
        Arc::clone(&jwt_encoder),
        Arc::clone(&images),
        config.auth.password_min_length,
    ));
    let place_service = Arc::new(waypost_service::PlaceService::new(
        db_pool.clone(),
        Arc::clone(&place_repo),
        Arc::clone(&user_repo),
        Arc::clone(&geocoder),
        Arc::clone(&images),
    ));

    // ── Step 7: HTTP server ──────────────────────────────────────
    let app_state = waypost_api::AppState {
        config: Arc::new(config.clone()),
        db_pool: db_pool.clone(),
        jwt_decoder,
        user_service,
        place_service,
    };

    let app = waypost_api::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Waypost server listening on {}", addr);

    let server = axum::serve(listener, app).with_graceful_shutdown(async {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    db.close().await;
    tracing::info!("Waypost server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
