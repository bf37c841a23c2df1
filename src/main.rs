use eduerp_portal::{
    AppState, SessionStore,
    auth::MockAuthenticator,
    config::{AppConfig, Env},
    create_router,
    repository::{DirectoryState, SeedDirectory},
    vault::{FileSessionVault, VaultState},
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// The asynchronous entry point for the application, responsible for
/// initializing all core components: Configuration, Logging, the Directory,
/// the Session Store (including its one-shot startup load), and the HTTP
/// server.
#[tokio::main]
async fn main() {
    // 1. Configuration & Environment Loading (Fail-Fast)
    // Loads .env file settings before configuration can be read.
    dotenv::dotenv().ok();
    // AppConfig::load() implements the fail-fast principle for missing Production settings.
    let config = AppConfig::load();

    // 2. Logging Filter Setup
    // Prioritizes RUST_LOG, falling back to sensible defaults for local development.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "eduerp_portal=debug,tower_http=info,axum=trace".into());

    // 3. Initialize Logging based on Environment
    // The structured logging format is dynamically selected based on APP_ENV.
    match config.env {
        Env::Local => {
            // LOCAL: Pretty print output for human readability during debugging.
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            // PROD: JSON format output for ingestion by centralized log aggregators.
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Application starting in {:?} mode", config.env);

    // 4. Directory Initialization (seed-backed identity and record provider)
    let directory = Arc::new(SeedDirectory::new()) as DirectoryState;

    // 5. Session Layer Initialization
    // The vault is the durable single-slot session storage; the mock
    // authenticator reproduces the source's fixed login delay.
    let vault = Arc::new(FileSessionVault::new(&config.session_dir)) as VaultState;
    let authenticator = Arc::new(MockAuthenticator::new(
        directory.clone(),
        Duration::from_millis(config.login_delay_ms),
    ));
    let sessions = Arc::new(SessionStore::new(vault, authenticator));

    // Startup load: transitions the store out of Unknown exactly once. Doing
    // this before binding means no request ever observes the loading state in
    // normal operation.
    sessions.initialize().await;

    // 6. Unified State Assembly
    let app_state = AppState {
        sessions,
        directory,
        config: config.clone(),
    };

    // 7. Router and Server Startup
    let app = create_router(app_state);

    // Binds the TCP listener and initiates the HTTP server.
    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .expect("FATAL: failed to bind listener");

    tracing::info!("HTTP server bound successfully.");
    tracing::info!("Listening on {}", config.bind_addr);
    tracing::info!("API Documentation (Swagger UI) available at: /swagger-ui");

    // The long-running Axum server process.
    axum::serve(listener, app).await.expect("server error");
}
