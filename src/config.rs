use std::env;
use std::path::PathBuf;

/// AppConfig
///
/// Holds the application's entire configuration state. This struct is designed to be
/// immutable once loaded, ensuring consistency across all threads and services
/// (Session Store, Authenticator, Directory). It is pulled into the application state
/// via FromRef, embodying the "immutable AppConfig" part of the Unified State Pattern.
#[derive(Clone)]
pub struct AppConfig {
    // Address the HTTP server binds to.
    pub bind_addr: String,
    // Directory holding the persisted session record (the durable "browser storage").
    pub session_dir: PathBuf,
    // Fixed delay applied by the mock authenticator to simulate the login network call.
    pub login_delay_ms: u64,
    // Runtime environment marker. Controls log formatting and startup strictness.
    pub env: Env,
}

/// Env
///
/// Defines the runtime context, used to switch between development conveniences
/// (pretty logs, implicit session directory) and production-grade behaviour
/// (JSON logs, explicit configuration).
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// default
    ///
    /// Provides a safe, non-panicking AppConfig instance primarily used for test setup.
    /// This allows us to instantiate the configuration without needing to set environment
    /// variables for lightweight unit or integration testing state scaffolding.
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:0".to_string(),
            session_dir: PathBuf::from("./target/eduerp-test-data"),
            // Zero delay keeps test logins instantaneous.
            login_delay_ms: 0,
            env: Env::Local,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// The canonical function for initializing the application configuration at startup.
    /// It reads all parameters from environment variables and implements the **fail-fast**
    /// principle.
    ///
    /// # Panics
    /// Panics if a critical environment variable required for the current runtime
    /// environment (especially Production) is not found. This prevents the application
    /// from starting with an incomplete configuration.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        // Session Directory Resolution
        // Production must state explicitly where the durable session record lives.
        let session_dir = match env {
            Env::Production => PathBuf::from(
                env::var("SESSION_DIR").expect("FATAL: SESSION_DIR must be set in production."),
            ),
            // In local, default next to the binary for zero-setup development.
            Env::Local => env::var("SESSION_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
        };

        // The source front-end simulated its login round-trip with a 1000ms timeout;
        // the mock authenticator reproduces that by default.
        let login_delay_ms = env::var("LOGIN_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1000);

        Self {
            bind_addr,
            session_dir,
            login_delay_ms,
            env,
        }
    }
}
