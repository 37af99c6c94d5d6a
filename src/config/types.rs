// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub auth: AuthConfig,
    pub store: StoreConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    /// Emit the per-request diagnostic record
    pub access_log: bool,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

/// Identity provider configuration
///
/// The user pool and client ids the provider authenticates against.
#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub user_pool_id: String,
    pub client_id: String,
}

/// Document store configuration
///
/// Names of the two collections the handlers read and write.
#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    pub tables_table: String,
    pub reservations_table: String,
}
