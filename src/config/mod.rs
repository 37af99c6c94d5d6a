// Configuration module entry point
// Assembled once at process start, read-only afterwards

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{AuthConfig, Config, LoggingConfig, ServerConfig, StoreConfig};

impl Config {
    /// Load configuration from the default "config.toml" location
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from specified file path (without extension)
    ///
    /// Environment variables override the file: `BOOKING__AUTH__USER_POOL_ID`,
    /// `BOOKING__STORE__TABLES_TABLE`, and so on.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("BOOKING").separator("__"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("auth.user_pool_id", "local-user-pool")?
            .set_default("auth.client_id", "local-client")?
            .set_default("store.tables_table", "Tables")?
            .set_default("store.reservations_table", "Reservations")?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
