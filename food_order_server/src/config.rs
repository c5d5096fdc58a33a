use std::env;

use gateway_tools::GatewayConfig;
use log::*;

const DEFAULT_FOG_HOST: &str = "127.0.0.1";
const DEFAULT_FOG_PORT: u16 = 8080;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Payment gateway client configuration
    pub gateway: GatewayConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_FOG_HOST.to_string(),
            port: DEFAULT_FOG_PORT,
            database_url: String::default(),
            gateway: GatewayConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("FOG_HOST").ok().unwrap_or_else(|| DEFAULT_FOG_HOST.into());
        let port = env::var("FOG_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for FOG_PORT. {e} Using the default, {DEFAULT_FOG_PORT}, \
                         instead."
                    );
                    DEFAULT_FOG_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_FOG_PORT);
        let database_url = env::var("FOG_DATABASE_URL").unwrap_or_else(|_| {
            warn!("🪛️ FOG_DATABASE_URL is not set. Using the default, sqlite://data/fog_store.db, instead.");
            "sqlite://data/fog_store.db".to_string()
        });
        let gateway = GatewayConfig::new_from_env_or_default();
        Self { host, port, database_url, gateway }
    }
}
