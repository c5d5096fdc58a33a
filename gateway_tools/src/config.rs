use fog_common::Secret;
use log::*;

pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL of the gateway API, without a trailing slash.
    pub base_url: String,
    pub api_key: Secret<String>,
    /// Hard deadline for a single charge request. When it elapses, the charge is treated as not
    /// having happened.
    pub timeout_ms: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self { base_url: String::new(), api_key: Secret::default(), timeout_ms: DEFAULT_TIMEOUT_MS }
    }
}

impl GatewayConfig {
    pub fn new_from_env_or_default() -> Self {
        let base_url = std::env::var("FOG_GATEWAY_URL").unwrap_or_else(|_| {
            warn!("🪛️ FOG_GATEWAY_URL not set, using (probably useless) default");
            "https://gateway.example.com/v1".to_string()
        });
        let api_key = Secret::new(std::env::var("FOG_GATEWAY_API_KEY").unwrap_or_else(|_| {
            warn!("🪛️ FOG_GATEWAY_API_KEY not set, using (probably useless) default");
            "gw_00000000000000".to_string()
        }));
        let timeout_ms = std::env::var("FOG_GATEWAY_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_MS);
        Self { base_url, api_key, timeout_ms }
    }
}
