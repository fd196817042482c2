//! Service configuration and defaults

/// Upstream API base used when none is configured
pub const DEFAULT_API_BASE: &str = "https://api.daily.co/v1";

/// Default room lifetime in seconds
pub const DEFAULT_ROOM_TTL_SECS: i64 = 300;

/// Default meeting-token lifetime in seconds (one day)
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 86_400;

/// Provisioning service configuration
#[derive(Debug, Clone)]
pub struct ProvisionConfig {
    /// Port the HTTP service listens on
    pub port: u16,
    /// Base URL of the upstream rooms API
    pub api_base: String,
    /// Bearer key for the upstream rooms API
    pub api_key: String,
    /// Lifetime applied to rooms created on demand, in seconds
    pub room_ttl_secs: i64,
    /// Lifetime of issued meeting tokens, in seconds
    pub token_ttl_secs: i64,
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: String::new(),
            room_ttl_secs: DEFAULT_ROOM_TTL_SECS,
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
        }
    }
}
