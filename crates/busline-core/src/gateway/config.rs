//! Gateway configuration

/// Base URL used when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";

/// Connection settings for the booking service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Service base URL including the API prefix
    pub base_url: String,

    /// Bearer token sent with every request
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 30,
        }
    }

    /// Set the authentication token; blank tokens are ignored.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
