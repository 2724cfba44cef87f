pub mod client;
pub mod error;
pub mod fallback;
pub mod mock;
pub mod normalize;
pub mod provider;
pub mod transport;

#[cfg(test)]
mod test_support;

pub use client::{DashboardClient, ModuleRoute};
pub use error::{NormalizeError, NormalizeResult};
pub use fallback::{EndpointFamily, FallbackState};
pub use normalize::{normalize_financial_payload, normalize_payload, normalize_value, to_canonical_key};
pub use transport::Transport;

use std::time::Duration;

/// Local development backend.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Uniform per-request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(15_000);

/// Configuration for the dashboard backend
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        let base_url = std::env::var("DASHBOARD_API_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout = std::env::var("DASHBOARD_API_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(REQUEST_TIMEOUT);

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }
}

impl ApiConfig {
    /// Load `.env` if present, then read the environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_trims_trailing_slash() {
        let config = ApiConfig::default()
            .with_base_url("http://backend.local:9000/")
            .with_timeout(Duration::from_millis(250));
        assert_eq!(config.base_url, "http://backend.local:9000");
        assert_eq!(config.timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_default_timeout_constant() {
        assert_eq!(REQUEST_TIMEOUT.as_millis(), 15_000);
    }
}
