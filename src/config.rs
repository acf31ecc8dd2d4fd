//! Service configuration
//!
//! Centralized configuration with environment variable support and
//! sensible defaults. The shim itself is stateless; configuration only
//! describes where the CMDB and GSE endpoints live and which application
//! credentials to present.

use std::env;
use std::time::Duration;

/// Host service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// CMDB endpoint configuration
    pub cc: EndpointConfig,
    /// GSE endpoint configuration
    pub gse: EndpointConfig,
    /// Application credentials presented to both services
    pub auth: AuthConfig,
    /// Timeout applied to the shared HTTP client (in seconds)
    pub request_timeout_secs: u64,
}

/// A single external service endpoint
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    /// Base URL of the service, without a trailing slash
    pub base_url: String,
}

/// Application credentials for the ESB gateway
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Registered application code
    pub app_code: String,
    /// Secret paired with the application code
    pub app_secret: String,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            cc: EndpointConfig {
                base_url: env::var("CC_API_URL")
                    .unwrap_or_else(|_| "http://paas.service.consul".to_string()),
            },
            gse: EndpointConfig {
                base_url: env::var("GSE_API_URL")
                    .unwrap_or_else(|_| "http://paas.service.consul".to_string()),
            },
            auth: AuthConfig {
                app_code: env::var("BK_APP_CODE").unwrap_or_default(),
                app_secret: env::var("BK_APP_SECRET").unwrap_or_default(),
            },
            request_timeout_secs: env::var("HOST_SERVICE_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(30),
        }
    }

    /// Build the shared HTTP client used by both service clients
    ///
    /// Timeouts are enforced here, at the client level; the operations in
    /// [`crate::host`] add none of their own.
    pub fn http_client(&self) -> reqwest::Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(self.request_timeout_secs))
            .build()
    }
}
