//! GSE agent-status client
//!
//! Direct HTTP client for the agent-status service behind the ESB gateway.
//! Unlike the CMDB path, a failure envelope here is an error: the caller
//! performs no handling of its own and expects failures to propagate.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::components::{AgentStatusApi, ApiResponse};
use crate::config::Config;
use crate::error::HostServiceError;

const GET_AGENT_STATUS_PATH: &str = "/api/c/compapi/v2/gse/get_agent_status/";

/// One flattened host descriptor in an agent-status query
///
/// The cloud-region id is carried under both `plat_id` and `bk_cloud_id`;
/// the two consumers of this payload use different naming conventions.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AgentQueryHost {
    /// Cloud-region id (legacy key)
    pub plat_id: i64,
    /// Cloud-region id (current key)
    pub bk_cloud_id: i64,
    /// A single IP, never comma-joined
    pub ip: String,
}

#[derive(Serialize, Debug)]
struct GetAgentStatusRequest<'a> {
    bk_app_code: &'a str,
    bk_app_secret: &'a str,
    bk_username: &'a str,
    hosts: &'a [AgentQueryHost],
}

/// HTTP client for the agent-status service
#[derive(Debug, Clone)]
pub struct GseClient {
    client: reqwest::Client,
    base_url: String,
    app_code: String,
    app_secret: String,
}

impl GseClient {
    /// Create a client for the given base URL and credentials
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        app_code: impl Into<String>,
        app_secret: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            app_code: app_code.into(),
            app_secret: app_secret.into(),
        }
    }

    /// Create a client from loaded configuration
    pub fn from_config(client: reqwest::Client, config: &Config) -> Self {
        Self::new(
            client,
            config.gse.base_url.clone(),
            config.auth.app_code.clone(),
            config.auth.app_secret.clone(),
        )
    }
}

#[async_trait]
impl AgentStatusApi for GseClient {
    async fn get_agent_status(
        &self,
        username: &str,
        hosts: &[AgentQueryHost],
    ) -> Result<Vec<Value>, HostServiceError> {
        let url = format!("{}{}", self.base_url, GET_AGENT_STATUS_PATH);
        let request_body = GetAgentStatusRequest {
            bk_app_code: &self.app_code,
            bk_app_secret: &self.app_secret,
            bk_username: username,
            hosts,
        };

        tracing::debug!(
            url = %url,
            username = %username,
            host_count = hosts.len(),
            "Querying GSE for agent status"
        );

        let response = self.client.post(&url).json(&request_body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let status_code = status.as_u16();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());

            tracing::error!(
                status_code = status_code,
                error_body = %error_body,
                "GSE returned error status"
            );

            return Err(HostServiceError::InvalidResponse(format!(
                "GSE returned error status {status_code}: {error_body}"
            )));
        }

        let response_body = response.text().await?;
        let parsed: ApiResponse<Vec<Value>> =
            serde_json::from_str(&response_body).map_err(|e| {
                HostServiceError::InvalidResponse(format!(
                    "Failed to parse GSE response: {e} - Response body: {response_body}"
                ))
            })?;

        if !parsed.result {
            return Err(HostServiceError::Api {
                code: parsed.code,
                message: parsed.message,
            });
        }

        Ok(parsed.data.unwrap_or_default())
    }
}
