//! CMDB ("cc") client
//!
//! Direct HTTP client for the configuration-management database behind the
//! ESB gateway. The only operation used by this crate is the application
//! host listing.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::components::{ApiResponse, CmdbApi};
use crate::config::Config;
use crate::error::HostServiceError;

const GET_APP_HOST_LIST_PATH: &str = "/api/c/compapi/v2/cc/get_app_host_list/";

/// Optional parameters forwarded with a host query
///
/// Replaces an open-ended key/value bag with enumerated keys. Everything
/// here is pass-through for the CMDB; nothing in this crate consumes it.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtraParams {
    /// Resource-pool scope for the query, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_pool: Option<String>,
}

#[derive(Serialize, Debug)]
struct GetAppHostsRequest<'a> {
    bk_app_code: &'a str,
    bk_app_secret: &'a str,
    bk_username: &'a str,
    app_id: &'a str,
    #[serde(flatten)]
    extra: &'a ExtraParams,
}

/// HTTP client for the CMDB
#[derive(Debug, Clone)]
pub struct CcClient {
    client: reqwest::Client,
    base_url: String,
    app_code: String,
    app_secret: String,
}

impl CcClient {
    /// Create a client for the given base URL and credentials
    ///
    /// The `reqwest::Client` is shared so connections are pooled across
    /// service clients.
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
            config.cc.base_url.clone(),
            config.auth.app_code.clone(),
            config.auth.app_secret.clone(),
        )
    }
}

#[async_trait]
impl CmdbApi for CcClient {
    async fn get_app_hosts(
        &self,
        username: &str,
        app_id: &str,
        extra: &ExtraParams,
    ) -> Result<ApiResponse<Vec<Value>>, HostServiceError> {
        let url = format!("{}{}", self.base_url, GET_APP_HOST_LIST_PATH);
        let request_body = GetAppHostsRequest {
            bk_app_code: &self.app_code,
            bk_app_secret: &self.app_secret,
            bk_username: username,
            app_id,
            extra,
        };

        tracing::debug!(
            url = %url,
            app_id = %app_id,
            username = %username,
            "Querying CMDB for application hosts"
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
                "CMDB returned error status"
            );

            return Err(HostServiceError::InvalidResponse(format!(
                "CMDB returned error status {status_code}: {error_body}"
            )));
        }

        let response_body = response.text().await?;
        let parsed: ApiResponse<Vec<Value>> =
            serde_json::from_str(&response_body).map_err(|e| {
                HostServiceError::InvalidResponse(format!(
                    "Failed to parse CMDB response: {e} - Response body: {response_body}"
                ))
            })?;

        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serial_test::serial;

    #[tokio::test]
    #[serial]
    async fn test_get_app_hosts_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", GET_APP_HOST_LIST_PATH)
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "bk_app_code": "demo",
                "bk_username": "admin",
                "app_id": "100"
            })))
            .with_status(200)
            .with_body(
                r#"{
                    "result": true,
                    "code": 0,
                    "message": "success",
                    "data": [{"inner_ip": "10.0.0.1", "bk_host_name": "host-1"}]
                }"#,
            )
            .create_async()
            .await;

        let cc = CcClient::new(reqwest::Client::new(), server.url(), "demo", "secret");
        let resp = cc
            .get_app_hosts("admin", "100", &ExtraParams::default())
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(resp.result);
        let data = resp.data.unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["inner_ip"], "10.0.0.1");
    }

    #[tokio::test]
    #[serial]
    async fn test_get_app_hosts_forwards_resource_pool() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", GET_APP_HOST_LIST_PATH)
            .match_body(Matcher::PartialJson(serde_json::json!({
                "resource_pool": "default"
            })))
            .with_status(200)
            .with_body(r#"{"result": true, "data": []}"#)
            .create_async()
            .await;

        let cc = CcClient::new(reqwest::Client::new(), server.url(), "demo", "secret");
        let extra = ExtraParams {
            resource_pool: Some("default".to_string()),
        };
        let resp = cc.get_app_hosts("admin", "100", &extra).await.unwrap();

        mock.assert_async().await;
        assert!(resp.result);
    }

    #[tokio::test]
    #[serial]
    async fn test_get_app_hosts_failure_envelope_is_returned_unchanged() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", GET_APP_HOST_LIST_PATH)
            .with_status(200)
            .with_body(r#"{"result": false, "code": 1306000, "message": "app not found"}"#)
            .create_async()
            .await;

        let cc = CcClient::new(reqwest::Client::new(), server.url(), "demo", "secret");
        let resp = cc
            .get_app_hosts("admin", "100", &ExtraParams::default())
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(!resp.result);
        assert_eq!(resp.code, 1306000);
        assert!(resp.data.is_none());
    }

    #[tokio::test]
    #[serial]
    async fn test_get_app_hosts_http_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", GET_APP_HOST_LIST_PATH)
            .with_status(502)
            .with_body("Bad Gateway")
            .create_async()
            .await;

        let cc = CcClient::new(reqwest::Client::new(), server.url(), "demo", "secret");
        let result = cc
            .get_app_hosts("admin", "100", &ExtraParams::default())
            .await;

        mock.assert_async().await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("502"));
    }

    #[tokio::test]
    #[serial]
    async fn test_get_app_hosts_invalid_json() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", GET_APP_HOST_LIST_PATH)
            .with_status(200)
            .with_body("This is not JSON")
            .create_async()
            .await;

        let cc = CcClient::new(reqwest::Client::new(), server.url(), "demo", "secret");
        let result = cc
            .get_app_hosts("admin", "100", &ExtraParams::default())
            .await;

        mock.assert_async().await;
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Failed to parse CMDB response"));
    }
}
