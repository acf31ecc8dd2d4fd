//! External service clients
//!
//! One client per collaborator: [`cc::CcClient`] for the CMDB and
//! [`gse::GseClient`] for the agent-status service. Both speak the common
//! ESB response envelope and share an injected `reqwest::Client` for
//! connection pooling.
//!
//! The [`CmdbApi`] and [`AgentStatusApi`] traits are the override seam:
//! deployments that need a different transport or an in-process fake
//! implement the trait and hand it to the operations in [`crate::host`].

pub mod cc;
pub mod gse;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::components::cc::ExtraParams;
use crate::components::gse::AgentQueryHost;
use crate::error::HostServiceError;

/// ESB response envelope shared by both services
///
/// `result` is the success indicator; `data` carries the payload. Unknown
/// envelope fields are ignored, absent ones take their defaults, so a
/// completely empty body parses as a failure envelope.
#[derive(Deserialize, Debug)]
pub struct ApiResponse<T> {
    /// Success indicator; `false` (or absent) means the call failed upstream
    #[serde(default)]
    pub result: bool,
    /// Service-specific error code, 0 on success
    #[serde(default)]
    pub code: i64,
    /// Human-readable status message
    #[serde(default)]
    pub message: String,
    /// Payload; may be absent even on success
    #[serde(default)]
    pub data: Option<T>,
}

/// CMDB operations consumed by [`crate::host::get_cc_hosts`]
#[async_trait]
pub trait CmdbApi {
    /// Fetch the raw host records of an application
    ///
    /// Returns the full envelope; interpreting the `result` flag is the
    /// caller's responsibility.
    async fn get_app_hosts(
        &self,
        username: &str,
        app_id: &str,
        extra: &ExtraParams,
    ) -> Result<ApiResponse<Vec<Value>>, HostServiceError>;
}

/// Agent-status operations consumed by [`crate::host::get_agent_status`]
#[async_trait]
pub trait AgentStatusApi {
    /// Query agent liveness for a flattened list of host descriptors
    ///
    /// Returns the payload records directly; a failure envelope is an error.
    async fn get_agent_status(
        &self,
        username: &str,
        hosts: &[AgentQueryHost],
    ) -> Result<Vec<Value>, HostServiceError>;
}
