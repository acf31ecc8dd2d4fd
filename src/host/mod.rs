//! Host listing and agent-status operations
//!
//! Two independent, stateless leaf adapters: [`get_cc_hosts`] fetches the
//! raw host records of an application from the CMDB, [`get_agent_status`]
//! queries GSE for agent liveness. Neither depends on the other; each makes
//! a single call to its client and reshapes the response.

pub mod models;

use serde_json::Value;

use crate::components::cc::ExtraParams;
use crate::components::gse::AgentQueryHost;
use crate::components::{AgentStatusApi, CmdbApi};
use crate::error::HostServiceError;
use models::{HostAgentData, HostData};

/// Fetch the hosts belonging to an application
///
/// Invokes the CMDB host listing with the requesting user's identity (used
/// downstream for authorization) and returns the raw host records: IP,
/// region, machine room, rack and whatever else the CMDB attaches.
///
/// A failure envelope (`result: false`) is swallowed into an empty list, as
/// is a success envelope without data. Callers cannot distinguish "no
/// hosts" from "request failed" here; that ambiguity is part of the
/// contract. Transport and decode errors still surface as `Err`.
///
/// `extra` carries optional pass-through parameters (resource-pool scoping)
/// and defaults to empty.
pub async fn get_cc_hosts(
    cmdb: &impl CmdbApi,
    cc_app_id: &str,
    username: &str,
    extra: &ExtraParams,
) -> Result<Vec<Value>, HostServiceError> {
    let resp = cmdb.get_app_hosts(username, cc_app_id, extra).await?;
    if !resp.result {
        tracing::warn!(
            app_id = %cc_app_id,
            code = resp.code,
            message = %resp.message,
            "CMDB host query failed, returning no hosts"
        );
        return Ok(Vec::new());
    }
    Ok(resp.data.unwrap_or_default())
}

/// Query agent liveness for a list of hosts
///
/// Each host's comma-joined `inner_ip` is flattened into one descriptor per
/// IP, tagged with the host's cloud-region id (first entry of
/// `bk_cloud_id_list`, or 0). GSE is called once with the full flattened
/// list; each returned record is normalized into a [`HostAgentData`].
///
/// Output order follows the GSE response, not the input; no correlation is
/// performed. Client failures propagate unchanged.
pub async fn get_agent_status(
    gse: &impl AgentStatusApi,
    username: &str,
    host_list: &[HostData],
) -> Result<Vec<HostAgentData>, HostServiceError> {
    let mut hosts = Vec::new();
    for info in host_list {
        let plat_id = info.cloud_id();
        for ip in info.inner_ip_list() {
            hosts.push(AgentQueryHost {
                plat_id,
                bk_cloud_id: plat_id,
                ip,
            });
        }
    }

    let data = gse.get_agent_status(username, &hosts).await?;
    Ok(data.iter().map(HostAgentData::from_value).collect())
}
