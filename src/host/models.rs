//! Host data models
//!
//! Typed views over the records the CMDB and GSE exchange. All values are
//! transient, constructed per call and compared by field equality only.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A cloud-region reference attached to a host record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BkCloudInfo {
    /// Cloud-region identifier
    #[serde(default)]
    pub id: i64,
}

/// A host as returned by the CMDB
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostData {
    /// Inner IP; comma-separated when the host has multiple NICs
    #[serde(default)]
    pub inner_ip: String,
    /// Cloud regions the host belongs to; may be empty
    #[serde(default)]
    pub bk_cloud_id_list: Vec<BkCloudInfo>,
}

impl HostData {
    /// Split `inner_ip` into individual IPs
    ///
    /// Multi-NIC hosts carry a comma-joined IP list and each entry must be
    /// queried separately. Recomputed on every access, never stored.
    /// Splitting an empty string yields one empty element; downstream
    /// consumers depend on that shape.
    pub fn inner_ip_list(&self) -> Vec<String> {
        self.inner_ip.split(',').map(str::to_string).collect()
    }

    /// Cloud-region id: first entry of `bk_cloud_id_list`, or 0 if empty
    pub fn cloud_id(&self) -> i64 {
        self.bk_cloud_id_list.first().map_or(0, |info| info.id)
    }
}

/// One host's agent liveness, normalized from a raw GSE record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostAgentData {
    /// Host IP
    #[serde(default)]
    pub ip: String,
    /// Cloud-region id, 0 when unset
    #[serde(default)]
    pub bk_cloud_id: i64,
    /// Liveness flag, 1 = alive
    #[serde(default = "default_agent_alive")]
    pub bk_agent_alive: i64,
}

fn default_agent_alive() -> i64 {
    1
}

impl Default for HostAgentData {
    fn default() -> Self {
        Self {
            ip: String::new(),
            bk_cloud_id: 0,
            bk_agent_alive: default_agent_alive(),
        }
    }
}

impl HostAgentData {
    /// Build from an arbitrary JSON mapping, keeping recognized fields only
    ///
    /// Unknown keys are dropped, missing or mistyped ones take the declared
    /// defaults (`ip = ""`, `bk_cloud_id = 0`, `bk_agent_alive = 1`).
    pub fn from_value(value: &Value) -> Self {
        Self {
            ip: value
                .get("ip")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            bk_cloud_id: value
                .get("bk_cloud_id")
                .and_then(Value::as_i64)
                .unwrap_or(0),
            bk_agent_alive: value
                .get("bk_agent_alive")
                .and_then(Value::as_i64)
                .unwrap_or_else(default_agent_alive),
        }
    }
}
