//! Host Service Shim
//!
//! Thin data-access adapters over two external host-management services:
//! the CMDB ("cc") which is the system of record for host/application
//! topology, and GSE which reports per-host agent liveness.
//!
//! The crate exposes two stateless operations in [`host`]:
//! [`host::get_cc_hosts`] and [`host::get_agent_status`]. Both are leaf
//! adapters: one request in, one reshaped response out. Retries, timeouts
//! and authentication details live in the injected clients, not here.

pub mod components;
pub mod config;
pub mod error;
pub mod host;
