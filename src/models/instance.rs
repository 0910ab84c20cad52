use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a cloud PC. Entirely backend-owned; the client only
/// observes snapshots and requests transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceStatus {
    Running,
    Stopped,
    Starting,
    Stopping,
}

impl InstanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstanceStatus::Running => "running",
            InstanceStatus::Stopped => "stopped",
            InstanceStatus::Starting => "starting",
            InstanceStatus::Stopping => "stopping",
        }
    }
}

impl fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operating system offered for a cloud PC.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OsKind {
    Windows,
    Linux,
}

impl OsKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OsKind::Windows => "Windows",
            OsKind::Linux => "Linux",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "windows" => Some(OsKind::Windows),
            "linux" => Some(OsKind::Linux),
            _ => None,
        }
    }
}

impl fmt::Display for OsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A provisioned cloud PC as the backend reports it.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    pub id: String,
    pub name: String,
    pub status: InstanceStatus,
    /// CPU core count
    pub cpu: u32,
    /// Memory size in GB
    pub memory: u32,
    /// Storage size in GB
    pub storage: u32,
    pub os: OsKind,
    pub ip: String,
    pub port: u16,
    pub created_at: DateTime<Utc>,
    pub user_id: String,
}

/// Body of the create-instance request.
#[derive(Clone, Debug, Serialize)]
pub struct CreateInstanceRequest {
    pub name: String,
    pub cpu: u32,
    pub memory: u32,
    pub storage: u32,
    pub os: OsKind,
}
