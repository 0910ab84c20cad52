use serde::{Deserialize, Serialize};

/// Point-in-time usage snapshot for a running instance. Percentages are
/// 0..=100, traffic counters are MB as reported by the backend.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceStats {
    pub cpu_usage: f64,
    pub memory_usage: f64,
    pub disk_usage: f64,
    pub network_in: f64,
    pub network_out: f64,
    pub uptime: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_stats_from_backend_json() {
        let json = r#"{
            "cpuUsage": 42.5,
            "memoryUsage": 61.0,
            "diskUsage": 18.2,
            "networkIn": 1024.0,
            "networkOut": 256.5,
            "uptime": "3d 4h 12m"
        }"#;
        let stats: InstanceStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.cpu_usage, 42.5);
        assert_eq!(stats.network_out, 256.5);
        assert_eq!(stats.uptime, "3d 4h 12m");
    }
}
