//! Request and result types for the PiNet API

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Decoded JSON object returned by a successful request
pub type ResponseBody = Map<String, Value>;

/// Body of `POST /wol`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WolRequest {
    pub mac_address: String,
}

/// Service health reported by `GET /`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub service: String,
    pub status: String,
    pub is_running: bool,
}

impl HealthStatus {
    pub(crate) fn from_body(body: &ResponseBody) -> Self {
        let status = str_field(body, "status");
        Self {
            service: str_field(body, "service").unwrap_or("Unknown").to_string(),
            status: status.unwrap_or("unknown").to_string(),
            is_running: status == Some("running"),
        }
    }
}

/// Reachability of a single host reported by `GET /ping/{ip}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingResult {
    pub ip_address: String,
    pub status: String,
    pub is_online: bool,
}

impl PingResult {
    pub(crate) fn from_body(body: &ResponseBody, ip_address: &str) -> Self {
        let status = str_field(body, "status");
        Self {
            ip_address: str_field(body, "ip_address")
                .unwrap_or(ip_address)
                .to_string(),
            status: status.unwrap_or("unknown").to_string(),
            is_online: status == Some("online"),
        }
    }
}

/// Outcome of a Wake-on-LAN request
///
/// `mac_address` is always the address the caller asked for, never the one
/// the server echoes back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WakeOnLanResult {
    pub success: bool,
    pub message: String,
    pub mac_address: String,
}

impl WakeOnLanResult {
    pub(crate) fn from_body(body: &ResponseBody, mac_address: &str) -> Self {
        Self {
            success: str_field(body, "status") == Some("success"),
            message: str_field(body, "message").unwrap_or_default().to_string(),
            mac_address: mac_address.to_string(),
        }
    }
}

/// Result of [`PiNetClient::ping_and_wake`](crate::PiNetClient::ping_and_wake)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingAndWakeResult {
    pub ip_address: String,
    pub was_online: bool,
    pub wol_sent: bool,
    pub wol_result: Option<WakeOnLanResult>,
}

/// String value of `key`, treating non-string values as absent
fn str_field<'a>(body: &'a ResponseBody, key: &str) -> Option<&'a str> {
    body.get(key).and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn body(value: Value) -> ResponseBody {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn test_health_defaults() {
        let health = HealthStatus::from_body(&ResponseBody::new());
        assert_eq!(health.service, "Unknown");
        assert_eq!(health.status, "unknown");
        assert!(!health.is_running);
    }

    #[test]
    fn test_health_running() {
        let health = HealthStatus::from_body(&body(json!({
            "service": "PiNet",
            "status": "running"
        })));
        assert_eq!(health.service, "PiNet");
        assert!(health.is_running);
    }

    #[test]
    fn test_status_comparison_is_exact() {
        let ping = PingResult::from_body(&body(json!({ "status": "Online" })), "10.0.0.5");
        assert!(!ping.is_online);
        assert_eq!(ping.status, "Online");
    }

    #[test]
    fn test_ping_defaults_to_input_address() {
        let ping = PingResult::from_body(&ResponseBody::new(), "10.0.0.5");
        assert_eq!(ping.ip_address, "10.0.0.5");
        assert_eq!(ping.status, "unknown");
        assert!(!ping.is_online);
    }

    #[test]
    fn test_non_string_status_is_treated_as_missing() {
        let ping = PingResult::from_body(&body(json!({ "status": true })), "10.0.0.5");
        assert_eq!(ping.status, "unknown");
        assert!(!ping.is_online);
    }

    #[test]
    fn test_wake_echoes_requested_mac() {
        let result = WakeOnLanResult::from_body(
            &body(json!({
                "status": "success",
                "mac_address": "00:00:00:00:00:00"
            })),
            "AA:BB:CC:DD:EE:FF",
        );
        assert!(result.success);
        assert_eq!(result.message, "");
        assert_eq!(result.mac_address, "AA:BB:CC:DD:EE:FF");
    }
}
