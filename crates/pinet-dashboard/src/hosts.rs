//! Static host list shown on the dashboard

use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::error::Category;

use crate::error::DashboardError;

/// A machine the dashboard can ping and wake
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    /// Display name
    pub name: String,
    /// Address passed to the ping endpoint
    pub ip_address: String,
    /// Hardware address passed to the wake endpoint
    pub mac_address: String,
    /// Free-form note shown under the name
    #[serde(default)]
    pub description: Option<String>,
}

/// On-disk layout of the hosts file
#[derive(Debug, Default, Deserialize)]
struct HostsFile {
    #[serde(default)]
    hosts: Vec<Host>,
}

/// Read the host list from a JSON file
///
/// # Errors
/// Returns an error if the file is missing, unreadable, not valid JSON, or
/// valid JSON that is not a host list.
pub async fn load_hosts(path: &Path) -> Result<Vec<Host>, DashboardError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| match source.kind() {
            ErrorKind::NotFound => DashboardError::HostsFileMissing(path.to_path_buf()),
            _ => DashboardError::HostsFileRead {
                path: path.to_path_buf(),
                source,
            },
        })?;

    let file: HostsFile = serde_json::from_str(&content).map_err(|source| {
        let path = path.to_path_buf();
        match source.classify() {
            Category::Data => DashboardError::HostsFileSchema { path, source },
            _ => DashboardError::HostsFileInvalid { path, source },
        }
    })?;

    Ok(file.hosts)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn hosts_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_load_hosts() {
        let file = hosts_file(
            r#"{
                "hosts": [
                    {"name": "nas", "ip_address": "192.168.1.10", "mac_address": "AA:BB:CC:DD:EE:01"},
                    {"name": "desktop", "ip_address": "192.168.1.20",
                     "mac_address": "AA:BB:CC:DD:EE:02", "description": "Office PC"}
                ]
            }"#,
        );

        let hosts = load_hosts(file.path()).await.unwrap();

        assert_eq!(hosts.len(), 2);
        assert_eq!(hosts[0].name, "nas");
        assert_eq!(hosts[0].description, None);
        assert_eq!(hosts[1].description.as_deref(), Some("Office PC"));
    }

    #[tokio::test]
    async fn test_missing_hosts_key_is_empty() {
        let file = hosts_file("{}");
        let hosts = load_hosts(file.path()).await.unwrap();
        assert!(hosts.is_empty());
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_hosts(&dir.path().join("hosts.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, DashboardError::HostsFileMissing(_)));
    }

    #[tokio::test]
    async fn test_entry_missing_mac_is_schema_error() {
        let file = hosts_file(r#"{"hosts": [{"name": "nas", "ip_address": "192.168.1.10"}]}"#);

        let err = load_hosts(file.path()).await.unwrap_err();

        assert!(matches!(err, DashboardError::HostsFileSchema { .. }));
        assert!(err.user_message().contains("does not match the expected host list format"));
        assert!(!err.user_message().contains("invalid JSON"));
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let file = hosts_file("{ hosts: ");
        let err = load_hosts(file.path()).await.unwrap_err();
        assert!(matches!(err, DashboardError::HostsFileInvalid { .. }));
    }
}
