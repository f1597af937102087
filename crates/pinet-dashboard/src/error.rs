//! Errors raised while preparing the dashboard page

use std::path::PathBuf;

use pinet_client::ClientError;
use thiserror::Error;

/// Everything that can stop the host list from being shown
#[derive(Error, Debug)]
pub enum DashboardError {
    /// API URL or key missing, or still the placeholder
    #[error(
        "PINET_API_URL and PINET_API_KEY must be correctly set in the .env file \
         or as url and key in the [api] section of the config file."
    )]
    NotConfigured,

    /// The PiNet API rejected or failed the connectivity check
    #[error(transparent)]
    Api(#[from] ClientError),

    /// Host list file does not exist
    #[error("hosts file not found: {}", .0.display())]
    HostsFileMissing(PathBuf),

    /// Host list file is valid JSON but not a host list
    #[error("unexpected layout in hosts file {}: {source}", .path.display())]
    HostsFileSchema {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Host list file could not be read
    #[error("failed to read hosts file {}: {source}", .path.display())]
    HostsFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Host list file is not valid JSON
    #[error("invalid JSON in hosts file {}: {source}", .path.display())]
    HostsFileInvalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl DashboardError {
    /// Message shown on the page in place of the host list
    pub fn user_message(&self) -> String {
        match self {
            Self::HostsFileMissing(_) => {
                "Error: The 'data/hosts.json' file is missing.".to_string()
            }
            Self::HostsFileInvalid { .. } => {
                "Error: The 'data/hosts.json' file contains invalid JSON and could not be read."
                    .to_string()
            }
            Self::HostsFileSchema { source, .. } => format!(
                "Error: The 'data/hosts.json' file does not match the expected host list \
                 format. (Details: {source})"
            ),
            Self::Api(err) => format!(
                "Failed to connect to PiNet API. Please check API URL and Key. (Details: {err})"
            ),
            Self::NotConfigured | Self::HostsFileRead { .. } => {
                format!("An unexpected error occurred during setup. (Details: {self})")
            }
        }
    }
}
