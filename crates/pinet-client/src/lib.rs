//! pinet-client: HTTP client library for the PiNet network utility API
//!
//! Wraps the three PiNet endpoints (health check, ping, Wake-on-LAN) and maps
//! every failure onto [`ClientError`].
//!
//! # Examples
//!
//! ```no_run
//! use pinet_client::PiNetClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut client = PiNetClient::new("http://192.168.1.50:5000", "your_api_key")?;
//!
//! // Service health (sent without the API key)
//! let health = client.check_health().await?;
//! println!("Service is running: {}", health.is_running);
//!
//! // Host reachability
//! let result = client.is_host_online("8.8.8.8").await?;
//! println!("Host is online: {}", result.is_online);
//!
//! // Wake a host only if it is down
//! let result = client
//!     .ping_and_wake("192.168.1.100", "AA:BB:CC:DD:EE:FF", true)
//!     .await?;
//! println!("WoL sent: {}", result.wol_sent);
//!
//! client.close();
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod http;
pub mod types;

pub use error::{ClientError, Result};
pub use http::{API_KEY_HEADER, DEFAULT_TIMEOUT, PiNetClient};
pub use types::{HealthStatus, PingAndWakeResult, PingResult, WakeOnLanResult, WolRequest};
