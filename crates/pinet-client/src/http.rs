//! HTTP client for the PiNet API

use std::fmt;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde_json::Value;

use crate::error::{ClientError, Result};
use crate::types::{
    HealthStatus, PingAndWakeResult, PingResult, ResponseBody, WakeOnLanResult, WolRequest,
};

/// Header carrying the shared API key
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Characters that would end the path segment holding an IP address
const PATH_RESERVED: [char; 3] = ['/', '?', '#'];

/// Per-request timeout used unless overridden
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Whether a request carries the API key header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    /// Attach `X-API-Key`
    Required,
    /// Send the request without credentials
    Anonymous,
}

/// Client for a PiNet API instance
///
/// Owns a single reusable HTTP session. The session is released by
/// [`close`](Self::close) or when the client is dropped, whichever comes
/// first.
pub struct PiNetClient {
    session: Option<Client>,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl PiNetClient {
    /// Create a new client
    ///
    /// Trailing slashes are stripped from `base_url`.
    ///
    /// # Errors
    /// Returns [`ClientError::Network`] if the HTTP session cannot be built.
    ///
    /// # Example
    /// ```no_run
    /// use pinet_client::PiNetClient;
    ///
    /// let client = PiNetClient::new("http://192.168.1.50:5000", "your_api_key")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(base_url: impl AsRef<str>, api_key: impl Into<String>) -> Result<Self> {
        let session = Client::builder()
            .build()
            .map_err(|e| ClientError::Network(format!("Network error: {e}")))?;
        Ok(Self::with_client(base_url, api_key, session))
    }

    /// Create a new client with a custom `reqwest::Client`
    pub fn with_client(
        base_url: impl AsRef<str>,
        api_key: impl Into<String>,
        session: Client,
    ) -> Self {
        Self {
            session: Some(session),
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the per-request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL with trailing slashes removed
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether [`close`](Self::close) has been called
    pub fn is_closed(&self) -> bool {
        self.session.is_none()
    }

    /// Release the underlying HTTP session
    ///
    /// Calling this more than once is a no-op. Requests issued afterwards
    /// fail with [`ClientError::Network`].
    pub fn close(&mut self) {
        if self.session.take().is_some() {
            tracing::debug!(base_url = %self.base_url, "closed PiNet session");
        }
    }

    /// Build a full URL from a path
    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn session(&self) -> Result<&Client> {
        self.session
            .as_ref()
            .ok_or_else(|| ClientError::Network("client session is closed".to_string()))
    }

    /// Perform a GET request and decode the response object
    async fn get(&self, path: &str, auth: Auth) -> Result<ResponseBody> {
        let request = self.session()?.get(self.url(path));
        self.send(request, auth).await
    }

    /// Perform a POST request with JSON body and decode the response object
    async fn post(&self, path: &str, body: &impl Serialize, auth: Auth) -> Result<ResponseBody> {
        let request = self.session()?.post(self.url(path)).json(body);
        self.send(request, auth).await
    }

    async fn send(&self, request: RequestBuilder, auth: Auth) -> Result<ResponseBody> {
        let request = match auth {
            Auth::Required => request.header(API_KEY_HEADER, &self.api_key),
            Auth::Anonymous => request,
        };

        let response = request
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        tracing::debug!(url = %response.url(), status = status.as_u16(), "PiNet response");

        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(&e))?;

        decode_response(status, &body)
    }

    /// Translate a `reqwest` failure into [`ClientError::Network`]
    fn transport_error(&self, err: &reqwest::Error) -> ClientError {
        tracing::debug!(error = %err, "PiNet request failed");
        if err.is_timeout() {
            ClientError::Network(format!("Request timeout after {:?}", self.timeout))
        } else if err.is_connect() {
            ClientError::Network(format!("Failed to connect to {}", self.base_url))
        } else {
            ClientError::Network(format!("Network error: {}", error_chain(err)))
        }
    }

    /// Check whether the PiNet service is running
    ///
    /// This is the only call sent without the API key.
    ///
    /// # Errors
    /// Returns an error if the request fails or the API returns an error.
    ///
    /// # Example
    /// ```no_run
    /// # use pinet_client::PiNetClient;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = PiNetClient::new("http://192.168.1.50:5000", "api_key")?;
    /// let health = client.check_health().await?;
    /// println!("Service: {}, Running: {}", health.service, health.is_running);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn check_health(&self) -> Result<HealthStatus> {
        let body = self.get("/", Auth::Anonymous).await?;
        Ok(HealthStatus::from_body(&body))
    }

    /// Ask the API whether a host answers ping
    ///
    /// The address is placed in the request path as given. Addresses
    /// containing `/`, `?` or `#` would change the request target and are
    /// rejected with [`ClientError::Validation`] before anything is sent.
    ///
    /// # Errors
    /// Returns an error if the address is rejected, the request fails or the
    /// API returns an error.
    ///
    /// # Example
    /// ```no_run
    /// # use pinet_client::PiNetClient;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = PiNetClient::new("http://192.168.1.50:5000", "api_key")?;
    /// let result = client.is_host_online("8.8.8.8").await?;
    /// if result.is_online {
    ///     println!("{} is online", result.ip_address);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn is_host_online(&self, ip_address: &str) -> Result<PingResult> {
        if let Some(c) = ip_address.chars().find(|c| PATH_RESERVED.contains(c)) {
            return Err(ClientError::Validation(format!(
                "Invalid IP address {ip_address:?}: contains {c:?}"
            )));
        }

        let body = self
            .get(&format!("/ping/{ip_address}"), Auth::Required)
            .await?;
        Ok(PingResult::from_body(&body, ip_address))
    }

    /// Send a Wake-on-LAN magic packet through the API
    ///
    /// # Errors
    /// Returns an error if the request fails or the API returns an error.
    ///
    /// # Example
    /// ```no_run
    /// # use pinet_client::PiNetClient;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = PiNetClient::new("http://192.168.1.50:5000", "api_key")?;
    /// let result = client.wake_host("AA:BB:CC:DD:EE:FF").await?;
    /// println!("WoL sent: {}", result.success);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn wake_host(&self, mac_address: &str) -> Result<WakeOnLanResult> {
        let request = WolRequest {
            mac_address: mac_address.to_string(),
        };
        let body = self.post("/wol", &request, Auth::Required).await?;
        Ok(WakeOnLanResult::from_body(&body, mac_address))
    }

    /// Ping a host and wake it if it is offline
    ///
    /// The two calls are independent: a host may come online between them.
    ///
    /// # Errors
    /// Returns the first error raised by either call.
    pub async fn ping_and_wake(
        &self,
        ip_address: &str,
        mac_address: &str,
        wake_if_offline: bool,
    ) -> Result<PingAndWakeResult> {
        let ping = self.is_host_online(ip_address).await?;

        let wol_result = if !ping.is_online && wake_if_offline {
            Some(self.wake_host(mac_address).await?)
        } else {
            None
        };

        Ok(PingAndWakeResult {
            ip_address: ip_address.to_string(),
            was_online: ping.is_online,
            wol_sent: wol_result.is_some(),
            wol_result,
        })
    }
}

impl Drop for PiNetClient {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for PiNetClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PiNetClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Map a response status and body onto a decoded object or a typed error
fn decode_response(status: StatusCode, body: &[u8]) -> Result<ResponseBody> {
    if status == StatusCode::UNAUTHORIZED {
        return Err(ClientError::Authentication(
            "Invalid or missing API key".to_string(),
        ));
    }

    if status == StatusCode::BAD_REQUEST {
        let message = error_message(body).unwrap_or_else(|| "Validation error".to_string());
        return Err(ClientError::Validation(message));
    }

    if status.is_client_error() || status.is_server_error() {
        let message = error_message(body).unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
        return Err(ClientError::Api(format!("API error: {message}")));
    }

    match serde_json::from_slice(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ClientError::Api(
            "Invalid JSON response: expected a JSON object".to_string(),
        )),
        Err(e) => Err(ClientError::Api(format!("Invalid JSON response: {e}"))),
    }
}

/// Display an error followed by each of its sources
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// `message` field of a JSON error body
fn error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value.get("message")?.as_str().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> PiNetClient {
        PiNetClient::new(base_url, "secret").unwrap()
    }

    #[test]
    fn test_trailing_slash_stripped() {
        let client = client("http://192.168.1.50:5000/");
        assert_eq!(client.base_url(), "http://192.168.1.50:5000");
        assert_eq!(client.url("/wol"), "http://192.168.1.50:5000/wol");
    }

    #[test]
    fn test_repeated_trailing_slashes_stripped() {
        let client = client("http://192.168.1.50:5000///");
        assert_eq!(client.url("/ping/8.8.8.8"), "http://192.168.1.50:5000/ping/8.8.8.8");
    }

    #[test]
    fn test_default_timeout() {
        let client = client("http://localhost:5000");
        assert_eq!(client.timeout(), Duration::from_secs(10));
        let client = client.with_timeout(Duration::from_secs(3));
        assert_eq!(client.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let client = client("http://localhost:5000");
        let debug = format!("{client:?}");
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut client = client("http://localhost:5000");
        client.close();
        client.close();
        assert!(client.is_closed());
        assert!(matches!(client.session(), Err(ClientError::Network(_))));
    }

    #[test]
    fn test_unauthorized() {
        let err = decode_response(StatusCode::UNAUTHORIZED, b"{}").unwrap_err();
        assert_eq!(
            err,
            ClientError::Authentication("Invalid or missing API key".into())
        );
    }

    #[test]
    fn test_bad_request_uses_server_message() {
        let err = decode_response(StatusCode::BAD_REQUEST, br#"{"message": "bad mac"}"#)
            .unwrap_err();
        assert_eq!(err, ClientError::Validation("bad mac".into()));
    }

    #[test]
    fn test_bad_request_fallback() {
        let err = decode_response(StatusCode::BAD_REQUEST, b"<html>").unwrap_err();
        assert_eq!(err, ClientError::Validation("Validation error".into()));

        let err = decode_response(StatusCode::BAD_REQUEST, b"{}").unwrap_err();
        assert_eq!(err, ClientError::Validation("Validation error".into()));
    }

    #[test]
    fn test_other_error_status() {
        let err = decode_response(StatusCode::INTERNAL_SERVER_ERROR, br#"{"message": "boom"}"#)
            .unwrap_err();
        assert_eq!(err, ClientError::Api("API error: boom".into()));

        let err = decode_response(StatusCode::NOT_FOUND, b"").unwrap_err();
        assert_eq!(err, ClientError::Api("API error: HTTP 404".into()));
    }

    #[test]
    fn test_invalid_json_on_success() {
        let err = decode_response(StatusCode::OK, b"not json").unwrap_err();
        assert!(matches!(err, ClientError::Api(ref m) if m.starts_with("Invalid JSON response")));

        let err = decode_response(StatusCode::OK, b"[1, 2]").unwrap_err();
        assert!(matches!(err, ClientError::Api(_)));
    }

    #[derive(thiserror::Error, Debug)]
    #[error("builder error")]
    struct Outer(#[source] Inner);

    #[derive(thiserror::Error, Debug)]
    #[error("failed to parse header value")]
    struct Inner;

    #[test]
    fn test_error_chain_includes_sources() {
        assert_eq!(
            error_chain(&Outer(Inner)),
            "builder error: failed to parse header value"
        );
        assert_eq!(error_chain(&Inner), "failed to parse header value");
    }

    #[test]
    fn test_success_returns_object() {
        let body = decode_response(StatusCode::OK, br#"{"status": "running"}"#).unwrap();
        assert_eq!(body.get("status").and_then(Value::as_str), Some("running"));
    }
}
