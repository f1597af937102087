//! JSON endpoints proxying ping and wake through the PiNet client

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::error::{ApiResponse, AppError};
use crate::state::AppState;

/// Report whether a host answers ping
///
/// # Errors
/// Returns a `500` if the API is unconfigured or the client call fails
pub async fn get_status(
    State(state): State<Arc<AppState>>,
    Path(ip_address): Path<String>,
) -> Result<Json<ApiResponse>, AppError> {
    let client = state.client()?;
    let result = client.is_host_online(&ip_address).await?;

    let status = if result.is_online { "online" } else { "offline" };
    Ok(Json(ApiResponse::status(status)))
}

/// Send a Wake-on-LAN packet to a host
///
/// # Errors
/// Returns a `400` if the API reports the wake as unsuccessful, or a `500`
/// if the API is unconfigured or the client call fails
pub async fn wake(
    State(state): State<Arc<AppState>>,
    Path(mac_address): Path<String>,
) -> Result<Json<ApiResponse>, AppError> {
    let client = state.client()?;
    let result = client.wake_host(&mac_address).await?;

    if result.success {
        tracing::info!(mac_address = %result.mac_address, "wake-on-lan sent");
        Ok(Json(ApiResponse::with_message("success", result.message)))
    } else {
        Err(AppError::bad_request(result.message))
    }
}
