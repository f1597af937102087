//! Server-side rendered host list page.

use std::any::Any;
use std::sync::Arc;

use askama::Template;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::error::DashboardError;
use crate::hosts::{Host, load_hosts};
use crate::state::AppState;

/// Address pinged on every page load to prove the API key works
const CONNECTIVITY_CHECK_ADDRESS: &str = "8.8.8.8";

/// Host list page template.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    hosts: Vec<Host>,
    error: Option<String>,
}

impl IntoResponse for IndexTemplate {
    fn into_response(self) -> Response {
        match self.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => error_page(&err.to_string()),
        }
    }
}

/// Generic error page template.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    error_message: String,
}

/// `GET /` — validate the API connection, then list the hosts.
///
/// Every failure still renders the page, with an empty host list and a
/// message naming what went wrong.
pub async fn index(State(state): State<Arc<AppState>>) -> IndexTemplate {
    match prepare(&state).await {
        Ok(hosts) => IndexTemplate { hosts, error: None },
        Err(err) => {
            tracing::error!(error = %err, "failed to load dashboard");
            IndexTemplate {
                hosts: Vec::new(),
                error: Some(err.user_message()),
            }
        }
    }
}

async fn prepare(state: &AppState) -> Result<Vec<Host>, DashboardError> {
    let client = state.client()?;
    client.is_host_online(CONNECTIVITY_CHECK_ADDRESS).await?;

    load_hosts(&state.config.dashboard.hosts_file).await
}

/// Render the error page with a `500` status
pub fn error_page(message: &str) -> Response {
    tracing::error!(error = message, "unhandled error");
    let template = ErrorTemplate {
        error_message: message.to_string(),
    };
    match template.render() {
        Ok(html) => (StatusCode::INTERNAL_SERVER_ERROR, Html(html)).into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, message.to_string()).into_response(),
    }
}

/// Turn a handler panic into the error page
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };
    error_page(&message)
}
