use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use yansi::Paint;

use crate::config;
use crate::error::ApiError;
use crate::session::SessionStore;

static SILENT: AtomicBool = AtomicBool::new(false);

pub fn set_silent(silent: bool) {
    SILENT.store(silent, Ordering::Relaxed);
}

fn log_output(msg: String) {
    if !SILENT.load(Ordering::Relaxed) {
        println!("{}", msg);
    }
}

/// The single outbound path to the CloudPC backend.
///
/// Every operation goes through one pipeline: the session's bearer token is
/// attached when present, and a 401 response clears the session before the
/// error reaches the caller. The store is injected so hosts (and tests) can
/// supply their own.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    /// Create a client for `base_url` (scheme + host, no `/api` suffix).
    pub fn new(base_url: String, session: Arc<SessionStore>) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(format!("CloudPC/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");
        Self {
            http,
            base_url: config::sanitize_base_url(&base_url),
            session,
        }
    }

    /// The session store this client reads and tears down.
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Echo the outgoing request as a runnable curl line, teacher-style.
    fn log_request(&self, method: &Method, url: &str, token: Option<&str>, body: Option<&Value>) {
        let mut parts = Vec::new();
        parts.push(Paint::new("curl").fg(yansi::Color::Green).bold().to_string());
        parts.push(format!("-X {}", Paint::new(method.as_str()).fg(yansi::Color::Yellow).bold()));
        parts.push(format!("'{}'", Paint::new(url).fg(yansi::Color::Cyan)));

        if let Some(t) = token {
            parts.push(format!(
                "{} {}",
                Paint::new("-H").fg(yansi::Color::Magenta),
                Paint::new(format!("'Authorization: Bearer {}'", t)).fg(yansi::Color::Magenta)
            ));
        }
        if body.is_some() {
            parts.push(format!(
                "{} {}",
                Paint::new("-H").fg(yansi::Color::Magenta),
                Paint::new("'Content-Type: application/json'").fg(yansi::Color::Magenta)
            ));
        }
        if let Some(b) = body {
            let json_str = serde_json::to_string_pretty(b).unwrap_or_default();
            let escaped_json = json_str.replace("'", "'\\''");
            parts.push(format!(
                "{} {}",
                Paint::new("-d").fg(yansi::Color::Blue),
                Paint::new(format!("'{}'", escaped_json)).fg(yansi::Color::White)
            ));
        }
        log_output(format!("Request:\n{}", parts.join(" ")));
    }

    /// Send one request and classify the response.
    ///
    /// The token is read from the session store at send time; a request
    /// already in flight is not affected by a concurrent clear. On 401 the
    /// store is emptied before the error is returned, so the caller still
    /// observes the failure.
    pub(crate) async fn send(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Value>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}{}{}", self.base_url, config::API_PREFIX, endpoint);
        let token = self.session.get();
        self.log_request(&method, &url, token.as_deref(), body.as_ref());

        let mut req = self.http.request(method, &url);
        if let Some(ref t) = token {
            req = req.bearer_auth(t);
        }
        if let Some(ref b) = body {
            req = req.json(b);
        }

        let response = req
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(%url, "Backend answered 401; clearing session");
            if let Err(e) = SessionStore::clear(&self.session) {
                tracing::warn!(%e, "Failed to remove persisted token after 401");
            }
            log_output(format!(
                "Response:\n{}",
                Paint::new("HTTP 401 Unauthorized (session cleared)").fg(yansi::Color::Red)
            ));
            return Err(ApiError::SessionExpired);
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            log_output(format!(
                "Response:\n{}",
                Paint::new(format!("HTTP {}: {}", status, body)).fg(yansi::Color::Red)
            ));
            return Err(ApiError::Http { status, body });
        }

        Ok(response)
    }

    /// Send a request and decode the JSON response body.
    pub(crate) async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        let response = self.send(method, endpoint, body).await?;
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        // Grayed out so responses read as secondary to the curl echo
        log_output(format!(
            "Response:\n{}",
            Paint::new(&text).rgb(100, 100, 100)
        ));

        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Send a request whose success response carries no body of interest.
    pub(crate) async fn request_empty(
        &self,
        method: Method,
        endpoint: &str,
    ) -> Result<(), ApiError> {
        let response = self.send(method, endpoint, None).await?;
        let status = response.status();
        log_output(format!(
            "Response:\n{}",
            Paint::new(format!("HTTP {}", status)).rgb(100, 100, 100)
        ));
        Ok(())
    }
}
