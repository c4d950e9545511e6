//! HTTP transport backed by reqwest.
//!
//! Responsibilities before send: bearer-token attachment from the session
//! store and `page`/`size` to `offset`/`limit` translation. On receive the
//! response is unwrapped to its JSON body; HTTP 401 clears the session and
//! records the requested path as the post-login return target.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Method, StatusCode};
use serde_json::Value;

use super::{translate_pagination, ClientError, ClientResult, Params, Transport};
use crate::config::ClientConfig;
use crate::session::SessionStore;

const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired, please log in again";

/// Transport to the real backend over HTTP.
pub struct HttpTransport {
    base_url: String,
    http: reqwest::Client,
    session: Arc<SessionStore>,
}

impl HttpTransport {
    /// Build a transport from client configuration. The request timeout
    /// applies to the whole call; a stalled request surfaces as
    /// [`ClientError::Timeout`].
    pub fn new(config: &ClientConfig, session: Arc<SessionStore>) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::configuration(format!("failed to build client: {}", e)))?;

        Ok(HttpTransport {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            session,
        })
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        params: Params,
        body: Option<Value>,
    ) -> ClientResult<Value> {
        let mut params = params;
        translate_pagination(&mut params);

        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        let mut request = self.http.request(method, &url);
        if !params.is_empty() {
            request = request.query(&params);
        }
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            // Global session clear; racing duplicate clears are idempotent.
            self.session.expire(path);
            return Err(ClientError::unauthorized(SESSION_EXPIRED_MESSAGE));
        }

        if !status.is_success() {
            let message = server_message(response).await.unwrap_or_else(|| {
                format!("request failed with HTTP {}", status.as_u16())
            });
            warn!("{} failed: {}", path, message);
            return Err(ClientError::transport(message));
        }

        Ok(response.json::<Value>().await?)
    }
}

/// Prefer the server-provided message over the raw transport error text.
async fn server_message(response: reqwest::Response) -> Option<String> {
    let body = response.json::<Value>().await.ok()?;
    body.get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str, params: Params) -> ClientResult<Value> {
        self.request(Method::GET, path, params, None).await
    }

    async fn post(&self, path: &str, body: Value) -> ClientResult<Value> {
        self.request(Method::POST, path, Vec::new(), Some(body)).await
    }

    async fn put(&self, path: &str, body: Value) -> ClientResult<Value> {
        self.request(Method::PUT, path, Vec::new(), Some(body)).await
    }

    async fn patch(&self, path: &str, body: Value) -> ClientResult<Value> {
        self.request(Method::PATCH, path, Vec::new(), Some(body)).await
    }

    async fn delete(&self, path: &str) -> ClientResult<Value> {
        self.request(Method::DELETE, path, Vec::new(), None).await
    }
}
