//! Thin HTTP client for the rental backend.
//!
//! Each entity has its own file with an `impl Api` block mapping one method to
//! one endpoint. Nothing here retries, caches or validates; every failure is
//! handed back to the screen that triggered it.

mod client;
mod error;
mod reservation;
mod telemetry;
mod vehicle;

#[cfg(test)]
pub mod mock;

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, Url};
use serde::{de::DeserializeOwned, Serialize};

pub use error::{user_message, ApiError};
pub use telemetry::{ApiTelemetry, TracingTelemetry};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Shared transport used by the client, vehicle and reservation endpoints.
#[derive(Clone)]
pub struct Api {
    http: reqwest::Client,
    base_url: String,
    telemetry: Arc<dyn ApiTelemetry>,
}

impl Api {
    /// Build a client for `base_url`, which must be an absolute http(s) URL.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let parsed = Url::parse(base_url)
            .map_err(|e| ApiError::Config(format!("invalid base URL `{base_url}`: {e}")))?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::Config(format!("`{base_url}` cannot be used as a base URL")));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            telemetry: Arc::new(TracingTelemetry),
        })
    }

    pub fn with_telemetry(mut self, telemetry: Arc<dyn ApiTelemetry>) -> Self {
        self.telemetry = telemetry;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send the request and turn anything but a 2xx into an `ApiError`.
    async fn execute(&self, method: Method, url: String, request: RequestBuilder) -> Result<Response, ApiError> {
        let result = match request.send().await {
            Ok(response) if response.status().is_success() => {
                self.telemetry.on_response(&method, &url, response.status().as_u16());
                return Ok(response);
            }
            Ok(response) => {
                let status = response.status().as_u16();
                let body = response.text().await.unwrap_or_default();
                ApiError::Http {
                    status,
                    message: backend_message(&body),
                }
            }
            Err(e) if e.is_builder() => ApiError::Config(e.to_string()),
            Err(e) => ApiError::Network {
                url: url.clone(),
                reason: e.to_string(),
            },
        };

        self.telemetry.on_failure(&method, &url, &result);
        Err(result)
    }

    async fn decode<T: DeserializeOwned>(&self, method: Method, url: String, response: Response) -> Result<T, ApiError> {
        response.json::<T>().await.map_err(|e| {
            let error = ApiError::Decode(e.to_string());
            self.telemetry.on_failure(&method, &url, &error);
            error
        })
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        let response = self
            .execute(Method::GET, url.clone(), self.http.get(&url))
            .await?;
        self.decode(Method::GET, url, response).await
    }

    pub(crate) async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let request = self.http.request(method.clone(), &url).json(body);
        let response = self.execute(method.clone(), url.clone(), request).await?;
        self.decode(method, url, response).await
    }

    /// For endpoints whose response body is ignored.
    pub(crate) async fn send_empty(&self, method: Method, path: &str, query: &[(&str, String)]) -> Result<(), ApiError> {
        let url = self.url(path);
        let mut request = self.http.request(method.clone(), &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        self.execute(method, url, request).await?;
        Ok(())
    }
}

/// Pull `message` out of a JSON error body, falling back to the raw text.
fn backend_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => value
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string),
        Err(_) => Some(body.to_string()),
    }
}
