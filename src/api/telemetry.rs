use reqwest::Method;

use super::ApiError;

/// Observer handed to `Api`; sees every request outcome.
pub trait ApiTelemetry: Send + Sync {
    fn on_response(&self, method: &Method, url: &str, status: u16);
    fn on_failure(&self, method: &Method, url: &str, error: &ApiError);
}

/// Default observer: one `tracing` event per request.
pub struct TracingTelemetry;

impl ApiTelemetry for TracingTelemetry {
    fn on_response(&self, method: &Method, url: &str, status: u16) {
        tracing::debug!(%method, url, status, "API request completed");
    }

    fn on_failure(&self, method: &Method, url: &str, error: &ApiError) {
        tracing::error!(%method, url, status = ?error.status(), %error, "API request failed");
    }
}
