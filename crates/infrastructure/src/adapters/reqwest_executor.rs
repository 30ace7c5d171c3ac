//! Live executor using reqwest.
//!
//! This adapter implements the `Executor` port by performing a real network
//! round trip. The response body is read in full before the response is
//! handed to the assertion stage.

use std::time::Duration;

use bytes::Bytes;
use httpx_application::ports::{ExecuteError, Executor};
use httpx_domain::{Request, RequestContext, Response};
use reqwest::Client;

use crate::config::ExecutorConfig;

/// Executor that sends requests over the network.
#[derive(Debug, Clone)]
pub struct ReqwestExecutor {
    client: Client,
    default_timeout: Option<Duration>,
    max_redirects: usize,
}

impl ReqwestExecutor {
    /// Creates an executor with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, ExecuteError> {
        Self::from_config(&ExecutorConfig::default())
    }

    /// Creates an executor from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn from_config(config: &ExecutorConfig) -> Result<Self, ExecuteError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(|e| ExecuteError::Other(e.to_string()))?;

        Ok(Self {
            client,
            default_timeout: config.timeout(),
            max_redirects: config.max_redirects,
        })
    }

    /// Creates an executor around a preconfigured reqwest client.
    ///
    /// `max_redirects` should match the client's redirect policy; it is the
    /// limit reported in [`ExecuteError::TooManyRedirects`].
    #[must_use]
    pub const fn with_client(client: Client, max_redirects: usize) -> Self {
        Self {
            client,
            default_timeout: None,
            max_redirects,
        }
    }

    /// Maps reqwest errors to `ExecuteError`.
    fn map_error(&self, error: &reqwest::Error, timeout_ms: u64) -> ExecuteError {
        if error.is_timeout() {
            return ExecuteError::Timeout { timeout_ms };
        }

        let host = || {
            error
                .url()
                .and_then(|u| u.host_str())
                .unwrap_or("unknown")
                .to_string()
        };

        if error.is_connect() {
            let message = error_chain(error);
            let lower = message.to_lowercase();
            if lower.contains("dns") || lower.contains("resolve") {
                return ExecuteError::DnsError {
                    host: host(),
                    message,
                };
            }
            if lower.contains("refused") {
                return ExecuteError::ConnectionRefused {
                    host: host(),
                    port: error
                        .url()
                        .and_then(reqwest::Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            return ExecuteError::ConnectionFailed(message);
        }

        if error.is_redirect() {
            return ExecuteError::TooManyRedirects {
                max: self.max_redirects,
            };
        }

        if error.is_body() || error.is_decode() {
            return ExecuteError::Body(error_chain(error));
        }

        ExecuteError::Other(error_chain(error))
    }

    async fn send(
        &self,
        request: reqwest::Request,
        timeout_ms: u64,
    ) -> Result<Response, ExecuteError> {
        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| self.map_error(&e, timeout_ms))?;

        let status = response.status();
        let version = response.version();
        let headers = response.headers().clone();

        let body: Bytes = response
            .bytes()
            .await
            .map_err(|e| self.map_error(&e, timeout_ms))?;

        let mut out = Response::new(body);
        *out.status_mut() = status;
        *out.version_mut() = version;
        *out.headers_mut() = headers;
        Ok(out)
    }
}

impl Executor for ReqwestExecutor {
    async fn execute(&self, request: Request) -> Result<Response, ExecuteError> {
        let context = RequestContext::of(&request);
        let timeout = context.timeout().or(self.default_timeout);
        let timeout_ms = timeout.map_or(0, |t| u64::try_from(t.as_millis()).unwrap_or(u64::MAX));

        let mut outbound = reqwest::Request::try_from(request)
            .map_err(|e| ExecuteError::InvalidRequest(error_chain(&e)))?;
        *outbound.timeout_mut() = timeout;

        tracing::debug!(
            method = %outbound.method(),
            url = %outbound.url(),
            timeout_ms,
            "sending live request"
        );

        tokio::select! {
            biased;
            () = context.cancellation().cancelled() => Err(ExecuteError::Cancelled),
            result = self.send(outbound, timeout_ms) => result,
        }
    }
}

/// Renders an error with its sources, which is where reqwest keeps the
/// interesting part ("connection refused", "dns error", ...).
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
