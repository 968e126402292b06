//! HTTP Client Module - Shared transport for every provider adapter
//!
//! 1. User-Agent header & gzip compression on every request
//! 2. Exponential backoff with ±20% jitter (429 / timeout / connect only)
//! 3. Retries never sleep past the caller's budget
//! 4. HTTP status and JSON-RPC errors mapped to stable `ErrorCode`s
//!
//! Uses constants from utils/constants.rs

use rand::Rng;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_ENCODING, USER_AGENT};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::models::{AnalyzerConfig, AppError, AppResult, ErrorCode};
use crate::utils::constants::{MAX_RETRY_DELAY_MS, RETRY_JITTER_PERCENT, USER_AGENT as USER_AGENT_CONST};

/// Shared HTTP client with retry logic
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    max_retries: u32,
    base_delay: Duration,
}

impl HttpClient {
    pub fn new(config: &AnalyzerConfig) -> AppResult<Self> {
        Ok(Self {
            client: Self::build_client()?,
            max_retries: config.http_max_retries,
            base_delay: config.retry_base_delay,
        })
    }

    /// Build HTTP client with custom headers (gzip compression enabled)
    fn build_client() -> AppResult<reqwest::Client> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_CONST));
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip"));

        reqwest::Client::builder()
            .default_headers(headers)
            .gzip(true)
            .build()
            .map_err(|e| AppError::with_source(ErrorCode::Unknown, "Failed to build HTTP client", e))
    }

    /// GET a JSON document
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        headers: &[(&'static str, &str)],
        budget: Duration,
    ) -> AppResult<T> {
        let deadline = Instant::now() + budget;
        self.with_retry(deadline, |remaining| {
            let mut request = self.client.get(url).timeout(remaining);
            for (name, value) in headers {
                request = request.header(*name, *value);
            }
            async move { Self::read_json::<T>(request.send().await?).await }
        })
        .await
    }

    /// Execute a JSON-RPC call
    pub async fn rpc_call<T: DeserializeOwned>(
        &self,
        url: &str,
        method: &str,
        params: serde_json::Value,
        budget: Duration,
    ) -> AppResult<T> {
        let payload = serde_json::json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": 1
        });

        let deadline = Instant::now() + budget;
        self.with_retry(deadline, |remaining| {
            let request = self.client.post(url).json(&payload).timeout(remaining);
            async move {
                let json: RpcResponse<T> = Self::read_json(request.send().await?).await?;
                if let Some(error) = json.error {
                    return Err(error.into_app_error());
                }
                json.result
                    .ok_or_else(|| AppError::malformed("No result in RPC response"))
            }
        })
        .await
    }

    /// Exponential backoff, bounded by `deadline`
    async fn with_retry<T, F, Fut>(&self, deadline: Instant, mut attempt_fn: F) -> AppResult<T>
    where
        F: FnMut(Duration) -> Fut,
        Fut: std::future::Future<Output = AppResult<T>>,
    {
        let mut attempt = 0u32;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(AppError::timeout("Budget exhausted before request"));
            }

            let err = match attempt_fn(remaining).await {
                Ok(value) => return Ok(value),
                Err(e) => e,
            };

            if !err.code.is_retryable() || attempt >= self.max_retries {
                return Err(err);
            }

            let delay = backoff_delay(attempt, self.base_delay);
            let remaining = deadline.saturating_duration_since(Instant::now());
            if delay >= remaining {
                debug!("⏳ Not retrying: next delay {}ms exceeds budget", delay.as_millis());
                return Err(err);
            }

            if err.code == ErrorCode::ProviderRateLimited {
                warn!(
                    "⏳ Rate limited (HTTP 429), backing off (attempt {}/{})",
                    attempt + 1,
                    self.max_retries
                );
            }
            debug!(
                "⏳ Retry {}/{} after {}ms ({})",
                attempt + 1,
                self.max_retries,
                delay.as_millis(),
                err
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> AppResult<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status));
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Map a non-success HTTP status to a provider error
pub fn status_error(status: StatusCode) -> AppError {
    match status.as_u16() {
        401 | 403 => AppError::new(
            ErrorCode::ProviderAuthRejected,
            format!("Credential rejected (HTTP {})", status.as_u16()),
        ),
        404 => AppError::new(ErrorCode::ProviderNotFound, "Token not found (HTTP 404)"),
        429 => AppError::rate_limited(),
        408 | 504 => AppError::timeout(format!("Upstream timeout (HTTP {})", status.as_u16())),
        code => AppError::new(ErrorCode::ProviderHttpError, format!("HTTP error: {}", code)),
    }
}

/// Delay before retry number `attempt + 1`, with ±jitter
pub fn backoff_delay(attempt: u32, base: Duration) -> Duration {
    let base_ms = base.as_millis() as u64;
    let capped = base_ms
        .saturating_mul(2_u64.saturating_pow(attempt))
        .min(MAX_RETRY_DELAY_MS);

    let jitter_range = (capped * RETRY_JITTER_PERCENT) / 100;
    let jitter: i64 = if jitter_range == 0 {
        0
    } else {
        rand::thread_rng().gen_range(-(jitter_range as i64)..=(jitter_range as i64))
    };
    Duration::from_millis((capped as i64 + jitter).max(0) as u64)
}

/// JSON-RPC response structure
#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcError>,
}

/// JSON-RPC error structure
#[derive(Debug, Clone, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

impl RpcError {
    /// Rate limit error (code -32005 or message)
    pub fn is_rate_limit(&self) -> bool {
        self.code == -32005 || self.message.to_lowercase().contains("rate limit")
    }

    /// Invalid params, e.g. the account is not an SPL mint
    pub fn is_invalid_params(&self) -> bool {
        self.code == -32602
    }

    pub fn into_app_error(self) -> AppError {
        let code = if self.is_rate_limit() {
            ErrorCode::ProviderRateLimited
        } else if self.is_invalid_params() {
            ErrorCode::ProviderMalformedResponse
        } else {
            ErrorCode::ProviderHttpError
        };
        AppError::new(code, format!("RPC error: {} (code: {})", self.message, self.code))
    }
}
