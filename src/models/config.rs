//! Configuration module for SolSafety
//!
//! Values come from the environment or from `utils/constants.rs` defaults.
//! API keys are never logged.

use std::time::Duration;
use tracing::{info, warn};

use crate::models::errors::{AppError, AppResult};
use crate::utils::constants::{
    DEFAULT_HTTP_MAX_RETRIES, DEFAULT_PROVIDER_TIMEOUT_MS, DEFAULT_RETRY_BASE_MS,
    DEFAULT_SOLANA_RPC_URL, DEFAULT_TOTAL_DEADLINE_MS,
};

/// Provider credentials, passed explicitly into adapter construction
#[derive(Clone, Default)]
pub struct ProviderCredentials {
    pub birdeye_api_key: Option<String>,
    pub rugcheck_jwt: Option<String>,
}

impl ProviderCredentials {
    /// Load credentials from the environment
    pub fn from_env() -> Self {
        Self {
            birdeye_api_key: read_secret("BIRDEYE_API_KEY"),
            rugcheck_jwt: read_secret("RUGCHECK_JWT"),
        }
    }
}

impl std::fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let hidden = |k: &Option<String>| if k.is_some() { "<hidden>" } else { "<unset>" };
        f.debug_struct("ProviderCredentials")
            .field("birdeye_api_key", &hidden(&self.birdeye_api_key))
            .field("rugcheck_jwt", &hidden(&self.rugcheck_jwt))
            .finish()
    }
}

fn read_secret(var: &str) -> Option<String> {
    match std::env::var(var) {
        Ok(key) if !key.trim().is_empty() && key != "YOUR_API_KEY" => {
            info!("🔑 {} configured (key hidden for security)", var);
            Some(key.trim().to_string())
        }
        _ => None,
    }
}

/// Configuration for the analyzer
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Budget for one adapter call
    pub per_provider_timeout: Duration,
    /// Shared deadline for a whole fetch round
    pub total_deadline: Duration,
    /// Solana JSON-RPC endpoint
    pub solana_rpc_url: String,
    pub credentials: ProviderCredentials,
    /// Retries for one HTTP call (429 / timeout / connect only)
    pub http_max_retries: u32,
    /// First retry delay; doubles each attempt
    pub retry_base_delay: Duration,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            per_provider_timeout: Duration::from_millis(DEFAULT_PROVIDER_TIMEOUT_MS),
            total_deadline: Duration::from_millis(DEFAULT_TOTAL_DEADLINE_MS),
            solana_rpc_url: DEFAULT_SOLANA_RPC_URL.to_string(),
            credentials: ProviderCredentials::default(),
            http_max_retries: DEFAULT_HTTP_MAX_RETRIES,
            retry_base_delay: Duration::from_millis(DEFAULT_RETRY_BASE_MS),
        }
    }
}

impl AnalyzerConfig {
    /// Build from environment variables, falling back to defaults.
    ///
    /// Malformed numeric values are rejected rather than silently replaced.
    pub fn from_env() -> AppResult<Self> {
        let defaults = Self::default();

        let config = Self {
            per_provider_timeout: env_millis(
                "SOL_SAFETY_PROVIDER_TIMEOUT_MS",
                defaults.per_provider_timeout,
            )?,
            total_deadline: env_millis("SOL_SAFETY_TOTAL_DEADLINE_MS", defaults.total_deadline)?,
            solana_rpc_url: std::env::var("SOLANA_RPC_URL")
                .ok()
                .filter(|u| !u.trim().is_empty())
                .unwrap_or(defaults.solana_rpc_url),
            credentials: ProviderCredentials::from_env(),
            http_max_retries: match std::env::var("SOL_SAFETY_HTTP_MAX_RETRIES") {
                Ok(raw) => raw.trim().parse().map_err(|_| {
                    AppError::invalid_config(format!(
                        "SOL_SAFETY_HTTP_MAX_RETRIES must be an integer, got '{}'",
                        raw
                    ))
                })?,
                Err(_) => defaults.http_max_retries,
            },
            retry_base_delay: env_millis("SOL_SAFETY_RETRY_BASE_MS", defaults.retry_base_delay)?,
        };

        config.validate()?;
        info!(
            "⚙️  Config: provider timeout {}ms, deadline {}ms, RPC {}",
            config.per_provider_timeout.as_millis(),
            config.total_deadline.as_millis(),
            config.masked_rpc_url()
        );
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.per_provider_timeout.is_zero() {
            return Err(AppError::invalid_config("per-provider timeout must be > 0"));
        }
        if self.total_deadline.is_zero() {
            return Err(AppError::invalid_config("total deadline must be > 0"));
        }
        if self.per_provider_timeout > self.total_deadline {
            warn!(
                "⚠️  Provider timeout ({}ms) exceeds total deadline ({}ms); deadline wins",
                self.per_provider_timeout.as_millis(),
                self.total_deadline.as_millis()
            );
        }
        Ok(())
    }

    /// RPC URL with any path or query (where keys usually live) hidden
    pub fn masked_rpc_url(&self) -> String {
        mask_url(&self.solana_rpc_url)
    }
}

fn env_millis(var: &str, default: Duration) -> AppResult<Duration> {
    match std::env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|_| {
                AppError::invalid_config(format!("{} must be milliseconds, got '{}'", var, raw))
            }),
        Err(_) => Ok(default),
    }
}

/// Keep scheme and host only
pub fn mask_url(url: &str) -> String {
    let (scheme, rest) = match url.split_once("://") {
        Some((s, r)) => (s, r),
        None => return "***".to_string(),
    };
    let host = rest.split(['/', '?']).next().unwrap_or_default();
    if host.len() == rest.len() {
        format!("{}://{}", scheme, host)
    } else {
        format!("{}://{}/***", scheme, host)
    }
}
