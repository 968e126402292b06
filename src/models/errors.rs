//! Centralized Error Handling Module
//!
//! Every failure carries a stable, unique code so that provider warnings and
//! precondition failures can be matched on and logged without parsing text.
//!
//! Error codes follow pattern: CATEGORY_SPECIFIC_ERROR
//! - PROVIDER_xxx: adapter-level failures (recovered locally as warnings)
//! - CFG_xxx: configuration errors
//! - TOKEN_xxx / NO_xxx / ALL_xxx: analysis-level conditions

use std::fmt;

/// Application-wide error type
#[derive(Debug)]
pub struct AppError {
    /// Unique error code for logging/monitoring
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Optional underlying error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new AppError
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create AppError with source error
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get error code as string (for logging)
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Unique error codes for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // ============================================
    // Provider Errors (1xx) - recovered locally
    // ============================================
    /// Connection / transport failure
    ProviderNetwork,
    /// Adapter needs a credential that is not configured
    ProviderAuthMissing,
    /// Credential was rejected (HTTP 401/403)
    ProviderAuthRejected,
    /// Rate limited (HTTP 429)
    ProviderRateLimited,
    /// Response did not match the expected shape
    ProviderMalformedResponse,
    /// Provider has no record of the token (HTTP 404)
    ProviderNotFound,
    /// Any other non-success HTTP status or RPC error object
    ProviderHttpError,
    /// Adapter exceeded its budget
    ProviderTimeout,
    /// Adapter panicked or its task was lost
    ProviderInternal,

    // ============================================
    // Configuration Errors (4xx)
    // ============================================
    /// Invalid configuration value
    ConfigInvalidValue,
    /// Unknown provider name
    ConfigUnknownProvider,

    // ============================================
    // Analysis Errors (5xx)
    // ============================================
    /// Token identifier is empty or malformed
    TokenInvalidAddress,
    /// Caller enabled zero providers
    NoProvidersEnabled,
    /// Every enabled provider failed (degraded report, never returned as Err)
    AllProvidersFailed,

    // ============================================
    // Generic Errors (9xx)
    // ============================================
    /// Unknown error
    Unknown,
}

impl ErrorCode {
    /// Get string representation of error code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProviderNetwork => "PROVIDER_NETWORK",
            Self::ProviderAuthMissing => "PROVIDER_AUTH_MISSING",
            Self::ProviderAuthRejected => "PROVIDER_AUTH_REJECTED",
            Self::ProviderRateLimited => "PROVIDER_RATE_LIMITED",
            Self::ProviderMalformedResponse => "PROVIDER_MALFORMED_RESPONSE",
            Self::ProviderNotFound => "PROVIDER_NOT_FOUND",
            Self::ProviderHttpError => "PROVIDER_HTTP_ERROR",
            Self::ProviderTimeout => "PROVIDER_TIMEOUT",
            Self::ProviderInternal => "PROVIDER_INTERNAL",

            Self::ConfigInvalidValue => "CFG_INVALID_VALUE",
            Self::ConfigUnknownProvider => "CFG_UNKNOWN_PROVIDER",

            Self::TokenInvalidAddress => "TOKEN_INVALID_ADDRESS",
            Self::NoProvidersEnabled => "NO_PROVIDERS_ENABLED",
            Self::AllProvidersFailed => "ALL_PROVIDERS_FAILED",

            Self::Unknown => "UNKNOWN_ERROR",
        }
    }

    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ProviderNetwork | Self::ProviderRateLimited | Self::ProviderTimeout
        )
    }

    /// Caller-side precondition failure (the only errors `analyze` returns)
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::NoProvidersEnabled | Self::TokenInvalidAddress)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================
// Convenience constructors
// ============================================

impl AppError {
    /// Transport failure
    pub fn network(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ProviderNetwork, msg)
    }

    /// Missing credential
    pub fn missing_api_key(key_name: &str) -> Self {
        Self::new(
            ErrorCode::ProviderAuthMissing,
            format!("Missing API key: {}", key_name),
        )
    }

    /// Rate limited
    pub fn rate_limited() -> Self {
        Self::new(ErrorCode::ProviderRateLimited, "Rate limited (HTTP 429)")
    }

    /// Malformed response body
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ProviderMalformedResponse, msg)
    }

    /// Provider timeout
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ProviderTimeout, msg)
    }

    /// Invalid token address
    pub fn invalid_address(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::TokenInvalidAddress, msg)
    }

    /// Zero providers selected
    pub fn no_providers_enabled() -> Self {
        Self::new(
            ErrorCode::NoProvidersEnabled,
            "No providers enabled; at least one data source is required",
        )
    }

    /// Unknown provider name in a selection list
    pub fn unknown_provider(name: &str) -> Self {
        Self::new(
            ErrorCode::ConfigUnknownProvider,
            format!("Unknown provider: {}", name),
        )
    }

    /// Invalid configuration value
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalidValue, msg)
    }
}

// ============================================
// Result type alias
// ============================================

/// Application Result type
pub type AppResult<T> = Result<T, AppError>;

// ============================================
// Conversion from common error types
// ============================================

impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        Self::new(ErrorCode::Unknown, err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorCode::Unknown, "IO error", err)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::new(ErrorCode::ProviderTimeout, "Request timeout")
        } else if err.is_connect() {
            Self::new(ErrorCode::ProviderNetwork, "Connection failed")
        } else if err.is_decode() {
            Self::new(ErrorCode::ProviderMalformedResponse, err.to_string())
        } else {
            Self::new(ErrorCode::ProviderNetwork, err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(ErrorCode::ProviderMalformedResponse, "JSON parse error", err)
    }
}
