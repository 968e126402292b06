//! Birdeye Adapter - enhanced market data + token security (heavy)
//!
//! Two sequential calls with a rate-limit pause between them (public tier is
//! roughly 1 request per second):
//! 1. `/defi/v3/token/overview` - liquidity, 1h/24h volume, market count
//! 2. `/defi/token_security`    - authorities, transfer fee, creation time
//!
//! One call failing yields `PartialOk` with the other call's fields.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{info, warn};

use super::http::HttpClient;
use super::ProviderAdapter;
use crate::models::{AppError, AppResult, Field, ProviderName, ProviderOutcome, TokenProfile};
use crate::utils::constants::{BIRDEYE_BASE_URL, BIRDEYE_RATE_LIMIT_PAUSE_MS};
use crate::utils::decoder::{
    authority_at, bool_at, bps_to_pct, f64_at, renounced_from, u64_at,
};

/// Birdeye adapter (requires `BIRDEYE_API_KEY`)
pub struct BirdeyeAdapter {
    http: HttpClient,
    api_key: Option<String>,
    base_url: String,
    pause: Duration,
}

impl BirdeyeAdapter {
    pub fn new(http: HttpClient, api_key: Option<String>) -> Self {
        Self {
            http,
            api_key,
            base_url: BIRDEYE_BASE_URL.to_string(),
            pause: Duration::from_millis(BIRDEYE_RATE_LIMIT_PAUSE_MS),
        }
    }

    async fn get_data(&self, path: &str, token: &str, key: &str, budget: Duration) -> AppResult<Value> {
        let url = format!("{}{}?address={}", self.base_url, path, token);
        let body: Value = self
            .http
            .get_json(&url, &[("X-API-KEY", key), ("x-chain", "solana")], budget)
            .await?;

        if bool_at(&body, "/success") == Some(false) {
            return Err(AppError::malformed(format!(
                "Birdeye {} returned success=false",
                path
            )));
        }
        body.get("data")
            .filter(|d| d.is_object())
            .cloned()
            .ok_or_else(|| AppError::malformed(format!("Birdeye {} missing data object", path)))
    }

    async fn fetch_profile(&self, token: &str, budget: Duration) -> AppResult<ProviderOutcome> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::missing_api_key("BIRDEYE_API_KEY"))?;
        let deadline = Instant::now() + budget;

        info!("🔍 Birdeye: Fetching overview for {}", token);
        let overview = self
            .get_data("/defi/v3/token/overview", token, key, budget)
            .await;

        // Respect the rate limit, but only if the second call still fits
        let remaining = deadline.saturating_duration_since(Instant::now());
        let security = if remaining > self.pause {
            tokio::time::sleep(self.pause).await;
            let remaining = deadline.saturating_duration_since(Instant::now());
            info!("🔍 Birdeye: Fetching token security for {}", token);
            self.get_data("/defi/token_security", token, key, remaining).await
        } else {
            Err(AppError::timeout("No budget left for token security call"))
        };

        let mut profile = TokenProfile::default();
        match (overview, security) {
            (Ok(o), Ok(s)) => {
                apply_overview(&mut profile, &o);
                apply_security(&mut profile, &s, chrono::Utc::now().timestamp());
                Ok(ProviderOutcome::Ok(profile))
            }
            (Ok(o), Err(e)) => {
                apply_overview(&mut profile, &o);
                Ok(ProviderOutcome::PartialOk {
                    profile,
                    warning: format!("token security unavailable {}", e),
                })
            }
            (Err(e), Ok(s)) => {
                apply_security(&mut profile, &s, chrono::Utc::now().timestamp());
                Ok(ProviderOutcome::PartialOk {
                    profile,
                    warning: format!("token overview unavailable {}", e),
                })
            }
            (Err(e), Err(_)) => Err(e),
        }
    }
}

/// Liquidity, volume spike and market count from `/defi/v3/token/overview`
pub fn apply_overview(profile: &mut TokenProfile, data: &Value) {
    profile.liquidity.usd = f64_at(data, "/liquidity").into();

    profile.age_hype.volume_spike_ratio = match (f64_at(data, "/v1hUSD"), f64_at(data, "/v24hUSD")) {
        (Some(h1), Some(h24)) if h24 > 0.0 => Field::Known(h1 * 24.0 / h24),
        (Some(_), Some(_)) => Field::Known(0.0),
        _ => Field::Unknown,
    };

    profile.listings.venue_count = u64_at(data, "/numberMarkets").map(|n| n as u32).into();
}

/// Authorities, transfer fee and creation time from `/defi/token_security`
pub fn apply_security(profile: &mut TokenProfile, data: &Value, now_secs: i64) {
    let mint = authority_at(data, "/mintAuthority");
    let freeze = authority_at(data, "/freezeAuthority");
    profile.authorities.renounced = renounced_from(&mint, &freeze);
    profile.authorities.mint_authority_present = mint;
    profile.authorities.freeze_authority_present = freeze;

    // Token-2022 transfer fee applies to both directions
    let fee_pct = match bool_at(data, "/transferFeeEnable") {
        Some(false) => Some(0.0),
        Some(true) => u64_at(data, "/transferFeeData/newerTransferFee/transferFeeBasisPoints")
            .or_else(|| u64_at(data, "/transferFeeData/transferFeeBasisPoints"))
            .map(bps_to_pct),
        None => None,
    };
    profile.tradeability.buy_tax_pct = fee_pct.into();
    profile.tradeability.sell_tax_pct = fee_pct.into();
    profile.tradeability.transfer_restricted = bool_at(data, "/nonTransferable").into();

    profile.age_hype.age_days = u64_at(data, "/creationTime")
        .map(|created| ((now_secs - created as i64).max(0) as f64) / 86_400.0)
        .into();
}

#[async_trait]
impl ProviderAdapter for BirdeyeAdapter {
    fn name(&self) -> ProviderName {
        ProviderName::Birdeye
    }

    async fn fetch(&self, token: &str, budget: Duration) -> ProviderOutcome {
        match self.fetch_profile(token, budget).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("⚠️ Birdeye error: {}", e);
                e.into()
            }
        }
    }
}
