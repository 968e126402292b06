//! Pump.fun Adapter - launch platform origin and migration
//!
//! API: https://frontend-api-v3.pump.fun/coins/{mint}
//! A 404 means the token did not launch on pump.fun: launch fields become
//! `NotApplicable` and the outcome is still `Ok`.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, warn};

use super::http::HttpClient;
use super::ProviderAdapter;
use crate::models::{
    AppResult, ErrorCode, Field, LaunchPlatform, ProviderName, ProviderOutcome, TokenProfile,
};
use crate::utils::constants::PUMPFUN_BASE_URL;

/// Subset of the pump.fun coin record
#[derive(Debug, Clone, Deserialize)]
pub struct PumpCoin {
    pub mint: String,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub creator: Option<String>,
    /// Unix milliseconds
    pub created_timestamp: Option<i64>,
    /// Bonding curve completed (migrated to a DEX)
    pub complete: Option<bool>,
    pub raydium_pool: Option<String>,
    pub pump_swap_pool: Option<String>,
}

impl PumpCoin {
    fn creation_context(&self) -> String {
        let mut context = format!(
            "pump.fun launch {} ({})",
            self.symbol.as_deref().unwrap_or("?"),
            self.name.as_deref().unwrap_or("unnamed")
        );
        if let Some(creator) = self.creator.as_deref() {
            let short: String = creator.chars().take(6).collect();
            context.push_str(&format!(" by {}…", short));
        }
        context
    }

    fn migrated(&self) -> Option<bool> {
        match self.complete {
            Some(true) => Some(true),
            _ if self.raydium_pool.is_some() || self.pump_swap_pool.is_some() => Some(true),
            other => other,
        }
    }
}

/// Pump.fun adapter (light)
pub struct PumpFunAdapter {
    http: HttpClient,
    base_url: String,
}

impl PumpFunAdapter {
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            base_url: PUMPFUN_BASE_URL.to_string(),
        }
    }

    /// `Ok(None)` when pump.fun has no record of the mint
    pub async fn get_coin(&self, token: &str, budget: Duration) -> AppResult<Option<PumpCoin>> {
        let url = format!("{}/coins/{}", self.base_url, token);
        info!("🔍 Pump.fun: Looking up {}", token);

        match self.http.get_json::<Option<PumpCoin>>(&url, &[], budget).await {
            Ok(coin) => Ok(coin),
            Err(e) if e.code == ErrorCode::ProviderNotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Normalize a coin lookup into a partial profile
pub fn profile_from_coin(coin: Option<&PumpCoin>, now_ms: i64) -> TokenProfile {
    let mut profile = TokenProfile::default();

    let coin = match coin {
        Some(c) => c,
        None => {
            profile.launch_platform = LaunchPlatform::not_applicable();
            return profile;
        }
    };

    profile.launch_platform.creation_context = Field::Known(coin.creation_context());
    profile.launch_platform.migrated = coin.migrated().into();
    profile.age_hype.age_days = coin
        .created_timestamp
        .map(|created| ((now_ms - created).max(0) as f64) / 86_400_000.0)
        .into();

    profile
}

#[async_trait]
impl ProviderAdapter for PumpFunAdapter {
    fn name(&self) -> ProviderName {
        ProviderName::PumpFun
    }

    async fn fetch(&self, token: &str, budget: Duration) -> ProviderOutcome {
        match self.get_coin(token, budget).await {
            Ok(coin) => {
                if coin.is_none() {
                    info!("📊 Pump.fun: {} did not launch on pump.fun", token);
                }
                let now_ms = chrono::Utc::now().timestamp_millis();
                ProviderOutcome::Ok(profile_from_coin(coin.as_ref(), now_ms))
            }
            Err(e) => {
                warn!("⚠️ Pump.fun error: {}", e);
                e.into()
            }
        }
    }
}
