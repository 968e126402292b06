//! DexScreener Adapter - market pairs
//!
//! ✅ USED FOR:
//! - Pool liquidity (USD and SOL side)
//! - Pair age and short-term volume spike
//! - Venue count and DEX names
//!
//! ❌ NOT USED FOR:
//! - Authorities, taxes or holder data
//!
//! API: https://api.dexscreener.com/latest/dex/tokens/{tokenAddress}
//! Free, no API key required

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::time::Duration;
use tracing::{info, warn};

use super::http::HttpClient;
use super::ProviderAdapter;
use crate::models::{AppResult, Field, ProviderName, ProviderOutcome, TokenProfile};
use crate::utils::constants::{DEXSCREENER_BASE_URL, DEXSCREENER_SOLANA_CHAIN, SOL_QUOTE_SYMBOLS};

const MS_PER_DAY: f64 = 86_400_000.0;

/// DexScreener API response
#[derive(Debug, Deserialize)]
pub struct DexScreenerResponse {
    #[serde(default)]
    pub pairs: Option<Vec<DexPair>>,
}

/// A trading pair from DexScreener
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DexPair {
    /// Chain ID (e.g., "solana", "ethereum")
    pub chain_id: String,
    /// DEX identifier (e.g., "raydium", "orca", "meteora")
    pub dex_id: String,
    #[serde(default)]
    pub pair_address: String,
    pub quote_token: DexToken,
    pub liquidity: Option<DexLiquidity>,
    pub volume: Option<DexVolume>,
    /// Pair creation time, unix milliseconds
    pub pair_created_at: Option<i64>,
}

impl DexPair {
    fn liquidity_usd(&self) -> Option<f64> {
        self.liquidity.as_ref().and_then(|l| l.usd)
    }

    fn is_sol_quoted(&self) -> bool {
        self.quote_token
            .symbol
            .as_deref()
            .map(|s| SOL_QUOTE_SYMBOLS.iter().any(|q| q.eq_ignore_ascii_case(s)))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DexToken {
    #[serde(default)]
    pub address: String,
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DexLiquidity {
    pub usd: Option<f64>,
    pub base: Option<f64>,
    pub quote: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DexVolume {
    pub h1: Option<f64>,
    pub h24: Option<f64>,
}

/// DexScreener adapter (light)
pub struct DexScreenerAdapter {
    http: HttpClient,
    base_url: String,
}

impl DexScreenerAdapter {
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            base_url: DEXSCREENER_BASE_URL.to_string(),
        }
    }

    /// Fetch Solana pairs for a token address
    pub async fn get_solana_pairs(&self, token: &str, budget: Duration) -> AppResult<Vec<DexPair>> {
        let url = format!("{}/tokens/{}", self.base_url, token);
        info!("🔍 DexScreener: Fetching pairs for {}", token);

        let data: DexScreenerResponse = self.http.get_json(&url, &[], budget).await?;
        let pairs: Vec<DexPair> = data
            .pairs
            .unwrap_or_default()
            .into_iter()
            .filter(|p| p.chain_id.eq_ignore_ascii_case(DEXSCREENER_SOLANA_CHAIN))
            .collect();

        info!("📊 DexScreener: {} Solana pairs", pairs.len());
        Ok(pairs)
    }
}

/// Normalize pairs into a partial profile.
///
/// No pairs at all is a measured zero for liquidity and listings.
pub fn profile_from_pairs(pairs: &[DexPair], now_ms: i64) -> TokenProfile {
    let mut profile = TokenProfile::default();

    if pairs.is_empty() {
        profile.liquidity.usd = Field::Known(0.0);
        profile.liquidity.sol = Field::Known(0.0);
        profile.listings.venue_count = Field::Known(0);
        profile.listings.exchanges = Field::Known(BTreeSet::new());
        return profile;
    }

    // Deepest pair drives the volume ratio
    let deepest = pairs
        .iter()
        .filter(|p| p.liquidity_usd().is_some())
        .max_by(|a, b| {
            a.liquidity_usd()
                .partial_cmp(&b.liquidity_usd())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    profile.liquidity.usd = deepest.and_then(|p| p.liquidity_usd()).into();
    profile.liquidity.sol = pairs
        .iter()
        .filter(|p| p.is_sol_quoted())
        .filter_map(|p| p.liquidity.as_ref().and_then(|l| l.quote))
        .reduce(f64::max)
        .into();

    profile.age_hype.age_days = pairs
        .iter()
        .filter_map(|p| p.pair_created_at)
        .min()
        .map(|created| ((now_ms - created).max(0) as f64) / MS_PER_DAY)
        .into();

    profile.age_hype.volume_spike_ratio = deepest
        .or_else(|| pairs.first())
        .and_then(|p| p.volume.as_ref())
        .and_then(|v| match (v.h1, v.h24) {
            (Some(h1), Some(h24)) if h24 > 0.0 => Some(h1 * 24.0 / h24),
            (Some(_), Some(_)) => Some(0.0),
            _ => None,
        })
        .into();

    profile.listings.venue_count = Field::Known(pairs.len() as u32);
    profile.listings.exchanges = Field::Known(
        pairs
            .iter()
            .map(|p| p.dex_id.to_lowercase())
            .filter(|d| !d.is_empty())
            .collect(),
    );

    profile
}

#[async_trait]
impl ProviderAdapter for DexScreenerAdapter {
    fn name(&self) -> ProviderName {
        ProviderName::DexScreener
    }

    async fn fetch(&self, token: &str, budget: Duration) -> ProviderOutcome {
        match self.get_solana_pairs(token, budget).await {
            Ok(pairs) => {
                let now_ms = chrono::Utc::now().timestamp_millis();
                ProviderOutcome::Ok(profile_from_pairs(&pairs, now_ms))
            }
            Err(e) => {
                warn!("⚠️ DexScreener error: {}", e);
                e.into()
            }
        }
    }
}
