//! RugCheck Adapter - rug / holder risk report
//!
//! API: https://api.rugcheck.xyz/v1/tokens/{mint}/report
//! Requires `RUGCHECK_JWT` (Bearer token)

use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeSet;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::http::HttpClient;
use super::ProviderAdapter;
use crate::models::{AppError, AppResult, Field, ProviderName, ProviderOutcome, TokenProfile};
use crate::utils::constants::{
    HONEYPOT_RISK_MARKERS, RUGCHECK_BASE_URL, TRANSFER_RESTRICTION_MARKERS, WHALE_MIN_PCT,
};
use crate::utils::decoder::{authority_at, f64_at, renounced_from, str_at, u64_at};

/// Report sections this adapter reads
const EXPECTED_SECTIONS: [&str; 4] = ["topHolders", "markets", "risks", "transferFee"];

/// RugCheck adapter (light)
pub struct RugCheckAdapter {
    http: HttpClient,
    jwt: Option<String>,
    base_url: String,
}

impl RugCheckAdapter {
    pub fn new(http: HttpClient, jwt: Option<String>) -> Self {
        Self {
            http,
            jwt,
            base_url: RUGCHECK_BASE_URL.to_string(),
        }
    }

    async fn fetch_profile(&self, token: &str, budget: Duration) -> AppResult<ProviderOutcome> {
        let jwt = self
            .jwt
            .as_deref()
            .ok_or_else(|| AppError::missing_api_key("RUGCHECK_JWT"))?;

        let url = format!("{}/tokens/{}/report", self.base_url, token);
        let bearer = format!("Bearer {}", jwt);
        info!("🔍 RugCheck: Fetching report for {}", token);

        let report: Value = self
            .http
            .get_json(&url, &[("Authorization", bearer.as_str())], budget)
            .await?;

        if !report.is_object() {
            return Err(AppError::malformed("RugCheck report is not an object"));
        }

        let now_secs = chrono::Utc::now().timestamp();
        let profile = profile_from_report(&report, now_secs);
        let missing = missing_sections(&report);

        if missing.is_empty() {
            Ok(ProviderOutcome::Ok(profile))
        } else {
            debug!("RugCheck report missing sections: {:?}", missing);
            Ok(ProviderOutcome::PartialOk {
                profile,
                warning: format!("report missing {}", missing.join(", ")),
            })
        }
    }
}

pub fn missing_sections(report: &Value) -> Vec<&'static str> {
    EXPECTED_SECTIONS
        .iter()
        .copied()
        .filter(|key| report.get(*key).map_or(true, Value::is_null))
        .collect()
}

/// Normalize a RugCheck report into a partial profile
pub fn profile_from_report(report: &Value, now_secs: i64) -> TokenProfile {
    let mut profile = TokenProfile::default();

    // Authorities: top level first, then the token account view
    let mut mint = authority_at(report, "/mintAuthority");
    mint.fill_from(&authority_at(report, "/token/mintAuthority"));
    let mut freeze = authority_at(report, "/freezeAuthority");
    freeze.fill_from(&authority_at(report, "/token/freezeAuthority"));
    profile.authorities.renounced = renounced_from(&mint, &freeze);
    profile.authorities.mint_authority_present = mint;
    profile.authorities.freeze_authority_present = freeze;

    // Holders
    if let Some(holders) = report.get("topHolders").and_then(Value::as_array) {
        let pools = pool_accounts(report);
        let pcts: Vec<(f64, Option<bool>)> = holders
            .iter()
            .filter(|h| !is_pool_holder(h, &pools))
            .filter_map(|h| {
                let pct = f64_at(h, "/pct")?;
                Some((pct, h.get("insider").and_then(Value::as_bool)))
            })
            .collect();

        if !pcts.is_empty() {
            profile.concentration.top_holder_pct =
                Field::Known(pcts.iter().map(|(p, _)| *p).fold(0.0, f64::max));
            // Insider share is only measured when the report flags holders at all
            if pcts.iter().any(|(_, i)| i.is_some()) {
                profile.concentration.insider_pct = Field::Known(
                    pcts.iter()
                        .filter(|(_, i)| *i == Some(true))
                        .fold(0.0_f64, |acc, (p, _)| acc + *p),
                );
            }
            profile.concentration.whale_count =
                Field::Known(pcts.iter().filter(|(p, _)| *p >= WHALE_MIN_PCT).count() as u32);
        }
    }

    // Liquidity
    profile.liquidity.usd = f64_at(report, "/totalMarketLiquidity").into();
    if let Some(markets) = report.get("markets").and_then(Value::as_array) {
        profile.liquidity.lock_pct = markets
            .iter()
            .filter_map(|m| f64_at(m, "/lp/lpLockedPct"))
            .reduce(f64::max)
            .into();
    }
    if let Some(lockers) = report.get("lockers").and_then(Value::as_object) {
        // Latest unlock wins; 0 means no scheduled unlock
        let latest = lockers
            .values()
            .filter_map(|l| Some((u64_at(l, "/unlockDate")?, str_at(l, "/type").unwrap_or("unknown"))))
            .filter(|(unlock, _)| *unlock > 0)
            .max_by_key(|(unlock, _)| *unlock);

        if let Some((unlock, kind)) = latest {
            let days = ((unlock as i64 - now_secs).max(0) / 86_400) as u32;
            profile.liquidity.lock_days = Field::Known(days);
            profile.liquidity.lock_provider = Field::Known(kind.to_string());
        }
    }

    // Tradeability
    let fee = f64_at(report, "/transferFee/pct");
    profile.tradeability.buy_tax_pct = fee.into();
    profile.tradeability.sell_tax_pct = fee.into();

    if let Some(risks) = report.get("risks").and_then(Value::as_array) {
        let names: Vec<String> = risks
            .iter()
            .filter_map(|r| str_at(r, "/name"))
            .map(str::to_lowercase)
            .collect();
        let matches_any =
            |markers: &[&str]| names.iter().any(|n| markers.iter().any(|m| n.contains(m)));

        profile.tradeability.honeypot_suspected = Field::Known(matches_any(&HONEYPOT_RISK_MARKERS));
        profile.tradeability.transfer_restricted =
            Field::Known(matches_any(&TRANSFER_RESTRICTION_MARKERS));
    }

    // Creator holdings (raw amounts)
    if let (Some(balance), Some(supply)) = (
        f64_at(report, "/creatorBalance"),
        f64_at(report, "/token/supply"),
    ) {
        if supply > 0.0 {
            profile.launch_platform.dev_holding_pct = Field::Known(balance * 100.0 / supply);
        }
    }

    profile
}

#[async_trait]
impl ProviderAdapter for RugCheckAdapter {
    fn name(&self) -> ProviderName {
        ProviderName::RugCheck
    }

    async fn fetch(&self, token: &str, budget: Duration) -> ProviderOutcome {
        match self.fetch_profile(token, budget).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("⚠️ RugCheck error: {}", e);
                e.into()
            }
        }
    }
}

/// Accounts the report labels as AMM pools; their balances are liquidity, not holdings
fn pool_accounts(report: &Value) -> BTreeSet<&str> {
    report
        .get("knownAccounts")
        .and_then(Value::as_object)
        .map(|known| {
            known
                .iter()
                .filter(|(_, v)| v.get("type").and_then(Value::as_str) == Some("AMM"))
                .map(|(k, _)| k.as_str())
                .collect()
        })
        .unwrap_or_default()
}

fn is_pool_holder(holder: &Value, pools: &BTreeSet<&str>) -> bool {
    ["owner", "address"]
        .iter()
        .filter_map(|key| holder.get(*key).and_then(Value::as_str))
        .any(|addr| pools.contains(addr))
}
