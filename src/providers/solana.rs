//! Solana Chain Adapter - on-chain mint state (heavy)
//!
//! Standard JSON-RPC only:
//! 1. `getAccountInfo` (jsonParsed) - mint/freeze authority, supply, Token-2022 extensions
//! 2. `getTokenLargestAccounts`     - top holder share and whale count
//!
//! A failed holder query yields `PartialOk` with the mint fields.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::http::HttpClient;
use super::ProviderAdapter;
use crate::models::{
    AppError, AppResult, ErrorCode, Field, ProviderName, ProviderOutcome, TokenProfile,
};
use crate::utils::constants::WHALE_MIN_PCT;
use crate::utils::decoder::{authority_at, bps_to_pct, renounced_from, u64_at};

// ============================================
// SOLANA CONSTANTS
// ============================================

/// Token Program ID
pub const TOKEN_PROGRAM: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";

/// Token-2022 Program ID
pub const TOKEN_2022_PROGRAM: &str = "TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb";

// ============================================
// SOLANA RPC TYPES
// ============================================

/// `{ context, value }` wrapper used by most RPC methods
#[derive(Debug, Clone, Deserialize)]
pub struct RpcValue<T> {
    pub value: Option<T>,
}

/// Solana account info
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolanaAccountInfo {
    pub lamports: u64,
    pub owner: String,
    pub data: AccountData,
}

/// Account data (parsed when the program is known, base64 otherwise)
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AccountData {
    Parsed(ParsedAccountData),
    Base64(Vec<String>),
}

/// Parsed account data
#[derive(Debug, Clone, Deserialize)]
pub struct ParsedAccountData {
    pub program: String,
    pub parsed: Value,
}

/// One entry of `getTokenLargestAccounts`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LargestAccount {
    pub address: String,
    /// Raw amount (string-encoded integer)
    pub amount: String,
}

/// Solana chain adapter
pub struct SolanaChainAdapter {
    http: HttpClient,
    rpc_url: String,
}

impl SolanaChainAdapter {
    pub fn new(http: HttpClient, rpc_url: String) -> Self {
        Self { http, rpc_url }
    }

    /// Get account info
    pub async fn get_account_info(&self, pubkey: &str, budget: Duration) -> AppResult<SolanaAccountInfo> {
        let params = serde_json::json!([pubkey, {"encoding": "jsonParsed"}]);
        let result: RpcValue<SolanaAccountInfo> = self
            .http
            .rpc_call(&self.rpc_url, "getAccountInfo", params, budget)
            .await?;

        result
            .value
            .ok_or_else(|| AppError::new(ErrorCode::ProviderNotFound, "Mint account does not exist"))
    }

    /// Get the largest token accounts for a mint
    pub async fn get_largest_accounts(&self, mint: &str, budget: Duration) -> AppResult<Vec<LargestAccount>> {
        let params = serde_json::json!([mint]);
        let result: RpcValue<Vec<LargestAccount>> = self
            .http
            .rpc_call(&self.rpc_url, "getTokenLargestAccounts", params, budget)
            .await?;
        Ok(result.value.unwrap_or_default())
    }

    async fn fetch_profile(&self, token: &str, budget: Duration) -> AppResult<ProviderOutcome> {
        let deadline = Instant::now() + budget;
        info!("🔍 Solana RPC: Reading mint account {}", token);

        let account = self.get_account_info(token, budget).await?;
        let mut profile = TokenProfile::default();
        let supply = apply_mint_account(&mut profile, &account)?;

        let remaining = deadline.saturating_duration_since(Instant::now());
        match self.get_largest_accounts(token, remaining).await {
            Ok(accounts) => {
                apply_largest_accounts(&mut profile, &accounts, supply);
                Ok(ProviderOutcome::Ok(profile))
            }
            Err(e) => {
                debug!("Solana RPC holder query failed: {}", e);
                Ok(ProviderOutcome::PartialOk {
                    profile,
                    warning: format!("holder query failed {}", e),
                })
            }
        }
    }
}

/// Authorities and Token-2022 restrictions from a parsed mint account.
///
/// Returns the raw supply.
pub fn apply_mint_account(profile: &mut TokenProfile, account: &SolanaAccountInfo) -> AppResult<u128> {
    let parsed = match &account.data {
        AccountData::Parsed(p) if p.parsed.get("type").and_then(Value::as_str) == Some("mint") => p,
        _ => return Err(AppError::malformed("Account is not an SPL token mint")),
    };
    let info = parsed
        .parsed
        .get("info")
        .ok_or_else(|| AppError::malformed("Mint account has no info"))?;

    let mint = authority_at(info, "/mintAuthority");
    let freeze = authority_at(info, "/freezeAuthority");
    profile.authorities.renounced = renounced_from(&mint, &freeze);
    profile.authorities.mint_authority_present = mint;
    profile.authorities.freeze_authority_present = freeze;

    if account.owner == TOKEN_PROGRAM {
        // Classic SPL mints cannot carry fees or transfer restrictions
        profile.tradeability.buy_tax_pct = Field::Known(0.0);
        profile.tradeability.sell_tax_pct = Field::Known(0.0);
        profile.tradeability.transfer_restricted = Field::Known(false);
    } else if account.owner == TOKEN_2022_PROGRAM {
        let extensions = info
            .get("extensions")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        let find = |name: &str| {
            extensions
                .iter()
                .find(|e| e.get("extension").and_then(Value::as_str) == Some(name))
        };

        // No fee extension is a measured zero; an unreadable one stays unknown
        let fee_pct = match find("transferFeeConfig") {
            Some(e) => u64_at(e, "/state/newerTransferFee/transferFeeBasisPoints").map(bps_to_pct),
            None => Some(0.0),
        };
        profile.tradeability.buy_tax_pct = fee_pct.into();
        profile.tradeability.sell_tax_pct = fee_pct.into();

        let hooked = find("transferHook")
            .map(|e| e.pointer("/state/programId").map_or(false, |p| !p.is_null()))
            .unwrap_or(false);
        let restricted =
            hooked || find("nonTransferable").is_some() || find("permanentDelegate").is_some();
        profile.tradeability.transfer_restricted = Field::Known(restricted);
    }

    info
        .get("supply")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<u128>().ok())
        .ok_or_else(|| AppError::malformed("Mint account has no supply"))
}

/// Top holder share and whale count from the largest accounts
pub fn apply_largest_accounts(profile: &mut TokenProfile, accounts: &[LargestAccount], supply: u128) {
    if supply == 0 || accounts.is_empty() {
        return;
    }

    let pcts: Vec<f64> = accounts
        .iter()
        .filter_map(|a| a.amount.parse::<u128>().ok())
        .map(|amount| amount as f64 * 100.0 / supply as f64)
        .collect();
    if pcts.is_empty() {
        return;
    }

    profile.concentration.top_holder_pct = Field::Known(pcts.iter().copied().fold(0.0, f64::max));
    profile.concentration.whale_count =
        Field::Known(pcts.iter().filter(|p| **p >= WHALE_MIN_PCT).count() as u32);
}

#[async_trait]
impl ProviderAdapter for SolanaChainAdapter {
    fn name(&self) -> ProviderName {
        ProviderName::SolanaChain
    }

    async fn fetch(&self, token: &str, budget: Duration) -> ProviderOutcome {
        match self.fetch_profile(token, budget).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("⚠️ Solana RPC error: {}", e);
                e.into()
            }
        }
    }
}
