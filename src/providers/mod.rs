//! Providers Module - External Data Sources
//!
//! One adapter per `ProviderName`. Each adapter turns a token address into a
//! partial `TokenProfile` or a typed failure and never blocks past its budget.

pub mod birdeye;
pub mod dexscreener;
pub mod http;
pub mod pumpfun;
pub mod rugcheck;
pub mod solana;

pub use birdeye::BirdeyeAdapter;
pub use dexscreener::DexScreenerAdapter;
pub use http::HttpClient;
pub use pumpfun::PumpFunAdapter;
pub use rugcheck::RugCheckAdapter;
pub use solana::SolanaChainAdapter;

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::models::{AnalyzerConfig, AppResult, ProviderName, ProviderOutcome};

/// Adapter boundary. Every internal fault becomes `ProviderOutcome::Unavailable`.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    fn name(&self) -> ProviderName;

    async fn fetch(&self, token: &str, budget: Duration) -> ProviderOutcome;
}

/// Fixed mapping from provider name to adapter
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    adapters: BTreeMap<ProviderName, Arc<dyn ProviderAdapter>>,
}

impl ProviderRegistry {
    /// Empty registry; register adapters with `with_adapter`
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the five HTTP/RPC adapters
    pub fn from_config(config: &AnalyzerConfig) -> AppResult<Self> {
        let http = HttpClient::new(config)?;

        let registry = Self::new()
            .with_adapter(Arc::new(SolanaChainAdapter::new(
                http.clone(),
                config.solana_rpc_url.clone(),
            )))
            .with_adapter(Arc::new(DexScreenerAdapter::new(http.clone())))
            .with_adapter(Arc::new(RugCheckAdapter::new(
                http.clone(),
                config.credentials.rugcheck_jwt.clone(),
            )))
            .with_adapter(Arc::new(BirdeyeAdapter::new(
                http.clone(),
                config.credentials.birdeye_api_key.clone(),
            )))
            .with_adapter(Arc::new(PumpFunAdapter::new(http)));

        info!(
            "✅ Registered {} providers (RPC: {})",
            registry.len(),
            config.masked_rpc_url()
        );
        Ok(registry)
    }

    /// Register (or replace) the adapter for `adapter.name()`
    pub fn with_adapter(mut self, adapter: Arc<dyn ProviderAdapter>) -> Self {
        self.adapters.insert(adapter.name(), adapter);
        self
    }

    pub fn get(&self, name: ProviderName) -> Option<Arc<dyn ProviderAdapter>> {
        self.adapters.get(&name).cloned()
    }

    pub fn contains(&self, name: ProviderName) -> bool {
        self.adapters.contains_key(&name)
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}
