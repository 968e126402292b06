//! Token Analyzer - public entry point
//!
//! validate -> fetch round -> merge profile -> evaluate rules -> combine -> report

use std::collections::BTreeSet;
use std::time::Duration;
use tracing::info;

use super::orchestrator::FetchOrchestrator;
use super::profile::ProfileBuilder;
use super::rules::evaluate_all;
use super::scoring::assemble_report;
use crate::models::{AnalyzerConfig, AppError, AppResult, ProviderName, Report};
use crate::providers::ProviderRegistry;

/// Analyzer with a fixed provider registry and config
pub struct TokenAnalyzer {
    orchestrator: FetchOrchestrator,
    config: AnalyzerConfig,
}

impl TokenAnalyzer {
    /// Analyzer backed by the five network adapters
    pub fn new(config: AnalyzerConfig) -> AppResult<Self> {
        config.validate()?;
        let registry = ProviderRegistry::from_config(&config)?;
        Ok(Self::with_registry(registry, config))
    }

    /// Analyzer with caller-supplied adapters
    pub fn with_registry(registry: ProviderRegistry, config: AnalyzerConfig) -> Self {
        Self {
            orchestrator: FetchOrchestrator::new(registry, config.per_provider_timeout),
            config,
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Full analysis of `token`.
    ///
    /// Only caller mistakes are errors (`NO_PROVIDERS_ENABLED`,
    /// `TOKEN_INVALID_ADDRESS`). Provider failures become report warnings.
    pub async fn analyze(
        &self,
        token: &str,
        enabled: &BTreeSet<ProviderName>,
        fast_mode: bool,
        total_deadline: Duration,
    ) -> AppResult<Report> {
        if enabled.is_empty() {
            return Err(AppError::no_providers_enabled());
        }
        let token = token.trim();
        if token.is_empty() {
            return Err(AppError::invalid_address("Token address is empty"));
        }

        info!("🔍 Analyzing {} with {} providers", token, enabled.len());

        let round = self
            .orchestrator
            .collect(token, enabled, fast_mode, total_deadline)
            .await;
        let profile = ProfileBuilder::from_outcomes(&round.outcomes).build();
        let results = evaluate_all(&profile);

        Ok(assemble_report(token, results, &round))
    }

    /// Blocking wrapper for callers without a runtime.
    ///
    /// Must not be called from inside a Tokio runtime.
    pub fn analyze_blocking(
        &self,
        token: &str,
        enabled: &BTreeSet<ProviderName>,
        fast_mode: bool,
        total_deadline: Duration,
    ) -> AppResult<Report> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.analyze(token, enabled, fast_mode, total_deadline))
    }
}
