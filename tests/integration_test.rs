//! Integration tests for SolSafety
//!
//! Every provider is a scripted in-process adapter; no network access.

use async_trait::async_trait;
use sol_safety::models::LaunchPlatform;
use sol_safety::{
    AnalyzerConfig, Category, Confidence, ErrorCode, Field, ProviderAdapter, ProviderName,
    ProviderOutcome, ProviderRegistry, TokenAnalyzer, TokenProfile, Verdict,
};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

const MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

enum Script {
    Reply(ProviderOutcome),
    Hang,
    Panic,
}

struct MockAdapter {
    name: ProviderName,
    delay: Duration,
    script: Script,
}

#[async_trait]
impl ProviderAdapter for MockAdapter {
    fn name(&self) -> ProviderName {
        self.name
    }

    async fn fetch(&self, _token: &str, _budget: Duration) -> ProviderOutcome {
        tokio::time::sleep(self.delay).await;
        match &self.script {
            Script::Reply(outcome) => outcome.clone(),
            Script::Hang => {
                tokio::time::sleep(Duration::from_secs(3_600)).await;
                ProviderOutcome::TimedOut
            }
            Script::Panic => panic!("mock adapter exploded"),
        }
    }
}

fn mock(name: ProviderName, delay_ms: u64, script: Script) -> Arc<dyn ProviderAdapter> {
    Arc::new(MockAdapter {
        name,
        delay: Duration::from_millis(delay_ms),
        script,
    })
}

fn analyzer(adapters: Vec<Arc<dyn ProviderAdapter>>) -> TokenAnalyzer {
    let registry = adapters
        .into_iter()
        .fold(ProviderRegistry::new(), |r, a| r.with_adapter(a));
    let config = AnalyzerConfig {
        per_provider_timeout: Duration::from_secs(2),
        total_deadline: Duration::from_secs(5),
        ..AnalyzerConfig::default()
    };
    TokenAnalyzer::with_registry(registry, config)
}

fn all_providers() -> BTreeSet<ProviderName> {
    ProviderName::ALL.into_iter().collect()
}

fn exchanges(names: &[&str]) -> Field<BTreeSet<String>> {
    Field::Known(names.iter().map(|s| s.to_string()).collect())
}

// ============================================
// SCENARIOS
// ============================================

/// Renounced authorities, deep locked pool, no tax, old, widely listed
fn healthy_profiles() -> Vec<(ProviderName, TokenProfile)> {
    let mut chain = TokenProfile::default();
    chain.authorities.mint_authority_present = Field::Known(false);
    chain.authorities.freeze_authority_present = Field::Known(false);
    chain.authorities.renounced = Field::Known(true);
    chain.tradeability.buy_tax_pct = Field::Known(0.0);
    chain.tradeability.sell_tax_pct = Field::Known(0.0);
    chain.tradeability.transfer_restricted = Field::Known(false);
    chain.concentration.top_holder_pct = Field::Known(5.0);
    chain.concentration.whale_count = Field::Known(1);

    let mut dex = TokenProfile::default();
    dex.liquidity.usd = Field::Known(50_000.0);
    dex.age_hype.age_days = Field::Known(400.0);
    dex.age_hype.volume_spike_ratio = Field::Known(1.0);
    dex.listings.exchanges = exchanges(&["raydium", "orca", "meteora", "jupiter"]);

    let mut rug = TokenProfile::default();
    rug.liquidity.lock_pct = Field::Known(100.0);
    rug.liquidity.lock_days = Field::Known(180);
    rug.tradeability.honeypot_suspected = Field::Known(false);
    rug.concentration.insider_pct = Field::Known(0.0);

    let mut bird = TokenProfile::default();
    bird.listings.venue_count = Field::Known(4);

    let mut pump = TokenProfile::default();
    pump.launch_platform = LaunchPlatform::not_applicable();

    vec![
        (ProviderName::SolanaChain, chain),
        (ProviderName::DexScreener, dex),
        (ProviderName::RugCheck, rug),
        (ProviderName::Birdeye, bird),
        (ProviderName::PumpFun, pump),
    ]
}

/// Active mint authority, $800 unlocked pool, 10% sell tax, 60% top holder,
/// one day old, no listings
fn rug_adapters() -> Vec<Arc<dyn ProviderAdapter>> {
    let mut chain = TokenProfile::default();
    chain.authorities.mint_authority_present = Field::Known(true);
    chain.authorities.freeze_authority_present = Field::Known(false);
    chain.authorities.renounced = Field::Known(false);
    chain.concentration.top_holder_pct = Field::Known(60.0);

    let mut dex = TokenProfile::default();
    dex.liquidity.usd = Field::Known(800.0);
    dex.age_hype.age_days = Field::Known(1.0);
    dex.listings.exchanges = exchanges(&[]);

    let mut rug = TokenProfile::default();
    rug.liquidity.lock_pct = Field::Known(0.0);
    rug.tradeability.buy_tax_pct = Field::Known(0.0);
    rug.tradeability.sell_tax_pct = Field::Known(10.0);
    rug.tradeability.honeypot_suspected = Field::Known(false);
    rug.tradeability.transfer_restricted = Field::Known(false);

    let mut pump = TokenProfile::default();
    pump.launch_platform = LaunchPlatform::not_applicable();

    vec![
        mock(ProviderName::SolanaChain, 5, Script::Reply(ProviderOutcome::Ok(chain))),
        mock(ProviderName::DexScreener, 5, Script::Reply(ProviderOutcome::Ok(dex))),
        mock(ProviderName::RugCheck, 5, Script::Reply(ProviderOutcome::Ok(rug))),
        mock(
            ProviderName::Birdeye,
            5,
            Script::Reply(ProviderOutcome::unavailable(
                ErrorCode::ProviderAuthMissing,
                "Missing API key: BIRDEYE_API_KEY",
            )),
        ),
        mock(ProviderName::PumpFun, 5, Script::Reply(ProviderOutcome::Ok(pump))),
    ]
}

fn healthy_adapters(delays_ms: [u64; 5]) -> Vec<Arc<dyn ProviderAdapter>> {
    healthy_profiles()
        .into_iter()
        .zip(delays_ms)
        .map(|((name, profile), delay)| mock(name, delay, Script::Reply(ProviderOutcome::Ok(profile))))
        .collect()
}

// ============================================
// TESTS
// ============================================

#[tokio::test]
async fn test_healthy_token_is_likely_ok() {
    let report = analyzer(healthy_adapters([1, 1, 1, 1, 1]))
        .analyze(MINT, &all_providers(), false, Duration::from_secs(5))
        .await
        .unwrap();

    assert_eq!(report.verdict(), Verdict::LikelyOk);
    assert!(report.overall() <= 29, "overall = {}", report.overall());
    assert_eq!(report.sources().len(), 5);
    assert!(report.warnings().is_empty());
    assert_eq!(report.confidence(), Confidence::Full);

    let categories: Vec<_> = report.results().iter().map(|r| r.category).collect();
    assert_eq!(categories, Category::ALL.to_vec());
    assert_eq!(report.result(Category::Authorities).unwrap().subscore, 0);
}

#[tokio::test]
async fn test_rug_token_is_high_risk() {
    let report = analyzer(rug_adapters())
        .analyze(MINT, &all_providers(), false, Duration::from_secs(5))
        .await
        .unwrap();

    assert_eq!(report.verdict(), Verdict::HighRisk);
    assert!(report.overall() >= 60, "overall = {}", report.overall());
    assert_eq!(report.overall(), 66);

    assert_eq!(report.result(Category::Liquidity).unwrap().subscore, 100);
    assert_eq!(report.result(Category::Tradeability).unwrap().subscore, 45);
    assert_eq!(report.result(Category::LaunchPlatform).unwrap().subscore, 10);

    assert_eq!(report.warnings().len(), 1);
    assert!(report.warnings()[0].starts_with("birdeye: unavailable [PROVIDER_AUTH_MISSING]"));
    assert!(!report.sources().contains(&ProviderName::Birdeye));
    assert!(report.summary().contains("High Risk / Avoid"));
}

#[tokio::test(start_paused = true)]
async fn test_report_independent_of_latency() {
    let fast_first = analyzer(healthy_adapters([1, 50, 100, 150, 200]))
        .analyze(MINT, &all_providers(), false, Duration::from_secs(5))
        .await
        .unwrap();
    let slow_first = analyzer(healthy_adapters([200, 150, 100, 50, 1]))
        .analyze(MINT, &all_providers(), false, Duration::from_secs(5))
        .await
        .unwrap();

    assert_eq!(fast_first, slow_first);
    assert_eq!(
        serde_json::to_string(&fast_first).unwrap(),
        serde_json::to_string(&slow_first).unwrap()
    );
}

#[tokio::test(start_paused = true)]
async fn test_unbounded_deadline_completes() {
    let bounded = analyzer(healthy_adapters([1, 1, 1, 1, 1]))
        .analyze(MINT, &all_providers(), false, Duration::from_secs(5))
        .await
        .unwrap();
    let unbounded = analyzer(healthy_adapters([1, 1, 1, 1, 1]))
        .analyze(MINT, &all_providers(), false, Duration::MAX)
        .await
        .unwrap();

    assert_eq!(bounded, unbounded);
    assert_eq!(unbounded.sources().len(), 5);
}

#[tokio::test]
async fn test_all_providers_unavailable() {
    let adapters = ProviderName::ALL
        .into_iter()
        .map(|name| {
            mock(
                name,
                0,
                Script::Reply(ProviderOutcome::unavailable(ErrorCode::ProviderNetwork, "Connection failed")),
            )
        })
        .collect();
    let enabled = all_providers();

    let report = analyzer(adapters)
        .analyze(MINT, &enabled, false, Duration::from_secs(5))
        .await
        .unwrap();

    assert_eq!(report.warnings().len(), enabled.len());
    assert!(report.sources().is_empty());
    assert!(report
        .results()
        .iter()
        .all(|r| r.confidence == Confidence::Degraded));
    assert_eq!(report.overall(), 39);
    assert_eq!(report.verdict(), Verdict::Caution);
}

#[tokio::test(start_paused = true)]
async fn test_hanging_provider_times_out() {
    let mut adapters = healthy_adapters([1, 1, 1, 1, 1]);
    adapters[2] = mock(ProviderName::RugCheck, 0, Script::Hang);

    let started = tokio::time::Instant::now();
    let report = analyzer(adapters)
        .analyze(MINT, &all_providers(), false, Duration::from_secs(5))
        .await
        .unwrap();

    assert!(started.elapsed() <= Duration::from_secs(5));
    assert_eq!(
        report.warnings(),
        &["rugcheck: timed out [PROVIDER_TIMEOUT]".to_string()]
    );
    assert_eq!(report.sources().len(), 4);
}

#[tokio::test]
async fn test_panicking_provider_is_contained() {
    let mut adapters = healthy_adapters([0, 0, 0, 0, 0]);
    adapters[4] = mock(ProviderName::PumpFun, 0, Script::Panic);

    let report = analyzer(adapters)
        .analyze(MINT, &all_providers(), false, Duration::from_secs(5))
        .await
        .unwrap();

    assert_eq!(report.warnings().len(), 1);
    assert!(report.warnings()[0].starts_with("pumpfun: unavailable [PROVIDER_INTERNAL]"));
    assert!(!report.sources().contains(&ProviderName::PumpFun));
}

#[tokio::test]
async fn test_no_providers_enabled() {
    let err = analyzer(healthy_adapters([0; 5]))
        .analyze(MINT, &BTreeSet::new(), false, Duration::from_secs(5))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::NoProvidersEnabled);
}

#[tokio::test]
async fn test_fast_mode_skips_heavy_providers() {
    let report = analyzer(healthy_adapters([0; 5]))
        .analyze(MINT, &all_providers(), true, Duration::from_secs(5))
        .await
        .unwrap();

    let sources: Vec<_> = report.sources().iter().copied().collect();
    assert_eq!(
        sources,
        vec![ProviderName::DexScreener, ProviderName::RugCheck, ProviderName::PumpFun]
    );
    assert_eq!(
        report.warnings(),
        &[
            "solana_chain: skipped (fast mode)".to_string(),
            "birdeye: skipped (fast mode)".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_fast_mode_with_only_heavy_providers() {
    let enabled: BTreeSet<_> = [ProviderName::SolanaChain, ProviderName::Birdeye]
        .into_iter()
        .collect();

    let report = analyzer(healthy_adapters([0; 5]))
        .analyze(MINT, &enabled, true, Duration::from_secs(5))
        .await
        .unwrap();

    assert!(report.sources().is_empty());
    assert_eq!(report.warnings().len(), 2);
    assert_eq!(report.overall(), 39);
}

#[test]
fn test_analyze_blocking() {
    let report = analyzer(rug_adapters())
        .analyze_blocking(MINT, &all_providers(), false, Duration::from_secs(5))
        .unwrap();
    assert_eq!(report.verdict(), Verdict::HighRisk);
}

#[test]
fn test_report_json_shape() {
    let report = analyzer(healthy_adapters([0; 5]))
        .analyze_blocking(MINT, &all_providers(), false, Duration::from_secs(5))
        .unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["token"], MINT);
    assert_eq!(json["verdict"], "likely_ok");
    assert_eq!(json["results"].as_array().unwrap().len(), 7);
    assert_eq!(json["results"][0]["category"], "authorities");
    assert_eq!(json["sources"][0], "solana_chain");
}
