//! Scoring - weighted combiner and report assembly
//!
//! The overall score is an integer basis-point weighted sum of the seven
//! subscores, rounded half-up, so identical rule results always give the same
//! score regardless of float behaviour.

use std::collections::BTreeSet;
use tracing::{info, warn};

use crate::models::{ErrorCode, FetchRound, ProviderName, Report, RuleResult};
use crate::utils::constants::WEIGHT_BPS_TOTAL;

/// Weighted overall score in 0..=100
pub fn combine(results: &[RuleResult]) -> u8 {
    let weighted: u32 = results
        .iter()
        .map(|r| r.subscore.min(100) as u32 * r.category.weight_bps())
        .sum();
    let overall = (weighted + WEIGHT_BPS_TOTAL / 2) / WEIGHT_BPS_TOTAL;
    overall.min(100) as u8
}

/// Warning line for a provider excluded by fast mode
pub fn skipped_warning(provider: ProviderName) -> String {
    format!("{}: skipped (fast mode)", provider)
}

/// Build the final report from rule results and the fetch round
pub fn assemble_report(token: &str, results: Vec<RuleResult>, round: &FetchRound) -> Report {
    let overall = combine(&results);

    let sources: BTreeSet<ProviderName> = round
        .outcomes
        .iter()
        .filter(|o| o.outcome.is_success())
        .map(|o| o.provider)
        .collect();

    // One line per non-Ok provider, in priority order
    let mut lines: Vec<(ProviderName, String)> = round
        .outcomes
        .iter()
        .filter_map(|o| o.outcome.warning_for(o.provider).map(|w| (o.provider, w)))
        .chain(round.skipped.iter().map(|p| (*p, skipped_warning(*p))))
        .collect();
    lines.sort_by_key(|(provider, _)| *provider);
    let warnings: Vec<String> = lines.into_iter().map(|(_, w)| w).collect();

    if sources.is_empty() {
        warn!(
            "⚠️ [{}] No provider returned data for {}; report uses neutral defaults",
            ErrorCode::AllProvidersFailed.as_str(),
            token
        );
    }

    let report = Report::new(token.to_string(), overall, results, sources, warnings);
    info!(
        "📊 Risk Score: {}/100 - {} {} ({} sources, {} warnings)",
        report.overall(),
        report.verdict().emoji(),
        report.verdict().label(),
        report.sources().len(),
        report.warnings().len()
    );
    report
}
