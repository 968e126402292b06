//! Type definitions for SolSafety
//! All core data structures for token profiling and risk scoring

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::models::errors::{AppError, AppResult, ErrorCode};
use crate::utils::constants::{
    SEVERITY_HIGH_MIN, SEVERITY_LOW_MAX, VERDICT_CAUTION_MAX, VERDICT_LIKELY_OK_MAX,
    WEIGHT_BPS_AGE_HYPE, WEIGHT_BPS_AUTHORITIES, WEIGHT_BPS_CONCENTRATION,
    WEIGHT_BPS_LAUNCH_PLATFORM, WEIGHT_BPS_LIQUIDITY, WEIGHT_BPS_LISTINGS,
    WEIGHT_BPS_TRADEABILITY, WEIGHT_BPS_TOTAL,
};

// ============================================
// TRI-STATE FIELD
// ============================================

/// A single profile leaf.
///
/// `Unknown` means no provider answered; `NotApplicable` means the question
/// does not apply to this token. Neither is ever coerced to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum Field<T> {
    Known(T),
    Unknown,
    NotApplicable,
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Unknown
    }
}

impl<T> Field<T> {
    pub fn known(&self) -> Option<&T> {
        match self {
            Field::Known(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Field::Known(_))
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Field::Unknown)
    }

    pub fn is_not_applicable(&self) -> bool {
        matches!(self, Field::NotApplicable)
    }
}

impl<T: Clone> Field<T> {
    /// Take `other` only if this leaf is still unanswered.
    pub fn fill_from(&mut self, other: &Field<T>) {
        if self.is_unknown() && !other.is_unknown() {
            *self = other.clone();
        }
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Field::Known(v),
            None => Field::Unknown,
        }
    }
}

// ============================================
// PROVIDERS
// ============================================

/// Data sources. Declaration order is the global merge priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProviderName {
    #[serde(rename = "solana_chain")]
    SolanaChain,
    #[serde(rename = "dexscreener")]
    DexScreener,
    #[serde(rename = "rugcheck")]
    RugCheck,
    #[serde(rename = "birdeye")]
    Birdeye,
    #[serde(rename = "pumpfun")]
    PumpFun,
}

impl ProviderName {
    /// All providers in global priority order
    pub const ALL: [ProviderName; 5] = [
        ProviderName::SolanaChain,
        ProviderName::DexScreener,
        ProviderName::RugCheck,
        ProviderName::Birdeye,
        ProviderName::PumpFun,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderName::SolanaChain => "solana_chain",
            ProviderName::DexScreener => "dexscreener",
            ProviderName::RugCheck => "rugcheck",
            ProviderName::Birdeye => "birdeye",
            ProviderName::PumpFun => "pumpfun",
        }
    }

    /// Heavy providers are skipped in fast mode
    pub fn is_heavy(&self) -> bool {
        matches!(self, ProviderName::Birdeye | ProviderName::SolanaChain)
    }

    /// Position in the global priority list (0 = highest)
    pub fn priority(&self) -> usize {
        *self as usize
    }

    /// Parse a comma-separated selection such as `dexscreener,rugcheck`
    pub fn parse_list(list: &str) -> AppResult<BTreeSet<ProviderName>> {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ProviderName::from_str)
            .collect()
    }
}

impl fmt::Display for ProviderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderName {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "solana_chain" | "solana" | "chain" => Ok(ProviderName::SolanaChain),
            "dexscreener" => Ok(ProviderName::DexScreener),
            "rugcheck" => Ok(ProviderName::RugCheck),
            "birdeye" => Ok(ProviderName::Birdeye),
            "pumpfun" | "pump.fun" => Ok(ProviderName::PumpFun),
            other => Err(AppError::unknown_provider(other)),
        }
    }
}

// ============================================
// TOKEN PROFILE
// ============================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Authorities {
    pub mint_authority_present: Field<bool>,
    pub freeze_authority_present: Field<bool>,
    pub renounced: Field<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Liquidity {
    pub usd: Field<f64>,
    pub sol: Field<f64>,
    pub lock_pct: Field<f64>,
    pub lock_days: Field<u32>,
    pub lock_provider: Field<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tradeability {
    pub buy_tax_pct: Field<f64>,
    pub sell_tax_pct: Field<f64>,
    pub transfer_restricted: Field<bool>,
    pub honeypot_suspected: Field<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Concentration {
    pub top_holder_pct: Field<f64>,
    pub insider_pct: Field<f64>,
    pub whale_count: Field<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgeHype {
    pub age_days: Field<f64>,
    pub volume_spike_ratio: Field<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LaunchPlatform {
    pub dev_holding_pct: Field<f64>,
    pub migrated: Field<bool>,
    pub creation_context: Field<String>,
}

impl LaunchPlatform {
    /// Profile for a token that did not originate on the launch platform
    pub fn not_applicable() -> Self {
        Self {
            dev_holding_pct: Field::NotApplicable,
            migrated: Field::NotApplicable,
            creation_context: Field::NotApplicable,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Listings {
    pub venue_count: Field<u32>,
    pub exchanges: Field<BTreeSet<String>>,
}

/// Canonical per-token snapshot, grouped by risk category.
///
/// Adapters return the same type with only the fields they measured.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenProfile {
    pub authorities: Authorities,
    pub liquidity: Liquidity,
    pub tradeability: Tradeability,
    pub concentration: Concentration,
    pub age_hype: AgeHype,
    pub launch_platform: LaunchPlatform,
    pub listings: Listings,
}

// ============================================
// PROVIDER OUTCOMES
// ============================================

/// Why an adapter produced no data
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderFailure {
    pub code: ErrorCode,
    pub message: String,
}

impl From<AppError> for ProviderFailure {
    fn from(err: AppError) -> Self {
        Self {
            code: err.code,
            message: err.message,
        }
    }
}

impl fmt::Display for ProviderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

/// Tagged result of one adapter call. Never escapes as a panic or `Err`.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderOutcome {
    Ok(TokenProfile),
    PartialOk { profile: TokenProfile, warning: String },
    Unavailable(ProviderFailure),
    TimedOut,
}

impl ProviderOutcome {
    pub fn unavailable(code: ErrorCode, message: impl Into<String>) -> Self {
        ProviderOutcome::Unavailable(ProviderFailure {
            code,
            message: message.into(),
        })
    }

    pub fn profile(&self) -> Option<&TokenProfile> {
        match self {
            ProviderOutcome::Ok(profile) | ProviderOutcome::PartialOk { profile, .. } => {
                Some(profile)
            }
            _ => None,
        }
    }

    /// Contributed data to the profile
    pub fn is_success(&self) -> bool {
        self.profile().is_some()
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProviderOutcome::Ok(_) => "ok",
            ProviderOutcome::PartialOk { .. } => "partial",
            ProviderOutcome::Unavailable(_) => "unavailable",
            ProviderOutcome::TimedOut => "timed_out",
        }
    }

    /// Report warning line, `None` for a clean `Ok`
    pub fn warning_for(&self, provider: ProviderName) -> Option<String> {
        match self {
            ProviderOutcome::Ok(_) => None,
            ProviderOutcome::PartialOk { warning, .. } => {
                Some(format!("{}: partial data ({})", provider, warning))
            }
            ProviderOutcome::Unavailable(failure) => {
                Some(format!("{}: unavailable {}", provider, failure))
            }
            ProviderOutcome::TimedOut => Some(format!(
                "{}: timed out [{}]",
                provider,
                ErrorCode::ProviderTimeout.as_str()
            )),
        }
    }
}

impl From<AppError> for ProviderOutcome {
    fn from(err: AppError) -> Self {
        if err.code == ErrorCode::ProviderTimeout {
            ProviderOutcome::TimedOut
        } else {
            ProviderOutcome::Unavailable(err.into())
        }
    }
}

impl From<AppResult<TokenProfile>> for ProviderOutcome {
    fn from(result: AppResult<TokenProfile>) -> Self {
        match result {
            Ok(profile) => ProviderOutcome::Ok(profile),
            Err(err) => err.into(),
        }
    }
}

/// An outcome tagged with the provider that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct SourcedOutcome {
    pub provider: ProviderName,
    pub outcome: ProviderOutcome,
}

/// Everything one fetch round produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchRound {
    /// Outcomes sorted by provider priority
    pub outcomes: Vec<SourcedOutcome>,
    /// Enabled providers excluded by fast mode
    pub skipped: Vec<ProviderName>,
}

// ============================================
// RULES & REPORT
// ============================================

/// Risk categories in fixed report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Authorities,
    Liquidity,
    Tradeability,
    Concentration,
    AgeHype,
    LaunchPlatform,
    Listings,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Authorities,
        Category::Liquidity,
        Category::Tradeability,
        Category::Concentration,
        Category::AgeHype,
        Category::LaunchPlatform,
        Category::Listings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Authorities => "authorities",
            Category::Liquidity => "liquidity",
            Category::Tradeability => "tradeability",
            Category::Concentration => "concentration",
            Category::AgeHype => "age_hype",
            Category::LaunchPlatform => "launch_platform",
            Category::Listings => "listings",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Category::Authorities => "Authorities",
            Category::Liquidity => "Liquidity",
            Category::Tradeability => "Tradeability",
            Category::Concentration => "Concentration",
            Category::AgeHype => "Age/Hype",
            Category::LaunchPlatform => "Launch Platform",
            Category::Listings => "Listings",
        }
    }

    pub fn weight_bps(&self) -> u32 {
        match self {
            Category::Authorities => WEIGHT_BPS_AUTHORITIES,
            Category::Liquidity => WEIGHT_BPS_LIQUIDITY,
            Category::Tradeability => WEIGHT_BPS_TRADEABILITY,
            Category::Concentration => WEIGHT_BPS_CONCENTRATION,
            Category::AgeHype => WEIGHT_BPS_AGE_HYPE,
            Category::LaunchPlatform => WEIGHT_BPS_LAUNCH_PLATFORM,
            Category::Listings => WEIGHT_BPS_LISTINGS,
        }
    }

    pub fn weight(&self) -> f64 {
        self.weight_bps() as f64 / WEIGHT_BPS_TOTAL as f64
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn from_subscore(subscore: u8) -> Self {
        if subscore <= SEVERITY_LOW_MAX {
            Severity::Low
        } else if subscore < SEVERITY_HIGH_MIN {
            Severity::Medium
        } else {
            Severity::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Severity::Low => "🟢",
            Severity::Medium => "🟠",
            Severity::High => "🔴",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Full,
    Degraded,
}

impl Confidence {
    /// `Degraded` if any part is degraded
    pub fn combine(self, other: Confidence) -> Confidence {
        if self == Confidence::Degraded || other == Confidence::Degraded {
            Confidence::Degraded
        } else {
            Confidence::Full
        }
    }
}

/// Final three-tier classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    LikelyOk,
    Caution,
    HighRisk,
}

impl Verdict {
    pub fn from_score(overall: u8) -> Self {
        if overall <= VERDICT_LIKELY_OK_MAX {
            Verdict::LikelyOk
        } else if overall <= VERDICT_CAUTION_MAX {
            Verdict::Caution
        } else {
            Verdict::HighRisk
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::LikelyOk => "Likely OK (still DYOR)",
            Verdict::Caution => "Caution",
            Verdict::HighRisk => "High Risk / Avoid",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Verdict::LikelyOk => "✅",
            Verdict::Caution => "⚠️",
            Verdict::HighRisk => "💀",
        }
    }
}

/// Output of one category evaluator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleResult {
    pub category: Category,
    /// 0..=100
    pub subscore: u8,
    pub severity: Severity,
    pub message: String,
    /// Weight applied by the combiner (fraction of 1.0)
    pub weight: f64,
    pub confidence: Confidence,
}

/// Terminal analysis artifact. Fields are read-only once assembled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    token: String,
    overall: u8,
    verdict: Verdict,
    results: Vec<RuleResult>,
    sources: BTreeSet<ProviderName>,
    warnings: Vec<String>,
    confidence: Confidence,
}

impl Report {
    pub(crate) fn new(
        token: String,
        overall: u8,
        results: Vec<RuleResult>,
        sources: BTreeSet<ProviderName>,
        warnings: Vec<String>,
    ) -> Self {
        let confidence = results
            .iter()
            .fold(Confidence::Full, |acc, r| acc.combine(r.confidence));

        Self {
            token,
            overall,
            verdict: Verdict::from_score(overall),
            results,
            sources,
            warnings,
            confidence,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn overall(&self) -> u8 {
        self.overall
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// Seven results in fixed category order
    pub fn results(&self) -> &[RuleResult] {
        &self.results
    }

    pub fn result(&self, category: Category) -> Option<&RuleResult> {
        self.results.iter().find(|r| r.category == category)
    }

    pub fn sources(&self) -> &BTreeSet<ProviderName> {
        &self.sources
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn confidence(&self) -> Confidence {
        self.confidence
    }

    /// Count of results per severity (low, medium, high)
    pub fn severity_counts(&self) -> (usize, usize, usize) {
        self.results
            .iter()
            .fold((0, 0, 0), |(low, med, high), r| match r.severity {
                Severity::Low => (low + 1, med, high),
                Severity::Medium => (low, med + 1, high),
                Severity::High => (low, med, high + 1),
            })
    }

    /// Results at or above `min` severity, in category order
    pub fn concerns(&self, min: Severity) -> Vec<&RuleResult> {
        self.results.iter().filter(|r| r.severity >= min).collect()
    }

    /// Pretty print the report
    pub fn summary(&self) -> String {
        let mut output = format!(
            "\n{} {} | Score: {}/100 | Token: {}\n",
            self.verdict.emoji(),
            self.verdict.label(),
            self.overall,
            self.token
        );

        let sources: Vec<&str> = self.sources.iter().map(|p| p.as_str()).collect();
        output.push_str(&format!(
            "   Sources: {}\n",
            if sources.is_empty() {
                "none".to_string()
            } else {
                sources.join(", ")
            }
        ));

        let (low, med, high) = self.severity_counts();
        output.push_str(&format!(
            "   Severity: {} high, {} medium, {} low\n",
            high, med, low
        ));

        output.push_str("   Rules:\n");
        for r in &self.results {
            output.push_str(&format!(
                "     {} {:<16} {:>3} (w {:.2}){} - {}\n",
                r.severity.emoji(),
                r.category.title(),
                r.subscore,
                r.weight,
                if r.confidence == Confidence::Degraded {
                    " ~"
                } else {
                    ""
                },
                r.message
            ));
        }

        if !self.warnings.is_empty() {
            output.push_str("   Warnings:\n");
            for w in &self.warnings {
                output.push_str(&format!("     - {}\n", w));
            }
        }

        output
    }
}
