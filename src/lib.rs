//! SolSafety Library
//!
//! Multi-provider Solana token safety engine:
//! - Concurrent fetch from chain RPC, DexScreener, RugCheck, Birdeye and Pump.fun
//! - Normalized tri-state token profile (known / unknown / not applicable)
//! - Seven deterministic category rules and a weighted overall score
//! - Per-provider failures degrade into report warnings, never errors

pub mod core;
pub mod models;
pub mod providers;
pub mod utils;

pub use crate::core::{FetchOrchestrator, ProfileBuilder, TokenAnalyzer};
pub use models::{
    AnalyzerConfig, AppError, AppResult, Category, Confidence, ErrorCode, Field, FetchRound,
    ProviderFailure, ProviderName, ProviderOutcome, Report, RuleResult, Severity, SourcedOutcome,
    TokenProfile, Verdict,
};
pub use providers::{ProviderAdapter, ProviderRegistry};
pub use utils::is_valid_solana_address;
