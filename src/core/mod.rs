//! Core Module - Aggregation & Scoring Engine
//!
//! Fetch orchestration, profile merging, rule evaluation and report assembly.

pub mod analyzer;
pub mod orchestrator;
pub mod profile;
pub mod rules;
pub mod scoring;

pub use analyzer::TokenAnalyzer;
pub use orchestrator::FetchOrchestrator;
pub use profile::ProfileBuilder;
pub use rules::evaluate_all;
pub use scoring::{assemble_report, combine};
