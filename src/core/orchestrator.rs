//! Fetch Orchestrator
//!
//! Runs every enabled adapter concurrently under one shared deadline.
//! Each adapter gets `min(per_provider_timeout, total_deadline)`; a slow,
//! failing or panicking adapter only ever turns into its own outcome. When the
//! deadline fires, tasks still running are aborted and reported as `TimedOut`.
//! Outcomes come back sorted by provider priority.

use futures_util::FutureExt;
use std::any::Any;
use std::collections::{BTreeMap, BTreeSet};
use std::panic::AssertUnwindSafe;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::models::{ErrorCode, FetchRound, ProviderName, ProviderOutcome, SourcedOutcome};
use crate::providers::ProviderRegistry;
use crate::utils::constants::MAX_TOTAL_DEADLINE_SECS;

/// Concurrent fan-out over the provider registry
#[derive(Clone)]
pub struct FetchOrchestrator {
    registry: ProviderRegistry,
    per_provider_timeout: Duration,
}

impl FetchOrchestrator {
    pub fn new(registry: ProviderRegistry, per_provider_timeout: Duration) -> Self {
        Self {
            registry,
            per_provider_timeout,
        }
    }

    /// One fetch round. Never fails; every enabled provider ends up either in
    /// `outcomes` or (fast mode) in `skipped`.
    pub async fn collect(
        &self,
        token: &str,
        enabled: &BTreeSet<ProviderName>,
        fast_mode: bool,
        total_deadline: Duration,
    ) -> FetchRound {
        let total_deadline = total_deadline.min(Duration::from_secs(MAX_TOTAL_DEADLINE_SECS));
        let started = Instant::now();
        let deadline = started + total_deadline;
        let budget = self.per_provider_timeout.min(total_deadline);

        let mut outcomes: BTreeMap<ProviderName, ProviderOutcome> = BTreeMap::new();
        let mut skipped = Vec::new();
        let mut pending: BTreeSet<ProviderName> = BTreeSet::new();
        let mut set = JoinSet::new();

        for &provider in enabled {
            if fast_mode && provider.is_heavy() {
                debug!("⏭️  Fast mode: skipping {}", provider);
                skipped.push(provider);
                continue;
            }

            let adapter = match self.registry.get(provider) {
                Some(adapter) => adapter,
                None => {
                    warn!("⚠️ No adapter registered for {}", provider);
                    outcomes.insert(
                        provider,
                        ProviderOutcome::unavailable(
                            ErrorCode::ProviderInternal,
                            "no adapter registered",
                        ),
                    );
                    continue;
                }
            };

            let token = token.to_string();
            pending.insert(provider);
            set.spawn(async move {
                let call = AssertUnwindSafe(adapter.fetch(&token, budget)).catch_unwind();
                let outcome = match tokio::time::timeout(budget, call).await {
                    Ok(Ok(outcome)) => outcome,
                    Ok(Err(panic)) => ProviderOutcome::unavailable(
                        ErrorCode::ProviderInternal,
                        format!("adapter panicked: {}", panic_message(panic.as_ref())),
                    ),
                    Err(_) => ProviderOutcome::TimedOut,
                };
                (provider, outcome)
            });
        }

        info!(
            "🚀 Fetching {} providers (budget {}ms, deadline {}ms{})",
            pending.len(),
            budget.as_millis(),
            total_deadline.as_millis(),
            if fast_mode { ", fast mode" } else { "" }
        );

        let mut deadline_hit = false;
        loop {
            match tokio::time::timeout_at(deadline, set.join_next()).await {
                Ok(Some(Ok((provider, outcome)))) => {
                    debug!(
                        "📥 {} -> {} after {}ms",
                        provider,
                        outcome.label(),
                        started.elapsed().as_millis()
                    );
                    pending.remove(&provider);
                    outcomes.insert(provider, outcome);
                }
                Ok(Some(Err(e))) => {
                    warn!("⚠️ Provider task failed: {}", e);
                }
                Ok(None) => break,
                Err(_) => {
                    deadline_hit = true;
                    set.abort_all();
                    warn!(
                        "⏱️  Deadline of {}ms reached with {} providers outstanding",
                        total_deadline.as_millis(),
                        pending.len()
                    );
                    break;
                }
            }
        }

        for provider in pending {
            let outcome = if deadline_hit {
                ProviderOutcome::TimedOut
            } else {
                ProviderOutcome::unavailable(ErrorCode::ProviderInternal, "provider task lost")
            };
            outcomes.insert(provider, outcome);
        }

        FetchRound {
            outcomes: outcomes
                .into_iter()
                .map(|(provider, outcome)| SourcedOutcome { provider, outcome })
                .collect(),
            skipped,
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
