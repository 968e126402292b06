//! Profile Builder
//!
//! Merges partial adapter profiles into one canonical `TokenProfile`.
//! Per category, contributors are ranked by that category's authority list and
//! then by global provider priority; per field the first answer wins. Arrival
//! order never matters.

use crate::models::{Category, ProviderName, SourcedOutcome, TokenProfile};

/// Trusted sources per category, most trusted first
pub fn authority_order(category: Category) -> &'static [ProviderName] {
    use ProviderName::*;
    match category {
        Category::Authorities => &[SolanaChain, RugCheck, Birdeye],
        Category::Liquidity => &[DexScreener, Birdeye, RugCheck],
        Category::Tradeability => &[RugCheck, Birdeye, SolanaChain],
        // largest token accounts on chain include pool vaults; RugCheck resolves holders
        Category::Concentration => &[RugCheck, SolanaChain, Birdeye],
        Category::AgeHype => &[DexScreener, Birdeye, PumpFun],
        Category::LaunchPlatform => &[PumpFun, RugCheck],
        Category::Listings => &[DexScreener, Birdeye],
    }
}

/// Merge rank of `provider` for `category` (lower wins)
pub fn merge_rank(category: Category, provider: ProviderName) -> usize {
    let order = authority_order(category);
    order
        .iter()
        .position(|p| *p == provider)
        .unwrap_or(order.len() + provider.priority())
}

/// Collects partial profiles and merges them deterministically
#[derive(Debug, Default)]
pub struct ProfileBuilder<'a> {
    partials: Vec<(ProviderName, &'a TokenProfile)>,
}

impl<'a> ProfileBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only `Ok` and `PartialOk` outcomes carry data
    pub fn from_outcomes(outcomes: &'a [SourcedOutcome]) -> Self {
        outcomes
            .iter()
            .fold(Self::new(), |builder, o| match o.outcome.profile() {
                Some(profile) => builder.with_partial(o.provider, profile),
                None => builder,
            })
    }

    pub fn with_partial(mut self, provider: ProviderName, profile: &'a TokenProfile) -> Self {
        self.partials.push((provider, profile));
        self
    }

    pub fn build(&self) -> TokenProfile {
        let mut profile = TokenProfile::default();

        for category in Category::ALL {
            let mut ranked: Vec<&(ProviderName, &TokenProfile)> = self.partials.iter().collect();
            ranked.sort_by_key(|(provider, _)| (merge_rank(category, *provider), *provider));

            for (_, partial) in ranked {
                merge_category(&mut profile, partial, category);
            }
        }

        profile
    }
}

fn merge_category(into: &mut TokenProfile, from: &TokenProfile, category: Category) {
    match category {
        Category::Authorities => {
            let (a, b) = (&mut into.authorities, &from.authorities);
            a.mint_authority_present.fill_from(&b.mint_authority_present);
            a.freeze_authority_present.fill_from(&b.freeze_authority_present);
            a.renounced.fill_from(&b.renounced);
        }
        Category::Liquidity => {
            let (a, b) = (&mut into.liquidity, &from.liquidity);
            a.usd.fill_from(&b.usd);
            a.sol.fill_from(&b.sol);
            a.lock_pct.fill_from(&b.lock_pct);
            a.lock_days.fill_from(&b.lock_days);
            a.lock_provider.fill_from(&b.lock_provider);
        }
        Category::Tradeability => {
            let (a, b) = (&mut into.tradeability, &from.tradeability);
            a.buy_tax_pct.fill_from(&b.buy_tax_pct);
            a.sell_tax_pct.fill_from(&b.sell_tax_pct);
            a.transfer_restricted.fill_from(&b.transfer_restricted);
            a.honeypot_suspected.fill_from(&b.honeypot_suspected);
        }
        Category::Concentration => {
            let (a, b) = (&mut into.concentration, &from.concentration);
            a.top_holder_pct.fill_from(&b.top_holder_pct);
            a.insider_pct.fill_from(&b.insider_pct);
            a.whale_count.fill_from(&b.whale_count);
        }
        Category::AgeHype => {
            let (a, b) = (&mut into.age_hype, &from.age_hype);
            a.age_days.fill_from(&b.age_days);
            a.volume_spike_ratio.fill_from(&b.volume_spike_ratio);
        }
        Category::LaunchPlatform => {
            let (a, b) = (&mut into.launch_platform, &from.launch_platform);
            a.dev_holding_pct.fill_from(&b.dev_holding_pct);
            a.migrated.fill_from(&b.migrated);
            a.creation_context.fill_from(&b.creation_context);
        }
        Category::Listings => {
            let (a, b) = (&mut into.listings, &from.listings);
            a.venue_count.fill_from(&b.venue_count);
            a.exchanges.fill_from(&b.exchanges);
        }
    }
}
