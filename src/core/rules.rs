//! Rule Evaluators - one pure function per risk category
//!
//! Each evaluator reads only its own profile section and returns a subscore in
//! 0..=100 (higher = riskier). Unknown inputs add a fixed "unknown" penalty
//! instead of being treated as zero; if every input of a category is unknown
//! the category's neutral default is used. Either way the result is marked
//! `Confidence::Degraded`.

use crate::models::{
    AgeHype, Authorities, Category, Concentration, Confidence, Field, LaunchPlatform, Listings,
    Liquidity, RuleResult, Severity, TokenProfile, Tradeability,
};
use crate::utils::constants::*;

/// Running subscore for one category
struct Tally {
    category: Category,
    points: u32,
    degraded: bool,
    notes: Vec<String>,
}

impl Tally {
    fn new(category: Category) -> Self {
        Self {
            category,
            points: 0,
            degraded: false,
            notes: Vec::new(),
        }
    }

    fn add(&mut self, points: u8, note: impl Into<String>) {
        self.points += points as u32;
        self.notes.push(note.into());
    }

    fn add_unknown(&mut self, points: u8, note: impl Into<String>) {
        self.degraded = true;
        self.add(points, note);
    }

    /// Raise the running total to at least `floor`
    fn floor(&mut self, floor: u8) {
        self.points = self.points.max(floor as u32);
    }

    fn finish(self) -> RuleResult {
        let confidence = if self.degraded {
            Confidence::Degraded
        } else {
            Confidence::Full
        };
        result(self.category, self.points, self.notes.join("; "), confidence)
    }
}

fn result(category: Category, points: u32, message: String, confidence: Confidence) -> RuleResult {
    let subscore = points.min(100) as u8;
    RuleResult {
        category,
        subscore,
        severity: Severity::from_subscore(subscore),
        message,
        weight: category.weight(),
        confidence,
    }
}

fn neutral(category: Category, subscore: u8, message: &str) -> RuleResult {
    result(category, subscore as u32, message.to_string(), Confidence::Degraded)
}

/// `Unknown` and `NotApplicable` both count as "no answer" here
fn all_unanswered<T>(fields: &[&Field<T>]) -> bool {
    fields.iter().all(|f| !f.is_known())
}

fn count_band_at_least(value: u32, bands: &[(u32, u8)]) -> u8 {
    bands
        .iter()
        .find(|(min, _)| value >= *min)
        .map(|(_, pts)| *pts)
        .unwrap_or(0)
}

fn count_band_below(value: u32, bands: &[(u32, u8)]) -> u8 {
    bands
        .iter()
        .find(|(max, _)| value < *max)
        .map(|(_, pts)| *pts)
        .unwrap_or(0)
}

/// Evaluate all seven categories in fixed report order
pub fn evaluate_all(profile: &TokenProfile) -> Vec<RuleResult> {
    vec![
        evaluate_authorities(&profile.authorities),
        evaluate_liquidity(&profile.liquidity),
        evaluate_tradeability(&profile.tradeability),
        evaluate_concentration(&profile.concentration),
        evaluate_age_hype(&profile.age_hype),
        evaluate_launch_platform(&profile.launch_platform),
        evaluate_listings(&profile.listings),
    ]
}

/// Active mint / freeze authority
pub fn evaluate_authorities(a: &Authorities) -> RuleResult {
    if all_unanswered(&[&a.mint_authority_present, &a.freeze_authority_present, &a.renounced]) {
        return neutral(Category::Authorities, NEUTRAL_AUTHORITIES, "authority status unknown");
    }

    let mut tally = Tally::new(Category::Authorities);
    let renounced = a.renounced == Field::Known(true);

    match a.mint_authority_present {
        Field::Known(true) => tally.add(AUTH_MINT_ACTIVE, "mint authority active"),
        Field::Known(false) => tally.add(0, "mint authority revoked"),
        _ if renounced => tally.add(0, "authorities renounced"),
        _ => tally.add_unknown(AUTH_MINT_UNKNOWN, "mint authority unknown"),
    }

    match a.freeze_authority_present {
        Field::Known(true) => tally.add(AUTH_FREEZE_ACTIVE, "freeze authority active"),
        Field::Known(false) => tally.add(0, "freeze authority revoked"),
        _ if renounced => {}
        _ => tally.add_unknown(AUTH_FREEZE_UNKNOWN, "freeze authority unknown"),
    }

    tally.finish()
}

/// Pool depth and LP lock
pub fn evaluate_liquidity(l: &Liquidity) -> RuleResult {
    if all_unanswered(&[&l.usd, &l.sol, &l.lock_pct]) && !l.lock_days.is_known() {
        return neutral(Category::Liquidity, NEUTRAL_LIQUIDITY, "liquidity unknown");
    }

    let mut tally = Tally::new(Category::Liquidity);

    match (&l.usd, &l.sol) {
        (Field::Known(usd), _) => tally.add(
            band_below(*usd, &LIQ_USD_BANDS, LIQ_USD_DEEP),
            format!("${:.0} liquidity", usd),
        ),
        (_, Field::Known(sol)) => tally.add(
            band_below(*sol, &LIQ_SOL_BANDS, LIQ_SOL_DEEP),
            format!("{:.1} SOL liquidity", sol),
        ),
        _ => tally.add_unknown(LIQ_POOL_UNKNOWN, "pool depth unknown"),
    }

    let unlocked = l.lock_pct.known().map_or(false, |p| *p <= 0.0)
        || l.lock_days.known().map_or(false, |d| *d == 0);
    if unlocked {
        tally.add(LOCK_UNLOCKED, "LP unlocked");
    } else {
        match &l.lock_pct {
            Field::Known(pct) => tally.add(
                band_below(*pct, &LOCK_PCT_BANDS, 0),
                format!("{:.0}% LP locked", pct),
            ),
            _ => tally.add_unknown(LOCK_PCT_UNKNOWN, "LP lock share unknown"),
        }
        match &l.lock_days {
            Field::Known(days) => tally.add(
                count_band_below(*days, &LOCK_DAYS_BANDS),
                format!("lock {}d", days),
            ),
            _ => tally.add_unknown(LOCK_DAYS_UNKNOWN, "lock duration unknown"),
        }
    }

    tally.finish()
}

/// Taxes, honeypot and transfer restrictions
pub fn evaluate_tradeability(t: &Tradeability) -> RuleResult {
    if all_unanswered(&[&t.buy_tax_pct, &t.sell_tax_pct])
        && all_unanswered(&[&t.transfer_restricted, &t.honeypot_suspected])
    {
        return neutral(Category::Tradeability, NEUTRAL_TRADEABILITY, "tradeability unknown");
    }

    let mut tally = Tally::new(Category::Tradeability);

    match &t.sell_tax_pct {
        Field::Known(tax) => {
            let floor = if *tax > 0.0 { SELL_TAX_NONZERO } else { 0 };
            tally.add(
                band_at_least(*tax, &SELL_TAX_BANDS, floor),
                format!("sell tax {:.1}%", tax),
            );
        }
        _ => tally.add_unknown(SELL_TAX_UNKNOWN, "sell tax unknown"),
    }

    match &t.buy_tax_pct {
        Field::Known(tax) => tally.add(
            band_at_least(*tax, &BUY_TAX_BANDS, 0),
            format!("buy tax {:.1}%", tax),
        ),
        _ => tally.add_unknown(BUY_TAX_UNKNOWN, "buy tax unknown"),
    }

    if !t.honeypot_suspected.is_known() || !t.transfer_restricted.is_known() {
        tally.degraded = true;
    }
    if t.honeypot_suspected == Field::Known(true) {
        tally.notes.push("honeypot suspected".to_string());
        tally.floor(RESTRICTION_FLOOR);
    }
    if t.transfer_restricted == Field::Known(true) {
        tally.notes.push("transfers restricted".to_string());
        tally.floor(RESTRICTION_FLOOR);
    }

    tally.finish()
}

/// Holder concentration
pub fn evaluate_concentration(c: &Concentration) -> RuleResult {
    if all_unanswered(&[&c.top_holder_pct, &c.insider_pct]) && !c.whale_count.is_known() {
        return neutral(Category::Concentration, NEUTRAL_CONCENTRATION, "holder data unknown");
    }

    let mut tally = Tally::new(Category::Concentration);

    match &c.top_holder_pct {
        Field::Known(pct) => tally.add(
            band_at_least(*pct, &TOP_HOLDER_BANDS, TOP_HOLDER_BASE),
            format!("top holder {:.1}%", pct),
        ),
        _ => tally.add_unknown(TOP_HOLDER_UNKNOWN, "top holder unknown"),
    }
    match &c.insider_pct {
        Field::Known(pct) => tally.add(
            band_at_least(*pct, &INSIDER_BANDS, 0),
            format!("insiders {:.1}%", pct),
        ),
        _ => tally.add_unknown(INSIDER_UNKNOWN, "insiders unknown"),
    }
    match &c.whale_count {
        Field::Known(n) => tally.add(count_band_at_least(*n, &WHALE_BANDS), format!("{} whales", n)),
        _ => tally.add_unknown(WHALE_UNKNOWN, "whales unknown"),
    }

    tally.finish()
}

/// Token age and volume spike
pub fn evaluate_age_hype(h: &AgeHype) -> RuleResult {
    if all_unanswered(&[&h.age_days, &h.volume_spike_ratio]) {
        return neutral(Category::AgeHype, NEUTRAL_AGE_HYPE, "age and volume unknown");
    }

    let mut tally = Tally::new(Category::AgeHype);

    match &h.age_days {
        Field::Known(days) => tally.add(
            band_below(*days, &AGE_DAYS_BANDS, 0),
            format!("{:.1} days old", days),
        ),
        _ => tally.add_unknown(AGE_UNKNOWN, "age unknown"),
    }
    match &h.volume_spike_ratio {
        Field::Known(ratio) => tally.add(
            band_at_least(*ratio, &SPIKE_BANDS, 0),
            format!("volume spike x{:.1}", ratio),
        ),
        _ => tally.add_unknown(SPIKE_UNKNOWN, "volume trend unknown"),
    }

    tally.finish()
}

/// Launch-platform origin, developer holdings and migration
pub fn evaluate_launch_platform(lp: &LaunchPlatform) -> RuleResult {
    let not_applicable = lp.creation_context.is_not_applicable()
        || (lp.dev_holding_pct.is_not_applicable() && lp.migrated.is_not_applicable());
    if not_applicable {
        return result(
            Category::LaunchPlatform,
            NOT_APPLICABLE_LAUNCH_PLATFORM as u32,
            "not a launch-platform token".to_string(),
            Confidence::Full,
        );
    }

    // dev holdings alone do not establish a launch-platform origin
    if !lp.creation_context.is_known() {
        return neutral(
            Category::LaunchPlatform,
            NEUTRAL_LAUNCH_PLATFORM,
            "launch origin unknown",
        );
    }

    let mut tally = Tally::new(Category::LaunchPlatform);
    if let Field::Known(context) = &lp.creation_context {
        tally.notes.push(context.clone());
    }

    match &lp.dev_holding_pct {
        Field::Known(pct) => tally.add(
            band_at_least(*pct, &DEV_HOLDING_BANDS, 0),
            format!("dev holds {:.1}%", pct),
        ),
        Field::NotApplicable => {}
        Field::Unknown => tally.add_unknown(DEV_HOLDING_UNKNOWN, "dev holdings unknown"),
    }
    match &lp.migrated {
        Field::Known(true) => tally.add(0, "migrated"),
        Field::Known(false) => tally.add(NOT_MIGRATED, "still on bonding curve"),
        Field::NotApplicable => {}
        Field::Unknown => tally.add_unknown(MIGRATION_UNKNOWN, "migration unknown"),
    }

    tally.finish()
}

/// Venue / exchange presence
pub fn evaluate_listings(l: &Listings) -> RuleResult {
    let presence = match (&l.exchanges, &l.venue_count) {
        (Field::Known(set), _) => set.len(),
        (_, Field::Known(n)) => *n as usize,
        _ => return neutral(Category::Listings, NEUTRAL_LISTINGS, "listings unknown"),
    };

    let mut tally = Tally::new(Category::Listings);
    let points = LISTINGS_BY_COUNT
        .get(presence)
        .copied()
        .unwrap_or(LISTINGS_WIDE);
    let note = match &l.exchanges {
        Field::Known(set) if !set.is_empty() => format!(
            "listed on {}",
            set.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
        ),
        _ => format!("{} venues", presence),
    };
    tally.add(points, note);

    tally.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn assert_in_range(r: &RuleResult) {
        assert!(r.subscore <= 100, "{} out of range", r.category);
    }

    #[test]
    fn test_all_unknown_uses_neutral_defaults() {
        let results = evaluate_all(&TokenProfile::default());
        let expected = [
            NEUTRAL_AUTHORITIES,
            NEUTRAL_LIQUIDITY,
            NEUTRAL_TRADEABILITY,
            NEUTRAL_CONCENTRATION,
            NEUTRAL_AGE_HYPE,
            NEUTRAL_LAUNCH_PLATFORM,
            NEUTRAL_LISTINGS,
        ];

        assert_eq!(results.len(), 7);
        for ((r, neutral), category) in results.iter().zip(expected).zip(Category::ALL) {
            assert_eq!(r.category, category);
            assert_eq!(r.subscore, neutral, "{}", category);
            assert_eq!(r.confidence, Confidence::Degraded);
            assert!(r.subscore > 0, "unknown must not score as zero");
        }
    }

    #[test]
    fn test_authorities() {
        let active = Authorities {
            mint_authority_present: Field::Known(true),
            freeze_authority_present: Field::Known(true),
            renounced: Field::Known(false),
        };
        let r = evaluate_authorities(&active);
        assert_eq!(r.subscore, 100);
        assert_eq!(r.severity, Severity::High);
        assert_eq!(r.confidence, Confidence::Full);

        let renounced = Authorities {
            renounced: Field::Known(true),
            ..Authorities::default()
        };
        let r = evaluate_authorities(&renounced);
        assert_eq!(r.subscore, 0);
        assert_eq!(r.confidence, Confidence::Full);

        let mint_only = Authorities {
            mint_authority_present: Field::Known(true),
            ..Authorities::default()
        };
        let r = evaluate_authorities(&mint_only);
        assert_eq!(r.subscore, AUTH_MINT_ACTIVE + AUTH_FREEZE_UNKNOWN);
        assert_eq!(r.confidence, Confidence::Degraded);
    }

    #[test]
    fn test_liquidity_thin_and_unlocked() {
        let l = Liquidity {
            usd: Field::Known(800.0),
            lock_pct: Field::Known(0.0),
            ..Liquidity::default()
        };
        let r = evaluate_liquidity(&l);
        assert_eq!(r.subscore, 100);
        assert!(r.message.contains("unlocked"));
    }

    #[test]
    fn test_liquidity_deep_and_locked() {
        let l = Liquidity {
            usd: Field::Known(250_000.0),
            lock_pct: Field::Known(100.0),
            lock_days: Field::Known(365),
            ..Liquidity::default()
        };
        let r = evaluate_liquidity(&l);
        assert_eq!(r.subscore, LIQ_USD_DEEP);
        assert_eq!(r.confidence, Confidence::Full);
    }

    #[test]
    fn test_liquidity_sol_fallback() {
        let l = Liquidity {
            sol: Field::Known(5.0),
            lock_pct: Field::Known(100.0),
            lock_days: Field::Known(365),
            ..Liquidity::default()
        };
        assert_eq!(evaluate_liquidity(&l).subscore, 50);
    }

    #[test]
    fn test_liquidity_is_monotonic_in_depth() {
        let mut last = u8::MAX;
        for usd in [0.0, 500.0, 1_500.0, 5_000.0, 20_000.0, 100_000.0, 1e9] {
            let l = Liquidity {
                usd: Field::Known(usd),
                lock_pct: Field::Known(100.0),
                lock_days: Field::Known(400),
                ..Liquidity::default()
            };
            let s = evaluate_liquidity(&l).subscore;
            assert!(s <= last, "deeper pool scored riskier at ${}", usd);
            last = s;
        }
    }

    #[test]
    fn test_tradeability_taxes() {
        let t = Tradeability {
            buy_tax_pct: Field::Known(0.0),
            sell_tax_pct: Field::Known(10.0),
            transfer_restricted: Field::Known(false),
            honeypot_suspected: Field::Known(false),
        };
        let r = evaluate_tradeability(&t);
        assert_eq!(r.subscore, 45);
        assert_eq!(r.confidence, Confidence::Full);

        let clean = Tradeability {
            sell_tax_pct: Field::Known(0.0),
            ..t.clone()
        };
        assert_eq!(evaluate_tradeability(&clean).subscore, 0);

        let small = Tradeability {
            sell_tax_pct: Field::Known(1.0),
            ..t
        };
        assert_eq!(evaluate_tradeability(&small).subscore, SELL_TAX_NONZERO);
    }

    #[test]
    fn test_honeypot_floor() {
        let t = Tradeability {
            buy_tax_pct: Field::Known(0.0),
            sell_tax_pct: Field::Known(0.0),
            transfer_restricted: Field::Known(false),
            honeypot_suspected: Field::Known(true),
        };
        let r = evaluate_tradeability(&t);
        assert_eq!(r.subscore, RESTRICTION_FLOOR);
        assert_eq!(r.severity, Severity::High);
    }

    #[test]
    fn test_tax_monotonic_and_clamped() {
        let mut last = 0;
        for tax in [0.0, 1.0, 5.0, 10.0, 25.0, 99.0] {
            let t = Tradeability {
                buy_tax_pct: Field::Known(tax),
                sell_tax_pct: Field::Known(tax),
                transfer_restricted: Field::Known(true),
                honeypot_suspected: Field::Known(true),
            };
            let r = evaluate_tradeability(&t);
            assert_in_range(&r);
            assert!(r.subscore >= last);
            last = r.subscore;
        }
    }

    #[test]
    fn test_concentration() {
        let c = Concentration {
            top_holder_pct: Field::Known(60.0),
            insider_pct: Field::Known(35.0),
            whale_count: Field::Known(12),
        };
        let r = evaluate_concentration(&c);
        assert_eq!(r.subscore, 100);
        assert_eq!(r.confidence, Confidence::Full);

        let partial = Concentration {
            top_holder_pct: Field::Known(60.0),
            ..Concentration::default()
        };
        let r = evaluate_concentration(&partial);
        assert_eq!(r.subscore, 60 + INSIDER_UNKNOWN + WHALE_UNKNOWN);
        assert_eq!(r.confidence, Confidence::Degraded);
    }

    #[test]
    fn test_age_hype() {
        let fresh = AgeHype {
            age_days: Field::Known(0.5),
            volume_spike_ratio: Field::Known(12.0),
        };
        assert_eq!(evaluate_age_hype(&fresh).subscore, 100);

        let mature = AgeHype {
            age_days: Field::Known(400.0),
            volume_spike_ratio: Field::Known(1.0),
        };
        assert_eq!(evaluate_age_hype(&mature).subscore, 0);

        let one_day = AgeHype {
            age_days: Field::Known(1.0),
            ..AgeHype::default()
        };
        assert_eq!(evaluate_age_hype(&one_day).subscore, 45 + SPIKE_UNKNOWN);
    }

    #[test]
    fn test_launch_platform_not_applicable() {
        let r = evaluate_launch_platform(&LaunchPlatform::not_applicable());
        assert_eq!(r.subscore, NOT_APPLICABLE_LAUNCH_PLATFORM);
        assert_eq!(r.confidence, Confidence::Full);
    }

    #[test]
    fn test_launch_platform_fresh_pump() {
        let lp = LaunchPlatform {
            dev_holding_pct: Field::Known(25.0),
            migrated: Field::Known(false),
            creation_context: Field::Known("pump.fun launch".to_string()),
        };
        let r = evaluate_launch_platform(&lp);
        assert_eq!(r.subscore, 45 + NOT_MIGRATED);
        assert!(r.message.starts_with("pump.fun launch"));
    }

    #[test]
    fn test_launch_platform_origin_unknown_is_neutral() {
        let lp = LaunchPlatform {
            dev_holding_pct: Field::Known(60.0),
            migrated: Field::Unknown,
            creation_context: Field::Unknown,
        };
        let r = evaluate_launch_platform(&lp);
        assert_eq!(r.subscore, NEUTRAL_LAUNCH_PLATFORM);
        assert_eq!(r.confidence, Confidence::Degraded);

        let migrated_only = LaunchPlatform {
            migrated: Field::Known(false),
            ..lp
        };
        assert_eq!(evaluate_launch_platform(&migrated_only).subscore, NEUTRAL_LAUNCH_PLATFORM);
    }

    #[test]
    fn test_listings() {
        let none = Listings {
            venue_count: Field::Known(0),
            ..Listings::default()
        };
        assert_eq!(evaluate_listings(&none).subscore, 80);

        let exchanges: BTreeSet<String> =
            ["raydium", "orca", "meteora", "jupiter", "phoenix"].iter().map(|s| s.to_string()).collect();
        let wide = Listings {
            venue_count: Field::Known(0),
            exchanges: Field::Known(exchanges),
        };
        let r = evaluate_listings(&wide);
        assert_eq!(r.subscore, LISTINGS_WIDE);
        assert!(r.message.contains("raydium"));
    }

    fn assert_rising(scores: &[u8], what: &str) {
        for w in scores.windows(2) {
            assert!(w[0] <= w[1], "{} not monotonic: {:?}", what, scores);
        }
    }

    fn assert_falling(scores: &[u8], what: &str) {
        for w in scores.windows(2) {
            assert!(w[0] >= w[1], "{} not monotonic: {:?}", what, scores);
        }
    }

    fn known_holders() -> Concentration {
        Concentration {
            top_holder_pct: Field::Known(1.0),
            insider_pct: Field::Known(0.0),
            whale_count: Field::Known(0),
        }
    }

    #[test]
    fn test_concentration_sweeps() {
        let top: Vec<u8> = [0.0, 5.0, 10.0, 15.0, 20.0, 30.0, 45.0, 50.0, 100.0]
            .into_iter()
            .map(|pct| {
                evaluate_concentration(&Concentration {
                    top_holder_pct: Field::Known(pct),
                    ..known_holders()
                })
                .subscore
            })
            .collect();
        assert_rising(&top, "top holder");

        let insiders: Vec<u8> = [0.0, 4.9, 5.0, 15.0, 29.9, 30.0, 100.0]
            .into_iter()
            .map(|pct| {
                evaluate_concentration(&Concentration {
                    insider_pct: Field::Known(pct),
                    ..known_holders()
                })
                .subscore
            })
            .collect();
        assert_rising(&insiders, "insiders");

        let whales: Vec<u8> = [0, 1, 4, 5, 9, 10, 50]
            .into_iter()
            .map(|n| {
                evaluate_concentration(&Concentration {
                    whale_count: Field::Known(n),
                    ..known_holders()
                })
                .subscore
            })
            .collect();
        assert_rising(&whales, "whales");
        assert!(whales[whales.len() - 1] > whales[0]);
    }

    #[test]
    fn test_age_hype_sweeps() {
        let ages: Vec<u8> = [0.0, 0.5, 1.0, 6.9, 7.0, 29.0, 30.0, 89.0, 90.0, 364.0, 365.0, 5_000.0]
            .into_iter()
            .map(|days| {
                evaluate_age_hype(&AgeHype {
                    age_days: Field::Known(days),
                    volume_spike_ratio: Field::Known(1.0),
                })
                .subscore
            })
            .collect();
        assert_falling(&ages, "age");
        assert_eq!(ages[ages.len() - 1], 0);

        let spikes: Vec<u8> = [0.0, 1.0, 2.0, 4.9, 5.0, 9.9, 10.0, 1_000.0]
            .into_iter()
            .map(|ratio| {
                evaluate_age_hype(&AgeHype {
                    age_days: Field::Known(400.0),
                    volume_spike_ratio: Field::Known(ratio),
                })
                .subscore
            })
            .collect();
        assert_rising(&spikes, "volume spike");
    }

    #[test]
    fn test_dev_holding_sweep() {
        let scores: Vec<u8> = [0.0, 4.9, 5.0, 10.0, 19.9, 20.0, 50.0, 100.0]
            .into_iter()
            .map(|pct| {
                evaluate_launch_platform(&LaunchPlatform {
                    dev_holding_pct: Field::Known(pct),
                    migrated: Field::Known(true),
                    creation_context: Field::Known("pump.fun launch".to_string()),
                })
                .subscore
            })
            .collect();
        assert_rising(&scores, "dev holding");
        assert_eq!(scores[0], 0);
    }

    #[test]
    fn test_listings_sweep() {
        let by_venues: Vec<u8> = (0..8)
            .map(|n| {
                evaluate_listings(&Listings {
                    venue_count: Field::Known(n),
                    exchanges: Field::Unknown,
                })
                .subscore
            })
            .collect();
        assert_falling(&by_venues, "venue count");

        let names = ["raydium", "orca", "meteora", "jupiter", "phoenix", "lifinity"];
        let by_exchanges: Vec<u8> = (0..=names.len())
            .map(|n| {
                let set: BTreeSet<String> = names[..n].iter().map(|s| s.to_string()).collect();
                evaluate_listings(&Listings {
                    venue_count: Field::Unknown,
                    exchanges: Field::Known(set),
                })
                .subscore
            })
            .collect();
        assert_falling(&by_exchanges, "exchange count");
        assert_eq!(&by_venues[..by_exchanges.len()], &by_exchanges[..]);
    }

    #[test]
    fn test_lock_sweeps() {
        let by_pct: Vec<u8> = [0.0, 10.0, 49.9, 50.0, 79.9, 80.0, 100.0]
            .into_iter()
            .map(|pct| {
                evaluate_liquidity(&Liquidity {
                    usd: Field::Known(100_000.0),
                    lock_pct: Field::Known(pct),
                    lock_days: Field::Known(400),
                    ..Liquidity::default()
                })
                .subscore
            })
            .collect();
        assert_falling(&by_pct, "lock share");

        let by_days: Vec<u8> = [0, 1, 6, 7, 29, 30, 89, 90, 1_000]
            .into_iter()
            .map(|days| {
                evaluate_liquidity(&Liquidity {
                    usd: Field::Known(100_000.0),
                    lock_pct: Field::Known(100.0),
                    lock_days: Field::Known(days),
                    ..Liquidity::default()
                })
                .subscore
            })
            .collect();
        assert_falling(&by_days, "lock duration");
        assert_eq!(by_days[by_days.len() - 1], LIQ_USD_DEEP);
    }

    /// `Unknown`, `NotApplicable`, then every known value
    fn variants<T: Clone>(known: &[T]) -> Vec<Field<T>> {
        let mut out = vec![Field::Unknown, Field::NotApplicable];
        out.extend(known.iter().cloned().map(Field::Known));
        out
    }

    #[test]
    fn test_subscores_bounded_over_mixed_profiles() {
        let pcts = variants(&[-1.0, 0.0, 7.5, 40.0, 100.0, 1e12]);
        let counts = variants(&[0u32, 3, 12, u32::MAX]);
        let flags = variants(&[true, false]);
        let mut checked = 0;

        for mint in &flags {
            for freeze in &flags {
                for renounced in &flags {
                    assert_in_range(&evaluate_authorities(&Authorities {
                        mint_authority_present: mint.clone(),
                        freeze_authority_present: freeze.clone(),
                        renounced: renounced.clone(),
                    }));
                    checked += 1;
                }
            }
        }

        for usd in &pcts {
            for sol in &pcts {
                for lock_pct in &pcts {
                    for lock_days in &counts {
                        assert_in_range(&evaluate_liquidity(&Liquidity {
                            usd: usd.clone(),
                            sol: sol.clone(),
                            lock_pct: lock_pct.clone(),
                            lock_days: lock_days.clone(),
                            ..Liquidity::default()
                        }));
                        checked += 1;
                    }
                }
            }
        }

        for buy in &pcts {
            for sell in &pcts {
                for restricted in &flags {
                    for honeypot in &flags {
                        assert_in_range(&evaluate_tradeability(&Tradeability {
                            buy_tax_pct: buy.clone(),
                            sell_tax_pct: sell.clone(),
                            transfer_restricted: restricted.clone(),
                            honeypot_suspected: honeypot.clone(),
                        }));
                        checked += 1;
                    }
                }
            }
        }

        for top in &pcts {
            for insider in &pcts {
                for whales in &counts {
                    assert_in_range(&evaluate_concentration(&Concentration {
                        top_holder_pct: top.clone(),
                        insider_pct: insider.clone(),
                        whale_count: whales.clone(),
                    }));
                    checked += 1;
                }
            }
        }

        for age in &pcts {
            for spike in &pcts {
                assert_in_range(&evaluate_age_hype(&AgeHype {
                    age_days: age.clone(),
                    volume_spike_ratio: spike.clone(),
                }));
                checked += 1;
            }
        }

        let contexts = variants(&["pump.fun launch".to_string()]);
        for dev in &pcts {
            for migrated in &flags {
                for context in &contexts {
                    assert_in_range(&evaluate_launch_platform(&LaunchPlatform {
                        dev_holding_pct: dev.clone(),
                        migrated: migrated.clone(),
                        creation_context: context.clone(),
                    }));
                    checked += 1;
                }
            }
        }

        let exchange_sets = variants(&[
            BTreeSet::new(),
            ["raydium".to_string()].into_iter().collect::<BTreeSet<_>>(),
        ]);
        for venues in &counts {
            for exchanges in &exchange_sets {
                assert_in_range(&evaluate_listings(&Listings {
                    venue_count: venues.clone(),
                    exchanges: exchanges.clone(),
                }));
                checked += 1;
            }
        }

        assert!(checked > 1_000);
    }

    #[test]
    fn test_weights_attached() {
        for r in evaluate_all(&TokenProfile::default()) {
            assert!((r.weight - r.category.weight()).abs() < f64::EPSILON);
        }
    }
}
