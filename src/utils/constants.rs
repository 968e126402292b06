//! Constants Module - Single Source of Truth
//!
//! Every weight, threshold, neutral default, endpoint and timing constant used
//! by the engine is defined here. Scoring modules reference these by name so a
//! curve can be audited in one place.

// ============================================
// APPLICATION CONSTANTS
// ============================================

/// User-Agent for HTTP requests
pub const USER_AGENT: &str = concat!("SolSafety/", env!("CARGO_PKG_VERSION"));

// ============================================
// TIMING CONSTANTS
// ============================================

/// Default per-adapter budget (milliseconds)
pub const DEFAULT_PROVIDER_TIMEOUT_MS: u64 = 8_000;

/// Default shared deadline for a whole fetch round (milliseconds)
pub const DEFAULT_TOTAL_DEADLINE_MS: u64 = 15_000;

/// Ceiling applied to caller deadlines so `Instant` arithmetic cannot overflow
pub const MAX_TOTAL_DEADLINE_SECS: u64 = 86_400;

/// Default retry attempts for one HTTP call (429 / timeout / connect only)
pub const DEFAULT_HTTP_MAX_RETRIES: u32 = 3;

/// Base retry delay; doubles each attempt
pub const DEFAULT_RETRY_BASE_MS: u64 = 500;

/// Retry delay cap
pub const MAX_RETRY_DELAY_MS: u64 = 8_000;

/// Jitter percentage applied to every retry delay (±)
pub const RETRY_JITTER_PERCENT: u64 = 20;

/// Pause between sequential Birdeye calls (public tier is ~1 rps)
pub const BIRDEYE_RATE_LIMIT_PAUSE_MS: u64 = 1_000;

// ============================================
// ENDPOINTS
// ============================================

pub const DEXSCREENER_BASE_URL: &str = "https://api.dexscreener.com/latest/dex";
pub const BIRDEYE_BASE_URL: &str = "https://public-api.birdeye.so";
pub const RUGCHECK_BASE_URL: &str = "https://api.rugcheck.xyz/v1";
pub const PUMPFUN_BASE_URL: &str = "https://frontend-api-v3.pump.fun";
pub const DEFAULT_SOLANA_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

/// DexScreener chain id for Solana pairs
pub const DEXSCREENER_SOLANA_CHAIN: &str = "solana";

/// Quote symbols treated as native SOL liquidity
pub const SOL_QUOTE_SYMBOLS: [&str; 2] = ["SOL", "WSOL"];

// ============================================
// CATEGORY WEIGHTS (basis points, sum = 10_000)
// ============================================

pub const WEIGHT_BPS_AUTHORITIES: u32 = 2_000;
pub const WEIGHT_BPS_LIQUIDITY: u32 = 2_500;
pub const WEIGHT_BPS_TRADEABILITY: u32 = 2_000;
pub const WEIGHT_BPS_CONCENTRATION: u32 = 1_500;
pub const WEIGHT_BPS_AGE_HYPE: u32 = 1_000;
pub const WEIGHT_BPS_LAUNCH_PLATFORM: u32 = 500;
pub const WEIGHT_BPS_LISTINGS: u32 = 500;

/// Denominator for basis-point weights
pub const WEIGHT_BPS_TOTAL: u32 = 10_000;

// ============================================
// BANDS
// ============================================

/// Per-rule severity: low <= 30, medium 31..=69, high >= 70
pub const SEVERITY_LOW_MAX: u8 = 30;
pub const SEVERITY_HIGH_MIN: u8 = 70;

/// Verdict: likely_ok 0..=29, caution 30..=59, high_risk 60..=100
pub const VERDICT_LIKELY_OK_MAX: u8 = 29;
pub const VERDICT_CAUTION_MAX: u8 = 59;

// ============================================
// NEUTRAL DEFAULTS (every input of a category unknown)
// ============================================

pub const NEUTRAL_AUTHORITIES: u8 = 40;
pub const NEUTRAL_LIQUIDITY: u8 = 50;
pub const NEUTRAL_TRADEABILITY: u8 = 30;
pub const NEUTRAL_CONCENTRATION: u8 = 35;
pub const NEUTRAL_AGE_HYPE: u8 = 40;
/// Platform origin itself unknown
pub const NEUTRAL_LAUNCH_PLATFORM: u8 = 25;
/// Token did not originate on the launch platform
pub const NOT_APPLICABLE_LAUNCH_PLATFORM: u8 = 10;
pub const NEUTRAL_LISTINGS: u8 = 40;

// ============================================
// AUTHORITIES CURVE
// ============================================

pub const AUTH_MINT_ACTIVE: u8 = 60;
pub const AUTH_FREEZE_ACTIVE: u8 = 40;
pub const AUTH_MINT_UNKNOWN: u8 = 20;
pub const AUTH_FREEZE_UNKNOWN: u8 = 15;

// ============================================
// LIQUIDITY CURVE
// ============================================

/// (upper bound exclusive USD, points); above the last bound -> LIQ_USD_DEEP
pub const LIQ_USD_BANDS: [(f64, u8); 4] = [(1_000.0, 60), (2_000.0, 50), (10_000.0, 30), (50_000.0, 15)];
pub const LIQ_USD_DEEP: u8 = 5;

/// (upper bound exclusive SOL, points); fallback when USD is unknown
pub const LIQ_SOL_BANDS: [(f64, u8); 3] = [(10.0, 50), (50.0, 30), (250.0, 15)];
pub const LIQ_SOL_DEEP: u8 = 5;

pub const LIQ_POOL_UNKNOWN: u8 = 35;

pub const LOCK_UNLOCKED: u8 = 40;
/// (upper bound exclusive %, points)
pub const LOCK_PCT_BANDS: [(f64, u8); 2] = [(50.0, 25), (80.0, 10)];
pub const LOCK_PCT_UNKNOWN: u8 = 10;
/// (upper bound exclusive days, points)
pub const LOCK_DAYS_BANDS: [(u32, u8); 3] = [(7, 15), (30, 10), (90, 5)];
pub const LOCK_DAYS_UNKNOWN: u8 = 5;

// ============================================
// TRADEABILITY CURVE
// ============================================

/// (lower bound inclusive %, points), checked high to low
pub const SELL_TAX_BANDS: [(f64, u8); 3] = [(25.0, 60), (10.0, 45), (5.0, 25)];
pub const SELL_TAX_NONZERO: u8 = 10;
pub const SELL_TAX_UNKNOWN: u8 = 15;
pub const BUY_TAX_BANDS: [(f64, u8); 3] = [(25.0, 30), (10.0, 20), (5.0, 10)];
pub const BUY_TAX_UNKNOWN: u8 = 5;
/// Floor when a honeypot or transfer restriction is confirmed
pub const RESTRICTION_FLOOR: u8 = 85;

// ============================================
// CONCENTRATION CURVE
// ============================================

pub const TOP_HOLDER_BANDS: [(f64, u8); 4] = [(50.0, 60), (30.0, 45), (20.0, 30), (10.0, 15)];
pub const TOP_HOLDER_BASE: u8 = 5;
pub const TOP_HOLDER_UNKNOWN: u8 = 25;
pub const INSIDER_BANDS: [(f64, u8); 3] = [(30.0, 30), (15.0, 20), (5.0, 10)];
pub const INSIDER_UNKNOWN: u8 = 5;
pub const WHALE_BANDS: [(u32, u8); 2] = [(10, 10), (5, 5)];
pub const WHALE_UNKNOWN: u8 = 3;

/// Share of supply (%) at which a single holder counts as a whale
pub const WHALE_MIN_PCT: f64 = 2.0;

// ============================================
// AGE / HYPE CURVE
// ============================================

/// (upper bound exclusive days, points); older than the last bound -> 0
pub const AGE_DAYS_BANDS: [(f64, u8); 5] = [(1.0, 60), (7.0, 45), (30.0, 25), (90.0, 15), (365.0, 5)];
pub const AGE_UNKNOWN: u8 = 30;
pub const SPIKE_BANDS: [(f64, u8); 3] = [(10.0, 40), (5.0, 25), (2.0, 10)];
pub const SPIKE_UNKNOWN: u8 = 10;

// ============================================
// LAUNCH PLATFORM CURVE
// ============================================

pub const DEV_HOLDING_BANDS: [(f64, u8); 4] = [(50.0, 70), (20.0, 45), (10.0, 25), (5.0, 10)];
pub const DEV_HOLDING_UNKNOWN: u8 = 25;
pub const NOT_MIGRATED: u8 = 25;
pub const MIGRATION_UNKNOWN: u8 = 10;

// ============================================
// LISTINGS CURVE
// ============================================

/// Indexed by presence count; counts past the end use LISTINGS_WIDE
pub const LISTINGS_BY_COUNT: [u8; 4] = [80, 50, 30, 15];
pub const LISTINGS_WIDE: u8 = 5;

// ============================================
// RUGCHECK
// ============================================

/// RugCheck risk names that indicate a sell block
pub const HONEYPOT_RISK_MARKERS: [&str; 2] = ["honeypot", "cannot sell"];

/// RugCheck risk names that indicate restricted transfers
pub const TRANSFER_RESTRICTION_MARKERS: [&str; 3] =
    ["non-transferable", "permanent delegate", "transfer hook"];

// ============================================
// HELPERS
// ============================================

/// Points for the first band whose lower bound (inclusive) `value` reaches.
#[inline]
pub fn band_at_least(value: f64, bands: &[(f64, u8)], floor: u8) -> u8 {
    bands
        .iter()
        .find(|(min, _)| value >= *min)
        .map(|(_, pts)| *pts)
        .unwrap_or(floor)
}

/// Points for the first band whose upper bound (exclusive) `value` is below.
#[inline]
pub fn band_below(value: f64, bands: &[(f64, u8)], ceiling: u8) -> u8 {
    bands
        .iter()
        .find(|(max, _)| value < *max)
        .map(|(_, pts)| *pts)
        .unwrap_or(ceiling)
}
