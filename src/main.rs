//! SolSafety CLI
//!
//! Usage: sol_safety <MINT> [--fast] [--json] [--providers a,b,c]
//!
//! Environment:
//!   SOLANA_RPC_URL, BIRDEYE_API_KEY, RUGCHECK_JWT
//!   SOL_SAFETY_PROVIDER_TIMEOUT_MS, SOL_SAFETY_TOTAL_DEADLINE_MS
//!   RUST_LOG (default: info)

use sol_safety::{is_valid_solana_address, AnalyzerConfig, ProviderName, TokenAnalyzer};

use eyre::{eyre, Result};
use std::collections::BTreeSet;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const USAGE: &str = "Usage: sol_safety <MINT> [--fast] [--json] [--providers a,b,c]";

struct CliArgs {
    token: String,
    fast: bool,
    json: bool,
    providers: BTreeSet<ProviderName>,
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<CliArgs> {
    let mut token = None;
    let mut fast = false;
    let mut json = false;
    let mut providers: BTreeSet<ProviderName> = ProviderName::ALL.into_iter().collect();

    let mut args = args.peekable();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--fast" => fast = true,
            "--json" => json = true,
            "--providers" => {
                let list = args
                    .next()
                    .ok_or_else(|| eyre!("--providers needs a value\n{}", USAGE))?;
                providers = ProviderName::parse_list(&list)?;
            }
            "-h" | "--help" => return Err(eyre!(USAGE)),
            flag if flag.starts_with("--") => return Err(eyre!("Unknown flag {}\n{}", flag, USAGE)),
            _ if token.is_none() => token = Some(arg),
            _ => return Err(eyre!("Unexpected argument {}\n{}", arg, USAGE)),
        }
    }

    Ok(CliArgs {
        token: token.ok_or_else(|| eyre!(USAGE))?,
        fast,
        json,
        providers,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so --json output stays clean
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    if !is_valid_solana_address(&args.token) {
        eprintln!("❌ Not a Solana address: {}", args.token);
        std::process::exit(1);
    }

    let config = AnalyzerConfig::from_env()?;
    let total_deadline = config.total_deadline;
    let analyzer = TokenAnalyzer::new(config)?;

    let report = match analyzer
        .analyze(&args.token, &args.providers, args.fast, total_deadline)
        .await
    {
        Ok(report) => report,
        Err(e) if e.code.is_precondition() => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.summary());
    }

    Ok(())
}
