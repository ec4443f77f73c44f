use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use closing_snapshot::{config, Basket, ClosingSnapshot};

/// Write today's closing-price table as a shareable HTML page.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Instrument basket to snapshot (`markets` or `global`).
    #[arg(long, default_value = "markets")]
    basket: Basket,

    /// Directory to write the page to. Defaults to the current directory.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// HTTP timeout for the provider call, in seconds.
    #[arg(long, default_value_t = config::DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Provider endpoint override.
    #[arg(long)]
    base_url: Option<String>,

    /// Run outside the allowed time window.
    #[arg(long)]
    skip_time_gate: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Cli::parse();
    log::debug!("Parsed arguments: {:?}", args);

    let mut builder = ClosingSnapshot::builder()
        .basket(args.basket)
        .timeout(Duration::from_secs(args.timeout_secs))
        .skip_time_gate(args.skip_time_gate);
    if let Some(dir) = args.output_dir {
        builder = builder.output_dir(dir);
    }
    if let Some(url) = args.base_url {
        builder = builder.base_url(url);
    }

    let mut snapshot = builder.build();
    log::debug!("{}", snapshot);

    match snapshot.run() {
        Ok(outcome) => {
            log::info!("Run finished: {:?}", outcome);
            ExitCode::from(outcome.exit_code() as u8)
        }
        Err(e) => {
            log::error!("Snapshot failed: {}", e);
            ExitCode::from(config::EXIT_FAILURE as u8)
        }
    }
}
