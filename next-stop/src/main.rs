use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use next_stop::NextArrivals;
use next_stop::cache::FileCache;
use next_stop::clock::SystemClock;
use next_stop::config::Config;
use next_stop::domain::StopId;
use next_stop::mbta::MbtaClient;

/// Show the next arrivals at an MBTA stop.
#[derive(Parser)]
#[command(name = "next-stop", version, about)]
struct Cli {
    /// MBTA stop ID
    stop_id: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only arrival lines
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let client = match MbtaClient::new(config.mbta.clone()) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: failed to create MBTA client: {e}");
            return ExitCode::FAILURE;
        }
    };
    let cache = FileCache::new(config.cache.clone());
    let clock = SystemClock;

    let board = NextArrivals::new(&client, &cache, &clock, config.fetch);
    let stop = StopId::new(cli.stop_id);

    match board.next_arrivals(&stop).await {
        Ok(arrivals) => {
            for arrival in &arrivals {
                println!("{arrival}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: stop {stop}: {e}");
            ExitCode::FAILURE
        }
    }
}
