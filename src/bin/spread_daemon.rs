// src/bin/spread_daemon.rs
use clap::Parser;
use tracing_subscriber::EnvFilter;

use spreadwatch::aggregator::Aggregator;
use spreadwatch::config::MonitorConfig;
use spreadwatch::monitor::Monitor;
use spreadwatch::publishing::{JsonPublisher, Publisher, StdoutPublisher};
use spreadwatch::sources::registry::{INDIAN_EXCHANGES_AVERAGE, REFERENCE_SOURCE, SOURCES};
use spreadwatch::sources::HttpFetcher;

/// Compare BTC/INR quotes across Indian exchanges against CoinGecko.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Run a single cycle and exit
    #[arg(long)]
    once: bool,
    /// Emit one JSON object per cycle instead of a table
    #[arg(long)]
    json: bool,
    /// Disable coloured deviations
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let args = Args::parse();
    let cfg = MonitorConfig::default();

    if args.json {
        drive(&args, &cfg, JsonPublisher).await
    } else {
        let publisher = StdoutPublisher { reference: REFERENCE_SOURCE.to_string(), color: !args.no_color };
        drive(&args, &cfg, publisher).await
    }
}

async fn drive<Pu: Publisher>(args: &Args, cfg: &MonitorConfig, publisher: Pu) -> anyhow::Result<()> {
    let fetcher = HttpFetcher::from_config(cfg)?;
    let monitor = Monitor {
        aggregator: Aggregator::new(fetcher, cfg.fetch_timeout()),
        publisher,
        sources: SOURCES,
        reference: REFERENCE_SOURCE,
        average: INDIAN_EXCHANGES_AVERAGE,
        interval: cfg.poll_interval(),
    };

    if args.once {
        monitor.tick_once().await;
        return Ok(());
    }

    tracing::info!(sources = SOURCES.len(), interval_ms = cfg.poll_ms, "starting spread monitor");
    monitor
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!("ctrl_c listener failed: {e:?}");
                std::future::pending::<()>().await;
            }
        })
        .await;
    Ok(())
}
