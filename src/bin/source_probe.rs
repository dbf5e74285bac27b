// src/bin/source_probe.rs
use clap::Parser;
use tracing_subscriber::EnvFilter;

use spreadwatch::aggregator::Aggregator;
use spreadwatch::config::MonitorConfig;
use spreadwatch::sources::{registry, HttpFetcher};

/// Fetch a single source once and print its extracted price.
#[derive(Debug, Parser)]
struct Args {
    /// Source name, e.g. ZebPay
    #[arg(default_value = "CoinGecko")]
    source: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();

    let args = Args::parse();
    let Some(src) = registry::find(&args.source) else {
        let known: Vec<_> = registry::SOURCES.iter().map(|s| s.name).collect();
        anyhow::bail!("unknown source {:?}; known: {}", args.source, known.join(", "));
    };

    let cfg = MonitorConfig::default();
    let agg = Aggregator::new(HttpFetcher::from_config(&cfg)?, cfg.fetch_timeout());
    match agg.fetch_one(src).await {
        Ok(px) => println!("{} -> price={} endpoint={}", src.name, px, src.endpoint),
        Err(e) => println!("{} -> no price ({e}) endpoint={}", src.name, src.endpoint),
    }
    Ok(())
}
