// src/aggregator.rs
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use futures::future::join_all;

use crate::deviation::deviation_pct;
use crate::sources::registry::AverageSpec;
use crate::sources::{Fetcher, SourceError, SourceSpec};
use crate::types::{is_usable_price, is_usable_reference, CycleResult, FetchOutcome, MissingSource, PricePoint};

/// Runs refresh cycles over a source table. Holds no state between cycles.
pub struct Aggregator<F: Fetcher> {
    fetcher: F,
    fetch_timeout: Duration,
}

impl<F: Fetcher> Aggregator<F> {
    pub fn new(fetcher: F, fetch_timeout: Duration) -> Self {
        Self { fetcher, fetch_timeout }
    }

    /// Fetch every source concurrently, wait for all of them to settle, then
    /// derive points, the subset average and deviations against `reference`.
    pub async fn run_cycle<N>(
        &self,
        sources: &[SourceSpec],
        reference: &str,
        average: &AverageSpec,
        now: N,
    ) -> CycleResult
    where
        N: Fn() -> DateTime<Utc>,
    {
        let started = Instant::now();
        let outcomes = self.collect(sources).await;
        let cycle = assemble(&outcomes, reference, average, now());

        #[cfg(feature = "metrics")]
        crate::metrics::observe_cycle(&cycle, started.elapsed());

        tracing::info!(
            points = cycle.points.len(),
            missing = cycle.missing.len(),
            reference = ?cycle.reference_price,
            average = ?cycle.average.as_ref().map(|a| a.price),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "cycle complete"
        );
        cycle
    }

    /// One settled outcome per source, in table order. A failing source never
    /// short-circuits the others.
    pub async fn collect<'a>(&self, sources: &'a [SourceSpec]) -> Vec<FetchOutcome<'a>> {
        let futs = sources.iter().map(|src| async move {
            let result = self.fetch_one(src).await;
            if let Err(err) = &result {
                tracing::debug!(source = src.name, reason = err.reason(), "source unavailable: {err}");
            }
            FetchOutcome { source: src, result }
        });

        join_all(futs).await
    }

    /// Fetch and extract a single source, bounded by the per-source timeout.
    pub async fn fetch_one(&self, src: &SourceSpec) -> Result<f64, SourceError> {
        let data = tokio::time::timeout(self.fetch_timeout, self.fetcher.fetch_json(src.endpoint))
            .await
            .map_err(|_| SourceError::Timeout(self.fetch_timeout))??;

        (src.extract)(&data)
            .filter(|px| is_usable_price(*px))
            .ok_or(SourceError::Absent)
    }
}

/// Pure part of a cycle: identical outcomes always give an identical result.
pub fn assemble(
    outcomes: &[FetchOutcome<'_>],
    reference: &str,
    average: &AverageSpec,
    timestamp: DateTime<Utc>,
) -> CycleResult {
    let reference_price = outcomes
        .iter()
        .find(|o| o.source.name == reference)
        .and_then(FetchOutcome::usable_price)
        .filter(|px| is_usable_reference(*px));

    if reference_price.is_none() {
        tracing::warn!(reference, "reference price unavailable; deviations omitted this cycle");
    }

    let mut points = Vec::with_capacity(outcomes.len());
    let mut missing = Vec::new();
    for o in outcomes {
        match o.usable_price() {
            Some(price) => points.push(PricePoint {
                source_name: o.source.name.to_string(),
                price,
                deviation_pct: deviation_pct(price, reference_price),
            }),
            None => missing.push(MissingSource {
                source_name: o.source.name.to_string(),
                reason: match &o.result {
                    Err(e) => e.to_string(),
                    Ok(_) => SourceError::Absent.to_string(),
                },
            }),
        }
    }

    let contributors: Vec<f64> = points
        .iter()
        .filter(|p| average.includes(&p.source_name))
        .map(|p| p.price)
        .collect();

    let average = if contributors.is_empty() {
        None
    } else {
        let mean = contributors.iter().sum::<f64>() / contributors.len() as f64;
        Some(PricePoint {
            source_name: average.label.to_string(),
            price: mean,
            deviation_pct: deviation_pct(mean, reference_price),
        })
    };

    CycleResult { points, average, reference_price, missing, timestamp }
}
