// src/monitor.rs
use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use tokio::time::MissedTickBehavior;

use crate::aggregator::Aggregator;
use crate::publishing::Publisher;
use crate::sources::registry::AverageSpec;
use crate::sources::{Fetcher, SourceSpec};
use crate::types::CycleResult;

/// Drives refresh cycles on a fixed interval. A new cycle never starts while
/// the previous one is still fetching or publishing.
pub struct Monitor<F, Pu>
where
    F: Fetcher,
    Pu: Publisher,
{
    pub aggregator: Aggregator<F>,
    pub publisher: Pu,
    pub sources: &'static [SourceSpec],
    pub reference: &'static str,
    pub average: AverageSpec,
    pub interval: Duration,
}

impl<F, Pu> Monitor<F, Pu>
where
    F: Fetcher,
    Pu: Publisher,
{
    pub async fn tick_once(&self) -> CycleResult {
        let cycle = self
            .aggregator
            .run_cycle(self.sources, self.reference, &self.average, Utc::now)
            .await;

        if let Err(e) = self.publisher.publish_cycle(&cycle).await {
            tracing::warn!("publish_cycle failed: {e:?}");
        }
        cycle
    }

    /// Run until `shutdown` resolves. The first cycle starts immediately.
    pub async fn run<S>(&self, shutdown: S) -> u64
    where
        S: Future<Output = ()>,
    {
        let mut interval = tokio::time::interval(self.interval);
        // ticks that came due while a slow cycle was running are dropped
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        let mut cycles = 0u64;
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = interval.tick() => {
                    self.tick_once().await;
                    cycles += 1;
                }
            }
        }
        tracing::info!(cycles, "monitor stopped");
        cycles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::tests::{StubFetcher, TABLE};
    use crate::sources::registry::INDIAN_EXCHANGES_AVERAGE;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Records every published cycle.
    #[derive(Clone, Default)]
    struct Capture {
        seen: Arc<Mutex<Vec<CycleResult>>>,
        in_flight: Arc<AtomicUsize>,
        max_in_flight: Arc<AtomicUsize>,
        publish_delay: Duration,
    }

    #[async_trait::async_trait]
    impl Publisher for Capture {
        async fn publish_cycle(&self, cycle: &CycleResult) -> anyhow::Result<()> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(self.publish_delay).await;
            self.seen.lock().unwrap().push(cycle.clone());
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct Failing;

    #[async_trait::async_trait]
    impl Publisher for Failing {
        async fn publish_cycle(&self, _cycle: &CycleResult) -> anyhow::Result<()> {
            anyhow::bail!("display detached")
        }
    }

    fn monitor<Pu: Publisher>(publisher: Pu, interval: Duration) -> Monitor<StubFetcher, Pu> {
        Monitor {
            aggregator: Aggregator::new(StubFetcher::healthy(6_000_000.0), Duration::from_secs(5)),
            publisher,
            sources: TABLE,
            reference: "CoinGecko",
            average: INDIAN_EXCHANGES_AVERAGE,
            interval,
        }
    }

    #[tokio::test]
    async fn tick_once_publishes_the_cycle() {
        let capture = Capture::default();
        let m = monitor(capture.clone(), Duration::from_secs(30));

        let cycle = m.tick_once().await;
        let seen = capture.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], cycle);
        assert_eq!(cycle.points.len(), TABLE.len());
    }

    #[tokio::test]
    async fn publish_errors_do_not_fail_the_cycle() {
        let cycle = monitor(Failing, Duration::from_secs(30)).tick_once().await;
        assert!(cycle.average.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn first_cycle_is_immediate_then_every_interval() {
        let capture = Capture::default();
        let m = monitor(capture.clone(), Duration::from_secs(30));

        // ticks at t=0, 30, 60, 90; stop at 100s
        let cycles = m.run(tokio::time::sleep(Duration::from_secs(100))).await;
        assert_eq!(cycles, 4);
        assert_eq!(capture.seen.lock().unwrap().len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_cycles_never_overlap() {
        let capture = Capture { publish_delay: Duration::from_secs(45), ..Default::default() };
        let m = monitor(capture.clone(), Duration::from_secs(30));

        m.run(tokio::time::sleep(Duration::from_secs(200))).await;
        assert_eq!(capture.max_in_flight.load(Ordering::SeqCst), 1);
        assert!(capture.seen.lock().unwrap().len() >= 2);
    }
}
