// src/metrics.rs
use std::time::Duration;

use once_cell::sync::Lazy;
use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, Histogram, IntCounter,
    IntCounterVec,
};

use crate::types::CycleResult;

pub static CYCLES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("spreadwatch_cycles_total", "Refresh cycles completed").unwrap()
});

pub static SOURCE_FAILURES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "spreadwatch_source_failures_total", "Sources without a usable price", &["source"]
    ).unwrap()
});

pub static REFERENCE_MISSING_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "spreadwatch_reference_missing_total", "Cycles published without a reference price"
    ).unwrap()
});

pub static CYCLE_LATENCY: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "spreadwatch_cycle_latency_seconds",
        "Wall time from first fetch to settled cycle",
        vec![0.1, 0.25, 0.5, 1.0, 2.0, 5.0, 10.0]
    ).unwrap()
});

pub fn observe_cycle(cycle: &CycleResult, elapsed: Duration) {
    CYCLES_TOTAL.inc();
    CYCLE_LATENCY.observe(elapsed.as_secs_f64());
    for m in &cycle.missing {
        SOURCE_FAILURES_TOTAL.with_label_values(&[m.source_name.as_str()]).inc();
    }
    if cycle.reference_price.is_none() {
        REFERENCE_MISSING_TOTAL.inc();
    }
}
