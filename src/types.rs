// src/types.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sources::{SourceError, SourceSpec};

/// One row of the comparison: a source (or the synthetic average) with a usable price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub source_name: String,
    pub price: f64,                 // INR, finite; zero or negative quotes are kept as reported
    pub deviation_pct: Option<f64>, // signed, vs reference; None when no reference this cycle
}

/// Settled result of a single source fetch within one cycle.
#[derive(Debug)]
pub struct FetchOutcome<'a> {
    pub source: &'a SourceSpec,
    pub result: Result<f64, SourceError>,
}

impl FetchOutcome<'_> {
    /// The price, if this outcome produced a usable one.
    pub fn usable_price(&self) -> Option<f64> {
        match self.result {
            Ok(px) if is_usable_price(px) => Some(px),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingSource {
    pub source_name: String,
    pub reason: String, // SourceError rendered via Display
}

/// Output contract of one refresh cycle. Replaces the previous rendering in full.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleResult {
    pub points: Vec<PricePoint>,
    pub average: Option<PricePoint>,
    pub reference_price: Option<f64>,
    pub missing: Vec<MissingSource>,
    pub timestamp: DateTime<Utc>,
}

impl CycleResult {
    pub fn point(&self, source_name: &str) -> Option<&PricePoint> {
        self.points.iter().find(|p| p.source_name == source_name)
    }
}

/// Any finite quote gets a row and counts toward the average.
#[inline]
pub fn is_usable_price(px: f64) -> bool {
    px.is_finite()
}

/// A reference must also be non-zero to divide by.
#[inline]
pub fn is_usable_reference(px: f64) -> bool {
    is_usable_price(px) && px != 0.0
}
