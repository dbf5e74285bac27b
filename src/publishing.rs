// src/publishing.rs
use chrono::Local;
use owo_colors::OwoColorize;
use tabled::builder::Builder;
use tabled::settings::{object::Rows, Alignment, Modify, Style};

use crate::deviation::Tone;
use crate::types::{CycleResult, PricePoint};

#[async_trait::async_trait]
pub trait Publisher: Send + Sync + 'static {
    /// Project one cycle onto the display. Each call replaces the previous one in full.
    async fn publish_cycle(&self, cycle: &CycleResult) -> anyhow::Result<()>;
}

/// Terminal table: one row per source with a price, then the average row.
/// Sources with no price this cycle are left out.
pub struct StdoutPublisher {
    pub reference: String,
    pub color: bool,
}

#[async_trait::async_trait]
impl Publisher for StdoutPublisher {
    async fn publish_cycle(&self, cycle: &CycleResult) -> anyhow::Result<()> {
        println!("{}", render_table(cycle, &self.reference, self.color));
        Ok(())
    }
}

/// One JSON object per cycle on stdout, for piping into other tools.
pub struct JsonPublisher;

#[async_trait::async_trait]
impl Publisher for JsonPublisher {
    async fn publish_cycle(&self, cycle: &CycleResult) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string(cycle)?);
        Ok(())
    }
}

fn display_row(p: &PricePoint, color: bool) -> [String; 3] {
    [p.source_name.clone(), format_inr(p.price), format_diff(p.deviation_pct, color)]
}

pub fn render_table(cycle: &CycleResult, reference: &str, color: bool) -> String {
    let mut builder = Builder::default();
    builder.push_record([
        "Source".to_string(),
        "Price (INR)".to_string(),
        format!("Diff vs {reference}"),
    ]);
    for p in cycle.points.iter().chain(cycle.average.iter()) {
        builder.push_record(display_row(p, color));
    }

    let table = builder
        .build()
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string();

    let updated = cycle.timestamp.with_timezone(&Local).format("%H:%M:%S");
    format!("BTC/INR\n{table}\nLast updated: {updated}")
}

/// "1.00%" / "-1.25%" / "-" when there was no reference.
pub fn format_diff(deviation_pct: Option<f64>, color: bool) -> String {
    let Some(d) = deviation_pct else {
        return "-".to_string();
    };
    let text = format!("{d:.2}%");
    if !color {
        return text;
    }
    match Tone::classify(d) {
        Tone::Good => text.green().to_string(),
        Tone::Bad => text.red().to_string(),
    }
}

/// Whole rupees with Indian digit grouping: 6000000 -> "60,00,000".
pub fn format_inr(px: f64) -> String {
    let rounded = px.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = (rounded.abs() as u64).to_string();
    if digits.len() <= 3 {
        return format!("{sign}{digits}");
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();
    format!("{sign}{},{}", groups.join(","), tail)
}
