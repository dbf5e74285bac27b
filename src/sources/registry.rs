// src/sources/registry.rs
use super::extract::{coindcx_btc_inr, coingecko_btc_inr, unocoin_btc_inr, zebpay_btc_inr};
use super::SourceSpec;

/// Static source table; row order is display order.
pub static SOURCES: &[SourceSpec] = &[
    SourceSpec {
        name: "CoinDCX",
        endpoint: "https://api.coindcx.com/exchange/ticker",
        extract: coindcx_btc_inr,
    },
    SourceSpec {
        name: "ZebPay",
        endpoint: "https://www.zebapi.com/api/v1/market/BTC-INR/ticker",
        extract: zebpay_btc_inr,
    },
    SourceSpec {
        name: "Unocoin",
        endpoint: "https://api.unocoin.com/api/v1/exchange/tickers",
        extract: unocoin_btc_inr,
    },
    SourceSpec {
        name: "CoinGecko",
        endpoint: "https://api.coingecko.com/api/v3/simple/price?ids=bitcoin&vs_currencies=inr",
        extract: coingecko_btc_inr,
    },
];

pub const REFERENCE_SOURCE: &str = "CoinGecko";

/// A synthetic row averaging a fixed set of sources.
#[derive(Debug, Clone, Copy)]
pub struct AverageSpec {
    pub label: &'static str,
    pub members: &'static [&'static str],
}

impl AverageSpec {
    pub fn includes(&self, name: &str) -> bool {
        self.members.iter().any(|m| *m == name)
    }
}

pub const INDIAN_EXCHANGES_AVERAGE: AverageSpec = AverageSpec {
    label: "Average of Indian exchanges",
    members: &["Unocoin", "ZebPay", "CoinDCX"],
};

pub fn find(name: &str) -> Option<&'static SourceSpec> {
    SOURCES.iter().find(|s| s.name.eq_ignore_ascii_case(name))
}
