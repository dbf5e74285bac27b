// src/sources/extract.rs
//! Per-exchange payload extractors. All of them are total: a payload of the
//! wrong shape, a missing market entry or a malformed number gives `None`.
use serde_json::Value;

/// Exchanges quote either JSON numbers or numeric strings ("6000000.5").
pub fn number(v: &Value) -> Option<f64> {
    let px = match v {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    px.is_finite().then_some(px)
}

/// Find the first object in a JSON array whose `key` equals `wanted`.
fn find_entry<'a>(data: &'a Value, key: &str, wanted: &str) -> Option<&'a Value> {
    data.as_array()?
        .iter()
        .find(|item| item.get(key).and_then(Value::as_str) == Some(wanted))
}

/// CoinDCX `/exchange/ticker`: array of markets, ask side of BTCINR.
pub fn coindcx_btc_inr(data: &Value) -> Option<f64> {
    find_entry(data, "market", "BTCINR")
        .and_then(|item| item.get("ask"))
        .and_then(number)
}

/// ZebPay market ticker: `{ "market": "..." }`.
pub fn zebpay_btc_inr(data: &Value) -> Option<f64> {
    data.get("market").and_then(number)
}

/// Unocoin tickers: array keyed by `ticker_id`.
pub fn unocoin_btc_inr(data: &Value) -> Option<f64> {
    find_entry(data, "ticker_id", "BTC_INR")
        .and_then(|item| item.get("last_price"))
        .and_then(number)
}

/// CoinGecko simple price: `{ "bitcoin": { "inr": 6000000 } }`.
pub fn coingecko_btc_inr(data: &Value) -> Option<f64> {
    data.pointer("/bitcoin/inr").and_then(number)
}
