// src/specs/option_chain.rs
//
// Index option chain JSON endpoint. The API answers only inside a session
// that has visited a human-facing page first, so every fetch opens a new
// session, touches that page (best effort), then calls the API.
//
// Response shape:
//   { "records": { "underlyingValue": 22500.5,
//                  "data": [ { "expiryDate": "28-Nov-2024",
//                              "CE": { "strikePrice": 22000, "openInterest": 1200, ... },
//                              "PE": { ... } }, ... ] } }

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::consts::*;
use crate::config::options::ChainOptions;
use crate::core::net::{HttpRequest, Session, Transport, url_with_query};
use crate::core::sanitize::json_number;
use crate::error::{Result, SourceError};

const EXPIRY_KEY: &str = "expiryDate";

/// One side (call or put) of one strike row. Every source field is kept as
/// delivered; `expiryDate` is copied in from the enclosing row.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionRecord {
    pub fields: Map<String, Value>,
}

impl OptionRecord {
    fn number(&self, key: &str) -> Option<f64> {
        self.fields.get(key).and_then(json_number)
    }

    pub fn strike(&self) -> Option<f64> { self.number("strikePrice") }
    pub fn open_interest(&self) -> Option<f64> { self.number("openInterest") }
    pub fn last_price(&self) -> Option<f64> { self.number("lastPrice") }
    pub fn total_volume(&self) -> Option<f64> { self.number("totalTradedVolume") }

    pub fn expiry(&self) -> Option<&str> {
        self.fields.get(EXPIRY_KEY).and_then(Value::as_str)
    }

    pub fn expiry_date(&self) -> Option<NaiveDate> {
        self.expiry().and_then(parse_expiry)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct OptionChain {
    pub spot_price: Option<f64>,
    /// Ascending by calendar date, distinct.
    pub expiries: Vec<NaiveDate>,
    pub calls: Vec<OptionRecord>,
    pub puts: Vec<OptionRecord>,
}

impl OptionChain {
    /// Same chain narrowed to the records of one expiry.
    pub fn for_expiry(&self, date: NaiveDate) -> OptionChain {
        let keep = |side: &[OptionRecord]| -> Vec<OptionRecord> {
            side.iter().filter(|r| r.expiry_date() == Some(date)).cloned().collect()
        };
        OptionChain {
            spot_price: self.spot_price,
            expiries: self.expiries.iter().copied().filter(|d| *d == date).collect(),
            calls: keep(&self.calls),
            puts: keep(&self.puts),
        }
    }

    pub fn nearest_expiry(&self) -> Option<NaiveDate> {
        self.expiries.first().copied()
    }
}

pub fn parse_expiry(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), EXPIRY_FORMAT).ok()
}

type SpotSource = fn(&Value) -> Option<f64>;

// Per-row spot sources, in precedence order.
static ROW_SPOT_SOURCES: [SpotSource; 2] = [
    |row| row.get("PE")?.get("underlyingValue").and_then(json_number),
    |row| row.get("CE")?.get("underlyingValue").and_then(json_number),
];

fn row_spot(row: &Value) -> Option<f64> {
    ROW_SPOT_SOURCES.iter().find_map(|source| source(row))
}

fn side(row: &Value, key: &str, expiry: Option<&str>) -> Option<OptionRecord> {
    let mut fields = row.get(key)?.as_object().filter(|m| !m.is_empty())?.clone();
    if let Some(e) = expiry {
        fields.insert(s!(EXPIRY_KEY), Value::String(s!(e)));
    }
    Some(OptionRecord { fields })
}

/// Flatten one API document. Pure: the same document always yields the
/// same chain.
pub fn extract_chain(doc: &Value) -> Result<OptionChain> {
    let records = match doc.get("records") {
        None | Some(Value::Null) => return Err(SourceError::NoData(s!("no records section"))),
        Some(Value::Object(m)) if m.is_empty() => {
            return Err(SourceError::NoData(s!("empty records section")));
        }
        Some(r) if r.is_object() => r,
        Some(_) => return Err(SourceError::MalformedResponse(s!("records is not an object"))),
    };
    let rows = match records.get("data") {
        None | Some(Value::Null) => return Err(SourceError::NoData(s!("records.data missing"))),
        Some(Value::Array(rows)) if rows.is_empty() => {
            return Err(SourceError::NoData(s!("records.data is empty")));
        }
        Some(Value::Array(rows)) => rows,
        Some(_) => return Err(SourceError::MalformedResponse(s!("records.data is not a list"))),
    };

    let mut raw_expiries: BTreeSet<&str> = BTreeSet::new();
    let mut spot_price: Option<f64> = None;
    let mut chain = OptionChain::default();

    for row in rows {
        if !row.is_object() {
            logd!("skipping non-object row in records.data");
            continue;
        }
        let expiry = row.get(EXPIRY_KEY).and_then(Value::as_str);
        if let Some(e) = expiry {
            raw_expiries.insert(e);
        }
        if spot_price.is_none() {
            spot_price = row_spot(row);
        }
        chain.calls.extend(side(row, "CE", expiry));
        chain.puts.extend(side(row, "PE", expiry));
    }

    chain.spot_price =
        spot_price.or_else(|| records.get("underlyingValue").and_then(json_number));

    let mut expiries: Vec<NaiveDate> = raw_expiries
        .into_iter()
        .filter_map(|raw| {
            let parsed = parse_expiry(raw);
            if parsed.is_none() {
                logw!("ignoring unparseable expiry {raw:?}");
            }
            parsed
        })
        .collect();
    expiries.sort_unstable();
    expiries.dedup();
    chain.expiries = expiries;

    Ok(chain)
}

/// Human-facing page visited before the API call.
pub fn bootstrap_url(base_url: &str, symbol: &str) -> Result<String> {
    if MARKET_PAGE_SYMBOLS.iter().any(|s| s.eq_ignore_ascii_case(symbol)) {
        Ok(join!(base_url, MARKET_PAGE_PATH))
    } else {
        Ok(url_with_query(&join!(base_url, QUOTE_PAGE_PATH), &[("symbol", symbol)])?)
    }
}

pub fn api_url(base_url: &str, symbol: &str) -> Result<String> {
    Ok(url_with_query(&join!(base_url, CHAIN_API_PATH), &[("symbol", symbol)])?)
}

pub struct OptionChainClient<'a, T: Transport> {
    transport: &'a T,
    options: ChainOptions,
}

impl<'a, T: Transport> OptionChainClient<'a, T> {
    pub fn new(transport: &'a T, options: ChainOptions) -> Self {
        Self { transport, options }
    }

    pub fn fetch(&self, symbol: &str) -> Result<OptionChain> {
        let base = self.options.base_url.as_str();
        let page_url = bootstrap_url(base, symbol)?;
        let api = api_url(base, symbol)?;
        let mut session = self.transport.open()?;

        // Best effort; the API call may still succeed without it
        let page_req = HttpRequest::new(page_url.as_str(), self.options.bootstrap_timeout())
            .header("Accept", ACCEPT_HTML);
        match session.get(&page_req).and_then(|r| r.error_for_status(&page_url)) {
            Ok(_) => logd!("bootstrap ok for {symbol}"),
            Err(e) => logw!("bootstrap failed for {symbol}, continuing: {e}"),
        }

        let api_req = HttpRequest::new(api.as_str(), self.options.api_timeout())
            .header("Accept", ACCEPT_JSON)
            .header("Referer", page_url.as_str())
            .header("X-Requested-With", "XMLHttpRequest");
        let resp = session.get(&api_req)?.error_for_status(&api)?;

        let doc: Value = serde_json::from_str(&resp.body).map_err(|e| {
            SourceError::MalformedResponse(format!("option chain for {symbol} is not JSON: {e}"))
        })?;
        let chain = extract_chain(&doc)?;

        logf!(
            "{symbol}: {} calls, {} puts, {} expiries, spot {:?}",
            chain.calls.len(),
            chain.puts.len(),
            chain.expiries.len(),
            chain.spot_price
        );
        Ok(chain)
    }
}
