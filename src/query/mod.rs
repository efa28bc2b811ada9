// src/query/mod.rs
//! Free-text query → `{tickers, period, intent}`.
//!
//! Three independent passes over the text, then a small composition policy:
//! - tickers: alphabetic, all upper-case tokens of 2 to 5 characters;
//! - period: see [`rules::extract_period`], defaulting to one year;
//! - intent: see [`rules::extract_intent`]; `compare` with fewer than two
//!   tickers becomes `trend`.
//!
//! Organization names the tagger finds are *not* mapped to symbols.
//! "Apple Inc" yields no ticker.

pub mod rules;
pub mod tagger;

use std::collections::BTreeSet;

use serde::Serialize;

pub use rules::{Intent, Period};
pub use tagger::{RuleTagger, Tagger, Token};

const TICKER_MIN_LEN: usize = 2;
const TICKER_MAX_LEN: usize = 5;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ParsedQuery {
    pub tickers: BTreeSet<String>,
    pub period: Period,
    pub intent: Intent,
}

#[derive(Clone, Debug, Default)]
pub struct QueryInterpreter<T: Tagger = RuleTagger> {
    tagger: T,
}

impl<T: Tagger> QueryInterpreter<T> {
    pub fn new(tagger: T) -> Self {
        Self { tagger }
    }

    /// Never fails. Unrecognized input gives no tickers, `1y`, `unknown`.
    pub fn parse(&self, text: &str) -> ParsedQuery {
        let tickers = self.tickers(text);
        let period = rules::extract_period(text).unwrap_or_default();
        let mut intent = rules::extract_intent(text);

        if intent == Intent::Compare && tickers.len() < 2 {
            logd!("compare with {} ticker(s), treating as trend", tickers.len());
            intent = Intent::Trend;
        }

        ParsedQuery { tickers, period, intent }
    }

    fn tickers(&self, text: &str) -> BTreeSet<String> {
        let tokens = self.tagger.tokenize(text);

        let orgs = self.tagger.organizations(text, &tokens);
        if !orgs.is_empty() {
            let names: Vec<&str> = orgs.iter().filter_map(|r| text.get(r.clone())).collect();
            logd!("organizations mentioned (not mapped): {names:?}");
        }

        tokens
            .into_iter()
            .filter(|t| is_ticker_like(t))
            .map(|t| t.text)
            .collect()
    }
}

fn is_ticker_like(t: &Token) -> bool {
    let len = t.text.chars().count();
    t.is_alpha() && t.is_upper() && (TICKER_MIN_LEN..=TICKER_MAX_LEN).contains(&len)
}

/// [`QueryInterpreter::parse`] with the rule-based tagger.
pub fn parse_query(text: &str) -> ParsedQuery {
    QueryInterpreter::<RuleTagger>::default().parse(text)
}
