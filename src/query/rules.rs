// src/query/rules.rs
//
// Ordered rule cascades for period and intent. Each list is walked top to
// bottom and the first rule that fires decides.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};

/// Look-back window, in the vocabulary of the price history provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Period {
    Days(u32),
    Months(u32),
    Years(u32),
    Ytd,
    Max,
}

impl Default for Period {
    fn default() -> Self {
        Period::Years(1)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Days(n) => write!(f, "{n}d"),
            Period::Months(n) => write!(f, "{n}mo"),
            Period::Years(n) => write!(f, "{n}y"),
            Period::Ytd => f.write_str("ytd"),
            Period::Max => f.write_str("max"),
        }
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Trend,
    Compare,
    Price,
    Unknown,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Intent::Trend => "trend",
            Intent::Compare => "compare",
            Intent::Price => "price",
            Intent::Unknown => "unknown",
        })
    }
}

enum PeriodRule {
    /// Any of the phrases occurs in the lower-cased text.
    Phrase(&'static [&'static str], Period),
    /// First capture is the count.
    Count(Regex, fn(u32) -> Period),
}

impl PeriodRule {
    fn apply(&self, lc: &str) -> Option<Period> {
        match self {
            PeriodRule::Phrase(phrases, period) => {
                phrases.iter().any(|p| lc.contains(p)).then_some(*period)
            }
            PeriodRule::Count(re, make) => {
                let n = re.captures(lc)?.get(1)?.as_str().parse::<u32>().ok()?;
                Some(make(n))
            }
        }
    }
}

fn count(pattern: &str, make: fn(u32) -> Period) -> Option<PeriodRule> {
    match Regex::new(pattern) {
        Ok(re) => Some(PeriodRule::Count(re, make)),
        Err(e) => {
            loge!("period pattern {pattern:?} rejected: {e}");
            None
        }
    }
}

static PERIOD_RULES: LazyLock<Vec<PeriodRule>> = LazyLock::new(|| {
    [
        Some(PeriodRule::Phrase(&["year to date", "ytd"], Period::Ytd)),
        count(r"([0-9]+)\s*(?:month|months|mo)\b", Period::Months),
        count(r"([0-9]+)\s*(?:year|years|yr|y)\b", Period::Years),
        count(r"([0-9]+)\s*(?:day|days|d)\b", Period::Days),
        Some(PeriodRule::Phrase(&["last month", "past month"], Period::Months(1))),
        Some(PeriodRule::Phrase(&["last six months", "past six months"], Period::Months(6))),
        Some(PeriodRule::Phrase(&["last year", "past year"], Period::Years(1))),
        Some(PeriodRule::Phrase(&["max", "all time"], Period::Max)),
    ]
    .into_iter()
    .flatten()
    .collect()
});

static INTENT_RULES: [(&[&str], Intent); 3] = [
    (&["compare", "vs", "versus"], Intent::Compare),
    (&["trend", "performance", "history", "historical"], Intent::Trend),
    (&["price", "value"], Intent::Price),
];

/// Period named in `text`, or `None` when nothing matches.
pub fn extract_period(text: &str) -> Option<Period> {
    let lc = text.to_lowercase();
    PERIOD_RULES.iter().find_map(|rule| rule.apply(&lc))
}

pub fn extract_intent(text: &str) -> Intent {
    let lc = text.to_lowercase();
    INTENT_RULES
        .iter()
        .find(|(words, _)| words.iter().any(|w| lc.contains(w)))
        .map_or(Intent::Unknown, |(_, intent)| *intent)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period(text: &str) -> Option<String> {
        extract_period(text).map(|p| p.to_string())
    }

    #[test]
    fn every_rule_compiled() {
        assert_eq!(PERIOD_RULES.len(), 8);
    }

    #[test]
    fn numeric_periods() {
        assert_eq!(period("last 6 months").as_deref(), Some("6mo"));
        assert_eq!(period("3 mo").as_deref(), Some("3mo"));
        assert_eq!(period("1 year").as_deref(), Some("1y"));
        assert_eq!(period("past 2 years").as_deref(), Some("2y"));
        assert_eq!(period("10yr").as_deref(), Some("10y"));
        assert_eq!(period("5 d").as_deref(), Some("5d"));
        assert_eq!(period("30 days").as_deref(), Some("30d"));
    }

    #[test]
    fn fixed_periods() {
        assert_eq!(period("NVDA ytd performance").as_deref(), Some("ytd"));
        assert_eq!(period("Year To Date").as_deref(), Some("ytd"));
        assert_eq!(period("over the past month").as_deref(), Some("1mo"));
        assert_eq!(period("the last six months").as_deref(), Some("6mo"));
        assert_eq!(period("for the past year").as_deref(), Some("1y"));
        assert_eq!(period("MAX").as_deref(), Some("max"));
        assert_eq!(period("all time high").as_deref(), Some("max"));
        assert_eq!(period("how is AAPL doing"), None);
    }

    #[test]
    fn precedence_is_fixed() {
        // ytd beats a count, months beat years, years beat days
        assert_eq!(period("ytd vs 6 months").as_deref(), Some("ytd"));
        assert_eq!(period("2 years or 3 months").as_deref(), Some("3mo"));
        assert_eq!(period("5 days or 1 year").as_deref(), Some("1y"));
        // a count beats a phrase
        assert_eq!(period("past year, say 90 days").as_deref(), Some("90d"));
    }

    #[test]
    fn oversized_count_falls_through() {
        assert_eq!(period("99999999999 days, all time").as_deref(), Some("max"));
    }

    #[test]
    fn intents_first_match_wins() {
        assert_eq!(extract_intent("Compare A and B trend"), Intent::Compare);
        assert_eq!(extract_intent("AAPL VS GOOG"), Intent::Compare);
        assert_eq!(extract_intent("historical prices"), Intent::Trend);
        assert_eq!(extract_intent("current value of X"), Intent::Price);
        assert_eq!(extract_intent("hello"), Intent::Unknown);
    }

    #[test]
    fn vocabulary_serializes_as_tokens() {
        assert_eq!(serde_json::to_value(Period::Months(6)).unwrap(), "6mo");
        assert_eq!(serde_json::to_value(Intent::Compare).unwrap(), "compare");
        assert_eq!(Period::default().to_string(), "1y");
    }
}
