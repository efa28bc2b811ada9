// src/analytics.rs
//
// Open-interest alignment across the call and put sides of a chain.
// Full outer join on strike, missing side = 0, then the put/call ratio.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::specs::option_chain::{OptionChain, OptionRecord};

/// The two fields aggregation looks at. `None` means the source value was
/// missing or not numeric.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StrikeOi {
    pub strike: Option<f64>,
    pub open_interest: Option<f64>,
}

impl StrikeOi {
    pub fn new(strike: f64, open_interest: f64) -> Self {
        Self { strike: Some(strike), open_interest: Some(open_interest) }
    }
}

impl From<&OptionRecord> for StrikeOi {
    fn from(r: &OptionRecord) -> Self {
        Self { strike: r.strike(), open_interest: r.open_interest() }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StrikeAlignment {
    pub strike: f64,
    pub call_oi: f64,
    pub put_oi: f64,
}

/// Put OI over call OI. `Undefined` when total call OI is zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PutCallRatio {
    Defined(f64),
    Undefined,
}

impl PutCallRatio {
    pub fn value(self) -> Option<f64> {
        match self {
            PutCallRatio::Defined(v) => Some(v),
            PutCallRatio::Undefined => None,
        }
    }
}

impl fmt::Display for PutCallRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PutCallRatio::Defined(v) => write!(f, "{v:.2}"),
            PutCallRatio::Undefined => f.write_str("undefined"),
        }
    }
}

impl Serialize for PutCallRatio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PutCallRatio::Defined(v) => serializer.serialize_f64(*v),
            PutCallRatio::Undefined => serializer.serialize_str("undefined"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OiAnalytics {
    /// Ascending by strike, one row per distinct strike.
    pub rows: Vec<StrikeAlignment>,
    pub put_call_ratio: PutCallRatio,
    pub total_call_oi: f64,
    pub total_put_oi: f64,
}

// Strike as a map key. Finite values only; -0.0 folded into 0.0.
#[derive(Clone, Copy, Debug)]
struct StrikeKey(f64);

impl StrikeKey {
    fn new(v: f64) -> Option<Self> {
        v.is_finite().then_some(Self(v + 0.0))
    }
}

impl PartialEq for StrikeKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for StrikeKey {}

impl PartialOrd for StrikeKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for StrikeKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

pub fn aggregate(calls: &[StrikeOi], puts: &[StrikeOi]) -> OiAnalytics {
    // (call, put) per strike; duplicates within a side add up
    let mut joined: BTreeMap<StrikeKey, (f64, f64)> = BTreeMap::new();
    let mut dropped = 0usize;

    for (side, is_call) in [(calls, true), (puts, false)] {
        for item in side {
            let Some(key) = item.strike.and_then(StrikeKey::new) else {
                dropped += 1;
                continue;
            };
            let oi = item.open_interest.filter(|v| v.is_finite()).unwrap_or(0.0);
            let slot = joined.entry(key).or_insert((0.0, 0.0));
            if is_call { slot.0 += oi } else { slot.1 += oi }
        }
    }
    if dropped > 0 {
        logd!("{dropped} records without a usable strike left out");
    }

    let rows: Vec<StrikeAlignment> = joined
        .into_iter()
        .map(|(k, (call_oi, put_oi))| StrikeAlignment { strike: k.0, call_oi, put_oi })
        .collect();

    let total_call_oi: f64 = rows.iter().map(|r| r.call_oi).sum();
    let total_put_oi: f64 = rows.iter().map(|r| r.put_oi).sum();
    let put_call_ratio = if total_call_oi == 0.0 {
        PutCallRatio::Undefined
    } else {
        PutCallRatio::Defined(total_put_oi / total_call_oi)
    };

    OiAnalytics { rows, put_call_ratio, total_call_oi, total_put_oi }
}

/// Aggregate every record of a chain. Narrow with `for_expiry` first to
/// get per-expiry figures.
pub fn aggregate_chain(chain: &OptionChain) -> OiAnalytics {
    let calls: Vec<StrikeOi> = chain.calls.iter().map(StrikeOi::from).collect();
    let puts: Vec<StrikeOi> = chain.puts.iter().map(StrikeOi::from).collect();
    aggregate(&calls, &puts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strikes(rows: &[StrikeAlignment]) -> Vec<f64> {
        rows.iter().map(|r| r.strike).collect()
    }

    #[test]
    fn disjoint_sides_give_union_rows_with_zeros() {
        let calls = [StrikeOi::new(100.0, 10.0), StrikeOi::new(300.0, 30.0)];
        let puts = [StrikeOi::new(200.0, 20.0), StrikeOi::new(400.0, 40.0)];
        let out = aggregate(&calls, &puts);

        assert_eq!(out.rows.len(), 4);
        assert_eq!(strikes(&out.rows), vec![100.0, 200.0, 300.0, 400.0]);
        for row in &out.rows {
            let in_calls = calls.iter().any(|c| c.strike == Some(row.strike));
            let in_puts = puts.iter().any(|p| p.strike == Some(row.strike));
            assert_eq!(row.call_oi == 0.0, !in_calls);
            assert_eq!(row.put_oi == 0.0, !in_puts);
        }
        assert_eq!(out.put_call_ratio, PutCallRatio::Defined(60.0 / 40.0));
    }

    #[test]
    fn shared_strikes_meet_on_one_row() {
        let calls = [StrikeOi::new(22000.0, 100.0)];
        let puts = [StrikeOi::new(22000.0, 250.0), StrikeOi::new(21900.0, 50.0)];
        let out = aggregate(&calls, &puts);
        assert_eq!(
            out.rows,
            vec![
                StrikeAlignment { strike: 21900.0, call_oi: 0.0, put_oi: 50.0 },
                StrikeAlignment { strike: 22000.0, call_oi: 100.0, put_oi: 250.0 },
            ]
        );
        assert_eq!(out.total_put_oi, 300.0);
        assert_eq!(out.put_call_ratio.value(), Some(3.0));
    }

    #[test]
    fn zero_call_oi_is_undefined() {
        let out = aggregate(&[StrikeOi::new(1.0, 0.0)], &[StrikeOi::new(1.0, 5.0)]);
        assert_eq!(out.put_call_ratio, PutCallRatio::Undefined);
        assert_eq!(out.put_call_ratio.to_string(), "undefined");

        let empty = aggregate(&[], &[]);
        assert!(empty.rows.is_empty());
        assert_eq!(empty.put_call_ratio, PutCallRatio::Undefined);
    }

    #[test]
    fn bad_values_degrade() {
        let calls = [
            StrikeOi { strike: Some(100.0), open_interest: None },
            StrikeOi { strike: None, open_interest: Some(999.0) },
            StrikeOi { strike: Some(f64::NAN), open_interest: Some(999.0) },
        ];
        let out = aggregate(&calls, &[StrikeOi::new(100.0, 7.0)]);
        assert_eq!(out.rows.len(), 1);
        assert_eq!(out.rows[0].call_oi, 0.0);
        assert_eq!(out.put_call_ratio, PutCallRatio::Undefined);
    }

    #[test]
    fn duplicate_strikes_within_a_side_are_summed() {
        let calls = [StrikeOi::new(50.0, 1.0), StrikeOi::new(50.0, 2.0), StrikeOi::new(-0.0, 1.0)];
        let out = aggregate(&calls, &[StrikeOi::new(0.0, 4.0)]);
        assert_eq!(strikes(&out.rows), vec![0.0, 50.0]);
        assert_eq!(out.rows[1].call_oi, 3.0);
        assert_eq!(out.rows[0].put_oi, 4.0);
    }

    #[test]
    fn ratio_serializes_as_number_or_sentinel() {
        let v = serde_json::to_value(PutCallRatio::Defined(1.5)).unwrap();
        assert_eq!(v, serde_json::json!(1.5));
        let v = serde_json::to_value(PutCallRatio::Undefined).unwrap();
        assert_eq!(v, serde_json::json!("undefined"));
    }
}
