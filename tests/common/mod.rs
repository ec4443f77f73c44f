//! Shared test fixtures for the closing-snapshot integration tests.
//!
//! Provides a canned [`PriceProvider`] so pipelines run without network
//! access, plus sample price tables and spark response bodies.

#![allow(dead_code)]

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
use closing_snapshot::{
    Basket, ClosingSnapshot, Instrument, PercentLayout, PriceProvider, PriceTable, Result,
    SnapshotError,
};
use std::path::Path;

/// Provider returning a fixed table (or a fixed failure) and counting calls.
pub struct FixtureProvider {
    table: Option<PriceTable>,
    pub calls: usize,
    pub last_symbols: Vec<String>,
}

impl FixtureProvider {
    pub fn new(table: PriceTable) -> Self {
        Self {
            table: Some(table),
            calls: 0,
            last_symbols: Vec::new(),
        }
    }

    /// A provider whose every fetch fails as if the service were down.
    pub fn failing() -> Self {
        Self {
            table: None,
            calls: 0,
            last_symbols: Vec::new(),
        }
    }
}

impl PriceProvider for FixtureProvider {
    fn fetch_closes(&mut self, symbols: &[&str]) -> Result<PriceTable> {
        self.calls += 1;
        self.last_symbols = symbols.iter().map(|s| s.to_string()).collect();
        self.table
            .clone()
            .ok_or_else(|| SnapshotError::Provider("service unavailable".to_string()))
    }
}

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
}

/// Instant whose Istanbul wall clock reads `h:m:s`.
pub fn istanbul(h: u32, m: u32, s: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(3 * 3600)
        .unwrap()
        .with_ymd_and_hms(2024, 5, 7, h, m, s)
        .unwrap()
}

/// An instant inside the allowed window (converted 18:00).
pub fn open_time() -> DateTime<FixedOffset> {
    istanbul(1, 0, 0)
}

/// Two-instrument basket: A (Alpha) then B (Beta).
pub fn ab_basket(layout: PercentLayout) -> Basket {
    Basket::new(
        "ab",
        vec![Instrument::new("A", "Alpha"), Instrument::new("B", "Beta")],
        layout,
    )
    .unwrap()
}

/// A: 100 -> 105, B: 50 -> 49. Columns arrive B first.
pub fn ab_table() -> PriceTable {
    let mut table = PriceTable::new();
    table.insert(day(6), "B", Some(50.0));
    table.insert(day(6), "A", Some(100.0));
    table.insert(day(7), "B", Some(49.0));
    table.insert(day(7), "A", Some(105.0));
    table
}

/// A table with only the latest session.
pub fn one_session_table() -> PriceTable {
    let mut table = PriceTable::new();
    table.insert(day(7), "A", Some(105.0));
    table.insert(day(7), "B", Some(49.0));
    table
}

pub fn snapshot(
    basket: Basket,
    provider: FixtureProvider,
    dir: &Path,
) -> ClosingSnapshot<FixtureProvider> {
    ClosingSnapshot::builder()
        .basket(basket)
        .output_dir(dir)
        .build_with_provider(provider)
}

/// Spark response for `^GSPC` (New York) and `XU100.IS` (Istanbul).
///
/// Timestamps are session opens in UTC; gmtoffset moves each onto its
/// exchange-local trading day.
pub fn spark_body() -> &'static str {
    r#"{
      "spark": {
        "result": [
          {
            "symbol": "XU100.IS",
            "response": [{
              "meta": {"symbol": "XU100.IS", "gmtoffset": 10800},
              "timestamp": [1714975200, 1715061600],
              "indicators": {"quote": [{"close": [9563.0400390625, 9611.7197265625]}]}
            }]
          },
          {
            "symbol": "^GSPC",
            "response": [{
              "meta": {"symbol": "^GSPC", "gmtoffset": -14400},
              "timestamp": [1715002200, 1715088600],
              "indicators": {"quote": [{"close": [5180.740234375, 5187.7001953125]}]}
            }]
          }
        ],
        "error": null
      }
    }"#
}

/// Spark response where the two instruments' bars fall on different days.
///
/// `^GSPC` (New York) closes on May 6 and 7. `USDTRY=X` bars are stamped
/// 23:00 UTC with a +1h offset, so they land on May 6, 7 and 8 locally.
/// Only May 7 has both symbols.
pub fn staggered_spark_body() -> &'static str {
    r#"{
      "spark": {
        "result": [
          {
            "symbol": "^GSPC",
            "response": [{
              "meta": {"symbol": "^GSPC", "gmtoffset": -14400},
              "timestamp": [1715002200, 1715088600],
              "indicators": {"quote": [{"close": [5180.740234375, 5187.7001953125]}]}
            }]
          },
          {
            "symbol": "USDTRY=X",
            "response": [{
              "meta": {"symbol": "USDTRY=X", "gmtoffset": 3600},
              "timestamp": [1714950000, 1715036400, 1715122800],
              "indicators": {"quote": [{"close": [32.1, 32.25, 32.5]}]}
            }]
          }
        ],
        "error": null
      }
    }"#
}

/// `^GSPC` then `USDTRY=X`, percent sign inline.
pub fn staggered_basket() -> Basket {
    Basket::new(
        "staggered",
        vec![
            Instrument::new("^GSPC", "S&P 500"),
            Instrument::new("USDTRY=X", "USD/TRY"),
        ],
        PercentLayout::Inline,
    )
    .unwrap()
}
