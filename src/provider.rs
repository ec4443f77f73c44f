//! Market-data provider for recent daily closes.
//!
//! All symbols of a basket are requested in one batched call to the Yahoo
//! Finance spark endpoint. There is no retry: a network error, an error
//! status or a malformed payload aborts the run.

use crate::config;
use crate::error::{Result, SnapshotError};
use crate::models::PriceTable;
use chrono::DateTime;
use reqwest::blocking::Client;
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;

/// Source of daily closing prices.
pub trait PriceProvider {
    /// Fetch the most recent sessions of daily closes for `symbols` in one call.
    fn fetch_closes(&mut self, symbols: &[&str]) -> Result<PriceTable>;
}

// ---------------------------------------------------------------------------
// SparkClient
// ---------------------------------------------------------------------------

/// Blocking HTTP client for the Yahoo Finance spark endpoint.
pub struct SparkClient {
    /// Endpoint queried for closes.
    pub base_url: String,
    timeout: Duration,
    client: Option<Client>,
}

impl SparkClient {
    /// Create a client. `base_url` defaults to [`config::SPARK_URL`].
    pub fn new(base_url: Option<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.unwrap_or_else(|| config::SPARK_URL.to_string()),
            timeout,
            client: None,
        }
    }

    /// Lazy HTTP client, created on first use.
    pub fn client(&mut self) -> Result<&Client> {
        if self.client.is_none() {
            let client = Client::builder()
                .timeout(self.timeout)
                .user_agent(config::USER_AGENT)
                .redirect(reqwest::redirect::Policy::limited(10))
                .build()?;
            self.client = Some(client);
        }
        self.client
            .as_ref()
            .ok_or_else(|| SnapshotError::Provider("HTTP client unavailable".to_string()))
    }

    /// Full request URL for a batch of symbols.
    pub fn request_url(&self, symbols: &[&str]) -> Result<Url> {
        if symbols.is_empty() {
            return Err(SnapshotError::InvalidArgument(
                "no symbols to request".to_string(),
            ));
        }
        Url::parse_with_params(
            &self.base_url,
            &[
                ("symbols", symbols.join(",").as_str()),
                ("range", config::LOOKBACK_RANGE),
                ("interval", config::SESSION_INTERVAL),
            ],
        )
        .map_err(|e| {
            SnapshotError::InvalidArgument(format!("bad provider URL {}: {}", self.base_url, e))
        })
    }
}

impl PriceProvider for SparkClient {
    fn fetch_closes(&mut self, symbols: &[&str]) -> Result<PriceTable> {
        let url = self.request_url(symbols)?;
        log::debug!("Requesting {}", url);

        let client = self.client()?.clone();
        let body = client.get(url).send()?.error_for_status()?.text()?;
        let table = parse_spark(&body, symbols)?;

        log::debug!(
            "Received {} session(s) for {} symbol(s)",
            table.len(),
            table.symbols().len()
        );
        Ok(table)
    }
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SparkEnvelope {
    spark: SparkBody,
}

#[derive(Debug, Deserialize)]
struct SparkBody {
    result: Option<Vec<SparkResult>>,
    error: Option<SparkError>,
}

#[derive(Debug, Deserialize)]
struct SparkError {
    code: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SparkResult {
    symbol: String,
    #[serde(default)]
    response: Vec<SparkSeries>,
}

#[derive(Debug, Deserialize)]
struct SparkSeries {
    meta: Option<SeriesMeta>,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Option<Indicators>,
}

#[derive(Debug, Deserialize)]
struct SeriesMeta {
    gmtoffset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteSeries>,
}

#[derive(Debug, Deserialize)]
struct QuoteSeries {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// Parse a spark response body into a [`PriceTable`].
///
/// Timestamps are shifted by the exchange's GMT offset before taking the
/// calendar date, so each close lands on its trading day. Columns are
/// created in `symbols` order; every requested symbol must appear in the
/// response, though it may carry no data points.
pub fn parse_spark(body: &str, symbols: &[&str]) -> Result<PriceTable> {
    let envelope: SparkEnvelope = serde_json::from_str(body)?;

    if let Some(err) = envelope.spark.error {
        return Err(SnapshotError::Provider(format!(
            "{}: {}",
            err.code.as_deref().unwrap_or("error"),
            err.description.as_deref().unwrap_or("no description")
        )));
    }

    let results = envelope
        .spark
        .result
        .ok_or_else(|| SnapshotError::Provider("response has no result".to_string()))?;

    let mut table = PriceTable::new();
    for symbol in symbols {
        table.add_symbol(symbol);
    }

    for symbol in symbols {
        let result = results
            .iter()
            .find(|r| r.symbol == *symbol)
            .ok_or_else(|| SnapshotError::MissingSymbol(symbol.to_string()))?;

        for series in &result.response {
            let offset = series.meta.as_ref().and_then(|m| m.gmtoffset).unwrap_or(0);
            let closes = series
                .indicators
                .as_ref()
                .and_then(|i| i.quote.first())
                .map(|q| q.close.as_slice())
                .unwrap_or(&[]);

            if closes.len() != series.timestamp.len() {
                return Err(SnapshotError::Provider(format!(
                    "{}: {} timestamps but {} closes",
                    symbol,
                    series.timestamp.len(),
                    closes.len()
                )));
            }

            for (ts, close) in series.timestamp.iter().zip(closes) {
                let date = DateTime::from_timestamp(ts + offset, 0)
                    .ok_or_else(|| {
                        SnapshotError::Provider(format!("{}: bad timestamp {}", symbol, ts))
                    })?
                    .date_naive();
                table.insert(date, symbol, *close);
            }
        }
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_url_batches_symbols() {
        let client = SparkClient::new(None, Duration::from_secs(5));
        let url = client.request_url(&["^GSPC", "GC=F"]).unwrap();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("symbols".to_string(), "^GSPC,GC=F".to_string()),
                ("range".to_string(), "2d".to_string()),
                ("interval".to_string(), "1d".to_string()),
            ]
        );
        assert!(url.as_str().starts_with(config::SPARK_URL));
    }

    #[test]
    fn request_url_rejects_empty_batch() {
        let client = SparkClient::new(None, Duration::from_secs(5));
        assert!(client.request_url(&[]).is_err());
    }

    #[test]
    fn request_url_rejects_bad_base() {
        let client = SparkClient::new(Some("not a url".to_string()), Duration::from_secs(5));
        assert!(matches!(
            client.request_url(&["A"]),
            Err(SnapshotError::InvalidArgument(_))
        ));
    }

    #[test]
    fn client_is_built_once_on_demand() {
        let mut client = SparkClient::new(None, Duration::from_secs(5));
        assert!(client.client.is_none());
        client.request_url(&["A"]).unwrap();
        assert!(client.client.is_none());
        client.client().unwrap();
        assert!(client.client.is_some());
    }
}
