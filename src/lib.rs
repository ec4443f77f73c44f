//! Daily closing-price snapshot.
//!
//! Fetches recent daily closes for a fixed instrument basket, computes each
//! instrument's day-over-day percent change and writes a styled HTML table
//! with a browser-side "Download as PNG" button.
//!
//! A run is one linear pass: time gate, fetch, compute, render, write.
//!
//! # Quick start
//!
//! ```no_run
//! use closing_snapshot::{Basket, ClosingSnapshot};
//!
//! let mut snapshot = ClosingSnapshot::builder()
//!     .basket(Basket::markets())
//!     .build();
//!
//! let outcome = snapshot.run().unwrap();
//! std::process::exit(outcome.exit_code());
//! ```

pub mod change;
pub mod config;
pub mod error;
pub mod gate;
pub mod models;
pub mod page;
pub mod provider;
pub mod render;

pub use error::{Result, SnapshotError};
pub use gate::{GateDecision, TimeGate};
pub use models::{Basket, ChangeRecord, Direction, Instrument, PercentLayout, PriceTable};
pub use provider::{PriceProvider, SparkClient};

use chrono::{DateTime, NaiveTime, TimeZone, Utc};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// SnapshotBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`ClosingSnapshot`].
///
/// Use [`ClosingSnapshot::builder()`] to obtain a builder, chain
/// configuration methods, and call [`build()`](SnapshotBuilder::build).
pub struct SnapshotBuilder {
    basket: Basket,
    output_dir: Option<PathBuf>,
    timeout: Duration,
    base_url: Option<String>,
    skip_time_gate: bool,
}

impl Default for SnapshotBuilder {
    fn default() -> Self {
        Self {
            basket: Basket::default(),
            output_dir: None,
            timeout: Duration::from_secs(config::DEFAULT_TIMEOUT_SECS),
            base_url: None,
            skip_time_gate: false,
        }
    }
}

impl SnapshotBuilder {
    /// Set the instrument basket. Defaults to [`Basket::markets()`].
    pub fn basket(mut self, basket: Basket) -> Self {
        self.basket = basket;
        self
    }

    /// Set the directory the page is written to.
    ///
    /// Defaults to the process's current working directory.
    pub fn output_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the HTTP request timeout for the provider call.
    ///
    /// Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the provider endpoint.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Run regardless of the wall clock. Defaults to `false`.
    pub fn skip_time_gate(mut self, skip: bool) -> Self {
        self.skip_time_gate = skip;
        self
    }

    /// Build a snapshot backed by the Yahoo Finance spark endpoint.
    ///
    /// No network traffic happens until [`ClosingSnapshot::run`].
    pub fn build(self) -> ClosingSnapshot<SparkClient> {
        let provider = SparkClient::new(self.base_url.clone(), self.timeout);
        self.build_with_provider(provider)
    }

    /// Build a snapshot backed by any [`PriceProvider`].
    pub fn build_with_provider<P: PriceProvider>(self, provider: P) -> ClosingSnapshot<P> {
        ClosingSnapshot {
            basket: self.basket,
            output_dir: self.output_dir,
            gate: TimeGate::new(),
            skip_time_gate: self.skip_time_gate,
            provider,
        }
    }
}

// ---------------------------------------------------------------------------
// RunOutcome
// ---------------------------------------------------------------------------

/// How a run ended when no error occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The time gate was closed; nothing was fetched.
    Rejected { converted: NaiveTime },
    /// Some instrument had fewer than two closes; nothing was written.
    ///
    /// `sessions` is the smallest per-instrument close count.
    InsufficientData { sessions: usize },
    /// The page was written to this path.
    Written(PathBuf),
}

impl RunOutcome {
    /// Process exit status for this outcome.
    ///
    /// Insufficient data exits 0 like a successful run; callers that need to
    /// tell them apart must inspect the outcome itself.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunOutcome::Rejected { .. } => config::EXIT_REJECTED,
            RunOutcome::InsufficientData { .. } | RunOutcome::Written(_) => 0,
        }
    }
}

// ---------------------------------------------------------------------------
// ClosingSnapshot
// ---------------------------------------------------------------------------

/// One configured snapshot pipeline.
///
/// Created via [`ClosingSnapshot::builder()`].
pub struct ClosingSnapshot<P = SparkClient> {
    basket: Basket,
    output_dir: Option<PathBuf>,
    gate: TimeGate,
    skip_time_gate: bool,
    provider: P,
}

impl ClosingSnapshot<SparkClient> {
    /// Create a new builder for configuring a snapshot.
    pub fn builder() -> SnapshotBuilder {
        SnapshotBuilder::default()
    }
}

impl<P: PriceProvider> ClosingSnapshot<P> {
    /// The configured basket.
    pub fn basket(&self) -> &Basket {
        &self.basket
    }

    /// The price provider backing this snapshot.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Directory the page will be written to.
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(config::default_output_dir)
    }

    /// Run the pipeline against the current wall clock.
    pub fn run(&mut self) -> Result<RunOutcome> {
        self.run_at(&Utc::now())
    }

    /// Run the pipeline as if the current instant were `now`.
    pub fn run_at<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> Result<RunOutcome> {
        let decision = self.gate.check(now);
        if !decision.is_open() {
            if self.skip_time_gate {
                log::warn!(
                    "Time gate closed (converted {}), continuing because it is skipped",
                    decision.converted()
                );
            } else {
                log::info!("Time gate closed at converted time {}", decision.converted());
                println!(
                    "Please run the program between 00:00 and 07:00 Istanbul time to get the latest data."
                );
                return Ok(RunOutcome::Rejected {
                    converted: decision.converted(),
                });
            }
        }

        log::info!("Fetching closes for basket {}", self.basket);
        let table = self.provider.fetch_closes(&self.basket.symbols())?;

        println!("Raw Data Table:");
        println!("{}", table);

        let Some(html) = build_page(&self.basket, &table)? else {
            let sessions = change::available_sessions(&self.basket, &table);
            log::warn!(
                "An instrument has only {} close(s) in {} row(s); no page written",
                sessions,
                table.len()
            );
            println!("Insufficient data to calculate percent change.");
            return Ok(RunOutcome::InsufficientData { sessions });
        };

        let dir = self.output_dir();
        let path = page::write_page(&dir, &html)?;
        if self.output_dir.is_none() {
            println!(
                "HTML file '{}' generated successfully in the current directory.",
                config::OUTPUT_FILE_NAME
            );
        } else {
            println!(
                "HTML file '{}' generated successfully in {}.",
                config::OUTPUT_FILE_NAME,
                dir.display()
            );
        }
        Ok(RunOutcome::Written(path))
    }
}

/// Compute and render the full page for a fetched table.
///
/// Returns `Ok(None)` when any basket instrument has fewer than two closes. Pure: the
/// same inputs always give the same bytes.
pub fn build_page(basket: &Basket, table: &PriceTable) -> Result<Option<String>> {
    let Some(records) = change::compute_changes(basket, table)? else {
        return Ok(None);
    };
    let rows = render::render_rows(&records);
    let table_html = render::render_table(&rows, basket.layout);
    Ok(Some(page::render_page(&table_html, basket.layout)))
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl<P> fmt::Display for ClosingSnapshot<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ClosingSnapshot(basket={}, layout={:?}, output_dir={}, skip_time_gate={})",
            self.basket,
            self.basket.layout,
            self.output_dir
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| ".".to_string()),
            self.skip_time_gate
        )
    }
}
