//! Day-over-day change calculation over each instrument's last two closes.

use crate::error::{Result, SnapshotError};
use crate::models::{Basket, ChangeRecord, Direction, PriceTable};

/// Minimum number of sessions needed to compute a change.
pub const MIN_SESSIONS: usize = 2;

/// `(latest - previous) / previous * 100`.
pub fn percent_change(previous: f64, latest: f64) -> f64 {
    (latest - previous) / previous * 100.0
}

/// Fewest closes any basket instrument has in `table`.
///
/// An instrument with no column counts as zero.
pub fn available_sessions(basket: &Basket, table: &PriceTable) -> usize {
    basket
        .instruments
        .iter()
        .map(|inst| table.closes_for(&inst.symbol).len())
        .min()
        .unwrap_or(0)
}

/// Compute one [`ChangeRecord`] per basket instrument, in basket order.
///
/// Each instrument is measured between its own two most recent closes, so
/// markets on different calendars (or bars stamped on different local days)
/// never pair a close with a gap. Returns `Ok(None)` when any instrument has
/// fewer than two closes. A previous close of zero is an error rather than
/// an undefined percentage.
pub fn compute_changes(basket: &Basket, table: &PriceTable) -> Result<Option<Vec<ChangeRecord>>> {
    let mut records = Vec::with_capacity(basket.instruments.len());
    for inst in &basket.instruments {
        let series = table.closes_for(&inst.symbol);
        let [.., (prev_date, prev_close), (_, last_close)] = series[..] else {
            log::debug!(
                "{} has {} close(s), need {}",
                inst.symbol,
                series.len(),
                MIN_SESSIONS
            );
            return Ok(None);
        };

        if prev_close == 0.0 {
            return Err(SnapshotError::ZeroPreviousClose {
                symbol: inst.symbol.clone(),
                date: prev_date.to_string(),
            });
        }

        let change = percent_change(prev_close, last_close);
        records.push(ChangeRecord {
            symbol: inst.symbol.clone(),
            name: inst.name.clone(),
            previous_close: prev_close,
            latest_close: last_close,
            percent_change: change,
            direction: Direction::from_change(change),
        });
    }

    Ok(Some(records))
}
