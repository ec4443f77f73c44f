use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// PriceTable — closes indexed by session date, one column per symbol
// ---------------------------------------------------------------------------

/// Daily closing prices as returned by the provider.
///
/// Rows are kept in ascending date order. A cell is `None` when the provider
/// had no close for that symbol on that date (e.g. an exchange holiday).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceTable {
    symbols: Vec<String>,
    rows: BTreeMap<NaiveDate, Vec<Option<f64>>>,
}

/// A borrowed view of one row of a [`PriceTable`].
#[derive(Debug, Clone, Copy)]
pub struct Session<'a> {
    pub date: NaiveDate,
    symbols: &'a [String],
    closes: &'a [Option<f64>],
}

impl Session<'_> {
    /// Close for `symbol` in this session, if the provider reported one.
    pub fn close(&self, symbol: &str) -> Option<f64> {
        self.symbols
            .iter()
            .position(|s| s == symbol)
            .and_then(|i| self.closes.get(i).copied().flatten())
    }
}

impl PriceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty column for `symbol` if it is not present yet.
    ///
    /// Returns the column index.
    pub fn add_symbol(&mut self, symbol: &str) -> usize {
        match self.symbols.iter().position(|s| s == symbol) {
            Some(i) => i,
            None => {
                self.symbols.push(symbol.to_string());
                for row in self.rows.values_mut() {
                    row.push(None);
                }
                self.symbols.len() - 1
            }
        }
    }

    /// Record a close, adding the symbol column and date row as needed.
    ///
    /// A later `None` for the same cell never clears an earlier close.
    pub fn insert(&mut self, date: NaiveDate, symbol: &str, close: Option<f64>) {
        let col = self.add_symbol(symbol);
        let width = self.symbols.len();
        let row = self.rows.entry(date).or_insert_with(|| vec![None; width]);
        if close.is_some() {
            row[col] = close;
        }
    }

    /// Column symbols in the order they were first seen.
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn has_symbol(&self, symbol: &str) -> bool {
        self.symbols.iter().any(|s| s == symbol)
    }

    /// Number of session rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate rows in ascending date order.
    pub fn sessions(&self) -> impl DoubleEndedIterator<Item = Session<'_>> {
        self.rows.iter().map(move |(date, closes)| Session {
            date: *date,
            symbols: &self.symbols,
            closes,
        })
    }

    /// The last two rows as `(previous, latest)`, or `None` with fewer than two.
    pub fn last_two(&self) -> Option<(Session<'_>, Session<'_>)> {
        let mut rev = self.sessions().rev();
        let latest = rev.next()?;
        let previous = rev.next()?;
        Some((previous, latest))
    }

    /// A symbol's own series: reported, finite closes in ascending date order.
    ///
    /// Instruments trade on different calendars, so one symbol's latest
    /// session need not be a row where every other symbol has a close.
    pub fn closes_for(&self, symbol: &str) -> Vec<(NaiveDate, f64)> {
        let Some(col) = self.symbols.iter().position(|s| s == symbol) else {
            return Vec::new();
        };
        self.rows
            .iter()
            .filter_map(|(date, row)| match row[col] {
                Some(v) if v.is_finite() => Some((*date, v)),
                _ => None,
            })
            .collect()
    }
}

/// Full-precision grid, one row per date, for diagnostics.
impl fmt::Display for PriceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<Vec<String>> = self
            .rows
            .values()
            .map(|row| {
                row.iter()
                    .map(|c| c.map_or_else(|| "NaN".to_string(), |v| format!("{:?}", v)))
                    .collect()
            })
            .collect();

        let widths: Vec<usize> = self
            .symbols
            .iter()
            .enumerate()
            .map(|(i, sym)| {
                cells
                    .iter()
                    .map(|r| r[i].len())
                    .chain(std::iter::once(sym.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write!(f, "{:<10}", "Date")?;
        for (sym, w) in self.symbols.iter().zip(&widths) {
            write!(f, "  {:>w$}", sym, w = *w)?;
        }
        for (date, row) in self.rows.keys().zip(&cells) {
            write!(f, "\n{:<10}", date.to_string())?;
            for (cell, w) in row.iter().zip(&widths) {
                write!(f, "  {:>w$}", cell, w = *w)?;
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Direction — sign of the day-over-day move
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Zero counts as `Up`.
    pub fn from_change(percent_change: f64) -> Self {
        if percent_change >= 0.0 {
            Direction::Up
        } else {
            Direction::Down
        }
    }
}

// ---------------------------------------------------------------------------
// ChangeRecord — per-instrument day-over-day move
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ChangeRecord {
    pub symbol: String,
    pub name: String,
    pub previous_close: f64,
    pub latest_close: f64,
    pub percent_change: f64,
    pub direction: Direction,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn closes_for_skips_missing_cells() {
        let mut table = PriceTable::new();
        table.insert(day(6), "IDX", Some(10.0));
        table.insert(day(6), "FX", Some(1.0));
        table.insert(day(7), "IDX", Some(11.0));
        table.insert(day(7), "FX", Some(1.1));
        table.insert(day(8), "FX", Some(1.2));

        assert_eq!(table.len(), 3);
        assert_eq!(table.closes_for("IDX"), vec![(day(6), 10.0), (day(7), 11.0)]);
        assert_eq!(table.closes_for("FX").len(), 3);
        assert!(table.closes_for("NONE").is_empty());
    }

    #[test]
    fn raw_print_keeps_decimal_point() {
        let mut table = PriceTable::new();
        table.insert(day(6), "A", Some(100.0));
        table.insert(day(7), "A", None);
        let printed = table.to_string();
        assert!(printed.contains("100.0"));
        assert!(printed.contains("NaN"));
    }
}
