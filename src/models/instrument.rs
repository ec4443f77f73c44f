use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::config;
use crate::error::{Result, SnapshotError};

// ---------------------------------------------------------------------------
// Instrument — provider symbol plus display name
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instrument {
    pub symbol: String,
    pub name: String,
}

impl Instrument {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// PercentLayout — where the percent sign is rendered
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PercentLayout {
    /// The `%` sign gets its own styled cell ahead of the value.
    #[default]
    Separate,
    /// The `%` sign trails the value inside one cell.
    Inline,
}

// ---------------------------------------------------------------------------
// Basket — fixed, ordered instrument list for one run
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Basket {
    pub name: String,
    pub instruments: Vec<Instrument>,
    pub layout: PercentLayout,
}

impl Basket {
    /// Build a basket, rejecting empty lists and duplicate symbols.
    pub fn new(
        name: impl Into<String>,
        instruments: Vec<Instrument>,
        layout: PercentLayout,
    ) -> Result<Self> {
        let name = name.into();
        if instruments.is_empty() {
            return Err(SnapshotError::InvalidArgument(format!(
                "basket '{}' has no instruments",
                name
            )));
        }
        let mut seen = HashSet::new();
        for inst in &instruments {
            if !seen.insert(inst.symbol.as_str()) {
                return Err(SnapshotError::InvalidArgument(format!(
                    "basket '{}' lists symbol {} twice",
                    name, inst.symbol
                )));
            }
        }
        Ok(Self {
            name,
            instruments,
            layout,
        })
    }

    fn from_pairs(name: &str, pairs: Vec<(&str, &str)>, layout: PercentLayout) -> Self {
        Self {
            name: name.to_string(),
            instruments: pairs
                .into_iter()
                .map(|(symbol, display)| Instrument::new(symbol, display))
                .collect(),
            layout,
        }
    }

    /// Turkish-market basket with the percent sign in its own cell.
    pub fn markets() -> Self {
        Self::from_pairs(
            "markets",
            config::markets_instruments(),
            PercentLayout::Separate,
        )
    }

    /// Global indices and commodities with the percent sign inlined.
    pub fn global() -> Self {
        Self::from_pairs("global", config::global_instruments(), PercentLayout::Inline)
    }

    /// Provider symbols in configured order.
    pub fn symbols(&self) -> Vec<&str> {
        self.instruments.iter().map(|i| i.symbol.as_str()).collect()
    }
}

impl Default for Basket {
    fn default() -> Self {
        Self::markets()
    }
}

impl FromStr for Basket {
    type Err = SnapshotError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "markets" => Ok(Self::markets()),
            "global" => Ok(Self::global()),
            other => Err(SnapshotError::InvalidArgument(format!(
                "unknown basket '{}' (expected 'markets' or 'global')",
                other
            ))),
        }
    }
}

impl fmt::Display for Basket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.symbols().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_baskets_keep_configured_order() {
        let markets = Basket::markets();
        assert_eq!(markets.symbols()[0], "XU100.IS");
        assert_eq!(markets.symbols()[5], "GC=F");
        assert_eq!(markets.layout, PercentLayout::Separate);
        assert_eq!(Basket::global().layout, PercentLayout::Inline);
    }

    #[test]
    fn new_rejects_duplicates_and_empty() {
        let dup = vec![Instrument::new("A", "a"), Instrument::new("A", "b")];
        assert!(Basket::new("x", dup, PercentLayout::Inline).is_err());
        assert!(Basket::new("x", Vec::new(), PercentLayout::Inline).is_err());
    }

    #[test]
    fn from_str_is_case_insensitive() {
        assert_eq!("GLOBAL".parse::<Basket>().unwrap().name, "global");
        assert!("crypto".parse::<Basket>().is_err());
    }
}
