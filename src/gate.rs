//! Wall-clock gate restricting when a snapshot may be taken.
//!
//! The current instant is read as Istanbul wall-clock time (fixed UTC+03:00)
//! and shifted back a static 7 hours to approximate US Eastern time. No
//! DST-aware conversion is done. The run is allowed only when the shifted
//! time-of-day falls inside the inclusive 17:00:00–23:59:59 window, i.e.
//! after the New York close.

use chrono::{DateTime, Duration, NaiveTime, TimeZone, Timelike, Utc};

use crate::config;

/// Outcome of checking the gate at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Open { converted: NaiveTime },
    Closed { converted: NaiveTime },
}

impl GateDecision {
    pub fn is_open(&self) -> bool {
        matches!(self, GateDecision::Open { .. })
    }

    pub fn converted(&self) -> NaiveTime {
        match self {
            GateDecision::Open { converted } | GateDecision::Closed { converted } => *converted,
        }
    }
}

/// Time-of-day gate over a shifted wall clock.
///
/// Every field is plain arithmetic, so building one cannot fail.
#[derive(Debug, Clone, Copy)]
pub struct TimeGate {
    /// Source zone's offset east of UTC.
    offset: Duration,
    shift: Duration,
    open_secs: u32,
    close_secs: u32,
}

impl Default for TimeGate {
    fn default() -> Self {
        Self {
            offset: Duration::seconds(config::SOURCE_UTC_OFFSET_SECS),
            shift: Duration::hours(config::CONVERSION_SHIFT_HOURS),
            open_secs: config::WINDOW_OPEN_SECS,
            close_secs: config::WINDOW_CLOSE_SECS,
        }
    }
}

impl TimeGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shifted time-of-day for an instant. Wraps around midnight.
    pub fn convert<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> NaiveTime {
        let utc = now.with_timezone(&Utc).time();
        // NaiveTime arithmetic wraps; the day overflow is discarded.
        let (local, _) = utc.overflowing_add_signed(self.offset);
        let (shifted, _) = local.overflowing_sub_signed(self.shift);
        shifted
    }

    /// Inclusive on both ends; the window never wraps midnight.
    pub fn contains(&self, t: NaiveTime) -> bool {
        let secs = t.num_seconds_from_midnight();
        self.open_secs <= secs && secs <= self.close_secs
    }

    pub fn check<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> GateDecision {
        let converted = self.convert(now);
        if self.contains(converted) {
            GateDecision::Open { converted }
        } else {
            GateDecision::Closed { converted }
        }
    }
}
