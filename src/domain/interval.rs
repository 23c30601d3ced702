//! Stream value conversions between per-second flow rates and the
//! per-day/week/month/year amounts users actually type.

use serde::{Deserialize, Serialize};

use crate::domain::{FlowRate, Wei};
use crate::error::EngineError;

/// Time intervals a stream amount can be expressed over.
///
/// Month and year use the protocol's nominal second counts (a 1/12-year
/// month, a 365-day year), matching what the streaming ledger itself assumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeInterval {
    Day,
    Week,
    Month,
    Year,
}

impl TimeInterval {
    /// Number of seconds in this interval.
    pub fn seconds(&self) -> i64 {
        match self {
            TimeInterval::Day => 86_400,
            TimeInterval::Week => 604_800,
            TimeInterval::Month => 2_628_000,
            TimeInterval::Year => 31_536_000,
        }
    }
}

impl std::fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeInterval::Day => write!(f, "day"),
            TimeInterval::Week => write!(f, "week"),
            TimeInterval::Month => write!(f, "month"),
            TimeInterval::Year => write!(f, "year"),
        }
    }
}

/// Convert an amount streamed over an interval into a per-second flow rate,
/// truncating toward zero.
pub fn rate_from_amount(amount: Wei, interval: TimeInterval) -> FlowRate {
    // Interval second counts are non-zero constants, so the division cannot
    // fail.
    amount
        .checked_div(Wei::from(interval.seconds()))
        .unwrap_or(Wei::ZERO)
}

/// Convert a per-second flow rate into the amount streamed over an interval.
///
/// # Errors
/// Returns `Overflow` if the total exceeds the 256-bit range.
pub fn amount_for_interval(rate: FlowRate, interval: TimeInterval) -> Result<Wei, EngineError> {
    rate.checked_mul(Wei::from(interval.seconds()))
        .ok_or(EngineError::Overflow)
}
