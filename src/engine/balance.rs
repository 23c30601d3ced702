//! Balance extrapolation from a ledger snapshot and a flow rate.

use alloy_primitives::I256;

use crate::domain::{BalanceSnapshot, FlowRate, Timestamp, Wei};
use crate::error::EngineError;

/// Project a continuously-changing balance to an arbitrary point in time.
///
/// Computes `snapshot.amount + flow_rate * (at - snapshot.observed_at)`
/// entirely in 256-bit integer arithmetic. `at` earlier than the snapshot is
/// allowed and yields the mathematically consistent negative-delta result;
/// callers must not rely on clamping.
///
/// Pure and stateless; safe to call at any frequency, e.g. once per
/// animation tick. A zero flow rate returns `snapshot.amount` unconditionally,
/// which callers can use as a signal to stop polling.
///
/// # Errors
/// Returns `Overflow` when the projected balance exceeds the 256-bit range.
pub fn project(
    snapshot: &BalanceSnapshot,
    flow_rate: FlowRate,
    at: Timestamp,
) -> Result<Wei, EngineError> {
    if flow_rate.is_zero() {
        return Ok(snapshot.amount);
    }

    let elapsed = at
        .as_i64()
        .checked_sub(snapshot.observed_at.as_i64())
        .ok_or(EngineError::Overflow)?;
    let elapsed = I256::try_from(elapsed).map_err(|_| EngineError::Overflow)?;

    let streamed = flow_rate
        .inner()
        .checked_mul(elapsed)
        .ok_or(EngineError::Overflow)?;
    snapshot
        .amount
        .checked_add(Wei::new(streamed))
        .ok_or(EngineError::Overflow)
}
