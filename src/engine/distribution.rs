//! Pool distribution: adjusted pool flow rate and per-member pro-rata shares.

use crate::domain::wei::signed_from_unsigned;
use crate::domain::{FlowRate, Pool, PoolMember, Wei};
use crate::error::EngineError;

/// The rate the pool actually distributes.
///
/// `raw - adjustment`, except when the difference is exactly zero: a fully
/// adjusted pool reports the adjustment term itself as the nominal rate.
/// This replicates the on-chain dust-correction convention verbatim; do not
/// "fix" the branch without confirming against the ledger contract.
pub fn effective_flow_rate(pool: &Pool) -> Result<FlowRate, EngineError> {
    let diff = pool
        .raw_flow_rate
        .checked_sub(pool.adjustment_flow_rate)
        .ok_or(EngineError::Overflow)?;
    if diff.is_zero() {
        Ok(pool.adjustment_flow_rate)
    } else {
        Ok(diff)
    }
}

/// A member's pro-rata share of the pool's effective flow rate:
/// `floor(units * effective / total_units)`.
///
/// An empty pool (zero total units) yields a zero rate; that is an expected
/// steady state, observable through the emitted trace event rather than an
/// error.
pub fn member_flow_rate(pool: &Pool, member: &PoolMember) -> Result<FlowRate, EngineError> {
    if pool.total_units.is_zero() {
        tracing::debug!(
            account = %member.account,
            "degenerate division: pool has zero total units, member rate is zero"
        );
        return Ok(Wei::ZERO);
    }

    let units = signed_from_unsigned(member.units)?;
    let total_units = signed_from_unsigned(pool.total_units)?;
    let effective = effective_flow_rate(pool)?;

    let scaled = units
        .checked_mul(effective.inner())
        .ok_or(EngineError::Overflow)?;
    let share = scaled.checked_div(total_units).ok_or(EngineError::Overflow)?;
    Ok(Wei::new(share))
}

/// Recompute every member's derived flow rate against the pool's current
/// aggregates, producing a fresh pool snapshot. The input pool is untouched,
/// so in-flight readers of the previous snapshot stay valid.
pub fn distribute(pool: &Pool) -> Result<Pool, EngineError> {
    let mut refreshed = pool.clone();
    for member in &mut refreshed.members {
        member.flow_rate = member_flow_rate(pool, member)?;
    }
    Ok(refreshed)
}
