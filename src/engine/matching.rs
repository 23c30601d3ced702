//! Quadratic funding matching: contribution flow-rate changes to unit deltas
//! and the resulting matching-pool payout rate.
//!
//! Funding weight in quadratic funding is proportional to the square root of
//! the contribution. A member's accumulated units encode the square of the
//! running sum of contributor square roots, which lets one contributor's edit
//! be applied incrementally (subtract their old root, add their new one)
//! without revisiting every other contributor.

use alloy_primitives::{I256, U256};

use crate::domain::wei::signed_from_unsigned;
use crate::domain::{FlowRate, Pool, PoolMember, Wei};
use crate::engine::distribution::effective_flow_rate;
use crate::error::EngineError;

/// Units are scaled up by this factor before the integer square root and
/// scaled back down after squaring, retaining resolution that truncation
/// would otherwise discard. Scale-up and scale-down must use the same factor
/// or units drift across repeated edits.
pub const UNIT_SCALE_FACTOR: u64 = 1000;

/// Preview of one contributor's flow-rate edit on the matching pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchingImpact {
    /// The member's units after the edit.
    pub new_member_units: U256,
    /// Pool total units after applying the unit delta.
    pub new_pool_total_units: U256,
    /// The member's matching payout rate after the edit.
    pub new_member_flow_rate: FlowRate,
    /// Change versus the member's current payout rate.
    pub net_impact: FlowRate,
}

/// Compute the matching impact of changing a contribution stream from
/// `old_flow_rate` to `new_flow_rate`.
///
/// # Errors
/// Returns `InvalidArgument` for negative flow rates (contribution rates are
/// non-negative by construction of the caller) and `Overflow` when a step
/// exceeds the 256-bit range.
pub fn matching_impact(
    old_flow_rate: FlowRate,
    new_flow_rate: FlowRate,
    member: &PoolMember,
    pool: &Pool,
) -> Result<MatchingImpact, EngineError> {
    let old_root = contribution_root(old_flow_rate)?;
    let new_root = contribution_root(new_flow_rate)?;

    let scale = U256::from(UNIT_SCALE_FACTOR);
    let scaled_units = member
        .units
        .checked_mul(scale)
        .ok_or(EngineError::Overflow)?;
    let scaled_root = signed_from_unsigned(scaled_units.root(2))?;

    // Square roots are at most 2^128, so the signed sums below cannot
    // overflow, but every step stays checked.
    let root_without_old = scaled_root
        .checked_sub(old_root)
        .ok_or(EngineError::Overflow)?;
    let root_with_new = root_without_old
        .checked_add(new_root)
        .ok_or(EngineError::Overflow)?;

    let squared = root_with_new
        .checked_mul(root_with_new)
        .ok_or(EngineError::Overflow)?;
    let new_member_units = squared
        .checked_div(signed_from_unsigned(scale)?)
        .ok_or(EngineError::Overflow)?;

    let units_delta = new_member_units
        .checked_sub(signed_from_unsigned(member.units)?)
        .ok_or(EngineError::Overflow)?;
    let new_pool_total_units = signed_from_unsigned(pool.total_units)?
        .checked_add(units_delta)
        .ok_or(EngineError::Overflow)?;

    let new_member_flow_rate = if new_pool_total_units.is_zero() {
        tracing::debug!(
            account = %member.account,
            "degenerate division: edit empties the pool, member rate is zero"
        );
        Wei::ZERO
    } else {
        let effective = effective_flow_rate(pool)?;
        let scaled_rate = new_member_units
            .checked_mul(effective.inner())
            .ok_or(EngineError::Overflow)?;
        let share = scaled_rate
            .checked_div(new_pool_total_units)
            .ok_or(EngineError::Overflow)?;
        Wei::new(share)
    };

    let net_impact = new_member_flow_rate
        .checked_sub(member.flow_rate)
        .ok_or(EngineError::Overflow)?;

    Ok(MatchingImpact {
        new_member_units: new_member_units.unsigned_abs(),
        new_pool_total_units: new_pool_total_units.unsigned_abs(),
        new_member_flow_rate,
        net_impact,
    })
}

/// Integer square root (floor) of a contribution flow rate.
fn contribution_root(flow_rate: FlowRate) -> Result<I256, EngineError> {
    if flow_rate.is_negative() {
        return Err(EngineError::InvalidArgument(format!(
            "contribution flow rate must be non-negative, got {}",
            flow_rate
        )));
    }
    signed_from_unsigned(flow_rate.inner().unsigned_abs().root(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Address, Timestamp};

    fn member(units: u64, flow_rate: i64) -> PoolMember {
        PoolMember::new(
            Address::repeat_byte(0xaa),
            U256::from(units),
            Wei::from(flow_rate),
            Wei::ZERO,
            Timestamp::new(1000),
        )
    }

    fn pool_with_totals(total_units: u64, raw: i64, member: &PoolMember) -> Pool {
        let member_units = u64::try_from(member.units).unwrap();
        let mut members = vec![member.clone()];
        if total_units > member_units {
            members.push(PoolMember::new(
                Address::repeat_byte(0xbb),
                U256::from(total_units - member_units),
                Wei::ZERO,
                Wei::ZERO,
                Timestamp::new(1000),
            ));
        }
        Pool::new(Wei::from(raw), Wei::ZERO, Timestamp::new(1000), members).unwrap()
    }

    #[test]
    fn test_noop_edit_has_zero_impact() {
        // units * 1000 is a perfect square (4_000_000 = 2000^2), so the
        // scale-up/scale-down symmetry is exact.
        let m = member(4000, 0);
        let p = pool_with_totals(10_000, 1_000_000, &m);
        let m = PoolMember {
            flow_rate: crate::engine::distribution::member_flow_rate(&p, &m).unwrap(),
            ..m
        };

        let impact = matching_impact(Wei::from(400), Wei::from(400), &m, &p).unwrap();
        assert_eq!(impact.new_member_units, m.units);
        assert_eq!(impact.new_pool_total_units, p.total_units);
        assert_eq!(impact.new_member_flow_rate, m.flow_rate);
        assert_eq!(impact.net_impact, Wei::ZERO);
    }

    #[test]
    fn test_first_contribution_from_zero() {
        let m = member(0, 0);
        let p = pool_with_totals(10_000, 1_000_000, &m);

        // isqrt(90000) = 300; units = 300^2 / 1000 = 90.
        let impact = matching_impact(Wei::ZERO, Wei::from(90_000), &m, &p).unwrap();
        assert_eq!(impact.new_member_units, U256::from(90u64));
        assert_eq!(impact.new_pool_total_units, U256::from(10_090u64));
        // 90 * 1_000_000 / 10_090 = 8919.
        assert_eq!(impact.new_member_flow_rate, Wei::from(8919));
        assert_eq!(impact.net_impact, Wei::from(8919));
    }

    #[test]
    fn test_removing_sole_contribution_empties_pool() {
        // units 1000: scaled = 1_000_000, isqrt = 1000 = isqrt(old rate).
        let m = member(1000, 500);
        let p = Pool::new(
            Wei::from(1_000_000),
            Wei::ZERO,
            Timestamp::new(1000),
            vec![m.clone()],
        )
        .unwrap();

        let impact = matching_impact(Wei::from(1_000_000), Wei::ZERO, &m, &p).unwrap();
        assert_eq!(impact.new_member_units, U256::ZERO);
        assert_eq!(impact.new_pool_total_units, U256::ZERO);
        assert_eq!(impact.new_member_flow_rate, Wei::ZERO);
        assert_eq!(impact.net_impact, Wei::from(-500));
    }

    #[test]
    fn test_negative_flow_rate_is_rejected() {
        let m = member(100, 0);
        let p = pool_with_totals(100, 1000, &m);

        let result = matching_impact(Wei::from(-1), Wei::from(10), &m, &p);
        assert!(matches!(result, Err(EngineError::InvalidArgument(_))));

        let result = matching_impact(Wei::from(10), Wei::from(-1), &m, &p);
        assert!(matches!(result, Err(EngineError::InvalidArgument(_))));
    }

    #[test]
    fn test_increasing_contribution_never_lowers_own_rate() {
        let m = member(4000, 0);
        let p = pool_with_totals(100_000, 1_000_000_000, &m);

        let mut last = Wei::ZERO;
        for rate in [100u64, 400, 2_500, 10_000, 1_000_000, 100_000_000] {
            let impact =
                matching_impact(Wei::from(400), Wei::from(rate as i64), &m, &p).unwrap();
            assert!(
                impact.new_member_flow_rate >= last,
                "rate {} produced {} < previous {}",
                rate,
                impact.new_member_flow_rate,
                last
            );
            last = impact.new_member_flow_rate;
        }
    }

    #[test]
    fn test_scaled_units_overflow_is_surfaced() {
        let m = PoolMember::new(
            Address::repeat_byte(0xaa),
            U256::MAX,
            Wei::ZERO,
            Wei::ZERO,
            Timestamp::new(1000),
        );
        let p = Pool::new(
            Wei::from(1000),
            Wei::ZERO,
            Timestamp::new(1000),
            vec![m.clone()],
        )
        .unwrap();

        let result = matching_impact(Wei::ZERO, Wei::from(100), &m, &p);
        assert_eq!(result, Err(EngineError::Overflow));
    }
}
