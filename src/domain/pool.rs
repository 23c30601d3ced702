//! Distribution pool aggregates and members.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::domain::wei::serde_u256_dec;
use crate::domain::{Address, FlowRate, Timestamp, Wei};
use crate::error::EngineError;

/// One recipient's share of a distribution pool.
///
/// `flow_rate` is derived from `units` and the pool's effective flow rate;
/// it is never authoritative on its own and is refreshed by the distribution
/// calculator on every pool recompute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolMember {
    pub account: Address,
    #[serde(with = "serde_u256_dec")]
    pub units: U256,
    pub flow_rate: FlowRate,
    pub total_claimed: Wei,
    pub updated_at: Timestamp,
}

impl PoolMember {
    pub fn new(
        account: Address,
        units: U256,
        flow_rate: FlowRate,
        total_claimed: Wei,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            account,
            units,
            flow_rate,
            total_claimed,
            updated_at,
        }
    }
}

/// Aggregate distribution state, refreshed wholesale from the ledger.
///
/// `total_units` always equals the sum of member units: [`Pool::new`]
/// computes it from the member list, and [`Pool::from_ledger`] rejects an
/// externally supplied total that disagrees with the members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    #[serde(with = "serde_u256_dec")]
    pub total_units: U256,
    pub raw_flow_rate: FlowRate,
    pub adjustment_flow_rate: FlowRate,
    pub updated_at: Timestamp,
    pub members: Vec<PoolMember>,
}

impl Pool {
    /// Build a pool whose `total_units` is computed from the members.
    pub fn new(
        raw_flow_rate: FlowRate,
        adjustment_flow_rate: FlowRate,
        updated_at: Timestamp,
        members: Vec<PoolMember>,
    ) -> Result<Self, EngineError> {
        let total_units = sum_units(&members)?;
        Ok(Self {
            total_units,
            raw_flow_rate,
            adjustment_flow_rate,
            updated_at,
            members,
        })
    }

    /// Build a pool from ledger-reported aggregates, validating that the
    /// reported total matches the member units.
    pub fn from_ledger(
        total_units: U256,
        raw_flow_rate: FlowRate,
        adjustment_flow_rate: FlowRate,
        updated_at: Timestamp,
        members: Vec<PoolMember>,
    ) -> Result<Self, EngineError> {
        let member_total = sum_units(&members)?;
        if member_total != total_units {
            return Err(EngineError::InvalidArgument(format!(
                "pool total_units {} does not match member unit sum {}",
                total_units, member_total
            )));
        }
        Ok(Self {
            total_units,
            raw_flow_rate,
            adjustment_flow_rate,
            updated_at,
            members,
        })
    }

    /// Look up a member by account.
    pub fn member(&self, account: &Address) -> Option<&PoolMember> {
        self.members.iter().find(|m| &m.account == account)
    }
}

fn sum_units(members: &[PoolMember]) -> Result<U256, EngineError> {
    members.iter().try_fold(U256::ZERO, |acc, member| {
        acc.checked_add(member.units).ok_or(EngineError::Overflow)
    })
}
