//! Continuous payment flows between two accounts.

use serde::{Deserialize, Serialize};

use crate::domain::{Address, FlowRate, Timestamp};

/// One direction of a continuous payment between two accounts.
///
/// A flow exists while its rate is non-zero. Rate changes produce a new
/// value with a new timestamp; dropping the rate back to zero deletes the
/// flow conceptually, which [`Flow::with_rate`] makes explicit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flow {
    pub sender: Address,
    pub receiver: Address,
    pub flow_rate: FlowRate,
    pub last_updated_at: Timestamp,
}

/// Outcome of applying a new rate to a flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowTransition {
    /// A zero-rate stream transitioned to non-zero.
    Created(Flow),
    /// An existing stream changed to a different non-zero rate.
    Updated(Flow),
    /// The rate returned to zero; the flow no longer exists.
    Deleted,
    /// The rate did not change.
    Unchanged,
}

impl Flow {
    pub fn new(
        sender: Address,
        receiver: Address,
        flow_rate: FlowRate,
        last_updated_at: Timestamp,
    ) -> Self {
        Self {
            sender,
            receiver,
            flow_rate,
            last_updated_at,
        }
    }

    /// Apply a rate change observed at `at`, classifying the transition.
    pub fn with_rate(&self, flow_rate: FlowRate, at: Timestamp) -> FlowTransition {
        if flow_rate == self.flow_rate {
            return FlowTransition::Unchanged;
        }
        if flow_rate.is_zero() {
            return FlowTransition::Deleted;
        }

        let updated = Flow::new(self.sender, self.receiver, flow_rate, at);
        if self.flow_rate.is_zero() {
            FlowTransition::Created(updated)
        } else {
            FlowTransition::Updated(updated)
        }
    }
}
