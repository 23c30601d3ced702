//! Point-in-time balance snapshots from the ledger collaborator.

use serde::{Deserialize, Serialize};

use crate::domain::{Timestamp, Wei};
use crate::error::EngineError;

/// An authoritative balance as last read from the ledger.
///
/// Immutable once created: a newer reading supersedes the snapshot via
/// [`BalanceSnapshot::superseding`], it is never mutated in place. Any
/// in-flight reader of the old snapshot stays valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    /// Balance in wei at the moment of observation.
    pub amount: Wei,
    /// When the ledger reported this balance, Unix seconds.
    pub observed_at: Timestamp,
}

impl BalanceSnapshot {
    pub fn new(amount: Wei, observed_at: Timestamp) -> Self {
        Self {
            amount,
            observed_at,
        }
    }

    /// Build the snapshot that replaces this one.
    ///
    /// Observation times are monotonically non-decreasing for a given
    /// account/token; a regression means the ledger collaborator handed us
    /// stale data and is rejected rather than silently accepted.
    pub fn superseding(
        &self,
        amount: Wei,
        observed_at: Timestamp,
    ) -> Result<BalanceSnapshot, EngineError> {
        if observed_at < self.observed_at {
            return Err(EngineError::InvalidArgument(format!(
                "snapshot observed_at regressed: {} < {}",
                observed_at, self.observed_at
            )));
        }
        Ok(BalanceSnapshot::new(amount, observed_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_superseding_accepts_equal_and_newer_timestamps() {
        let snapshot = BalanceSnapshot::new(Wei::from(100), Timestamp::new(1000));

        let same = snapshot
            .superseding(Wei::from(150), Timestamp::new(1000))
            .unwrap();
        assert_eq!(same.amount, Wei::from(150));

        let newer = snapshot
            .superseding(Wei::from(200), Timestamp::new(1060))
            .unwrap();
        assert_eq!(newer.observed_at, Timestamp::new(1060));
    }

    #[test]
    fn test_superseding_rejects_regression() {
        let snapshot = BalanceSnapshot::new(Wei::from(100), Timestamp::new(1000));
        let result = snapshot.superseding(Wei::from(100), Timestamp::new(999));
        assert!(matches!(result, Err(EngineError::InvalidArgument(_))));
    }

    #[test]
    fn test_snapshot_serde_roundtrip() {
        let snapshot = BalanceSnapshot::new(
            Wei::from_dec_str("1000000000000000000000").unwrap(),
            Timestamp::new(1000),
        );
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"1000000000000000000000\""));
        let back: BalanceSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
