//! Sequential execution of dependent monetary operations with observable
//! progress and deterministic partial-failure semantics.

use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use crate::queue::step::{StepError, TransactionStep};

/// Where a queue run currently stands. `Succeeded` and `Failed` are terminal
/// for one run; a new `execute` call re-enters `Running`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QueuePhase {
    #[default]
    Idle,
    Running,
    Succeeded,
    Failed,
}

/// Transient progress of one `execute` call, observable for display
/// ("step 2 of 4"). Not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueProgress {
    pub phase: QueuePhase,
    pub total: usize,
    pub completed: usize,
    pub last_error: Option<StepError>,
}

impl QueueProgress {
    pub fn running(&self) -> bool {
        self.phase == QueuePhase::Running
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("transaction queue is empty")]
    EmptyQueue,
    #[error("transaction queue is already running")]
    AlreadyRunning,
    /// A step failed after `completed` of `total` steps had resolved; the
    /// remaining steps were never started and nothing is rolled back.
    #[error("transaction queue aborted after {completed} of {total} steps: {kind}")]
    Step {
        kind: StepError,
        completed: usize,
        total: usize,
    },
}

/// Executes an ordered list of transaction steps strictly sequentially.
///
/// At most one step is in flight at any time, enforced by the sequencer's
/// own state, and list order is never changed: later steps in the real
/// workflow depend on earlier ones (e.g. permissions before flow creation)
/// and the caller encodes that dependency via ordering.
///
/// The first failing step aborts the remainder. Steps that already succeeded
/// are not rolled back: on-chain operations already submitted cannot be
/// undone here. After a fully successful run the counters reset to zero, so
/// one sequencer instance can be reused for unrelated queues.
#[derive(Debug, Default)]
pub struct TransactionSequencer {
    state: Mutex<QueueProgress>,
}

impl TransactionSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current progress.
    pub fn progress(&self) -> QueueProgress {
        self.state().clone()
    }

    /// Run every step in order, each fully awaited before the next starts.
    ///
    /// Rejects immediately with `AlreadyRunning` while a run is in flight
    /// (concurrent invocation is a programming error; calls are not queued)
    /// and with `EmptyQueue` for an empty step list.
    pub async fn execute(&self, steps: &[Box<dyn TransactionStep>]) -> Result<(), QueueError> {
        {
            let mut state = self.state();
            if state.running() {
                return Err(QueueError::AlreadyRunning);
            }
            if steps.is_empty() {
                return Err(QueueError::EmptyQueue);
            }
            *state = QueueProgress {
                phase: QueuePhase::Running,
                total: steps.len(),
                completed: 0,
                last_error: None,
            };
        }

        let total = steps.len();
        for (index, step) in steps.iter().enumerate() {
            tracing::debug!(
                step = step.label(),
                position = index + 1,
                total,
                "executing transaction step"
            );

            match step.run().await {
                Ok(()) => {
                    // The counter advances only after the step fully
                    // resolved, never speculatively.
                    self.state().completed += 1;
                }
                Err(kind) => {
                    let completed = {
                        let mut state = self.state();
                        state.phase = QueuePhase::Failed;
                        state.last_error = Some(kind.clone());
                        state.completed
                    };
                    tracing::warn!(
                        step = step.label(),
                        completed,
                        total,
                        error = %kind,
                        "transaction queue aborted"
                    );
                    return Err(QueueError::Step {
                        kind,
                        completed,
                        total,
                    });
                }
            }
        }

        {
            let mut state = self.state();
            state.phase = QueuePhase::Succeeded;
            state.completed = 0;
            state.total = 0;
        }
        tracing::debug!(total, "transaction queue completed");
        Ok(())
    }

    fn state(&self) -> MutexGuard<'_, QueueProgress> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
