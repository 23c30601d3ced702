//! Transaction step abstraction: one monetary operation executed by the
//! ledger collaborator (wallet signing, chain submission, confirmation wait).

use async_trait::async_trait;
use futures::future::BoxFuture;
use thiserror::Error;

/// Failure of a single transaction step, classified so a UI can treat an
/// explicit human refusal differently from a hard failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    /// The underlying signer reports the human explicitly declined.
    #[error("transaction rejected by user")]
    UserRejected,
    /// Any other step failure: network, contract revert, validation.
    #[error("transaction failed: {0}")]
    OperationFailed(String),
}

/// An opaque, idempotent-at-the-call-site monetary operation.
///
/// Steps are created and owned by the caller; the sequencer only borrows them
/// for the duration of one run. A step that should be abandonable must carry
/// its own cancellation contract, e.g. a token passed at construction time;
/// the sequencer imposes none.
#[async_trait]
pub trait TransactionStep: Send + Sync {
    /// Short human-readable name for logging and progress display.
    fn label(&self) -> &str;

    /// Execute the step's real effect, resolving only once it is confirmed.
    async fn run(&self) -> Result<(), StepError>;
}

type StepFn = Box<dyn Fn() -> BoxFuture<'static, Result<(), StepError>> + Send + Sync>;

/// A [`TransactionStep`] built from an async closure, for callers that queue
/// plain async functions.
pub struct FnStep {
    label: String,
    run: StepFn,
}

impl FnStep {
    pub fn new<F, Fut>(label: impl Into<String>, f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<(), StepError>> + Send + 'static,
    {
        Self {
            label: label.into(),
            run: Box::new(move || -> BoxFuture<'static, Result<(), StepError>> { Box::pin(f()) }),
        }
    }
}

impl std::fmt::Debug for FnStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnStep").field("label", &self.label).finish()
    }
}

#[async_trait]
impl TransactionStep for FnStep {
    fn label(&self) -> &str {
        &self.label
    }

    async fn run(&self) -> Result<(), StepError> {
        (self.run)().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_fn_step_runs_closure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_in_step = calls.clone();
        let step = FnStep::new("wrap", move || {
            let calls = calls_in_step.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        });

        assert_eq!(step.label(), "wrap");
        step.run().await.unwrap();
        step.run().await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_step_error_display() {
        assert_eq!(
            StepError::UserRejected.to_string(),
            "transaction rejected by user"
        );
        assert_eq!(
            StepError::OperationFailed("revert".to_string()).to_string(),
            "transaction failed: revert"
        );
    }
}
