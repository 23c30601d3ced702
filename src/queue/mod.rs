//! Transaction queue: edit planning and sequential step execution.

pub mod plan;
pub mod sequencer;
pub mod step;

pub use plan::{plan_stream_edit, suggested_wrap_amount, StepKind, StreamEditRequest};
pub use sequencer::{QueueError, QueuePhase, QueueProgress, TransactionSequencer};
pub use step::{FnStep, StepError, TransactionStep};
