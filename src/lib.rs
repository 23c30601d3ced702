//! Continuous funding accounting and quadratic matching engine.
//!
//! The engine is the pure core of a streaming-donation application: it
//! extrapolates continuously-changing balances from ledger snapshots,
//! converts contribution flow-rate edits into quadratic-funding unit deltas
//! and matching payout rates, computes pool distribution shares, and
//! sequences dependent monetary operations with deterministic
//! partial-failure reporting.
//!
//! It has no network, file, or CLI surface. A ledger collaborator supplies
//! snapshots and executes transaction steps; a display collaborator polls
//! projections at whatever cadence it needs. All monetary arithmetic is
//! 256-bit integer, wei scale, with overflow surfaced as an error.

pub mod domain;
pub mod engine;
pub mod error;
pub mod queue;

pub use domain::{
    amount_for_interval, rate_from_amount, Address, BalanceSnapshot, Flow, FlowRate,
    FlowTransition, Pool, PoolMember, TimeInterval, Timestamp, Wei,
};
pub use engine::{
    distribute, effective_flow_rate, matching_impact, member_flow_rate, project, MatchingImpact,
    UNIT_SCALE_FACTOR,
};
pub use error::EngineError;
pub use queue::{
    plan_stream_edit, suggested_wrap_amount, FnStep, QueueError, QueuePhase, QueueProgress,
    StepError, StepKind, StreamEditRequest, TransactionSequencer, TransactionStep,
};
