//! Domain types for the continuous funding engine.
//!
//! This module provides:
//! - Lossless wei-scale numeric handling via the Wei wrapper
//! - Domain primitives: Timestamp, Address
//! - Ledger snapshot types: BalanceSnapshot, Flow, Pool, PoolMember
//! - Stream value conversions between flow rates and per-interval amounts

pub mod flow;
pub mod interval;
pub mod pool;
pub mod primitives;
pub mod snapshot;
pub mod wei;

pub use flow::{Flow, FlowTransition};
pub use interval::{amount_for_interval, rate_from_amount, TimeInterval};
pub use pool::{Pool, PoolMember};
pub use primitives::{Address, Timestamp};
pub use snapshot::BalanceSnapshot;
pub use wei::{FlowRate, Wei};
