//! Pure calculators: balance extrapolation, quadratic matching, pool
//! distribution.
//!
//! Every function here is synchronous, side-effect free, and operates on
//! immutable snapshots; the caller owns the current snapshot and decides when
//! to swap in a fresh one.

pub mod balance;
pub mod distribution;
pub mod matching;

pub use balance::project;
pub use distribution::{distribute, effective_flow_rate, member_flow_rate};
pub use matching::{matching_impact, MatchingImpact, UNIT_SCALE_FACTOR};
