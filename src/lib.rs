//! Stake-weighted voting power and block award distribution.
//!
//! Per block, the chain mints an inflation award and splits it across the
//! validator and backup-validator tiers, then across each validator's
//! delegators after taking the validator's commission. This crate contains
//! that allocation logic as pure, deterministic functions over explicit
//! parameter structs: the same inputs produce bit-identical outputs on
//! every node.

pub mod coins;
mod error;
pub mod staking;

pub use error::*;
