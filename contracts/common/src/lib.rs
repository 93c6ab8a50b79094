//! Shared types and helpers for the Liquid Farm contract suite.
//!
//! This crate provides:
//! - [`AccrualStrategy`]: the reward emission rule handed from the registry
//!   to every pool it deploys.
//! - [`math`]: overflow-safe fixed-point helpers used by reward accounting.
//! - [`FlashLoanReceiver`] and [`FeeExemptionRegistry`]: cross-contract
//!   interfaces with their generated clients.
//! - [`identity`]: the null-identity check used by governance handoffs.

#![no_std]

pub mod accrual;
pub mod identity;
pub mod interfaces;
pub mod math;

pub use accrual::*;
pub use identity::*;
pub use interfaces::*;

// ── Storage TTL ──────────────────────────────────────────────────────────────

/// Remaining-TTL threshold (in ledgers) below which an entry is bumped.
pub const TTL_THRESHOLD: u32 = 5_184_000;
/// TTL (in ledgers) an entry is extended to when bumped.
pub const TTL_EXTEND_TO: u32 = 10_368_000;
