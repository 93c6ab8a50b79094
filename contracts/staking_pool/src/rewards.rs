//! Reward-per-unit-stake accounting.
//!
//! The pool keeps one global accumulator, `reward_per_unit`, equal to the
//! entitlement a single unit of stake has earned since the pool opened,
//! scaled by [`PRECISION`]. An account's entitlement grows by
//! `balance * (reward_per_unit - reward_per_unit_paid)` between two of its
//! own checkpoints, so no call ever iterates over stakers.

use common::math::{mul_div_floor, PRECISION};

use crate::storage::Accumulator;

/// Accumulator after `elapsed` seconds of emitting `rate` per second to
/// `total_staked` units. Nothing accrues while the pool is empty.
pub fn compute_reward_per_unit(stored: i128, rate: i128, elapsed: u64, total_staked: i128) -> i128 {
    if total_staked <= 0 || elapsed == 0 || rate <= 0 {
        return stored;
    }
    let emitted = emission(rate, elapsed);
    stored.saturating_add(mul_div_floor(emitted, PRECISION, total_staked))
}

/// Entitlement emitted across all stakers over `elapsed` seconds.
pub fn emission(rate: i128, elapsed: u64) -> i128 {
    if rate <= 0 {
        return 0;
    }
    rate.saturating_mul(i128::from(elapsed))
}

/// Account entitlement after settling against `current` accumulator value.
pub fn earned(balance: i128, current: i128, paid: i128, prior: i128) -> i128 {
    let delta = current.saturating_sub(paid);
    prior.saturating_add(mul_div_floor(balance, delta, PRECISION))
}

/// Advance `acc` to `now`.
pub fn advance(acc: &Accumulator, rate: i128, total_staked: i128, now: u64) -> Accumulator {
    let elapsed = now.saturating_sub(acc.last_update);
    let emitted = if total_staked > 0 { emission(rate, elapsed) } else { 0 };
    Accumulator {
        reward_per_unit: compute_reward_per_unit(acc.reward_per_unit, rate, elapsed, total_staked),
        total_entitlement: acc.total_entitlement.saturating_add(emitted),
        last_update: now.max(acc.last_update),
    }
}
