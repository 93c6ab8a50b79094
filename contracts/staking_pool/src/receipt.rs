//! Receipt-token ledger rules: transfer lock and allowances.
//!
//! Receipts are 1:1 with staked principal. They move freely between
//! accounts, except that an account which staked or claimed recently cannot
//! send any for [`TRANSFER_LOCK_PERIOD`] seconds. This blocks parking a
//! position in an intermediary contract just long enough to harvest.

use soroban_sdk::{log, Address, Env};

use crate::storage::{self, AccountState, AllowanceValue};
use crate::PoolError;

/// Cooldown applied after every stake and every claim.
pub const TRANSFER_LOCK_PERIOD: u64 = 7 * 86_400;

pub fn unlock_time_from(now: u64) -> u64 {
    now.saturating_add(TRANSFER_LOCK_PERIOD)
}

/// Fails with `TransferLocked` while `state` is inside its cooldown.
pub fn require_unlocked(env: &Env, owner: &Address, state: &AccountState) -> Result<(), PoolError> {
    if env.ledger().timestamp() < state.transfer_unlock_time {
        log!(
            env,
            "receipt transfer locked",
            owner.clone(),
            state.transfer_unlock_time
        );
        return Err(PoolError::TransferLocked);
    }
    Ok(())
}

pub fn approve(
    env: &Env,
    from: &Address,
    spender: &Address,
    amount: i128,
    expiration_ledger: u32,
) -> Result<(), PoolError> {
    if amount < 0 {
        return Err(PoolError::InvalidAmount);
    }
    if amount > 0 && expiration_ledger < env.ledger().sequence() {
        return Err(PoolError::InvalidExpiration);
    }
    storage::set_allowance(
        env,
        from,
        spender,
        &AllowanceValue {
            amount,
            expiration_ledger,
        },
    );
    Ok(())
}

pub fn spend_allowance(
    env: &Env,
    from: &Address,
    spender: &Address,
    amount: i128,
) -> Result<(), PoolError> {
    let current = storage::allowance(env, from, spender);
    if current.amount < amount {
        return Err(PoolError::InsufficientAllowance);
    }
    if amount > 0 {
        storage::set_allowance(
            env,
            from,
            spender,
            &AllowanceValue {
                amount: current.amount - amount,
                expiration_ledger: current.expiration_ledger,
            },
        );
    }
    Ok(())
}
