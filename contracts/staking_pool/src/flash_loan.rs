//! Same-invocation loans of the pool's reward-token reserve.
//!
//! The reserve leaves the pool, the borrower's `exec_op` runs, and the
//! reserve is measured again. Anything short of principal plus fee fails the
//! invocation and the host discards every write made during it, including
//! the outbound transfer.

use common::{math::bps_of, FlashLoanReceiverClient, RegistryClient};
use soroban_sdk::{token, Address, Bytes, Env};

use crate::storage::PoolConfig;
use crate::PoolError;

/// Fee charged to non-exempt initiators, in basis points of the principal.
pub const FLASH_LOAN_FEE_BPS: i128 = 4;

/// Fee `initiator` owes on `amount`; zero when the registry exempts it.
pub fn fee_for(env: &Env, config: &PoolConfig, initiator: &Address, amount: i128) -> i128 {
    if RegistryClient::new(env, &config.registry).is_free_flash_loan(initiator) {
        0
    } else {
        bps_of(amount, FLASH_LOAN_FEE_BPS)
    }
}

/// Runs the loan and returns the fee collected.
pub fn execute(
    env: &Env,
    config: &PoolConfig,
    initiator: &Address,
    receiver: &Address,
    target: &Address,
    amount: i128,
    data: &Bytes,
) -> Result<i128, PoolError> {
    if amount <= 0 {
        return Err(PoolError::InvalidAmount);
    }

    let pool = env.current_contract_address();
    let reward = token::Client::new(env, &config.reward_token);

    let reserve_before = reward.balance(&pool);
    if amount > reserve_before {
        return Err(PoolError::InsufficientReserve);
    }
    let fee = fee_for(env, config, initiator, amount);

    reward.transfer(&pool, target, &amount);
    FlashLoanReceiverClient::new(env, receiver).exec_op(
        initiator,
        &config.reward_token,
        &amount,
        &fee,
        data,
    );

    let reserve_after = reward.balance(&pool);
    if reserve_after < reserve_before.saturating_add(fee) {
        return Err(PoolError::FlashLoanNotRepaid);
    }
    Ok(fee)
}
