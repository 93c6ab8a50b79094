#![allow(deprecated)] // events().publish migration tracked separately

use common::AccrualStrategy;
use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the pool is constructed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolCreatedEvent {
    pub registry: Address,
    pub staking_token: Address,
    pub reward_token: Address,
    pub accrual: AccrualStrategy,
    pub timestamp: u64,
}

/// Fired when a user deposits stake.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub staker: Address,
    pub amount: i128,
    pub new_total_staked: i128,
    pub transfer_unlock_time: u64,
    pub timestamp: u64,
}

/// Fired when a user takes principal back out.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnEvent {
    pub staker: Address,
    pub amount: i128,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

/// Fired on every claim, including ones that pay nothing.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardPaidEvent {
    pub staker: Address,
    pub amount: i128,
    pub entitlement_consumed: i128,
    pub entitlement_left: i128,
    pub timestamp: u64,
}

/// Fired after a flash loan has been repaid.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FlashLoanEvent {
    pub initiator: Address,
    pub receiver: Address,
    pub amount: i128,
    pub fee: i128,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_pool_created(
    env: &Env,
    registry: Address,
    staking_token: Address,
    reward_token: Address,
    accrual: AccrualStrategy,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        PoolCreatedEvent {
            registry,
            staking_token,
            reward_token,
            accrual,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staked(
    env: &Env,
    staker: Address,
    amount: i128,
    new_total_staked: i128,
    transfer_unlock_time: u64,
) {
    env.events().publish(
        (symbol_short!("STAKED"), staker.clone()),
        StakedEvent {
            staker,
            amount,
            new_total_staked,
            transfer_unlock_time,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdrawn(env: &Env, staker: Address, amount: i128, new_total_staked: i128) {
    env.events().publish(
        (symbol_short!("WITHDRAWN"), staker.clone()),
        WithdrawnEvent {
            staker,
            amount,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_paid(
    env: &Env,
    staker: Address,
    amount: i128,
    entitlement_consumed: i128,
    entitlement_left: i128,
) {
    env.events().publish(
        (symbol_short!("CLMD"), staker.clone()),
        RewardPaidEvent {
            staker,
            amount,
            entitlement_consumed,
            entitlement_left,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_flash_loan(env: &Env, initiator: Address, receiver: Address, amount: i128, fee: i128) {
    env.events().publish(
        (symbol_short!("FLASH"), initiator.clone()),
        FlashLoanEvent {
            initiator,
            receiver,
            amount,
            fee,
            timestamp: env.ledger().timestamp(),
        },
    );
}

// Receipt movements follow the token-interface event shape so wallets and
// indexers treat the receipt like any other token.

pub fn publish_transfer(env: &Env, from: Address, to: Address, amount: i128) {
    env.events()
        .publish((symbol_short!("transfer"), from, to), amount);
}

pub fn publish_approve(
    env: &Env,
    from: Address,
    spender: Address,
    amount: i128,
    expiration_ledger: u32,
) {
    env.events().publish(
        (symbol_short!("approve"), from, spender),
        (amount, expiration_ledger),
    );
}
