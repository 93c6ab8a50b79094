#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env, String};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the registry is constructed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegistryCreatedEvent {
    pub governor: Address,
    pub transfer_delay: u64,
    pub timestamp: u64,
}

/// Fired when a pool is deployed for a staking token.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolDeployedEvent {
    pub pool: Address,
    pub staking_token: Address,
    pub reward_token: Address,
    pub pair_label: String,
    pub timestamp: u64,
}

/// Fired when the governor proposes a successor.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GovernorProposedEvent {
    pub governor: Address,
    pub candidate: Address,
    pub unlocks_at: u64,
    pub timestamp: u64,
}

/// Fired when a pending governance transfer is finalized.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GovernorTransferredEvent {
    pub old_governor: Address,
    pub new_governor: Address,
    pub timestamp: u64,
}

/// Fired when an address's flash-loan fee exemption changes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FreeFlashLoanSetEvent {
    pub account: Address,
    pub exempt: bool,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_registry_created(env: &Env, governor: Address, transfer_delay: u64) {
    env.events().publish(
        (symbol_short!("INIT"),),
        RegistryCreatedEvent {
            governor,
            transfer_delay,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pool_deployed(
    env: &Env,
    pool: Address,
    staking_token: Address,
    reward_token: Address,
    pair_label: String,
) {
    env.events().publish(
        (symbol_short!("DEPLOYED"), staking_token.clone()),
        PoolDeployedEvent {
            pool,
            staking_token,
            reward_token,
            pair_label,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_governor_proposed(
    env: &Env,
    governor: Address,
    candidate: Address,
    unlocks_at: u64,
) {
    env.events().publish(
        (symbol_short!("GOV_PROP"), governor.clone()),
        GovernorProposedEvent {
            governor,
            candidate,
            unlocks_at,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_governor_transferred(env: &Env, old_governor: Address, new_governor: Address) {
    env.events().publish(
        (symbol_short!("GOV_XFER"), new_governor.clone()),
        GovernorTransferredEvent {
            old_governor,
            new_governor,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_free_flash_loan_set(env: &Env, account: Address, exempt: bool) {
    env.events().publish(
        (symbol_short!("FREE_FL"), account.clone()),
        FreeFlashLoanSetEvent {
            account,
            exempt,
            timestamp: env.ledger().timestamp(),
        },
    );
}
