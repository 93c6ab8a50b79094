use common::AccrualStrategy;
use soroban_sdk::{contracttype, symbol_short, Address, Env, String, Symbol};

use crate::PoolError;

// ── Storage key constants ────────────────────────────────────────────────────

const CONFIG: Symbol = symbol_short!("CONFIG");
const META: Symbol = symbol_short!("META");
const TOTAL_STAKED: Symbol = symbol_short!("TOT_STK");
const REWARD_PER_UNIT: Symbol = symbol_short!("RPU");
const TOTAL_ENTITLED: Symbol = symbol_short!("TOT_ENT");
const LAST_UPDATE: Symbol = symbol_short!("LAST_UPD");

// Per-account entries use tuple keys:  (prefix, address[, address])
const ACCOUNT: Symbol = symbol_short!("ACCT");
const ALLOWANCE: Symbol = symbol_short!("ALLOW");

// ── Types ────────────────────────────────────────────────────────────────────

/// Immutable wiring fixed at construction.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolConfig {
    pub registry: Address,
    pub staking_token: Address,
    pub reward_token: Address,
    pub accrual: AccrualStrategy,
}

/// Receipt-token metadata.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReceiptMeta {
    pub name: String,
    pub symbol: String,
    pub decimals: u32,
}

/// Everything the pool knows about one staker.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AccountState {
    /// Receipt balance, 1:1 with staked principal.
    pub balance: i128,
    /// Accumulator value at the account's last checkpoint.
    pub reward_per_unit_paid: i128,
    /// Accrued, not yet redeemed entitlement.
    pub entitlement: i128,
    /// Receipts cannot leave the account before this timestamp.
    pub transfer_unlock_time: u64,
}

/// Pool-wide reward accumulator.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Accumulator {
    pub reward_per_unit: i128,
    pub total_entitlement: i128,
    pub last_update: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AllowanceValue {
    pub amount: i128,
    pub expiration_ledger: u32,
}

// ── Instance storage ─────────────────────────────────────────────────────────

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(common::TTL_THRESHOLD, common::TTL_EXTEND_TO);
}

pub fn set_config(env: &Env, config: &PoolConfig) {
    env.storage().instance().set(&CONFIG, config);
}

pub fn config(env: &Env) -> Result<PoolConfig, PoolError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(PoolError::NotInitialized)
}

pub fn set_meta(env: &Env, meta: &ReceiptMeta) {
    env.storage().instance().set(&META, meta);
}

pub fn meta(env: &Env) -> Result<ReceiptMeta, PoolError> {
    env.storage()
        .instance()
        .get(&META)
        .ok_or(PoolError::NotInitialized)
}

pub fn total_staked(env: &Env) -> i128 {
    env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0)
}

pub fn set_total_staked(env: &Env, total: i128) {
    env.storage().instance().set(&TOTAL_STAKED, &total);
}

pub fn accumulator(env: &Env) -> Accumulator {
    let store = env.storage().instance();
    Accumulator {
        reward_per_unit: store.get(&REWARD_PER_UNIT).unwrap_or(0),
        total_entitlement: store.get(&TOTAL_ENTITLED).unwrap_or(0),
        last_update: store.get(&LAST_UPDATE).unwrap_or(0),
    }
}

pub fn set_accumulator(env: &Env, acc: &Accumulator) {
    let store = env.storage().instance();
    store.set(&REWARD_PER_UNIT, &acc.reward_per_unit);
    store.set(&TOTAL_ENTITLED, &acc.total_entitlement);
    store.set(&LAST_UPDATE, &acc.last_update);
}

// ── Accounts ─────────────────────────────────────────────────────────────────

fn account_key(account: &Address) -> (Symbol, Address) {
    (ACCOUNT, account.clone())
}

pub fn account(env: &Env, account: &Address) -> AccountState {
    let key = account_key(account);
    let state: Option<AccountState> = env.storage().persistent().get(&key);
    match state {
        Some(state) => {
            env.storage()
                .persistent()
                .extend_ttl(&key, common::TTL_THRESHOLD, common::TTL_EXTEND_TO);
            state
        }
        None => AccountState::default(),
    }
}

pub fn set_account(env: &Env, account: &Address, state: &AccountState) {
    let key = account_key(account);
    env.storage().persistent().set(&key, state);
    env.storage()
        .persistent()
        .extend_ttl(&key, common::TTL_THRESHOLD, common::TTL_EXTEND_TO);
}

// ── Allowances (temporary storage, expire with the approval) ────────────────

fn allowance_key(from: &Address, spender: &Address) -> (Symbol, Address, Address) {
    (ALLOWANCE, from.clone(), spender.clone())
}

pub fn allowance(env: &Env, from: &Address, spender: &Address) -> AllowanceValue {
    let stored: Option<AllowanceValue> = env
        .storage()
        .temporary()
        .get(&allowance_key(from, spender));
    match stored {
        Some(value) if value.expiration_ledger >= env.ledger().sequence() => value,
        _ => AllowanceValue {
            amount: 0,
            expiration_ledger: 0,
        },
    }
}

pub fn set_allowance(env: &Env, from: &Address, spender: &Address, value: &AllowanceValue) {
    let key = allowance_key(from, spender);
    env.storage().temporary().set(&key, value);
    if value.amount > 0 {
        let live_for = value
            .expiration_ledger
            .saturating_sub(env.ledger().sequence());
        env.storage().temporary().extend_ttl(&key, live_for, live_for);
    }
}
