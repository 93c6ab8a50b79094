#![no_std]

pub mod events;
pub mod timelock;

use common::AccrualStrategy;
use soroban_sdk::{
    contract, contractimpl, panic_with_error, symbol_short, xdr::ToXdr, Address, BytesN, Env,
    String, Symbol,
};

use timelock::PendingTransfer;

// ── Storage key constants ────────────────────────────────────────────────────

const POOL_WASM: Symbol = symbol_short!("POOL_WASM");
const ACCRUAL: Symbol = symbol_short!("ACCRUAL");

// Persistent maps use tuple keys:  (prefix, address)
const POOL: Symbol = symbol_short!("POOL");
const FREE_FLASH: Symbol = symbol_short!("FREE_FL");

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum RegistryError {
    NotInitialized = 1,
    NotAuthorized = 2,
    ZeroAddress = 3,
    TooEarly = 4,
    NoPendingTransfer = 5,
    AlreadyDeployed = 6,
    TokensIdentical = 7,
    InvalidAccrual = 8,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct PoolRegistry;

#[contractimpl]
impl PoolRegistry {
    /// * `governor`        – initial holder of the privileged role.
    /// * `transfer_delay`  – seconds a governance handoff must wait; immutable.
    /// * `pool_wasm_hash`  – uploaded StakingPool code every `deploy` instantiates.
    /// * `accrual`         – reward rule handed to every deployed pool.
    pub fn __constructor(
        env: Env,
        governor: Address,
        transfer_delay: u64,
        pool_wasm_hash: BytesN<32>,
        accrual: AccrualStrategy,
    ) {
        if common::is_null(&env, &governor) {
            panic_with_error!(&env, RegistryError::ZeroAddress);
        }
        if !accrual.is_valid() {
            panic_with_error!(&env, RegistryError::InvalidAccrual);
        }

        timelock::init(&env, &governor, transfer_delay);
        env.storage().instance().set(&POOL_WASM, &pool_wasm_hash);
        env.storage().instance().set(&ACCRUAL, &accrual);

        events::publish_registry_created(&env, governor, transfer_delay);
    }

    // ── Pools ────────────────────────────────────────────────────────────────

    /// Deploy the one and only pool for `staking_token`.
    ///
    /// The contract address is derived from the staking token, so it is
    /// known before deployment and can never be claimed twice.
    pub fn deploy(
        env: Env,
        caller: Address,
        pair_label: String,
        receipt_symbol: String,
        staking_token: Address,
        reward_token: Address,
    ) -> Result<Address, RegistryError> {
        timelock::require_incumbent(&env, &caller)?;
        Self::extend_instance_ttl(&env);

        if staking_token == reward_token {
            return Err(RegistryError::TokensIdentical);
        }
        if Self::pool_for(env.clone(), staking_token.clone()).is_some() {
            return Err(RegistryError::AlreadyDeployed);
        }

        let wasm_hash: BytesN<32> = env
            .storage()
            .instance()
            .get(&POOL_WASM)
            .ok_or(RegistryError::NotInitialized)?;
        let accrual: AccrualStrategy = env
            .storage()
            .instance()
            .get(&ACCRUAL)
            .ok_or(RegistryError::NotInitialized)?;

        let salt = env
            .crypto()
            .sha256(&staking_token.clone().to_xdr(&env))
            .to_bytes();
        let pool = env.deployer().with_current_contract(salt).deploy_v2(
            wasm_hash,
            (
                env.current_contract_address(),
                staking_token.clone(),
                reward_token.clone(),
                pair_label.clone(),
                receipt_symbol,
                accrual,
            ),
        );

        Self::store_pool(&env, &staking_token, &pool);
        events::publish_pool_deployed(&env, pool.clone(), staking_token, reward_token, pair_label);

        Ok(pool)
    }

    /// The pool registered for `staking_token`, if any.
    pub fn pool_for(env: Env, staking_token: Address) -> Option<Address> {
        let key = (POOL, staking_token);
        let pool: Option<Address> = env.storage().persistent().get(&key);
        if pool.is_some() {
            Self::extend_persistent_ttl(&env, &key);
        }
        pool
    }

    pub fn accrual(env: Env) -> Result<AccrualStrategy, RegistryError> {
        env.storage()
            .instance()
            .get(&ACCRUAL)
            .ok_or(RegistryError::NotInitialized)
    }

    pub fn pool_wasm_hash(env: Env) -> Result<BytesN<32>, RegistryError> {
        env.storage()
            .instance()
            .get(&POOL_WASM)
            .ok_or(RegistryError::NotInitialized)
    }

    // ── Flash-loan fee exemptions ────────────────────────────────────────────

    pub fn set_free_flash_loan(
        env: Env,
        caller: Address,
        account: Address,
        exempt: bool,
    ) -> Result<(), RegistryError> {
        timelock::require_incumbent(&env, &caller)?;
        Self::extend_instance_ttl(&env);

        let key = (FREE_FLASH, account.clone());
        if exempt {
            env.storage().persistent().set(&key, &true);
            Self::extend_persistent_ttl(&env, &key);
        } else {
            env.storage().persistent().remove(&key);
        }

        events::publish_free_flash_loan_set(&env, account, exempt);
        Ok(())
    }

    /// Consulted by every pool before charging a flash-loan fee.
    pub fn is_free_flash_loan(env: Env, account: Address) -> bool {
        let key = (FREE_FLASH, account);
        let exempt: bool = env.storage().persistent().get(&key).unwrap_or(false);
        if exempt {
            Self::extend_persistent_ttl(&env, &key);
        }
        exempt
    }

    // ── Governance (two-step, timelocked) ────────────────────────────────────

    /// Propose `candidate` as the next governor. Only the governor may call.
    pub fn set_pending_governor(
        env: Env,
        caller: Address,
        candidate: Address,
    ) -> Result<(), RegistryError> {
        let pending = timelock::propose(&env, &caller, &candidate)?;
        Self::extend_instance_ttl(&env);

        let unlocks_at = pending.unlocks_at(timelock::delay(&env));
        events::publish_governor_proposed(&env, caller, candidate, unlocks_at);
        Ok(())
    }

    /// Promote the pending governor. Anyone may call once the delay is over.
    pub fn transfer_governance(env: Env) -> Result<Address, RegistryError> {
        let (old_governor, new_governor) = timelock::finalize(&env)?;
        Self::extend_instance_ttl(&env);

        events::publish_governor_transferred(&env, old_governor, new_governor.clone());
        Ok(new_governor)
    }

    pub fn governor(env: Env) -> Result<Address, RegistryError> {
        timelock::incumbent(&env)
    }

    pub fn pending_governor(env: Env) -> Option<Address> {
        timelock::pending(&env).map(|p| p.candidate)
    }

    /// Timestamp of the pending proposal, or 0 when none is pending.
    pub fn gov_transfer_requested_at(env: Env) -> u64 {
        timelock::pending(&env).map_or(0, |p| p.requested_at)
    }

    pub fn pending_transfer(env: Env) -> Option<PendingTransfer> {
        timelock::pending(&env)
    }

    pub fn transfer_delay(env: Env) -> u64 {
        timelock::delay(&env)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn store_pool(env: &Env, staking_token: &Address, pool: &Address) {
        let key = (POOL, staking_token.clone());
        env.storage().persistent().set(&key, pool);
        Self::extend_persistent_ttl(env, &key);
    }

    fn extend_instance_ttl(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(common::TTL_THRESHOLD, common::TTL_EXTEND_TO);
    }

    fn extend_persistent_ttl(env: &Env, key: &(Symbol, Address)) {
        env.storage()
            .persistent()
            .extend_ttl(key, common::TTL_THRESHOLD, common::TTL_EXTEND_TO);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
