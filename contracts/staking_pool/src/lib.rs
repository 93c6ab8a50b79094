#![no_std]

pub mod events;
pub mod flash_loan;
pub mod receipt;
pub mod rewards;
pub mod storage;

use common::AccrualStrategy;
use soroban_sdk::{contract, contractimpl, panic_with_error, token, Address, Bytes, Env, String};

use storage::{AccountState, Accumulator, PoolConfig, ReceiptMeta};

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum PoolError {
    NotInitialized = 1,
    StakingZero = 2,
    WithdrawingZero = 3,
    InvalidAmount = 4,
    InsufficientBalance = 5,
    TransferLocked = 6,
    InsufficientAllowance = 7,
    InvalidExpiration = 8,
    FlashLoanNotRepaid = 9,
    InsufficientReserve = 10,
    TokensIdentical = 11,
    InvalidAccrual = 12,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingPool;

#[contractimpl]
impl StakingPool {
    // ── Construction ────────────────────────────────────────────────────────

    /// Bind the pool to its registry and tokens.
    ///
    /// * `registry`      – consulted for flash-loan fee exemptions.
    /// * `staking_token` – token users stake; receipts mirror its decimals.
    /// * `reward_token`  – token whose pool balance is the reward reserve.
    /// * `name`, `symbol` – receipt metadata (pair label and receipt symbol).
    /// * `accrual`       – how entitlement accrues and converts to rewards.
    pub fn __constructor(
        env: Env,
        registry: Address,
        staking_token: Address,
        reward_token: Address,
        name: String,
        symbol: String,
        accrual: AccrualStrategy,
    ) {
        if staking_token == reward_token {
            panic_with_error!(&env, PoolError::TokensIdentical);
        }
        if !accrual.is_valid() {
            panic_with_error!(&env, PoolError::InvalidAccrual);
        }

        let decimals = token::Client::new(&env, &staking_token).decimals();

        storage::set_config(
            &env,
            &PoolConfig {
                registry: registry.clone(),
                staking_token: staking_token.clone(),
                reward_token: reward_token.clone(),
                accrual: accrual.clone(),
            },
        );
        storage::set_meta(
            &env,
            &ReceiptMeta {
                name,
                symbol,
                decimals,
            },
        );
        storage::set_accumulator(
            &env,
            &Accumulator {
                last_update: env.ledger().timestamp(),
                ..Accumulator::default()
            },
        );

        events::publish_pool_created(&env, registry, staking_token, reward_token, accrual);
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` staking tokens and mint the same amount of receipts.
    ///
    /// The accumulator is flushed first so the new principal earns nothing
    /// retroactively. Restarts the staker's transfer lock.
    pub fn stake(env: Env, staker: Address, amount: i128) -> Result<(), PoolError> {
        staker.require_auth();
        if amount == 0 {
            return Err(PoolError::StakingZero);
        }
        if amount < 0 {
            return Err(PoolError::InvalidAmount);
        }
        let config = storage::config(&env)?;
        storage::extend_instance_ttl(&env);

        let mut state = Self::update_reward(&env, &config, &staker);

        token::Client::new(&env, &config.staking_token).transfer(
            &staker,
            &env.current_contract_address(),
            &amount,
        );

        state.balance = state.balance.saturating_add(amount);
        state.transfer_unlock_time = receipt::unlock_time_from(env.ledger().timestamp());
        storage::set_account(&env, &staker, &state);

        let new_total = storage::total_staked(&env).saturating_add(amount);
        storage::set_total_staked(&env, new_total);

        events::publish_staked(&env, staker, amount, new_total, state.transfer_unlock_time);
        Ok(())
    }

    /// Burn `amount` receipts and return the same amount of staking tokens.
    pub fn withdraw(env: Env, staker: Address, amount: i128) -> Result<(), PoolError> {
        staker.require_auth();
        let config = storage::config(&env)?;
        storage::extend_instance_ttl(&env);

        Self::withdraw_for(&env, &config, &staker, amount)
    }

    /// Pay out whatever part of the staker's entitlement the reserve covers.
    ///
    /// Returns the amount of reward token transferred, possibly zero.
    /// Restarts the staker's transfer lock.
    pub fn get_reward(env: Env, staker: Address) -> Result<i128, PoolError> {
        staker.require_auth();
        let config = storage::config(&env)?;
        storage::extend_instance_ttl(&env);

        Ok(Self::reward_for(&env, &config, &staker))
    }

    /// Withdraw the full balance and claim, in one invocation.
    ///
    /// Returns `(withdrawn, reward)`.
    pub fn exit(env: Env, staker: Address) -> Result<(i128, i128), PoolError> {
        staker.require_auth();
        let config = storage::config(&env)?;
        storage::extend_instance_ttl(&env);

        let balance = storage::account(&env, &staker).balance;
        Self::withdraw_for(&env, &config, &staker, balance)?;
        let reward = Self::reward_for(&env, &config, &staker);

        Ok((balance, reward))
    }

    // ── Flash loans ─────────────────────────────────────────────────────────

    /// Lend `amount` of the reward reserve to `target` for the duration of
    /// `receiver.exec_op`. Returns the fee charged.
    pub fn flash_loan(
        env: Env,
        initiator: Address,
        receiver: Address,
        target: Address,
        amount: i128,
        data: Bytes,
    ) -> Result<i128, PoolError> {
        initiator.require_auth();
        let config = storage::config(&env)?;
        storage::extend_instance_ttl(&env);

        let fee = flash_loan::execute(&env, &config, &initiator, &receiver, &target, amount, &data)?;

        events::publish_flash_loan(&env, initiator, receiver, amount, fee);
        Ok(fee)
    }

    /// Fee `initiator` would pay to borrow `amount` right now.
    pub fn flash_fee(env: Env, initiator: Address, amount: i128) -> Result<i128, PoolError> {
        let config = storage::config(&env)?;
        Ok(flash_loan::fee_for(&env, &config, &initiator, amount))
    }

    // ── Receipt token ───────────────────────────────────────────────────────

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), PoolError> {
        from.require_auth();
        let config = storage::config(&env)?;
        storage::extend_instance_ttl(&env);

        Self::move_receipt(&env, &config, &from, &to, amount)
    }

    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), PoolError> {
        spender.require_auth();
        if amount < 0 {
            return Err(PoolError::InvalidAmount);
        }
        let config = storage::config(&env)?;
        storage::extend_instance_ttl(&env);

        receipt::spend_allowance(&env, &from, &spender, amount)?;
        Self::move_receipt(&env, &config, &from, &to, amount)
    }

    pub fn approve(
        env: Env,
        from: Address,
        spender: Address,
        amount: i128,
        expiration_ledger: u32,
    ) -> Result<(), PoolError> {
        from.require_auth();
        storage::extend_instance_ttl(&env);

        receipt::approve(&env, &from, &spender, amount, expiration_ledger)?;
        events::publish_approve(&env, from, spender, amount, expiration_ledger);
        Ok(())
    }

    pub fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        storage::allowance(&env, &from, &spender).amount
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        storage::account(&env, &id).balance
    }

    /// Receipt supply, always equal to the total staked principal.
    pub fn total_supply(env: Env) -> i128 {
        storage::total_staked(&env)
    }

    pub fn decimals(env: Env) -> Result<u32, PoolError> {
        Ok(storage::meta(&env)?.decimals)
    }

    pub fn name(env: Env) -> Result<String, PoolError> {
        Ok(storage::meta(&env)?.name)
    }

    pub fn symbol(env: Env) -> Result<String, PoolError> {
        Ok(storage::meta(&env)?.symbol)
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Entitlement of `account` as of now, without mutating state.
    pub fn earned(env: Env, account: Address) -> Result<i128, PoolError> {
        let config = storage::config(&env)?;
        let acc = Self::current_accumulator(&env, &config);
        let state = storage::account(&env, &account);
        Ok(rewards::earned(
            state.balance,
            acc.reward_per_unit,
            state.reward_per_unit_paid,
            state.entitlement,
        ))
    }

    /// Reward tokens a claim by `account` would transfer right now.
    pub fn earned_reward_token(env: Env, account: Address) -> Result<i128, PoolError> {
        let config = storage::config(&env)?;
        let acc = Self::current_accumulator(&env, &config);
        let state = storage::account(&env, &account);
        let entitlement = rewards::earned(
            state.balance,
            acc.reward_per_unit,
            state.reward_per_unit_paid,
            state.entitlement,
        );
        let reserve = Self::reserve_of(&env, &config);
        Ok(config
            .accrual
            .redeem(entitlement, acc.total_entitlement, reserve)
            .payout)
    }

    /// Current accumulator value, scaled by `common::math::PRECISION`.
    pub fn reward_per_unit(env: Env) -> Result<i128, PoolError> {
        let config = storage::config(&env)?;
        Ok(Self::current_accumulator(&env, &config).reward_per_unit)
    }

    /// Outstanding entitlement across every account, as of now.
    pub fn total_entitlement(env: Env) -> Result<i128, PoolError> {
        let config = storage::config(&env)?;
        Ok(Self::current_accumulator(&env, &config).total_entitlement)
    }

    pub fn last_update_time(env: Env) -> u64 {
        storage::accumulator(&env).last_update
    }

    /// Reward tokens currently held by the pool.
    pub fn reserve(env: Env) -> Result<i128, PoolError> {
        let config = storage::config(&env)?;
        Ok(Self::reserve_of(&env, &config))
    }

    pub fn transfer_unlock_time(env: Env, account: Address) -> u64 {
        storage::account(&env, &account).transfer_unlock_time
    }

    /// Full stored position of `account` (checkpoint not refreshed).
    pub fn account(env: Env, account: Address) -> AccountState {
        storage::account(&env, &account)
    }

    pub fn staking_token(env: Env) -> Result<Address, PoolError> {
        Ok(storage::config(&env)?.staking_token)
    }

    pub fn reward_token(env: Env) -> Result<Address, PoolError> {
        Ok(storage::config(&env)?.reward_token)
    }

    pub fn registry(env: Env) -> Result<Address, PoolError> {
        Ok(storage::config(&env)?.registry)
    }

    pub fn accrual(env: Env) -> Result<AccrualStrategy, PoolError> {
        Ok(storage::config(&env)?.accrual)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn reserve_of(env: &Env, config: &PoolConfig) -> i128 {
        token::Client::new(env, &config.reward_token).balance(&env.current_contract_address())
    }

    fn current_accumulator(env: &Env, config: &PoolConfig) -> Accumulator {
        rewards::advance(
            &storage::accumulator(env),
            config.accrual.rate(),
            storage::total_staked(env),
            env.ledger().timestamp(),
        )
    }

    /// Flush the global accumulator up to the current ledger timestamp.
    fn update_global_reward(env: &Env, config: &PoolConfig) -> Accumulator {
        let acc = Self::current_accumulator(env, config);
        storage::set_accumulator(env, &acc);
        acc
    }

    /// Full per-account flush.
    ///
    /// 1. Update the global accumulator.
    /// 2. Settle everything `account` earned since its last checkpoint.
    /// 3. Move its checkpoint to the fresh accumulator.
    ///
    /// The returned state is not yet persisted; callers store it after
    /// applying their own changes.
    fn update_reward(env: &Env, config: &PoolConfig, account: &Address) -> AccountState {
        let acc = Self::update_global_reward(env, config);

        let mut state = storage::account(env, account);
        state.entitlement = rewards::earned(
            state.balance,
            acc.reward_per_unit,
            state.reward_per_unit_paid,
            state.entitlement,
        );
        state.reward_per_unit_paid = acc.reward_per_unit;
        state
    }

    fn withdraw_for(
        env: &Env,
        config: &PoolConfig,
        staker: &Address,
        amount: i128,
    ) -> Result<(), PoolError> {
        if amount == 0 {
            return Err(PoolError::WithdrawingZero);
        }
        if amount < 0 {
            return Err(PoolError::InvalidAmount);
        }

        let mut state = Self::update_reward(env, config, staker);
        if state.balance < amount {
            return Err(PoolError::InsufficientBalance);
        }

        state.balance -= amount;
        storage::set_account(env, staker, &state);

        let new_total = storage::total_staked(env).saturating_sub(amount);
        storage::set_total_staked(env, new_total);

        token::Client::new(env, &config.staking_token).transfer(
            &env.current_contract_address(),
            staker,
            &amount,
        );

        events::publish_withdrawn(env, staker.clone(), amount, new_total);
        Ok(())
    }

    fn reward_for(env: &Env, config: &PoolConfig, staker: &Address) -> i128 {
        let mut state = Self::update_reward(env, config, staker);
        let mut acc = storage::accumulator(env);

        let reserve = Self::reserve_of(env, config);
        let redemption = config
            .accrual
            .redeem(state.entitlement, acc.total_entitlement, reserve);

        state.entitlement = state.entitlement.saturating_sub(redemption.consumed);
        state.transfer_unlock_time = receipt::unlock_time_from(env.ledger().timestamp());
        storage::set_account(env, staker, &state);

        acc.total_entitlement = acc
            .total_entitlement
            .saturating_sub(redemption.consumed)
            .max(0);
        storage::set_accumulator(env, &acc);

        if redemption.payout > 0 {
            token::Client::new(env, &config.reward_token).transfer(
                &env.current_contract_address(),
                staker,
                &redemption.payout,
            );
        }

        events::publish_reward_paid(
            env,
            staker.clone(),
            redemption.payout,
            redemption.consumed,
            state.entitlement,
        );
        redemption.payout
    }

    fn move_receipt(
        env: &Env,
        config: &PoolConfig,
        from: &Address,
        to: &Address,
        amount: i128,
    ) -> Result<(), PoolError> {
        if amount < 0 {
            return Err(PoolError::InvalidAmount);
        }

        let mut from_state = Self::update_reward(env, config, from);
        receipt::require_unlocked(env, from, &from_state)?;
        if from_state.balance < amount {
            return Err(PoolError::InsufficientBalance);
        }

        if from == to {
            storage::set_account(env, from, &from_state);
        } else {
            // Both sides are checkpointed before the move, so each keeps
            // exactly what it accrued up to now.
            let mut to_state = Self::update_reward(env, config, to);
            from_state.balance -= amount;
            to_state.balance = to_state.balance.saturating_add(amount);
            storage::set_account(env, from, &from_state);
            storage::set_account(env, to, &to_state);
        }

        events::publish_transfer(env, from.clone(), to.clone(), amount);
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
