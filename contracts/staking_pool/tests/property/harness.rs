//! Shared environment for the property suites.

use common::AccrualStrategy;
use pool_registry::PoolRegistry;
use proptest::prelude::*;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::{Client as TokenClient, StellarAssetClient};
use soroban_sdk::{Address, BytesN, Env, String};
use staking_pool::{StakingPool, StakingPoolClient};

pub const ACCOUNTS: usize = 3;
pub const STARTING_BALANCE: i128 = 1_000_000_000;

pub struct Harness {
    pub env: Env,
    pub pool: StakingPoolClient<'static>,
    pub staking: TokenClient<'static>,
    pub reward: TokenClient<'static>,
    pub accounts: [Address; ACCOUNTS],
}

impl Harness {
    pub fn new(accrual: AccrualStrategy) -> Self {
        let env = Env::default();
        env.mock_all_auths();
        env.ledger().set_timestamp(1_000);

        let registry = env.register(
            PoolRegistry,
            (
                Address::generate(&env),
                60u64,
                BytesN::from_array(&env, &[0u8; 32]),
                accrual.clone(),
            ),
        );
        let staking_token = env
            .register_stellar_asset_contract_v2(Address::generate(&env))
            .address();
        let reward_token = env
            .register_stellar_asset_contract_v2(Address::generate(&env))
            .address();
        let pool_id = env.register(
            StakingPool,
            (
                registry,
                staking_token.clone(),
                reward_token.clone(),
                String::from_str(&env, "PROP-PAIR"),
                String::from_str(&env, "PP-LP"),
                accrual,
            ),
        );

        let accounts = [
            Address::generate(&env),
            Address::generate(&env),
            Address::generate(&env),
        ];
        let minter = StellarAssetClient::new(&env, &staking_token);
        for account in accounts.iter() {
            minter.mint(account, &STARTING_BALANCE);
        }

        Harness {
            pool: StakingPoolClient::new(&env, &pool_id),
            staking: TokenClient::new(&env, &staking_token),
            reward: TokenClient::new(&env, &reward_token),
            accounts,
            env,
        }
    }

    pub fn fund(&self, amount: i128) {
        StellarAssetClient::new(&self.env, &self.reward.address).mint(&self.pool.address, &amount);
    }

    pub fn mint_staking(&self, to: &Address, amount: i128) {
        StellarAssetClient::new(&self.env, &self.staking.address).mint(to, &amount);
    }

    pub fn advance(&self, seconds: u64) {
        let now = self.env.ledger().timestamp();
        self.env.ledger().set_timestamp(now + seconds);
    }
}

/// One step of a generated scenario.
#[derive(Clone, Debug)]
pub enum Op {
    Stake(usize, i128),
    Withdraw(usize, i128),
    Claim(usize),
    Exit(usize),
    Fund(i128),
    Wait(u64),
}

pub fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..ACCOUNTS, 1i128..=100_000_000).prop_map(|(who, amt)| Op::Stake(who, amt)),
        (0..ACCOUNTS, 1i128..=100_000_000).prop_map(|(who, amt)| Op::Withdraw(who, amt)),
        (0..ACCOUNTS).prop_map(Op::Claim),
        (0..ACCOUNTS).prop_map(Op::Exit),
        (1i128..=5_000_000).prop_map(Op::Fund),
        (1u64..=172_800).prop_map(Op::Wait),
    ]
}

pub fn accrual_strategy() -> impl Strategy<Value = AccrualStrategy> {
    prop_oneof![
        (0i128..=1_000).prop_map(AccrualStrategy::FixedEmission),
        (1i128..=1_000_000_000_000).prop_map(AccrualStrategy::ReserveShare),
    ]
}
