#![no_main]

use arbitrary::Arbitrary;
use common::AccrualStrategy;
use libfuzzer_sys::fuzz_target;
use pool_registry::PoolRegistry;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::{Client as TokenClient, StellarAssetClient};
use soroban_sdk::{Address, BytesN, Env, String};
use staking_pool::{StakingPool, StakingPoolClient};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Stake { who: u8, amount: u64 },
    Withdraw { who: u8, amount: u64 },
    Claim { who: u8 },
    Exit { who: u8 },
    Transfer { from: u8, to: u8, amount: u64 },
    Fund { amount: u32 },
    Wait { seconds: u32 },
}

#[derive(Arbitrary, Debug)]
pub struct FuzzInput {
    reserve_share: bool,
    rate: u64,
    actions: Vec<FuzzAction>,
}

const USERS: usize = 4;

fuzz_target!(|input: FuzzInput| {
    let env = Env::default();
    env.mock_all_auths();

    let accrual = if input.reserve_share {
        AccrualStrategy::ReserveShare(i128::from(input.rate))
    } else {
        AccrualStrategy::FixedEmission(i128::from(input.rate))
    };

    let registry = env.register(
        PoolRegistry,
        (
            Address::generate(&env),
            0u64,
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
            String::from_str(&env, "FUZZ-PAIR"),
            String::from_str(&env, "FZ-LP"),
            accrual,
        ),
    );
    let client = StakingPoolClient::new(&env, &pool_id);
    let staking = TokenClient::new(&env, &staking_token);

    let users: Vec<Address> = (0..USERS).map(|_| Address::generate(&env)).collect();
    for user in users.iter() {
        StellarAssetClient::new(&env, &staking_token).mint(user, &i128::from(u64::MAX));
    }

    let mut funded = 0i128;
    let mut paid = 0i128;

    // Errors are expected; panics and broken invariants are not.
    for action in input.actions.into_iter() {
        match action {
            FuzzAction::Stake { who, amount } => {
                let _ = client.try_stake(&users[who as usize % USERS], &i128::from(amount));
            }
            FuzzAction::Withdraw { who, amount } => {
                let _ = client.try_withdraw(&users[who as usize % USERS], &i128::from(amount));
            }
            FuzzAction::Claim { who } => {
                if let Ok(Ok(amount)) = client.try_get_reward(&users[who as usize % USERS]) {
                    paid += amount;
                }
            }
            FuzzAction::Exit { who } => {
                if let Ok(Ok((_, amount))) = client.try_exit(&users[who as usize % USERS]) {
                    paid += amount;
                }
            }
            FuzzAction::Transfer { from, to, amount } => {
                let _ = client.try_transfer(
                    &users[from as usize % USERS],
                    &users[to as usize % USERS],
                    &i128::from(amount),
                );
            }
            FuzzAction::Fund { amount } if amount > 0 => {
                StellarAssetClient::new(&env, &reward_token).mint(&pool_id, &i128::from(amount));
                funded += i128::from(amount);
            }
            FuzzAction::Fund { .. } => {}
            FuzzAction::Wait { seconds } => {
                let now = env.ledger().timestamp();
                env.ledger().set_timestamp(now + u64::from(seconds));
            }
        }

        let balances: i128 = users.iter().map(|u| client.balance(u)).sum();
        assert_eq!(client.total_supply(), balances);
        assert_eq!(staking.balance(&pool_id), balances);
        assert!(paid <= funded);
    }
});
