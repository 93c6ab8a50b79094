//! Principal accounting under arbitrary stake/withdraw/claim sequences.
//!
//! Invariants tested:
//! - receipt supply always equals the sum of account balances
//! - the pool holds exactly the staking tokens its receipts represent
//! - every account's wallet plus receipts equals what it started with

use proptest::prelude::*;

use crate::harness::{accrual_strategy, op_strategy, Harness, Op, STARTING_BALANCE};

fn apply(h: &Harness, op: &Op) {
    match *op {
        Op::Stake(who, amount) => {
            let _ = h.pool.try_stake(&h.accounts[who], &amount);
        }
        Op::Withdraw(who, amount) => {
            let _ = h.pool.try_withdraw(&h.accounts[who], &amount);
        }
        Op::Claim(who) => {
            let _ = h.pool.try_get_reward(&h.accounts[who]);
        }
        Op::Exit(who) => {
            let _ = h.pool.try_exit(&h.accounts[who]);
        }
        Op::Fund(amount) => h.fund(amount),
        Op::Wait(seconds) => h.advance(seconds),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_principal_is_conserved(
        accrual in accrual_strategy(),
        ops in prop::collection::vec(op_strategy(), 1..24),
    ) {
        let h = Harness::new(accrual);

        for op in ops.iter() {
            apply(&h, op);

            let balances: i128 = h.accounts.iter().map(|a| h.pool.balance(a)).sum();
            prop_assert_eq!(h.pool.total_supply(), balances);
            prop_assert_eq!(h.staking.balance(&h.pool.address), balances);

            for account in h.accounts.iter() {
                prop_assert_eq!(
                    h.staking.balance(account) + h.pool.balance(account),
                    STARTING_BALANCE
                );
            }
        }
    }

    #[test]
    fn prop_withdraw_returns_exactly_what_was_staked(
        accrual in accrual_strategy(),
        amount in 1i128..=STARTING_BALANCE,
        wait in 0u64..=10_000_000,
    ) {
        let h = Harness::new(accrual);
        let who = &h.accounts[0];

        h.pool.stake(who, &amount);
        h.advance(wait);
        h.pool.withdraw(who, &amount);

        prop_assert_eq!(h.staking.balance(who), STARTING_BALANCE);
        prop_assert_eq!(h.pool.total_supply(), 0);
    }
}
