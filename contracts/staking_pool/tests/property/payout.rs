//! Reward payouts against the reserve.
//!
//! Invariants tested:
//! - cumulative payouts never exceed cumulative deposits
//! - the reserve is always deposits minus payouts
//! - entitlement never shrinks while time passes
//! - under fixed emission a claim lowers entitlement by exactly the payout

use common::AccrualStrategy;
use proptest::prelude::*;

use crate::harness::{accrual_strategy, op_strategy, Harness, Op, ACCOUNTS};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_payouts_never_exceed_deposits(
        accrual in accrual_strategy(),
        initial in 0i128..=5_000_000,
        ops in prop::collection::vec(op_strategy(), 1..24),
    ) {
        let h = Harness::new(accrual);
        let mut deposited = 0i128;
        let mut paid = 0i128;
        if initial > 0 {
            h.fund(initial);
            deposited += initial;
        }

        for op in ops.iter() {
            match *op {
                Op::Stake(who, amount) => {
                    let _ = h.pool.try_stake(&h.accounts[who], &amount);
                }
                Op::Withdraw(who, amount) => {
                    let _ = h.pool.try_withdraw(&h.accounts[who], &amount);
                }
                Op::Claim(who) => {
                    if let Ok(Ok(amount)) = h.pool.try_get_reward(&h.accounts[who]) {
                        paid += amount;
                    }
                }
                Op::Exit(who) => {
                    if let Ok(Ok((_, amount))) = h.pool.try_exit(&h.accounts[who]) {
                        paid += amount;
                    }
                }
                Op::Fund(amount) => {
                    h.fund(amount);
                    deposited += amount;
                }
                Op::Wait(seconds) => {
                    let before: [i128; ACCOUNTS] =
                        core::array::from_fn(|i| h.pool.earned(&h.accounts[i]));
                    h.advance(seconds);
                    for (i, account) in h.accounts.iter().enumerate() {
                        prop_assert!(h.pool.earned(account) >= before[i]);
                    }
                }
            }

            prop_assert!(paid <= deposited);
            prop_assert_eq!(h.pool.reserve(), deposited - paid);
        }
    }

    #[test]
    fn prop_fixed_emission_claim_consumes_payout(
        rate in 1i128..=1_000,
        stake in 1i128..=1_000_000_000,
        funding in 0i128..=10_000_000,
        wait in 1u64..=1_000_000,
    ) {
        let h = Harness::new(AccrualStrategy::FixedEmission(rate));
        let who = &h.accounts[0];
        if funding > 0 {
            h.fund(funding);
        }

        h.pool.stake(who, &stake);
        h.advance(wait);

        let before = h.pool.earned(who);
        let quoted = h.pool.earned_reward_token(who);
        let paid = h.pool.get_reward(who);

        prop_assert_eq!(paid, quoted);
        prop_assert_eq!(paid, before.min(funding));
        prop_assert_eq!(h.pool.earned(who), before - paid);
        prop_assert_eq!(h.reward.balance(who), paid);
    }
}
