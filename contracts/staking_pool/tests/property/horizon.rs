//! Large positions over long horizons.
//!
//! Invariants tested:
//! - staking, claiming and exiting never trap, whatever the position size and
//!   idle time (up to 864,000,000 s)
//! - principal comes back in full and payouts stay within the reserve

use common::AccrualStrategy;
use proptest::prelude::*;

use crate::harness::Harness;

const MAX_POSITION: i128 = 1_000_000_000_000_000_000_000_000;
const MAX_RATE: i128 = 100_000_000_000_000;

fn wide_accrual() -> impl Strategy<Value = AccrualStrategy> {
    prop_oneof![
        (0i128..=MAX_RATE).prop_map(AccrualStrategy::FixedEmission),
        (1i128..=MAX_RATE).prop_map(AccrualStrategy::ReserveShare),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_large_positions_settle_after_long_idle(
        accrual in wide_accrual(),
        first in 1i128..=MAX_POSITION,
        second in 1i128..=MAX_POSITION,
        idle in 0u64..=864_000_000,
        funding in 1i128..=MAX_POSITION,
    ) {
        let h = Harness::new(accrual);
        let (a, b) = (&h.accounts[0], &h.accounts[1]);
        h.mint_staking(a, first);
        h.mint_staking(b, second);
        h.fund(funding);

        h.pool.stake(a, &first);
        h.advance(idle);
        h.pool.stake(b, &second);
        h.advance(idle / 2);

        let (out_a, paid_a) = h.pool.exit(a);
        let (out_b, paid_b) = h.pool.exit(b);

        prop_assert_eq!(out_a, first);
        prop_assert_eq!(out_b, second);
        prop_assert_eq!(h.pool.total_supply(), 0);
        prop_assert!(paid_a >= 0 && paid_b >= 0);
        prop_assert!(paid_a + paid_b <= funding);
        prop_assert_eq!(h.pool.reserve(), funding - paid_a - paid_b);
    }

    #[test]
    fn prop_earned_view_never_traps(
        accrual in wide_accrual(),
        stake in 1i128..=MAX_POSITION,
        idle in 0u64..=864_000_000,
    ) {
        let h = Harness::new(accrual);
        let who = &h.accounts[0];
        h.mint_staking(who, stake);

        h.pool.stake(who, &stake);
        h.advance(idle);

        let earned = h.pool.earned(who);
        prop_assert!(earned >= 0);
        prop_assert!(h.pool.total_entitlement() >= earned);
    }
}
