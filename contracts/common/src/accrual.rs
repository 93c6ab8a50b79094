use soroban_sdk::contracttype;

use crate::math::mul_div_floor;

/// How a pool turns elapsed time into entitlement, and entitlement into
/// reward tokens.
///
/// Both variants drive the same reward-per-unit accumulator; they differ in
/// what one unit of entitlement is worth at redemption.
///
/// - `FixedEmission(rate)` – entitlement is denominated in reward-token units
///   and `rate` of them are emitted per second across all stakers. A claim
///   pays `min(entitlement, reserve)` and consumes exactly what it pays.
/// - `ReserveShare(rate)`  – entitlement is a points balance, `rate` points
///   per second across all stakers. A claim pays the account's pro-rata share
///   of the current reserve, `reserve * points / total_points`, and consumes
///   the whole points balance. A claim that would pay nothing consumes nothing.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AccrualStrategy {
    FixedEmission(i128),
    ReserveShare(i128),
}

/// Outcome of redeeming an account's entitlement against the reserve.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Redemption {
    /// Reward tokens to transfer to the claimant.
    pub payout: i128,
    /// Entitlement to remove from the account and from the pool total.
    pub consumed: i128,
}

impl AccrualStrategy {
    /// Entitlement emitted per second across all stakers.
    pub fn rate(&self) -> i128 {
        match self {
            AccrualStrategy::FixedEmission(rate) | AccrualStrategy::ReserveShare(rate) => *rate,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.rate() >= 0
    }

    /// Converts `entitlement` into a payout given the pool's outstanding
    /// `total_entitlement` and its current `reserve`.
    ///
    /// The payout never exceeds `reserve`.
    pub fn redeem(&self, entitlement: i128, total_entitlement: i128, reserve: i128) -> Redemption {
        if entitlement <= 0 || reserve <= 0 {
            return Redemption::default();
        }
        match self {
            AccrualStrategy::FixedEmission(_) => {
                let payout = entitlement.min(reserve);
                Redemption {
                    payout,
                    consumed: payout,
                }
            }
            AccrualStrategy::ReserveShare(_) => {
                // Saturation can leave the total below a single balance.
                let total = total_entitlement.max(entitlement);
                let payout = mul_div_floor(reserve, entitlement, total).min(reserve);
                if payout == 0 {
                    return Redemption::default();
                }
                Redemption {
                    payout,
                    consumed: entitlement,
                }
            }
        }
    }
}
