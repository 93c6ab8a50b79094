//! Fixed-point helpers for the reward accumulator.
//!
//! All inputs are expected to be non-negative. Products are taken at 256-bit
//! width and results saturate at `i128::MAX` instead of wrapping or trapping,
//! so a pool left untouched for decades still settles.

/// Scale factor applied to the reward-per-unit accumulator.
pub const PRECISION: i128 = 1_000_000_000_000_000_000;

/// Basis-point denominator.
pub const BPS_DENOMINATOR: i128 = 10_000;

/// `floor(a * b / d)` computed with a 256-bit intermediate product.
///
/// Results above `i128::MAX` saturate. Returns 0 when any input is `<= 0`.
pub fn mul_div_floor(a: i128, b: i128, d: i128) -> i128 {
    if d <= 0 || a <= 0 || b <= 0 {
        return 0;
    }
    if let Some(product) = a.checked_mul(b) {
        return product / d;
    }
    let (hi, lo) = mul_wide(a as u128, b as u128);
    let d = d as u128;
    if hi >= d {
        return i128::MAX;
    }
    let quotient = div_wide(hi, lo, d);
    i128::try_from(quotient).unwrap_or(i128::MAX)
}

/// Full 256-bit product of two `u128`, as `(high, low)` halves.
fn mul_wide(a: u128, b: u128) -> (u128, u128) {
    const MASK: u128 = u64::MAX as u128;
    let (a_lo, a_hi) = (a & MASK, a >> 64);
    let (b_lo, b_hi) = (b & MASK, b >> 64);

    let ll = a_lo * b_lo;
    let lh = a_lo * b_hi;
    let hl = a_hi * b_lo;
    let hh = a_hi * b_hi;

    let mid = (ll >> 64) + (lh & MASK) + (hl & MASK);
    let lo = (ll & MASK) | (mid << 64);
    let hi = hh + (lh >> 64) + (hl >> 64) + (mid >> 64);
    (hi, lo)
}

/// `(hi * 2^128 + lo) / d` by shift-and-subtract.
///
/// Requires `hi < d` and `d < 2^127`, which keeps the quotient within `u128`
/// and the running remainder from overflowing when shifted.
fn div_wide(hi: u128, lo: u128, d: u128) -> u128 {
    let mut rem = hi;
    let mut quotient = 0u128;
    for bit in (0..128).rev() {
        rem = (rem << 1) | ((lo >> bit) & 1);
        quotient <<= 1;
        if rem >= d {
            rem -= d;
            quotient |= 1;
        }
    }
    quotient
}

/// `floor(amount * bps / 10_000)`.
pub fn bps_of(amount: i128, bps: i128) -> i128 {
    mul_div_floor(amount, bps, BPS_DENOMINATOR)
}
