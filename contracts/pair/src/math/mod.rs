//! Integer helpers for liquidity and invariant calculations.
//! Products of two amounts can exceed 128 bits, so they are carried in the
//! host `U256` type and narrowed back only when the result must fit.

use soroban_sdk::{Env, U256};

/// Shares locked forever on the first deposit.
pub const MINIMUM_LIQUIDITY: i128 = 1_000;
/// Reserves are bounded so that `reserve << 112` fits in 224 bits.
pub const RESERVE_BITS: u32 = 112;
pub const MAX_RESERVE: i128 = (1 << RESERVE_BITS) - 1;
/// Swap fee in thousandths of the input amount.
pub const FEE_NUMERATOR: i128 = 3;
pub const FEE_DENOMINATOR: i128 = 1_000;

/// Widens a non-negative amount.
pub fn to_u256(env: &Env, value: i128) -> U256 {
    U256::from_u128(env, value as u128)
}

/// Narrows back to an amount, or `None` if the value exceeds `i128::MAX`.
pub fn to_i128(value: &U256) -> Option<i128> {
    value.to_u128().and_then(|v| i128::try_from(v).ok())
}

pub fn mul(env: &Env, a: i128, b: i128) -> U256 {
    to_u256(env, a).mul(&to_u256(env, b))
}

/// `a * b / denominator` with a 256-bit intermediate product.
pub fn mul_div(env: &Env, a: i128, b: i128, denominator: i128) -> Option<i128> {
    if a < 0 || b < 0 || denominator <= 0 {
        return None;
    }
    to_i128(&mul(env, a, b).div(&to_u256(env, denominator)))
}

/// Integer square root (floor) by Newton's method.
pub fn sqrt(env: &Env, value: &U256) -> U256 {
    let zero = U256::from_u32(env, 0);
    let one = U256::from_u32(env, 1);
    let two = U256::from_u32(env, 2);
    let three = U256::from_u32(env, 3);

    if *value > three {
        let mut z = value.clone();
        let mut x = value.div(&two).add(&one);
        while x < z {
            z = x.clone();
            x = value.div(&x).add(&x).div(&two);
        }
        z
    } else if *value != zero {
        one
    } else {
        zero
    }
}

/// Checks the fee-adjusted constant product after a swap:
/// `(b0 * 1000 - in0 * 3) * (b1 * 1000 - in1 * 3) >= r0 * r1 * 1000^2`.
///
/// Returns `None` if the adjusted balances overflow.
pub fn invariant_holds(
    env: &Env,
    balance_0: i128,
    balance_1: i128,
    amount_0_in: i128,
    amount_1_in: i128,
    reserve_0: i128,
    reserve_1: i128,
) -> Option<bool> {
    let adjusted_0 = balance_0
        .checked_mul(FEE_DENOMINATOR)?
        .checked_sub(amount_0_in.checked_mul(FEE_NUMERATOR)?)?;
    let adjusted_1 = balance_1
        .checked_mul(FEE_DENOMINATOR)?
        .checked_sub(amount_1_in.checked_mul(FEE_NUMERATOR)?)?;
    if adjusted_0 < 0 || adjusted_1 < 0 {
        return Some(false);
    }

    let scale = to_u256(env, FEE_DENOMINATOR * FEE_DENOMINATOR);
    let lhs = mul(env, adjusted_0, adjusted_1);
    let rhs = mul(env, reserve_0, reserve_1).mul(&scale);
    Some(lhs >= rhs)
}
