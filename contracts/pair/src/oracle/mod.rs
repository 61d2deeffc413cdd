//! Cumulative price accumulators.
//!
//! Each accumulator sums `price * seconds` where the price is the ratio of
//! the reserves held at the start of each interval, encoded as UQ112x112
//! (a 224-bit value with 112 fractional bits). Sums wrap modulo 2^256, so
//! observers take differences between two samples to get a time-weighted
//! average over the window between them.

use soroban_sdk::{Env, U256};

use crate::math::{to_u256, RESERVE_BITS};

/// Ledger time truncated to 32 bits. Intervals are taken with wrapping
/// subtraction, so the truncation is harmless as long as samples are less
/// than ~136 years apart.
pub fn current_timestamp(env: &Env) -> u32 {
    (env.ledger().timestamp() % (1u64 << 32)) as u32
}

/// `numerator / denominator` as UQ112x112. Both sides must be at most
/// 112 bits wide and `denominator` non-zero.
pub fn uq112_ratio(env: &Env, numerator: i128, denominator: i128) -> U256 {
    to_u256(env, numerator)
        .shl(RESERVE_BITS)
        .div(&to_u256(env, denominator))
}

fn max_u256(env: &Env) -> U256 {
    U256::from_parts(env, u64::MAX, u64::MAX, u64::MAX, u64::MAX)
}

pub fn wrapping_add(env: &Env, a: &U256, b: &U256) -> U256 {
    let headroom = max_u256(env).sub(a);
    if *b > headroom {
        b.sub(&headroom).sub(&U256::from_u32(env, 1))
    } else {
        a.add(b)
    }
}

pub fn wrapping_sub(env: &Env, a: &U256, b: &U256) -> U256 {
    if a >= b {
        a.sub(b)
    } else {
        max_u256(env).sub(b).add(a).add(&U256::from_u32(env, 1))
    }
}

/// Accrues `time_elapsed` seconds at the given reserves. Nothing accrues
/// over an empty interval or while either reserve is zero.
pub fn update_cumulative_prices(
    env: &Env,
    reserve_0: i128,
    reserve_1: i128,
    time_elapsed: u32,
    price_0_cumulative: &mut U256,
    price_1_cumulative: &mut U256,
) {
    if time_elapsed == 0 || reserve_0 == 0 || reserve_1 == 0 {
        return;
    }
    let elapsed = U256::from_u32(env, time_elapsed);
    let price_0 = uq112_ratio(env, reserve_1, reserve_0).mul(&elapsed);
    let price_1 = uq112_ratio(env, reserve_0, reserve_1).mul(&elapsed);
    *price_0_cumulative = wrapping_add(env, price_0_cumulative, &price_0);
    *price_1_cumulative = wrapping_add(env, price_1_cumulative, &price_1);
}

/// Time-weighted average price between two accumulator samples, as
/// UQ112x112. `None` for an empty window.
pub fn consult_twap(
    env: &Env,
    price_cumulative_start: &U256,
    price_cumulative_end: &U256,
    time_elapsed: u32,
) -> Option<U256> {
    if time_elapsed == 0 {
        return None;
    }
    let delta = wrapping_sub(env, price_cumulative_end, price_cumulative_start);
    Some(delta.div(&U256::from_u32(env, time_elapsed)))
}
