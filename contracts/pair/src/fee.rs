use soroban_sdk::{log, Env, U256};

use crate::{
    clients::{FactoryClient, LpTokenClient},
    errors::PairError,
    math,
    storage::PairStorage,
};

/// Mints the protocol's share of fee growth to the factory's `fee_to`.
///
/// The protocol takes one sixth of the growth in `sqrt(k)` since the last
/// liquidity event, paid as newly minted shares. Returns whether the fee is
/// on; when it is off any stale `k_last` is cleared.
pub fn mint_fee(env: &Env, state: &mut PairStorage) -> Result<bool, PairError> {
    let zero = U256::from_u32(env, 0);
    let fee_to = FactoryClient::new(env, &state.factory).fee_to();

    let Some(fee_to) = fee_to else {
        if state.k_last != zero {
            state.k_last = zero;
        }
        return Ok(false);
    };

    if state.k_last != zero {
        let root_k = math::sqrt(env, &math::mul(env, state.reserve_0, state.reserve_1));
        let root_k_last = math::sqrt(env, &state.k_last);
        if root_k > root_k_last {
            let lp = LpTokenClient::new(env, &state.lp_token);
            let total_supply = math::to_u256(env, lp.total_supply());
            let numerator = total_supply.mul(&root_k.sub(&root_k_last));
            let denominator = root_k
                .mul(&U256::from_u32(env, 5))
                .add(&root_k_last);
            let liquidity =
                math::to_i128(&numerator.div(&denominator)).ok_or(PairError::Overflow)?;
            if liquidity > 0 {
                log!(env, "protocol fee minted", liquidity);
                lp.mint(&fee_to, &liquidity);
            }
        }
    }
    Ok(true)
}
