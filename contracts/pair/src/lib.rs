#![no_std]

mod clients;
mod errors;
mod events;
mod fee;
pub mod math;
pub mod oracle;
mod reentrancy;
mod storage;

#[cfg(test)]
extern crate std; // soroban-sdk testutils require std; pair is no_std so we must opt-in explicitly.

#[cfg(test)]
mod test;

pub use errors::PairError;

use clients::LpTokenClient;
use events::PairEvents;
use math::{MAX_RESERVE, MINIMUM_LIQUIDITY};
use shoal_swap_callee_interface::SwapCalleeClient;
use soroban_sdk::{
    contract, contractimpl, log, token::TokenClient, Address, Bytes, Env, U256,
};
use storage::PairStorage;

fn load_state(env: &Env) -> Result<PairStorage, PairError> {
    storage::get_pair_state(env).ok_or(PairError::NotInitialized)
}

/// The pair's own holdings of both assets.
fn balances(env: &Env, state: &PairStorage) -> (i128, i128) {
    let contract = env.current_contract_address();
    (
        TokenClient::new(env, &state.token_0).balance(&contract),
        TokenClient::new(env, &state.token_1).balance(&contract),
    )
}

/// Sets the reserves to the given balances, first accruing the interval
/// that just ended into the price accumulators at the old reserves.
fn update(
    env: &Env,
    state: &mut PairStorage,
    balance_0: i128,
    balance_1: i128,
) -> Result<(), PairError> {
    if !(0..=MAX_RESERVE).contains(&balance_0) || !(0..=MAX_RESERVE).contains(&balance_1) {
        return Err(PairError::Overflow);
    }

    let now = oracle::current_timestamp(env);
    let elapsed = now.wrapping_sub(state.block_timestamp_last);
    oracle::update_cumulative_prices(
        env,
        state.reserve_0,
        state.reserve_1,
        elapsed,
        &mut state.price_0_cumulative_last,
        &mut state.price_1_cumulative_last,
    );

    state.reserve_0 = balance_0;
    state.reserve_1 = balance_1;
    state.block_timestamp_last = now;
    PairEvents::sync(env, balance_0, balance_1);
    Ok(())
}

/// How much of `balance` arrived on top of what the reserve keeps after
/// paying out `amount_out`.
fn amount_in(balance: i128, reserve: i128, amount_out: i128) -> i128 {
    let kept = reserve - amount_out;
    if balance > kept {
        balance - kept
    } else {
        0
    }
}

/// Constant-product pool over two assets. Deposits, withdrawals and swaps
/// are settled against the difference between the pair's token balances
/// and its recorded reserves.
#[contract]
pub struct Pair;

#[contractimpl]
impl Pair {
    /// Binds the pair to its factory, its two assets (already ordered by the
    /// factory) and the share token it administers.
    pub fn initialize(
        env: Env,
        factory: Address,
        token_0: Address,
        token_1: Address,
        lp_token: Address,
    ) -> Result<(), PairError> {
        if storage::has_pair_state(&env) {
            return Err(PairError::AlreadyInitialized);
        }
        factory.require_auth();
        if token_0 == token_1 {
            return Err(PairError::IdenticalAssets);
        }

        let zero = U256::from_u32(&env, 0);
        storage::set_pair_state(
            &env,
            &PairStorage {
                factory,
                token_0,
                token_1,
                lp_token,
                reserve_0: 0,
                reserve_1: 0,
                block_timestamp_last: oracle::current_timestamp(&env),
                price_0_cumulative_last: zero.clone(),
                price_1_cumulative_last: zero.clone(),
                k_last: zero,
            },
        );
        storage::extend_instance_ttl(&env);
        Ok(())
    }

    /// Issues shares to `to` for whatever was deposited since the last
    /// reserve update. The first deposit permanently locks
    /// `MINIMUM_LIQUIDITY` shares on the share token's own address.
    pub fn mint(env: Env, sender: Address, to: Address) -> Result<i128, PairError> {
        sender.require_auth();
        reentrancy::guarded(&env, || {
            let mut state = load_state(&env)?;
            let (balance_0, balance_1) = balances(&env, &state);
            let amount_0 = balance_0 - state.reserve_0;
            let amount_1 = balance_1 - state.reserve_1;
            if amount_0 < 0 || amount_1 < 0 {
                return Err(PairError::InsufficientLiquidityMinted);
            }

            let fee_on = fee::mint_fee(&env, &mut state)?;
            let lp = LpTokenClient::new(&env, &state.lp_token);
            let total_supply = lp.total_supply();

            let liquidity = if total_supply == 0 {
                let root = math::sqrt(&env, &math::mul(&env, amount_0, amount_1));
                let root = math::to_i128(&root).ok_or(PairError::Overflow)?;
                if root <= MINIMUM_LIQUIDITY {
                    return Err(PairError::InsufficientLiquidityMinted);
                }
                lp.mint(&state.lp_token, &MINIMUM_LIQUIDITY);
                root - MINIMUM_LIQUIDITY
            } else {
                let by_0 = math::mul_div(&env, amount_0, total_supply, state.reserve_0)
                    .ok_or(PairError::Overflow)?;
                let by_1 = math::mul_div(&env, amount_1, total_supply, state.reserve_1)
                    .ok_or(PairError::Overflow)?;
                by_0.min(by_1)
            };
            if liquidity <= 0 {
                return Err(PairError::InsufficientLiquidityMinted);
            }
            lp.mint(&to, &liquidity);

            update(&env, &mut state, balance_0, balance_1)?;
            if fee_on {
                state.k_last = math::mul(&env, state.reserve_0, state.reserve_1);
            }
            storage::set_pair_state(&env, &state);
            storage::extend_instance_ttl(&env);

            PairEvents::mint(&env, &sender, amount_0, amount_1);
            Ok(liquidity)
        })
    }

    /// Redeems every share held by the pair itself, paying the pro-rata
    /// amounts of both assets to `to`.
    pub fn burn(env: Env, sender: Address, to: Address) -> Result<(i128, i128), PairError> {
        sender.require_auth();
        reentrancy::guarded(&env, || {
            let mut state = load_state(&env)?;
            let contract = env.current_contract_address();
            let (balance_0, balance_1) = balances(&env, &state);
            let lp = LpTokenClient::new(&env, &state.lp_token);
            let liquidity = lp.balance(&contract);

            let fee_on = fee::mint_fee(&env, &mut state)?;
            let total_supply = lp.total_supply();
            if total_supply == 0 {
                return Err(PairError::InsufficientLiquidityBurned);
            }
            let amount_0 = math::mul_div(&env, liquidity, balance_0, total_supply)
                .ok_or(PairError::Overflow)?;
            let amount_1 = math::mul_div(&env, liquidity, balance_1, total_supply)
                .ok_or(PairError::Overflow)?;
            if amount_0 <= 0 || amount_1 <= 0 {
                return Err(PairError::InsufficientLiquidityBurned);
            }

            lp.burn(&contract, &liquidity);
            TokenClient::new(&env, &state.token_0).transfer(&contract, &to, &amount_0);
            TokenClient::new(&env, &state.token_1).transfer(&contract, &to, &amount_1);

            let (balance_0, balance_1) = balances(&env, &state);
            update(&env, &mut state, balance_0, balance_1)?;
            if fee_on {
                state.k_last = math::mul(&env, state.reserve_0, state.reserve_1);
            }
            storage::set_pair_state(&env, &state);
            storage::extend_instance_ttl(&env);

            PairEvents::burn(&env, &sender, amount_0, amount_1, &to);
            Ok((amount_0, amount_1))
        })
    }

    /// Pays out the requested amounts to `to`, then requires that enough
    /// came back in to keep the fee-adjusted product from shrinking.
    ///
    /// With non-empty `data`, `to` is a swap callee and is invoked between
    /// the payout and the check, so it can pay for the output with anything
    /// it does with it (a flash swap).
    pub fn swap(
        env: Env,
        sender: Address,
        amount_0_out: i128,
        amount_1_out: i128,
        to: Address,
        data: Bytes,
    ) -> Result<(), PairError> {
        sender.require_auth();
        reentrancy::guarded(&env, || {
            if amount_0_out < 0 || amount_1_out < 0 || (amount_0_out == 0 && amount_1_out == 0) {
                return Err(PairError::InvalidOutputAmount);
            }
            let mut state = load_state(&env)?;
            if amount_0_out >= state.reserve_0 || amount_1_out >= state.reserve_1 {
                return Err(PairError::InsufficientLiquidity);
            }
            if to == state.token_0 || to == state.token_1 {
                return Err(PairError::InvalidRecipient);
            }

            let contract = env.current_contract_address();
            if amount_0_out > 0 {
                TokenClient::new(&env, &state.token_0).transfer(&contract, &to, &amount_0_out);
            }
            if amount_1_out > 0 {
                TokenClient::new(&env, &state.token_1).transfer(&contract, &to, &amount_1_out);
            }
            if !data.is_empty() {
                SwapCalleeClient::new(&env, &to).on_swap(
                    &contract,
                    &sender,
                    &state.token_0,
                    &state.token_1,
                    &amount_0_out,
                    &amount_1_out,
                    &data,
                );
            }

            let (balance_0, balance_1) = balances(&env, &state);
            let amount_0_in = amount_in(balance_0, state.reserve_0, amount_0_out);
            let amount_1_in = amount_in(balance_1, state.reserve_1, amount_1_out);
            if amount_0_in == 0 && amount_1_in == 0 {
                return Err(PairError::InsufficientInputAmount);
            }

            let holds = math::invariant_holds(
                &env,
                balance_0,
                balance_1,
                amount_0_in,
                amount_1_in,
                state.reserve_0,
                state.reserve_1,
            )
            .ok_or(PairError::Overflow)?;
            if !holds {
                log!(&env, "swap rejected", balance_0, balance_1, amount_0_in, amount_1_in);
                return Err(PairError::InvariantViolated);
            }

            update(&env, &mut state, balance_0, balance_1)?;
            storage::set_pair_state(&env, &state);
            storage::extend_instance_ttl(&env);

            PairEvents::swap(
                &env,
                &sender,
                amount_0_in,
                amount_1_in,
                amount_0_out,
                amount_1_out,
                &to,
            );
            Ok(())
        })
    }

    /// Sends any balance above the reserves to `to`. Reserves are untouched.
    /// Fails with `InsufficientLiquidity` if either balance is below its
    /// reserve; `sync` is the recovery for that.
    pub fn skim(env: Env, to: Address) -> Result<(), PairError> {
        reentrancy::guarded(&env, || {
            let state = load_state(&env)?;
            let contract = env.current_contract_address();
            let (balance_0, balance_1) = balances(&env, &state);

            let excess_0 = balance_0 - state.reserve_0;
            let excess_1 = balance_1 - state.reserve_1;
            if excess_0 < 0 || excess_1 < 0 {
                return Err(PairError::InsufficientLiquidity);
            }
            if excess_0 > 0 {
                TokenClient::new(&env, &state.token_0).transfer(&contract, &to, &excess_0);
            }
            if excess_1 > 0 {
                TokenClient::new(&env, &state.token_1).transfer(&contract, &to, &excess_1);
            }
            Ok(())
        })
    }

    /// Forces the reserves to match the current balances.
    pub fn sync(env: Env) -> Result<(), PairError> {
        reentrancy::guarded(&env, || {
            let mut state = load_state(&env)?;
            let (balance_0, balance_1) = balances(&env, &state);
            update(&env, &mut state, balance_0, balance_1)?;
            storage::set_pair_state(&env, &state);
            storage::extend_instance_ttl(&env);
            Ok(())
        })
    }

    // -----------------------------------------------------------------------
    // Views
    // -----------------------------------------------------------------------

    pub fn factory(env: Env) -> Result<Address, PairError> {
        Ok(load_state(&env)?.factory)
    }

    pub fn token_0(env: Env) -> Result<Address, PairError> {
        Ok(load_state(&env)?.token_0)
    }

    pub fn token_1(env: Env) -> Result<Address, PairError> {
        Ok(load_state(&env)?.token_1)
    }

    pub fn lp_token(env: Env) -> Result<Address, PairError> {
        Ok(load_state(&env)?.lp_token)
    }

    /// `(reserve_0, reserve_1, block_timestamp_last)`; zeros before
    /// initialization.
    pub fn get_reserves(env: Env) -> (i128, i128, u32) {
        storage::get_pair_state(&env)
            .map(|s| (s.reserve_0, s.reserve_1, s.block_timestamp_last))
            .unwrap_or((0, 0, 0))
    }

    pub fn price_0_cumulative_last(env: Env) -> U256 {
        storage::get_pair_state(&env)
            .map(|s| s.price_0_cumulative_last)
            .unwrap_or_else(|| U256::from_u32(&env, 0))
    }

    pub fn price_1_cumulative_last(env: Env) -> U256 {
        storage::get_pair_state(&env)
            .map(|s| s.price_1_cumulative_last)
            .unwrap_or_else(|| U256::from_u32(&env, 0))
    }

    pub fn k_last(env: Env) -> U256 {
        storage::get_pair_state(&env)
            .map(|s| s.k_last)
            .unwrap_or_else(|| U256::from_u32(&env, 0))
    }
}
