#![no_std]

use shoal_swap_callee_interface::SwapCallee;
use soroban_sdk::{
    contract, contractclient, contractimpl, token::TokenClient, Address, Bytes, Env,
};

#[contractclient(name = "PairClient")]
pub trait PairInterface {
    fn swap(
        env: Env,
        sender: Address,
        amount_0_out: i128,
        amount_1_out: i128,
        to: Address,
        data: Bytes,
    );
}

/// Smallest repayment that keeps the 0.3% fee-adjusted invariant intact when
/// `amount_out` is borrowed and repaid in the same asset.
pub fn flash_repayment(amount_out: i128) -> i128 {
    if amount_out == 0 {
        return 0;
    }
    amount_out + amount_out * 3 / 997 + 1
}

#[contract]
pub struct MockSwapCallee;

#[contractimpl]
impl SwapCallee for MockSwapCallee {
    fn on_swap(
        env: Env,
        initiator: Address,
        _sender: Address,
        token_0: Address,
        token_1: Address,
        amount_0_out: i128,
        amount_1_out: i128,
        data: Bytes,
    ) {
        let me = env.current_contract_address();

        if data == Bytes::from_slice(&env, b"repay") {
            // Return what was borrowed plus the fee, in the same asset.
            if amount_0_out > 0 {
                TokenClient::new(&env, &token_0).transfer(
                    &me,
                    &initiator,
                    &flash_repayment(amount_0_out),
                );
            }
            if amount_1_out > 0 {
                TokenClient::new(&env, &token_1).transfer(
                    &me,
                    &initiator,
                    &flash_repayment(amount_1_out),
                );
            }
        } else if data == Bytes::from_slice(&env, b"reenter") {
            PairClient::new(&env, &initiator).swap(
                &me,
                &amount_0_out,
                &amount_1_out,
                &me,
                &Bytes::new(&env),
            );
        }
        // "steal" and anything else: keep the output and let the pair revert.
    }
}
