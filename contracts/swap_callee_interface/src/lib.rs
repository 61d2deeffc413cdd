#![no_std]

use soroban_sdk::{contractclient, Address, Bytes, Env};

/// Flash-swap callee interface.
/// A swap recipient passed a non-empty `data` payload must implement this.
/// The Pair invokes `on_swap` after the optimistic output transfer and checks
/// the fee-adjusted invariant once the callback returns, so the callee must
/// have moved enough input into the pair (`initiator`) by then.
#[contractclient(name = "SwapCalleeClient")]
pub trait SwapCallee {
    fn on_swap(
        env: Env,
        initiator: Address,
        sender: Address,
        token_0: Address,
        token_1: Address,
        amount_0_out: i128,
        amount_1_out: i128,
        data: Bytes,
    );
}
