use soroban_sdk::{symbol_short, Address, Env};

pub struct PairEvents;

impl PairEvents {
    /// Topics: `("swap", sender)`
    /// Data:   `(amount_0_in, amount_1_in, amount_0_out, amount_1_out, to)`
    pub fn swap(
        env: &Env,
        sender: &Address,
        amount_0_in: i128,
        amount_1_in: i128,
        amount_0_out: i128,
        amount_1_out: i128,
        to: &Address,
    ) {
        env.events().publish(
            (symbol_short!("swap"), sender),
            (amount_0_in, amount_1_in, amount_0_out, amount_1_out, to),
        );
    }

    pub fn mint(env: &Env, sender: &Address, amount_0: i128, amount_1: i128) {
        env.events()
            .publish((symbol_short!("mint"), sender), (amount_0, amount_1));
    }

    pub fn burn(env: &Env, sender: &Address, amount_0: i128, amount_1: i128, to: &Address) {
        env.events()
            .publish((symbol_short!("burn"), sender), (amount_0, amount_1, to));
    }

    /// Emitted on every reserve update.
    pub fn sync(env: &Env, reserve_0: i128, reserve_1: i128) {
        env.events()
            .publish((symbol_short!("sync"),), (reserve_0, reserve_1));
    }
}
