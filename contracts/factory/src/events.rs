use soroban_sdk::{symbol_short, Address, Env, Symbol};

pub struct FactoryEvents;

impl FactoryEvents {
    /// Topics: `("pair_new", token_0, token_1)`
    /// Data:   `(pair, pair_index)`
    pub fn pair_created(
        env: &Env,
        token_0: &Address,
        token_1: &Address,
        pair: &Address,
        pair_index: u32,
    ) {
        env.events().publish(
            (symbol_short!("pair_new"), token_0, token_1),
            (pair, pair_index),
        );
    }

    pub fn fee_to_changed(env: &Env, fee_to: &Option<Address>) {
        env.events()
            .publish((symbol_short!("fee_to"),), fee_to.clone());
    }

    /// "fee_to_setter" exceeds the 9-char `symbol_short!` limit.
    pub fn fee_to_setter_changed(env: &Env, fee_to_setter: &Address) {
        env.events()
            .publish((Symbol::new(env, "fee_to_setter"),), fee_to_setter);
    }
}
