#![cfg(test)]

// ---------------------------------------------------------------------------
// Pair test suite
//
// Every integration test runs against real collaborators: two Stellar asset
// contracts, a native ShareToken administered by the pair and a native
// Factory that supplies the protocol-fee recipient.
// ---------------------------------------------------------------------------


use shoal_factory::{Factory, FactoryClient};
use shoal_share_token::{ShareToken, ShareTokenClient};
use soroban_sdk::{
    testutils::Address as _,
    token::{StellarAssetClient, TokenClient},
    Address, Bytes, BytesN, Env, String,
};

use crate::{Pair, PairClient};

/// 10_000 whole tokens at 18 decimals, minted to the user of each asset.
pub(crate) const TOKEN_SUPPLY: i128 = 10_000 * E18;
pub(crate) const E18: i128 = 1_000_000_000_000_000_000;

pub(crate) struct Setup<'a> {
    pub env: Env,
    pub user: Address,
    pub fee_to_setter: Address,
    pub token_0: TokenClient<'a>,
    pub token_1: TokenClient<'a>,
    pub lp: ShareTokenClient<'a>,
    pub pair: PairClient<'a>,
    pub factory: FactoryClient<'a>,
}

impl<'a> Setup<'a> {
    pub fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();

        let issuer = Address::generate(&env);
        let user = Address::generate(&env);
        let fee_to_setter = Address::generate(&env);

        let a = env.register_stellar_asset_contract_v2(issuer.clone()).address();
        let b = env.register_stellar_asset_contract_v2(issuer).address();
        let (token_0, token_1) = if a < b { (a, b) } else { (b, a) };
        StellarAssetClient::new(&env, &token_0).mint(&user, &TOKEN_SUPPLY);
        StellarAssetClient::new(&env, &token_1).mint(&user, &TOKEN_SUPPLY);

        // Only the fee settings are exercised here, so the Wasm hashes are
        // placeholders.
        let factory = FactoryClient::new(&env, &env.register_contract(None, Factory));
        factory.initialize(
            &fee_to_setter,
            &BytesN::from_array(&env, &[0; 32]),
            &BytesN::from_array(&env, &[1; 32]),
        );

        let pair_id = env.register_contract(None, Pair);
        let lp = ShareTokenClient::new(&env, &env.register_contract(None, ShareToken));
        lp.initialize(
            &pair_id,
            &18,
            &String::from_str(&env, "Shoal LP"),
            &String::from_str(&env, "SHOAL-LP"),
            &0,
        );

        let pair = PairClient::new(&env, &pair_id);
        pair.initialize(&factory.address, &token_0, &token_1, &lp.address);

        Setup {
            token_0: TokenClient::new(&env, &token_0),
            token_1: TokenClient::new(&env, &token_1),
            env,
            user,
            fee_to_setter,
            lp,
            pair,
            factory,
        }
    }

    /// Deposits both amounts from the user and mints shares back to them.
    pub fn add_liquidity(&self, amount_0: i128, amount_1: i128) -> i128 {
        self.token_0.transfer(&self.user, &self.pair.address, &amount_0);
        self.token_1.transfer(&self.user, &self.pair.address, &amount_1);
        self.pair.mint(&self.user, &self.user)
    }

    pub fn no_data(&self) -> Bytes {
        Bytes::new(&self.env)
    }

    pub fn reserves(&self) -> (i128, i128) {
        let (r0, r1, _) = self.pair.get_reserves();
        (r0, r1)
    }
}
