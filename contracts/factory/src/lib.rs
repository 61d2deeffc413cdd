#![cfg_attr(not(test), no_std)]

#[cfg(test)]
extern crate std;

mod errors;
mod events;
mod storage;


pub use errors::FactoryError;

use soroban_sdk::xdr::ToXdr;
use soroban_sdk::{contract, contractclient, contractimpl, Address, Bytes, BytesN, Env, String};
use storage::FactoryStorage;

/// Decimals, name and symbol of every pair's share token.
const LP_DECIMALS: u32 = 18;
const LP_NAME: &str = "Shoal LP";
const LP_SYMBOL: &str = "SHOAL-LP";

#[contractclient(name = "PairClient")]
pub trait PairInterface {
    fn initialize(
        env: Env,
        factory: Address,
        token_0: Address,
        token_1: Address,
        lp_token: Address,
    );
}

#[contractclient(name = "LpTokenClient")]
pub trait LpTokenInterface {
    fn initialize(
        env: Env,
        admin: Address,
        decimal: u32,
        name: String,
        symbol: String,
        initial_supply: i128,
    );
}

fn load(env: &Env) -> Result<FactoryStorage, FactoryError> {
    storage::get_factory_storage(env).ok_or(FactoryError::NotInitialized)
}

fn salt(env: &Env, parts: &[&Address]) -> BytesN<32> {
    let mut data = Bytes::new(env);
    for part in parts {
        data.append(&(*part).clone().to_xdr(env));
    }
    env.crypto().sha256(&data).into()
}

/// Initializes a freshly deployed pair and its share token, then indexes the
/// pair under both asset orders and at the next creation index.
fn register_pair(
    env: &Env,
    factory_storage: &mut FactoryStorage,
    token_0: &Address,
    token_1: &Address,
    pair_address: &Address,
    lp_token_address: &Address,
) {
    // The pair administers its share token
    LpTokenClient::new(env, lp_token_address).initialize(
        pair_address,
        &LP_DECIMALS,
        &String::from_str(env, LP_NAME),
        &String::from_str(env, LP_SYMBOL),
        &0,
    );

    PairClient::new(env, pair_address).initialize(
        &env.current_contract_address(),
        token_0,
        token_1,
        lp_token_address,
    );

    // Index under both orders and by creation index
    storage::set_pair(env, token_0.clone(), token_1.clone(), pair_address.clone());
    storage::set_pair(env, token_1.clone(), token_0.clone(), pair_address.clone());

    let pair_index = factory_storage.pair_count;
    storage::set_pair_at(env, pair_index, pair_address);
    factory_storage.pair_count += 1;
    storage::set_factory_storage(env, factory_storage);
    storage::extend_instance_ttl(env);

    events::FactoryEvents::pair_created(env, token_0, token_1, pair_address, pair_index);
}

/// Registry of pairs. Deploys one pair (and its share token) per unordered
/// asset couple and holds the protocol-fee settings pairs read.
#[contract]
pub struct Factory;

#[contractimpl]
impl Factory {
    pub fn initialize(
        env: Env,
        fee_to_setter: Address,
        pair_wasm_hash: BytesN<32>,
        lp_token_wasm_hash: BytesN<32>,
    ) -> Result<(), FactoryError> {
        if storage::has_factory_storage(&env) {
            return Err(FactoryError::AlreadyInitialized);
        }

        let storage = FactoryStorage {
            pair_wasm_hash,
            lp_token_wasm_hash,
            pair_count: 0,
            fee_to: None,
            fee_to_setter,
        };

        storage::set_factory_storage(&env, &storage);
        storage::extend_instance_ttl(&env);
        Ok(())
    }

    pub fn create_pair(
        env: Env, token_a: Address, token_b: Address,
    ) -> Result<Address, FactoryError> {
        if token_a == token_b {
            return Err(FactoryError::IdenticalAssets);
        }

        let (token_0, token_1) = if token_a < token_b {
            (token_a, token_b)
        } else {
            (token_b, token_a)
        };

        if storage::get_pair(&env, token_0.clone(), token_1.clone()).is_some() {
            return Err(FactoryError::PairExists);
        }

        let mut factory_storage = load(&env)?;

        // 1. Deploy Pair
        let pair_address = env
            .deployer()
            .with_current_contract(salt(&env, &[&token_0, &token_1]))
            .deploy(factory_storage.pair_wasm_hash.clone());

        // 2. Deploy its share token
        let lp_token_address = env
            .deployer()
            .with_current_contract(salt(&env, &[&pair_address]))
            .deploy(factory_storage.lp_token_wasm_hash.clone());

        // 3. Initialize both, index and announce the pair
        register_pair(
            &env,
            &mut factory_storage,
            &token_0,
            &token_1,
            &pair_address,
            &lp_token_address,
        );

        Ok(pair_address)
    }

    /// Looks up a pair in either asset order.
    pub fn get_pair(env: Env, token_a: Address, token_b: Address) -> Option<Address> {
        storage::get_pair(&env, token_a, token_b)
    }

    pub fn all_pairs(env: Env, index: u32) -> Option<Address> {
        storage::get_pair_at(&env, index)
    }

    pub fn all_pairs_length(env: Env) -> u32 {
        storage::get_factory_storage(&env)
            .map(|s| s.pair_count)
            .unwrap_or(0)
    }

    /// Protocol-fee recipient; `None` means the protocol fee is off.
    pub fn fee_to(env: Env) -> Option<Address> {
        storage::get_factory_storage(&env).and_then(|s| s.fee_to)
    }

    pub fn fee_to_setter(env: Env) -> Result<Address, FactoryError> {
        Ok(load(&env)?.fee_to_setter)
    }

    pub fn set_fee_to(env: Env, fee_to: Option<Address>) -> Result<(), FactoryError> {
        let mut factory_storage = load(&env)?;
        factory_storage.fee_to_setter.require_auth();

        factory_storage.fee_to = fee_to;
        storage::set_factory_storage(&env, &factory_storage);
        storage::extend_instance_ttl(&env);
        events::FactoryEvents::fee_to_changed(&env, &factory_storage.fee_to);
        Ok(())
    }

    /// Hands fee administration to `fee_to_setter`.
    pub fn set_fee_to_setter(env: Env, fee_to_setter: Address) -> Result<(), FactoryError> {
        let mut factory_storage = load(&env)?;
        factory_storage.fee_to_setter.require_auth();

        factory_storage.fee_to_setter = fee_to_setter;
        storage::set_factory_storage(&env, &factory_storage);
        storage::extend_instance_ttl(&env);
        events::FactoryEvents::fee_to_setter_changed(&env, &factory_storage.fee_to_setter);
        Ok(())
    }
}
