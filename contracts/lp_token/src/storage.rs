use soroban_sdk::{contracttype, Address, BytesN, Env};

pub(crate) const DAY_IN_LEDGERS: u32 = 17280;
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;
const ENTRY_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const ENTRY_LIFETIME_THRESHOLD: u32 = ENTRY_BUMP_AMOUNT - DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone)]
pub enum ShareTokenKey {
    Balance(Address),
    Allowance(Address, Address),
    Nonce(Address),
    TotalSupply,
    Admin,
    DomainSeparator,
}

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn read_persistent_i128(env: &Env, key: &ShareTokenKey) -> i128 {
    match env.storage().persistent().get::<_, i128>(key) {
        Some(value) => {
            env.storage()
                .persistent()
                .extend_ttl(key, ENTRY_LIFETIME_THRESHOLD, ENTRY_BUMP_AMOUNT);
            value
        }
        None => 0,
    }
}

fn write_persistent_i128(env: &Env, key: &ShareTokenKey, value: i128) {
    env.storage().persistent().set(key, &value);
    env.storage()
        .persistent()
        .extend_ttl(key, ENTRY_LIFETIME_THRESHOLD, ENTRY_BUMP_AMOUNT);
}

pub fn read_balance(env: &Env, id: &Address) -> i128 {
    read_persistent_i128(env, &ShareTokenKey::Balance(id.clone()))
}

pub fn write_balance(env: &Env, id: &Address, amount: i128) {
    write_persistent_i128(env, &ShareTokenKey::Balance(id.clone()), amount);
}

pub fn read_allowance(env: &Env, from: &Address, spender: &Address) -> i128 {
    read_persistent_i128(env, &ShareTokenKey::Allowance(from.clone(), spender.clone()))
}

pub fn write_allowance(env: &Env, from: &Address, spender: &Address, amount: i128) {
    write_persistent_i128(
        env,
        &ShareTokenKey::Allowance(from.clone(), spender.clone()),
        amount,
    );
}

pub fn read_nonce(env: &Env, owner: &Address) -> u64 {
    let key = ShareTokenKey::Nonce(owner.clone());
    env.storage().persistent().get(&key).unwrap_or(0)
}

pub fn write_nonce(env: &Env, owner: &Address, nonce: u64) {
    let key = ShareTokenKey::Nonce(owner.clone());
    env.storage().persistent().set(&key, &nonce);
    env.storage()
        .persistent()
        .extend_ttl(&key, ENTRY_LIFETIME_THRESHOLD, ENTRY_BUMP_AMOUNT);
}

pub fn read_total_supply(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&ShareTokenKey::TotalSupply)
        .unwrap_or(0)
}

pub fn write_total_supply(env: &Env, amount: i128) {
    env.storage().instance().set(&ShareTokenKey::TotalSupply, &amount);
}

pub fn has_admin(env: &Env) -> bool {
    env.storage().instance().has(&ShareTokenKey::Admin)
}

pub fn read_admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&ShareTokenKey::Admin)
}

pub fn write_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&ShareTokenKey::Admin, admin);
}

pub fn read_domain_separator(env: &Env) -> Option<BytesN<32>> {
    env.storage().instance().get(&ShareTokenKey::DomainSeparator)
}

pub fn write_domain_separator(env: &Env, separator: &BytesN<32>) {
    env.storage()
        .instance()
        .set(&ShareTokenKey::DomainSeparator, separator);
}
