#![no_std]

mod errors;
mod storage;
mod typed_data;

#[cfg(test)]
extern crate std;

#[cfg(test)]
mod test;

pub use errors::ShareTokenError;
pub use typed_data::{account_address, approval_digest};

use soroban_sdk::{contract, contractimpl, Address, BytesN, Env, String};
use soroban_token_sdk::{metadata::TokenMetadata, TokenUtils};

/// Allowance value that `transfer_from` and `burn_from` never decrement.
pub const UNLIMITED_ALLOWANCE: i128 = i128::MAX;

/// Allowances never expire; approval events carry this as their ledger bound.
const NO_EXPIRATION: u32 = u32::MAX;

fn check_nonnegative(amount: i128) -> Result<(), ShareTokenError> {
    if amount < 0 {
        return Err(ShareTokenError::NegativeAmount);
    }
    Ok(())
}

fn spend_balance(env: &Env, from: &Address, amount: i128) -> Result<(), ShareTokenError> {
    let balance = storage::read_balance(env, from);
    if balance < amount {
        return Err(ShareTokenError::InsufficientBalance);
    }
    storage::write_balance(env, from, balance - amount);
    Ok(())
}

fn receive_balance(env: &Env, to: &Address, amount: i128) -> Result<(), ShareTokenError> {
    let balance = storage::read_balance(env, to)
        .checked_add(amount)
        .ok_or(ShareTokenError::Overflow)?;
    storage::write_balance(env, to, balance);
    Ok(())
}

fn spend_allowance(
    env: &Env,
    from: &Address,
    spender: &Address,
    amount: i128,
) -> Result<(), ShareTokenError> {
    let allowance = storage::read_allowance(env, from, spender);
    if allowance == UNLIMITED_ALLOWANCE {
        return Ok(());
    }
    if allowance < amount {
        return Err(ShareTokenError::InsufficientAllowance);
    }
    storage::write_allowance(env, from, spender, allowance - amount);
    Ok(())
}

fn mint_to(env: &Env, admin: &Address, to: &Address, amount: i128) -> Result<(), ShareTokenError> {
    receive_balance(env, to, amount)?;
    let supply = storage::read_total_supply(env)
        .checked_add(amount)
        .ok_or(ShareTokenError::Overflow)?;
    storage::write_total_supply(env, supply);
    TokenUtils::new(env)
        .events()
        .mint(admin.clone(), to.clone(), amount);
    Ok(())
}

fn burn_from_balance(env: &Env, from: &Address, amount: i128) -> Result<(), ShareTokenError> {
    spend_balance(env, from, amount)?;
    // Supply covers every balance, so this cannot go negative.
    storage::write_total_supply(env, storage::read_total_supply(env) - amount);
    TokenUtils::new(env).events().burn(from.clone(), amount);
    Ok(())
}

fn move_balance(
    env: &Env,
    from: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), ShareTokenError> {
    spend_balance(env, from, amount)?;
    receive_balance(env, to, amount)?;
    TokenUtils::new(env)
        .events()
        .transfer(from.clone(), to.clone(), amount);
    Ok(())
}

/// Fungible share ledger with SEP-41 transfers and signed approvals.
#[contract]
pub struct ShareToken;

#[contractimpl]
impl ShareToken {
    /// One-shot setup. `initial_supply` (possibly zero) is minted to `admin`;
    /// afterwards only `admin` may mint.
    ///
    /// The first caller wins: deploy and initialize in the same invocation, as
    /// the factory does.
    pub fn initialize(
        env: Env,
        admin: Address,
        decimal: u32,
        name: String,
        symbol: String,
        initial_supply: i128,
    ) -> Result<(), ShareTokenError> {
        if storage::has_admin(&env) {
            return Err(ShareTokenError::AlreadyInitialized);
        }
        check_nonnegative(initial_supply)?;

        storage::write_admin(&env, &admin);
        let separator = typed_data::domain_separator(&env, &name);
        storage::write_domain_separator(&env, &separator);
        TokenUtils::new(&env).metadata().set_metadata(&TokenMetadata {
            decimal,
            name,
            symbol,
        });
        storage::write_total_supply(&env, 0);

        if initial_supply > 0 {
            mint_to(&env, &admin, &admin, initial_supply)?;
        }
        storage::extend_instance_ttl(&env);
        Ok(())
    }

    pub fn mint(env: Env, to: Address, amount: i128) -> Result<(), ShareTokenError> {
        check_nonnegative(amount)?;
        let admin = storage::read_admin(&env).ok_or(ShareTokenError::NotInitialized)?;
        admin.require_auth();
        storage::extend_instance_ttl(&env);
        mint_to(&env, &admin, &to, amount)
    }

    pub fn burn(env: Env, from: Address, amount: i128) -> Result<(), ShareTokenError> {
        from.require_auth();
        check_nonnegative(amount)?;
        storage::extend_instance_ttl(&env);
        burn_from_balance(&env, &from, amount)
    }

    pub fn burn_from(
        env: Env,
        spender: Address,
        from: Address,
        amount: i128,
    ) -> Result<(), ShareTokenError> {
        spender.require_auth();
        check_nonnegative(amount)?;
        storage::extend_instance_ttl(&env);
        spend_allowance(&env, &from, &spender, amount)?;
        burn_from_balance(&env, &from, amount)
    }

    pub fn transfer(
        env: Env,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), ShareTokenError> {
        from.require_auth();
        check_nonnegative(amount)?;
        storage::extend_instance_ttl(&env);
        move_balance(&env, &from, &to, amount)
    }

    /// Moves `amount` out of `from` against `spender`'s allowance. An
    /// allowance of [`UNLIMITED_ALLOWANCE`] is left untouched.
    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), ShareTokenError> {
        spender.require_auth();
        check_nonnegative(amount)?;
        storage::extend_instance_ttl(&env);
        spend_allowance(&env, &from, &spender, amount)?;
        move_balance(&env, &from, &to, amount)
    }

    /// Overwrites the allowance of `spender` over `from`'s shares.
    pub fn approve(
        env: Env,
        from: Address,
        spender: Address,
        amount: i128,
    ) -> Result<(), ShareTokenError> {
        from.require_auth();
        check_nonnegative(amount)?;
        storage::extend_instance_ttl(&env);
        storage::write_allowance(&env, &from, &spender, amount);
        TokenUtils::new(&env)
            .events()
            .approve(from, spender, amount, NO_EXPIRATION);
        Ok(())
    }

    /// Sets an allowance from an owner's off-chain signature; anyone may
    /// submit it. The owner's nonce is consumed, so a signature works once.
    pub fn permit(
        env: Env,
        owner: Address,
        spender: Address,
        value: i128,
        deadline: u64,
        public_key: BytesN<32>,
        signature: BytesN<64>,
    ) -> Result<(), ShareTokenError> {
        check_nonnegative(value)?;
        if env.ledger().timestamp() > deadline {
            return Err(ShareTokenError::PermitExpired);
        }
        let signer = typed_data::account_address(&env, &public_key)
            .ok_or(ShareTokenError::InvalidSignature)?;
        if signer != owner {
            return Err(ShareTokenError::InvalidSignature);
        }

        let separator =
            storage::read_domain_separator(&env).ok_or(ShareTokenError::NotInitialized)?;
        let nonce = storage::read_nonce(&env, &owner);
        let digest = typed_data::approval_digest(
            &env, &separator, &owner, &spender, value, nonce, deadline,
        );
        if !typed_data::verify(&public_key, &digest, &signature) {
            return Err(ShareTokenError::InvalidSignature);
        }

        let next = nonce.checked_add(1).ok_or(ShareTokenError::Overflow)?;
        storage::write_nonce(&env, &owner, next);
        storage::write_allowance(&env, &owner, &spender, value);
        storage::extend_instance_ttl(&env);
        TokenUtils::new(&env)
            .events()
            .approve(owner, spender, value, NO_EXPIRATION);
        Ok(())
    }

    pub fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        storage::read_allowance(&env, &from, &spender)
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        storage::read_balance(&env, &id)
    }

    pub fn nonces(env: Env, owner: Address) -> u64 {
        storage::read_nonce(&env, &owner)
    }

    pub fn total_supply(env: Env) -> i128 {
        storage::read_total_supply(&env)
    }

    pub fn admin(env: Env) -> Result<Address, ShareTokenError> {
        storage::read_admin(&env).ok_or(ShareTokenError::NotInitialized)
    }

    pub fn domain_separator(env: Env) -> Result<BytesN<32>, ShareTokenError> {
        storage::read_domain_separator(&env).ok_or(ShareTokenError::NotInitialized)
    }

    pub fn permit_typehash(env: Env) -> BytesN<32> {
        typed_data::permit_typehash(&env)
    }

    pub fn decimals(env: Env) -> u32 {
        TokenUtils::new(&env).metadata().get_metadata().decimal
    }

    pub fn name(env: Env) -> String {
        TokenUtils::new(&env).metadata().get_metadata().name
    }

    pub fn symbol(env: Env) -> String {
        TokenUtils::new(&env).metadata().get_metadata().symbol
    }
}
