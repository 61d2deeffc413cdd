#![cfg(test)]


use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events as _},
    vec, Address, Env, IntoVal, String, Symbol,
};

use crate::{ShareToken, ShareTokenClient, ShareTokenError, UNLIMITED_ALLOWANCE};

// 10_000 and 10 whole tokens at 18 decimals.
const TOTAL_SUPPLY: i128 = 10_000_000_000_000_000_000_000;
const TEST_AMOUNT: i128 = 10_000_000_000_000_000_000;

fn create_token<'a>(env: &Env, admin: &Address, supply: i128) -> ShareTokenClient<'a> {
    let token = ShareTokenClient::new(env, &env.register_contract(None, ShareToken));
    token.initialize(
        admin,
        &18,
        &String::from_str(env, "Shoal LP"),
        &String::from_str(env, "SHOAL-LP"),
        &supply,
    );
    token
}

// ---------------------------------------------------------------------------
// Metadata and genesis supply
// ---------------------------------------------------------------------------

#[test]
fn metadata_and_genesis_supply() {
    let env = Env::default();
    env.mock_all_auths();
    let owner = Address::generate(&env);
    let token = create_token(&env, &owner, TOTAL_SUPPLY);

    assert_eq!(token.name(), String::from_str(&env, "Shoal LP"));
    assert_eq!(token.symbol(), String::from_str(&env, "SHOAL-LP"));
    assert_eq!(token.decimals(), 18);
    assert_eq!(token.total_supply(), TOTAL_SUPPLY);
    assert_eq!(token.balance(&owner), TOTAL_SUPPLY);
    assert_eq!(token.admin(), owner);
}

#[test]
fn zero_genesis_supply_mints_nothing() {
    let env = Env::default();
    env.mock_all_auths();
    let admin = Address::generate(&env);
    let token = create_token(&env, &admin, 0);

    assert_eq!(token.total_supply(), 0);
    assert_eq!(token.balance(&admin), 0);
}

#[test]
fn double_initialize_fails() {
    let env = Env::default();
    env.mock_all_auths();
    let admin = Address::generate(&env);
    let token = create_token(&env, &admin, 0);

    let result = token.try_initialize(
        &admin,
        &18,
        &String::from_str(&env, "Again"),
        &String::from_str(&env, "AGAIN"),
        &0,
    );
    assert_eq!(result, Err(Ok(ShareTokenError::AlreadyInitialized)));
}

#[test]
fn first_initializer_becomes_admin_without_authorizing() {
    // No auths mocked: initialization is open until it has happened once.
    let env = Env::default();
    let first = Address::generate(&env);
    let token = create_token(&env, &first, 0);
    assert!(env.auths().is_empty());
    assert_eq!(token.admin(), first);

    let late = token.try_initialize(
        &Address::generate(&env),
        &18,
        &String::from_str(&env, "Late"),
        &String::from_str(&env, "LATE"),
        &0,
    );
    assert_eq!(late, Err(Ok(ShareTokenError::AlreadyInitialized)));
    assert_eq!(token.admin(), first);
    assert_eq!(token.name(), String::from_str(&env, "Shoal LP"));
}

// ---------------------------------------------------------------------------
// approve / transfer / transfer_from
// ---------------------------------------------------------------------------

#[test]
fn approve_overwrites_allowance() {
    let env = Env::default();
    env.mock_all_auths();
    let owner = Address::generate(&env);
    let spender = Address::generate(&env);
    let token = create_token(&env, &owner, TOTAL_SUPPLY);

    token.approve(&owner, &spender, &TEST_AMOUNT);
    assert_eq!(token.allowance(&owner, &spender), TEST_AMOUNT);

    token.approve(&owner, &spender, &1);
    assert_eq!(token.allowance(&owner, &spender), 1, "approve must not add");
}

#[test]
fn approve_emits_approval_event() {
    let env = Env::default();
    env.mock_all_auths();
    let owner = Address::generate(&env);
    let spender = Address::generate(&env);
    let token = create_token(&env, &owner, TOTAL_SUPPLY);

    token.approve(&owner, &spender, &TEST_AMOUNT);

    let events = env.events().all();
    let last = events.slice(events.len() - 1..);
    assert_eq!(
        last,
        vec![
            &env,
            (
                token.address.clone(),
                (Symbol::new(&env, "approve"), owner.clone(), spender.clone()).into_val(&env),
                (TEST_AMOUNT, u32::MAX).into_val(&env),
            ),
        ]
    );
}

#[test]
fn transfer_moves_balance_and_emits_event() {
    let env = Env::default();
    env.mock_all_auths();
    let owner = Address::generate(&env);
    let user = Address::generate(&env);
    let token = create_token(&env, &owner, TOTAL_SUPPLY);

    token.transfer(&owner, &user, &TEST_AMOUNT);

    assert_eq!(token.balance(&user), TEST_AMOUNT);
    assert_eq!(token.balance(&owner), TOTAL_SUPPLY - TEST_AMOUNT);
    assert_eq!(token.total_supply(), TOTAL_SUPPLY);

    let events = env.events().all();
    let last = events.slice(events.len() - 1..);
    assert_eq!(
        last,
        vec![
            &env,
            (
                token.address.clone(),
                (symbol_short!("transfer"), owner.clone(), user.clone()).into_val(&env),
                TEST_AMOUNT.into_val(&env),
            ),
        ]
    );
}

#[test]
fn transfer_exceeding_balance_fails_and_changes_nothing() {
    let env = Env::default();
    env.mock_all_auths();
    let owner = Address::generate(&env);
    let user = Address::generate(&env);
    let token = create_token(&env, &owner, TOTAL_SUPPLY);

    let result = token.try_transfer(&owner, &user, &(TOTAL_SUPPLY + 1));
    assert_eq!(result, Err(Ok(ShareTokenError::InsufficientBalance)));

    let result = token.try_transfer(&user, &owner, &1);
    assert_eq!(result, Err(Ok(ShareTokenError::InsufficientBalance)));

    assert_eq!(token.balance(&owner), TOTAL_SUPPLY);
    assert_eq!(token.balance(&user), 0);
}

#[test]
fn negative_amounts_are_rejected() {
    let env = Env::default();
    env.mock_all_auths();
    let owner = Address::generate(&env);
    let user = Address::generate(&env);
    let token = create_token(&env, &owner, TOTAL_SUPPLY);

    assert_eq!(
        token.try_transfer(&owner, &user, &-1),
        Err(Ok(ShareTokenError::NegativeAmount))
    );
    assert_eq!(
        token.try_approve(&owner, &user, &-1),
        Err(Ok(ShareTokenError::NegativeAmount))
    );
}

#[test]
fn transfer_to_self_keeps_balance() {
    let env = Env::default();
    env.mock_all_auths();
    let owner = Address::generate(&env);
    let token = create_token(&env, &owner, TOTAL_SUPPLY);

    token.transfer(&owner, &owner, &TEST_AMOUNT);
    assert_eq!(token.balance(&owner), TOTAL_SUPPLY);
}

#[test]
fn transfer_from_spends_allowance() {
    let env = Env::default();
    env.mock_all_auths();
    let owner = Address::generate(&env);
    let user = Address::generate(&env);
    let token = create_token(&env, &owner, TOTAL_SUPPLY);

    token.approve(&owner, &user, &TEST_AMOUNT);
    token.transfer_from(&user, &owner, &user, &TEST_AMOUNT);

    assert_eq!(token.allowance(&owner, &user), 0);
    assert_eq!(token.balance(&owner), TOTAL_SUPPLY - TEST_AMOUNT);
    assert_eq!(token.balance(&user), TEST_AMOUNT);
}

#[test]
fn transfer_from_with_unlimited_allowance_never_decrements() {
    let env = Env::default();
    env.mock_all_auths();
    let owner = Address::generate(&env);
    let user = Address::generate(&env);
    let token = create_token(&env, &owner, TOTAL_SUPPLY);

    token.approve(&owner, &user, &UNLIMITED_ALLOWANCE);
    token.transfer_from(&user, &owner, &user, &TEST_AMOUNT);
    token.transfer_from(&user, &owner, &user, &(TOTAL_SUPPLY - TEST_AMOUNT));

    assert_eq!(token.allowance(&owner, &user), UNLIMITED_ALLOWANCE);
    assert_eq!(token.balance(&owner), 0);
    assert_eq!(token.balance(&user), TOTAL_SUPPLY);
}

#[test]
fn transfer_from_beyond_allowance_fails() {
    let env = Env::default();
    env.mock_all_auths();
    let owner = Address::generate(&env);
    let user = Address::generate(&env);
    let token = create_token(&env, &owner, TOTAL_SUPPLY);

    token.approve(&owner, &user, &TEST_AMOUNT);
    let result = token.try_transfer_from(&user, &owner, &user, &(TEST_AMOUNT + 1));
    assert_eq!(result, Err(Ok(ShareTokenError::InsufficientAllowance)));
    assert_eq!(token.allowance(&owner, &user), TEST_AMOUNT);
    assert_eq!(token.balance(&user), 0);
}

#[test]
fn transfer_from_within_allowance_but_beyond_balance_fails() {
    let env = Env::default();
    env.mock_all_auths();
    let owner = Address::generate(&env);
    let user = Address::generate(&env);
    let token = create_token(&env, &owner, TEST_AMOUNT);

    token.approve(&owner, &user, &UNLIMITED_ALLOWANCE);
    let result = token.try_transfer_from(&user, &owner, &user, &(TEST_AMOUNT + 1));
    assert_eq!(result, Err(Ok(ShareTokenError::InsufficientBalance)));
}

// ---------------------------------------------------------------------------
// Admin mint / burn
// ---------------------------------------------------------------------------

#[test]
fn admin_mint_and_holder_burn_track_supply() {
    let env = Env::default();
    env.mock_all_auths();
    let admin = Address::generate(&env);
    let user = Address::generate(&env);
    let token = create_token(&env, &admin, 0);

    token.mint(&user, &1_000);
    assert_eq!(token.total_supply(), 1_000);
    assert_eq!(token.balance(&user), 1_000);

    token.burn(&user, &400);
    assert_eq!(token.total_supply(), 600);
    assert_eq!(token.balance(&user), 600);

    assert_eq!(
        token.try_burn(&user, &601),
        Err(Ok(ShareTokenError::InsufficientBalance))
    );
}

#[test]
fn burn_from_consumes_allowance() {
    let env = Env::default();
    env.mock_all_auths();
    let admin = Address::generate(&env);
    let user = Address::generate(&env);
    let spender = Address::generate(&env);
    let token = create_token(&env, &admin, 0);

    token.mint(&user, &1_000);
    token.approve(&user, &spender, &300);
    token.burn_from(&spender, &user, &300);

    assert_eq!(token.allowance(&user, &spender), 0);
    assert_eq!(token.balance(&user), 700);
    assert_eq!(token.total_supply(), 700);
    assert_eq!(
        token.try_burn_from(&spender, &user, &1),
        Err(Ok(ShareTokenError::InsufficientAllowance))
    );
}

#[test]
#[should_panic]
fn mint_requires_admin_auth() {
    let env = Env::default();
    let admin = Address::generate(&env);
    let user = Address::generate(&env);
    let token = ShareTokenClient::new(&env, &env.register_contract(None, ShareToken));
    token.initialize(
        &admin,
        &18,
        &String::from_str(&env, "Shoal LP"),
        &String::from_str(&env, "SHOAL-LP"),
        &0,
    );

    // No auths mocked: the admin signature is missing.
    token.mint(&user, &1);
}
