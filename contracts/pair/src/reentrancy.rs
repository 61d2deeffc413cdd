use soroban_sdk::Env;

use crate::{
    errors::PairError,
    storage::{get_reentrancy_guard, set_reentrancy_guard, ReentrancyGuard},
};

/// Acquires the pair lock. Fails with `Locked` if it is already held.
pub fn acquire(env: &Env) -> Result<(), PairError> {
    let guard = get_reentrancy_guard(env);
    if guard.locked {
        return Err(PairError::Locked);
    }
    set_reentrancy_guard(env, &ReentrancyGuard { locked: true });
    Ok(())
}

pub fn release(env: &Env) {
    set_reentrancy_guard(env, &ReentrancyGuard { locked: false });
}

/// Runs `f` while holding the lock. The lock is released whatever `f`
/// returns; a trap inside `f` rolls the acquisition back with the rest of
/// the invocation.
pub fn guarded<T>(
    env: &Env,
    f: impl FnOnce() -> Result<T, PairError>,
) -> Result<T, PairError> {
    acquire(env)?;
    let result = f();
    release(env);
    result
}
