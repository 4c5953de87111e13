use soroban_sdk::Env;
use vault_errors::VaultError;

use crate::types::DataKey;

pub fn is_locked(e: &Env) -> bool {
    e.storage()
        .instance()
        .get(&DataKey::Locked)
        .unwrap_or(false)
}

pub fn require_unlocked(e: &Env) -> Result<(), VaultError> {
    if is_locked(e) {
        return Err(VaultError::ReentrancyDetected);
    }
    Ok(())
}

fn acquire_lock(e: &Env) -> Result<(), VaultError> {
    require_unlocked(e)?;
    e.storage().instance().set(&DataKey::Locked, &true);
    Ok(())
}

fn release_lock(e: &Env) {
    e.storage().instance().set(&DataKey::Locked, &false);
}

/// Runs `f` with the lock held. An `Err` from `f` aborts the invocation, which
/// also rolls the lock back.
pub fn with_guard<T, F>(e: &Env, f: F) -> Result<T, VaultError>
where
    F: FnOnce() -> Result<T, VaultError>,
{
    acquire_lock(e)?;
    let result = f();
    release_lock(e);
    result
}
