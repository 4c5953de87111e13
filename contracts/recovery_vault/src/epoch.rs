//! Epoch tracker.
//!
//! Every scheduled operation is stamped with the epoch current at scheduling
//! time. Advancing the epoch invalidates every older stamp at once: it is a
//! single instance-storage write, whatever the number of queued operations.

use soroban_sdk::{BytesN, Env};
use vault_errors::VaultError;

use crate::types::DataKey;

/// Epoch of a freshly initialized vault.
pub const INITIAL_EPOCH: u64 = 1;
/// Stamp value of a fingerprint that was never scheduled.
pub const UNSTAMPED: u64 = 0;

pub fn current(e: &Env) -> u64 {
    e.storage()
        .instance()
        .get(&DataKey::Epoch)
        .unwrap_or(INITIAL_EPOCH)
}

/// Stamps `id` with the current epoch and keeps the stamp for `ttl` ledgers.
pub fn stamp(e: &Env, id: &BytesN<32>, ttl: u32) -> u64 {
    let epoch = current(e);
    let key = DataKey::OpEpoch(id.clone());
    e.storage().persistent().set(&key, &epoch);
    crate::extend_persistent(e, &key, ttl);
    epoch
}

pub fn epoch_of(e: &Env, id: &BytesN<32>) -> u64 {
    let key = DataKey::OpEpoch(id.clone());
    match e.storage().persistent().get(&key) {
        Some(stamped) => {
            crate::extend_persistent(e, &key, crate::BUMP_TARGET);
            stamped
        }
        None => UNSTAMPED,
    }
}

pub fn is_invalidated(e: &Env, id: &BytesN<32>) -> bool {
    let stamped = epoch_of(e, id);
    stamped != UNSTAMPED && stamped < current(e)
}

/// Moves to the next epoch and returns it.
pub fn advance(e: &Env) -> Result<u64, VaultError> {
    let next = current(e).checked_add(1).ok_or(VaultError::Overflow)?;
    e.storage().instance().set(&DataKey::Epoch, &next);
    Ok(next)
}

pub fn clear(e: &Env, id: &BytesN<32>) {
    e.storage()
        .persistent()
        .remove(&DataKey::OpEpoch(id.clone()));
}
