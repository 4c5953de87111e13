//! Base timelock bookkeeping.
//!
//! Owns operation fingerprints, per-operation ready timestamps, the minimum
//! delay and the raw Unset/Waiting/Ready/Done classification. It knows
//! nothing about epochs or recovery mode; the operation gate layers those on
//! top.

use soroban_sdk::{contracttype, xdr::ToXdr, BytesN, Env, Vec};
use vault_errors::VaultError;

use crate::events;
use crate::types::{Call, DataKey, OperationState};

/// Value reported by `ready_timestamp` for executed operations.
pub const DONE_TIMESTAMP: u64 = 1;

/// Expected ledger close time, used to turn a delay into a TTL.
pub const LEDGER_SECONDS: u64 = 5;

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum OperationRecord {
    Scheduled(u64),
    Done,
}

/// The all-zero fingerprint, used as "no predecessor".
pub fn zero_id(e: &Env) -> BytesN<32> {
    BytesN::from_array(e, &[0u8; 32])
}

pub fn hash_operation(
    e: &Env,
    call: &Call,
    predecessor: &BytesN<32>,
    salt: &BytesN<32>,
) -> BytesN<32> {
    let encoded = (call.clone(), predecessor.clone(), salt.clone()).to_xdr(e);
    e.crypto().sha256(&encoded).to_bytes()
}

pub fn hash_operation_batch(
    e: &Env,
    calls: &Vec<Call>,
    predecessor: &BytesN<32>,
    salt: &BytesN<32>,
) -> BytesN<32> {
    let encoded = (calls.clone(), predecessor.clone(), salt.clone()).to_xdr(e);
    e.crypto().sha256(&encoded).to_bytes()
}

pub fn min_delay(e: &Env) -> Result<u64, VaultError> {
    Ok(crate::read_config(e)?.min_delay)
}

pub fn set_min_delay(e: &Env, new_delay: u64) -> Result<(), VaultError> {
    let mut config = crate::read_config(e)?;
    let old_delay = config.min_delay;
    config.min_delay = new_delay;
    crate::write_config(e, &config);
    events::emit_min_delay_changed(e, old_delay, new_delay);
    Ok(())
}

/// TTL, in ledgers, that keeps an entry alive past `delay` seconds plus the
/// default bump window.
pub fn ttl_for_delay(delay: u64) -> u32 {
    u32::try_from(delay / LEDGER_SECONDS)
        .unwrap_or(u32::MAX)
        .saturating_add(crate::BUMP_TARGET)
}

fn record(e: &Env, id: &BytesN<32>) -> Option<OperationRecord> {
    let key = DataKey::Timestamp(id.clone());
    let record = e.storage().persistent().get(&key);
    if record.is_some() {
        crate::extend_persistent(e, &key, crate::BUMP_TARGET);
    }
    record
}

/// Stores `now + delay` as the ready timestamp of `id`.
pub fn register(e: &Env, id: &BytesN<32>, delay: u64) -> Result<u64, VaultError> {
    if delay < min_delay(e)? {
        return Err(VaultError::InsufficientDelay);
    }
    let ready_at = e
        .ledger()
        .timestamp()
        .checked_add(delay)
        .ok_or(VaultError::Overflow)?;
    let key = DataKey::Timestamp(id.clone());
    e.storage()
        .persistent()
        .set(&key, &OperationRecord::Scheduled(ready_at));
    crate::extend_persistent(e, &key, ttl_for_delay(delay));
    Ok(ready_at)
}

/// Done records must outlive their dependents' predecessor checks.
pub fn mark_done(e: &Env, id: &BytesN<32>) {
    let key = DataKey::Timestamp(id.clone());
    e.storage().persistent().set(&key, &OperationRecord::Done);
    crate::extend_persistent(e, &key, crate::BUMP_TARGET);
}

pub fn mark_unset(e: &Env, id: &BytesN<32>) {
    e.storage()
        .persistent()
        .remove(&DataKey::Timestamp(id.clone()));
}

/// 0 for unset operations, `DONE_TIMESTAMP` for done ones, otherwise the
/// ledger timestamp at which the operation becomes ready.
pub fn ready_timestamp(e: &Env, id: &BytesN<32>) -> u64 {
    match record(e, id) {
        None => 0,
        Some(OperationRecord::Done) => DONE_TIMESTAMP,
        Some(OperationRecord::Scheduled(ready_at)) => ready_at,
    }
}

/// Classification from timestamps alone, before any epoch check.
pub fn raw_state(e: &Env, id: &BytesN<32>) -> OperationState {
    match record(e, id) {
        None => OperationState::Unset,
        Some(OperationRecord::Done) => OperationState::Done,
        Some(OperationRecord::Scheduled(ready_at)) => {
            if e.ledger().timestamp() < ready_at {
                OperationState::Waiting
            } else {
                OperationState::Ready
            }
        }
    }
}

/// A non-zero predecessor must have been executed first.
pub fn require_predecessor_done(e: &Env, predecessor: &BytesN<32>) -> Result<(), VaultError> {
    if *predecessor != zero_id(e) && raw_state(e, predecessor) != OperationState::Done {
        return Err(VaultError::MissingDependency);
    }
    Ok(())
}
