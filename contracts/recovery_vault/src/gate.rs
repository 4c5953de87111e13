//! Operation gate: role and mode checks around the base timelock, with the
//! epoch override applied to every state query.

use soroban_sdk::{Address, BytesN, Env, Vec};
use vault_errors::VaultError;

use crate::access_control;
use crate::base_timelock;
use crate::dispatch;
use crate::epoch;
use crate::events;
use crate::reentrancy;
use crate::recovery;
use crate::types::{Call, OperationState, Role};

/// Done and Unset are taken as-is from the base timelock. Waiting and Ready
/// drop to Unset once the operation's stamp is older than the current epoch.
pub fn get_state(e: &Env, id: &BytesN<32>) -> OperationState {
    match base_timelock::raw_state(e, id) {
        raw @ (OperationState::Done | OperationState::Unset) => raw,
        raw => {
            if epoch::is_invalidated(e, id) {
                OperationState::Unset
            } else {
                raw
            }
        }
    }
}

pub fn is_pending(e: &Env, id: &BytesN<32>) -> bool {
    matches!(
        get_state(e, id),
        OperationState::Waiting | OperationState::Ready
    )
}

fn validate_calls(calls: &Vec<Call>) -> Result<(), VaultError> {
    if calls.is_empty() {
        return Err(VaultError::EmptyBatch);
    }
    if calls.iter().any(|call| call.value < 0) {
        return Err(VaultError::NegativeValue);
    }
    Ok(())
}

fn require_executor(e: &Env, caller: &Address) -> Result<(), VaultError> {
    if access_control::is_executor_open(e) {
        return Ok(());
    }
    access_control::require_role(e, Role::Executor, caller, VaultError::NotExecutor)
}

pub fn schedule(
    e: &Env,
    caller: &Address,
    call: Call,
    predecessor: &BytesN<32>,
    salt: &BytesN<32>,
    delay: u64,
) -> Result<BytesN<32>, VaultError> {
    let id = base_timelock::hash_operation(e, &call, predecessor, salt);
    schedule_calls(
        e,
        caller,
        &id,
        &Vec::from_array(e, [call]),
        predecessor,
        salt,
        delay,
    )?;
    Ok(id)
}

pub fn schedule_batch(
    e: &Env,
    caller: &Address,
    calls: &Vec<Call>,
    predecessor: &BytesN<32>,
    salt: &BytesN<32>,
    delay: u64,
) -> Result<BytesN<32>, VaultError> {
    let id = base_timelock::hash_operation_batch(e, calls, predecessor, salt);
    schedule_calls(e, caller, &id, calls, predecessor, salt, delay)?;
    Ok(id)
}

fn schedule_calls(
    e: &Env,
    caller: &Address,
    id: &BytesN<32>,
    calls: &Vec<Call>,
    predecessor: &BytesN<32>,
    salt: &BytesN<32>,
    delay: u64,
) -> Result<(), VaultError> {
    caller.require_auth();
    access_control::require_role(e, Role::Proposer, caller, VaultError::NotProposer)?;
    recovery::require_normal(e)?;
    validate_calls(calls)?;

    // An invalidated fingerprint reads as Unset and may be scheduled again.
    if get_state(e, id) != OperationState::Unset {
        return Err(VaultError::OperationAlreadyScheduled);
    }

    let ttl = base_timelock::ttl_for_delay(delay);
    let stamped = epoch::stamp(e, id, ttl);
    base_timelock::register(e, id, delay)?;
    crate::extend_instance(e, ttl);

    for (index, call) in calls.iter().enumerate() {
        events::emit_call_scheduled(e, id, index as u32, &call, predecessor, delay, stamped);
    }
    if *salt != base_timelock::zero_id(e) {
        events::emit_call_salt(e, id, salt);
    }
    Ok(())
}

pub fn execute(
    e: &Env,
    caller: &Address,
    call: Call,
    predecessor: &BytesN<32>,
    salt: &BytesN<32>,
) -> Result<(), VaultError> {
    let id = base_timelock::hash_operation(e, &call, predecessor, salt);
    execute_calls(e, caller, &id, &Vec::from_array(e, [call]), predecessor)
}

pub fn execute_batch(
    e: &Env,
    caller: &Address,
    calls: &Vec<Call>,
    predecessor: &BytesN<32>,
    salt: &BytesN<32>,
) -> Result<(), VaultError> {
    let id = base_timelock::hash_operation_batch(e, calls, predecessor, salt);
    execute_calls(e, caller, &id, calls, predecessor)
}

/// Maps the state of a non-executable operation to the error the caller
/// should act on.
fn require_ready(e: &Env, id: &BytesN<32>) -> Result<(), VaultError> {
    match base_timelock::raw_state(e, id) {
        OperationState::Unset => Err(VaultError::OperationNotScheduled),
        OperationState::Done => Err(VaultError::OperationAlreadyDone),
        _ if epoch::is_invalidated(e, id) => Err(VaultError::OperationInvalidated),
        OperationState::Waiting => Err(VaultError::OperationNotReady),
        OperationState::Ready => Ok(()),
    }
}

fn execute_calls(
    e: &Env,
    caller: &Address,
    id: &BytesN<32>,
    calls: &Vec<Call>,
    predecessor: &BytesN<32>,
) -> Result<(), VaultError> {
    caller.require_auth();
    recovery::require_normal(e)?;
    require_executor(e, caller)?;

    reentrancy::with_guard(e, || {
        require_ready(e, id)?;
        base_timelock::require_predecessor_done(e, predecessor)?;

        base_timelock::mark_done(e, id);
        if crate::read_config(e)?.prune_stamps_on_execute {
            epoch::clear(e, id);
        }

        for (index, call) in calls.iter().enumerate() {
            dispatch::dispatch(e, &call)?;
            events::emit_call_executed(e, id, index as u32, &call);
        }
        Ok(())
    })
}

pub fn cancel(e: &Env, caller: &Address, id: &BytesN<32>) -> Result<(), VaultError> {
    caller.require_auth();
    if !access_control::has_role(e, Role::Proposer, caller)
        && !access_control::has_role(e, Role::RecoveryTrigger, caller)
    {
        return Err(VaultError::NotProposerOrRecoveryTrigger);
    }
    if !is_pending(e, id) {
        return Err(VaultError::OperationNotPending);
    }

    base_timelock::mark_unset(e, id);
    epoch::clear(e, id);
    events::emit_operation_cancelled(e, id, caller);
    Ok(())
}

/// Reclaims the storage of an operation invalidated by an epoch advance.
/// Callable by anyone; the operation reads as Unset before and after.
pub fn purge_stale(e: &Env, id: &BytesN<32>) -> Result<(), VaultError> {
    let pending_raw = matches!(
        base_timelock::raw_state(e, id),
        OperationState::Waiting | OperationState::Ready
    );
    if !pending_raw || !epoch::is_invalidated(e, id) {
        return Err(VaultError::OperationNotStale);
    }

    let stamped = epoch::epoch_of(e, id);
    base_timelock::mark_unset(e, id);
    epoch::clear(e, id);
    events::emit_stale_operation_purged(e, id, stamped);
    Ok(())
}
