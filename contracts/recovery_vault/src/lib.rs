//! # Recovery Vault Contract
//!
//! A timelocked call executor with an emergency recovery mode. Proposers queue
//! calls that become executable after a minimum delay. A recovery trigger can
//! freeze scheduling and execution at any time; recoverers then take over role
//! administration, invalidate every queued operation in O(1) by advancing the
//! epoch, dispatch urgent calls directly, and finally hand control back.

#![no_std]

use soroban_sdk::{contract, contractimpl, Address, BytesN, Env, Vec};
use vault_errors::VaultError;

pub mod access_control;
pub mod base_timelock;
mod dispatch;
pub mod epoch;
mod events;
pub mod gate;
mod reentrancy;
pub mod recovery;
pub mod types;

pub use types::{Call, DataKey, InitParams, OperationState, Role, VaultConfig, VaultMode};

pub(crate) fn read_config(e: &Env) -> Result<VaultConfig, VaultError> {
    e.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(VaultError::NotInitialized)
}

pub(crate) fn write_config(e: &Env, config: &VaultConfig) {
    e.storage().instance().set(&DataKey::Config, config);
}

/// Persistent entries touched with less TTL left than this get extended.
pub(crate) const BUMP_THRESHOLD: u32 = 17_280;
/// Default TTL, in ledgers, of a touched persistent entry (~30 days).
pub(crate) const BUMP_TARGET: u32 = 518_400;

/// Threshold below which an entry is extended to `extend_to`. Lifetimes past
/// the default target are always topped up so a long delay is honored.
fn bump_threshold(extend_to: u32) -> u32 {
    if extend_to > BUMP_TARGET {
        extend_to
    } else {
        BUMP_THRESHOLD.min(extend_to)
    }
}

/// Extends `key` to `extend_to` ledgers, capped at the network maximum.
pub(crate) fn extend_persistent(e: &Env, key: &DataKey, extend_to: u32) {
    let extend_to = extend_to.min(e.storage().max_ttl());
    e.storage()
        .persistent()
        .extend_ttl(key, bump_threshold(extend_to), extend_to);
}

pub(crate) fn extend_instance(e: &Env, extend_to: u32) {
    let extend_to = extend_to.min(e.storage().max_ttl());
    e.storage()
        .instance()
        .extend_ttl(bump_threshold(extend_to), extend_to);
}

#[contract]
pub struct RecoveryVault;

#[contractimpl]
impl RecoveryVault {
    /// Initialize the vault.
    ///
    /// # Arguments
    /// * `admin` - Account granted the root `Admin` role
    /// * `params` - Minimum delay, native token, initial role members and
    ///   recovery policy flags
    ///
    /// # Errors
    /// * `AlreadyInitialized` - If the vault was initialized before
    ///
    /// # Events
    /// Emits `role_granted` for every initial member, then `vault_initialized`
    pub fn initialize(e: Env, admin: Address, params: InitParams) -> Result<(), VaultError> {
        admin.require_auth();
        if e.storage().instance().has(&DataKey::Config) {
            return Err(VaultError::AlreadyInitialized);
        }

        let config = VaultConfig {
            min_delay: params.min_delay,
            native_token: params.native_token,
            invalidate_on_trigger: params.invalidate_on_trigger,
            prune_stamps_on_execute: params.prune_stamps_on_execute,
        };
        write_config(&e, &config);
        extend_instance(&e, BUMP_TARGET);
        e.storage()
            .instance()
            .set(&DataKey::Mode, &VaultMode::Normal);
        e.storage()
            .instance()
            .set(&DataKey::Epoch, &epoch::INITIAL_EPOCH);

        access_control::grant(&e, Role::Admin, &admin, &admin);
        let initial_members = [
            (Role::Proposer, params.proposers),
            (Role::Executor, params.executors),
            (Role::Canceller, params.cancellers),
            (Role::RecoveryTrigger, params.recovery_triggers),
            (Role::Recoverer, params.recoverers),
        ];
        for (role, accounts) in initial_members {
            for account in accounts.iter() {
                access_control::grant(&e, role, &account, &admin);
            }
        }

        events::emit_initialized(&e, &admin, &config);
        Ok(())
    }

    pub fn get_config(e: Env) -> Result<VaultConfig, VaultError> {
        read_config(&e)
    }

    pub fn get_min_delay(e: Env) -> Result<u64, VaultError> {
        base_timelock::min_delay(&e)
    }

    // ==================== Operations ====================

    /// Fingerprint of a single-call operation.
    pub fn hash_operation(
        e: Env,
        call: Call,
        predecessor: BytesN<32>,
        salt: BytesN<32>,
    ) -> BytesN<32> {
        base_timelock::hash_operation(&e, &call, &predecessor, &salt)
    }

    /// Fingerprint of a batch operation.
    pub fn hash_operation_batch(
        e: Env,
        calls: Vec<Call>,
        predecessor: BytesN<32>,
        salt: BytesN<32>,
    ) -> BytesN<32> {
        base_timelock::hash_operation_batch(&e, &calls, &predecessor, &salt)
    }

    /// Queue a single call. Only proposers, only outside recovery mode.
    ///
    /// # Arguments
    /// * `proposer` - Caller; must hold `Proposer`
    /// * `call` - The call to queue
    /// * `predecessor` - Operation that must be executed first (all zero for none)
    /// * `salt` - Free-form value to distinguish otherwise identical operations
    /// * `delay` - Seconds until the operation becomes ready (>= min delay)
    ///
    /// # Returns
    /// The operation fingerprint
    ///
    /// # Events
    /// Emits `call_scheduled`, and `call_salt` for a non-zero salt
    pub fn schedule(
        e: Env,
        proposer: Address,
        call: Call,
        predecessor: BytesN<32>,
        salt: BytesN<32>,
        delay: u64,
    ) -> Result<BytesN<32>, VaultError> {
        gate::schedule(&e, &proposer, call, &predecessor, &salt, delay)
    }

    /// Queue an ordered batch of calls under one fingerprint and one epoch stamp.
    pub fn schedule_batch(
        e: Env,
        proposer: Address,
        calls: Vec<Call>,
        predecessor: BytesN<32>,
        salt: BytesN<32>,
        delay: u64,
    ) -> Result<BytesN<32>, VaultError> {
        gate::schedule_batch(&e, &proposer, &calls, &predecessor, &salt, delay)
    }

    /// Execute a ready single-call operation.
    ///
    /// # Errors
    /// * `CannotPerformInRecoveryMode` - Recovery mode freezes all execution
    /// * `NotExecutor` - Executor role is restricted and caller lacks it
    /// * `OperationNotReady` - Delay has not elapsed; retry later
    /// * `OperationInvalidated` - Invalidated by recovery; reschedule
    /// * `CallFailed` - The dispatched call failed; nothing is applied
    pub fn execute(
        e: Env,
        executor: Address,
        call: Call,
        predecessor: BytesN<32>,
        salt: BytesN<32>,
    ) -> Result<(), VaultError> {
        gate::execute(&e, &executor, call, &predecessor, &salt)
    }

    /// Execute a ready batch. Calls run in order; one failure aborts all.
    pub fn execute_batch(
        e: Env,
        executor: Address,
        calls: Vec<Call>,
        predecessor: BytesN<32>,
        salt: BytesN<32>,
    ) -> Result<(), VaultError> {
        gate::execute_batch(&e, &executor, &calls, &predecessor, &salt)
    }

    /// Cancel a pending operation. Proposers and recovery triggers may cancel,
    /// in either mode.
    pub fn cancel(e: Env, canceller: Address, id: BytesN<32>) -> Result<(), VaultError> {
        gate::cancel(&e, &canceller, &id)
    }

    /// Drop the stored timestamp and stamp of an invalidated operation.
    pub fn purge_stale(e: Env, id: BytesN<32>) -> Result<(), VaultError> {
        gate::purge_stale(&e, &id)
    }

    pub fn get_state(e: Env, id: BytesN<32>) -> OperationState {
        gate::get_state(&e, &id)
    }

    /// Ready timestamp: 0 for unset operations, 1 for done operations.
    pub fn get_timestamp(e: Env, id: BytesN<32>) -> u64 {
        base_timelock::ready_timestamp(&e, &id)
    }

    pub fn is_operation(e: Env, id: BytesN<32>) -> bool {
        gate::get_state(&e, &id) != OperationState::Unset
    }

    pub fn is_operation_pending(e: Env, id: BytesN<32>) -> bool {
        gate::is_pending(&e, &id)
    }

    pub fn is_operation_ready(e: Env, id: BytesN<32>) -> bool {
        gate::get_state(&e, &id) == OperationState::Ready
    }

    pub fn is_operation_done(e: Env, id: BytesN<32>) -> bool {
        gate::get_state(&e, &id) == OperationState::Done
    }

    // ==================== Epochs ====================

    pub fn get_epoch(e: Env) -> u64 {
        epoch::current(&e)
    }

    /// Epoch an operation was stamped with, 0 if it carries no stamp.
    pub fn get_operation_epoch(e: Env, id: BytesN<32>) -> u64 {
        epoch::epoch_of(&e, &id)
    }

    pub fn is_operation_invalidated(e: Env, id: BytesN<32>) -> bool {
        epoch::is_invalidated(&e, &id)
    }

    // ==================== Recovery ====================

    pub fn get_mode(e: Env) -> VaultMode {
        recovery::mode(&e)
    }

    pub fn is_recovery_mode(e: Env) -> bool {
        recovery::mode(&e) == VaultMode::Recovery
    }

    /// Enter recovery mode. Returns the epoch after the transition.
    pub fn trigger_recovery(e: Env, trigger: Address) -> Result<u64, VaultError> {
        recovery::trigger_recovery(&e, &trigger)
    }

    /// Invalidate every queued operation. Returns the new epoch.
    pub fn cancel_all(e: Env, recoverer: Address) -> Result<u64, VaultError> {
        recovery::cancel_all(&e, &recoverer)
    }

    pub fn exit_recovery(e: Env, recoverer: Address) -> Result<(), VaultError> {
        recovery::exit_recovery(&e, &recoverer)
    }

    /// Leave recovery mode, replacing all proposers and recovery triggers.
    pub fn exit_recovery_with_rotation(
        e: Env,
        recoverer: Address,
        new_proposer: Address,
        new_recovery_trigger: Address,
    ) -> Result<(), VaultError> {
        recovery::exit_recovery_with_rotation(&e, &recoverer, &new_proposer, &new_recovery_trigger)
    }

    /// Dispatch a call immediately. Recoverers only, recovery mode only.
    pub fn recovery_execute(e: Env, recoverer: Address, call: Call) -> Result<(), VaultError> {
        recovery::recovery_execute(&e, &recoverer, &call)
    }

    // ==================== Roles ====================

    pub fn has_role(e: Env, role: Role, account: Address) -> bool {
        access_control::has_role(&e, role, &account)
    }

    pub fn get_role_admin(e: Env, role: Role) -> Role {
        access_control::get_role_admin(&e, role)
    }

    pub fn get_role_members(e: Env, role: Role) -> Vec<Address> {
        access_control::members(&e, role)
    }

    pub fn grant_role(
        e: Env,
        caller: Address,
        role: Role,
        account: Address,
    ) -> Result<(), VaultError> {
        access_control::grant_role(&e, &caller, role, &account)
    }

    pub fn revoke_role(
        e: Env,
        caller: Address,
        role: Role,
        account: Address,
    ) -> Result<(), VaultError> {
        access_control::revoke_role(&e, &caller, role, &account)
    }

    pub fn renounce_role(e: Env, account: Address, role: Role) -> Result<(), VaultError> {
        access_control::renounce_role(&e, &account, role)
    }

    /// The null principal used by the open-executor convention.
    pub fn null_account(e: Env) -> Address {
        access_control::null_account(&e)
    }

    pub fn is_executor_open(e: Env) -> bool {
        access_control::is_executor_open(&e)
    }

    /// Check if the reentrancy lock is currently held.
    pub fn is_locked(e: Env) -> bool {
        reentrancy::is_locked(&e)
    }
}




#[cfg(test)]
mod test_events;
