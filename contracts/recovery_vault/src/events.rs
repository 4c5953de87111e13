use soroban_sdk::{Address, BytesN, Env, Symbol};

use crate::types::{Call, Role, VaultConfig};

/// Emitted once by `initialize`.
///
/// # Topics
/// * `Symbol` - "vault_initialized"
/// * `Address` - The initial root admin
///
/// # Data
/// * `VaultConfig` - The stored configuration
pub fn emit_initialized(e: &Env, admin: &Address, config: &VaultConfig) {
    let topics = (Symbol::new(e, "vault_initialized"), admin.clone());
    e.events().publish(topics, config.clone());
}

/// Emitted for every call of a scheduled operation, batch calls in order.
///
/// # Topics
/// * `Symbol` - "call_scheduled"
/// * `BytesN<32>` - Operation fingerprint
/// * `u32` - Index of the call inside the operation
///
/// # Data
/// * `Call` - The scheduled call
/// * `BytesN<32>` - Predecessor fingerprint (all zero for none)
/// * `u64` - Requested delay in seconds
/// * `u64` - Epoch the operation was stamped with
pub fn emit_call_scheduled(
    e: &Env,
    id: &BytesN<32>,
    index: u32,
    call: &Call,
    predecessor: &BytesN<32>,
    delay: u64,
    epoch: u64,
) {
    let topics = (Symbol::new(e, "call_scheduled"), id.clone(), index);
    let data = (call.clone(), predecessor.clone(), delay, epoch);
    e.events().publish(topics, data);
}

/// Emitted after scheduling when a non-zero salt was used.
pub fn emit_call_salt(e: &Env, id: &BytesN<32>, salt: &BytesN<32>) {
    let topics = (Symbol::new(e, "call_salt"), id.clone());
    e.events().publish(topics, salt.clone());
}

/// Emitted for every call dispatched by `execute` / `execute_batch`.
///
/// # Topics
/// * `Symbol` - "call_executed"
/// * `BytesN<32>` - Operation fingerprint
/// * `u32` - Index of the call inside the operation
///
/// # Data
/// * `Address` - Call target
/// * `i128` - Native value sent
/// * `Option<Symbol>` - Invoked function
pub fn emit_call_executed(e: &Env, id: &BytesN<32>, index: u32, call: &Call) {
    let topics = (Symbol::new(e, "call_executed"), id.clone(), index);
    let data = (call.target.clone(), call.value, call.function.clone());
    e.events().publish(topics, data);
}

/// Emitted when a single operation is cancelled.
///
/// # Topics
/// * `Symbol` - "operation_cancelled"
/// * `BytesN<32>` - Operation fingerprint
///
/// # Data
/// * `Address` - The canceller
pub fn emit_operation_cancelled(e: &Env, id: &BytesN<32>, canceller: &Address) {
    let topics = (Symbol::new(e, "operation_cancelled"), id.clone());
    e.events().publish(topics, canceller.clone());
}

/// Emitted when the storage of an invalidated operation is reclaimed.
pub fn emit_stale_operation_purged(e: &Env, id: &BytesN<32>, stamped_epoch: u64) {
    let topics = (Symbol::new(e, "stale_operation_purged"), id.clone());
    e.events().publish(topics, stamped_epoch);
}

/// Emitted when recovery mode is entered.
///
/// # Topics
/// * `Symbol` - "recovery_triggered"
/// * `Address` - The triggering principal
///
/// # Data
/// * `u64` - Epoch after the transition (advanced when the vault invalidates on trigger)
pub fn emit_recovery_triggered(e: &Env, principal: &Address, epoch: u64) {
    let topics = (Symbol::new(e, "recovery_triggered"), principal.clone());
    e.events().publish(topics, epoch);
}

/// Emitted by `cancel_all`.
///
/// # Topics
/// * `Symbol` - "all_operations_cancelled"
/// * `Address` - The recoverer
///
/// # Data
/// * `u64` - The new epoch
pub fn emit_all_operations_cancelled(e: &Env, principal: &Address, new_epoch: u64) {
    let topics = (Symbol::new(e, "all_operations_cancelled"), principal.clone());
    e.events().publish(topics, new_epoch);
}

/// Emitted by `exit_recovery`.
pub fn emit_recovery_exited(e: &Env, principal: &Address, epoch: u64) {
    let topics = (Symbol::new(e, "recovery_exited"), principal.clone());
    e.events().publish(topics, epoch);
}

/// Emitted by `exit_recovery_with_rotation`.
///
/// # Data
/// * `u64` - Current epoch
/// * `Address` - New proposer
/// * `Address` - New recovery trigger
pub fn emit_recovery_exited_with_rotation(
    e: &Env,
    principal: &Address,
    epoch: u64,
    new_proposer: &Address,
    new_recovery_trigger: &Address,
) {
    let topics = (
        Symbol::new(e, "recovery_exited_with_rotation"),
        principal.clone(),
    );
    let data = (epoch, new_proposer.clone(), new_recovery_trigger.clone());
    e.events().publish(topics, data);
}

/// Emitted after a successful `recovery_execute`.
///
/// # Topics
/// * `Symbol` - "recovery_execution"
/// * `Address` - The recoverer
///
/// # Data
/// * `Address` - Call target
/// * `i128` - Native value sent
/// * `Option<Symbol>` - Invoked function
/// * `Vec<Val>` - Arguments the function was invoked with
pub fn emit_recovery_execution(e: &Env, principal: &Address, call: &Call) {
    let topics = (Symbol::new(e, "recovery_execution"), principal.clone());
    let data = (
        call.target.clone(),
        call.value,
        call.function.clone(),
        call.args.clone(),
    );
    e.events().publish(topics, data);
}

/// Emitted whenever an account gains a role.
///
/// # Topics
/// * `Symbol` - "role_granted"
/// * `Role` - The role
/// * `Address` - The account
///
/// # Data
/// * `Address` - The sender (the vault itself for self calls)
pub fn emit_role_granted(e: &Env, role: Role, account: &Address, sender: &Address) {
    let topics = (Symbol::new(e, "role_granted"), role, account.clone());
    e.events().publish(topics, sender.clone());
}

/// Emitted whenever an account loses a role.
pub fn emit_role_revoked(e: &Env, role: Role, account: &Address, sender: &Address) {
    let topics = (Symbol::new(e, "role_revoked"), role, account.clone());
    e.events().publish(topics, sender.clone());
}

/// Emitted whenever the admin role of a role changes.
///
/// # Data
/// * `Role` - Previous admin role
/// * `Role` - New admin role
pub fn emit_role_admin_changed(e: &Env, role: Role, previous: Role, new_admin: Role) {
    let topics = (Symbol::new(e, "role_admin_changed"), role);
    e.events().publish(topics, (previous, new_admin));
}

/// Emitted when the minimum delay is changed through a self call.
pub fn emit_min_delay_changed(e: &Env, old_delay: u64, new_delay: u64) {
    e.events().publish(
        (Symbol::new(e, "min_delay_changed"),),
        (old_delay, new_delay),
    );
}
