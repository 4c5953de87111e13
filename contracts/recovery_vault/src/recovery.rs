//! Recovery state machine.
//!
//! `Normal` -> `trigger_recovery` -> `Recovery` -> `exit_recovery` -> `Normal`.
//! While in `Recovery` the operational roles are administered by `Recoverer`,
//! scheduling and execution are frozen, and recoverers may advance the epoch
//! or dispatch calls directly.

use soroban_sdk::{log, Address, Env};
use vault_errors::VaultError;

use crate::access_control;
use crate::dispatch;
use crate::epoch;
use crate::events;
use crate::reentrancy;
use crate::types::{Call, DataKey, Role, VaultMode, OPERATIONAL_ROLES};

pub fn mode(e: &Env) -> VaultMode {
    e.storage()
        .instance()
        .get(&DataKey::Mode)
        .unwrap_or(VaultMode::Normal)
}

pub fn require_normal(e: &Env) -> Result<(), VaultError> {
    if mode(e) == VaultMode::Recovery {
        return Err(VaultError::CannotPerformInRecoveryMode);
    }
    Ok(())
}

pub fn require_recovery(e: &Env) -> Result<(), VaultError> {
    if mode(e) != VaultMode::Recovery {
        return Err(VaultError::NotInRecoveryMode);
    }
    Ok(())
}

fn set_mode(e: &Env, mode: VaultMode) {
    e.storage().instance().set(&DataKey::Mode, &mode);
}

/// All four redirections land in the same invocation.
fn redirect_operational_admins(e: &Env, admin: Role) {
    for role in OPERATIONAL_ROLES {
        access_control::set_role_admin(e, role, admin);
    }
}

fn require_recoverer(e: &Env, caller: &Address) -> Result<(), VaultError> {
    access_control::require_role(e, Role::Recoverer, caller, VaultError::NotRecoverer)
}

pub fn trigger_recovery(e: &Env, caller: &Address) -> Result<u64, VaultError> {
    caller.require_auth();
    access_control::require_role(
        e,
        Role::RecoveryTrigger,
        caller,
        VaultError::NotRecoveryTrigger,
    )?;
    require_normal(e)?;

    set_mode(e, VaultMode::Recovery);
    redirect_operational_admins(e, Role::Recoverer);

    let epoch = if crate::read_config(e)?.invalidate_on_trigger {
        epoch::advance(e)?
    } else {
        epoch::current(e)
    };

    log!(e, "recovery triggered", caller.clone(), epoch);
    events::emit_recovery_triggered(e, caller, epoch);
    Ok(epoch)
}

/// Invalidates every operation stamped before the new epoch.
pub fn cancel_all(e: &Env, caller: &Address) -> Result<u64, VaultError> {
    caller.require_auth();
    require_recoverer(e, caller)?;
    require_recovery(e)?;

    let new_epoch = epoch::advance(e)?;
    events::emit_all_operations_cancelled(e, caller, new_epoch);
    Ok(new_epoch)
}

fn leave_recovery(e: &Env) {
    set_mode(e, VaultMode::Normal);
    redirect_operational_admins(e, Role::Admin);
}

pub fn exit_recovery(e: &Env, caller: &Address) -> Result<(), VaultError> {
    caller.require_auth();
    require_recoverer(e, caller)?;
    require_recovery(e)?;

    leave_recovery(e);

    let epoch = epoch::current(e);
    log!(e, "recovery exited", caller.clone(), epoch);
    events::emit_recovery_exited(e, caller, epoch);
    Ok(())
}

/// Replaces every member of `role` with `replacement`.
fn rotate(e: &Env, role: Role, replacement: &Address, sender: &Address) {
    for member in access_control::members(e, role).iter() {
        access_control::revoke(e, role, &member, sender);
    }
    access_control::grant(e, role, replacement, sender);
}

pub fn exit_recovery_with_rotation(
    e: &Env,
    caller: &Address,
    new_proposer: &Address,
    new_recovery_trigger: &Address,
) -> Result<(), VaultError> {
    caller.require_auth();
    require_recoverer(e, caller)?;
    require_recovery(e)?;
    if access_control::is_null(e, new_proposer) || access_control::is_null(e, new_recovery_trigger)
    {
        return Err(VaultError::ZeroAddress);
    }

    rotate(e, Role::Proposer, new_proposer, caller);
    rotate(e, Role::RecoveryTrigger, new_recovery_trigger, caller);
    leave_recovery(e);

    let epoch = epoch::current(e);
    events::emit_recovery_exited_with_rotation(
        e,
        caller,
        epoch,
        new_proposer,
        new_recovery_trigger,
    );
    Ok(())
}

/// Dispatches `call` immediately, skipping delay and epoch checks.
pub fn recovery_execute(e: &Env, caller: &Address, call: &Call) -> Result<(), VaultError> {
    caller.require_auth();
    require_recoverer(e, caller)?;
    require_recovery(e)?;

    reentrancy::with_guard(e, || dispatch::dispatch(e, call))?;

    events::emit_recovery_execution(e, caller, call);
    Ok(())
}
