//! Role registry.
//!
//! Membership is stored twice in persistent storage: a per-(role, account)
//! flag for O(1) checks and a per-role list for enumeration and rotation. Each role has an admin role;
//! the admin of the operational roles is the only thing recovery mode
//! changes.

use soroban_sdk::{Address, Env, String, Vec};
use vault_errors::VaultError;

use crate::events;
use crate::reentrancy;
use crate::types::{DataKey, Role};

/// Strkey of the all-zero ed25519 account, the vault's null principal.
pub const NULL_ACCOUNT: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";

pub fn null_account(e: &Env) -> Address {
    Address::from_string(&String::from_str(e, NULL_ACCOUNT))
}

pub fn is_null(e: &Env, account: &Address) -> bool {
    *account == null_account(e)
}

pub fn has_role(e: &Env, role: Role, account: &Address) -> bool {
    let key = DataKey::RoleMember(role, account.clone());
    let held = e.storage().persistent().get(&key).unwrap_or(false);
    if held {
        crate::extend_persistent(e, &key, crate::BUMP_TARGET);
    }
    held
}

pub fn members(e: &Env, role: Role) -> Vec<Address> {
    let key = DataKey::RoleMembers(role);
    match e.storage().persistent().get(&key) {
        Some(list) => {
            crate::extend_persistent(e, &key, crate::BUMP_TARGET);
            list
        }
        None => Vec::new(e),
    }
}

fn write_members(e: &Env, role: Role, list: &Vec<Address>) {
    let key = DataKey::RoleMembers(role);
    e.storage().persistent().set(&key, list);
    crate::extend_persistent(e, &key, crate::BUMP_TARGET);
}

pub fn get_role_admin(e: &Env, role: Role) -> Role {
    e.storage()
        .instance()
        .get(&DataKey::RoleAdmin(role))
        .unwrap_or(Role::Admin)
}

/// Only the recovery state machine re-points role administration.
pub(crate) fn set_role_admin(e: &Env, role: Role, admin: Role) {
    let previous = get_role_admin(e, role);
    e.storage()
        .instance()
        .set(&DataKey::RoleAdmin(role), &admin);
    events::emit_role_admin_changed(e, role, previous, admin);
}

pub fn require_role(
    e: &Env,
    role: Role,
    account: &Address,
    err: VaultError,
) -> Result<(), VaultError> {
    if !has_role(e, role, account) {
        return Err(err);
    }
    Ok(())
}

/// Execution is open to every caller while the null principal is the sole
/// executor.
pub fn is_executor_open(e: &Env) -> bool {
    let executors = members(e, Role::Executor);
    executors.len() == 1 && executors.get(0).is_some_and(|only| is_null(e, &only))
}

/// Unchecked grant. Returns false when the account already held the role.
pub(crate) fn grant(e: &Env, role: Role, account: &Address, sender: &Address) -> bool {
    if has_role(e, role, account) {
        return false;
    }
    let key = DataKey::RoleMember(role, account.clone());
    e.storage().persistent().set(&key, &true);
    crate::extend_persistent(e, &key, crate::BUMP_TARGET);

    let mut list = members(e, role);
    list.push_back(account.clone());
    write_members(e, role, &list);

    events::emit_role_granted(e, role, account, sender);
    true
}

/// Unchecked revoke. Returns false when the account did not hold the role.
pub(crate) fn revoke(e: &Env, role: Role, account: &Address, sender: &Address) -> bool {
    if !has_role(e, role, account) {
        return false;
    }
    e.storage()
        .persistent()
        .remove(&DataKey::RoleMember(role, account.clone()));

    let mut list = members(e, role);
    if let Some(index) = list.iter().position(|member| member == *account) {
        list.remove(index as u32);
        write_members(e, role, &list);
    }

    events::emit_role_revoked(e, role, account, sender);
    true
}

fn require_role_admin(e: &Env, caller: &Address, role: Role) -> Result<(), VaultError> {
    require_role(e, get_role_admin(e, role), caller, VaultError::MissingRoleAdmin)
}

pub fn grant_role(
    e: &Env,
    caller: &Address,
    role: Role,
    account: &Address,
) -> Result<(), VaultError> {
    caller.require_auth();
    reentrancy::require_unlocked(e)?;
    require_role_admin(e, caller, role)?;
    grant(e, role, account, caller);
    Ok(())
}

pub fn revoke_role(
    e: &Env,
    caller: &Address,
    role: Role,
    account: &Address,
) -> Result<(), VaultError> {
    caller.require_auth();
    reentrancy::require_unlocked(e)?;
    require_role_admin(e, caller, role)?;
    revoke(e, role, account, caller);
    Ok(())
}

/// An account may always drop its own membership.
pub fn renounce_role(e: &Env, account: &Address, role: Role) -> Result<(), VaultError> {
    account.require_auth();
    reentrancy::require_unlocked(e)?;
    revoke(e, role, account, account);
    Ok(())
}
