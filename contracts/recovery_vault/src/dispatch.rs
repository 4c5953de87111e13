//! Ledger dispatch: moves `Call::value` and invokes `Call::function`.
//!
//! Calls that target the vault itself do not go through the host. They run
//! the vault's self-administration entry points with the vault's own
//! authority, which is how scheduled operations and recovery executions
//! manage roles and the minimum delay.

use soroban_sdk::{log, token::TokenClient, Address, Env, Symbol, TryFromVal, Val, Vec};
use vault_errors::VaultError;

use crate::access_control;
use crate::base_timelock;
use crate::types::{Call, Role};

pub fn dispatch(e: &Env, call: &Call) -> Result<(), VaultError> {
    if call.value < 0 {
        return Err(VaultError::NegativeValue);
    }

    let vault = e.current_contract_address();
    if call.target == vault {
        return self_call(e, call);
    }

    if call.value > 0 {
        let token = crate::read_config(e)?.native_token;
        let transferred = TokenClient::new(e, &token).try_transfer(&vault, &call.target, &call.value);
        if !matches!(transferred, Ok(Ok(()))) {
            log!(e, "value transfer failed", call.target.clone(), call.value);
            return Err(VaultError::CallFailed);
        }
    }

    if let Some(function) = &call.function {
        let invoked =
            e.try_invoke_contract::<Val, VaultError>(&call.target, function, call.args.clone());
        if !matches!(invoked, Ok(Ok(_))) {
            log!(e, "call failed", call.target.clone(), function.clone());
            return Err(VaultError::CallFailed);
        }
    }

    Ok(())
}

fn self_call(e: &Env, call: &Call) -> Result<(), VaultError> {
    if call.value != 0 {
        return Err(VaultError::InvalidSelfCallArgs);
    }
    let function = call
        .function
        .clone()
        .ok_or(VaultError::UnsupportedSelfCall)?;
    let vault = e.current_contract_address();

    if function == Symbol::new(e, "grant_role") {
        let (role, account) = role_args(e, &call.args)?;
        access_control::grant(e, role, &account, &vault);
    } else if function == Symbol::new(e, "revoke_role") {
        let (role, account) = role_args(e, &call.args)?;
        access_control::revoke(e, role, &account, &vault);
    } else if function == Symbol::new(e, "update_delay") {
        if call.args.len() != 1 {
            return Err(VaultError::InvalidSelfCallArgs);
        }
        let new_delay = arg::<u64>(e, &call.args, 0)?;
        base_timelock::set_min_delay(e, new_delay)?;
    } else {
        return Err(VaultError::UnsupportedSelfCall);
    }
    Ok(())
}

fn role_args(e: &Env, args: &Vec<Val>) -> Result<(Role, Address), VaultError> {
    if args.len() != 2 {
        return Err(VaultError::InvalidSelfCallArgs);
    }
    Ok((arg::<Role>(e, args, 0)?, arg::<Address>(e, args, 1)?))
}

fn arg<T: TryFromVal<Env, Val>>(e: &Env, args: &Vec<Val>, index: u32) -> Result<T, VaultError> {
    let raw = args.get(index).ok_or(VaultError::InvalidSelfCallArgs)?;
    T::try_from_val(e, &raw).map_err(|_| VaultError::InvalidSelfCallArgs)
}
