extern crate std;

use crate::test_helpers::*;
use crate::types::OPERATIONAL_ROLES;
use crate::{Call, Role};
use soroban_sdk::testutils::{Address as _, Events as _};
use soroban_sdk::{Address, BytesN, Env, Symbol, TryFromVal, Val, Vec};

fn topic<T: TryFromVal<Env, Val>>(e: &Env, topics: &Vec<Val>, index: u32) -> T {
    T::try_from_val(e, &topics.get(index).unwrap()).unwrap()
}

fn data<T: TryFromVal<Env, Val>>(e: &Env, value: &Val) -> T {
    T::try_from_val(e, value).unwrap()
}

#[test]
fn test_schedule_emits_call_scheduled() {
    let e = Env::default();
    let s = setup(&e);

    let id = schedule_set_value(&e, &s, 7, 1);

    let (topics, value) = vault_events(&e, &s.vault, "call_scheduled")
        .pop()
        .unwrap();
    assert_eq!(topic::<BytesN<32>>(&e, &topics, 1), id);
    assert_eq!(topic::<u32>(&e, &topics, 2), 0);

    let (call, predecessor, delay, epoch): (Call, BytesN<32>, u64, u64) = data(&e, &value);
    assert_eq!(call.target, s.target);
    assert_eq!(call.function, Some(Symbol::new(&e, "set_value")));
    assert_eq!(predecessor, zero_id(&e));
    assert_eq!(delay, MIN_DELAY);
    assert_eq!(epoch, 1);

    let (salt_topics, salt_value) = vault_events(&e, &s.vault, "call_salt").pop().unwrap();
    assert_eq!(topic::<BytesN<32>>(&e, &salt_topics, 1), id);
    assert_eq!(data::<BytesN<32>>(&e, &salt_value), salt(&e, 1));
}

#[test]
fn test_zero_salt_emits_no_salt_event() {
    let e = Env::default();
    let s = setup(&e);

    s.client.schedule(
        &s.proposer,
        &set_value_call(&e, &s.target, 7),
        &zero_id(&e),
        &zero_id(&e),
        &MIN_DELAY,
    );
    assert!(vault_events(&e, &s.vault, "call_salt").is_empty());
}

#[test]
fn test_batch_emits_one_event_per_call() {
    let e = Env::default();
    let s = setup(&e);
    let calls = soroban_sdk::vec![
        &e,
        set_value_call(&e, &s.target, 1),
        set_value_call(&e, &s.target, 2),
    ];

    s.client
        .schedule_batch(&s.proposer, &calls, &zero_id(&e), &salt(&e, 1), &MIN_DELAY);

    let scheduled = vault_events(&e, &s.vault, "call_scheduled");
    assert_eq!(scheduled.len(), 2);
    let indexes: std::vec::Vec<u32> = scheduled
        .iter()
        .map(|(topics, _)| topic::<u32>(&e, topics, 2))
        .collect();
    assert_eq!(indexes, [0, 1]);
}

#[test]
fn test_execute_emits_call_executed() {
    let e = Env::default();
    let s = setup(&e);
    let id = schedule_set_value(&e, &s, 7, 1);
    advance_time(&e, MIN_DELAY);

    s.client.execute(
        &s.executor,
        &set_value_call(&e, &s.target, 7),
        &zero_id(&e),
        &salt(&e, 1),
    );

    let (topics, value) = vault_events(&e, &s.vault, "call_executed").pop().unwrap();
    assert_eq!(topic::<BytesN<32>>(&e, &topics, 1), id);
    let (target, amount, function): (Address, i128, Option<Symbol>) = data(&e, &value);
    assert_eq!(target, s.target);
    assert_eq!(amount, 0);
    assert_eq!(function, Some(Symbol::new(&e, "set_value")));
}

#[test]
fn test_cancel_emits_operation_cancelled() {
    let e = Env::default();
    let s = setup(&e);
    let id = schedule_set_value(&e, &s, 7, 1);

    s.client.cancel(&s.trigger, &id);

    let (topics, value) = vault_events(&e, &s.vault, "operation_cancelled")
        .pop()
        .unwrap();
    assert_eq!(topic::<BytesN<32>>(&e, &topics, 1), id);
    assert_eq!(data::<Address>(&e, &value), s.trigger);
}

#[test]
fn test_trigger_emits_admin_changes_and_trigger_event() {
    let e = Env::default();
    let s = setup(&e);

    s.client.trigger_recovery(&s.trigger);

    let changes = vault_events(&e, &s.vault, "role_admin_changed");
    assert_eq!(changes.len(), OPERATIONAL_ROLES.len());
    for ((topics, value), role) in changes.iter().zip(OPERATIONAL_ROLES) {
        assert_eq!(topic::<Role>(&e, topics, 1), role);
        let (previous, new_admin): (Role, Role) = data(&e, value);
        assert_eq!(previous, Role::Admin);
        assert_eq!(new_admin, Role::Recoverer);
    }

    let (topics, value) = vault_events(&e, &s.vault, "recovery_triggered")
        .pop()
        .unwrap();
    assert_eq!(topic::<Address>(&e, &topics, 1), s.trigger);
    assert_eq!(data::<u64>(&e, &value), 1);
}

#[test]
fn test_cancel_all_emits_new_epoch() {
    let e = Env::default();
    let s = setup(&e);
    s.client.trigger_recovery(&s.trigger);

    s.client.cancel_all(&s.recoverer);

    let (topics, value) = vault_events(&e, &s.vault, "all_operations_cancelled")
        .pop()
        .unwrap();
    assert_eq!(topic::<Address>(&e, &topics, 1), s.recoverer);
    assert_eq!(data::<u64>(&e, &value), 2);
}

#[test]
fn test_exit_emits_recovery_exited() {
    let e = Env::default();
    let s = setup(&e);
    s.client.trigger_recovery(&s.trigger);
    s.client.cancel_all(&s.recoverer);

    s.client.exit_recovery(&s.recoverer);

    let (topics, value) = vault_events(&e, &s.vault, "recovery_exited").pop().unwrap();
    assert_eq!(topic::<Address>(&e, &topics, 1), s.recoverer);
    assert_eq!(data::<u64>(&e, &value), 2);
}

#[test]
fn test_recovery_execute_emits_event() {
    let e = Env::default();
    let s = setup(&e);
    s.client.trigger_recovery(&s.trigger);

    s.client
        .recovery_execute(&s.recoverer, &set_value_call(&e, &s.target, 4));

    let (topics, value) = vault_events(&e, &s.vault, "recovery_execution")
        .pop()
        .unwrap();
    assert_eq!(topic::<Address>(&e, &topics, 1), s.recoverer);
    let (target, amount, function, args): (Address, i128, Option<Symbol>, Vec<Val>) =
        data(&e, &value);
    assert_eq!(target, s.target);
    assert_eq!(amount, 0);
    assert_eq!(function, Some(Symbol::new(&e, "set_value")));
    assert_eq!(args.len(), 1);
    assert_eq!(data::<u32>(&e, &args.get(0).unwrap()), 4);
}

/// Applies every `role_granted` / `role_revoked` event after the last
/// `recovery_triggered` event to `members`.
fn replay_membership(e: &Env, vault: &Address, role: Role, members: &mut std::vec::Vec<Address>) {
    let granted = Symbol::new(e, "role_granted");
    let revoked = Symbol::new(e, "role_revoked");
    let triggered = Symbol::new(e, "recovery_triggered");

    let events: std::vec::Vec<(Vec<Val>, Val)> = e
        .events()
        .all()
        .iter()
        .filter(|(contract, _, _)| contract == vault)
        .map(|(_, topics, value)| (topics, value))
        .collect();
    let start = events
        .iter()
        .rposition(|(topics, _)| topic::<Symbol>(e, topics, 0) == triggered)
        .map_or(0, |index| index + 1);

    for (topics, _) in &events[start..] {
        let name = topic::<Symbol>(e, topics, 0);
        if name != granted && name != revoked {
            continue;
        }
        if topic::<Role>(e, topics, 1) != role {
            continue;
        }
        let account = topic::<Address>(e, topics, 2);
        if name == granted {
            members.push(account);
        } else {
            members.retain(|member| *member != account);
        }
    }
}

#[test]
fn test_role_events_reconstruct_membership() {
    let e = Env::default();
    let s = setup(&e);
    let extra = Address::generate(&e);
    s.client.grant_role(&s.admin, &Role::Proposer, &extra);
    s.client.trigger_recovery(&s.trigger);

    let mut proposers: std::vec::Vec<Address> =
        s.client.get_role_members(&Role::Proposer).iter().collect();
    let mut triggers: std::vec::Vec<Address> = s
        .client
        .get_role_members(&Role::RecoveryTrigger)
        .iter()
        .collect();

    let new_proposer = Address::generate(&e);
    let new_trigger = Address::generate(&e);
    s.client
        .exit_recovery_with_rotation(&s.recoverer, &new_proposer, &new_trigger);

    replay_membership(&e, &s.vault, Role::Proposer, &mut proposers);
    replay_membership(&e, &s.vault, Role::RecoveryTrigger, &mut triggers);

    let onchain_proposers: std::vec::Vec<Address> =
        s.client.get_role_members(&Role::Proposer).iter().collect();
    let onchain_triggers: std::vec::Vec<Address> = s
        .client
        .get_role_members(&Role::RecoveryTrigger)
        .iter()
        .collect();
    assert_eq!(proposers, onchain_proposers);
    assert_eq!(triggers, onchain_triggers);
    assert_eq!(proposers, [new_proposer]);
}
