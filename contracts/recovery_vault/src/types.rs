use soroban_sdk::{contracttype, Address, BytesN, Symbol, Val, Vec};

/// One (target, value, payload) triple.
///
/// `function = None` makes the call a plain value transfer, which lets the
/// target be an account rather than a contract.
#[contracttype]
#[derive(Clone, Debug)]
pub struct Call {
    /// Contract or account receiving the call.
    pub target: Address,
    /// Entry point to invoke on `target`, if any.
    pub function: Option<Symbol>,
    /// Arguments passed to `function`.
    pub args: Vec<Val>,
    /// Amount of the vault's native token sent to `target` before invoking.
    pub value: i128,
}

/// Externally visible classification of an operation.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OperationState {
    /// Never scheduled, cancelled, or invalidated by an epoch advance.
    Unset = 0,
    /// Scheduled; the delay has not elapsed.
    Waiting = 1,
    /// Scheduled; the delay has elapsed.
    Ready = 2,
    /// Executed.
    Done = 3,
}

/// Roles known to the vault. `Admin` is the root role.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Role {
    Admin = 0,
    Proposer = 1,
    Executor = 2,
    Canceller = 3,
    RecoveryTrigger = 4,
    Recoverer = 5,
}

/// The roles whose administration moves to `Recoverer` during recovery.
pub const OPERATIONAL_ROLES: [Role; 4] = [
    Role::Proposer,
    Role::Executor,
    Role::Canceller,
    Role::RecoveryTrigger,
];

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VaultMode {
    Normal = 0,
    Recovery = 1,
}

/// Static configuration written once by `initialize`. `min_delay` is the only
/// field that changes afterwards, and only through a self call.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VaultConfig {
    /// Minimum delay in seconds accepted by `schedule`.
    pub min_delay: u64,
    /// Token used to move `Call::value`.
    pub native_token: Address,
    /// Advance the epoch as part of `trigger_recovery`.
    pub invalidate_on_trigger: bool,
    /// Drop the epoch stamp of an operation once it has been executed.
    pub prune_stamps_on_execute: bool,
}

/// Initial role assignment and configuration.
#[contracttype]
#[derive(Clone, Debug)]
pub struct InitParams {
    pub min_delay: u64,
    pub native_token: Address,
    pub proposers: Vec<Address>,
    /// Pass only the null principal to leave execution open to everyone.
    pub executors: Vec<Address>,
    pub cancellers: Vec<Address>,
    pub recovery_triggers: Vec<Address>,
    pub recoverers: Vec<Address>,
    pub invalidate_on_trigger: bool,
    pub prune_stamps_on_execute: bool,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    // Instance storage.
    /// VaultConfig.
    Config,
    /// Current VaultMode.
    Mode,
    /// Current epoch (u64).
    Epoch,
    /// Reentrancy lock flag.
    Locked,
    /// Admin role of a role.
    RoleAdmin(Role),

    // Persistent storage, TTL extended on every touch.
    /// Operation record per id: scheduled with its ready timestamp, or done.
    Timestamp(BytesN<32>),
    /// Epoch stamp per operation: id -> u64.
    OpEpoch(BytesN<32>),
    /// Membership flag: (role, account) -> true.
    RoleMember(Role, Address),
    /// Members of a role, in grant order.
    RoleMembers(Role),
}
