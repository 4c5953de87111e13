#![no_std]

use soroban_sdk::contracterror;

/// @title  ErrorCategory
/// @notice Groups vault errors by domain for monitoring, alerting, and dashboards.
/// @dev    Off-chain consumers should switch on this value first, then on the
///         specific `VaultError` code for fine-grained handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Contract setup and initialization errors (codes 1-99).
    Initialization,
    /// Caller role and permission errors (codes 100-199).
    Authorization,
    /// Normal/recovery mode guard errors (codes 200-299).
    Mode,
    /// Malformed input errors (codes 300-399).
    Validation,
    /// Timelock operation lifecycle and dispatch errors (codes 400-499).
    Operation,
    /// Safe-math errors (codes 700-799).
    Arithmetic,
}

/// @title  VaultError
/// @notice Canonical error enum of the recovery vault.
/// @dev    Codes are wire-stable. Never renumber a variant after deployment.
///         Append new variants at the end of their category block only.
///         Use the ErrorExt trait to retrieve the category and description.
///
/// Error Code Layout:
///   1  -  99  : Initialization
///   100 - 199 : Authorization
///   200 - 299 : Mode
///   300 - 399 : Validation
///   400 - 499 : Operation
///   700 - 799 : Arithmetic
#[contracterror]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum VaultError {
    // --- Initialization (1-99) ---
    /// Vault has not been initialized yet.
    NotInitialized = 1,

    /// Vault has already been initialized and cannot be re-initialized.
    AlreadyInitialized = 2,

    // --- Authorization (100-199) ---
    /// Caller does not hold the Proposer role.
    NotProposer = 100,

    /// Executor role is restricted and the caller does not hold it.
    NotExecutor = 101,

    /// Caller holds neither the Proposer nor the RecoveryTrigger role.
    /// Raised by `cancel`.
    NotProposerOrRecoveryTrigger = 102,

    /// Caller does not hold the RecoveryTrigger role.
    NotRecoveryTrigger = 103,

    /// Caller does not hold the Recoverer role.
    NotRecoverer = 104,

    /// Caller does not hold the admin role of the role being granted or revoked.
    MissingRoleAdmin = 105,

    // --- Mode (200-299) ---
    /// Scheduling and execution are frozen while recovery mode is active.
    CannotPerformInRecoveryMode = 200,

    /// The operation is only available while recovery mode is active.
    NotInRecoveryMode = 201,

    /// Reentrancy was detected; the call is rejected.
    ReentrancyDetected = 202,

    // --- Validation (300-399) ---
    /// The null principal was supplied where a real account is required.
    ZeroAddress = 300,

    /// A batch must contain at least one call.
    EmptyBatch = 301,

    /// Native value attached to a call cannot be negative.
    NegativeValue = 302,

    /// A call targeting the vault itself names an unknown entry point.
    UnsupportedSelfCall = 303,

    /// A call targeting the vault itself carries malformed arguments.
    InvalidSelfCallArgs = 304,

    // --- Operation (400-499) ---
    /// Requested delay is below the vault's minimum delay.
    InsufficientDelay = 400,

    /// An operation with this fingerprint is already pending or done.
    OperationAlreadyScheduled = 401,

    /// No operation with this fingerprint has been scheduled.
    OperationNotScheduled = 402,

    /// The operation is still waiting for its delay to elapse. Transient.
    OperationNotReady = 403,

    /// The operation has already been executed.
    OperationAlreadyDone = 404,

    /// The operation was invalidated by an epoch advance and must be
    /// rescheduled from scratch. Permanent.
    OperationInvalidated = 405,

    /// Cancel requires a Waiting or Ready operation.
    OperationNotPending = 406,

    /// The predecessor operation has not been executed yet. Transient.
    MissingDependency = 407,

    /// The dispatched call (or its value transfer) failed.
    CallFailed = 408,

    /// Only invalidated, never-executed operations can be purged.
    OperationNotStale = 409,

    // --- Arithmetic (700-799) ---
    /// Integer overflow detected during a checked arithmetic operation.
    Overflow = 700,
}

/// @title  ErrorExt
/// @notice Provides category(), description() and is_transient() on every
///         VaultError variant.
/// @dev    Use this for structured logging, monitoring, and off-chain display.
pub trait ErrorExt {
    /// @return The ErrorCategory bucket this error belongs to.
    fn category(&self) -> ErrorCategory;

    /// @return A static string description safe for logging or display.
    fn description(&self) -> &'static str;

    /// @return True when resubmitting the same call later may succeed.
    fn is_transient(&self) -> bool;
}

impl ErrorExt for VaultError {
    fn category(&self) -> ErrorCategory {
        match self {
            VaultError::NotInitialized | VaultError::AlreadyInitialized => {
                ErrorCategory::Initialization
            }

            VaultError::NotProposer
            | VaultError::NotExecutor
            | VaultError::NotProposerOrRecoveryTrigger
            | VaultError::NotRecoveryTrigger
            | VaultError::NotRecoverer
            | VaultError::MissingRoleAdmin => ErrorCategory::Authorization,

            VaultError::CannotPerformInRecoveryMode
            | VaultError::NotInRecoveryMode
            | VaultError::ReentrancyDetected => ErrorCategory::Mode,

            VaultError::ZeroAddress
            | VaultError::EmptyBatch
            | VaultError::NegativeValue
            | VaultError::UnsupportedSelfCall
            | VaultError::InvalidSelfCallArgs => ErrorCategory::Validation,

            VaultError::InsufficientDelay
            | VaultError::OperationAlreadyScheduled
            | VaultError::OperationNotScheduled
            | VaultError::OperationNotReady
            | VaultError::OperationAlreadyDone
            | VaultError::OperationInvalidated
            | VaultError::OperationNotPending
            | VaultError::MissingDependency
            | VaultError::CallFailed
            | VaultError::OperationNotStale => ErrorCategory::Operation,

            VaultError::Overflow => ErrorCategory::Arithmetic,
        }
    }

    fn description(&self) -> &'static str {
        match self {
            VaultError::NotInitialized => "Vault has not been initialized",
            VaultError::AlreadyInitialized => "Vault has already been initialized",
            VaultError::NotProposer => "Caller is not a proposer",
            VaultError::NotExecutor => "Caller is not an executor",
            VaultError::NotProposerOrRecoveryTrigger => {
                "Caller is neither a proposer nor a recovery trigger"
            }
            VaultError::NotRecoveryTrigger => "Caller is not a recovery trigger",
            VaultError::NotRecoverer => "Caller is not a recoverer",
            VaultError::MissingRoleAdmin => "Caller does not hold the admin role for this role",
            VaultError::CannotPerformInRecoveryMode => "Operation is frozen in recovery mode",
            VaultError::NotInRecoveryMode => "Vault is not in recovery mode",
            VaultError::ReentrancyDetected => "Reentrancy detected; call rejected",
            VaultError::ZeroAddress => "Null principal is not allowed here",
            VaultError::EmptyBatch => "Batch must contain at least one call",
            VaultError::NegativeValue => "Call value cannot be negative",
            VaultError::UnsupportedSelfCall => "Unknown vault entry point in self call",
            VaultError::InvalidSelfCallArgs => "Malformed arguments in self call",
            VaultError::InsufficientDelay => "Delay is below the minimum delay",
            VaultError::OperationAlreadyScheduled => "Operation is already scheduled",
            VaultError::OperationNotScheduled => "Operation has not been scheduled",
            VaultError::OperationNotReady => "Operation delay has not elapsed yet",
            VaultError::OperationAlreadyDone => "Operation has already been executed",
            VaultError::OperationInvalidated => {
                "Operation was invalidated by recovery and must be rescheduled"
            }
            VaultError::OperationNotPending => "Operation is not pending",
            VaultError::MissingDependency => "Predecessor operation has not been executed",
            VaultError::CallFailed => "Dispatched call failed",
            VaultError::OperationNotStale => "Operation is not invalidated",
            VaultError::Overflow => "Integer overflow in checked arithmetic",
        }
    }

    fn is_transient(&self) -> bool {
        matches!(
            self,
            VaultError::OperationNotReady | VaultError::MissingDependency
        )
    }
}
