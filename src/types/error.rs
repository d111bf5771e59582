//! Error types for the ATM engine
//!
//! This module defines all error conditions that can occur during account
//! operations. Every condition is recoverable at the call site: the engines
//! never terminate the process on a business-rule violation, and state is
//! left unchanged except where explicitly documented (failed-login attempt
//! counting is the one refusal path that still mutates and persists state).
//!
//! # Error Categories
//!
//! - **Business-rule violations**: insufficient funds, wrong PIN, locked
//!   account, duplicate account number, etc.
//! - **Infrastructure failures**: `PersistFailure` (store I/O) and
//!   `HashFailure` (digest backend), surfaced to the caller and never
//!   retried.

use crate::types::account::AccountNumber;
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the ATM engine
///
/// Each variant carries the context a caller needs to display a meaningful
/// refusal or to reconcile state after an infrastructure failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AtmError {
    /// No record with the given account number exists in the store
    #[error("account {account} not found")]
    NotFound {
        /// The account number that was looked up
        account: AccountNumber,
    },

    /// An account with the given number already exists
    ///
    /// Account numbers are unique across the store; creation pre-checks the
    /// key before appending.
    #[error("account {account} already exists")]
    AlreadyExists {
        /// The duplicate account number
        account: AccountNumber,
    },

    /// Amount is zero or negative
    #[error("invalid amount {amount} (must be positive)")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// Withdrawal or transfer would exceed the current balance
    ///
    /// The balance is pre-checked and left unchanged; overdrafts are
    /// rejected, not clamped.
    #[error("insufficient funds: available {available}, requested {requested}")]
    InsufficientFunds {
        /// Current balance
        available: Decimal,
        /// Requested debit amount
        requested: Decimal,
    },

    /// Supplied PIN does not match the stored digest
    ///
    /// During login the failed attempt has already been persisted when this
    /// is returned, and `attempts_remaining` reports how many tries are left
    /// before lockout. During a PIN change no counter is involved and the
    /// field is `None`.
    #[error("incorrect PIN{}", attempts_remaining.map(|n| format!(" ({n} attempts remaining)")).unwrap_or_default())]
    WrongPin {
        /// Login attempts left before the account locks, if counting applies
        attempts_remaining: Option<u32>,
    },

    /// Account is locked; login is refused regardless of PIN correctness
    #[error("account {account} is locked; contact an administrator")]
    Locked {
        /// The locked account number
        account: AccountNumber,
    },

    /// Transfer target account is locked
    #[error("target account {account} is locked")]
    TargetLocked {
        /// The locked target account number
        account: AccountNumber,
    },

    /// Transfer source and target are the same account
    #[error("cannot transfer from account {account} to itself")]
    SameAccount {
        /// The account number used on both sides
        account: AccountNumber,
    },

    /// New PIN and its confirmation do not match
    #[error("new PIN entries do not match")]
    Mismatch,

    /// PIN is shorter than the accepted minimum
    #[error("PIN too short (minimum {min_len} characters)")]
    TooShort {
        /// Minimum accepted PIN length
        min_len: usize,
    },

    /// Record store read or write failed
    ///
    /// The in-memory mutation the caller observed is discarded from its
    /// perspective; the caller must reload the account before retrying.
    #[error("storage failure: {message}")]
    PersistFailure {
        /// Description of the underlying I/O failure
        message: String,
    },

    /// Credential digest computation failed
    ///
    /// Fatal for the operation that needed the digest, never silently
    /// skipped. The SHA-256 backend in use cannot fail, so this condition is
    /// reserved for digest backends that can.
    #[error("hash failure: {message}")]
    HashFailure {
        /// Description of the digest failure
        message: String,
    },

    /// A transfer debited the sender but could neither credit the target nor
    /// roll the sender back
    ///
    /// The store is inconsistent by exactly `amount`; callers must reconcile
    /// manually.
    #[error("transfer of {amount} from {from} to {to} left the store inconsistent: sender debited, target not credited")]
    PartialTransferFailure {
        /// Debited sender account
        from: AccountNumber,
        /// Target account that was not credited
        to: AccountNumber,
        /// Amount in flight
        amount: Decimal,
    },
}

// Conversion from io::Error to AtmError
impl From<std::io::Error> for AtmError {
    fn from(error: std::io::Error) -> Self {
        AtmError::PersistFailure {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl AtmError {
    /// Create a NotFound error
    pub fn not_found(account: AccountNumber) -> Self {
        AtmError::NotFound { account }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(available: Decimal, requested: Decimal) -> Self {
        AtmError::InsufficientFunds {
            available,
            requested,
        }
    }

    /// Create a PersistFailure error
    pub fn persist(message: impl Into<String>) -> Self {
        AtmError::PersistFailure {
            message: message.into(),
        }
    }
}
