//! Core trait for account storage
//!
//! This module defines the storage abstraction that lets the engines run
//! against interchangeable record stores: the file-backed production store
//! or an in-memory store for tests.

use crate::types::{Account, AccountNumber, AtmError};

/// Contract for a persisted account record store
///
/// Records are fixed-size and unordered; every operation is a full linear
/// scan, which is acceptable for a small, interactively-operated account
/// population. Key uniqueness is a caller invariant: `append` performs no
/// duplicate check, so creation flows must call `exists` first.
pub trait AccountStore {
    /// Look up the account with the given number
    ///
    /// Scans from the start and returns the first match, which by the
    /// unique-key invariant is the only one.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record with that key exists (a missing
    /// backing file reads as an empty store), or `PersistFailure` on I/O
    /// failure.
    fn lookup(&self, account_number: AccountNumber) -> Result<Account, AtmError>;

    /// Rewrite the record with the matching key in place
    ///
    /// All other records are left untouched. Callers must only update
    /// records that have already been appended.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record with that key exists, or
    /// `PersistFailure` on I/O failure.
    fn update(&mut self, account: &Account) -> Result<(), AtmError>;

    /// Append a new record at the end of the store
    ///
    /// No uniqueness enforcement: the caller must have verified the key is
    /// not a duplicate.
    ///
    /// # Errors
    ///
    /// Returns `PersistFailure` on I/O failure.
    fn append(&mut self, account: &Account) -> Result<(), AtmError>;

    /// Whether a record with the given key exists
    fn exists(&self, account_number: AccountNumber) -> Result<bool, AtmError> {
        match self.lookup(account_number) {
            Ok(_) => Ok(true),
            Err(AtmError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// All records in storage (creation) order
    ///
    /// A fresh scan on every call, not a cached cursor.
    fn list_all(&self) -> Result<Vec<Account>, AtmError>;
}
