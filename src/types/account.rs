//! Account-related types for the ATM engine
//!
//! This module defines the Account structure holding the identity and
//! financial state of one account holder.

use rust_decimal::Decimal;

/// Account number identifier
///
/// Persisted as a 4-byte integer in the record store.
pub type AccountNumber = u32;

/// Number of consecutive wrong-PIN login attempts that locks an account
pub const MAX_FAILED_ATTEMPTS: u32 = 3;

/// Minimum accepted PIN length (characters)
pub const MIN_PIN_LEN: usize = 4;

/// Identity and financial state for one account holder
///
/// Accounts are created by the admin engine (or bootstrap seeding), mutated
/// by the account and admin engines, and never deleted. The in-memory value
/// mirrors exactly one fixed-size record in the persisted store.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// Unique key, assigned at creation, immutable thereafter
    pub account_number: AccountNumber,

    /// Display name, truncated to the record layout's fixed width at creation
    pub name: String,

    /// Lowercase 64-char hex SHA-256 digest of the PIN
    ///
    /// Replaced wholesale on PIN change or admin reset, never partially
    /// updated. The plaintext PIN is never stored.
    pub pin_hash: String,

    /// Current balance, normalized to 2 decimal places
    ///
    /// Never goes negative as the direct result of a withdrawal or
    /// transfer-out: both operations pre-check the amount against the
    /// balance and reject overdrafts instead of clamping.
    pub balance: Decimal,

    /// Consecutive wrong-PIN login attempts
    ///
    /// Reset to 0 on every successful login or explicit admin unlock.
    /// Stays in `[0, MAX_FAILED_ATTEMPTS]` for an unlocked account.
    pub failed_attempts: u32,

    /// Whether login is blocked pending an admin unlock
    ///
    /// Set to true exactly when `failed_attempts` reaches
    /// `MAX_FAILED_ATTEMPTS`.
    pub locked: bool,
}

impl Account {
    /// Create a new unlocked account with a zeroed attempt counter
    pub fn new(
        account_number: AccountNumber,
        name: impl Into<String>,
        pin_hash: impl Into<String>,
        balance: Decimal,
    ) -> Self {
        Account {
            account_number,
            name: name.into(),
            pin_hash: pin_hash.into(),
            balance,
            failed_attempts: 0,
            locked: false,
        }
    }
}
