//! Admin engine
//!
//! Privileged operations over the same record store primitives the account
//! engine uses: create account, list accounts, unlock, reset PIN, and the
//! shared-secret administrator authentication.
//!
//! Admin access is an out-of-band trust boundary: a single shared password
//! verified by digest comparison, with no per-admin identity and no rate
//! limiting. It is deliberately not expanded into a session or identity
//! system.

use crate::core::hasher;
use crate::core::traits::AccountStore;
use crate::io::record_format::truncate_name;
use crate::types::{Account, AccountNumber, AtmError, MIN_PIN_LEN};
use rust_decimal::Decimal;

/// Digest of the default administrator password
pub const DEFAULT_ADMIN_DIGEST: &str =
    "240be518fabd2724ddb6f04eeb1da5967448d7e831c08c8fa822809f74c720a9";

/// Privileged account-management engine
pub struct AdminEngine<S: AccountStore> {
    store: S,
    admin_digest: String,
}

impl<S: AccountStore> AdminEngine<S> {
    /// Create an admin engine using the default administrator password digest
    pub fn new(store: S) -> Self {
        Self::with_password_digest(store, DEFAULT_ADMIN_DIGEST)
    }

    /// Create an admin engine verifying against the given password digest
    pub fn with_password_digest(store: S, admin_digest: impl Into<String>) -> Self {
        AdminEngine {
            store,
            admin_digest: admin_digest.into(),
        }
    }

    /// Verify the shared administrator password
    pub fn authenticate(&self, password: &str) -> bool {
        hasher::digest(password) == self.admin_digest
    }

    /// Create a new account and append it to the store
    ///
    /// The name is truncated to the record layout's fixed width so the
    /// returned account matches what was persisted. The account starts
    /// unlocked with a zeroed attempt counter.
    ///
    /// # Errors
    ///
    /// - `AlreadyExists` - an account with that number is already stored
    /// - `TooShort` - the PIN is under the minimum length
    /// - `PersistFailure` - the append failed
    pub fn create_account(
        &mut self,
        account_number: AccountNumber,
        name: &str,
        pin: &str,
        initial_balance: Decimal,
    ) -> Result<Account, AtmError> {
        if self.store.exists(account_number)? {
            return Err(AtmError::AlreadyExists {
                account: account_number,
            });
        }
        if pin.len() < MIN_PIN_LEN {
            return Err(AtmError::TooShort {
                min_len: MIN_PIN_LEN,
            });
        }

        let account = Account::new(
            account_number,
            truncate_name(name),
            hasher::digest(pin),
            initial_balance.round_dp(2),
        );
        self.store.append(&account)?;
        tracing::info!(account_number, name = %account.name, "account created");
        Ok(account)
    }

    /// All accounts in storage (creation) order
    pub fn list_accounts(&self) -> Result<Vec<Account>, AtmError> {
        self.store.list_all()
    }

    /// Unlock an account and zero its attempt counter
    ///
    /// # Errors
    ///
    /// - `NotFound` - no such account
    /// - `PersistFailure` - the update failed
    pub fn unlock(&mut self, account_number: AccountNumber) -> Result<Account, AtmError> {
        let mut account = self.store.lookup(account_number)?;
        account.locked = false;
        account.failed_attempts = 0;
        self.store.update(&account)?;
        tracing::info!(account_number, "account unlocked");
        Ok(account)
    }

    /// Replace an account's PIN and clear any lockout
    ///
    /// # Errors
    ///
    /// - `TooShort` - the new PIN is under the minimum length
    /// - `NotFound` - no such account
    /// - `PersistFailure` - the update failed
    pub fn reset_pin(
        &mut self,
        account_number: AccountNumber,
        new_pin: &str,
    ) -> Result<Account, AtmError> {
        if new_pin.len() < MIN_PIN_LEN {
            return Err(AtmError::TooShort {
                min_len: MIN_PIN_LEN,
            });
        }

        let mut account = self.store.lookup(account_number)?;
        account.pin_hash = hasher::digest(new_pin);
        account.failed_attempts = 0;
        account.locked = false;
        self.store.update(&account)?;
        tracing::info!(account_number, "PIN reset");
        Ok(account)
    }
}
