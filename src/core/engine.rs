//! Account engine
//!
//! This module provides the AccountEngine that authenticates account holders
//! and executes the balance-mutating operations, coordinating between the
//! record store and the transaction journal.
//!
//! The engine enforces business rules such as:
//! - Login lockout after repeated wrong-PIN attempts
//! - Amount validation and overdraft pre-checks before any mutation
//! - Persist-then-journal ordering for every balance mutation
//!
//! # Login State Machine
//!
//! Per account: `UNLOCKED(attempts < 3)` increments on each wrong PIN until
//! `attempts == 3` flips the account to `LOCKED`, which is terminal until an
//! admin unlock. A correct PIN from `UNLOCKED` resets the counter to 0. From
//! `LOCKED`, login is refused unconditionally and the counter is untouched.

use crate::core::hasher;
use crate::core::journal::TransactionJournal;
use crate::core::traits::AccountStore;
use crate::types::{
    Account, AccountNumber, AtmError, EntryTag, MAX_FAILED_ATTEMPTS, MIN_PIN_LEN,
};
use rust_decimal::Decimal;

/// Authentication and balance-mutation engine for account holders
///
/// Every operation validates, mutates in memory, persists to the store, and
/// only then journals, so a crash between persist and journal loses log
/// visibility but never money. On a persist failure the in-memory change is
/// discarded from the caller's perspective; the caller must reload.
pub struct AccountEngine<S: AccountStore> {
    store: S,
    journal: TransactionJournal,
}

/// Normalize a currency amount and reject non-positive values
fn validate_amount(amount: Decimal) -> Result<Decimal, AtmError> {
    let amount = amount.round_dp(2);
    if amount <= Decimal::ZERO {
        return Err(AtmError::InvalidAmount { amount });
    }
    Ok(amount)
}

impl<S: AccountStore> AccountEngine<S> {
    /// Create an engine over the given store and journal
    pub fn new(store: S, journal: TransactionJournal) -> Self {
        AccountEngine { store, journal }
    }

    /// Authenticate an account holder by account number and PIN
    ///
    /// On a wrong PIN the incremented attempt counter (and the lock, when
    /// the threshold is reached) is persisted before the refusal is
    /// returned: the failed attempt is durable even though login did not
    /// succeed. A successful login resets and persists the counter.
    ///
    /// # Errors
    ///
    /// - `NotFound` - no such account
    /// - `Locked` - refused unconditionally, regardless of PIN correctness;
    ///   no counter change
    /// - `WrongPin` - with the number of attempts remaining before lockout
    pub fn login(&mut self, account_number: AccountNumber, pin: &str) -> Result<Account, AtmError> {
        let mut account = self.store.lookup(account_number)?;

        if account.locked {
            return Err(AtmError::Locked {
                account: account_number,
            });
        }

        if hasher::digest(pin) != account.pin_hash {
            account.failed_attempts += 1;
            if account.failed_attempts >= MAX_FAILED_ATTEMPTS {
                account.locked = true;
                tracing::info!(account_number, "account locked after repeated wrong PINs");
            }
            self.store.update(&account)?;
            return Err(AtmError::WrongPin {
                attempts_remaining: Some(
                    MAX_FAILED_ATTEMPTS.saturating_sub(account.failed_attempts),
                ),
            });
        }

        if account.failed_attempts != 0 {
            account.failed_attempts = 0;
            self.store.update(&account)?;
        }
        tracing::debug!(account_number, "login succeeded");
        Ok(account)
    }

    /// Credit funds to an account
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` - amount is zero, negative, or overflows the balance
    /// - `PersistFailure` - store write failed; the caller must reload
    pub fn deposit(&mut self, account: &Account, amount: Decimal) -> Result<Account, AtmError> {
        let amount = validate_amount(amount)?;

        let mut updated = account.clone();
        updated.balance = updated
            .balance
            .checked_add(amount)
            .ok_or(AtmError::InvalidAmount { amount })?;

        self.store.update(&updated)?;
        self.journal.append(
            updated.account_number,
            EntryTag::Deposit,
            amount,
            updated.balance,
            "",
        );
        Ok(updated)
    }

    /// Debit funds from an account
    ///
    /// The balance is pre-checked: an overdraft is rejected and nothing is
    /// mutated.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` - amount is zero or negative
    /// - `InsufficientFunds` - amount exceeds the balance
    /// - `PersistFailure` - store write failed; the caller must reload
    pub fn withdraw(&mut self, account: &Account, amount: Decimal) -> Result<Account, AtmError> {
        let amount = validate_amount(amount)?;
        if amount > account.balance {
            return Err(AtmError::insufficient_funds(account.balance, amount));
        }

        let mut updated = account.clone();
        updated.balance = updated
            .balance
            .checked_sub(amount)
            .ok_or(AtmError::InvalidAmount { amount })?;

        self.store.update(&updated)?;
        self.journal.append(
            updated.account_number,
            EntryTag::Withdraw,
            amount,
            updated.balance,
            "",
        );
        Ok(updated)
    }

    /// Replace an account's PIN
    ///
    /// Verifies the current PIN (without touching the login attempt
    /// counter), requires the new PIN to be confirmed and of minimum
    /// length, then stores the new digest wholesale.
    ///
    /// # Errors
    ///
    /// - `WrongPin` - current PIN does not match; no counter change
    /// - `Mismatch` - new PIN and confirmation differ
    /// - `TooShort` - new PIN is under the minimum length
    /// - `PersistFailure` - store write failed; the caller must reload
    pub fn change_pin(
        &mut self,
        account: &Account,
        old_pin: &str,
        new_pin: &str,
        confirm_pin: &str,
    ) -> Result<Account, AtmError> {
        if hasher::digest(old_pin) != account.pin_hash {
            return Err(AtmError::WrongPin {
                attempts_remaining: None,
            });
        }
        if new_pin != confirm_pin {
            return Err(AtmError::Mismatch);
        }
        if new_pin.len() < MIN_PIN_LEN {
            return Err(AtmError::TooShort {
                min_len: MIN_PIN_LEN,
            });
        }

        let mut updated = account.clone();
        updated.pin_hash = hasher::digest(new_pin);

        self.store.update(&updated)?;
        self.journal.append(
            updated.account_number,
            EntryTag::PinChange,
            Decimal::ZERO,
            updated.balance,
            "PIN updated",
        );
        Ok(updated)
    }

    /// Move funds from one account to another
    ///
    /// Debits the sender and credits the target, persisting the sender
    /// first. If the target persist fails after the sender persist
    /// succeeded, the sender's original record is written back; only if
    /// that rollback also fails does the operation surface
    /// `PartialTransferFailure`, the one path on which sender+target
    /// balance conservation does not hold.
    ///
    /// Both sides are journaled with cross-referencing notes.
    ///
    /// # Errors
    ///
    /// - `SameAccount` - target is the sender
    /// - `NotFound` - target does not exist
    /// - `TargetLocked` - target cannot receive funds
    /// - `InvalidAmount` - amount is zero or negative
    /// - `InsufficientFunds` - amount exceeds the sender's balance
    /// - `PersistFailure` - a store write failed and state was restored
    /// - `PartialTransferFailure` - sender debited, target not credited,
    ///   rollback failed; manual reconciliation required
    pub fn transfer(
        &mut self,
        sender: &Account,
        target_number: AccountNumber,
        amount: Decimal,
    ) -> Result<(Account, Account), AtmError> {
        if target_number == sender.account_number {
            return Err(AtmError::SameAccount {
                account: target_number,
            });
        }

        let target = self.store.lookup(target_number)?;
        if target.locked {
            return Err(AtmError::TargetLocked {
                account: target_number,
            });
        }

        let amount = validate_amount(amount)?;
        if amount > sender.balance {
            return Err(AtmError::insufficient_funds(sender.balance, amount));
        }

        let mut updated_sender = sender.clone();
        updated_sender.balance = updated_sender
            .balance
            .checked_sub(amount)
            .ok_or(AtmError::InvalidAmount { amount })?;
        let mut updated_target = target.clone();
        updated_target.balance = updated_target
            .balance
            .checked_add(amount)
            .ok_or(AtmError::InvalidAmount { amount })?;

        self.store.update(&updated_sender)?;
        if let Err(target_err) = self.store.update(&updated_target) {
            // Compensate the already-persisted debit before reporting.
            return match self.store.update(sender) {
                Ok(()) => Err(target_err),
                Err(rollback_err) => {
                    tracing::error!(
                        from = sender.account_number,
                        to = target_number,
                        %amount,
                        error = %rollback_err,
                        "transfer rollback failed; store inconsistent"
                    );
                    Err(AtmError::PartialTransferFailure {
                        from: sender.account_number,
                        to: target_number,
                        amount,
                    })
                }
            };
        }

        self.journal.append(
            updated_sender.account_number,
            EntryTag::TransferOut,
            amount,
            updated_sender.balance,
            &format!("to {target_number}"),
        );
        self.journal.append(
            updated_target.account_number,
            EntryTag::TransferIn,
            amount,
            updated_target.balance,
            &format!("from {}", sender.account_number),
        );
        Ok((updated_sender, updated_target))
    }

    /// The most recent `n` journal lines for an account, oldest first
    pub fn mini_statement(
        &self,
        account_number: AccountNumber,
        n: usize,
    ) -> Result<Vec<String>, AtmError> {
        self.journal.tail(account_number, n)
    }
}
