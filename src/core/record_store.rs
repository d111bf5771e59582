//! Account record stores
//!
//! This module provides the two implementations of the [`AccountStore`]
//! contract:
//!
//! - [`FileStore`] - production store over a flat file of fixed-size binary
//!   records. Every operation opens, scans or seeks, and closes the file
//!   within the call; no handle outlives an operation.
//! - [`MemoryStore`] - in-memory store with identical semantics, used by
//!   tests that don't care about the file layout.
//!
//! Fixed-size records make the in-place rewrite in `update` safe: the
//! matching record's byte offset is a multiple of the record length, and
//! rewriting it touches no neighbor.

use crate::core::traits::AccountStore;
use crate::io::record_format::{decode_record, encode_record, RECORD_LEN};
use crate::types::{Account, AccountNumber, AtmError};
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// File-backed account store
///
/// Holds only the path; the file itself is opened per operation and a
/// missing file reads as an empty store. There is no index and no header:
/// every lookup is a linear scan, which the interactive, single-operator
/// usage pattern keeps cheap.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store over the given record file path
    ///
    /// The file is not created until the first `append`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    /// Path of the backing record file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open the backing file for reading, treating a missing file as empty
    fn open_read(&self) -> Result<Option<File>, AtmError> {
        match File::open(&self.path) {
            Ok(file) => Ok(Some(file)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Read the next fixed-size record, returning false at end of file
///
/// A truncated trailing record also ends the scan rather than erroring,
/// matching the contract that only whole records are ever visible.
fn read_record(file: &mut File, buf: &mut [u8; RECORD_LEN]) -> Result<bool, AtmError> {
    match file.read_exact(buf) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(e.into()),
    }
}

impl AccountStore for FileStore {
    fn lookup(&self, account_number: AccountNumber) -> Result<Account, AtmError> {
        let Some(mut file) = self.open_read()? else {
            return Err(AtmError::not_found(account_number));
        };

        let mut buf = [0u8; RECORD_LEN];
        while read_record(&mut file, &mut buf)? {
            let account = decode_record(&buf)?;
            if account.account_number == account_number {
                return Ok(account);
            }
        }
        Err(AtmError::not_found(account_number))
    }

    fn update(&mut self, account: &Account) -> Result<(), AtmError> {
        let mut file = match OpenOptions::new().read(true).write(true).open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(AtmError::not_found(account.account_number));
            }
            Err(e) => return Err(e.into()),
        };

        let mut buf = [0u8; RECORD_LEN];
        let mut index: u64 = 0;
        while read_record(&mut file, &mut buf)? {
            let existing = decode_record(&buf)?;
            if existing.account_number == account.account_number {
                // Rewrite the matching record at its original offset.
                file.seek(SeekFrom::Start(index * RECORD_LEN as u64))?;
                file.write_all(&encode_record(account)?)?;
                return Ok(());
            }
            index += 1;
        }
        Err(AtmError::not_found(account.account_number))
    }

    fn append(&mut self, account: &Account) -> Result<(), AtmError> {
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;
        file.write_all(&encode_record(account)?)?;
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<Account>, AtmError> {
        let Some(mut file) = self.open_read()? else {
            return Ok(Vec::new());
        };

        let mut accounts = Vec::new();
        let mut buf = [0u8; RECORD_LEN];
        while read_record(&mut file, &mut buf)? {
            accounts.push(decode_record(&buf)?);
        }
        Ok(accounts)
    }
}

/// In-memory account store for tests
///
/// Honors the identical contract as [`FileStore`], including `NotFound` on
/// updating an absent key and append-order listing.
#[derive(Debug, Default)]
pub struct MemoryStore {
    accounts: Vec<Account>,
}

impl MemoryStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl AccountStore for MemoryStore {
    fn lookup(&self, account_number: AccountNumber) -> Result<Account, AtmError> {
        self.accounts
            .iter()
            .find(|a| a.account_number == account_number)
            .cloned()
            .ok_or_else(|| AtmError::not_found(account_number))
    }

    fn update(&mut self, account: &Account) -> Result<(), AtmError> {
        let slot = self
            .accounts
            .iter_mut()
            .find(|a| a.account_number == account.account_number)
            .ok_or_else(|| AtmError::not_found(account.account_number))?;
        *slot = account.clone();
        Ok(())
    }

    fn append(&mut self, account: &Account) -> Result<(), AtmError> {
        self.accounts.push(account.clone());
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<Account>, AtmError> {
        Ok(self.accounts.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hasher;
    use rust_decimal::Decimal;
    use tempfile::tempdir;

    fn account(number: AccountNumber, name: &str, balance: i64) -> Account {
        Account::new(number, name, hasher::digest("1234"), Decimal::new(balance, 2))
    }

    /// Contract shared by both store implementations
    fn exercise_store_contract<S: AccountStore>(store: &mut S) {
        assert!(!store.exists(1001).unwrap());
        assert!(matches!(
            store.lookup(1001),
            Err(AtmError::NotFound { account: 1001 })
        ));
        assert!(store.list_all().unwrap().is_empty());

        store.append(&account(1001, "Alice", 500000)).unwrap();
        store.append(&account(1002, "Bob", 300000)).unwrap();

        assert!(store.exists(1001).unwrap());
        assert_eq!(store.lookup(1002).unwrap().name, "Bob");

        // Update rewrites one record and leaves the other untouched.
        let mut alice = store.lookup(1001).unwrap();
        alice.balance = Decimal::new(123450, 2);
        alice.failed_attempts = 2;
        store.update(&alice).unwrap();

        assert_eq!(store.lookup(1001).unwrap(), alice);
        assert_eq!(store.lookup(1002).unwrap(), account(1002, "Bob", 300000));

        // Listing preserves append order.
        let all = store.list_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].account_number, 1001);
        assert_eq!(all[1].account_number, 1002);

        // Updating an absent key fails without appending anything.
        let ghost = account(9999, "Ghost", 0);
        assert!(matches!(
            store.update(&ghost),
            Err(AtmError::NotFound { account: 9999 })
        ));
        assert_eq!(store.list_all().unwrap().len(), 2);
    }

    #[test]
    fn test_file_store_contract() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("accounts.dat"));
        exercise_store_contract(&mut store);
    }

    #[test]
    fn test_memory_store_contract() {
        let mut store = MemoryStore::new();
        exercise_store_contract(&mut store);
    }

    #[test]
    fn test_file_store_update_preserves_file_length() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("accounts.dat");
        let mut store = FileStore::new(&path);

        for number in [1001, 1002, 1003] {
            store.append(&account(number, "Holder", 100000)).unwrap();
        }
        let len_before = std::fs::metadata(&path).unwrap().len();
        assert_eq!(len_before, 3 * RECORD_LEN as u64);

        let mut middle = store.lookup(1002).unwrap();
        middle.locked = true;
        store.update(&middle).unwrap();

        assert_eq!(std::fs::metadata(&path).unwrap().len(), len_before);
        assert!(store.lookup(1002).unwrap().locked);
        assert!(!store.lookup(1001).unwrap().locked);
        assert!(!store.lookup(1003).unwrap().locked);
    }

    #[test]
    fn test_file_store_ignores_truncated_trailing_record() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("accounts.dat");
        let mut store = FileStore::new(&path);

        store.append(&account(1001, "Alice", 500000)).unwrap();
        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        file.write_all(&[0xffu8; 10]).unwrap();
        drop(file);

        assert_eq!(store.list_all().unwrap().len(), 1);
        assert!(store.exists(1001).unwrap());
        assert!(!store.exists(1002).unwrap());
    }

    #[test]
    fn test_file_store_update_on_missing_file() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("absent.dat"));
        assert!(matches!(
            store.update(&account(1001, "Alice", 0)),
            Err(AtmError::NotFound { account: 1001 })
        ));
    }
}
