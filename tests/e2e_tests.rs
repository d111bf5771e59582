//! End-to-end integration tests
//!
//! These tests exercise the complete stack (admin engine, account engine,
//! file-backed record store, and transaction journal) over a temporary
//! directory, the way the interactive CLI drives it. Fresh `FileStore`
//! instances are created mid-test to verify that state survives the way it
//! would across separate process invocations.

use atm_engine::core::{hasher, AccountEngine, AdminEngine, FileStore, TransactionJournal};
use atm_engine::types::AtmError;
use rust_decimal::Decimal;
use std::path::Path;
use tempfile::tempdir;

fn engine_at(dir: &Path) -> AccountEngine<FileStore> {
    AccountEngine::new(
        FileStore::new(dir.join("accounts.dat")),
        TransactionJournal::new(dir),
    )
}

fn admin_at(dir: &Path) -> AdminEngine<FileStore> {
    AdminEngine::new(FileStore::new(dir.join("accounts.dat")))
}

#[test]
fn test_deposit_then_overdraft_scenario() {
    let dir = tempdir().unwrap();
    let mut admin = admin_at(dir.path());
    let mut engine = engine_at(dir.path());

    admin
        .create_account(2001, "Test", "7777", Decimal::new(10000, 2))
        .unwrap();

    let account = engine.login(2001, "7777").unwrap();
    let account = engine.deposit(&account, Decimal::new(5000, 2)).unwrap();
    assert_eq!(account.balance, Decimal::new(15000, 2));

    let lines = engine.mini_statement(2001, 1).unwrap();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("DEPOSIT"));
    assert!(lines[0].contains("Balance: 150.00"));

    let result = engine.withdraw(&account, Decimal::new(20000, 2));
    assert!(matches!(result, Err(AtmError::InsufficientFunds { .. })));

    // Balance is unchanged both in memory and on disk.
    assert_eq!(account.balance, Decimal::new(15000, 2));
    let reloaded = engine_at(dir.path()).login(2001, "7777").unwrap();
    assert_eq!(reloaded.balance, Decimal::new(15000, 2));
}

#[test]
fn test_transfer_scenario_conserves_balances() {
    let dir = tempdir().unwrap();
    let mut admin = admin_at(dir.path());
    let mut engine = engine_at(dir.path());

    admin
        .create_account(1001, "A", "1111", Decimal::new(50000, 2))
        .unwrap();
    admin
        .create_account(1002, "B", "2222", Decimal::new(10000, 2))
        .unwrap();

    let sender = engine.login(1001, "1111").unwrap();
    let (sender, target) = engine.transfer(&sender, 1002, Decimal::new(20000, 2)).unwrap();
    assert_eq!(sender.balance, Decimal::new(30000, 2));
    assert_eq!(target.balance, Decimal::new(30000, 2));

    let result = engine.transfer(&sender, 1002, Decimal::new(100000, 2));
    assert!(matches!(result, Err(AtmError::InsufficientFunds { .. })));

    // A fresh store sees the persisted post-transfer balances, untouched by
    // the rejected transfer.
    let accounts = admin_at(dir.path()).list_accounts().unwrap();
    assert_eq!(accounts[0].balance, Decimal::new(30000, 2));
    assert_eq!(accounts[1].balance, Decimal::new(30000, 2));

    // Both journals carry the cross-referencing notes.
    let engine = engine_at(dir.path());
    assert!(engine.mini_statement(1001, 1).unwrap()[0].contains("Note: to 1002"));
    assert!(engine.mini_statement(1002, 1).unwrap()[0].contains("Note: from 1001"));
}

#[test]
fn test_lockout_survives_restart_until_admin_unlock() {
    let dir = tempdir().unwrap();
    let mut admin = admin_at(dir.path());
    admin
        .create_account(3001, "Carol", "5555", Decimal::new(100000, 2))
        .unwrap();

    {
        let mut engine = engine_at(dir.path());
        for _ in 0..3 {
            let result = engine.login(3001, "0000");
            assert!(matches!(result, Err(AtmError::WrongPin { .. })));
        }
    }

    // A new engine over the same file still refuses, even with the right PIN.
    let mut engine = engine_at(dir.path());
    assert!(matches!(
        engine.login(3001, "5555"),
        Err(AtmError::Locked { account: 3001 })
    ));

    let unlocked = admin.unlock(3001).unwrap();
    assert_eq!(unlocked.failed_attempts, 0);

    let account = engine.login(3001, "5555").unwrap();
    assert_eq!(account.failed_attempts, 0);
}

#[test]
fn test_pin_change_persists_across_stores() {
    let dir = tempdir().unwrap();
    let mut admin = admin_at(dir.path());
    admin
        .create_account(4001, "Dan", "1234", Decimal::new(5000, 2))
        .unwrap();

    {
        let mut engine = engine_at(dir.path());
        let account = engine.login(4001, "1234").unwrap();
        engine.change_pin(&account, "1234", "9876", "9876").unwrap();
    }

    let mut engine = engine_at(dir.path());
    assert!(matches!(
        engine.login(4001, "1234"),
        Err(AtmError::WrongPin { .. })
    ));
    assert!(engine.login(4001, "9876").is_ok());
}

#[test]
fn test_admin_reset_pin_recovers_locked_account() {
    let dir = tempdir().unwrap();
    let mut admin = admin_at(dir.path());
    admin
        .create_account(5001, "Eve", "1234", Decimal::ZERO)
        .unwrap();

    let mut engine = engine_at(dir.path());
    for _ in 0..3 {
        let _ = engine.login(5001, "0000");
    }
    assert!(matches!(
        engine.login(5001, "1234"),
        Err(AtmError::Locked { .. })
    ));

    admin.reset_pin(5001, "4321").unwrap();

    let account = engine.login(5001, "4321").unwrap();
    assert_eq!(account.failed_attempts, 0);
    assert!(!account.locked);
}

#[test]
fn test_created_accounts_list_in_creation_order_with_stored_digests() {
    let dir = tempdir().unwrap();
    let mut admin = admin_at(dir.path());

    admin
        .create_account(1001, "Alice", "1234", Decimal::new(500000, 2))
        .unwrap();
    admin
        .create_account(1002, "Bob", "4321", Decimal::new(300000, 2))
        .unwrap();

    let accounts = admin.list_accounts().unwrap();
    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0].name, "Alice");
    assert_eq!(accounts[1].name, "Bob");
    assert_eq!(accounts[0].pin_hash, hasher::digest("1234"));
    assert_eq!(accounts[1].pin_hash, hasher::digest("4321"));

    assert!(matches!(
        admin.create_account(1001, "Imposter", "9999", Decimal::ZERO),
        Err(AtmError::AlreadyExists { account: 1001 })
    ));
}
