//! ATM Engine CLI
//!
//! Interactive command-line front end for the single-branch ATM simulator.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --seed                                  # create demo accounts
//! cargo run
//! cargo run -- --accounts-file branch.dat --journal-dir logs
//! ```
//!
//! The program drives the account and admin engines through their public
//! operations: the menus only prompt, display, and loop. Demo seeding
//! recreates the store with accounts 1001 (Alice, PIN 1234, 5000.00) and
//! 1002 (Bob, PIN 4321, 3000.00).
//!
//! Log verbosity is controlled through `RUST_LOG`.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (seeding failed, terminal I/O failed, etc.)

use atm_engine::cli;
use atm_engine::core::{AccountEngine, AdminEngine, FileStore, TransactionJournal};
use atm_engine::types::AtmError;
use rust_decimal::Decimal;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::process;

/// Recreate the record store with the two demo accounts
fn seed_demo_accounts(path: &Path) -> Result<(), AtmError> {
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    let mut admin = AdminEngine::new(FileStore::new(path));
    admin.create_account(1001, "Alice", "1234", Decimal::new(500000, 2))?;
    admin.create_account(1002, "Bob", "4321", Decimal::new(300000, 2))?;
    println!("Sample accounts created: [1001/1234], [1002/4321]");
    Ok(())
}

fn main() {
    // Parse command-line arguments using clap
    let args = cli::parse_args();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if args.seed {
        if let Err(e) = seed_demo_accounts(&args.accounts_file) {
            eprintln!("Error: {e}");
            process::exit(1);
        }
        return;
    }

    let engine = AccountEngine::new(
        FileStore::new(&args.accounts_file),
        TransactionJournal::new(&args.journal_dir),
    );
    let admin = AdminEngine::new(FileStore::new(&args.accounts_file));

    if let Err(e) = cli::menu::run(engine, admin) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
