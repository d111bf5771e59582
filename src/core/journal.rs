//! Per-account transaction journal
//!
//! This module provides the TransactionJournal component that records every
//! balance-affecting event to an append-only text file, one file per account
//! number. Historical entries are never mutated or deleted.
//!
//! # Best-Effort Writes
//!
//! Journal writes never fail the caller's operation: by the time an entry is
//! written, the balance mutation has already been persisted to the record
//! store. A failed write costs log visibility only, so it is logged at WARN
//! level and swallowed.

use crate::types::{AccountNumber, AtmError, EntryTag};
use chrono::Local;
use rust_decimal::Decimal;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Append-only journal of balance-affecting events, one file per account
#[derive(Debug, Clone)]
pub struct TransactionJournal {
    dir: PathBuf,
}

impl TransactionJournal {
    /// Create a journal rooted at the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        TransactionJournal { dir: dir.into() }
    }

    /// Path of the journal file for one account
    fn log_path(&self, account_number: AccountNumber) -> PathBuf {
        self.dir.join(format!("{account_number}_log.txt"))
    }

    /// Append one journal line for an account, best-effort
    ///
    /// Formats a timestamped line, opens the per-account file in append
    /// mode, writes, and closes. A write failure is logged and dropped; it
    /// does not roll back the balance mutation that already completed.
    pub fn append(
        &self,
        account_number: AccountNumber,
        tag: EntryTag,
        amount: Decimal,
        balance_after: Decimal,
        note: &str,
    ) {
        if let Err(e) = self.try_append(account_number, tag, amount, balance_after, note) {
            tracing::warn!(
                account_number,
                tag = tag.as_str(),
                error = %e,
                "journal write failed; entry dropped"
            );
        }
    }

    fn try_append(
        &self,
        account_number: AccountNumber,
        tag: EntryTag,
        amount: Decimal,
        balance_after: Decimal,
        note: &str,
    ) -> io::Result<()> {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let mut line = format!(
            "[{timestamp}] {:<10} Amount: {amount:.2}  Balance: {balance_after:.2}",
            tag.as_str()
        );
        if !note.is_empty() {
            line.push_str("  Note: ");
            line.push_str(note);
        }
        line.push('\n');

        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(self.log_path(account_number))?;
        file.write_all(line.as_bytes())
    }

    /// The most recent `n` journal lines for an account, oldest first
    ///
    /// Reads the whole journal sequentially, retaining only the last `n`
    /// lines in a fixed-size rotating buffer, so memory stays bounded by `n`
    /// regardless of journal length. A missing journal file yields an empty
    /// result, not an error.
    pub fn tail(
        &self,
        account_number: AccountNumber,
        n: usize,
    ) -> Result<Vec<String>, AtmError> {
        if n == 0 {
            return Ok(Vec::new());
        }

        let file = match File::open(self.log_path(account_number)) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut ring = vec![String::new(); n];
        let mut count: usize = 0;
        for line in BufReader::new(file).lines() {
            ring[count % n] = line?;
            count += 1;
        }

        let to_show = count.min(n);
        let start = count - to_show;
        Ok((0..to_show)
            .map(|i| ring[(start + i) % n].clone())
            .collect())
    }

    /// Directory holding the per-account journal files
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
