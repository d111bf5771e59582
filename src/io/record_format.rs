//! Fixed-width binary record format for persisted accounts
//!
//! This module centralizes the on-disk serialization contract, providing:
//! - Named field width and offset constants
//! - Encoding of an Account into one fixed-size record
//! - Decoding of one fixed-size record back into an Account
//!
//! All functions are pure (no I/O) for easy testing.
//!
//! # Layout
//!
//! Each record is exactly [`RECORD_LEN`] bytes, fields in order:
//!
//! | field            | width | encoding                                 |
//! |------------------|-------|------------------------------------------|
//! | account number   | 4     | u32, little-endian                       |
//! | name             | 50    | UTF-8 bytes, NUL terminator, NUL padding |
//! | PIN digest       | 65    | 64 ASCII hex chars + NUL terminator      |
//! | balance          | 8     | f64, little-endian                       |
//! | failed attempts  | 4     | u32, little-endian                       |
//! | locked flag      | 4     | u32, little-endian, 0/1                  |
//!
//! Record order in the file is append order; there is no header, checksum,
//! or version field, so any layout change requires a full-file migration.
//! Variable-length strings are truncated or NUL-padded to their fixed
//! width, never stored with a length prefix.

use crate::types::{Account, AtmError};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Fixed width of the name field, including its NUL terminator
pub const NAME_LEN: usize = 50;

/// Fixed width of the PIN digest field: 64 hex chars plus NUL terminator
pub const PIN_HASH_LEN: usize = 65;

/// Total size of one persisted account record in bytes
pub const RECORD_LEN: usize = 4 + NAME_LEN + PIN_HASH_LEN + 8 + 4 + 4;

const NUMBER_OFFSET: usize = 0;
const NAME_OFFSET: usize = 4;
const PIN_HASH_OFFSET: usize = NAME_OFFSET + NAME_LEN;
const BALANCE_OFFSET: usize = PIN_HASH_OFFSET + PIN_HASH_LEN;
const ATTEMPTS_OFFSET: usize = BALANCE_OFFSET + 8;
const LOCKED_OFFSET: usize = ATTEMPTS_OFFSET + 4;

/// Truncate a display name to the widest value the name field can hold
///
/// The field keeps one byte for the NUL terminator, so at most
/// `NAME_LEN - 1` bytes of UTF-8 survive. Truncation backs up to the nearest
/// character boundary rather than splitting a multi-byte character.
pub fn truncate_name(name: &str) -> &str {
    if name.len() < NAME_LEN {
        return name;
    }
    let mut end = NAME_LEN - 1;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}

/// Encode an account into one fixed-size record
///
/// The name is truncated to the field width; shorter strings are NUL-padded.
///
/// # Errors
///
/// Returns `PersistFailure` if the PIN digest does not fit its field or the
/// balance cannot be represented as an 8-byte float.
pub fn encode_record(account: &Account) -> Result<[u8; RECORD_LEN], AtmError> {
    let mut buf = [0u8; RECORD_LEN];

    buf[NUMBER_OFFSET..NUMBER_OFFSET + 4].copy_from_slice(&account.account_number.to_le_bytes());

    let name = truncate_name(&account.name).as_bytes();
    buf[NAME_OFFSET..NAME_OFFSET + name.len()].copy_from_slice(name);

    let pin_hash = account.pin_hash.as_bytes();
    if pin_hash.len() >= PIN_HASH_LEN {
        return Err(AtmError::persist(format!(
            "PIN digest of {} bytes exceeds the {}-byte record field",
            pin_hash.len(),
            PIN_HASH_LEN
        )));
    }
    buf[PIN_HASH_OFFSET..PIN_HASH_OFFSET + pin_hash.len()].copy_from_slice(pin_hash);

    let balance = account
        .balance
        .to_f64()
        .ok_or_else(|| AtmError::persist("balance is not representable as an 8-byte float"))?;
    buf[BALANCE_OFFSET..BALANCE_OFFSET + 8].copy_from_slice(&balance.to_le_bytes());

    buf[ATTEMPTS_OFFSET..ATTEMPTS_OFFSET + 4]
        .copy_from_slice(&account.failed_attempts.to_le_bytes());
    buf[LOCKED_OFFSET..LOCKED_OFFSET + 4]
        .copy_from_slice(&u32::from(account.locked).to_le_bytes());

    Ok(buf)
}

/// Decode one fixed-size record into an account
///
/// The balance is re-normalized to 2 decimal places after the float
/// round-trip, restoring the exact currency value that was encoded.
///
/// # Errors
///
/// Returns `PersistFailure` if a string field holds invalid UTF-8 or the
/// stored balance is not a finite number.
pub fn decode_record(buf: &[u8; RECORD_LEN]) -> Result<Account, AtmError> {
    let mut number = [0u8; 4];
    number.copy_from_slice(&buf[NUMBER_OFFSET..NUMBER_OFFSET + 4]);
    let account_number = u32::from_le_bytes(number);

    let name = read_nul_terminated(&buf[NAME_OFFSET..NAME_OFFSET + NAME_LEN], account_number)?;
    let pin_hash = read_nul_terminated(
        &buf[PIN_HASH_OFFSET..PIN_HASH_OFFSET + PIN_HASH_LEN],
        account_number,
    )?;

    let mut balance_bits = [0u8; 8];
    balance_bits.copy_from_slice(&buf[BALANCE_OFFSET..BALANCE_OFFSET + 8]);
    let balance = Decimal::from_f64_retain(f64::from_le_bytes(balance_bits))
        .ok_or_else(|| {
            AtmError::persist(format!(
                "record for account {account_number} holds a non-finite balance"
            ))
        })?
        .round_dp(2);

    let mut attempts = [0u8; 4];
    attempts.copy_from_slice(&buf[ATTEMPTS_OFFSET..ATTEMPTS_OFFSET + 4]);
    let mut locked = [0u8; 4];
    locked.copy_from_slice(&buf[LOCKED_OFFSET..LOCKED_OFFSET + 4]);

    Ok(Account {
        account_number,
        name,
        pin_hash,
        balance,
        failed_attempts: u32::from_le_bytes(attempts),
        locked: u32::from_le_bytes(locked) != 0,
    })
}

/// Read a NUL-terminated UTF-8 string out of a fixed-width field
fn read_nul_terminated(field: &[u8], account_number: u32) -> Result<String, AtmError> {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    std::str::from_utf8(&field[..end])
        .map(str::to_owned)
        .map_err(|_| {
            AtmError::persist(format!(
                "record for account {account_number} holds invalid UTF-8"
            ))
        })
}
