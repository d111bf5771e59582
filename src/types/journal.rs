//! Journal entry types for the ATM engine
//!
//! Defines the operation tags written into per-account journal lines.

/// Operation tag for a journal entry
///
/// Rendered left-padded to 10 characters in the journal line, so every entry
/// type occupies the same column width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryTag {
    /// Funds credited by a deposit
    Deposit,
    /// Funds debited by a withdrawal
    Withdraw,
    /// PIN replaced by the account holder
    PinChange,
    /// Funds debited by a transfer to another account
    TransferOut,
    /// Funds credited by a transfer from another account
    TransferIn,
}

impl EntryTag {
    /// The tag text as it appears in journal lines
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryTag::Deposit => "DEPOSIT",
            EntryTag::Withdraw => "WITHDRAW",
            EntryTag::PinChange => "PIN-CHG",
            EntryTag::TransferOut => "TRANSFER-",
            EntryTag::TransferIn => "TRANSFER+",
        }
    }
}

impl std::fmt::Display for EntryTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
