//! Error types.

use thiserror::Error;

/// Setup failure: the requested part is not one the crate can emulate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Part number outside 137412-101..=118.
    #[error("unknown slapstic number: {0}")]
    UnknownChip(u16),
    /// Part number inside the range but never found on a board.
    #[error("slapstic 137412-{0} has never been seen")]
    ReservedChip(u16),
    /// Part number string that could not be parsed.
    #[error("malformed slapstic part number: {0:?}")]
    MalformedPartNumber(String),
}

/// A snapshot that cannot be loaded into this chip.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RestoreError {
    /// Bank outside 0..=3.
    #[error("bank {0} out of range")]
    BankOutOfRange(u8),
    /// Bitwise toggle other than 0 or 3.
    #[error("bitwise toggle {0} is not 0 or 3")]
    BadToggle(u8),
    /// Snapshot was taken from a different part.
    #[error("snapshot is for slapstic 137412-{found}, chip is 137412-{expected}")]
    ChipMismatch { expected: u16, found: u16 },
}

/// ROM image that cannot be split into four banks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RomError {
    #[error("ROM size {0} is not a non-zero multiple of 4 banks of even size")]
    BadSize(usize),
}
