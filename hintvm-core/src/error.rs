//! # Error Types for hintvm core values

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    // Value tagging errors
    #[error("Expected a field element, found address {0}")]
    ExpectedFelt(String),

    #[error("Expected an address, found field element {0}")]
    ExpectedAddress(String),

    // Address arithmetic
    #[error("Address {address} shifted by {delta} leaves its segment")]
    AddressOverflow { address: String, delta: i64 },

    #[error("Field element {0} is not a valid address offset")]
    InvalidOffset(String),

    // Hint table
    #[error("Unknown hint code: {0}")]
    UnknownHintCode(String),

    #[error("Invalid hint table: {0}")]
    InvalidHintTable(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
