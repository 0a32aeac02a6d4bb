//! Token error taxonomy.

use mgd_core::Amount;
use thiserror::Error;

/// Errors returned by the token ledger. Codes (see [`TokenError::code`])
/// form their own space, separate from the governance engine's.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("caller is not the token owner")]
    Unauthorized,

    #[error("cannot delegate voting power to yourself")]
    SelfDelegation,

    #[error("token is already initialized")]
    AlreadyInitialized,

    #[error("amount must be greater than zero")]
    InvalidAmount,

    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: Amount, available: Amount },

    #[error("transfers are paused")]
    Paused,

    #[error("transfers are not paused")]
    NotPaused,

    #[error("arithmetic overflow")]
    ArithmeticOverflow,
}

impl TokenError {
    /// Stable numeric code for external callers.
    pub fn code(&self) -> u32 {
        match self {
            TokenError::Unauthorized => 100,
            TokenError::SelfDelegation => 101,
            TokenError::AlreadyInitialized => 102,
            TokenError::InvalidAmount => 103,
            TokenError::InsufficientBalance { .. } => 104,
            TokenError::Paused => 105,
            TokenError::NotPaused => 106,
            TokenError::ArithmeticOverflow => 200,
        }
    }
}

pub type Result<T> = std::result::Result<T, TokenError>;
