//! Governance error taxonomy.

use mgd_core::{Amount, Height};
use thiserror::Error;

/// Errors returned by the governance engine.
///
/// Each variant carries a stable numeric code (see [`DaoError::code`])
/// so embedding hosts can surface the same error space the on-chain
/// deployment exposed. The gaps in the numbering are deliberate and
/// stay reserved.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DaoError {
    #[error("caller is not authorized for this operation")]
    Unauthorized,

    #[error("no such record")]
    NotFound,

    #[error("amount must be greater than zero")]
    InvalidAmount,

    #[error("caller has already voted on this proposal")]
    AlreadyVoted,

    #[error("insufficient treasury balance: required {required}, available {available}")]
    InsufficientFunds { required: Amount, available: Amount },

    #[error("outside the allowed voting or execution window")]
    VotingEnded,

    #[error("location must be between 5 and 80 characters")]
    InvalidLocation,

    #[error("capacity below the registrable minimum")]
    InvalidCapacity,

    #[error("energy reading must be greater than zero")]
    InvalidKwh,

    #[error("reading timestamp {timestamp} is before the current height {height}")]
    InvalidTimestamp { timestamp: Height, height: Height },

    #[error("quorum not met: {yes_percent}% yes, {quorum_percent}% required")]
    QuorumNotMet { yes_percent: u64, quorum_percent: u64 },

    #[error("arithmetic overflow")]
    ArithmeticOverflow,
}

impl DaoError {
    /// Stable numeric code for external callers.
    pub fn code(&self) -> u32 {
        match self {
            DaoError::Unauthorized => 100,
            DaoError::NotFound => 101,
            DaoError::InvalidAmount => 103,
            DaoError::AlreadyVoted => 105,
            DaoError::InsufficientFunds { .. } => 106,
            DaoError::VotingEnded => 107,
            DaoError::InvalidLocation => 109,
            DaoError::InvalidCapacity => 110,
            DaoError::InvalidKwh => 111,
            DaoError::InvalidTimestamp { .. } => 113,
            DaoError::QuorumNotMet { .. } => 114,
            DaoError::ArithmeticOverflow => 200,
        }
    }
}

pub type Result<T> = std::result::Result<T, DaoError>;
