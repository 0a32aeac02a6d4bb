//! Asset registry error taxonomy.

use thiserror::Error;

/// Errors returned by the asset registry. Codes (see [`NftError::code`])
/// form their own space, separate from the other ledgers'.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NftError {
    #[error("caller is not the registry admin")]
    Unauthorized,

    #[error("caller does not own this token")]
    NotOwner,

    #[error("an asset token is already bound to this grid")]
    AlreadyMinted,

    #[error("grid is not registered")]
    GridNotRegistered,

    #[error("invalid token metadata")]
    InvalidMetadata,

    #[error("asset is locked")]
    Locked,

    #[error("asset is not locked")]
    NotLocked,

    #[error("level is outside the allowed progression")]
    InvalidLevel,

    #[error("arithmetic overflow")]
    ArithmeticOverflow,
}

impl NftError {
    /// Stable numeric code for external callers.
    pub fn code(&self) -> u32 {
        match self {
            NftError::Unauthorized => 100,
            NftError::NotOwner => 101,
            NftError::AlreadyMinted => 102,
            NftError::GridNotRegistered => 103,
            NftError::InvalidMetadata => 104,
            NftError::Locked => 105,
            NftError::NotLocked => 106,
            NftError::InvalidLevel => 107,
            NftError::ArithmeticOverflow => 200,
        }
    }
}

pub type Result<T> = std::result::Result<T, NftError>;
