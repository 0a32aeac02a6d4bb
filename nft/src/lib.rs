//! Non-fungible asset registry for physical microgrids.
//!
//! Each registered grid can be represented by exactly one asset token
//! carrying descriptive metadata, a level progression, and a time lock.
//! Tokens are never burned and a grid is never rebound. Grid existence
//! is validated through [`mgd_core::GridDirectory`], so any directory
//! implementation can back the mint check.

pub mod error;
pub mod metadata;
pub mod registry;

pub use error::{NftError, Result};
pub use metadata::{NftMetadata, BASE_LEVEL, CONTENT_ID_LEN, MAX_LEVEL};
pub use registry::AssetNft;
