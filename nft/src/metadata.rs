//! Asset token metadata.

use mgd_core::{Amount, Height};
use serde::{Deserialize, Serialize};

/// Exact length of an accepted content identifier (a CIDv0 string).
pub const CONTENT_ID_LEN: usize = 46;

/// Level every token starts at.
pub const BASE_LEVEL: u8 = 1;

/// Ceiling of the level progression.
pub const MAX_LEVEL: u8 = 10;

/// Descriptive and lifecycle state carried by each asset token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftMetadata {
    pub name: String,
    pub location: String,
    pub capacity_kw: Amount,
    pub level: u8,
    pub locked: bool,
    /// Height at which a lock lapses; zero while unlocked.
    pub locked_until: Height,
    pub content_id: String,
}
