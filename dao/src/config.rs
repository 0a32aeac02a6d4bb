//! Governance parameters.

use mgd_core::Height;
use serde::{Deserialize, Serialize};

/// Default minimum percentage of yes votes among votes cast.
pub const DEFAULT_QUORUM_PERCENT: u64 = 66;

/// Default voting window in blocks (twenty days of ten-minute blocks).
pub const DEFAULT_VOTING_DURATION: Height = 2880;

/// Default delay between voting close and execution eligibility
/// (one day of ten-minute blocks).
pub const DEFAULT_EXECUTION_DELAY: Height = 144;

/// Community-wide governance parameters, fixed when the engine is
/// constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceConfig {
    /// Minimum integer percentage of yes weight among total weight cast
    /// for a proposal to execute.
    pub quorum_percent: u64,
    /// Blocks a proposal stays open for voting after creation.
    pub voting_duration: Height,
    /// Blocks after voting closes before execution becomes possible.
    pub execution_delay: Height,
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        GovernanceConfig {
            quorum_percent: DEFAULT_QUORUM_PERCENT,
            voting_duration: DEFAULT_VOTING_DURATION,
            execution_delay: DEFAULT_EXECUTION_DELAY,
        }
    }
}
