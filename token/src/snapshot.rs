//! Point-in-time supply snapshots.

use std::collections::BTreeMap;

use mgd_core::{Amount, Height, SnapshotId};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TokenError};

/// Total supply as recorded at a height. Immutable once taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub total_supply: Amount,
    pub height: Height,
}

/// Sequentially numbered snapshots; ids are never reused.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotBook {
    last_id: SnapshotId,
    snapshots: BTreeMap<SnapshotId, Snapshot>,
}

impl SnapshotBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `total_supply` at `height` and return the new id.
    pub(crate) fn record(&mut self, total_supply: Amount, height: Height) -> Result<SnapshotId> {
        let id = self
            .last_id
            .checked_add(1)
            .ok_or(TokenError::ArithmeticOverflow)?;
        self.snapshots.insert(
            id,
            Snapshot {
                total_supply,
                height,
            },
        );
        self.last_id = id;
        Ok(id)
    }

    pub fn get(&self, id: SnapshotId) -> Option<Snapshot> {
        self.snapshots.get(&id).copied()
    }

    /// Highest id assigned so far; zero before the first snapshot.
    pub fn last_id(&self) -> SnapshotId {
        self.last_id
    }
}
