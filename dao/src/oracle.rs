//! Oracle-fed energy production feed.

use std::collections::BTreeMap;

use mgd_core::{Amount, Authority, GridId, Height, Principal};
use serde::{Deserialize, Serialize};

use crate::error::{DaoError, Result};

/// Production readings keyed by grid and reading timestamp.
///
/// The feed keeps the latest reading per key: re-submitting a key
/// overwrites silently. Grid ids are not checked against the registry;
/// the oracle is trusted to report only grids it actually meters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyFeed {
    oracle: Authority,
    readings: BTreeMap<GridId, BTreeMap<Height, Amount>>,
}

impl EnergyFeed {
    /// A feed with no oracle assigned; submissions are rejected until
    /// one is.
    pub fn new() -> Self {
        EnergyFeed {
            oracle: Authority::vacant(),
            readings: BTreeMap::new(),
        }
    }

    pub(crate) fn set_oracle(&mut self, oracle: Principal) {
        self.oracle.assign(oracle);
    }

    pub fn oracle(&self) -> Option<&Principal> {
        self.oracle.holder()
    }

    /// Record `kwh` produced by `grid_id` at `timestamp`. Oracle only;
    /// timestamps may not lie in the past of `height`.
    pub(crate) fn submit(
        &mut self,
        caller: &Principal,
        height: Height,
        grid_id: GridId,
        timestamp: Height,
        kwh: Amount,
    ) -> Result<()> {
        if !self.oracle.permits(caller) {
            return Err(DaoError::Unauthorized);
        }
        if timestamp < height {
            return Err(DaoError::InvalidTimestamp { timestamp, height });
        }
        if kwh == 0 {
            return Err(DaoError::InvalidKwh);
        }
        self.readings
            .entry(grid_id)
            .or_default()
            .insert(timestamp, kwh);
        log::debug!(
            "Energy reading: grid {} at {} produced {} kWh",
            grid_id,
            timestamp,
            kwh
        );
        Ok(())
    }

    /// The stored reading for `(grid_id, timestamp)`, if any.
    pub fn reading(&self, grid_id: GridId, timestamp: Height) -> Option<Amount> {
        self.readings
            .get(&grid_id)
            .and_then(|by_timestamp| by_timestamp.get(&timestamp))
            .copied()
    }
}

impl Default for EnergyFeed {
    fn default() -> Self {
        Self::new()
    }
}
