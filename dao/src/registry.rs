//! Registry of physical microgrids.

use std::collections::BTreeMap;

use mgd_core::{Amount, GridDirectory, GridId, Height, Principal};
use serde::{Deserialize, Serialize};

use crate::error::{DaoError, Result};

/// Shortest accepted location description.
pub const MIN_LOCATION_LEN: usize = 5;
/// Longest accepted location description.
pub const MAX_LOCATION_LEN: usize = 80;
/// Smallest registrable nameplate capacity, in kilowatts.
pub const MIN_CAPACITY_KW: Amount = 10;

/// A registered community microgrid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Microgrid {
    pub owner: Principal,
    pub location: String,
    pub capacity_kw: Amount,
    pub active: bool,
    pub registered_at: Height,
}

/// Registered grids under sequential ids. Ids are never reused and
/// registrations are never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MicrogridRegistry {
    last_id: GridId,
    grids: BTreeMap<GridId, Microgrid>,
}

impl MicrogridRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a grid owned by the caller and return its id.
    /// Registration is open to any principal.
    pub fn register(
        &mut self,
        caller: &Principal,
        height: Height,
        location: String,
        capacity_kw: Amount,
    ) -> Result<GridId> {
        let len = location.chars().count();
        if !(MIN_LOCATION_LEN..=MAX_LOCATION_LEN).contains(&len) {
            return Err(DaoError::InvalidLocation);
        }
        if capacity_kw < MIN_CAPACITY_KW {
            return Err(DaoError::InvalidCapacity);
        }
        let id = self
            .last_id
            .checked_add(1)
            .ok_or(DaoError::ArithmeticOverflow)?;
        self.grids.insert(
            id,
            Microgrid {
                owner: caller.clone(),
                location,
                capacity_kw,
                active: true,
                registered_at: height,
            },
        );
        self.last_id = id;
        log::info!("Microgrid {} registered by {} ({} kW)", id, caller, capacity_kw);
        Ok(id)
    }

    pub fn get(&self, id: GridId) -> Option<&Microgrid> {
        self.grids.get(&id)
    }

    pub fn contains(&self, id: GridId) -> bool {
        self.grids.contains_key(&id)
    }

    /// Number of registered grids.
    pub fn count(&self) -> usize {
        self.grids.len()
    }

    /// Highest id assigned so far; zero before the first registration.
    pub fn last_id(&self) -> GridId {
        self.last_id
    }
}

impl GridDirectory for MicrogridRegistry {
    fn contains_grid(&self, id: GridId) -> bool {
        self.contains(id)
    }
}
