//! The asset token registry.

use std::collections::BTreeMap;

use mgd_core::{Amount, Authority, GridDirectory, GridId, Height, Principal, TokenId};
use serde::{Deserialize, Serialize};

use crate::error::{NftError, Result};
use crate::metadata::{NftMetadata, BASE_LEVEL, CONTENT_ID_LEN, MAX_LEVEL};

/// Non-fungible registry binding one asset token per physical grid.
///
/// Minting is admin-only and checks the grid against a directory;
/// everything after the mint is owner-driven. Bindings are permanent:
/// tokens are never burned and a grid is never rebound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetNft {
    admin: Authority,
    metadata_frozen: bool,
    last_token_id: TokenId,
    owners: BTreeMap<TokenId, Principal>,
    metadata: BTreeMap<TokenId, NftMetadata>,
    grid_to_token: BTreeMap<GridId, TokenId>,
}

impl AssetNft {
    pub fn new(admin: Principal) -> Self {
        AssetNft {
            admin: Authority::new(admin),
            metadata_frozen: false,
            last_token_id: 0,
            owners: BTreeMap::new(),
            metadata: BTreeMap::new(),
            grid_to_token: BTreeMap::new(),
        }
    }

    /// Mint the asset token for a registered grid, owned by the caller.
    /// Admin only; the grid must exist in `grids` and carry no token
    /// yet, and the content id must be exactly [`CONTENT_ID_LEN`]
    /// characters.
    pub fn mint(
        &mut self,
        caller: &Principal,
        grids: &dyn GridDirectory,
        grid_id: GridId,
        name: String,
        location: String,
        capacity_kw: Amount,
        content_id: String,
    ) -> Result<TokenId> {
        if !self.admin.permits(caller) {
            return Err(NftError::Unauthorized);
        }
        if !grids.contains_grid(grid_id) {
            return Err(NftError::GridNotRegistered);
        }
        if self.grid_to_token.contains_key(&grid_id) {
            return Err(NftError::AlreadyMinted);
        }
        if content_id.chars().count() != CONTENT_ID_LEN {
            return Err(NftError::InvalidMetadata);
        }
        let id = self
            .last_token_id
            .checked_add(1)
            .ok_or(NftError::ArithmeticOverflow)?;
        self.owners.insert(id, caller.clone());
        self.metadata.insert(
            id,
            NftMetadata {
                name,
                location,
                capacity_kw,
                level: BASE_LEVEL,
                locked: false,
                locked_until: 0,
                content_id,
            },
        );
        self.grid_to_token.insert(grid_id, id);
        self.last_token_id = id;
        log::info!("Asset token {} minted for grid {}", id, grid_id);
        Ok(id)
    }

    /// Hand the token to `recipient`. Owner only; blocked while locked.
    pub fn transfer(&mut self, caller: &Principal, token_id: TokenId, recipient: Principal) -> Result<()> {
        let meta = self.owned(caller, token_id)?;
        if meta.locked {
            return Err(NftError::Locked);
        }
        self.owners.insert(token_id, recipient);
        log::debug!("Asset token {} transferred", token_id);
        Ok(())
    }

    /// Lock the token for `blocks` blocks from `height`. Owner only;
    /// fails if already locked.
    pub fn lock(
        &mut self,
        caller: &Principal,
        height: Height,
        token_id: TokenId,
        blocks: Height,
    ) -> Result<()> {
        let meta = self.owned(caller, token_id)?;
        if meta.locked {
            return Err(NftError::Locked);
        }
        let locked_until = height
            .checked_add(blocks)
            .ok_or(NftError::ArithmeticOverflow)?;
        let mut updated = meta.clone();
        updated.locked = true;
        updated.locked_until = locked_until;
        self.metadata.insert(token_id, updated);
        log::debug!("Asset token {} locked until height {}", token_id, locked_until);
        Ok(())
    }

    /// Clear a lapsed lock. Owner only; fails `Locked` while the lock
    /// still runs and `NotLocked` when there is nothing to clear.
    pub fn unlock(&mut self, caller: &Principal, height: Height, token_id: TokenId) -> Result<()> {
        let meta = self.owned(caller, token_id)?;
        if !meta.locked {
            return Err(NftError::NotLocked);
        }
        if height < meta.locked_until {
            return Err(NftError::Locked);
        }
        let mut updated = meta.clone();
        updated.locked = false;
        updated.locked_until = 0;
        self.metadata.insert(token_id, updated);
        Ok(())
    }

    /// Advance the token one level. Owner only; levels stop at
    /// [`MAX_LEVEL`]. Returns the new level.
    pub fn upgrade_level(&mut self, caller: &Principal, token_id: TokenId) -> Result<u8> {
        let meta = self.owned(caller, token_id)?;
        if meta.level >= MAX_LEVEL {
            return Err(NftError::InvalidLevel);
        }
        let mut updated = meta.clone();
        updated.level += 1;
        let level = updated.level;
        self.metadata.insert(token_id, updated);
        Ok(level)
    }

    /// One-way switch recording that metadata is to be treated as
    /// final. No registry operation consults it; enforcement is left to
    /// hosts that gate metadata edits externally. Admin only.
    pub fn freeze_metadata(&mut self, caller: &Principal) -> Result<()> {
        if !self.admin.permits(caller) {
            return Err(NftError::Unauthorized);
        }
        self.metadata_frozen = true;
        log::info!("Asset metadata declared frozen");
        Ok(())
    }

    pub fn owner_of(&self, token_id: TokenId) -> Option<&Principal> {
        self.owners.get(&token_id)
    }

    pub fn metadata(&self, token_id: TokenId) -> Option<&NftMetadata> {
        self.metadata.get(&token_id)
    }

    /// The token bound to `grid_id`, if one was minted.
    pub fn token_of_grid(&self, grid_id: GridId) -> Option<TokenId> {
        self.grid_to_token.get(&grid_id).copied()
    }

    pub fn is_metadata_frozen(&self) -> bool {
        self.metadata_frozen
    }

    pub fn admin(&self) -> Option<&Principal> {
        self.admin.holder()
    }

    /// Highest id assigned so far; zero before the first mint.
    pub fn last_token_id(&self) -> TokenId {
        self.last_token_id
    }

    /// The token's metadata if `caller` owns it; `NotOwner` otherwise,
    /// including for tokens that do not exist.
    fn owned(&self, caller: &Principal, token_id: TokenId) -> Result<&NftMetadata> {
        match self.owners.get(&token_id) {
            Some(owner) if owner == caller => {
                self.metadata.get(&token_id).ok_or(NftError::NotOwner)
            }
            _ => Err(NftError::NotOwner),
        }
    }
}
