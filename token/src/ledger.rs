//! The token ledger itself.

use std::collections::BTreeMap;

use mgd_core::{Amount, Authority, Height, Principal, SnapshotId};
use serde::{Deserialize, Serialize};

use crate::delegation::{Delegation, DelegationBook};
use crate::error::{Result, TokenError};
use crate::snapshot::{Snapshot, SnapshotBook};

/// Supply minted to the owner when the ledger is initialized.
pub const GENESIS_SUPPLY: Amount = 500_000_000_000;

/// Fungible governance-rights ledger.
///
/// Construction fixes the owner; `initialize` later records the token
/// metadata and mints the genesis supply, once. Transfers move balance
/// between any principals with no authorization beyond the host's
/// caller authentication; minting, pausing, and snapshots are owner
/// operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceToken {
    name: String,
    symbol: String,
    decimals: u8,
    uri: Option<String>,
    owner: Authority,
    initialized: bool,
    paused: bool,
    total_supply: Amount,
    balances: BTreeMap<Principal, Amount>,
    snapshots: SnapshotBook,
    delegations: DelegationBook,
}

impl GovernanceToken {
    /// An uninitialized ledger controlled by `owner`.
    pub fn new(owner: Principal) -> Self {
        GovernanceToken {
            name: String::new(),
            symbol: String::new(),
            decimals: 0,
            uri: None,
            owner: Authority::new(owner),
            initialized: false,
            paused: false,
            total_supply: 0,
            balances: BTreeMap::new(),
            snapshots: SnapshotBook::new(),
            delegations: DelegationBook::new(),
        }
    }

    /// One-time genesis: record the metadata and mint the fixed supply
    /// to the owner. Owner only.
    pub fn initialize(
        &mut self,
        caller: &Principal,
        name: String,
        symbol: String,
        decimals: u8,
        uri: Option<String>,
    ) -> Result<()> {
        if self.initialized {
            return Err(TokenError::AlreadyInitialized);
        }
        if !self.owner.permits(caller) {
            return Err(TokenError::Unauthorized);
        }
        let supply = self
            .total_supply
            .checked_add(GENESIS_SUPPLY)
            .ok_or(TokenError::ArithmeticOverflow)?;
        let credited = self
            .balance_of(caller)
            .checked_add(GENESIS_SUPPLY)
            .ok_or(TokenError::ArithmeticOverflow)?;

        self.name = name;
        self.symbol = symbol;
        self.decimals = decimals;
        self.uri = uri;
        self.initialized = true;
        self.total_supply = supply;
        self.balances.insert(caller.clone(), credited);
        log::info!(
            "Token initialized: {} ({}) with supply {}",
            self.name,
            self.symbol,
            GENESIS_SUPPLY
        );
        Ok(())
    }

    /// Move `amount` from the calling principal to `recipient`. Blocked
    /// while paused.
    pub fn transfer(&mut self, caller: &Principal, recipient: &Principal, amount: Amount) -> Result<()> {
        if self.paused {
            return Err(TokenError::Paused);
        }
        if amount == 0 {
            return Err(TokenError::InvalidAmount);
        }
        let available = self.balance_of(caller);
        if available < amount {
            return Err(TokenError::InsufficientBalance {
                required: amount,
                available,
            });
        }
        if caller == recipient {
            // Debit and credit cancel out; the balance stays as it is.
            return Ok(());
        }
        let credited = self
            .balance_of(recipient)
            .checked_add(amount)
            .ok_or(TokenError::ArithmeticOverflow)?;
        self.balances.insert(caller.clone(), available - amount);
        self.balances.insert(recipient.clone(), credited);
        log::debug!("Transfer: {} -> {} ({} tokens)", caller, recipient, amount);
        Ok(())
    }

    /// Mint new supply to `recipient`. Owner only; the pause switch
    /// does not apply.
    pub fn mint(&mut self, caller: &Principal, recipient: &Principal, amount: Amount) -> Result<()> {
        if !self.owner.permits(caller) {
            return Err(TokenError::Unauthorized);
        }
        if amount == 0 {
            return Err(TokenError::InvalidAmount);
        }
        let supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(TokenError::ArithmeticOverflow)?;
        let credited = self
            .balance_of(recipient)
            .checked_add(amount)
            .ok_or(TokenError::ArithmeticOverflow)?;
        self.total_supply = supply;
        self.balances.insert(recipient.clone(), credited);
        log::debug!("Mint: {} tokens to {}", amount, recipient);
        Ok(())
    }

    /// Burn from the caller's own balance. Open to any holder; the
    /// pause switch does not apply.
    pub fn burn(&mut self, caller: &Principal, amount: Amount) -> Result<()> {
        if amount == 0 {
            return Err(TokenError::InvalidAmount);
        }
        let available = self.balance_of(caller);
        if available < amount {
            return Err(TokenError::InsufficientBalance {
                required: amount,
                available,
            });
        }
        self.balances.insert(caller.clone(), available - amount);
        // Supply is the sum of balances, so it covers any single burn.
        self.total_supply -= amount;
        log::debug!("Burn: {} tokens from {}", amount, caller);
        Ok(())
    }

    /// Halt transfers. Owner only; fails if already paused.
    pub fn pause(&mut self, caller: &Principal) -> Result<()> {
        if !self.owner.permits(caller) {
            return Err(TokenError::Unauthorized);
        }
        if self.paused {
            return Err(TokenError::Paused);
        }
        self.paused = true;
        log::info!("Token transfers paused");
        Ok(())
    }

    /// Resume transfers. Owner only; fails if not paused.
    pub fn unpause(&mut self, caller: &Principal) -> Result<()> {
        if !self.owner.permits(caller) {
            return Err(TokenError::Unauthorized);
        }
        if !self.paused {
            return Err(TokenError::NotPaused);
        }
        self.paused = false;
        log::info!("Token transfers resumed");
        Ok(())
    }

    /// Record the current total supply at `height`. Owner only.
    pub fn create_snapshot(&mut self, caller: &Principal, height: Height) -> Result<SnapshotId> {
        if !self.owner.permits(caller) {
            return Err(TokenError::Unauthorized);
        }
        let id = self.snapshots.record(self.total_supply, height)?;
        log::debug!("Supply snapshot {} taken at height {}", id, height);
        Ok(id)
    }

    /// Delegate the caller's voting power, replacing any prior grant.
    pub fn delegate_voting_power(
        &mut self,
        caller: &Principal,
        delegate: Principal,
        expires_at: Option<Height>,
    ) -> Result<()> {
        self.delegations.delegate(caller, delegate, expires_at)
    }

    pub fn balance_of(&self, principal: &Principal) -> Amount {
        self.balances.get(principal).copied().unwrap_or(0)
    }

    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn owner(&self) -> Option<&Principal> {
        self.owner.holder()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    pub fn snapshot(&self, id: SnapshotId) -> Option<Snapshot> {
        self.snapshots.get(id)
    }

    pub fn delegation_of(&self, delegator: &Principal) -> Option<&Delegation> {
        self.delegations.get(delegator)
    }

    /// The delegate in force for `delegator` at `height`, if any.
    pub fn active_delegate(&self, delegator: &Principal, height: Height) -> Option<&Principal> {
        self.delegations.active_delegate(delegator, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> Principal {
        Principal::from("STOWNER")
    }

    fn holder() -> Principal {
        Principal::from("ST1HOLDER")
    }

    fn initialized_token() -> GovernanceToken {
        let mut token = GovernanceToken::new(owner());
        token
            .initialize(
                &owner(),
                "MicroGrid Governance".to_string(),
                "MGD".to_string(),
                6,
                Some("https://microgrid.example/token.json".to_string()),
            )
            .unwrap();
        token
    }

    #[test]
    fn initialization_mints_the_genesis_supply_to_the_owner() {
        let token = initialized_token();
        assert!(token.is_initialized());
        assert_eq!(token.total_supply(), GENESIS_SUPPLY);
        assert_eq!(token.balance_of(&owner()), GENESIS_SUPPLY);
        assert_eq!(token.name(), "MicroGrid Governance");
        assert_eq!(token.symbol(), "MGD");
        assert_eq!(token.decimals(), 6);
        assert_eq!(token.uri(), Some("https://microgrid.example/token.json"));
    }

    #[test]
    fn initialization_happens_once() {
        let mut token = initialized_token();
        assert_eq!(
            token.initialize(&owner(), "Again".to_string(), "AGN".to_string(), 0, None),
            Err(TokenError::AlreadyInitialized)
        );
        assert_eq!(token.total_supply(), GENESIS_SUPPLY);
    }

    #[test]
    fn only_the_owner_initializes() {
        let mut token = GovernanceToken::new(owner());
        assert_eq!(
            token.initialize(&holder(), "Rogue".to_string(), "RGU".to_string(), 0, None),
            Err(TokenError::Unauthorized)
        );
        assert!(!token.is_initialized());
    }

    #[test]
    fn transfers_move_balance() {
        let mut token = initialized_token();
        token.transfer(&owner(), &holder(), 1_000).unwrap();
        assert_eq!(token.balance_of(&holder()), 1_000);
        assert_eq!(token.balance_of(&owner()), GENESIS_SUPPLY - 1_000);
        assert_eq!(token.total_supply(), GENESIS_SUPPLY);
    }

    #[test]
    fn transfers_reject_zero_and_uncovered_amounts() {
        let mut token = initialized_token();
        assert_eq!(
            token.transfer(&owner(), &holder(), 0),
            Err(TokenError::InvalidAmount)
        );
        assert_eq!(
            token.transfer(&holder(), &owner(), 1),
            Err(TokenError::InsufficientBalance {
                required: 1,
                available: 0
            })
        );
    }

    #[test]
    fn self_transfer_changes_nothing() {
        let mut token = initialized_token();
        token.transfer(&owner(), &owner(), 5_000).unwrap();
        assert_eq!(token.balance_of(&owner()), GENESIS_SUPPLY);
        assert_eq!(token.total_supply(), GENESIS_SUPPLY);
    }

    #[test]
    fn pause_gates_transfers_only() {
        let mut token = initialized_token();
        token.transfer(&owner(), &holder(), 2_000).unwrap();
        token.pause(&owner()).unwrap();

        assert_eq!(
            token.transfer(&holder(), &owner(), 100),
            Err(TokenError::Paused)
        );
        // Mint and burn stay available while paused.
        token.mint(&owner(), &holder(), 50).unwrap();
        token.burn(&holder(), 10).unwrap();

        token.unpause(&owner()).unwrap();
        assert!(token.transfer(&holder(), &owner(), 100).is_ok());
    }

    #[test]
    fn pause_transitions_are_strict() {
        let mut token = initialized_token();
        assert_eq!(token.unpause(&owner()), Err(TokenError::NotPaused));
        token.pause(&owner()).unwrap();
        assert_eq!(token.pause(&owner()), Err(TokenError::Paused));
        assert_eq!(token.pause(&holder()), Err(TokenError::Unauthorized));
    }

    #[test]
    fn minting_is_owner_only_and_grows_supply() {
        let mut token = initialized_token();
        assert_eq!(
            token.mint(&holder(), &holder(), 100),
            Err(TokenError::Unauthorized)
        );
        token.mint(&owner(), &holder(), 100).unwrap();
        assert_eq!(token.total_supply(), GENESIS_SUPPLY + 100);
        assert_eq!(token.balance_of(&holder()), 100);
    }

    #[test]
    fn burning_is_open_to_any_holder() {
        let mut token = initialized_token();
        token.transfer(&owner(), &holder(), 500).unwrap();
        token.burn(&holder(), 200).unwrap();
        assert_eq!(token.balance_of(&holder()), 300);
        assert_eq!(token.total_supply(), GENESIS_SUPPLY - 200);

        assert_eq!(
            token.burn(&holder(), 301),
            Err(TokenError::InsufficientBalance {
                required: 301,
                available: 300
            })
        );
    }

    #[test]
    fn mint_overflow_leaves_supply_and_balances_untouched() {
        let mut token = initialized_token();
        assert_eq!(
            token.mint(&owner(), &holder(), Amount::MAX),
            Err(TokenError::ArithmeticOverflow)
        );
        assert_eq!(token.total_supply(), GENESIS_SUPPLY);
        assert_eq!(token.balance_of(&holder()), 0);
    }

    #[test]
    fn snapshots_capture_supply_at_their_height() {
        let mut token = initialized_token();
        let first = token.create_snapshot(&owner(), 100).unwrap();
        token.mint(&owner(), &holder(), 1_000).unwrap();
        let second = token.create_snapshot(&owner(), 200).unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(
            token.snapshot(first),
            Some(Snapshot {
                total_supply: GENESIS_SUPPLY,
                height: 100
            })
        );
        assert_eq!(
            token.snapshot(second).map(|s| s.total_supply),
            Some(GENESIS_SUPPLY + 1_000)
        );
        assert_eq!(
            token.create_snapshot(&holder(), 300),
            Err(TokenError::Unauthorized)
        );
    }

    #[test]
    fn delegation_goes_through_the_book() {
        let mut token = initialized_token();
        assert_eq!(
            token.delegate_voting_power(&holder(), holder(), None),
            Err(TokenError::SelfDelegation)
        );
        token
            .delegate_voting_power(&holder(), owner(), Some(1_000))
            .unwrap();
        assert_eq!(token.active_delegate(&holder(), 999), Some(&owner()));
        assert_eq!(token.active_delegate(&holder(), 1_000), None);
        assert_eq!(
            token.delegation_of(&holder()).map(|g| g.expires_at),
            Some(Some(1_000))
        );
    }
}
