//! Voting-power delegation records.

use std::collections::BTreeMap;

use mgd_core::{Height, Principal};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TokenError};

/// A delegation grant: one active delegate, with an optional expiry
/// height. The grant stops counting at `expires_at` itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delegation {
    pub delegate: Principal,
    pub expires_at: Option<Height>,
}

/// Per-principal delegation records. Re-delegating overwrites; grants
/// are stored as written and expiry is enforced on the read side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegationBook {
    delegations: BTreeMap<Principal, Delegation>,
}

impl DelegationBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `delegator -> delegate`, replacing any prior grant.
    /// Chains are not resolved; each principal names exactly one
    /// delegate.
    pub(crate) fn delegate(
        &mut self,
        delegator: &Principal,
        delegate: Principal,
        expires_at: Option<Height>,
    ) -> Result<()> {
        if *delegator == delegate {
            return Err(TokenError::SelfDelegation);
        }
        self.delegations.insert(
            delegator.clone(),
            Delegation {
                delegate,
                expires_at,
            },
        );
        Ok(())
    }

    /// The stored grant, whether or not it has expired.
    pub fn get(&self, delegator: &Principal) -> Option<&Delegation> {
        self.delegations.get(delegator)
    }

    /// The delegate in force at `height`; expired grants count as
    /// absent.
    pub fn active_delegate(&self, delegator: &Principal, height: Height) -> Option<&Principal> {
        let grant = self.delegations.get(delegator)?;
        match grant.expires_at {
            Some(expiry) if height >= expiry => None,
            _ => Some(&grant.delegate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Principal {
        Principal::from("ST1ALICE")
    }

    fn bob() -> Principal {
        Principal::from("ST2BOB")
    }

    #[test]
    fn grants_are_recorded_and_replaced() {
        let mut book = DelegationBook::new();
        book.delegate(&alice(), bob(), None).unwrap();
        assert_eq!(book.get(&alice()).map(|g| &g.delegate), Some(&bob()));

        let carol = Principal::from("ST3CAROL");
        book.delegate(&alice(), carol.clone(), Some(500)).unwrap();
        let grant = book.get(&alice()).unwrap();
        assert_eq!(grant.delegate, carol);
        assert_eq!(grant.expires_at, Some(500));
    }

    #[test]
    fn self_delegation_is_rejected() {
        let mut book = DelegationBook::new();
        assert_eq!(
            book.delegate(&alice(), alice(), None),
            Err(TokenError::SelfDelegation)
        );
        assert!(book.get(&alice()).is_none());
    }

    #[test]
    fn expiry_is_enforced_when_reading() {
        let mut book = DelegationBook::new();
        book.delegate(&alice(), bob(), Some(100)).unwrap();

        assert_eq!(book.active_delegate(&alice(), 99), Some(&bob()));
        assert_eq!(book.active_delegate(&alice(), 100), None);
        assert_eq!(book.active_delegate(&alice(), 101), None);
        // The raw record stays readable after expiry.
        assert!(book.get(&alice()).is_some());
    }

    #[test]
    fn open_ended_grants_never_expire() {
        let mut book = DelegationBook::new();
        book.delegate(&alice(), bob(), None).unwrap();
        assert_eq!(book.active_delegate(&alice(), Height::MAX), Some(&bob()));
    }
}
