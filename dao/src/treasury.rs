//! Community treasury escrow.

use std::collections::BTreeMap;

use mgd_core::{Amount, Principal};
use serde::{Deserialize, Serialize};

use crate::error::{DaoError, Result};

/// Per-principal escrow balances backing proposal funding and voting
/// weight.
///
/// Balances only grow. Creating a proposal and casting a vote both
/// check a balance without debiting it, so a single deposit may back
/// any number of concurrently open proposals and votes; disbursement on
/// execution happens host-side and never touches this ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreasuryLedger {
    balances: BTreeMap<Principal, Amount>,
}

impl TreasuryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` to the caller's balance and return the amount
    /// credited.
    pub fn deposit(&mut self, caller: &Principal, amount: Amount) -> Result<Amount> {
        if amount == 0 {
            return Err(DaoError::InvalidAmount);
        }
        let updated = self
            .balance_of(caller)
            .checked_add(amount)
            .ok_or(DaoError::ArithmeticOverflow)?;
        self.balances.insert(caller.clone(), updated);
        log::debug!(
            "Treasury deposit: {} +{} (balance {})",
            caller,
            amount,
            updated
        );
        Ok(amount)
    }

    /// Current balance; zero for principals that never deposited.
    pub fn balance_of(&self, principal: &Principal) -> Amount {
        self.balances.get(principal).copied().unwrap_or(0)
    }

    /// Number of principals holding a balance.
    pub fn contributors(&self) -> usize {
        self.balances.len()
    }
}
