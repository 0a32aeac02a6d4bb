//! The assembled governance state machine.

use mgd_core::{Amount, Authority, GridId, Height, Principal, ProposalId};
use serde::{Deserialize, Serialize};

use crate::config::GovernanceConfig;
use crate::error::{DaoError, Result};
use crate::oracle::EnergyFeed;
use crate::proposals::{Proposal, ProposalEngine, ProposalPhase, Vote, VoteChoice};
use crate::registry::{Microgrid, MicrogridRegistry};
use crate::treasury::TreasuryLedger;

/// Complete governance state for one microgrid community.
///
/// The host authenticates callers, serializes operations, and supplies
/// the block height; this type owns everything else. Cross-ledger rules
/// live here (proposals consult the registry and treasury), while each
/// ledger enforces its own record-level rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MicrogridDao {
    admin: Authority,
    config: GovernanceConfig,
    treasury: TreasuryLedger,
    grids: MicrogridRegistry,
    proposals: ProposalEngine,
    feed: EnergyFeed,
}

impl MicrogridDao {
    /// A fresh community with default governance parameters, controlled
    /// by `admin`.
    pub fn new(admin: Principal) -> Self {
        Self::with_config(admin, GovernanceConfig::default())
    }

    pub fn with_config(admin: Principal, config: GovernanceConfig) -> Self {
        MicrogridDao {
            admin: Authority::new(admin),
            config,
            treasury: TreasuryLedger::new(),
            grids: MicrogridRegistry::new(),
            proposals: ProposalEngine::new(),
            feed: EnergyFeed::new(),
        }
    }

    /// Assign the trusted production oracle. Admin only.
    pub fn set_oracle(&mut self, caller: &Principal, oracle: Principal) -> Result<()> {
        if !self.admin.permits(caller) {
            return Err(DaoError::Unauthorized);
        }
        log::info!("Oracle assigned: {}", oracle);
        self.feed.set_oracle(oracle);
        Ok(())
    }

    /// Register a physical microgrid owned by the caller.
    pub fn register_microgrid(
        &mut self,
        caller: &Principal,
        height: Height,
        location: String,
        capacity_kw: Amount,
    ) -> Result<GridId> {
        self.grids.register(caller, height, location, capacity_kw)
    }

    /// Escrow funds under the caller's name. Returns the amount
    /// credited.
    pub fn deposit_treasury(&mut self, caller: &Principal, amount: Amount) -> Result<Amount> {
        self.treasury.deposit(caller, amount)
    }

    /// Open a funding proposal for a registered grid. The requested
    /// amount must already be covered by the caller's escrow balance,
    /// though nothing is debited here.
    pub fn create_proposal(
        &mut self,
        caller: &Principal,
        height: Height,
        grid_id: GridId,
        title: String,
        description: String,
        amount_stx: Amount,
    ) -> Result<ProposalId> {
        if !self.grids.contains(grid_id) {
            return Err(DaoError::NotFound);
        }
        if amount_stx == 0 {
            return Err(DaoError::InvalidAmount);
        }
        let available = self.treasury.balance_of(caller);
        if available < amount_stx {
            return Err(DaoError::InsufficientFunds {
                required: amount_stx,
                available,
            });
        }
        let id = self.proposals.open(
            caller,
            height,
            grid_id,
            title,
            description,
            amount_stx,
            self.config.voting_duration,
        )?;
        log::info!(
            "Proposal {} created by {} for grid {} ({} requested)",
            id,
            caller,
            grid_id,
            amount_stx
        );
        Ok(id)
    }

    /// Cast a weighted ballot. The weight must be covered by the
    /// caller's escrow balance at voting time.
    pub fn vote(
        &mut self,
        caller: &Principal,
        height: Height,
        proposal_id: ProposalId,
        choice: VoteChoice,
        weight: Amount,
    ) -> Result<()> {
        let collateral = self.treasury.balance_of(caller);
        self.proposals
            .cast(caller, height, proposal_id, choice, weight, collateral)?;
        log::debug!(
            "Ballot on proposal {}: {} voted {:?} with weight {}",
            proposal_id,
            caller,
            choice,
            weight
        );
        Ok(())
    }

    /// Execute a proposal whose window, delay, and quorum allow it.
    /// Deliberately open to any caller; all gating is height- and
    /// tally-based.
    pub fn execute_proposal(
        &mut self,
        caller: &Principal,
        height: Height,
        proposal_id: ProposalId,
    ) -> Result<()> {
        self.proposals.execute(
            proposal_id,
            height,
            self.config.execution_delay,
            self.config.quorum_percent,
        )?;
        log::info!(
            "Proposal {} executed at height {} (finalized by {})",
            proposal_id,
            height,
            caller
        );
        Ok(())
    }

    /// Record an oracle reading for a grid at a timestamp.
    pub fn submit_energy_reading(
        &mut self,
        caller: &Principal,
        height: Height,
        grid_id: GridId,
        timestamp: Height,
        kwh: Amount,
    ) -> Result<()> {
        self.feed.submit(caller, height, grid_id, timestamp, kwh)
    }

    pub fn admin(&self) -> Option<&Principal> {
        self.admin.holder()
    }

    pub fn oracle(&self) -> Option<&Principal> {
        self.feed.oracle()
    }

    pub fn config(&self) -> &GovernanceConfig {
        &self.config
    }

    pub fn treasury_balance(&self, principal: &Principal) -> Amount {
        self.treasury.balance_of(principal)
    }

    pub fn grid(&self, id: GridId) -> Option<&Microgrid> {
        self.grids.get(id)
    }

    /// The registry as a read-only directory, for sibling ledgers that
    /// validate grid bindings.
    pub fn grids(&self) -> &MicrogridRegistry {
        &self.grids
    }

    pub fn proposal(&self, id: ProposalId) -> Option<&Proposal> {
        self.proposals.get(id)
    }

    /// Lifecycle phase of a proposal at `height`.
    pub fn proposal_phase(&self, id: ProposalId, height: Height) -> Option<ProposalPhase> {
        self.proposals
            .get(id)
            .map(|proposal| proposal.phase(height, self.config.execution_delay))
    }

    pub fn vote_of(&self, id: ProposalId, voter: &Principal) -> Option<&Vote> {
        self.proposals.vote_of(id, voter)
    }

    pub fn energy_reading(&self, grid_id: GridId, timestamp: Height) -> Option<Amount> {
        self.feed.reading(grid_id, timestamp)
    }
}
