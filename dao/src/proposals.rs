//! Proposal lifecycle, weighted voting, and execution gating.

use std::collections::BTreeMap;

use mgd_core::{Amount, GridId, Height, Principal, ProposalId};
use serde::{Deserialize, Serialize};

use crate::error::{DaoError, Result};

/// Ballot direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteChoice {
    Yes,
    No,
}

/// A recorded ballot. Immutable once cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub choice: VoteChoice,
    pub weight: Amount,
}

/// Where a proposal sits in its lifecycle at a given height.
///
/// There is no rejected state: a closed proposal that never reaches
/// quorum simply stays `Executable` and keeps answering quorum failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalPhase {
    /// Accepting votes.
    Open,
    /// Voting closed, execution delay still running.
    ClosedPending,
    /// Past the execution delay and not yet executed.
    Executable,
    /// Executed. Terminal.
    Executed,
}

/// A funding request for a registered microgrid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub grid_id: GridId,
    pub title: String,
    pub description: String,
    pub amount_stx: Amount,
    pub proposer: Principal,
    pub start_height: Height,
    pub end_height: Height,
    pub executed: bool,
    pub yes_votes: Amount,
    pub no_votes: Amount,
    pub total_voted: Amount,
}

impl Proposal {
    /// Lifecycle phase at `height`, given the community's execution
    /// delay. A window whose close-plus-delay exceeds the height domain
    /// never becomes executable.
    pub fn phase(&self, height: Height, execution_delay: Height) -> ProposalPhase {
        if self.executed {
            return ProposalPhase::Executed;
        }
        if height < self.end_height {
            return ProposalPhase::Open;
        }
        match self.end_height.checked_add(execution_delay) {
            Some(executable_at) if height >= executable_at => ProposalPhase::Executable,
            _ => ProposalPhase::ClosedPending,
        }
    }

    /// Integer percentage of yes weight among all weight cast, rounded
    /// down. Zero when nothing has been voted.
    pub fn yes_percent(&self) -> Result<u64> {
        if self.total_voted == 0 {
            return Ok(0);
        }
        let scaled = self
            .yes_votes
            .checked_mul(100)
            .ok_or(DaoError::ArithmeticOverflow)?;
        // yes_votes <= total_voted, so the quotient fits in 0..=100.
        Ok((scaled / self.total_voted) as u64)
    }
}

/// The proposal book: records, ballots, and the rules for moving a
/// proposal through its lifecycle.
///
/// Cross-ledger checks (grid existence, treasury collateral) belong to
/// the facade; callers pass the already-resolved collateral in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalEngine {
    last_id: ProposalId,
    proposals: BTreeMap<ProposalId, Proposal>,
    votes: BTreeMap<ProposalId, BTreeMap<Principal, Vote>>,
}

impl ProposalEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a proposal whose voting window runs `voting_duration` blocks
    /// from `height`.
    pub(crate) fn open(
        &mut self,
        proposer: &Principal,
        height: Height,
        grid_id: GridId,
        title: String,
        description: String,
        amount_stx: Amount,
        voting_duration: Height,
    ) -> Result<ProposalId> {
        let end_height = height
            .checked_add(voting_duration)
            .ok_or(DaoError::ArithmeticOverflow)?;
        let id = self
            .last_id
            .checked_add(1)
            .ok_or(DaoError::ArithmeticOverflow)?;
        self.proposals.insert(
            id,
            Proposal {
                grid_id,
                title,
                description,
                amount_stx,
                proposer: proposer.clone(),
                start_height: height,
                end_height,
                executed: false,
                yes_votes: 0,
                no_votes: 0,
                total_voted: 0,
            },
        );
        self.last_id = id;
        Ok(id)
    }

    /// Record a ballot. `collateral` is the voter's treasury balance; a
    /// vote's weight must be covered by it, but nothing is debited, so
    /// the same balance may back votes on any number of proposals.
    pub(crate) fn cast(
        &mut self,
        voter: &Principal,
        height: Height,
        id: ProposalId,
        choice: VoteChoice,
        weight: Amount,
        collateral: Amount,
    ) -> Result<()> {
        let proposal = self.proposals.get(&id).ok_or(DaoError::NotFound)?;
        if height >= proposal.end_height {
            return Err(DaoError::VotingEnded);
        }
        if self
            .votes
            .get(&id)
            .is_some_and(|ballots| ballots.contains_key(voter))
        {
            return Err(DaoError::AlreadyVoted);
        }
        if collateral < weight {
            return Err(DaoError::InsufficientFunds {
                required: weight,
                available: collateral,
            });
        }

        // Build the updated record before writing anything so tally
        // overflow leaves both maps untouched.
        let mut updated = proposal.clone();
        match choice {
            VoteChoice::Yes => {
                updated.yes_votes = updated
                    .yes_votes
                    .checked_add(weight)
                    .ok_or(DaoError::ArithmeticOverflow)?;
            }
            VoteChoice::No => {
                updated.no_votes = updated
                    .no_votes
                    .checked_add(weight)
                    .ok_or(DaoError::ArithmeticOverflow)?;
            }
        }
        updated.total_voted = updated
            .total_voted
            .checked_add(weight)
            .ok_or(DaoError::ArithmeticOverflow)?;

        self.votes
            .entry(id)
            .or_default()
            .insert(voter.clone(), Vote { choice, weight });
        self.proposals.insert(id, updated);
        Ok(())
    }

    /// Mark a proposal executed once its window, delay, and quorum all
    /// allow it. Executed proposals answer `NotFound` from then on.
    pub(crate) fn execute(
        &mut self,
        id: ProposalId,
        height: Height,
        execution_delay: Height,
        quorum_percent: u64,
    ) -> Result<()> {
        let proposal = self.proposals.get(&id).ok_or(DaoError::NotFound)?;
        match proposal.phase(height, execution_delay) {
            ProposalPhase::Executed => return Err(DaoError::NotFound),
            ProposalPhase::Open | ProposalPhase::ClosedPending => {
                return Err(DaoError::VotingEnded)
            }
            ProposalPhase::Executable => {}
        }
        let yes_percent = proposal.yes_percent()?;
        if yes_percent < quorum_percent {
            return Err(DaoError::QuorumNotMet {
                yes_percent,
                quorum_percent,
            });
        }
        let mut updated = proposal.clone();
        updated.executed = true;
        self.proposals.insert(id, updated);
        Ok(())
    }

    pub fn get(&self, id: ProposalId) -> Option<&Proposal> {
        self.proposals.get(&id)
    }

    /// The ballot `voter` cast on `id`, if any.
    pub fn vote_of(&self, id: ProposalId, voter: &Principal) -> Option<&Vote> {
        self.votes.get(&id).and_then(|ballots| ballots.get(voter))
    }

    /// Number of ballots cast on `id`.
    pub fn ballots(&self, id: ProposalId) -> usize {
        self.votes.get(&id).map_or(0, BTreeMap::len)
    }

    /// Number of proposals ever opened.
    pub fn count(&self) -> usize {
        self.proposals.len()
    }

    /// Highest id assigned so far; zero before the first proposal.
    pub fn last_id(&self) -> ProposalId {
        self.last_id
    }
}
