//! Governance engine for community-owned microgrids.
//!
//! [`MicrogridDao`] bundles four ledgers behind one facade: an escrow
//! treasury, a registry of physical grids, a proposal book with weighted
//! voting and delayed execution, and an oracle-fed energy production
//! feed. Every operation takes the authenticated caller and the current
//! block height explicitly; the engine holds no clock, performs no I/O,
//! and validates each call fully before mutating, so an error always
//! means untouched state.
//!
//! Persistence belongs to the host. [`storage::StateStore`] is the seam:
//! checkpoint the whole state after each successful operation and replay
//! it on restart.

pub mod config;
pub mod error;
pub mod oracle;
pub mod proposals;
pub mod registry;
pub mod state;
pub mod storage;
pub mod treasury;

pub use config::GovernanceConfig;
pub use error::{DaoError, Result};
pub use oracle::EnergyFeed;
pub use proposals::{Proposal, ProposalEngine, ProposalPhase, Vote, VoteChoice};
pub use registry::{Microgrid, MicrogridRegistry};
pub use state::MicrogridDao;
pub use storage::{InMemoryStore, StateStore};
pub use treasury::TreasuryLedger;
