//! Fungible governance-rights ledger.
//!
//! [`GovernanceToken`] tracks balances and total supply for a community
//! token, with an owner-controlled pause switch, point-in-time supply
//! snapshots, and voting-power delegation records. Like the governance
//! engine it is a pure state machine: callers arrive authenticated,
//! heights arrive from the host, and failed operations change nothing.

pub mod delegation;
pub mod error;
pub mod ledger;
pub mod snapshot;

pub use delegation::{Delegation, DelegationBook};
pub use error::{Result, TokenError};
pub use ledger::{GovernanceToken, GENESIS_SUPPLY};
pub use snapshot::{Snapshot, SnapshotBook};
