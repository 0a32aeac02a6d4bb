//! Shared building blocks for the MicroGrid DAO ledgers.
//!
//! Every ledger in the workspace is a plain state machine: the host
//! authenticates a caller, reads the current block height, and passes
//! both into each operation. This crate holds the pieces those state
//! machines share: principal identities, the height/amount scalars,
//! sequential identifiers, and the authority slots behind privileged
//! operations.

pub mod access;
pub mod principal;
pub mod types;

pub use access::Authority;
pub use principal::Principal;
pub use types::{Amount, GridDirectory, GridId, Height, ProposalId, SnapshotId, TokenId};
