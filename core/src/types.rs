//! Ledger-wide scalars and identifiers.

/// Block height, the only clock the ledgers know. Supplied by the host
/// on every height-sensitive operation and never advanced internally.
pub type Height = u64;

/// 128-bit unsigned quantity used for balances, vote weights, token
/// supplies, capacities, and energy readings.
pub type Amount = u128;

/// Microgrid identifier, assigned sequentially from 1 on registration.
pub type GridId = u64;

/// Proposal identifier, assigned sequentially from 1 on creation.
pub type ProposalId = u64;

/// Asset token identifier, assigned sequentially from 1 on mint.
pub type TokenId = u64;

/// Supply snapshot identifier, assigned sequentially from 1.
pub type SnapshotId = u64;

/// Read-only view of the registered microgrids.
///
/// Sibling ledgers validate grid existence through this trait instead
/// of depending on the governance crate directly.
pub trait GridDirectory {
    fn contains_grid(&self, id: GridId) -> bool;
}
