//! Proposal storage trait.

use crate::StoreError;
use rbg_types::ProposalId;

/// Persistent storage for serialized proposal records.
///
/// Proposals are never deleted, so the trait has no delete operation.
pub trait ProposalStore {
    /// Store (or overwrite) a proposal record.
    fn put_proposal(&self, id: ProposalId, data: &[u8]) -> Result<(), StoreError>;

    /// Get a proposal record by id.
    fn get_proposal(&self, id: ProposalId) -> Result<Vec<u8>, StoreError>;

    /// All stored proposal ids in ascending order.
    fn proposal_ids(&self) -> Result<Vec<ProposalId>, StoreError>;

    /// Number of stored proposals.
    fn proposal_count(&self) -> Result<u64, StoreError>;
}
