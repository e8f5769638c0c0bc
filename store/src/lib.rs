//! Abstract storage traits for reputation-based governance.
//!
//! Every storage backend (a persistent key-value store, in-memory for testing)
//! implements these traits. The governance engine depends only on the traits.

pub mod error;
pub mod proposal;
pub mod reputation;

pub use error::StoreError;
pub use proposal::ProposalStore;
pub use reputation::ReputationStore;
