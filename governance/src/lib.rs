//! Reputation-weighted governance.
//!
//! Users with enough reputation create proposals; every proposal accepts
//! votes for a fixed window of blocks after creation. Each vote is weighted
//! by the voter's current reputation.
//!
//! Lifecycle: `Active` → `Inactive`, either explicitly via
//! [`GovernanceEngine::deactivate_proposal`] or implicitly once the caller's
//! block height reaches the proposal's end block. Expiry is detected lazily
//! when a vote is attempted; there is no background sweep.

pub mod config;
pub mod engine;
pub mod error;
pub mod proposal;
pub mod shared;
pub mod snapshot;
pub mod stats;

pub use config::GovernanceConfig;
pub use engine::GovernanceEngine;
pub use error::GovernanceError;
pub use proposal::{Proposal, ProposalStatus};
pub use shared::SharedGovernance;
pub use snapshot::GovernanceSnapshot;
pub use stats::GovernanceStats;
