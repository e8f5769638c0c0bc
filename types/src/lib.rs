//! Fundamental types for reputation-based governance.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! user identities, proposal ids, block heights, and the fixed governance constants.

pub mod height;
pub mod id;
pub mod params;
pub mod user;

pub use height::BlockHeight;
pub use id::ProposalId;
pub use params::{PROPOSAL_REPUTATION_THRESHOLD, SEED_REPUTATION, VOTING_WINDOW_BLOCKS};
pub use user::UserId;
