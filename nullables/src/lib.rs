//! Nullable infrastructure for deterministic testing.
//!
//! External collaborators (the block-height oracle and the persistent
//! key-value store) are abstracted behind traits or plain values. This crate
//! provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod chain;
pub mod store;

pub use chain::NullChain;
pub use store::{NullProposalStore, NullReputationStore};
