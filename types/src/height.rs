//! Block height, the time axis for proposal expiry.
//!
//! Heights are supplied by the caller on every state-changing call. The
//! governance core holds no clock of its own.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A chain block height.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockHeight(u64);

impl BlockHeight {
    pub fn new(height: u64) -> Self {
        Self(height)
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    /// This height plus `blocks`, saturating at `u64::MAX`.
    pub fn offset(&self, blocks: u64) -> Self {
        Self(self.0.saturating_add(blocks))
    }

    /// Whether a window closing at this height has closed as of `now`.
    pub fn has_passed(&self, now: BlockHeight) -> bool {
        *self <= now
    }
}

impl fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for BlockHeight {
    fn from(height: u64) -> Self {
        Self(height)
    }
}
