//! Nullable chain: deterministic block height for testing.

use rbg_types::BlockHeight;
use std::cell::Cell;

/// A deterministic block-height oracle for testing.
///
/// Height only advances when you tell it to.
pub struct NullChain {
    current: Cell<u64>,
}

impl NullChain {
    pub fn new(initial_height: u64) -> Self {
        Self {
            current: Cell::new(initial_height),
        }
    }

    /// Get the current block height.
    pub fn height(&self) -> BlockHeight {
        BlockHeight::new(self.current.get())
    }

    /// Mine `blocks` more blocks.
    pub fn advance(&self, blocks: u64) {
        self.current.set(self.current.get() + blocks);
    }

    /// Set the height to a specific value.
    pub fn set(&self, height: u64) {
        self.current.set(height);
    }
}

impl Default for NullChain {
    fn default() -> Self {
        Self::new(0)
    }
}
