//! Bounded action queue between the input poller and the engine.
//!
//! Key events arrive between ticks; the loop collects them here and drains
//! them into the engine in arrival order. Stack-only, so a burst of key
//! repeats cannot grow memory: once full, further actions are dropped.

use arrayvec::ArrayVec;

use crate::types::GameAction;

/// Maximum actions buffered between two drains.
pub const ACTION_QUEUE_CAPACITY: usize = 32;

#[derive(Debug, Clone, Default)]
pub struct ActionQueue {
    pending: ArrayVec<GameAction, ACTION_QUEUE_CAPACITY>,
    dropped: u32,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer an action. Returns false if the queue was full and it was dropped.
    pub fn push(&mut self, action: GameAction) -> bool {
        if self.pending.try_push(action).is_err() {
            self.dropped = self.dropped.saturating_add(1);
            return false;
        }
        true
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Actions dropped because the queue was full, since creation.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Remove and yield every buffered action, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = GameAction> + '_ {
        self.pending.drain(..)
    }
}
