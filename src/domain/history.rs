//! Bounded snapshot history with undo and redo.
//!
//! [`HistoryManager`] never observes edits directly. Screens keep their live
//! state outside the manager and call [`HistoryManager::push`] after every
//! semantic edit; `undo` and `redo` take the caller's live state so the
//! manager can tell whether its newest entry already describes "now".
//!
//! # Example
//!
//! ```
//! use pocket_notes::domain::HistoryManager;
//!
//! let mut history = HistoryManager::new();
//! history.push(String::new());
//! history.push("Hi".to_string());
//!
//! let restored = history.undo("Hi".to_string());
//! assert_eq!(restored, "");
//! assert_eq!(history.redo(restored), "Hi");
//! ```

use std::collections::VecDeque;

/// Default number of undo entries kept before the oldest is evicted.
pub const DEFAULT_CAPACITY: usize = 100;

/// Generic bounded undo/redo stack over comparable snapshots.
#[derive(Debug, Clone)]
pub struct HistoryManager<T> {
    undo_stack: VecDeque<T>,
    redo_stack: Vec<T>,
    capacity: usize,
}

impl<T: Clone + PartialEq> HistoryManager<T> {
    /// Creates an empty history with [`DEFAULT_CAPACITY`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty history holding at most `capacity` undo entries.
    ///
    /// A capacity of zero is raised to one so the newest state is always kept.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            undo_stack: VecDeque::with_capacity(capacity),
            redo_stack: Vec::new(),
            capacity,
        }
    }

    /// Records a snapshot of the caller's state.
    ///
    /// Skipped when it equals the newest entry. Evicts the oldest entry past
    /// capacity. The redo stack is cleared in every case.
    pub fn push(&mut self, snapshot: T) {
        if self.undo_stack.back() != Some(&snapshot) {
            self.undo_stack.push_back(snapshot);
            if self.undo_stack.len() > self.capacity {
                self.undo_stack.pop_front();
            }
        }
        self.redo_stack.clear();
    }

    /// Steps back from `current`, returning the state to restore.
    ///
    /// Returns `current` unchanged when nothing earlier is recorded.
    #[must_use]
    pub fn undo(&mut self, current: T) -> T {
        if self.undo_stack.is_empty() {
            return current;
        }

        if self.undo_stack.back() == Some(&current) {
            self.undo_stack.pop_back();
            if self.undo_stack.is_empty() {
                self.redo_stack.push(current.clone());
                return current;
            }
        }

        match self.undo_stack.pop_back() {
            Some(previous) => {
                self.redo_stack.push(current);
                previous
            }
            None => current,
        }
    }

    /// Re-applies the most recently undone state.
    ///
    /// Returns `current` unchanged when the redo stack is empty.
    #[must_use]
    pub fn redo(&mut self, current: T) -> T {
        let Some(next) = self.redo_stack.pop() else {
            return current;
        };
        self.undo_stack.push_back(current);
        if self.undo_stack.len() > self.capacity {
            self.undo_stack.pop_front();
        }
        next
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of recorded undo entries.
    #[must_use]
    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of recorded redo entries.
    #[must_use]
    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates the undo entries from oldest to newest.
    pub fn undo_entries(&self) -> impl Iterator<Item = &T> {
        self.undo_stack.iter()
    }

    /// Forgets every recorded state.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl<T: Clone + PartialEq> Default for HistoryManager<T> {
    fn default() -> Self {
        Self::new()
    }
}
