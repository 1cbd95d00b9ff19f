//! Linear undo/redo history of state snapshots.

use crate::snapshot::StateSnapshot;

/// Two stacks of snapshots forming a classic linear-history editor. A new
/// undo point invalidates any redo branch; branches are not preserved.
#[derive(Debug, Default)]
pub struct History {
    undo_stack: Vec<StateSnapshot>,
    redo_stack: Vec<StateSnapshot>,
}

impl History {
    pub fn new() -> Self {
        History::default()
    }

    /// Remember `state` as the newest undo point and discard the redo
    /// branch.
    pub fn push(&mut self, state: StateSnapshot) {
        self.undo_stack.push(state);
        self.redo_stack.clear();
    }

    /// Step back: store `current` for redo and return the snapshot to
    /// restore. `None` when there is nothing to undo (and `current` is
    /// dropped untouched).
    pub fn undo(&mut self, current: StateSnapshot) -> Option<StateSnapshot> {
        if self.undo_stack.is_empty() {
            return None;
        }
        self.redo_stack.push(current);
        self.undo_stack.pop()
    }

    /// Step forward again, symmetric to [`History::undo`].
    pub fn redo(&mut self, current: StateSnapshot) -> Option<StateSnapshot> {
        if self.redo_stack.is_empty() {
            return None;
        }
        self.undo_stack.push(current);
        self.redo_stack.pop()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
