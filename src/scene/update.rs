use bitflags::bitflags;

use crate::scene::ObjectId;

bitflags! {
    /// What kind of change an [`Update`] reports.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct UpdateAction: u32 {
        const ADDED        = 1 << 0;
        const REMOVED      = 1 << 1;
        const BBOX_UPDATED = 1 << 2;
        const MODIFIED     = 1 << 3;
    }
}

/// Update token threaded through an upward propagation walk.
///
/// Every object visited by the walk is pushed onto `path` before its
/// listeners run and popped once all of its owners have been visited, so a
/// listener always sees the chain from the mutated object (`origin`) up to
/// itself (`current`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Update {
    action: UpdateAction,
    path: Vec<ObjectId>,
}

impl Update {
    #[must_use]
    pub fn new(action: UpdateAction) -> Self {
        Self {
            action,
            path: Vec::new(),
        }
    }

    pub fn action(&self) -> UpdateAction {
        self.action
    }

    pub fn set_action(&mut self, action: UpdateAction) {
        self.action = action;
    }

    pub fn path(&self) -> &[ObjectId] {
        &self.path
    }

    /// The object the update started from.
    pub fn origin(&self) -> Option<ObjectId> {
        self.path.first().copied()
    }

    /// The object whose listeners are currently running.
    pub fn current(&self) -> Option<ObjectId> {
        self.path.last().copied()
    }

    pub fn push(&mut self, id: ObjectId) {
        self.path.push(id);
    }

    pub fn pop(&mut self) -> Option<ObjectId> {
        self.path.pop()
    }

    pub fn clear_path(&mut self) {
        self.path.clear();
    }
}

impl From<UpdateAction> for Update {
    fn from(action: UpdateAction) -> Self {
        Self::new(action)
    }
}
