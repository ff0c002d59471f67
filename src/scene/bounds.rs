use std::cell::Cell;

use crate::resources::BoundingBox;

/// Lazily recomputed bounding box.
///
/// `valid == false` means the next read must recompute. Transforms keep the
/// children's union in `untransformed`; both values are written together.
#[derive(Debug, Clone, Default)]
pub(crate) struct BoundsCache {
    valid: Cell<bool>,
    bbox: Cell<BoundingBox>,
    untransformed: Cell<BoundingBox>,
}

impl BoundsCache {
    pub(crate) fn is_valid(&self) -> bool {
        self.valid.get()
    }

    /// Marks the cache stale. Returns whether it was valid before the call.
    pub(crate) fn invalidate(&self) -> bool {
        self.valid.replace(false)
    }

    pub(crate) fn get(&self) -> Option<BoundingBox> {
        self.valid.get().then(|| self.bbox.get())
    }

    pub(crate) fn untransformed(&self) -> Option<BoundingBox> {
        self.valid.get().then(|| self.untransformed.get())
    }

    pub(crate) fn store(&self, bbox: BoundingBox, untransformed: BoundingBox) {
        self.bbox.set(bbox);
        self.untransformed.set(untransformed);
        self.valid.set(true);
    }
}
