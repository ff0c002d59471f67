use std::collections::VecDeque;

use glam::{Affine3A, Vec3};
use rustc_hash::FxHashSet;

use crate::errors::{GraphError, Result};
use crate::scene::bounds::BoundsCache;
use crate::scene::graph::SceneGraph;
use crate::scene::object::{ObjectKind, ObjectType};
use crate::scene::update::{Update, UpdateAction};
use crate::scene::ObjectId;

/// Variants of a composite node.
///
/// Everything except visitor dispatch (and the transform applied to the
/// bounding box) is shared between group kinds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GroupKind {
    Plain,
    /// Content that does not change between frames.
    Invariant,
    /// Content excluded from picking.
    Unpickable,
    /// Content drawn on top of the scene.
    Overlay,
    PosTransform(Affine3A),
    ScaleTransform(Vec3),
}

impl GroupKind {
    /// Local matrix of transform kinds, `None` for the others.
    pub fn matrix(&self) -> Option<Affine3A> {
        match *self {
            Self::PosTransform(matrix) => Some(matrix),
            Self::ScaleTransform(scale) => Some(Affine3A::from_scale(scale)),
            _ => None,
        }
    }

    pub fn object_type(&self) -> ObjectType {
        match self {
            Self::Plain => ObjectType::Group,
            Self::Invariant => ObjectType::InvariantGroup,
            Self::Unpickable => ObjectType::UnpickableGroup,
            Self::Overlay => ObjectType::Overlay,
            Self::PosTransform(_) => ObjectType::PosTransform,
            Self::ScaleTransform(_) => ObjectType::ScaleTransform,
        }
    }
}

/// An ordered list of child nodes.
///
/// The same child may appear more than once; every occurrence is a separate
/// owner registration on the child.
#[derive(Debug, Clone)]
pub struct Group {
    pub(crate) kind: GroupKind,
    pub(crate) children: Vec<ObjectId>,
    pub(crate) bounds: BoundsCache,
}

impl Group {
    pub(crate) fn new(kind: GroupKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
            bounds: BoundsCache::default(),
        }
    }

    pub fn kind(&self) -> &GroupKind {
        &self.kind
    }

    pub fn children(&self) -> &[ObjectId] {
        &self.children
    }

    pub fn is_transform(&self) -> bool {
        matches!(
            self.kind,
            GroupKind::PosTransform(_) | GroupKind::ScaleTransform(_)
        )
    }
}

impl SceneGraph {
    // ========================================================================
    // Factories
    // ========================================================================

    pub fn create_group(&mut self, name: impl Into<String>) -> ObjectId {
        self.create_group_of_kind(name, GroupKind::Plain)
    }

    pub fn create_invariant_group(&mut self, name: impl Into<String>) -> ObjectId {
        self.create_group_of_kind(name, GroupKind::Invariant)
    }

    pub fn create_unpickable_group(&mut self, name: impl Into<String>) -> ObjectId {
        self.create_group_of_kind(name, GroupKind::Unpickable)
    }

    pub fn create_overlay(&mut self, name: impl Into<String>) -> ObjectId {
        self.create_group_of_kind(name, GroupKind::Overlay)
    }

    pub(crate) fn create_group_of_kind(
        &mut self,
        name: impl Into<String>,
        kind: GroupKind,
    ) -> ObjectId {
        self.insert(name.into(), ObjectKind::Group(Group::new(kind)))
    }

    // ========================================================================
    // Child management
    // ========================================================================

    /// Appends `child` to the children of `group`.
    ///
    /// With `notify`, an [`UpdateAction::ADDED`] update is propagated from
    /// the child through its new owner. Adding a child that is already
    /// present creates a second occurrence.
    ///
    /// # Errors
    /// - [`GraphError::StaleHandle`] if either handle is dead
    /// - [`GraphError::KindMismatch`] if `group` is not a group or `child`
    ///   is not a node
    /// - [`GraphError::CycleDetected`] if cycle checking is enabled and
    ///   `child` is `group` or one of its ancestors
    pub fn add_child(&mut self, group: ObjectId, child: ObjectId, notify: bool) -> Result<()> {
        self.get_group(group)?;
        let child_type = self.object_type(child)?;
        if !child_type.is_node() {
            return Err(GraphError::KindMismatch {
                id: child,
                expected: "node",
                found: child_type,
            });
        }

        if self.settings().check_cycles && self.is_ancestor_or_self(child, group) {
            log::warn!("Cannot add {child:?} under {group:?}: it would create a cycle");
            return Err(GraphError::CycleDetected { group, child });
        }

        self.group_mut(group)?.children.push(child);
        self.invalidate_bounds_upward(group);

        if notify {
            let mut update = Update::new(UpdateAction::ADDED);
            self.add_owner_with_update(child, group, &mut update)
        } else {
            self.add_owner(child, group)
        }
    }

    /// Removes every occurrence of `child`. Returns whether anything was
    /// removed.
    ///
    /// With `notify`, each occurrence propagates an
    /// [`UpdateAction::REMOVED`] update from the child while it is still
    /// attached, so the update reaches `group` and its ancestors.
    pub fn remove_child(&mut self, group: ObjectId, child: ObjectId, notify: bool) -> Result<bool> {
        let mut removed = false;
        loop {
            let Some(index) = self.get_group(group)?.children.iter().position(|&c| c == child)
            else {
                break;
            };
            self.detach_child_at(group, index, notify)?;
            removed = true;
        }
        Ok(removed)
    }

    /// Removes the child at `index` and returns it.
    pub fn remove_child_at(
        &mut self,
        group: ObjectId,
        index: usize,
        notify: bool,
    ) -> Result<ObjectId> {
        let len = self.get_group(group)?.children.len();
        if index >= len {
            return Err(GraphError::IndexOutOfBounds { index, len });
        }
        self.detach_child_at(group, index, notify)
    }

    /// Removes all children, dropping one owner registration per occurrence.
    pub fn clear_children(&mut self, group: ObjectId, notify: bool) -> Result<()> {
        let children = self.get_group(group)?.children.clone();
        for &child in &children {
            if notify {
                let mut update = Update::new(UpdateAction::REMOVED);
                self.transfer_update(child, &mut update);
            }
            self.remove_owner(child, group)?;
        }
        self.group_mut(group)?.children.clear();
        self.invalidate_bounds_upward(group);
        Ok(())
    }

    fn detach_child_at(&mut self, group: ObjectId, index: usize, notify: bool) -> Result<ObjectId> {
        let child = self.get_group(group)?.children[index];
        if notify {
            let mut update = Update::new(UpdateAction::REMOVED);
            self.transfer_update(child, &mut update);
        }
        self.group_mut(group)?.children.remove(index);
        self.remove_owner(child, group)?;
        self.invalidate_bounds_upward(group);
        Ok(child)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn contains(&self, group: ObjectId, child: ObjectId) -> Result<bool> {
        Ok(self.get_group(group)?.children.contains(&child))
    }

    pub fn children(&self, group: ObjectId) -> Result<&[ObjectId]> {
        Ok(&self.get_group(group)?.children)
    }

    pub fn num_children(&self, group: ObjectId) -> Result<usize> {
        Ok(self.get_group(group)?.children.len())
    }

    pub fn child(&self, group: ObjectId, index: usize) -> Result<Option<ObjectId>> {
        Ok(self.get_group(group)?.children.get(index).copied())
    }

    /// Whether `candidate` is `node` itself or reachable from it through
    /// owner links.
    pub(crate) fn is_ancestor_or_self(&self, candidate: ObjectId, node: ObjectId) -> bool {
        let mut visited = FxHashSet::default();
        let mut queue = VecDeque::from([node]);
        while let Some(current) = queue.pop_front() {
            if current == candidate {
                return true;
            }
            if !visited.insert(current) {
                continue;
            }
            if let Some(object) = self.objects.get(current) {
                queue.extend(object.owners.iter().copied());
            }
        }
        false
    }
}
