//! Sharing-preserving duplication.
//!
//! A [`CloneMap`] records which clone was produced for each original during
//! one duplication. Every owned reference of a composite is routed through
//! it, so an object reachable along several paths is cloned once and the
//! copy is shared in the same way as the original.
//!
//! Non-node payloads (meshes, materials, textures, images, texture
//! transforms, arrays) can be aliased instead of cloned: with non-node
//! cloning disabled, the copy simply becomes one more owner of the original
//! payload. Nodes are always cloned.

use rustc_hash::FxHashMap;

use crate::errors::{GraphError, Result};
use crate::scene::ObjectId;
use crate::scene::graph::SceneGraph;
use crate::scene::object::ObjectKind;

#[derive(Debug, Clone)]
pub struct CloneMap {
    clones: FxHashMap<ObjectId, ObjectId>,
    non_node_cloning: bool,
}

impl Default for CloneMap {
    fn default() -> Self {
        Self::new()
    }
}

impl CloneMap {
    #[must_use]
    pub fn new() -> Self {
        Self::with_non_node_cloning(true)
    }

    #[must_use]
    pub fn with_non_node_cloning(enabled: bool) -> Self {
        Self {
            clones: FxHashMap::default(),
            non_node_cloning: enabled,
        }
    }

    pub fn is_non_node_cloning_enabled(&self) -> bool {
        self.non_node_cloning
    }

    pub fn set_non_node_cloning_enabled(&mut self, enabled: bool) {
        self.non_node_cloning = enabled;
    }

    /// Forgets every recorded clone. The flag is kept.
    pub fn clear(&mut self) {
        self.clones.clear();
    }

    pub fn len(&self) -> usize {
        self.clones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clones.is_empty()
    }

    /// Clone recorded for `original`, if any.
    pub fn get(&self, original: ObjectId) -> Option<ObjectId> {
        self.clones.get(&original).copied()
    }

    /// Returns the clone of `original`, producing and recording it on first
    /// request.
    pub fn find_or_create_clone(
        &mut self,
        graph: &mut SceneGraph,
        original: ObjectId,
    ) -> Result<ObjectId> {
        if let Some(clone) = self.get(original) {
            return Ok(clone);
        }
        let clone = graph.clone_object(original, self)?;
        self.clones.insert(original, clone);
        Ok(clone)
    }

    /// Resolves a slot target: nodes and, when enabled, non-node payloads
    /// are cloned; other payloads are returned as-is to be shared.
    fn clone_or_alias(&mut self, graph: &mut SceneGraph, target: ObjectId) -> Result<ObjectId> {
        if self.non_node_cloning || graph.is_node(target)? {
            self.find_or_create_clone(graph, target)
        } else {
            Ok(target)
        }
    }
}

impl SceneGraph {
    /// Produces a fresh copy of `original`.
    ///
    /// Plain data is copied; children and slot targets are resolved through
    /// `map`. Children are attached without notification. Cached bounds,
    /// including their validity, are copied unchanged. Listeners are not
    /// copied.
    pub fn clone_object(&mut self, original: ObjectId, map: &mut CloneMap) -> Result<ObjectId> {
        let source = self.get_object(original)?;
        let name = source.name.clone();
        let mut kind = source.kind.clone();

        let children = match &mut kind {
            ObjectKind::Group(group) => std::mem::take(&mut group.children),
            _ => Vec::new(),
        };
        let slots = kind.take_slots();

        let clone = self.insert(name, kind);

        for child in children {
            let found = self.object_type(child)?;
            if !found.is_node() {
                return Err(GraphError::KindMismatch {
                    id: child,
                    expected: "node",
                    found,
                });
            }
            let child_clone = map.find_or_create_clone(self, child)?;
            self.group_mut(clone)?.children.push(child_clone);
            self.add_owner(child_clone, clone)?;
        }

        for (slot, target) in slots {
            let resolved = map.clone_or_alias(self, target)?;
            if let Some(storage) = self.object_mut(clone)?.kind.slot_mut(slot) {
                *storage = Some(resolved);
            }
            self.add_owner(resolved, clone)?;
        }

        Ok(clone)
    }

    /// Clones the subgraph under `root` with a fresh [`CloneMap`] configured
    /// from the graph settings.
    pub fn duplicate(&mut self, root: ObjectId) -> Result<ObjectId> {
        let mut map = CloneMap::with_non_node_cloning(self.settings().non_node_cloning);
        let clone = map.find_or_create_clone(self, root)?;
        log::debug!("Duplicated {root:?} into {clone:?} ({} object(s) cloned)", map.len());
        Ok(clone)
    }
}
