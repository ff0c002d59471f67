//! Transform groups.
//!
//! A transform is a group whose bounding box is the union of its children
//! mapped through a local matrix. Both boxes are cached together; the
//! untransformed one is available through
//! [`SceneGraph::untransformed_bounding_box`].
//!
//! Setters invalidate the cached boxes of the transform and its ancestors.
//! They do not notify listeners: callers that want observers to react emit
//! an update with [`SceneGraph::notify`] once their edits are done.

use glam::{Affine3A, Mat3A, Quat, Vec3};

use crate::errors::{GraphError, Result};
use crate::resources::BoundingBox;
use crate::scene::ObjectId;
use crate::scene::graph::SceneGraph;
use crate::scene::group::GroupKind;

impl SceneGraph {
    pub fn create_pos_transform(&mut self, name: impl Into<String>, matrix: Affine3A) -> ObjectId {
        self.create_group_of_kind(name, GroupKind::PosTransform(matrix))
    }

    pub fn create_scale_transform(&mut self, name: impl Into<String>, scale: Vec3) -> ObjectId {
        self.create_group_of_kind(name, GroupKind::ScaleTransform(scale))
    }

    /// Local matrix of a transform group.
    pub fn transform_matrix(&self, id: ObjectId) -> Result<Affine3A> {
        let group = self.get_group(id)?;
        group.kind.matrix().ok_or_else(|| Self::not_a_transform(id, group.kind))
    }

    pub fn set_transform_matrix(&mut self, id: ObjectId, matrix: Affine3A) -> Result<()> {
        self.edit_pos_transform(id, |current| *current = matrix)
    }

    pub fn translation(&self, id: ObjectId) -> Result<Vec3> {
        Ok(Vec3::from(self.pos_transform(id)?.translation))
    }

    pub fn set_translation(&mut self, id: ObjectId, translation: Vec3) -> Result<()> {
        self.edit_pos_transform(id, |current| current.translation = translation.into())
    }

    /// Rotation part of a position transform. Assumes the matrix carries no
    /// scale or shear.
    pub fn rotation(&self, id: ObjectId) -> Result<Quat> {
        Ok(Quat::from_mat3a(&self.pos_transform(id)?.matrix3))
    }

    /// Replaces the linear part of a position transform with `rotation`,
    /// keeping the translation.
    pub fn set_rotation(&mut self, id: ObjectId, rotation: Quat) -> Result<()> {
        self.edit_pos_transform(id, |current| current.matrix3 = Mat3A::from_quat(rotation))
    }

    pub fn scale(&self, id: ObjectId) -> Result<Vec3> {
        let group = self.get_group(id)?;
        match group.kind {
            GroupKind::ScaleTransform(scale) => Ok(scale),
            kind => Err(Self::kind_error(id, kind, "ScaleTransform")),
        }
    }

    pub fn set_scale(&mut self, id: ObjectId, scale: Vec3) -> Result<()> {
        let group = self.group_mut(id)?;
        match &mut group.kind {
            GroupKind::ScaleTransform(current) => *current = scale,
            kind => return Err(Self::kind_error(id, *kind, "ScaleTransform")),
        }
        self.invalidate_bounds_upward(id);
        Ok(())
    }

    /// Union of the children's boxes before the local matrix is applied.
    pub fn untransformed_bounding_box(&self, id: ObjectId) -> Result<BoundingBox> {
        let group = self.get_group(id)?;
        if !group.is_transform() {
            return Err(Self::not_a_transform(id, group.kind));
        }
        Ok(self.group_bounds(group).1)
    }

    fn pos_transform(&self, id: ObjectId) -> Result<Affine3A> {
        match self.get_group(id)?.kind {
            GroupKind::PosTransform(matrix) => Ok(matrix),
            kind => Err(Self::kind_error(id, kind, "PosTransform")),
        }
    }

    fn edit_pos_transform(&mut self, id: ObjectId, edit: impl FnOnce(&mut Affine3A)) -> Result<()> {
        let group = self.group_mut(id)?;
        match &mut group.kind {
            GroupKind::PosTransform(matrix) => edit(matrix),
            kind => return Err(Self::kind_error(id, *kind, "PosTransform")),
        }
        self.invalidate_bounds_upward(id);
        Ok(())
    }

    fn not_a_transform(id: ObjectId, kind: GroupKind) -> GraphError {
        Self::kind_error(id, kind, "PosTransform or ScaleTransform")
    }

    fn kind_error(id: ObjectId, kind: GroupKind, expected: &'static str) -> GraphError {
        GraphError::KindMismatch {
            id,
            expected,
            found: kind.object_type(),
        }
    }
}
