//! Double dispatch over node kinds.
//!
//! [`SceneGraph::accept`] selects the visitor method matching the node kind.
//! Every method has a default, so a visitor overrides only the kinds it
//! cares about. The defaults form a fallback chain:
//!
//! ```text
//! visit_pos_transform ─┐
//! visit_scale_transform┴→ visit_transform ─┐
//! visit_invariant_group ───────────────────┤
//! visit_unpickable_group ──────────────────┼→ visit_group → accept(children)
//! visit_overlay ───────────────────────────┘
//!
//! visit_light ─┬→ visit_preprocessed
//! visit_camera ┘
//! ```
//!
//! Everything else defaults to a no-op.

use crate::scene::ObjectId;
use crate::scene::camera::Camera;
use crate::scene::graph::SceneGraph;
use crate::scene::group::{Group, GroupKind};
use crate::scene::light::Light;
use crate::scene::object::ObjectKind;
use crate::scene::shape::{Plot, PlotKind, Shape};

#[allow(unused_variables)]
pub trait SceneVisitor {
    fn visit_node(&mut self, graph: &SceneGraph, id: ObjectId) {}

    /// Visits the children in order.
    fn visit_group(&mut self, graph: &SceneGraph, id: ObjectId, group: &Group) {
        for &child in group.children() {
            graph.accept(child, self);
        }
    }

    fn visit_invariant_group(&mut self, graph: &SceneGraph, id: ObjectId, group: &Group) {
        self.visit_group(graph, id, group);
    }

    fn visit_unpickable_group(&mut self, graph: &SceneGraph, id: ObjectId, group: &Group) {
        self.visit_group(graph, id, group);
    }

    fn visit_overlay(&mut self, graph: &SceneGraph, id: ObjectId, group: &Group) {
        self.visit_group(graph, id, group);
    }

    fn visit_transform(&mut self, graph: &SceneGraph, id: ObjectId, group: &Group) {
        self.visit_group(graph, id, group);
    }

    fn visit_pos_transform(&mut self, graph: &SceneGraph, id: ObjectId, group: &Group) {
        self.visit_transform(graph, id, group);
    }

    fn visit_scale_transform(&mut self, graph: &SceneGraph, id: ObjectId, group: &Group) {
        self.visit_transform(graph, id, group);
    }

    fn visit_shape(&mut self, graph: &SceneGraph, id: ObjectId, shape: &Shape) {}

    fn visit_point_set(&mut self, graph: &SceneGraph, id: ObjectId, plot: &Plot) {}

    fn visit_line_set(&mut self, graph: &SceneGraph, id: ObjectId, plot: &Plot) {}

    fn visit_preprocessed(&mut self, graph: &SceneGraph, id: ObjectId) {}

    fn visit_light(&mut self, graph: &SceneGraph, id: ObjectId, light: &Light) {
        self.visit_preprocessed(graph, id);
    }

    fn visit_camera(&mut self, graph: &SceneGraph, id: ObjectId, camera: &Camera) {
        self.visit_preprocessed(graph, id);
    }
}

impl SceneGraph {
    /// Dispatches `visitor` on the node `id`. Stale handles and non-node
    /// objects are ignored.
    pub fn accept<V: SceneVisitor + ?Sized>(&self, id: ObjectId, visitor: &mut V) {
        let Some(object) = self.objects.get(id) else {
            return;
        };
        match &object.kind {
            ObjectKind::Node => visitor.visit_node(self, id),
            ObjectKind::Group(group) => match group.kind() {
                GroupKind::Plain => visitor.visit_group(self, id, group),
                GroupKind::Invariant => visitor.visit_invariant_group(self, id, group),
                GroupKind::Unpickable => {
                    visitor.visit_unpickable_group(self, id, group);
                }
                GroupKind::Overlay => visitor.visit_overlay(self, id, group),
                GroupKind::PosTransform(_) => {
                    visitor.visit_pos_transform(self, id, group);
                }
                GroupKind::ScaleTransform(_) => {
                    visitor.visit_scale_transform(self, id, group);
                }
            },
            ObjectKind::Shape(shape) => visitor.visit_shape(self, id, shape),
            ObjectKind::Plot(plot) => match plot.kind {
                PlotKind::PointSet { .. } => visitor.visit_point_set(self, id, plot),
                PlotKind::LineSet { .. } => visitor.visit_line_set(self, id, plot),
            },
            ObjectKind::Preprocessed => visitor.visit_preprocessed(self, id),
            ObjectKind::Light(light) => visitor.visit_light(self, id, light),
            ObjectKind::Camera(camera) => visitor.visit_camera(self, id, camera),
            ObjectKind::Mesh(_)
            | ObjectKind::Material(_)
            | ObjectKind::Texture(_)
            | ObjectKind::TextureTransform(_)
            | ObjectKind::Image(_)
            | ObjectKind::Array(_) => {}
        }
    }
}
