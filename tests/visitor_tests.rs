//! Visitor Dispatch Tests
//!
//! Tests for:
//! - One callback per node kind
//! - Default fallback chain between group and preprocessed kinds
//! - Non-node objects are skipped

use arbor::resources::Material;
use arbor::scene::{
    Camera, Group, Light, ObjectId, Plot, SceneGraph, SceneVisitor, Shape,
};
use glam::{Affine3A, Vec3};

/// Records the name of every dispatched method.
#[derive(Default)]
struct Recorder {
    calls: Vec<&'static str>,
}

impl SceneVisitor for Recorder {
    fn visit_node(&mut self, _: &SceneGraph, _: ObjectId) {
        self.calls.push("node");
    }

    fn visit_group(&mut self, graph: &SceneGraph, _: ObjectId, group: &Group) {
        self.calls.push("group");
        for &child in group.children() {
            graph.accept(child, self);
        }
    }

    fn visit_transform(&mut self, graph: &SceneGraph, id: ObjectId, group: &Group) {
        self.calls.push("transform");
        self.visit_group(graph, id, group);
    }

    fn visit_shape(&mut self, _: &SceneGraph, _: ObjectId, _: &Shape) {
        self.calls.push("shape");
    }

    fn visit_point_set(&mut self, _: &SceneGraph, _: ObjectId, _: &Plot) {
        self.calls.push("point_set");
    }

    fn visit_line_set(&mut self, _: &SceneGraph, _: ObjectId, _: &Plot) {
        self.calls.push("line_set");
    }

    fn visit_preprocessed(&mut self, _: &SceneGraph, _: ObjectId) {
        self.calls.push("preprocessed");
    }

    fn visit_camera(&mut self, _: &SceneGraph, _: ObjectId, _: &Camera) {
        self.calls.push("camera");
    }
}

// ============================================================================
// Dispatch
// ============================================================================

#[test]
fn each_kind_reaches_its_method() {
    let mut graph = SceneGraph::new();
    let root = graph.create_group("root");
    let node = graph.create_node("node");
    let shape = graph.create_shape("shape");
    let points = graph.create_point_set("points", 1.0);
    let lines = graph.create_line_set("lines", 1.0);
    let camera = graph.create_camera("camera", Camera::default());
    for child in [node, shape, points, lines, camera] {
        graph.add_child(root, child, false).unwrap();
    }

    let mut recorder = Recorder::default();
    graph.accept(root, &mut recorder);

    assert_eq!(
        recorder.calls,
        vec!["group", "node", "shape", "point_set", "line_set", "camera"]
    );
}

#[test]
fn group_variants_fall_back_to_visit_group() {
    let mut graph = SceneGraph::new();
    let invariant = graph.create_invariant_group("invariant");
    let unpickable = graph.create_unpickable_group("unpickable");
    let overlay = graph.create_overlay("overlay");
    let leaf = graph.create_shape("leaf");
    graph.add_child(invariant, unpickable, false).unwrap();
    graph.add_child(unpickable, overlay, false).unwrap();
    graph.add_child(overlay, leaf, false).unwrap();

    let mut recorder = Recorder::default();
    graph.accept(invariant, &mut recorder);

    assert_eq!(recorder.calls, vec!["group", "group", "group", "shape"]);
}

#[test]
fn transforms_fall_back_to_visit_transform() {
    let mut graph = SceneGraph::new();
    let pos = graph.create_pos_transform("pos", Affine3A::IDENTITY);
    let scale = graph.create_scale_transform("scale", Vec3::ONE);
    graph.add_child(pos, scale, false).unwrap();

    let mut recorder = Recorder::default();
    graph.accept(pos, &mut recorder);

    assert_eq!(recorder.calls, vec!["transform", "group", "transform", "group"]);
}

#[test]
fn light_falls_back_to_visit_preprocessed() {
    let mut graph = SceneGraph::new();
    let light = graph.create_light("light", Light::point());
    let marker = graph.create_preprocessed("marker");

    let mut recorder = Recorder::default();
    graph.accept(light, &mut recorder);
    graph.accept(marker, &mut recorder);

    assert_eq!(recorder.calls, vec!["preprocessed", "preprocessed"]);
}

#[test]
fn non_nodes_and_stale_handles_are_ignored() {
    let mut graph = SceneGraph::new();
    let material = graph.create_material("mat", Material::default());
    let node = graph.create_node("gone");
    graph.destroy(node).unwrap();

    let mut recorder = Recorder::default();
    graph.accept(material, &mut recorder);
    graph.accept(node, &mut recorder);

    assert!(recorder.calls.is_empty());
}

/// Counts shapes using only the default traversal.
#[test]
fn default_traversal_visits_shared_nodes_per_edge() {
    struct ShapeCounter(usize);

    impl SceneVisitor for ShapeCounter {
        fn visit_shape(&mut self, _: &SceneGraph, _: ObjectId, _: &Shape) {
            self.0 += 1;
        }
    }

    let mut graph = SceneGraph::new();
    let root = graph.create_group("root");
    let transform = graph.create_pos_transform("t", Affine3A::IDENTITY);
    let shape = graph.create_shape("shape");
    graph.add_child(root, shape, false).unwrap();
    graph.add_child(root, transform, false).unwrap();
    graph.add_child(transform, shape, false).unwrap();

    let mut counter = ShapeCounter(0);
    graph.accept(root, &mut counter);
    assert_eq!(counter.0, 2);
}
