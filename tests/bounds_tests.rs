//! Bounding Box Tests
//!
//! Tests for:
//! - Box primitive geometry and flat normals
//! - Shape, group and transform bounds
//! - Cache invalidation after structural and data edits

use arbor::errors::GraphError;
use arbor::resources::primitives::{BoxOptions, create_box};
use arbor::resources::{BoundingBox, DataArray};
use arbor::scene::{MeshPrimitive, SceneGraph, UpdateAction};
use glam::{Affine3A, Quat, Vec3};

const EPSILON: f32 = 1e-5;

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    (a - b).abs().max_element() < EPSILON
}

fn bbox_approx(bbox: BoundingBox, min: Vec3, max: Vec3) -> bool {
    vec3_approx(bbox.min, min) && vec3_approx(bbox.max, max)
}

fn cube(graph: &mut SceneGraph, size: f32) -> arbor::scene::ObjectId {
    let mesh = create_box(
        graph,
        &BoxOptions {
            size: Vec3::splat(size),
            ..Default::default()
        },
    )
    .unwrap();
    let shape = graph.create_shape("cube");
    graph.set_mesh(shape, Some(mesh)).unwrap();
    shape
}

// ============================================================================
// Box Primitive
// ============================================================================

#[test]
fn box_has_eight_corners_and_twelve_triangles() {
    let mut graph = SceneGraph::new();
    let mesh = create_box(&mut graph, &BoxOptions::default()).unwrap();

    let data = graph.get_mesh(mesh).unwrap();
    assert_eq!(data.num_triangles(), 12);
    assert_eq!(data.triangle(0), Some([0, 1, 2]));
    assert_eq!(data.primitive, MeshPrimitive::Box { size: Vec3::ONE });

    let vertices = graph.vertices(mesh).unwrap().unwrap();
    assert_eq!(graph.get_array(vertices).unwrap().len(), 8);
}

#[test]
fn box_normals_are_flat_per_face() {
    let mut graph = SceneGraph::new();
    let mesh = create_box(&mut graph, &BoxOptions::default()).unwrap();

    let normals = graph.normals(mesh).unwrap().unwrap();
    let normals = graph.get_array(normals).unwrap().as_vec3().unwrap().to_vec();
    assert_eq!(normals.len(), 6);
    for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
        assert!(normals.iter().any(|n| vec3_approx(*n, axis)));
        assert!(normals.iter().any(|n| vec3_approx(*n, -axis)));
    }

    let data = graph.get_mesh(mesh).unwrap();
    assert_eq!(data.normal_indices.len(), 36);
    // Both triangles of a face share one normal
    assert_eq!(data.normal_indices[0], data.normal_indices[3]);
}

#[test]
fn box_without_normals_has_no_normal_array() {
    let mut graph = SceneGraph::new();
    let options = BoxOptions {
        generate_normals: false,
        ..Default::default()
    };
    let mesh = create_box(&mut graph, &options).unwrap();
    assert_eq!(graph.normals(mesh).unwrap(), None);
    assert!(graph.get_mesh(mesh).unwrap().normal_indices.is_empty());
}

#[test]
fn negative_box_size_is_rejected() {
    let mut graph = SceneGraph::new();
    let options = BoxOptions {
        size: Vec3::new(1.0, -1.0, 1.0),
        ..Default::default()
    };
    assert!(matches!(
        create_box(&mut graph, &options),
        Err(GraphError::InvalidPrimitive(_))
    ));
    assert!(graph.is_empty());
}

// ============================================================================
// Shape & Group Bounds
// ============================================================================

#[test]
fn shape_bounds_come_from_its_mesh() {
    let mut graph = SceneGraph::new();
    let shape = cube(&mut graph, 2.0);
    let group = graph.create_group("group");
    graph.add_child(group, shape, true).unwrap();

    let expected = (Vec3::splat(-1.0), Vec3::splat(1.0));
    assert!(bbox_approx(graph.bounding_box(shape).unwrap(), expected.0, expected.1));
    assert!(bbox_approx(graph.bounding_box(group).unwrap(), expected.0, expected.1));
}

#[test]
fn objects_without_geometry_are_empty() {
    let mut graph = SceneGraph::new();
    let node = graph.create_node("node");
    let shape = graph.create_shape("shape");
    let group = graph.create_group("group");

    assert!(graph.bounding_box(node).unwrap().is_empty());
    assert!(graph.bounding_box(shape).unwrap().is_empty());
    assert!(graph.bounding_box(group).unwrap().is_empty());
}

#[test]
fn group_bounds_union_children() {
    let mut graph = SceneGraph::new();
    let group = graph.create_group("group");
    let small = cube(&mut graph, 2.0);
    let moved = graph.create_pos_transform("moved", Affine3A::from_translation(Vec3::X * 10.0));
    graph.add_child(moved, small, false).unwrap();
    graph.add_child(group, small, false).unwrap();
    graph.add_child(group, moved, false).unwrap();

    let bbox = graph.bounding_box(group).unwrap();
    assert!(bbox_approx(bbox, Vec3::splat(-1.0), Vec3::new(11.0, 1.0, 1.0)));
}

// ============================================================================
// Transforms
// ============================================================================

#[test]
fn pos_transform_offsets_bounds() {
    let mut graph = SceneGraph::new();
    let shape = cube(&mut graph, 2.0);
    let transform =
        graph.create_pos_transform("t", Affine3A::from_translation(Vec3::new(5.0, 0.0, 0.0)));
    graph.add_child(transform, shape, true).unwrap();

    let bbox = graph.bounding_box(transform).unwrap();
    assert!(bbox_approx(bbox, Vec3::new(4.0, -1.0, -1.0), Vec3::new(6.0, 1.0, 1.0)));

    let local = graph.untransformed_bounding_box(transform).unwrap();
    assert!(bbox_approx(local, Vec3::splat(-1.0), Vec3::splat(1.0)));
}

#[test]
fn scale_transform_scales_bounds() {
    let mut graph = SceneGraph::new();
    let shape = cube(&mut graph, 2.0);
    let transform = graph.create_scale_transform("s", Vec3::new(2.0, 1.0, 0.5));
    graph.add_child(transform, shape, false).unwrap();

    let bbox = graph.bounding_box(transform).unwrap();
    assert!(bbox_approx(bbox, Vec3::new(-2.0, -1.0, -0.5), Vec3::new(2.0, 1.0, 0.5)));
    assert!(vec3_approx(graph.scale(transform).unwrap(), Vec3::new(2.0, 1.0, 0.5)));
}

#[test]
fn rotation_round_trips_through_matrix() {
    let mut graph = SceneGraph::new();
    let transform = graph.create_pos_transform("t", Affine3A::IDENTITY);
    let rotation = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);

    graph.set_translation(transform, Vec3::new(1.0, 2.0, 3.0)).unwrap();
    graph.set_rotation(transform, rotation).unwrap();

    assert!(graph.rotation(transform).unwrap().abs_diff_eq(rotation, EPSILON));
    assert!(vec3_approx(graph.translation(transform).unwrap(), Vec3::new(1.0, 2.0, 3.0)));
}

#[test]
fn transform_accessors_check_kind() {
    let mut graph = SceneGraph::new();
    let group = graph.create_group("group");
    let scale = graph.create_scale_transform("s", Vec3::ONE);

    assert!(graph.transform_matrix(group).is_err());
    assert!(graph.untransformed_bounding_box(group).is_err());
    assert!(graph.set_translation(scale, Vec3::ONE).is_err());
    assert!(graph.set_scale(scale, Vec3::splat(2.0)).is_ok());
    assert_eq!(
        graph.transform_matrix(scale).unwrap(),
        Affine3A::from_scale(Vec3::splat(2.0))
    );
}

// ============================================================================
// Cache Invalidation
// ============================================================================

#[test]
fn setting_translation_refreshes_ancestors() {
    let mut graph = SceneGraph::new();
    let root = graph.create_group("root");
    let transform = graph.create_pos_transform("t", Affine3A::IDENTITY);
    let shape = cube(&mut graph, 2.0);
    graph.add_child(root, transform, false).unwrap();
    graph.add_child(transform, shape, false).unwrap();

    // Prime every cache
    graph.bounding_box(root).unwrap();

    graph.set_translation(transform, Vec3::new(0.0, 3.0, 0.0)).unwrap();
    let bbox = graph.bounding_box(root).unwrap();
    assert!(bbox_approx(bbox, Vec3::new(-1.0, 2.0, -1.0), Vec3::new(1.0, 4.0, 1.0)));
}

#[test]
fn adding_and_removing_children_refreshes_ancestors() {
    let mut graph = SceneGraph::new();
    let root = graph.create_group("root");
    let group = graph.create_group("group");
    graph.add_child(root, group, false).unwrap();
    assert!(graph.bounding_box(root).unwrap().is_empty());

    let shape = cube(&mut graph, 2.0);
    graph.add_child(group, shape, false).unwrap();
    assert!(bbox_approx(
        graph.bounding_box(root).unwrap(),
        Vec3::splat(-1.0),
        Vec3::splat(1.0)
    ));

    graph.remove_child(group, shape, false).unwrap();
    assert!(graph.bounding_box(root).unwrap().is_empty());
}

#[test]
fn editing_vertices_refreshes_every_user() {
    let mut graph = SceneGraph::new();
    let root = graph.create_group("root");
    let shape = cube(&mut graph, 2.0);
    graph.add_child(root, shape, false).unwrap();
    graph.bounding_box(root).unwrap();

    let mesh = graph.mesh(shape).unwrap().unwrap();
    let vertices = graph.vertices(mesh).unwrap().unwrap();
    graph
        .get_array_mut(vertices)
        .unwrap()
        .as_vec3_mut()
        .unwrap()
        .push(Vec3::new(0.0, 0.0, 7.0));

    let bbox = graph.bounding_box(root).unwrap();
    assert!(bbox_approx(bbox, Vec3::splat(-1.0), Vec3::new(1.0, 1.0, 7.0)));
}

#[test]
fn replacing_vertex_array_refreshes_mesh() {
    let mut graph = SceneGraph::new();
    let shape = cube(&mut graph, 2.0);
    let mesh = graph.mesh(shape).unwrap().unwrap();
    graph.bounding_box(shape).unwrap();

    let flat = graph.create_array(
        "flat",
        DataArray::Vertices(vec![Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0)]),
    );
    graph.set_vertices(mesh, Some(flat)).unwrap();

    let bbox = graph.bounding_box(shape).unwrap();
    assert!(bbox_approx(bbox, Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0)));
}

#[test]
fn notification_invalidates_caches_along_the_walk() {
    let mut graph = SceneGraph::new();
    let root = graph.create_group("root");
    let shape = cube(&mut graph, 2.0);
    graph.add_child(root, shape, false).unwrap();
    let before = graph.bounding_box(root).unwrap();

    graph.notify(shape, UpdateAction::BBOX_UPDATED).unwrap();
    assert_eq!(graph.bounding_box(root).unwrap(), before);
}

#[test]
fn shared_mesh_edit_reaches_both_shapes() {
    let mut graph = SceneGraph::new();
    let left = graph.create_pos_transform("left", Affine3A::from_translation(-Vec3::X * 5.0));
    let right = graph.create_pos_transform("right", Affine3A::from_translation(Vec3::X * 5.0));
    let first = cube(&mut graph, 2.0);
    let mesh = graph.mesh(first).unwrap().unwrap();
    let second = graph.create_shape("second");
    graph.set_mesh(second, Some(mesh)).unwrap();
    graph.add_child(left, first, false).unwrap();
    graph.add_child(right, second, false).unwrap();
    graph.bounding_box(left).unwrap();
    graph.bounding_box(right).unwrap();

    let vertices = graph.vertices(mesh).unwrap().unwrap();
    for v in graph.get_array_mut(vertices).unwrap().as_vec3_mut().unwrap() {
        *v *= 2.0;
    }

    assert!(bbox_approx(
        graph.bounding_box(left).unwrap(),
        Vec3::new(-7.0, -2.0, -2.0),
        Vec3::new(-3.0, 2.0, 2.0)
    ));
    assert!(bbox_approx(
        graph.bounding_box(right).unwrap(),
        Vec3::new(3.0, -2.0, -2.0),
        Vec3::new(7.0, 2.0, 2.0)
    ));
}

#[test]
fn point_set_bounds_cover_vertices() {
    let mut graph = SceneGraph::new();
    let points = graph.create_point_set("points", 3.0);
    let vertices = graph.create_array(
        "v",
        DataArray::Vertices(vec![Vec3::new(-1.0, 0.0, 2.0), Vec3::new(4.0, 1.0, 0.0)]),
    );
    graph.set_vertices(points, Some(vertices)).unwrap();

    let bbox = graph.bounding_box(points).unwrap();
    assert!(bbox_approx(bbox, Vec3::new(-1.0, 0.0, 0.0), Vec3::new(4.0, 1.0, 2.0)));
}

// ============================================================================
// Payload Factories
// ============================================================================

#[test]
fn mesh_built_from_a_copied_payload_starts_detached() {
    let mut graph = SceneGraph::new();
    let mesh = graph.create_mesh("mesh", arbor::scene::Mesh::new());
    let vertices = graph.create_array("v", DataArray::Vertices(vec![Vec3::ZERO, Vec3::ONE]));
    graph.set_vertices(mesh, Some(vertices)).unwrap();
    let before = graph.bounding_box(mesh).unwrap();
    assert!(bbox_approx(before, Vec3::ZERO, Vec3::ONE));

    let payload = graph.get_mesh(mesh).unwrap().clone();
    let copy = graph.create_mesh("copy", payload);

    assert_eq!(graph.vertices(copy).unwrap(), None);
    assert_eq!(graph.owner_count(vertices).unwrap(), 1);
    assert_eq!(graph.bounding_box(copy).unwrap(), BoundingBox::EMPTY);

    graph.set_vertices(copy, Some(vertices)).unwrap();
    graph
        .get_array_mut(vertices)
        .unwrap()
        .as_vec3_mut()
        .unwrap()
        .push(Vec3::splat(10.0));

    assert!(bbox_approx(graph.bounding_box(copy).unwrap(), Vec3::ZERO, Vec3::splat(10.0)));
    assert!(bbox_approx(graph.bounding_box(mesh).unwrap(), Vec3::ZERO, Vec3::splat(10.0)));
}

#[test]
fn texture_built_from_a_copied_payload_drops_its_image() {
    let mut graph = SceneGraph::new();
    let texture = graph.create_texture("tex", arbor::scene::Texture::default());
    let image = graph.get_or_create_image(texture).unwrap();

    let payload = graph.get_texture(texture).unwrap().clone();
    let copy = graph.create_texture("copy", payload);

    assert_eq!(graph.image(copy).unwrap(), None);
    assert_eq!(graph.owners(image).unwrap(), &[texture]);
}
