use glam::Vec3;

use crate::errors::{GraphError, Result};
use crate::resources::geometry::DataArray;
use crate::scene::{Mesh, MeshPrimitive, ObjectId, SceneGraph};

/// Tolerance used to merge equal face normals.
const NORMAL_EPSILON: f32 = 1e-6;

// Two triangles per face, counter-clockwise seen from outside
const TRIANGLES: [[u32; 3]; 12] = [
    [0, 1, 2],
    [2, 3, 0],
    [0, 5, 1],
    [0, 4, 5],
    [1, 5, 6],
    [1, 6, 2],
    [2, 6, 7],
    [2, 7, 3],
    [3, 7, 4],
    [3, 4, 0],
    [4, 6, 5],
    [4, 7, 6],
];

pub struct BoxOptions {
    /// Full extent along each axis. The box is centered at the origin.
    pub size: Vec3,
    /// Generate flat per-face normals.
    pub generate_normals: bool,
}

impl Default for BoxOptions {
    fn default() -> Self {
        Self {
            size: Vec3::ONE,
            generate_normals: true,
        }
    }
}

/// Creates a box mesh with 8 shared corners and 12 triangles.
///
/// # Errors
/// [`GraphError::InvalidPrimitive`] if any extent is negative.
pub fn create_box(graph: &mut SceneGraph, options: &BoxOptions) -> Result<ObjectId> {
    let size = options.size;
    if size.min_element() < 0.0 {
        return Err(GraphError::InvalidPrimitive(format!(
            "box size must not be negative, got {size}"
        )));
    }

    let Vec3 { x, y, z } = size * 0.5;
    let positions = vec![
        Vec3::new(x, y, z),
        Vec3::new(-x, y, z),
        Vec3::new(-x, -y, z),
        Vec3::new(x, -y, z),
        Vec3::new(x, y, -z),
        Vec3::new(-x, y, -z),
        Vec3::new(-x, -y, -z),
        Vec3::new(x, -y, -z),
    ];

    let mut mesh = Mesh::new();
    mesh.triangles = TRIANGLES.to_vec();
    mesh.primitive = MeshPrimitive::Box { size };

    let normals = options.generate_normals.then(|| {
        let (normals, indices) = flat_normals(&positions, &TRIANGLES);
        mesh.normal_indices = indices;
        normals
    });

    let mesh = graph.create_mesh("Box", mesh);
    let vertices = graph.create_array("", DataArray::Vertices(positions));
    graph.set_vertices(mesh, Some(vertices))?;
    if let Some(normals) = normals {
        let normals = graph.create_array("", DataArray::Normals(normals));
        graph.set_normals(mesh, Some(normals))?;
    }
    Ok(mesh)
}

/// One normal per distinct face direction, plus a normal index for every
/// triangle corner.
fn flat_normals(positions: &[Vec3], triangles: &[[u32; 3]]) -> (Vec<Vec3>, Vec<u32>) {
    let mut normals: Vec<Vec3> = Vec::new();
    let mut indices = Vec::with_capacity(triangles.len() * 3);

    for &[a, b, c] in triangles {
        let (a, b, c) = (
            positions[a as usize],
            positions[b as usize],
            positions[c as usize],
        );
        let normal = (b - a).cross(c - a).normalize_or_zero();

        let index = match normals
            .iter()
            .position(|n| n.abs_diff_eq(normal, NORMAL_EPSILON))
        {
            Some(existing) => existing,
            None => {
                normals.push(normal);
                normals.len() - 1
            }
        };
        indices.extend([index as u32; 3]);
    }

    (normals, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_cube_has_six_face_normals() {
        let positions: Vec<Vec3> = [
            (1.0, 1.0, 1.0),
            (-1.0, 1.0, 1.0),
            (-1.0, -1.0, 1.0),
            (1.0, -1.0, 1.0),
            (1.0, 1.0, -1.0),
            (-1.0, 1.0, -1.0),
            (-1.0, -1.0, -1.0),
            (1.0, -1.0, -1.0),
        ]
        .into_iter()
        .map(Vec3::from)
        .collect();

        let (normals, indices) = flat_normals(&positions, &TRIANGLES);
        assert_eq!(normals.len(), 6);
        assert_eq!(indices.len(), 36);
        // First face points along +Z
        assert!(normals[0].abs_diff_eq(Vec3::Z, 1e-6));
    }
}
