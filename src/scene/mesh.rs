use glam::Vec3;

use crate::scene::ObjectId;
use crate::scene::bounds::BoundsCache;

/// Which generator produced a mesh. Purely descriptive; the geometry itself
/// always lives in the vertex array and triangle buffer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MeshPrimitive {
    #[default]
    Mesh,
    Box {
        size: Vec3,
    },
    Sphere {
        radius: f32,
    },
    Cylinder {
        radius: f32,
        height: f32,
    },
    Cone {
        radius: f32,
        height: f32,
    },
}

/// Indexed triangle mesh.
///
/// Vertex attributes are separate array objects held in slots, so several
/// meshes may share one vertex array. Index buffers are plain data owned by
/// the mesh.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub(crate) vertices: Option<ObjectId>,
    pub(crate) normals: Option<ObjectId>,
    pub(crate) colors: Option<ObjectId>,
    pub(crate) tex_coords: Option<ObjectId>,

    pub triangles: Vec<[u32; 3]>,
    /// Per-corner indices into the normal array (three per triangle).
    pub normal_indices: Vec<u32>,
    pub color_indices: Vec<u32>,
    pub tex_coord_indices: Vec<u32>,

    pub primitive: MeshPrimitive,
    pub solid: bool,

    pub(crate) bounds: BoundsCache,
}

impl Default for Mesh {
    fn default() -> Self {
        Self {
            vertices: None,
            normals: None,
            colors: None,
            tex_coords: None,
            triangles: Vec::new(),
            normal_indices: Vec::new(),
            color_indices: Vec::new(),
            tex_coord_indices: Vec::new(),
            primitive: MeshPrimitive::Mesh,
            solid: true,
            bounds: BoundsCache::default(),
        }
    }
}

impl Mesh {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> Option<ObjectId> {
        self.vertices
    }

    pub fn normals(&self) -> Option<ObjectId> {
        self.normals
    }

    pub fn colors(&self) -> Option<ObjectId> {
        self.colors
    }

    pub fn tex_coords(&self) -> Option<ObjectId> {
        self.tex_coords
    }

    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.triangles.push([a, b, c]);
    }

    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    pub fn triangle(&self, index: usize) -> Option<[u32; 3]> {
        self.triangles.get(index).copied()
    }
}
