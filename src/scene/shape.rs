use crate::scene::ObjectId;
use crate::scene::bounds::BoundsCache;

/// A renderable node: geometry from a mesh, appearance from a material and
/// an optional texture. All three are slots (see [`crate::scene::Slot`]).
#[derive(Debug, Clone, Default)]
pub struct Shape {
    pub(crate) mesh: Option<ObjectId>,
    pub(crate) material: Option<ObjectId>,
    pub(crate) texture: Option<ObjectId>,
}

impl Shape {
    pub fn mesh(&self) -> Option<ObjectId> {
        self.mesh
    }

    pub fn material(&self) -> Option<ObjectId> {
        self.material
    }

    pub fn texture(&self) -> Option<ObjectId> {
        self.texture
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlotKind {
    PointSet {
        point_size: f32,
    },
    /// `lines` holds pairs of indices into the vertex array.
    LineSet {
        line_width: f32,
        lines: Vec<[u32; 2]>,
    },
}

/// Point or line primitives drawn straight from vertex arrays.
#[derive(Debug, Clone)]
pub struct Plot {
    pub kind: PlotKind,
    pub(crate) vertices: Option<ObjectId>,
    pub(crate) normals: Option<ObjectId>,
    pub(crate) colors: Option<ObjectId>,
    pub(crate) material: Option<ObjectId>,
    pub(crate) bounds: BoundsCache,
}

impl Plot {
    #[must_use]
    pub fn point_set(point_size: f32) -> Self {
        Self::with_kind(PlotKind::PointSet { point_size })
    }

    #[must_use]
    pub fn line_set(line_width: f32) -> Self {
        Self::with_kind(PlotKind::LineSet {
            line_width,
            lines: Vec::new(),
        })
    }

    fn with_kind(kind: PlotKind) -> Self {
        Self {
            kind,
            vertices: None,
            normals: None,
            colors: None,
            material: None,
            bounds: BoundsCache::default(),
        }
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

    pub fn material(&self) -> Option<ObjectId> {
        self.material
    }

    /// Appends a line segment. Returns `false` (and does nothing) for point sets.
    pub fn add_line(&mut self, start: u32, end: u32) -> bool {
        match &mut self.kind {
            PlotKind::LineSet { lines, .. } => {
                lines.push([start, end]);
                true
            }
            PlotKind::PointSet { .. } => false,
        }
    }

    pub fn lines(&self) -> &[[u32; 2]] {
        match &self.kind {
            PlotKind::LineSet { lines, .. } => lines,
            PlotKind::PointSet { .. } => &[],
        }
    }
}
