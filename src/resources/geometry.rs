use glam::{Affine3A, Vec2, Vec3};

/// Axis-aligned bounding box.
///
/// An empty box has `min > max` on every axis ([`BoundingBox::EMPTY`]), so
/// that `union` with an empty box is the identity and no special-casing is
/// needed while accumulating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl BoundingBox {
    pub const EMPTY: Self = Self {
        min: Vec3::INFINITY,
        max: Vec3::NEG_INFINITY,
    };

    #[must_use]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box enclosing every point; empty for an empty iterator.
    pub fn from_points<I: IntoIterator<Item = Vec3>>(points: I) -> Self {
        let mut bbox = Self::EMPTY;
        for point in points {
            bbox.expand_by_point(point);
        }
        bbox
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn clear(&mut self) {
        *self = Self::EMPTY;
    }

    #[must_use]
    pub fn center(&self) -> Vec3 {
        if self.is_empty() {
            return Vec3::ZERO;
        }
        (self.min + self.max) * 0.5
    }

    #[must_use]
    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            return Vec3::ZERO;
        }
        self.max - self.min
    }

    pub fn expand_by_point(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    pub fn expand_by(&mut self, other: &BoundingBox) {
        if other.is_empty() {
            return;
        }
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    #[must_use]
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let mut result = *self;
        result.expand_by(other);
        result
    }

    #[must_use]
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Box enclosing the eight transformed corners. Empty stays empty.
    #[must_use]
    pub fn transform(&self, matrix: &Affine3A) -> Self {
        if self.is_empty() {
            return *self;
        }

        let corners = [
            Vec3::new(self.min.x, self.min.y, self.min.z),
            Vec3::new(self.min.x, self.min.y, self.max.z),
            Vec3::new(self.min.x, self.max.y, self.min.z),
            Vec3::new(self.min.x, self.max.y, self.max.z),
            Vec3::new(self.max.x, self.min.y, self.min.z),
            Vec3::new(self.max.x, self.min.y, self.max.z),
            Vec3::new(self.max.x, self.max.y, self.min.z),
            Vec3::new(self.max.x, self.max.y, self.max.z),
        ];

        Self::from_points(corners.into_iter().map(|corner| matrix.transform_point3(corner)))
    }
}

/// Which per-vertex attribute a [`DataArray`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayType {
    Vertices,
    Normals,
    Colors,
    TexCoords,
}

/// Plain attribute buffer referenced by meshes and point/line sets.
///
/// Arrays have no graph behaviour of their own beyond being owned: a mesh
/// holding a vertex array is registered as one of its owners, so editing the
/// array invalidates the mesh bounds and everything above it.
#[derive(Debug, Clone, PartialEq)]
pub enum DataArray {
    Vertices(Vec<Vec3>),
    Normals(Vec<Vec3>),
    Colors(Vec<Vec3>),
    TexCoords(Vec<Vec2>),
}

impl DataArray {
    #[must_use]
    pub fn empty(array_type: ArrayType) -> Self {
        match array_type {
            ArrayType::Vertices => Self::Vertices(Vec::new()),
            ArrayType::Normals => Self::Normals(Vec::new()),
            ArrayType::Colors => Self::Colors(Vec::new()),
            ArrayType::TexCoords => Self::TexCoords(Vec::new()),
        }
    }

    #[must_use]
    pub fn array_type(&self) -> ArrayType {
        match self {
            Self::Vertices(_) => ArrayType::Vertices,
            Self::Normals(_) => ArrayType::Normals,
            Self::Colors(_) => ArrayType::Colors,
            Self::TexCoords(_) => ArrayType::TexCoords,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Vertices(v) | Self::Normals(v) | Self::Colors(v) => v.len(),
            Self::TexCoords(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 3-component contents (vertices, normals or colors).
    #[must_use]
    pub fn as_vec3(&self) -> Option<&[Vec3]> {
        match self {
            Self::Vertices(v) | Self::Normals(v) | Self::Colors(v) => Some(v),
            Self::TexCoords(_) => None,
        }
    }

    pub fn as_vec3_mut(&mut self) -> Option<&mut Vec<Vec3>> {
        match self {
            Self::Vertices(v) | Self::Normals(v) | Self::Colors(v) => Some(v),
            Self::TexCoords(_) => None,
        }
    }

    #[must_use]
    pub fn as_vec2(&self) -> Option<&[Vec2]> {
        match self {
            Self::TexCoords(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_vec2_mut(&mut self) -> Option<&mut Vec<Vec2>> {
        match self {
            Self::TexCoords(v) => Some(v),
            _ => None,
        }
    }
}
