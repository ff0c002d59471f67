use std::fmt;

use smallvec::SmallVec;

use crate::resources::{ArrayType, DataArray, Image, Material};
use crate::scene::camera::Camera;
use crate::scene::group::Group;
use crate::scene::light::Light;
use crate::scene::mesh::Mesh;
use crate::scene::shape::{Plot, PlotKind, Shape};
use crate::scene::signal::Signal;
use crate::scene::texture::{Texture, TextureTransform};
use crate::scene::update::Update;
use crate::scene::ObjectId;

/// Owned references of one object, in enumeration order.
pub type Elements = SmallVec<[ObjectId; 4]>;

/// Payload of an arena entry.
///
/// The first block of variants are traversal nodes (they can be children of
/// a group and are dispatched by visitors). The second block are payload
/// objects owned through named slots.
#[derive(Debug, Clone)]
pub enum ObjectKind {
    // === Nodes ===
    Node,
    Group(Group),
    Shape(Shape),
    Plot(Plot),
    Preprocessed,
    Light(Light),
    Camera(Camera),

    // === Payload objects ===
    Mesh(Mesh),
    Material(Material),
    Texture(Texture),
    TextureTransform(TextureTransform),
    Image(Image),
    Array(DataArray),
}

impl ObjectKind {
    pub fn object_type(&self) -> ObjectType {
        match self {
            Self::Node => ObjectType::Node,
            Self::Group(group) => group.kind.object_type(),
            Self::Shape(_) => ObjectType::Shape,
            Self::Plot(plot) => match plot.kind {
                PlotKind::PointSet { .. } => ObjectType::PointSet,
                PlotKind::LineSet { .. } => ObjectType::LineSet,
            },
            Self::Preprocessed => ObjectType::Preprocessed,
            Self::Light(_) => ObjectType::Light,
            Self::Camera(_) => ObjectType::Camera,
            Self::Mesh(_) => ObjectType::Mesh,
            Self::Material(_) => ObjectType::Material,
            Self::Texture(_) => ObjectType::Texture,
            Self::TextureTransform(_) => ObjectType::TextureTransform,
            Self::Image(_) => ObjectType::Image,
            Self::Array(array) => match array.array_type() {
                ArrayType::Vertices => ObjectType::VertexArray,
                ArrayType::Normals => ObjectType::NormalArray,
                ArrayType::Colors => ObjectType::ColorArray,
                ArrayType::TexCoords => ObjectType::TexCoordArray,
            },
        }
    }

    /// Children of a group, or the populated slots of a typed leaf.
    pub fn elements(&self) -> Elements {
        let slots: [Option<ObjectId>; 4] = match self {
            Self::Group(group) => return group.children.iter().copied().collect(),
            Self::Shape(shape) => [shape.mesh, shape.material, shape.texture, None],
            Self::Plot(plot) => [plot.vertices, plot.normals, plot.colors, plot.material],
            Self::Mesh(mesh) => [mesh.vertices, mesh.normals, mesh.colors, mesh.tex_coords],
            Self::Texture(texture) => [texture.image, texture.texture_transform, None, None],
            _ => return Elements::new(),
        };
        slots.into_iter().flatten().collect()
    }

    /// Marks the bounds cache stale, if this kind has one.
    ///
    /// Returns `None` for kinds without a cache, otherwise whether the cache
    /// was valid before the call.
    pub(crate) fn invalidate_bounds(&self) -> Option<bool> {
        match self {
            Self::Group(group) => Some(group.bounds.invalidate()),
            Self::Mesh(mesh) => Some(mesh.bounds.invalidate()),
            Self::Plot(plot) => Some(plot.bounds.invalidate()),
            _ => None,
        }
    }
}

/// Fieldless mirror of [`ObjectKind`], used for kind checks and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Node,
    Group,
    InvariantGroup,
    UnpickableGroup,
    Overlay,
    PosTransform,
    ScaleTransform,
    Shape,
    PointSet,
    LineSet,
    Preprocessed,
    Light,
    Camera,
    Mesh,
    Material,
    Texture,
    TextureTransform,
    Image,
    VertexArray,
    NormalArray,
    ColorArray,
    TexCoordArray,
}

impl ObjectType {
    /// Whether objects of this type take part in traversal (and can
    /// therefore be children of a group).
    pub fn is_node(self) -> bool {
        matches!(
            self,
            Self::Node
                | Self::Group
                | Self::InvariantGroup
                | Self::UnpickableGroup
                | Self::Overlay
                | Self::PosTransform
                | Self::ScaleTransform
                | Self::Shape
                | Self::PointSet
                | Self::LineSet
                | Self::Preprocessed
                | Self::Light
                | Self::Camera
        )
    }

    pub fn is_group(self) -> bool {
        matches!(
            self,
            Self::Group
                | Self::InvariantGroup
                | Self::UnpickableGroup
                | Self::Overlay
                | Self::PosTransform
                | Self::ScaleTransform
        )
    }

    pub fn is_transform(self) -> bool {
        matches!(self, Self::PosTransform | Self::ScaleTransform)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Node => "Node",
            Self::Group => "Group",
            Self::InvariantGroup => "InvariantGroup",
            Self::UnpickableGroup => "UnpickableGroup",
            Self::Overlay => "Overlay",
            Self::PosTransform => "PosTransform",
            Self::ScaleTransform => "ScaleTransform",
            Self::Shape => "Shape",
            Self::PointSet => "PointSet",
            Self::LineSet => "LineSet",
            Self::Preprocessed => "Preprocessed",
            Self::Light => "Light",
            Self::Camera => "Camera",
            Self::Mesh => "Mesh",
            Self::Material => "Material",
            Self::Texture => "Texture",
            Self::TextureTransform => "TextureTransform",
            Self::Image => "Image",
            Self::VertexArray => "VertexArray",
            Self::NormalArray => "NormalArray",
            Self::ColorArray => "ColorArray",
            Self::TexCoordArray => "TexCoordArray",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One arena entry: identity, back-references and notification channels.
///
/// `owners` is a multiset in registration order. It routes notifications
/// upward and drives the connection signal; it never keeps anything alive.
#[derive(Debug)]
pub struct Object {
    pub(crate) name: String,
    pub(crate) owners: SmallVec<[ObjectId; 2]>,
    pub(crate) sig_updated: Signal<Update>,
    pub(crate) sig_graph_connection: Signal<bool>,
    pub(crate) kind: ObjectKind,
}

impl Object {
    pub(crate) fn new(name: String, kind: ObjectKind) -> Self {
        Self {
            name,
            owners: SmallVec::new(),
            sig_updated: Signal::new(),
            sig_graph_connection: Signal::new(),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owners(&self) -> &[ObjectId] {
        &self.owners
    }

    pub fn owner_count(&self) -> usize {
        self.owners.len()
    }

    pub fn kind(&self) -> &ObjectKind {
        &self.kind
    }

    pub fn object_type(&self) -> ObjectType {
        self.kind.object_type()
    }

    pub fn is_node(&self) -> bool {
        self.object_type().is_node()
    }

    pub fn elements(&self) -> Elements {
        self.kind.elements()
    }
}
