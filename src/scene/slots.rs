use smallvec::SmallVec;

use crate::errors::{GraphError, Result};
use crate::resources::{ArrayType, DataArray, Image, Material};
use crate::scene::ObjectId;
use crate::scene::graph::SceneGraph;
use crate::scene::mesh::Mesh;
use crate::scene::object::{ObjectKind, ObjectType};
use crate::scene::texture::{Texture, TextureTransform};

/// A named single-valued reference from a typed leaf to a payload object.
///
/// | Slot | Held by | Accepts |
/// |---|---|---|
/// | `Mesh` | Shape | Mesh |
/// | `Material` | Shape, Plot | Material |
/// | `Texture` | Shape | Texture |
/// | `Image` | Texture | Image |
/// | `TextureTransform` | Texture | TextureTransform |
/// | `Vertices`, `Normals`, `Colors` | Mesh, Plot | matching data array |
/// | `TexCoords` | Mesh | texture coordinate array |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Mesh,
    Material,
    Texture,
    Image,
    TextureTransform,
    Vertices,
    Normals,
    Colors,
    TexCoords,
}

impl Slot {
    pub const ALL: [Slot; 9] = [
        Slot::Mesh,
        Slot::Material,
        Slot::Texture,
        Slot::Image,
        Slot::TextureTransform,
        Slot::Vertices,
        Slot::Normals,
        Slot::Colors,
        Slot::TexCoords,
    ];

    /// Object type a slot value must have.
    pub fn accepts(self) -> ObjectType {
        match self {
            Slot::Mesh => ObjectType::Mesh,
            Slot::Material => ObjectType::Material,
            Slot::Texture => ObjectType::Texture,
            Slot::Image => ObjectType::Image,
            Slot::TextureTransform => ObjectType::TextureTransform,
            Slot::Vertices => ObjectType::VertexArray,
            Slot::Normals => ObjectType::NormalArray,
            Slot::Colors => ObjectType::ColorArray,
            Slot::TexCoords => ObjectType::TexCoordArray,
        }
    }

    fn holders(self) -> &'static str {
        match self {
            Slot::Mesh | Slot::Texture => "Shape",
            Slot::Material => "Shape, PointSet or LineSet",
            Slot::Image | Slot::TextureTransform => "Texture",
            Slot::Vertices | Slot::Normals | Slot::Colors => "Mesh, PointSet or LineSet",
            Slot::TexCoords => "Mesh",
        }
    }

    /// Fresh payload used by the `get_or_create_*` accessors.
    fn default_kind(self) -> ObjectKind {
        match self {
            Slot::Mesh => ObjectKind::Mesh(Mesh::default()),
            Slot::Material => ObjectKind::Material(Material::default()),
            Slot::Texture => ObjectKind::Texture(Texture::default()),
            Slot::Image => ObjectKind::Image(Image::default()),
            Slot::TextureTransform => ObjectKind::TextureTransform(TextureTransform::default()),
            Slot::Vertices => ObjectKind::Array(DataArray::empty(ArrayType::Vertices)),
            Slot::Normals => ObjectKind::Array(DataArray::empty(ArrayType::Normals)),
            Slot::Colors => ObjectKind::Array(DataArray::empty(ArrayType::Colors)),
            Slot::TexCoords => ObjectKind::Array(DataArray::empty(ArrayType::TexCoords)),
        }
    }
}

impl ObjectKind {
    /// Storage of `slot`, or `None` when this kind has no such slot.
    pub(crate) fn slot_mut(&mut self, slot: Slot) -> Option<&mut Option<ObjectId>> {
        match (self, slot) {
            (ObjectKind::Shape(shape), Slot::Mesh) => Some(&mut shape.mesh),
            (ObjectKind::Shape(shape), Slot::Material) => Some(&mut shape.material),
            (ObjectKind::Shape(shape), Slot::Texture) => Some(&mut shape.texture),
            (ObjectKind::Plot(plot), Slot::Vertices) => Some(&mut plot.vertices),
            (ObjectKind::Plot(plot), Slot::Normals) => Some(&mut plot.normals),
            (ObjectKind::Plot(plot), Slot::Colors) => Some(&mut plot.colors),
            (ObjectKind::Plot(plot), Slot::Material) => Some(&mut plot.material),
            (ObjectKind::Mesh(mesh), Slot::Vertices) => Some(&mut mesh.vertices),
            (ObjectKind::Mesh(mesh), Slot::Normals) => Some(&mut mesh.normals),
            (ObjectKind::Mesh(mesh), Slot::Colors) => Some(&mut mesh.colors),
            (ObjectKind::Mesh(mesh), Slot::TexCoords) => Some(&mut mesh.tex_coords),
            (ObjectKind::Texture(texture), Slot::Image) => Some(&mut texture.image),
            (ObjectKind::Texture(texture), Slot::TextureTransform) => {
                Some(&mut texture.texture_transform)
            }
            _ => None,
        }
    }

    pub(crate) fn slot(&self, slot: Slot) -> Option<Option<ObjectId>> {
        match (self, slot) {
            (ObjectKind::Shape(shape), Slot::Mesh) => Some(shape.mesh),
            (ObjectKind::Shape(shape), Slot::Material) => Some(shape.material),
            (ObjectKind::Shape(shape), Slot::Texture) => Some(shape.texture),
            (ObjectKind::Plot(plot), Slot::Vertices) => Some(plot.vertices),
            (ObjectKind::Plot(plot), Slot::Normals) => Some(plot.normals),
            (ObjectKind::Plot(plot), Slot::Colors) => Some(plot.colors),
            (ObjectKind::Plot(plot), Slot::Material) => Some(plot.material),
            (ObjectKind::Mesh(mesh), Slot::Vertices) => Some(mesh.vertices),
            (ObjectKind::Mesh(mesh), Slot::Normals) => Some(mesh.normals),
            (ObjectKind::Mesh(mesh), Slot::Colors) => Some(mesh.colors),
            (ObjectKind::Mesh(mesh), Slot::TexCoords) => Some(mesh.tex_coords),
            (ObjectKind::Texture(texture), Slot::Image) => Some(texture.image),
            (ObjectKind::Texture(texture), Slot::TextureTransform) => {
                Some(texture.texture_transform)
            }
            _ => None,
        }
    }

    /// Empties every populated slot and returns what they held.
    pub(crate) fn take_slots(&mut self) -> SmallVec<[(Slot, ObjectId); 4]> {
        Slot::ALL
            .into_iter()
            .filter_map(|slot| {
                let target = self.slot_mut(slot)?.take()?;
                Some((slot, target))
            })
            .collect()
    }
}

impl SceneGraph {
    /// Current value of `slot` on `owner`.
    ///
    /// # Errors
    /// [`GraphError::KindMismatch`] if `owner` has no such slot.
    pub fn slot(&self, owner: ObjectId, slot: Slot) -> Result<Option<ObjectId>> {
        let kind = &self.get_object(owner)?.kind;
        kind.slot(slot).ok_or_else(|| GraphError::KindMismatch {
            id: owner,
            expected: slot.holders(),
            found: kind.object_type(),
        })
    }

    /// Points `slot` of `owner` at `value` and returns the previous value.
    ///
    /// The previous target loses one owner registration and the new one
    /// gains one. Cached bounds of `owner` and its ancestors are invalidated.
    pub fn set_slot(
        &mut self,
        owner: ObjectId,
        slot: Slot,
        value: Option<ObjectId>,
    ) -> Result<Option<ObjectId>> {
        let previous = self.slot(owner, slot)?;
        if let Some(target) = value {
            let found = self.object_type(target)?;
            if found != slot.accepts() {
                return Err(GraphError::KindMismatch {
                    id: target,
                    expected: slot.accepts().as_str(),
                    found,
                });
            }
        }
        if previous == value {
            return Ok(previous);
        }

        if let Some(storage) = self.object_mut(owner)?.kind.slot_mut(slot) {
            *storage = value;
        }
        if let Some(old) = previous {
            self.remove_owner(old, owner)?;
        }
        if let Some(new) = value {
            self.add_owner(new, owner)?;
        }
        self.invalidate_bounds_upward(owner);
        Ok(previous)
    }

    /// Returns the target of `slot`, creating a default payload first when
    /// the slot is empty.
    pub fn get_or_create_slot(&mut self, owner: ObjectId, slot: Slot) -> Result<ObjectId> {
        if let Some(existing) = self.slot(owner, slot)? {
            return Ok(existing);
        }
        let created = self.insert(String::new(), slot.default_kind());
        self.set_slot(owner, slot, Some(created))?;
        Ok(created)
    }
}

macro_rules! slot_accessors {
    ($($slot:ident: $get:ident, $set:ident, $get_or_create:ident;)*) => {
        impl SceneGraph {
            $(
                pub fn $get(&self, owner: ObjectId) -> Result<Option<ObjectId>> {
                    self.slot(owner, Slot::$slot)
                }

                pub fn $set(
                    &mut self,
                    owner: ObjectId,
                    value: Option<ObjectId>,
                ) -> Result<Option<ObjectId>> {
                    self.set_slot(owner, Slot::$slot, value)
                }

                pub fn $get_or_create(&mut self, owner: ObjectId) -> Result<ObjectId> {
                    self.get_or_create_slot(owner, Slot::$slot)
                }
            )*
        }
    };
}

slot_accessors! {
    Mesh: mesh, set_mesh, get_or_create_mesh;
    Material: material, set_material, get_or_create_material;
    Texture: texture, set_texture, get_or_create_texture;
    Image: image, set_image, get_or_create_image;
    TextureTransform: texture_transform, set_texture_transform, get_or_create_texture_transform;
    Vertices: vertices, set_vertices, get_or_create_vertices;
    Normals: normals, set_normals, get_or_create_normals;
    Colors: colors, set_colors, get_or_create_colors;
    TexCoords: tex_coords, set_tex_coords, get_or_create_tex_coords;
}
