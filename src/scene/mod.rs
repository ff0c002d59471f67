//! Scene graph module
//!
//! Objects live in a single arena and reference each other by [`ObjectId`]:
//! - SceneGraph: the arena, ownership protocol and update propagation
//! - Group / Transform: ordered composites with cached bounds
//! - Shape, Plot, Mesh, Texture: typed leaves with named slots
//! - Light, Camera: preprocessed nodes
//! - CloneMap: sharing-preserving duplication
//! - SceneVisitor: double dispatch over node kinds

pub(crate) mod bounds;
pub mod camera;
pub mod clone_map;
pub mod graph;
pub mod group;
pub mod light;
pub mod mesh;
pub mod object;
pub mod shape;
pub mod signal;
pub mod slots;
pub mod texture;
pub mod transform;
pub mod update;
pub mod visitor;

// Re-export commonly used types
pub use camera::{Camera, Projection};
pub use clone_map::CloneMap;
pub use graph::SceneGraph;
pub use group::{Group, GroupKind};
pub use light::{Light, LightKind};
pub use mesh::{Mesh, MeshPrimitive};
pub use object::{Elements, Object, ObjectKind, ObjectType};
pub use shape::{Plot, PlotKind, Shape};
pub use signal::{Connection, Signal};
pub use slots::Slot;
pub use texture::{Texture, TextureTransform};
pub use update::{Update, UpdateAction};
pub use visitor::SceneVisitor;

use slotmap::new_key_type;

new_key_type! {
    /// Generational handle of an object in a [`SceneGraph`].
    pub struct ObjectId;
}
