#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]

pub mod errors;
pub mod resources;
pub mod scene;
pub mod settings;

pub use errors::{GraphError, Result};
pub use resources::primitives::*;
pub use resources::{ArrayType, BoundingBox, DataArray, Image, ImageData, Material};
pub use scene::{
    Camera, CloneMap, Group, GroupKind, Light, LightKind, Mesh, MeshPrimitive, ObjectId,
    ObjectKind, ObjectType, Plot, PlotKind, Projection, SceneGraph, SceneVisitor, Shape, Slot,
    Texture, TextureTransform, Update, UpdateAction,
};
pub use settings::GraphSettings;
