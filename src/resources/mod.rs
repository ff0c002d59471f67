//! Core resource definitions
//!
//! Plain data wrapped as graph objects:
//! - Geometry: bounding boxes and attribute arrays
//! - Image: pixel data shared copy-on-write between clones
//! - Material: surface appearance
//! - Primitives: mesh generators

pub mod geometry;
pub mod image;
pub mod material;
pub mod primitives;

// Re-export commonly used types
pub use geometry::{ArrayType, BoundingBox, DataArray};
pub use image::{Image, ImageData};
pub use material::Material;
