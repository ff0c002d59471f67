use glam::Vec2;

use crate::scene::ObjectId;

/// Sampling configuration over an image.
#[derive(Debug, Clone)]
pub struct Texture {
    pub(crate) image: Option<ObjectId>,
    pub(crate) texture_transform: Option<ObjectId>,
    pub repeat_s: bool,
    pub repeat_t: bool,
}

impl Default for Texture {
    fn default() -> Self {
        Self {
            image: None,
            texture_transform: None,
            repeat_s: true,
            repeat_t: true,
        }
    }
}

impl Texture {
    pub fn image(&self) -> Option<ObjectId> {
        self.image
    }

    pub fn texture_transform(&self) -> Option<ObjectId> {
        self.texture_transform
    }
}

/// 2D transform applied to texture coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureTransform {
    pub center: Vec2,
    /// Radians.
    pub rotation: f32,
    pub scale: Vec2,
    pub translation: Vec2,
}

impl Default for TextureTransform {
    fn default() -> Self {
        Self {
            center: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
            translation: Vec2::ZERO,
        }
    }
}
