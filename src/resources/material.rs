use glam::Vec3;

/// Surface appearance attached to shapes and point/line sets.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub ambient_intensity: f32,
    pub diffuse_color: Vec3,
    pub emissive_color: Vec3,
    pub specular_color: Vec3,
    pub shininess: f32,
    pub transparency: f32,
}

impl Material {
    #[must_use]
    pub fn new(diffuse_color: Vec3) -> Self {
        Self {
            diffuse_color,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn is_transparent(&self) -> bool {
        self.transparency > 0.0
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient_intensity: 0.02,
            diffuse_color: Vec3::splat(0.8),
            emissive_color: Vec3::ZERO,
            specular_color: Vec3::ZERO,
            shininess: 0.2,
            transparency: 0.0,
        }
    }
}
