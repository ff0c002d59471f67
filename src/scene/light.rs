use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    Directional {
        direction: Vec3,
    },
    /// Attenuation is `1 / (constant + linear * d + quadratic * d^2)`.
    Point {
        location: Vec3,
        constant: f32,
        linear: f32,
        quadratic: f32,
    },
    Spot {
        location: Vec3,
        direction: Vec3,
        constant: f32,
        linear: f32,
        quadratic: f32,
        /// Radians.
        beam_width: f32,
        /// Radians.
        cut_off_angle: f32,
    },
}

// Light node: evaluated before traversal, so it carries no bounds
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub on: bool,
    pub color: Vec3,
    pub intensity: f32,
    pub ambient_intensity: f32,
    pub kind: LightKind,
}

impl Default for Light {
    fn default() -> Self {
        Self::directional()
    }
}

impl Light {
    #[must_use]
    pub fn directional() -> Self {
        Self::with_kind(LightKind::Directional {
            direction: Vec3::NEG_Z,
        })
    }

    #[must_use]
    pub fn point() -> Self {
        Self::with_kind(LightKind::Point {
            location: Vec3::ZERO,
            constant: 1.0,
            linear: 0.0,
            quadratic: 0.0,
        })
    }

    #[must_use]
    pub fn spot() -> Self {
        Self::with_kind(LightKind::Spot {
            location: Vec3::ZERO,
            direction: Vec3::NEG_Z,
            constant: 1.0,
            linear: 0.0,
            quadratic: 0.0,
            beam_width: FRAC_PI_2,
            cut_off_angle: FRAC_PI_4,
        })
    }

    fn with_kind(kind: LightKind) -> Self {
        Self {
            on: true,
            color: Vec3::ONE,
            intensity: 1.0,
            ambient_intensity: 0.0,
            kind,
        }
    }
}
