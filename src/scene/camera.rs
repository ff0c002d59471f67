use std::f32::consts::FRAC_PI_4;

use glam::{Affine3A, Mat3A, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Vertical field of view in radians, for an aspect ratio of at least 1.
    Perspective { field_of_view: f32 },
    /// Visible height in world units.
    Orthographic { height: f32 },
}

/// Camera node. Its placement is the `position` matrix, which maps camera
/// space (looking down -Z, +Y up) into the space of its owner.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub projection: Projection,
    pub position: Affine3A,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::perspective()
    }
}

impl Camera {
    #[must_use]
    pub fn perspective() -> Self {
        Self::with_projection(Projection::Perspective {
            field_of_view: FRAC_PI_4,
        })
    }

    #[must_use]
    pub fn orthographic() -> Self {
        Self::with_projection(Projection::Orthographic { height: 2.0 })
    }

    fn with_projection(projection: Projection) -> Self {
        Self {
            projection,
            position: Affine3A::IDENTITY,
            near: 0.01,
            far: 100.0,
        }
    }

    /// Vertical field of view for a viewport of the given aspect ratio.
    ///
    /// `fov` is treated as the field of view of the shorter viewport side:
    /// for portrait viewports it is widened so the horizontal extent keeps
    /// the requested angle.
    #[must_use]
    pub fn fovy(aspect: f32, fov: f32) -> f32 {
        if aspect >= 1.0 {
            fov
        } else {
            2.0 * ((fov * 0.5).tan() / aspect).atan()
        }
    }

    /// Effective vertical field of view of a perspective camera.
    pub fn vertical_field_of_view(&self, aspect: f32) -> Option<f32> {
        match self.projection {
            Projection::Perspective { field_of_view } => Some(Self::fovy(aspect, field_of_view)),
            Projection::Orthographic { .. } => None,
        }
    }

    /// Placement matrix of a camera at `eye` looking along `direction`.
    ///
    /// When `direction` is parallel to `up` the roll is undefined; an
    /// arbitrary axis orthogonal to `direction` is used as the camera's
    /// right vector.
    #[must_use]
    pub fn position_looking_for(eye: Vec3, direction: Vec3, up: Vec3) -> Affine3A {
        let d = direction.normalize();
        let c = d
            .cross(up)
            .try_normalize()
            .unwrap_or_else(|| d.any_orthonormal_vector());
        let u = c.cross(d);
        Affine3A {
            matrix3: Mat3A::from_cols(c.into(), u.into(), (-d).into()),
            translation: eye.into(),
        }
    }

    #[must_use]
    pub fn position_looking_at(eye: Vec3, center: Vec3, up: Vec3) -> Affine3A {
        Self::position_looking_for(eye, center - eye, up)
    }

    pub fn look_at(&mut self, eye: Vec3, center: Vec3, up: Vec3) {
        self.position = Self::position_looking_at(eye, center, up);
    }

    pub fn eye(&self) -> Vec3 {
        Vec3::from(self.position.translation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn fovy_is_unchanged_for_landscape() {
        assert!((Camera::fovy(1.5, 0.8) - 0.8).abs() < EPSILON);
        assert!((Camera::fovy(1.0, 0.8) - 0.8).abs() < EPSILON);
    }

    #[test]
    fn fovy_widens_for_portrait() {
        let fov = FRAC_PI_4;
        let widened = Camera::fovy(0.5, fov);
        assert!(widened > fov);
        assert!(((widened * 0.5).tan() - 2.0 * (fov * 0.5).tan()).abs() < EPSILON);
    }

    #[test]
    fn looking_at_builds_orthonormal_frame() {
        let m = Camera::position_looking_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
        // Camera -Z maps onto the view direction
        let forward = m.transform_vector3(Vec3::NEG_Z);
        assert!((forward - Vec3::NEG_Z).length() < EPSILON);
        let up = m.transform_vector3(Vec3::Y);
        assert!((up - Vec3::Y).length() < EPSILON);
        assert!((Vec3::from(m.translation) - Vec3::new(0.0, 0.0, 5.0)).length() < EPSILON);
    }

    #[test]
    fn looking_along_up_still_builds_a_frame() {
        let m = Camera::position_looking_for(Vec3::ZERO, Vec3::Y, Vec3::Y);
        assert!(m.matrix3.is_finite());
        let forward = m.transform_vector3(Vec3::NEG_Z);
        assert!((forward - Vec3::Y).length() < EPSILON);
        let right = m.transform_vector3(Vec3::X);
        assert!((right.length() - 1.0).abs() < EPSILON);
        assert!(right.dot(Vec3::Y).abs() < EPSILON);
    }
}
