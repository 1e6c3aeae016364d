//! Per-frame camera snapshot and the water-plane mirror transform.

use glam::{Mat3, Mat4, Vec3};

/// Everything the renderer needs to know about the camera for one frame.
///
/// Supplied by the host each frame; the renderer never mutates it. The
/// reflection pass derives its own camera with [`mirrored_across_water`].
///
/// [`mirrored_across_water`]: SceneSnapshot::mirrored_across_water
#[derive(Debug, Clone, Copy)]
pub struct SceneSnapshot {
    pub eye: Vec3,
    pub center: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl SceneSnapshot {
    pub fn new(eye: Vec3, center: Vec3, aspect: f32) -> Self {
        Self {
            eye,
            center,
            up: Vec3::Y,
            fov_y: std::f32::consts::FRAC_PI_4,
            aspect,
            near: 0.01,
            far: 100.0,
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.center, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Projection times the rotation-only view, for skybox rendering: the
    /// cube must follow the camera orientation but never its position.
    pub fn sky_view_proj(&self) -> Mat4 {
        let rotation = Mat3::from_mat4(self.view_matrix());
        self.projection_matrix() * Mat4::from_mat3(rotation)
    }

    /// Camera for the reflection pass: the eye is mirrored across the water
    /// plane at `height`, the look target's height is negated, and up is
    /// reset to +Y.
    pub fn mirrored_across_water(&self, height: f32) -> Self {
        let mut mirrored = *self;
        mirrored.eye.y -= 2.0 * (self.eye.y - height);
        mirrored.center.y = -self.center.y;
        mirrored.up = Vec3::Y;
        mirrored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirror_formula() {
        let snap = SceneSnapshot::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(1.0, 2.0, 3.0), 1.0);
        let mirrored = snap.mirrored_across_water(1.0);
        assert_eq!(mirrored.eye, Vec3::new(0.0, -3.0, 0.0));
        assert_eq!(mirrored.center, Vec3::new(1.0, -2.0, 3.0));
        assert_eq!(mirrored.up, Vec3::Y);
    }

    #[test]
    fn mirror_at_plane_height_is_identity_for_eye() {
        let snap = SceneSnapshot::new(Vec3::new(2.0, 0.25, -1.0), Vec3::ZERO, 1.6);
        let mirrored = snap.mirrored_across_water(0.25);
        assert_eq!(mirrored.eye, snap.eye);
    }

    #[test]
    fn sky_matrix_ignores_camera_position() {
        let a = SceneSnapshot::new(Vec3::new(0.0, 1.0, 5.0), Vec3::new(0.0, 1.0, 0.0), 1.5);
        let mut b = a;
        // Same view direction, translated eye/center.
        b.eye += Vec3::new(10.0, -3.0, 7.0);
        b.center += Vec3::new(10.0, -3.0, 7.0);

        let ma = a.sky_view_proj();
        let mb = b.sky_view_proj();
        assert!(ma.abs_diff_eq(mb, 1e-5));
    }

    #[test]
    fn view_matrix_places_eye_at_origin() {
        let snap = SceneSnapshot::new(Vec3::new(3.0, 4.0, 5.0), Vec3::ZERO, 1.0);
        let at_origin = snap.view_matrix().transform_point3(snap.eye);
        assert!(at_origin.abs_diff_eq(Vec3::ZERO, 1e-5));
    }
}
