// Copyright @yucwang 2026

use crate::core::sensor::Sensor;
use crate::math::constants::{Float, FLOAT_MAX, Vector2f, Vector3f};
use crate::math::ray::Ray3f;

/// Pinhole camera looking from `origin` toward `target`.
pub struct PerspectiveCamera {
    origin: Vector3f,
    forward: Vector3f,
    right: Vector3f,
    up: Vector3f,
    tan_half_fov_y: Float,
    aspect: Float,
    near_clip: Float,
    far_clip: Float,
    width: usize,
    height: usize,
}

impl PerspectiveCamera {
    pub fn new(origin: Vector3f,
               target: Vector3f,
               up: Vector3f,
               fov_y_radians: Float,
               width: usize,
               height: usize) -> Self {
        let forward = (target - origin).normalize();
        let right = forward.cross(&up).normalize();
        let up = right.cross(&forward).normalize();
        let aspect = if height > 0 { width as Float / height as Float } else { 1.0 };

        Self {
            origin,
            forward,
            right,
            up,
            tan_half_fov_y: (0.5 * fov_y_radians).tan(),
            aspect,
            near_clip: 0.0,
            far_clip: FLOAT_MAX,
            width,
            height,
        }
    }

    pub fn with_clip(mut self, near_clip: Float, far_clip: Float) -> Self {
        self.near_clip = near_clip;
        self.far_clip = far_clip;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }
}

impl Sensor for PerspectiveCamera {
    fn sample_ray(&self, u: &Vector2f) -> Ray3f {
        let px = (2.0 * u.x - 1.0) * self.aspect * self.tan_half_fov_y;
        let py = (1.0 - 2.0 * u.y) * self.tan_half_fov_y;

        let d_camera = Vector3f::new(px, py, 1.0).normalize();
        let dir = (self.right * d_camera.x + self.up * d_camera.y + self.forward * d_camera.z).normalize();

        let inv_z = if d_camera.z != 0.0 { 1.0 / d_camera.z } else { FLOAT_MAX };
        let near_t = self.near_clip * inv_z;
        let far_t = if self.far_clip >= FLOAT_MAX { FLOAT_MAX } else { self.far_clip * inv_z };
        let origin = self.origin + dir * near_t;
        Ray3f::new(origin, dir, Some(0.0), Some(far_t - near_t))
    }

    fn resolution(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn describe(&self) -> String {
        format!("PerspectiveCamera: origin = [{}, {}, {}], forward = [{}, {}, {}], fov_y = {} deg, {}x{}",
                self.origin.x, self.origin.y, self.origin.z,
                self.forward.x, self.forward.y, self.forward.z,
                2.0 * self.tan_half_fov_y.atan().to_degrees(),
                self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera(width: usize, height: usize) -> PerspectiveCamera {
        let origin = Vector3f::new(0.0, 0.0, 0.0);
        let target = Vector3f::new(0.0, 0.0, -1.0);
        let up = Vector3f::new(0.0, 1.0, 0.0);
        PerspectiveCamera::new(origin, target, up, std::f32::consts::FRAC_PI_2, width, height)
    }

    #[test]
    fn test_perspective_camera_center_ray() {
        let cam = camera(4, 4);
        let ray = cam.sample_ray(&Vector2f::new(0.5, 0.5));
        let dir = ray.dir();

        assert!((dir.x - 0.0).abs() < 1e-6);
        assert!((dir.y - 0.0).abs() < 1e-6);
        assert!((dir.z + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_perspective_camera_top_left_is_up_and_left() {
        let cam = camera(8, 4);
        assert_eq!(cam.resolution(), (8, 4));

        let dir = cam.sample_ray(&Vector2f::new(0.0, 0.0)).dir();
        assert!(dir.x < 0.0);
        assert!(dir.y > 0.0);
        // Wider than tall: horizontal extent is twice the vertical one.
        assert!((dir.x / dir.y + 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_perspective_camera_clip_range() {
        let cam = camera(4, 4).with_clip(1.0, 3.0);
        let ray = cam.sample_ray(&Vector2f::new(0.5, 0.5));
        assert!((ray.origin().z + 1.0).abs() < 1e-6);
        assert!(ray.test_segment(1.5));
        assert!(!ray.test_segment(2.5));
    }
}
